// Preview module: renders the current photo with half-block characters

use crate::domain::ImageItem;
use image::{DynamicImage, GenericImageView, Pixel};
use ratatui::{
    style::{Color, Style},
    text::{Line, Span},
};
use std::io;
use std::path::{Path, PathBuf};

/// Loads an image from a file path
pub fn load_image(path: &Path) -> io::Result<DynamicImage> {
    image::open(path).map_err(|e| io::Error::other(format!("Image loading error: {}", e)))
}

/// Calculates new dimensions to fit image within max width and height while preserving aspect ratio
pub fn calculate_resize_dimensions(
    original_width: u32,
    original_height: u32,
    max_width: u32,
    max_height: u32,
) -> (u32, u32) {
    if original_width == 0 || original_height == 0 {
        return (0, 0);
    }

    let width_ratio = max_width as f64 / original_width as f64;
    let height_ratio = max_height as f64 / original_height as f64;

    let ratio = width_ratio.min(height_ratio);

    if ratio >= 1.0 {
        // Image is smaller than max dimensions, don't upscale
        (original_width, original_height)
    } else {
        let new_width = ((original_width as f64 * ratio) as u32).max(1);
        let new_height = ((original_height as f64 * ratio) as u32).max(1);
        (new_width, new_height)
    }
}

/// Converts an image to styled lines using half-block characters.
/// The upper half block (▀) takes the upper pixel as foreground and the
/// lower pixel as background, so each cell shows two pixels.
pub fn image_to_halfblock_lines(img: &DynamicImage, width: u32, height: u32) -> Vec<Line<'static>> {
    if width == 0 || height == 0 {
        return Vec::new();
    }

    let height = if height % 2 == 0 { height } else { height + 1 };

    // Triangle is fast enough for full-size camera JPEGs
    let img = img.resize_exact(width, height, image::imageops::FilterType::Triangle);
    let img = img.to_rgb8();

    let term_height = height / 2;
    let mut lines = Vec::with_capacity(term_height as usize);

    for y in 0..term_height {
        let upper_y = y * 2;
        let lower_y = upper_y + 1;

        let mut spans = Vec::with_capacity(width as usize);

        for x in 0..width {
            let upper_pixel = img.get_pixel(x, upper_y).to_rgb();
            let lower_pixel = if lower_y < height {
                img.get_pixel(x, lower_y).to_rgb()
            } else {
                upper_pixel
            };

            let style = Style::default()
                .fg(Color::Rgb(upper_pixel[0], upper_pixel[1], upper_pixel[2]))
                .bg(Color::Rgb(lower_pixel[0], lower_pixel[1], lower_pixel[2]));

            spans.push(Span::styled("▀", style));
        }

        lines.push(Line::from(spans));
    }

    lines
}

/// A rendered photo sized for a terminal area
#[derive(Debug, Clone)]
pub struct ImagePreview {
    pub width: u32,
    pub height: u32,
    pub lines: Vec<Line<'static>>,
}

/// Renders `item` to fit `cols` x `rows` terminal cells
pub fn generate_image_preview(item: &ImageItem, cols: u16, rows: u16) -> io::Result<ImagePreview> {
    let img = load_image(&item.path)?;
    let (width, height) = img.dimensions();

    // Two pixels per terminal row
    let (new_width, new_height) =
        calculate_resize_dimensions(width, height, u32::from(cols), u32::from(rows) * 2);

    Ok(ImagePreview {
        width,
        height,
        lines: image_to_halfblock_lines(&img, new_width, new_height),
    })
}

/// Keeps the last rendered preview so redraws do not decode the photo again
#[derive(Debug, Default)]
pub struct PreviewCache {
    key: Option<(PathBuf, u16, u16)>,
    preview: Option<Result<ImagePreview, String>>,
}

impl PreviewCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_or_render(&mut self, item: &ImageItem, cols: u16, rows: u16) -> &Result<ImagePreview, String> {
        let key = (item.path.clone(), cols, rows);
        if self.key.as_ref() != Some(&key) || self.preview.is_none() {
            self.preview = Some(generate_image_preview(item, cols, rows).map_err(|e| e.to_string()));
            self.key = Some(key);
        }
        self.preview.get_or_insert_with(|| Err("No preview".to_string()))
    }

    pub fn reset(&mut self) {
        self.key = None;
        self.preview = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use tempfile::TempDir;

    fn item_for(path: PathBuf) -> ImageItem {
        ImageItem {
            name: path.file_name().unwrap().to_string_lossy().to_string(),
            path,
            size: 0,
            modified_date: Utc::now(),
        }
    }

    #[test]
    fn test_calculate_resize_dimensions_scale_down() {
        assert_eq!(calculate_resize_dimensions(1000, 500, 100, 100), (100, 50));
    }

    #[test]
    fn test_calculate_resize_dimensions_no_upscale() {
        assert_eq!(calculate_resize_dimensions(50, 40, 100, 100), (50, 40));
    }

    #[test]
    fn test_calculate_resize_dimensions_zero() {
        assert_eq!(calculate_resize_dimensions(0, 100, 100, 100), (0, 0));
    }

    #[test]
    fn test_calculate_resize_dimensions_tall_image() {
        assert_eq!(calculate_resize_dimensions(500, 1000, 100, 100), (50, 100));
    }

    #[test]
    fn test_image_to_halfblock_dimensions() {
        let img = DynamicImage::ImageRgb8(image::RgbImage::from_fn(20, 10, |_, _| {
            image::Rgb([10, 20, 30])
        }));

        let lines = image_to_halfblock_lines(&img, 20, 9);

        // Odd height is rounded up, two pixels per row
        assert_eq!(lines.len(), 5);
        assert_eq!(lines[0].spans.len(), 20);
    }

    #[test]
    fn test_load_image_nonexistent() {
        assert!(load_image(Path::new("/nonexistent/photo.jpg")).is_err());
    }

    #[test]
    fn test_generate_preview_with_real_image() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("gray.png");
        let img = image::RgbImage::from_fn(100, 50, |x, _| {
            let v = (x * 2) as u8;
            image::Rgb([v, v, v])
        });
        img.save(&path).unwrap();

        let preview = generate_image_preview(&item_for(path), 40, 20).unwrap();

        assert_eq!((preview.width, preview.height), (100, 50));
        assert_eq!(preview.lines.len(), 10);
    }

    #[test]
    fn test_preview_cache_reuses_result() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("red.png");
        image::RgbImage::from_fn(8, 8, |_, _| image::Rgb([255, 0, 0]))
            .save(&path)
            .unwrap();
        let item = item_for(path.clone());

        let mut cache = PreviewCache::new();
        assert!(cache.get_or_render(&item, 10, 10).is_ok());

        // Cached result survives the file going away
        std::fs::remove_file(&path).unwrap();
        assert!(cache.get_or_render(&item, 10, 10).is_ok());

        cache.reset();
        assert!(cache.get_or_render(&item, 10, 10).is_err());
    }
}
