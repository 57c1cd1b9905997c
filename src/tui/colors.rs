// Color palette for the terminal interface
use ratatui::style::Color;

/// Discard actions and errors
pub const ACCENT_PRIMARY: Color = Color::Rgb(239, 83, 80);
/// Keep actions and success
pub const ACCENT_SECONDARY: Color = Color::Rgb(102, 187, 106);
pub const ACCENT_HIGHLIGHT: Color = Color::Rgb(100, 181, 246);
pub const TEXT_PRIMARY: Color = Color::Rgb(236, 239, 241);
pub const TEXT_SECONDARY: Color = Color::Rgb(144, 164, 174);
pub const BG_DARK: Color = Color::Rgb(24, 26, 31);
pub const BORDER_COLOR: Color = Color::Rgb(69, 90, 100);
