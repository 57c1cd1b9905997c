// Formatting helpers shared by the views

/// Formats a byte count for display (e.g. "1.5 MB")
pub fn format_file_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["KB", "MB", "GB", "TB"];

    if bytes < 1024 {
        return format!("{} B", bytes);
    }

    let mut value = bytes as f64 / 1024.0;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }

    format!("{:.1} {}", value, UNITS[unit])
}

/// Fraction of reviewed items, 0.0 when there is nothing to review
pub fn calculate_progress(position: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        (position.min(total) as f64) / total as f64
    }
}
