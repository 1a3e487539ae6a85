//! Terminal output utilities
//!
//! Provides consistent formatting for CLI output.

use owo_colors::OwoColorize;

/// Status message helpers
pub struct Status;

impl Status {
    /// Print a success message
    pub fn success(message: &str) {
        println!("{} {}", "✓".green(), message);
    }

    /// Print an error message
    pub fn error(message: &str) {
        eprintln!("{} {}", "✗".red(), message);
    }

    /// Print a warning message
    pub fn warning(message: &str) {
        eprintln!("{} {}", "⚠".yellow(), message);
    }

    /// Print an info message
    pub fn info(message: &str) {
        println!("{} {}", "ℹ".blue(), message);
    }

    /// Print a header
    pub fn header(message: &str) {
        println!();
        println!("{}", message.bold());
        println!("{}", "─".repeat(message.chars().count()));
    }

    /// Print an aligned `label: value` line
    pub fn field(label: &str, value: &str) {
        println!("  {:<14} {}", format!("{label}:").dimmed(), value);
    }
}

/// Format a distance in metres, switching to kilometres above 1 km
pub fn format_distance(meters: f64) -> String {
    if meters >= 1_000.0 {
        format!("{:.2} km", meters / 1_000.0)
    } else {
        format!("{meters:.1} m")
    }
}

/// Format an area in square metres, switching to hectares above 1 ha
pub fn format_area(square_meters: f64) -> String {
    const HECTARE: f64 = 10_000.0;

    if square_meters >= HECTARE {
        format!("{:.2} ha", square_meters / HECTARE)
    } else {
        format!("{square_meters:.1} m²")
    }
}

/// Format an optional metric value, `-` when absent
pub fn format_metric(value: Option<f64>) -> String {
    value.map_or_else(|| "-".to_string(), |v| format!("{v}"))
}

/// Format a count with singular/plural
pub fn format_count(count: usize, singular: &str, plural: &str) -> String {
    if count == 1 {
        format!("{count} {singular}")
    } else {
        format!("{count} {plural}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_distance_m() {
        assert_eq!(format_distance(512.34), "512.3 m");
    }

    #[test]
    fn test_format_distance_km() {
        assert_eq!(format_distance(12_500.0), "12.50 km");
    }

    #[test]
    fn test_format_area_m2() {
        assert_eq!(format_area(250.0), "250.0 m²");
    }

    #[test]
    fn test_format_area_ha() {
        assert_eq!(format_area(25_000.0), "2.50 ha");
    }

    #[test]
    fn test_format_metric() {
        assert_eq!(format_metric(Some(100.0)), "100");
        assert_eq!(format_metric(Some(0.5)), "0.5");
        assert_eq!(format_metric(None), "-");
    }

    #[test]
    fn test_format_count_singular() {
        assert_eq!(format_count(1, "site", "sites"), "1 site");
    }

    #[test]
    fn test_format_count_plural() {
        assert_eq!(format_count(5, "site", "sites"), "5 sites");
    }
}
