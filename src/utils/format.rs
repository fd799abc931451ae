/// Format a countdown as "Xh Ym", "Ym", or "now"
pub fn format_countdown(hours: u32, minutes: u32) -> String {
    match (hours, minutes) {
        (0, 0) => "now".to_string(),
        (0, m) => format!("{}m", m),
        (h, m) => format!("{}h {}m", h, m),
    }
}
