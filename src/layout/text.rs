/// Rough advance width for proportional sans-serif text.
const AVERAGE_CHAR_WIDTH: f32 = 0.6;

pub fn estimate_text_width(text: &str, font_size: f32) -> f32 {
    text.chars().count() as f32 * font_size * AVERAGE_CHAR_WIDTH
}

/// Compact number text: integers without decimals, otherwise at most two.
pub fn format_number(value: f64) -> String {
    let scaled = value * 100.0;
    if !scaled.is_finite() {
        return format!("{:.0}", value);
    }
    let rounded = scaled.round() / 100.0;
    if rounded == 0.0 {
        return "0".to_string();
    }
    if (rounded - rounded.round()).abs() < 1e-9 {
        return format!("{:.0}", rounded);
    }
    let text = format!("{:.2}", rounded);
    text.trim_end_matches('0').to_string()
}

pub fn format_percent(percent: f64) -> String {
    format!("{:.1}%", percent)
}
