/// Checks if a color string is a hex color: `#` followed by 3, 4, 6 or 8 hex digits.
pub fn is_valid_color(color: &str) -> bool {
    let Some(hex) = color.strip_prefix('#') else {
        return false;
    };

    let valid_lengths = [3, 4, 6, 8];
    valid_lengths.contains(&hex.len()) && hex.chars().all(|c| c.is_ascii_hexdigit())
}
