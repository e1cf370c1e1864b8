//! Small text helpers shared by the section renderers.

/// Uppercase the first character, leave the rest untouched ("rice" -> "Rice").
pub fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Render a confidence value the way it reads on screen: `96` -> "96%",
/// `87.25` -> "87.25%".
pub fn format_percent(value: f64) -> String {
    format!("{}%", value)
}

/// Prefix an entry with its 1-based list position ("1. Remove infected leaves").
pub fn numbered(index: usize, item: &str) -> String {
    format!("{}. {}", index + 1, item)
}
