// Output formatting — terminal display for reports.

pub mod terminal;

/// Truncate a string to `max_chars` characters, appending "..." when
/// something was cut. Char-based so accented text never splits a
/// UTF-8 sequence.
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        text.to_string()
    } else {
        let kept: String = text.chars().take(max_chars).collect();
        format!("{kept}...")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncates_on_char_boundaries() {
        assert_eq!(truncate_chars("référencement", 4), "réfé...");
        assert_eq!(truncate_chars("seo", 10), "seo");
    }
}
