//! Text helpers for terminal output.

use unicode_width::UnicodeWidthChar;

/// Truncate text to fit within `max_width` terminal columns.
///
/// Wide characters count as two columns. When the text is cut, `...` is
/// appended and included in the width.
///
/// # Examples
///
/// ```
/// use book_bound::utils::truncate_with_ellipsis;
///
/// assert_eq!(truncate_with_ellipsis("Children of Blood and Bone", 12), "Children ...");
/// assert_eq!(truncate_with_ellipsis("Dune", 12), "Dune");
/// ```
pub fn truncate_with_ellipsis(text: &str, max_width: usize) -> String {
    if max_width == 0 {
        return String::new();
    }

    let char_widths: Vec<(char, usize)> = text
        .chars()
        .map(|c| (c, c.width().unwrap_or(1)))
        .collect();

    let total_width: usize = char_widths.iter().map(|(_, w)| *w).sum();
    if total_width <= max_width {
        return text.to_string();
    }

    let budget = max_width.saturating_sub(3);
    let mut current_width = 0;
    let mut end_idx = 0;

    for (i, (_, w)) in char_widths.iter().enumerate() {
        if current_width + w > budget {
            break;
        }
        current_width += w;
        end_idx = i + 1;
    }

    if end_idx == 0 {
        return "...".to_string();
    }

    let truncated: String = char_widths[..end_idx].iter().map(|(c, _)| *c).collect();
    format!("{}...", truncated)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_text_untouched() {
        assert_eq!(truncate_with_ellipsis("Begin Again", 20), "Begin Again");
        assert_eq!(truncate_with_ellipsis("", 5), "");
    }

    #[test]
    fn test_truncates_with_ellipsis() {
        assert_eq!(truncate_with_ellipsis("The Hunger Games", 10), "The Hun...");
    }

    #[test]
    fn test_zero_and_tiny_widths() {
        assert_eq!(truncate_with_ellipsis("Dune", 0), "");
        assert_eq!(truncate_with_ellipsis("Dune Messiah", 3), "...");
    }

    #[test]
    fn test_wide_characters() {
        // each CJK character is two columns wide
        assert_eq!(truncate_with_ellipsis("三体三体三体", 8), "三体...");
    }
}
