//! Greedy line breaking for the widget text bitmap.
//!
//! # Invariants
//! - Explicit `\n` always starts a new line.
//! - A line is only wider than `max_width` when a single cluster is.
//! - At most `max_lines` lines are returned; the rest are counted in `dropped_lines`.

/// One laid-out line with its measured advance width.
#[derive(Debug, Clone, PartialEq)]
pub struct LaidOutLine {
    pub text: String,
    pub width: f32,
}

/// Result of breaking a text block into lines.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TextLayout {
    pub lines: Vec<LaidOutLine>,
    pub dropped_lines: usize,
}

impl TextLayout {
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Widest kept line.
    pub fn max_line_width(&self) -> f32 {
        self.lines.iter().map(|line| line.width).fold(0.0, f32::max)
    }
}

/// Breaks `text` into lines no wider than `max_width` using `measure`.
///
/// Empty or whitespace-only input yields an empty layout.
pub fn layout_text(
    text: &str,
    max_width: f32,
    max_lines: usize,
    measure: &dyn Fn(&str) -> f32,
) -> TextLayout {
    if text.trim().is_empty() {
        return TextLayout::default();
    }

    let mut lines: Vec<String> = Vec::new();
    for paragraph in text.split('\n') {
        let paragraph = paragraph.trim_end_matches('\r');
        let mut current = String::new();
        for word in paragraph.split_whitespace() {
            if current.is_empty() {
                current = place_word(word, max_width, measure, &mut lines);
                continue;
            }
            let candidate = format!("{current} {word}");
            if measure(&candidate) <= max_width {
                current = candidate;
            } else {
                lines.push(std::mem::take(&mut current));
                current = place_word(word, max_width, measure, &mut lines);
            }
        }
        lines.push(current);
    }

    // Trailing blank paragraphs add no visible content.
    while lines.last().is_some_and(|line| line.is_empty()) {
        lines.pop();
    }

    let dropped_lines = lines.len().saturating_sub(max_lines);
    lines.truncate(max_lines);
    TextLayout {
        lines: lines
            .into_iter()
            .map(|text| {
                let width = measure(&text);
                LaidOutLine { text, width }
            })
            .collect(),
        dropped_lines,
    }
}

/// Starts a line with `word`, splitting it by cluster when it alone overflows.
///
/// Returns the unfinished tail, which becomes the current line.
fn place_word(
    word: &str,
    max_width: f32,
    measure: &dyn Fn(&str) -> f32,
    lines: &mut Vec<String>,
) -> String {
    if measure(word) <= max_width {
        return word.to_string();
    }

    let mut piece = String::new();
    for ch in word.chars() {
        if piece.is_empty() || !starts_cluster(ch) {
            piece.push(ch);
            continue;
        }
        let mut candidate = piece.clone();
        candidate.push(ch);
        if measure(&candidate) > max_width {
            lines.push(std::mem::replace(&mut piece, ch.to_string()));
        } else {
            piece = candidate;
        }
    }
    piece
}

/// Whether a line may break before `ch`.
///
/// Combining marks (Latin diacritics, Arabic harakat and Quranic annotation
/// signs) stay attached to their base letter.
pub(crate) fn starts_cluster(ch: char) -> bool {
    !matches!(
        ch as u32,
        0x0300..=0x036F
            | 0x0610..=0x061A
            | 0x064B..=0x065F
            | 0x0670
            | 0x06D6..=0x06DC
            | 0x06DF..=0x06E4
            | 0x06E7..=0x06E8
            | 0x06EA..=0x06ED
            | 0x200C..=0x200D
            | 0xFE20..=0xFE2F
    )
}

#[cfg(test)]
mod tests {
    use super::{layout_text, starts_cluster};

    fn ten_per_char(text: &str) -> f32 {
        text.chars().count() as f32 * 10.0
    }

    #[test]
    fn keeps_short_text_on_one_line() {
        let layout = layout_text("one two", 100.0, 4, &ten_per_char);
        assert_eq!(layout.lines.len(), 1);
        assert_eq!(layout.lines[0].text, "one two");
        assert_eq!(layout.lines[0].width, 70.0);
    }

    #[test]
    fn wraps_at_word_boundaries() {
        let layout = layout_text("alpha beta gamma", 110.0, 4, &ten_per_char);
        let texts: Vec<_> = layout.lines.iter().map(|line| line.text.as_str()).collect();
        assert_eq!(texts, vec!["alpha beta", "gamma"]);
    }

    #[test]
    fn caps_lines_and_counts_dropped() {
        let layout = layout_text("a\nb\nc\nd\ne\nf", 100.0, 4, &ten_per_char);
        assert_eq!(layout.lines.len(), 4);
        assert_eq!(layout.dropped_lines, 2);
        assert_eq!(layout.lines[3].text, "d");
    }

    #[test]
    fn splits_overlong_word_by_character() {
        let layout = layout_text("abcdefghij", 40.0, 4, &ten_per_char);
        let texts: Vec<_> = layout.lines.iter().map(|line| line.text.as_str()).collect();
        assert_eq!(texts, vec!["abcd", "efgh", "ij"]);
    }

    #[test]
    fn never_separates_harakat_from_base_letter() {
        // Each base letter carries one fatha; width is counted per char.
        let word = "بَبَبَ";
        let layout = layout_text(word, 30.0, 4, &ten_per_char);
        for line in &layout.lines {
            let first = line.text.chars().next().expect("non-empty line");
            assert!(starts_cluster(first), "line starts with a mark: {:?}", line.text);
        }
    }

    #[test]
    fn blank_text_produces_no_lines() {
        assert!(layout_text("  \n ", 100.0, 4, &ten_per_char).is_empty());
    }

    #[test]
    fn keeps_interior_blank_paragraph() {
        let layout = layout_text("a\n\nb\n", 100.0, 4, &ten_per_char);
        let texts: Vec<_> = layout.lines.iter().map(|line| line.text.as_str()).collect();
        assert_eq!(texts, vec!["a", "", "b"]);
    }
}
