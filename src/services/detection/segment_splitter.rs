// Segment Splitter
// Partitions text into trimmed, non-empty segments for localized scoring.
// Boundaries: a blank line, or a period followed by whitespace and an uppercase letter.

use regex::Regex;
use std::sync::OnceLock;

fn boundary_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"\r?\n(?:[ \t]*\r?\n)+|\.\s+\p{Lu}").expect("segment boundary regex")
    })
}

/// A segment as a borrowed slice of the analyzed text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SegmentSpan<'a> {
    pub index: usize,
    /// UTF-8 byte offsets into the source text, end-exclusive.
    pub start: usize,
    pub end: usize,
    pub text: &'a str,
}

/// Lazy left-to-right scan. Call [`segments`] again to restart.
#[derive(Debug, Clone)]
pub struct SegmentSplitter<'a> {
    text: &'a str,
    cursor: usize,
    next_index: usize,
}

pub fn segments(text: &str) -> SegmentSplitter<'_> {
    SegmentSplitter {
        text,
        cursor: 0,
        next_index: 0,
    }
}

pub fn split_segments(text: &str) -> Vec<SegmentSpan<'_>> {
    segments(text).collect()
}

impl<'a> SegmentSplitter<'a> {
    /// (end of current piece, start of the next one)
    fn next_boundary(&self) -> (usize, usize) {
        let Some(m) = boundary_re().find_at(self.text, self.cursor) else {
            return (self.text.len(), self.text.len());
        };
        if m.as_str().starts_with('.') {
            // Keep the period; the uppercase letter opens the next segment.
            let upper_len = m.as_str().chars().last().map(char::len_utf8).unwrap_or(0);
            (m.start() + 1, m.end() - upper_len)
        } else {
            (m.start(), m.end())
        }
    }
}

impl<'a> Iterator for SegmentSplitter<'a> {
    type Item = SegmentSpan<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let text = self.text;
        while self.cursor < text.len() {
            let (piece_end, next_start) = self.next_boundary();
            let piece = &text[self.cursor..piece_end];
            let start = self.cursor + (piece.len() - piece.trim_start().len());
            let trimmed = piece.trim();
            self.cursor = next_start;

            if trimmed.is_empty() {
                continue;
            }

            let span = SegmentSpan {
                index: self.next_index,
                start,
                end: start + trimmed.len(),
                text: trimmed,
            };
            self.next_index += 1;
            return Some(span);
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(text: &str) -> Vec<&str> {
        split_segments(text).iter().map(|s| s.text).collect()
    }

    #[test]
    fn test_blank_lines_split_paragraphs() {
        let text = "First paragraph\nstill first.\n\n\nSecond paragraph";
        assert_eq!(texts(text), vec!["First paragraph\nstill first.", "Second paragraph"]);
    }

    #[test]
    fn test_period_before_uppercase_splits() {
        let text = "One sentence here. Another one follows. and lowercase stays.";
        assert_eq!(
            texts(text),
            vec!["One sentence here.", "Another one follows. and lowercase stays."]
        );
    }

    #[test]
    fn test_no_boundary_yields_whole_trimmed_text() {
        assert_eq!(texts("   just one piece of text   "), vec!["just one piece of text"]);
    }

    #[test]
    fn test_empty_and_blank_inputs() {
        assert!(split_segments("").is_empty());
        assert!(split_segments(" \n\n \n").is_empty());
    }

    #[test]
    fn test_offsets_point_into_source() {
        let text = "  Alpha beta.  Gamma delta.\n\n Epsilon";
        for seg in split_segments(text) {
            assert_eq!(&text[seg.start..seg.end], seg.text);
        }
        let indices: Vec<usize> = split_segments(text).iter().map(|s| s.index).collect();
        assert_eq!(indices, vec![0, 1, 2]);
    }

    #[test]
    fn test_non_ascii_uppercase_opens_segment() {
        let text = "Det var godt. Ære være ham.";
        assert_eq!(texts(text), vec!["Det var godt.", "Ære være ham."]);
    }

    #[test]
    fn test_resplitting_a_segment_is_identity() {
        let text = "Intro line. Next Line here.\n\nA list:\n- one\n- two\n \nClosing. Done";
        for seg in split_segments(text) {
            assert_eq!(texts(seg.text), vec![seg.text]);
        }
    }

    #[test]
    fn test_splitter_is_restartable() {
        let text = "A b. C d.\n\nE f.";
        let first: Vec<_> = segments(text).collect();
        let second: Vec<_> = segments(text).collect();
        assert_eq!(first, second);
        assert_eq!(first.len(), 3);
    }
}
