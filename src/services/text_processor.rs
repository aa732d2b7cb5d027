// Text Processing Service
// Punctuation normalization and derivation of words/sentences for a text unit

use regex::Regex;
use std::sync::OnceLock;

fn exotic_space_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[\u{3000}\u{00A0}\u{2009}\u{202F}]").expect("space regex"))
}

fn horizontal_ws_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[ \t\x0C\x0B]+").expect("whitespace regex"))
}

fn sentence_end_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[.!?]+").expect("sentence regex"))
}

/// Normalize typographic punctuation and whitespace.
/// Blank lines survive so paragraph boundaries are kept.
pub fn normalize_punctuation(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }

    let mut s = text
        .replace(['\u{201c}', '\u{201d}', '\u{201e}', '\u{00ab}', '\u{00bb}'], "\"")
        .replace(['\u{2018}', '\u{2019}'], "'")
        .replace(['\u{2014}', '\u{2013}'], "-")
        .replace('\u{2026}', "...");

    s = exotic_space_re().replace_all(&s, " ").to_string();

    // Normalize line endings
    s = s.replace("\r\n", "\n").replace('\r', "\n");

    s = horizontal_ws_re().replace_all(&s, " ").to_string();

    s.lines()
        .map(|ln| ln.trim())
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string()
}

/// Whitespace word count, as the length gate measures it.
pub fn count_words(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Text under analysis with its derived word and sentence sequences.
#[derive(Debug, Clone)]
pub struct TextUnit<'a> {
    raw: &'a str,
    words: Vec<String>,
    sentences: Vec<&'a str>,
}

impl<'a> TextUnit<'a> {
    pub fn new(raw: &'a str) -> Self {
        Self {
            raw,
            words: split_words(raw),
            sentences: split_sentences(raw),
        }
    }

    pub fn raw(&self) -> &'a str {
        self.raw
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn sentences(&self) -> &[&'a str] {
        &self.sentences
    }

    pub fn word_count(&self) -> usize {
        self.words.len()
    }

    pub fn sentence_count(&self) -> usize {
        self.sentences.len()
    }
}

/// Lowercased whitespace-split tokens with surrounding punctuation trimmed.
/// Inner apostrophes and hyphens stay (`it's`, `well-known`).
pub fn split_words(text: &str) -> Vec<String> {
    text.split_whitespace()
        .map(|w| w.trim_matches(|c: char| !c.is_alphanumeric()))
        .filter(|w| !w.is_empty())
        .map(|w| w.to_lowercase())
        .collect()
}

/// Split on runs of terminal punctuation; empty sentences are discarded.
pub fn split_sentences(text: &str) -> Vec<&str> {
    sentence_end_re()
        .split(text)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}
