//! Text rendering for ranked word lists.

use unicode_width::UnicodeWidthStr;

use wordtrie_core::{Suggestion, WordEntry};

fn column_width<'a>(words: impl Iterator<Item = &'a str>) -> usize {
    words.map(UnicodeWidthStr::width).max().unwrap_or(0)
}

fn pad(word: &str, width: usize) -> String {
    let display_width = UnicodeWidthStr::width(word);
    if display_width < width {
        format!("{}{}", word, " ".repeat(width - display_width))
    } else {
        word.to_string()
    }
}

/// Numbered `word (frequency)` lines, frequencies aligned by display width.
pub fn format_ranked(entries: &[WordEntry]) -> String {
    let width = column_width(entries.iter().map(|e| e.text.as_str()));
    let mut out = String::new();
    for (i, entry) in entries.iter().enumerate() {
        out.push_str(&format!(
            "{:>2}. {}  ({})\n",
            i + 1,
            pad(&entry.text, width),
            entry.frequency
        ));
    }
    out
}

/// Numbered `word (dist=…, freq=…)` lines.
pub fn format_suggestions(suggestions: &[Suggestion]) -> String {
    let width = column_width(suggestions.iter().map(|s| s.entry.text.as_str()));
    let mut out = String::new();
    for (i, s) in suggestions.iter().enumerate() {
        out.push_str(&format!(
            "{:>2}. {}  (dist={}, freq={})\n",
            i + 1,
            pad(&s.entry.text, width),
            s.distance,
            s.entry.frequency
        ));
    }
    out
}
