//! Case folding applied to every word before it touches the trie.

/// Fold a word to the canonical lower-case form stored in the trie.
///
/// Each character is replaced by its full `char::to_lowercase` expansion, so a
/// few characters (e.g. `İ`) fold to more than one char. The same folding is
/// applied on insert, lookup and prefix walks, so keys stay consistent.
pub fn fold_word(word: &str) -> String {
    fold_chars(word).collect()
}

/// Iterator form of [`fold_word`], used by the walks to avoid an allocation.
pub fn fold_chars(word: &str) -> impl Iterator<Item = char> + '_ {
    word.chars().flat_map(char::to_lowercase)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fold_ascii() {
        assert_eq!(fold_word("Apple"), "apple");
        assert_eq!(fold_word("APPLE"), "apple");
    }

    #[test]
    fn test_fold_non_ascii() {
        assert_eq!(fold_word("ÄPFEL"), "äpfel");
        assert_eq!(fold_word("Ωμέγα"), "ωμέγα");
    }

    #[test]
    fn test_fold_passthrough() {
        assert_eq!(fold_word("かんじ"), "かんじ");
        assert_eq!(fold_word("a-b_c1"), "a-b_c1");
    }

    #[test]
    fn test_fold_expands_to_several_chars() {
        // U+0130 lowercases to "i" + combining dot above.
        assert_eq!(fold_word("\u{130}").chars().count(), 2);
        assert_eq!(fold_chars("\u{130}x").count(), 3);
    }
}
