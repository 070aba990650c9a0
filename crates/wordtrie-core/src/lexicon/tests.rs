use std::fs;
use std::path::Path;

use super::*;
use crate::settings::{parse_settings_toml, DEFAULT_SETTINGS_TOML};

fn settings_in(dir: &Path, count_search_hits: bool) -> Settings {
    let toml = DEFAULT_SETTINGS_TOML
        .replace(
            r#"text_dictionary = "words.txt""#,
            &format!("text_dictionary = {:?}", dir.join("words.txt")),
        )
        .replace(
            r#"snapshot = "words.txt.bin""#,
            &format!("snapshot = {:?}", dir.join("words.txt.bin")),
        )
        .replace(
            "count_search_hits = false",
            &format!("count_search_hits = {count_search_hits}"),
        );
    parse_settings_toml(&toml).unwrap()
}

fn sample_lexicon() -> Lexicon {
    let mut lexicon = Lexicon::new();
    for word in ["apple", "apple", "app", "apply"] {
        lexicon.insert(word).unwrap();
    }
    lexicon
}

#[test]
fn test_insert_then_search() {
    let mut lexicon = Lexicon::new();
    for _ in 0..3 {
        lexicon.insert("Word").unwrap();
    }
    assert_eq!(lexicon.search("word"), Some(3));
    assert_eq!(lexicon.search("wor"), None);
}

#[test]
fn test_record_hit_policy_disabled() {
    let mut lexicon = sample_lexicon();
    assert_eq!(lexicon.record_hit("app"), Some(1));
    assert_eq!(lexicon.record_hit("app"), Some(1));
    assert_eq!(lexicon.record_hit("missing"), None);
}

#[test]
fn test_record_hit_policy_enabled() {
    let mut lexicon = Lexicon::with_options(DEFAULT_MAX_WORD_LEN, true);
    lexicon.insert("app").unwrap();
    assert!(lexicon.counts_search_hits());
    assert_eq!(lexicon.record_hit("APP"), Some(2));
    assert_eq!(lexicon.search("app"), Some(2));
    assert_eq!(lexicon.record_hit("missing"), None);
    assert_eq!(lexicon.search("missing"), None);
}

#[test]
fn test_select_bumps_existing() {
    let mut lexicon = sample_lexicon();
    assert_eq!(lexicon.select("apply"), Ok(Selection::Bumped(2)));
    assert_eq!(lexicon.search("apply"), Some(2));
}

#[test]
fn test_select_inserts_missing() {
    let mut lexicon = sample_lexicon();
    assert_eq!(lexicon.select("applet"), Ok(Selection::Inserted));
    assert_eq!(lexicon.search("applet"), Some(1));
    assert_eq!(lexicon.select(""), Err(WordError::Empty));
}

#[test]
fn test_query_interface_scenario() {
    let mut lexicon = sample_lexicon();
    let texts = |entries: Vec<WordEntry>| -> Vec<String> {
        entries.into_iter().map(|e| e.text).collect()
    };
    assert_eq!(
        texts(lexicon.autocomplete("app", 10)),
        vec!["apple", "app", "apply"]
    );
    assert_eq!(texts(lexicon.top_k(2)), vec!["apple", "app"]);
    assert!(lexicon.delete("app"));
    assert!(!lexicon.delete("app"));
    assert_eq!(lexicon.search("app"), None);
    assert_eq!(
        texts(lexicon.autocomplete("app", 10)),
        vec!["apple", "apply"]
    );
}

#[test]
fn test_spell_suggest_through_lexicon() {
    let lexicon = sample_lexicon();
    let result = lexicon.spell_suggest("aple", 2);
    assert_eq!(result[0].entry.text, "apple");
    assert_eq!(result[0].distance, 1);
    assert_eq!(result.len(), 2);
}

#[test]
fn test_stats() {
    let lexicon = sample_lexicon();
    assert_eq!(lexicon.stats(), LexiconStats { words: 3, nodes: 7 });
}

#[test]
fn test_snapshot_save_and_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("words.bin");
    let lexicon = sample_lexicon();
    lexicon.save_snapshot(&path).unwrap();

    let mut restored = Lexicon::new();
    restored.insert("stale").unwrap();
    restored.load_snapshot(&path).unwrap();
    assert_eq!(restored.search("stale"), None);
    assert_eq!(restored.search("apple"), Some(2));
    assert_eq!(restored.stats(), lexicon.stats());
}

#[test]
fn test_failed_load_keeps_current_dictionary() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("corrupt.bin");
    let mut bytes = snapshot::to_bytes(sample_lexicon().trie()).unwrap();
    bytes.truncate(bytes.len() - 3);
    fs::write(&path, bytes).unwrap();

    let mut lexicon = Lexicon::new();
    lexicon.insert("keep").unwrap();
    assert!(lexicon.load_snapshot(&path).is_err());
    assert!(lexicon
        .load_snapshot(&dir.path().join("missing.bin"))
        .unwrap_err()
        .is_not_found());
    assert_eq!(lexicon.search("keep"), Some(1));
    assert_eq!(lexicon.stats().words, 1);
}

#[test]
fn test_text_export_and_import() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("words.txt");
    sample_lexicon().export_text(&path).unwrap();
    assert_eq!(fs::read_to_string(&path).unwrap(), "app\napple\napply\n");

    let mut lexicon = Lexicon::new();
    assert_eq!(lexicon.import_text(&path), 3);
    assert_eq!(lexicon.search("apple"), Some(1));
}

#[test]
fn test_import_missing_text_is_zero() {
    let mut lexicon = Lexicon::new();
    assert_eq!(lexicon.import_text(Path::new("/nonexistent/words.txt")), 0);
    assert!(lexicon.trie().is_empty());
}

#[test]
fn test_import_skips_too_long_words() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("words.txt");
    fs::write(&path, "ok\nwaytoolong\n").unwrap();
    let mut lexicon = Lexicon::with_options(4, false);
    assert_eq!(lexicon.import_text(&path), 1);
    assert_eq!(lexicon.search("waytoolong"), None);
}

#[test]
fn test_open_prefers_snapshot() {
    let dir = tempfile::tempdir().unwrap();
    let s = settings_in(dir.path(), false);
    fs::write(s.files.text_dictionary_path(), "fromtext\n").unwrap();
    sample_lexicon()
        .save_snapshot(&s.files.snapshot_path())
        .unwrap();

    let (lexicon, source) = Lexicon::open(&s);
    assert_eq!(source, LoadSource::Snapshot);
    assert_eq!(lexicon.search("apple"), Some(2));
    assert_eq!(lexicon.search("fromtext"), None);
}

#[test]
fn test_open_falls_back_to_text() {
    let dir = tempfile::tempdir().unwrap();
    let s = settings_in(dir.path(), false);
    fs::write(s.files.text_dictionary_path(), "Alpha\nbeta\nalpha\n").unwrap();

    let (lexicon, source) = Lexicon::open(&s);
    assert_eq!(source, LoadSource::Text(3));
    assert_eq!(lexicon.search("alpha"), Some(2));
}

#[test]
fn test_open_corrupt_snapshot_falls_back_to_text() {
    let dir = tempfile::tempdir().unwrap();
    let s = settings_in(dir.path(), true);
    fs::write(s.files.snapshot_path(), b"junk").unwrap();
    fs::write(s.files.text_dictionary_path(), "word\n").unwrap();

    let (lexicon, source) = Lexicon::open(&s);
    assert_eq!(source, LoadSource::Text(1));
    assert!(lexicon.counts_search_hits());
}

#[test]
fn test_open_empty() {
    let dir = tempfile::tempdir().unwrap();
    let s = settings_in(dir.path(), false);
    let (lexicon, source) = Lexicon::open(&s);
    assert_eq!(source, LoadSource::Empty);
    assert!(lexicon.trie().is_empty());
}

#[test]
fn test_open_paths_overrides_configured_files() {
    let dir = tempfile::tempdir().unwrap();
    let s = settings_in(dir.path(), false);
    fs::write(s.files.text_dictionary_path(), "configured\n").unwrap();
    let other = dir.path().join("other.txt");
    fs::write(&other, "override\n").unwrap();

    let (lexicon, source) = Lexicon::open_paths(&s, &dir.path().join("none.bin"), &other);
    assert_eq!(source, LoadSource::Text(1));
    assert_eq!(lexicon.search("override"), Some(1));
    assert_eq!(lexicon.search("configured"), None);
}
