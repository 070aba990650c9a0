macro_rules! die {
    ($result:expr, $($arg:tt)*) => {
        $result.unwrap_or_else(|e| {
            eprintln!($($arg)*, e);
            std::process::exit(1);
        })
    };
}

pub mod config_ops;
pub mod output;
pub mod word_ops;

use std::io;
use std::path::PathBuf;

use tracing::warn;

use wordtrie_core::settings::Settings;
use wordtrie_core::snapshot::SnapshotError;
use wordtrie_core::{Lexicon, LoadSource};

#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("snapshot error: {0}")]
    Snapshot(#[from] SnapshotError),

    #[error("word list error: {0}")]
    WordList(#[from] io::Error),
}

/// A loaded dictionary plus where it persists and how results are shown.
pub struct Context {
    pub lexicon: Lexicon,
    pub snapshot_path: PathBuf,
    pub text_path: PathBuf,
    pub top_k: usize,
    pub suggestions: usize,
    pub sync_text: bool,
    pub snapshot_on_exit: bool,
    pub json: bool,
}

impl Context {
    /// Open the dictionary described by `s`, with optional path overrides.
    pub fn open(
        s: &Settings,
        snapshot: Option<PathBuf>,
        words: Option<PathBuf>,
        json: bool,
    ) -> (Self, LoadSource) {
        let snapshot_path = snapshot.unwrap_or_else(|| s.files.snapshot_path());
        let text_path = words.unwrap_or_else(|| s.files.text_dictionary_path());
        let (lexicon, source) = Lexicon::open_paths(s, &snapshot_path, &text_path);
        let ctx = Self {
            lexicon,
            snapshot_path,
            text_path,
            top_k: s.ranking.top_k,
            suggestions: s.ranking.suggestions,
            sync_text: s.persistence.sync_text_on_change,
            snapshot_on_exit: s.persistence.snapshot_on_exit,
            json,
        };
        (ctx, source)
    }

    /// One-line description of where the words came from.
    pub fn describe_source(&self, source: LoadSource) -> String {
        match source {
            LoadSource::Snapshot => {
                format!("Loaded snapshot: {}", self.snapshot_path.display())
            }
            LoadSource::Text(count) => format!(
                "Loaded {count} words from text dictionary: {}",
                self.text_path.display()
            ),
            LoadSource::Empty => "Starting with an empty dictionary.".to_string(),
        }
    }

    pub fn save_snapshot(&self) -> Result<(), SnapshotError> {
        self.lexicon.save_snapshot(&self.snapshot_path)
    }

    /// Rewrite the text word list if configured to follow every change.
    pub fn sync_text(&self) -> io::Result<()> {
        if !self.sync_text {
            return Ok(());
        }
        self.lexicon.export_text(&self.text_path)
    }

    /// Persist after a change: snapshot always, text word list when configured.
    pub fn persist(&self) -> Result<(), CommandError> {
        self.save_snapshot()?;
        if let Err(e) = self.sync_text() {
            warn!(path = %self.text_path.display(), error = %e, "could not sync word list");
            return Err(e.into());
        }
        Ok(())
    }
}


#[cfg(test)]
mod tests {
    use std::fs;

    use super::test_support::settings_in;
    use super::*;

    #[test]
    fn test_open_uses_path_overrides() {
        let dir = tempfile::tempdir().unwrap();
        let s = settings_in(dir.path());
        let other = dir.path().join("other.txt");
        fs::write(&other, "one\ntwo\n").unwrap();

        let (ctx, source) = Context::open(&s, None, Some(other.clone()), false);
        assert_eq!(source, LoadSource::Text(2));
        assert_eq!(ctx.text_path, other);
        assert!(ctx.describe_source(source).contains("2 words"));
    }

    #[test]
    fn test_persist_writes_snapshot_and_text() {
        let dir = tempfile::tempdir().unwrap();
        let s = settings_in(dir.path());
        let (mut ctx, source) = Context::open(&s, None, None, false);
        assert_eq!(source, LoadSource::Empty);
        ctx.lexicon.insert("beta").unwrap();
        ctx.lexicon.insert("alpha").unwrap();
        ctx.persist().unwrap();

        assert_eq!(fs::read_to_string(&ctx.text_path).unwrap(), "alpha\nbeta\n");
        let (reopened, source) = Context::open(&s, None, None, false);
        assert_eq!(source, LoadSource::Snapshot);
        assert_eq!(reopened.lexicon.search("alpha"), Some(1));
    }

    #[cfg(unix)]
    #[test]
    fn test_open_keeps_non_utf8_override() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let dir = tempfile::tempdir().unwrap();
        let s = settings_in(dir.path());
        let words = dir.path().join(OsStr::from_bytes(b"words-\xff.txt"));
        fs::write(&words, "one\n").unwrap();

        let (ctx, source) = Context::open(&s, None, Some(words.clone()), false);
        assert_eq!(source, LoadSource::Text(1));
        assert_eq!(ctx.text_path, words);
    }
}
