//! Interactive menu loop.
//!
//! Reads choices and arguments line by line from any `BufRead` and writes
//! prompts and results to any `Write`, so a whole session can be scripted.

use std::io::{self, BufRead, Write};

use tracing::{debug, warn};

use wordtrie_core::unicode::fold_word;
use wordtrie_core::Selection;

use crate::commands::output::{format_ranked, format_suggestions};
use crate::commands::Context;

const MENU: &str = "\n==============================\n \
WORD COMPLETION SYSTEM\n\
==============================\n\
1. Search Word\n\
2. Get Autocomplete Suggestions\n\
3. Insert New Word\n\
4. View Top Frequent Words\n\
5. Save Snapshot\n\
6. Reload Snapshot\n\
7. Delete Word\n\
8. Spell Suggest (Did you mean?)\n\
9. Exit\n";

pub struct Shell<R, W> {
    ctx: Context,
    input: R,
    out: W,
}

impl<R: BufRead, W: Write> Shell<R, W> {
    pub fn new(ctx: Context, input: R, out: W) -> Self {
        Self { ctx, input, out }
    }

    /// Run until the user exits or input ends. Both paths save the snapshot
    /// when `snapshot_on_exit` is set.
    pub fn run(&mut self) -> io::Result<()> {
        loop {
            self.out.write_all(MENU.as_bytes())?;
            let Some(line) = self.prompt("Enter choice: ")? else {
                break;
            };
            let choice = line.trim().parse::<u32>().unwrap_or(0);
            debug!(choice, "shell command");
            match choice {
                1 => self.search()?,
                2 => self.autocomplete()?,
                3 => self.insert()?,
                4 => self.top()?,
                5 => self.save()?,
                6 => self.reload()?,
                7 => self.delete()?,
                8 => self.spell_suggest()?,
                9 => break,
                _ => writeln!(self.out, "Invalid choice.")?,
            }
        }
        self.exit()
    }

    fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let trimmed = line.trim_end_matches(['\n', '\r']).len();
        line.truncate(trimmed);
        Ok(Some(line))
    }

    fn prompt(&mut self, text: &str) -> io::Result<Option<String>> {
        write!(self.out, "{text}")?;
        self.out.flush()?;
        self.read_line()
    }

    /// Prompt for a word; `None` after reporting an input error.
    fn prompt_word(&mut self, text: &str) -> io::Result<Option<String>> {
        match self.prompt(text)? {
            Some(word) => Ok(Some(word)),
            None => {
                writeln!(self.out, "Input error.")?;
                Ok(None)
            }
        }
    }

    /// Rewrite the text word list after a change, reporting failures inline.
    fn sync_text(&mut self) -> io::Result<bool> {
        match self.ctx.sync_text() {
            Ok(()) => Ok(true),
            Err(e) => {
                warn!(path = %self.ctx.text_path.display(), error = %e, "could not sync word list");
                writeln!(
                    self.out,
                    "Warning: could not write word list to {}: {e}",
                    self.ctx.text_path.display()
                )?;
                Ok(false)
            }
        }
    }

    fn search(&mut self) -> io::Result<()> {
        let Some(word) = self.prompt_word("Enter word to search: ")? else {
            return Ok(());
        };
        let folded = fold_word(&word);
        match self.ctx.lexicon.record_hit(&word) {
            Some(frequency) => {
                writeln!(
                    self.out,
                    "Word \"{folded}\" found. Frequency {frequency}"
                )?;
                if self.ctx.lexicon.counts_search_hits() {
                    self.sync_text()?;
                }
            }
            None => writeln!(self.out, "Word \"{folded}\" NOT found.")?,
        }
        Ok(())
    }

    fn autocomplete(&mut self) -> io::Result<()> {
        let Some(prefix) = self.prompt_word("Enter prefix: ")? else {
            return Ok(());
        };
        let entries = self.ctx.lexicon.autocomplete(&prefix, self.ctx.top_k);
        if entries.is_empty() {
            writeln!(self.out, "No suggestions for \"{}\".", fold_word(&prefix))?;
            return Ok(());
        }
        write!(self.out, "Suggestions:\n{}", format_ranked(&entries))?;
        let Some(line) = self.prompt("Select suggestion number to accept (0 to cancel): ")?
        else {
            writeln!(self.out, "Input error.")?;
            return Ok(());
        };
        let chosen = match line.trim().parse::<usize>() {
            Ok(n) if (1..=entries.len()).contains(&n) => &entries[n - 1].text,
            _ => {
                writeln!(self.out, "Cancelled.")?;
                return Ok(());
            }
        };
        match self.ctx.lexicon.select(chosen) {
            Ok(Selection::Bumped(f)) => {
                writeln!(self.out, "Chosen: {chosen} (new freq {f})")?;
            }
            Ok(Selection::Inserted) => {
                writeln!(self.out, "Inserted chosen word: {chosen}")?;
            }
            Err(e) => {
                writeln!(self.out, "Could not select \"{chosen}\": {e}")?;
                return Ok(());
            }
        }
        self.sync_text()?;
        Ok(())
    }

    fn insert(&mut self) -> io::Result<()> {
        let Some(word) = self.prompt_word("Enter new word to insert: ")? else {
            return Ok(());
        };
        let frequency = match self.ctx.lexicon.insert(&word) {
            Ok(f) => f,
            Err(e) => {
                writeln!(self.out, "Could not insert word: {e}")?;
                return Ok(());
            }
        };
        if self.sync_text()? && self.ctx.sync_text {
            writeln!(
                self.out,
                "Word inserted (frequency {frequency}) and {} updated (sorted).",
                self.ctx.text_path.display()
            )?;
        } else {
            writeln!(self.out, "Word inserted (frequency {frequency}).")?;
        }
        Ok(())
    }

    fn top(&mut self) -> io::Result<()> {
        let k = self.ctx.top_k;
        let entries = self.ctx.lexicon.top_k(k);
        if entries.is_empty() {
            writeln!(self.out, "No words in dictionary.")?;
        } else {
            write!(
                self.out,
                "Top {k} frequent words:\n{}",
                format_ranked(&entries)
            )?;
        }
        Ok(())
    }

    fn save(&mut self) -> io::Result<()> {
        let path = self.ctx.snapshot_path.display();
        match self.ctx.save_snapshot() {
            Ok(()) => writeln!(self.out, "Dictionary saved to snapshot: {path}"),
            Err(e) => writeln!(self.out, "Failed to save snapshot to {path}: {e}"),
        }
    }

    fn reload(&mut self) -> io::Result<()> {
        let path = self.ctx.snapshot_path.clone();
        match self.ctx.lexicon.load_snapshot(&path) {
            Ok(()) => writeln!(self.out, "Loaded snapshot from {}", path.display()),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "snapshot reload failed");
                writeln!(
                    self.out,
                    "Failed to load snapshot from {}: {e}\nKeeping the current dictionary.",
                    path.display()
                )
            }
        }
    }

    fn delete(&mut self) -> io::Result<()> {
        let Some(word) = self.prompt_word("Enter word to delete: ")? else {
            return Ok(());
        };
        let folded = fold_word(&word);
        if self.ctx.lexicon.delete(&word) {
            self.sync_text()?;
            writeln!(self.out, "Word \"{folded}\" deleted.")?;
        } else {
            writeln!(self.out, "Word \"{folded}\" not found.")?;
        }
        Ok(())
    }

    fn spell_suggest(&mut self) -> io::Result<()> {
        let Some(word) = self.prompt_word("Enter word for spell suggestion: ")? else {
            return Ok(());
        };
        let suggestions = self.ctx.lexicon.spell_suggest(&word, self.ctx.suggestions);
        if suggestions.is_empty() {
            writeln!(self.out, "No words to compare.")?;
        } else {
            write!(
                self.out,
                "Spell suggestions for \"{}\":\n{}",
                fold_word(&word),
                format_suggestions(&suggestions)
            )?;
        }
        Ok(())
    }

    fn exit(&mut self) -> io::Result<()> {
        if !self.ctx.snapshot_on_exit {
            writeln!(self.out, "Exiting.")?;
            return Ok(());
        }
        let path = self.ctx.snapshot_path.display();
        writeln!(self.out, "Saving snapshot to {path} and exiting...")?;
        if let Err(e) = self.ctx.save_snapshot() {
            warn!(path = %path, error = %e, "could not save snapshot on exit");
            writeln!(self.out, "Failed to save snapshot: {e}")?;
        }
        Ok(())
    }
}
