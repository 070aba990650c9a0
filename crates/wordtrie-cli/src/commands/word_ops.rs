use std::path::{Path, PathBuf};

use serde::Serialize;

use wordtrie_core::unicode::fold_word;
use wordtrie_core::{Lexicon, Selection};

use super::output::{format_ranked, format_suggestions};
use super::Context;

fn print_json<T: Serialize + ?Sized>(value: &T) {
    let text = die!(serde_json::to_string_pretty(value), "Error: {}");
    println!("{text}");
}

fn persist(ctx: &Context) {
    die!(ctx.persist(), "Error saving dictionary: {}");
}

#[derive(Serialize)]
struct WordReport<'a> {
    word: &'a str,
    frequency: Option<u32>,
}

#[derive(Serialize)]
struct InfoReport<'a> {
    words: usize,
    nodes: usize,
    max_word_len: usize,
    count_search_hits: bool,
    snapshot: &'a Path,
    text_dictionary: &'a Path,
}

pub fn search(ctx: &mut Context, word: &str) {
    let frequency = ctx.lexicon.record_hit(word);
    if frequency.is_some() && ctx.lexicon.counts_search_hits() {
        persist(ctx);
    }
    let word = fold_word(word);
    if ctx.json {
        print_json(&WordReport {
            word: &word,
            frequency,
        });
        return;
    }
    match frequency {
        Some(f) => println!("Found: {word} (frequency {f})"),
        None => println!("Not found: {word}"),
    }
}

pub fn insert(ctx: &mut Context, words: &[String]) {
    let mut reports = Vec::with_capacity(words.len());
    for word in words {
        let frequency = die!(ctx.lexicon.insert(word), "Error inserting {word:?}: {}");
        reports.push((fold_word(word), frequency));
    }
    persist(ctx);
    if ctx.json {
        let reports: Vec<WordReport<'_>> = reports
            .iter()
            .map(|(word, f)| WordReport {
                word,
                frequency: Some(*f),
            })
            .collect();
        print_json(&reports);
        return;
    }
    for (word, f) in &reports {
        println!("Inserted: {word} (frequency {f})");
    }
}

pub fn delete(ctx: &mut Context, word: &str) {
    let removed = ctx.lexicon.delete(word);
    if removed {
        persist(ctx);
    }
    let word = fold_word(word);
    if ctx.json {
        print_json(&serde_json::json!({ "word": word, "deleted": removed }));
    } else if removed {
        println!("Deleted: {word}");
    } else {
        println!("Not found: {word}");
    }
}

pub fn complete(ctx: &Context, prefix: &str, n: Option<usize>) {
    let entries = ctx.lexicon.autocomplete(prefix, n.unwrap_or(ctx.top_k));
    if ctx.json {
        print_json(&entries);
    } else if entries.is_empty() {
        println!("No suggestions for \"{}\".", fold_word(prefix));
    } else {
        print!("{}", format_ranked(&entries));
    }
}

pub fn top(ctx: &Context, n: Option<usize>) {
    let entries = ctx.lexicon.top_k(n.unwrap_or(ctx.top_k));
    if ctx.json {
        print_json(&entries);
    } else if entries.is_empty() {
        println!("No words in dictionary.");
    } else {
        print!("{}", format_ranked(&entries));
    }
}

pub fn suggest(ctx: &Context, query: &str, n: Option<usize>) {
    let suggestions = ctx
        .lexicon
        .spell_suggest(query, n.unwrap_or(ctx.suggestions));
    if ctx.json {
        print_json(&suggestions);
    } else if suggestions.is_empty() {
        println!("No words to compare.");
    } else {
        print!("{}", format_suggestions(&suggestions));
    }
}

pub fn select(ctx: &mut Context, word: &str) {
    let selection = die!(ctx.lexicon.select(word), "Error selecting {word:?}: {}");
    persist(ctx);
    let word = fold_word(word);
    let frequency = match selection {
        Selection::Bumped(f) => f,
        Selection::Inserted => 1,
    };
    if ctx.json {
        print_json(&WordReport {
            word: &word,
            frequency: Some(frequency),
        });
        return;
    }
    match selection {
        Selection::Bumped(f) => println!("Chosen: {word} (new frequency {f})"),
        Selection::Inserted => println!("Inserted chosen word: {word}"),
    }
}

/// Build a fresh snapshot from a text word list.
pub fn import(ctx: &Context, text: &Path, output: Option<PathBuf>) {
    let mut lexicon = Lexicon::with_options(
        ctx.lexicon.trie().max_word_len(),
        ctx.lexicon.counts_search_hits(),
    );
    let count = lexicon.import_text(text);
    let output = output.unwrap_or_else(|| ctx.snapshot_path.clone());
    die!(
        lexicon.save_snapshot(&output),
        "Error writing {}: {}",
        output.display()
    );
    let stats = lexicon.stats();
    println!(
        "Imported {count} words ({} distinct, {} nodes) into {}",
        stats.words,
        stats.nodes,
        output.display()
    );
}

pub fn export(ctx: &Context, text: &Path) {
    die!(
        ctx.lexicon.export_text(text),
        "Error writing {}: {}",
        text.display()
    );
    println!(
        "Exported {} words to {}",
        ctx.lexicon.stats().words,
        text.display()
    );
}

pub fn info(ctx: &Context) {
    let stats = ctx.lexicon.stats();
    let report = InfoReport {
        words: stats.words,
        nodes: stats.nodes,
        max_word_len: ctx.lexicon.trie().max_word_len(),
        count_search_hits: ctx.lexicon.counts_search_hits(),
        snapshot: &ctx.snapshot_path,
        text_dictionary: &ctx.text_path,
    };
    if ctx.json {
        print_json(&report);
        return;
    }
    println!("Words:             {}", report.words);
    println!("Nodes:             {}", report.nodes);
    println!("Max word length:   {}", report.max_word_len);
    println!("Count search hits: {}", report.count_search_hits);
    println!("Snapshot:          {}", report.snapshot.display());
    println!("Text dictionary:   {}", report.text_dictionary.display());
}
