use std::fs;
use std::io;
use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

use wordtrie_cli::commands::{config_ops, word_ops, Context};
use wordtrie_cli::shell::Shell;
use wordtrie_cli::trace_init::init_tracing;

#[derive(Parser)]
#[command(name = "wordtrie", about = "Word dictionary with autocomplete and spell suggestion")]
struct Cli {
    /// Binary snapshot file (default: files.snapshot from settings)
    #[arg(long, global = true)]
    snapshot: Option<PathBuf>,
    /// Text word list (default: files.text_dictionary from settings)
    #[arg(long, global = true)]
    words: Option<PathBuf>,
    /// Custom settings TOML
    #[arg(long, global = true)]
    settings: Option<PathBuf>,
    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Interactive menu (default)
    Shell,
    /// Look up a word's frequency
    Search {
        word: String,
    },
    /// Insert words, one use each
    Insert {
        #[arg(required = true)]
        words: Vec<String>,
    },
    /// Delete a word
    Delete {
        word: String,
    },
    /// Words starting with a prefix, most frequent first
    Complete {
        prefix: String,
        /// Number of results (default: ranking.top_k)
        #[arg(short, long)]
        n: Option<usize>,
    },
    /// Most frequent words
    Top {
        /// Number of results (default: ranking.top_k)
        #[arg(short, long)]
        n: Option<usize>,
    },
    /// Closest words by edit distance
    Suggest {
        query: String,
        /// Number of results (default: ranking.suggestions)
        #[arg(short, long)]
        n: Option<usize>,
    },
    /// Accept a word: count a use, inserting it if absent
    Select {
        word: String,
    },
    /// Build a snapshot from a text word list
    Import {
        /// Text word list, one word per line
        text: PathBuf,
        /// Output snapshot (default: the configured snapshot)
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Write all words, sorted, to a text word list
    Export {
        text: PathBuf,
    },
    /// Show dictionary statistics and file locations
    Info,
    /// Export default settings as TOML
    SettingsExport,
    /// Validate a custom settings TOML file
    SettingsValidate {
        /// Path to the TOML file
        file: String,
    },
}

fn main() {
    let cli = Cli::parse();
    init_tracing();

    if let Some(path) = &cli.settings {
        let content = fs::read_to_string(path).unwrap_or_else(|e| {
            eprintln!("Error reading {}: {e}", path.display());
            process::exit(1);
        });
        wordtrie_core::settings::init_custom(content).unwrap_or_else(|e| {
            eprintln!("Error: {e}");
            process::exit(1);
        });
    }

    let command = cli.command.unwrap_or(Command::Shell);
    match &command {
        Command::SettingsExport => return config_ops::settings_export(),
        Command::SettingsValidate { file } => return config_ops::settings_validate(file),
        _ => {}
    }

    let s = wordtrie_core::settings::settings();
    let (mut ctx, source) = Context::open(s, cli.snapshot, cli.words, cli.json);

    match command {
        Command::Shell => {
            println!("{}", ctx.describe_source(source));
            let stdin = io::stdin();
            let mut shell = Shell::new(ctx, stdin.lock(), io::stdout());
            if let Err(e) = shell.run() {
                eprintln!("Error: {e}");
                process::exit(1);
            }
        }
        Command::Search { word } => word_ops::search(&mut ctx, &word),
        Command::Insert { words } => word_ops::insert(&mut ctx, &words),
        Command::Delete { word } => word_ops::delete(&mut ctx, &word),
        Command::Complete { prefix, n } => word_ops::complete(&ctx, &prefix, n),
        Command::Top { n } => word_ops::top(&ctx, n),
        Command::Suggest { query, n } => word_ops::suggest(&ctx, &query, n),
        Command::Select { word } => word_ops::select(&mut ctx, &word),
        Command::Import { text, output } => word_ops::import(&ctx, &text, output),
        Command::Export { text } => word_ops::export(&ctx, &text),
        Command::Info => word_ops::info(&ctx),
        Command::SettingsExport | Command::SettingsValidate { .. } => {}
    }
}
