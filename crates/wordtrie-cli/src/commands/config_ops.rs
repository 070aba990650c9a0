use std::fs;

pub fn settings_export() {
    print!("{}", wordtrie_core::settings::default_toml());
}

pub fn settings_validate(file: &str) {
    let content = die!(fs::read_to_string(file), "Error reading {file}: {}");
    let s = die!(
        wordtrie_core::settings::parse_settings_toml(&content),
        "Error: {}"
    );
    println!(
        "OK: limits.max_word_len={}, ranking.top_k={}, ranking.suggestions={}",
        s.limits.max_word_len, s.ranking.top_k, s.ranking.suggestions
    );
}
