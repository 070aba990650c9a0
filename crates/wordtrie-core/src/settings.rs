//! Global settings loaded from TOML.
//!
//! - `init_custom(toml_content)` sets a custom TOML before first `settings()` call
//! - `settings()` returns `&'static Settings` (lazy-init singleton)
//! - Default values are embedded via `include_str!("default_settings.toml")`

use std::path::PathBuf;
use std::sync::OnceLock;

use serde::Deserialize;

pub const DEFAULT_SETTINGS_TOML: &str = include_str!("default_settings.toml");

static CUSTOM_TOML: OnceLock<String> = OnceLock::new();

/// Set custom TOML before first `settings()` call.
pub fn init_custom(toml_content: String) -> Result<(), SettingsError> {
    parse_settings_toml(&toml_content)?;
    CUSTOM_TOML
        .set(toml_content)
        .map_err(|_| SettingsError::AlreadyInitialized)
}

/// Get or initialize the global settings singleton.
pub fn settings() -> &'static Settings {
    static INSTANCE: OnceLock<Settings> = OnceLock::new();
    INSTANCE.get_or_init(|| {
        let toml_str = CUSTOM_TOML
            .get()
            .map(|s| s.as_str())
            .unwrap_or(DEFAULT_SETTINGS_TOML);
        parse_settings_toml(toml_str).expect("settings TOML must be valid")
    })
}

/// Returns the embedded default settings TOML content.
pub fn default_toml() -> &'static str {
    DEFAULT_SETTINGS_TOML
}

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("TOML parse error: {0}")]
    Parse(String),
    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },
    #[error("settings already initialized")]
    AlreadyInitialized,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub limits: LimitSettings,
    pub ranking: RankingSettings,
    pub frequency: FrequencySettings,
    pub files: FileSettings,
    pub persistence: PersistenceSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LimitSettings {
    pub max_word_len: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RankingSettings {
    pub top_k: usize,
    pub suggestions: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FrequencySettings {
    pub count_search_hits: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FileSettings {
    pub text_dictionary: String,
    pub snapshot: String,
}

impl FileSettings {
    pub fn text_dictionary_path(&self) -> PathBuf {
        PathBuf::from(&self.text_dictionary)
    }

    pub fn snapshot_path(&self) -> PathBuf {
        PathBuf::from(&self.snapshot)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct PersistenceSettings {
    pub sync_text_on_change: bool,
    pub snapshot_on_exit: bool,
}

pub fn parse_settings_toml(toml_str: &str) -> Result<Settings, SettingsError> {
    let s: Settings = toml::from_str(toml_str).map_err(|e| SettingsError::Parse(e.to_string()))?;
    validate(&s)?;
    Ok(s)
}

fn validate(s: &Settings) -> Result<(), SettingsError> {
    macro_rules! check_positive_usize {
        ($section:ident . $field:ident) => {
            if s.$section.$field == 0 {
                return Err(SettingsError::InvalidValue {
                    field: concat!(stringify!($section), ".", stringify!($field)).to_string(),
                    reason: "must be positive".to_string(),
                });
            }
        };
    }
    macro_rules! check_non_empty {
        ($section:ident . $field:ident) => {
            if s.$section.$field.trim().is_empty() {
                return Err(SettingsError::InvalidValue {
                    field: concat!(stringify!($section), ".", stringify!($field)).to_string(),
                    reason: "must not be empty".to_string(),
                });
            }
        };
    }

    check_positive_usize!(limits.max_word_len);
    check_positive_usize!(ranking.top_k);
    check_positive_usize!(ranking.suggestions);

    check_non_empty!(files.text_dictionary);
    check_non_empty!(files.snapshot);

    // Every depth must be addressable by the snapshot's i32 fields.
    if s.limits.max_word_len > i32::MAX as usize {
        return Err(SettingsError::InvalidValue {
            field: "limits.max_word_len".to_string(),
            reason: "must fit in a 32-bit signed integer".to_string(),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_default_toml() {
        let s = parse_settings_toml(DEFAULT_SETTINGS_TOML).unwrap();
        assert_eq!(s.limits.max_word_len, 512);
        assert_eq!(s.ranking.top_k, 10);
        assert_eq!(s.ranking.suggestions, 10);
        assert!(!s.frequency.count_search_hits);
        assert_eq!(s.files.text_dictionary, "words.txt");
        assert_eq!(s.files.snapshot, "words.txt.bin");
        assert_eq!(s.files.snapshot_path(), PathBuf::from("words.txt.bin"));
        assert!(s.persistence.sync_text_on_change);
        assert!(s.persistence.snapshot_on_exit);
    }

    #[test]
    fn parse_valid_custom_toml() {
        let toml = r#"
[limits]
max_word_len = 64

[ranking]
top_k = 5
suggestions = 3

[frequency]
count_search_hits = true

[files]
text_dictionary = "/tmp/custom.txt"
snapshot = "/tmp/custom.bin"

[persistence]
sync_text_on_change = false
snapshot_on_exit = false
"#;
        let s = parse_settings_toml(toml).unwrap();
        assert_eq!(s.limits.max_word_len, 64);
        assert_eq!(s.ranking.suggestions, 3);
        assert!(s.frequency.count_search_hits);
        assert_eq!(
            s.files.text_dictionary_path(),
            PathBuf::from("/tmp/custom.txt")
        );
        assert!(!s.persistence.snapshot_on_exit);
    }

    #[test]
    fn error_zero_top_k() {
        let toml = DEFAULT_SETTINGS_TOML.replace("top_k = 10", "top_k = 0");
        let err = parse_settings_toml(&toml).unwrap_err();
        assert!(matches!(err, SettingsError::InvalidValue { .. }));
        assert!(err.to_string().contains("ranking.top_k"));
    }

    #[test]
    fn error_zero_max_word_len() {
        let toml = DEFAULT_SETTINGS_TOML.replace("max_word_len = 512", "max_word_len = 0");
        let err = parse_settings_toml(&toml).unwrap_err();
        assert!(err.to_string().contains("limits.max_word_len"));
    }

    #[test]
    fn error_empty_snapshot_path() {
        let toml = DEFAULT_SETTINGS_TOML.replace(r#"snapshot = "words.txt.bin""#, r#"snapshot = " ""#);
        let err = parse_settings_toml(&toml).unwrap_err();
        assert!(err.to_string().contains("files.snapshot"));
    }

    #[test]
    fn error_invalid_toml() {
        let err = parse_settings_toml("not valid toml {{{").unwrap_err();
        assert!(matches!(err, SettingsError::Parse(_)));
    }

    #[test]
    fn error_missing_section() {
        let toml = r#"
[limits]
max_word_len = 512
"#;
        let err = parse_settings_toml(toml).unwrap_err();
        assert!(matches!(err, SettingsError::Parse(_)));
    }
}
