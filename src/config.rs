use crate::defaults;
use crate::error::{BrainstormError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
#[cfg(feature = "cli")]
use std::path::PathBuf;

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct Config {
    pub input: InputConfig,
    pub selector: SelectorConfig,
    pub debouncer: DebouncerConfig,
    pub output: OutputConfig,
}

/// How input lines are read
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct InputConfig {
    pub mode: InputMode,
}

/// Input line interpretation
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum InputMode {
    /// Every line is an item; the selector brackets matching lines.
    #[default]
    Lines,
    /// Every line is already a token in `[START]` / `[FINISH]` / `[value]` form.
    Tokens,
}

/// Line selector configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SelectorConfig {
    pub keywords: Vec<String>,
    pub ignore_case: bool,
}

/// Debouncer configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DebouncerConfig {
    pub enabled: bool,
    pub quiet_period: usize,
}

/// Output configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct OutputConfig {
    /// Collapse each block into one list instead of printing tokens.
    pub aggregate: bool,
    pub format: OutputFormat,
    pub color: bool,
}

/// Output encoding
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = BrainstormError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            other => Err(BrainstormError::ConfigInvalidValue {
                key: "output.format".to_string(),
                message: format!("unknown format '{}', expected text or json", other),
            }),
        }
    }
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            keywords: defaults::KEYWORDS.iter().map(|k| k.to_string()).collect(),
            ignore_case: false,
        }
    }
}

impl SelectorConfig {
    /// Builds the line predicate: true when any keyword occurs in the line.
    pub fn predicate(&self) -> impl Fn(&String) -> bool + 'static {
        let ignore_case = self.ignore_case;
        let keywords: Vec<String> = if ignore_case {
            self.keywords.iter().map(|k| k.to_lowercase()).collect()
        } else {
            self.keywords.clone()
        };

        move |line: &String| {
            if ignore_case {
                let line = line.to_lowercase();
                keywords.iter().any(|k| line.contains(k.as_str()))
            } else {
                keywords.iter().any(|k| line.contains(k.as_str()))
            }
        }
    }
}

impl Default for DebouncerConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            quiet_period: defaults::QUIET_PERIOD,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            aggregate: false,
            format: OutputFormat::Text,
            color: false,
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    ///
    /// Missing fields use default values.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                BrainstormError::ConfigFileNotFound {
                    path: path.display().to_string(),
                }
            } else {
                BrainstormError::Io(e)
            }
        })?;
        let config: Config = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Load configuration from a file or return defaults if it doesn't exist
    ///
    /// Invalid TOML is still an error.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        match Self::load(path) {
            Err(BrainstormError::ConfigFileNotFound { .. }) => Ok(Self::default()),
            other => other,
        }
    }

    /// Apply environment variable overrides
    ///
    /// Supported environment variables:
    /// - BRAINSTORM_QUIET_PERIOD → debouncer.quiet_period
    /// - BRAINSTORM_KEYWORDS → selector.keywords (comma separated)
    /// - BRAINSTORM_FORMAT → output.format
    ///
    /// Empty values are ignored; unparsable ones are ignored with a warning.
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(value) = std::env::var(defaults::ENV_QUIET_PERIOD)
            && !value.is_empty()
        {
            match value.trim().parse::<usize>() {
                Ok(quiet_period) => self.debouncer.quiet_period = quiet_period,
                Err(e) => eprintln!(
                    "Warning: ignoring {}={:?}: {}",
                    defaults::ENV_QUIET_PERIOD,
                    value,
                    e
                ),
            }
        }

        if let Ok(value) = std::env::var(defaults::ENV_KEYWORDS)
            && !value.is_empty()
        {
            self.selector.keywords = value
                .split(',')
                .map(str::trim)
                .filter(|k| !k.is_empty())
                .map(str::to_string)
                .collect();
        }

        if let Ok(value) = std::env::var(defaults::ENV_FORMAT)
            && !value.is_empty()
        {
            match value.parse::<OutputFormat>() {
                Ok(format) => self.output.format = format,
                Err(e) => eprintln!("Warning: ignoring {}: {}", defaults::ENV_FORMAT, e),
            }
        }

        self
    }

    /// Check values that parse but cannot drive a pipeline.
    pub fn validate(&self) -> Result<()> {
        if self.input.mode == InputMode::Lines && self.selector.keywords.is_empty() {
            return Err(BrainstormError::ConfigInvalidValue {
                key: "selector.keywords".to_string(),
                message: "at least one keyword is required in lines mode".to_string(),
            });
        }
        if self.selector.keywords.iter().any(|k| k.is_empty()) {
            return Err(BrainstormError::ConfigInvalidValue {
                key: "selector.keywords".to_string(),
                message: "keywords must not be empty strings".to_string(),
            });
        }
        Ok(())
    }

    /// Render as TOML, e.g. for `brainstorm config show`.
    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Get the default configuration file path
    ///
    /// Returns ~/.config/brainstorm/config.toml on Linux
    #[cfg(feature = "cli")]
    pub fn default_path() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join(defaults::APP_DIR).join(defaults::CONFIG_FILE))
            .ok_or_else(|| BrainstormError::Other("Could not determine config directory".into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::sync::Mutex;
    use tempfile::NamedTempFile;

    // Mutex to serialize tests that modify environment variables
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    // SAFETY: These helpers are only used in tests with ENV_LOCK held,
    // ensuring no concurrent access to environment variables.
    fn set_env(key: &str, value: &str) {
        unsafe { std::env::set_var(key, value) }
    }

    fn remove_env(key: &str) {
        unsafe { std::env::remove_var(key) }
    }

    fn clear_brainstorm_env() {
        remove_env(defaults::ENV_QUIET_PERIOD);
        remove_env(defaults::ENV_KEYWORDS);
        remove_env(defaults::ENV_FORMAT);
    }

    #[test]
    fn test_default_config_has_correct_values() {
        let config = Config::default();

        assert_eq!(config.input.mode, InputMode::Lines);
        assert_eq!(config.selector.keywords, vec!["ERROR".to_string()]);
        assert!(!config.selector.ignore_case);
        assert!(config.debouncer.enabled);
        assert_eq!(config.debouncer.quiet_period, defaults::QUIET_PERIOD);
        assert!(!config.output.aggregate);
        assert_eq!(config.output.format, OutputFormat::Text);
        assert!(!config.output.color);
    }

    #[test]
    fn test_load_from_toml_file() {
        let toml_content = r#"
            [input]
            mode = "tokens"

            [selector]
            keywords = ["WARN", "ERROR"]
            ignore_case = true

            [debouncer]
            enabled = false
            quiet_period = 5

            [output]
            aggregate = true
            format = "json"
            color = true
        "#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(toml_content.as_bytes()).unwrap();

        let config = Config::load(temp_file.path()).unwrap();

        assert_eq!(config.input.mode, InputMode::Tokens);
        assert_eq!(config.selector.keywords, vec!["WARN", "ERROR"]);
        assert!(config.selector.ignore_case);
        assert!(!config.debouncer.enabled);
        assert_eq!(config.debouncer.quiet_period, 5);
        assert!(config.output.aggregate);
        assert_eq!(config.output.format, OutputFormat::Json);
        assert!(config.output.color);
    }

    #[test]
    fn test_load_partial_config_uses_defaults() {
        let toml_content = r#"
            [debouncer]
            quiet_period = 0
        "#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(toml_content.as_bytes()).unwrap();

        let config = Config::load(temp_file.path()).unwrap();

        assert_eq!(config.debouncer.quiet_period, 0);
        assert!(config.debouncer.enabled);
        assert_eq!(config.selector, SelectorConfig::default());
        assert_eq!(config.output, OutputConfig::default());
    }

    #[test]
    fn test_invalid_toml_returns_error() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(b"[debouncer\nquiet_period = ").unwrap();

        let result = Config::load(temp_file.path());
        assert!(matches!(result, Err(BrainstormError::Config(_))));
    }

    #[test]
    fn test_negative_quiet_period_is_rejected() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[debouncer]\nquiet_period = -1\n")
            .unwrap();

        assert!(Config::load(temp_file.path()).is_err());
    }

    #[test]
    fn test_load_missing_file_reports_path() {
        let result = Config::load(Path::new("/nonexistent/brainstorm/config.toml"));
        match result {
            Err(BrainstormError::ConfigFileNotFound { path }) => {
                assert!(path.contains("nonexistent"));
            }
            other => panic!("expected ConfigFileNotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_load_or_default_returns_default_for_missing_file() {
        let config =
            Config::load_or_default(Path::new("/nonexistent/brainstorm/config.toml")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_load_or_default_propagates_invalid_toml() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(b"this is = not = toml").unwrap();
        assert!(Config::load_or_default(temp_file.path()).is_err());
    }

    #[test]
    fn test_env_override_all() {
        let _lock = ENV_LOCK.lock().unwrap();
        clear_brainstorm_env();

        set_env(defaults::ENV_QUIET_PERIOD, "7");
        set_env(defaults::ENV_KEYWORDS, "panic, fatal ,,");
        set_env(defaults::ENV_FORMAT, "JSON");
        let config = Config::default().with_env_overrides();

        assert_eq!(config.debouncer.quiet_period, 7);
        assert_eq!(config.selector.keywords, vec!["panic", "fatal"]);
        assert_eq!(config.output.format, OutputFormat::Json);

        clear_brainstorm_env();
    }

    #[test]
    fn test_env_override_invalid_and_empty_ignored() {
        let _lock = ENV_LOCK.lock().unwrap();
        clear_brainstorm_env();

        set_env(defaults::ENV_QUIET_PERIOD, "soon");
        set_env(defaults::ENV_KEYWORDS, "");
        set_env(defaults::ENV_FORMAT, "yaml");
        let config = Config::default().with_env_overrides();

        assert_eq!(config, Config::default());

        clear_brainstorm_env();
    }

    #[test]
    fn test_validate() {
        assert!(Config::default().validate().is_ok());

        let mut config = Config::default();
        config.selector.keywords.clear();
        assert!(matches!(
            config.validate(),
            Err(BrainstormError::ConfigInvalidValue { .. })
        ));

        // Token mode does not use the selector
        config.input.mode = InputMode::Tokens;
        assert!(config.validate().is_ok());

        config.selector.keywords = vec![String::new()];
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_to_toml_round_trips() {
        let mut config = Config::default();
        config.selector.keywords = vec!["WARN".to_string()];
        config.output.aggregate = true;

        let text = config.to_toml().unwrap();
        let back: Config = toml::from_str(&text).unwrap();
        assert_eq!(back, config);
    }

    #[test]
    fn test_predicate_matches_keywords() {
        let selector = SelectorConfig {
            keywords: vec!["error".to_string(), "panic".to_string()],
            ignore_case: true,
        };
        let matches = selector.predicate();
        assert!(matches(&"ERROR: disk full".to_string()));
        assert!(matches(&"thread main PANICKED".to_string()));
        assert!(!matches(&"all good".to_string()));

        let strict = SelectorConfig {
            keywords: vec!["error".to_string()],
            ignore_case: false,
        };
        assert!(!strict.predicate()(&"ERROR".to_string()));
    }

    #[test]
    fn test_output_format_from_str() {
        assert_eq!("text".parse::<OutputFormat>().unwrap(), OutputFormat::Text);
        assert_eq!(" Json ".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert!("xml".parse::<OutputFormat>().is_err());
    }

    #[cfg(feature = "cli")]
    #[test]
    fn test_default_path_ends_with_app_config() {
        if let Ok(path) = Config::default_path() {
            assert!(path.ends_with("brainstorm/config.toml"));
        }
    }
}
