//! Default configuration constants for brainstorm.

/// Default debounce quiet period, in plain tokens.
///
/// Two unselected lines between two selected ones still count as one block.
pub const QUIET_PERIOD: usize = 2;

/// Keywords the line selector matches when none are configured.
pub const KEYWORDS: &[&str] = &["ERROR"];

/// Application directory name under the user config dir.
pub const APP_DIR: &str = "brainstorm";

/// Configuration file name.
pub const CONFIG_FILE: &str = "config.toml";

/// Environment variable overriding `debouncer.quiet_period`.
pub const ENV_QUIET_PERIOD: &str = "BRAINSTORM_QUIET_PERIOD";

/// Environment variable overriding `selector.keywords` (comma separated).
pub const ENV_KEYWORDS: &str = "BRAINSTORM_KEYWORDS";

/// Environment variable overriding `output.format`.
pub const ENV_FORMAT: &str = "BRAINSTORM_FORMAT";
