//! Constants for remind-md
//!
//! Format strings, environment variables, and default paths used
//! throughout the codebase.

// === File and Path Defaults ===

/// Environment variable overriding the reminder document path
pub const FILE_ENV_VAR: &str = "REMIND_MD_FILE";

/// Default directory under the user's home
pub const DEFAULT_DIR: &str = ".remind-md";

/// Default reminder document filename
pub const DEFAULT_FILENAME: &str = "remind.md";

// === Date Formats ===

/// Date format accepted by `--date` and the offset command: %Y-%m-%d
pub const DATE_FORMAT: &str = "%Y-%m-%d";

// === Editor ===

/// Environment variable naming the editor for the edit command
pub const EDITOR_ENV_VAR: &str = "EDITOR";

/// Fallback editor when $EDITOR is unset
pub const DEFAULT_EDITOR: &str = "vi";
