//! Site configuration module.
//!
//! Handles loading and validating the site's `config.toml`. Every key has a
//! stock default; the user file only needs the keys it changes.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! people_dir = "people"          # Base dir for person pages
//! session_dir = "sessions"       # Base dir for session and talk pages
//! day_program_dir = "program"    # Base dir for day program pages
//! day_program_prefix = "day"     # Day identifiers: day1, day2, ...
//!
//! data_dir = "_data"             # Data collections (people.yml, ...)
//! layouts_dir = "_layouts"       # Layout templates (person.wiki, ...)
//! destination = "_site"          # Where `build` writes rendered pages
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Site configuration loaded from `config.toml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Base directory of generated person pages.
    pub people_dir: String,
    /// Base directory of generated session pages; talks live below it.
    pub session_dir: String,
    /// Base directory of generated day program pages.
    pub day_program_dir: String,
    /// Prefix of day identifiers (`day` → `day1`, `day2`, ...).
    pub day_program_prefix: String,
    /// Directory holding the data collections.
    pub data_dir: String,
    /// Directory holding the layout templates.
    pub layouts_dir: String,
    /// Output directory of the `build` command.
    pub destination: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            people_dir: "people".to_string(),
            session_dir: "sessions".to_string(),
            day_program_dir: "program".to_string(),
            day_program_prefix: "day".to_string(),
            data_dir: "_data".to_string(),
            layouts_dir: "_layouts".to_string(),
            destination: "_site".to_string(),
        }
    }
}

impl SiteConfig {
    /// Validate directory values. The prefix is free-form and may be empty.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let dirs = [
            ("people_dir", &self.people_dir),
            ("session_dir", &self.session_dir),
            ("day_program_dir", &self.day_program_dir),
            ("data_dir", &self.data_dir),
            ("layouts_dir", &self.layouts_dir),
            ("destination", &self.destination),
        ];
        for (key, value) in dirs {
            if value.is_empty() {
                return Err(ConfigError::Validation(format!("{key} must not be empty")));
            }
            if value.starts_with('/') || value.ends_with('/') {
                return Err(ConfigError::Validation(format!(
                    "{key} must be a relative path without leading or trailing '/': {value:?}"
                )));
            }
        }
        if self.day_program_prefix.contains('/') {
            return Err(ConfigError::Validation(
                "day_program_prefix must not contain '/'".into(),
            ));
        }
        Ok(())
    }
}

// =============================================================================
// Config loading
// =============================================================================

/// Load config from `config.toml` in the site root, falling back to the
/// stock defaults when the file is absent. Keys missing from the file keep
/// their defaults.
pub fn load_config(root: &Path) -> Result<SiteConfig, ConfigError> {
    let config_path = root.join("config.toml");
    let config = if config_path.exists() {
        let content = fs::read_to_string(&config_path)?;
        toml::from_str::<SiteConfig>(&content)?
    } else {
        SiteConfig::default()
    };
    config.validate()?;
    Ok(config)
}

/// Returns a fully-commented stock `config.toml`.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Conference Pages Configuration
# ==============================
# All settings are optional. Remove or comment out any you don't need.
# Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# Generated page locations
# ---------------------------------------------------------------------------
# A page is generated for every entry of a data collection unless a page
# already exists directly inside <dir>/<id>/.

# Person pages: <people_dir>/<person id>/index.wiki (layout "person")
people_dir = "people"

# Session pages: <session_dir>/<session id>/index.wiki (layout "session")
# Talk pages:    <session_dir>/<session id>/<talk id or speaker>/index.wiki
#                (layout "talk", generated only when "session" exists)
session_dir = "sessions"

# Day pages: <day_program_dir>/<prefix><n>/index.html (layout "day_program")
day_program_dir = "program"
day_program_prefix = "day"

# ---------------------------------------------------------------------------
# Site structure
# ---------------------------------------------------------------------------

# Data collections: people, sessions, program (.yml, .yaml, .json, .toml)
data_dir = "_data"

# Layout templates, addressed by file stem (person.wiki -> "person")
layouts_dir = "_layouts"

# Output directory of `conference-pages build`
destination = "_site"
"##
}
