//! Settings file for the `electoral` tool.
//!
//! Settings are read from a TOML file given with `--config`, or from
//! `electoral.toml` in the working directory when present. Command-line
//! flags override file values.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use electoral_ingest::{ENCODING_FALLBACK, SourceConfig, SourceEncoding};
use electoral_match::MatcherOptions;

/// Looked up in the working directory when no `--config` is given.
pub const DEFAULT_CONFIG_FILENAME: &str = "electoral.toml";

const DEFAULT_REFERENCE_PATH: &str = "data/sous_prefectures_selection.csv";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub reference: ReferenceSettings,
    pub matcher: MatcherSettings,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReferenceSettings {
    /// Electoral roll file.
    pub path: PathBuf,
    /// Keep the parsed roll for this many seconds; 0 reads it on every check.
    pub cache_ttl_secs: u64,
    /// Encodings attempted in order.
    pub encodings: Vec<SourceEncoding>,
}

impl Default for ReferenceSettings {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_REFERENCE_PATH),
            cache_ttl_secs: 0,
            encodings: ENCODING_FALLBACK.to_vec(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatcherSettings {
    /// Upper bound on one check, roll loading included.
    pub timeout_secs: u64,
    /// Include names, birth dates and places in log events.
    pub log_personal_data: bool,
}

impl Default for MatcherSettings {
    fn default() -> Self {
        Self {
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            log_personal_data: false,
        }
    }
}

/// Values given on the command line.
#[derive(Debug, Clone, Default)]
pub struct SettingsOverrides {
    pub reference: Option<PathBuf>,
    pub timeout_secs: Option<u64>,
    pub log_personal_data: bool,
}

impl Settings {
    /// Loads settings from `path`, or from [`DEFAULT_CONFIG_FILENAME`] when it
    /// exists, or falls back to defaults.
    ///
    /// An explicitly given file must exist and parse.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => {
                let default_path = Path::new(DEFAULT_CONFIG_FILENAME);
                if default_path.is_file() {
                    Self::from_file(default_path)
                } else {
                    tracing::debug!("no settings file, using defaults");
                    Ok(Self::default())
                }
            }
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("read settings file: {}", path.display()))?;
        let settings = Self::from_toml_str(&content)
            .with_context(|| format!("parse settings file: {}", path.display()))?;
        tracing::info!(path = %path.display(), "loaded settings");
        Ok(settings)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn apply_overrides(&mut self, overrides: SettingsOverrides) {
        if let Some(path) = overrides.reference {
            self.reference.path = path;
        }
        if let Some(secs) = overrides.timeout_secs {
            self.matcher.timeout_secs = secs;
        }
        if overrides.log_personal_data {
            self.matcher.log_personal_data = true;
        }
    }

    pub fn source_config(&self) -> SourceConfig {
        SourceConfig::new(&self.reference.path).with_encodings(self.reference.encodings.clone())
    }

    pub fn cache_ttl(&self) -> Option<Duration> {
        (self.reference.cache_ttl_secs > 0)
            .then(|| Duration::from_secs(self.reference.cache_ttl_secs))
    }

    pub fn matcher_options(&self) -> MatcherOptions {
        MatcherOptions {
            log_personal_data: self.matcher.log_personal_data,
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.matcher.timeout_secs)
    }
}
