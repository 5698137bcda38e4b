//! Compiler configuration from `tplc.toml`.
//!
//! # Module Structure
//!
//! ```text
//! config/
//! ├── error      # ConfigError, ConfigDiagnostics
//! ├── rule       # Rule, RuleSet, RuleMatcher
//! └── mod.rs     # CompilerConfig (this file)
//! ```
//!
//! # Sections
//!
//! | Section     | Purpose                                           |
//! |-------------|---------------------------------------------------|
//! | `[build]`   | Build mode, comment stripping, verbose tracing    |
//! | `[[rules]]` | Source path → output URI mapping, first match wins |
//!
//! # Example
//!
//! ```toml
//! [build]
//! mode = "production"
//! verbose = true
//!
//! [[rules]]
//! pattern = "^page/.*$"
//! to = "dist/views/"
//! ```

mod error;
pub mod rule;

pub use error::{ConfigDiagnostic, ConfigDiagnostics, ConfigError};
pub use rule::{Rule, RuleMatcher, RuleSet};

use anyhow::{Context, Result};
use regex::Regex;
use serde::Deserialize;
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::compiler::CompileOptions;
use crate::core::BuildMode;
use crate::log;

/// Default config file name.
pub const CONFIG_FILE: &str = "tplc.toml";

// ============================================================================
// root configuration
// ============================================================================

/// Root configuration structure representing `tplc.toml`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CompilerConfig {
    /// Absolute path to the config file (internal use only)
    #[serde(skip)]
    pub config_path: PathBuf,

    /// Build settings
    #[serde(default)]
    pub build: BuildConfig,

    /// Output path rules, tried in order
    #[serde(default)]
    pub rules: Vec<RuleConfig>,
}

/// `[build]` section
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BuildConfig {
    /// `production` or `development`
    pub mode: String,
    /// Override the mode's comment stripping
    pub strip_comments: Option<bool>,
    /// Trace every compile step
    pub verbose: bool,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            mode: "development".into(),
            strip_comments: None,
            verbose: false,
        }
    }
}

/// One `[[rules]]` entry, before its pattern is compiled.
#[derive(Debug, Clone, Deserialize)]
pub struct RuleConfig {
    pub pattern: String,
    /// Kept as a raw value: a non-string `to` is reported when the rule is used.
    #[serde(default)]
    pub to: Option<toml::Value>,
}

impl CompilerConfig {
    /// Parse configuration from TOML string
    pub fn from_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).map_err(ConfigError::Toml)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from file path with unknown field detection.
    pub fn from_path(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;

        let (mut config, ignored) = Self::parse_with_ignored(&content)
            .with_context(|| format!("failed to parse `{}`", path.display()))?;

        if !ignored.is_empty() {
            Self::print_unknown_fields_warning(&ignored, path);
        }

        config.validate()?;
        config.config_path = path.to_path_buf();
        Ok(config)
    }

    /// Search upward from `start` for `tplc.toml`.
    ///
    /// Falls back to the default configuration when no file is found.
    pub fn load(start: &Path) -> Result<Self> {
        match find_config_file(start, Path::new(CONFIG_FILE)) {
            Some(path) => Self::from_path(&path),
            None => {
                crate::debug!("config"; "no {} above {}, using defaults", CONFIG_FILE, start.display());
                Ok(Self::default())
            }
        }
    }

    /// Parse TOML content, collecting any unknown fields.
    fn parse_with_ignored(content: &str) -> Result<(Self, Vec<String>), ConfigError> {
        let mut ignored = Vec::new();
        let deserializer = toml::Deserializer::new(content);
        let config = serde_ignored::deserialize(deserializer, |path: serde_ignored::Path| {
            ignored.push(path.to_string());
        })?;
        Ok((config, ignored))
    }

    /// Print warning about unknown fields.
    fn print_unknown_fields_warning(fields: &[String], path: &Path) {
        let display_path = path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_else(|| path.to_string_lossy());
        log!("warning"; "unknown fields in {}, ignoring:", display_path);
        for field in fields {
            log!("warning"; "- {}", field);
        }
    }

    /// Check the build mode and every rule pattern, reporting all problems at once.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut diag = ConfigDiagnostics::new();

        if BuildMode::from_name(&self.build.mode).is_none() {
            diag.error_with_hint(
                "build.mode",
                format!("unknown mode `{}`", self.build.mode),
                "use `production` or `development`",
            );
        }

        for (idx, rule) in self.rules.iter().enumerate() {
            if let Err(err) = Regex::new(&rule.pattern) {
                diag.error(format!("rules[{idx}].pattern"), err.to_string());
            }
        }

        diag.into_result().map_err(ConfigError::Diagnostics)
    }

    /// Compile the configured rules.
    pub fn rule_set(&self) -> Result<RuleSet, ConfigError> {
        let mut diag = ConfigDiagnostics::new();
        let mut set = RuleSet::default();

        for (idx, rule) in self.rules.iter().enumerate() {
            match Regex::new(&rule.pattern) {
                Ok(pattern) => set.push(Rule::from_value(pattern, rule.to.clone())),
                Err(err) => diag.error(format!("rules[{idx}].pattern"), err.to_string()),
            }
        }

        diag.into_result().map_err(ConfigError::Diagnostics)?;
        Ok(set)
    }

    /// Build mode named by `build.mode` (development when unknown).
    pub fn build_mode(&self) -> BuildMode {
        BuildMode::from_name(&self.build.mode).unwrap_or_default()
    }

    /// Compiler options derived from the build section.
    pub fn compile_options(&self) -> CompileOptions {
        let mode = self.build_mode();
        CompileOptions {
            strip_comments: self.build.strip_comments.unwrap_or(mode.strip_comments),
        }
    }

    /// Apply logging settings globally.
    pub fn apply_logging(&self) {
        crate::logger::set_verbose(self.build.verbose);
    }
}

/// Find config file by searching upward from `start`
///
/// ```text
/// /home/user/site/page/home/   ← start
/// /home/user/site/tplc.toml    ← found!
/// ```
pub fn find_config_file(start: &Path, config_name: &Path) -> Option<PathBuf> {
    if config_name.is_absolute() {
        return config_name.exists().then(|| config_name.to_path_buf());
    }

    let mut current = start;
    loop {
        let candidate = current.join(config_name);
        if candidate.is_file() {
            return Some(candidate);
        }
        current = current.parent()?;
    }
}

// ============================================================================
// tests
// ============================================================================
