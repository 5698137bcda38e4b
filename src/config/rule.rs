//! Output path rules.
//!
//! A rule maps a resource's source path to its output URI:
//!
//! ```toml
//! [[rules]]
//! pattern = "^page/(.*)\\.tpl$"  # regex over the source path
//! to = "views/${1}.html"          # replacement; `$n` refers to capture groups
//!
//! [[rules]]
//! pattern = "^static/.*$"
//! to = "dist/assets/"             # no extension: a directory, basename appended
//! ```
//!
//! The first rule whose pattern matches a path wins.

use regex::Regex;

use crate::error::CompileError;
use crate::utils::path;

/// One `pattern` / `to` pair.
#[derive(Debug, Clone)]
pub struct Rule {
    pattern: Regex,
    to: Option<toml::Value>,
}

impl Rule {
    /// Create a rule with a textual destination.
    pub fn new(pattern: Regex, to: impl Into<String>) -> Self {
        Self {
            pattern,
            to: Some(toml::Value::String(to.into())),
        }
    }

    /// Create a rule from an unchecked config value.
    ///
    /// A non-string `to` is only reported when the rule is applied.
    pub fn from_value(pattern: Regex, to: Option<toml::Value>) -> Self {
        Self { pattern, to }
    }

    #[inline]
    pub fn pattern(&self) -> &Regex {
        &self.pattern
    }

    #[inline]
    pub fn matches(&self, path: &str) -> bool {
        self.pattern.is_match(path)
    }

    /// The textual destination, if any.
    pub fn destination(&self) -> Result<Option<&str>, CompileError> {
        match &self.to {
            None => Ok(None),
            Some(toml::Value::String(to)) => Ok(Some(to.as_str())),
            Some(other) => Err(CompileError::InvalidDestination {
                pattern: self.pattern.as_str().to_owned(),
                found: other.type_str(),
            }),
        }
    }

    /// Map a source path to its output URI.
    ///
    /// A destination without extension is a directory: a `/` is added when
    /// it does not already end with a separator, then the basename of
    /// `source`. An empty or missing destination leaves the path unchanged.
    pub fn map_path(&self, source: &str) -> Result<String, CompileError> {
        let Some(to) = self.destination()?.filter(|to| !to.is_empty()) else {
            return Ok(source.to_owned());
        };

        let to = if path::extension(to).is_some() {
            to.to_owned()
        } else if path::is_dir_path(to) {
            format!("{to}{}", path::basename(source))
        } else {
            format!("{to}/{}", path::basename(source))
        };

        Ok(self.pattern.replace(source, to.as_str()).into_owned())
    }
}

/// Rule lookup by resource path.
pub trait RuleMatcher {
    /// The rule that applies to `path`, if any.
    fn match_path(&self, path: &str) -> Option<&Rule>;
}

/// Ordered rule list, first match wins.
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    rules: Vec<Rule>,
}

impl RuleSet {
    pub fn new(rules: Vec<Rule>) -> Self {
        Self { rules }
    }

    pub fn push(&mut self, rule: Rule) {
        self.rules.push(rule);
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl RuleMatcher for RuleSet {
    fn match_path(&self, path: &str) -> Option<&Rule> {
        self.rules.iter().find(|rule| rule.matches(path))
    }
}
