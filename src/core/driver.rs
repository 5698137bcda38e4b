//! Build mode configuration for production/development builds.

/// Build mode configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuildMode {
    /// Whether `{{* ... *}}` block comments are removed before directive
    /// matching. Commented-out directives are then never resolved.
    pub strip_comments: bool,
}

impl BuildMode {
    /// Production mode: comments stripped from published templates.
    pub const PRODUCTION: Self = Self {
        strip_comments: true,
    };

    /// Development mode: templates keep their comments.
    pub const DEVELOPMENT: Self = Self {
        strip_comments: false,
    };

    /// Parse a mode name as written in `build.mode`.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "production" | "prod" | "build" => Some(Self::PRODUCTION),
            "development" | "dev" | "serve" => Some(Self::DEVELOPMENT),
            _ => None,
        }
    }

    /// Check if this is development mode.
    #[inline]
    pub const fn is_dev(&self) -> bool {
        !self.strip_comments
    }
}

impl Default for BuildMode {
    fn default() -> Self {
        Self::DEVELOPMENT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_name() {
        assert_eq!(BuildMode::from_name("production"), Some(BuildMode::PRODUCTION));
        assert_eq!(BuildMode::from_name("Dev"), Some(BuildMode::DEVELOPMENT));
        assert_eq!(BuildMode::from_name("staging"), None);
        assert!(BuildMode::DEVELOPMENT.is_dev());
        assert!(!BuildMode::PRODUCTION.is_dev());
    }
}
