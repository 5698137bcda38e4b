//! Compilation error types.

use thiserror::Error;

use crate::hooks::LifecycleEvent;

/// Boxed error returned by a lifecycle observer.
pub type HookFailure = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors that abort a compile call chain.
///
/// None of these are retried or downgraded: each one is a build
/// configuration defect and stops the whole chain for the root resource.
#[derive(Debug, Error)]
pub enum CompileError {
    /// A directive points at a path the registry does not know.
    #[error("resource not found: `{path}` in `{referrer}`")]
    Unresolved { path: String, referrer: String },

    /// The compile root itself is not registered.
    #[error("resource not found: `{path}`")]
    UnknownRoot { path: String },

    /// A matched rule's `to` is not a string.
    #[error("rule `{pattern}`: `to` must be a string, found {found}")]
    InvalidDestination { pattern: String, found: &'static str },

    /// A lifecycle observer failed.
    #[error("{event} hook failed for `{path}`")]
    Hook {
        event: LifecycleEvent,
        path: String,
        #[source]
        source: HookFailure,
    },

    /// A resource was reached again while it was still being compiled.
    #[error("circular reference: {}", chain.join(" -> "))]
    Cycle { chain: Vec<String> },
}

impl CompileError {
    /// The path of the resource the error is about.
    pub fn path(&self) -> &str {
        match self {
            Self::Unresolved { path, .. }
            | Self::UnknownRoot { path }
            | Self::Hook { path, .. } => path,
            Self::InvalidDestination { pattern, .. } => pattern,
            Self::Cycle { chain } => chain.last().map_or("", String::as_str),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_unresolved_display_names_both_paths() {
        let err = CompileError::Unresolved {
            path: "page/missing.tpl".into(),
            referrer: "page/index.tpl".into(),
        };
        let display = err.to_string();
        assert!(display.contains("page/missing.tpl"));
        assert!(display.contains("page/index.tpl"));
        assert_eq!(err.path(), "page/missing.tpl");
    }

    #[test]
    fn test_cycle_display() {
        let err = CompileError::Cycle {
            chain: vec!["a.tpl".into(), "b.tpl".into(), "a.tpl".into()],
        };
        assert_eq!(err.to_string(), "circular reference: a.tpl -> b.tpl -> a.tpl");
    }

    #[test]
    fn test_hook_error_keeps_source() {
        let err = CompileError::Hook {
            event: LifecycleEvent::Resolved,
            path: "a.tpl".into(),
            source: anyhow::anyhow!("disk full").into(),
        };
        assert!(err.to_string().contains("resolved"));
        assert_eq!(err.source().map(|s| s.to_string()), Some("disk full".into()));
    }
}
