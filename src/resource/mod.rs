//! Resource types for the build session.
//!
//! A [`Resource`] is one unit of compilable content (template, script,
//! stylesheet, image ...) keyed by its canonical source path. Resources are
//! created by the loader, registered in a [`Registry`], and mutated only by
//! the compiler through two phases: content substitution and URI resolution.
//!
//! # Lifecycle
//!
//! ```text
//! Pending ──compile──> Compiling ──ok──> Compiled (frozen)
//!    ^                     │
//!    └──────error──────────┘
//! ```

mod map;

use std::borrow::Cow;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use crate::utils::{mime, path};

pub use map::{Registry, ResourceMap};

// ============================================================================
// Resource Kind
// ============================================================================

/// Kind of resource, used to select a compiler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    /// Template with directives (`.tpl`, `.html`).
    Template,
    /// Script (`.js`).
    Script,
    /// Stylesheet (`.css`).
    Style,
    /// Raster or vector image.
    Image,
    /// Anything else (fonts, data files).
    Other,
}

impl ResourceKind {
    /// Infer the kind from a path extension.
    pub fn from_path(path: &str) -> Self {
        let ext = path::extension(path).map(str::to_ascii_lowercase);
        match ext.as_deref() {
            Some("tpl" | "html" | "htm") => Self::Template,
            Some("js" | "mjs") => Self::Script,
            Some("css") => Self::Style,
            _ if mime::is_image(mime::from_path(path)) => Self::Image,
            _ => Self::Other,
        }
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Template => "template",
            Self::Script => "script",
            Self::Style => "style",
            Self::Image => "image",
            Self::Other => "other",
        }
    }
}

// ============================================================================
// Compile State
// ============================================================================

/// Compilation gate of a single resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CompileState {
    /// Not compiled yet.
    #[default]
    Pending,
    /// On the current compile stack. Reaching it again means a cycle.
    Compiling,
    /// Fully compiled; content and URI are frozen.
    Compiled,
}

// ============================================================================
// Resource
// ============================================================================

/// A unit of compilable content.
#[derive(Debug, Clone)]
pub struct Resource {
    path: String,
    id: Option<String>,
    kind: ResourceKind,
    content: Vec<u8>,
    uri: Option<String>,
    state: CompileState,
    permanent: bool,
}

impl Resource {
    /// Create a resource with its kind inferred from the path.
    pub fn new(path: impl Into<String>, content: impl Into<Vec<u8>>) -> Self {
        let path = path.into();
        Self {
            kind: ResourceKind::from_path(&path),
            path,
            id: None,
            content: content.into(),
            uri: None,
            state: CompileState::Pending,
            permanent: false,
        }
    }

    /// Assign a logical id (defaults to the path).
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Override the inferred kind.
    pub fn with_kind(mut self, kind: ResourceKind) -> Self {
        self.kind = kind;
        self
    }

    /// Mark the content as immutable: substitution is skipped, the URI is
    /// still resolved.
    pub fn permanent(mut self) -> Self {
        self.permanent = true;
        self
    }

    #[inline]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Logical id, falling back to the path.
    #[inline]
    pub fn id(&self) -> &str {
        self.id.as_deref().unwrap_or(&self.path)
    }

    #[inline]
    pub const fn kind(&self) -> ResourceKind {
        self.kind
    }

    /// Final output URI. `None` until the resolve phase ran.
    #[inline]
    pub fn uri(&self) -> Option<&str> {
        self.uri.as_deref()
    }

    #[inline]
    pub const fn state(&self) -> CompileState {
        self.state
    }

    #[inline]
    pub fn is_compiled(&self) -> bool {
        self.state == CompileState::Compiled
    }

    #[inline]
    pub const fn is_permanent(&self) -> bool {
        self.permanent
    }

    /// Current content as text (lossy for non UTF-8 bytes).
    pub fn content(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.content)
    }

    /// Raw content bytes.
    pub fn bytes(&self) -> &[u8] {
        &self.content
    }

    /// Base64 `data:` URI of the current content.
    pub fn data_uri(&self) -> String {
        format!(
            "data:{};base64,{}",
            mime::from_path(&self.path),
            STANDARD.encode(&self.content)
        )
    }

    // ------------------------------------------------------------------------
    // Compiler-only mutation
    // ------------------------------------------------------------------------

    pub(crate) fn set_content(&mut self, content: String) {
        debug_assert!(!self.is_compiled(), "content of {} is frozen", self.path);
        self.content = content.into_bytes();
    }

    pub(crate) fn set_uri(&mut self, uri: String) {
        debug_assert!(!self.is_compiled(), "uri of {} is frozen", self.path);
        self.uri = Some(uri);
    }

    pub(crate) fn set_state(&mut self, state: CompileState) {
        self.state = state;
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_from_path() {
        assert_eq!(ResourceKind::from_path("page/index.tpl"), ResourceKind::Template);
        assert_eq!(ResourceKind::from_path("page/index.HTML"), ResourceKind::Template);
        assert_eq!(ResourceKind::from_path("static/a.js"), ResourceKind::Script);
        assert_eq!(ResourceKind::from_path("static/a.css"), ResourceKind::Style);
        assert_eq!(ResourceKind::from_path("img/a.png"), ResourceKind::Image);
        assert_eq!(ResourceKind::from_path("img/a.svg"), ResourceKind::Image);
        assert_eq!(ResourceKind::from_path("font/a.woff2"), ResourceKind::Other);
    }

    #[test]
    fn test_new_resource_is_pending() {
        let resource = Resource::new("page/a.tpl", "hello");
        assert_eq!(resource.state(), CompileState::Pending);
        assert!(!resource.is_compiled());
        assert!(!resource.is_permanent());
        assert_eq!(resource.uri(), None);
        assert_eq!(resource.content(), "hello");
    }

    #[test]
    fn test_id_defaults_to_path() {
        let resource = Resource::new("lib/a.js", "");
        assert_eq!(resource.id(), "lib/a.js");
        let resource = resource.with_id("lib:a");
        assert_eq!(resource.id(), "lib:a");
    }

    #[test]
    fn test_data_uri() {
        let resource = Resource::new("img/dot.png", vec![0x89, b'P', b'N', b'G']);
        assert_eq!(resource.data_uri(), "data:image/png;base64,iVBORw==");

        let resource = Resource::new("a.css", "a{}");
        assert_eq!(resource.data_uri(), "data:text/css;base64,YXt9");
    }
}
