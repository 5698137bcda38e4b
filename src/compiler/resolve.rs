//! Address resolution.
//!
//! Turns the raw address of a directive into either a registry key the
//! compiler must build, or a pass-through the compiler leaves untouched.

use crate::core::AddressKind;
use crate::utils::path::{self, route::split_query};

/// Query key that requests the dependency's content instead of a reference.
pub const INLINE_KEY: &str = "__inline";

/// Outcome of resolving one address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Address<'a> {
    /// URL with a scheme, protocol-relative URL or absolute path. Not built here.
    External(&'a str),
    /// Unrendered template expression, known only at render time.
    Dynamic(&'a str),
    /// A resource of this build.
    Local {
        /// Normalized registry path, query and fragment stripped.
        key: String,
        /// The query asked for the content to be inlined.
        inline: bool,
    },
}

impl Address<'_> {
    /// Registry key of a local address.
    pub fn key(&self) -> Option<&str> {
        match self {
            Self::Local { key, .. } => Some(key),
            _ => None,
        }
    }

    pub fn is_inline(&self) -> bool {
        matches!(self, Self::Local { inline: true, .. })
    }
}

/// Resolve `address` as written inside the resource at `referrer`.
///
/// # Examples
/// ```
/// use tplc::compiler::resolve::{resolve, Address};
///
/// let addr = resolve("../lib/a.js?__inline", "page/home/index.tpl");
/// assert_eq!(addr, Address::Local { key: "page/lib/a.js".into(), inline: true });
/// assert_eq!(resolve("//cdn/a.js", "x.tpl"), Address::External("//cdn/a.js"));
/// ```
pub fn resolve<'a>(address: &'a str, referrer: &str) -> Address<'a> {
    match AddressKind::parse(address) {
        AddressKind::Dynamic(addr) => Address::Dynamic(addr),
        AddressKind::External(addr) | AddressKind::Absolute(addr) => Address::External(addr),
        AddressKind::Relative(addr) => {
            let (file, query) = split_query(addr);
            Address::Local {
                key: path::join(path::dirname(referrer), file),
                inline: query.is_some_and(has_inline_flag),
            }
        }
    }
}

/// Whether a raw query string carries the inline key, with or without a value.
fn has_inline_flag(query: &str) -> bool {
    url::form_urlencoded::parse(query.as_bytes()).any(|(key, _)| key == INLINE_KEY)
}
