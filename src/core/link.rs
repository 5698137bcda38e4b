//! Address classification utilities.

use crate::utils::path::route::is_external_link;

/// Syntactic classification of an address found in a directive
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressKind<'a> {
    /// Still contains template syntax (`{{$cdn}}/a.js`); only known after rendering.
    Dynamic(&'a str),
    /// Link with URL scheme (https://, data:, //cdn...).
    External(&'a str),
    /// Absolute filesystem path (/static/a.js).
    Absolute(&'a str),
    /// Path relative to the referencing resource (./a.js, ../b.tpl, c.css).
    Relative(&'a str),
}

impl<'a> AddressKind<'a> {
    /// Parse an address into its syntactic kind.
    ///
    /// Template syntax is checked first: `{{$root}}/a.js` is dynamic even
    /// though it would otherwise look relative.
    #[inline]
    pub fn parse(address: &'a str) -> Self {
        if has_template_syntax(address) {
            Self::Dynamic(address)
        } else if is_external_link(address) {
            Self::External(address)
        } else if address.starts_with('/') || address.starts_with('\\') {
            Self::Absolute(address)
        } else {
            Self::Relative(address)
        }
    }

    /// Whether the build owns the target (it must exist in the registry).
    #[inline]
    pub const fn is_local(&self) -> bool {
        matches!(self, Self::Relative(_))
    }
}

/// Check if an address is an absolute URL (scheme-qualified or protocol-relative).
#[inline]
pub fn is_absolute_url(address: &str) -> bool {
    is_external_link(address)
}

/// Check if an address still carries an unrendered `{{ ... }}` expression.
#[inline]
pub fn has_template_syntax(address: &str) -> bool {
    address
        .find("{{")
        .is_some_and(|open| address[open + 2..].contains("}}"))
}
