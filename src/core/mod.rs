//! Core types - pure abstractions shared across the codebase.

mod driver;
pub mod link;

pub use driver::BuildMode;
pub use link::{AddressKind, has_template_syntax, is_absolute_url};
