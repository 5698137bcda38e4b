//! Utility modules shared by the compiler.
//!
//! - [`mime`]: MIME type guessing for data URIs
//! - [`path`]: `/`-separated resource path manipulation

pub mod mime;
pub mod path;
