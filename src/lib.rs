//! tplc - recursive resource compiler for template-based static asset pipelines.
//!
//! Given a registry of resources (templates, scripts, stylesheets, images,
//! widget fragments), tplc resolves every reference found in a template,
//! compiles the referenced resource first, and rewrites the reference to the
//! dependency's output URI, its logical id, or its inlined content. Each
//! resource is compiled at most once per [`Session`].
//!
//! # Example
//!
//! ```
//! use regex::Regex;
//! use tplc::{Hooks, Registry, Resource, ResourceMap, Rule, RuleSet, Session};
//!
//! let mut resources: ResourceMap = [
//!     Resource::new("page/index.tpl", r#"<script src="../static/app.js"></script>"#),
//!     Resource::new("static/app.js", "run()"),
//! ]
//! .into_iter()
//! .collect();
//! let rules = RuleSet::new(vec![Rule::new(Regex::new(r"^static/.*$").unwrap(), "dist/js/")]);
//! let mut hooks = Hooks::new();
//!
//! Session::new(&mut resources, &rules, &mut hooks)
//!     .compile_root("page/index.tpl")
//!     .unwrap();
//!
//! let page = resources.get("page/index.tpl").unwrap();
//! assert_eq!(page.content(), r#"<script src="dist/js/app.js"></script>"#);
//! ```

pub mod logger;

pub mod compiler;
pub mod config;
pub mod core;
pub mod error;
pub mod grammar;
pub mod hooks;
pub mod resource;
pub mod utils;

pub use compiler::{CompileOptions, Compiler, CompilerRegistry, Session};
pub use config::{CompilerConfig, Rule, RuleMatcher, RuleSet};
pub use error::CompileError;
pub use hooks::{Hooks, LifecycleEvent};
pub use resource::{CompileState, Registry, Resource, ResourceKind, ResourceMap};
