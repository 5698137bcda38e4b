//! Recursive resource compilation.
//!
//! # Module Structure
//!
//! ```text
//! compiler/
//! ├── resolve    # directive address -> registry key
//! ├── edit       # span edits, applied once per pass
//! ├── template   # two-pass template compiler
//! ├── asset      # scripts, styles, images: events and URI only
//! └── mod.rs     # Compiler trait, CompilerRegistry, Session (this file)
//! ```
//!
//! # Flow
//!
//! ```text
//! Session::compile(path)
//!   ├── Compiled?  -> Ok, nothing emitted
//!   ├── Compiling? -> CompileError::Cycle
//!   └── Pending    -> Compiling -> compiler.compile() -> Compiled
//!                                      │
//!                                      └── Session::compile_dependency(dep)  (recursive)
//! ```
//!
//! A failed compile puts the resource back to `Pending`. Content written by
//! the failed attempt is left as is.

mod asset;
pub mod edit;
pub mod resolve;
mod template;


pub use asset::AssetCompiler;
pub use template::TemplateCompiler;

use std::sync::LazyLock;

use rustc_hash::FxHashMap;

use crate::config::{Rule, RuleMatcher};
use crate::error::CompileError;
use crate::hooks::{Hooks, LifecycleEvent};
use crate::resource::{CompileState, Registry, Resource, ResourceKind};

/// Per-session compile switches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CompileOptions {
    /// Remove `{{* ... *}}` comments before scanning templates.
    pub strip_comments: bool,
}

/// Compiles one resource of a given kind.
///
/// Called by [`Session::compile`] only, with the gate already closed for
/// `path`. Dependencies must be built through
/// [`Session::compile_dependency`], never directly.
pub trait Compiler: Send + Sync {
    fn compile(
        &self,
        path: &str,
        rule: Option<&Rule>,
        session: &mut Session<'_>,
    ) -> Result<(), CompileError>;
}

// ============================================================================
// Compiler registry
// ============================================================================

/// Compiler lookup by resource kind.
///
/// Templates go to [`TemplateCompiler`] and every other kind to
/// [`AssetCompiler`] unless overridden with [`register`](Self::register).
pub struct CompilerRegistry {
    by_kind: FxHashMap<ResourceKind, Box<dyn Compiler>>,
    fallback: Box<dyn Compiler>,
}

impl CompilerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use `compiler` for every resource of `kind`.
    pub fn register(&mut self, kind: ResourceKind, compiler: impl Compiler + 'static) -> &mut Self {
        self.by_kind.insert(kind, Box::new(compiler));
        self
    }

    pub fn for_kind(&self, kind: ResourceKind) -> &dyn Compiler {
        self.by_kind
            .get(&kind)
            .map_or(self.fallback.as_ref(), |compiler| compiler.as_ref())
    }
}

impl Default for CompilerRegistry {
    fn default() -> Self {
        let mut by_kind: FxHashMap<ResourceKind, Box<dyn Compiler>> = FxHashMap::default();
        by_kind.insert(ResourceKind::Template, Box::new(TemplateCompiler));
        Self {
            by_kind,
            fallback: Box::new(AssetCompiler),
        }
    }
}

impl std::fmt::Debug for CompilerRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompilerRegistry")
            .field("kinds", &self.by_kind.keys().collect::<Vec<_>>())
            .finish_non_exhaustive()
    }
}

static DEFAULT_COMPILERS: LazyLock<CompilerRegistry> = LazyLock::new(CompilerRegistry::default);

// ============================================================================
// Session
// ============================================================================

/// One build session over a registry.
///
/// Holds everything a compile needs: the resources, the output rules, the
/// per-kind compilers and the lifecycle observers. Each resource is compiled
/// at most once per session, however many resources reference it.
pub struct Session<'a> {
    registry: &'a mut dyn Registry,
    rules: &'a dyn RuleMatcher,
    compilers: &'a CompilerRegistry,
    hooks: &'a mut Hooks,
    options: CompileOptions,
    /// Paths currently being compiled, outermost first.
    stack: Vec<String>,
}

impl<'a> Session<'a> {
    pub fn new(
        registry: &'a mut dyn Registry,
        rules: &'a dyn RuleMatcher,
        hooks: &'a mut Hooks,
    ) -> Self {
        Self {
            registry,
            rules,
            compilers: &DEFAULT_COMPILERS,
            hooks,
            options: CompileOptions::default(),
            stack: Vec::new(),
        }
    }

    pub fn with_options(mut self, options: CompileOptions) -> Self {
        self.options = options;
        self
    }

    /// Replace the default per-kind compilers.
    pub fn with_compilers(mut self, compilers: &'a CompilerRegistry) -> Self {
        self.compilers = compilers;
        self
    }

    #[inline]
    pub const fn options(&self) -> CompileOptions {
        self.options
    }

    /// Look up a registered resource.
    pub fn resource(&self, path: &str) -> Option<&Resource> {
        self.registry.get(path)
    }

    /// Compile `path` using the rule matched for it.
    pub fn compile_root(&mut self, path: &str) -> Result<(), CompileError> {
        let rules = self.rules;
        self.compile(path, rules.match_path(path))
    }

    /// Compile every template of the registry, in path order.
    ///
    /// Stops at the first failure.
    pub fn compile_all(&mut self) -> Result<(), CompileError> {
        let mut roots: Vec<String> = self
            .registry
            .paths()
            .into_iter()
            .filter(|path| {
                self.registry
                    .get(path)
                    .is_some_and(|r| r.kind() == ResourceKind::Template)
            })
            .collect();
        roots.sort_unstable();

        crate::debug!("compile"; "{} templates", roots.len());
        for root in &roots {
            self.compile_root(root)?;
        }
        Ok(())
    }

    /// Compile `path` once, guarded by its [`CompileState`].
    pub fn compile(&mut self, path: &str, rule: Option<&Rule>) -> Result<(), CompileError> {
        let resource = self
            .registry
            .get_mut(path)
            .ok_or_else(|| CompileError::UnknownRoot { path: path.to_owned() })?;

        match resource.state() {
            CompileState::Compiled => return Ok(()),
            CompileState::Compiling => return Err(self.cycle(path)),
            CompileState::Pending => resource.set_state(CompileState::Compiling),
        }
        let kind = resource.kind();

        crate::debug!("compile"; "{} ({})", path, kind.as_str());
        self.stack.push(path.to_owned());
        let compilers = self.compilers;
        let result = compilers.for_kind(kind).compile(path, rule, self);
        self.stack.pop();

        let state = match result {
            Ok(()) => CompileState::Compiled,
            Err(_) => CompileState::Pending,
        };
        if let Some(resource) = self.registry.get_mut(path) {
            resource.set_state(state);
        }
        result
    }

    /// Compile the resource `target` referenced from `referrer`.
    ///
    /// Fails with [`CompileError::Unresolved`] when `target` is not
    /// registered. An already compiled target is left alone.
    pub fn compile_dependency(&mut self, referrer: &str, target: &str) -> Result<(), CompileError> {
        let Some(dependency) = self.registry.get(target) else {
            return Err(CompileError::Unresolved {
                path: target.to_owned(),
                referrer: referrer.to_owned(),
            });
        };
        if dependency.is_compiled() {
            return Ok(());
        }

        let rules = self.rules;
        let rule = rules.match_path(target);
        if let Some(rule) = rule {
            rule.destination()?;
        }
        crate::debug!("compile"; "{} -> {}", referrer, target);
        self.compile(target, rule)
    }

    /// Notify observers about `path`.
    pub fn emit(&mut self, event: LifecycleEvent, path: &str) -> Result<(), CompileError> {
        let resource = self.registry.get(path).ok_or_else(|| CompileError::UnknownRoot {
            path: path.to_owned(),
        })?;
        self.hooks.emit(event, resource)
    }

    /// Resolve and store the output URI of `path`, surrounded by the
    /// `pre-resolve` and `resolved` events.
    ///
    /// Without a rule the URI is the path itself.
    pub fn resolve_uri(&mut self, path: &str, rule: Option<&Rule>) -> Result<(), CompileError> {
        self.emit(LifecycleEvent::PreResolve, path)?;
        let uri = match rule {
            Some(rule) => rule.map_path(path)?,
            None => path.to_owned(),
        };
        crate::debug!("resolve"; "{} => {}", path, uri);
        self.resource_mut(path)?.set_uri(uri);
        self.emit(LifecycleEvent::Resolved, path)
    }

    /// Replace the content of `path`.
    pub(crate) fn set_content(&mut self, path: &str, content: String) -> Result<(), CompileError> {
        self.resource_mut(path)?.set_content(content);
        Ok(())
    }

    pub(crate) fn fetch(&self, path: &str) -> Result<&Resource, CompileError> {
        self.registry.get(path).ok_or_else(|| CompileError::UnknownRoot {
            path: path.to_owned(),
        })
    }

    fn resource_mut(&mut self, path: &str) -> Result<&mut Resource, CompileError> {
        self.registry.get_mut(path).ok_or_else(|| CompileError::UnknownRoot {
            path: path.to_owned(),
        })
    }

    /// Chain from the first visit of `path` back to `path`.
    fn cycle(&self, path: &str) -> CompileError {
        let start = self.stack.iter().position(|p| p == path).unwrap_or(0);
        let mut chain = self.stack[start..].to_vec();
        chain.push(path.to_owned());
        CompileError::Cycle { chain }
    }
}

impl std::fmt::Debug for Session<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("options", &self.options)
            .field("stack", &self.stack)
            .field("hooks", &self.hooks)
            .finish_non_exhaustive()
    }
}
