//! Lifecycle notifications for external build stages.
//!
//! Every successful compile of a resource emits, in this order:
//!
//! ```text
//! pre-compile -> compiled -> pre-resolve -> resolved
//! ```
//!
//! Observers run synchronously in subscription order. They see the resource
//! read-only; an observer error aborts the compile and is returned to the
//! caller unchanged. Nothing is emitted when the gate short-circuits an
//! already compiled resource.

use std::fmt;

use crate::error::CompileError;
use crate::resource::Resource;

/// The four fixed points of a resource compile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LifecycleEvent {
    /// Before any substitution.
    PreCompile,
    /// Content substitution done, URI not resolved yet.
    Compiled,
    /// About to compute the URI.
    PreResolve,
    /// URI assigned.
    Resolved,
}

impl LifecycleEvent {
    /// All events in emission order.
    pub const ORDER: [Self; 4] = [
        Self::PreCompile,
        Self::Compiled,
        Self::PreResolve,
        Self::Resolved,
    ];

    pub const fn name(&self) -> &'static str {
        match self {
            Self::PreCompile => "pre-compile",
            Self::Compiled => "compiled",
            Self::PreResolve => "pre-resolve",
            Self::Resolved => "resolved",
        }
    }
}

impl fmt::Display for LifecycleEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Observer callback.
pub type Observer = Box<dyn FnMut(LifecycleEvent, &Resource) -> anyhow::Result<()>>;

/// Ordered list of lifecycle observers.
#[derive(Default)]
pub struct Hooks {
    observers: Vec<Observer>,
}

impl Hooks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an observer for every event.
    pub fn subscribe<F>(&mut self, observer: F) -> &mut Self
    where
        F: FnMut(LifecycleEvent, &Resource) -> anyhow::Result<()> + 'static,
    {
        self.observers.push(Box::new(observer));
        self
    }

    /// Register an observer for a single event.
    pub fn on<F>(&mut self, event: LifecycleEvent, mut observer: F) -> &mut Self
    where
        F: FnMut(&Resource) -> anyhow::Result<()> + 'static,
    {
        self.subscribe(move |fired, resource| {
            if fired == event {
                observer(resource)
            } else {
                Ok(())
            }
        })
    }

    pub fn len(&self) -> usize {
        self.observers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observers.is_empty()
    }

    /// Notify all observers, stopping at the first failure.
    pub(crate) fn emit(
        &mut self,
        event: LifecycleEvent,
        resource: &Resource,
    ) -> Result<(), CompileError> {
        crate::debug!("hook"; "{} {}", event, resource.path());
        for observer in &mut self.observers {
            observer(event, resource).map_err(|err| CompileError::Hook {
                event,
                path: resource.path().to_owned(),
                source: err.into(),
            })?;
        }
        Ok(())
    }
}

impl fmt::Debug for Hooks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Hooks")
            .field("observers", &self.observers.len())
            .finish()
    }
}
