//! Compiler for non-template resources.

use super::{Compiler, Session};
use crate::config::Rule;
use crate::error::CompileError;
use crate::hooks::LifecycleEvent;

/// Scripts, stylesheets, images and anything else without directives.
///
/// Emits the full lifecycle and resolves the URI; the content is never
/// touched.
#[derive(Debug, Clone, Copy, Default)]
pub struct AssetCompiler;

impl Compiler for AssetCompiler {
    fn compile(
        &self,
        path: &str,
        rule: Option<&Rule>,
        session: &mut Session<'_>,
    ) -> Result<(), CompileError> {
        session.emit(LifecycleEvent::PreCompile, path)?;
        session.emit(LifecycleEvent::Compiled, path)?;
        session.resolve_uri(path, rule)
    }
}
