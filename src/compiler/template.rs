//! Template compiler.
//!
//! Two substitution passes around URI resolution:
//!
//! ```text
//! pre-compile
//!   identity pass   embeds and requires -> dependency URI, id or content
//! compiled
//! pre-resolve
//!   uri from rule
//! resolved
//!   relative pass   include, extends, widget -> path relative to own URI
//! ```
//!
//! The relative pass rewrites against the template's own URI, so it can only
//! run once that URI is known. Permanent templates skip both passes.

use std::ops::Range;

use super::edit::{Edit, apply_edits, disjoint};
use super::resolve::{Address, resolve};
use super::{Compiler, Session};
use crate::config::Rule;
use crate::error::CompileError;
use crate::grammar::{self, Directive, DirectiveKind, Pass};
use crate::hooks::LifecycleEvent;
use crate::resource::Resource;
use crate::utils::path;

/// Compiler for `.tpl` / `.html` resources.
#[derive(Debug, Clone, Copy, Default)]
pub struct TemplateCompiler;

impl Compiler for TemplateCompiler {
    fn compile(
        &self,
        path: &str,
        rule: Option<&Rule>,
        session: &mut Session<'_>,
    ) -> Result<(), CompileError> {
        session.emit(LifecycleEvent::PreCompile, path)?;
        let permanent = session.fetch(path)?.is_permanent();

        if !permanent {
            substitute_identity(path, session)?;
        }
        session.emit(LifecycleEvent::Compiled, path)?;

        session.resolve_uri(path, rule)?;

        if !permanent {
            substitute_relative(path, session)?;
        }
        Ok(())
    }
}

/// A local directive and the bytes its rewrite replaces.
struct Planned<'t> {
    directive: Directive<'t>,
    key: String,
    inline: bool,
    region: Range<usize>,
}

/// Resolve the directives of one pass and drop the ones that would rewrite
/// text another directive already replaces.
///
/// Settled before anything is compiled, so a directive swallowed by an
/// inlined element never pulls in its dependency.
fn plan<'t>(text: &'t str, pass: Pass, referrer: &str) -> Vec<Planned<'t>> {
    let planned = grammar::scan(text, pass)
        .into_iter()
        .filter_map(|directive| {
            let Address::Local { key, inline } = resolve(directive.address, referrer) else {
                return None;
            };
            let swallows_element = inline
                && matches!(directive.kind, DirectiveKind::EmbedScript | DirectiveKind::EmbedLink);
            let region = if swallows_element {
                directive.span.clone()
            } else {
                directive.address_span.clone()
            };
            Some(Planned {
                directive,
                key,
                inline,
                region,
            })
        })
        .collect();
    disjoint(planned, |p| &p.region)
}

/// Embeds and requires.
fn substitute_identity(path: &str, session: &mut Session<'_>) -> Result<(), CompileError> {
    let original = session.fetch(path)?.content().into_owned();
    let text = if session.options().strip_comments {
        grammar::strip_comments(&original).into_owned()
    } else {
        original.clone()
    };

    let mut edits = Vec::new();
    for planned in plan(&text, Pass::Identity, path) {
        session.compile_dependency(path, &planned.key)?;
        let dependency = session.fetch(&planned.key)?;
        let replacement = identity_replacement(&planned, dependency);
        edits.push(Edit::new(planned.region, replacement));
    }

    crate::debug!("compile"; "{}: {} identity edits", path, edits.len());
    let output = apply_edits(&text, edits);
    if output != original {
        session.set_content(path, output)?;
    }
    Ok(())
}

fn identity_replacement(planned: &Planned<'_>, dependency: &Resource) -> String {
    let uri = || dependency.uri().unwrap_or(dependency.path()).to_owned();
    match (planned.directive.kind, planned.inline) {
        (DirectiveKind::EmbedImage, true) => dependency.data_uri(),
        (DirectiveKind::EmbedScript, true) => {
            format!("<script>\n{}\n</script>", dependency.content())
        }
        (DirectiveKind::EmbedLink, true) => {
            format!("<style type=\"text/css\">\n{}\n</style>", dependency.content())
        }
        (DirectiveKind::RequireJs | DirectiveKind::RequireCss, _) => dependency.id().to_owned(),
        _ => uri(),
    }
}

/// Include, extends and widget.
fn substitute_relative(path: &str, session: &mut Session<'_>) -> Result<(), CompileError> {
    let resource = session.fetch(path)?;
    let text = resource.content().into_owned();
    let own_uri = resource.uri().unwrap_or(path).to_owned();
    let base = path::dirname(&own_uri);

    let mut edits = Vec::new();
    for planned in plan(&text, Pass::Relative, path) {
        session.compile_dependency(path, &planned.key)?;
        let dependency = session.fetch(&planned.key)?;
        let target = dependency.uri().unwrap_or(dependency.path());
        let relative = dot_relative(path::relative(base, target));

        let replacement = match planned.directive.kind {
            DirectiveKind::Widget => {
                let q = planned.directive.quote;
                format!("{}{q} path={q}{relative}", dependency.id())
            }
            _ => relative,
        };
        edits.push(Edit::new(planned.region, replacement));
    }

    if edits.is_empty() {
        return Ok(());
    }
    crate::debug!("compile"; "{}: {} relative edits", path, edits.len());
    session.set_content(path, apply_edits(&text, edits))
}

/// Prefix `./` unless the path already starts with `.` or `/`.
fn dot_relative(relative: String) -> String {
    if relative.starts_with('.') || relative.starts_with('/') {
        relative
    } else {
        format!("./{relative}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dot_relative() {
        assert_eq!(dot_relative("a.tpl".into()), "./a.tpl");
        assert_eq!(dot_relative("../a.tpl".into()), "../a.tpl");
        assert_eq!(dot_relative(String::new()), "./");
    }

    #[test]
    fn test_plan_inline_script_swallows_body() {
        let text = r#"<script src="a.js?__inline">{{brisk_require_js name="b.js"}}</script>"#;
        let planned = plan(text, Pass::Identity, "page/index.tpl");
        assert_eq!(planned.len(), 1);
        assert_eq!(planned[0].key, "page/a.js");
        assert_eq!(planned[0].region, 0..text.len());
    }

    #[test]
    fn test_plan_reference_keeps_body_directives() {
        let text = r#"<script src="a.js">{{brisk_require_js name="b.js"}}</script>"#;
        let planned = plan(text, Pass::Identity, "index.tpl");
        let keys: Vec<_> = planned.iter().map(|p| p.key.as_str()).collect();
        assert_eq!(keys, vec!["a.js", "b.js"]);
    }

    #[test]
    fn test_plan_skips_pass_through() {
        let text = r#"<img src="https://x.io/a.png" /><img src="{{$root}}/b.png" /><img src="/abs/c.png" />"#;
        assert!(plan(text, Pass::Identity, "index.tpl").is_empty());
    }
}
