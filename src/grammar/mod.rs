//! Directive grammar.
//!
//! Recognizes, inside a resource's text, every reference the compiler acts
//! on, and reports the exact byte spans needed to rewrite it in place.
//!
//! | Directive          | Form                                              |
//! |--------------------|---------------------------------------------------|
//! | embed script       | `<script src="a.js"></script>`                    |
//! | embed link         | `<link rel="stylesheet" href="a.css">`            |
//! | embed image        | `<img src="a.png" />`                             |
//! | include / extends  | `{{include file="a.tpl"}}`, `{{extends file=..}}` |
//! | require js / css   | `{{brisk_require_js name='a.js'}}`                |
//! | widget             | `{{brisk_widget name="nav.tpl"}}`                 |
//!
//! Attribute scanning never leaves the enclosing tag (`[^>]`) or directive
//! (`[^}]`), so one match cannot run into the next directive instance even
//! when both sit on the same line.

use std::borrow::Cow;
use std::ops::Range;
use std::sync::LazyLock;

use regex::{Captures, Regex};

/// Template directive open marker.
pub const OPEN: &str = "{{";
/// Template directive close marker.
pub const CLOSE: &str = "}}";

/// HTML-like external resource tags. A script body is consumed with the tag
/// so nothing inside an inline body is ever treated as an embed.
static EMBED_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r#"(?is)<script\b[^>]*?\ssrc="(?P<script>[^"]*)"[^>]*>.*?</script\s*>"#,
        r#"|<link\b[^>]*?\shref="(?P<link>[^"]*)"[^>]*>(?:\s*</link\s*>)?"#,
        r#"|<img\b[^>]*?\ssrc="(?P<img>[^"]*)"[^>]*?/>"#,
    ))
    .expect("embed pattern is valid")
});

static REQUIRE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?s)\{\{\s*brisk_require_(?P<lang>js|css)\b[^}]*?\sname=(?:"(?P<dq>[^"]*)"|'(?P<sq>[^']*)')[^}]*\}\}"#,
    )
    .expect("require pattern is valid")
});

static INCLUDE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?s)\{\{\s*(?P<verb>include|extends)\b[^}]*?\sfile="(?P<file>[^"]*)"[^}]*\}\}"#)
        .expect("include pattern is valid")
});

static WIDGET_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?s)\{\{\s*brisk_widget\b[^}]*?\sname=(?:"(?P<dq>[^"]*)"|'(?P<sq>[^']*)')[^}]*\}\}"#,
    )
    .expect("widget pattern is valid")
});

static COMMENT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)\{\{\*.*?\*\}\}").expect("comment pattern is valid"));

// ============================================================================
// Directive
// ============================================================================

/// Kind of a recognized directive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DirectiveKind {
    EmbedScript,
    EmbedLink,
    EmbedImage,
    Include,
    Extends,
    RequireJs,
    RequireCss,
    Widget,
}

impl DirectiveKind {
    /// Scan pass that handles this kind.
    pub const fn pass(&self) -> Pass {
        match self {
            Self::EmbedScript
            | Self::EmbedLink
            | Self::EmbedImage
            | Self::RequireJs
            | Self::RequireCss => Pass::Identity,
            Self::Include | Self::Extends | Self::Widget => Pass::Relative,
        }
    }

    pub const fn is_embed(&self) -> bool {
        matches!(self, Self::EmbedScript | Self::EmbedLink | Self::EmbedImage)
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::EmbedScript => "script",
            Self::EmbedLink => "link",
            Self::EmbedImage => "img",
            Self::Include => "include",
            Self::Extends => "extends",
            Self::RequireJs => "require_js",
            Self::RequireCss => "require_css",
            Self::Widget => "widget",
        }
    }
}

/// Which group of directives a scan collects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pass {
    /// Embeds and requires: rewritten with the dependency's URI, id or content.
    Identity,
    /// Include, extends and widget: rewritten with a path relative to the
    /// referencing resource's own URI.
    Relative,
}

/// One directive found in a text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Directive<'a> {
    pub kind: DirectiveKind,
    /// Address exactly as written, query and fragment included.
    pub address: &'a str,
    /// Byte range of `address`.
    pub address_span: Range<usize>,
    /// Byte range of the whole tag or directive.
    pub span: Range<usize>,
    /// Quote around the address.
    pub quote: char,
}

impl Directive<'_> {
    /// Text of the whole directive.
    pub fn source<'t>(&self, text: &'t str) -> &'t str {
        &text[self.span.clone()]
    }
}

// ============================================================================
// Scanning
// ============================================================================

/// Collect every directive handled by `pass`, in text order.
pub fn scan(text: &str, pass: Pass) -> Vec<Directive<'_>> {
    let mut found = match pass {
        Pass::Identity => {
            let mut found = scan_embeds(text);
            found.extend(scan_requires(text));
            found
        }
        Pass::Relative => {
            let mut found = scan_includes(text);
            found.extend(scan_widgets(text));
            found
        }
    };
    found.sort_by_key(|d| d.span.start);
    found
}

/// `<script>`, `<link>` and `<img>` tags carrying an address.
pub fn scan_embeds(text: &str) -> Vec<Directive<'_>> {
    EMBED_RE
        .captures_iter(text)
        .filter_map(|caps| {
            [
                ("script", DirectiveKind::EmbedScript),
                ("link", DirectiveKind::EmbedLink),
                ("img", DirectiveKind::EmbedImage),
            ]
            .into_iter()
            .find_map(|(group, kind)| directive(&caps, group, kind, '"'))
        })
        .collect()
}

/// `{{brisk_require_js name=...}}` and `{{brisk_require_css name=...}}`.
pub fn scan_requires(text: &str) -> Vec<Directive<'_>> {
    REQUIRE_RE
        .captures_iter(text)
        .filter_map(|caps| {
            let kind = match caps.name("lang").map(|m| m.as_str()) {
                Some("css") => DirectiveKind::RequireCss,
                _ => DirectiveKind::RequireJs,
            };
            quoted(&caps, kind)
        })
        .collect()
}

/// `{{include file="..."}}` and `{{extends file="..."}}`.
pub fn scan_includes(text: &str) -> Vec<Directive<'_>> {
    INCLUDE_RE
        .captures_iter(text)
        .filter_map(|caps| {
            let kind = match caps.name("verb").map(|m| m.as_str()) {
                Some("extends") => DirectiveKind::Extends,
                _ => DirectiveKind::Include,
            };
            directive(&caps, "file", kind, '"')
        })
        .collect()
}

/// `{{brisk_widget name=...}}`.
pub fn scan_widgets(text: &str) -> Vec<Directive<'_>> {
    WIDGET_RE
        .captures_iter(text)
        .filter_map(|caps| quoted(&caps, DirectiveKind::Widget))
        .collect()
}

/// Remove `{{* ... *}}` block comments.
pub fn strip_comments(text: &str) -> Cow<'_, str> {
    COMMENT_RE.replace_all(text, "")
}

fn quoted<'t>(caps: &Captures<'t>, kind: DirectiveKind) -> Option<Directive<'t>> {
    directive(caps, "dq", kind, '"').or_else(|| directive(caps, "sq", kind, '\''))
}

fn directive<'t>(
    caps: &Captures<'t>,
    group: &str,
    kind: DirectiveKind,
    quote: char,
) -> Option<Directive<'t>> {
    let whole = caps.get(0)?;
    let address = caps.name(group)?;
    Some(Directive {
        kind,
        address: address.as_str(),
        address_span: address.range(),
        span: whole.range(),
        quote,
    })
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn addresses<'t>(found: &[Directive<'t>]) -> Vec<&'t str> {
        found.iter().map(|d| d.address).collect()
    }

    #[test]
    fn test_script_forms() {
        let text = r#"
<script src="bar.js"></script>
<script type="text/javascript" src="bar.js"></script>
<SCRIPT
    src="bar.js"
    async></SCRIPT>
<script src="bar.js" defer>
</script>
<script>var inline = "<script src=\"x.js\">";</script>
<script data-src="no.js" src="bar.js"></script>
"#;
        let found = scan_embeds(text);
        assert_eq!(addresses(&found), vec!["bar.js"; 5]);
        assert!(found.iter().all(|d| d.kind == DirectiveKind::EmbedScript));
    }

    #[test]
    fn test_inline_body_is_not_an_embed() {
        let text = r#"<script src="a.js">document.write('<img src="b.png" />')</script>"#;
        let found = scan_embeds(text);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].address, "a.js");
        assert_eq!(found[0].span, 0..text.len());
    }

    #[test]
    fn test_link_forms() {
        let text = r#"
<link rel="stylesheet" href="bar.css">
<link rel="stylesheet" href="bar.css" />
<link href="bar.css" rel="stylesheet"></link>
<LINK
  rel="stylesheet"
  href="bar.css"/>
<link rel="stylesheet" href="bar.css" type="text/css">
"#;
        let found = scan_embeds(text);
        assert_eq!(addresses(&found), vec!["bar.css"; 5]);
        assert!(found[2].source(text).ends_with("</link>"));
    }

    #[test]
    fn test_image_requires_self_closing() {
        let text = r#"
<img src="bar.png" />
<img alt="x" src="bar.png"/>
<img
  src="bar.png"
  width="10" />
<img src="open.png">
"#;
        let found = scan_embeds(text);
        assert_eq!(addresses(&found), vec!["bar.png"; 3]);
    }

    #[test]
    fn test_include_and_extends() {
        let text = r#"
{{include file="bar.tpl"}}
{{include file="bar.tpl" title="x"}}
{{include
  file="bar.tpl"}}
{{extends file="layout.tpl"}}
{{include_php file="skip.php"}}
"#;
        let found = scan_includes(text);
        assert_eq!(addresses(&found), vec!["bar.tpl", "bar.tpl", "bar.tpl", "layout.tpl"]);
        assert_eq!(found[3].kind, DirectiveKind::Extends);
    }

    #[test]
    fn test_two_directives_on_one_line_do_not_merge() {
        let text = r#"{{include file="a.tpl"}}{{include file="b.tpl"}}"#;
        let found = scan_includes(text);
        assert_eq!(addresses(&found), vec!["a.tpl", "b.tpl"]);
        assert_eq!(found[0].source(text), r#"{{include file="a.tpl"}}"#);

        let text = r#"{{brisk_require_js name="a.js"}} {{brisk_require_css name='b.css'}}"#;
        let found = scan_requires(text);
        assert_eq!(addresses(&found), vec!["a.js", "b.css"]);
    }

    #[test]
    fn test_require_quotes() {
        let text = r#"{{brisk_require_js name='lib/a.js'}}{{brisk_require_css name="lib/b.css"}}"#;
        let found = scan_requires(text);
        assert_eq!(found[0].kind, DirectiveKind::RequireJs);
        assert_eq!(found[0].quote, '\'');
        assert_eq!(found[1].kind, DirectiveKind::RequireCss);
        assert_eq!(found[1].quote, '"');
    }

    #[test]
    fn test_widget() {
        let text = r#"<div>{{brisk_widget name="widget/nav.tpl" mode="async"}}</div>"#;
        let found = scan_widgets(text);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].address, "widget/nav.tpl");
        assert_eq!(&text[found[0].address_span.clone()], "widget/nav.tpl");
    }

    #[test]
    fn test_scan_orders_by_position() {
        let text = r#"{{brisk_require_css name="a.css"}}<img src="b.png" />{{include file="c.tpl"}}{{brisk_widget name='d.tpl'}}"#;
        let identity = scan(text, Pass::Identity);
        assert_eq!(addresses(&identity), vec!["a.css", "b.png"]);
        let relative = scan(text, Pass::Relative);
        assert_eq!(addresses(&relative), vec!["c.tpl", "d.tpl"]);
        assert!(identity.iter().all(|d| d.kind.pass() == Pass::Identity));
        assert!(relative.iter().all(|d| d.kind.pass() == Pass::Relative));
    }

    #[test]
    fn test_strip_comments() {
        let text = "a{{* {{include file=\"x.tpl\"}}\n *}}b{{*c*}}";
        assert_eq!(strip_comments(text), "ab");
        assert!(matches!(strip_comments("plain"), Cow::Borrowed("plain")));
    }
}
