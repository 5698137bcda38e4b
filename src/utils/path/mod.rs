//! Resource path utilities.
//!
//! Pure functions over `/`-separated resource paths. Resource paths are
//! registry keys, not filesystem locations, so these never touch the disk
//! and behave the same on every platform.
//!
//! - [`route`]: address classification helpers (`is_external_link`, `split_query`)

pub mod route;

/// Directory part of a path (`"."` for a bare file name).
///
/// # Examples
/// ```
/// use tplc::utils::path::dirname;
/// assert_eq!(dirname("page/home/index.tpl"), "page/home");
/// assert_eq!(dirname("index.tpl"), ".");
/// assert_eq!(dirname("/index.tpl"), "/");
/// ```
pub fn dirname(path: &str) -> &str {
    let trimmed = path.trim_end_matches('/');
    match trimmed.rfind('/') {
        Some(0) => "/",
        Some(pos) => &trimmed[..pos],
        None if path.starts_with('/') => "/",
        None => ".",
    }
}

/// Last segment of a path.
pub fn basename(path: &str) -> &str {
    let trimmed = path.trim_end_matches('/');
    trimmed.rsplit('/').next().unwrap_or(trimmed)
}

/// Extension of the last segment, without the dot.
///
/// Dot files (`.htaccess`) have no extension.
pub fn extension(path: &str) -> Option<&str> {
    let name = basename(path);
    match name.rfind('.') {
        Some(0) | None => None,
        Some(pos) => Some(&name[pos + 1..]).filter(|ext| !ext.is_empty()),
    }
}

/// Whether a destination string names a directory (trailing separator).
#[inline]
pub fn is_dir_path(path: &str) -> bool {
    path.ends_with('/') || path.ends_with('\\')
}

/// Normalize a path: collapse `.` and empty segments, resolve `..`.
///
/// Leading `..` segments of a relative path are kept, an absolute path
/// never climbs above `/`. An empty result becomes `"."`.
pub fn normalize(path: &str) -> String {
    let absolute = path.starts_with('/');
    let mut segments: Vec<&str> = Vec::new();

    for part in path.split('/') {
        match part {
            "" | "." => {}
            ".." => match segments.last() {
                Some(&last) if last != ".." => {
                    segments.pop();
                }
                _ if absolute => {}
                _ => segments.push(".."),
            },
            _ => segments.push(part),
        }
    }

    let joined = segments.join("/");
    match (absolute, joined.is_empty()) {
        (true, _) => format!("/{joined}"),
        (false, true) => ".".to_string(),
        (false, false) => joined,
    }
}

/// Join `rel` onto directory `base` and normalize.
///
/// # Examples
/// ```
/// use tplc::utils::path::join;
/// assert_eq!(join("page/home", "../widget/nav.tpl"), "page/widget/nav.tpl");
/// assert_eq!(join(".", "./app.js"), "app.js");
/// ```
pub fn join(base: &str, rel: &str) -> String {
    if base.is_empty() || base == "." {
        normalize(rel)
    } else {
        normalize(&format!("{base}/{rel}"))
    }
}

/// Path of `to` relative to directory `from`.
///
/// Both sides are normalized first. Returns an empty string when they are
/// the same location.
///
/// When exactly one side is absolute there is no shared base: `to` comes
/// back rooted (`/` prefixed) instead.
///
/// # Examples
/// ```
/// use tplc::utils::path::relative;
/// assert_eq!(relative("dist/page", "dist/widget/nav.tpl"), "../widget/nav.tpl");
/// assert_eq!(relative("dist/page", "dist/page/a.tpl"), "a.tpl");
/// assert_eq!(relative("/dist/page", "widget/nav.tpl"), "/widget/nav.tpl");
/// ```
pub fn relative(from: &str, to: &str) -> String {
    let from = normalize(from);
    let to = normalize(to);
    if from.starts_with('/') != to.starts_with('/') {
        return if to.starts_with('/') { to } else { format!("/{to}") };
    }
    let from_parts: Vec<&str> = segments(&from);
    let to_parts: Vec<&str> = segments(&to);

    let common = from_parts
        .iter()
        .zip(&to_parts)
        .take_while(|(a, b)| a == b)
        .count();

    let mut parts: Vec<&str> = vec![".."; from_parts.len() - common];
    parts.extend_from_slice(&to_parts[common..]);
    parts.join("/")
}

fn segments(path: &str) -> Vec<&str> {
    path.split('/')
        .filter(|s| !s.is_empty() && *s != ".")
        .collect()
}

// ============================================================================
// Tests
// ============================================================================
