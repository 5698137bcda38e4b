//! Span edits.
//!
//! A pass first collects every replacement it wants to make as a byte range
//! of the original text, then builds the output once. No replacement is ever
//! matched against text produced by another one.

use std::ops::Range;

/// Replace `range` of the source text with `replacement`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edit {
    pub range: Range<usize>,
    pub replacement: String,
}

impl Edit {
    pub fn new(range: Range<usize>, replacement: impl Into<String>) -> Self {
        Self {
            range,
            replacement: replacement.into(),
        }
    }

    #[inline]
    pub fn overlaps(&self, other: &Range<usize>) -> bool {
        self.range.start < other.end && other.start < self.range.end
    }
}

/// Drop every range that overlaps an earlier kept one.
///
/// Ranges are considered in ascending start order; the survivors come back
/// sorted. Used to settle conflicts before any dependency is compiled.
pub fn disjoint<T>(mut items: Vec<T>, range: impl Fn(&T) -> &Range<usize>) -> Vec<T> {
    items.sort_by_key(|item| range(item).start);
    let mut kept: Vec<T> = Vec::with_capacity(items.len());
    for item in items {
        let overlaps = kept.last().is_some_and(|last| {
            let (a, b) = (range(last), range(&item));
            a.start < b.end && b.start < a.end
        });
        if !overlaps {
            kept.push(item);
        }
    }
    kept
}

/// Apply non-overlapping edits to `text`.
///
/// Edits overlapping an earlier one are skipped.
pub fn apply_edits(text: &str, edits: Vec<Edit>) -> String {
    let edits = disjoint(edits, |edit| &edit.range);
    let mut out = String::with_capacity(text.len());
    let mut cursor = 0;
    for edit in edits {
        out.push_str(&text[cursor..edit.range.start]);
        out.push_str(&edit.replacement);
        cursor = edit.range.end;
    }
    out.push_str(&text[cursor..]);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_in_any_order() {
        let text = "see a.js and b.css";
        let edits = vec![Edit::new(13..18, "/dist/b.css"), Edit::new(4..8, "/dist/a.js")];
        assert_eq!(apply_edits(text, edits), "see /dist/a.js and /dist/b.css");
    }

    #[test]
    fn test_replacement_not_rescanned() {
        let text = "a.js";
        let edits = vec![Edit::new(0..4, "a.js a.js")];
        assert_eq!(apply_edits(text, edits), "a.js a.js");
    }

    #[test]
    fn test_overlap_keeps_earlier() {
        let text = "<script>x</script>";
        let edits = vec![Edit::new(0..18, "INLINE"), Edit::new(8..9, "y")];
        assert_eq!(apply_edits(text, edits), "INLINE");
    }

    #[test]
    fn test_disjoint_touching_ranges() {
        let ranges = vec![3..5, 0..3, 4..6];
        assert_eq!(disjoint(ranges, |r| r), vec![0..3, 3..5]);
        assert!(Edit::new(0..3, "").overlaps(&(2..4)));
        assert!(!Edit::new(0..3, "").overlaps(&(3..4)));
    }

    #[test]
    fn test_no_edits() {
        assert_eq!(apply_edits("plain", Vec::new()), "plain");
    }
}
