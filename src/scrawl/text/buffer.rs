//! The styled text buffer: one `String` of Markdown source plus a sparse,
//! sorted list of attribute spans laid over byte ranges of it.
//!
//! The text is the document model *and* the render model. Invariants:
//!
//! - Spans are sorted, non-overlapping, in bounds, and never empty.
//! - Spans whose attrs equal the base style are dropped (sparseness), and
//!   adjacent spans with equal attrs coalesce. This gives every styling
//!   state exactly one representation, which is what makes re-decoration
//!   idempotent.
//! - Styling never touches the text. The only text mutations go through
//!   [`StyledBuffer::replace_range`], used by the image rule and the asset
//!   pipeline's placeholder swaps.

use super::style::Attrs;
use std::ops::Range;

#[derive(Debug, Clone, PartialEq)]
pub struct Span {
    pub range: Range<usize>,
    pub attrs: Attrs,
}

#[derive(Debug, Clone)]
pub struct StyledBuffer {
    text: String,
    base: Attrs,
    spans: Vec<Span>,
}

impl StyledBuffer {
    pub fn new(text: impl Into<String>, base: Attrs) -> Self {
        Self {
            text: text.into(),
            base,
            spans: Vec::new(),
        }
    }

    /// The plain-text projection. Always exactly the Markdown source.
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn base(&self) -> &Attrs {
        &self.base
    }

    pub fn spans(&self) -> &[Span] {
        &self.spans
    }

    /// Attributes in effect at a byte position.
    pub fn attrs_at(&self, pos: usize) -> &Attrs {
        self.spans
            .iter()
            .find(|s| s.range.start <= pos && pos < s.range.end)
            .map(|s| &s.attrs)
            .unwrap_or(&self.base)
    }

    /// Full coverage of the text as (range, attrs) runs, including base gaps.
    pub fn runs(&self) -> Vec<(Range<usize>, Attrs)> {
        let mut out = Vec::new();
        let mut pos = 0;
        for span in &self.spans {
            if span.range.start > pos {
                out.push((pos..span.range.start, self.base.clone()));
            }
            out.push((span.range.clone(), span.attrs.clone()));
            pos = span.range.end;
        }
        if pos < self.text.len() {
            out.push((pos..self.text.len(), self.base.clone()));
        }
        out
    }

    /// True if any part of `range` is styled as a hidden syntax marker.
    pub fn overlaps_hidden(&self, range: Range<usize>) -> bool {
        self.spans
            .iter()
            .any(|s| s.range.start < range.end && range.start < s.range.end && s.attrs.is_hidden())
    }

    /// Widen a byte range to the full enclosing lines. Line-anchored rules
    /// need complete lines to match against.
    pub fn line_bounds(&self, range: Range<usize>) -> Range<usize> {
        let len = self.text.len();
        let start = line_start(&self.text, range.start.min(len));
        let end = line_end(&self.text, range.end.min(len));
        start..end
    }

    /// Remove all styling inside `range`, splitting spans that cross its
    /// edges. Text is untouched.
    pub fn reset_range(&mut self, range: Range<usize>) {
        let range = self.clamp(range);
        if range.is_empty() {
            return;
        }
        let mut result = Vec::with_capacity(self.spans.len());
        for span in self.spans.drain(..) {
            if span.range.end <= range.start || span.range.start >= range.end {
                result.push(span);
                continue;
            }
            if span.range.start < range.start {
                result.push(Span {
                    range: span.range.start..range.start,
                    attrs: span.attrs.clone(),
                });
            }
            if span.range.end > range.end {
                result.push(Span {
                    range: range.end..span.range.end,
                    attrs: span.attrs,
                });
            }
        }
        self.spans = result;
    }

    /// Apply an attribute transform over `range`. Existing spans are split
    /// at the edges; unstyled gaps inside the range materialize from the
    /// base style before the transform runs.
    pub fn update_attrs(&mut self, range: Range<usize>, f: impl Fn(&mut Attrs)) {
        let range = self.clamp(range);
        if range.is_empty() {
            return;
        }

        let mut result = Vec::with_capacity(self.spans.len() + 2);
        // Next position inside `range` not yet re-styled.
        let mut pos = range.start;

        let apply = |attrs: &Attrs| {
            let mut next = attrs.clone();
            f(&mut next);
            next
        };

        for span in self.spans.drain(..) {
            if span.range.end <= range.start {
                result.push(span);
                continue;
            }
            if span.range.start >= range.end {
                if pos < range.end {
                    result.push(Span {
                        range: pos..range.end,
                        attrs: apply(&self.base),
                    });
                    pos = range.end;
                }
                result.push(span);
                continue;
            }

            if span.range.start > pos {
                result.push(Span {
                    range: pos..span.range.start,
                    attrs: apply(&self.base),
                });
            }
            if span.range.start < range.start {
                result.push(Span {
                    range: span.range.start..range.start,
                    attrs: span.attrs.clone(),
                });
            }

            let inner = span.range.start.max(range.start)..span.range.end.min(range.end);
            result.push(Span {
                range: inner.clone(),
                attrs: apply(&span.attrs),
            });
            pos = inner.end;

            if span.range.end > range.end {
                result.push(Span {
                    range: range.end..span.range.end,
                    attrs: span.attrs,
                });
            }
        }
        if pos < range.end {
            result.push(Span {
                range: pos..range.end,
                attrs: apply(&self.base),
            });
        }

        self.spans = result;
        self.coalesce();
    }

    pub fn set_attrs(&mut self, range: Range<usize>, attrs: Attrs) {
        self.update_attrs(range, move |a| *a = attrs.clone());
    }

    /// The one text-mutating operation. Replaces `range` with `replacement`,
    /// dropping styling inside the range, clipping spans that cross its
    /// edges, and shifting everything after it. Returns the byte range the
    /// replacement occupies.
    pub fn replace_range(&mut self, range: Range<usize>, replacement: &str) -> Range<usize> {
        let range = self.clamp(range);
        let delta = replacement.len() as isize - range.len() as isize;
        self.text.replace_range(range.clone(), replacement);

        let mut result = Vec::with_capacity(self.spans.len());
        for span in self.spans.drain(..) {
            if span.range.end <= range.start {
                result.push(span);
            } else if span.range.start >= range.end {
                result.push(Span {
                    range: shift(span.range.start, delta)..shift(span.range.end, delta),
                    attrs: span.attrs,
                });
            } else {
                if span.range.start < range.start {
                    result.push(Span {
                        range: span.range.start..range.start,
                        attrs: span.attrs.clone(),
                    });
                }
                if span.range.end > range.end {
                    result.push(Span {
                        range: shift(range.end, delta)..shift(span.range.end, delta),
                        attrs: span.attrs,
                    });
                }
            }
        }
        self.spans = result;
        self.coalesce();

        range.start..range.start + replacement.len()
    }

    /// Insert text at a byte position, preserving styling around it.
    pub fn insert(&mut self, pos: usize, text: &str) -> Range<usize> {
        self.replace_range(pos..pos, text)
    }

    /// Replace the first occurrence of `needle`, if still present. Returns
    /// the range the replacement occupies. Used for placeholder swaps.
    pub fn replace_first(&mut self, needle: &str, replacement: &str) -> Option<Range<usize>> {
        let start = self.text.find(needle)?;
        Some(self.replace_range(start..start + needle.len(), replacement))
    }

    fn clamp(&self, range: Range<usize>) -> Range<usize> {
        let len = self.text.len();
        let start = range.start.min(len);
        start..range.end.clamp(start, len)
    }

    fn coalesce(&mut self) {
        self.spans
            .retain(|s| !s.range.is_empty() && s.attrs != self.base);
        let mut merged: Vec<Span> = Vec::with_capacity(self.spans.len());
        for span in self.spans.drain(..) {
            match merged.last_mut() {
                Some(prev) if prev.range.end == span.range.start && prev.attrs == span.attrs => {
                    prev.range.end = span.range.end;
                }
                _ => merged.push(span),
            }
        }
        self.spans = merged;
    }
}

fn shift(value: usize, delta: isize) -> usize {
    if delta >= 0 {
        value + delta as usize
    } else {
        value.saturating_sub((-delta) as usize)
    }
}

pub fn line_start(text: &str, pos: usize) -> usize {
    let clamped = pos.min(text.len());
    text[..clamped].rfind('\n').map(|i| i + 1).unwrap_or(0)
}

pub fn line_end(text: &str, pos: usize) -> usize {
    let clamped = pos.min(text.len());
    text[clamped..]
        .find('\n')
        .map(|i| clamped + i)
        .unwrap_or(text.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::style::{Color, Theme};

    fn buffer(text: &str) -> StyledBuffer {
        StyledBuffer::new(text, Theme::default().base_attrs())
    }

    #[test]
    fn styling_never_changes_text() {
        let mut buf = buffer("hello world");
        buf.update_attrs(0..5, |a| a.bold = true);
        buf.reset_range(2..8);
        assert_eq!(buf.text(), "hello world");
    }

    #[test]
    fn update_splits_and_coalesces() {
        let mut buf = buffer("abcdef");
        buf.update_attrs(0..6, |a| a.bold = true);
        buf.update_attrs(2..4, |a| a.italic = true);
        assert_eq!(buf.spans().len(), 3);
        assert!(buf.attrs_at(0).bold && !buf.attrs_at(0).italic);
        assert!(buf.attrs_at(3).bold && buf.attrs_at(3).italic);

        // Undoing the italic merges the three spans back into one.
        buf.update_attrs(2..4, |a| a.italic = false);
        assert_eq!(buf.spans().len(), 1);
        assert_eq!(buf.spans()[0].range, 0..6);
    }

    #[test]
    fn base_equal_spans_are_dropped() {
        let mut buf = buffer("abcdef");
        buf.update_attrs(1..4, |a| a.bold = true);
        buf.update_attrs(1..4, |a| a.bold = false);
        assert!(buf.spans().is_empty());
    }

    #[test]
    fn reset_range_splits_crossing_spans() {
        let mut buf = buffer("abcdef");
        buf.update_attrs(0..6, |a| a.underline = true);
        buf.reset_range(2..4);
        assert_eq!(buf.spans().len(), 2);
        assert!(buf.attrs_at(1).underline);
        assert!(!buf.attrs_at(2).underline);
        assert!(buf.attrs_at(5).underline);
    }

    #[test]
    fn replace_range_shifts_following_spans() {
        let mut buf = buffer("abc XYZ def");
        buf.update_attrs(0..3, |a| a.bold = true);
        buf.update_attrs(8..11, |a| a.italic = true);

        let new_range = buf.replace_range(4..7, "q");
        assert_eq!(buf.text(), "abc q def");
        assert_eq!(new_range, 4..5);
        assert!(buf.attrs_at(0).bold);
        assert!(buf.attrs_at(6).italic);
    }

    #[test]
    fn replace_drops_styling_inside_range() {
        let mut buf = buffer("abcdef");
        buf.update_attrs(1..5, |a| a.bold = true);
        buf.replace_range(2..4, "##");
        assert!(buf.attrs_at(1).bold);
        assert!(!buf.attrs_at(2).bold);
        assert!(buf.attrs_at(4).bold);
    }

    #[test]
    fn replace_first_is_none_when_gone() {
        let mut buf = buffer("no placeholder here");
        assert!(buf.replace_first("![Uploading]", "![Image](x)").is_none());
        assert_eq!(buf.text(), "no placeholder here");
    }

    #[test]
    fn overlaps_hidden_detects_markers() {
        let mut buf = buffer("**bold**");
        buf.update_attrs(0..2, |a| a.hide(Color::WHITE));
        assert!(buf.overlaps_hidden(0..4));
        assert!(buf.overlaps_hidden(1..2));
        assert!(!buf.overlaps_hidden(2..8));
    }

    #[test]
    fn line_bounds_widen_to_full_lines() {
        let buf = buffer("one\ntwo three\nfour");
        assert_eq!(buf.line_bounds(6..8), 4..13);
        assert_eq!(buf.line_bounds(0..0), 0..3);
        assert_eq!(buf.line_bounds(15..16), 14..18);
    }

    #[test]
    fn runs_cover_whole_text() {
        let mut buf = buffer("abcdef");
        buf.update_attrs(2..4, |a| a.bold = true);
        let runs = buf.runs();
        assert_eq!(runs.len(), 3);
        assert_eq!(runs[0].0, 0..2);
        assert_eq!(runs[1].0, 2..4);
        assert_eq!(runs[2].0, 4..6);
        let covered: usize = runs.iter().map(|(r, _)| r.len()).sum();
        assert_eq!(covered, buf.len());
    }
}
