//! The decoration engine.
//!
//! `decorate` re-derives presentation for the paragraph range containing an
//! edit: widen to full lines, reset to the base style, apply every
//! non-mutating rule in table order, then run the destructive image pass.
//! Decoration failures are never fatal; a rule that cannot run is skipped
//! and the pass continues.

use super::buffer::StyledBuffer;
use super::matcher::find_matches;
use super::rules::{rules, RuleContext};
use super::style::Theme;
use log::debug;
use std::ops::Range;
use std::path::{Path, PathBuf};

/// How the engine paints a buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderMode {
    /// Hidden markers, synthesized fonts, inline attachments.
    #[default]
    Styled,
    /// Diagnostic mode: per-rule syntax colors only. No marker hiding, no
    /// text mutation.
    Raw,
}

pub struct Decorator {
    theme: Theme,
    asset_root: PathBuf,
    max_image_width: f32,
    mode: RenderMode,
}

impl Decorator {
    pub fn new(theme: Theme, asset_root: impl Into<PathBuf>) -> Self {
        Self {
            theme,
            asset_root: asset_root.into(),
            max_image_width: 320.0,
            mode: RenderMode::Styled,
        }
    }

    pub fn with_mode(mut self, mode: RenderMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_max_image_width(mut self, width: f32) -> Self {
        self.max_image_width = width;
        self
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    pub fn asset_root(&self) -> &Path {
        &self.asset_root
    }

    /// Re-derive presentation for the paragraph range containing `edited`.
    /// Returns the processed range (post-mutation, so callers can track
    /// what changed on screen).
    pub fn decorate(&self, buffer: &mut StyledBuffer, edited: Range<usize>) -> Range<usize> {
        let region = buffer.line_bounds(edited);
        self.reset_region(buffer, region.clone());
        match self.mode {
            RenderMode::Styled => self.decorate_styled(buffer, region),
            RenderMode::Raw => self.decorate_raw(buffer, region),
        }
    }

    /// Reset a region to the base style. Attachment runs survive: the
    /// Markdown that produced them is gone from the text, so they cannot
    /// be re-derived by the rule pass.
    fn reset_region(&self, buffer: &mut StyledBuffer, region: Range<usize>) {
        let attachments: Vec<crate::text::Span> = buffer
            .spans()
            .iter()
            .filter(|s| {
                s.attrs.attachment.is_some()
                    && s.range.start < region.end
                    && region.start < s.range.end
            })
            .cloned()
            .collect();
        buffer.reset_range(region);
        for span in attachments {
            buffer.set_attrs(span.range, span.attrs);
        }
    }

    /// Decorate the whole buffer; used when a note is first hydrated.
    pub fn decorate_all(&self, buffer: &mut StyledBuffer) -> Range<usize> {
        self.decorate(buffer, 0..buffer.len())
    }

    fn context(&self) -> RuleContext<'_> {
        RuleContext {
            theme: &self.theme,
            asset_root: &self.asset_root,
            max_image_width: self.max_image_width,
        }
    }

    fn decorate_styled(&self, buffer: &mut StyledBuffer, region: Range<usize>) -> Range<usize> {
        let ctx = self.context();

        // Attribute pass: every non-mutating rule, in table order. Matches
        // overlapping markers an earlier rule hid are discarded.
        for rule in rules().iter().filter(|r| !r.mutates_text) {
            let Some(re) = rule.regex() else {
                debug!("skipping rule '{}': pattern unavailable", rule.name);
                continue;
            };
            for m in find_matches(re, buffer, region.clone(), true) {
                (rule.apply)(buffer, &m, &ctx);
            }
        }

        // Destructive pass, strictly after all styling. Applied back to
        // front so each replacement leaves earlier match offsets intact.
        let len_before = buffer.len();
        for rule in rules().iter().filter(|r| r.mutates_text) {
            let Some(re) = rule.regex() else {
                debug!("skipping rule '{}': pattern unavailable", rule.name);
                continue;
            };
            let matches = find_matches(re, buffer, region.clone(), false);
            for m in matches.iter().rev() {
                (rule.apply)(buffer, m, &ctx);
            }
        }

        let delta = buffer.len() as isize - len_before as isize;
        let end = (region.end as isize + delta).max(region.start as isize) as usize;
        region.start..end
    }

    fn decorate_raw(&self, buffer: &mut StyledBuffer, region: Range<usize>) -> Range<usize> {
        for rule in rules() {
            let Some(re) = rule.regex() else {
                continue;
            };
            let color = (rule.raw_color)(&self.theme);
            for m in find_matches(re, buffer, region.clone(), false) {
                buffer.update_attrs(m.range.clone(), move |a| a.fg = color);
            }
        }
        region
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::style::FontFamily;

    fn decorator() -> Decorator {
        Decorator::new(Theme::default(), std::env::temp_dir().join("scrawl-missing-assets"))
    }

    fn decorated(text: &str) -> (StyledBuffer, Decorator) {
        let engine = decorator();
        let mut buf = StyledBuffer::new(text, engine.theme().base_attrs());
        engine.decorate_all(&mut buf);
        (buf, engine)
    }

    #[test]
    fn header_level_one() {
        let (buf, engine) = decorated("# Title");
        let theme = engine.theme();
        // Hashes hidden, text at header size with bold and underline.
        assert!(buf.attrs_at(0).is_hidden());
        let title = buf.attrs_at(2);
        assert_eq!(title.size, theme.header_size(1));
        assert!(title.bold);
        assert!(title.underline);
        assert_eq!(buf.text(), "# Title");
    }

    #[test]
    fn header_level_three_has_no_underline() {
        let (buf, engine) = decorated("### Sub");
        assert_eq!(buf.attrs_at(4).size, engine.theme().header_size(3));
        assert!(!buf.attrs_at(4).underline);
    }

    #[test]
    fn scenario_header_bold_italic() {
        let text = "# Title\n\nSome **bold** and *italic* text.";
        let (buf, engine) = decorated(text);
        let theme = engine.theme();

        // "# Title" styled as header with hidden hashes.
        assert!(buf.attrs_at(0).is_hidden());
        assert_eq!(buf.attrs_at(3).size, theme.header_size(1));

        let body = 9; // start of "Some ..."
        let bold_word = text.find("bold").unwrap();
        let italic_word = text.find("italic").unwrap();

        // "bold" is bold, its ** markers hidden.
        assert!(buf.attrs_at(bold_word).bold);
        assert!(buf.attrs_at(bold_word - 1).is_hidden());
        assert!(buf.attrs_at(bold_word + "bold".len()).is_hidden());

        // "italic" is italic, its * markers hidden.
        assert!(buf.attrs_at(italic_word).italic);
        assert!(buf.attrs_at(italic_word - 1).is_hidden());
        assert!(buf.attrs_at(italic_word + "italic".len()).is_hidden());

        // Plain text in between is untouched.
        let plain = buf.attrs_at(body);
        assert_eq!(*plain, theme.base_attrs());

        // Round trip: characters never changed.
        assert_eq!(buf.text(), text);
    }

    #[test]
    fn marker_hiding_keeps_characters() {
        let (buf, _) = decorated("**bold**");
        assert_eq!(buf.text(), "**bold**");
        for pos in [0, 1, 6, 7] {
            assert!(buf.attrs_at(pos).is_hidden(), "marker at {} visible", pos);
        }
        for pos in 2..6 {
            assert!(buf.attrs_at(pos).bold);
            assert!(!buf.attrs_at(pos).is_hidden());
        }
    }

    #[test]
    fn decoration_is_idempotent() {
        let engine = decorator();
        let text = "# H\n- item\n- [x] done\n> quote\nwith **bold**, *it*, `code`, [l](u), ~~s~~\n---\n";
        let mut buf = StyledBuffer::new(text, engine.theme().base_attrs());
        engine.decorate_all(&mut buf);
        let first = buf.spans().to_vec();
        engine.decorate_all(&mut buf);
        assert_eq!(buf.spans(), first.as_slice());
    }

    #[test]
    fn non_image_rules_preserve_text() {
        let engine = decorator();
        let text = "## Head\n1. one\n- two\n- [ ] todo\n> q\n**b** *i* ~~s~~ `c` [l](url)\n___\n";
        let mut buf = StyledBuffer::new(text, engine.theme().base_attrs());
        engine.decorate_all(&mut buf);
        assert_eq!(buf.text(), text);
    }

    #[test]
    fn checklist_scenarios() {
        let (buf, engine) = decorated("- [x] Done task\n- [ ] Todo");
        let theme = engine.theme();

        // Checked: prefix dimmed, text struck through and muted.
        assert_eq!(buf.attrs_at(0).fg, theme.muted);
        let done = buf.attrs_at(6);
        assert!(done.strikethrough);
        assert_eq!(done.fg, theme.muted);

        // Unchecked: prefix dimmed only, text unstyled.
        let todo_line = 16;
        assert_eq!(buf.attrs_at(todo_line).fg, theme.muted);
        let todo = buf.attrs_at(todo_line + 6);
        assert!(!todo.strikethrough);
        assert_eq!(todo.fg, theme.foreground);
    }

    #[test]
    fn links_are_actionable_and_markers_hidden() {
        let (buf, engine) = decorated("see [docs](https://example.com) now");
        let theme = engine.theme();
        let label = 5; // inside "docs"
        let attrs = buf.attrs_at(label);
        assert!(attrs.underline);
        assert_eq!(attrs.fg, theme.accent);
        assert_eq!(attrs.link.as_deref(), Some("https://example.com"));
        // Brackets and URL hidden.
        assert!(buf.attrs_at(4).is_hidden());
        assert!(buf.attrs_at(12).is_hidden());
    }

    #[test]
    fn missing_image_left_as_plain_text() {
        let (buf, engine) = decorated("before ![alt](missing.png) after");
        assert_eq!(buf.text(), "before ![alt](missing.png) after");
        // Not styled by the link rule either: completely unstyled.
        let attrs = buf.attrs_at(9);
        assert_eq!(*attrs, engine.theme().base_attrs());
    }

    #[test]
    fn existing_image_collapses_to_attachment() {
        let dir = tempfile::tempdir().unwrap();
        let img = image::RgbaImage::new(640, 480);
        img.save(dir.path().join("shot.png")).unwrap();

        let engine = Decorator::new(Theme::default(), dir.path()).with_max_image_width(320.0);
        let text = "pre ![alt](shot.png) post";
        let mut buf = StyledBuffer::new(text, engine.theme().base_attrs());
        engine.decorate_all(&mut buf);

        assert_eq!(buf.text(), "pre \u{FFFC} post");
        let attachment = buf.attrs_at(4).attachment.clone().unwrap();
        assert_eq!(attachment.reference, "shot.png");
        assert_eq!(attachment.width, 320.0);
        assert_eq!(attachment.height, 240.0);
        // Nothing outside the replaced range changed.
        assert_eq!(*buf.attrs_at(0), engine.theme().base_attrs());
        assert_eq!(*buf.attrs_at(buf.len() - 1), engine.theme().base_attrs());
    }

    #[test]
    fn redecorating_keeps_attachments() {
        let dir = tempfile::tempdir().unwrap();
        image::RgbaImage::new(10, 10)
            .save(dir.path().join("dot.png"))
            .unwrap();

        let engine = Decorator::new(Theme::default(), dir.path());
        let mut buf = StyledBuffer::new("![d](dot.png) tail", engine.theme().base_attrs());
        engine.decorate_all(&mut buf);
        assert_eq!(buf.text(), "\u{FFFC} tail");
        let spans = buf.spans().to_vec();

        // The source tag is gone; another pass must not lose the image.
        engine.decorate_all(&mut buf);
        assert_eq!(buf.text(), "\u{FFFC} tail");
        assert_eq!(buf.spans(), spans.as_slice());
        assert!(buf.attrs_at(0).attachment.is_some());
    }

    #[test]
    fn inline_code_gets_mono_and_tint() {
        let (buf, engine) = decorated("run `ls -la` now");
        let code = buf.attrs_at(6);
        assert_eq!(code.family, FontFamily::Mono);
        assert_eq!(code.bg, Some(engine.theme().code_bg));
        assert!(buf.attrs_at(4).is_hidden());
    }

    #[test]
    fn blockquote_and_rule_lines() {
        let (buf, engine) = decorated("> wise words\n---\n");
        let theme = engine.theme();
        assert_eq!(buf.attrs_at(0).fg, theme.muted);
        assert!(buf.attrs_at(3).italic);

        let hr = buf.attrs_at(14);
        assert!(hr.strikethrough);
        assert_eq!(hr.fg, theme.rule);
    }

    #[test]
    fn list_indent_scales_with_depth() {
        let (buf, engine) = decorated("- top\n    - nested");
        let step = engine.theme().indent_step;
        assert_eq!(buf.attrs_at(2).indent, step);
        assert_eq!(buf.attrs_at(12).indent, step * 3.0);
        // Bullet glyphs recolored, not hidden.
        assert_eq!(buf.attrs_at(0).fg, engine.theme().accent);
        assert_eq!(buf.attrs_at(10).fg, engine.theme().accent);
        assert!(!buf.attrs_at(0).is_hidden());
    }

    #[test]
    fn edit_only_redecorates_enclosing_lines() {
        let engine = decorator();
        let mut buf = StyledBuffer::new("**a**\nplain\n**b**", engine.theme().base_attrs());
        engine.decorate_all(&mut buf);
        assert!(buf.attrs_at(2).bold);
        assert!(buf.attrs_at(14).bold);

        // Re-decorating the middle line must not disturb the others.
        let spans_before = buf.spans().to_vec();
        let processed = engine.decorate(&mut buf, 8..8);
        assert_eq!(processed, 6..11);
        assert_eq!(buf.spans(), spans_before.as_slice());
    }

    #[test]
    fn raw_mode_highlights_without_hiding() {
        let engine = decorator().with_mode(RenderMode::Raw);
        let text = "# Title and **bold** and ![x](nope.png)";
        let mut buf = StyledBuffer::new(text, engine.theme().base_attrs());
        engine.decorate_all(&mut buf);

        assert_eq!(buf.text(), text); // no substitution, even for images
        let theme = engine.theme();
        assert_eq!(buf.attrs_at(0).fg, theme.accent); // header colored
        assert!(!buf.attrs_at(0).is_hidden());
        assert_eq!(buf.attrs_at(3).size, theme.base_size); // no font synthesis
    }

    #[test]
    fn plain_text_has_no_spans() {
        let (buf, _) = decorated("just ordinary prose, nothing else");
        assert!(buf.spans().is_empty());
    }
}
