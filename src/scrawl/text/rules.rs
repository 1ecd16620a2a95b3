//! The decoration rule table.
//!
//! Rules are immutable `{pattern, capture roles, styling transform}` tuples
//! applied in fixed priority order. The order is data, not call sequence:
//! line-level structure first, inline styles after, and the single
//! text-mutating rule (images) strictly last, because its replacement
//! invalidates offsets every earlier rule in the pass relies on.

use super::buffer::StyledBuffer;
use super::matcher::RuleMatch;
use super::style::{Color, FontFamily, ImageAttachment, Theme};
use log::warn;
use once_cell::sync::Lazy;
use regex::Regex;
use std::ops::Range;
use std::path::Path;

/// The single character an image tag collapses into. Carries the attachment
/// attribute; everything else about the image lives in the attribute map.
pub const ATTACHMENT_CHAR: &str = "\u{FFFC}";

/// Context handed to every rule application.
pub struct RuleContext<'a> {
    pub theme: &'a Theme,
    /// Directory image references resolve against.
    pub asset_root: &'a Path,
    /// Widest an attachment may render; taller images scale down.
    pub max_image_width: f32,
}

type ApplyFn = fn(&mut StyledBuffer, &RuleMatch, &RuleContext);

pub struct Rule {
    pub name: &'static str,
    pub pattern: &'static str,
    /// True only for the image rule. The engine runs all non-mutating rules
    /// in one pass before any mutating one.
    pub mutates_text: bool,
    /// Color used when the engine runs in raw highlight mode.
    pub raw_color: fn(&Theme) -> Color,
    pub apply: ApplyFn,
    regex: Option<Regex>,
}

impl Rule {
    fn new(
        name: &'static str,
        pattern: &'static str,
        mutates_text: bool,
        raw_color: fn(&Theme) -> Color,
        apply: ApplyFn,
    ) -> Self {
        let regex = match Regex::new(pattern) {
            Ok(re) => Some(re),
            Err(err) => {
                warn!("decoration rule '{}' failed to compile: {}", name, err);
                None
            }
        };
        Self {
            name,
            pattern,
            mutates_text,
            raw_color,
            apply,
            regex,
        }
    }

    /// The compiled pattern, or `None` if compilation failed and the rule
    /// is being skipped.
    pub fn regex(&self) -> Option<&Regex> {
        self.regex.as_ref()
    }
}

static RULES: Lazy<Vec<Rule>> = Lazy::new(|| {
    vec![
        Rule::new(
            "header",
            r"(?m)^(#{1,6})[ \t]+(.+)$",
            false,
            |t| t.accent,
            apply_header,
        ),
        Rule::new(
            "list-unordered",
            r"(?m)^([ \t]*)([-*+])[ \t]+(.+)$",
            false,
            |t| t.accent,
            apply_unordered_list,
        ),
        Rule::new(
            "list-ordered",
            r"(?m)^([ \t]*)(\d+\.)[ \t]+(.+)$",
            false,
            |t| t.accent,
            apply_ordered_list,
        ),
        Rule::new(
            "checklist",
            r"(?m)^([ \t]*)- \[( |x|X)\] (.*)$",
            false,
            |t| t.muted,
            apply_checklist,
        ),
        Rule::new(
            "blockquote",
            r"(?m)^> (.*)$",
            false,
            |t| t.muted,
            apply_blockquote,
        ),
        Rule::new("bold", r"\*\*(.+?)\*\*", false, |t| t.foreground, apply_bold),
        Rule::new(
            "italic",
            r"\*([^*\n]+?)\*",
            false,
            |t| t.foreground,
            apply_italic,
        ),
        Rule::new(
            "strikethrough",
            r"~~(.+?)~~",
            false,
            |t| t.muted,
            apply_strikethrough,
        ),
        Rule::new(
            "inline-code",
            r"`([^`\n]+)`",
            false,
            |t| t.code_fg,
            apply_inline_code,
        ),
        Rule::new(
            "link",
            r"\[([^\]\n]*)\]\(([^)\n]*)\)",
            false,
            |t| t.accent,
            apply_link,
        ),
        Rule::new(
            "horizontal-rule",
            r"(?m)^(---|_{3,}|\*{3,})$",
            false,
            |t| t.rule,
            apply_horizontal_rule,
        ),
        Rule::new(
            "image",
            r"!\[([^\]\n]*)\]\(([^)\n]*)\)",
            true,
            |t| t.accent,
            apply_image,
        ),
    ]
});

/// The rule table, in application order.
pub fn rules() -> &'static [Rule] {
    &RULES
}

fn hide(buffer: &mut StyledBuffer, range: Range<usize>, ctx: &RuleContext) {
    let background = ctx.theme.background;
    buffer.update_attrs(range, move |a| a.hide(background));
}

fn apply_header(buffer: &mut StyledBuffer, m: &RuleMatch, ctx: &RuleContext) {
    let (Some(hashes), Some(text)) = (m.group(1), m.group(2)) else {
        return;
    };
    let level = hashes.len();
    let size = ctx.theme.header_size(level);
    buffer.update_attrs(m.range.clone(), move |a| {
        a.size = size;
        a.bold = true;
    });
    // Levels 1 and 2 get an underline standing in for the heading rule.
    if level <= 2 {
        buffer.update_attrs(text.clone(), |a| a.underline = true);
    }
    hide(buffer, hashes.start..text.start, ctx);
}

fn list_indent(buffer: &StyledBuffer, whitespace: &Range<usize>, ctx: &RuleContext) -> f32 {
    // Two spaces of leading whitespace per nesting level; a tab counts as
    // one level on its own.
    let ws = &buffer.text()[whitespace.clone()];
    let depth = ws.chars().map(|c| if c == '\t' { 2 } else { 1 }).sum::<usize>() / 2;
    (depth as f32 + 1.0) * ctx.theme.indent_step
}

fn apply_unordered_list(buffer: &mut StyledBuffer, m: &RuleMatch, ctx: &RuleContext) {
    let (Some(ws), Some(bullet), Some(_)) = (m.group(1), m.group(2), m.group(3)) else {
        return;
    };
    let indent = list_indent(buffer, &ws, ctx);
    buffer.update_attrs(m.range.clone(), move |a| a.indent = indent);
    let accent = ctx.theme.accent;
    // The bullet glyph is recolored, not hidden.
    buffer.update_attrs(bullet, move |a| a.fg = accent);
}

fn apply_ordered_list(buffer: &mut StyledBuffer, m: &RuleMatch, ctx: &RuleContext) {
    let (Some(ws), Some(number), Some(_)) = (m.group(1), m.group(2), m.group(3)) else {
        return;
    };
    let indent = list_indent(buffer, &ws, ctx);
    buffer.update_attrs(m.range.clone(), move |a| a.indent = indent);
    let accent = ctx.theme.accent;
    buffer.update_attrs(number, move |a| a.fg = accent);
}

fn apply_checklist(buffer: &mut StyledBuffer, m: &RuleMatch, ctx: &RuleContext) {
    let (Some(ws), Some(state), Some(text)) = (m.group(1), m.group(2), m.group(3)) else {
        return;
    };
    let muted = ctx.theme.muted;
    // Dim the "- [x] " prefix, whitespace indent excluded.
    buffer.update_attrs(ws.end..text.start, move |a| a.fg = muted);

    let checked = matches!(&buffer.text()[state], "x" | "X");
    if checked {
        buffer.update_attrs(text, move |a| {
            a.strikethrough = true;
            a.fg = muted;
        });
    }
}

fn apply_blockquote(buffer: &mut StyledBuffer, m: &RuleMatch, ctx: &RuleContext) {
    let Some(text) = m.group(1) else {
        return;
    };
    let muted = ctx.theme.muted;
    let indent = ctx.theme.indent_step;
    buffer.update_attrs(m.range.start..m.range.start + 1, move |a| a.fg = muted);
    buffer.update_attrs(text, move |a| {
        a.italic = true;
        a.indent = indent;
    });
}

fn apply_bold(buffer: &mut StyledBuffer, m: &RuleMatch, ctx: &RuleContext) {
    let Some(text) = m.group(1) else {
        return;
    };
    buffer.update_attrs(text.clone(), |a| a.bold = true);
    hide(buffer, m.range.start..text.start, ctx);
    hide(buffer, text.end..m.range.end, ctx);
}

fn apply_italic(buffer: &mut StyledBuffer, m: &RuleMatch, ctx: &RuleContext) {
    let Some(text) = m.group(1) else {
        return;
    };
    buffer.update_attrs(text.clone(), |a| a.italic = true);
    hide(buffer, m.range.start..text.start, ctx);
    hide(buffer, text.end..m.range.end, ctx);
}

fn apply_strikethrough(buffer: &mut StyledBuffer, m: &RuleMatch, ctx: &RuleContext) {
    let Some(text) = m.group(1) else {
        return;
    };
    buffer.update_attrs(text.clone(), |a| a.strikethrough = true);
    hide(buffer, m.range.start..text.start, ctx);
    hide(buffer, text.end..m.range.end, ctx);
}

fn apply_inline_code(buffer: &mut StyledBuffer, m: &RuleMatch, ctx: &RuleContext) {
    let Some(text) = m.group(1) else {
        return;
    };
    let fg = ctx.theme.code_fg;
    let bg = ctx.theme.code_bg;
    buffer.update_attrs(text.clone(), move |a| {
        a.family = FontFamily::Mono;
        a.fg = fg;
        a.bg = Some(bg);
    });
    hide(buffer, m.range.start..text.start, ctx);
    hide(buffer, text.end..m.range.end, ctx);
}

fn apply_link(buffer: &mut StyledBuffer, m: &RuleMatch, ctx: &RuleContext) {
    // A leading '!' makes this an image tag; that rule runs last and owns it.
    if m.range.start > 0 && buffer.text().as_bytes()[m.range.start - 1] == b'!' {
        return;
    }
    let (Some(label), Some(url)) = (m.group(1), m.group(2)) else {
        return;
    };
    let target = buffer.text()[url].to_string();
    let accent = ctx.theme.accent;
    buffer.update_attrs(label.clone(), move |a| {
        a.underline = true;
        a.fg = accent;
        a.link = Some(target.clone());
    });
    hide(buffer, m.range.start..label.start, ctx);
    hide(buffer, label.end..m.range.end, ctx);
}

fn apply_horizontal_rule(buffer: &mut StyledBuffer, m: &RuleMatch, ctx: &RuleContext) {
    let fg = ctx.theme.rule;
    buffer.update_attrs(m.range.clone(), move |a| {
        a.strikethrough = true;
        a.bold = true;
        a.fg = fg;
    });
}

/// The destructive rule. Replaces the whole matched tag with a single
/// object-replacement character carrying the attachment, but only once the
/// referenced asset is known to exist; a missing file leaves the tag as
/// plain, unstyled text.
fn apply_image(buffer: &mut StyledBuffer, m: &RuleMatch, ctx: &RuleContext) {
    let Some(path_group) = m.group(2) else {
        return;
    };
    let reference = buffer.text()[path_group].to_string();
    // References are bare filenames inside the asset directory.
    if reference.is_empty() || reference.contains('/') || reference.contains('\\') {
        return;
    }
    let path = ctx.asset_root.join(&reference);
    let (width, height) = match image::image_dimensions(&path) {
        Ok(dims) => dims,
        Err(_) => return,
    };
    let (display_w, display_h) = fit_width(width as f32, height as f32, ctx.max_image_width);

    let replaced = buffer.replace_range(m.range.clone(), ATTACHMENT_CHAR);
    let mut attrs = ctx.theme.base_attrs();
    attrs.attachment = Some(ImageAttachment {
        reference,
        width: display_w,
        height: display_h,
    });
    buffer.set_attrs(replaced, attrs);
}

/// Scale (w, h) down to fit `max_width`, preserving aspect ratio. Never
/// scales up.
fn fit_width(w: f32, h: f32, max_width: f32) -> (f32, f32) {
    if w <= max_width || w <= 0.0 {
        (w, h)
    } else {
        let scale = max_width / w;
        (max_width, h * scale)
    }
}
