use serde::{Deserialize, Serialize};

/// 8-bit RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FontFamily {
    #[default]
    Default,
    Mono,
}

/// An inline image occupying a single object-replacement character.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageAttachment {
    /// Relative filename inside the asset directory.
    pub reference: String,
    pub width: f32,
    pub height: f32,
}

/// Presentation attributes for one run of text.
///
/// Attributes are a projection over exact source ranges: they never change
/// the characters underneath. Syntax markers are hidden by shrinking them to
/// [`Attrs::HIDDEN_SIZE`] and painting them in the background color, which
/// keeps buffer offsets stable.
#[derive(Debug, Clone, PartialEq)]
pub struct Attrs {
    pub family: FontFamily,
    pub size: f32,
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
    pub strikethrough: bool,
    pub fg: Color,
    pub bg: Option<Color>,
    /// Target URL for actionable link runs.
    pub link: Option<String>,
    /// Paragraph indent in points; set by list and blockquote rules.
    pub indent: f32,
    pub attachment: Option<ImageAttachment>,
}

impl Attrs {
    /// Rendered size of a hidden syntax marker. Non-zero so the glyph still
    /// occupies a position the cursor can land on.
    pub const HIDDEN_SIZE: f32 = 0.01;

    pub fn plain(size: f32, fg: Color) -> Self {
        Self {
            family: FontFamily::Default,
            size,
            bold: false,
            italic: false,
            underline: false,
            strikethrough: false,
            fg,
            bg: None,
            link: None,
            indent: 0.0,
            attachment: None,
        }
    }

    /// Collapse this run into an invisible marker: near-zero size, painted
    /// in the background color.
    pub fn hide(&mut self, background: Color) {
        self.size = Self::HIDDEN_SIZE;
        self.fg = background;
    }

    pub fn is_hidden(&self) -> bool {
        self.size <= Self::HIDDEN_SIZE
    }
}

/// Palette and metrics the decoration rules draw from.
#[derive(Debug, Clone)]
pub struct Theme {
    pub base_size: f32,
    /// Font sizes for header levels 1..=6, descending.
    pub header_sizes: [f32; 6],
    pub foreground: Color,
    pub background: Color,
    /// Links and list bullets.
    pub accent: Color,
    /// Dimmed markers, checked tasks, blockquote glyphs.
    pub muted: Color,
    pub code_fg: Color,
    pub code_bg: Color,
    /// Horizontal rule stand-in.
    pub rule: Color,
    /// Points of indent per list level.
    pub indent_step: f32,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            base_size: 16.0,
            header_sizes: [28.0, 24.0, 21.0, 19.0, 17.0, 16.0],
            foreground: Color::rgb(0x1f, 0x1f, 0x1f),
            background: Color::WHITE,
            accent: Color::rgb(0x2f, 0x6f, 0xd0),
            muted: Color::rgb(0x9a, 0x9a, 0x9a),
            code_fg: Color::rgb(0xb3, 0x3c, 0x2e),
            code_bg: Color::rgba(0x80, 0x80, 0x80, 0x22),
            rule: Color::rgb(0xd0, 0xd0, 0xd0),
            indent_step: 20.0,
        }
    }
}

impl Theme {
    pub fn base_attrs(&self) -> Attrs {
        Attrs::plain(self.base_size, self.foreground)
    }

    /// Font size for a header level; levels beyond 6 clamp to the smallest.
    pub fn header_size(&self, level: usize) -> f32 {
        let idx = level.clamp(1, 6) - 1;
        self.header_sizes[idx]
    }
}
