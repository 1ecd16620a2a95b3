//! # Read-only HTML preview
//!
//! A second, deliberately independent Markdown converter feeding the
//! side-by-side preview surface. It shares nothing with the decoration
//! engine: the engine styles source ranges in place, while this renderer
//! produces throwaway HTML line by line. Keeping them separate means a
//! preview bug can never corrupt the authoritative buffer.
//!
//! Fenced diagram-language blocks are lifted out behind placeholder tokens
//! before any transform runs, then restored at the end as marked container
//! elements for an external renderer to pick up.

use once_cell::sync::Lazy;
use regex::Regex;

/// Fence languages handed to the external diagram renderer.
const DIAGRAM_LANGS: &[&str] = &["mermaid", "graphviz", "dot", "plantuml"];

const PLACEHOLDER_MARK: char = '\u{1}';

static DIAGRAM_FENCE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?ms)^```(mermaid|graphviz|dot|plantuml)[ \t]*\n(.*?)^```[ \t]*$").unwrap()
});
static CODE_FENCE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?ms)^```([A-Za-z0-9_+-]*)[ \t]*\n(.*?)^```[ \t]*$").unwrap());
static BOLD: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*\*(.+?)\*\*").unwrap());
static ITALIC: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*([^*\n]+?)\*").unwrap());
static IMAGE: Lazy<Regex> = Lazy::new(|| Regex::new(r"!\[([^\]\n]*)\]\(([^)\n]*)\)").unwrap());
static LINK: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[([^\]\n]*)\]\(([^)\n]*)\)").unwrap());
static INLINE_CODE: Lazy<Regex> = Lazy::new(|| Regex::new(r"`([^`\n]+)`").unwrap());
static CHECKLIST_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^- \[( |x|X)\] (.*)$").unwrap());

enum Protected {
    Diagram { lang: String, body: String },
    Code { lang: String, body: String },
}

/// Convert a Markdown buffer to preview HTML. Best effort: unknown
/// constructs pass through as paragraph text.
pub fn render_html(markdown: &str) -> String {
    let mut protected = Vec::new();

    // Diagram fences first so the generic code-fence pass cannot claim them.
    let text = DIAGRAM_FENCE
        .replace_all(markdown, |caps: &regex::Captures| {
            protected.push(Protected::Diagram {
                lang: caps[1].to_string(),
                body: caps[2].to_string(),
            });
            placeholder(protected.len() - 1)
        })
        .into_owned();

    let text = CODE_FENCE
        .replace_all(&text, |caps: &regex::Captures| {
            protected.push(Protected::Code {
                lang: caps[1].to_string(),
                body: caps[2].to_string(),
            });
            placeholder(protected.len() - 1)
        })
        .into_owned();

    let text = apply_inline(&text);
    let html = wrap_blocks(&text);
    restore(&html, &protected)
}

fn placeholder(index: usize) -> String {
    format!("{m}{index}{m}", m = PLACEHOLDER_MARK)
}

/// Sequential global substitutions. Order matters: longer header markers
/// before shorter so `###` never half-matches as `#`, bold before italic,
/// images before links.
fn apply_inline(text: &str) -> String {
    let mut out = text.to_string();
    for level in (1..=6).rev() {
        let re = Regex::new(&format!(r"(?m)^#{{{level}}} (.*)$")).unwrap();
        out = re
            .replace_all(&out, format!("<h{level}>$1</h{level}>"))
            .into_owned();
    }
    out = BOLD.replace_all(&out, "<strong>$1</strong>").into_owned();
    out = ITALIC.replace_all(&out, "<em>$1</em>").into_owned();
    out = IMAGE
        .replace_all(&out, r#"<img src="$2" alt="$1">"#)
        .into_owned();
    out = LINK
        .replace_all(&out, r#"<a href="$2">$1</a>"#)
        .into_owned();
    out = INLINE_CODE.replace_all(&out, "<code>$1</code>").into_owned();
    out
}

/// Line-oriented block wrapping: consecutive checklist lines group into one
/// list, consecutive plain lines into one paragraph, already-tagged lines
/// pass through.
fn wrap_blocks(text: &str) -> String {
    let mut html = String::new();
    let mut paragraph: Vec<&str> = Vec::new();
    let mut checklist: Vec<String> = Vec::new();

    let flush_paragraph = |html: &mut String, paragraph: &mut Vec<&str>| {
        if !paragraph.is_empty() {
            html.push_str("<p>");
            html.push_str(&paragraph.join("<br>"));
            html.push_str("</p>\n");
            paragraph.clear();
        }
    };
    let flush_checklist = |html: &mut String, checklist: &mut Vec<String>| {
        if !checklist.is_empty() {
            html.push_str("<ul class=\"checklist\">\n");
            for item in checklist.iter() {
                html.push_str(item);
                html.push('\n');
            }
            html.push_str("</ul>\n");
            checklist.clear();
        }
    };

    for line in text.lines() {
        if let Some(caps) = CHECKLIST_LINE.captures(line) {
            flush_paragraph(&mut html, &mut paragraph);
            let checked = matches!(&caps[1], "x" | "X");
            let box_attr = if checked { " checked" } else { "" };
            checklist.push(format!(
                "<li><input type=\"checkbox\" disabled{}> {}</li>",
                box_attr, &caps[2]
            ));
            continue;
        }
        flush_checklist(&mut html, &mut checklist);

        let trimmed = line.trim();
        if trimmed.is_empty() {
            flush_paragraph(&mut html, &mut paragraph);
        } else if trimmed.starts_with("<h")
            || trimmed.starts_with(PLACEHOLDER_MARK)
            || trimmed == "---"
        {
            flush_paragraph(&mut html, &mut paragraph);
            if trimmed == "---" {
                html.push_str("<hr>\n");
            } else {
                html.push_str(trimmed);
                html.push('\n');
            }
        } else {
            paragraph.push(line);
        }
    }
    flush_paragraph(&mut html, &mut paragraph);
    flush_checklist(&mut html, &mut checklist);
    html
}

fn restore(html: &str, protected: &[Protected]) -> String {
    let mut out = html.to_string();
    for (i, block) in protected.iter().enumerate() {
        let replacement = match block {
            Protected::Diagram { lang, body } => format!(
                "<div class=\"diagram\" data-lang=\"{}\">{}</div>",
                lang,
                escape_html(body)
            ),
            Protected::Code { lang, body } => {
                if lang.is_empty() {
                    format!("<pre><code>{}</code></pre>", escape_html(body))
                } else {
                    format!(
                        "<pre><code class=\"language-{}\">{}</code></pre>",
                        lang,
                        escape_html(body)
                    )
                }
            }
        };
        out = out.replace(&placeholder(i), &replacement);
    }
    out
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// True if `lang` is routed to the external diagram renderer.
pub fn is_diagram_lang(lang: &str) -> bool {
    DIAGRAM_LANGS.contains(&lang)
}
