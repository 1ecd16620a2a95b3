use crate::commands::CmdResult;
use crate::error::Result;
use crate::index::NoteSelector;
use crate::store::NoteStore;
use crate::text::{Attrs, Decorator, RenderMode, StyledBuffer, Theme};
use std::path::Path;

use super::helpers::resolve_selectors;

/// Decorate a note and dump the resulting attribute runs as text.
///
/// This is the diagnostic surface over the decoration engine: `raw` shows
/// the syntax-highlight-only mode, otherwise the full styled pass runs
/// (including image substitution against the asset directory).
pub fn run<S: NoteStore>(
    store: &S,
    selector: &NoteSelector,
    asset_root: &Path,
    max_image_width: f32,
    raw: bool,
) -> Result<CmdResult> {
    let resolved = resolve_selectors(store, std::slice::from_ref(selector))?;
    let id = resolved[0].1;
    let note = store.get_note(&id)?;

    let mode = if raw {
        RenderMode::Raw
    } else {
        RenderMode::Styled
    };
    let engine = Decorator::new(Theme::default(), asset_root)
        .with_mode(mode)
        .with_max_image_width(max_image_width);
    let mut buffer = StyledBuffer::new(note.content.clone(), engine.theme().base_attrs());
    engine.decorate_all(&mut buffer);

    let mut dump = String::new();
    for (range, attrs) in buffer.runs() {
        let preview: String = buffer.text()[range.clone()]
            .chars()
            .take(32)
            .map(|c| if c == '\n' { '¶' } else { c })
            .collect();
        dump.push_str(&format!(
            "{:>5}..{:<5} {:10} {}\n",
            range.start,
            range.end,
            describe_attrs(&attrs),
            preview
        ));
    }

    Ok(CmdResult::default()
        .with_affected_notes(vec![note])
        .with_rendered(dump))
}

fn describe_attrs(attrs: &Attrs) -> String {
    let mut flags = String::new();
    if attrs.is_hidden() {
        flags.push_str("hidden ");
    }
    if attrs.bold {
        flags.push('B');
    }
    if attrs.italic {
        flags.push('I');
    }
    if attrs.underline {
        flags.push('U');
    }
    if attrs.strikethrough {
        flags.push('S');
    }
    if attrs.link.is_some() {
        flags.push('L');
    }
    if attrs.attachment.is_some() {
        flags.push('@');
    }
    if flags.is_empty() {
        flags.push('-');
    }
    flags
}
