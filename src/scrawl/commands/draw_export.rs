use crate::commands::{CmdMessage, CmdResult};
use crate::draw::raster;
use crate::error::{Result, ScrawlError};
use crate::index::NoteSelector;
use crate::store::NoteStore;

use super::helpers::resolve_selectors;

/// Rasterize a note's drawing to PNG bytes at its natural bounds.
pub fn run<S: NoteStore>(store: &S, selector: &NoteSelector) -> Result<CmdResult> {
    let resolved = resolve_selectors(store, std::slice::from_ref(selector))?;
    let id = resolved[0].1;
    let note = store.get_note(&id)?;

    let Some(model) = store.load_drawing(&id)? else {
        return Err(ScrawlError::Api(format!(
            "Note '{}' has no drawing",
            note.metadata.title
        )));
    };

    let png = raster::rasterize(&model)?;
    let mut result = CmdResult::default().with_blob(png);
    result.add_message(CmdMessage::success(format!(
        "Rendered drawing for '{}' ({} strokes)",
        note.metadata.title,
        model.len()
    )));
    result.affected_notes.push(note);
    Ok(result)
}
