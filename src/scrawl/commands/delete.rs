use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::index::NoteSelector;
use crate::store::NoteStore;

use super::helpers::resolve_selectors;

pub fn run<S: NoteStore>(store: &mut S, selectors: &[NoteSelector]) -> Result<CmdResult> {
    let resolved = resolve_selectors(store, selectors)?;
    let mut result = CmdResult::default();

    for (display, id) in resolved {
        let note = store.get_note(&id)?;
        store.delete_note(&id)?;
        result.add_message(CmdMessage::success(format!(
            "Deleted note {} ({})",
            display, note.metadata.title
        )));
        result.affected_notes.push(note);
    }

    Ok(result)
}
