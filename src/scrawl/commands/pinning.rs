use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::index::NoteSelector;
use crate::store::NoteStore;
use chrono::Utc;

use super::helpers::resolve_selectors;

pub fn pin<S: NoteStore>(store: &mut S, selectors: &[NoteSelector]) -> Result<CmdResult> {
    pin_state(store, selectors, true)
}

pub fn unpin<S: NoteStore>(store: &mut S, selectors: &[NoteSelector]) -> Result<CmdResult> {
    pin_state(store, selectors, false)
}

fn pin_state<S: NoteStore>(
    store: &mut S,
    selectors: &[NoteSelector],
    is_pinned: bool,
) -> Result<CmdResult> {
    let resolved = resolve_selectors(store, selectors)?;
    let mut result = CmdResult::default();

    for (display, id) in resolved {
        let mut note = store.get_note(&id)?;
        note.metadata.is_pinned = is_pinned;
        note.metadata.pinned_at = if is_pinned { Some(Utc::now()) } else { None };
        store.save_note(&note)?;

        let verb = if is_pinned { "pinned" } else { "unpinned" };
        result.add_message(CmdMessage::success(format!(
            "Note {} ({}): {}",
            verb, display, note.metadata.title
        )));
        result.affected_notes.push(note);
    }

    Ok(result)
}
