use crate::commands::CmdResult;
use crate::error::Result;
use crate::index::NoteSelector;
use crate::store::NoteStore;

use super::helpers::resolve_selectors;

pub fn run<S: NoteStore>(store: &S, selectors: &[NoteSelector]) -> Result<CmdResult> {
    let resolved = resolve_selectors(store, selectors)?;
    let mut result = CmdResult::default();
    for (_, id) in resolved {
        result.affected_notes.push(store.get_note(&id)?);
        result.note_paths.push(store.note_path(&id)?);
    }
    Ok(result)
}
