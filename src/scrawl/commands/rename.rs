use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::index::NoteSelector;
use crate::store::NoteStore;

use super::helpers::resolve_selectors;

pub fn run<S: NoteStore>(
    store: &mut S,
    selector: &NoteSelector,
    new_title: &str,
) -> Result<CmdResult> {
    let resolved = resolve_selectors(store, std::slice::from_ref(selector))?;
    let (_, id) = resolved[0].clone();
    let old_title = store.get_note(&id)?.metadata.title;

    store.rename_note(&id, new_title)?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Renamed '{}' to '{}'",
        old_title, new_title
    )));
    result.affected_notes.push(store.get_note(&id)?);
    Ok(result)
}
