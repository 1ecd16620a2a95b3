use crate::commands::CmdResult;
use crate::error::Result;
use crate::index::DisplayIndex;
use crate::store::NoteStore;

use super::helpers::indexed_notes;

pub fn run<S: NoteStore>(
    store: &S,
    search: Option<&str>,
    include_archived: bool,
) -> Result<CmdResult> {
    let mut listed = indexed_notes(store)?;

    if !include_archived {
        listed.retain(|dn| !matches!(dn.index, DisplayIndex::Archived(_)));
    }
    if let Some(term) = search {
        let needle = term.to_lowercase();
        listed.retain(|dn| {
            dn.note.metadata.title.to_lowercase().contains(&needle)
                || dn.note.content.to_lowercase().contains(&needle)
        });
    }

    Ok(CmdResult::default().with_listed_notes(listed))
}
