use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::index::NoteSelector;
use crate::store::NoteStore;
use chrono::Utc;

use super::helpers::resolve_selectors;

pub fn archive<S: NoteStore>(store: &mut S, selectors: &[NoteSelector]) -> Result<CmdResult> {
    archive_state(store, selectors, true)
}

pub fn unarchive<S: NoteStore>(store: &mut S, selectors: &[NoteSelector]) -> Result<CmdResult> {
    archive_state(store, selectors, false)
}

fn archive_state<S: NoteStore>(
    store: &mut S,
    selectors: &[NoteSelector],
    is_archived: bool,
) -> Result<CmdResult> {
    let resolved = resolve_selectors(store, selectors)?;
    let mut result = CmdResult::default();

    for (display, id) in resolved {
        let mut note = store.get_note(&id)?;
        note.metadata.is_archived = is_archived;
        note.metadata.archived_at = if is_archived { Some(Utc::now()) } else { None };
        // Archiving a pinned note makes no sense; drop the pin with it.
        if is_archived {
            note.metadata.is_pinned = false;
            note.metadata.pinned_at = None;
        }
        store.save_note(&note)?;

        let verb = if is_archived { "archived" } else { "restored" };
        result.add_message(CmdMessage::success(format!(
            "Note {} ({}): {}",
            verb, display, note.metadata.title
        )));
        result.affected_notes.push(note);
    }

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::list;
    use crate::index::DisplayIndex;
    use crate::store::memory::fixtures::StoreFixture;

    #[test]
    fn archive_moves_note_to_archived_bucket() {
        let mut fixture = StoreFixture::new().with_notes(1);
        archive(
            &mut fixture.store,
            &[NoteSelector::Index(DisplayIndex::Regular(1))],
        )
        .unwrap();

        let visible = list::run(&fixture.store, None, false).unwrap();
        assert!(visible.listed_notes.is_empty());

        let all = list::run(&fixture.store, None, true).unwrap();
        assert!(matches!(
            all.listed_notes[0].index,
            DisplayIndex::Archived(1)
        ));
    }

    #[test]
    fn archiving_unpins() {
        let mut fixture = StoreFixture::new().with_pinned_note("Pinned");
        archive(
            &mut fixture.store,
            &[NoteSelector::Index(DisplayIndex::Regular(1))],
        )
        .unwrap();
        let note = &fixture.store.list_notes().unwrap()[0];
        assert!(note.metadata.is_archived);
        assert!(!note.metadata.is_pinned);
    }

    #[test]
    fn unarchive_restores() {
        let mut fixture = StoreFixture::new().with_archived_note("Old");
        unarchive(
            &mut fixture.store,
            &[NoteSelector::Index(DisplayIndex::Archived(1))],
        )
        .unwrap();
        let note = &fixture.store.list_notes().unwrap()[0];
        assert!(!note.metadata.is_archived);
    }
}
