use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::store::NoteStore;
use chrono::{DateTime, Utc};

/// Archive every note whose expiry has passed. The caller decides when to
/// run this (a timer, app launch, a cron job); there is no scheduler here.
pub fn run<S: NoteStore>(store: &mut S, now: DateTime<Utc>) -> Result<CmdResult> {
    let mut result = CmdResult::default();

    for note in store.list_notes()? {
        if note.metadata.is_archived || !note.metadata.is_expired(now) {
            continue;
        }
        let mut note = note;
        note.metadata.is_archived = true;
        note.metadata.archived_at = Some(now);
        note.metadata.is_pinned = false;
        note.metadata.pinned_at = None;
        store.save_note(&note)?;
        result.add_message(CmdMessage::info(format!(
            "Expired note archived: {}",
            note.metadata.title
        )));
        result.affected_notes.push(note);
    }

    if result.affected_notes.is_empty() {
        result.add_message(CmdMessage::info("Nothing to expire."));
    }
    Ok(result)
}
