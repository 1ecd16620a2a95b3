use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::{Metadata, Note};
use crate::store::NoteStore;

pub fn run<S: NoteStore>(
    store: &mut S,
    title: String,
    content: String,
    expiry_days: Option<i64>,
) -> Result<CmdResult> {
    let mut metadata = Metadata::new(title);
    if let Some(days) = expiry_days {
        metadata = metadata.with_expiry_days(days);
    }
    let note = Note {
        metadata,
        content,
    };
    store.save_note(&note)?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Created note: {}",
        note.metadata.title
    )));
    result.affected_notes.push(note);
    Ok(result)
}
