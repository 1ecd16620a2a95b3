use crate::commands::{CmdMessage, CmdResult};
use crate::error::{Result, ScrawlError};
use crate::index::{DisplayIndex, DisplayNote, NoteSelector};
use crate::store::fs::sanitize_filename;
use crate::store::NoteStore;
use chrono::Utc;
use flate2::write::GzEncoder;
use flate2::Compression;
use std::fs::File;
use std::io::Write;

use super::helpers::{indexed_notes, resolve_selectors};

pub fn run<S: NoteStore>(store: &S, selectors: &[NoteSelector]) -> Result<CmdResult> {
    // 1. Resolve notes
    let notes = resolve_notes(store, selectors)?;

    if notes.is_empty() {
        let mut res = CmdResult::default();
        res.add_message(CmdMessage::info("No notes to export."));
        return Ok(res);
    }

    // 2. Prepare output file
    let now = Utc::now();
    let filename = format!("scrawl-{}.tar.gz", now.format("%Y-%m-%d_%H:%M:%S"));
    let file = File::create(&filename).map_err(ScrawlError::Io)?;

    // 3. Write archive
    write_archive(file, &notes)?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!("Exported to {}", filename)));
    Ok(result)
}

fn resolve_notes<S: NoteStore>(
    store: &S,
    selectors: &[NoteSelector],
) -> Result<Vec<DisplayNote>> {
    if selectors.is_empty() {
        // Everything except the archive; pinned entries appear once.
        Ok(indexed_notes(store)?
            .into_iter()
            .filter(|dn| matches!(dn.index, DisplayIndex::Regular(_)))
            .collect())
    } else {
        let resolved = resolve_selectors(store, selectors)?;
        let indexed = indexed_notes(store)?;
        let mut notes = Vec::new();
        for (_, id) in resolved {
            if let Some(dn) = indexed
                .iter()
                .find(|dn| dn.note.metadata.id == id && !matches!(dn.index, DisplayIndex::Pinned(_)))
            {
                notes.push(dn.clone());
            }
        }
        Ok(notes)
    }
}

fn write_archive<W: Write>(writer: W, notes: &[DisplayNote]) -> Result<()> {
    let enc = GzEncoder::new(writer, Compression::default());
    let mut tar = tar::Builder::new(enc);

    for dn in notes {
        let title = &dn.note.metadata.title;
        let safe_title = sanitize_filename(title);
        let entry_name = format!(
            "scrawl/{}-{}.md",
            safe_title,
            &dn.note.metadata.id.to_string()[..8]
        );

        let content = &dn.note.content;

        let mut header = tar::Header::new_gnu();
        header.set_size(content.len() as u64);
        header.set_mode(0o644);
        header.set_cksum();

        tar.append_data(&mut header, entry_name, content.as_bytes())
            .map_err(ScrawlError::Io)?;
    }

    tar.finish().map_err(ScrawlError::Io)?;
    Ok(())
}
