use crate::error::{Result, ScrawlError};
use crate::index::{index_notes, DisplayIndex, DisplayNote, NoteSelector};
use crate::store::NoteStore;
use uuid::Uuid;

/// All notes with their canonical display indexes.
pub fn indexed_notes<S: NoteStore>(store: &S) -> Result<Vec<DisplayNote>> {
    Ok(index_notes(store.list_notes()?))
}

/// Resolve selectors to concrete notes. Indexes must exist; a title term
/// must match exactly one note (case-insensitive substring).
pub fn resolve_selectors<S: NoteStore>(
    store: &S,
    selectors: &[NoteSelector],
) -> Result<Vec<(String, Uuid)>> {
    let indexed = indexed_notes(store)?;
    let mut resolved = Vec::with_capacity(selectors.len());

    for selector in selectors {
        match selector {
            NoteSelector::Index(index) => {
                let found = indexed
                    .iter()
                    .find(|dn| dn.index == *index)
                    .ok_or_else(|| ScrawlError::Api(format!("No note at index {}", index)))?;
                resolved.push((index.to_string(), found.note.metadata.id));
            }
            NoteSelector::Title(term) => {
                let needle = term.to_lowercase();
                let matches: Vec<_> = indexed
                    .iter()
                    .filter(|dn| !matches!(dn.index, DisplayIndex::Pinned(_)))
                    .filter(|dn| dn.note.metadata.title.to_lowercase().contains(&needle))
                    .collect();
                match matches.as_slice() {
                    [] => {
                        return Err(ScrawlError::Api(format!("No note matching \"{}\"", term)));
                    }
                    [one] => resolved.push((one.index.to_string(), one.note.metadata.id)),
                    many => {
                        let titles: Vec<_> = many
                            .iter()
                            .map(|dn| dn.note.metadata.title.as_str())
                            .collect();
                        return Err(ScrawlError::Api(format!(
                            "\"{}\" is ambiguous: {}",
                            term,
                            titles.join(", ")
                        )));
                    }
                }
            }
        }
    }

    Ok(resolved)
}
