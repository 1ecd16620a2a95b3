use crate::commands::CmdResult;
use crate::error::Result;
use crate::index::NoteSelector;
use crate::preview;
use crate::store::NoteStore;

use super::helpers::resolve_selectors;

/// Render one note's preview HTML.
pub fn run<S: NoteStore>(store: &S, selector: &NoteSelector) -> Result<CmdResult> {
    let resolved = resolve_selectors(store, std::slice::from_ref(selector))?;
    let id = resolved[0].1;
    let note = store.get_note(&id)?;
    let html = preview::render_html(&note.content);
    Ok(CmdResult::default()
        .with_affected_notes(vec![note])
        .with_rendered(html))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::DisplayIndex;
    use crate::model::Note;
    use crate::store::memory::InMemoryStore;

    #[test]
    fn renders_note_html() {
        let mut store = InMemoryStore::new();
        store
            .save_note(&Note::new("Doc".into(), "# Heading\n\n**bold**".into()))
            .unwrap();

        let result = run(&store, &NoteSelector::Index(DisplayIndex::Regular(1))).unwrap();
        let html = result.rendered.unwrap();
        assert!(html.contains("<h1>Heading</h1>"));
        assert!(html.contains("<strong>bold</strong>"));
    }
}
