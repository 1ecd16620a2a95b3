use super::NoteStore;
use crate::draw::DrawingModel;
use crate::error::{Result, ScrawlError};
use crate::model::Note;
use std::collections::HashMap;
use std::path::PathBuf;
use uuid::Uuid;

/// In-memory store for tests: same contract as the file store, no disk.
#[derive(Default)]
pub struct InMemoryStore {
    notes: HashMap<Uuid, Note>,
    images: HashMap<String, Vec<u8>>,
    drawings: HashMap<Uuid, DrawingModel>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bytes stored under an image reference; test inspection helper.
    pub fn image_bytes(&self, reference: &str) -> Option<&[u8]> {
        self.images.get(reference).map(|b| b.as_slice())
    }
}

impl NoteStore for InMemoryStore {
    fn save_note(&mut self, note: &Note) -> Result<()> {
        let taken = self.notes.iter().any(|(id, existing)| {
            *id != note.metadata.id && existing.metadata.title == note.metadata.title
        });
        if taken {
            return Err(ScrawlError::DuplicateTitle(note.metadata.title.clone()));
        }
        self.notes.insert(note.metadata.id, note.clone());
        Ok(())
    }

    fn get_note(&self, id: &Uuid) -> Result<Note> {
        self.notes
            .get(id)
            .cloned()
            .ok_or(ScrawlError::NoteNotFound(*id))
    }

    fn list_notes(&self) -> Result<Vec<Note>> {
        Ok(self.notes.values().cloned().collect())
    }

    fn delete_note(&mut self, id: &Uuid) -> Result<()> {
        if self.notes.remove(id).is_none() {
            return Err(ScrawlError::NoteNotFound(*id));
        }
        self.drawings.remove(id);
        Ok(())
    }

    fn rename_note(&mut self, id: &Uuid, new_title: &str) -> Result<()> {
        let taken = self
            .notes
            .iter()
            .any(|(other, n)| other != id && n.metadata.title == new_title);
        if taken {
            return Err(ScrawlError::DuplicateTitle(new_title.to_string()));
        }
        let note = self
            .notes
            .get_mut(id)
            .ok_or(ScrawlError::NoteNotFound(*id))?;
        note.metadata.title = new_title.to_string();
        note.metadata.updated_at = chrono::Utc::now();
        Ok(())
    }

    fn note_path(&self, id: &Uuid) -> Result<PathBuf> {
        let note = self.notes.get(id).ok_or(ScrawlError::NoteNotFound(*id))?;
        Ok(PathBuf::from(format!("{}.md", note.metadata.title)))
    }

    fn save_image(&mut self, token: &str, bytes: &[u8]) -> Result<String> {
        let reference = format!("{}.png", token);
        self.images.insert(reference.clone(), bytes.to_vec());
        Ok(reference)
    }

    fn image_path(&self, reference: &str) -> Result<PathBuf> {
        Ok(PathBuf::from("assets").join(reference))
    }

    fn save_drawing(&mut self, id: &Uuid, model: &DrawingModel) -> Result<()> {
        if !self.notes.contains_key(id) {
            return Err(ScrawlError::NoteNotFound(*id));
        }
        self.drawings.insert(*id, model.clone());
        Ok(())
    }

    fn load_drawing(&self, id: &Uuid) -> Result<Option<DrawingModel>> {
        Ok(self.drawings.get(id).cloned())
    }

    fn has_drawing(&self, id: &Uuid) -> bool {
        self.drawings.contains_key(id)
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;
    use chrono::{Duration, Utc};

    pub struct StoreFixture {
        pub store: InMemoryStore,
    }

    impl Default for StoreFixture {
        fn default() -> Self {
            Self::new()
        }
    }

    impl StoreFixture {
        pub fn new() -> Self {
            Self {
                store: InMemoryStore::new(),
            }
        }

        pub fn with_notes(mut self, count: usize) -> Self {
            for i in 0..count {
                let title = format!("Test Note {}", i + 1);
                let content = format!("Content for note {}", i + 1);
                let note = Note::new(title, content);
                self.store.save_note(&note).unwrap();
            }
            self
        }

        pub fn with_pinned_note(mut self, title: &str) -> Self {
            let mut note = Note::new(title.to_string(), "Pinned content".to_string());
            note.metadata.is_pinned = true;
            note.metadata.pinned_at = Some(Utc::now());
            self.store.save_note(&note).unwrap();
            self
        }

        pub fn with_archived_note(mut self, title: &str) -> Self {
            let mut note = Note::new(title.to_string(), "Archived content".to_string());
            note.metadata.is_archived = true;
            note.metadata.archived_at = Some(Utc::now());
            self.store.save_note(&note).unwrap();
            self
        }

        pub fn with_expired_note(mut self, title: &str) -> Self {
            let mut note = Note::new(title.to_string(), "Expired content".to_string());
            note.metadata.expires_at = Some(Utc::now() - Duration::days(1));
            self.store.save_note(&note).unwrap();
            self
        }
    }
}
