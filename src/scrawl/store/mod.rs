//! # Storage Layer
//!
//! This module defines the storage abstraction for scrawl. The
//! [`NoteStore`] trait is everything the engine layer knows about
//! persistence: load text, save text, save image bytes and get a
//! reference back, and read/write the drawing sidecar.
//!
//! ## Implementations
//!
//! - [`fs::FileStore`]: Production file-based storage
//!   - One UTF-8 Markdown file per note, named by title: `{title}.md`
//!   - Lifecycle metadata for all notes in `notes.json`
//!   - Image assets as PNG files under `assets/`, named by upload token
//!   - Drawing sidecar beside the note: same base name, sidecar extension
//!
//! - [`memory::InMemoryStore`]: In-memory storage for testing
//!   - No persistence
//!   - Fast, isolated test execution
//!
//! ## Storage Format
//!
//! For `FileStore`:
//! ```text
//! notes/
//! ├── notes.json          # Metadata for all notes (JSON map by id)
//! ├── Groceries.md        # Note content, filename is the display title
//! ├── Groceries.drawing   # Optional sidecar: gzip-framed stroke blob
//! ├── assets/
//! │   └── img_1712_0.png  # Pasted images, named by upload token
//! └── config.json         # Configuration
//! ```
//!
//! A drawing belongs to a note purely by filename convention; presence is
//! a file existence check and nothing enforces referential integrity
//! beyond that.

use crate::draw::DrawingModel;
use crate::error::Result;
use crate::model::Note;
use std::path::PathBuf;
use uuid::Uuid;

pub mod fs;
pub mod memory;

/// Abstract interface for note storage.
pub trait NoteStore {
    /// Save a note (create or update)
    fn save_note(&mut self, note: &Note) -> Result<()>;

    /// Get a note by ID
    fn get_note(&self, id: &Uuid) -> Result<Note>;

    /// List all notes
    fn list_notes(&self) -> Result<Vec<Note>>;

    /// Delete a note permanently, along with its sidecar
    fn delete_note(&mut self, id: &Uuid) -> Result<()>;

    /// Retitle a note, moving its content file and sidecar
    fn rename_note(&mut self, id: &Uuid, new_title: &str) -> Result<()>;

    /// Get the content file path for a note (for file-based stores)
    fn note_path(&self, id: &Uuid) -> Result<PathBuf>;

    /// Persist image bytes under the given upload token; returns the
    /// relative reference Markdown uses for it
    fn save_image(&mut self, token: &str, bytes: &[u8]) -> Result<String>;

    /// Resolve a relative image reference to a full path
    fn image_path(&self, reference: &str) -> Result<PathBuf>;

    /// Write the drawing sidecar for a note
    fn save_drawing(&mut self, id: &Uuid, model: &DrawingModel) -> Result<()>;

    /// Read the drawing sidecar, or the note's legacy inline drawing tag
    /// if no sidecar exists. `None` when the note has no drawing at all.
    fn load_drawing(&self, id: &Uuid) -> Result<Option<DrawingModel>>;

    /// Whether a drawing exists for the note (existence check only)
    fn has_drawing(&self, id: &Uuid) -> bool;
}
