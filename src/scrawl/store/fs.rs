use super::NoteStore;
use crate::draw::{split_legacy_tag, DrawingModel};
use crate::error::{Result, ScrawlError};
use crate::model::{Metadata, Note};
use log::warn;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use uuid::Uuid;

const METADATA_FILENAME: &str = "notes.json";
const NOTE_EXT: &str = ".md";

pub struct FileStore {
    root: PathBuf,
    asset_dir: String,
    sidecar_ext: String,
}

impl FileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            asset_dir: "assets".to_string(),
            sidecar_ext: ".drawing".to_string(),
        }
    }

    pub fn with_asset_dir(mut self, dir: &str) -> Self {
        self.asset_dir = dir.to_string();
        self
    }

    pub fn with_sidecar_ext(mut self, ext: &str) -> Self {
        if ext.starts_with('.') {
            self.sidecar_ext = ext.to_string();
        } else {
            self.sidecar_ext = format!(".{}", ext);
        }
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn ensure_dir(&self, path: &Path) -> Result<()> {
        if !path.exists() {
            fs::create_dir_all(path).map_err(ScrawlError::Io)?;
        }
        Ok(())
    }

    fn load_metadata(&self) -> Result<HashMap<Uuid, Metadata>> {
        let data_file = self.root.join(METADATA_FILENAME);
        if !data_file.exists() {
            return Ok(HashMap::new());
        }
        let content = fs::read_to_string(data_file).map_err(ScrawlError::Io)?;
        let meta: HashMap<Uuid, Metadata> =
            serde_json::from_str(&content).map_err(ScrawlError::Serialization)?;
        Ok(meta)
    }

    fn save_metadata(&self, meta: &HashMap<Uuid, Metadata>) -> Result<()> {
        let data_file = self.root.join(METADATA_FILENAME);
        let content = serde_json::to_string_pretty(meta).map_err(ScrawlError::Serialization)?;
        fs::write(data_file, content).map_err(ScrawlError::Io)?;
        Ok(())
    }

    fn content_path(&self, title: &str) -> PathBuf {
        self.root
            .join(format!("{}{}", sanitize_filename(title), NOTE_EXT))
    }

    fn sidecar_path(&self, title: &str) -> PathBuf {
        self.root
            .join(format!("{}{}", sanitize_filename(title), self.sidecar_ext))
    }

    fn title_taken(&self, meta: &HashMap<Uuid, Metadata>, title: &str, except: &Uuid) -> bool {
        let wanted = sanitize_filename(title);
        meta.iter()
            .any(|(id, m)| id != except && sanitize_filename(&m.title) == wanted)
    }
}

impl NoteStore for FileStore {
    fn save_note(&mut self, note: &Note) -> Result<()> {
        let root = self.root.clone();
        self.ensure_dir(&root)?;

        // 1. Update the metadata index
        let mut meta_map = self.load_metadata()?;
        if self.title_taken(&meta_map, &note.metadata.title, &note.metadata.id) {
            return Err(ScrawlError::DuplicateTitle(note.metadata.title.clone()));
        }
        meta_map.insert(note.metadata.id, note.metadata.clone());
        self.save_metadata(&meta_map)?;

        // 2. Write the content file, named by title
        let path = self.content_path(&note.metadata.title);
        fs::write(path, &note.content).map_err(ScrawlError::Io)?;

        Ok(())
    }

    fn get_note(&self, id: &Uuid) -> Result<Note> {
        let meta_map = self.load_metadata()?;
        let metadata = meta_map
            .get(id)
            .ok_or(ScrawlError::NoteNotFound(*id))?
            .clone();

        let path = self.content_path(&metadata.title);
        let raw = if path.exists() {
            fs::read_to_string(path).map_err(ScrawlError::Io)?
        } else {
            String::new()
        };
        // Legacy inline drawing tags never reach the editor surface.
        let (content, _) = split_legacy_tag(&raw);

        Ok(Note { metadata, content })
    }

    fn list_notes(&self) -> Result<Vec<Note>> {
        if !self.root.exists() {
            return Ok(Vec::new());
        }
        let meta_map = self.load_metadata()?;
        let mut notes = Vec::new();
        for id in meta_map.keys() {
            notes.push(self.get_note(id)?);
        }
        Ok(notes)
    }

    fn delete_note(&mut self, id: &Uuid) -> Result<()> {
        let mut meta_map = self.load_metadata()?;
        let Some(metadata) = meta_map.remove(id) else {
            return Err(ScrawlError::NoteNotFound(*id));
        };
        self.save_metadata(&meta_map)?;

        let content = self.content_path(&metadata.title);
        if content.exists() {
            fs::remove_file(content).map_err(ScrawlError::Io)?;
        }
        let sidecar = self.sidecar_path(&metadata.title);
        if sidecar.exists() {
            fs::remove_file(sidecar).map_err(ScrawlError::Io)?;
        }

        Ok(())
    }

    fn rename_note(&mut self, id: &Uuid, new_title: &str) -> Result<()> {
        let mut meta_map = self.load_metadata()?;
        if self.title_taken(&meta_map, new_title, id) {
            return Err(ScrawlError::DuplicateTitle(new_title.to_string()));
        }
        let Some(metadata) = meta_map.get_mut(id) else {
            return Err(ScrawlError::NoteNotFound(*id));
        };

        let old_content = self.content_path(&metadata.title);
        let old_sidecar = self.sidecar_path(&metadata.title);
        metadata.title = new_title.to_string();
        metadata.updated_at = chrono::Utc::now();
        let new_content = self.content_path(new_title);
        let new_sidecar = self.sidecar_path(new_title);
        self.save_metadata(&meta_map)?;

        if old_content.exists() {
            fs::rename(old_content, new_content).map_err(ScrawlError::Io)?;
        }
        // The sidecar follows the note by naming convention.
        if old_sidecar.exists() {
            fs::rename(old_sidecar, new_sidecar).map_err(ScrawlError::Io)?;
        }

        Ok(())
    }

    fn note_path(&self, id: &Uuid) -> Result<PathBuf> {
        let meta_map = self.load_metadata()?;
        let metadata = meta_map.get(id).ok_or(ScrawlError::NoteNotFound(*id))?;
        Ok(self.content_path(&metadata.title))
    }

    fn save_image(&mut self, token: &str, bytes: &[u8]) -> Result<String> {
        let dir = self.root.join(&self.asset_dir);
        self.ensure_dir(&dir)?;
        let reference = format!("{}.png", token);
        fs::write(dir.join(&reference), bytes).map_err(ScrawlError::Io)?;
        Ok(reference)
    }

    fn image_path(&self, reference: &str) -> Result<PathBuf> {
        // References are bare filenames; no traversal out of the asset dir.
        if reference.contains('/') || reference.contains('\\') || reference.contains("..") {
            return Err(ScrawlError::Store(format!(
                "invalid image reference: {}",
                reference
            )));
        }
        Ok(self.root.join(&self.asset_dir).join(reference))
    }

    fn save_drawing(&mut self, id: &Uuid, model: &DrawingModel) -> Result<()> {
        let meta_map = self.load_metadata()?;
        let metadata = meta_map.get(id).ok_or(ScrawlError::NoteNotFound(*id))?;
        let blob = model.encode()?;
        fs::write(self.sidecar_path(&metadata.title), blob).map_err(ScrawlError::Io)?;
        Ok(())
    }

    fn load_drawing(&self, id: &Uuid) -> Result<Option<DrawingModel>> {
        let meta_map = self.load_metadata()?;
        let metadata = meta_map.get(id).ok_or(ScrawlError::NoteNotFound(*id))?;

        let sidecar = self.sidecar_path(&metadata.title);
        if sidecar.exists() {
            let blob = fs::read(sidecar).map_err(ScrawlError::Io)?;
            return DrawingModel::decode(&blob).map(Some);
        }

        // Fall back to the legacy inline tag, read-only.
        let content = self.content_path(&metadata.title);
        if content.exists() {
            let raw = fs::read_to_string(content).map_err(ScrawlError::Io)?;
            if let (_, Some(strokes)) = split_legacy_tag(&raw) {
                let mut model = DrawingModel::new();
                for stroke in strokes {
                    model.push_stroke(stroke);
                }
                return Ok(Some(model));
            }
        }
        Ok(None)
    }

    fn has_drawing(&self, id: &Uuid) -> bool {
        let meta_map = match self.load_metadata() {
            Ok(meta_map) => meta_map,
            Err(err) => {
                warn!("could not read note metadata: {}", err);
                return false;
            }
        };
        let Some(metadata) = meta_map.get(id) else {
            return false;
        };
        self.sidecar_path(&metadata.title).exists()
    }
}

/// Keep titles usable as filenames.
pub fn sanitize_filename(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_alphanumeric() || c == ' ' || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect::<String>()
        .trim()
        .to_string()
}
