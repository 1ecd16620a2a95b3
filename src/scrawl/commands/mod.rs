use crate::config::ScrawlConfig;
use crate::index::DisplayNote;
use crate::model::Note;
use std::path::PathBuf;

pub mod archive;
pub mod config;
pub mod create;
pub mod delete;
pub mod draw_export;
pub mod export;
pub mod helpers;
pub mod housekeep;
pub mod inspect;
pub mod list;
pub mod pinning;
pub mod rename;
pub mod render;
pub mod view;

/// Filesystem locations the commands need beyond the store itself.
#[derive(Debug, Clone)]
pub struct NotePaths {
    /// The notes directory.
    pub root: PathBuf,
}

impl NotePaths {
    pub fn asset_dir(&self, config: &ScrawlConfig) -> PathBuf {
        self.root.join(&config.asset_dir)
    }
}

#[derive(Debug, Clone)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub affected_notes: Vec<Note>,
    pub listed_notes: Vec<DisplayNote>,
    pub note_paths: Vec<PathBuf>,
    /// Rendered text payload (preview HTML, inspection dumps).
    pub rendered: Option<String>,
    /// Binary payload (drawing PNG export).
    pub blob: Option<Vec<u8>>,
    pub config: Option<ScrawlConfig>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_affected_notes(mut self, notes: Vec<Note>) -> Self {
        self.affected_notes = notes;
        self
    }

    pub fn with_listed_notes(mut self, notes: Vec<DisplayNote>) -> Self {
        self.listed_notes = notes;
        self
    }

    pub fn with_rendered(mut self, rendered: String) -> Self {
        self.rendered = Some(rendered);
        self
    }

    pub fn with_blob(mut self, blob: Vec<u8>) -> Self {
        self.blob = Some(blob);
        self
    }
}
