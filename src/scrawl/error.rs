use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum ScrawlError {
    #[error("Note not found: {0}")]
    NoteNotFound(Uuid),

    #[error("A note titled '{0}' already exists")]
    DuplicateTitle(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Image error: {0}")]
    Image(String),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Api Error: {0}")]
    Api(String),
}

pub type Result<T> = std::result::Result<T, ScrawlError>;
