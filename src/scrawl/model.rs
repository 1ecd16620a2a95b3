use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Metadata {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub is_pinned: bool,
    pub pinned_at: Option<DateTime<Utc>>,
    pub is_archived: bool,
    pub archived_at: Option<DateTime<Utc>>,
    /// When set, the housekeeping sweep archives the note after this instant.
    pub expires_at: Option<DateTime<Utc>>,
    // We store the title in metadata to list without reading content files
    pub title: String,
}

impl Metadata {
    pub fn new(title: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            created_at: now,
            updated_at: now,
            is_pinned: false,
            pinned_at: None,
            is_archived: false,
            archived_at: None,
            expires_at: None,
            title,
        }
    }

    pub fn with_expiry_days(mut self, days: i64) -> Self {
        self.expires_at = Some(self.created_at + Duration::days(days));
        self
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        matches!(self.expires_at, Some(at) if at <= now)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Note {
    pub metadata: Metadata,
    pub content: String,
}

impl Note {
    pub fn new(title: String, content: String) -> Self {
        Self {
            metadata: Metadata::new(title),
            content,
        }
    }
}
