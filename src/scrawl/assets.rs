//! # Asset ingestion
//!
//! Image bytes enter the document two ways: a pasted/dropped blob, or an
//! inline `data:image/...;base64,` reference typed or pasted into the text.
//! Both paths follow the same shape: put a uniquely-tokened placeholder tag
//! into the buffer *now*, persist the bytes asynchronously, and swap the
//! placeholder for the final reference when the save completes.
//!
//! The swap is a string search over the text as it is at completion time.
//! If the user edited the placeholder away in the meantime the completion
//! is silently dropped; if the save failed the placeholder stays forever.
//! Both are deliberate: the text is never corrupted, and a stuck
//! "Uploading" tag is the visible symptom of a failed save.
//!
//! Buffer mutation is only safe on the owning thread, so the worker never
//! touches a buffer: it sends [`UploadCompletion`] values back over a
//! channel for the owner to drain and apply.

use crate::text::StyledBuffer;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use chrono::Utc;
use log::{debug, warn};
use once_cell::sync::Lazy;
use regex::Regex;
use std::ops::Range;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::mpsc;
use std::thread;

/// Label shown inside an unresolved placeholder tag.
pub const UPLOADING_LABEL: &str = "Uploading Image...";

static TOKEN_SEQ: AtomicU64 = AtomicU64::new(0);

static INLINE_IMAGE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"!\[([^\]\n]*)\]\(data:image/([A-Za-z0-9.+-]+);base64,([A-Za-z0-9+/=\s]*)\)")
        .expect("inline image pattern")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetOrigin {
    Paste,
    Drop,
    InlineBase64,
}

/// An asset whose bytes are on their way to storage.
#[derive(Debug, Clone)]
pub struct PendingAsset {
    pub token: String,
    pub bytes: Vec<u8>,
    pub origin: AssetOrigin,
}

#[derive(Debug, Clone)]
pub enum UploadOutcome {
    /// Relative reference the store assigned, e.g. `img_17234_0.png`.
    Saved(String),
    Failed(String),
}

#[derive(Debug, Clone)]
pub struct UploadCompletion {
    pub token: String,
    pub outcome: UploadOutcome,
}

/// Process-unique upload token: wall-clock millis plus a monotonic
/// sequence, so two pastes in the same millisecond still differ.
pub fn next_token() -> String {
    format!(
        "img_{}_{}",
        Utc::now().timestamp_millis(),
        TOKEN_SEQ.fetch_add(1, Ordering::Relaxed)
    )
}

/// The placeholder tag a token renders as while its bytes persist.
pub fn placeholder_for(token: &str) -> String {
    format!("![{}]({})", UPLOADING_LABEL, token)
}

/// Ingest a pasted or dropped image blob at a cursor position. Inserts the
/// placeholder tag synchronously and returns the pending asset plus the
/// inserted range (which the caller re-decorates).
pub fn insert_blob(
    buffer: &mut StyledBuffer,
    cursor: usize,
    bytes: Vec<u8>,
    origin: AssetOrigin,
) -> (PendingAsset, Range<usize>) {
    let token = next_token();
    let tag = format!("{}\n", placeholder_for(&token));
    let range = buffer.insert(cursor.min(buffer.len()), &tag);
    (
        PendingAsset {
            token,
            bytes,
            origin,
        },
        range,
    )
}

/// Detect an inline base64 image reference and lift it out of the text.
///
/// Only the first match is processed per call: replacing several ranges in
/// one pass would shift the offsets of the later ones. Callers run this
/// once per edit cycle, which also guarantees the buffer never retains a
/// base64 payload beyond the edit that introduced it.
pub fn extract_inline_base64(buffer: &mut StyledBuffer) -> Option<(PendingAsset, Range<usize>)> {
    let (range, payload) = {
        let caps = INLINE_IMAGE.captures(buffer.text())?;
        let whole = caps.get(0)?;
        let payload = caps.get(3)?.as_str().to_string();
        (whole.range(), payload)
    };

    let cleaned: String = payload.chars().filter(|c| !c.is_whitespace()).collect();
    let bytes = match BASE64.decode(cleaned.as_bytes()) {
        Ok(bytes) => bytes,
        Err(err) => {
            warn!("undecodable inline image payload: {}", err);
            return None;
        }
    };

    let token = next_token();
    let new_range = buffer.replace_range(range, &placeholder_for(&token));
    Some((
        PendingAsset {
            token,
            bytes,
            origin: AssetOrigin::InlineBase64,
        },
        new_range,
    ))
}

/// Apply one finished upload to the buffer. Returns the range of the final
/// tag so the caller can re-decorate, or `None` when nothing changed
/// (placeholder gone, or the save failed and the placeholder stays).
pub fn apply_completion(
    buffer: &mut StyledBuffer,
    completion: &UploadCompletion,
) -> Option<Range<usize>> {
    let placeholder = placeholder_for(&completion.token);
    match &completion.outcome {
        UploadOutcome::Saved(reference) => {
            let replacement = format!("![Image]({})", reference);
            let replaced = buffer.replace_first(&placeholder, &replacement);
            if replaced.is_none() {
                debug!(
                    "placeholder for {} no longer present; dropping update",
                    completion.token
                );
            }
            replaced
        }
        UploadOutcome::Failed(err) => {
            warn!(
                "asset save failed for {}: {}; placeholder left in place",
                completion.token, err
            );
            None
        }
    }
}

/// Background persistence worker. Jobs go in on any thread; completions
/// come back out of [`AssetWorker::poll`] on whichever thread owns the
/// buffer. No cancellation and no timeout: an upload whose placeholder
/// disappeared simply no-ops at apply time.
pub struct AssetWorker {
    jobs: Option<mpsc::Sender<PendingAsset>>,
    completions: mpsc::Receiver<UploadCompletion>,
    handle: Option<thread::JoinHandle<()>>,
}

impl AssetWorker {
    /// Spawn a worker around a save function (typically a closure over the
    /// note store's `save_image`).
    pub fn spawn<F>(mut save: F) -> Self
    where
        F: FnMut(&PendingAsset) -> crate::error::Result<String> + Send + 'static,
    {
        let (job_tx, job_rx) = mpsc::channel::<PendingAsset>();
        let (done_tx, done_rx) = mpsc::channel();
        let handle = thread::spawn(move || {
            while let Ok(asset) = job_rx.recv() {
                let outcome = match save(&asset) {
                    Ok(reference) => UploadOutcome::Saved(reference),
                    Err(err) => UploadOutcome::Failed(err.to_string()),
                };
                let completion = UploadCompletion {
                    token: asset.token,
                    outcome,
                };
                if done_tx.send(completion).is_err() {
                    break;
                }
            }
        });
        Self {
            jobs: Some(job_tx),
            completions: done_rx,
            handle: Some(handle),
        }
    }

    pub fn submit(&self, asset: PendingAsset) {
        if let Some(jobs) = &self.jobs {
            if jobs.send(asset).is_err() {
                warn!("asset worker is gone; upload dropped");
            }
        }
    }

    /// Drain finished uploads without blocking.
    pub fn poll(&self) -> Vec<UploadCompletion> {
        self.completions.try_iter().collect()
    }

    /// Block for the next completion. Useful in tests and shutdown paths.
    pub fn wait(&self) -> Option<UploadCompletion> {
        self.completions.recv().ok()
    }
}

impl Drop for AssetWorker {
    fn drop(&mut self) {
        self.jobs.take();
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}
