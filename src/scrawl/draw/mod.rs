//! # Drawing model
//!
//! Strokes live in an insertion-ordered collection, serialized as a
//! gzip-compressed JSON blob into the note's sidecar file. The blob is
//! opaque to everything but this module.
//!
//! An older persistence path embedded drawings as a trailing HTML-comment
//! tag inside the note text itself. That mechanism is read-only here: the
//! tag is parsed and stripped on load, and nothing ever writes it back.

use crate::error::{Result, ScrawlError};
use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;
use serde::{Deserialize, Serialize};
use std::io::{Read, Write};

pub mod raster;
pub mod shape;
pub mod stroke;

pub use shape::{convert, ShapeKind};
pub use stroke::{InkStyle, Point, Stroke, StrokePoint, Tool};

/// The strokes of one note's drawing overlay.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DrawingModel {
    strokes: Vec<Stroke>,
}

impl DrawingModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn strokes(&self) -> &[Stroke] {
        &self.strokes
    }

    pub fn is_empty(&self) -> bool {
        self.strokes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.strokes.len()
    }

    /// Append a stroke. One gesture, one entry; undo removes exactly one.
    pub fn push_stroke(&mut self, stroke: Stroke) {
        self.strokes.push(stroke);
    }

    pub fn undo(&mut self) -> Option<Stroke> {
        self.strokes.pop()
    }

    /// Serialize to the opaque sidecar blob (gzip-framed JSON).
    pub fn encode(&self) -> Result<Vec<u8>> {
        let json = serde_json::to_vec(self).map_err(ScrawlError::Serialization)?;
        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(&json).map_err(ScrawlError::Io)?;
        encoder.finish().map_err(ScrawlError::Io)
    }

    pub fn decode(bytes: &[u8]) -> Result<Self> {
        let mut decoder = GzDecoder::new(bytes);
        let mut json = Vec::new();
        decoder.read_to_end(&mut json).map_err(ScrawlError::Io)?;
        serde_json::from_slice(&json).map_err(ScrawlError::Serialization)
    }
}

/// Opening marker of the legacy inline drawing tag.
pub const LEGACY_TAG_OPEN: &str = "<!--scrawl:drawing:";
const LEGACY_TAG_CLOSE: &str = "-->";

/// Strip a trailing legacy drawing tag from note text.
///
/// Returns the text without the tag, plus the strokes the tag described.
/// Text without a well-formed trailing tag passes through untouched.
pub fn split_legacy_tag(text: &str) -> (String, Option<Vec<Stroke>>) {
    let trimmed = text.trim_end();
    if !trimmed.ends_with(LEGACY_TAG_CLOSE) {
        return (text.to_string(), None);
    }
    let Some(open) = trimmed.rfind(LEGACY_TAG_OPEN) else {
        return (text.to_string(), None);
    };

    let payload = &trimmed[open + LEGACY_TAG_OPEN.len()..trimmed.len() - LEGACY_TAG_CLOSE.len()];
    let descriptions: Vec<String> = match serde_json::from_str(payload) {
        Ok(paths) => paths,
        Err(_) => return (text.to_string(), None),
    };

    let strokes: Vec<Stroke> = descriptions
        .iter()
        .filter_map(|desc| parse_legacy_path(desc, InkStyle::default()))
        .collect();

    (trimmed[..open].trim_end().to_string(), Some(strokes))
}

/// Legacy path descriptions are `x,y` pairs separated by semicolons.
fn parse_legacy_path(desc: &str, style: InkStyle) -> Option<Stroke> {
    let mut positions = Vec::new();
    for pair in desc.split(';').filter(|s| !s.trim().is_empty()) {
        let (x, y) = pair.trim().split_once(',')?;
        positions.push(Point::new(
            x.trim().parse().ok()?,
            y.trim().parse().ok()?,
        ));
    }
    if positions.is_empty() {
        None
    } else {
        Some(Stroke::from_positions(positions, style, shape::TIME_STEP))
    }
}
