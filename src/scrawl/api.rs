//! # API Facade
//!
//! The API layer is a **thin facade** over the command layer: the single
//! entry point for all note operations, regardless of the UI driving them.
//!
//! It dispatches to the right command, normalizes inputs (display indexes
//! and title terms into concrete notes), and returns structured
//! `Result<CmdResult>` values. No business logic, no I/O formatting, no
//! terminal assumptions: that split is what lets the same core serve the
//! CLI, the editor surface, and the tests.

use crate::commands;
use crate::config::ScrawlConfig;
use crate::error::Result;
use crate::index::{DisplayIndex, NoteSelector};
use crate::store::NoteStore;
use chrono::Utc;
use std::str::FromStr;

/// The main API facade for scrawl operations.
///
/// Generic over `NoteStore` to allow different storage backends:
/// `ScrawlApi<FileStore>` in production, `ScrawlApi<InMemoryStore>` in
/// tests.
pub struct ScrawlApi<S: NoteStore> {
    store: S,
    paths: commands::NotePaths,
    config: ScrawlConfig,
}

impl<S: NoteStore> ScrawlApi<S> {
    pub fn new(store: S, paths: commands::NotePaths, config: ScrawlConfig) -> Self {
        Self {
            store,
            paths,
            config,
        }
    }

    pub fn create_note(&mut self, title: String, content: String) -> Result<commands::CmdResult> {
        commands::create::run(&mut self.store, title, content, self.config.expiry_days)
    }

    pub fn list_notes(
        &self,
        search: Option<&str>,
        include_archived: bool,
    ) -> Result<commands::CmdResult> {
        commands::list::run(&self.store, search, include_archived)
    }

    pub fn view_notes<I: AsRef<str>>(&self, inputs: &[I]) -> Result<commands::CmdResult> {
        let selectors = parse_selectors(inputs);
        commands::view::run(&self.store, &selectors)
    }

    pub fn delete_notes<I: AsRef<str>>(&mut self, inputs: &[I]) -> Result<commands::CmdResult> {
        let selectors = parse_selectors(inputs);
        commands::delete::run(&mut self.store, &selectors)
    }

    pub fn rename_note(&mut self, input: &str, new_title: &str) -> Result<commands::CmdResult> {
        let selector = parse_selector(input);
        commands::rename::run(&mut self.store, &selector, new_title)
    }

    pub fn pin_notes<I: AsRef<str>>(&mut self, inputs: &[I]) -> Result<commands::CmdResult> {
        let selectors = parse_selectors(inputs);
        commands::pinning::pin(&mut self.store, &selectors)
    }

    pub fn unpin_notes<I: AsRef<str>>(&mut self, inputs: &[I]) -> Result<commands::CmdResult> {
        let selectors = parse_selectors(inputs);
        commands::pinning::unpin(&mut self.store, &selectors)
    }

    pub fn archive_notes<I: AsRef<str>>(&mut self, inputs: &[I]) -> Result<commands::CmdResult> {
        let selectors = parse_selectors(inputs);
        commands::archive::archive(&mut self.store, &selectors)
    }

    pub fn unarchive_notes<I: AsRef<str>>(&mut self, inputs: &[I]) -> Result<commands::CmdResult> {
        let selectors = parse_selectors(inputs);
        commands::archive::unarchive(&mut self.store, &selectors)
    }

    pub fn housekeep(&mut self) -> Result<commands::CmdResult> {
        commands::housekeep::run(&mut self.store, Utc::now())
    }

    pub fn export_notes<I: AsRef<str>>(&self, inputs: &[I]) -> Result<commands::CmdResult> {
        let selectors = parse_selectors(inputs);
        commands::export::run(&self.store, &selectors)
    }

    pub fn render_preview(&self, input: &str) -> Result<commands::CmdResult> {
        let selector = parse_selector(input);
        commands::render::run(&self.store, &selector)
    }

    pub fn inspect_note(&self, input: &str, raw: bool) -> Result<commands::CmdResult> {
        let selector = parse_selector(input);
        let asset_root = self.paths.asset_dir(&self.config);
        commands::inspect::run(
            &self.store,
            &selector,
            &asset_root,
            self.config.max_image_width,
            raw,
        )
    }

    pub fn export_drawing(&self, input: &str) -> Result<commands::CmdResult> {
        let selector = parse_selector(input);
        commands::draw_export::run(&self.store, &selector)
    }

    pub fn configure(&mut self, action: ConfigAction) -> Result<commands::CmdResult> {
        let result = commands::config::run(&self.paths, action)?;
        if let Some(config) = &result.config {
            self.config = config.clone();
        }
        Ok(result)
    }

    pub fn paths(&self) -> &commands::NotePaths {
        &self.paths
    }

    pub fn config(&self) -> &ScrawlConfig {
        &self.config
    }
}

fn parse_selector(input: &str) -> NoteSelector {
    match DisplayIndex::from_str(input) {
        Ok(index) => NoteSelector::Index(index),
        Err(_) => NoteSelector::Title(input.to_string()),
    }
}

/// If every input parses as a display index, select by index; otherwise
/// treat the whole input as one title search term.
fn parse_selectors<I: AsRef<str>>(inputs: &[I]) -> Vec<NoteSelector> {
    let all_indexes: std::result::Result<Vec<DisplayIndex>, _> = inputs
        .iter()
        .map(|s| DisplayIndex::from_str(s.as_ref()))
        .collect();

    if let Ok(indexes) = all_indexes {
        return indexes.into_iter().map(NoteSelector::Index).collect();
    }

    let search_term = inputs
        .iter()
        .map(|s| s.as_ref())
        .collect::<Vec<&str>>()
        .join(" ");
    vec![NoteSelector::Title(search_term)]
}

pub use crate::commands::config::ConfigAction;
pub use crate::commands::{CmdMessage, CmdResult, MessageLevel, NotePaths};
