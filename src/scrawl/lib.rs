//! # Scrawl Architecture
//!
//! Scrawl is a **UI-agnostic Markdown note engine**. This is not a CLI
//! application that happens to have some library code—it's a library that
//! happens to have a CLI client. The interesting parts are the three
//! engines a host editor drives; everything else is the plumbing around
//! them.
//!
//! ## The Three Engines
//!
//! - [`text`]: the live decoration engine. A [`text::StyledBuffer`] holds
//!   the Markdown source and a sparse attribute map over it; the
//!   [`text::Decorator`] re-derives presentation for the paragraph range
//!   touched by each edit, hiding syntax markers in place instead of
//!   parsing into a tree. The buffer's plain text always round-trips as
//!   the exact source.
//! - [`assets`]: paste/drop and inline-base64 image ingestion. Placeholder
//!   tags with process-unique tokens go into the text synchronously; bytes
//!   persist on a worker thread; completions are drained by the buffer
//!   owner and swapped in by string search, last-writer-wins.
//! - [`draw`]: the freehand overlay model. Shape gestures become sampled
//!   strokes (arc-length walked, with fabricated timing) and serialize to
//!   an opaque gzip-JSON sidecar beside the note.
//!
//! ## The Layers Around Them
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (args.rs, wired by main.rs)                      │
//! │  - Parses arguments, formats output, handles terminal I/O   │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Thin facade over commands                                │
//! │  - Normalizes inputs (indexes → ids → Notes)                │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - Pure business logic, no I/O assumptions                  │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                     │
//! │  - Abstract NoteStore trait                                 │
//! │  - FileStore (production), InMemoryStore (testing)          │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! From `api.rs` inward, code takes regular Rust arguments, returns
//! regular Rust types, never writes to stdout/stderr, and never assumes a
//! terminal. The same core serves the CLI, an editor view layer, or tests.
//!
//! ## Threading
//!
//! Decoration and stroke synthesis are synchronous on the caller's thread;
//! the buffer and drawing model each have exactly one mutator. Asset
//! persistence is the single asynchronous boundary, crossed with channels
//! (see [`assets::AssetWorker`]): completions mutate the buffer only when
//! the owner drains them.
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade—entry point for all operations
//! - [`commands`]: Business logic for each command
//! - [`text`]: Styled buffer, rule table, decoration engine
//! - [`assets`]: Image ingestion pipeline
//! - [`draw`]: Strokes, shape conversion, sidecar codec, PNG raster
//! - [`preview`]: Independent read-only Markdown→HTML renderer
//! - [`store`]: Storage abstraction and implementations
//! - [`model`]: Core data types (`Note`, `Metadata`)
//! - [`index`]: Display indexing (p1, 1, a1 notation)
//! - [`config`]: Configuration management
//! - [`error`]: Error types

pub mod api;
pub mod assets;
pub mod commands;
pub mod config;
pub mod draw;
pub mod error;
pub mod index;
pub mod model;
pub mod preview;
pub mod store;
pub mod text;
