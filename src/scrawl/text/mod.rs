//! # Live Markdown decoration
//!
//! This module is the text core: a [`buffer::StyledBuffer`] holding the
//! Markdown source with a sparse attribute map over it, a
//! [`matcher`] applying one regex rule at a time, a fixed-priority
//! [`rules`] table, and the [`engine::Decorator`] driving a full pass over
//! the paragraph range touched by each edit.
//!
//! ## Why regex passes instead of an AST
//!
//! The buffer's plain text *is* the document model; attributes are a
//! projection over exact source ranges. Parsing into a tree would introduce
//! a second model whose offsets have to be reconciled back onto the source.
//! Running ordered rules directly against the buffer keeps one set of
//! offsets, at the cost of supporting only a deliberately partial Markdown
//! subset. That trade is the system's contract, so it is kept here and the
//! ordering is expressed as data (see [`rules::rules`]).
//!
//! ## Marker hiding
//!
//! Syntax markers are never deleted. They render at near-zero size in the
//! background color, so stripping attributes always recovers the exact
//! source text. The one exception is the image rule, which swaps a resolved
//! tag for a single object-replacement character; it runs last and only
//! when the asset exists.

pub mod buffer;
pub mod engine;
pub mod matcher;
pub mod rules;
pub mod style;

pub use buffer::{Span, StyledBuffer};
pub use engine::{Decorator, RenderMode};
pub use style::{Attrs, Color, FontFamily, ImageAttachment, Theme};
