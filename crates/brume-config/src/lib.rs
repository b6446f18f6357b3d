//! Configuration text handling for the brume experiment bridge.
//!
//! The engine's configuration language is line-oriented: each line is
//! blank, a `#` comment, or `<keyword> <args>`. This crate owns the text
//! side of the bridge: [`ConfigText`] holds an ordered line sequence with
//! `Read`/`Write` endpoints, [`normalize`] canonicalizes raw text, and
//! [`ConfigModel`] extracts descriptive entities (species, compartments,
//! surfaces, instructions) for introspection. Nothing here executes
//! anything.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod model;
pub mod normalize;
pub mod text;

pub use model::{ConfigModel, Instruction};
pub use normalize::{normalize, normalize_line, TERMINATOR};
pub use text::ConfigText;
