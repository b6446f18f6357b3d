//! Task preprocessing and execution.
//!
//! This crate drives bounded engine runs through an explicit state
//! machine: **Unbuilt → Configured → Running → Collected → Cleaned**,
//! with failure reachable from any state.
//!
//! [`preprocess`](preprocess::preprocess) covers Unbuilt → Configured:
//! it normalizes the source text, bakes in preprocessing-phase changes,
//! writes the result to a fresh temporary path, constructs the engine
//! instance, and registers one output file per distinct output command.
//! [`TaskExecutor`](executor::TaskExecutor) covers the rest: it applies
//! simulation-phase changes as immediate commands, runs the bounded
//! interval, decodes every output file into shape-correct arrays, and
//! deletes all temporary artifacts on every exit path. A configured
//! task is built once and can be run many times against the same
//! engine instance; chained runs append to the accumulating output
//! files, and collection keeps only the trailing rows.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod decode;
pub mod error;
pub mod executor;
pub mod output;
pub mod preprocess;

pub use error::ExecError;
pub use executor::TaskExecutor;
pub use output::{OutputFile, TaskWorkspace};
pub use preprocess::{preprocess, ConfiguredTask};
