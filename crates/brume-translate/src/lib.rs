//! Change translation and observable mapping.
//!
//! The two halves of the bridge's vocabulary live here. [`change`]
//! classifies a declarative parameter change into one of the engine's
//! directive families and derives a rewrite rule plus an execution
//! phase. [`observable`] classifies a requested variable into one of
//! the engine's output-shape families and derives the native output
//! command, header requirement, and decoding slicer.
//!
//! Both classifiers dispatch on the leading whitespace-delimited keyword
//! of a whitespace-normalized string, then validate structure — there
//! are no pattern tables and no partial matches. Unknown keywords fail
//! closed.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod change;
pub mod error;
pub mod observable;

pub use change::{translate_change, validate_change, ChangeFamily};
pub use error::{ObservableError, TranslateError};
pub use observable::{validate_variables, OutputFamily, Slicer, VariableSpec};
