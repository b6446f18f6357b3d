//! Core types and traits for the brume experiment bridge.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the fundamental abstractions used throughout the brume workspace:
//! model changes and their translated rewrites, requested variables,
//! tasks and uniform time courses, result arrays, error types, and the
//! engine collaborator traits.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod change;
pub mod error;
pub mod result;
pub mod task;
pub mod traits;
pub mod variable;

pub use change::{ChangePhase, ModelChange, Rewrite, SimulationChange};
pub use error::{EngineError, SamplingError};
pub use result::{ResultArray, TaskResult};
pub use task::{AlgorithmChange, ModelSpec, RunWindow, SimulationSpec, Task, UniformTimeCourse};
pub use traits::{CommandTiming, Engine, EngineHandle};
pub use variable::{Variable, VariableKey};
