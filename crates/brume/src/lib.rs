//! Brume: a bridge between declarative time-course experiments and the
//! textual configuration language of a spatial stochastic
//! reaction-diffusion engine.
//!
//! This is the top-level facade crate that re-exports the public API
//! from all brume sub-crates. For most users, adding `brume` as a
//! single dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use brume::prelude::*;
//!
//! // Canonicalize raw configuration text.
//! let mut cfg = ConfigText::read(&b"species  red\ndifc red 3\nend_file\n"[..]).unwrap();
//! cfg.normalize();
//! assert_eq!(cfg.lines(), ["species red", "difc red 3"]);
//!
//! // Translate a parameter change: preprocessing-phase changes are
//! // baked into the text before engine construction.
//! let change = translate_change("define K_1").unwrap();
//! assert_eq!(change.phase, ChangePhase::Preprocessing);
//! cfg.prepend(&change.rewrite.line("10"));
//! assert_eq!(cfg.lines()[0], "define K_1 10");
//!
//! // Map requested observables onto native output commands.
//! let specs = validate_variables(&[
//!     Variable::symbol("t", "time"),
//!     Variable::target("red", "molcount red"),
//! ])
//! .unwrap();
//! assert_eq!(specs.len(), 2);
//! ```
//!
//! Running a task end to end requires an engine implementation of the
//! [`types::Engine`] traits; see [`exec::TaskExecutor`].
//!
//! # Modules
//!
//! Each module corresponds to a sub-crate. Use them for types not in
//! the prelude:
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `brume-core` | changes, tasks, variables, results, engine traits |
//! | [`config`] | `brume-config` | configuration text, normalizer, model extraction |
//! | [`translate`] | `brume-translate` | change translation and observable mapping |
//! | [`exec`] | `brume-exec` | task preprocessing, execution, output decoding |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core types, traits, and errors (`brume-core`).
pub use brume_core as types;

/// Configuration text handling (`brume-config`).
pub use brume_config as config;

/// Change translation and observable mapping (`brume-translate`).
pub use brume_translate as translate;

/// Task preprocessing and execution (`brume-exec`).
pub use brume_exec as exec;

/// The most commonly used types, re-exported flat.
pub mod prelude {
    pub use brume_config::{ConfigModel, ConfigText};
    pub use brume_core::{
        AlgorithmChange, ChangePhase, CommandTiming, Engine, EngineHandle, ModelChange,
        ModelSpec, ResultArray, RunWindow, SimulationChange, SimulationSpec, Task, TaskResult,
        UniformTimeCourse, Variable, VariableKey,
    };
    pub use brume_exec::{ExecError, TaskExecutor};
    pub use brume_translate::{translate_change, validate_variables, VariableSpec};
}
