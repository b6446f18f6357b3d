//! The engine collaborator contract.
//!
//! The external spatial stochastic reaction-diffusion engine is consumed
//! exclusively through these traits: construct from a configuration file,
//! register output files, queue commands, run a bounded interval. The
//! traits carry no engine state of their own, so tests substitute a
//! scripted mock and production code wraps the real engine bindings.
//!
//! There is deliberately no process-wide "current engine": a handle is an
//! explicit value threaded through the preprocessor and executor.

use std::path::Path;

use crate::error::EngineError;
use crate::task::RunWindow;

/// When a queued engine command fires.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CommandTiming {
    /// Executes once, immediately, on the live engine. Used for
    /// simulation-phase changes; never scheduled, never repeating.
    Immediate,
    /// Executes once before the first step of the next run.
    BeforeFirstStep,
    /// Executes at every output step. Used for output queries.
    EveryStep,
}

/// Constructs engine instances from configuration files.
pub trait Engine {
    /// The live-instance type produced by construction.
    type Handle: EngineHandle;

    /// Construct an engine instance from the configuration at `path`.
    ///
    /// Output files registered on the returned handle are created in the
    /// directory containing `path`.
    ///
    /// # Errors
    ///
    /// [`EngineError::Construct`] with the engine's diagnostic text if
    /// the configuration is rejected.
    fn construct(&self, path: &Path) -> Result<Self::Handle, EngineError>;
}

/// A live, constructed engine instance.
///
/// Not safe to share across concurrent task executions; each task owns
/// its handle exclusively from construction to cleanup.
pub trait EngineHandle {
    /// Declare an output file by logical name.
    ///
    /// The physical file is created next to the configuration file. With
    /// `append` false, a later run with overwrite enabled truncates it.
    fn set_output_file(&mut self, name: &str, append: bool) -> Result<(), EngineError>;

    /// Queue a native command with the given timing.
    fn add_command(&mut self, text: &str, timing: CommandTiming) -> Result<(), EngineError>;

    /// Select a graphics method; `"none"` disables all display.
    fn set_graphics(&mut self, method: &str) -> Result<(), EngineError>;

    /// Seed the engine's random number generator.
    fn set_seed(&mut self, seed: u64) -> Result<(), EngineError>;

    /// Set the internal simulation time step.
    fn set_time_step(&mut self, dt: f64) -> Result<(), EngineError>;

    /// Set the neighbor-interaction accuracy parameter.
    fn set_accuracy(&mut self, accuracy: f64) -> Result<(), EngineError>;

    /// Run the bounded interval `[window.start, window.stop]` at
    /// `window.step`.
    ///
    /// With `overwrite` true, existing output files are truncated rather
    /// than appended. With `display` false, no interactive surface is
    /// opened regardless of what the configuration requested.
    fn run(&mut self, window: RunWindow, overwrite: bool, display: bool)
        -> Result<(), EngineError>;
}
