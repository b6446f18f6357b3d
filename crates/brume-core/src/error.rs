//! Error types shared across the brume workspace.
//!
//! Engine-facing failures ([`EngineError`]) and time-course resolution
//! failures ([`SamplingError`]) live here because both sides of the
//! bridge need them; translation and execution errors are defined in
//! their own crates and roll these up via `From`.

use std::error::Error;
use std::fmt;
use std::io;

/// Errors reported by the engine collaborator.
///
/// The engine is consumed only through the traits in
/// [`crate::traits`]; every failure it can report surfaces as one of
/// these variants, carrying the engine's diagnostic text verbatim.
#[derive(Debug)]
pub enum EngineError {
    /// Engine construction rejected the configuration file.
    Construct {
        /// Diagnostic text reported by the engine.
        detail: String,
    },
    /// A bounded run failed after construction succeeded.
    Run {
        /// Diagnostic text reported by the engine.
        detail: String,
    },
    /// A runtime command was rejected by the live engine.
    Command {
        /// The command text that was rejected.
        text: String,
        /// Diagnostic text reported by the engine.
        detail: String,
    },
    /// An I/O error occurred while talking to the engine.
    Io(io::Error),
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Construct { detail } => write!(f, "engine construction failed: {detail}"),
            Self::Run { detail } => write!(f, "engine run failed: {detail}"),
            Self::Command { text, detail } => {
                write!(f, "engine rejected command '{text}': {detail}")
            }
            Self::Io(e) => write!(f, "engine I/O error: {e}"),
        }
    }
}

impl Error for EngineError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for EngineError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

/// Errors from resolving a uniform time course into a physical run window.
#[derive(Clone, Debug, PartialEq)]
pub enum SamplingError {
    /// The requested time course is not expressible as an exact step count.
    ///
    /// The step is derived from the output window, so the window itself is
    /// always exact; what can fail is the pre-output segment between the
    /// initial time and the output start, whose implied point count must
    /// be within 1e-8 of an integer.
    Irregular {
        /// Length of the segment that does not divide evenly.
        segment: f64,
        /// The derived step size.
        step: f64,
        /// The non-integral implied point count.
        implied: f64,
    },
    /// The time course is structurally invalid (non-finite bounds, reversed
    /// window, or zero points).
    InvalidCourse {
        /// Description of the violated constraint.
        reason: String,
    },
}

impl fmt::Display for SamplingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Irregular {
                segment,
                step,
                implied,
            } => write!(
                f,
                "irregular sampling: segment {segment} over step {step} implies \
                 {implied} points, which is not an integer"
            ),
            Self::InvalidCourse { reason } => write!(f, "invalid time course: {reason}"),
        }
    }
}

impl Error for SamplingError {}
