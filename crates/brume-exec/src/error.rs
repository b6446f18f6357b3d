//! The execution-level error type, rolling up every failure mode.

use std::error::Error;
use std::fmt;
use std::io;

use brume_core::{EngineError, SamplingError};
use brume_translate::{ObservableError, TranslateError};

/// Errors from preprocessing or executing one task.
///
/// Fail-closed: ambiguous mappings are escalated, never guessed, and
/// batched variants enumerate every offending item found in the same
/// validation pass.
#[derive(Debug)]
pub enum ExecError {
    /// The model source is missing or was rejected by engine
    /// construction. Carries the engine's diagnostic text.
    MalformedSource {
        /// Diagnostic detail (I/O or engine text).
        detail: String,
    },
    /// A parameter change matched no translation family.
    UnsupportedChange(TranslateError),
    /// One or more requested observables are unrecognized (batched).
    UnsupportedObservable(ObservableError),
    /// The requested time course is not expressible as an exact step
    /// count.
    IrregularSampling(SamplingError),
    /// One or more recognized variables produced no rows (batched).
    MissingVariableResult {
        /// Ids of every variable whose decoded result was empty.
        variables: Vec<String>,
    },
    /// An output file could not be decoded.
    Decode {
        /// Logical name of the offending output file.
        file: String,
        /// What went wrong.
        detail: String,
    },
    /// The engine failed after construction.
    Engine(EngineError),
    /// I/O failure while managing temporary artifacts.
    Io(io::Error),
}

impl fmt::Display for ExecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MalformedSource { detail } => write!(f, "malformed source: {detail}"),
            Self::UnsupportedChange(e) => write!(f, "{e}"),
            Self::UnsupportedObservable(e) => write!(f, "{e}"),
            Self::IrregularSampling(e) => write!(f, "{e}"),
            Self::MissingVariableResult { variables } => write!(
                f,
                "no rows decoded for variables [{}]",
                variables.join(", ")
            ),
            Self::Decode { file, detail } => {
                write!(f, "failed to decode output file '{file}': {detail}")
            }
            Self::Engine(e) => write!(f, "{e}"),
            Self::Io(e) => write!(f, "I/O error: {e}"),
        }
    }
}

impl Error for ExecError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::UnsupportedChange(e) => Some(e),
            Self::UnsupportedObservable(e) => Some(e),
            Self::IrregularSampling(e) => Some(e),
            Self::Engine(e) => Some(e),
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<TranslateError> for ExecError {
    fn from(e: TranslateError) -> Self {
        Self::UnsupportedChange(e)
    }
}

impl From<ObservableError> for ExecError {
    fn from(e: ObservableError) -> Self {
        Self::UnsupportedObservable(e)
    }
}

impl From<SamplingError> for ExecError {
    fn from(e: SamplingError) -> Self {
        Self::IrregularSampling(e)
    }
}

impl From<EngineError> for ExecError {
    fn from(e: EngineError) -> Self {
        match e {
            // Construction rejection is the malformed-source contract.
            EngineError::Construct { detail } => Self::MalformedSource { detail },
            other => Self::Engine(other),
        }
    }
}

impl From<io::Error> for ExecError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}
