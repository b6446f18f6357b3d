//! Declarative model changes and their translated, engine-specific form.
//!
//! A [`ModelChange`] is what the experiment layer hands us: an
//! engine-agnostic `{target, new_value}` pair. Translation (in
//! `brume-translate`) classifies the target into a directive family and
//! produces a [`SimulationChange`]: a [`Rewrite`] rule plus the
//! [`ChangePhase`] that decides *when* the rewrite takes effect.

use std::fmt;

/// A caller-supplied parameter change, independent of any engine.
///
/// `target` names a native directive plus its arguments (for example
/// `"difc red"` or `"define K_1"`); `new_value` is the replacement value
/// as text. Interpretation of both is deferred to translation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ModelChange {
    /// Directive keyword plus target arguments, whitespace-delimited.
    pub target: String,
    /// Replacement value, as uninterpreted text.
    pub new_value: String,
}

impl ModelChange {
    /// Convenience constructor.
    pub fn new(target: impl Into<String>, new_value: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            new_value: new_value.into(),
        }
    }
}

/// When a translated change takes effect.
///
/// The phase is decided once per target family and preserved across
/// repeated executions of the same task.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ChangePhase {
    /// Baked into the configuration text before engine construction.
    Preprocessing,
    /// Issued as an immediate runtime command on the live engine handle.
    Simulation,
}

impl fmt::Display for ChangePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Preprocessing => write!(f, "preprocessing"),
            Self::Simulation => write!(f, "simulation"),
        }
    }
}

/// How a translated change turns a new value into a directive line.
///
/// Each variant captures the tokens it needs from the original target, so
/// rendering a line is a pure function of the new value — no re-parsing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Rewrite {
    /// Reproduce the target verbatim; the value is ignored.
    ///
    /// Used by the kill/trigger directives, which carry no parameter.
    Verbatim {
        /// The full normalized target, emitted as-is.
        line: String,
    },
    /// Splice the value between the species token and a positional suffix:
    /// `"<prefix> <value> <suffix>"`.
    ///
    /// Used by the counted directives, where a location argument follows
    /// the count.
    Spliced {
        /// Keyword plus species token.
        prefix: String,
        /// Remaining positional arguments after the count.
        suffix: String,
    },
    /// Append the value after the full target: `"<prefix> <value>"`.
    ///
    /// Used by the parameterized physical-property directives.
    Appended {
        /// Keyword plus target arguments.
        prefix: String,
    },
}

impl Rewrite {
    /// Render the directive line for `new_value`.
    pub fn line(&self, new_value: &str) -> String {
        match self {
            Self::Verbatim { line } => line.clone(),
            Self::Spliced { prefix, suffix } => {
                if suffix.is_empty() {
                    format!("{prefix} {new_value}")
                } else {
                    format!("{prefix} {new_value} {suffix}")
                }
            }
            Self::Appended { prefix } => format!("{prefix} {new_value}"),
        }
    }
}

/// A change after translation: a rewrite rule plus its execution phase.
///
/// Derived once per distinct target and cached, then reused across
/// repeated executions of the same task.
///
/// # Examples
///
/// ```
/// use brume_core::{ChangePhase, Rewrite, SimulationChange};
///
/// let change = SimulationChange {
///     rewrite: Rewrite::Appended { prefix: "define K_1".to_string() },
///     phase: ChangePhase::Preprocessing,
/// };
/// assert_eq!(change.rewrite.line("10"), "define K_1 10");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SimulationChange {
    /// Turns a new value into the directive line to emit.
    pub rewrite: Rewrite,
    /// Whether the line is baked into text or issued at runtime.
    pub phase: ChangePhase,
}
