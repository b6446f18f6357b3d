//! Error types for change translation and observable mapping.

use std::error::Error;
use std::fmt;

use crate::change::{COUNT_KEYWORDS, KILL_KEYWORDS, PARAM_KEYWORDS};
use crate::observable::{GRID_KEYWORDS, MATRIX_KEYWORDS, SCALAR_KEYWORDS, VECTOR_KEYWORDS};

/// Errors from change-target translation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TranslateError {
    /// No directive family matches the target.
    UnsupportedChangeTarget {
        /// The whitespace-normalized target that failed to classify.
        target: String,
    },
}

impl fmt::Display for TranslateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnsupportedChangeTarget { target } => {
                write!(
                    f,
                    "unsupported change target '{target}'; supported families: "
                )?;
                write_keyword_list(
                    f,
                    [KILL_KEYWORDS, COUNT_KEYWORDS, PARAM_KEYWORDS]
                        .into_iter()
                        .flatten(),
                )
            }
        }
    }
}

impl Error for TranslateError {}

/// Batched errors from observable mapping.
///
/// Validation never fails fast: every offending variable across the
/// whole request is accumulated, then raised together so one pass
/// reports everything.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ObservableError {
    /// Symbols with no mapping (anything other than `time`).
    pub symbols: Vec<String>,
    /// Targets whose leading keyword matches no output family, or whose
    /// structure is invalid for the family it matched.
    pub targets: Vec<String>,
    /// Variable ids that carried neither a target nor a symbol.
    pub unaddressed: Vec<String>,
}

impl ObservableError {
    /// Whether anything was accumulated.
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty() && self.targets.is_empty() && self.unaddressed.is_empty()
    }
}

impl fmt::Display for ObservableError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unsupported observables:")?;
        if !self.symbols.is_empty() {
            write!(
                f,
                " symbols [{}] (supported symbols: time);",
                self.symbols.join(", ")
            )?;
        }
        if !self.targets.is_empty() {
            write!(f, " targets [{}] (supported families: ", self.targets.join(", "))?;
            write_keyword_list(
                f,
                [SCALAR_KEYWORDS, VECTOR_KEYWORDS, MATRIX_KEYWORDS, GRID_KEYWORDS]
                    .into_iter()
                    .flatten(),
            )?;
            write!(f, ");")?;
        }
        if !self.unaddressed.is_empty() {
            write!(
                f,
                " variables without target or symbol [{}];",
                self.unaddressed.join(", ")
            )?;
        }
        Ok(())
    }
}

impl Error for ObservableError {}

fn write_keyword_list<'a>(
    f: &mut fmt::Formatter<'_>,
    keywords: impl Iterator<Item = &'a &'a str>,
) -> fmt::Result {
    for (i, kw) in keywords.enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{kw}")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn observable_error_enumerates_every_item() {
        let err = ObservableError {
            symbols: vec!["energy".to_string()],
            targets: vec!["bogus foo".to_string(), "worse bar".to_string()],
            unaddressed: vec!["v3".to_string()],
        };
        let msg = err.to_string();
        assert!(msg.contains("energy"));
        assert!(msg.contains("bogus foo"));
        assert!(msg.contains("worse bar"));
        assert!(msg.contains("v3"));
        assert!(msg.contains("molcount"));
    }

    #[test]
    fn translate_error_names_target() {
        let msg = TranslateError::UnsupportedChangeTarget {
            target: "bogus A".to_string(),
        }
        .to_string();
        assert!(msg.contains("bogus A"));
        assert!(msg.contains("killmol"));
        assert!(msg.contains("surface_drift_rule"));
    }
}
