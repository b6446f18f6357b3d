//! Requested observables and their deduplication keys.

use std::fmt;

/// A requested observable: a quantity to extract from one task execution.
///
/// Exactly one of `target` or `symbol` should be set. A `symbol` names an
/// engine-independent quantity (currently only `"time"`); a `target` names
/// a native output query, for example `"molcount red"`.
///
/// # Examples
///
/// ```
/// use brume_core::Variable;
///
/// let t = Variable::symbol("time_var", "time");
/// let red = Variable::target("red_count", "molcount red");
/// assert_ne!(t.key(), red.key());
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Variable {
    /// Caller-chosen identifier; keys the [`TaskResult`](crate::TaskResult).
    pub id: String,
    /// Native output query, if this variable is engine-addressed.
    pub target: Option<String>,
    /// Engine-independent symbol, if this variable is symbolic.
    pub symbol: Option<String>,
}

impl Variable {
    /// A variable addressed by a native output query.
    pub fn target(id: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            target: Some(target.into()),
            symbol: None,
        }
    }

    /// A variable addressed by an engine-independent symbol.
    pub fn symbol(id: impl Into<String>, symbol: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            target: None,
            symbol: Some(symbol.into()),
        }
    }

    /// Deduplication key: variables with the same key share one
    /// output command and one decoded table.
    pub fn key(&self) -> VariableKey {
        VariableKey {
            target: self.target.clone(),
            symbol: self.symbol.clone(),
        }
    }
}

/// The `(target, symbol)` pair identifying one distinct observable.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct VariableKey {
    /// Native output query, if engine-addressed.
    pub target: Option<String>,
    /// Engine-independent symbol, if symbolic.
    pub symbol: Option<String>,
}

impl fmt::Display for VariableKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.target, &self.symbol) {
            (Some(t), _) => write!(f, "target '{t}'"),
            (None, Some(s)) => write!(f, "symbol '{s}'"),
            (None, None) => write!(f, "<unaddressed>"),
        }
    }
}
