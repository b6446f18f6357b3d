//! Classification of parameter-change targets into directive families.
//!
//! The engine's directives split into three families for our purposes,
//! distinguished by how the new value is spliced into the directive line
//! and by *when* the resulting line can take effect:
//!
//! - kill/trigger directives carry no parameter at all and only make
//!   sense against a live engine (simulation phase);
//! - counted directives take the count between the species token and a
//!   positional suffix, also at runtime;
//! - parameterized physical-property directives take the value last and
//!   must be baked into the text before construction (preprocessing
//!   phase), since the engine reads them only at startup.

use brume_core::{ChangePhase, Rewrite, SimulationChange};
use smallvec::SmallVec;

use crate::error::TranslateError;

/// Kill/trigger directives: species-only argument, no parameter.
pub const KILL_KEYWORDS: &[&str] = &[
    "killmol",
    "killmolprob",
    "killmolinsphere",
    "killmolincmpt",
    "killmoloutsidesystem",
];

/// Counted directives: species token, then the count, then a suffix.
pub const COUNT_KEYWORDS: &[&str] = &[
    "fixmolcount",
    "fixmolcountrange",
    "fixmolcountonsurf",
    "fixmolcountincmpt",
];

/// Parameterized physical-property directives: value appended last.
pub const PARAM_KEYWORDS: &[&str] = &[
    "define",
    "difc",
    "difc_rule",
    "difm",
    "difm_rule",
    "drift",
    "drift_rule",
    "surface_drift",
    "surface_drift_rule",
];

/// The directive family a change target belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChangeFamily {
    /// Kill/trigger directive; value ignored, simulation phase.
    Kill,
    /// Counted directive; value spliced after species, simulation phase.
    Counted,
    /// Parameterized directive; value appended, preprocessing phase.
    Parameterized,
}

impl ChangeFamily {
    /// Classify a leading keyword, in table order.
    fn of(keyword: &str) -> Option<Self> {
        if KILL_KEYWORDS.contains(&keyword) {
            Some(Self::Kill)
        } else if COUNT_KEYWORDS.contains(&keyword) {
            Some(Self::Counted)
        } else if PARAM_KEYWORDS.contains(&keyword) {
            Some(Self::Parameterized)
        } else {
            None
        }
    }
}

/// Translate a change target into a rewrite rule plus execution phase.
///
/// Whitespace-insensitive: the target is tokenized before matching, so
/// `" difc  A "` and `"difc A"` translate identically. The result is
/// derived once per distinct target and cached by the caller.
///
/// # Errors
///
/// [`TranslateError::UnsupportedChangeTarget`] if the leading keyword
/// matches no family or the target names no argument after its keyword.
///
/// # Examples
///
/// ```
/// use brume_core::ChangePhase;
/// use brume_translate::translate_change;
///
/// let kill = translate_change("killmol red").unwrap();
/// assert_eq!(kill.phase, ChangePhase::Simulation);
/// assert_eq!(kill.rewrite.line("ignored"), "killmol red");
///
/// let define = translate_change("define K_1").unwrap();
/// assert_eq!(define.phase, ChangePhase::Preprocessing);
/// assert_eq!(define.rewrite.line("10"), "define K_1 10");
/// ```
pub fn translate_change(target: &str) -> Result<SimulationChange, TranslateError> {
    let tokens: SmallVec<[&str; 8]> = target.split_whitespace().collect();
    let unsupported = || TranslateError::UnsupportedChangeTarget {
        target: tokens.join(" "),
    };

    let (&keyword, rest) = tokens.split_first().ok_or_else(unsupported)?;
    let family = ChangeFamily::of(keyword).ok_or_else(unsupported)?;
    if rest.is_empty() {
        // Every family requires at least a species or name argument.
        return Err(unsupported());
    }

    Ok(match family {
        ChangeFamily::Kill => SimulationChange {
            rewrite: Rewrite::Verbatim {
                line: tokens.join(" "),
            },
            phase: ChangePhase::Simulation,
        },
        ChangeFamily::Counted => SimulationChange {
            rewrite: Rewrite::Spliced {
                prefix: format!("{keyword} {}", rest[0]),
                suffix: rest[1..].join(" "),
            },
            phase: ChangePhase::Simulation,
        },
        ChangeFamily::Parameterized => SimulationChange {
            rewrite: Rewrite::Appended {
                prefix: tokens.join(" "),
            },
            phase: ChangePhase::Preprocessing,
        },
    })
}

/// Check that a change target is translatable, without building the
/// translation.
pub fn validate_change(target: &str) -> Result<(), TranslateError> {
    translate_change(target).map(|_| ())
}

#[cfg(test)]
mod tests {
    use super::*;
    use brume_core::Rewrite;
    use proptest::prelude::*;

    #[test]
    fn kill_target_is_simulation_phase_verbatim() {
        let c = translate_change("killmol red").unwrap();
        assert_eq!(c.phase, ChangePhase::Simulation);
        assert_eq!(c.rewrite.line("999"), "killmol red");
    }

    #[test]
    fn kill_variants_all_classify() {
        for kw in KILL_KEYWORDS {
            let c = translate_change(&format!("{kw} red")).unwrap();
            assert_eq!(c.phase, ChangePhase::Simulation, "{kw}");
        }
    }

    #[test]
    fn counted_target_splices_value() {
        let c = translate_change("fixmolcountincmpt red cytosol").unwrap();
        assert_eq!(c.phase, ChangePhase::Simulation);
        assert_eq!(c.rewrite.line("25"), "fixmolcountincmpt red 25 cytosol");
    }

    #[test]
    fn counted_target_without_suffix() {
        let c = translate_change("fixmolcount red").unwrap();
        assert_eq!(c.rewrite.line("25"), "fixmolcount red 25");
    }

    #[test]
    fn parameterized_target_appends_value() {
        let c = translate_change("define K_1").unwrap();
        assert_eq!(c.phase, ChangePhase::Preprocessing);
        assert_eq!(c.rewrite.line("10"), "define K_1 10");
    }

    #[test]
    fn difc_is_preprocessing() {
        let c = translate_change("difc red").unwrap();
        assert_eq!(c.phase, ChangePhase::Preprocessing);
        assert_eq!(c.rewrite.line("3.5"), "difc red 3.5");
    }

    #[test]
    fn validate_is_whitespace_insensitive() {
        assert_eq!(
            validate_change(" difc  A "),
            validate_change("difc A"),
        );
        let spaced = translate_change("  killmol \t red ").unwrap();
        let plain = translate_change("killmol red").unwrap();
        assert_eq!(spaced, plain);
    }

    #[test]
    fn unknown_keyword_is_unsupported() {
        match validate_change("reaction fwd A B") {
            Err(TranslateError::UnsupportedChangeTarget { target }) => {
                assert_eq!(target, "reaction fwd A B");
            }
            other => panic!("expected UnsupportedChangeTarget, got {other:?}"),
        }
    }

    #[test]
    fn unsupported_error_lists_families() {
        let err = validate_change("bogus A").unwrap_err();
        let msg = err.to_string();
        for kw in KILL_KEYWORDS.iter().chain(COUNT_KEYWORDS).chain(PARAM_KEYWORDS) {
            assert!(msg.contains(kw), "missing family keyword {kw} in: {msg}");
        }
    }

    #[test]
    fn empty_target_is_unsupported() {
        assert!(validate_change("   ").is_err());
    }

    #[test]
    fn bare_keyword_is_unsupported() {
        assert!(validate_change("difc").is_err());
        assert!(validate_change("killmol").is_err());
    }

    proptest! {
        /// Translation depends only on the token sequence, not on the
        /// whitespace between tokens.
        #[test]
        fn translation_ignores_whitespace(
            keyword_idx in 0..18usize,
            pads in proptest::collection::vec("[ \t]{1,4}", 3),
        ) {
            let all: Vec<&str> = KILL_KEYWORDS
                .iter()
                .chain(COUNT_KEYWORDS)
                .chain(PARAM_KEYWORDS)
                .copied()
                .collect();
            let keyword = all[keyword_idx];
            let plain = format!("{keyword} red");
            let spaced = format!("{}{keyword}{}red{}", pads[0], pads[1], pads[2]);
            prop_assert_eq!(translate_change(&plain), translate_change(&spaced));
        }
    }

    #[test]
    fn rewrite_variants_match_family() {
        assert!(matches!(
            translate_change("killmolprob red").unwrap().rewrite,
            Rewrite::Verbatim { .. }
        ));
        assert!(matches!(
            translate_change("fixmolcountonsurf red membrane").unwrap().rewrite,
            Rewrite::Spliced { .. }
        ));
        assert!(matches!(
            translate_change("surface_drift red membrane").unwrap().rewrite,
            Rewrite::Appended { .. }
        ));
    }
}
