//! Mapping requested variables onto native output commands.
//!
//! Every observable the experiment layer can request decodes to one of
//! four output-shape families, distinguished by the leading keyword of
//! the variable's target. The mapping fixes three things at validation
//! time: the native output command to register, whether the output file
//! carries a header row, and the [`Slicer`] that extracts the variable
//! from the decoded table.

use brume_core::{Variable, VariableKey};
use indexmap::IndexMap;
use smallvec::SmallVec;

use crate::error::ObservableError;

/// Scalar-per-species queries: header row, one column per species.
pub const SCALAR_KEYWORDS: &[&str] = &[
    "molcount",
    "molcountinbox",
    "molcountincmpt",
    "molcountincmpt2",
    "molcountincmpts",
    "molcountonsurf",
];

/// Vector-per-step queries: no header, one row of values per step.
pub const VECTOR_KEYWORDS: &[&str] = &["molpos", "trackmol"];

/// Matrix-per-step queries (1-D spatial/radial/angular histograms).
pub const MATRIX_KEYWORDS: &[&str] = &[
    "molcountspace",
    "molcountspaceradial",
    "molcountspacepolarangle",
];

/// Grid-per-step queries (2-D spatial histograms).
pub const GRID_KEYWORDS: &[&str] = &["molcountspace2d"];

/// The symbol that maps to elapsed simulation time.
const TIME_SYMBOL: &str = "time";

/// The fixed per-step counting query backing the time symbol.
const TIME_COMMAND: &str = "molcount";

/// The output-shape family of one observable.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFamily {
    /// One value per step, selected by species column.
    ScalarPerSpecies,
    /// One row of values per step.
    VectorPerStep,
    /// A 1-D histogram per step.
    MatrixPerStep,
    /// A 2-D histogram per step.
    GridPerStep,
}

/// How to extract one variable from a decoded output table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Slicer {
    /// Select the column whose header cell equals `name`.
    HeaderColumn {
        /// Header cell to match (a species name, or `time`).
        name: String,
    },
    /// Drop the time column, keep the rest of each row.
    NonTimeColumns,
    /// No column slicing; the decoder reshapes raw line blocks.
    GridBlocks,
}

/// One observable's binding to a native output query.
///
/// Variables sharing an output command share one registered output file
/// and one decoded table; the spec map is keyed by [`VariableKey`] so
/// that sharing is explicit.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VariableSpec {
    /// The deduplication key this spec was derived from.
    pub key: VariableKey,
    /// The native output query to register, without a file argument.
    pub output_command: String,
    /// Whether a header directive must be registered before the query.
    pub include_header: bool,
    /// Grid shape `(rows, cols)`, grid family only.
    pub shape: Option<(usize, usize)>,
    /// Column extraction rule.
    pub slicer: Slicer,
    /// The family the target classified into.
    pub family: OutputFamily,
}

/// Map every requested variable to a [`VariableSpec`].
///
/// Unsupported symbols and targets are accumulated across *all*
/// variables and returned as one batched [`ObservableError`]; validation
/// never stops at the first offender.
///
/// # Examples
///
/// ```
/// use brume_core::Variable;
/// use brume_translate::validate_variables;
///
/// let specs = validate_variables(&[
///     Variable::symbol("t", "time"),
///     Variable::target("red", "molcount red"),
/// ])
/// .unwrap();
/// assert_eq!(specs.len(), 2);
/// ```
pub fn validate_variables(
    variables: &[Variable],
) -> Result<IndexMap<VariableKey, VariableSpec>, ObservableError> {
    let mut specs = IndexMap::new();
    let mut errors = ObservableError::default();

    for variable in variables {
        let key = variable.key();
        if specs.contains_key(&key) {
            continue;
        }
        match classify(variable) {
            Ok(spec) => {
                specs.insert(key, spec);
            }
            Err(Offender::Symbol(s)) => errors.symbols.push(s),
            Err(Offender::Target(t)) => errors.targets.push(t),
            Err(Offender::Unaddressed(id)) => errors.unaddressed.push(id),
        }
    }

    if errors.is_empty() {
        Ok(specs)
    } else {
        Err(errors)
    }
}

enum Offender {
    Symbol(String),
    Target(String),
    Unaddressed(String),
}

fn classify(variable: &Variable) -> Result<VariableSpec, Offender> {
    let key = variable.key();

    if let Some(symbol) = &variable.symbol {
        if symbol == TIME_SYMBOL {
            return Ok(VariableSpec {
                key,
                output_command: TIME_COMMAND.to_string(),
                include_header: true,
                shape: None,
                slicer: Slicer::HeaderColumn {
                    name: TIME_SYMBOL.to_string(),
                },
                family: OutputFamily::ScalarPerSpecies,
            });
        }
        return Err(Offender::Symbol(symbol.clone()));
    }

    let Some(target) = &variable.target else {
        return Err(Offender::Unaddressed(variable.id.clone()));
    };

    let tokens: SmallVec<[&str; 12]> = target.split_whitespace().collect();
    let normalized = tokens.join(" ");
    let bad_target = || Offender::Target(normalized.clone());

    let (&keyword, rest) = tokens.split_first().ok_or_else(bad_target)?;
    if rest.is_empty() {
        return Err(bad_target());
    }

    if SCALAR_KEYWORDS.contains(&keyword) {
        // The species token selects the column; the remaining arguments
        // belong to the query itself.
        let species = rest[0];
        let mut command = keyword.to_string();
        for arg in &rest[1..] {
            command.push(' ');
            command.push_str(arg);
        }
        return Ok(VariableSpec {
            key,
            output_command: command,
            include_header: true,
            shape: None,
            slicer: Slicer::HeaderColumn {
                name: species.to_string(),
            },
            family: OutputFamily::ScalarPerSpecies,
        });
    }

    if VECTOR_KEYWORDS.contains(&keyword) {
        return Ok(VariableSpec {
            key,
            output_command: normalized,
            include_header: false,
            shape: None,
            slicer: Slicer::NonTimeColumns,
            family: OutputFamily::VectorPerStep,
        });
    }

    if MATRIX_KEYWORDS.contains(&keyword) {
        return Ok(VariableSpec {
            key,
            output_command: normalized,
            include_header: false,
            shape: None,
            slicer: Slicer::NonTimeColumns,
            family: OutputFamily::MatrixPerStep,
        });
    }

    if GRID_KEYWORDS.contains(&keyword) {
        // Target layout: <kw> <species> <axis> <low1> <high1> <bins1>
        //                <low2> <high2> <bins2> [<average>]
        let shape = grid_shape(&tokens).ok_or_else(bad_target)?;
        return Ok(VariableSpec {
            key,
            output_command: normalized,
            include_header: false,
            shape: Some(shape),
            slicer: Slicer::GridBlocks,
            family: OutputFamily::GridPerStep,
        });
    }

    Err(bad_target())
}

/// Infer `(rows, cols)` from the two bin-count arguments of a 2-D
/// spatial histogram target. The second axis varies slowest in the
/// engine's block output, so `rows = bins2`, `cols = bins1`.
fn grid_shape(tokens: &[&str]) -> Option<(usize, usize)> {
    if tokens.len() < 9 {
        return None;
    }
    let bins1: usize = tokens[5].parse().ok()?;
    let bins2: usize = tokens[8].parse().ok()?;
    if bins1 == 0 || bins2 == 0 {
        return None;
    }
    Some((bins2, bins1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn time_symbol_maps_to_counting_query() {
        let specs = validate_variables(&[Variable::symbol("t", "time")]).unwrap();
        let spec = &specs[0];
        assert_eq!(spec.output_command, "molcount");
        assert!(spec.include_header);
        assert_eq!(
            spec.slicer,
            Slicer::HeaderColumn {
                name: "time".to_string()
            }
        );
        assert!(spec.shape.is_none());
    }

    #[test]
    fn molcount_target_slices_species_column() {
        let specs = validate_variables(&[Variable::target("red", "molcount red")]).unwrap();
        let spec = &specs[0];
        assert_eq!(spec.output_command, "molcount");
        assert!(spec.include_header);
        assert_eq!(
            spec.slicer,
            Slicer::HeaderColumn {
                name: "red".to_string()
            }
        );
        assert_eq!(spec.family, OutputFamily::ScalarPerSpecies);
    }

    #[test]
    fn compartment_count_keeps_location_argument() {
        let specs =
            validate_variables(&[Variable::target("v", "molcountincmpt red cytosol")]).unwrap();
        assert_eq!(specs[0].output_command, "molcountincmpt cytosol");
        assert_eq!(
            specs[0].slicer,
            Slicer::HeaderColumn {
                name: "red".to_string()
            }
        );
    }

    #[test]
    fn vector_target_keeps_full_command() {
        let specs = validate_variables(&[Variable::target("v", "molpos red")]).unwrap();
        assert_eq!(specs[0].output_command, "molpos red");
        assert!(!specs[0].include_header);
        assert_eq!(specs[0].slicer, Slicer::NonTimeColumns);
        assert_eq!(specs[0].family, OutputFamily::VectorPerStep);
    }

    #[test]
    fn matrix_target_is_non_time_columns() {
        let specs =
            validate_variables(&[Variable::target("v", "molcountspace red x 0 100 20 0")])
                .unwrap();
        assert_eq!(specs[0].family, OutputFamily::MatrixPerStep);
        assert_eq!(specs[0].slicer, Slicer::NonTimeColumns);
        assert!(specs[0].shape.is_none());
    }

    #[test]
    fn grid_target_infers_shape_from_bin_counts() {
        let specs = validate_variables(&[Variable::target(
            "v",
            "molcountspace2d red z 0 100 20 0 50 30 0",
        )])
        .unwrap();
        assert_eq!(specs[0].shape, Some((30, 20)));
        assert_eq!(specs[0].slicer, Slicer::GridBlocks);
        assert_eq!(specs[0].family, OutputFamily::GridPerStep);
    }

    #[test]
    fn grid_target_with_missing_bins_is_unsupported() {
        let err =
            validate_variables(&[Variable::target("v", "molcountspace2d red z 0 100")])
                .unwrap_err();
        assert_eq!(err.targets, ["molcountspace2d red z 0 100"]);
    }

    #[test]
    fn grid_target_with_non_numeric_bins_is_unsupported() {
        let err = validate_variables(&[Variable::target(
            "v",
            "molcountspace2d red z 0 100 many 0 50 few 0",
        )])
        .unwrap_err();
        assert_eq!(err.targets.len(), 1);
    }

    #[test]
    fn unknown_target_is_unsupported() {
        let err = validate_variables(&[Variable::target("v", "bogus foo")]).unwrap_err();
        assert_eq!(err.targets, ["bogus foo"]);
        assert!(err.to_string().contains("molcountspace2d"));
    }

    #[test]
    fn offenders_accumulate_across_all_variables() {
        let err = validate_variables(&[
            Variable::target("ok", "molcount red"),
            Variable::target("bad1", "bogus foo"),
            Variable::symbol("bad2", "energy"),
            Variable::target("bad3", "worse bar"),
            Variable {
                id: "bad4".to_string(),
                target: None,
                symbol: None,
            },
        ])
        .unwrap_err();
        assert_eq!(err.targets, ["bogus foo", "worse bar"]);
        assert_eq!(err.symbols, ["energy"]);
        assert_eq!(err.unaddressed, ["bad4"]);
    }

    #[test]
    fn duplicate_keys_share_one_spec() {
        let specs = validate_variables(&[
            Variable::target("a", "molcount red"),
            Variable::target("b", "molcount red"),
        ])
        .unwrap();
        assert_eq!(specs.len(), 1);
    }

    #[test]
    fn target_classification_is_whitespace_insensitive() {
        let spaced = validate_variables(&[Variable::target("v", "  molcount \t red ")]).unwrap();
        assert_eq!(spaced[0].output_command, "molcount");
    }
}
