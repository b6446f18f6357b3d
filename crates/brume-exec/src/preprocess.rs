//! Unbuilt → Configured: build one ready-to-run engine instance per task.
//!
//! Preprocessing is the only point where configuration text is mutated.
//! The source is read and normalized, interactive display directives are
//! force-disabled, every preprocessing-phase change is baked in by
//! prepending its rewritten line, and the result is written to a fresh
//! temporary path the engine is constructed from. Output files are then
//! registered on the live handle, one per distinct output command.

use indexmap::IndexMap;

use brume_config::ConfigText;
use brume_core::{
    ChangePhase, CommandTiming, Engine, EngineHandle, SimulationChange, Task, Variable,
    VariableKey,
};
use brume_translate::{translate_change, validate_variables, VariableSpec};

use crate::error::ExecError;
use crate::output::{OutputFile, TaskWorkspace};

/// A task in the Configured state: a live engine instance plus
/// everything the executor needs to run and collect it.
///
/// Configured once, runnable many times: chained executions through
/// [`TaskExecutor::execute_configured`](crate::executor::TaskExecutor::execute_configured)
/// reuse the same engine instance, workspace, and cached change
/// translations. The first run overwrites the output files;
/// continuation runs share engine state and append, which is why
/// collection keeps only the trailing rows of each file.
///
/// Owns the [`TaskWorkspace`]; dropping a `ConfiguredTask` on any path
/// deletes the temporary configuration and every output file.
pub struct ConfiguredTask<H: EngineHandle> {
    /// The constructed engine instance.
    pub handle: H,
    /// Temporary directory owning all on-disk artifacts.
    pub workspace: TaskWorkspace,
    /// Validated observable specs, keyed by `(target, symbol)`.
    pub specs: IndexMap<VariableKey, VariableSpec>,
    /// Registered output files, keyed by distinct output command.
    pub outputs: IndexMap<String, OutputFile>,
    /// Cached change translations, keyed by normalized target.
    ///
    /// Derived once per distinct target; every execution renders its
    /// simulation-phase command lines from this cache instead of
    /// re-translating.
    pub changes: IndexMap<String, SimulationChange>,
    /// Runs completed so far on this instance.
    pub(crate) completed_runs: usize,
}

/// Drive one task from Unbuilt to Configured.
///
/// # Errors
///
/// - [`ExecError::UnsupportedObservable`] — batched across every
///   unrecognized variable.
/// - [`ExecError::UnsupportedChange`] — a change target matches no
///   directive family.
/// - [`ExecError::MalformedSource`] — the source is missing or the
///   engine rejected the rewritten configuration.
pub fn preprocess<E: Engine>(
    engine: &E,
    task: &Task,
    variables: &[Variable],
) -> Result<ConfiguredTask<E::Handle>, ExecError> {
    let specs = validate_variables(variables)?;

    // Translate each distinct target once. Preprocessing-phase lines
    // are baked in here; simulation-phase lines are rendered from the
    // cache at each run.
    let mut changes: IndexMap<String, SimulationChange> = IndexMap::new();
    let mut preprocessing_lines = Vec::new();
    for change in &task.model.changes {
        let key = normalize_target(&change.target);
        if !changes.contains_key(&key) {
            changes.insert(key.clone(), translate_change(&change.target)?);
        }
        let translated = &changes[&key];
        if translated.phase == ChangePhase::Preprocessing {
            preprocessing_lines.push(translated.rewrite.line(&change.new_value));
        }
    }

    let source = &task.model.source_path;
    let mut text = ConfigText::read_path(source).map_err(|e| ExecError::MalformedSource {
        detail: format!("cannot read '{}': {e}", source.display()),
    })?;
    text.normalize();
    text.disable_interactive();
    for line in &preprocessing_lines {
        text.prepend(line);
    }

    let workspace = TaskWorkspace::create()?;
    let config_path = workspace.config_path();
    text.write_path(&config_path)?;

    let mut handle = engine.construct(&config_path)?;
    handle.set_graphics("none")?;

    let mut outputs: IndexMap<String, OutputFile> = IndexMap::new();
    for spec in specs.values() {
        if outputs.contains_key(&spec.output_command) {
            continue;
        }
        let file = workspace.output_file(outputs.len());
        handle.set_output_file(&file.logical_name, false)?;
        if spec.include_header {
            let keyword = spec
                .output_command
                .split_whitespace()
                .next()
                .unwrap_or(&spec.output_command);
            handle.add_command(
                &format!("{keyword}header {}", file.logical_name),
                CommandTiming::BeforeFirstStep,
            )?;
        }
        handle.add_command(
            &format!("{} {}", spec.output_command, file.logical_name),
            CommandTiming::EveryStep,
        )?;
        outputs.insert(spec.output_command.clone(), file);
    }

    Ok(ConfiguredTask {
        handle,
        workspace,
        specs,
        outputs,
        changes,
        completed_runs: 0,
    })
}

pub(crate) fn normalize_target(target: &str) -> String {
    let mut out = String::with_capacity(target.len());
    for token in target.split_whitespace() {
        if !out.is_empty() {
            out.push(' ');
        }
        out.push_str(token);
    }
    out
}
