//! Configured → Running → Collected → Cleaned.
//!
//! [`TaskExecutor`] drives bounded, synchronous engine runs: apply
//! simulation-phase changes as immediate commands, apply typed
//! algorithm changes, run the resolved window with display disabled,
//! then decode every output file once and slice each variable out of
//! the shared tables. A task is configured once and can be run many
//! times against the same engine instance; chained runs append to the
//! output files, so collection always keeps only the trailing rows.
//! Cleanup is owned by the
//! [`TaskWorkspace`](crate::output::TaskWorkspace) inside the configured
//! task, so artifacts disappear on every exit path.

use indexmap::IndexMap;

use brume_core::{
    AlgorithmChange, ChangePhase, CommandTiming, Engine, EngineHandle, ResultArray, Task,
    TaskResult, Variable,
};
use brume_translate::{translate_change, Slicer, VariableSpec};

use crate::decode::{grid_tail, matrix_tail, parse_table, read_lines, series_tail, DecodedOutput};
use crate::error::ExecError;
use crate::output::OutputFile;
use crate::preprocess::{normalize_target, preprocess, ConfiguredTask};

/// Executes tasks against a concrete engine.
///
/// Execution is single-threaded and synchronous per task; no two
/// executions share an engine instance. True parallelism requires one
/// executor per worker with isolated instances.
pub struct TaskExecutor<E: Engine> {
    engine: E,
}

impl<E: Engine> TaskExecutor<E> {
    /// Wrap an engine.
    pub fn new(engine: E) -> Self {
        Self { engine }
    }

    /// The wrapped engine.
    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Configure one task: preprocess the source, construct the engine
    /// instance, register output files.
    ///
    /// The returned [`ConfiguredTask`] can be run many times through
    /// [`execute_configured`](Self::execute_configured) without
    /// re-reading, re-translating, or re-constructing anything.
    pub fn configure(
        &self,
        task: &Task,
        variables: &[Variable],
    ) -> Result<ConfiguredTask<E::Handle>, ExecError> {
        preprocess(&self.engine, task, variables)
    }

    /// Run one task end to end and decode the requested variables.
    ///
    /// Single-shot convenience: configures a fresh engine instance,
    /// runs it once, and tears everything down. Use
    /// [`configure`](Self::configure) plus
    /// [`execute_configured`](Self::execute_configured) to run the same
    /// configured task repeatedly.
    ///
    /// # Errors
    ///
    /// Every error from the state machine propagates:
    /// [`ExecError::MalformedSource`], [`ExecError::UnsupportedChange`],
    /// [`ExecError::UnsupportedObservable`],
    /// [`ExecError::IrregularSampling`], engine failures, decode
    /// failures, and batched [`ExecError::MissingVariableResult`].
    /// Temporary artifacts are removed regardless of the outcome.
    pub fn execute(&self, task: &Task, variables: &[Variable]) -> Result<TaskResult, ExecError> {
        let mut configured = self.configure(task, variables)?;
        self.execute_configured(&mut configured, task, variables)
        // `configured` drops here on every path, deleting the workspace.
    }

    /// Run an already-configured task once and decode the requested
    /// variables.
    ///
    /// Simulation-phase command lines are rendered from the cached
    /// translations in `configured` and issued as immediate commands on
    /// every run; preprocessing-phase changes were already baked into
    /// the text at configure time. The first run overwrites the output
    /// files; continuation runs share engine state and append, and
    /// collection keeps only the trailing `number_of_points + 1` rows
    /// of each file.
    pub fn execute_configured(
        &self,
        configured: &mut ConfiguredTask<E::Handle>,
        task: &Task,
        variables: &[Variable],
    ) -> Result<TaskResult, ExecError> {
        let window = task.simulation.time_course.resolve()?;

        for change in &task.model.changes {
            let key = normalize_target(&change.target);
            if !configured.changes.contains_key(&key) {
                configured
                    .changes
                    .insert(key.clone(), translate_change(&change.target)?);
            }
            let translated = &configured.changes[&key];
            if translated.phase == ChangePhase::Simulation {
                let line = translated.rewrite.line(&change.new_value);
                configured.handle.add_command(&line, CommandTiming::Immediate)?;
            }
        }
        for change in &task.simulation.algorithm_changes {
            match change {
                AlgorithmChange::Seed(seed) => configured.handle.set_seed(*seed)?,
                AlgorithmChange::TimeStep(dt) => configured.handle.set_time_step(*dt)?,
                AlgorithmChange::Accuracy(acc) => configured.handle.set_accuracy(*acc)?,
            }
        }

        let overwrite = configured.completed_runs == 0;
        configured.handle.run(window, overwrite, false)?;
        configured.completed_runs += 1;

        collect(configured, task, variables)
    }
}

/// Running → Collected: decode outputs and slice every variable.
///
/// Each output file is parsed exactly once per distinct output command;
/// the memo map is threaded explicitly so sharing is visible.
fn collect<H: EngineHandle>(
    configured: &ConfiguredTask<H>,
    task: &Task,
    variables: &[Variable],
) -> Result<TaskResult, ExecError> {
    let keep = task.simulation.time_course.retained_rows();
    let mut memo: IndexMap<String, DecodedOutput> = IndexMap::new();
    let mut result = TaskResult::new();
    let mut missing = Vec::new();

    for variable in variables {
        let spec = configured
            .specs
            .get(&variable.key())
            .expect("spec validated during preprocessing");
        let file = configured
            .outputs
            .get(&spec.output_command)
            .expect("output registered during preprocessing");

        if !memo.contains_key(&spec.output_command) {
            let decoded = decode_output(file, spec)?;
            memo.insert(spec.output_command.clone(), decoded);
        }
        let decoded = &memo[&spec.output_command];

        let array = slice_variable(decoded, spec, file, keep)?;
        if array.is_empty() {
            missing.push(variable.id.clone());
        } else {
            result.insert(variable.id.clone(), array);
        }
    }

    if missing.is_empty() {
        Ok(result)
    } else {
        Err(ExecError::MissingVariableResult { variables: missing })
    }
}

fn decode_output(file: &OutputFile, spec: &VariableSpec) -> Result<DecodedOutput, ExecError> {
    // An output file the engine never created decodes as empty; the
    // per-variable emptiness check escalates it.
    let lines = if file.physical_path.exists() {
        read_lines(&file.physical_path).map_err(|e| ExecError::Decode {
            file: file.logical_name.clone(),
            detail: e.to_string(),
        })?
    } else {
        Vec::new()
    };

    match spec.slicer {
        Slicer::GridBlocks => Ok(DecodedOutput::Lines(lines)),
        _ => parse_table(&lines, spec.include_header)
            .map(DecodedOutput::Table)
            .map_err(|detail| ExecError::Decode {
                file: file.logical_name.clone(),
                detail,
            }),
    }
}

fn slice_variable(
    decoded: &DecodedOutput,
    spec: &VariableSpec,
    file: &OutputFile,
    keep: usize,
) -> Result<ResultArray, ExecError> {
    match (&spec.slicer, decoded) {
        (Slicer::HeaderColumn { name }, DecodedOutput::Table(table)) => {
            Ok(ResultArray::Series(series_tail(table, name, keep)))
        }
        (Slicer::NonTimeColumns, DecodedOutput::Table(table)) => Ok(matrix_tail(table, keep)),
        (Slicer::GridBlocks, DecodedOutput::Lines(lines)) => {
            let shape = spec.shape.expect("grid spec carries a shape");
            grid_tail(lines, shape, keep).map_err(|detail| ExecError::Decode {
                file: file.logical_name.clone(),
                detail,
            })
        }
        // One output command maps to one family, so the memo entry for a
        // command always matches its specs' slicers.
        _ => Err(ExecError::Decode {
            file: file.logical_name.clone(),
            detail: "decoded form does not match the variable's slicer".to_string(),
        }),
    }
}
