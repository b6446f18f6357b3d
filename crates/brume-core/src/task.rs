//! Task descriptions: model source, changes, and the uniform time course.

use std::path::PathBuf;

use crate::change::ModelChange;
use crate::error::SamplingError;

/// One experiment task: a model plus a simulation request.
#[derive(Clone, Debug, PartialEq)]
pub struct Task {
    /// The model to simulate, with its parameter changes.
    pub model: ModelSpec,
    /// The simulation to run against it.
    pub simulation: SimulationSpec,
}

/// A model source and the changes to apply to it.
#[derive(Clone, Debug, PartialEq)]
pub struct ModelSpec {
    /// Path to the engine-native configuration file.
    pub source_path: PathBuf,
    /// Parameter changes, engine-agnostic until translated.
    pub changes: Vec<ModelChange>,
}

/// The simulation half of a task: time course plus algorithm tuning.
#[derive(Clone, Debug, PartialEq)]
pub struct SimulationSpec {
    /// The requested uniform time course.
    pub time_course: UniformTimeCourse,
    /// Typed algorithm attribute changes, applied to the live handle.
    pub algorithm_changes: Vec<AlgorithmChange>,
}

/// A closed set of engine attributes the experiment layer may tune.
///
/// A deliberate replacement for reflective attribute setters: every
/// settable attribute is an explicit variant with a typed value, applied
/// through the correspondingly typed method on
/// [`EngineHandle`](crate::traits::EngineHandle).
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum AlgorithmChange {
    /// Random number generator seed.
    Seed(u64),
    /// Internal simulation time step, in model time units.
    TimeStep(f64),
    /// Neighbor-interaction accuracy parameter.
    Accuracy(f64),
}

/// An experiment described by initial/output-start/output-end times and a
/// fixed number of output points.
///
/// # Examples
///
/// ```
/// use brume_core::UniformTimeCourse;
///
/// let course = UniformTimeCourse {
///     initial_time: 0.0,
///     output_start_time: 0.1,
///     output_end_time: 0.2,
///     number_of_points: 10,
/// };
/// let window = course.resolve().unwrap();
/// assert!((window.step - 0.01).abs() < 1e-12);
/// assert_eq!(window.start, 0.0);
/// assert_eq!(window.stop, 0.2);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct UniformTimeCourse {
    /// Simulation start time.
    pub initial_time: f64,
    /// Time of the first requested output point.
    pub output_start_time: f64,
    /// Time of the last requested output point.
    pub output_end_time: f64,
    /// Number of output intervals; the run yields `number_of_points + 1`
    /// output rows from `output_start_time` to `output_end_time` inclusive.
    pub number_of_points: u64,
}

/// Tolerance for the implied-point-count integrality check.
const STEP_TOLERANCE: f64 = 1e-8;

impl UniformTimeCourse {
    /// Resolve into a physical `(start, stop, step)` run window.
    ///
    /// The step is `(output_end - output_start) / number_of_points`, so
    /// the output window is exact by construction. The run starts at
    /// `initial_time`; for the engine's step grid to land on
    /// `output_start_time`, the pre-output segment must be an integral
    /// number of steps (within 1e-8), otherwise this fails with
    /// [`SamplingError::Irregular`].
    pub fn resolve(&self) -> Result<RunWindow, SamplingError> {
        let invalid = |reason: String| SamplingError::InvalidCourse { reason };
        for (name, v) in [
            ("initial_time", self.initial_time),
            ("output_start_time", self.output_start_time),
            ("output_end_time", self.output_end_time),
        ] {
            if !v.is_finite() {
                return Err(invalid(format!("{name} must be finite, got {v}")));
            }
        }
        if self.number_of_points == 0 {
            return Err(invalid("number_of_points must be at least 1".to_string()));
        }
        if self.output_end_time <= self.output_start_time {
            return Err(invalid(format!(
                "output window is empty or reversed: [{}, {}]",
                self.output_start_time, self.output_end_time,
            )));
        }
        if self.output_start_time < self.initial_time {
            return Err(invalid(format!(
                "output_start_time {} precedes initial_time {}",
                self.output_start_time, self.initial_time,
            )));
        }

        let step = (self.output_end_time - self.output_start_time) / self.number_of_points as f64;
        let segment = self.output_start_time - self.initial_time;
        let implied = segment / step;
        if (implied - implied.round()).abs() > STEP_TOLERANCE {
            return Err(SamplingError::Irregular {
                segment,
                step,
                implied,
            });
        }

        Ok(RunWindow {
            start: self.initial_time,
            stop: self.output_end_time,
            step,
        })
    }

    /// Number of output rows retained from the end of each output file.
    pub fn retained_rows(&self) -> usize {
        self.number_of_points as usize + 1
    }
}

/// A physical run window: what the engine is actually asked to execute.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RunWindow {
    /// Run start time.
    pub start: f64,
    /// Run stop time, inclusive.
    pub stop: f64,
    /// Step size between output rows.
    pub step: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn course(initial: f64, start: f64, end: f64, points: u64) -> UniformTimeCourse {
        UniformTimeCourse {
            initial_time: initial,
            output_start_time: start,
            output_end_time: end,
            number_of_points: points,
        }
    }

    #[test]
    fn resolve_exact_course_succeeds() {
        let w = course(0.0, 0.1, 0.2, 10).resolve().unwrap();
        assert_eq!(w.start, 0.0);
        assert_eq!(w.stop, 0.2);
        assert!((w.step - 0.01).abs() < 1e-12);
    }

    #[test]
    fn resolve_zero_offset_succeeds() {
        let w = course(0.5, 0.5, 1.5, 100).resolve().unwrap();
        assert_eq!(w.start, 0.5);
        assert!((w.step - 0.01).abs() < 1e-12);
    }

    #[test]
    fn resolve_fractional_segment_is_irregular() {
        // step = 0.02, segment 0.05, so the grid implies 2.5 points.
        let err = course(0.0, 0.05, 0.25, 10).resolve().unwrap_err();
        match err {
            SamplingError::Irregular { implied, .. } => {
                assert!((implied - 2.5).abs() < 1e-9, "implied {implied}");
            }
            other => panic!("expected Irregular, got {other:?}"),
        }
    }

    #[test]
    fn resolve_zero_points_fails() {
        match course(0.0, 0.0, 1.0, 0).resolve() {
            Err(SamplingError::InvalidCourse { .. }) => {}
            other => panic!("expected InvalidCourse, got {other:?}"),
        }
    }

    #[test]
    fn resolve_reversed_window_fails() {
        match course(0.0, 1.0, 0.5, 10).resolve() {
            Err(SamplingError::InvalidCourse { .. }) => {}
            other => panic!("expected InvalidCourse, got {other:?}"),
        }
    }

    #[test]
    fn resolve_nan_bound_fails() {
        match course(f64::NAN, 0.0, 1.0, 10).resolve() {
            Err(SamplingError::InvalidCourse { .. }) => {}
            other => panic!("expected InvalidCourse, got {other:?}"),
        }
    }

    #[test]
    fn resolve_start_before_initial_fails() {
        match course(1.0, 0.5, 2.0, 10).resolve() {
            Err(SamplingError::InvalidCourse { .. }) => {}
            other => panic!("expected InvalidCourse, got {other:?}"),
        }
    }

    #[test]
    fn retained_rows_is_points_plus_one() {
        assert_eq!(course(0.0, 0.0, 1.0, 10).retained_rows(), 11);
    }

    proptest! {
        /// Any course whose output start sits an integral number of
        /// steps after the initial time resolves.
        #[test]
        fn integral_offset_resolves(
            initial in 0.0..10.0f64,
            span in 0.1..10.0f64,
            points in 1..100u64,
            offset_steps in 0..20u64,
        ) {
            let step = span / points as f64;
            let start = initial + offset_steps as f64 * step;
            let c = course(initial, start, start + span, points);
            let w = c.resolve().unwrap();
            prop_assert_eq!(w.start, initial);
            prop_assert!((w.stop - (start + span)).abs() < 1e-12);
        }
    }
}
