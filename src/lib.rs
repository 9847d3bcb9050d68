//! Everynumber - search for the simplest arithmetic formula for every number
//!
//! Given a multiset of digits and a set of operators, the engine expands
//! digit groupings into larger expressions, deduplicates equivalent
//! intermediate results, and records the simplest formula found for each
//! non-negative integer. This is the classic "make every number from a set
//! of digits" puzzle, generalized to configurable digit sets, operator sets
//! and search constraints.
//!
//! The engine is a step function driven either directly (see
//! [`RunController`]) or through the channel-based [`SolverWorker`], which
//! runs it on its own thread with start/pause/resume/stop commands and
//! progress snapshots.

pub mod engine;
pub mod formula;
pub mod operators;
pub mod worker;

// Re-export the main public API
pub use engine::{
    FormulaTextMap, Options, RunController, SearchOrder, Settings, SettingsError, Snapshot,
    StepOutcome, build_settings,
};
pub use formula::Formula;
pub use operators::{ALL_OPERATORS, Operator};
pub use worker::{Command, Event, SolverWorker, Status, WorkerError};

/// Run a search to completion (or to its duration budget) inline and
/// return the rendered formula per solved value.
///
/// # Errors
///
/// Returns an error if the options are invalid: empty or non-numeric digit
/// string, unknown operator symbol, or non-positive timing windows.
///
/// # Examples
///
/// ```
/// use everynumber::Options;
///
/// let options = Options {
///     digit_string: "123".to_string(),
///     symbols: vec!["+".to_string(), "×".to_string()],
///     ..Options::default()
/// };
/// let formulas = everynumber::solve(&options).expect("valid options");
/// assert!(formulas.contains_key(&6));
/// ```
pub fn solve(options: &Options) -> Result<FormulaTextMap, SettingsError> {
    let settings = build_settings(options)?;
    let mut controller = RunController::new(settings);
    loop {
        match controller.step_batch() {
            StepOutcome::Continue | StepOutcome::Yielded => {}
            StepOutcome::Paused | StepOutcome::Done => break,
        }
    }
    Ok(controller.pool().formula_map())
}
