//! The search engine: settings resolution, group expansion, frontier
//! deduplication, the solution pool, and the time-sliced run controller.

pub mod constants;
mod controller;
mod errors;
mod expand;
mod frontier;
mod group;
mod pool;
mod settings;
mod snapshot;

pub use controller::{RunController, StepOutcome};
pub use errors::SettingsError;
pub use expand::evolve_group;
pub use frontier::Frontier;
pub use group::Group;
pub use pool::SolutionPool;
pub use settings::{Options, SearchOrder, Settings, build_settings};
pub use snapshot::{FormulaTextMap, Snapshot};

#[cfg(test)]
mod tests;
