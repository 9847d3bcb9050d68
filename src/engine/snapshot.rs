use std::collections::{BTreeMap, BTreeSet};

/// Rendered solution texts keyed by value.
pub type FormulaTextMap = BTreeMap<i64, String>;

/// Point-in-time progress report for a run. `formula_map` is only attached
/// on milestone and final snapshots to limit message size.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub run_id: u64,
    // current
    pub queue_size: usize,
    pub cache_size: usize,
    // progress
    pub processing_time_ms: u64,
    pub queued_total: u64,
    pub cache_hit_total: u64,
    pub processed_total: u64,
    pub solution_count: usize,
    pub solutions: BTreeSet<i64>,
    pub formula_map: Option<FormulaTextMap>,
}
