// Tuning constants for the search engine
pub const GROUPS_PER_HEARTBEAT: usize = 100;
pub const DEFAULT_SEEN_LIMIT: usize = 1_000_000;
pub const DEFAULT_VALUE_LIMIT: f64 = 10_000.0;
pub const DEFAULT_DISPLAY_LIMIT: i64 = 100;
