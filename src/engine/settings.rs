use log::debug;

use crate::engine::constants::{DEFAULT_DISPLAY_LIMIT, DEFAULT_SEEN_LIMIT, DEFAULT_VALUE_LIMIT};
use crate::engine::errors::SettingsError;
use crate::operators::{GROUPING_SYMBOL, Operator, operators_for_symbol, symbol_is_known};

/// Traversal order of the frontier. Breadth-first finds shallow formulas
/// sooner at the cost of a much larger queue; depth-first keeps the queue
/// small. Either way the same groups are eventually expanded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchOrder {
    BreadthFirst,
    #[default]
    DepthFirst,
}

/// Caller-facing options for one run.
#[derive(Debug, Clone)]
pub struct Options {
    pub digit_string: String,
    pub use_all_digits: bool,
    pub preserve_order: bool,
    pub symbols: Vec<String>,
    // Display
    pub display_limit: i64,
    pub heartbeat_seconds: f64,
    // Internals
    pub value_limit: f64,
    pub search_order: SearchOrder,
    pub seen_limit: usize,
    // Timing
    pub yield_seconds: f64,
    pub max_duration_seconds: f64,
    pub min_heartbeats: u64,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            digit_string: String::new(),
            use_all_digits: true,
            preserve_order: false,
            symbols: [GROUPING_SYMBOL, "+", "-", "×", "÷", "&", "!", "^"]
                .iter()
                .map(|s| (*s).to_string())
                .collect(),
            display_limit: DEFAULT_DISPLAY_LIMIT,
            heartbeat_seconds: 1.0,
            value_limit: DEFAULT_VALUE_LIMIT,
            search_order: SearchOrder::default(),
            seen_limit: DEFAULT_SEEN_LIMIT,
            yield_seconds: 2.0,
            max_duration_seconds: 10.0,
            min_heartbeats: 1,
        }
    }
}

/// Resolved, immutable-for-the-run configuration: digit string converted to
/// digits, symbols resolved to operator references, seconds to millisecond
/// windows. Threaded explicitly through every engine call.
#[derive(Debug, Clone)]
pub struct Settings {
    pub digits: Vec<u8>,
    pub digit_counts: [usize; 10],
    pub use_all_digits: bool,
    pub preserve_order: bool,
    pub allow_parens: bool,
    pub value_limit: f64,
    pub search_order: SearchOrder,
    pub seen_limit: usize,
    pub heartbeat_ms: u64,
    pub yield_ms: u64,
    pub max_duration_ms: u64,
    pub min_heartbeats: u64,
    pub unary_operators: Vec<&'static Operator>,
    pub binary_operators: Vec<&'static Operator>,
}

/// Resolve options into run settings.
///
/// # Errors
///
/// Rejects an empty or non-numeric digit string, an unrecognised operator
/// symbol, and non-positive timing windows.
pub fn build_settings(options: &Options) -> Result<Settings, SettingsError> {
    if options.digit_string.is_empty() {
        return Err(SettingsError::EmptyDigitString);
    }
    let digits: Vec<u8> = options
        .digit_string
        .chars()
        .map(|c| {
            c.to_digit(10)
                .map(|d| d as u8)
                .ok_or_else(|| SettingsError::InvalidDigitString(options.digit_string.clone()))
        })
        .collect::<Result<_, _>>()?;

    for symbol in &options.symbols {
        if !symbol_is_known(symbol) {
            return Err(SettingsError::UnknownSymbol(symbol.clone()));
        }
    }
    // windows are compared in whole milliseconds, so anything that truncates
    // to zero is unusable
    let heartbeat_ms = (options.heartbeat_seconds * 1000.0) as u64;
    let yield_ms = (options.yield_seconds * 1000.0) as u64;
    if heartbeat_ms == 0 || yield_ms == 0 {
        return Err(SettingsError::InvalidTiming);
    }

    let active: Vec<&'static Operator> = options
        .symbols
        .iter()
        .flat_map(|symbol| operators_for_symbol(symbol))
        .collect();
    let mut digit_counts = [0usize; 10];
    for digit in &digits {
        digit_counts[usize::from(*digit)] += 1;
    }

    let settings = Settings {
        digit_counts,
        digits,
        use_all_digits: options.use_all_digits,
        // preserving order only makes sense if all digits must be used
        preserve_order: options.preserve_order && options.use_all_digits,
        allow_parens: options.symbols.iter().any(|s| s == GROUPING_SYMBOL),
        value_limit: options.value_limit,
        search_order: options.search_order,
        seen_limit: options.seen_limit,
        heartbeat_ms,
        yield_ms,
        max_duration_ms: (options.max_duration_seconds * 1000.0) as u64,
        min_heartbeats: options.min_heartbeats,
        unary_operators: active.iter().copied().filter(|op| op.is_unary()).collect(),
        binary_operators: active.iter().copied().filter(|op| op.is_binary()).collect(),
    };
    debug!(
        "Resolved settings: {} digits, {} unary + {} binary operators",
        settings.digits.len(),
        settings.unary_operators.len(),
        settings.binary_operators.len()
    );
    Ok(settings)
}
