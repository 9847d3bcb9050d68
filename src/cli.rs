use anyhow::{Context, Result, anyhow};
use clap::{Parser, ValueEnum};
use log::info;

use crate::engine::{FormulaTextMap, Options, SearchOrder, Snapshot};
use crate::worker::{Command, Event, SolverWorker, Status};

/// Log level for the application
#[derive(Debug, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn to_log_level_filter(&self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Everynumber - find the simplest formula for every number reachable from
/// a set of digits
#[derive(Parser, Debug)]
#[command(name = "everynumber")]
#[command(about = "Find the simplest arithmetic formula for every number reachable from a digit string")]
#[command(version)]
pub struct CliArgs {
    /// String of digits to build formulas from, e.g. 2026
    pub digit_string: String,

    /// Comma-separated operator symbols to allow ("( )" toggles bracketed solutions)
    #[arg(short, long, value_delimiter = ',')]
    pub symbols: Option<Vec<String>>,

    /// Accept formulas that use only some of the digits
    #[arg(long)]
    pub partial: bool,

    /// Only combine digits in their original order
    #[arg(long)]
    pub preserve_order: bool,

    /// Discard intermediate values with magnitude above this limit
    #[arg(long, default_value_t = 10_000.0)]
    pub value_limit: f64,

    /// Highest value to display in the results table
    #[arg(long, default_value_t = 100)]
    pub display_limit: i64,

    /// Pause the search after roughly this many seconds
    #[arg(long, default_value_t = 10.0)]
    pub max_seconds: f64,

    /// Expand the search breadth-first instead of depth-first
    #[arg(long)]
    pub breadth_first: bool,

    /// Log level (default: warn)
    #[arg(short, long, value_enum, default_value = "warn")]
    pub log_level: LogLevel,
}

impl CliArgs {
    fn to_options(&self) -> Options {
        let defaults = Options::default();
        Options {
            digit_string: self.digit_string.clone(),
            use_all_digits: !self.partial,
            preserve_order: self.preserve_order,
            symbols: self.symbols.clone().unwrap_or(defaults.symbols),
            value_limit: self.value_limit,
            display_limit: self.display_limit,
            max_duration_seconds: self.max_seconds,
            search_order: if self.breadth_first {
                SearchOrder::BreadthFirst
            } else {
                SearchOrder::DepthFirst
            },
            ..defaults
        }
    }
}

/// Initialize logging based on the provided log level
pub fn init_logging(log_level: &LogLevel) {
    env_logger::Builder::from_default_env()
        .filter_level(log_level.to_log_level_filter())
        .init();
}

/// Run the main application logic
pub fn run() -> Result<()> {
    let args = CliArgs::parse();
    init_logging(&args.log_level);
    let options = args.to_options();
    let display_limit = options.display_limit;

    let worker = SolverWorker::spawn().context("Failed to start solver")?;
    worker
        .send(Command::Start(options))
        .context("Failed to start solver")?;

    let mut final_snapshot: Option<Snapshot> = None;
    loop {
        let event = worker.events().recv().context("Solver stopped early")?;
        match event {
            Event::Message(text) => info!("{}", text),
            Event::ClearMessages => {}
            Event::Snapshot(snapshot) => {
                info!(
                    "{} groups processed, {} queued, {} solved, {} ms",
                    snapshot.processed_total,
                    snapshot.queue_size,
                    snapshot.solution_count,
                    snapshot.processing_time_ms
                );
                if snapshot.formula_map.is_some() {
                    final_snapshot = Some(snapshot);
                }
            }
            Event::Status(Status::Running) => {}
            // a budget pause is as far as a one-shot CLI run goes
            Event::Status(Status::Paused) => worker
                .send(Command::Stop)
                .context("Failed to stop solver")?,
            Event::Status(Status::Done | Status::Idle) => break,
        }
    }
    worker.shutdown();

    let snapshot = final_snapshot.ok_or_else(|| anyhow!("Solver produced no results"))?;
    let formulas = snapshot.formula_map.as_ref().ok_or_else(|| anyhow!("Solver produced no results"))?;
    print_results(formulas, &snapshot, display_limit);
    Ok(())
}

fn print_results(formulas: &FormulaTextMap, snapshot: &Snapshot, display_limit: i64) {
    let mut solved = 0i64;
    for (value, text) in formulas.range(0..=display_limit) {
        println!("{} = {}", value, text);
        solved += 1;
    }
    println!(
        "Solved {} of the values 0-{} ({} found in total) in {} ms after {} groups ({} cache hits)",
        solved,
        display_limit,
        formulas.len(),
        snapshot.processing_time_ms,
        snapshot.processed_total,
        snapshot.cache_hit_total
    );
}
