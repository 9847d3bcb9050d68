use thiserror::Error;

/// Validation failures when resolving caller options into run settings.
/// These are reported at `start` and leave the engine idle; a corrected
/// `start` is accepted afterwards.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SettingsError {
    #[error("digit string cannot be empty")]
    EmptyDigitString,
    #[error("digit string must contain only digits: {0}")]
    InvalidDigitString(String),
    #[error("unknown operator symbol: {0}")]
    UnknownSymbol(String),
    #[error("heartbeat and yield intervals must be at least one millisecond")]
    InvalidTiming,
}
