use thiserror::Error;

/// Errors the RAPTOR core can return.
///
/// Only configuration problems (spec §7.1) become `Err`s. Invariant
/// violations (§7.2) are logged and the search degrades instead of failing;
/// unreachable stops (§7.3) are not errors at all, just `UNREACHED` entries
/// in the output.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum RaptorError {
    #[error("invalid stop id")]
    InvalidStop,
    #[error("invalid pattern id")]
    InvalidPattern,
    #[error("invalid trip index")]
    InvalidTrip,
    #[error("invalid time value")]
    InvalidTime,
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

pub type RaptorResult<T> = Result<T, RaptorError>;
