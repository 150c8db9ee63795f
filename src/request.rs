//! Request object (spec §6 "Request object — recognized options").

use chrono::NaiveDate;
use hashbrown::HashSet;

use crate::error::RaptorError;
use crate::model::{AccessTable, Mode, StopId, Time};

/// One search request: a departure window, a source access table, and the
/// knobs spec §6 names.
///
/// Validation (spec §7.1 "configuration errors") happens once, up front, in
/// [`Request::validate`] — mirroring the teacher's
/// `validate_raptor_inputs`, which runs before any round-state is
/// allocated.
#[derive(Debug, Clone)]
pub struct Request {
    pub access: AccessTable,
    /// Half-open departure window `[from_time, to_time)`, seconds of day.
    pub from_time: Time,
    pub to_time: Time,
    pub date: NaiveDate,
    pub max_rides: i32,
    pub max_trip_duration_minutes: i32,
    pub max_walk_minutes: i32,
    pub walk_speed_m_per_s: f64,
    pub transit_modes: HashSet<Mode>,
    pub monte_carlo_draws_per_minute: u32,
    pub retain_paths: bool,
    /// Seed for deterministic Monte Carlo frequency-phase draws (design
    /// note: "callers needing reproducibility pass the seed in the
    /// request").
    pub seed: u64,
}

impl Request {
    pub fn validate(&self) -> Result<(), RaptorError> {
        if self.to_time <= self.from_time {
            return Err(RaptorError::InvalidRequest(
                "to_time must be greater than from_time".into(),
            ));
        }
        if self.max_rides < 0 {
            return Err(RaptorError::InvalidRequest("max_rides must be >= 0".into()));
        }
        if self.max_trip_duration_minutes < 0 {
            return Err(RaptorError::InvalidRequest(
                "max_trip_duration_minutes must be >= 0".into(),
            ));
        }
        if self.max_walk_minutes < 0 {
            return Err(RaptorError::InvalidRequest(
                "max_walk_minutes must be >= 0".into(),
            ));
        }
        if self.walk_speed_m_per_s <= 0.0 {
            return Err(RaptorError::InvalidRequest(
                "walk_speed_m_per_s must be > 0".into(),
            ));
        }
        if self.monte_carlo_draws_per_minute == 0 {
            return Err(RaptorError::InvalidRequest(
                "monte_carlo_draws_per_minute must be >= 1".into(),
            ));
        }
        if self.transit_modes.is_empty() {
            return Err(RaptorError::InvalidRequest(
                "transit_modes must not be empty".into(),
            ));
        }
        Ok(())
    }

    #[must_use]
    pub fn max_rounds(&self) -> usize {
        self.max_rides as usize + 1
    }

    #[must_use]
    pub fn max_duration_seconds(&self) -> Time {
        self.max_trip_duration_minutes.saturating_mul(60)
    }

    #[must_use]
    pub fn max_walk_seconds(&self) -> Time {
        self.max_walk_minutes.saturating_mul(60)
    }

    pub(crate) fn access_stops(&self) -> impl Iterator<Item = (StopId, Time)> + '_ {
        self.access.iter()
    }
}
