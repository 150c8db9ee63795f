//! Read-only transit network view (spec component **C1**).
//!
//! `Network` is the query surface the routing code runs against: patterns,
//! which patterns touch which stop, transfers out of a stop, and which
//! service codes run on a given date. Building one (from GTFS, from a test
//! fixture, from anything) is explicitly out of scope here — the engine
//! only consumes the finished view (spec §1, §6).

use chrono::NaiveDate;
use hashbrown::HashMap;

use super::pattern::TripPattern;
use super::transfers::{Transfer, TransfersTable};
use super::{PatternId, ServiceId, StopId};
use crate::error::RaptorError;

#[derive(Debug, Clone, Default)]
pub struct Network {
    pub patterns: Vec<TripPattern>,
    pub transfers: TransfersTable,
    stop_count: usize,
    patterns_for_stop: Vec<Vec<PatternId>>,
    service_calendar: HashMap<NaiveDate, Vec<ServiceId>>,
}

impl Network {
    /// Build a network view from its loaded parts.
    ///
    /// `patterns_for_stop` is derived here rather than demanded of the
    /// caller, the way `ferrobus_core::PublicTransitData` derives
    /// `stop_routes` during model construction rather than asking every
    /// loader to hand-build the reverse index.
    #[must_use]
    pub fn new(
        patterns: Vec<TripPattern>,
        transfers: TransfersTable,
        stop_count: usize,
        service_calendar: HashMap<NaiveDate, Vec<ServiceId>>,
    ) -> Self {
        let mut patterns_for_stop = vec![Vec::new(); stop_count];
        for (pattern_id, pattern) in patterns.iter().enumerate() {
            for &stop in &pattern.stops {
                if stop < stop_count {
                    patterns_for_stop[stop].push(pattern_id);
                }
            }
        }
        for stops in &mut patterns_for_stop {
            stops.dedup();
        }

        Network {
            patterns,
            transfers,
            stop_count,
            patterns_for_stop,
            service_calendar,
        }
    }

    #[must_use]
    pub fn stop_count(&self) -> usize {
        self.stop_count
    }

    pub fn validate_stop(&self, stop: StopId) -> Result<(), RaptorError> {
        if stop >= self.stop_count {
            Err(RaptorError::InvalidStop)
        } else {
            Ok(())
        }
    }

    pub fn pattern(&self, pattern_id: PatternId) -> Result<&TripPattern, RaptorError> {
        self.patterns.get(pattern_id).ok_or(RaptorError::InvalidPattern)
    }

    #[must_use]
    pub fn patterns_for_stop(&self, stop: StopId) -> &[PatternId] {
        self.patterns_for_stop
            .get(stop)
            .map_or(&[], Vec::as_slice)
    }

    #[must_use]
    pub fn transfers_for_stop(&self, stop: StopId) -> &[Transfer] {
        self.transfers.for_stop(stop)
    }

    /// Service codes active on `date`. An unlisted date has no active
    /// services rather than being an error — the caller asked for an
    /// out-of-calendar-range date, which simply reaches nothing.
    #[must_use]
    pub fn active_services(&self, date: NaiveDate) -> &[ServiceId] {
        self.service_calendar.get(&date).map_or(&[], Vec::as_slice)
    }
}
