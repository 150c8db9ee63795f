//! Round state vector (spec component **C3**).
//!
//! One `RoundState` holds round `k`'s arrival table plus enough provenance
//! to reconstruct a path later (§4.8). The array of `RoundState`s for a
//! search is *not* reallocated between departure minutes — range-RAPTOR
//! (§4.5) relies on a later (larger) minute's results surviving as an
//! upper bound while an earlier minute's scan only tightens them. Per the
//! teacher's own design note on cyclic round references
//! (`ferrobus_core::routing::raptor::common::state::RaptorState`, where
//! `previous` is implicit — round `k - 1` is just `rounds[k - 1]` in the
//! owning `Vec`), a round never owns a pointer to its predecessor; callers
//! index by round number instead.

use fixedbitset::FixedBitSet;

use crate::constants::UNREACHED;
use crate::model::{PatternId, StopId, Time};

/// Provenance for a stop's `best_non_transfer_times` entry — the boarding
/// chain of the vehicle that delivered the best alighting time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransitProvenance {
    pub pattern: PatternId,
    pub trip: usize,
    pub from_stop: StopId,
    pub board_time: Time,
}

/// Provenance for a stop's `best_times` entry when it was reached by a
/// transfer rather than directly off a vehicle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransferProvenance {
    pub from_stop: StopId,
    pub transfer_time: Time,
}

#[derive(Debug, Clone)]
pub struct RoundState {
    pub departure_time: Time,

    best_times: Vec<Time>,
    best_non_transfer_times: Vec<Time>,
    transit_provenance: Vec<Option<TransitProvenance>>,
    /// `Some` iff `best_times[s]` is currently the result of a transfer
    /// (spec: `transferStop[s] != -1`).
    transfer_provenance: Vec<Option<TransferProvenance>>,
    non_transfer_wait_time: Vec<Time>,
    non_transfer_in_vehicle_travel_time: Vec<Time>,

    pub best_stops_touched: FixedBitSet,
    pub non_transfer_stops_touched: FixedBitSet,
    pub stop_times_improved: FixedBitSet,
}

impl RoundState {
    #[must_use]
    pub fn new(num_stops: usize) -> Self {
        RoundState {
            departure_time: 0,
            best_times: vec![UNREACHED; num_stops],
            best_non_transfer_times: vec![UNREACHED; num_stops],
            transit_provenance: vec![None; num_stops],
            transfer_provenance: vec![None; num_stops],
            non_transfer_wait_time: vec![0; num_stops],
            non_transfer_in_vehicle_travel_time: vec![0; num_stops],
            best_stops_touched: FixedBitSet::with_capacity(num_stops),
            non_transfer_stops_touched: FixedBitSet::with_capacity(num_stops),
            stop_times_improved: FixedBitSet::with_capacity(num_stops),
        }
    }

    #[must_use]
    pub fn num_stops(&self) -> usize {
        self.best_times.len()
    }

    #[must_use]
    pub fn best_time(&self, stop: StopId) -> Time {
        self.best_times[stop]
    }

    #[must_use]
    pub fn best_times(&self) -> &[Time] {
        &self.best_times
    }

    #[must_use]
    pub fn best_non_transfer_times(&self) -> &[Time] {
        &self.best_non_transfer_times
    }

    #[must_use]
    pub fn best_non_transfer_time(&self, stop: StopId) -> Time {
        self.best_non_transfer_times[stop]
    }

    #[must_use]
    pub fn transit_provenance(&self, stop: StopId) -> Option<TransitProvenance> {
        self.transit_provenance[stop]
    }

    #[must_use]
    pub fn transfer_provenance(&self, stop: StopId) -> Option<TransferProvenance> {
        self.transfer_provenance[stop]
    }

    #[must_use]
    pub fn wait_time(&self, stop: StopId) -> Time {
        self.non_transfer_wait_time[stop]
    }

    #[must_use]
    pub fn in_vehicle_time(&self, stop: StopId) -> Time {
        self.non_transfer_in_vehicle_travel_time[stop]
    }

    /// Record the new departure minute. Wait-time bookkeeping stored
    /// against the *previous* departure time is corrected in place for the
    /// delta: with arrays persisting across minutes (not reallocated),
    /// moving to an earlier minute means any already-recorded wait was, in
    /// truth, longer by exactly the step between the two minutes.
    pub fn set_departure_time(&mut self, departure_time: Time) {
        let delta = self.departure_time - departure_time;
        if delta != 0 {
            for (i, wait) in self.non_transfer_wait_time.iter_mut().enumerate() {
                if self.best_non_transfer_times[i] != UNREACHED {
                    *wait += delta;
                }
            }
        }
        self.departure_time = departure_time;
    }

    pub fn clear_touched(&mut self) {
        self.best_stops_touched.clear();
        self.non_transfer_stops_touched.clear();
        self.stop_times_improved.clear();
    }

    /// Unconditional write used to seed access-walk arrivals into round 0
    /// at the start of every minute (spec §4.2 `setInitialTime`). Safe to
    /// be unconditional because departure time only ever decreases across
    /// the minute loop, so a freshly computed access arrival can never be
    /// worse than one persisted from a later (larger) departure minute.
    pub fn set_initial_time(&mut self, stop: StopId, time: Time) {
        self.best_times[stop] = time;
        self.best_stops_touched.set(stop, true);
    }

    /// Attempt to relax a transit (vehicle) arrival at `stop`.
    ///
    /// Updates `best_non_transfer_times` (always, since this is never a
    /// transfer) and `best_times` when each is a strict improvement, per
    /// spec §4.2. Returns `true` if anything changed. Times exceeding
    /// `max_allowed` are rejected outright.
    #[allow(clippy::too_many_arguments)]
    pub fn relax_transit(
        &mut self,
        stop: StopId,
        time: Time,
        pattern: PatternId,
        trip: usize,
        from_stop: StopId,
        board_time: Time,
        wait: Time,
        in_vehicle: Time,
        max_allowed: Time,
    ) -> bool {
        if time > max_allowed {
            return false;
        }
        if time < board_time {
            log::error!(
                "invariant violation: alight time {time} before board time {board_time} on pattern {pattern} trip {trip}"
            );
        }
        if wait + in_vehicle > time - self.departure_time {
            log::error!(
                "invariant violation: wait {wait} + in-vehicle {in_vehicle} exceeds total travel time {} at stop {stop}",
                time - self.departure_time
            );
        }
        let mut changed = false;

        if time < self.best_non_transfer_times[stop] {
            self.best_non_transfer_times[stop] = time;
            self.transit_provenance[stop] = Some(TransitProvenance {
                pattern,
                trip,
                from_stop,
                board_time,
            });
            self.non_transfer_wait_time[stop] = wait;
            self.non_transfer_in_vehicle_travel_time[stop] = in_vehicle;
            self.non_transfer_stops_touched.set(stop, true);
            changed = true;
        }
        if time < self.best_times[stop] {
            self.best_times[stop] = time;
            self.transfer_provenance[stop] = None;
            self.best_stops_touched.set(stop, true);
            changed = true;
        }
        if changed {
            self.stop_times_improved.set(stop, true);
        }
        changed
    }

    /// Attempt to relax a transfer arrival at `stop` (spec §4.6). Only
    /// `best_times`/`transfer_provenance` are touched — a transfer never
    /// counts as alighting from a vehicle.
    pub fn relax_transfer(
        &mut self,
        stop: StopId,
        time: Time,
        from_stop: StopId,
        transfer_time: Time,
        max_allowed: Time,
    ) -> bool {
        if time > max_allowed || time >= self.best_times[stop] {
            return false;
        }
        if transfer_time < 0 {
            log::error!("invariant violation: negative transfer time {transfer_time} from stop {from_stop}");
        }
        self.best_times[stop] = time;
        self.transfer_provenance[stop] = Some(TransferProvenance {
            from_stop,
            transfer_time,
        });
        self.best_stops_touched.set(stop, true);
        self.stop_times_improved.set(stop, true);
        true
    }

    /// Range-RAPTOR / round-monotonicity carry: fold `other`'s (typically
    /// round `k - 1`'s) improvements into `self` (round `k`), preferring
    /// `other` on ties since it represents a solution with fewer
    /// transfers. Wait-time bookkeeping is corrected for any
    /// departure-time delta between the two round states, so the method
    /// stays correct even when `other` was last updated on a different
    /// minute than `self`.
    pub fn min(&mut self, other: &RoundState) {
        let delta = other.departure_time - self.departure_time;
        for stop in 0..self.num_stops() {
            if other.best_non_transfer_times[stop] <= self.best_non_transfer_times[stop] {
                self.best_non_transfer_times[stop] = other.best_non_transfer_times[stop];
                self.transit_provenance[stop] = other.transit_provenance[stop];
                self.non_transfer_wait_time[stop] = other.non_transfer_wait_time[stop] + delta;
                self.non_transfer_in_vehicle_travel_time[stop] =
                    other.non_transfer_in_vehicle_travel_time[stop];
                if other.non_transfer_stops_touched.contains(stop) {
                    self.non_transfer_stops_touched.set(stop, true);
                }
            }
            if other.best_times[stop] <= self.best_times[stop] {
                self.best_times[stop] = other.best_times[stop];
                self.transfer_provenance[stop] = other.transfer_provenance[stop];
                if other.best_stops_touched.contains(stop) {
                    self.best_stops_touched.set(stop, true);
                }
            }
        }
    }

    /// Deep copy used only by Monte Carlo path retention (spec §4.2
    /// `deepCopy`): frequency sub-searches clone the whole round cheaply
    /// via plain `Clone`, since every field here is owned data.
    #[must_use]
    pub fn deep_copy(&self) -> Self {
        self.clone()
    }

    /// The pattern that most recently delivered `stop`'s arrival in this
    /// round, for the "no trivial re-ride" rule (invariant 5). Resolves
    /// the open question in spec §9: when `stop` was reached by a
    /// transfer, the check uses the *pre-transfer* stop's own transit
    /// provenance rather than the transfer itself (a transfer is never a
    /// pattern, so it has none). A transfer's source stop was necessarily
    /// reached directly off a vehicle within the same round — transfer
    /// relaxation only ever walks `non_transfer_stops_touched` — so one
    /// level of indirection is enough; no further recursion is possible.
    #[must_use]
    pub fn reached_via_pattern(&self, stop: StopId) -> Option<PatternId> {
        match self.transfer_provenance[stop] {
            Some(transfer) => self.transit_provenance[transfer.from_stop].map(|tp| tp.pattern),
            None => self.transit_provenance[stop].map(|tp| tp.pattern),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_initial_time_marks_touched_unconditionally() {
        let mut state = RoundState::new(3);
        state.set_initial_time(1, 500);
        assert_eq!(state.best_time(1), 500);
        assert!(state.best_stops_touched.contains(1));
        // best_non_transfer_times is untouched by an access arrival.
        assert_eq!(state.best_non_transfer_time(1), UNREACHED);
    }

    #[test]
    fn relax_transit_respects_strict_improvement() {
        let mut state = RoundState::new(2);
        assert!(state.relax_transit(0, 100, 0, 0, 0, 100, 0, 0, UNREACHED));
        assert!(!state.relax_transit(0, 100, 0, 0, 0, 100, 0, 0, UNREACHED));
        assert!(state.relax_transit(0, 90, 0, 1, 0, 90, 0, 0, UNREACHED));
        assert_eq!(state.best_non_transfer_time(0), 90);
    }

    #[test]
    fn relax_transfer_cannot_beat_a_tie() {
        let mut state = RoundState::new(2);
        state.relax_transit(0, 100, 0, 0, 0, 100, 0, 0, UNREACHED);
        assert!(!state.relax_transfer(0, 100, 1, 50, UNREACHED));
        assert!(state.relax_transfer(0, 99, 1, 49, UNREACHED));
    }

    #[test]
    fn max_duration_rejects_overlong_arrivals() {
        let mut state = RoundState::new(1);
        assert!(!state.relax_transit(0, 1000, 0, 0, 0, 1000, 0, 0, 500));
        assert_eq!(state.best_time(0), UNREACHED);
    }
}
