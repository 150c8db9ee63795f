//! Multi-criteria Pareto variant (spec component **C11**).
//!
//! An alternate entry point that keeps, per stop, every label not
//! dominated by another on `(arrivalTime, numTransfers, totalWait,
//! totalInVehicle)` instead of a single scalar best. Shares the boarding
//! search (§4.4, unchanged) and the same touched-pattern scan skeleton as
//! the scalar scheduled round (C5), and shares transfer relaxation (C6) as
//! its own Pareto-aware step; only the relax step's internals change, from
//! a strict-improvement scalar check to a dominance check against a set of
//! labels.
//!
//! Boarding here uses each touched stop's earliest-arrival label to decide
//! what trip to catch, rather than branching the scan once per surviving
//! label — a full McRAPTOR would explore every label at a touched stop
//! independently. That fuller exploration is not built here; see
//! `DESIGN.md` for the trade-off.

use fixedbitset::FixedBitSet;
use hashbrown::HashSet;

use crate::constants::{BOARD_SLACK, UNREACHED};
use crate::error::RaptorError;
use crate::model::{Network, PatternId, ServiceId, StopId, Time, TransfersTable};
use crate::request::Request;

use super::boarding::find_boardable_trip;
use super::prefilter::PatternPrefilter;

/// One Pareto-optimal arrival at a stop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Label {
    pub arrival_time: Time,
    pub num_transfers: u32,
    pub total_wait: Time,
    pub total_in_vehicle: Time,
}

impl Label {
    /// `self` dominates `other` iff it is at least as good on every
    /// criterion and strictly better on at least one.
    #[must_use]
    pub fn dominates(&self, other: &Label) -> bool {
        let weakly_better = self.arrival_time <= other.arrival_time
            && self.num_transfers <= other.num_transfers
            && self.total_wait <= other.total_wait
            && self.total_in_vehicle <= other.total_in_vehicle;
        let strictly_better = self.arrival_time < other.arrival_time
            || self.num_transfers < other.num_transfers
            || self.total_wait < other.total_wait
            || self.total_in_vehicle < other.total_in_vehicle;
        weakly_better && strictly_better
    }
}

#[derive(Debug, Clone, Default)]
pub struct ParetoFront {
    labels: Vec<Label>,
}

impl ParetoFront {
    /// Insert `candidate` if no existing label dominates it, pruning any
    /// labels `candidate` in turn dominates. Returns whether it was kept.
    pub fn try_insert(&mut self, candidate: Label) -> bool {
        if self.labels.iter().any(|existing| existing.dominates(&candidate)) {
            return false;
        }
        self.labels.retain(|existing| !candidate.dominates(existing));
        self.labels.push(candidate);
        true
    }

    #[must_use]
    pub fn labels(&self) -> &[Label] {
        &self.labels
    }

    #[must_use]
    pub fn best_arrival(&self) -> Time {
        self.labels.iter().map(|l| l.arrival_time).min().unwrap_or(UNREACHED)
    }

    fn earliest(&self) -> Option<Label> {
        self.labels.iter().copied().min_by_key(|l| l.arrival_time)
    }
}

/// Per-round Pareto fronts, one per stop.
///
/// Like [`super::state::RoundState`], a stop's reach is split into two
/// tracks: `transit_fronts` holds only labels reached by riding a vehicle
/// this round (the Pareto analogue of `best_non_transfer_times`, and the
/// source set transfer relaxation reads from), while `fronts` holds the
/// overall Pareto set including anything reached by a trailing transfer
/// (the analogue of `best_times`).
#[derive(Debug, Clone)]
pub struct MultiCriteriaRound {
    fronts: Vec<ParetoFront>,
    transit_fronts: Vec<ParetoFront>,
    touched: FixedBitSet,
    transit_touched: FixedBitSet,
}

impl MultiCriteriaRound {
    #[must_use]
    pub fn new(num_stops: usize) -> Self {
        MultiCriteriaRound {
            fronts: vec![ParetoFront::default(); num_stops],
            transit_fronts: vec![ParetoFront::default(); num_stops],
            touched: FixedBitSet::with_capacity(num_stops),
            transit_touched: FixedBitSet::with_capacity(num_stops),
        }
    }

    pub fn clear_touched(&mut self) {
        self.touched.clear();
        self.transit_touched.clear();
    }

    /// Seed an access-walk arrival into the overall front only — like
    /// [`super::state::RoundState::set_initial_time`], an access walk is
    /// neither a ride nor a transfer, so it never touches `transit_fronts`.
    pub fn seed_access(&mut self, stop: StopId, arrival_time: Time) {
        self.fronts[stop].try_insert(Label {
            arrival_time,
            num_transfers: 0,
            total_wait: 0,
            total_in_vehicle: 0,
        });
        self.touched.set(stop, true);
    }

    #[must_use]
    pub fn front(&self, stop: StopId) -> &ParetoFront {
        &self.fronts[stop]
    }

    /// Inherit every label from `other` (typically round `k - 1`), the
    /// Pareto analogue of [`super::state::RoundState::min`].
    pub fn inherit(&mut self, other: &MultiCriteriaRound) {
        for stop in 0..self.fronts.len() {
            for &label in other.transit_fronts[stop].labels() {
                self.transit_fronts[stop].try_insert(label);
            }
            for &label in other.fronts[stop].labels() {
                if self.fronts[stop].try_insert(label) {
                    self.touched.set(stop, true);
                }
            }
        }
    }
}

fn is_active(service_code: ServiceId, active_services: &[ServiceId]) -> bool {
    active_services.contains(&service_code)
}

fn touched_patterns(network: &Network, prev_touched: &FixedBitSet, prefilter: &PatternPrefilter) -> Vec<PatternId> {
    let mut set = HashSet::new();
    for stop in prev_touched.ones() {
        for &pattern_id in network.patterns_for_stop(stop) {
            if prefilter.is_scheduled_today(pattern_id) {
                set.insert(pattern_id);
            }
        }
    }
    let mut patterns: Vec<_> = set.into_iter().collect();
    patterns.sort_unstable();
    patterns
}

/// Run one Pareto round over scheduled patterns, from `prev` (round
/// `k - 1`, already inherited into `curr` via [`MultiCriteriaRound::inherit`])
/// into `curr`.
pub fn run_multicriteria_round(
    network: &Network,
    active_services: &[ServiceId],
    prefilter: &PatternPrefilter,
    prev: &MultiCriteriaRound,
    curr: &mut MultiCriteriaRound,
    num_transfers_so_far: u32,
    max_allowed_time: Time,
) {
    for pattern_id in touched_patterns(network, &prev.touched, prefilter) {
        let pattern = &network.patterns[pattern_id];
        if !pattern.has_schedules() {
            continue;
        }
        walk_pattern_pareto(
            pattern_id,
            &pattern.stops,
            &pattern.scheduled_trips,
            active_services,
            prev,
            curr,
            num_transfers_so_far,
            max_allowed_time,
        );
    }
}

#[allow(clippy::too_many_arguments)]
fn walk_pattern_pareto(
    _pattern_id: PatternId,
    stops: &[StopId],
    scheduled_trips: &[crate::model::TripSchedule],
    active_services: &[ServiceId],
    prev: &MultiCriteriaRound,
    curr: &mut MultiCriteriaRound,
    num_transfers_so_far: u32,
    max_allowed_time: Time,
) {
    let mut on_trip: Option<usize> = None;
    let mut board_time: Time = 0;
    let mut wait_so_far: Time = 0;
    let mut in_vehicle_base: Time = 0;

    for (pos, &stop) in stops.iter().enumerate() {
        if let Some(trip_idx) = on_trip {
            let trip = &scheduled_trips[trip_idx];
            let alight_time = trip.arrivals[pos];
            if alight_time <= max_allowed_time {
                let candidate = Label {
                    arrival_time: alight_time,
                    num_transfers: num_transfers_so_far,
                    total_wait: wait_so_far,
                    total_in_vehicle: in_vehicle_base + (alight_time - board_time),
                };
                if curr.transit_fronts[stop].try_insert(candidate) {
                    curr.transit_touched.set(stop, true);
                    if curr.fronts[stop].try_insert(candidate) {
                        curr.touched.set(stop, true);
                    }
                }
            }
        }

        if !prev.touched.contains(stop) {
            continue;
        }
        // Boarding eligibility uses the overall earliest arrival (a
        // transfer may have reached this stop faster than any ride did),
        // matching `RoundState::best_time` being read for the same
        // purpose in the scalar scheduled round.
        let Some(overall_best) = prev.fronts[stop].earliest() else {
            continue;
        };
        let earliest_board_time = overall_best.arrival_time + BOARD_SLACK;
        let upper_bound = on_trip.unwrap_or(scheduled_trips.len());
        if let Some(new_idx) = find_boardable_trip(scheduled_trips, pos, upper_bound, earliest_board_time, |t| {
            is_active(t.service_code, active_services)
        }) {
            let new_trip = &scheduled_trips[new_idx];
            // Wait/in-vehicle accumulation carries only through rides, so
            // its base comes from the transit track, not the (possibly
            // transfer-improved) overall arrival used above.
            let transit_base = prev.transit_fronts[stop].earliest();
            on_trip = Some(new_idx);
            board_time = new_trip.departures[pos];
            wait_so_far =
                transit_base.map_or(0, |label| label.total_wait) + (board_time - overall_best.arrival_time);
            in_vehicle_base = transit_base.map_or(0, |label| label.total_in_vehicle);
        }
    }
}

/// Transfer relaxation for the Pareto round (C6), extending every label
/// reached this round by riding a vehicle (`transit_fronts`) across each
/// outgoing transfer, mirroring [`super::transfers::relax_transfers`].
pub fn relax_transfers_pareto(
    network: &Network,
    round: &mut MultiCriteriaRound,
    max_walk_seconds: Time,
    walk_speed_m_per_s: f64,
    max_allowed_time: Time,
) {
    let sources: Vec<_> = round.transit_touched.ones().collect();
    for source in sources {
        let source_labels = round.transit_fronts[source].labels().to_vec();
        for transfer in network.transfers_for_stop(source) {
            let walk_time = TransfersTable::walk_time(transfer, walk_speed_m_per_s);
            if walk_time > max_walk_seconds {
                continue;
            }
            for label in &source_labels {
                let arrival_time = label.arrival_time.saturating_add(walk_time);
                if arrival_time > max_allowed_time {
                    continue;
                }
                let candidate = Label { arrival_time, ..*label };
                if round.fronts[transfer.target_stop].try_insert(candidate) {
                    round.touched.set(transfer.target_stop, true);
                }
            }
        }
    }
}

/// Multi-criteria alternate entry point (spec §2, §4.9): a single-shot
/// search from `request.from_time` that keeps Pareto-optimal
/// `(arrivalTime, numTransfers, totalWait, totalInVehicle)` labels per stop
/// instead of a scalar best, sharing C3 (round state shape), C4 (boarding
/// search), C5 (pattern walk skeleton), and C6 (transfer relaxation) with
/// the scalar search. Unlike [`super::minute_driver::Search`], this does
/// not range-sweep a departure window — "alternate entry point" in the
/// spec's component table means an alternative to the scalar round loop
/// for a single departure, not an alternative range-RAPTOR driver.
pub struct MultiCriteriaSearch<'a> {
    network: &'a Network,
    request: &'a Request,
    prefilter: PatternPrefilter,
    rounds: Vec<MultiCriteriaRound>,
}

impl<'a> MultiCriteriaSearch<'a> {
    pub fn new(network: &'a Network, request: &'a Request) -> Result<Self, RaptorError> {
        request.validate()?;
        for (stop, _) in request.access_stops() {
            network.validate_stop(stop)?;
        }

        let prefilter = PatternPrefilter::build(network, request);
        let rounds = (0..request.max_rounds())
            .map(|_| MultiCriteriaRound::new(network.stop_count()))
            .collect();

        Ok(MultiCriteriaSearch {
            network,
            request,
            prefilter,
            rounds,
        })
    }

    /// Run every round once from `request.from_time`, returning the final
    /// round's per-stop Pareto front.
    pub fn run(&mut self) -> Vec<ParetoFront> {
        let active_services = self.network.active_services(self.request.date);
        let departure_time = self.request.from_time;
        let max_allowed = departure_time.saturating_add(self.request.max_duration_seconds());

        for (stop, walk_time) in self.request.access_stops() {
            self.rounds[0].seed_access(stop, departure_time.saturating_add(walk_time));
        }

        for k in 1..self.rounds.len() {
            let (before, after) = self.rounds.split_at_mut(k);
            let prev = &before[k - 1];
            let curr = &mut after[0];
            curr.inherit(prev);
            run_multicriteria_round(
                self.network,
                active_services,
                &self.prefilter,
                prev,
                curr,
                (k - 1) as u32,
                max_allowed,
            );
            relax_transfers_pareto(
                self.network,
                curr,
                self.request.max_walk_seconds(),
                self.request.walk_speed_m_per_s,
                max_allowed,
            );
        }

        self.rounds
            .last()
            .expect("at least round 0 always exists")
            .fronts
            .clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use hashbrown::{HashMap, HashSet as StdHashSet};

    use crate::model::{AccessTable, Mode, Network, Transfer, TripPattern, TripSchedule};

    #[test]
    fn equal_arrival_fewer_transfers_dominates() {
        let fast_but_many = Label {
            arrival_time: 100,
            num_transfers: 2,
            total_wait: 10,
            total_in_vehicle: 50,
        };
        let same_arrival_fewer = Label {
            arrival_time: 100,
            num_transfers: 1,
            total_wait: 10,
            total_in_vehicle: 50,
        };
        assert!(same_arrival_fewer.dominates(&fast_but_many));
        assert!(!fast_but_many.dominates(&same_arrival_fewer));
    }

    #[test]
    fn incomparable_labels_both_survive() {
        let mut front = ParetoFront::default();
        let earlier_more_transfers = Label {
            arrival_time: 100,
            num_transfers: 2,
            total_wait: 0,
            total_in_vehicle: 0,
        };
        let later_fewer_transfers = Label {
            arrival_time: 200,
            num_transfers: 1,
            total_wait: 0,
            total_in_vehicle: 0,
        };
        assert!(front.try_insert(earlier_more_transfers));
        assert!(front.try_insert(later_fewer_transfers));
        assert_eq!(front.labels().len(), 2);
    }

    #[test]
    fn dominated_candidate_is_rejected() {
        let mut front = ParetoFront::default();
        front.try_insert(Label {
            arrival_time: 100,
            num_transfers: 1,
            total_wait: 0,
            total_in_vehicle: 0,
        });
        let dominated = Label {
            arrival_time: 150,
            num_transfers: 2,
            total_wait: 0,
            total_in_vehicle: 0,
        };
        assert!(!front.try_insert(dominated));
        assert_eq!(front.labels().len(), 1);
    }

    fn service_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 7, 31).unwrap()
    }

    #[test]
    fn transfer_after_ride_is_reachable() {
        // Mirrors the S2 scalar scenario: a ride from A to B, then a 120 s
        // transfer B -> C, must appear in C's Pareto front.
        let pattern = TripPattern {
            stops: vec![0, 1],
            scheduled_trips: vec![TripSchedule {
                arrivals: vec![i32::MIN, 900],
                departures: vec![300, i32::MIN],
                service_code: 0,
                frequency: None,
            }],
            frequency_trips: Vec::new(),
            mode: Mode::Bus,
            route_index: 0,
        };
        let transfers = TransfersTable::from_adjacency(vec![
            Vec::new(),
            vec![Transfer {
                target_stop: 2,
                distance_millimeters: 120_000,
            }],
            Vec::new(),
        ]);
        let mut calendar = HashMap::new();
        calendar.insert(service_date(), vec![0]);
        let network = Network::new(vec![pattern], transfers, 3, calendar);

        let request = Request {
            access: AccessTable::from_pairs([(0, 60)]),
            from_time: 0,
            to_time: 60,
            date: service_date(),
            max_rides: 1,
            max_trip_duration_minutes: 1440,
            max_walk_minutes: 30,
            walk_speed_m_per_s: 1.0,
            transit_modes: StdHashSet::from([Mode::Bus]),
            monte_carlo_draws_per_minute: 1,
            retain_paths: false,
            seed: 1,
        };

        let mut search = MultiCriteriaSearch::new(&network, &request).unwrap();
        let fronts = search.run();

        assert_eq!(fronts[2].best_arrival(), 1020);
    }
}
