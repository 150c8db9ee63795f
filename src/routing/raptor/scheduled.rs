//! Scheduled round (spec component **C5**).
//!
//! One RAPTOR round over scheduled (non-frequency) patterns: determine the
//! touched-pattern set from round `k - 1`, then for each pattern walk its
//! stops in order, boarding, backing up to an earlier trip when a faster
//! arrival upstream allows it, and relaxing every downstream stop still on
//! the trip. Grounded in the teacher's `regular/default_raptor.rs` main
//! loop (queue of touched routes, per-stop board/alight walk) generalized
//! with a service calendar and the spec's explicit back-up step, which the
//! teacher's schedule-only network never needed.

use hashbrown::HashSet;

use crate::constants::BOARD_SLACK;
use crate::model::{Network, PatternId, ServiceId, StopId, Time, TripSchedule};

use super::boarding::find_boardable_trip;
use super::prefilter::PatternPrefilter;
use super::state::RoundState;

/// Union of patterns serving any stop touched in `prev`, excluding — per
/// stop — the pattern that stop was itself just reached by (spec §4.3
/// step 1), restricted to patterns scheduled today.
fn touched_patterns(network: &Network, prev: &RoundState, prefilter: &PatternPrefilter) -> Vec<PatternId> {
    let mut touched = HashSet::new();
    for stop in prev.best_stops_touched.ones() {
        let exclude = prev.reached_via_pattern(stop);
        for &pattern_id in network.patterns_for_stop(stop) {
            if !prefilter.is_scheduled_today(pattern_id) {
                continue;
            }
            if Some(pattern_id) == exclude {
                continue;
            }
            touched.insert(pattern_id);
        }
    }
    let mut touched: Vec<_> = touched.into_iter().collect();
    touched.sort_unstable();
    touched
}

fn is_active(trip: &TripSchedule, active_services: &[ServiceId]) -> bool {
    active_services.contains(&trip.service_code)
}

/// Run the scheduled round, reading round `k - 1` (`prev`) and writing
/// round `k` (`curr`). `curr` must already have inherited `prev` via
/// [`RoundState::min`] (spec §4.5 step 2b) before this is called.
pub fn run_scheduled_round(
    network: &Network,
    active_services: &[ServiceId],
    prefilter: &PatternPrefilter,
    prev: &RoundState,
    curr: &mut RoundState,
    max_allowed_time: Time,
) {
    for pattern_id in touched_patterns(network, prev, prefilter) {
        let pattern = network.patterns.get(pattern_id).expect("touched pattern id is in range");
        if !pattern.has_schedules() {
            continue;
        }
        walk_pattern(pattern_id, &pattern.stops, &pattern.scheduled_trips, active_services, prev, curr, max_allowed_time);
    }
}

#[allow(clippy::too_many_arguments)]
fn walk_pattern(
    pattern_id: PatternId,
    stops: &[StopId],
    scheduled_trips: &[TripSchedule],
    active_services: &[ServiceId],
    prev: &RoundState,
    curr: &mut RoundState,
    max_allowed_time: Time,
) {
    let mut on_trip: Option<usize> = None;
    let mut board_stop: StopId = 0;
    let mut board_time: Time = 0;
    let mut wait_so_far: Time = 0;
    let mut in_vehicle_base: Time = 0;

    for (pos, &stop) in stops.iter().enumerate() {
        if let Some(trip_idx) = on_trip {
            let trip = &scheduled_trips[trip_idx];
            let alight_time = trip.arrivals[pos];
            let in_vehicle = in_vehicle_base + (alight_time - board_time);
            curr.relax_transit(
                stop,
                alight_time,
                pattern_id,
                trip_idx,
                board_stop,
                board_time,
                wait_so_far,
                in_vehicle,
                max_allowed_time,
            );
        }

        if !prev.best_stops_touched.contains(stop) {
            continue;
        }
        // Invariant 5: never (re)board this exact pattern at the stop it
        // was itself just reached by, even though the pattern as a whole
        // stayed in scope via some other touched stop.
        if prev.reached_via_pattern(stop) == Some(pattern_id) {
            continue;
        }
        let earliest_board_time = prev.best_time(stop) + BOARD_SLACK;

        let upper_bound = on_trip.unwrap_or(scheduled_trips.len());
        let rebooked = find_boardable_trip(scheduled_trips, pos, upper_bound, earliest_board_time, |t| {
            is_active(t, active_services)
        });

        if let Some(new_idx) = rebooked {
            let new_trip = &scheduled_trips[new_idx];
            on_trip = Some(new_idx);
            board_stop = stop;
            board_time = new_trip.departures[pos];
            wait_so_far = prev.wait_time(stop) + (board_time - prev.best_time(stop));
            in_vehicle_base = prev.in_vehicle_time(stop);
        }
    }
}
