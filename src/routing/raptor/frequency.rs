//! Frequency offsets and the frequency round (spec components **C7**, **C8**).
//!
//! Headway-based service has no fixed departure to bisect on, so each
//! Monte Carlo sub-iteration draws a random phase per frequency entry
//! (C7) and the frequency round (C8) re-walks the frequency patterns with
//! those phases, overlaying results onto the scheduled round's upper
//! bound via the same `relax_transit` contract the scheduled round uses.
//!
//! The teacher's network is schedule-only and has no Monte Carlo concept;
//! this is grounded instead in `other_examples/ArupHonsGC24-raptor-rs`'s
//! `mcraptor` benchmark, which draws frequency phases from the `rand`
//! family per Monte Carlo iteration.

use hashbrown::HashMap;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::constants::BOARD_SLACK;
use crate::model::{Network, PatternId, ServiceId, StopId, Time};

use super::prefilter::PatternPrefilter;
use super::state::RoundState;

/// Random phases for one Monte Carlo sub-iteration, keyed by
/// `(pattern, trip index within frequency_trips, entry index within that
/// trip)` — a frequency entry's stable identity within the network (spec
/// §9: "derivable from a seed + frequency-entry id").
#[derive(Debug, Clone, Default)]
pub struct FrequencyOffsets {
    phases: HashMap<(PatternId, usize, usize), Time>,
}

impl FrequencyOffsets {
    /// Draw a fresh phase for every frequency entry in `prefilter`'s
    /// frequency-pattern subset, seeded deterministically from `seed` and
    /// `draw_index` (R1: identical seed ⇒ identical matrices).
    #[must_use]
    pub fn draw(network: &Network, prefilter: &PatternPrefilter, seed: u64, draw_index: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed.wrapping_add(draw_index.wrapping_mul(0x9E37_79B9_7F4A_7C15)));
        let mut phases = HashMap::new();
        for &pattern_id in &prefilter.frequency {
            let pattern = &network.patterns[pattern_id];
            for (trip_idx, trip) in pattern.frequency_trips.iter().enumerate() {
                if let Some(entry) = trip.frequency {
                    let headway = entry.headway_seconds.max(1);
                    let phase = rng.random_range(0..headway);
                    phases.insert((pattern_id, trip_idx, 0), phase);
                }
            }
        }
        FrequencyOffsets { phases }
    }

    fn phase(&self, pattern: PatternId, trip_idx: usize) -> Time {
        self.phases.get(&(pattern, trip_idx, 0)).copied().unwrap_or(0)
    }
}

fn is_active(service_code: ServiceId, active_services: &[ServiceId]) -> bool {
    active_services.contains(&service_code)
}

/// Effective departure at stop position `p` of a frequency trip whose
/// relative departure offset is `relative_departure[p]`, for a boarder
/// whose earliest board time is `earliest_board_time` (spec §4.7).
fn effective_departure(
    window_start: Time,
    window_end: Time,
    phase: Time,
    headway_seconds: Time,
    relative_departure: Time,
    earliest_board_time: Time,
) -> Option<Time> {
    let headway = headway_seconds.max(1);
    let since_window_phase = earliest_board_time - window_start - phase;
    let cycles = if since_window_phase <= 0 {
        0
    } else {
        (since_window_phase + headway - 1) / headway
    };
    let departure = window_start + phase + cycles * headway + relative_departure;
    if departure < window_start || departure > window_end {
        None
    } else {
        Some(departure)
    }
}

/// Run the frequency round, overlaying headway-based patterns onto
/// `curr` (already populated by the scheduled round + `min` carry) using
/// `offsets` for this Monte Carlo sub-iteration.
pub fn run_frequency_round(
    network: &Network,
    active_services: &[ServiceId],
    prefilter: &PatternPrefilter,
    offsets: &FrequencyOffsets,
    prev: &RoundState,
    curr: &mut RoundState,
    max_allowed_time: Time,
) {
    for &pattern_id in &prefilter.frequency {
        let pattern = &network.patterns[pattern_id];
        if !pattern.has_frequencies() {
            continue;
        }
        walk_frequency_pattern(pattern_id, pattern, active_services, offsets, prev, curr, max_allowed_time);
    }
}

#[allow(clippy::too_many_arguments)]
fn walk_frequency_pattern(
    pattern_id: PatternId,
    pattern: &crate::model::TripPattern,
    active_services: &[ServiceId],
    offsets: &FrequencyOffsets,
    prev: &RoundState,
    curr: &mut RoundState,
    max_allowed_time: Time,
) {
    for (trip_idx, trip) in pattern.frequency_trips.iter().enumerate() {
        if !is_active(trip.service_code, active_services) {
            continue;
        }
        let Some(entry) = trip.frequency else { continue };
        let phase = offsets.phase(pattern_id, trip_idx);

        let mut on_board: Option<(StopId, Time, Time, Time)> = None; // (board_stop, board_time, wait_so_far, in_vehicle_base)

        for (pos, &stop) in pattern.stops.iter().enumerate() {
            if let Some((board_stop, board_time, wait_so_far, in_vehicle_base)) = on_board {
                let relative_arrival = trip.arrivals[pos];
                let relative_departure_at_board = trip.departures[0];
                let alight_time = board_time + (relative_arrival - relative_departure_at_board);
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
            if prev.reached_via_pattern(stop) == Some(pattern_id) {
                continue;
            }
            let earliest_board_time = prev.best_time(stop) + BOARD_SLACK;
            if let Some(departure) = effective_departure(
                entry.start,
                entry.end,
                phase,
                entry.headway_seconds,
                trip.departures[pos],
                earliest_board_time,
            ) {
                on_board = Some((
                    stop,
                    departure,
                    prev.wait_time(stop) + (departure - prev.best_time(stop)),
                    prev.in_vehicle_time(stop),
                ));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn s5_boards_at_window_start_plus_phase() {
        // S5: window start 08:00 (=0s), headway 300s, phase 120s,
        // earliestBoardTime 08:01:30 (=90s). Expect board at 08:02 (=120s).
        let departure = effective_departure(0, 3600, 120, 300, 0, 90);
        assert_eq!(departure, Some(120));
    }

    #[test]
    fn s5_next_draw_with_zero_phase_boards_at_next_cycle() {
        let departure = effective_departure(0, 3600, 0, 300, 0, 90);
        assert_eq!(departure, Some(300));
    }

    #[test]
    fn departure_outside_window_is_rejected() {
        let departure = effective_departure(0, 200, 0, 300, 0, 90);
        assert_eq!(departure, None);
    }
}
