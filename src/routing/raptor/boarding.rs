//! Trip boarding search (spec component **C4**).
//!
//! A single routine serves both call sites in the scheduled round (§4.3):
//! the initial board (`upper_bound_exclusive == pattern.scheduled_trips.len()`,
//! search the whole trip list) and the "back up to an earlier trip" step
//! (`upper_bound_exclusive == currently-boarded trip index`). Both want the
//! earliest-departing trip below the bound that is still catchable.
//!
//! Grounded in the teacher's `find_earliest_trip` (binary search over a
//! trips-sorted-by-departure array, `ferrobus_core::routing::raptor::common::state`)
//! but hybridized per spec §4.4: below the threshold a branch-predictor-friendly
//! linear scan wins; above it, bisect first.

use crate::constants::TRIP_SEARCH_BINARY_THRESHOLD;
use crate::model::{Time, TripSchedule};

/// Half-width (in trips) of the window a binary search narrows to before
/// falling back to a linear scan, per spec §4.4 ("a window of width ≤ 10").
const BINARY_WINDOW_RADIUS: usize = 5;

/// Find the earliest-departing trip at `stop_pos` below `upper_bound_exclusive`
/// whose departure is strictly later than `earliest_board_time`, skipping
/// trips `is_active` rejects (inactive service today).
///
/// Returns `None` if no such trip exists.
pub fn find_boardable_trip(
    scheduled_trips: &[TripSchedule],
    stop_pos: usize,
    upper_bound_exclusive: usize,
    earliest_board_time: Time,
    is_active: impl Fn(&TripSchedule) -> bool,
) -> Option<usize> {
    if upper_bound_exclusive == 0 {
        return None;
    }
    if upper_bound_exclusive <= TRIP_SEARCH_BINARY_THRESHOLD {
        linear_backward_scan(
            scheduled_trips,
            stop_pos,
            upper_bound_exclusive,
            earliest_board_time,
            &is_active,
        )
    } else {
        binary_then_linear(
            scheduled_trips,
            stop_pos,
            upper_bound_exclusive,
            earliest_board_time,
            &is_active,
        )
    }
}

/// Scan from `upper_bound_exclusive - 1` down to `0`. The candidate is the
/// last-seen (i.e. smallest-index, earliest-departing) trip that passes
/// `is_active` and is still catchable; the scan ends the moment it meets a
/// passing trip that is *not* catchable (its departure fell to or below
/// `earliest_board_time`), since every earlier trip departs even sooner.
fn linear_backward_scan(
    scheduled_trips: &[TripSchedule],
    stop_pos: usize,
    upper_bound_exclusive: usize,
    earliest_board_time: Time,
    is_active: &impl Fn(&TripSchedule) -> bool,
) -> Option<usize> {
    let mut candidate = None;
    for idx in (0..upper_bound_exclusive).rev() {
        let trip = &scheduled_trips[idx];
        if !is_active(trip) {
            continue;
        }
        if trip.departures[stop_pos] <= earliest_board_time {
            break;
        }
        candidate = Some(idx);
    }
    candidate
}

/// Bisect on first-stop departure to land near `earliest_board_time`, then
/// linear-scan a bounded window around that point. Trips are only
/// guaranteed sorted by `departures[0]`, so the window may need extending
/// upward past its nominal end if the binary endpoint itself lands on a
/// trip `is_active` rejects (spec §4.4).
fn binary_then_linear(
    scheduled_trips: &[TripSchedule],
    stop_pos: usize,
    upper_bound_exclusive: usize,
    earliest_board_time: Time,
    is_active: &impl Fn(&TripSchedule) -> bool,
) -> Option<usize> {
    let trips = &scheduled_trips[..upper_bound_exclusive];

    let mut lo = 0usize;
    let mut hi = trips.len();
    while lo < hi {
        let mid = lo + (hi - lo) / 2;
        if trips[mid].departures[0] <= earliest_board_time {
            lo = mid + 1;
        } else {
            hi = mid;
        }
    }

    let window_start = lo.saturating_sub(BINARY_WINDOW_RADIUS);
    let mut idx = window_start;
    while idx < trips.len() {
        let trip = &trips[idx];
        if is_active(trip) && trip.departures[stop_pos] > earliest_board_time {
            return Some(idx);
        }
        idx += 1;
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Mode, TripPattern, TripSchedule};

    fn trip(dep: Time) -> TripSchedule {
        TripSchedule {
            arrivals: vec![dep + 600, dep + 1200],
            departures: vec![dep, dep + 600],
            service_code: 0,
            frequency: None,
        }
    }

    fn pattern_with_trips(deps: &[Time]) -> TripPattern {
        TripPattern {
            stops: vec![0, 1, 2],
            scheduled_trips: deps.iter().copied().map(trip).collect(),
            frequency_trips: Vec::new(),
            mode: Mode::Bus,
            route_index: 0,
        }
    }

    #[test]
    fn linear_scan_picks_earliest_catchable_trip() {
        let pattern = pattern_with_trips(&[100, 200, 300, 400]);
        let found = find_boardable_trip(&pattern.scheduled_trips, 0, 4, 150, |_| true);
        assert_eq!(found, Some(1));
    }

    #[test]
    fn linear_scan_honors_strict_inequality() {
        // S4: two trips dep 08:05 and 08:06 (here as small offsets), earliest_board_time
        // sits right at the first trip's departure; strict `>` must still pick it.
        let pattern = pattern_with_trips(&[300, 360]);
        let found = find_boardable_trip(&pattern.scheduled_trips, 0, 2, 299, |_| true);
        assert_eq!(found, Some(0));
    }

    #[test]
    fn inactive_trips_are_skipped() {
        let pattern = pattern_with_trips(&[100, 200, 300]);
        let found = find_boardable_trip(&pattern.scheduled_trips, 0, 3, 50, |t| t.departures[0] != 100);
        assert_eq!(found, Some(1));
    }

    #[test]
    fn binary_path_matches_linear_path() {
        let deps: Vec<Time> = (0..200).map(|i| i * 60).collect();
        let pattern = pattern_with_trips(&deps);
        let found = find_boardable_trip(&pattern.scheduled_trips, 0, 200, 1000, |_| true);
        assert_eq!(found, Some(17)); // first dep > 1000 is 1020 = 17*60
    }

    #[test]
    fn no_catchable_trip_returns_none() {
        let pattern = pattern_with_trips(&[100, 200]);
        assert_eq!(find_boardable_trip(&pattern.scheduled_trips, 0, 2, 500, |_| true), None);
    }
}
