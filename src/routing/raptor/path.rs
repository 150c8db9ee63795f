//! Path reconstruction (spec component **C10**).
//!
//! Walks provenance backward from the final round, emitting one leg per
//! step: a transfer leg stays in the same round, a ride leg steps down to
//! the previous round. Only meaningful when [`crate::Request::retain_paths`]
//! asked the driver to keep a minute's round-state snapshot around instead
//! of discarding it for the next minute.

use crate::model::{PatternId, StopId, Time};

use super::state::RoundState;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Leg {
    Transfer {
        from_stop: StopId,
        to_stop: StopId,
        transfer_time: Time,
    },
    Ride {
        pattern: PatternId,
        trip: usize,
        from_stop: StopId,
        to_stop: StopId,
        board_time: Time,
        alight_time: Time,
    },
}

/// Reconstruct the path to `stop` as it stood in the *last* round of
/// `rounds`, in travel order (earliest leg first).
#[must_use]
pub fn reconstruct_path(rounds: &[RoundState], stop: StopId) -> Vec<Leg> {
    let mut legs = Vec::new();
    let mut round_idx = rounds.len().saturating_sub(1);
    let mut current_stop = stop;

    loop {
        let round = &rounds[round_idx];

        if let Some(transfer) = round.transfer_provenance(current_stop) {
            legs.push(Leg::Transfer {
                from_stop: transfer.from_stop,
                to_stop: current_stop,
                transfer_time: transfer.transfer_time,
            });
            current_stop = transfer.from_stop;
            continue;
        }

        match round.transit_provenance(current_stop) {
            Some(transit) => {
                legs.push(Leg::Ride {
                    pattern: transit.pattern,
                    trip: transit.trip,
                    from_stop: transit.from_stop,
                    to_stop: current_stop,
                    board_time: transit.board_time,
                    alight_time: round.best_non_transfer_time(current_stop),
                });
                current_stop = transit.from_stop;
                if round_idx == 0 {
                    break;
                }
                round_idx -= 1;
            }
            None => break,
        }
    }

    legs.reverse();
    legs
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::UNREACHED;

    #[test]
    fn reconstructs_a_single_ride_leg() {
        let mut access = RoundState::new(2);
        access.set_initial_time(0, 60);
        let mut ride = RoundState::new(2);
        ride.relax_transit(1, 900, 3, 0, 0, 300, 240, 600, UNREACHED);

        let legs = reconstruct_path(&[access, ride], 1);
        assert_eq!(
            legs,
            vec![Leg::Ride {
                pattern: 3,
                trip: 0,
                from_stop: 0,
                to_stop: 1,
                board_time: 300,
                alight_time: 900,
            }]
        );
    }

    #[test]
    fn reconstructs_a_transfer_appended_to_a_ride() {
        let mut access = RoundState::new(3);
        access.set_initial_time(0, 60);
        let mut ride = RoundState::new(3);
        ride.relax_transit(1, 900, 3, 0, 0, 300, 240, 600, UNREACHED);
        ride.relax_transfer(2, 1020, 1, 120, UNREACHED);

        let legs = reconstruct_path(&[access, ride], 2);
        assert_eq!(
            legs,
            vec![
                Leg::Ride {
                    pattern: 3,
                    trip: 0,
                    from_stop: 0,
                    to_stop: 1,
                    board_time: 300,
                    alight_time: 900,
                },
                Leg::Transfer {
                    from_stop: 1,
                    to_stop: 2,
                    transfer_time: 120,
                },
            ]
        );
    }

    #[test]
    fn an_unreached_stop_has_no_path() {
        let round = RoundState::new(1);
        assert_eq!(reconstruct_path(&[round], 0), Vec::new());
    }
}
