//! Transfer relaxation (spec component **C6**).
//!
//! Run after a round's scheduled/frequency passes, walking the transfer
//! graph out of every stop reached directly off a vehicle this round.
//! Transfers never form their own round — they are appended to the round
//! in which the vehicle arrived (spec §4.6).

use crate::model::{Network, Time};

use super::state::RoundState;

/// Relax every transfer out of a stop whose `non_transfer_stops_touched`
/// bit is set in `round`, writing results back into the same round.
pub fn relax_transfers(
    network: &Network,
    round: &mut RoundState,
    max_walk_seconds: Time,
    walk_speed_m_per_s: f64,
    max_allowed_time: Time,
) {
    let sources: Vec<_> = round.non_transfer_stops_touched.ones().collect();
    for source in sources {
        let source_time = round.best_non_transfer_time(source);
        for transfer in network.transfers_for_stop(source) {
            let walk_time = crate::model::TransfersTable::walk_time(transfer, walk_speed_m_per_s);
            if walk_time > max_walk_seconds {
                continue;
            }
            let arrival = source_time.saturating_add(walk_time);
            round.relax_transfer(transfer.target_stop, arrival, source, walk_time, max_allowed_time);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::UNREACHED;
    use crate::model::{Transfer, TransfersTable};
    use hashbrown::HashMap;

    fn network_with_transfer(distance_mm: u64) -> Network {
        Network::new(
            Vec::new(),
            TransfersTable::from_adjacency(vec![
                vec![Transfer {
                    target_stop: 1,
                    distance_millimeters: distance_mm,
                }],
                Vec::new(),
            ]),
            2,
            HashMap::new(),
        )
    }

    #[test]
    fn relaxes_within_walk_budget() {
        let network = network_with_transfer(120_000); // 120 m
        let mut round = RoundState::new(2);
        round.relax_transit(0, 1000, 0, 0, 0, 1000, 0, 0, UNREACHED);
        relax_transfers(&network, &mut round, 600, 1.0, UNREACHED);
        assert_eq!(round.best_time(1), 1120);
        assert_eq!(round.transfer_provenance(1).unwrap().from_stop, 0);
    }

    #[test]
    fn rejects_transfers_beyond_walk_budget() {
        let network = network_with_transfer(10_000_000); // 10 km, far beyond budget
        let mut round = RoundState::new(2);
        round.relax_transit(0, 1000, 0, 0, 0, 1000, 0, 0, UNREACHED);
        relax_transfers(&network, &mut round, 600, 1.0, UNREACHED);
        assert_eq!(round.best_time(1), UNREACHED);
    }
}
