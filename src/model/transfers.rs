//! Transfers table (spec §3 "Transfers table").

use super::{StopId, Time};

/// A directed walking edge from one stop to another, produced externally by
/// a street-search process this crate does not implement.
#[derive(Debug, Clone, Copy)]
pub struct Transfer {
    pub target_stop: StopId,
    pub distance_millimeters: u64,
}

/// Packed `(targetStop, distanceMillimeters)` pairs for every stop.
///
/// Transfers are directed and self-loops are absent, as guaranteed by
/// whatever external process built the table (spec §3).
#[derive(Debug, Clone, Default)]
pub struct TransfersTable {
    /// Flattened transfer list; `offsets[s]..offsets[s + 1]` is stop `s`'s slice.
    transfers: Vec<Transfer>,
    offsets: Vec<usize>,
}

impl TransfersTable {
    /// Build a table from a plain adjacency list, one entry per stop.
    #[must_use]
    pub fn from_adjacency(mut by_stop: Vec<Vec<Transfer>>) -> Self {
        let mut offsets = Vec::with_capacity(by_stop.len() + 1);
        let mut transfers = Vec::new();
        offsets.push(0);
        for stop_transfers in &mut by_stop {
            transfers.append(stop_transfers);
            offsets.push(transfers.len());
        }
        TransfersTable { transfers, offsets }
    }

    #[must_use]
    pub fn num_stops(&self) -> usize {
        self.offsets.len().saturating_sub(1)
    }

    /// Transfers leaving `stop`, or an empty slice for a stop with none.
    #[must_use]
    pub fn for_stop(&self, stop: StopId) -> &[Transfer] {
        match (self.offsets.get(stop), self.offsets.get(stop + 1)) {
            (Some(&start), Some(&end)) => &self.transfers[start..end],
            _ => &[],
        }
    }

    /// Walking time for a transfer given a constant walking speed in
    /// meters per second.
    #[must_use]
    pub fn walk_time(transfer: &Transfer, walk_speed_m_per_s: f64) -> Time {
        if walk_speed_m_per_s <= 0.0 {
            return Time::MAX;
        }
        (transfer.distance_millimeters as f64 / (walk_speed_m_per_s * 1000.0)) as Time
    }
}
