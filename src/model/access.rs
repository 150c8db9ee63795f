//! Access table (spec §3 "Access table").

use hashbrown::HashMap;

use super::{StopId, Time};

/// Seconds of initial walking from the search origin to each reachable
/// stop. These are the only stops reachable at time 0 of a search — an
/// empty table means nothing is reachable at all (spec B1).
#[derive(Debug, Clone, Default)]
pub struct AccessTable {
    walk_time: HashMap<StopId, Time>,
}

impl AccessTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn from_pairs(pairs: impl IntoIterator<Item = (StopId, Time)>) -> Self {
        AccessTable {
            walk_time: pairs.into_iter().collect(),
        }
    }

    pub fn insert(&mut self, stop: StopId, walk_time: Time) {
        self.walk_time
            .entry(stop)
            .and_modify(|existing| {
                if walk_time < *existing {
                    *existing = walk_time;
                }
            })
            .or_insert(walk_time);
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.walk_time.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (StopId, Time)> + '_ {
        self.walk_time.iter().map(|(&stop, &time)| (stop, time))
    }
}
