//! Pattern prefilter (spec component **C2**).
//!
//! Partitions the network's patterns into the scheduled and frequency
//! subsets active for one search's date and requested modes. Run once per
//! search (spec §4.1: "a one-shot per search"), consumed every minute by
//! the scheduled and frequency rounds so neither has to re-check a
//! pattern's service calendar on every scan.

use fixedbitset::FixedBitSet;
use hashbrown::HashSet;

use crate::model::{Network, PatternId};
use crate::request::Request;

/// Scheduled and frequency pattern subsets for one search date/mode set.
///
/// Spec: "Frequency and schedule subsets are independent: a mixed pattern
/// appears in both." Membership is exposed as both an ordered list (for
/// deterministic scan order) and a bitset (for O(1) membership checks from
/// the touched-pattern union in the scheduled/frequency rounds).
#[derive(Debug, Clone)]
pub struct PatternPrefilter {
    pub scheduled: Vec<PatternId>,
    pub frequency: Vec<PatternId>,
    scheduled_mask: FixedBitSet,
    frequency_mask: FixedBitSet,
}

impl PatternPrefilter {
    #[must_use]
    pub fn build(network: &Network, request: &Request) -> Self {
        let active_services: HashSet<_> =
            network.active_services(request.date).iter().copied().collect();
        let num_patterns = network.patterns.len();
        let mut scheduled = Vec::new();
        let mut frequency = Vec::new();
        let mut scheduled_mask = FixedBitSet::with_capacity(num_patterns);
        let mut frequency_mask = FixedBitSet::with_capacity(num_patterns);

        for (pattern_id, pattern) in network.patterns.iter().enumerate() {
            if !request.transit_modes.contains(&pattern.mode) {
                continue;
            }
            let has_active_schedule = pattern
                .scheduled_trips
                .iter()
                .any(|trip| active_services.contains(&trip.service_code));
            let has_active_frequency = pattern
                .frequency_trips
                .iter()
                .any(|trip| active_services.contains(&trip.service_code));

            if has_active_schedule {
                scheduled.push(pattern_id);
                scheduled_mask.set(pattern_id, true);
            }
            if has_active_frequency {
                frequency.push(pattern_id);
                frequency_mask.set(pattern_id, true);
            }
        }

        PatternPrefilter {
            scheduled,
            frequency,
            scheduled_mask,
            frequency_mask,
        }
    }

    #[must_use]
    pub fn is_scheduled_today(&self, pattern: PatternId) -> bool {
        self.scheduled_mask.contains(pattern)
    }

    #[must_use]
    pub fn is_frequency_today(&self, pattern: PatternId) -> bool {
        self.frequency_mask.contains(pattern)
    }

    #[must_use]
    pub fn has_frequency_patterns(&self) -> bool {
        !self.frequency.is_empty()
    }
}
