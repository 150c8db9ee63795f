//! Trip patterns and trip schedules (spec §3 "Trip pattern" / "Trip schedule").

use super::stop::Mode;
use super::{ServiceId, StopId, Time};

/// One vehicle journey on a pattern.
///
/// For a scheduled trip, `arrivals[p]`/`departures[p]` are clock times
/// (seconds since midnight) at stop position `p`. For a frequency-based
/// trip (`frequency.is_some()`), they are offsets relative to the start of
/// the frequency window, per spec §3: "departures\[p\] is relative to the
/// start of the service window, and trips repeat every headwaySeconds."
#[derive(Debug, Clone)]
pub struct TripSchedule {
    pub arrivals: Vec<Time>,
    pub departures: Vec<Time>,
    pub service_code: ServiceId,
    pub frequency: Option<FrequencyEntry>,
}

impl TripSchedule {
    #[must_use]
    pub fn is_frequency(&self) -> bool {
        self.frequency.is_some()
    }
}

/// A headway-based block for one trip (spec glossary: "Frequency entry").
///
/// `start`/`end` bound the window in which vehicles following this headway
/// run; `headway_seconds` is the repeat interval within that window.
#[derive(Debug, Clone, Copy)]
pub struct FrequencyEntry {
    pub start: Time,
    pub end: Time,
    pub headway_seconds: Time,
}

/// A sequence of stops shared by a set of trips, partitioned into its
/// scheduled and frequency-based trip lists.
///
/// Spec §3 describes one list of trip schedules with two flags
/// (`hasSchedules`, `hasFrequencies`). This crate stores the two kinds as
/// separate contiguous vectors instead of one flagged list: the scheduled
/// list must stay sorted by `departures[0]` to license the binary-search
/// half of the boarding search (§4.4), while frequency trips carry no such
/// ordering requirement and are scanned exhaustively in the frequency round
/// (§4.7/§4.8). Splitting them avoids filtering a mixed list on every scan.
/// This is a storage decision only — `has_schedules`/`has_frequencies`
/// still report exactly the flags the spec names, and nothing about the
/// pattern prefilter (§4.1) or scheduled-round (§4.3) semantics changes.
#[derive(Debug, Clone)]
pub struct TripPattern {
    pub stops: Vec<StopId>,
    /// Sorted by `departures[0]`. Invariant (spec §3): trips never overtake
    /// one another on the pattern, so sorted order at stop 0 implies sorted
    /// order at every stop position. Assumed, not enforced.
    pub scheduled_trips: Vec<TripSchedule>,
    pub frequency_trips: Vec<TripSchedule>,
    pub mode: Mode,
    pub route_index: usize,
}

impl TripPattern {
    #[must_use]
    pub fn has_schedules(&self) -> bool {
        !self.scheduled_trips.is_empty()
    }

    #[must_use]
    pub fn has_frequencies(&self) -> bool {
        !self.frequency_trips.is_empty()
    }

    #[must_use]
    pub fn num_stops(&self) -> usize {
        self.stops.len()
    }
}
