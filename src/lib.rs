//! A Round-Based Public Transit (RAPTOR) routing core.
//!
//! Given a [`model::Network`] (patterns, trips, transfers, and a service
//! calendar, all already built), a set of access stops, and a departure
//! window, [`routing::Search`] computes the minimum travel time from the
//! origin to every stop in the network. The *range-RAPTOR* extension
//! sweeps the departure window backward one minute at a time, reusing
//! later-minute results as an upper bound; headway-based (frequency)
//! service is handled by drawing random phases per Monte Carlo
//! sub-iteration and overlaying the result onto the scheduled baseline.
//!
//! Network construction — GTFS import, street-graph transfer computation,
//! and everything else that produces a [`model::Network`] in the first
//! place — is out of scope here; callers supply one however they like.

pub mod constants;
pub mod error;
pub mod model;
pub mod request;
pub mod routing;

pub use error::{RaptorError, RaptorResult};
pub use model::{AccessTable, Network, Time};
pub use request::Request;
pub use routing::{search_many, MinuteResult, Search};

/// Commonly used types re-exported for a single `use raptor_core::prelude::*;`.
pub mod prelude {
    pub use crate::constants::{
        BOARD_SLACK, DEPARTURE_STEP, MINIMUM_BOARD_WAIT, TRIP_SEARCH_BINARY_THRESHOLD, UNREACHED,
    };
    pub use crate::error::{RaptorError, RaptorResult};
    pub use crate::model::{
        AccessTable, FrequencyEntry, Mode, Network, PatternId, StopId, Time, Transfer, TransfersTable,
        TripPattern, TripSchedule,
    };
    pub use crate::request::Request;
    pub use crate::routing::raptor::{
        Label, Leg, MinuteResult as RaptorMinuteResult, MultiCriteriaSearch, ParetoFront, RoundState, Search,
    };
    pub use crate::routing::search_many;
}
