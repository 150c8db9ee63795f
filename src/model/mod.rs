//! Data model for the transit network the RAPTOR core searches over.
//!
//! Everything here is read-only once built: the engine is a pure function
//! of `Network` + `AccessTable` + `Request` (spec §1 "external collaborators
//! only supply data via the interfaces defined"). There is no loader in this
//! crate; callers build a `Network` however they like (GTFS import, a test
//! fixture, a hand-rolled timetable) and hand it to [`crate::routing`].

pub mod access;
pub mod network;
pub mod pattern;
pub mod stop;
pub mod transfers;

pub use access::AccessTable;
pub use network::Network;
pub use pattern::{FrequencyEntry, TripPattern, TripSchedule};
pub use stop::Mode;
pub use transfers::{Transfer, TransfersTable};

/// Seconds since midnight. Signed so that `UNREACHED` (`i32::MAX`) and
/// saturating arithmetic on it behave predictably; real clock times never
/// approach the negative range.
pub type Time = i32;

/// Index into [`Network::stops`]-shaped arrays. Stops carry no attributes in
/// the core (spec §3): they are purely a position used to index parallel
/// arrays of times and provenance.
pub type StopId = usize;

/// Index into [`Network::patterns`].
pub type PatternId = usize;

/// Calendar service code; a trip is active on a date iff its `service_code`
/// is set in that date's service bitset.
pub type ServiceId = u32;
