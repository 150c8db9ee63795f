//! Stop identity and transit modes.
//!
//! A [`crate::model::StopId`] is just an index — the spec is explicit that
//! stops carry no other attributes in the core (§3 "No other attributes
//! enter the core"). `Mode` is the one piece of per-pattern metadata the
//! engine actually branches on, via `Request::transit_modes`.

/// Transit mode a pattern operates under. Kept small and GTFS-route-type
/// shaped, matching how the teacher's own `Route` records a mode without
/// pulling in GTFS's full `route_type` enumeration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    Tram,
    Subway,
    Rail,
    Bus,
    Ferry,
}
