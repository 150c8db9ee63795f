//! Compile-time constants of the RAPTOR core.
//!
//! These are not runtime-tunable (spec §9 "Global constants vs injected
//! config"): changing the boarding slack or binary-search threshold changes
//! the algorithm's behavior, not a deployment's configuration.

use crate::model::Time;

/// Sentinel for "never reached". Matches the teacher's `Time::MAX` convention
/// (`ferrobus_core::routing::raptor::common::state`), but pinned to the
/// spec's bit-exact value rather than the full range of the integer type.
pub const UNREACHED: Time = 2_147_483_647;

/// Minimum slack added to a stop's arrival time before it is considered
/// boardable, preventing same-instant board-alight chains.
pub const BOARD_SLACK: Time = 60;

/// Minimum wait enforced when boarding a frequency-based trip.
pub const MINIMUM_BOARD_WAIT: Time = 60;

/// Range-RAPTOR minute step.
pub const DEPARTURE_STEP: Time = 60;

/// Trip count above which the boarding search (§4.4) switches from a linear
/// backward scan to a binary search bracket.
pub const TRIP_SEARCH_BINARY_THRESHOLD: usize = 46;
