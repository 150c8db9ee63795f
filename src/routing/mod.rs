//! Routing entry points: the RAPTOR engine and the parallel batch driver.

pub mod batch;
pub mod raptor;

pub use batch::search_many;
pub use raptor::{MinuteResult, Search};
