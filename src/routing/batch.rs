//! Parallel batch search over independent requests.
//!
//! Spec §5: independent searches need no coordination, since the network
//! view and its calendar/transfers are immutable once built. Grounded in
//! the teacher's `travel_time_matrix` (`src/matrix.rs`), which fans a
//! single-origin routing call out over many origin points with
//! `rayon::prelude::*`; here the unit of parallelism is a whole `Request`
//! (e.g. many origins, or one origin on many dates) rather than one route
//! call, since each `Request` already drives its own minute-stepping
//! search.

use rayon::prelude::*;

use crate::error::RaptorError;
use crate::model::Network;
use crate::request::Request;

use super::raptor::{MinuteResult, Search};

/// Run every request in `requests` against the same `network`, in
/// parallel, returning one result (or error) per request in the same
/// order they were given.
pub fn search_many(network: &Network, requests: &[Request]) -> Vec<Result<Vec<MinuteResult>, RaptorError>> {
    requests
        .par_iter()
        .map(|request| {
            let mut search = Search::new(network, request)?;
            Ok(search.run())
        })
        .collect()
}
