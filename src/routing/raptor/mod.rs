//! The RAPTOR engine: components C2 through C11.

pub mod boarding;
pub mod frequency;
pub mod minute_driver;
pub mod multicriteria;
pub mod path;
pub mod prefilter;
pub mod scheduled;
pub mod state;
pub mod transfers;

pub use frequency::FrequencyOffsets;
pub use minute_driver::{MinuteResult, Search};
pub use multicriteria::{Label, MultiCriteriaRound, MultiCriteriaSearch, ParetoFront};
pub use path::{reconstruct_path, Leg};
pub use prefilter::PatternPrefilter;
pub use state::RoundState;
