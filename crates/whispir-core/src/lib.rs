//! Rotation generator search for ring-based homomorphic PIR.
//!
//! Finds two- or three-element sets of automorphism generators in the
//! index group of order `2N` whose products reach every power-of-two slot
//! rotation `1 + N / 2^i` as cheaply as possible. Cost is the weighted sum
//! of the exponent depth at which each rotation is first reachable.
//!
//! Zero I/O. Progress reporting goes through
//! [`SearchObserver`].

pub mod best;
pub mod constants;
pub mod discovery;
pub mod error;
pub mod evaluator;
pub mod group;
pub mod search;
pub mod splits;
pub mod verify;

pub use best::{Best, SharedBest};
pub use constants::{
    DEFAULT_LOG_N, FIRST_GENERATOR, MAX_LOG_N, PAIR_PROGRESS_INTERVAL, TRIPLE_PROGRESS_INTERVAL,
};
pub use discovery::DiscoveryTimes;
pub use error::{Result, SearchError};
pub use evaluator::{CostEvaluator, Evaluation};
pub use group::{RingGroup, modpow};
pub use search::{
    NoopObserver, SearchConfig, SearchObserver, SearchOutcome, SearchStats, StatsSnapshot,
    inner_values, pair_candidates, pair_rows, search_pairs, search_triples, triple_candidates,
    triple_rows,
};
pub use splits::Splits;
pub use verify::earliest_split;
