//! Monte-Carlo estimate of worst-case bucket occupancy for PIR binning.
//!
//! Throws `balls` items uniformly into `bins` buckets many times and keeps
//! the largest bucket load ever seen per ball count, checkpointing partial
//! answers to a CSV file as the run count doubles.

pub mod checkpoint;
pub mod error;
pub mod scheme;
pub mod simulate;

pub use checkpoint::{CheckpointRow, CheckpointWriter};
pub use error::{Result, SimError};
pub use scheme::{BALL_STEP, DEFAULT_RUNS, PAIRS, Scheme, default_ball_counts};
pub use simulate::{SimConfig, Simulation, max_load};
