//! Parallel balls-into-bins trials with a shared running maximum.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, PoisonError};

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;

use crate::checkpoint::{CheckpointRow, CheckpointWriter};
use crate::error::{Result, SimError};
use crate::scheme::{DEFAULT_RUNS, Scheme, default_ball_counts};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SimConfig {
    pub scheme: Scheme,
    pub ball_counts: Vec<u64>,
    pub runs: u64,
    /// Base seed. Run `r` draws from `SmallRng::seed_from_u64(seed + r)`,
    /// so a fixed seed gives the same answers for any thread count.
    pub seed: Option<u64>,
    pub threads: Option<usize>,
}

impl SimConfig {
    pub fn new(scheme: Scheme) -> Self {
        Self {
            scheme,
            ball_counts: default_ball_counts(),
            runs: DEFAULT_RUNS,
            seed: None,
            threads: None,
        }
    }

    fn validate(&self) -> Result<()> {
        if self.runs == 0 {
            return Err(SimError::InvalidConfig("runs must be positive".into()));
        }
        if self.ball_counts.is_empty() {
            return Err(SimError::InvalidConfig("no ball counts".into()));
        }
        Ok(())
    }
}

/// Throw `balls` uniformly into `bins` and return the fullest bin's load.
///
/// `scratch` is reused between calls to avoid reallocating the bin array.
pub fn max_load(rng: &mut impl Rng, bins: u64, balls: u64, scratch: &mut Vec<u64>) -> u64 {
    scratch.clear();
    scratch.resize(bins as usize, 0);
    for _ in 0..balls {
        scratch[rng.random_range(0..bins) as usize] += 1;
    }
    scratch.iter().copied().max().unwrap_or(0)
}

pub struct Simulation {
    config: SimConfig,
    answers: Vec<AtomicU64>,
    completed: AtomicU64,
    writer: Option<Mutex<CheckpointWriter>>,
}

impl Simulation {
    pub fn new(config: SimConfig, writer: Option<CheckpointWriter>) -> Result<Self> {
        config.validate()?;
        let answers = config.ball_counts.iter().map(|_| AtomicU64::new(0)).collect();
        Ok(Self {
            config,
            answers,
            completed: AtomicU64::new(0),
            writer: writer.map(Mutex::new),
        })
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// Largest load seen so far, per ball count.
    pub fn answers(&self) -> Vec<u64> {
        self.answers
            .iter()
            .map(|a| a.load(Ordering::Relaxed))
            .collect()
    }

    pub fn completed(&self) -> u64 {
        self.completed.load(Ordering::Acquire)
    }

    /// Run every trial and return the final answers.
    ///
    /// A checkpoint is appended each time the completed-run count reaches a
    /// power of two, and once more at the end if the total is not one.
    pub fn run(&self) -> Result<Vec<u64>> {
        let base_seed = self.config.seed.unwrap_or_else(|| rand::rng().random());
        tracing::info!(
            scheme = %self.config.scheme,
            runs = self.config.runs,
            base_seed,
            "starting bin-load simulation"
        );

        match self.config.threads {
            Some(threads) => rayon::ThreadPoolBuilder::new()
                .num_threads(threads)
                .build()?
                .install(|| self.trials(base_seed))?,
            None => self.trials(base_seed)?,
        }

        let runs = self.config.runs;
        if !runs.is_power_of_two() {
            self.checkpoint(runs)?;
        }
        Ok(self.answers())
    }

    fn trials(&self, base_seed: u64) -> Result<()> {
        let bins = self.config.scheme.bins();
        (0..self.config.runs)
            .into_par_iter()
            .try_for_each_init(Vec::new, |scratch, run| {
                let mut rng = SmallRng::seed_from_u64(base_seed.wrapping_add(run));
                for (answer, &balls) in self.answers.iter().zip(&self.config.ball_counts) {
                    let load = max_load(&mut rng, bins, balls, scratch);
                    answer.fetch_max(load, Ordering::Relaxed);
                }
                let done = self.completed.fetch_add(1, Ordering::AcqRel) + 1;
                if done.is_power_of_two() {
                    self.checkpoint(done)?;
                }
                Ok(())
            })
    }

    fn checkpoint(&self, runs: u64) -> Result<()> {
        tracing::info!(runs, "reached milestone");
        let Some(writer) = &self.writer else {
            return Ok(());
        };
        let bins = self.config.scheme.bins();
        let writer = writer.lock().unwrap_or_else(PoisonError::into_inner);
        let rows: Vec<CheckpointRow> = self
            .config
            .ball_counts
            .iter()
            .zip(self.answers())
            .map(|(&balls, max_load)| CheckpointRow {
                runs,
                bins,
                balls,
                max_load,
            })
            .collect();
        writer.append(&rows)
    }
}
