use std::fmt;
use std::str::FromStr;

use crate::error::SimError;

/// Number of ball counts simulated per run.
pub const PAIRS: usize = 24;

/// Ball counts are multiples of this step: 8192, 16384, .., 196608.
pub const BALL_STEP: u64 = 8192;

/// Default number of independent runs: 2^30.
pub const DEFAULT_RUNS: u64 = 1 << 30;

/// PIR scheme whose bucket layout is being sized.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Scheme {
    Rlwe,
    Paillier,
}

impl Scheme {
    /// Bucket count used by the scheme's database layout.
    pub fn bins(self) -> u64 {
        match self {
            Scheme::Rlwe => 4096,
            Scheme::Paillier => 256,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Scheme::Rlwe => "rlwe",
            Scheme::Paillier => "paillier",
        }
    }

    /// Default checkpoint file name.
    pub fn checkpoint_file(self) -> String {
        format!("simulation-{}.csv", self.name())
    }
}

impl FromStr for Scheme {
    type Err = SimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "rlwe" => Ok(Scheme::Rlwe),
            "paillier" => Ok(Scheme::Paillier),
            other => Err(SimError::UnknownScheme(other.to_string())),
        }
    }
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// `BALL_STEP * k` for `k = 1..=PAIRS`.
pub fn default_ball_counts() -> Vec<u64> {
    (1..=PAIRS as u64).map(|k| k * BALL_STEP).collect()
}
