//! Append-only CSV checkpoints of partial simulation results.
//!
//! Each checkpoint appends one row per ball count:
//! `runs,bins,balls,max_load`. No header; files accumulate across runs.

use std::fs::{self, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::error::{Result, SimError};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CheckpointRow {
    /// Runs completed when the row was written.
    pub runs: u64,
    pub bins: u64,
    pub balls: u64,
    pub max_load: u64,
}

impl CheckpointRow {
    fn parse(line: &str) -> Result<Self> {
        let malformed = || SimError::Malformed(line.to_string());
        let fields: Vec<u64> = line
            .split(',')
            .map(|f| f.trim().parse::<u64>().map_err(|_| malformed()))
            .collect::<Result<_>>()?;
        match fields.as_slice() {
            &[runs, bins, balls, max_load] => Ok(Self {
                runs,
                bins,
                balls,
                max_load,
            }),
            _ => Err(malformed()),
        }
    }
}

pub struct CheckpointWriter {
    path: PathBuf,
}

impl CheckpointWriter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append `rows`, creating the file on first use.
    pub fn append(&self, rows: &[CheckpointRow]) -> Result<()> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        let mut out = BufWriter::new(file);
        for row in rows {
            writeln!(
                out,
                "{},{},{},{}",
                row.runs, row.bins, row.balls, row.max_load
            )?;
        }
        out.flush()?;
        Ok(())
    }

    /// Read back every row written so far.
    pub fn load(&self) -> Result<Vec<CheckpointRow>> {
        let content = fs::read_to_string(&self.path)?;
        content
            .lines()
            .filter(|l| !l.trim().is_empty())
            .map(CheckpointRow::parse)
            .collect()
    }
}
