use std::fmt;

use crate::constants::MAX_LOG_N;

#[derive(Debug)]
pub enum SearchError {
    InvalidLogN(u32),
    ThreadPool(rayon::ThreadPoolBuildError),
}

impl fmt::Display for SearchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchError::InvalidLogN(log_n) => {
                write!(f, "log_n must be in 1..={MAX_LOG_N}, got {log_n}")
            }
            SearchError::ThreadPool(e) => write!(f, "failed to build worker pool: {e}"),
        }
    }
}

impl std::error::Error for SearchError {}

impl From<rayon::ThreadPoolBuildError> for SearchError {
    fn from(e: rayon::ThreadPoolBuildError) -> Self {
        SearchError::ThreadPool(e)
    }
}

pub type Result<T> = std::result::Result<T, SearchError>;
