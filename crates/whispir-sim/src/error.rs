use std::fmt;

#[derive(Debug)]
pub enum SimError {
    Io(std::io::Error),
    UnknownScheme(String),
    InvalidConfig(String),
    Malformed(String),
    ThreadPool(rayon::ThreadPoolBuildError),
}

impl fmt::Display for SimError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimError::Io(e) => write!(f, "I/O error: {e}"),
            SimError::UnknownScheme(name) => {
                write!(f, "can only compute bin loads for rlwe or paillier, got '{name}'")
            }
            SimError::InvalidConfig(msg) => write!(f, "invalid config: {msg}"),
            SimError::Malformed(line) => write!(f, "malformed checkpoint row: {line}"),
            SimError::ThreadPool(e) => write!(f, "failed to build worker pool: {e}"),
        }
    }
}

impl std::error::Error for SimError {}

impl From<std::io::Error> for SimError {
    fn from(e: std::io::Error) -> Self {
        SimError::Io(e)
    }
}

impl From<rayon::ThreadPoolBuildError> for SimError {
    fn from(e: rayon::ThreadPoolBuildError) -> Self {
        SimError::ThreadPool(e)
    }
}

pub type Result<T> = std::result::Result<T, SimError>;
