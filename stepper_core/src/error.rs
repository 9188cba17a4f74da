use thiserror::Error;

#[derive(Debug, Error, Clone)]
pub enum StepperError {
    #[error("script error: {0}")]
    Script(String),
    #[error("io error: {0}")]
    Io(String),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BuildError {
    #[error("invalid config: {0}")]
    InvalidConfig(&'static str),
}

pub type Result<T> = eyre::Result<T>;
pub use eyre::Report;
