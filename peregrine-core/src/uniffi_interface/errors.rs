use thiserror::Error as ThisError;
use uniffi::Error;

#[derive(Debug, ThisError, Error)]
#[non_exhaustive]
pub enum CoachError {
    #[error("storage error: {0}")]
    Storage(String),
    #[error("error: {0}")]
    Common(String),
}

impl From<anyhow::Error> for CoachError {
    fn from(e: anyhow::Error) -> Self {
        CoachError::Common(format!("{:#}", e))
    }
}

impl CoachError {
    pub fn storage<D: std::fmt::Display>(d: D) -> Self {
        CoachError::Storage(d.to_string())
    }
}
