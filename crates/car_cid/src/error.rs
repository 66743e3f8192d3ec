use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum NormalizeError {
    #[error("invalid identifier at files[{index}]: {reason}")]
    InvalidIdentifier { index: usize, reason: String },
}

impl NormalizeError {
    pub(crate) fn invalid(index: usize, reason: impl Into<String>) -> Self {
        Self::InvalidIdentifier { index, reason: reason.into() }
    }

    /// Position of the offending descriptor in the request batch.
    pub fn index(&self) -> usize {
        match self {
            Self::InvalidIdentifier { index, .. } => *index,
        }
    }
}

pub type Result<T> = std::result::Result<T, NormalizeError>;
