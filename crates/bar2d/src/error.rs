use thiserror::Error;

/// Errors reported by bar layers and GPU backends.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BarError {
    /// Interval data that cannot be turned into geometry.
    #[error("invalid bar input: {0}")]
    InvalidInput(String),

    /// `offset + interval_count` does not fit the 32-bit pick id space.
    #[error("pick offset {offset} + {count} intervals overflows the pick id space")]
    PickOverflow { offset: u32, count: u32 },

    /// The GPU backend refused an operation.
    #[error("gpu backend: {0}")]
    Backend(String),
}

impl BarError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    pub fn backend(msg: impl Into<String>) -> Self {
        Self::Backend(msg.into())
    }
}

pub type Result<T> = std::result::Result<T, BarError>;
