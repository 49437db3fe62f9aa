use std::fmt;

/// Errors raised when configuring a match
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SimError {
    /// Match parameters that can never produce a playable game
    InvalidConfiguration { reason: String },
}

impl SimError {
    pub fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidConfiguration {
            reason: reason.into(),
        }
    }
}

impl fmt::Display for SimError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidConfiguration { reason } => {
                write!(f, "invalid configuration: {reason}")
            }
        }
    }
}

impl std::error::Error for SimError {}
