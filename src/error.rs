use thiserror::Error;

#[derive(Error, Debug)]
pub enum MascaraError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("TOML parse error: {0}")]
    Toml(String),

    #[error("Unknown country code '{0}'")]
    UnknownCountry(String),

    #[error("Unknown {kind} '{value}'")]
    UnknownKind { kind: &'static str, value: String },

    #[error("Field does not accept an unnumbered value")]
    UnnumberedNotAllowed,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Failure reported by a code-delivery collaborator.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("code delivery failed: {reason}")]
pub struct DeliveryError {
    pub reason: String,
}

impl DeliveryError {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, MascaraError>;
