use serde::Serialize;

use crate::error::DeliveryError;

/// Number of digits in every issued one-time code.
pub const CODE_LENGTH: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum VerificationStatus {
    Idle,
    Sending,
    AwaitingCode,
    Verifying,
    Verified,
    Exhausted,
}

impl VerificationStatus {
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Verified | Self::Exhausted)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerKind {
    Cooldown,
    Expiry,
}

/// User-visible failure attached to the session view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum VerificationError {
    DeliveryFailed { reason: String },
    WrongCode { remaining: u32 },
    Expired { remaining: u32 },
    IncompleteCode,
    AttemptsExhausted,
}

impl std::fmt::Display for VerificationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DeliveryFailed { reason } => write!(f, "could not send the code: {reason}"),
            Self::WrongCode { remaining } => {
                write!(f, "incorrect code, {remaining} attempt(s) left")
            }
            Self::Expired { remaining } => {
                write!(f, "code expired, {remaining} attempt(s) left")
            }
            Self::IncompleteCode => write!(f, "enter all {CODE_LENGTH} digits"),
            Self::AttemptsExhausted => write!(f, "too many attempts, request a new code"),
        }
    }
}

/// Commands from the caller and completions from collaborators.
/// Completions carry the generation they were issued for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VerificationInput {
    Send,
    Resend,
    /// Current text of the code entry.
    Input(String),
    Submit,
    Cancel,
    Reset,
    DeliveryFinished {
        generation: u64,
        result: Result<(), DeliveryError>,
    },
    CheckDue {
        generation: u64,
    },
    TimerFired {
        generation: u64,
        timer: TimerKind,
    },
}

/// Work the session asks its driver to perform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    Deliver {
        generation: u64,
        target: String,
        code: String,
    },
    StartTimer {
        generation: u64,
        timer: TimerKind,
        deadline: i64,
    },
    CancelTimers {
        generation: u64,
    },
    CheckCode {
        generation: u64,
    },
}

/// Snapshot published to the UI after every input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VerificationView {
    pub status: VerificationStatus,
    pub entered: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<VerificationError>,
    pub can_resend: bool,
    pub attempts_remaining: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<i64>,
}
