use std::fmt;

use panel_core::{Category, ConfirmToken, RequestId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    SendCompleted {
        request_id: RequestId,
        result: Result<(), SendError>,
    },
    ConfirmWindowElapsed {
        category: Category,
        token: ConfirmToken,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct SendError {
    pub kind: FailureKind,
    pub message: String,
}

impl SendError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidEndpoint,
    HttpStatus(u16),
    Timeout,
    Network,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidEndpoint => write!(f, "invalid endpoint"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::Network => write!(f, "network error"),
        }
    }
}
