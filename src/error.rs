//! Error types for the dashboard controller.
//!
//! Every variant here belongs to the transport/parse class: the request
//! never produced a usable payload. Application-level failures reported by
//! the backend (`status != "success"`) are not errors, they surface as
//! [`crate::api::Outcome::Failure`].

use thiserror::Error;

pub type Result<T> = std::result::Result<T, DashboardError>;

#[derive(Debug, Error)]
pub enum DashboardError {
    #[error("transport error: {0}")]
    Transport(String),

    #[error("backend returned HTTP {status}")]
    Http { status: u16 },

    #[error("failed to decode response: {0}")]
    Decode(String),

    #[error("invalid form input: {0}")]
    InvalidInput(String),

    #[error("failed to render response: {0}")]
    Render(String),
}

impl From<ureq::Error> for DashboardError {
    fn from(err: ureq::Error) -> Self {
        match err {
            ureq::Error::Status(status, _) => DashboardError::Http { status },
            ureq::Error::Transport(t) => DashboardError::Transport(t.to_string()),
        }
    }
}

impl From<serde_json::Error> for DashboardError {
    fn from(err: serde_json::Error) -> Self {
        DashboardError::Decode(err.to_string())
    }
}
