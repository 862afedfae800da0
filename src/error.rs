use thiserror::Error;

/// Kiosk failure taxonomy.
///
/// Every variant is surfaced to the operator and logged; none is fatal to
/// the kiosk. The triggering action can always be retried manually - there
/// is no automatic retry anywhere in the client.
#[derive(Debug, Error)]
pub enum KioskError {
    /// Camera could not be acquired or read.
    #[error("camera error: {0}")]
    Camera(String),

    /// Required input missing or unusable. No network call was issued.
    #[error("missing required input: {0}")]
    Validation(String),

    /// Request failed or the response body could not be parsed.
    #[error("request failed: {0}")]
    Transport(String),

    /// Server answered but rejected the operation (`success: false`).
    #[error("server rejected request: {0}")]
    Rejected(String),
}

impl KioskError {
    pub(crate) fn camera(err: impl std::fmt::Display) -> Self {
        Self::Camera(err.to_string())
    }
}
