//! Shared error type across pulseGate crates.

use thiserror::Error;

/// Shared result type.
pub type Result<T> = std::result::Result<T, PulsegateError>;

/// Unified error type used by core and gateway.
///
/// Registration-time failures (`DuplicateName`, `BadBucketSpec`, `Config`)
/// are fatal at startup; observation-time failures (`LabelSchemaMismatch`,
/// `InvalidAmount`) are best-effort on the request path and must be logged
/// by the caller rather than propagated into a response.
#[derive(Debug, Error)]
pub enum PulsegateError {
    #[error("metric family already registered: {0}")]
    DuplicateName(String),
    #[error("label schema mismatch: {0}")]
    LabelSchemaMismatch(String),
    #[error("invalid amount: {0} (must be finite and >= 0)")]
    InvalidAmount(f64),
    #[error("bad bucket spec: {0}")]
    BadBucketSpec(String),
    #[error("config: {0}")]
    Config(String),
}

impl PulsegateError {
    /// True for errors that should abort process startup rather than be
    /// tolerated on the observation path.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            PulsegateError::DuplicateName(_)
                | PulsegateError::BadBucketSpec(_)
                | PulsegateError::Config(_)
        )
    }
}
