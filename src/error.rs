//! Error taxonomy for the planning pipeline.
//!
//! Only validation failures, malformed backend responses and pipeline
//! coordination failures surface to the caller. Resolution misses
//! (places, geometry) and quota shortfalls degrade gracefully and are
//! observable through tracing only.

use thiserror::Error;

/// Failure reaching or using the scheduling backend.
#[derive(Debug, Error)]
pub enum BackendError {
    #[error("scheduling backend request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("scheduling backend returned an unreadable body: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Caller-visible pipeline errors.
#[derive(Debug, Error)]
pub enum PlannerError {
    /// Request rejected before the backend call (missing time window,
    /// empty selection).
    #[error("invalid request: {0}")]
    Validation(String),

    /// The backend response is missing its schedule or route summary.
    /// Callers are expected to fall back to a locally built itinerary.
    #[error("malformed backend response: {0}")]
    ServerResponse(String),

    /// A generation is already in flight; the new trigger is rejected.
    #[error("an itinerary generation is already in flight")]
    GenerationInFlight,

    /// The generation was cancelled while its backend call was
    /// outstanding; its results were discarded.
    #[error("itinerary generation was cancelled")]
    Cancelled,

    #[error(transparent)]
    Backend(#[from] BackendError),
}
