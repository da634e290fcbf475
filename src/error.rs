//! Error taxonomy for route stitching.
//!
//! `StitchError` carries full diagnostics and is what the pipeline stages
//! return. `RouteFailure` is the opaque value handed to callers once the
//! details have been logged.

use std::fmt;

use thiserror::Error;

use crate::geo::Waypoint;
use crate::polyline::PolylineError;

/// Failure reported by a `RouteProvider` for a single chunk.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("request to routing provider failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("routing provider returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("failed to parse routing provider response: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("routing provider found no route: {0}")]
    NoRoute(String),

    #[error("{0}")]
    Other(String),
}

#[derive(Debug, Error)]
pub enum StitchError {
    #[error("assignment has no stops")]
    EmptySequence,

    #[error("order {id} referenced by the assignment was not found")]
    OrderNotFound { id: String },

    #[error("order {id} has an invalid coordinate {point:?}")]
    InvalidWaypoint { id: String, point: Waypoint },

    #[error("max waypoints per request must be at least 1")]
    InvalidChunkSize,

    #[error("parallel dispatch needs at least 1 request in flight")]
    InvalidConcurrency,

    #[error("failed to build chunk dispatch pool: {0}")]
    WorkerPool(#[from] rayon::ThreadPoolBuildError),

    #[error("routing chunk {chunk} failed: {source}")]
    ProviderRequestFailure {
        chunk: usize,
        #[source]
        source: ProviderError,
    },

    #[error("failed to encode geometry of leg {leg}: {source}")]
    EncodingFailure {
        leg: usize,
        #[source]
        source: PolylineError,
    },
}

impl StitchError {
    /// Category reported to callers once diagnostics are logged.
    pub fn kind(&self) -> FailureKind {
        match self {
            StitchError::EmptySequence => FailureKind::EmptySequence,
            StitchError::OrderNotFound { .. } => FailureKind::OrderNotFound,
            StitchError::InvalidWaypoint { .. } => FailureKind::InvalidWaypoint,
            StitchError::InvalidChunkSize
            | StitchError::InvalidConcurrency
            | StitchError::WorkerPool(_) => FailureKind::Configuration,
            StitchError::ProviderRequestFailure { .. } => FailureKind::ProviderRequestFailure,
            StitchError::EncodingFailure { .. } => FailureKind::EncodingFailure,
        }
    }
}

/// Category of a failed route computation, stripped of diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    EmptySequence,
    OrderNotFound,
    InvalidWaypoint,
    Configuration,
    ProviderRequestFailure,
    EncodingFailure,
}

impl FailureKind {
    /// Failures caused by the assignment being inconsistent with current data.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            FailureKind::EmptySequence | FailureKind::OrderNotFound | FailureKind::InvalidWaypoint
        )
    }
}

/// The only error a caller of `RouteStitcher::route_assignment` sees.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteFailure {
    kind: FailureKind,
}

impl RouteFailure {
    pub fn kind(&self) -> FailureKind {
        self.kind
    }
}

impl From<&StitchError> for RouteFailure {
    fn from(err: &StitchError) -> Self {
        Self { kind: err.kind() }
    }
}

impl fmt::Display for RouteFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("failed to compute route")
    }
}

impl std::error::Error for RouteFailure {}
