use crate::segments::EdgeId;
use thiserror::Error;

/// Boxed error returned by injected collaborators (detector, solver, warp).
pub type ExternalError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Debug, Error)]
pub enum RectifyError {
    /// No image is set, or the image has no pixels.
    #[error("invalid state: {0}")]
    InvalidState(&'static str),
    #[error("invalid input: {0}")]
    InvalidInput(String),
    /// A zero-length segment has no supporting line.
    #[error("degenerate zero-length segment on edge {}", .edge.0)]
    DegenerateSegment { edge: EdgeId },
    #[error("{stage} failed: {source}")]
    External {
        stage: &'static str,
        #[source]
        source: ExternalError,
    },
    #[error("malformed solver output: {0}")]
    MalformedSolverOutput(String),
    #[error("group selection cancelled")]
    Cancelled,
    #[error("group selection timed out after {elapsed_ms:.1} ms")]
    TimedOut { elapsed_ms: f64 },
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),
}

impl RectifyError {
    pub(crate) fn external(stage: &'static str, source: ExternalError) -> Self {
        RectifyError::External { stage, source }
    }
}

pub type Result<T> = std::result::Result<T, RectifyError>;
