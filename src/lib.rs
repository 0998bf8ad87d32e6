#![doc = include_str!("../README.md")]

// Public modules (stable-ish surface)
pub mod camera;
pub mod diagnostics;
pub mod error;
pub mod external;
pub mod params;
pub mod rectifier;

// Stage-level modules, usable without a session.
pub mod cluster;
pub mod filter;
pub mod geometry;
pub mod segments;
pub mod select;

// Demo support.
pub mod config;
pub mod io;

// --- High-level re-exports -------------------------------------------------

pub use crate::camera::{CameraProperties, ImageSize, UNDIST_FULL, UNDIST_VALID};
pub use crate::error::{ExternalError, RectifyError, Result};
pub use crate::external::{CalibrationSolver, LineDetector, SolverOutput, Undistorter};
pub use crate::params::{ClusterParams, FilterParams, RectifyParams, SelectParams};
pub use crate::rectifier::DistortionRectifier;
pub use crate::segments::{EdgeId, LineSegment, SegmentGroup};
pub use crate::select::{CancelFlag, ResidualEvaluator, Selection, SelectionBudget};

pub use crate::diagnostics::PipelineReport;

// --- Prelude ---------------------------------------------------------------

/// Small prelude for wiring a session.
pub mod prelude {
    pub use crate::{
        CalibrationSolver, CameraProperties, DistortionRectifier, ExternalError, LineDetector,
        LineSegment, RectifyParams, SegmentGroup, SolverOutput, Undistorter,
    };
}

// --- Stage-level API -------------------------------------------------------

pub mod stages {
    pub use crate::cluster::{cluster_segments, pair_error};
    pub use crate::filter::filter_segments;
    pub use crate::segments::group_by_edge;
    pub use crate::select::select_groups;
}
