//! Capabilities the pipeline consumes but does not implement.
//!
//! - [`LineDetector`]: grayscale image to an ordered list of edge-tagged
//!   segments (an EDPF/LSD style detector).
//! - [`CalibrationSolver`]: line groups to radial parameters plus a residual.
//! - [`Undistorter`]: the final image warp.
//!
//! Implementations are injected into [`DistortionRectifier`](crate::DistortionRectifier);
//! tests use deterministic stubs.

use crate::camera::CameraProperties;
use crate::error::ExternalError;
use crate::segments::{RawSegment, SegmentGroup};
use image::{DynamicImage, GrayImage};
use serde::{Deserialize, Serialize};

pub trait LineDetector {
    /// Segments in emission order; consecutive segments of one contour share
    /// an edge id.
    fn detect(&mut self, gray: &GrayImage) -> Result<Vec<RawSegment>, ExternalError>;
}

/// Result of one solver call.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SolverOutput {
    /// Radial coefficients; the first two become `k1`, `k2`.
    pub params: Vec<f64>,
    /// Fit residual, lower is better.
    pub residual: f64,
}

pub trait CalibrationSolver {
    fn solve(
        &mut self,
        gray: &GrayImage,
        groups: &[SegmentGroup],
    ) -> Result<SolverOutput, ExternalError>;
}

pub trait Undistorter {
    /// `alpha` is already validated to lie in `[0, 1]`.
    fn undistort(
        &mut self,
        image: &DynamicImage,
        camera: &CameraProperties,
        alpha: f64,
    ) -> Result<DynamicImage, ExternalError>;
}
