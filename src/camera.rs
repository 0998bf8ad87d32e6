//! Camera description handed to the undistortion warp.

use nalgebra::Matrix3;
use serde::{Deserialize, Serialize};

/// `alpha` keeping only valid pixels after undistortion.
pub const UNDIST_VALID: f64 = 0.0;
/// `alpha` keeping the whole (possibly black-bordered) field of view.
pub const UNDIST_FULL: f64 = 1.0;

/// Pixel dimensions of the current image.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageSize {
    pub width: u32,
    pub height: u32,
}

impl ImageSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub fn center(&self) -> [f64; 2] {
        [self.width as f64 / 2.0, self.height as f64 / 2.0]
    }
}

/// Intrinsics and distortion coefficients in OpenCV order `[k1, k2, p1, p2]`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CameraProperties {
    pub intrinsic_matrix: Matrix3<f64>,
    pub distortion_params: [f64; 4],
}

impl CameraProperties {
    /// Unit focal lengths with the principal point at the image centre.
    ///
    /// Only the two radial terms come from the solver; the tangential terms
    /// stay zero.
    pub fn from_radial(size: ImageSize, k1: f64, k2: f64) -> Self {
        let [cx, cy] = size.center();
        let intrinsic_matrix = Matrix3::new(
            1.0, 0.0, cx, //
            0.0, 1.0, cy, //
            0.0, 0.0, 1.0,
        );
        Self {
            intrinsic_matrix,
            distortion_params: [k1, k2, 0.0, 0.0],
        }
    }

    pub fn principal_point(&self) -> [f64; 2] {
        [self.intrinsic_matrix[(0, 2)], self.intrinsic_matrix[(1, 2)]]
    }
}

/// True when `alpha` lies within `[UNDIST_VALID, UNDIST_FULL]`.
pub fn alpha_in_range(alpha: f64) -> bool {
    (UNDIST_VALID..=UNDIST_FULL).contains(&alpha)
}
