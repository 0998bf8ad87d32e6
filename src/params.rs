//! Parameter types configuring the rectification stages.
//!
//! Defaults reproduce the thresholds the pipeline was tuned with on
//! half-resolution consumer images. When working at a different resolution,
//! scale the pixel thresholds of [`FilterParams`] and [`ClusterParams`] first.

use crate::camera::UNDIST_VALID;
use serde::{Deserialize, Serialize};

/// Pipeline-wide parameters.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RectifyParams {
    pub load: LoadParams,
    pub filter: FilterParams,
    pub cluster: ClusterParams,
    pub select: SelectParams,
    pub undistort: UndistortParams,
}

/// Applied when an image is read from disk.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct LoadParams {
    /// Resize factor applied to loaded images (linear filter).
    pub scale: f64,
}

impl Default for LoadParams {
    fn default() -> Self {
        Self { scale: 0.5 }
    }
}

/// Segment filter thresholds, in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterParams {
    /// Segments shorter than this are dropped.
    pub length_threshold: f64,
    /// Segments whose supporting line passes closer than this to the image
    /// centre are dropped.
    pub centrality_threshold: f64,
}

impl Default for FilterParams {
    fn default() -> Self {
        Self {
            length_threshold: 25.0,
            centrality_threshold: 50.0,
        }
    }
}

/// Clustering thresholds.
///
/// - `distance_threshold`: largest pair error (pixels) that may seed or grow a
///   cluster.
/// - `angle_threshold_deg`: orientation tolerance between the seed and any
///   segment joining it.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClusterParams {
    pub distance_threshold: f64,
    pub angle_threshold_deg: f64,
}

impl Default for ClusterParams {
    fn default() -> Self {
        Self {
            distance_threshold: 800.0,
            angle_threshold_deg: 30.0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectParams {
    /// Elimination never shrinks the group set below this count.
    pub min_groups: usize,
}

impl Default for SelectParams {
    fn default() -> Self {
        Self { min_groups: 5 }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UndistortParams {
    /// 0 keeps valid pixels only, 1 keeps the full field of view.
    pub alpha: f64,
}

impl Default for UndistortParams {
    fn default() -> Self {
        Self { alpha: UNDIST_VALID }
    }
}
