//! Segment filter: drops segments that carry little radial-distortion signal.
//!
//! Two tests are applied to every segment of every edge group, in order:
//! - length: segments shorter than `length_threshold` are too noisy to
//!   constrain a line;
//! - centrality: the perpendicular distance from the image centre to the
//!   supporting line. Lines passing close to the centre are nearly unaffected
//!   by radial distortion.
//!
//! Survivors keep their detector order. A group left with one segment or
//! fewer is dropped, since every downstream stage reasons about pairs.
use crate::camera::ImageSize;
use crate::error::{RectifyError, Result};
use crate::geometry::signed_distance;
use crate::params::FilterParams;
use crate::segments::SegmentGroup;
use log::debug;
use serde::{Deserialize, Serialize};

/// Counters emitted by [`filter_segments`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterDiagnostics {
    pub groups_in: usize,
    pub groups_out: usize,
    pub segments_in: usize,
    pub segments_out: usize,
    pub rejected_short: usize,
    pub rejected_central: usize,
    pub dropped_groups: usize,
}

/// Filters short and near-centre segments out of per-edge groups.
///
/// Fails with `InvalidInput` on an empty group list and with `InvalidState`
/// when `size` has no pixels. A zero-length segment that survives the length
/// test (only possible with a non-positive threshold) is reported as
/// `DegenerateSegment`.
pub fn filter_segments(
    groups: &[SegmentGroup],
    size: ImageSize,
    params: &FilterParams,
) -> Result<(Vec<SegmentGroup>, FilterDiagnostics)> {
    if groups.is_empty() {
        return Err(RectifyError::InvalidInput(
            "empty list of line segments found".into(),
        ));
    }
    if size.is_empty() {
        return Err(RectifyError::InvalidState("image is not set"));
    }

    let center = size.center();
    let min_len_sq = params.length_threshold * params.length_threshold;
    let mut diag = FilterDiagnostics {
        groups_in: groups.len(),
        ..Default::default()
    };

    let mut out = Vec::with_capacity(groups.len());
    for group in groups {
        let mut kept = SegmentGroup::with_capacity(group.len());
        for seg in group {
            diag.segments_in += 1;
            if seg.length_sq() < min_len_sq {
                diag.rejected_short += 1;
                continue;
            }
            let line = seg
                .support_line()
                .ok_or(RectifyError::DegenerateSegment { edge: seg.edge })?;
            if signed_distance(&line, center).abs() < params.centrality_threshold {
                diag.rejected_central += 1;
                continue;
            }
            kept.push(seg.clone());
        }
        if kept.len() > 1 {
            diag.segments_out += kept.len();
            out.push(kept);
        } else {
            diag.dropped_groups += 1;
        }
    }
    diag.groups_out = out.len();

    debug!(
        "filter: {} -> {} groups, {} -> {} segments (short={}, central={})",
        diag.groups_in,
        diag.groups_out,
        diag.segments_in,
        diag.segments_out,
        diag.rejected_short,
        diag.rejected_central
    );
    Ok((out, diag))
}
