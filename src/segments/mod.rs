//! Segment value types and regrouping of raw detector output.
//!
//! The line detector emits a flat, ordered list of segments, each tagged with
//! the edge contour it was traced along. Consecutive segments of one contour
//! form a logical ring around that edge; [`group_by_edge`] turns the flat list
//! into one [`SegmentGroup`] per contour so that the filter and the clusterer
//! can reason about neighbours.

mod regroup;
mod segment;

pub use regroup::group_by_edge;
pub use segment::{EdgeId, LineSegment, RawSegment, SegmentGroup};

/// Total number of segments across all groups.
pub fn segment_count(groups: &[SegmentGroup]) -> usize {
    groups.iter().map(Vec::len).sum()
}

#[cfg(test)]
mod tests;
