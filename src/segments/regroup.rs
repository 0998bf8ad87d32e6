use super::{LineSegment, SegmentGroup};

/// Splits the detector's flat, ordered output into one group per edge.
///
/// Every segment except the last is visited once, looking one step ahead:
/// - a segment on the current edge joins the current group;
/// - a segment on another edge opens a new group only when its successor
///   shares its edge, otherwise it is skipped and the current edge stays open.
///
/// The final segment of the list is never visited, so it only ever serves as
/// look-ahead. A group opened by the second-to-last segment is left with a
/// single member and dropped, since no pairwise reasoning applies to it.
pub fn group_by_edge(segments: &[LineSegment]) -> Vec<SegmentGroup> {
    let mut groups: Vec<SegmentGroup> = Vec::new();
    let mut current = None;
    for pair in segments.windows(2) {
        let (seg, next) = (&pair[0], &pair[1]);
        if current == Some(seg.edge) {
            if let Some(group) = groups.last_mut() {
                group.push(seg.clone());
            }
        } else if seg.edge == next.edge {
            current = Some(seg.edge);
            groups.push(vec![seg.clone()]);
        }
    }
    if groups.last().is_some_and(|g| g.len() < 2) {
        groups.pop();
    }
    groups
}
