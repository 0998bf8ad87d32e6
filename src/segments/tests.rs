use super::*;

fn seg_on(edge: i64, x: f64) -> LineSegment {
    LineSegment::new([x, 0.0], [x + 10.0, 0.0], EdgeId(edge))
}

fn edges_of(groups: &[SegmentGroup]) -> Vec<Vec<i64>> {
    groups
        .iter()
        .map(|g| g.iter().map(|s| s.edge.0).collect())
        .collect()
}

#[test]
fn consecutive_runs_become_groups() {
    let flat = vec![
        seg_on(1, 0.0),
        seg_on(1, 10.0),
        seg_on(1, 20.0),
        seg_on(2, 0.0),
        seg_on(2, 10.0),
        seg_on(2, 20.0),
    ];
    let groups = group_by_edge(&flat);
    assert_eq!(edges_of(&groups), vec![vec![1, 1, 1], vec![2, 2]]);
    assert_eq!(groups[0][1].start, [10.0, 0.0]);
    assert_eq!(segment_count(&groups), 5);
}

#[test]
fn last_segment_is_never_grouped() {
    let flat = vec![seg_on(1, 0.0), seg_on(1, 10.0), seg_on(1, 20.0)];
    let groups = group_by_edge(&flat);
    assert_eq!(edges_of(&groups), vec![vec![1, 1]]);
    assert_eq!(groups[0][1].start, [10.0, 0.0]);
}

#[test]
fn pair_closing_the_list_is_dropped() {
    let flat = vec![
        seg_on(1, 0.0),
        seg_on(1, 10.0),
        seg_on(1, 20.0),
        seg_on(2, 0.0),
        seg_on(2, 10.0),
    ];
    let groups = group_by_edge(&flat);
    assert_eq!(edges_of(&groups), vec![vec![1, 1, 1]]);
}

#[test]
fn singleton_runs_are_dropped() {
    let flat = vec![
        seg_on(7, 0.0),
        seg_on(1, 0.0),
        seg_on(1, 10.0),
        seg_on(8, 0.0),
        seg_on(2, 0.0),
        seg_on(2, 10.0),
        seg_on(9, 0.0),
    ];
    let groups = group_by_edge(&flat);
    assert_eq!(edges_of(&groups), vec![vec![1, 1], vec![2, 2]]);
}

#[test]
fn isolated_segment_does_not_close_the_current_edge() {
    let flat = vec![
        seg_on(1, 0.0),
        seg_on(1, 10.0),
        seg_on(2, 0.0),
        seg_on(1, 20.0),
        seg_on(1, 30.0),
    ];
    let groups = group_by_edge(&flat);
    assert_eq!(edges_of(&groups), vec![vec![1, 1, 1]]);
    assert_eq!(groups[0][2].start, [20.0, 0.0]);
}

#[test]
fn reappearing_edge_starts_new_group() {
    let flat = vec![
        seg_on(1, 0.0),
        seg_on(1, 10.0),
        seg_on(2, 0.0),
        seg_on(2, 10.0),
        seg_on(1, 20.0),
        seg_on(1, 30.0),
        seg_on(3, 0.0),
    ];
    let groups = group_by_edge(&flat);
    assert_eq!(edges_of(&groups), vec![vec![1, 1], vec![2, 2], vec![1, 1]]);
}

#[test]
fn empty_detection_yields_no_groups() {
    assert!(group_by_edge(&[]).is_empty());
    assert!(group_by_edge(&[seg_on(3, 0.0)]).is_empty());
    assert!(group_by_edge(&[seg_on(3, 0.0), seg_on(3, 10.0)]).is_empty());
}

#[test]
fn detector_fields_pass_through() {
    let s = LineSegment::with_detector_fields([1.0, 2.0], [3.0, 4.0], EdgeId(5), 0.25, -1.5, true);
    let groups = group_by_edge(&[s.clone(), s.clone(), s.clone()]);
    let out = &groups[0][0];
    assert_eq!(out, &s);
    assert_eq!(out.a, 0.25);
    assert_eq!(out.b, -1.5);
    assert!(out.invert);
}

#[test]
fn support_line_is_cached_and_normalized() {
    let s = LineSegment::new([0.0, 0.0], [3.0, 4.0], EdgeId(0));
    let line = s.support_line().unwrap();
    assert!(((line.x * line.x + line.y * line.y) - 1.0).abs() < 1e-12);
    assert_eq!(s.support_line(), Some(line));
    assert_eq!(s.length_sq(), 25.0);

    let degenerate = LineSegment::new([2.0, 2.0], [2.0, 2.0], EdgeId(0));
    assert!(degenerate.support_line().is_none());
}

#[test]
fn segments_deserialize_with_detector_defaults() {
    let json = r#"{"start": [0.0, 1.0], "end": [2.0, 3.0], "edge": 4}"#;
    let s: LineSegment = serde_json::from_str(json).unwrap();
    assert_eq!(s.edge, EdgeId(4));
    assert_eq!(s.a, 0.0);
    assert!(!s.invert);
}
