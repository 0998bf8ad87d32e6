use radial_rectify::{EdgeId, LineSegment};

pub const WIDTH: u32 = 400;
pub const HEIGHT: u32 = 300;

/// Contour through the image centre; rejected by the centrality test.
pub const CENTRAL_EDGE: i64 = 7;
/// Contour made of 10 px pieces; rejected by the length test.
pub const SHORT_EDGE: i64 = 8;

/// Four collinear 40 px pieces separated by 10 px gaps.
fn contour(edge: i64, horizontal: bool, offset: f64) -> Vec<LineSegment> {
    (0..4)
        .map(|k| {
            let t0 = 10.0 + 50.0 * k as f64;
            let t1 = t0 + 40.0;
            let (start, end) = if horizontal {
                ([t0, offset], [t1, offset])
            } else {
                ([offset, t0], [offset, t1])
            };
            LineSegment::new(start, end, EdgeId(edge))
        })
        .collect()
}

/// Detector output for a 400x300 frame: seven border contours plus one
/// central and one fragmented contour, in emission order.
pub fn detected_segments() -> Vec<LineSegment> {
    let mut out = Vec::new();
    out.extend(contour(0, true, 20.0));
    out.extend(contour(1, true, 40.0));
    out.extend(contour(2, true, 260.0));
    out.extend(contour(3, true, 280.0));
    out.extend(contour(4, false, 20.0));
    out.extend(contour(5, false, 40.0));
    out.extend(contour(6, false, 380.0));
    out.extend(contour(CENTRAL_EDGE, true, 150.0));
    out.extend((0..3).map(|k| {
        let x = 300.0 + 15.0 * k as f64;
        LineSegment::new([x, 60.0], [x + 10.0, 60.0], EdgeId(SHORT_EDGE))
    }));
    out
}
