use crate::geometry::{line_through, normalize_line};
use nalgebra::Vector3;
use serde::{Deserialize, Serialize};
use std::cell::OnceCell;

/// Identifier of the edge contour a detector traced a segment along.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EdgeId(pub i64);

/// Line segment as emitted by the line detector.
///
/// `a`, `b` and `invert` belong to the detector's own line parametrisation and
/// are carried through unchanged. Pipeline stages regroup segments but never
/// edit them.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LineSegment {
    pub start: [f64; 2],
    pub end: [f64; 2],
    #[serde(default)]
    pub a: f64,
    #[serde(default)]
    pub b: f64,
    pub edge: EdgeId,
    #[serde(default)]
    pub invert: bool,
    #[serde(skip)]
    support: OnceCell<Option<Vector3<f64>>>,
}

/// Detector output is consumed as-is.
pub type RawSegment = LineSegment;

/// Ordered run of segments. Before clustering one group holds one edge
/// contour; afterwards it holds one cluster of 2..=4 collinear segments.
pub type SegmentGroup = Vec<LineSegment>;

impl LineSegment {
    pub fn new(start: [f64; 2], end: [f64; 2], edge: EdgeId) -> Self {
        Self::with_detector_fields(start, end, edge, 0.0, 0.0, false)
    }

    pub fn with_detector_fields(
        start: [f64; 2],
        end: [f64; 2],
        edge: EdgeId,
        a: f64,
        b: f64,
        invert: bool,
    ) -> Self {
        Self {
            start,
            end,
            a,
            b,
            edge,
            invert,
            support: OnceCell::new(),
        }
    }

    pub fn length_sq(&self) -> f64 {
        let dx = self.end[0] - self.start[0];
        let dy = self.end[1] - self.start[1];
        dx * dx + dy * dy
    }

    /// Normalized supporting line, `None` for a zero-length segment.
    pub fn support_line(&self) -> Option<Vector3<f64>> {
        *self
            .support
            .get_or_init(|| normalize_line(&line_through(self.start, self.end)))
    }
}

impl PartialEq for LineSegment {
    fn eq(&self, other: &Self) -> bool {
        self.start == other.start
            && self.end == other.end
            && self.a == other.a
            && self.b == other.b
            && self.edge == other.edge
            && self.invert == other.invert
    }
}
