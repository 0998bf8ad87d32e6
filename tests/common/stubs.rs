use image::{DynamicImage, GrayImage};
use radial_rectify::{
    CalibrationSolver, CameraProperties, ExternalError, LineDetector, LineSegment, SegmentGroup,
    SolverOutput, Undistorter,
};
use std::cell::RefCell;
use std::rc::Rc;

/// Replays a fixed list of segments.
pub struct FixedDetector(pub Vec<LineSegment>);

impl LineDetector for FixedDetector {
    fn detect(&mut self, _gray: &GrayImage) -> Result<Vec<LineSegment>, ExternalError> {
        Ok(self.0.clone())
    }
}

pub struct FailingDetector;

impl LineDetector for FailingDetector {
    fn detect(&mut self, _gray: &GrayImage) -> Result<Vec<LineSegment>, ExternalError> {
        Err("detector offline".into())
    }
}

/// Residual grows by 10 for every group belonging to `bad_edge`; constant
/// otherwise, so only that group is ever worth removing.
pub struct PenaltySolver {
    pub bad_edge: i64,
    pub params: Vec<f64>,
    pub calls: Rc<RefCell<usize>>,
}

impl PenaltySolver {
    pub fn new(bad_edge: i64, params: Vec<f64>) -> Self {
        Self {
            bad_edge,
            params,
            calls: Rc::new(RefCell::new(0)),
        }
    }
}

impl CalibrationSolver for PenaltySolver {
    fn solve(
        &mut self,
        _gray: &GrayImage,
        groups: &[SegmentGroup],
    ) -> Result<SolverOutput, ExternalError> {
        *self.calls.borrow_mut() += 1;
        let bad = groups
            .iter()
            .filter(|g| g.first().map(|s| s.edge.0) == Some(self.bad_edge))
            .count();
        Ok(SolverOutput {
            params: self.params.clone(),
            residual: 1.0 + 10.0 * bad as f64,
        })
    }
}

/// Returns the input unchanged and records the requested alpha.
#[derive(Default)]
pub struct IdentityWarp {
    pub alphas: Rc<RefCell<Vec<f64>>>,
}

impl Undistorter for IdentityWarp {
    fn undistort(
        &mut self,
        image: &DynamicImage,
        _camera: &CameraProperties,
        alpha: f64,
    ) -> Result<DynamicImage, ExternalError> {
        self.alphas.borrow_mut().push(alpha);
        Ok(image.clone())
    }
}
