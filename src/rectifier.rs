//! Rectification session tying the stages to the current image.
//!
//! Overview
//! - Holds the current colour image and its 8-bit grayscale copy. The filter
//!   reads the image size from here; detector and solver consume the
//!   grayscale copy.
//! - Runs the injected [`LineDetector`] and regroups its output per edge.
//! - Filters, clusters and selects line groups with the session parameters.
//! - Asks the [`CalibrationSolver`] for the radial coefficients of the final
//!   groups and hands the resulting [`CameraProperties`] to the
//!   [`Undistorter`].
//!
//! [`DistortionRectifier::rectify`] chains all of the above and returns a
//! [`PipelineReport`] alongside the undistorted image.
use crate::camera::{alpha_in_range, CameraProperties, ImageSize, UNDIST_FULL, UNDIST_VALID};
use crate::cluster::{cluster_segments, ClusterDiagnostics};
use crate::diagnostics::{PipelineReport, TimingBreakdown};
use crate::error::{ExternalError, RectifyError, Result};
use crate::external::{CalibrationSolver, LineDetector, Undistorter};
use crate::filter::{filter_segments, FilterDiagnostics};
use crate::params::RectifyParams;
use crate::segments::{group_by_edge, segment_count, SegmentGroup};
use crate::select::{select_groups, Selection, SelectionBudget};
use image::imageops::FilterType;
use image::{DynamicImage, GenericImageView, GrayImage};
use log::debug;
use std::path::Path;
use std::time::Instant;

pub struct DistortionRectifier<D, S, U> {
    detector: D,
    solver: S,
    undistorter: U,
    params: RectifyParams,
    budget: SelectionBudget,
    image: Option<DynamicImage>,
    gray: Option<GrayImage>,
}

impl<D, S, U> DistortionRectifier<D, S, U>
where
    D: LineDetector,
    S: CalibrationSolver,
    U: Undistorter,
{
    pub fn new(detector: D, solver: S, undistorter: U, params: RectifyParams) -> Self {
        Self {
            detector,
            solver,
            undistorter,
            params,
            budget: SelectionBudget::unlimited(),
            image: None,
            gray: None,
        }
    }

    /// Limits applied to every solver call made during group selection.
    pub fn with_budget(mut self, budget: SelectionBudget) -> Self {
        self.budget = budget;
        self
    }

    pub fn params(&self) -> &RectifyParams {
        &self.params
    }

    /// Sets the current image and derives its grayscale copy.
    pub fn set_image(&mut self, image: DynamicImage) -> Result<()> {
        let (w, h) = image.dimensions();
        if w == 0 || h == 0 {
            return Err(RectifyError::InvalidState("empty image found, not setting it"));
        }
        self.gray = Some(image.to_luma8());
        self.image = Some(image);
        debug!("DistortionRectifier::set_image {}x{}", w, h);
        Ok(())
    }

    /// Loads an image from disk, rescales it by `params.load.scale` and sets it.
    pub fn set_image_from_path(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        if path.as_os_str().is_empty() {
            return Err(RectifyError::InvalidInput("empty image path".into()));
        }
        let scale = self.params.load.scale;
        if !scale.is_finite() || scale <= 0.0 {
            return Err(RectifyError::InvalidInput(format!(
                "load scale must be positive, got {scale}"
            )));
        }
        let image = image::open(path)?;
        let image = if scale == 1.0 {
            image
        } else {
            let (w, h) = image.dimensions();
            let nw = ((w as f64 * scale).round() as u32).max(1);
            let nh = ((h as f64 * scale).round() as u32).max(1);
            image.resize_exact(nw, nh, FilterType::Triangle)
        };
        self.set_image(image)
    }

    /// Copy of the current colour image.
    pub fn current_image(&self) -> Result<DynamicImage> {
        self.image
            .clone()
            .ok_or(RectifyError::InvalidState("image is not set"))
    }

    /// Copy of the current grayscale image.
    pub fn current_gray_image(&self) -> Result<GrayImage> {
        self.gray
            .clone()
            .ok_or(RectifyError::InvalidState("image is not set"))
    }

    pub fn image_size(&self) -> Result<ImageSize> {
        let gray = self
            .gray
            .as_ref()
            .ok_or(RectifyError::InvalidState("image is not set"))?;
        Ok(ImageSize::new(gray.width(), gray.height()))
    }

    /// Runs the detector on the grayscale image; one group per edge run.
    pub fn line_segments(&mut self) -> Result<Vec<SegmentGroup>> {
        let gray = self
            .gray
            .as_ref()
            .ok_or(RectifyError::InvalidState("nothing to do, image is not set"))?;
        let raw = self
            .detector
            .detect(gray)
            .map_err(|e| RectifyError::external("line detector", e))?;
        let groups = group_by_edge(&raw);
        debug!(
            "DistortionRectifier::line_segments {} raw -> {} edge groups",
            raw.len(),
            groups.len()
        );
        Ok(groups)
    }

    pub fn filter_line_segments(
        &self,
        groups: &[SegmentGroup],
    ) -> Result<(Vec<SegmentGroup>, FilterDiagnostics)> {
        if groups.is_empty() {
            return Err(RectifyError::InvalidInput(
                "empty list of line segments found".into(),
            ));
        }
        filter_segments(groups, self.image_size()?, &self.params.filter)
    }

    pub fn group_line_segments(
        &self,
        groups: &[SegmentGroup],
    ) -> Result<(Vec<SegmentGroup>, ClusterDiagnostics)> {
        cluster_segments(groups, &self.params.cluster)
    }

    /// Greedy elimination of groups using the solver residual.
    pub fn select_line_segment_groups(&mut self, groups: Vec<SegmentGroup>) -> Result<Selection> {
        let gray = self.gray.as_ref().ok_or(RectifyError::InvalidState(
            "image not set, set the image and find the line groups first",
        ))?;
        let solver = &mut self.solver;
        let mut evaluate = |groups: &[SegmentGroup]| -> std::result::Result<f64, ExternalError> {
            solver.solve(gray, groups).map(|out| out.residual)
        };
        select_groups(groups, &mut evaluate, &self.params.select, &self.budget)
    }

    /// Camera with unit focal length, centred principal point and the solver's
    /// first two coefficients as `k1`, `k2`.
    pub fn camera_params(&mut self, groups: &[SegmentGroup]) -> Result<CameraProperties> {
        let gray = self
            .gray
            .as_ref()
            .ok_or(RectifyError::InvalidState("image is not set, set the image first"))?;
        if groups.is_empty() {
            return Err(RectifyError::InvalidInput("empty list of line segments".into()));
        }
        let out = self
            .solver
            .solve(gray, groups)
            .map_err(|e| RectifyError::external("calibration solver", e))?;
        let (k1, k2) = match out.params.as_slice() {
            [k1, k2, ..] if k1.is_finite() && k2.is_finite() => (*k1, *k2),
            other => {
                return Err(RectifyError::MalformedSolverOutput(format!(
                    "expected two finite radial parameters, got {other:?}"
                )))
            }
        };
        Ok(CameraProperties::from_radial(
            ImageSize::new(gray.width(), gray.height()),
            k1,
            k2,
        ))
    }

    /// Undistorts the current image; `alpha` must lie in `[0, 1]`.
    pub fn undistort_with(&mut self, camera: &CameraProperties, alpha: f64) -> Result<DynamicImage> {
        let image = self
            .image
            .as_ref()
            .ok_or(RectifyError::InvalidState("image is not set"))?;
        if !alpha_in_range(alpha) {
            return Err(RectifyError::InvalidInput(format!(
                "alpha must be between {UNDIST_VALID} and {UNDIST_FULL}, got {alpha}"
            )));
        }
        self.undistorter
            .undistort(image, camera, alpha)
            .map_err(|e| RectifyError::external("undistortion", e))
    }

    /// Detect, filter, cluster, select, solve and undistort in one go.
    pub fn rectify(&mut self) -> Result<(DynamicImage, PipelineReport)> {
        let input = self.image_size()?;
        let started = Instant::now();
        let mut timings = TimingBreakdown::default();

        let segments = timings.time("detect", || self.line_segments())?;
        let detected_segments = segment_count(&segments);
        let edge_groups = segments.len();
        let (filtered, filter) = timings.time("filter", || self.filter_line_segments(&segments))?;
        let (clustered, cluster) =
            timings.time("cluster", || self.group_line_segments(&filtered))?;
        let selection = timings.time("select", || self.select_line_segment_groups(clustered))?;
        let camera = timings.time("solve", || self.camera_params(&selection.groups))?;
        let alpha = self.params.undistort.alpha;
        let image = timings.time("undistort", || self.undistort_with(&camera, alpha))?;
        timings.finish(started);

        let report = PipelineReport {
            input,
            timings,
            detected_segments,
            edge_groups,
            filter,
            cluster,
            selection: selection.trace,
            camera,
        };
        debug!("DistortionRectifier::rectify {}", report.summary());
        Ok((image, report))
    }
}
