use crate::camera::{CameraProperties, ImageSize};
use crate::cluster::ClusterDiagnostics;
use crate::diagnostics::TimingBreakdown;
use crate::filter::FilterDiagnostics;
use crate::select::SelectionTrace;
use serde::Serialize;

/// Trace of a full [`DistortionRectifier::rectify`](crate::DistortionRectifier::rectify) run.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PipelineReport {
    pub input: ImageSize,
    pub timings: TimingBreakdown,
    pub detected_segments: usize,
    pub edge_groups: usize,
    pub filter: FilterDiagnostics,
    pub cluster: ClusterDiagnostics,
    pub selection: SelectionTrace,
    pub camera: CameraProperties,
}

impl PipelineReport {
    /// One-line summary of the group counts through the pipeline.
    pub fn summary(&self) -> String {
        format!(
            "{}x{}: {} segments in {} edges -> {} filtered -> {} clusters -> {} selected, k=[{:.6e}, {:.6e}] in {:.1} ms",
            self.input.width,
            self.input.height,
            self.detected_segments,
            self.edge_groups,
            self.filter.groups_out,
            self.cluster.clusters,
            self.selection.final_groups,
            self.camera.distortion_params[0],
            self.camera.distortion_params[1],
            self.timings.total_ms
        )
    }
}
