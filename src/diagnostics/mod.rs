//! Serializable diagnostics for rectification runs.
//!
//! Every stage reports its own counters (`FilterDiagnostics`,
//! `ClusterDiagnostics`, `SelectionTrace`); [`PipelineReport`] bundles them with
//! the per-stage [`TimingBreakdown`] and the resulting camera.

pub mod pipeline;
pub mod timing;

pub use crate::cluster::ClusterDiagnostics;
pub use crate::filter::FilterDiagnostics;
pub use crate::select::SelectionTrace;
pub use pipeline::PipelineReport;
pub use timing::{StageTiming, TimingBreakdown};
