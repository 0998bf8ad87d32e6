use radial_rectify::cluster::cluster_segments;
use radial_rectify::config::group_lines;
use radial_rectify::diagnostics::{ClusterDiagnostics, FilterDiagnostics, TimingBreakdown};
use radial_rectify::filter::filter_segments;
use radial_rectify::io::{read_json_file, write_json_file};
use radial_rectify::segments::{group_by_edge, segment_count, RawSegment, SegmentGroup};
use radial_rectify::ImageSize;
use serde::Serialize;
use std::env;
use std::path::Path;
use std::time::Instant;

fn main() {
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let config_path = env::args().nth(1).ok_or_else(usage)?;
    let config = group_lines::load_config(Path::new(&config_path))?;
    let image_size = config.resolve_image_size()?;

    let raw: Vec<RawSegment> = read_json_file(&config.input)?;
    let edges = group_by_edge(&raw);

    let started = Instant::now();
    let mut timings = TimingBreakdown::default();
    let (filtered, filter) = timings
        .time("filter", || filter_segments(&edges, image_size, &config.filter))
        .map_err(|e| e.to_string())?;
    let (groups, cluster) = timings
        .time("cluster", || cluster_segments(&filtered, &config.cluster))
        .map_err(|e| e.to_string())?;
    timings.finish(started);

    let report = GroupLinesReport {
        image_size,
        raw_segments: raw.len(),
        edge_groups: edges.len(),
        edge_segments: segment_count(&edges),
        filter,
        cluster,
        timings,
        groups,
    };
    write_json_file(&config.output.groups_json, &report)?;

    println!(
        "{} raw segments -> {} edges -> {} filtered -> {} clusters",
        report.raw_segments,
        report.edge_groups,
        report.filter.groups_out,
        report.groups.len()
    );
    println!(
        "Saved line groups to {}",
        config.output.groups_json.display()
    );
    Ok(())
}

fn usage() -> String {
    "Usage: group_lines <config.json>".to_string()
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GroupLinesReport {
    image_size: ImageSize,
    raw_segments: usize,
    edge_groups: usize,
    edge_segments: usize,
    filter: FilterDiagnostics,
    cluster: ClusterDiagnostics,
    timings: TimingBreakdown,
    groups: Vec<SegmentGroup>,
}
