//! Segment clusterer: greedy region growing over each edge ring.
//!
//! Segments of one edge group are treated as a ring: index `n - 1` neighbours
//! index `0`. Every ring link `i -> i + 1` gets an adjacency error (see
//! [`pair_error`]); the clusterer then repeatedly
//!
//! 1. picks the link with the smallest error (first index wins ties) and stops
//!    once that error exceeds `distance_threshold`,
//! 2. invalidates the picked link so it can never seed again, whether or not
//!    the seed survives,
//! 3. rejects the seed when the two segments disagree in orientation by
//!    `angle_threshold_deg` or more, or when either already belongs to an
//!    earlier cluster,
//! 4. grows the seed by at most one segment backwards and one forwards, each
//!    accepted only when it is unused, agrees with the seed's first segment in
//!    orientation, and its own link error is below `distance_threshold`,
//! 5. emits the 2..=4 segments as one cluster.
//!
//! Step 2 is what bounds the loop: every round consumes one finite error, so a
//! ring of `n` segments terminates after at most `n + 1` rounds. Segments that
//! never join a cluster are dropped.
use crate::error::{RectifyError, Result};
use crate::geometry::{angle_difference_deg, orientation_deg, signed_distance};
use crate::params::ClusterParams;
use crate::segments::{LineSegment, SegmentGroup};
use log::debug;
use serde::{Deserialize, Serialize};

/// Counters emitted by [`cluster_segments`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClusterDiagnostics {
    pub groups_in: usize,
    /// Groups with fewer than two segments; no link exists to seed from.
    pub skipped_groups: usize,
    pub clusters: usize,
    pub rejected_by_angle: usize,
    pub rejected_reused: usize,
    /// Segments not absorbed into any cluster.
    pub dropped_segments: usize,
}

/// Collinearity error between two segments, in pixels.
///
/// Each segment's supporting line is measured against the nearer endpoint of
/// the other segment; the smaller of the two distances is returned. Zero when
/// the segments share an endpoint or lie on one line.
pub fn pair_error(s1: &LineSegment, s2: &LineSegment) -> Result<f64> {
    let d12 = nearest_endpoint_distance(s1, s2)?;
    let d21 = nearest_endpoint_distance(s2, s1)?;
    Ok(d12.min(d21))
}

fn nearest_endpoint_distance(line_of: &LineSegment, other: &LineSegment) -> Result<f64> {
    let line = line_of
        .support_line()
        .ok_or(RectifyError::DegenerateSegment { edge: line_of.edge })?;
    let d_start = signed_distance(&line, other.start).abs();
    let d_end = signed_distance(&line, other.end).abs();
    Ok(d_start.min(d_end))
}

/// Groups adjacent, collinear segments of every edge ring into clusters.
///
/// Fails with `InvalidInput` on an empty group list, and with
/// `DegenerateSegment` when a ring contains a zero-length segment.
pub fn cluster_segments(
    groups: &[SegmentGroup],
    params: &ClusterParams,
) -> Result<(Vec<SegmentGroup>, ClusterDiagnostics)> {
    if groups.is_empty() {
        return Err(RectifyError::InvalidInput(
            "empty line segment list found".into(),
        ));
    }

    let mut diag = ClusterDiagnostics {
        groups_in: groups.len(),
        ..Default::default()
    };
    let mut out = Vec::new();
    for (group_idx, group) in groups.iter().enumerate() {
        if group.len() < 2 {
            diag.skipped_groups += 1;
            diag.dropped_segments += group.len();
            continue;
        }
        let ring = RingClusterer::new(group, params)?.run();
        debug!(
            "cluster: group {} ({} segments) -> {} clusters, angle rejects={}, reuse rejects={}",
            group_idx,
            group.len(),
            ring.clusters.len(),
            ring.rejected_by_angle,
            ring.rejected_reused
        );
        diag.rejected_by_angle += ring.rejected_by_angle;
        diag.rejected_reused += ring.rejected_reused;
        let absorbed: usize = ring.clusters.iter().map(Vec::len).sum();
        diag.dropped_segments += group.len() - absorbed;
        for indices in ring.clusters {
            out.push(indices.into_iter().map(|i| group[i].clone()).collect());
        }
    }
    diag.clusters = out.len();
    Ok((out, diag))
}

/// Index-level result of clustering one ring.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct RingClusters {
    pub clusters: Vec<Vec<usize>>,
    pub rejected_by_angle: usize,
    pub rejected_reused: usize,
}

pub(crate) struct RingClusterer {
    errors: Vec<f64>,
    orientations: Vec<f64>,
    used: Vec<bool>,
    distance_threshold: f64,
    angle_threshold_deg: f64,
}

impl RingClusterer {
    pub(crate) fn new(ring: &[LineSegment], params: &ClusterParams) -> Result<Self> {
        let n = ring.len();
        let mut errors = Vec::with_capacity(n);
        for i in 0..n {
            let err = pair_error(&ring[i], &ring[(i + 1) % n])?;
            errors.push(if err.is_finite() { err } else { f64::INFINITY });
        }
        Ok(Self {
            errors,
            orientations: ring.iter().map(orientation_deg).collect(),
            used: vec![false; n],
            distance_threshold: params.distance_threshold,
            angle_threshold_deg: params.angle_threshold_deg,
        })
    }

    pub(crate) fn run(mut self) -> RingClusters {
        let mut result = RingClusters::default();
        let n = self.errors.len();
        if n < 2 {
            return result;
        }

        while let Some(seed) = self.next_seed() {
            let second = (seed + 1) % n;
            self.errors[seed] = f64::INFINITY;

            if self.used[seed] || self.used[second] {
                result.rejected_reused += 1;
                continue;
            }
            let seed_angle = self.orientations[seed];
            if angle_difference_deg(seed_angle, self.orientations[second])
                >= self.angle_threshold_deg
            {
                result.rejected_by_angle += 1;
                continue;
            }
            self.used[seed] = true;
            self.used[second] = true;

            let mut cluster = Vec::with_capacity(4);
            let prev = (seed + n - 1) % n;
            if self.try_absorb(prev, seed_angle) {
                cluster.push(prev);
            }
            cluster.push(seed);
            cluster.push(second);
            let next = (second + 1) % n;
            if self.try_absorb(next, seed_angle) {
                cluster.push(next);
            }
            result.clusters.push(cluster);
        }
        result
    }

    /// Index of the smallest finite error within the distance threshold.
    fn next_seed(&self) -> Option<usize> {
        let mut best = 0;
        for (i, &err) in self.errors.iter().enumerate().skip(1) {
            if err < self.errors[best] {
                best = i;
            }
        }
        let min = self.errors[best];
        if !min.is_finite() || min > self.distance_threshold {
            None
        } else {
            Some(best)
        }
    }

    fn try_absorb(&mut self, idx: usize, seed_angle: f64) -> bool {
        if self.used[idx] {
            return false;
        }
        if angle_difference_deg(seed_angle, self.orientations[idx]) >= self.angle_threshold_deg {
            return false;
        }
        if self.errors[idx] >= self.distance_threshold {
            return false;
        }
        self.used[idx] = true;
        self.errors[idx] = f64::INFINITY;
        true
    }
}
