//! Group selector: greedy backward elimination driven by solver residuals.
//!
//! Each round evaluates the current set once (the baseline) and once per
//! leave-one-out subset. The subset with the lowest residual wins (first index
//! on ties); its missing group is removed for good when that residual beats
//! the baseline. Rounds stop when the set is down to `min_groups` or when no
//! single removal improves the fit.
//!
//! A round costs `len + 1` solver calls, and at most `initial - min_groups`
//! rounds run. Removals are never revisited, so the result is a local optimum.
//!
//! The solver is reached through [`ResidualEvaluator`], so the selector can be
//! driven by any closure returning a residual. A [`SelectionBudget`] is
//! checked before each call to bound the total wall time or to abort on
//! request from another thread.
use crate::error::{ExternalError, RectifyError, Result};
use crate::params::SelectParams;
use crate::segments::SegmentGroup;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Computes the fit residual of a set of line groups; lower is better.
pub trait ResidualEvaluator {
    fn evaluate(&mut self, groups: &[SegmentGroup]) -> std::result::Result<f64, ExternalError>;
}

impl<F> ResidualEvaluator for F
where
    F: FnMut(&[SegmentGroup]) -> std::result::Result<f64, ExternalError>,
{
    fn evaluate(&mut self, groups: &[SegmentGroup]) -> std::result::Result<f64, ExternalError> {
        self(groups)
    }
}

/// Shared flag used to abort a running selection.
#[derive(Clone, Debug, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Limits applied around every residual evaluation.
#[derive(Clone, Debug, Default)]
pub struct SelectionBudget {
    /// Wall-time limit for the whole selection.
    pub max_duration: Option<Duration>,
    pub cancel: Option<CancelFlag>,
}

impl SelectionBudget {
    pub fn unlimited() -> Self {
        Self::default()
    }

    pub fn with_timeout(mut self, limit: Duration) -> Self {
        self.max_duration = Some(limit);
        self
    }

    pub fn with_cancel(mut self, flag: CancelFlag) -> Self {
        self.cancel = Some(flag);
        self
    }

    fn check(&self, started: Instant) -> Result<()> {
        if self.cancel.as_ref().is_some_and(CancelFlag::is_cancelled) {
            return Err(RectifyError::Cancelled);
        }
        if let Some(limit) = self.max_duration {
            let elapsed = started.elapsed();
            if elapsed >= limit {
                return Err(RectifyError::TimedOut {
                    elapsed_ms: elapsed.as_secs_f64() * 1000.0,
                });
            }
        }
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StopReason {
    /// The set reached `min_groups` (or started at or below it).
    ReachedMinimum,
    /// No single removal lowered the residual.
    NoImprovement,
}

/// One accepted removal.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Elimination {
    /// Index of the removed group within the set of that round.
    pub index: usize,
    pub baseline: f64,
    pub residual: f64,
}

/// Record of a selection run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectionTrace {
    pub initial_groups: usize,
    pub final_groups: usize,
    pub eliminations: Vec<Elimination>,
    pub evaluations: usize,
    pub stop: StopReason,
}

/// Selected groups plus the trace that produced them.
#[derive(Clone, Debug)]
pub struct Selection {
    pub groups: Vec<SegmentGroup>,
    pub trace: SelectionTrace,
}

struct Evaluations<'a, E: ?Sized> {
    evaluator: &'a mut E,
    budget: &'a SelectionBudget,
    started: Instant,
    count: usize,
}

impl<E: ResidualEvaluator + ?Sized> Evaluations<'_, E> {
    fn residual(&mut self, groups: &[SegmentGroup]) -> Result<f64> {
        self.budget.check(self.started)?;
        self.count += 1;
        let value = self
            .evaluator
            .evaluate(groups)
            .map_err(|e| RectifyError::external("calibration solver", e))?;
        if !value.is_finite() {
            return Err(RectifyError::MalformedSolverOutput(format!(
                "non-finite residual {value}"
            )));
        }
        Ok(value)
    }
}

/// Shrinks `groups` by greedy backward elimination.
///
/// Evaluator failures abort the run unchanged (no retry); a non-finite
/// residual is reported as `MalformedSolverOutput`.
pub fn select_groups<E>(
    mut groups: Vec<SegmentGroup>,
    evaluator: &mut E,
    params: &SelectParams,
    budget: &SelectionBudget,
) -> Result<Selection>
where
    E: ResidualEvaluator + ?Sized,
{
    let initial_groups = groups.len();
    let mut evals = Evaluations {
        evaluator,
        budget,
        started: Instant::now(),
        count: 0,
    };
    let mut eliminations = Vec::new();
    if initial_groups <= params.min_groups {
        warn!(
            "select: {} groups, already at or below the minimum of {}; nothing to eliminate",
            initial_groups, params.min_groups
        );
    }

    let stop = loop {
        if groups.len() <= params.min_groups {
            break StopReason::ReachedMinimum;
        }

        let baseline = evals.residual(&groups)?;
        let mut best: Option<(usize, f64)> = None;
        for k in 0..groups.len() {
            let held_out = groups.remove(k);
            let residual = evals.residual(&groups);
            groups.insert(k, held_out);
            let residual = residual?;
            if best.map_or(true, |(_, r)| residual < r) {
                best = Some((k, residual));
            }
        }

        match best {
            Some((index, residual)) if residual < baseline => {
                info!(
                    "eliminating line segment group #{} (residual {:.6} -> {:.6})",
                    index, baseline, residual
                );
                groups.remove(index);
                eliminations.push(Elimination {
                    index,
                    baseline,
                    residual,
                });
            }
            _ => break StopReason::NoImprovement,
        }
    };

    debug!(
        "select: {} -> {} groups after {} evaluations ({:?})",
        initial_groups,
        groups.len(),
        evals.count,
        stop
    );
    let trace = SelectionTrace {
        initial_groups,
        final_groups: groups.len(),
        eliminations,
        evaluations: evals.count,
        stop,
    };
    Ok(Selection { groups, trace })
}
