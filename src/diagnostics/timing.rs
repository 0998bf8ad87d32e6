use serde::{Deserialize, Serialize};
use std::time::Instant;

/// Wall time spent in one pipeline stage.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StageTiming {
    pub label: String,
    pub elapsed_ms: f64,
}

impl StageTiming {
    pub fn new(label: impl Into<String>, elapsed_ms: f64) -> Self {
        Self {
            label: label.into(),
            elapsed_ms,
        }
    }
}

/// Per-stage timings of one rectification run.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimingBreakdown {
    pub total_ms: f64,
    pub stages: Vec<StageTiming>,
}

impl TimingBreakdown {
    pub fn push(&mut self, label: impl Into<String>, elapsed_ms: f64) {
        self.stages.push(StageTiming::new(label, elapsed_ms));
    }

    /// Runs `stage` and records its wall time under `label`, whatever it
    /// returns.
    pub fn time<T>(&mut self, label: &str, stage: impl FnOnce() -> T) -> T {
        let t = Instant::now();
        let out = stage();
        self.push(label, elapsed_ms(t));
        out
    }

    /// Sets `total_ms` to the time elapsed since `started`.
    pub fn finish(&mut self, started: Instant) {
        self.total_ms = elapsed_ms(started);
    }

    /// Elapsed time of the first stage called `label`.
    pub fn stage_ms(&self, label: &str) -> Option<f64> {
        self.stages
            .iter()
            .find(|s| s.label == label)
            .map(|s| s.elapsed_ms)
    }
}

fn elapsed_ms(t: Instant) -> f64 {
    t.elapsed().as_secs_f64() * 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timed_stages_are_recorded_in_call_order() {
        let started = Instant::now();
        let mut timings = TimingBreakdown::default();
        let a = timings.time("first", || 1);
        let b: Result<i32, &str> = timings.time("second", || Err("failed"));
        timings.finish(started);

        assert_eq!(a, 1);
        assert!(b.is_err());
        let labels: Vec<_> = timings.stages.iter().map(|s| s.label.as_str()).collect();
        assert_eq!(labels, ["first", "second"]);
        assert!(timings.stage_ms("second").is_some());
        assert!(timings.stage_ms("third").is_none());
        assert!(timings.total_ms >= 0.0);
    }
}
