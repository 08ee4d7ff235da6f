//! Batch trace lookup, timeline progress and the cross-batch anomaly feed.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::models::anomaly::{AnomalyType, Severity};
use crate::models::supply_chain::{BatchTrace, StepStatus, TimelineStep};
use crate::services::aggregates::percentage;

/// Look up a trace by batch id, ignoring surrounding whitespace and case.
/// A blank query finds nothing.
pub fn find_trace<'a>(traces: &'a [BatchTrace], query: &str) -> Option<&'a BatchTrace> {
    let wanted = query.trim();
    if wanted.is_empty() {
        return None;
    }
    let wanted = wanted.to_uppercase();
    traces.iter().find(|trace| trace.id == wanted)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TraceProgress {
    pub completed_steps: usize,
    pub total_steps: usize,
    /// Index of the step currently in progress, if any
    pub active_step: Option<usize>,
    pub percent_complete: Decimal,
}

impl TraceProgress {
    pub fn of(trace: &BatchTrace) -> Self {
        let completed_steps = trace
            .timeline
            .iter()
            .filter(|step| step.status == StepStatus::Completed)
            .count();
        let total_steps = trace.timeline.len();

        Self {
            completed_steps,
            total_steps,
            active_step: trace
                .timeline
                .iter()
                .position(|step| step.status == StepStatus::Active),
            percent_complete: percentage(completed_steps, total_steps),
        }
    }

    pub fn current<'a>(&self, trace: &'a BatchTrace) -> Option<&'a TimelineStep> {
        self.active_step.and_then(|index| trace.timeline.get(index))
    }
}

/// A trace anomaly tagged with the batch it was found on
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnomalyAlert {
    #[serde(rename = "type")]
    pub anomaly_type: AnomalyType,
    pub severity: Severity,
    pub message: String,
    pub step: String,
    pub detected: DateTime<Utc>,
    pub batch_id: String,
    pub crop: String,
}

/// Every anomaly across all traces, in trace order then detection order.
pub fn collect_anomalies(traces: &[BatchTrace]) -> Vec<AnomalyAlert> {
    traces
        .iter()
        .flat_map(|trace| {
            trace.anomalies.iter().map(move |anomaly| AnomalyAlert {
                anomaly_type: anomaly.anomaly_type,
                severity: anomaly.severity,
                message: anomaly.message.clone(),
                step: anomaly.step.clone(),
                detected: anomaly.detected,
                batch_id: trace.id.clone(),
                crop: trace.crop.clone(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::seed;

    #[test]
    fn test_find_trace_normalizes_query() {
        let traces = seed::batch_traces();
        assert_eq!(find_trace(&traces, "  batch_2024_002 ").unwrap().crop, "Rice");
        assert!(find_trace(&traces, "BATCH_2024_999").is_none());
        assert!(find_trace(&traces, "   ").is_none());
    }

    #[test]
    fn test_progress() {
        let traces = seed::batch_traces();
        for trace in &traces {
            let progress = TraceProgress::of(trace);
            assert_eq!(progress.total_steps, trace.timeline.len());
            assert!(progress.completed_steps <= progress.total_steps);
            if let Some(step) = progress.current(trace) {
                assert_eq!(step.status, StepStatus::Active);
            }
        }
    }

    #[test]
    fn test_collect_anomalies_tags_batch() {
        let traces = seed::batch_traces();
        let alerts = collect_anomalies(&traces);
        let expected: usize = traces.iter().map(|t| t.anomalies.len()).sum();
        assert_eq!(alerts.len(), expected);
        assert!(alerts.iter().all(|a| traces.iter().any(|t| t.id == a.batch_id && t.crop == a.crop)));
    }
}
