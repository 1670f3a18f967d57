//! Metric names and recording helpers.
//!
//! Recording goes through the `metrics` facade; without an installed
//! recorder (unit tests, the stdio binary) every call is a no-op.

pub const GAMES_SCORED_TOTAL: &str = "gamemood_games_scored_total";
pub const AGGREGATIONS_TOTAL: &str = "gamemood_aggregations_total";
pub const INVALID_ENTRIES_TOTAL: &str = "gamemood_invalid_entries_total";
pub const ANALYSIS_REQUESTS_TOTAL: &str = "gamemood_analysis_requests_total";

pub fn record_games_scored(count: usize) {
    metrics::counter!(GAMES_SCORED_TOTAL).increment(count as u64);
}

pub fn record_aggregation() {
    metrics::counter!(AGGREGATIONS_TOTAL).increment(1);
}

/// `kind` is the record type that was skipped, e.g. `mood_entry`.
pub fn record_invalid_entries(kind: &'static str, count: usize) {
    if count > 0 {
        metrics::counter!(INVALID_ENTRIES_TOTAL, "kind" => kind).increment(count as u64);
    }
}

pub fn record_analysis(outcome: &'static str) {
    metrics::counter!(ANALYSIS_REQUESTS_TOTAL, "outcome" => outcome).increment(1);
}

/// Readiness report served by `/health`.
#[derive(Clone, Debug, serde::Serialize)]
pub struct Health {
    pub ready: bool,
    pub analyzer_configured: bool,
}

impl Health {
    pub fn readiness(analyzer_configured: bool) -> Self {
        Self {
            ready: true,
            analyzer_configured,
        }
    }
}
