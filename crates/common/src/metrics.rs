//! Metrics helpers
//!
//! Counter and histogram names share the `talentboard_` prefix; the host
//! process installs whatever recorder it wants. Descriptions are
//! registered once at startup.

use metrics::{counter, describe_counter, describe_histogram, histogram, Unit};

/// Metrics prefix for all Talentboard metrics
pub const METRICS_PREFIX: &str = "talentboard";

/// Register all metric descriptions
pub fn register_metrics() {
    describe_counter!(
        format!("{}_resources_created_total", METRICS_PREFIX),
        Unit::Count,
        "Total resources created"
    );

    describe_counter!(
        format!("{}_tags_assigned_total", METRICS_PREFIX),
        Unit::Count,
        "Total tag pivot rows created"
    );

    describe_counter!(
        format!("{}_resource_pages_served_total", METRICS_PREFIX),
        Unit::Count,
        "Total resource listing pages served"
    );

    describe_counter!(
        format!("{}_reviews_listed_total", METRICS_PREFIX),
        Unit::Count,
        "Total review listings served"
    );

    describe_histogram!(
        format!("{}_db_query_duration_seconds", METRICS_PREFIX),
        Unit::Seconds,
        "Database query latency in seconds"
    );

    tracing::info!("Metrics registered");
}

/// Record a successful resource creation and its tag fan-out
pub fn record_resource_created(tag_count: usize) {
    counter!(format!("{}_resources_created_total", METRICS_PREFIX)).increment(1);
    counter!(format!("{}_tags_assigned_total", METRICS_PREFIX)).increment(tag_count as u64);
}

/// Record a served resource listing page
pub fn record_resource_page(result_count: usize) {
    counter!(
        format!("{}_resource_pages_served_total", METRICS_PREFIX),
        "empty" => if result_count == 0 { "true" } else { "false" }
    )
    .increment(1);
}

/// Record a served review listing
pub fn record_review_list(kind: &str, result_count: usize) {
    counter!(
        format!("{}_reviews_listed_total", METRICS_PREFIX),
        "kind" => kind.to_string(),
        "empty" => if result_count == 0 { "true" } else { "false" }
    )
    .increment(1);
}

/// Record one database query's latency
pub fn record_db_query(duration_secs: f64, table: &str) {
    histogram!(
        format!("{}_db_query_duration_seconds", METRICS_PREFIX),
        "table" => table.to_string()
    )
    .record(duration_secs);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_without_a_recorder_does_not_panic() {
        register_metrics();
        record_resource_created(2);
        record_resource_page(0);
        record_review_list("application", 3);
        record_db_query(0.012, "resources");
    }
}
