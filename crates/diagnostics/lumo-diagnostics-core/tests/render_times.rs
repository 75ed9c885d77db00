use approx::assert_abs_diff_eq;
use lumo_diagnostics_core::{RunningStat, StatsAggregator};

#[test]
fn large_samples_do_not_overflow_mean() {
    let big = (i32::MAX - 1) as f64;
    let mut agg = StatsAggregator::with_enabled(true);

    agg.record_render_time("Shape Layer 1", big);
    agg.record_render_time("Shape Layer 1", big);
    let times = agg.sorted_render_times();
    assert_eq!(times.len(), 1);
    assert_abs_diff_eq!(times[0].1, big, epsilon = 1e-6);

    agg.record_render_time("Shape Layer 1", -big);
    agg.record_render_time("Shape Layer 1", -big);
    let times = agg.sorted_render_times();
    assert_abs_diff_eq!(times[0].1, 0.0, epsilon = 1e-6);
    assert_eq!(
        agg.running_stat("Shape Layer 1").map(|s| s.count),
        Some(4)
    );
}

#[test]
fn disabled_aggregator_reports_nothing() {
    let mut agg = StatsAggregator::new();
    assert!(!agg.is_enabled());
    agg.record_render_time("Shape Layer 1", 12.0);
    assert!(agg.sorted_render_times().is_empty());

    agg.set_enabled(true);
    agg.record_render_time("Shape Layer 1", 12.0);
    agg.set_enabled(false);
    assert!(agg.sorted_render_times().is_empty());
}

#[test]
fn report_is_slowest_first() {
    let mut agg = StatsAggregator::with_enabled(true);
    for (name, ms) in [("fast", 1.0), ("slow", 9.0), ("mid", 4.0), ("fast", 3.0)] {
        agg.record_render_time(name, ms);
    }
    let times = agg.sorted_render_times();
    let names: Vec<&str> = times.iter().map(|(n, _)| n.as_str()).collect();
    assert_eq!(names, vec!["slow", "mid", "fast"]);
    assert_abs_diff_eq!(times[2].1, 2.0);
    agg.log_render_times();
}

#[test]
fn running_stat_serialises() {
    let stat = RunningStat { count: 2, mean: 1.5 };
    let json = serde_json::to_value(stat).unwrap();
    assert_eq!(json, serde_json::json!({"count": 2, "mean": 1.5}));
}
