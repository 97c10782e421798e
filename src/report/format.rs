//! Formatted terminal output.
//!
//! We keep formatting code in one place so:
//! - the estimation code stays clean and testable
//! - output changes are localized

use crate::batch::{BatchOutput, LaneQuote};
use crate::domain::{EtaPrediction, FactorImpact, RouteEstimate};
use crate::io::ingest::RowError;
use crate::report::BatchSummary;
use crate::tracking::TrackingSnapshot;

const TIME_FMT: &str = "%a %Y-%m-%d %H:%M";

/// Format a single quote: route, factor breakdown, window, narrative.
pub fn format_quote(route: &RouteEstimate, prediction: &EtaPrediction) -> String {
    let mut out = String::new();

    out.push_str("=== eta - Freight ETA Estimate ===\n");
    out.push_str(&format!(
        "Route: {} mi | base {:.1}h ({} rest stop(s))\n",
        route.distance_miles, route.base_duration_hours, route.rest_stops
    ));
    out.push_str(&format!(
        "ETA:   {} ({:.1}h)\n",
        prediction.estimated_arrival.format(TIME_FMT),
        prediction.duration_hours
    ));
    out.push_str(&format!(
        "Window: {} .. {}\n",
        prediction.confidence_window.earliest.format(TIME_FMT),
        prediction.confidence_window.latest.format(TIME_FMT)
    ));
    out.push_str(&format!("Risk:  {}\n", prediction.risk_level.display_name()));

    out.push_str("\nWhy this ETA?\n");
    out.push_str(&format!(
        "{:<20} {:>8}  {}\n",
        "factor", "hours", "detail"
    ));
    out.push_str(&format!("{:-<20} {:->8}  {:-<40}\n", "", "", ""));
    for f in &prediction.factors {
        out.push_str(&format!(
            "{:<20} {:>+8.2}  {} {}\n",
            f.name,
            f.adjustment_hours,
            impact_marker(f.impact),
            f.description
        ));
    }

    out.push('\n');
    out.push_str(&prediction.explanation);
    out.push('\n');

    out.push_str("\nRecommendations:\n");
    for (idx, rec) in prediction.recommendations.iter().enumerate() {
        out.push_str(&format!("{}. {rec}\n", idx + 1));
    }

    out
}

fn impact_marker(impact: FactorImpact) -> &'static str {
    match impact {
        FactorImpact::Positive => "[+]",
        FactorImpact::Negative => "[-]",
        FactorImpact::Neutral => "[ ]",
    }
}

/// Format a batch run as a table plus summary.
pub fn format_batch(output: &BatchOutput, summary: &BatchSummary, row_errors: &[RowError]) -> String {
    let mut out = String::new();

    out.push_str(
        format!(
            "{:<16} {:<13} {:>7} {:>8} {:>8} {:<17} {:<6}\n",
            "id", "carrier", "miles", "base_h", "eta_h", "arrival", "risk"
        )
        .trim_end(),
    );
    out.push('\n');
    out.push_str(
        format!(
            "{:-<16} {:-<13} {:-<7} {:-<8} {:-<8} {:-<17} {:-<6}\n",
            "", "", "", "", "", "", ""
        )
        .trim_end(),
    );
    out.push('\n');

    for q in &output.quotes {
        out.push_str(&format_batch_row(q));
        out.push('\n');
    }

    out.push_str(&format!(
        "\nLanes: {} | risk low={} medium={} high={} | mean ETA {:.1}h\n",
        summary.lanes, summary.low, summary.medium, summary.high, summary.mean_duration_hours
    ));
    if !summary.most_delayed.is_empty() {
        out.push_str(&format!("Most delayed: {}\n", summary.most_delayed.join(", ")));
    }

    for f in &output.failures {
        out.push_str(&format!("  (failed {}) {}\n", f.id, f.error));
    }
    for e in row_errors {
        out.push_str(&format!(
            "  (skipped line {}{}) {}\n",
            e.line,
            e.id.as_deref().map(|id| format!(" id={id}")).unwrap_or_default(),
            e.message
        ));
    }

    out
}

fn format_batch_row(q: &LaneQuote) -> String {
    format!(
        "{:<16} {:<13} {:>7} {:>8.1} {:>8.1} {:<17} {:<6}",
        truncate(&q.lane.id, 16),
        q.lane.carrier_mode.tag(),
        q.route.distance_miles,
        q.route.base_duration_hours,
        q.prediction.duration_hours,
        q.prediction.estimated_arrival.format("%Y-%m-%d %H:%M"),
        q.prediction.risk_level.display_name()
    )
    .trim_end()
    .to_string()
}

/// Format a tracking snapshot.
pub fn format_tracking(snapshot: &TrackingSnapshot) -> String {
    let filled = (snapshot.progress * 20.0).round() as usize;
    format!(
        "{} at {}\n[{}{}] {:>5.1}%\nPosition: {}\nRemaining: {:.1}h / {} mi\n",
        snapshot.status.display_name(),
        snapshot.at.format(TIME_FMT),
        "#".repeat(filled),
        ".".repeat(20 - filled.min(20)),
        snapshot.progress * 100.0,
        snapshot.position,
        snapshot.remaining_hours,
        snapshot.miles_remaining
    )
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out = String::new();
    for (i, ch) in s.chars().enumerate() {
        if i + 1 >= max {
            break;
        }
        out.push(ch);
    }
    out.push('.');
    out
}
