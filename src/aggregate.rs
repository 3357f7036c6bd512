//! Aggregation
//!
//! Reshapes the joined API responses into chartable series and counters.

use crate::format::{format_optional, DisplayZone};
use crate::model::{AnalyticsSnapshot, CounterValue, RawAnalytics, RawCounter, RawPoint, TimeSeriesPoint};

/// Map one series response; order is preserved and counts pass through.
pub fn reshape_series(points: &[RawPoint], zone: DisplayZone) -> Vec<TimeSeriesPoint> {
    points
        .iter()
        .map(|p| TimeSeriesPoint {
            date: format_optional(p.date.as_deref(), zone),
            count: p.count.clone(),
        })
        .collect()
}

fn counter(raw: &RawCounter) -> CounterValue {
    CounterValue(raw.count.clone())
}

/// Build the view snapshot from the joined responses
pub fn aggregate(raw: &RawAnalytics, zone: DisplayZone) -> AnalyticsSnapshot {
    let snapshot = AnalyticsSnapshot {
        total: reshape_series(&raw.total, zone),
        red_listed: reshape_series(&raw.red_listed, zone),
        unlisted: reshape_series(&raw.unlisted, zone),
        approved: counter(&raw.approved),
        rejected: counter(&raw.rejected),
    };

    tracing::debug!(
        total = snapshot.total.len(),
        red_listed = snapshot.red_listed.len(),
        unlisted = snapshot.unlisted.len(),
        approved = ?snapshot.approved.get(),
        rejected = ?snapshot.rejected.get(),
        "Aggregated analytics"
    );

    snapshot
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::INVALID_DATE;
    use crate::model::Count;

    fn raw() -> RawAnalytics {
        RawAnalytics {
            total: vec![
                RawPoint::new("2024-01-02T10:00:00Z", 9.0),
                RawPoint::new("2024-01-01T10:00:00Z", 5.0),
            ],
            red_listed: vec![RawPoint {
                date: Some("2024-01-01T10:00:00Z".to_string()),
                count: None,
            }],
            unlisted: vec![],
            approved: RawCounter::new(42.0),
            rejected: RawCounter::new(0.0),
        }
    }

    #[test]
    fn test_aggregate_formats_and_keeps_order() {
        let snapshot = aggregate(&raw(), DisplayZone::Utc);

        assert_eq!(snapshot.total.len(), 2);
        assert_eq!(snapshot.total[0].date, "Jan 2, 2024, 10:00 AM");
        assert_eq!(snapshot.total[1].date, "Jan 1, 2024, 10:00 AM");
        assert_eq!(snapshot.total[1].value(), Some(5.0));
    }

    #[test]
    fn test_missing_count_stays_missing() {
        let snapshot = aggregate(&raw(), DisplayZone::Utc);
        assert_eq!(snapshot.red_listed[0].count, None);
    }

    #[test]
    fn test_counters_and_empty_series() {
        let snapshot = aggregate(&raw(), DisplayZone::Utc);
        assert!(snapshot.unlisted.is_empty());
        assert_eq!(snapshot.approved, CounterValue::from(42.0));
        assert_eq!(snapshot.rejected, CounterValue::from(0.0));
    }

    #[test]
    fn test_malformed_date() {
        let points = vec![
            RawPoint::new("yesterday-ish", 1.0),
            RawPoint {
                date: None,
                count: Some(Count::Number(2.0)),
            },
        ];
        let series = reshape_series(&points, DisplayZone::Utc);
        assert_eq!(series[0].date, INVALID_DATE);
        assert_eq!(series[1].date, INVALID_DATE);
        assert_eq!(series[1].value(), Some(2.0));
    }
}
