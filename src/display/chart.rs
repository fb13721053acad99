use serde::Serialize;

use super::utc_day_millis;
use crate::models::{DailyValues, Interval};

/// Days shown in the temperature range chart
pub const CHART_DAYS: usize = 6;

/// `[x, low, high]` point of an area-range series
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RangePoint {
    /// UTC midnight of the interval's day, epoch millis
    pub x: i64,
    pub low: f64,
    pub high: f64,
}

/// Min/max temperature per day for the first six days; intervals lacking
/// either bound are left out
#[must_use]
pub fn temperature_ranges(intervals: &[Interval<DailyValues>]) -> Vec<RangePoint> {
    intervals
        .iter()
        .take(CHART_DAYS)
        .filter_map(|interval| {
            Some(RangePoint {
                x: utc_day_millis(&interval.start_time)?,
                low: interval.values.temperature_min?,
                high: interval.values.temperature_max?,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(n: u32, low: f64, high: f64) -> Interval<DailyValues> {
        Interval {
            start_time: format!("2026-10-{:02}T13:00:00Z", 10 + n),
            values: DailyValues {
                temperature_min: Some(low),
                temperature_max: Some(high),
                ..Default::default()
            },
        }
    }

    #[test]
    fn test_first_six_days_only() {
        let intervals: Vec<_> = (0..15).map(|n| day(n, 50.0, 70.0 + f64::from(n))).collect();
        let points = temperature_ranges(&intervals);
        assert_eq!(points.len(), 6);
        assert_eq!(points[5].high, 75.0);
        assert_eq!(points[1].x - points[0].x, 86_400_000);
        assert_eq!(points[0].x % 86_400_000, 0);
    }
}
