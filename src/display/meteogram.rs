use serde::Serialize;

use super::epoch_millis;
use crate::models::{HourlyValues, Interval};

/// Wind barbs are drawn for every third hour
pub const WIND_BARB_STEP: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SeriesPoint {
    pub x: i64,
    pub y: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WindBarb {
    pub x: i64,
    /// Speed rounded to two decimals
    pub value: f64,
    pub direction: f64,
}

/// Series of the combined hourly chart
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Meteogram {
    pub temperature: Vec<SeriesPoint>,
    pub humidity: Vec<SeriesPoint>,
    pub pressure: Vec<SeriesPoint>,
    pub winds: Vec<WindBarb>,
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[must_use]
pub fn meteogram(intervals: &[Interval<HourlyValues>]) -> Meteogram {
    let mut chart = Meteogram::default();

    for (index, interval) in intervals.iter().enumerate() {
        let Some(x) = epoch_millis(&interval.start_time) else {
            continue;
        };
        let values = &interval.values;

        chart.temperature.push(SeriesPoint { x, y: values.temperature });
        chart.humidity.push(SeriesPoint { x, y: values.humidity });
        chart.pressure.push(SeriesPoint { x, y: values.pressure_sea_level });

        if index % WIND_BARB_STEP == 0 {
            if let (Some(speed), Some(direction)) = (values.wind_speed, values.wind_direction) {
                chart.winds.push(WindBarb {
                    x,
                    value: round2(speed),
                    direction,
                });
            }
        }
    }

    chart
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hour(h: u32) -> Interval<HourlyValues> {
        Interval {
            start_time: format!("2026-10-16T{h:02}:00:00Z"),
            values: HourlyValues {
                temperature: Some(60.0 + f64::from(h)),
                humidity: Some(40.0),
                pressure_sea_level: Some(29.92),
                wind_speed: Some(5.126),
                wind_direction: Some(270.0),
            },
        }
    }

    #[test]
    fn test_every_interval_plotted_and_every_third_wind() {
        let intervals: Vec<_> = (0..10).map(hour).collect();
        let chart = meteogram(&intervals);

        assert_eq!(chart.temperature.len(), 10);
        assert_eq!(chart.humidity.len(), 10);
        assert_eq!(chart.pressure.len(), 10);
        // hours 0, 3, 6, 9
        assert_eq!(chart.winds.len(), 4);
        assert_eq!(chart.winds[1].x, chart.temperature[3].x);
        assert_eq!(chart.winds[0].value, 5.13);
        assert_eq!(chart.winds[0].direction, 270.0);
    }

    #[test]
    fn test_empty() {
        assert_eq!(meteogram(&[]), Meteogram::default());
    }
}
