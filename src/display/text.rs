//! Plain text rendering for the terminal client

use std::fmt::Write;

use chrono_tz::Tz;

use super::{DayDetail, day_rows, meteogram, temperature_ranges};
use crate::client::FetchedForecast;
use crate::models::FavoriteEntry;

pub const NO_FAVORITES: &str = "Sorry. No records found.";

/// Daily table, temperature ranges and a meteogram summary
pub fn render_results(fetched: &FetchedForecast, tz: Tz) -> crate::Result<String> {
    let daily = &fetched.daily;
    let intervals = daily.daily_intervals()?;
    let mut out = String::new();

    let star = if fetched.favorited { " ★" } else { "" };
    let _ = writeln!(
        out,
        "Forecast at {}, {} ({}){star}",
        daily.city,
        daily.state,
        daily.coordinates().format_coordinates()
    );
    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "{:>2}  {:<28} {:<22} {:>10} {:>10} {:>10}",
        "#", "Date", "Status", "High(°F)", "Low(°F)", "Wind(mph)"
    );
    for row in day_rows(&intervals, tz) {
        let _ = writeln!(
            out,
            "{:>2}  {:<28} {:<22} {:>10} {:>10} {:>10}",
            row.index, row.date, row.status, row.temperature_high, row.temperature_low, row.wind_speed
        );
    }

    let ranges = temperature_ranges(&intervals);
    if !ranges.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "Temperature ranges (min, max)");
        for point in &ranges {
            let day = chrono::DateTime::from_timestamp_millis(point.x)
                .map(|d| d.format("%-d %b").to_string())
                .unwrap_or_default();
            let _ = writeln!(out, "  {day:<8} {:>7.2} .. {:<7.2}", point.low, point.high);
        }
    }

    let chart = meteogram(&fetched.hourly.data);
    if !chart.temperature.is_empty() {
        let temps: Vec<f64> = chart.temperature.iter().filter_map(|p| p.y).collect();
        let min = temps.iter().copied().fold(f64::INFINITY, f64::min);
        let max = temps.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let _ = writeln!(out);
        let _ = writeln!(
            out,
            "Hourly: {} intervals, {} wind barbs, temperature {:.1} to {:.1}°F",
            chart.temperature.len(),
            chart.winds.len(),
            min,
            max
        );
    }

    Ok(out)
}

pub fn render_detail(detail: &DayDetail) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} ({}, {})", detail.title, detail.city, detail.state);
    for (label, value) in &detail.rows {
        let _ = writeln!(out, "  {label:<22} {value}");
    }
    let _ = writeln!(out);
    let _ = writeln!(out, "Share: {}", detail.share_url);
    out
}

pub fn render_favorites(favorites: &[FavoriteEntry]) -> String {
    if favorites.is_empty() {
        return format!("{NO_FAVORITES}\n");
    }

    let mut out = String::new();
    let _ = writeln!(out, "{:>2}  {:<24} {}", "#", "City", "State");
    for (i, favorite) in favorites.iter().enumerate() {
        let _ = writeln!(out, "{:>2}  {:<24} {}", i + 1, favorite.city, favorite.state);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Coordinates, ForecastResult, HourlyForecast, WeatherQuery};
    use serde_json::json;

    #[test]
    fn test_render_favorites() {
        assert_eq!(render_favorites(&[]), "Sorry. No records found.\n");

        let out = render_favorites(&[FavoriteEntry::new("Boston", "Massachusetts")]);
        assert!(out.contains("Boston"));
        assert!(out.contains("Massachusetts"));
    }

    #[test]
    fn test_render_results() {
        let coordinates = Coordinates::new(Some(34.05), Some(-118.24)).unwrap();
        let weather = json!({ "data": { "timelines": [{ "intervals": [{
            "startTime": "2026-10-16T13:00:00Z",
            "values": { "temperatureMax": 78.4, "temperatureMin": 61.2, "windSpeed": 6.5, "weatherCode": 1000 }
        }]}]}});
        let fetched = FetchedForecast {
            daily: ForecastResult::new(WeatherQuery::new(coordinates, "Los Angeles", "California"), weather),
            hourly: HourlyForecast::default(),
            days: 1,
            favorited: true,
        };

        let out = render_results(&fetched, chrono_tz::America::Los_Angeles).unwrap();
        assert!(out.starts_with("Forecast at Los Angeles, California"));
        assert!(out.contains("★"));
        assert!(out.contains("Friday, Oct 16, 2026"));
        assert!(out.contains("78.40"));
    }
}
