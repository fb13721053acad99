use chrono_tz::Tz;
use serde::Serialize;

use super::{clock_time, long_date, plain, two_decimals, weather_status};
use crate::models::{Coordinates, DailyValues, Interval};

const SHARE_URL: &str = "https://twitter.com/intent/tweet?text=";

/// Detail panel for a single day
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayDetail {
    pub title: String,
    pub city: String,
    pub state: String,
    pub coordinates: Coordinates,
    /// (label, value) rows in display order
    pub rows: Vec<(&'static str, String)>,
    pub share_text: String,
    pub share_url: String,
}

#[must_use]
pub fn day_detail(
    interval: &Interval<DailyValues>,
    city: &str,
    state: &str,
    coordinates: Coordinates,
    tz: Tz,
) -> DayDetail {
    let values = &interval.values;
    let date = long_date(&interval.start_time, tz);
    let status = weather_status(values.weather_code).label;

    let rows = vec![
        ("Status", status.to_string()),
        ("Max Temperature", format!("{}°F", two_decimals(values.temperature_max))),
        ("Min Temperature", format!("{}°F", two_decimals(values.temperature_min))),
        (
            "Apparent Temperature",
            format!("{}°F", two_decimals(values.temperature_apparent)),
        ),
        ("Sun Rise Time", clock_time(values.sunrise_time.as_deref(), tz)),
        ("Sun Set Time", clock_time(values.sunset_time.as_deref(), tz)),
        ("Humidity", format!("{}%", plain(values.humidity))),
        ("Wind Speed", format!("{} mph", plain(values.wind_speed))),
        ("Visibility", format!("{} mi", plain(values.visibility))),
        ("Cloud Cover", format!("{}%", plain(values.cloud_cover))),
    ];

    let share_text = format!(
        "The temperature in {city}, {state} on {date} is {}°F. The weather conditions are {status}",
        plain(values.temperature)
    );
    let share_url = format!("{SHARE_URL}{}", urlencoding::encode(&share_text));

    DayDetail {
        title: date,
        city: city.to_string(),
        state: state.to_string(),
        coordinates,
        rows,
        share_text,
        share_url,
    }
}
