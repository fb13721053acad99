//! Weather code labels and icons

/// Label and icon file for a weather code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeatherStatus {
    pub label: &'static str,
    pub icon: &'static str,
}

pub const UNKNOWN: WeatherStatus = WeatherStatus {
    label: "Unknown",
    icon: "unknown.svg",
};

const WEATHER_CODES: &[(u32, &str, &str)] = &[
    (4201, "Heavy Rain", "rain_heavy.svg"),
    (4001, "Rain", "rain.svg"),
    (4200, "Light Rain", "rain_light.svg"),
    (6201, "Heavy Freezing Rain", "freezing_rain_heavy.svg"),
    (6001, "Freezing Rain", "freezing_rain.svg"),
    (6200, "Light Freezing Rain", "freezing_rain_light.svg"),
    (6000, "Freezing Drizzle", "freezing_drizzle.svg"),
    (4000, "Drizzle", "drizzle.svg"),
    (7101, "Heavy Ice Pellets", "ice_pellets_heavy.svg"),
    (7000, "Ice Pellets", "ice_pellets.svg"),
    (7102, "Light Ice Pellets", "ice_pellets_light.svg"),
    (5101, "Heavy Snow", "snow_heavy.svg"),
    (5000, "Snow", "snow.svg"),
    (5100, "Light Snow", "snow_light.svg"),
    (5001, "Flurries", "flurries.svg"),
    (8000, "Thunderstorm", "tstorm.svg"),
    (2100, "Light Fog", "fog_light.svg"),
    (2000, "Fog", "fog.svg"),
    (1001, "Cloudy", "cloudy.svg"),
    (1102, "Mostly Cloudy", "mostly_cloudy.svg"),
    (1101, "Partly Cloudy", "partly_cloudy_day.svg"),
    (1100, "Mostly Clear", "mostly_clear_day.svg"),
    (1000, "Clear", "clear_day.svg"),
];

#[must_use]
pub fn weather_status(code: Option<u32>) -> WeatherStatus {
    code.and_then(|code| WEATHER_CODES.iter().find(|(c, _, _)| *c == code))
        .map_or(UNKNOWN, |&(_, label, icon)| WeatherStatus { label, icon })
}
