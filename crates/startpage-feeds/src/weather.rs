//! OpenWeather current conditions API (requires an API key).

use serde::Deserialize;

use crate::error::FeedError;
use crate::types::WeatherReport;
#[cfg(feature = "blocking")]
use crate::FeedClient;

/// Current weather endpoint.
pub const CURRENT_WEATHER_URL: &str = "https://api.openweathermap.org/data/2.5/weather";

#[derive(Deserialize)]
struct RawWeather {
    main: RawMain,
    wind: RawWind,
    weather: Vec<RawCondition>,
    #[serde(default)]
    name: String,
    #[serde(default)]
    visibility: f64,
}

#[derive(Deserialize)]
struct RawMain {
    temp: f64,
    feels_like: f64,
    humidity: u8,
}

#[derive(Deserialize)]
struct RawWind {
    speed: f64,
}

#[derive(Deserialize)]
struct RawCondition {
    main: String,
    description: String,
}

/// Parse a metric-units current weather response.
///
/// Wind arrives in m/s and is converted to km/h; visibility arrives in
/// metres and is converted to km.
pub fn parse_current(body: &str) -> Result<WeatherReport, FeedError> {
    let raw: RawWeather = serde_json::from_str(body)?;
    let condition = raw
        .weather
        .into_iter()
        .next()
        .ok_or_else(|| FeedError::Parse("no weather conditions in response".to_string()))?;
    Ok(WeatherReport {
        temp_c: raw.main.temp.round() as i32,
        feels_like_c: raw.main.feels_like.round() as i32,
        humidity: raw.main.humidity,
        wind_kmh: (raw.wind.speed * 3.6).round() as i32,
        visibility_km: (raw.visibility / 1000.0).round() as i32,
        description: condition.description,
        condition: condition.main,
        city: raw.name,
    })
}

/// Fetch current conditions at a coordinate (blocking).
#[cfg(feature = "blocking")]
pub fn fetch_current(
    client: &FeedClient,
    latitude: f64,
    longitude: f64,
    api_key: &str,
) -> Result<WeatherReport, FeedError> {
    let lat = latitude.to_string();
    let lon = longitude.to_string();
    let body = client.get_text(
        CURRENT_WEATHER_URL,
        &[
            ("lat", lat.as_str()),
            ("lon", lon.as_str()),
            ("appid", api_key),
            ("units", "metric"),
        ],
    )?;
    parse_current(&body)
}
