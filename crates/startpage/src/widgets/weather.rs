//! Current weather from OpenWeather at the configured coordinates.

use chrono::{DateTime, Local};
use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
};
use startpage_feeds::{weather, FeedClient, WeatherReport};

use super::{MountContext, RemoteWidget};
use crate::refresh::FetchError;
use crate::registry::WidgetId;

/// Fetches current conditions, failing fast without a key.
pub fn fetch_report(
    client: &FeedClient,
    latitude: f64,
    longitude: f64,
    api_key: Option<&str>,
) -> Result<WeatherReport, FetchError> {
    let key = api_key.ok_or(FetchError::NotConfigured("API key not configured"))?;
    Ok(weather::fetch_current(client, latitude, longitude, key)?)
}

/// Starts polling OpenWeather for [`WidgetId::Weather`].
pub fn mount(ctx: &MountContext<'_>) -> RemoteWidget<WeatherReport> {
    let client = ctx.client();
    let sources = &ctx.config.sources;
    let (latitude, longitude) = (sources.latitude, sources.longitude);
    let key = sources.openweather_key();
    let handle = ctx.supervisor.mount(
        WidgetId::Weather,
        move || fetch_report(&client, latitude, longitude, key.as_deref()),
        ctx.options(WidgetId::Weather),
    );
    RemoteWidget::new(handle, render)
}

/// Short glyph for an OpenWeather condition group.
pub fn condition_icon(condition: &str) -> &'static str {
    match condition {
        "Clear" => "☀",
        "Rain" | "Drizzle" | "Thunderstorm" => "☂",
        "Snow" => "❄",
        "Clouds" => "☁",
        _ => "≈",
    }
}

/// Temperature headline, details, and the city.
pub fn render(report: &WeatherReport, _width: u16, _now: DateTime<Local>) -> Vec<Line<'static>> {
    let dim = Style::default().fg(Color::DarkGray);
    vec![
        Line::from(vec![
            Span::raw(format!("{} ", condition_icon(&report.condition))),
            Span::styled(
                format!("{}°C", report.temp_c),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::raw(format!("  {}", report.description)),
        ]),
        Line::styled(
            format!(
                "Feels {}°C  Humidity {}%",
                report.feels_like_c, report.humidity
            ),
            dim,
        ),
        Line::styled(
            format!(
                "Wind {} km/h  Visibility {} km",
                report.wind_kmh, report.visibility_km
            ),
            dim,
        ),
        Line::raw(report.city.clone()),
    ]
}
