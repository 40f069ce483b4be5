use crate::types::{Location, WeatherError, WeatherReading};
use reqwest::Client;
use serde::Deserialize;

/// Forecast API payload; only the "current weather" snapshot is read.
#[derive(Debug, Deserialize)]
struct ForecastResponse {
    current_weather: Option<CurrentWeatherPayload>,
}

#[derive(Debug, Deserialize)]
struct CurrentWeatherPayload {
    temperature: f64,
    windspeed: f64,
    weathercode: i32,
}

/// Fetches current conditions from `{base_url}/forecast`.
#[derive(Debug, Clone)]
pub struct WeatherProvider {
    client: Client,
    base_url: String,
}

impl WeatherProvider {
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    /// Fetch the current reading for `location`, in Celsius and km/h.
    ///
    /// # Errors
    ///
    /// Fails on transport errors, non-success status codes, and payloads
    /// without a complete `current_weather` object. Not retried.
    pub async fn fetch_current(&self, location: &Location) -> Result<WeatherReading, WeatherError> {
        let url = format!("{}/forecast", self.base_url.trim_end_matches('/'));

        let response = self
            .client
            .get(&url)
            .query(&[
                ("latitude", location.latitude.to_string()),
                ("longitude", location.longitude.to_string()),
                ("current_weather", "true".to_string()),
                ("temperature_unit", "celsius".to_string()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(WeatherError::Status(status.as_u16()));
        }

        let body = response.bytes().await?;
        let reading = parse_forecast(&body)?;

        tracing::debug!(
            "Current weather: {}°C, {} km/h, code {}",
            reading.temperature,
            reading.wind_speed,
            reading.weather_code
        );
        Ok(reading)
    }
}

fn parse_forecast(body: &[u8]) -> Result<WeatherReading, WeatherError> {
    let parsed: ForecastResponse =
        serde_json::from_slice(body).map_err(|e| WeatherError::Parse(e.to_string()))?;

    let current = parsed
        .current_weather
        .ok_or_else(|| WeatherError::Parse("response has no current_weather".to_string()))?;

    Ok(WeatherReading {
        temperature: current.temperature,
        wind_speed: current.windspeed,
        weather_code: current.weathercode,
    })
}
