use std::time::Duration;

use reqwest::Client;

use crate::geocode::GeoResolver;
use crate::icon::IconResolver;
use crate::provider::WeatherProvider;
use crate::types::{RefreshOutcome, WeatherError};

const USER_AGENT: &str = concat!("Skydeck/", env!("CARGO_PKG_VERSION"));

/// Where the three lookups go
#[derive(Debug, Clone)]
pub struct WeatherEndpoints {
    pub geocoding_url: String,
    pub forecast_url: String,
    pub icon_base_url: String,
    pub timeout: Duration,
}

impl Default for WeatherEndpoints {
    fn default() -> Self {
        Self {
            geocoding_url: "https://geocoding-api.open-meteo.com/v1".to_string(),
            forecast_url: "https://api.open-meteo.com/v1".to_string(),
            icon_base_url: "https://openweathermap.org/img/wn".to_string(),
            timeout: Duration::from_secs(10),
        }
    }
}

/// Geocode → forecast → icon, sharing one HTTP client.
#[derive(Debug, Clone)]
pub struct WeatherService {
    geo: GeoResolver,
    provider: WeatherProvider,
    icons: IconResolver,
}

impl WeatherService {
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn new(endpoints: WeatherEndpoints) -> Result<Self, WeatherError> {
        let client = Client::builder()
            .timeout(endpoints.timeout)
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self {
            geo: GeoResolver::new(client.clone(), endpoints.geocoding_url),
            provider: WeatherProvider::new(client.clone(), endpoints.forecast_url),
            icons: IconResolver::new(client, endpoints.icon_base_url),
        })
    }

    pub fn icons(&self) -> &IconResolver {
        &self.icons
    }

    /// Run one refresh cycle for `city`.
    ///
    /// Never fails: every problem is logged and yields an outcome without
    /// a reading, so the display keeps what it had.
    pub async fn refresh(&self, city: &str) -> RefreshOutcome {
        let Some(location) = self.geo.resolve(city).await else {
            tracing::warn!("Could not resolve {:?}, skipping this refresh", city);
            return RefreshOutcome::default();
        };

        let reading = match self.provider.fetch_current(&location).await {
            Ok(reading) => reading,
            Err(e) => {
                tracing::warn!("Failed to fetch weather for {}: {}", city, e);
                return RefreshOutcome::default();
            }
        };

        let icon = self.icons.resolve(reading.weather_code).await;

        tracing::info!(
            "Weather for {}: {}°C, {} km/h (code {})",
            city,
            reading.temperature,
            reading.wind_speed,
            reading.weather_code
        );
        RefreshOutcome {
            reading: Some(reading),
            icon,
        }
    }
}
