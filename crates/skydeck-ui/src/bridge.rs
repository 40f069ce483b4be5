//! Glue between the UI thread and the async weather backend.
//!
//! Owns the tokio runtime for the lifetime of the window and the channel
//! refresh results come back on.

use std::sync::mpsc::{Receiver, Sender};
use std::sync::Arc;
use std::time::Duration;

use skydeck_core::{AppError, WeatherConfig};
use skydeck_weather::{WeatherEndpoints, WeatherService};

use crate::services::{self, WeatherServiceMessage};

pub struct WeatherBridge {
    runtime: tokio::runtime::Runtime,
    service: Arc<WeatherService>,
    tx: Sender<WeatherServiceMessage>,
    rx: Receiver<WeatherServiceMessage>,
}

impl WeatherBridge {
    /// Build the runtime and weather service from config
    ///
    /// # Errors
    ///
    /// Returns an error if the runtime or the HTTP client cannot be created.
    pub fn new(config: &WeatherConfig) -> Result<Self, AppError> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .enable_all()
            .thread_name("skydeck-tokio")
            .build()?;

        let service = WeatherService::new(endpoints_from(config))
            .map_err(|e| AppError::Other(anyhow::Error::new(e)))?;

        let (tx, rx) = std::sync::mpsc::channel();

        tracing::info!("Weather services initialized successfully");
        Ok(Self {
            runtime,
            service: Arc::new(service),
            tx,
            rx,
        })
    }

    /// Start a refresh in the background; `notify` runs once the result is queued
    pub fn request_refresh<F>(&self, city: &str, notify: F)
    where
        F: FnOnce() + Send + 'static,
    {
        tracing::debug!("Requesting weather refresh for {}", city);
        services::request_refresh(
            self.runtime.handle(),
            &self.tx,
            self.service.clone(),
            city,
            notify,
        );
    }

    /// Next finished refresh, if any, without blocking
    pub fn try_recv(&self) -> Option<WeatherServiceMessage> {
        self.rx.try_recv().ok()
    }

    /// Block up to `timeout` for the next finished refresh
    pub fn recv_timeout(&self, timeout: Duration) -> Option<WeatherServiceMessage> {
        self.rx.recv_timeout(timeout).ok()
    }
}

/// Map the config section onto the service's endpoint set
pub fn endpoints_from(config: &WeatherConfig) -> WeatherEndpoints {
    WeatherEndpoints {
        geocoding_url: config.geocoding_url.clone(),
        forecast_url: config.forecast_url.clone(),
        icon_base_url: config.icon_base_url.clone(),
        timeout: Duration::from_secs(config.request_timeout_secs),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints_follow_config() {
        let config = WeatherConfig {
            forecast_url: "http://localhost:8080/v1".to_string(),
            request_timeout_secs: 3,
            ..WeatherConfig::default()
        };
        let endpoints = endpoints_from(&config);
        assert_eq!(endpoints.forecast_url, "http://localhost:8080/v1");
        assert_eq!(endpoints.geocoding_url, config.geocoding_url);
        assert_eq!(endpoints.timeout, Duration::from_secs(3));
    }

    #[test]
    fn default_config_matches_default_endpoints() {
        let from_config = endpoints_from(&WeatherConfig::default());
        let defaults = WeatherEndpoints::default();
        assert_eq!(from_config.geocoding_url, defaults.geocoding_url);
        assert_eq!(from_config.forecast_url, defaults.forecast_url);
        assert_eq!(from_config.icon_base_url, defaults.icon_base_url);
        assert_eq!(from_config.timeout, defaults.timeout);
    }

    #[test]
    fn nothing_queued_before_a_refresh() {
        let bridge = WeatherBridge::new(&WeatherConfig::default()).unwrap();
        assert!(bridge.try_recv().is_none());
    }
}
