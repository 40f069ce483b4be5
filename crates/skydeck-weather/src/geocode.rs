//! Forward geocoding: convert a city name to coordinates.
//! Uses the Open-Meteo geocoding API - free, no API key required.

use crate::types::Location;
use reqwest::Client;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct GeocodingResponse {
    results: Option<Vec<GeocodingResult>>,
}

#[derive(Debug, Deserialize)]
struct GeocodingResult {
    latitude: f64,
    longitude: f64,
}

/// Resolves city names against `{base_url}/search`.
#[derive(Debug, Clone)]
pub struct GeoResolver {
    client: Client,
    base_url: String,
}

impl GeoResolver {
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    /// Look up `city` and return the first match.
    /// Returns `None` on any failure or when nothing matches; the caller
    /// skips this refresh cycle.
    pub async fn resolve(&self, city: &str) -> Option<Location> {
        let url = format!("{}/search", self.base_url.trim_end_matches('/'));

        let response = match self.client.get(&url).query(&[("name", city)]).send().await {
            Ok(r) => r,
            Err(e) => {
                tracing::debug!("Geocode request failed: {}", e);
                return None;
            }
        };

        if !response.status().is_success() {
            tracing::debug!("Geocode returned status {}", response.status());
            return None;
        }

        let body: GeocodingResponse = match response.json().await {
            Ok(b) => b,
            Err(e) => {
                tracing::debug!("Geocode parse error: {}", e);
                return None;
            }
        };

        let first = match body.results.and_then(|r| r.into_iter().next()) {
            Some(first) => first,
            None => {
                tracing::debug!("Geocode found no results for {:?}", city);
                return None;
            }
        };

        tracing::info!(
            "Geocoded {} to {}, {}",
            city,
            first.latitude,
            first.longitude
        );
        Some(Location {
            latitude: first.latitude,
            longitude: first.longitude,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_results() {
        let body: GeocodingResponse = serde_json::from_str(
            r#"{"results":[{"id":756135,"name":"Warsaw","latitude":52.22977,"longitude":21.01178}]}"#,
        )
        .unwrap();
        let results = body.results.unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].latitude, 52.22977);
        assert_eq!(results[0].longitude, 21.01178);
    }

    #[test]
    fn test_parse_without_results() {
        let body: GeocodingResponse = serde_json::from_str(r#"{"generationtime_ms":0.5}"#).unwrap();
        assert!(body.results.is_none());
    }

    #[tokio::test]
    async fn test_unreachable_host_is_none() {
        let resolver = GeoResolver::new(Client::new(), "http://127.0.0.1:1");
        assert_eq!(resolver.resolve("Warsaw").await, None);
    }
}
