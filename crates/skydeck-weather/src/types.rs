use serde::{Deserialize, Serialize};

/// Geographic location resolved from a city name
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
}

/// Current conditions as reported by the forecast API
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeatherReading {
    /// Degrees Celsius
    pub temperature: f64,
    /// km/h
    pub wind_speed: f64,
    /// Opaque condition code, only used to pick an icon
    pub weather_code: i32,
}

impl WeatherReading {
    /// Two-line text shown under the icon
    pub fn display_text(&self) -> String {
        format!(
            "Temperature: {}°C\nWind speed: {} km/h",
            format_measurement(self.temperature),
            format_measurement(self.wind_speed)
        )
    }
}

/// Render a measurement the way the API sent it, keeping at least one
/// decimal digit (`12.0`, not `12`).
pub fn format_measurement(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 {
        format!("{:.1}", value)
    } else {
        format!("{}", value)
    }
}

/// Icon categories of the 4-entry icon table.
///
/// The labels are a display convention only; they do not follow WMO code
/// semantics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IconKind {
    Sunny,
    PartlyCloudy,
    Cloudy,
    Raining,
}

impl IconKind {
    /// Get a human-readable description
    pub fn description(&self) -> &'static str {
        match self {
            Self::Sunny => "Sunny",
            Self::PartlyCloudy => "Partly cloudy",
            Self::Cloudy => "Cloudy",
            Self::Raining => "Raining",
        }
    }
}

/// Decoded icon image, ready to upload as a texture
#[derive(Clone, PartialEq)]
pub struct IconAsset {
    pub kind: IconKind,
    pub width: u32,
    pub height: u32,
    /// Unmultiplied RGBA8, row-major
    pub rgba: Vec<u8>,
}

impl std::fmt::Debug for IconAsset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IconAsset")
            .field("kind", &self.kind)
            .field("width", &self.width)
            .field("height", &self.height)
            .field("bytes", &self.rgba.len())
            .finish()
    }
}

/// Everything one refresh attempt produced.
///
/// `icon` is only ever set together with `reading`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RefreshOutcome {
    pub reading: Option<WeatherReading>,
    pub icon: Option<IconAsset>,
}

impl RefreshOutcome {
    pub fn is_empty(&self) -> bool {
        self.reading.is_none()
    }
}

/// Weather provider errors
#[derive(Debug, thiserror::Error)]
pub enum WeatherError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("Unexpected HTTP status {0}")]
    Status(u16),
    #[error("Parse error: {0}")]
    Parse(String),
    #[error("Image decode error: {0}")]
    Image(String),
}
