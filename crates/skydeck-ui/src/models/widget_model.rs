use skydeck_weather::{IconAsset, RefreshOutcome, WeatherReading};

/// Placeholder shown until the first successful refresh
pub const LOADING_TEXT: &str = "Loading data...";

/// What the widget currently shows.
///
/// Only [`WidgetState::apply`] mutates it, and only with the outcome of a
/// completed refresh.
#[derive(Debug, Clone, PartialEq)]
pub struct WidgetState {
    city: String,
    weather_text: String,
    reading: Option<WeatherReading>,
    icon: Option<IconAsset>,
}

impl WidgetState {
    pub fn new(city: impl Into<String>) -> Self {
        Self {
            city: city.into(),
            weather_text: LOADING_TEXT.to_string(),
            reading: None,
            icon: None,
        }
    }

    pub fn city(&self) -> &str {
        &self.city
    }

    pub fn weather_text(&self) -> &str {
        &self.weather_text
    }

    pub fn reading(&self) -> Option<&WeatherReading> {
        self.reading.as_ref()
    }

    pub fn icon(&self) -> Option<&IconAsset> {
        self.icon.as_ref()
    }

    /// Fold a refresh outcome into the display.
    ///
    /// Without a reading nothing changes. The icon is replaced only when
    /// the refresh also produced one. Returns true when the icon changed
    /// and the texture needs re-uploading.
    pub fn apply(&mut self, outcome: RefreshOutcome) -> bool {
        let Some(reading) = outcome.reading else {
            tracing::debug!("Refresh produced no reading, keeping {:?}", self.weather_text);
            return false;
        };

        self.weather_text = reading.display_text();
        self.reading = Some(reading);

        match outcome.icon {
            Some(icon) => {
                self.icon = Some(icon);
                true
            }
            None => false,
        }
    }
}
