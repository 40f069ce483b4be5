//! Weather lookup for the Skydeck widget
//!
//! Resolves a city name to coordinates and current conditions via the
//! Open-Meteo API, picks an icon for the condition code, and decides when
//! the next refresh is due.

pub mod geocode;
pub mod icon;
pub mod provider;
pub mod refresh;
pub mod schedule;
pub mod types;

pub use geocode::GeoResolver;
pub use icon::{IconResolver, DEFAULT_ICON_CODE};
pub use provider::WeatherProvider;
pub use refresh::{WeatherEndpoints, WeatherService};
pub use schedule::{RefreshScheduler, SchedulerState};
pub use types::*;
