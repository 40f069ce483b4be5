pub mod app;
pub mod bridge;
pub mod models;
pub mod services;

pub use app::{run, WeatherWidget};
pub use bridge::WeatherBridge;
pub use models::widget_model::WidgetState;
