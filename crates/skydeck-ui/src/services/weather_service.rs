//! Weather backend: async refresh.
//! All network work runs off the UI thread; results sent via mpsc.

use std::future::Future;
use std::sync::Arc;

use skydeck_weather::{RefreshOutcome, WeatherService};

/// Messages sent from async operations back to the UI thread
#[derive(Debug)]
pub enum WeatherServiceMessage {
    /// A refresh cycle finished, with or without data
    RefreshDone(RefreshOutcome),
}

/// Run one refresh for `city` on `runtime`.
/// Sends `RefreshDone` on the channel when complete, then calls `notify`
/// so the UI wakes up to read it.
pub fn request_refresh<F>(
    runtime: &tokio::runtime::Handle,
    tx: &std::sync::mpsc::Sender<WeatherServiceMessage>,
    service: Arc<WeatherService>,
    city: &str,
    notify: F,
) where
    F: FnOnce() + Send + 'static,
{
    let city = city.to_string();
    spawn_refresh(
        runtime,
        tx,
        async move { service.refresh(&city).await },
        notify,
    );
}

/// Drive `refresh` to completion. Reports back even if it panics.
fn spawn_refresh<Fut, F>(
    runtime: &tokio::runtime::Handle,
    tx: &std::sync::mpsc::Sender<WeatherServiceMessage>,
    refresh: Fut,
    notify: F,
) where
    Fut: Future<Output = RefreshOutcome> + Send + 'static,
    F: FnOnce() + Send + 'static,
{
    let tx = tx.clone();
    let task = runtime.spawn(refresh);

    runtime.spawn(async move {
        let outcome = match task.await {
            Ok(outcome) => outcome,
            Err(e) => {
                tracing::error!("Weather refresh task failed: {}", e);
                RefreshOutcome::default()
            }
        };
        if tx.send(WeatherServiceMessage::RefreshDone(outcome)).is_err() {
            tracing::debug!("Widget closed before refresh finished");
            return;
        }
        notify();
    });
}
