use anyhow::Result;

fn main() -> Result<()> {
    // Initialize core
    skydeck_core::init()?;

    let (config, _validation) = skydeck_core::Config::load_validated()?;

    tracing::info!("Skydeck starting for {}", config.weather.city);

    // Blocks until the widget is closed
    if let Err(e) = skydeck_ui::run(config) {
        tracing::error!("{} ({})", e.user_message(), e);
        return Err(e.into());
    }

    tracing::info!("Skydeck closed");
    Ok(())
}
