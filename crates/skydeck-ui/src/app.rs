//! The frameless widget window.

use std::time::{Duration, Instant};

use eframe::egui::{self, Color32, PointerButton, Rect, RichText, TextureHandle, Vec2};
use skydeck_core::{AppError, Config};
use skydeck_weather::{IconAsset, RefreshScheduler};

use crate::bridge::WeatherBridge;
use crate::models::widget_model::WidgetState;
use crate::services::WeatherServiceMessage;

// Layout, relative to the window's top-left corner
const CITY_RECT: (f32, f32, f32, f32) = (30.0, 10.0, 300.0, 50.0);
const ICON_RECT: (f32, f32, f32, f32) = (130.0, 30.0, 130.0, 130.0);
const WEATHER_RECT: (f32, f32, f32, f32) = (30.0, 130.0, 300.0, 100.0);

const CITY_FONT_SIZE: f32 = 24.0;
const WEATHER_FONT_SIZE: f32 = 18.0;

pub struct WeatherWidget {
    state: WidgetState,
    scheduler: RefreshScheduler,
    bridge: WeatherBridge,
    icon_texture: Option<TextureHandle>,
}

impl WeatherWidget {
    /// # Errors
    ///
    /// Returns an error if the weather backend cannot be started.
    pub fn new(config: &Config) -> Result<Self, AppError> {
        let bridge = WeatherBridge::new(&config.weather)?;
        let scheduler = RefreshScheduler::new(
            Instant::now(),
            Duration::from_secs(config.weather.initial_delay_secs),
            Duration::from_secs(config.weather.refresh_minutes * 60),
        );

        Ok(Self {
            state: WidgetState::new(config.weather.city.clone()),
            scheduler,
            bridge,
            icon_texture: None,
        })
    }

    fn drain_messages(&mut self, ctx: &egui::Context) {
        while let Some(message) = self.bridge.try_recv() {
            match message {
                WeatherServiceMessage::RefreshDone(outcome) => {
                    if self.state.apply(outcome) {
                        self.icon_texture = self.state.icon().map(|icon| upload_icon(ctx, icon));
                    }
                    self.scheduler.complete(Instant::now());
                }
            }
        }
    }

    fn tick(&mut self, ctx: &egui::Context) {
        let now = Instant::now();
        if self.scheduler.poll(now) {
            let ctx = ctx.clone();
            self.bridge
                .request_refresh(self.state.city(), move || ctx.request_repaint());
        }

        if let Some(wait) = self.scheduler.time_until_due(now) {
            ctx.request_repaint_after(wait);
        }
    }

    fn draw(&self, ui: &mut egui::Ui) {
        let origin = ui.max_rect().min.to_vec2();

        // Anywhere on the window starts a move; the OS keeps the press point under the cursor
        let drag = ui.interact(
            ui.max_rect(),
            egui::Id::new("skydeck-window-drag"),
            egui::Sense::drag(),
        );
        if drag.drag_started_by(PointerButton::Primary) {
            ui.ctx().send_viewport_cmd(egui::ViewportCommand::StartDrag);
        }

        if let Some(texture) = &self.icon_texture {
            let rect = place(ICON_RECT, origin);
            ui.put(
                rect,
                egui::Image::from_texture(egui::load::SizedTexture::new(texture.id(), rect.size()))
                    .fit_to_exact_size(rect.size()),
            );
        }

        ui.put(
            place(CITY_RECT, origin),
            egui::Label::new(
                RichText::new(self.state.city())
                    .size(CITY_FONT_SIZE)
                    .strong()
                    .color(Color32::WHITE),
            )
            .selectable(false),
        );

        ui.put(
            place(WEATHER_RECT, origin),
            egui::Label::new(
                RichText::new(self.state.weather_text())
                    .size(WEATHER_FONT_SIZE)
                    .color(Color32::WHITE),
            )
            .selectable(false),
        );
    }
}

impl eframe::App for WeatherWidget {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.drain_messages(ctx);
        self.tick(ctx);

        egui::CentralPanel::default()
            .frame(egui::Frame::none())
            .show(ctx, |ui| self.draw(ui));
    }

    fn clear_color(&self, _visuals: &egui::Visuals) -> [f32; 4] {
        egui::Rgba::TRANSPARENT.to_array()
    }
}

fn place((x, y, w, h): (f32, f32, f32, f32), origin: Vec2) -> Rect {
    Rect::from_min_size(egui::pos2(x, y) + origin, egui::vec2(w, h))
}

fn upload_icon(ctx: &egui::Context, icon: &IconAsset) -> TextureHandle {
    let image = egui::ColorImage::from_rgba_unmultiplied(
        [icon.width as usize, icon.height as usize],
        &icon.rgba,
    );
    ctx.load_texture("weather-icon", image, egui::TextureOptions::LINEAR)
}

/// Open the widget window and block until it is closed
///
/// # Errors
///
/// Returns an error if the window or the weather backend fails to start.
pub fn run(config: Config) -> Result<(), AppError> {
    let ui = &config.ui;
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(ui.title.clone())
            .with_position([ui.window_x, ui.window_y])
            .with_inner_size([ui.window_width, ui.window_height])
            .with_decorations(false)
            .with_transparent(true),
        ..Default::default()
    };

    let app_name = ui.title.clone();
    tracing::info!("Opening widget for {}", config.weather.city);

    eframe::run_native(
        &app_name,
        options,
        Box::new(move |_cc| Ok(Box::new(WeatherWidget::new(&config)?))),
    )
    .map_err(|e| AppError::Ui(e.to_string()))
}
