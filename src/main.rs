mod app;
mod assets;
mod components;
mod view;
mod weather;

use app::GlassCast;
use iced::{window, Size, Task};
use weather::ProviderConfig;

/// OpenWeatherMap API key. Replace with your own key.
const API_KEY: &str = "PASTE-YOUR-OPENWEATHER-API-KEY";

fn main() -> iced::Result {
    env_logger::init();

    // The window icon is synthesized too; skip it if the platform refuses.
    let icon = window::icon::from_rgba(assets::app_icon(64).into_raw(), 64, 64).ok();

    iced::application(GlassCast::title, GlassCast::update, GlassCast::view)
        .theme(GlassCast::theme)
        .window(window::Settings {
            size: Size::new(assets::WINDOW_WIDTH as f32, assets::WINDOW_HEIGHT as f32),
            resizable: false,
            icon,
            ..window::Settings::default()
        })
        .run_with(|| {
            let state = GlassCast::new(ProviderConfig::new(API_KEY));
            (state, Task::none())
        })
}
