use crate::assets;
use crate::view;
use crate::weather::{self, FetchError, ProviderConfig, WeatherReading};
use chrono::{DateTime, Local};
use iced::widget::image::Handle;
use iced::{Element, Task, Theme};

pub const GREETING: &str = "Enter a city and click 'Get Weather' to fetch the forecast.";

#[derive(Debug, Clone)]
pub enum Message {
    CityInputChanged(String),
    Submit,
    WeatherFetched(Result<WeatherReading, FetchError>),
    IconFetched(Result<Vec<u8>, FetchError>),
    DismissNotice,
}

/// A blocking modal notification; dismissed by the user before anything else
/// can be clicked.
#[derive(Debug, Clone)]
pub struct Notice {
    pub title: &'static str,
    pub body: String,
}

impl From<&FetchError> for Notice {
    fn from(err: &FetchError) -> Self {
        Notice {
            title: err.title(),
            body: err.to_string(),
        }
    }
}

/// Raster images generated once at startup and handed to the view. The
/// condition-icon composite lives on `GlassCast` instead since it is
/// regenerated per query.
pub struct RenderedAssets {
    pub background: Handle,
    pub badge: Handle,
    pub card: Handle,
    pub search_panel: Handle,
    pub button: Handle,
}

impl RenderedAssets {
    fn generate() -> Self {
        Self {
            background: handle_from(assets::background(
                assets::WINDOW_WIDTH,
                assets::WINDOW_HEIGHT,
            )),
            badge: handle_from(assets::app_icon(64)),
            card: handle_from(assets::glass_card(360, 380, 26.0)),
            search_panel: handle_from(assets::search_panel(320, 54)),
            button: handle_from(assets::button_pill(120, 44)),
        }
    }
}

pub fn handle_from(img: image::RgbaImage) -> Handle {
    let (w, h) = img.dimensions();
    Handle::from_rgba(w, h, img.into_raw())
}

pub struct GlassCast {
    pub config: ProviderConfig,
    pub city_input: String,
    pub reading: Option<WeatherReading>,
    pub icon: Option<Handle>,
    pub notice: Option<Notice>,
    pub fetching: bool,
    pub last_updated: Option<DateTime<Local>>,
    pub assets: RenderedAssets,
}

impl GlassCast {
    pub fn new(config: ProviderConfig) -> Self {
        Self {
            config,
            city_input: String::new(),
            reading: None,
            icon: None,
            notice: None,
            fetching: false,
            last_updated: None,
            assets: RenderedAssets::generate(),
        }
    }

    pub fn title(&self) -> String {
        String::from("Weather — Purple Modern")
    }

    pub fn theme(&self) -> Theme {
        Theme::Dark
    }

    pub fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::CityInputChanged(value) => {
                self.city_input = value;
                Task::none()
            }
            Message::Submit => {
                // One query chain at a time; the enter key must not start a
                // second one while the button is dead.
                if self.fetching {
                    return Task::none();
                }
                match weather::validate_city(&self.city_input) {
                    Ok(city) => {
                        self.fetching = true;
                        self.notice = None;
                        Task::perform(
                            weather::fetch_current(self.config.clone(), city),
                            Message::WeatherFetched,
                        )
                    }
                    Err(err) => {
                        self.notice = Some(Notice::from(&err));
                        Task::none()
                    }
                }
            }
            Message::WeatherFetched(Ok(reading)) => {
                // The query is still in flight: it ends when the icon step
                // resolves, so `fetching` stays set.
                self.last_updated = Some(Local::now());
                let icon_code = reading.icon_code.clone();
                self.reading = Some(reading);
                // The old composite is dropped; a fresh one arrives with
                // IconFetched.
                self.icon = None;
                Task::perform(
                    weather::fetch_icon(self.config.clone(), icon_code),
                    Message::IconFetched,
                )
            }
            Message::WeatherFetched(Err(err)) => {
                log::warn!("weather query failed: {err}");
                self.fetching = false;
                self.notice = Some(Notice::from(&err));
                Task::none()
            }
            Message::IconFetched(Ok(bytes)) => {
                self.fetching = false;
                match assets::compose_icon(&bytes) {
                    Ok(composite) => self.icon = Some(handle_from(composite)),
                    Err(err) => {
                        log::warn!("icon decode failed: {err}");
                        let err = FetchError::Other(err.to_string());
                        self.notice = Some(Notice::from(&err));
                    }
                }
                Task::none()
            }
            Message::IconFetched(Err(err)) => {
                // The text result stays; only the icon is missing.
                self.fetching = false;
                log::warn!("icon fetch failed: {err}");
                self.notice = Some(Notice::from(&err));
                Task::none()
            }
            Message::DismissNotice => {
                self.notice = None;
                Task::none()
            }
        }
    }

    pub fn view(&self) -> Element<'_, Message> {
        view::view(self)
    }
}
