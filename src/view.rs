use crate::app::{GlassCast, Message};
use crate::components;
use iced::widget::{column, container, image, stack};
use iced::{Alignment, ContentFit, Element, Length};

/// Layered scene: raster backdrop at the bottom, widget column above it,
/// modal notice on top when present.
pub fn view(app: &GlassCast) -> Element<'_, Message> {
    let backdrop = image(app.assets.background.clone())
        .width(Length::Fill)
        .height(Length::Fill)
        .content_fit(ContentFit::Cover);

    let content = column![
        components::header(app),
        components::search_bar(app),
        components::result_card(app),
        components::footer(app),
    ]
    .spacing(18.0)
    .padding(24.0)
    .align_x(Alignment::Center)
    .width(Length::Fill);

    let mut layers = stack![
        backdrop,
        container(content)
            .width(Length::Fill)
            .height(Length::Fill),
    ]
    .width(Length::Fill)
    .height(Length::Fill);

    if let Some(notice) = &app.notice {
        layers = layers.push(components::notice_modal(notice));
    }

    layers.into()
}
