use crate::app::{GlassCast, Message, Notice, GREETING};
use crate::weather;
use iced::widget::{
    button, center, column, container, image, mouse_area, opaque, row, stack, text, text_input,
    Space,
};
use iced::{Alignment, Background, Border, Color, Element, Length, Shadow, Theme};

const SEARCH_W: f32 = 320.0;
const SEARCH_H: f32 = 54.0;
const BUTTON_W: f32 = 120.0;
const BUTTON_H: f32 = 44.0;
const CARD_W: f32 = 360.0;
const CARD_H: f32 = 380.0;
const ICON_SIDE: f32 = 120.0;

const MUTED: Color = Color {
    r: 220.0 / 255.0,
    g: 215.0 / 255.0,
    b: 235.0 / 255.0,
    a: 1.0,
};

pub fn header(app: &GlassCast) -> Element<'_, Message> {
    row![
        image(app.assets.badge.clone())
            .width(Length::Fixed(32.0))
            .height(Length::Fixed(32.0)),
        text("Weather").size(26).color(Color::WHITE),
    ]
    .spacing(10.0)
    .align_y(Alignment::Center)
    .into()
}

/// White rounded panel with the city input on the left and the pill button
/// over its right edge, like the backdrop raster it sits on.
pub fn search_bar(app: &GlassCast) -> Element<'_, Message> {
    let input = text_input(weather::PLACEHOLDER_PROMPT, &app.city_input)
        .on_input(Message::CityInputChanged)
        .on_submit(Message::Submit)
        .size(15)
        .padding([8.0, 12.0])
        .style(search_input_style)
        .width(Length::Fill);

    let label = if app.fetching {
        "Fetching…"
    } else {
        "Get Weather"
    };
    let pill = stack![
        image(app.assets.button.clone())
            .width(Length::Fixed(BUTTON_W))
            .height(Length::Fixed(BUTTON_H)),
        center(text(label).size(13).color(Color::WHITE)),
    ]
    .width(Length::Fixed(BUTTON_W))
    .height(Length::Fixed(BUTTON_H));

    // One query in flight at most: the button goes dead while fetching.
    let submit = button(pill)
        .on_press_maybe((!app.fetching).then_some(Message::Submit))
        .padding(0.0)
        .style(bare_button_style);

    stack![
        image(app.assets.search_panel.clone())
            .width(Length::Fixed(SEARCH_W))
            .height(Length::Fixed(SEARCH_H)),
        container(
            row![input, submit]
                .spacing(8.0)
                .align_y(Alignment::Center)
        )
        .padding([5.0, 6.0])
        .width(Length::Fixed(SEARCH_W))
        .height(Length::Fixed(SEARCH_H)),
    ]
    .into()
}

/// Glass card holding the icon region and the read-only report text.
pub fn result_card(app: &GlassCast) -> Element<'_, Message> {
    let icon: Element<'_, Message> = match &app.icon {
        Some(handle) => image(handle.clone())
            .width(Length::Fixed(ICON_SIDE))
            .height(Length::Fixed(ICON_SIDE))
            .into(),
        None => Space::new(Length::Fixed(ICON_SIDE), Length::Fixed(ICON_SIDE)).into(),
    };

    let body = app
        .reading
        .as_ref()
        .map(|r| r.report())
        .unwrap_or_else(|| GREETING.to_string());

    let inner = row![icon, text(body).size(14).color(Color::WHITE)]
        .spacing(16.0)
        .align_y(Alignment::Start);

    stack![
        image(app.assets.card.clone())
            .width(Length::Fixed(CARD_W))
            .height(Length::Fixed(CARD_H)),
        container(inner)
            .padding(20.0)
            .width(Length::Fixed(CARD_W))
            .height(Length::Fixed(CARD_H)),
    ]
    .into()
}

pub fn footer(app: &GlassCast) -> Element<'_, Message> {
    let mut lines = column![text("Powered by OpenWeatherMap").size(11).color(MUTED)]
        .spacing(2.0)
        .align_x(Alignment::Center);

    if let Some(updated) = &app.last_updated {
        lines = lines.push(
            text(format!("Updated: {}", updated.format("%I:%M:%S %p")))
                .size(11)
                .color(MUTED),
        );
    }

    lines.into()
}

/// Dimmed full-window layer with a centered panel. Clicking the backdrop or
/// the OK button dismisses it.
pub fn notice_modal(notice: &Notice) -> Element<'_, Message> {
    let ok = button(text("OK").size(14).color(Color::WHITE))
        .on_press(Message::DismissNotice)
        .padding([8.0, 28.0])
        .style(accent_button_style);

    let panel = container(
        column![
            text(notice.title).size(17).color(Color::WHITE),
            text(&notice.body).size(14).color(MUTED),
            ok,
        ]
        .spacing(14.0)
        .align_x(Alignment::Center),
    )
    .padding(24.0)
    .width(Length::Fixed(300.0))
    .style(notice_panel_style);

    opaque(
        mouse_area(center(opaque(panel)).style(|_theme| container::Style {
            background: Some(Background::Color(Color {
                a: 0.55,
                ..Color::BLACK
            })),
            ..container::Style::default()
        }))
        .on_press(Message::DismissNotice),
    )
}

fn notice_panel_style(_theme: &Theme) -> container::Style {
    container::Style {
        background: Some(Background::Color(Color::from_rgb8(95, 62, 160))),
        border: Border {
            color: Color {
                a: 0.35,
                ..Color::WHITE
            },
            width: 1.0,
            radius: 16.0.into(),
        },
        ..container::Style::default()
    }
}

fn accent_button_style(_theme: &Theme, _status: button::Status) -> button::Style {
    button::Style {
        background: Some(Background::Color(Color::from_rgb8(122, 90, 245))),
        text_color: Color::WHITE,
        border: Border {
            color: Color::TRANSPARENT,
            width: 0.0,
            radius: 16.0.into(),
        },
        shadow: Shadow::default(),
    }
}

fn bare_button_style(_theme: &Theme, _status: button::Status) -> button::Style {
    button::Style {
        background: None,
        text_color: Color::WHITE,
        border: Border::default(),
        shadow: Shadow::default(),
    }
}

fn search_input_style(_theme: &Theme, _status: text_input::Status) -> text_input::Style {
    text_input::Style {
        background: Background::Color(Color::TRANSPARENT),
        border: Border::default(),
        icon: Color::TRANSPARENT,
        placeholder: Color::from_rgb8(120, 115, 140),
        value: Color::from_rgb8(40, 25, 70),
        selection: Color {
            a: 0.4,
            ..Color::from_rgb8(122, 90, 245)
        },
    }
}
