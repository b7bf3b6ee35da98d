use iced::widget::{button, column, container, text, Space};
use iced::{Background, Element, Length};
use lucide_icons::iced::icon_chart_pie;

use crate::config::ReportConfig;
use crate::message::Message;
use crate::screens::Page;
use crate::theme::{accent_button_style, DRAWER_BG, DRAWER_TEXT_INACTIVE};

pub fn view<'a>(config: &ReportConfig, has_context: bool) -> Element<'a, Message> {
    let source = if has_context {
        "A report context was supplied and will be shown when the report opens."
    } else if config.persist {
        "No report context was supplied; the last saved report is used if it is under a day old."
    } else {
        "No report context was supplied and saving is disabled, so the report will be empty."
    };

    let open = button(
        iced::widget::row![icon_chart_pie().size(16), text("Open report")].spacing(8),
    )
    .style(accent_button_style)
    .on_press(Message::Navigate(Page::Report));

    let panel = container(
        column![
            text("Onboarding & Departure").size(22),
            text(format!(
                "{} and {} donut charts by department.",
                config.title_onboarding, config.title_offboarding
            ))
            .size(14)
            .style(|_| text::Style {
                color: Some(DRAWER_TEXT_INACTIVE),
            }),
            Space::new().height(Length::Fixed(8.0)),
            text(source).size(14),
            Space::new().height(Length::Fixed(8.0)),
            open,
        ]
        .spacing(12),
    )
    .padding(24)
    .width(Length::Fill)
    .max_width(900)
    .style(|_| container::background(Background::Color(DRAWER_BG)));

    container(panel)
        .padding(24)
        .center_x(Length::Fill)
        .height(Length::Fill)
        .into()
}
