use crate::message::Message;
use crate::model::Page;
use iced::border::{Border, Radius};
use iced::widget::button::{Status, Style};
use iced::widget::text::Wrapping;
use iced::widget::{button, container, text, Container, Row};
use iced::{Alignment, Background, Color, Length, Theme};

const TOGGLE_WIDTH: f32 = 320.0;
const SEGMENT_HEIGHT: f32 = 32.0;

/// Pill-shaped switch between the dashboard and the uploader.
pub fn page_toggle(current: Page) -> Container<'static, Message> {
    let segments = Page::ALL
        .iter()
        .fold(Row::new().spacing(4), |segments, &page| {
            segments.push(page_segment(page, page == current).width(Length::FillPortion(1)))
        });

    container(segments)
        .padding(3)
        .width(Length::Fixed(TOGGLE_WIDTH))
        .style(|theme: &Theme| {
            let palette = theme.extended_palette();
            container::Style {
                background: Some(Background::Color(palette.background.weak.color)),
                border: Border {
                    color: palette.background.strong.color,
                    width: 1.0,
                    radius: Radius::new(999.0),
                },
                ..Default::default()
            }
        })
}

fn page_segment(page: Page, is_active: bool) -> button::Button<'static, Message> {
    let label = container(text(page.title()).size(14).wrapping(Wrapping::None))
        .width(Length::Fill)
        .height(Length::Fixed(SEGMENT_HEIGHT))
        .align_x(Alignment::Center)
        .align_y(Alignment::Center);

    button(label)
        .padding(0)
        .on_press(Message::SetPage(page))
        .style(move |theme, status| segment_style(theme, status, is_active))
}

/// The active page reads as a filled primary pill; the other segment stays
/// transparent until hovered.
fn segment_style(theme: &Theme, status: Status, is_active: bool) -> Style {
    let palette = theme.extended_palette();

    let (background, text_color) = match (is_active, status) {
        (true, Status::Hovered | Status::Pressed) => {
            (palette.primary.base.color, palette.primary.base.text)
        }
        (true, _) => (palette.primary.strong.color, palette.primary.strong.text),
        (false, Status::Hovered | Status::Pressed) => {
            (palette.background.strong.color, palette.background.strong.text)
        }
        (false, _) => (Color::TRANSPARENT, palette.background.weak.text),
    };

    Style {
        background: Some(Background::Color(background)),
        text_color,
        border: Border {
            radius: Radius::new(999.0),
            ..Border::default()
        },
        ..Style::default()
    }
}
