use crate::message::Message;
use crate::model::{Severity, UploadStatus};
use iced::widget::text::Wrapping;
use iced::widget::{container, text, Container};
use iced::{Background, Color, Theme};

const WARNING_AMBER: Color = Color {
    r: 0.93,
    g: 0.71,
    b: 0.16,
    a: 1.0,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BadgeTone {
    Neutral,
    Info,
    Good,
    Caution,
    Bad,
}

pub fn severity_badge(severity: Severity) -> Container<'static, Message> {
    let tone = match severity {
        Severity::Normal => BadgeTone::Good,
        Severity::Warning => BadgeTone::Caution,
        Severity::Critical => BadgeTone::Bad,
    };
    badge(severity.label(), tone)
}

pub fn upload_badge(status: UploadStatus) -> Container<'static, Message> {
    let tone = match status {
        UploadStatus::Pending => BadgeTone::Neutral,
        UploadStatus::Uploading => BadgeTone::Info,
        UploadStatus::Success => BadgeTone::Good,
        UploadStatus::Error => BadgeTone::Bad,
    };
    badge(status.label(), tone)
}

fn badge(label: &'static str, tone: BadgeTone) -> Container<'static, Message> {
    container(text(label).size(12).wrapping(Wrapping::None))
        .padding([2, 10])
        .style(move |theme| badge_style(theme, tone))
}

fn badge_style(theme: &Theme, tone: BadgeTone) -> iced::widget::container::Style {
    let palette = theme.extended_palette();

    let (background, text_color) = match tone {
        BadgeTone::Neutral => (palette.background.strong.color, palette.background.strong.text),
        BadgeTone::Info => (palette.primary.weak.color, palette.primary.weak.text),
        BadgeTone::Good => (palette.success.weak.color, palette.success.weak.text),
        BadgeTone::Caution => (WARNING_AMBER.scale_alpha(0.85), Color::BLACK),
        BadgeTone::Bad => (palette.danger.weak.color, palette.danger.weak.text),
    };

    iced::widget::container::Style {
        background: Some(Background::Color(background)),
        text_color: Some(text_color),
        border: iced::border::Border {
            color: Color::TRANSPARENT,
            width: 0.0,
            radius: iced::border::Radius::new(999.0),
        },
        ..Default::default()
    }
}
