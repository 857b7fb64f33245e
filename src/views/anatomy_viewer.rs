use crate::image_pipeline::{Illustration, Picture, RemotePicture};
use crate::message::Message;
use crate::model::{SceneBase, ViewMode, ViewerScene};
use iced::widget::{button, column, container, row, stack, text, Image, Space, Svg};
use iced::{Alignment, ContentFit, Element, Length};
use std::collections::HashMap;

pub fn anatomy_viewer_panel<'a>(
    scene: &ViewerScene,
    illustration: Option<&Result<Illustration, String>>,
    remote: &HashMap<String, RemotePicture>,
) -> Element<'a, Message> {
    let header = match &scene.base {
        SceneBase::Remote(_) => row![
            text("Study image").size(20),
            Space::with_width(Length::Fill),
            button(text("Back to anatomy").size(14)).on_press(Message::ClearImage),
        ],
        SceneBase::Asset(_) => {
            let subtitle = match scene.mode {
                ViewMode::Baseline => String::new(),
                mode => format!(
                    "{} · {} highlighted",
                    mode.label(),
                    scene.visible_overlays().count()
                ),
            };
            row![
                text("Anatomical viewer").size(20),
                Space::with_width(Length::Fill),
                text(subtitle).size(14),
            ]
        }
    }
    .align_y(Alignment::Center);

    let body: Element<'a, Message> = match &scene.base {
        SceneBase::Remote(url) => match remote.get(url) {
            Some(RemotePicture::Ready(picture)) => picture_element(picture),
            Some(RemotePicture::Failed) => text("Study image could not be loaded").into(),
            _ => text("Loading study image…").into(),
        },
        SceneBase::Asset(_) => match illustration {
            Some(Ok(illustration)) => illustration
                .overlays
                .iter()
                .fold(stack![picture_element(&illustration.base)], |layers, overlay| {
                    layers.push(picture_element(overlay))
                })
                .width(Length::Fill)
                .height(Length::Fill)
                .into(),
            Some(Err(err)) => text(err.clone()).into(),
            None => text("Preparing illustration…").into(),
        },
    };

    column![
        header,
        container(body)
            .width(Length::Fill)
            .height(Length::Fill)
            .align_x(Alignment::Center)
            .align_y(Alignment::Center),
    ]
    .spacing(12)
    .into()
}

fn picture_element<'a>(picture: &Picture) -> Element<'a, Message> {
    match picture {
        Picture::Raster(handle) => Image::new(handle.clone())
            .width(Length::Fill)
            .height(Length::Fill)
            .content_fit(ContentFit::Contain)
            .into(),
        Picture::Vector(handle) => Svg::new(handle.clone())
            .width(Length::Fill)
            .height(Length::Fill)
            .content_fit(ContentFit::Contain)
            .into(),
    }
}
