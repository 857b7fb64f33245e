use crate::components::upload_badge;
use crate::message::Message;
use crate::model::UploadQueue;
use crate::utils::{pluralize, truncate};
use iced::widget::{button, column, row, scrollable, text, Column, Space};
use iced::{Alignment, Element, Length};

pub fn uploader_panel<'a>(queue: &'a UploadQueue, webhook: &'a str) -> Element<'a, Message> {
    let pick = button("Select PDFs").on_press_maybe((!queue.is_running()).then_some(Message::PickPdfs));
    let send_label = if queue.is_running() {
        "Processing…"
    } else {
        "Send to webhook"
    };
    let send = button(send_label)
        .style(button::primary)
        .on_press_maybe(queue.can_send().then_some(Message::SendPdfs));

    let list: Element<'a, Message> = if queue.items().is_empty() {
        text("No PDFs selected").into()
    } else {
        scrollable(
            queue
                .items()
                .iter()
                .fold(Column::new().spacing(6), |list, item| {
                    list.push(
                        row![
                            text(truncate(&item.name)),
                            Space::with_width(Length::Fill),
                            upload_badge(item.status),
                        ]
                        .spacing(12)
                        .align_y(Alignment::Center),
                    )
                })
                .padding([0, 12]),
        )
        .height(Length::Fill)
        .into()
    };

    column![
        text("Upload PDF reports").size(20),
        text(format!("Destination: {webhook}")).size(13),
        row![pick, send].spacing(12),
        text(pluralize(queue.items().len(), "file", "files")).size(13),
        list,
    ]
    .spacing(12)
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn panel_borrows_queue_and_destination() {
        let mut queue = UploadQueue::default();
        queue.replace([PathBuf::from("/tmp/reports/1.pdf")]);
        let webhook = String::from("http://localhost:5678/webhook/pdf-upload");
        let _panel: Element<'_, Message> = uploader_panel(&queue, &webhook);
    }
}
