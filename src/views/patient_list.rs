use crate::message::Message;
use crate::model::{Patient, PatientId};
use crate::utils::patient_summary;
use iced::widget::text::Wrapping;
use iced::widget::{button, column, text, Column};
use iced::Length;

pub fn patient_list_panel<'a>(
    patients: &'a [Patient],
    selected: Option<&PatientId>,
) -> Column<'a, Message> {
    let root = column![text("Patients").size(20)];

    if patients.is_empty() {
        return root.push(text("No patients available")).spacing(6);
    }

    patients
        .iter()
        .fold(root, |column, patient| {
            let is_selected = selected == Some(&patient.id);
            let name = if is_selected {
                format!("▶ {}", patient.name)
            } else {
                patient.name.clone()
            };

            let mut card = column![
                text(name).size(16),
                text(patient_summary(patient)).size(13),
                text(format!("Guardian: {}", patient.guardian)).size(13),
            ]
            .spacing(2);
            if let Some(date) = &patient.visit_date {
                card = card.push(text(format!("Visit: {date}")).size(12));
            }

            column.push(
                button(card.width(Length::Fill))
                    .width(Length::Fill)
                    .style(if is_selected {
                        button::primary
                    } else {
                        button::secondary
                    })
                    .on_press(Message::SelectPatient(patient.id.clone())),
            )
        })
        .spacing(6)
        .push(
            text(format!("{} on record", patients.len()))
                .size(12)
                .wrapping(Wrapping::Word),
        )
}
