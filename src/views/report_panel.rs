use crate::components::severity_badge;
use crate::image_pipeline::{Picture, RemotePicture};
use crate::message::Message;
use crate::model::severity::{group_by_organ, keyword_chips};
use crate::model::{
    classify_observation, DiagnosticPayload, ImageList, ReportState, ReportTab, SeveritySummary,
    StudySelection,
};
use crate::utils::{format_measurement, pluralize, truncate};
use iced::widget::text::Wrapping;
use iced::widget::{button, column, container, pick_list, row, scrollable, text, Column, Image, Row, Svg};
use iced::{ContentFit, Element, Length};
use std::collections::HashMap;
use std::fmt;

const FOLLOW_UP: &str = "Clinical follow-up recommended with periodic check-ups.";
const THUMBNAIL_WIDTH: f32 = 140.0;
const THUMBNAIL_HEIGHT: f32 = 100.0;

#[derive(Debug, Clone, PartialEq)]
struct StudyOption {
    selection: StudySelection,
    label: String,
}

impl fmt::Display for StudyOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label)
    }
}

fn study_options(payload: Option<&DiagnosticPayload>) -> Vec<StudyOption> {
    let normal = StudyOption {
        selection: StudySelection::Normal,
        label: "Normal".to_string(),
    };
    let studies = payload
        .map(|payload| payload.studies.as_slice())
        .unwrap_or_default();

    std::iter::once(normal)
        .chain(studies.iter().enumerate().map(|(index, study)| StudyOption {
            selection: StudySelection::Study(index),
            label: study.label(index),
        }))
        .collect()
}

pub fn report_panel<'a>(
    payload: Option<&'a DiagnosticPayload>,
    loading: bool,
    report: &'a ReportState,
    remote: &'a HashMap<String, RemotePicture>,
) -> Element<'a, Message> {
    let tabs = ReportTab::ALL
        .iter()
        .fold(Row::new().spacing(6), |tabs, &tab| {
            tabs.push(
                button(text(tab.title()).size(14))
                    .style(if tab == report.tab() {
                        button::primary
                    } else {
                        button::secondary
                    })
                    .on_press(Message::SetTab(tab)),
            )
        });

    let options = study_options(payload);
    let selected = options
        .iter()
        .find(|option| option.selection == report.selection())
        .cloned();
    let study_picker = pick_list(options, selected, |option: StudyOption| {
        Message::SelectStudy(option.selection)
    })
    .width(Length::Fixed(220.0));

    let body: Element<'a, Message> = if loading {
        text("Loading report…").into()
    } else {
        match report.tab() {
            ReportTab::Diagnosis => diagnosis_tab(payload),
            ReportTab::Observations => observations_tab(payload, report),
            ReportTab::Measurements => measurements_tab(report),
            ReportTab::Recommendations => column![
                text("Recommendations").size(16),
                text(FOLLOW_UP).wrapping(Wrapping::Word),
            ]
            .spacing(8)
            .into(),
            ReportTab::Images => images_tab(report, remote),
        }
    };

    column![
        row![tabs, study_picker].spacing(16),
        scrollable(container(body).padding([8, 0]).width(Length::Fill)).height(Length::Fill),
    ]
    .spacing(12)
    .into()
}

fn diagnosis_tab(payload: Option<&DiagnosticPayload>) -> Element<'_, Message> {
    let Some(payload) = payload else {
        return text("No diagnosis available").into();
    };

    let findings = payload.findings();
    let mut content = column![text("Findings").size(16)].spacing(6);
    content = if findings.is_empty() {
        content.push(text("No diagnosis available"))
    } else {
        findings.into_iter().fold(content, |content, finding| {
            content.push(text(format!("• {finding}")).wrapping(Wrapping::Word))
        })
    };

    if let Some(history) = payload.history.as_deref().filter(|h| !h.trim().is_empty()) {
        content = content
            .push(text("History").size(16))
            .push(text(history).wrapping(Wrapping::Word));
    }
    if let Some(vet) = &payload.veterinarian {
        content = content.push(text(format!("Veterinarian: {}", vet.display_name())).size(13));
    }
    if let Some(date) = &payload.date {
        content = content.push(text(format!("Report date: {date}")).size(13));
    }

    content.into()
}

fn observations_tab<'a>(
    payload: Option<&'a DiagnosticPayload>,
    report: &ReportState,
) -> Element<'a, Message> {
    let Some(study) = report.selected_study(payload) else {
        return text("Select a study to see its observations").into();
    };
    if study.observations.is_empty() {
        return text("No observations recorded for this study").into();
    }

    let summary = SeveritySummary::from_observations(&study.observations);
    let header = text(format!(
        "{} · {} normal, {} warning, {} critical",
        pluralize(summary.total, "observation", "observations"),
        summary.normal,
        summary.warning,
        summary.critical
    ))
    .size(14);

    group_by_organ(&study.observations)
        .into_iter()
        .fold(column![header].spacing(12), |content, (organ, notes)| {
            let group = notes.into_iter().fold(
                column![text(organ.to_string()).size(16)].spacing(6),
                |group, observation| {
                    let chips = keyword_chips(&observation.note).into_iter().fold(
                        Row::new().spacing(4),
                        |chips, chip| {
                            chips.push(
                                container(text(chip.to_string()).size(11))
                                    .padding([1, 6])
                                    .style(container::rounded_box),
                            )
                        },
                    );
                    group.push(
                        column![
                            row![
                                severity_badge(classify_observation(&observation.note)),
                                text(observation.note.clone()).wrapping(Wrapping::Word),
                            ]
                            .spacing(8),
                            chips,
                        ]
                        .spacing(4),
                    )
                },
            );
            content.push(group)
        })
        .into()
}

fn measurements_tab(report: &ReportState) -> Element<'_, Message> {
    if report.measurements().is_empty() {
        return text(match report.selection() {
            StudySelection::Normal => "Select a study to see its measurements",
            StudySelection::Study(_) => "No measurements recorded for this study",
        })
        .into();
    }

    report
        .measurements()
        .iter()
        .fold(Column::new().spacing(8), |cards, measurement| {
            cards.push(
                container(
                    column![
                        text(measurement.organ.as_str()).size(15),
                        text(measurement.kind.as_str()).size(13),
                        text(format_measurement(measurement)).size(18),
                    ]
                    .spacing(2),
                )
                .padding(10)
                .width(Length::Fill)
                .style(container::rounded_box),
            )
        })
        .into()
}

fn images_tab<'a>(
    report: &'a ReportState,
    remote: &'a HashMap<String, RemotePicture>,
) -> Element<'a, Message> {
    let urls = match report.images() {
        ImageList::NotRequested => return text("No images available for this patient").into(),
        ImageList::Loading { .. } => return text("Loading images…").into(),
        ImageList::Loaded { urls, .. } if urls.is_empty() => {
            return text("No images available for this patient").into()
        }
        ImageList::Loaded { urls, .. } => urls,
    };

    urls.iter()
        .fold(Row::new().spacing(8), |strip, url| {
            let preview: Element<'a, Message> = match remote.get(url) {
                Some(RemotePicture::Ready(picture)) => thumbnail(picture),
                Some(RemotePicture::Failed) => text("Unavailable").size(12).into(),
                _ => text("Loading…").size(12).into(),
            };
            let is_selected = report.selected_image() == Some(url.as_str());

            strip.push(
                column![
                    button(preview)
                        .width(Length::Fixed(THUMBNAIL_WIDTH))
                        .height(Length::Fixed(THUMBNAIL_HEIGHT))
                        .style(if is_selected {
                            button::primary
                        } else {
                            button::secondary
                        })
                        .on_press(Message::SelectImage(url.clone())),
                    text(truncate(url.rsplit('/').next().unwrap_or(url))).size(11),
                ]
                .spacing(4),
            )
        })
        .wrap()
        .into()
}

fn thumbnail<'a>(picture: &Picture) -> Element<'a, Message> {
    match picture {
        Picture::Raster(handle) => Image::new(handle.clone())
            .content_fit(ContentFit::Cover)
            .into(),
        Picture::Vector(handle) => Svg::new(handle.clone())
            .content_fit(ContentFit::Contain)
            .into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn study_options_lead_with_normal() {
        let payload: DiagnosticPayload = serde_json::from_value(serde_json::json!({
            "paciente": { "id": 1, "nombre": "Luna", "tutor": "Ana" },
            "estudios": [{ "tipo_estudio": "Ecografía" }, {}]
        }))
        .unwrap();

        let options = study_options(Some(&payload));
        let labels: Vec<String> = options.iter().map(ToString::to_string).collect();
        assert_eq!(labels, vec!["Normal", "Ecografía", "Study 2"]);
        assert_eq!(options[2].selection, StudySelection::Study(1));
    }

    #[test]
    fn study_options_without_payload() {
        let options = study_options(None);
        assert_eq!(options.len(), 1);
        assert_eq!(options[0].selection, StudySelection::Normal);
    }
}
