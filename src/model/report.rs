use super::anatomy::normalize_organs;
use super::{DiagnosticPayload, Measurement, Study};
use std::collections::BTreeSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportTab {
    #[default]
    Diagnosis,
    Observations,
    Measurements,
    Recommendations,
    Images,
}

impl ReportTab {
    pub const ALL: [ReportTab; 5] = [
        ReportTab::Diagnosis,
        ReportTab::Observations,
        ReportTab::Measurements,
        ReportTab::Recommendations,
        ReportTab::Images,
    ];

    pub fn title(self) -> &'static str {
        match self {
            ReportTab::Diagnosis => "Diagnosis",
            ReportTab::Observations => "Observations",
            ReportTab::Measurements => "Measurements",
            ReportTab::Recommendations => "Recommendations",
            ReportTab::Images => "Images",
        }
    }
}

/// `Normal` is its own selection, not the absence of one: choosing it
/// clears the viewer instead of leaving the last study highlighted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StudySelection {
    #[default]
    Normal,
    Study(usize),
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ImageList {
    #[default]
    NotRequested,
    Loading { folder: String },
    Loaded { folder: String, urls: Vec<String> },
}

/// Per-patient report navigation: visible tab, chosen study, and the
/// viewer inputs derived from that study.
#[derive(Debug, Clone, Default)]
pub struct ReportState {
    tab: ReportTab,
    selection: StudySelection,
    active_organs: BTreeSet<String>,
    selected_image: Option<String>,
    measurements: Vec<Measurement>,
    images: ImageList,
}

impl ReportState {
    pub fn tab(&self) -> ReportTab {
        self.tab
    }

    pub fn selection(&self) -> StudySelection {
        self.selection
    }

    pub fn active_organs(&self) -> &BTreeSet<String> {
        &self.active_organs
    }

    pub fn selected_image(&self) -> Option<&str> {
        self.selected_image.as_deref()
    }

    pub fn measurements(&self) -> &[Measurement] {
        &self.measurements
    }

    pub fn images(&self) -> &ImageList {
        &self.images
    }

    pub fn set_tab(&mut self, tab: ReportTab) {
        self.tab = tab;
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Viewer inputs are always cleared first so nothing from the previous
    /// study survives the switch.
    pub fn select_study(&mut self, payload: Option<&DiagnosticPayload>, selection: StudySelection) {
        self.active_organs.clear();
        self.selected_image = None;
        self.measurements.clear();
        self.selection = StudySelection::Normal;

        let StudySelection::Study(index) = selection else {
            return;
        };
        let Some(study) = payload.and_then(|payload| payload.study(index)) else {
            log::warn!("Study {index} is not part of the loaded report, showing normal view");
            return;
        };

        self.selection = selection;
        self.active_organs = normalize_organs(study.organs());
        self.measurements = study.measurements.clone();
    }

    pub fn selected_study<'a>(&self, payload: Option<&'a DiagnosticPayload>) -> Option<&'a Study> {
        match self.selection {
            StudySelection::Normal => None,
            StudySelection::Study(index) => payload.and_then(|payload| payload.study(index)),
        }
    }

    pub fn select_image(&mut self, url: String) {
        self.selected_image = Some(url);
    }

    pub fn clear_image(&mut self) {
        self.selected_image = None;
    }

    /// The image folder to request, if the Images tab is showing and the
    /// folder has not been requested yet.
    pub fn pending_image_fetch(&self, payload: Option<&DiagnosticPayload>) -> Option<String> {
        if self.tab != ReportTab::Images {
            return None;
        }
        let folder = payload.and_then(DiagnosticPayload::image_folder)?;
        match &self.images {
            ImageList::Loading { folder: current } | ImageList::Loaded { folder: current, .. }
                if current == folder =>
            {
                None
            }
            _ => Some(folder.to_string()),
        }
    }

    pub fn begin_image_fetch(&mut self, folder: String) {
        self.images = ImageList::Loading { folder };
    }

    /// Results for a folder other than the one being loaded are dropped and
    /// `false` is returned.
    pub fn finish_image_fetch(&mut self, folder: &str, urls: Vec<String>) -> bool {
        if !matches!(&self.images, ImageList::Loading { folder: current } if current == folder) {
            log::debug!("Dropping image list for stale folder {folder}");
            return false;
        }
        self.images = ImageList::Loaded {
            folder: folder.to_string(),
            urls,
        };
        true
    }
}

#[cfg(test)]
#[path = "report_test.rs"]
mod tests;
