pub mod anatomy;
pub mod page;
pub mod patient;
pub mod report;
pub mod severity;
pub mod upload;

pub use anatomy::{resolve_scene, OrganOverlay, SceneBase, ViewMode, ViewerScene};
pub use page::Page;
pub use patient::{DiagnosticPayload, Measurement, Observation, Patient, PatientId, Study};
pub use report::{ImageList, ReportState, ReportTab, StudySelection};
pub use severity::{classify_observation, Severity, SeveritySummary};
pub use upload::{UploadEvent, UploadQueue, UploadStatus};
