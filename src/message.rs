use crate::error::ApiError;
use crate::image_pipeline::Picture;
use crate::model::{
    DiagnosticPayload, Page, Patient, PatientId, ReportTab, StudySelection, UploadEvent,
};
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub enum Message {
    SetPage(Page),
    RosterLoaded(Result<Vec<Patient>, ApiError>),
    SelectPatient(PatientId),
    DiagnosisLoaded(PatientId, Result<DiagnosticPayload, ApiError>),
    SetTab(ReportTab),
    SelectStudy(StudySelection),
    ImagesLoaded(String, Result<Vec<String>, ApiError>),
    PictureLoaded(String, Result<Picture, String>),
    SelectImage(String),
    ClearImage,
    PickPdfs,
    PdfsPicked(Vec<PathBuf>),
    SendPdfs,
    Upload(UploadEvent),
}
