//! HTTP access to the diagnosis API and the PDF ingestion webhook.
//!
//! Response parsing lives in plain functions over `&str` so it can be
//! tested without a server. No request timeout is configured: a request
//! that never settles keeps its caller waiting.

use crate::error::ApiError;
use crate::model::upload::PdfSink;
use crate::model::{DiagnosticPayload, Patient, PatientId};
use reqwest::multipart::{Form, Part};
use std::future::Future;
use std::path::PathBuf;

const PDF_MIME: &str = "application/pdf";
const UPLOAD_FIELD: &str = "file";

// =============================================================================
// DIAGNOSIS API
// =============================================================================

#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .build()
            .map_err(|e| ApiError::ClientBuild(e.to_string()))?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// `GET /all_diagnoses`
    pub async fn fetch_roster(&self) -> Result<Vec<Patient>, ApiError> {
        let body = self.get_text(&format!("{}/all_diagnoses", self.base_url)).await?;
        parse_roster(&body)
    }

    /// `GET /diagnosis/{id}`
    pub async fn fetch_diagnosis(&self, id: &PatientId) -> Result<DiagnosticPayload, ApiError> {
        let url = format!("{}/diagnosis/{id}", self.base_url);
        let body = self.get_text(&url).await?;
        parse_diagnosis(&body)
    }

    /// `GET /images/{folder}`, each entry resolved to a full URL.
    pub async fn fetch_images(&self, folder: &str) -> Result<Vec<String>, ApiError> {
        let url = format!("{}/images/{folder}", self.base_url);
        let body = self.get_text(&url).await?;
        let images = parse_image_list(&body)?;
        Ok(images
            .iter()
            .map(|path| resolve_image_url(&self.base_url, path))
            .collect())
    }

    pub async fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>, ApiError> {
        log::info!("GET {url}");
        let response = self.http.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }
        Ok(response.bytes().await?.to_vec())
    }

    async fn get_text(&self, url: &str) -> Result<String, ApiError> {
        log::info!("GET {url}");
        let response = self.http.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }
        Ok(response.text().await?)
    }
}

// =============================================================================
// UPLOAD WEBHOOK
// =============================================================================

/// Posts each PDF as a multipart form with a single `file` field.
#[derive(Debug, Clone)]
pub struct WebhookUploader {
    http: reqwest::Client,
    url: String,
}

impl WebhookUploader {
    pub fn new(url: impl Into<String>) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .build()
            .map_err(|e| ApiError::ClientBuild(e.to_string()))?;
        Ok(Self {
            http,
            url: url.into(),
        })
    }

    pub async fn upload(&self, path: PathBuf) -> Result<(), ApiError> {
        let bytes = tokio::fs::read(&path).await.map_err(|err| ApiError::Io {
            path: path.display().to_string(),
            message: err.to_string(),
        })?;
        let file_name = path
            .file_name()
            .map_or_else(|| "report.pdf".to_string(), |name| name.to_string_lossy().into_owned());

        log::info!("POST {} ({file_name}, {} bytes)", self.url, bytes.len());
        let part = Part::bytes(bytes).file_name(file_name).mime_str(PDF_MIME)?;
        let form = Form::new().part(UPLOAD_FIELD, part);

        let response = self.http.post(&self.url).multipart(form).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status {
                status: status.as_u16(),
                url: self.url.clone(),
            });
        }
        Ok(())
    }
}

impl PdfSink for WebhookUploader {
    fn send(&self, path: PathBuf) -> impl Future<Output = Result<(), ApiError>> + Send {
        let uploader = self.clone();
        async move { uploader.upload(path).await }
    }
}

// =============================================================================
// PARSING
// =============================================================================

#[derive(serde::Deserialize)]
struct ImagesResponse {
    #[serde(default)]
    images: Vec<String>,
}

fn parse_roster(json: &str) -> Result<Vec<Patient>, ApiError> {
    serde_json::from_str(json).map_err(|e| ApiError::Parse(e.to_string()))
}

fn parse_diagnosis(json: &str) -> Result<DiagnosticPayload, ApiError> {
    serde_json::from_str(json).map_err(|e| ApiError::Parse(e.to_string()))
}

fn parse_image_list(json: &str) -> Result<Vec<String>, ApiError> {
    let response: ImagesResponse =
        serde_json::from_str(json).map_err(|e| ApiError::Parse(e.to_string()))?;
    Ok(response.images)
}

/// Image paths from the API are usually server-relative; absolute URLs
/// are passed through untouched.
pub fn resolve_image_url(base_url: &str, path: &str) -> String {
    if path.starts_with("http://") || path.starts_with("https://") {
        return path.to_string();
    }
    let base = base_url.trim_end_matches('/');
    if path.starts_with('/') {
        format!("{base}{path}")
    } else {
        format!("{base}/{path}")
    }
}

#[cfg(test)]
#[path = "api_test.rs"]
mod tests;
