use super::*;
use serde_json::json;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// Accepts a single HTTP request, answers with `status` and `body`, and
/// returns the raw request text.
async fn serve_once(status: u16, body: &'static str) -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let handle = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut raw = Vec::new();
        let mut buf = [0u8; 4096];

        let header_end = loop {
            let n = socket.read(&mut buf).await.unwrap();
            raw.extend_from_slice(&buf[..n]);
            if let Some(pos) = raw.windows(4).position(|w| w == b"\r\n\r\n") {
                break pos + 4;
            }
            assert!(n > 0, "connection closed before headers were complete");
        };

        let headers = String::from_utf8_lossy(&raw[..header_end]).to_lowercase();
        let content_length = headers
            .lines()
            .find_map(|line| line.strip_prefix("content-length:"))
            .and_then(|value| value.trim().parse::<usize>().ok())
            .unwrap_or(0);
        while raw.len() < header_end + content_length {
            let n = socket.read(&mut buf).await.unwrap();
            if n == 0 {
                break;
            }
            raw.extend_from_slice(&buf[..n]);
        }

        let response = format!(
            "HTTP/1.1 {status} Test\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );
        socket.write_all(response.as_bytes()).await.unwrap();
        socket.shutdown().await.ok();
        String::from_utf8_lossy(&raw).into_owned()
    });

    (format!("http://{addr}"), handle)
}

fn temp_pdf(name: &str) -> (tempfile::TempDir, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(name);
    std::fs::write(&path, b"%PDF-1.4\n%%EOF\n").unwrap();
    (dir, path)
}

#[test]
fn parse_roster_reads_sidebar_items() {
    let body = json!([
        { "id": "a1", "nombre": "Luna", "tutor": "Ana", "edad": "8", "raza": "Doberman", "fecha": "2025-09-19" },
        { "id": 2, "nombre": "Rex", "tutor": "Leo", "fecha": "2025-09-20" }
    ])
    .to_string();
    let roster = parse_roster(&body).unwrap();
    assert_eq!(roster.len(), 2);
    assert_eq!(roster[0].visit_date.as_deref(), Some("2025-09-19"));
    assert_eq!(roster[1].id.as_str(), "2");
    assert_eq!(roster[1].breed, None);
}

#[test]
fn parse_roster_rejects_garbage() {
    assert!(matches!(parse_roster("{\"detail\": 1}"), Err(ApiError::Parse(_))));
}

#[test]
fn parse_image_list_defaults_to_empty() {
    assert!(parse_image_list("{\"status\": \"success\"}").unwrap().is_empty());
    assert_eq!(
        parse_image_list("{\"status\": \"success\", \"images\": [\"/extracted_images/1_images/p1.png\"]}")
            .unwrap(),
        vec!["/extracted_images/1_images/p1.png"]
    );
}

#[test]
fn image_urls_resolve_against_base() {
    assert_eq!(
        resolve_image_url("http://localhost:8000", "/extracted_images/a.png"),
        "http://localhost:8000/extracted_images/a.png"
    );
    assert_eq!(
        resolve_image_url("http://localhost:8000/", "extracted_images/a.png"),
        "http://localhost:8000/extracted_images/a.png"
    );
    assert_eq!(
        resolve_image_url("http://localhost:8000", "https://cdn.example.test/a.png"),
        "https://cdn.example.test/a.png"
    );
}

#[tokio::test]
async fn fetch_roster_hits_all_diagnoses() {
    let (base, server) = serve_once(200, r#"[{"id": 1, "nombre": "Luna", "tutor": "Ana"}]"#).await;
    let client = ApiClient::new(format!("{base}/")).unwrap();

    let roster = client.fetch_roster().await.unwrap();
    assert_eq!(roster[0].name, "Luna");

    let request = server.await.unwrap();
    assert!(request.starts_with("GET /all_diagnoses HTTP/1.1"));
}

#[tokio::test]
async fn fetch_diagnosis_maps_error_status() {
    let (base, server) = serve_once(404, r#"{"detail": "Diagnóstico no encontrado"}"#).await;
    let client = ApiClient::new(base).unwrap();

    let err = client.fetch_diagnosis(&PatientId::new("p-9")).await.unwrap_err();
    assert!(matches!(err, ApiError::Status { status: 404, .. }));

    let request = server.await.unwrap();
    assert!(request.starts_with("GET /diagnosis/p-9 HTTP/1.1"));
}

#[tokio::test]
async fn fetch_images_resolves_relative_paths() {
    let (base, server) = serve_once(
        200,
        r#"{"status": "success", "images": ["/extracted_images/3_images/p1.png"]}"#,
    )
    .await;
    let client = ApiClient::new(base.clone()).unwrap();

    let images = client.fetch_images("3_images").await.unwrap();
    assert_eq!(images, vec![format!("{base}/extracted_images/3_images/p1.png")]);
    assert!(server.await.unwrap().starts_with("GET /images/3_images HTTP/1.1"));
}

#[tokio::test]
async fn upload_posts_multipart_file_field() {
    let (base, server) = serve_once(200, "{}").await;
    let uploader = WebhookUploader::new(format!("{base}/webhook/pdf-upload")).unwrap();
    let (_dir, path) = temp_pdf("report.pdf");

    uploader.send(path).await.unwrap();

    let request = server.await.unwrap();
    assert!(request.starts_with("POST /webhook/pdf-upload HTTP/1.1"));
    let lowered = request.to_lowercase();
    assert!(lowered.contains("content-type: multipart/form-data"));
    assert!(request.contains("name=\"file\"; filename=\"report.pdf\""));
    assert!(lowered.contains("content-type: application/pdf"));
    assert!(request.contains("%PDF-1.4"));
}

#[tokio::test]
async fn upload_fails_on_non_success_status() {
    let (base, server) = serve_once(500, "{}").await;
    let uploader = WebhookUploader::new(base).unwrap();
    let (_dir, path) = temp_pdf("broken.pdf");

    let err = uploader.send(path).await.unwrap_err();
    assert!(matches!(err, ApiError::Status { status: 500, .. }));
    server.await.unwrap();
}

#[tokio::test]
async fn upload_fails_when_file_is_missing() {
    let uploader = WebhookUploader::new("http://127.0.0.1:9/webhook").unwrap();
    let err = uploader
        .send(PathBuf::from("/nonexistent/vetlens/missing.pdf"))
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::Io { .. }));
}
