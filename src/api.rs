//! HTTP surface for docbrief.
//!
//! - `POST /api/upload` – Multipart upload with a `document` file field and an optional
//!   `summaryLength` (`short` | `medium` | `long`, default `medium`). Returns the extracted text
//!   and the summary.
//! - `GET /api/metrics` – Pipeline counters.
//! - `GET /api/commands` – Machine-readable endpoint catalog.
//!
//! Any other `/api/*` path answers with a JSON 404.

use crate::processing::{Document, LengthTier, MAX_DOCUMENT_BYTES, PipelineError, SummaryApi};
use axum::{
    Json, Router,
    extract::{DefaultBodyLimit, Multipart, State, multipart::MultipartError},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::Serialize;
use serde_json::json;
use std::sync::Arc;
use tower_http::cors::CorsLayer;

/// Multipart framing and the `summaryLength` field on top of the document itself.
const BODY_LIMIT_SLACK: usize = 64 * 1024;

/// Build the HTTP router exposing the upload API.
pub fn create_router<S>(service: Arc<S>) -> Router
where
    S: SummaryApi + 'static,
{
    let api = Router::new()
        .route("/upload", post(upload_document::<S>))
        .route("/metrics", get(get_metrics::<S>))
        .route("/commands", get(get_commands))
        .fallback(api_not_found)
        .with_state(service);

    Router::new()
        .nest("/api", api)
        .layer(DefaultBodyLimit::max(MAX_DOCUMENT_BYTES + BODY_LIMIT_SLACK))
        .layer(CorsLayer::permissive())
}

/// Success response for `POST /api/upload`.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct UploadResponse {
    success: bool,
    original_name: String,
    extracted_text: String,
    summary: String,
    summary_length: LengthTier,
}

struct UploadForm {
    file_name: String,
    bytes: Vec<u8>,
    tier: LengthTier,
}

/// Extract and summarize an uploaded document.
async fn upload_document<S>(
    State(service): State<Arc<S>>,
    multipart: Multipart,
) -> Result<Json<UploadResponse>, AppError>
where
    S: SummaryApi,
{
    let request_id = uuid::Uuid::new_v4();
    let form = match read_upload_form(multipart).await {
        Ok(form) => form,
        Err(error) => {
            if matches!(error, AppError::Pipeline(_)) {
                service.record_rejected_upload();
            }
            tracing::warn!(%request_id, error = %error, "Upload rejected");
            return Err(error);
        }
    };

    let document = Document::new(form.file_name, form.bytes).inspect_err(|error| {
        service.record_rejected_upload();
        tracing::warn!(%request_id, error = %error, "Upload rejected");
    })?;
    tracing::info!(
        %request_id,
        file = document.original_name(),
        size = document.size(),
        tier = %form.tier,
        "Upload accepted"
    );

    let report = service
        .summarize_document(document, form.tier)
        .await
        .inspect_err(|error| tracing::error!(%request_id, error = %error, "Processing failed"))?;

    tracing::info!(
        %request_id,
        provenance = %report.summary.provenance,
        "Upload processed"
    );
    Ok(Json(UploadResponse {
        success: true,
        original_name: report.original_name,
        extracted_text: report.extracted.into_string(),
        summary: report.summary.text,
        summary_length: report.tier,
    }))
}

/// Collect the `document` and `summaryLength` fields in whatever order they arrive.
async fn read_upload_form(mut multipart: Multipart) -> Result<UploadForm, AppError> {
    let mut document: Option<(String, Vec<u8>)> = None;
    let mut summary_length: Option<String> = None;

    while let Some(mut field) = multipart.next_field().await.map_err(AppError::multipart)? {
        let name = field.name().map(str::to_owned);
        match name.as_deref() {
            Some("document") => {
                let file_name = field.file_name().unwrap_or_default().to_string();
                let mut bytes = Vec::new();
                while let Some(chunk) = field.chunk().await.map_err(AppError::multipart)? {
                    if bytes.len() + chunk.len() > MAX_DOCUMENT_BYTES {
                        return Err(AppError::Pipeline(PipelineError::FileTooLarge {
                            size: bytes.len() + chunk.len(),
                            limit: MAX_DOCUMENT_BYTES,
                        }));
                    }
                    bytes.extend_from_slice(&chunk);
                }
                document = Some((file_name, bytes));
            }
            Some("summaryLength") => {
                summary_length = Some(field.text().await.map_err(AppError::multipart)?);
            }
            _ => {}
        }
    }

    let (file_name, bytes) = document.ok_or_else(|| AppError::BadRequest("No file uploaded".into()))?;
    Ok(UploadForm {
        file_name,
        bytes,
        tier: LengthTier::parse_lenient(summary_length.as_deref()),
    })
}

/// Return the pipeline counters.
async fn get_metrics<S>(State(service): State<Arc<S>>) -> Json<crate::metrics::MetricsSnapshot>
where
    S: SummaryApi,
{
    Json(service.metrics_snapshot())
}

/// Descriptor for a single command in the discovery catalog.
#[derive(Serialize)]
struct CommandDescriptor {
    name: &'static str,
    method: &'static str,
    path: &'static str,
    description: &'static str,
}

/// Response body for `GET /api/commands`.
#[derive(Serialize)]
struct CommandsResponse {
    commands: Vec<CommandDescriptor>,
}

/// Enumerate supported HTTP commands for discovery by hosts and tools.
async fn get_commands() -> Json<CommandsResponse> {
    Json(CommandsResponse {
        commands: vec![
            CommandDescriptor {
                name: "upload",
                method: "POST",
                path: "/api/upload",
                description: "Multipart upload: `document` (PDF, PNG, JPG, JPEG, TIFF, BMP or GIF, at most 10MB) and optional `summaryLength` (short | medium | long). Returns { success, originalName, extractedText, summary, summaryLength }.",
            },
            CommandDescriptor {
                name: "metrics",
                method: "GET",
                path: "/api/metrics",
                description: "Return document, summary and failure counters.",
            },
        ],
    })
}

async fn api_not_found() -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "error": "API endpoint not found",
            "message": "The requested API endpoint does not exist"
        })),
    )
        .into_response()
}

#[derive(Debug, thiserror::Error)]
enum AppError {
    #[error("{0}")]
    BadRequest(String),
    #[error(transparent)]
    Pipeline(#[from] PipelineError),
}

impl AppError {
    fn multipart(error: MultipartError) -> Self {
        // The body limit can trip before the per-field size check sees the oversized chunk.
        if error.status() == StatusCode::PAYLOAD_TOO_LARGE {
            return Self::Pipeline(PipelineError::FileTooLarge {
                size: MAX_DOCUMENT_BYTES + BODY_LIMIT_SLACK,
                limit: MAX_DOCUMENT_BYTES,
            });
        }
        Self::BadRequest(format!("Malformed upload: {}", error.body_text()))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            Self::BadRequest(message) => (StatusCode::BAD_REQUEST, json!({ "error": message })),
            Self::Pipeline(PipelineError::UnsupportedFileType(_)) => (
                StatusCode::BAD_REQUEST,
                json!({ "error": "Invalid file type. Only PDF and image files are allowed." }),
            ),
            Self::Pipeline(PipelineError::FileTooLarge { .. }) => (
                StatusCode::BAD_REQUEST,
                json!({ "error": "File too large. Maximum size is 10MB." }),
            ),
            Self::Pipeline(error) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({ "error": "Failed to process document", "message": error.to_string() }),
            ),
        };
        (status, Json(body)).into_response()
    }
}
