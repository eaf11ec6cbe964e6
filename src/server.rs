//! HTTP endpoints and the embedded web UI.

use std::net::SocketAddr;

use anyhow::Result;
use axum::body::Bytes;
use axum::extract::multipart::Multipart;
use axum::extract::{DefaultBodyLimit, FromRequest, Request};
use axum::http::{StatusCode, header};
use axum::response::{Html, IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;
use tracing::{error, info};

use crate::config::Config;

const INDEX_HTML: &str = include_str!("../static/index.html");
const APP_JS: &str = include_str!("../static/app.js");

const DOCX_MIME: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

pub fn router(config: &Config) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/app.js", get(app_js))
        .route("/api/docx-to-md", post(docx_to_md))
        .route("/api/md-to-docx", post(md_to_docx))
        .layer(DefaultBodyLimit::max(config.limits.max_upload_bytes))
}

/// Bind and serve until shutdown.
pub async fn serve(config: Config) -> Result<()> {
    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;
    let app = router(&config);

    info!("listening on http://{addr}");
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

async fn app_js() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "application/javascript")], APP_JS)
}

#[derive(Serialize)]
struct MarkdownResponse {
    success: bool,
    markdown: String,
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

#[derive(Deserialize)]
struct ConvertRequest {
    markdown: String,
}

fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    (status, Json(ErrorResponse { error: message.into() })).into_response()
}

/// Upload a DOCX file, get its markdown back as JSON.
async fn docx_to_md(mut multipart: Multipart) -> Response {
    let data = match read_file_field(&mut multipart).await {
        Ok(Some(bytes)) => bytes,
        Ok(None) => return error_response(StatusCode::BAD_REQUEST, "missing file upload"),
        Err(err) => return error_response(StatusCode::BAD_REQUEST, err.to_string()),
    };

    match crate::docx_to_markdown(&data) {
        Ok(markdown) => Json(MarkdownResponse {
            success: true,
            markdown,
        })
        .into_response(),
        Err(err) => {
            error!("docx extraction failed: {err}");
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("conversion failed: {err}"),
            )
        }
    }
}

/// Accepts either a multipart file upload or a JSON body with markdown
/// text, and responds with a downloadable DOCX.
async fn md_to_docx(req: Request) -> Response {
    let content_type = req
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_string();

    let markdown = if content_type.starts_with("multipart/form-data") {
        let mut multipart = match Multipart::from_request(req, &()).await {
            Ok(multipart) => multipart,
            Err(err) => return error_response(StatusCode::BAD_REQUEST, err.to_string()),
        };
        match read_file_field(&mut multipart).await {
            Ok(Some(bytes)) => match String::from_utf8(bytes.to_vec()) {
                Ok(text) => text,
                Err(_) => {
                    return error_response(
                        StatusCode::BAD_REQUEST,
                        "uploaded file is not valid UTF-8",
                    );
                }
            },
            Ok(None) => {
                return error_response(
                    StatusCode::BAD_REQUEST,
                    "provide a file upload or markdown content",
                );
            }
            Err(err) => return error_response(StatusCode::BAD_REQUEST, err.to_string()),
        }
    } else {
        match Json::<ConvertRequest>::from_request(req, &()).await {
            Ok(Json(body)) => body.markdown,
            Err(_) => {
                return error_response(
                    StatusCode::BAD_REQUEST,
                    "provide a file upload or markdown content",
                );
            }
        }
    };

    match crate::markdown_to_docx(&markdown) {
        Ok(bytes) => (
            [
                (header::CONTENT_TYPE, DOCX_MIME),
                (
                    header::CONTENT_DISPOSITION,
                    "attachment; filename=\"converted.docx\"",
                ),
            ],
            bytes,
        )
            .into_response(),
        Err(err) => {
            error!("docx generation failed: {err}");
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("conversion failed: {err}"),
            )
        }
    }
}

async fn read_file_field(multipart: &mut Multipart) -> Result<Option<Bytes>> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() == Some("file") {
            return Ok(Some(field.bytes().await?));
        }
    }
    Ok(None)
}
