use std::sync::Arc;

use axum::{body::Bytes, extract::Query, response::IntoResponse, Extension, Json};
use serde_json::json;
use validator::Validate;

use crate::{
    dtos::uploaddtos::{BatchUploadDto, ServerUploadQueryDto, UploadInitDto},
    error::HttpError,
    service::{
        storage::UploadItem,
        upload::{
            generate_object_name, parse_data_url, select_upload_route, UploadError, UploadRoute,
            DIRECT_UPLOAD_THRESHOLD_BYTES,
        },
    },
    AppState,
};

/// Decide how the admin browser should move a file into the bucket: small
/// files come back through `/api/upload`, large ones get a signed path
/// and go straight to storage.
pub async fn init_upload(
    Extension(app_state): Extension<Arc<AppState>>,
    Json(body): Json<UploadInitDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let route = select_upload_route(body.size, &body.content_type).map_err(HttpError::from)?;

    match route {
        UploadRoute::Server => Ok(Json(json!({
            "status": "success",
            "data": {
                "mode": route,
                "uploadUrl": "/api/upload"
            }
        }))),
        UploadRoute::Direct => {
            let object_name = generate_object_name(&body.content_type);
            let signed = app_state
                .storage
                .create_signed_upload(&object_name)
                .await
                .map_err(HttpError::from)?;

            Ok(Json(json!({
                "status": "success",
                "data": {
                    "mode": route,
                    "upload": signed
                }
            })))
        }
    }
}

/// Server-proxied path: the bytes arrive in the request body and are
/// written through the privileged storage credential.
pub async fn upload_image(
    Query(query): Query<ServerUploadQueryDto>,
    Extension(app_state): Extension<Arc<AppState>>,
    bytes: Bytes,
) -> Result<impl IntoResponse, HttpError> {
    let route =
        select_upload_route(bytes.len() as u64, &query.content_type).map_err(HttpError::from)?;

    if route == UploadRoute::Direct {
        return Err(HttpError::payload_too_large(
            "File exceeds the server upload limit; request a direct upload via /api/upload/init",
        ));
    }

    let object_name = generate_object_name(&query.content_type);
    tracing::debug!("uploading {} as {}", query.filename, object_name);

    let url = app_state
        .storage
        .upload_object(&object_name, &query.content_type, bytes.to_vec())
        .await
        .map_err(HttpError::from)?;

    Ok(Json(json!({
        "status": "success",
        "data": {
            "url": url,
            "path": object_name
        }
    })))
}

fn prepare_inline_image(data_url: &str) -> Result<UploadItem, UploadError> {
    let (content_type, bytes) = parse_data_url(data_url)?;

    let route = select_upload_route(bytes.len() as u64, &content_type)?;
    if route == UploadRoute::Direct {
        return Err(UploadError::TooLarge {
            size: bytes.len() as u64,
            max: DIRECT_UPLOAD_THRESHOLD_BYTES,
        });
    }

    Ok(UploadItem {
        path: generate_object_name(&content_type),
        content_type,
        bytes,
    })
}

/// Inline batch upload from the admin editor. Images upload
/// independently: each entry in the response is either `{url}` or
/// `{error}`, and one failure never sinks the rest.
pub async fn upload_batch(
    Extension(app_state): Extension<Arc<AppState>>,
    Json(body): Json<BatchUploadDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let mut outcomes: Vec<serde_json::Value> = vec![json!(null); body.images.len()];
    let mut pending: Vec<(usize, UploadItem)> = Vec::new();

    for (idx, data_url) in body.images.iter().enumerate() {
        match prepare_inline_image(data_url) {
            Ok(item) => pending.push((idx, item)),
            Err(e) => outcomes[idx] = json!({ "error": e.to_string() }),
        }
    }

    let (indices, items): (Vec<usize>, Vec<UploadItem>) = pending.into_iter().unzip();
    let results = app_state.storage.upload_many(items).await;

    for (idx, result) in indices.into_iter().zip(results) {
        outcomes[idx] = match result {
            Ok(url) => json!({ "url": url }),
            Err(e) => {
                tracing::warn!("batch image {} failed to upload: {}", idx, e);
                json!({ "error": "Upload failed" })
            }
        };
    }

    Ok(Json(json!({
        "status": "success",
        "data": {
            "results": outcomes
        }
    })))
}
