use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use chrono::Utc;
use rand::{distr::Alphanumeric, Rng};
use serde::Serialize;
use thiserror::Error;

use crate::error::HttpError;

/// Hard ceiling on a single image, checked before any network call.
pub const MAX_UPLOAD_BYTES: u64 = 50 * 1024 * 1024;

/// Request bodies above this size never reach the app server: the hosting
/// platform caps request bodies at 4.5 MiB, so larger files are handed to
/// the browser for direct-to-storage upload.
pub const DIRECT_UPLOAD_THRESHOLD_BYTES: u64 = 4_718_592;

const ALLOWED_IMAGE_TYPES: [&str; 5] = [
    "image/jpeg",
    "image/jpg",
    "image/png",
    "image/webp",
    "image/gif",
];

#[derive(Debug, Error, PartialEq)]
pub enum UploadError {
    #[error("Unsupported image type: {0}")]
    UnsupportedType(String),

    #[error("File of {size} bytes exceeds the {max} byte upload limit")]
    TooLarge { size: u64, max: u64 },

    #[error("Invalid image payload: {0}")]
    InvalidPayload(String),
}

impl From<UploadError> for HttpError {
    fn from(error: UploadError) -> Self {
        match &error {
            UploadError::UnsupportedType(_) | UploadError::InvalidPayload(_) => {
                HttpError::bad_request(error.to_string())
            }
            UploadError::TooLarge { .. } => HttpError::payload_too_large(error.to_string()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum UploadRoute {
    /// Bytes travel through the API and are written with the service key
    Server,
    /// Browser uploads straight to storage using a signed path
    Direct,
}

/// Decide how a file of the declared size and MIME type gets into the
/// bucket. Only the declared type is checked; the payload itself is not
/// sniffed, so a mislabelled file passes this gate.
pub fn select_upload_route(size: u64, content_type: &str) -> Result<UploadRoute, UploadError> {
    let normalized = content_type.trim().to_lowercase();
    if !ALLOWED_IMAGE_TYPES.contains(&normalized.as_str()) {
        return Err(UploadError::UnsupportedType(content_type.to_string()));
    }

    if size > MAX_UPLOAD_BYTES {
        return Err(UploadError::TooLarge {
            size,
            max: MAX_UPLOAD_BYTES,
        });
    }

    if size > DIRECT_UPLOAD_THRESHOLD_BYTES {
        Ok(UploadRoute::Direct)
    } else {
        Ok(UploadRoute::Server)
    }
}

/// Collision-free object name: `property-{unix_millis}-{random}.{ext}`.
pub fn generate_object_name(content_type: &str) -> String {
    let ext = match content_type.trim().to_lowercase().as_str() {
        "image/png" => "png",
        "image/webp" => "webp",
        "image/gif" => "gif",
        _ => "jpg",
    };

    let suffix: String = rand::rng()
        .sample_iter(Alphanumeric)
        .take(8)
        .map(char::from)
        .collect::<String>()
        .to_lowercase();

    format!("property-{}-{}.{}", Utc::now().timestamp_millis(), suffix, ext)
}

/// Split a `data:image/png;base64,...` URL into its MIME type and decoded
/// bytes. Used by the batch endpoint, which receives inline images.
pub fn parse_data_url(data_url: &str) -> Result<(String, Vec<u8>), UploadError> {
    let (header, payload) = data_url
        .split_once(',')
        .ok_or_else(|| UploadError::InvalidPayload("missing data URL header".to_string()))?;

    let mime = header
        .strip_prefix("data:")
        .and_then(|h| h.split(';').next())
        .filter(|m| !m.is_empty())
        .ok_or_else(|| UploadError::InvalidPayload("missing media type".to_string()))?
        .to_string();

    let bytes = BASE64
        .decode(payload.trim())
        .map_err(|e| UploadError::InvalidPayload(format!("base64 decode failed: {}", e)))?;

    Ok((mime, bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    const MB: u64 = 1024 * 1024;

    #[test]
    fn test_large_jpeg_goes_direct() {
        assert_eq!(
            select_upload_route(6 * MB, "image/jpeg"),
            Ok(UploadRoute::Direct)
        );
    }

    #[test]
    fn test_small_png_goes_through_server() {
        assert_eq!(
            select_upload_route(2 * MB, "image/png"),
            Ok(UploadRoute::Server)
        );
    }

    #[test]
    fn test_oversize_file_rejected_before_any_network_call() {
        assert_eq!(
            select_upload_route(60 * MB, "image/jpeg"),
            Err(UploadError::TooLarge {
                size: 60 * MB,
                max: MAX_UPLOAD_BYTES,
            })
        );
    }

    #[test]
    fn test_threshold_boundary() {
        assert_eq!(
            select_upload_route(DIRECT_UPLOAD_THRESHOLD_BYTES, "image/webp"),
            Ok(UploadRoute::Server)
        );
        assert_eq!(
            select_upload_route(DIRECT_UPLOAD_THRESHOLD_BYTES + 1, "image/webp"),
            Ok(UploadRoute::Direct)
        );
        assert_eq!(
            select_upload_route(MAX_UPLOAD_BYTES, "image/gif"),
            Ok(UploadRoute::Direct)
        );
    }

    #[test]
    fn test_non_image_type_rejected() {
        assert!(matches!(
            select_upload_route(MB, "application/pdf"),
            Err(UploadError::UnsupportedType(_))
        ));
        assert!(matches!(
            select_upload_route(MB, "video/mp4"),
            Err(UploadError::UnsupportedType(_))
        ));
    }

    #[test]
    fn test_spoofed_mime_passes_type_check_alone() {
        // The selector trusts the declared type; a renamed .exe claiming
        // image/png is let through. Content sniffing is absent.
        assert_eq!(select_upload_route(MB, "image/png"), Ok(UploadRoute::Server));
    }

    #[test]
    fn test_object_name_shape() {
        let name = generate_object_name("image/png");
        let re = regex::Regex::new(r"^property-\d+-[a-z0-9]{8}\.png$").unwrap();
        assert!(re.is_match(&name), "unexpected object name: {}", name);

        assert!(generate_object_name("image/jpeg").ends_with(".jpg"));
        assert!(generate_object_name("IMAGE/WEBP").ends_with(".webp"));
    }

    #[test]
    fn test_object_names_do_not_collide() {
        let a = generate_object_name("image/jpeg");
        let b = generate_object_name("image/jpeg");
        assert_ne!(a, b);
    }

    #[test]
    fn test_parse_data_url() {
        let (mime, bytes) = parse_data_url("data:image/png;base64,aGVsbG8=").unwrap();
        assert_eq!(mime, "image/png");
        assert_eq!(bytes, b"hello");
    }

    #[test]
    fn test_parse_data_url_rejects_garbage() {
        assert!(parse_data_url("no comma here").is_err());
        assert!(parse_data_url("data:;base64,aGVsbG8=").is_err());
        assert!(parse_data_url("data:image/png;base64,!!!").is_err());
    }
}
