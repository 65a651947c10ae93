use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UploadInitDto {
    #[validate(length(min = 1, max = 255, message = "Filename is required"))]
    pub filename: String,

    // Declared size in bytes; the server path re-checks the actual body
    pub size: u64,

    #[validate(length(min = 1, max = 100, message = "Content type is required"))]
    pub content_type: String,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerUploadQueryDto {
    pub filename: String,
    pub content_type: String,
}

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct BatchUploadDto {
    // base64 data URLs, one per image
    #[validate(length(min = 1, max = 24, message = "Between 1 and 24 images per batch"))]
    pub images: Vec<String>,
}
