use actix_web::http::StatusCode;
use actix_web::ResponseError;

use crate::processor::ProcessError;

/// Everything an upload route can fail with. The `Display` text is the
/// plain-text response body.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("No file part in the request")]
    MissingFile,
    #[error("No file selected for uploading")]
    EmptyFileName,
    #[error("Invalid value for parameter 'h'")]
    InvalidThreshold,
    #[error("Uploaded file is not a supported image")]
    NotAnImage,
    #[error("Upload exceeds the {limit} byte limit")]
    TooLarge { limit: usize },
    #[error("Malformed multipart body: {0}")]
    Multipart(#[from] actix_multipart::MultipartError),
    #[error("Processing failed: {0}")]
    Processing(#[from] ProcessError),
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::MissingFile
            | ApiError::EmptyFileName
            | ApiError::InvalidThreshold
            | ApiError::NotAnImage
            | ApiError::Multipart(_) => StatusCode::BAD_REQUEST,
            ApiError::TooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            ApiError::Processing(_) => StatusCode::BAD_GATEWAY,
        }
    }
}
