pub mod remote;

use image::ImageFormat;
use shared::Threshold;
use std::future::Future;

pub use remote::RemoteProcessor;

#[derive(Debug, thiserror::Error)]
pub enum ProcessError {
    #[error("processor request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("processor returned {status}: {body}")]
    Upstream { status: u16, body: String },
    #[error("processor returned a body that is not an image")]
    NotAnImage,
}

/// One accepted upload, ready to hand to the processing service.
#[derive(Debug, Clone)]
pub struct ProcessJob {
    pub file_name: String,
    pub content_type: Option<String>,
    pub image: Vec<u8>,
    pub threshold: Threshold,
    pub debug: bool,
}

#[derive(Debug, Clone)]
pub struct ProcessedImage {
    pub bytes: Vec<u8>,
    pub format: ImageFormat,
}

impl ProcessedImage {
    /// Sniffs the format of a processor reply.
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self, ProcessError> {
        let format = image::guess_format(&bytes).map_err(|_| ProcessError::NotAnImage)?;
        Ok(Self { bytes, format })
    }

    pub fn mime_type(&self) -> &'static str {
        self.format.to_mime_type()
    }
}

/// Runs reflection suppression on one image.
pub trait Processor {
    fn process(&self, job: ProcessJob) -> impl Future<Output = Result<ProcessedImage, ProcessError>>;
}
