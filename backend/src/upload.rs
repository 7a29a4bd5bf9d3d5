use actix_multipart::Multipart;
use futures::{StreamExt, TryStreamExt};
use shared::{Threshold, FIELD_DEBUG, FIELD_FILE, FIELD_THRESHOLD};

use crate::error::ApiError;
use crate::processor::ProcessJob;

/// Largest accepted multipart body, shared with every worker.
#[derive(Debug, Clone, Copy)]
pub struct UploadLimit {
    pub max_bytes: usize,
}

#[derive(Debug)]
pub struct FilePart {
    pub name: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

/// Raw fields of an upload before the wire contract is checked.
#[derive(Debug, Default)]
pub struct UploadForm {
    pub file: Option<FilePart>,
    pub h: Option<String>,
    pub debug: bool,
}

pub async fn read_upload_form(mut payload: Multipart, limit: UploadLimit) -> Result<UploadForm, ApiError> {
    let mut form = UploadForm::default();
    let mut total = 0usize;

    while let Some(mut field) = payload.try_next().await? {
        let name = field.name().unwrap_or_default().to_string();
        let file_name = field
            .content_disposition()
            .and_then(|cd| cd.get_filename())
            .map(str::to_string);
        let content_type = field.content_type().map(|mime| mime.to_string());

        let mut data = Vec::new();
        while let Some(chunk) = field.next().await {
            let chunk = chunk?;
            total += chunk.len();
            if total > limit.max_bytes {
                return Err(ApiError::TooLarge {
                    limit: limit.max_bytes,
                });
            }
            data.extend_from_slice(&chunk);
        }

        match name.as_str() {
            FIELD_FILE => {
                // A `file` field sent without a filename is a text field, not a file part.
                if let Some(file_name) = file_name {
                    form.file = Some(FilePart {
                        name: file_name,
                        content_type,
                        bytes: data,
                    });
                }
            }
            FIELD_THRESHOLD => form.h = Some(String::from_utf8_lossy(&data).into_owned()),
            FIELD_DEBUG => {
                form.debug = String::from_utf8_lossy(&data).trim().eq_ignore_ascii_case("true")
            }
            other => log::debug!("Ignoring unexpected form field {:?}", other),
        }
    }

    Ok(form)
}

impl UploadForm {
    /// Applies the wire contract: file present and named, `h` defaulting to
    /// 0.03 when absent, payload recognisable as an image.
    pub fn into_job(self) -> Result<ProcessJob, ApiError> {
        let file = self.file.ok_or(ApiError::MissingFile)?;
        if file.name.is_empty() {
            return Err(ApiError::EmptyFileName);
        }

        let threshold = match self.h {
            None => Threshold::default(),
            Some(raw) => Threshold::parse(&raw).map_err(|_| ApiError::InvalidThreshold)?,
        };

        image::guess_format(&file.bytes).map_err(|_| ApiError::NotAnImage)?;

        Ok(ProcessJob {
            file_name: file.name,
            content_type: file.content_type,
            image: file.bytes,
            threshold,
            debug: self.debug,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PNG: &[u8] = b"\x89PNG\r\n\x1a\n\0\0\0\rIHDR";

    fn form(file: Option<(&str, &[u8])>, h: Option<&str>) -> UploadForm {
        UploadForm {
            file: file.map(|(name, bytes)| FilePart {
                name: name.to_string(),
                content_type: Some("image/png".into()),
                bytes: bytes.to_vec(),
            }),
            h: h.map(str::to_string),
            debug: false,
        }
    }

    #[test]
    fn missing_threshold_defaults() {
        let job = form(Some(("a.png", PNG)), None).into_job().unwrap();
        assert_eq!(job.threshold.as_field(), "0.03");
        assert_eq!(job.file_name, "a.png");
    }

    #[test]
    fn file_checks_come_first() {
        assert!(matches!(form(None, Some("x")).into_job(), Err(ApiError::MissingFile)));
        assert!(matches!(
            form(Some(("", PNG)), Some("x")).into_job(),
            Err(ApiError::EmptyFileName)
        ));
    }

    #[test]
    fn bad_thresholds_are_rejected() {
        for h in ["", "abc", "1.2", "-1"] {
            assert!(matches!(
                form(Some(("a.png", PNG)), Some(h)).into_job(),
                Err(ApiError::InvalidThreshold)
            ));
        }
    }

    #[test]
    fn non_images_are_rejected() {
        assert!(matches!(
            form(Some(("notes.txt", b"hello world")), Some("0.1")).into_job(),
            Err(ApiError::NotAnImage)
        ));
    }
}
