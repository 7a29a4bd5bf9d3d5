use crate::endpoint::{Endpoint, FIELD_THRESHOLD};
use crate::threshold::{Threshold, ThresholdError};

/// Anything that can be attached as the `file` part of an upload.
pub trait UploadFile {
    fn file_name(&self) -> String;
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("Please fill in the form!")]
    MissingField,
    #[error("Please enter a valid threshold value between 0 and 1")]
    InvalidThreshold(#[source] ThresholdError),
}

impl From<ThresholdError> for ValidationError {
    fn from(err: ThresholdError) -> Self {
        match err {
            ThresholdError::Missing => ValidationError::MissingField,
            other => ValidationError::InvalidThreshold(other),
        }
    }
}

/// Raw state of the upload form at submit time.
#[derive(Debug, Clone)]
pub struct FormInput<F> {
    pub h: Option<String>,
    pub file: Option<F>,
}

/// A submission that passed validation and may be sent.
#[derive(Debug, Clone)]
pub struct UploadRequest<F> {
    pub endpoint: Endpoint,
    pub threshold: Threshold,
    pub file: F,
}

impl<F> UploadRequest<F> {
    /// Text parts of the multipart body, in send order.
    pub fn text_fields(&self) -> Vec<(&'static str, String)> {
        vec![(FIELD_THRESHOLD, self.threshold.as_field().to_string())]
    }
}

/// Gates a submission. On `Err` nothing may be sent.
pub fn validate<F: UploadFile + Clone>(
    input: &FormInput<F>,
    endpoint: Endpoint,
) -> Result<UploadRequest<F>, ValidationError> {
    let file = input
        .file
        .as_ref()
        .filter(|file| !file.file_name().is_empty())
        .ok_or(ValidationError::MissingField)?;

    let threshold = Threshold::resolve(input.h.as_deref(), endpoint.threshold_policy())?;

    Ok(UploadRequest {
        endpoint,
        threshold,
        file: file.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct FakeFile(&'static str);

    impl UploadFile for FakeFile {
        fn file_name(&self) -> String {
            self.0.to_string()
        }
    }

    fn input(h: Option<&str>, file: Option<&'static str>) -> FormInput<FakeFile> {
        FormInput {
            h: h.map(str::to_string),
            file: file.map(FakeFile),
        }
    }

    #[test]
    fn missing_file_is_rejected_for_both_endpoints() {
        for endpoint in [Endpoint::Upload, Endpoint::ProcessImage] {
            let err = validate(&input(Some("0.5"), None), endpoint).unwrap_err();
            assert_eq!(err, ValidationError::MissingField);
            assert_eq!(err.to_string(), "Please fill in the form!");
        }
    }

    #[test]
    fn nameless_file_counts_as_missing() {
        let err = validate(&input(Some("0.5"), Some("")), Endpoint::Upload).unwrap_err();
        assert_eq!(err, ValidationError::MissingField);
    }

    #[test]
    fn json_endpoint_rejects_blank_threshold() {
        let err = validate(&input(Some(""), Some("a.jpg")), Endpoint::Upload).unwrap_err();
        assert_eq!(err, ValidationError::MissingField);
        let err = validate(&input(None, Some("a.jpg")), Endpoint::Upload).unwrap_err();
        assert_eq!(err, ValidationError::MissingField);
    }

    #[test]
    fn out_of_range_or_non_numeric_threshold_is_rejected() {
        for h in ["1.5", "-0.01", "abc", "0.5x"] {
            for endpoint in [Endpoint::Upload, Endpoint::ProcessImage] {
                let err = validate(&input(Some(h), Some("a.jpg")), endpoint).unwrap_err();
                assert!(matches!(err, ValidationError::InvalidThreshold(_)), "{h}");
                assert_eq!(
                    err.to_string(),
                    "Please enter a valid threshold value between 0 and 1"
                );
            }
        }
    }

    #[test]
    fn blob_endpoint_substitutes_default_threshold() {
        let request = validate(&input(Some("  "), Some("a.jpg")), Endpoint::ProcessImage).unwrap();
        assert_eq!(request.text_fields(), vec![("h", "0.03".to_string())]);
    }

    #[test]
    fn explicit_threshold_is_sent_verbatim() {
        let request = validate(&input(Some("0.03"), Some("a.jpg")), Endpoint::Upload).unwrap();
        assert_eq!(request.text_fields(), vec![("h", "0.03".to_string())]);
        assert_eq!(request.file, FakeFile("a.jpg"));
        assert_eq!(request.endpoint, Endpoint::Upload);
    }
}
