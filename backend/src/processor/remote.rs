use super::{ProcessError, ProcessJob, ProcessedImage, Processor};
use reqwest::multipart::{Form, Part};
use reqwest::Client as HttpClient;
use shared::{FIELD_DEBUG, FIELD_FILE, FIELD_THRESHOLD};
use url::Url;

/// Relays jobs to the external suppression service over HTTP.
#[derive(Clone)]
pub struct RemoteProcessor {
    http_client: HttpClient,
    endpoint: Url,
}

impl RemoteProcessor {
    pub fn new(endpoint: Url) -> Self {
        Self {
            http_client: HttpClient::new(),
            endpoint,
        }
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    fn build_form(job: ProcessJob) -> Result<Form, ProcessError> {
        let mut part = Part::bytes(job.image).file_name(job.file_name);
        if let Some(content_type) = job.content_type.as_deref() {
            part = part.mime_str(content_type)?;
        }

        let mut form = Form::new()
            .text(FIELD_THRESHOLD, job.threshold.as_field().to_string())
            .part(FIELD_FILE, part);
        if job.debug {
            form = form.text(FIELD_DEBUG, "true");
        }
        Ok(form)
    }
}

impl Processor for RemoteProcessor {
    async fn process(&self, job: ProcessJob) -> Result<ProcessedImage, ProcessError> {
        let form = Self::build_form(job)?;

        let response = self
            .http_client
            .post(self.endpoint.clone())
            .multipart(form)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(ProcessError::Upstream { status, body });
        }

        let bytes = response.bytes().await?;
        ProcessedImage::from_bytes(bytes.to_vec())
    }
}
