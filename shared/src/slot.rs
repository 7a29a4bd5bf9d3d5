use crate::endpoint::Endpoint;
use crate::form::{validate, FormInput, UploadFile, UploadRequest, ValidationError};

/// Result area of the upload page: the shown image, the last error and the
/// number of requests still waiting for a reply.
///
/// Generic over the image so the browser can store an owned object URL here.
#[derive(Debug)]
pub struct ResultSlot<I> {
    image: Option<I>,
    error: Option<String>,
    in_flight: usize,
}

impl<I> Default for ResultSlot<I> {
    fn default() -> Self {
        Self {
            image: None,
            error: None,
            in_flight: 0,
        }
    }
}

impl<I> ResultSlot<I> {
    pub fn image(&self) -> Option<&I> {
        self.image.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    /// Validates the form. Only an accepted submission counts as in flight;
    /// a rejected one records the error and must not be sent.
    pub fn submit<F: UploadFile + Clone>(
        &mut self,
        input: &FormInput<F>,
        endpoint: Endpoint,
    ) -> Result<UploadRequest<F>, ValidationError> {
        match validate(input, endpoint) {
            Ok(request) => {
                self.error = None;
                self.in_flight += 1;
                Ok(request)
            }
            Err(e) => {
                self.error = Some(e.to_string());
                Err(e)
            }
        }
    }

    pub fn succeed(&mut self, image: I) {
        self.in_flight = self.in_flight.saturating_sub(1);
        self.error = None;
        self.image = Some(image);
    }

    /// A reply handled without touching the image, e.g. a file download.
    pub fn complete(&mut self) {
        self.in_flight = self.in_flight.saturating_sub(1);
    }

    /// Failed request: the shown image is left as it was.
    pub fn fail(&mut self, message: String) {
        self.in_flight = self.in_flight.saturating_sub(1);
        self.error = Some(message);
    }

    pub fn set_error(&mut self, error: Option<String>) {
        self.error = error;
    }
}
