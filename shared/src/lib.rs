//! Wire contract and client-side rules for the reflection remover.
//!
//! Everything here is plain Rust so the browser client and the front server
//! agree on field names, threshold handling and reply shapes.

pub mod endpoint;
pub mod form;
pub mod gallery;
pub mod render;
pub mod response;
pub mod slot;
pub mod threshold;

pub use endpoint::{Endpoint, ResponseKind, FIELD_DEBUG, FIELD_FILE, FIELD_THRESHOLD};
pub use form::{validate, FormInput, UploadFile, UploadRequest, ValidationError};
pub use render::{download_blob, Downloader, ObjectUrls, RenderError, ScopedObjectUrl};
pub use response::{EncodedImage, DOWNLOAD_FILENAME};
pub use slot::ResultSlot;
pub use threshold::{Threshold, ThresholdError, ThresholdPolicy, DEFAULT_THRESHOLD};
