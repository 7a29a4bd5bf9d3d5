use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};

use crate::threshold::ThresholdPolicy;

pub const FIELD_THRESHOLD: &str = "h";
pub const FIELD_FILE: &str = "file";
pub const FIELD_DEBUG: &str = "debug";

/// How a successful reply body is shaped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseKind {
    /// `{ "image": "<base64>" }`
    EncodedJson,
    /// Raw image bytes.
    RawBlob,
}

/// The two upload contracts. Each one fixes its path, its threshold policy
/// and its reply shape; they are not interchangeable.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[serde(rename_all = "snake_case")]
pub enum Endpoint {
    #[default]
    #[strum(serialize = "upload")]
    Upload,
    #[strum(serialize = "process_image")]
    ProcessImage,
}

impl Endpoint {
    pub fn path(self) -> &'static str {
        match self {
            Endpoint::Upload => "/upload",
            Endpoint::ProcessImage => "/process_image",
        }
    }

    pub fn threshold_policy(self) -> ThresholdPolicy {
        match self {
            Endpoint::Upload => ThresholdPolicy::Reject,
            Endpoint::ProcessImage => ThresholdPolicy::UseDefault,
        }
    }

    pub fn response_kind(self) -> ResponseKind {
        match self {
            Endpoint::Upload => ResponseKind::EncodedJson,
            Endpoint::ProcessImage => ResponseKind::RawBlob,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Endpoint::Upload => "Show inline (JSON)",
            Endpoint::ProcessImage => "Download file (blob)",
        }
    }

    /// Joins the endpoint path onto an API base such as `http://localhost:8000/`.
    pub fn url(self, base: &str) -> String {
        format!("{}{}", base.trim_end_matches('/'), self.path())
    }
}
