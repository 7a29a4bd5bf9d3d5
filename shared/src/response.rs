use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Serialize};

/// Filename offered when a blob reply is downloaded.
pub const DOWNLOAD_FILENAME: &str = "processed_image.png";

pub const INLINE_IMAGE_MIME: &str = "image/jpeg";

/// Reply body of the JSON endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EncodedImage {
    pub image: String,
}

impl EncodedImage {
    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self {
            image: STANDARD.encode(bytes),
        }
    }

    /// Inline image source for the encoded payload.
    pub fn data_uri(&self) -> String {
        format!("data:{};base64, {}", INLINE_IMAGE_MIME, self.image)
    }

    pub fn decode(&self) -> Result<Vec<u8>, base64::DecodeError> {
        STANDARD.decode(self.image.trim())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_uri_matches_rendered_source() {
        let encoded = EncodedImage {
            image: "aGVsbG8=".into(),
        };
        assert_eq!(encoded.data_uri(), "data:image/jpeg;base64, aGVsbG8=");
    }

    #[test]
    fn parses_reply_body() {
        let parsed: EncodedImage = serde_json::from_str(r#"{ "image": "AAEC" }"#).unwrap();
        assert_eq!(parsed.decode().unwrap(), vec![0, 1, 2]);
    }

    #[test]
    fn reply_without_image_is_malformed() {
        assert!(serde_json::from_str::<EncodedImage>(r#"{ "img": "AAEC" }"#).is_err());
    }

    #[test]
    fn encodes_processed_bytes() {
        let encoded = EncodedImage::from_bytes(&[0x89, b'P', b'N', b'G']);
        assert_eq!(encoded.image, "iVBORw==");
    }
}
