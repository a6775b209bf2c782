use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use thiserror::Error;

use crate::error::ProofSinkError;

/// A decoded payment-proof image, as submitted by the booking client in
/// Data-URI form (`data:<mime>;base64,<payload>`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProofImage {
    pub mime: String,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ProofImageError {
    #[error("payment proof must be a data URI")]
    NotADataUri,
    #[error("payment proof data URI must be base64 encoded")]
    NotBase64,
    #[error("payment proof payload is not valid base64: {0}")]
    BadPayload(String),
    #[error("payment proof is empty")]
    Empty,
}

impl ProofImage {
    pub fn from_data_uri(uri: &str) -> Result<Self, ProofImageError> {
        let rest = uri
            .strip_prefix("data:")
            .ok_or(ProofImageError::NotADataUri)?;
        let (header, payload) = rest.split_once(',').ok_or(ProofImageError::NotADataUri)?;
        let mime = header
            .strip_suffix(";base64")
            .ok_or(ProofImageError::NotBase64)?;
        if mime.is_empty() {
            return Err(ProofImageError::NotADataUri);
        }

        let bytes = BASE64
            .decode(payload.trim())
            .map_err(|err| ProofImageError::BadPayload(err.to_string()))?;
        if bytes.is_empty() {
            return Err(ProofImageError::Empty);
        }

        Ok(Self {
            mime: mime.to_string(),
            bytes,
        })
    }

    pub fn extension(&self) -> &'static str {
        match self.mime.as_str() {
            "image/png" => "png",
            "image/jpeg" => "jpg",
            "image/webp" => "webp",
            _ => "bin",
        }
    }
}

/// Stores proof images and returns a stable retrievable reference.
/// Independent of the booking store; failures here move the booking to
/// `upload_failed` rather than leaving it ambiguous.
#[async_trait]
pub trait ProofSink: Send + Sync {
    async fn store_proof(
        &self,
        order_id: &str,
        image: &ProofImage,
    ) -> Result<String, ProofSinkError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_a_png_data_uri() {
        let image = ProofImage::from_data_uri("data:image/png;base64,aGVsbG8=").unwrap();
        assert_eq!(image.mime, "image/png");
        assert_eq!(image.bytes, b"hello");
        assert_eq!(image.extension(), "png");
    }

    #[test]
    fn rejects_non_data_uris() {
        assert_eq!(
            ProofImage::from_data_uri("https://example.com/proof.png"),
            Err(ProofImageError::NotADataUri)
        );
    }

    #[test]
    fn rejects_unencoded_payloads() {
        assert_eq!(
            ProofImage::from_data_uri("data:image/png,rawbytes"),
            Err(ProofImageError::NotBase64)
        );
    }

    #[test]
    fn rejects_corrupt_base64() {
        assert!(matches!(
            ProofImage::from_data_uri("data:image/png;base64,%%%"),
            Err(ProofImageError::BadPayload(_))
        ));
    }

    #[test]
    fn rejects_empty_payloads() {
        assert_eq!(
            ProofImage::from_data_uri("data:image/png;base64,"),
            Err(ProofImageError::Empty)
        );
    }

    #[test]
    fn unknown_mime_falls_back_to_bin() {
        let image = ProofImage::from_data_uri("data:application/pdf;base64,aGVsbG8=").unwrap();
        assert_eq!(image.extension(), "bin");
    }
}
