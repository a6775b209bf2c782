use std::fmt::Write as _;
use std::path::PathBuf;

use async_trait::async_trait;
use hsrp_core::{ProofImage, ProofSink, ProofSinkError};
use sha2::{Digest, Sha256};

use crate::config::ProofStoreConfig;

/// Filesystem proof sink. Filenames are content-addressed
/// (`<order>_<digest12>.<ext>`), so re-uploading the same proof is
/// idempotent and a changed proof gets a fresh reference.
#[derive(Clone)]
pub struct FsProofSink {
    root: PathBuf,
    public_base_url: String,
}

impl FsProofSink {
    pub fn new(config: &ProofStoreConfig) -> Self {
        Self {
            root: config.root.clone(),
            public_base_url: config.public_base_url.trim_end_matches('/').to_string(),
        }
    }
}

fn digest_prefix(bytes: &[u8]) -> String {
    let digest = Sha256::digest(bytes);
    let mut hex = String::with_capacity(12);
    for byte in digest.iter().take(6) {
        let _ = write!(hex, "{byte:02x}");
    }
    hex
}

#[async_trait]
impl ProofSink for FsProofSink {
    async fn store_proof(
        &self,
        order_id: &str,
        image: &ProofImage,
    ) -> Result<String, ProofSinkError> {
        let file_name = format!(
            "{order_id}_{}.{}",
            digest_prefix(&image.bytes),
            image.extension()
        );

        tokio::fs::create_dir_all(&self.root)
            .await
            .map_err(|err| ProofSinkError::Io(err.to_string()))?;
        tokio::fs::write(self.root.join(&file_name), &image.bytes)
            .await
            .map_err(|err| ProofSinkError::Io(err.to_string()))?;

        Ok(format!("{}/{file_name}", self.public_base_url))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn stored_proof_reference_is_stable_for_identical_content() {
        let dir = std::env::temp_dir().join("hsrp-sink-test");
        let sink = FsProofSink::new(&ProofStoreConfig {
            root: dir,
            public_base_url: "/proofs/".to_string(),
        });
        let image = ProofImage::from_data_uri("data:image/png;base64,aGVsbG8=").unwrap();

        let first = sink.store_proof("HSRP-1", &image).await.unwrap();
        let second = sink.store_proof("HSRP-1", &image).await.unwrap();

        assert_eq!(first, second);
        assert!(first.starts_with("/proofs/HSRP-1_"));
        assert!(first.ends_with(".png"));
    }
}
