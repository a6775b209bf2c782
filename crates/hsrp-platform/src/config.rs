use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};

#[derive(Clone, Debug)]
pub struct ServiceConfig {
    pub database_url: String,
    pub redis_url: String,
    pub http_addr: String,
}

impl ServiceConfig {
    pub fn from_env(default_http_addr: &str) -> Result<Self> {
        let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL is required")?;
        let redis_url = std::env::var("REDIS_URL").context("REDIS_URL is required")?;
        let http_addr =
            std::env::var("HTTP_ADDR").unwrap_or_else(|_| default_http_addr.to_string());

        Ok(Self {
            database_url,
            redis_url,
            http_addr,
        })
    }

    pub fn worker_from_env() -> Result<Self> {
        let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL is required")?;
        let redis_url = std::env::var("REDIS_URL").context("REDIS_URL is required")?;

        Ok(Self {
            database_url,
            redis_url,
            http_addr: String::new(),
        })
    }
}

/// Where the gateway writes payment-proof images, and the public prefix
/// under which they are later retrievable.
#[derive(Clone, Debug)]
pub struct ProofStoreConfig {
    pub root: PathBuf,
    pub public_base_url: String,
}

impl ProofStoreConfig {
    pub fn from_env() -> Result<Self> {
        let root = std::env::var("PROOF_DIR").unwrap_or_else(|_| "var/proofs".to_string());
        let public_base_url =
            std::env::var("PROOF_BASE_URL").unwrap_or_else(|_| "/proofs".to_string());

        Ok(Self {
            root: PathBuf::from(root),
            public_base_url,
        })
    }
}

/// Endpoint and call budget for the payment verification oracle. The
/// timeout bounds the whole call; a timed-out call counts as no verdict.
#[derive(Clone, Debug)]
pub struct OracleConfig {
    pub endpoint: String,
    pub timeout: Duration,
}

impl OracleConfig {
    pub fn from_env() -> Result<Self> {
        let endpoint = std::env::var("ORACLE_URL").context("ORACLE_URL is required")?;
        let timeout_secs = match std::env::var("ORACLE_TIMEOUT_SECS") {
            Ok(raw) => raw
                .parse::<u64>()
                .context("ORACLE_TIMEOUT_SECS must be an integer number of seconds")?,
            Err(_) => 30,
        };

        Ok(Self {
            endpoint,
            timeout: Duration::from_secs(timeout_secs),
        })
    }
}
