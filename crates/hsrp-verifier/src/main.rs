mod oracle;

use anyhow::{Context, Result};
use futures_util::StreamExt;
use hsrp_core::{VerificationJob, VerificationWorker};
use hsrp_platform::{
    OracleConfig, PgBookingStore, RedisBus, ServiceConfig, VERIFICATION_REQUESTED_CHANNEL,
    VerificationRequestedEvent, connect_database,
};
use redis::Msg;
use tracing::{error, info};

use crate::oracle::HttpVerificationOracle;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "hsrp_verifier=info".to_string()),
        )
        .init();

    let config = ServiceConfig::worker_from_env()?;
    let oracle_config = OracleConfig::from_env()?;
    let pool = connect_database(&config.database_url).await?;
    let redis = RedisBus::connect(&config.redis_url)?;

    let worker = VerificationWorker::new(
        PgBookingStore::new(pool),
        HttpVerificationOracle::new(&oracle_config)?,
    );

    let mut pubsub = redis.subscribe(VERIFICATION_REQUESTED_CHANNEL).await?;
    let mut messages = pubsub.on_message();

    info!(
        "verifier subscribed to {} (oracle at {})",
        VERIFICATION_REQUESTED_CHANNEL, oracle_config.endpoint
    );

    loop {
        let msg = messages
            .next()
            .await
            .context("verification request stream ended unexpectedly")?;
        if let Err(err) = handle_message(&worker, msg).await {
            error!("failed to process verification request: {err:#}");
        }
    }
}

async fn handle_message(
    worker: &VerificationWorker<PgBookingStore, HttpVerificationOracle>,
    msg: Msg,
) -> Result<()> {
    let payload: String = msg.get_payload()?;
    let event: VerificationRequestedEvent = serde_json::from_str(&payload)?;

    let job = VerificationJob {
        booking_id: event.booking_id,
        order_id: event.order_id,
        proof_ref: event.proof_ref,
        expected_amount: event.expected_amount,
    };
    let status = worker.process(&job).await?;
    info!("order {} resolved to {}", job.order_id, status);
    Ok(())
}
