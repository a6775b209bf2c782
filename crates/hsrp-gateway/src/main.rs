use std::net::SocketAddr;

use anyhow::Result as AnyResult;
use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
};
use chrono::Utc;
use hsrp_core::{
    Booking, BookingError, BookingQueries, BookingService, BookingStatus, VehicleCategory,
    pricing, validate,
};
use hsrp_platform::{
    AttachProofRequest, AttachProofResponse, ContactRequest, ContactResponse,
    CreateBookingRequest, CreateBookingResponse, ErrorBody, FsProofSink, ListResponse,
    PgBookingStore, PricingItem, ProofStoreConfig, RedisBus, ServiceConfig,
    UpdateStatusRequest, UpdateStatusResponse, VERIFICATION_REQUESTED_CHANNEL,
    VerificationRequestedEvent, connect_database,
};
use serde::Deserialize;
use sqlx::{PgPool, Row};
use tracing::{error, info};

#[derive(Clone)]
struct AppState {
    service: BookingService<PgBookingStore, FsProofSink>,
    queries: BookingQueries<PgBookingStore>,
    redis: RedisBus,
    pool: PgPool,
}

#[derive(Debug, Clone, Deserialize)]
struct TrackingQuery {
    mobile: String,
}

#[tokio::main]
async fn main() -> AnyResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "hsrp_gateway=info".to_string()),
        )
        .init();

    let config = ServiceConfig::from_env("0.0.0.0:8080")?;
    let pool = connect_database(&config.database_url).await?;
    let redis = RedisBus::connect(&config.redis_url)?;
    let proof_config = ProofStoreConfig::from_env()?;

    let store = PgBookingStore::new(pool.clone());
    let state = AppState {
        service: BookingService::new(store.clone(), FsProofSink::new(&proof_config)),
        queries: BookingQueries::new(store),
        redis,
        pool,
    };

    let router = Router::new()
        .route("/healthz", get(healthz))
        .route("/pricing", get(list_pricing))
        .route("/bookings", post(create_booking))
        .route(
            "/bookings/{booking_id}/payment-proof",
            post(attach_payment_proof),
        )
        .route("/orders/{order_id}", get(track_order))
        .route("/tracking", get(track_by_mobile))
        .route("/admin/bookings", get(list_bookings_for_admin))
        .route(
            "/admin/bookings/{booking_id}/status",
            post(update_booking_status),
        )
        .route("/contact", post(submit_contact))
        .with_state(state);

    let addr: SocketAddr = config.http_addr.parse()?;
    info!("gateway listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}

async fn healthz() -> &'static str {
    "ok"
}

async fn list_pricing() -> Json<ListResponse<PricingItem>> {
    let items = VehicleCategory::ALL
        .into_iter()
        .map(|category| PricingItem {
            category,
            label: category.label().to_string(),
            base_price: category.base_price(),
            processing_fee: pricing::PROCESSING_FEE,
            tax: pricing::tax_amount(category),
            total: pricing::quote_amount(category),
        })
        .collect();
    Json(ListResponse { items })
}

async fn create_booking(
    State(state): State<AppState>,
    Json(payload): Json<CreateBookingRequest>,
) -> Result<(StatusCode, Json<CreateBookingResponse>), (StatusCode, Json<ErrorBody>)> {
    let receipt = state
        .service
        .create_booking(payload.into_new_booking())
        .await
        .map_err(booking_error)?;

    Ok((
        StatusCode::CREATED,
        Json(CreateBookingResponse {
            booking_id: receipt.booking_id,
            order_id: receipt.order_id,
            amount: receipt.amount,
            status: receipt.status,
        }),
    ))
}

/// Uploads the proof, commits the `payment_pending_verification` update,
/// and only then hands the verification job to the worker via the bus.
/// The caller is answered as soon as the commit lands; the verdict is
/// discoverable later through tracking.
async fn attach_payment_proof(
    State(state): State<AppState>,
    Path(booking_id): Path<i64>,
    Json(payload): Json<AttachProofRequest>,
) -> Result<(StatusCode, Json<AttachProofResponse>), (StatusCode, Json<ErrorBody>)> {
    let job = state
        .service
        .attach_payment_proof(booking_id, &payload.order_id, &payload.proof_data_uri)
        .await
        .map_err(booking_error)?;

    let event = VerificationRequestedEvent {
        booking_id: job.booking_id,
        order_id: job.order_id.clone(),
        proof_ref: job.proof_ref.clone(),
        expected_amount: job.expected_amount,
        requested_at: Utc::now(),
    };
    if let Err(err) = state
        .redis
        .publish_json(VERIFICATION_REQUESTED_CHANNEL, &event)
        .await
    {
        error!(order_id = %job.order_id, "failed to dispatch verification request: {err:#}");
        return Err((
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorBody::new(
                "proof stored but verification could not be queued, please retry the upload",
            )),
        ));
    }

    Ok((
        StatusCode::ACCEPTED,
        Json(AttachProofResponse {
            booking_id: job.booking_id,
            order_id: job.order_id,
            status: BookingStatus::PaymentPendingVerification,
        }),
    ))
}

async fn track_order(
    State(state): State<AppState>,
    Path(order_id): Path<String>,
) -> Result<Json<Booking>, (StatusCode, Json<ErrorBody>)> {
    state
        .queries
        .track(&order_id)
        .await
        .map(Json)
        .map_err(booking_error)
}

async fn track_by_mobile(
    State(state): State<AppState>,
    Query(query): Query<TrackingQuery>,
) -> Result<Json<ListResponse<Booking>>, (StatusCode, Json<ErrorBody>)> {
    let items = state
        .queries
        .track_by_mobile(&query.mobile)
        .await
        .map_err(booking_error)?;
    Ok(Json(ListResponse { items }))
}

async fn list_bookings_for_admin(
    State(state): State<AppState>,
) -> Result<Json<ListResponse<Booking>>, (StatusCode, Json<ErrorBody>)> {
    let items = state
        .queries
        .list_for_admin()
        .await
        .map_err(booking_error)?;
    Ok(Json(ListResponse { items }))
}

async fn update_booking_status(
    State(state): State<AppState>,
    Path(booking_id): Path<i64>,
    Json(payload): Json<UpdateStatusRequest>,
) -> Result<Json<UpdateStatusResponse>, (StatusCode, Json<ErrorBody>)> {
    let updated_at = state
        .service
        .admin_set_status(booking_id, payload.new_status)
        .await
        .map_err(booking_error)?;

    Ok(Json(UpdateStatusResponse {
        booking_id,
        status: payload.new_status,
        updated_at,
    }))
}

async fn submit_contact(
    State(state): State<AppState>,
    Json(payload): Json<ContactRequest>,
) -> Result<(StatusCode, Json<ContactResponse>), (StatusCode, Json<ErrorBody>)> {
    let mut issues = Vec::new();
    if payload.first_name.trim().is_empty() {
        issues.push(validate::FieldIssue::new("first_name", "is required"));
    }
    if payload.last_name.trim().is_empty() {
        issues.push(validate::FieldIssue::new("last_name", "is required"));
    }
    if !validate::is_valid_email(&payload.email) {
        issues.push(validate::FieldIssue::new("email", "must be a valid email"));
    }
    if payload.message.trim().len() < 5 {
        issues.push(validate::FieldIssue::new(
            "message",
            "must be at least 5 characters",
        ));
    }
    if !issues.is_empty() {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorBody::with_issues("validation failed", issues)),
        ));
    }

    let now = Utc::now();
    let row = sqlx::query(
        r#"
        INSERT INTO contacts (first_name, last_name, email, message, created_at)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING id
        "#,
    )
    .bind(payload.first_name.trim())
    .bind(payload.last_name.trim())
    .bind(payload.email.trim())
    .bind(payload.message.trim())
    .bind(now)
    .fetch_one(&state.pool)
    .await
    .map_err(internal_error)?;

    let contact_id: i64 = row.try_get("id").map_err(internal_error)?;
    Ok((
        StatusCode::CREATED,
        Json(ContactResponse {
            contact_id,
            created_at: now,
        }),
    ))
}

fn booking_error(err: BookingError) -> (StatusCode, Json<ErrorBody>) {
    match err {
        BookingError::Validation(issues) => (
            StatusCode::BAD_REQUEST,
            Json(ErrorBody::with_issues("validation failed", issues)),
        ),
        BookingError::Conflict => (
            StatusCode::CONFLICT,
            Json(ErrorBody::new(
                "could not allocate a unique order id, please retry",
            )),
        ),
        BookingError::NotFound => (
            StatusCode::NOT_FOUND,
            Json(ErrorBody::new("booking not found")),
        ),
        BookingError::Persistence(detail) => {
            error!("store failure: {detail}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorBody::new("failed to persist booking")),
            )
        }
        BookingError::Upload(detail) => (
            StatusCode::BAD_GATEWAY,
            Json(ErrorBody::new(&format!(
                "payment proof upload failed: {detail}"
            ))),
        ),
        BookingError::Oracle(detail) => {
            error!("unexpected oracle failure on the request path: {detail}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorBody::new("verification could not be started")),
            )
        }
    }
}

fn internal_error<E: std::fmt::Display>(err: E) -> (StatusCode, Json<ErrorBody>) {
    error!("request failed: {err}");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorBody::new("internal error")),
    )
}
