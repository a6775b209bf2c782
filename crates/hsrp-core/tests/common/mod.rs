use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use hsrp_core::{
    Booking, BookingDraft, BookingStatus, BookingStore, NewBooking, OracleError, ProofImage,
    ProofSink, ProofSinkError, StatusUpdate, StoreError, VehicleCategory, VerificationJob,
    VerificationOracle, Verdict,
};

pub fn valid_booking(category: VehicleCategory) -> NewBooking {
    NewBooking {
        owner_full_name: "Asha Verma".to_string(),
        owner_mobile: "9876543210".to_string(),
        owner_email: "asha@example.com".to_string(),
        owner_aadhaar: "123456789012".to_string(),
        owner_address: "12 MG Road".to_string(),
        owner_state: "Karnataka".to_string(),
        owner_pincode: "560001".to_string(),
        vehicle_registration_number: "KA01AB1234".to_string(),
        engine_number: "EN123456".to_string(),
        chassis_number: "CH123456".to_string(),
        vehicle_make: "Maruti".to_string(),
        vehicle_model: "Swift".to_string(),
        manufacturing_year: "2021".to_string(),
        category,
    }
}

pub const PNG_PROOF: &str = "data:image/png;base64,aGVsbG8=";

#[derive(Default)]
struct StoreInner {
    next_id: i64,
    rows: Vec<Booking>,
}

/// Booking store over a Vec, mirroring the Postgres implementation's
/// contract: unique order ids, partial status updates, newest-first reads.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    inner: Arc<Mutex<StoreInner>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: i64) -> Option<Booking> {
        let inner = self.inner.lock().unwrap();
        inner.rows.iter().find(|b| b.id == id).cloned()
    }
}

fn newest_first(rows: &mut [Booking]) {
    rows.sort_by(|a, b| {
        b.created_at
            .cmp(&a.created_at)
            .then_with(|| b.id.cmp(&a.id))
    });
}

#[async_trait]
impl BookingStore for InMemoryStore {
    async fn insert(&self, draft: &BookingDraft) -> Result<Booking, StoreError> {
        let mut inner = self.inner.lock().unwrap();
        if inner.rows.iter().any(|b| b.order_id == draft.order_id) {
            return Err(StoreError::Conflict);
        }
        inner.next_id += 1;
        let booking = Booking::from_draft(inner.next_id, draft);
        inner.rows.push(booking.clone());
        Ok(booking)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Booking>, StoreError> {
        Ok(self.get(id))
    }

    async fn find_by_order_id(&self, order_id: &str) -> Result<Option<Booking>, StoreError> {
        let inner = self.inner.lock().unwrap();
        Ok(inner.rows.iter().find(|b| b.order_id == order_id).cloned())
    }

    async fn find_by_mobile(&self, mobile: &str) -> Result<Vec<Booking>, StoreError> {
        let inner = self.inner.lock().unwrap();
        let mut rows: Vec<Booking> = inner
            .rows
            .iter()
            .filter(|b| b.owner_mobile == mobile)
            .cloned()
            .collect();
        newest_first(&mut rows);
        Ok(rows)
    }

    async fn update_status(&self, id: i64, update: StatusUpdate) -> Result<(), StoreError> {
        let mut inner = self.inner.lock().unwrap();
        let row = inner
            .rows
            .iter_mut()
            .find(|b| b.id == id)
            .ok_or(StoreError::NotFound)?;
        row.status = update.status;
        if let Some(reason) = update.verification_reason {
            row.verification_reason = Some(reason);
        }
        if let Some(proof) = update.payment_proof {
            row.payment_proof = Some(proof);
        }
        row.updated_at = update.updated_at;
        Ok(())
    }

    async fn list_all(&self) -> Result<Vec<Booking>, StoreError> {
        let inner = self.inner.lock().unwrap();
        let mut rows = inner.rows.clone();
        newest_first(&mut rows);
        Ok(rows)
    }
}

/// Wrapper that reports an order-id conflict for the first N inserts, then
/// delegates.
#[derive(Clone)]
pub struct ConflictingStore {
    pub inner: InMemoryStore,
    remaining_conflicts: Arc<AtomicUsize>,
}

impl ConflictingStore {
    pub fn new(inner: InMemoryStore, conflicts: usize) -> Self {
        Self {
            inner,
            remaining_conflicts: Arc::new(AtomicUsize::new(conflicts)),
        }
    }
}

#[async_trait]
impl BookingStore for ConflictingStore {
    async fn insert(&self, draft: &BookingDraft) -> Result<Booking, StoreError> {
        let remaining = self.remaining_conflicts.load(Ordering::SeqCst);
        if remaining > 0 {
            self.remaining_conflicts.store(remaining - 1, Ordering::SeqCst);
            return Err(StoreError::Conflict);
        }
        self.inner.insert(draft).await
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Booking>, StoreError> {
        self.inner.find_by_id(id).await
    }

    async fn find_by_order_id(&self, order_id: &str) -> Result<Option<Booking>, StoreError> {
        self.inner.find_by_order_id(order_id).await
    }

    async fn find_by_mobile(&self, mobile: &str) -> Result<Vec<Booking>, StoreError> {
        self.inner.find_by_mobile(mobile).await
    }

    async fn update_status(&self, id: i64, update: StatusUpdate) -> Result<(), StoreError> {
        self.inner.update_status(id, update).await
    }

    async fn list_all(&self) -> Result<Vec<Booking>, StoreError> {
        self.inner.list_all().await
    }
}

/// Proof sink that records uploads, or fails every call when told to.
#[derive(Clone, Default)]
pub struct MemoryProofSink {
    pub fail: bool,
    uploads: Arc<Mutex<Vec<String>>>,
}

impl MemoryProofSink {
    pub fn working() -> Self {
        Self::default()
    }

    pub fn broken() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn upload_count(&self) -> usize {
        self.uploads.lock().unwrap().len()
    }
}

#[async_trait]
impl ProofSink for MemoryProofSink {
    async fn store_proof(
        &self,
        order_id: &str,
        image: &ProofImage,
    ) -> Result<String, ProofSinkError> {
        if self.fail {
            return Err(ProofSinkError::Io("disk full".to_string()));
        }
        let proof_ref = format!("mem://proofs/{order_id}.{}", image.extension());
        self.uploads.lock().unwrap().push(proof_ref.clone());
        Ok(proof_ref)
    }
}

#[derive(Clone)]
pub enum Script {
    Approve(&'static str),
    Reject(&'static str),
    Fail,
}

/// Oracle with a fixed answer and a call counter.
#[derive(Clone)]
pub struct ScriptedOracle {
    script: Script,
    calls: Arc<AtomicUsize>,
}

impl ScriptedOracle {
    pub fn new(script: Script) -> Self {
        Self {
            script,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl VerificationOracle for ScriptedOracle {
    async fn verify(&self, _job: &VerificationJob) -> Result<Verdict, OracleError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.script {
            Script::Approve(reason) => Ok(Verdict {
                is_verified: true,
                reason: reason.to_string(),
            }),
            Script::Reject(reason) => Ok(Verdict {
                is_verified: false,
                reason: reason.to_string(),
            }),
            Script::Fail => Err(OracleError::Transport("connection refused".to_string())),
        }
    }
}

/// Oracle that records the booking's status as seen at call time, for the
/// ordering invariant: verification must never observe `pending`.
#[derive(Clone)]
pub struct StatusObservingOracle {
    store: InMemoryStore,
    pub observed: Arc<Mutex<Option<BookingStatus>>>,
}

impl StatusObservingOracle {
    pub fn new(store: InMemoryStore) -> Self {
        Self {
            store,
            observed: Arc::new(Mutex::new(None)),
        }
    }
}

#[async_trait]
impl VerificationOracle for StatusObservingOracle {
    async fn verify(&self, job: &VerificationJob) -> Result<Verdict, OracleError> {
        let status = self.store.get(job.booking_id).map(|b| b.status);
        *self.observed.lock().unwrap() = status;
        Ok(Verdict {
            is_verified: true,
            reason: "ok".to_string(),
        })
    }
}
