//! # In-Memory Ledger
//!
//! A single-signer ledger that executes payloads against the simulated
//! contracts. Versions are lamport-style: every object a transaction
//! creates or mutates takes the transaction's sequence number.
//!
//! Besides scripted submission faults it can lag reads behind writes, which
//! is how a real RPC node behaves right after a confirmation.

use std::collections::{HashMap, VecDeque};
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use sha2::{Digest as _, Sha256};
use shared_types::{
    Address, ConfirmationError, Digest, ExecutionStatus, LedgerGateway, LedgerObject, ObjectContent,
    ObjectId, ObjectRef, SubmissionError, TransactionEffects, TransactionPayload, TransportError,
};
use tracing::{debug, info};

use crate::contracts::{self, Change};
use crate::faults::Fault;

enum Receipt {
    Ready(TransactionEffects),
    Hang,
    Transport(String),
}

#[derive(Default)]
struct LedgerState {
    objects: HashMap<ObjectId, LedgerObject>,
    /// Snapshot each object had before its latest change (`None` if new).
    previous: HashMap<ObjectId, Option<LedgerObject>>,
    /// Creation order, for owned-object listings.
    order: Vec<ObjectId>,
    receipts: HashMap<Digest, Receipt>,
    sequence: u64,
    faults: VecDeque<Fault>,
    read_faults: VecDeque<String>,
    lagged_reads: usize,
}

/// In-memory `LedgerGateway`.
pub struct InMemoryLedger {
    signer: Address,
    latency: Option<Duration>,
    state: Mutex<LedgerState>,
}

impl InMemoryLedger {
    /// Ledger whose wallet signs as `signer`.
    #[must_use]
    pub fn new(signer: Address) -> Self {
        Self {
            signer,
            latency: None,
            state: Mutex::new(LedgerState::default()),
        }
    }

    /// Delay every submission and confirmation by `latency`.
    #[must_use]
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    /// Account the wallet signs as.
    pub fn signer(&self) -> &Address {
        &self.signer
    }

    /// Queue a fault for the next submission.
    pub fn inject(&self, fault: Fault) {
        debug!(%fault, "[ledger] Fault queued");
        self.state.lock().faults.push_back(fault);
    }

    /// Fail the next object read with a transport error.
    pub fn fail_next_read(&self, message: impl Into<String>) {
        self.state.lock().read_faults.push_back(message.into());
    }

    /// Serve the pre-change snapshot for the next `reads` object reads.
    pub fn lag_reads(&self, reads: usize) {
        self.state.lock().lagged_reads = reads;
    }

    /// Insert or replace an object directly.
    pub fn insert_object(&self, object: LedgerObject) {
        let mut state = self.state.lock();
        if !state.objects.contains_key(&object.object_id) {
            state.order.push(object.object_id.clone());
        }
        state.sequence = state.sequence.max(object.version);
        state.objects.insert(object.object_id.clone(), object);
    }

    /// Current snapshot of `id`, bypassing lag and faults.
    pub fn object(&self, id: &ObjectId) -> Option<LedgerObject> {
        self.state.lock().objects.get(id).cloned()
    }

    /// Number of transactions that reached the ledger.
    pub fn transaction_count(&self) -> u64 {
        self.state.lock().sequence
    }

    async fn delay(&self) {
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
    }

    fn execute(
        &self,
        state: &mut LedgerState,
        payload: &TransactionPayload,
        digest: &Digest,
    ) -> TransactionEffects {
        let mut staged = state.objects.clone();
        let mut created = Vec::new();
        let mut mutated = Vec::new();
        let version = state.sequence;

        for call in &payload.calls {
            let change = match contracts::execute(call, &staged, &self.signer) {
                Ok(change) => change,
                Err(reason) => {
                    info!(%digest, %reason, "[ledger] Transaction aborted");
                    return failure(digest, reason);
                }
            };
            match change {
                Change::Create { type_tag, fields } => {
                    let object_id = derive_object_id(digest, created.len());
                    staged.insert(
                        object_id.clone(),
                        contracts::new_object(
                            object_id.clone(),
                            version,
                            self.signer.clone(),
                            type_tag,
                            fields,
                        ),
                    );
                    created.push(ObjectRef { object_id, version });
                }
                Change::Mutate { object_id, fields } => {
                    if let Some(object) = staged.get_mut(&object_id) {
                        if let ObjectContent::MoveObject { fields: current, .. } = &mut object.content {
                            *current = fields;
                        }
                        object.version = version;
                    }
                    mutated.push(ObjectRef { object_id, version });
                }
            }
        }

        for r in created.iter().chain(mutated.iter()) {
            let before = state.objects.get(&r.object_id).cloned();
            state.previous.insert(r.object_id.clone(), before);
        }
        for r in &created {
            state.order.push(r.object_id.clone());
        }
        state.objects = staged;

        TransactionEffects {
            digest: digest.clone(),
            status: ExecutionStatus::Success,
            created,
            mutated,
        }
    }
}

#[async_trait]
impl LedgerGateway for InMemoryLedger {
    async fn submit(&self, payload: &TransactionPayload) -> Result<Digest, SubmissionError> {
        self.delay().await;
        let mut state = self.state.lock();

        let fault = state.faults.pop_front();
        match &fault {
            Some(Fault::RejectSignature) => return Err(SubmissionError::UserRejected),
            Some(Fault::WalletError(m)) => return Err(SubmissionError::Wallet(m.clone())),
            Some(Fault::SubmitTransport(m)) => return Err(SubmissionError::Transport(m.clone())),
            _ => {}
        }

        state.sequence += 1;
        let digest = derive_digest(state.sequence, payload)?;
        let receipt = match fault {
            Some(Fault::Abort(reason)) => Receipt::Ready(failure(&digest, reason)),
            Some(Fault::HangConfirmation) => {
                self.execute(&mut state, payload, &digest);
                Receipt::Hang
            }
            Some(Fault::ConfirmTransport(message)) => {
                self.execute(&mut state, payload, &digest);
                Receipt::Transport(message)
            }
            _ => Receipt::Ready(self.execute(&mut state, payload, &digest)),
        };
        state.receipts.insert(digest.clone(), receipt);

        debug!(%digest, sequence = state.sequence, "[ledger] Transaction accepted");
        Ok(digest)
    }

    async fn await_confirmation(
        &self,
        digest: &Digest,
    ) -> Result<TransactionEffects, ConfirmationError> {
        self.delay().await;
        let result = match self.state.lock().receipts.get(digest) {
            Some(Receipt::Ready(effects)) => Some(Ok(effects.clone())),
            Some(Receipt::Transport(m)) => Some(Err(ConfirmationError::Transport(m.clone()))),
            Some(Receipt::Hang) => None,
            None => Some(Err(ConfirmationError::Rejected(format!(
                "unknown transaction {}",
                digest
            )))),
        };
        match result {
            Some(result) => result,
            None => std::future::pending().await,
        }
    }

    async fn fetch_object(&self, id: &ObjectId) -> Result<Option<LedgerObject>, TransportError> {
        let mut state = self.state.lock();
        if let Some(message) = state.read_faults.pop_front() {
            return Err(TransportError(message));
        }
        if state.lagged_reads > 0 {
            if let Some(before) = state.previous.get(id).cloned() {
                state.lagged_reads -= 1;
                return Ok(before);
            }
        }
        Ok(state.objects.get(id).cloned())
    }

    async fn owned_objects(
        &self,
        owner: &Address,
        struct_type: &str,
    ) -> Result<Vec<LedgerObject>, TransportError> {
        let state = self.state.lock();
        Ok(state
            .order
            .iter()
            .filter_map(|id| state.objects.get(id))
            .filter(|object| object.owner_address() == Some(owner))
            .filter(|object| matches!(object.move_fields(), Some((ty, _)) if ty == struct_type))
            .cloned()
            .collect())
    }
}

fn failure(digest: &Digest, reason: String) -> TransactionEffects {
    TransactionEffects {
        digest: digest.clone(),
        status: ExecutionStatus::Failure { error: reason },
        created: Vec::new(),
        mutated: Vec::new(),
    }
}

fn derive_digest(sequence: u64, payload: &TransactionPayload) -> Result<Digest, SubmissionError> {
    let mut hasher = Sha256::new();
    hasher.update(sequence.to_le_bytes());
    hasher.update(format!("{:?}", payload).as_bytes());
    Digest::new(hex::encode(hasher.finalize()))
        .map_err(|e| SubmissionError::Transport(e.to_string()))
}

fn derive_object_id(digest: &Digest, index: usize) -> ObjectId {
    let mut hasher = Sha256::new();
    hasher.update(digest.as_str().as_bytes());
    hasher.update((index as u64).to_le_bytes());
    ObjectId::from_bytes(hasher.finalize().into())
}
