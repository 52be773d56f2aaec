//! Test doubles for the pipeline collaborators.
//!
//! Every mock is cheaply cloneable and records its invocations behind an `Arc`, so a test
//! keeps a clone and inspects it after handing the original to the builder.

use std::{
    collections::VecDeque,
    sync::{
        Arc, Mutex,
        atomic::{AtomicUsize, Ordering},
    },
};

use alloy_eips::eip4895::Withdrawal;
use alloy_primitives::{Address, B256, Bloom, Bytes, FixedBytes, U256};
use alloy_rpc_types_engine::{
    BlobsBundleV1, ExecutionPayloadEnvelopeV3, ExecutionPayloadV1, ExecutionPayloadV2,
    ExecutionPayloadV3, ForkchoiceState, ForkchoiceUpdated, PayloadAttributes, PayloadId,
    PayloadStatusEnum,
};
use async_trait::async_trait;
use bluewater_execution::EngineApi;
use bluewater_proposer::{
    LocalPayloadProducer, OptimisticChecker, OptimisticError, ParentStateResolver,
    PayloadContext, ResolutionError, SyncChecker,
};
use bluewater_types::{
    aliases::ValidatorIndex,
    kzg::KzgCommitment,
    parent::ResolvedParent,
    payload::{ExecutionData, LocalPayload},
    slot::Slot,
};
use color_eyre::eyre::{self, eyre};

#[derive(Clone)]
pub(crate) struct MockSync {
    syncing: bool,
    calls: Arc<AtomicUsize>,
}

impl MockSync {
    pub(crate) fn new(syncing: bool) -> Self {
        Self { syncing, calls: Arc::default() }
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl SyncChecker for MockSync {
    fn is_syncing(&self) -> bool {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.syncing
    }
}

#[derive(Clone)]
pub(crate) struct MockOptimistic {
    optimistic: bool,
    calls: Arc<AtomicUsize>,
}

impl MockOptimistic {
    pub(crate) fn new(optimistic: bool) -> Self {
        Self { optimistic, calls: Arc::default() }
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl OptimisticChecker for MockOptimistic {
    fn optimistic_status(&self) -> Result<(), OptimisticError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.optimistic { Err(OptimisticError::HeadOptimistic) } else { Ok(()) }
    }
}

/// State handle handed out by [`MockResolver`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct MockState {
    pub slot: Slot,
}

#[derive(Clone, Copy, Debug)]
enum ResolverBehavior {
    Return(B256),
    NotFound,
    Internal,
    Hang,
}

#[derive(Clone)]
pub(crate) struct MockResolver {
    behavior: ResolverBehavior,
    calls: Arc<Mutex<Vec<Slot>>>,
}

impl MockResolver {
    pub(crate) fn returning(parent_root: B256) -> Self {
        Self::with(ResolverBehavior::Return(parent_root))
    }

    pub(crate) fn not_found() -> Self {
        Self::with(ResolverBehavior::NotFound)
    }

    pub(crate) fn internal() -> Self {
        Self::with(ResolverBehavior::Internal)
    }

    /// Never completes; used to exercise cancellation.
    pub(crate) fn hanging() -> Self {
        Self::with(ResolverBehavior::Hang)
    }

    fn with(behavior: ResolverBehavior) -> Self {
        Self { behavior, calls: Arc::default() }
    }

    pub(crate) fn calls(&self) -> Vec<Slot> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ParentStateResolver for MockResolver {
    type State = MockState;

    async fn resolve_parent(
        &self,
        slot: Slot,
    ) -> Result<ResolvedParent<MockState>, ResolutionError> {
        self.calls.lock().unwrap().push(slot);
        match self.behavior {
            ResolverBehavior::Return(root) => Ok(ResolvedParent::new(MockState { slot }, root)),
            ResolverBehavior::NotFound => {
                Err(ResolutionError::NotFound { slot: slot.as_u64(), reason: "no block".into() })
            }
            ResolverBehavior::Internal => Err(ResolutionError::Internal(eyre!("state db closed"))),
            ResolverBehavior::Hang => std::future::pending().await,
        }
    }
}

/// Arguments of one `produce_local_payload` call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct ProduceCall {
    pub state: MockState,
    pub parent_root: B256,
    pub slot: Slot,
    pub proposer_index: ValidatorIndex,
}

#[derive(Clone)]
pub(crate) struct MockProducer {
    result: Result<Vec<KzgCommitment>, String>,
    hang: bool,
    calls: Arc<Mutex<Vec<ProduceCall>>>,
}

impl MockProducer {
    pub(crate) fn returning(commitments: Vec<KzgCommitment>) -> Self {
        Self { result: Ok(commitments), hang: false, calls: Arc::default() }
    }

    pub(crate) fn failing(message: &str) -> Self {
        Self { result: Err(message.to_string()), hang: false, calls: Arc::default() }
    }

    pub(crate) fn hanging() -> Self {
        Self { result: Ok(Vec::new()), hang: true, calls: Arc::default() }
    }

    pub(crate) fn calls(&self) -> Vec<ProduceCall> {
        self.calls.lock().unwrap().clone()
    }

    pub(crate) fn execution_data() -> ExecutionData {
        ExecutionData {
            parent_hash: B256::repeat_byte(0x11),
            block_hash: B256::repeat_byte(0x22),
            gas_limit: 30_000_000,
        }
    }
}

#[async_trait]
impl LocalPayloadProducer<MockState> for MockProducer {
    async fn produce_local_payload(
        &self,
        state: &MockState,
        parent_root: B256,
        slot: Slot,
        proposer_index: ValidatorIndex,
    ) -> eyre::Result<LocalPayload> {
        self.calls.lock().unwrap().push(ProduceCall {
            state: state.clone(),
            parent_root,
            slot,
            proposer_index,
        });
        if self.hang {
            std::future::pending::<()>().await;
        }
        match &self.result {
            Ok(commitments) => Ok(LocalPayload::new(Self::execution_data(), commitments.clone())),
            Err(message) => Err(eyre!("{message}")),
        }
    }
}

/// Parent state exposing fixed payload attributes to the engine-backed producer.
#[derive(Clone, Debug)]
pub(crate) struct MockPayloadContext {
    pub head: B256,
    pub finalized: B256,
    pub genesis_time: u64,
    pub prev_randao: B256,
    pub withdrawals: Vec<Withdrawal>,
}

impl Default for MockPayloadContext {
    fn default() -> Self {
        Self {
            head: B256::repeat_byte(0x11),
            finalized: B256::repeat_byte(0x0f),
            genesis_time: 1_700_000_000,
            prev_randao: B256::repeat_byte(0x5a),
            withdrawals: vec![Withdrawal {
                index: 1,
                validator_index: 9,
                address: Address::repeat_byte(0x77),
                amount: 32,
            }],
        }
    }
}

impl PayloadContext for MockPayloadContext {
    fn head_block_hash(&self) -> B256 {
        self.head
    }

    fn finalized_block_hash(&self) -> B256 {
        self.finalized
    }

    fn timestamp_at(&self, slot: Slot) -> u64 {
        self.genesis_time + slot.as_u64() * 12
    }

    fn prev_randao(&self) -> B256 {
        self.prev_randao
    }

    fn expected_withdrawals(&self) -> Vec<Withdrawal> {
        self.withdrawals.clone()
    }
}

/// Engine API mock that records forkchoice updates and serves one canned envelope.
#[derive(Clone)]
pub(crate) struct MockEngineApi {
    pub forkchoice_updates: Arc<Mutex<Vec<(ForkchoiceState, Option<PayloadAttributes>)>>>,
    pub payload_requests: Arc<Mutex<Vec<PayloadId>>>,
    fcu_responses: Arc<Mutex<VecDeque<ForkchoiceUpdated>>>,
    envelope: Option<ExecutionPayloadEnvelopeV3>,
}

impl MockEngineApi {
    pub(crate) fn new() -> Self {
        Self {
            forkchoice_updates: Arc::default(),
            payload_requests: Arc::default(),
            fcu_responses: Arc::default(),
            envelope: None,
        }
    }

    pub(crate) fn with_forkchoice_response(self, response: ForkchoiceUpdated) -> Self {
        self.fcu_responses.lock().unwrap().push_back(response);
        self
    }

    pub(crate) fn with_envelope(mut self, envelope: ExecutionPayloadEnvelopeV3) -> Self {
        self.envelope = Some(envelope);
        self
    }
}

#[async_trait]
impl EngineApi for MockEngineApi {
    async fn forkchoice_updated(
        &self,
        state: ForkchoiceState,
        payload_attributes: Option<PayloadAttributes>,
    ) -> eyre::Result<ForkchoiceUpdated> {
        self.forkchoice_updates.lock().unwrap().push((state, payload_attributes));
        self.fcu_responses
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| eyre!("mock forkchoice response not registered"))
    }

    async fn get_payload_envelope(
        &self,
        payload_id: PayloadId,
    ) -> eyre::Result<ExecutionPayloadEnvelopeV3> {
        self.payload_requests.lock().unwrap().push(payload_id);
        self.envelope.clone().ok_or_else(|| eyre!("mock payload not registered"))
    }
}

pub(crate) fn valid_forkchoice(payload_id: Option<PayloadId>) -> ForkchoiceUpdated {
    let updated = ForkchoiceUpdated::from_status(PayloadStatusEnum::Valid);
    match payload_id {
        Some(id) => updated.with_payload_id(id),
        None => updated,
    }
}

/// Envelope whose payload carries the given hashes and one proof per commitment.
pub(crate) fn sample_envelope(
    parent_hash: B256,
    block_hash: B256,
    gas_limit: u64,
    commitments: &[KzgCommitment],
) -> ExecutionPayloadEnvelopeV3 {
    let payload = ExecutionPayloadV3 {
        payload_inner: ExecutionPayloadV2 {
            payload_inner: ExecutionPayloadV1 {
                parent_hash,
                fee_recipient: Address::repeat_byte(0x42),
                state_root: B256::repeat_byte(0x01),
                receipts_root: B256::repeat_byte(0x02),
                logs_bloom: Bloom::ZERO,
                prev_randao: B256::repeat_byte(0x5a),
                block_number: 3200,
                gas_limit,
                gas_used: 21_000,
                timestamp: 1_700_038_400,
                extra_data: Bytes::new(),
                base_fee_per_gas: U256::from(7u64),
                block_hash,
                transactions: Vec::new(),
            },
            withdrawals: Vec::new(),
        },
        blob_gas_used: 0,
        excess_blob_gas: 0,
    };

    ExecutionPayloadEnvelopeV3 {
        execution_payload: payload,
        block_value: U256::from(1_000u64),
        blobs_bundle: BlobsBundleV1 {
            commitments: commitments.iter().map(|c| FixedBytes::from(*c.as_bytes())).collect(),
            proofs: commitments.iter().map(|_| FixedBytes::ZERO).collect(),
            blobs: Vec::new(),
        },
        should_override_builder: false,
    }
}
