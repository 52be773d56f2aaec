//! One-shot `GetLocalHeader` against a live execution engine.
//!
//! There is no beacon chain behind this command: the parent beacon root and the execution
//! head it builds on are taken from the command line, and the node is treated as synced
//! and fully validated.

use std::sync::Arc;

use alloy_eips::eip4895::Withdrawal;
use async_trait::async_trait;
use bluewater_execution::EngineApiClient;
use bluewater_proposer::{
    EnginePayloadProducer, LocalHeaderBuilder, OptimisticChecker, OptimisticError,
    ParentStateResolver, PayloadContext, ProposerMetrics, ResolutionError, SyncChecker,
};
use bluewater_rpc::ProposerRpc;
use bluewater_types::{
    aliases::B256, header::ExecutionPayloadHeaderEpbs, parent::ResolvedParent, slot::Slot,
};
use clap::Parser;
use color_eyre::eyre::{self, eyre};
use prometheus_client::registry::Registry;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::config::Config;

#[derive(Parser, Clone, Debug, Default, PartialEq)]
pub struct LocalHeaderCmd {
    /// Slot to build the header for
    #[arg(long)]
    pub slot: u64,

    /// Validator index of the proposer, recorded as the header's builder
    #[arg(long)]
    pub proposer_index: u64,

    /// Beacon block root of the parent block
    #[arg(long)]
    pub parent_root: B256,

    /// Execution block hash the payload builds on
    #[arg(long)]
    pub head_block_hash: B256,

    /// Finalized execution block hash (defaults to the head)
    #[arg(long)]
    pub finalized_block_hash: Option<B256>,

    /// Chain genesis time, in seconds since the Unix epoch
    #[arg(long)]
    pub genesis_time: u64,

    #[arg(long, default_value_t = 12)]
    pub seconds_per_slot: u64,

    /// RANDAO mix for the payload (defaults to zero)
    #[arg(long)]
    pub prev_randao: Option<B256>,

    /// Print the Prometheus metrics recorded for the request
    #[arg(long)]
    pub print_metrics: bool,
}

impl LocalHeaderCmd {
    pub async fn run(&self, config: &Config) -> eyre::Result<ExecutionPayloadHeaderEpbs> {
        let engine = EngineApiClient::from_config(&config.execution_config()?)?;
        let producer = EnginePayloadProducer::new(Arc::new(engine), config.execution.fee_recipient);

        let mut registry = Registry::default();
        let metrics = ProposerMetrics::register(&mut registry);

        let status = Arc::new(AssumeReady);
        let builder = LocalHeaderBuilder::new(
            status.clone(),
            status,
            StaticParentResolver::new(self.parent()),
            producer,
            config.fork,
        )
        .with_observer(Arc::new(metrics));

        let mut rpc = ProposerRpc::new(Arc::new(builder));
        if let Some(timeout) = config.proposer.request_timeout() {
            rpc = rpc.with_request_timeout(timeout);
        }

        let cancel = CancellationToken::new();
        let interrupt = tokio::spawn({
            let cancel = cancel.clone();
            async move {
                if tokio::signal::ctrl_c().await.is_ok() {
                    cancel.cancel();
                }
            }
        });

        info!(slot = self.slot, proposer_index = self.proposer_index, "Requesting local header");
        let result = rpc.get_local_header(self.slot, self.proposer_index, &cancel).await;
        interrupt.abort();

        if self.print_metrics {
            let mut buf = String::new();
            prometheus_client::encoding::text::encode(&mut buf, &registry)?;
            println!("{buf}");
        }

        result.map_err(|status| eyre!("GetLocalHeader failed: {status}"))
    }

    fn parent(&self) -> ResolvedParent<CommandLineParent> {
        let state = CommandLineParent {
            head_block_hash: self.head_block_hash,
            finalized_block_hash: self.finalized_block_hash.unwrap_or(self.head_block_hash),
            genesis_time: self.genesis_time,
            seconds_per_slot: self.seconds_per_slot,
            prev_randao: self.prev_randao.unwrap_or_default(),
        };
        ResolvedParent::new(state, self.parent_root)
    }
}

/// Readiness for a command with no sync tracker behind it.
struct AssumeReady;

impl SyncChecker for AssumeReady {
    fn is_syncing(&self) -> bool {
        false
    }
}

impl OptimisticChecker for AssumeReady {
    fn optimistic_status(&self) -> Result<(), OptimisticError> {
        Ok(())
    }
}

/// Parent state described entirely by command-line arguments.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CommandLineParent {
    head_block_hash: B256,
    finalized_block_hash: B256,
    genesis_time: u64,
    seconds_per_slot: u64,
    prev_randao: B256,
}

impl PayloadContext for CommandLineParent {
    fn head_block_hash(&self) -> B256 {
        self.head_block_hash
    }

    fn finalized_block_hash(&self) -> B256 {
        self.finalized_block_hash
    }

    fn timestamp_at(&self, slot: Slot) -> u64 {
        self.genesis_time.saturating_add(slot.as_u64().saturating_mul(self.seconds_per_slot))
    }

    fn prev_randao(&self) -> B256 {
        self.prev_randao
    }

    fn expected_withdrawals(&self) -> Vec<Withdrawal> {
        Vec::new()
    }
}

struct StaticParentResolver {
    parent: ResolvedParent<CommandLineParent>,
}

impl StaticParentResolver {
    fn new(parent: ResolvedParent<CommandLineParent>) -> Self {
        Self { parent }
    }
}

#[async_trait]
impl ParentStateResolver for StaticParentResolver {
    type State = CommandLineParent;

    async fn resolve_parent(
        &self,
        slot: Slot,
    ) -> Result<ResolvedParent<CommandLineParent>, ResolutionError> {
        debug!(%slot, parent_root = %self.parent.parent_root, "Using parent from command line");
        Ok(self.parent.clone())
    }
}
