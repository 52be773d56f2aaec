use std::{sync::Arc, time::Instant};

use bluewater_types::{
    commitments::kzg_commitments_root,
    fork::ForkConfig,
    header::{ExecutionPayloadHeaderEpbs, HeaderRequest},
};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, instrument, warn};

use crate::{
    assembler::assemble,
    collaborators::{LocalPayloadProducer, OptimisticChecker, ParentStateResolver, SyncChecker},
    error::{LocalHeaderError, Stage},
    gate::check_ready,
    observer::{HeaderObserver, NoopObserver},
};

/// Builds execution payload headers for blocks the proposer builds itself.
///
/// Every call to [`get_local_header`](Self::get_local_header) is independent: it holds no
/// state between requests, spawns nothing and retries nothing. Concurrent calls share only
/// the read-only collaborators.
pub struct LocalHeaderBuilder<R, P> {
    sync: Arc<dyn SyncChecker>,
    optimistic: Arc<dyn OptimisticChecker>,
    resolver: R,
    producer: P,
    fork: ForkConfig,
    observer: Arc<dyn HeaderObserver>,
}

impl<R, P> LocalHeaderBuilder<R, P>
where
    R: ParentStateResolver,
    P: LocalPayloadProducer<R::State>,
{
    pub fn new(
        sync: Arc<dyn SyncChecker>,
        optimistic: Arc<dyn OptimisticChecker>,
        resolver: R,
        producer: P,
        fork: ForkConfig,
    ) -> Self {
        Self { sync, optimistic, resolver, producer, fork, observer: Arc::new(NoopObserver) }
    }

    /// Replace the observer notified of each request's outcome.
    pub fn with_observer(mut self, observer: Arc<dyn HeaderObserver>) -> Self {
        self.observer = observer;
        self
    }

    pub fn fork_config(&self) -> &ForkConfig {
        &self.fork
    }

    /// Build the header for the proposer's own payload at `request.slot`.
    ///
    /// Stages run in order and the first failure ends the request. The resolver and
    /// producer calls are abandoned as soon as `cancel` fires.
    #[instrument(
        name = "local_header",
        skip_all,
        fields(slot = %request.slot, proposer_index = request.proposer_index)
    )]
    pub async fn get_local_header(
        &self,
        request: HeaderRequest,
        cancel: &CancellationToken,
    ) -> Result<ExecutionPayloadHeaderEpbs, LocalHeaderError> {
        let start = Instant::now();

        match self.build(&request, cancel).await {
            Ok((header, blob_count)) => {
                let elapsed = start.elapsed();
                info!(
                    block_hash = %header.block_hash,
                    parent_block_root = %header.parent_block_root,
                    blob_count,
                    ?elapsed,
                    "Built local execution payload header"
                );
                self.observer.on_success(&header, blob_count, elapsed);
                Ok(header)
            }
            Err(e) => {
                let elapsed = start.elapsed();
                warn!(kind = e.kind(), error = %e, ?elapsed, "Failed to build local header");
                self.observer.on_failure(&e, elapsed);
                Err(e)
            }
        }
    }

    async fn build(
        &self,
        request: &HeaderRequest,
        cancel: &CancellationToken,
    ) -> Result<(ExecutionPayloadHeaderEpbs, usize), LocalHeaderError> {
        let is_syncing = self.sync.is_syncing();
        let optimistic = if is_syncing { Ok(()) } else { self.optimistic.optimistic_status() };
        check_ready(is_syncing, optimistic, request.slot, &self.fork)?;

        let parent = tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                return Err(LocalHeaderError::Cancelled(Stage::ResolveParent));
            }
            resolved = self.resolver.resolve_parent(request.slot) => resolved?,
        };
        debug!(parent_root = %parent.parent_root, "Resolved parent");

        let payload = tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                return Err(LocalHeaderError::Cancelled(Stage::ProducePayload));
            }
            produced = self.producer.produce_local_payload(
                &parent.state,
                parent.parent_root,
                request.slot,
                request.proposer_index,
            ) => produced.map_err(LocalHeaderError::Production)?,
        };
        debug!(
            block_hash = %payload.execution_data.block_hash,
            blob_count = payload.blob_count(),
            "Produced local payload"
        );

        let commitments_root = kzg_commitments_root(&payload.commitments)?;
        let header =
            assemble(request, parent.parent_root, &payload.execution_data, commitments_root);

        Ok((header, payload.blob_count()))
    }
}
