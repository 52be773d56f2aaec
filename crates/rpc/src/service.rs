use std::{sync::Arc, time::Duration};

use bluewater_proposer::{
    LocalHeaderBuilder, LocalHeaderError, LocalPayloadProducer, ParentStateResolver,
};
use bluewater_types::{
    aliases::ValidatorIndex,
    header::{ExecutionPayloadHeaderEpbs, HeaderRequest},
    slot::Slot,
};
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::status::{Code, RpcStatus};

/// `GetLocalHeader` endpoint.
///
/// Applies the per-request deadline and translates pipeline errors into [`RpcStatus`]. The
/// transport server owning this service decides how the status is put on the wire.
pub struct ProposerRpc<R, P> {
    builder: Arc<LocalHeaderBuilder<R, P>>,
    request_timeout: Option<Duration>,
}

impl<R, P> Clone for ProposerRpc<R, P> {
    fn clone(&self) -> Self {
        Self { builder: self.builder.clone(), request_timeout: self.request_timeout }
    }
}

impl<R, P> ProposerRpc<R, P>
where
    R: ParentStateResolver,
    P: LocalPayloadProducer<R::State>,
{
    pub fn new(builder: Arc<LocalHeaderBuilder<R, P>>) -> Self {
        Self { builder, request_timeout: None }
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    /// Build the header the proposer at `proposer_index` signs for its own block at `slot`.
    ///
    /// `cancel` is the caller's cancellation signal, typically fired when the client
    /// disconnects. On deadline the in-flight request is cancelled and awaited until the
    /// builder has unwound, then reported as `DEADLINE_EXCEEDED`.
    pub async fn get_local_header(
        &self,
        slot: u64,
        proposer_index: ValidatorIndex,
        cancel: &CancellationToken,
    ) -> Result<ExecutionPayloadHeaderEpbs, RpcStatus> {
        let request = HeaderRequest::new(Slot::new(slot), proposer_index);
        let cancel = cancel.child_token();

        let result = match self.request_timeout {
            Some(timeout) => {
                let build = self.builder.get_local_header(request, &cancel);
                tokio::pin!(build);

                tokio::select! {
                    biased;
                    result = &mut build => result,
                    _ = tokio::time::sleep(timeout) => {
                        warn!(slot, proposer_index, ?timeout, "GetLocalHeader deadline exceeded");
                        cancel.cancel();

                        // The builder stops at its next cancellation point and reports the
                        // outcome to its observer before returning.
                        return match build.await {
                            Err(LocalHeaderError::Cancelled(_)) => {
                                Err(RpcStatus::deadline_exceeded())
                            }
                            other => other.map_err(RpcStatus::from),
                        };
                    }
                }
            }
            None => self.builder.get_local_header(request, &cancel).await,
        };

        result.map_err(|e| {
            let status = RpcStatus::from(e);
            if status.code == Code::Internal {
                warn!(slot, proposer_index, message = %status.message, "GetLocalHeader failed");
            } else {
                debug!(
                    slot,
                    proposer_index,
                    code = %status.code,
                    message = %status.message,
                    "GetLocalHeader rejected"
                );
            }
            status
        })
    }
}
