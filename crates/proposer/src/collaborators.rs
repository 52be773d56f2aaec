//! Interfaces the header pipeline needs from the rest of the node.
//!
//! The synchronous checks are trait objects held by the builder. The resolver and the
//! producer are the two suspension points of a request and are generic, so that the state
//! handle the resolver returns flows to the producer without boxing.

use async_trait::async_trait;
use bluewater_types::{
    aliases::{B256, ValidatorIndex},
    parent::ResolvedParent,
    payload::LocalPayload,
    slot::Slot,
};
use color_eyre::eyre;

use crate::error::{OptimisticError, ResolutionError};

/// Reports whether the node is still catching up with the chain.
pub trait SyncChecker: Send + Sync {
    fn is_syncing(&self) -> bool;
}

/// Reports whether the current head may be built on.
pub trait OptimisticChecker: Send + Sync {
    /// `Ok(())` when the head has been fully validated by the execution engine.
    fn optimistic_status(&self) -> Result<(), OptimisticError>;
}

/// Resolves the state and parent beacon block root a block at `slot` builds on.
#[async_trait]
pub trait ParentStateResolver: Send + Sync {
    /// State handle passed on to the payload producer.
    type State: Send + Sync;

    async fn resolve_parent(
        &self,
        slot: Slot,
    ) -> Result<ResolvedParent<Self::State>, ResolutionError>;
}

/// Produces the proposer's own execution payload.
#[async_trait]
pub trait LocalPayloadProducer<S: Sync>: Send + Sync {
    /// Build a payload for `slot` on top of `state`.
    ///
    /// Must return the payload's KZG commitments in bundle order; the header commits to
    /// them positionally.
    async fn produce_local_payload(
        &self,
        state: &S,
        parent_root: B256,
        slot: Slot,
        proposer_index: ValidatorIndex,
    ) -> eyre::Result<LocalPayload>;
}
