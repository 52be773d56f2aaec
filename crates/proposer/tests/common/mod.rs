//! Shared helpers for the header pipeline integration tests.

#![allow(dead_code)]

pub(crate) mod mocks;

use std::sync::Arc;

use bluewater_proposer::LocalHeaderBuilder;
use bluewater_types::{
    aliases::B256,
    constants::SLOTS_PER_EPOCH,
    fork::ForkConfig,
    kzg::KzgCommitment,
    slot::{Epoch, Slot},
};
use mocks::{MockOptimistic, MockProducer, MockResolver, MockSync};

pub(crate) const FORK_EPOCH: u64 = 100;

pub(crate) fn fork() -> ForkConfig {
    ForkConfig::new(Epoch::new(FORK_EPOCH))
}

pub(crate) fn slot_in_epoch(epoch: u64) -> Slot {
    Slot::new(epoch * SLOTS_PER_EPOCH)
}

pub(crate) fn parent_root() -> B256 {
    B256::repeat_byte(0xaa)
}

/// Commitment whose first byte is `i` and remaining 47 bytes are zero.
pub(crate) fn commitment(i: u8) -> KzgCommitment {
    let mut bytes = [0u8; 48];
    bytes[0] = i;
    KzgCommitment::new(bytes)
}

/// Handles to every collaborator so tests can inspect invocations after the run.
pub(crate) struct Harness {
    pub sync: MockSync,
    pub optimistic: MockOptimistic,
    pub resolver: MockResolver,
    pub producer: MockProducer,
}

impl Harness {
    pub(crate) fn ready() -> Self {
        Self {
            sync: MockSync::new(false),
            optimistic: MockOptimistic::new(false),
            resolver: MockResolver::returning(parent_root()),
            producer: MockProducer::returning(Vec::new()),
        }
    }

    pub(crate) fn builder(&self) -> LocalHeaderBuilder<MockResolver, MockProducer> {
        LocalHeaderBuilder::new(
            Arc::new(self.sync.clone()),
            Arc::new(self.optimistic.clone()),
            self.resolver.clone(),
            self.producer.clone(),
            fork(),
        )
    }

    pub(crate) fn total_calls(&self) -> usize {
        self.sync.calls() +
            self.optimistic.calls() +
            self.resolver.calls().len() +
            self.producer.calls().len()
    }
}
