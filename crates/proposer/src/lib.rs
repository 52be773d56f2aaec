//! Local execution payload header construction for ePBS proposers.
//!
//! When a proposer builds its own block it acts as its own builder and needs an
//! `ExecutionPayloadHeaderEpbs` for the payload its execution engine produced. This crate
//! runs that construction as a strictly linear pipeline:
//!
//! ```text
//! HeaderRequest
//!     │
//!     ├─> gate::check_ready          (sync status, optimistic status, fork activation)
//!     ├─> ParentStateResolver        (state + parent beacon root for the slot)
//!     ├─> LocalPayloadProducer       (payload from the local execution engine)
//!     ├─> kzg_commitments_root       (SSZ root over the payload's commitments)
//!     └─> assembler::assemble        (header with builder_index = proposer, value = 0)
//! ```
//!
//! Any stage failure ends the request with a [`LocalHeaderError`]; nothing is retried and
//! nothing outlives the request.

#![forbid(unsafe_code)]
#![warn(clippy::all)]

/// Header assembly from pipeline outputs.
pub mod assembler;
/// Orchestration of the pipeline stages.
pub mod builder;
/// Interfaces the pipeline requires from the rest of the node.
pub mod collaborators;
/// Payload production through the Engine API.
pub mod engine_producer;
/// Error taxonomy of the pipeline.
pub mod error;
/// Readiness and fork-activation checks.
pub mod gate;
/// Prometheus metrics for header construction.
pub mod metrics;
/// Observability hook injected into the builder.
pub mod observer;

pub use builder::LocalHeaderBuilder;
pub use collaborators::{
    LocalPayloadProducer, OptimisticChecker, ParentStateResolver, SyncChecker,
};
pub use engine_producer::{EnginePayloadProducer, PayloadContext};
pub use error::{LocalHeaderError, NotReadyReason, OptimisticError, ResolutionError, Stage};
pub use metrics::ProposerMetrics;
pub use observer::{HeaderObserver, NoopObserver};
