//! RPC-facing side of local header construction.
//!
//! Transport status codes live here and only here; the pipeline reports typed
//! [`LocalHeaderError`](bluewater_proposer::LocalHeaderError)s and this crate classifies them.

#![forbid(unsafe_code)]

pub mod service;
pub mod status;

pub use service::ProposerRpc;
pub use status::{Code, RpcStatus};
