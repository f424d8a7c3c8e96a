//! # fmap-oracle
//!
//! Mapping oracle client for fmap.
//!
//! Sends one chat-completions request per [`MethodRecord`](fmap_core::MethodRecord)
//! and reduces the reply to a [`MappingResult`](fmap_core::MappingResult):
//! - [`request`]: prompt and request body construction
//! - [`reply`]: staged reply parsing (fences, brace region, decode, key check)
//! - [`backend`]: the [`ChatBackend`] seam and its reqwest implementation
//! - [`client`]: [`MappingClient`], which folds every failure into a per-method result

pub mod backend;
pub mod client;
pub mod reply;
pub mod request;

mod error;

pub use backend::{ChatBackend, HttpBackend};
pub use client::{MappingClient, OracleClient};
pub use error::{OracleError, ReplyError};
pub use request::{OracleRequest, SYSTEM_PROMPT};
