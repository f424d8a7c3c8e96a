//! Per-method mapping client.

use fmap_config::OracleConfig;
use fmap_core::{ContractPolicy, FailureKind, MappingResult, MethodRecord};

use crate::backend::{ChatBackend, HttpBackend};
use crate::error::OracleError;
use crate::reply::{self, DecodedReply};
use crate::request::OracleRequest;

/// Client over the production HTTP backend.
pub type OracleClient = MappingClient<HttpBackend>;

/// Turns a [`MethodRecord`] into a [`MappingResult`] by asking a
/// [`ChatBackend`] and parsing its reply.
///
/// Every failure is folded into the returned result; `map_formula` never
/// returns an error and never panics on bad replies.
#[derive(Debug, Clone)]
pub struct MappingClient<B> {
    backend: B,
    model: String,
    temperature: f32,
    contract: ContractPolicy,
}

impl OracleClient {
    /// Build a client that talks to the configured endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`OracleError::Transport`] if the HTTP client fails to build.
    pub fn new(config: &OracleConfig) -> Result<Self, OracleError> {
        Ok(Self::with_backend(HttpBackend::new(config)?, config))
    }
}

impl<B: ChatBackend> MappingClient<B> {
    /// Build a client over an arbitrary backend, taking model, temperature,
    /// and contract policy from `config`.
    pub fn with_backend(backend: B, config: &OracleConfig) -> Self {
        Self {
            backend,
            model: config.model.clone(),
            temperature: config.temperature,
            contract: config.on_unknown_symbol,
        }
    }

    #[must_use]
    pub const fn backend(&self) -> &B {
        &self.backend
    }

    /// The request that [`map_formula`](Self::map_formula) would send.
    #[must_use]
    pub fn request_for(&self, record: &MethodRecord) -> OracleRequest {
        OracleRequest::for_record(record, &self.model, self.temperature)
    }

    /// Ask the oracle for the symbol mapping of one method.
    pub async fn map_formula(&self, record: &MethodRecord) -> MappingResult {
        let request = self.request_for(record);
        let raw = match self.backend.complete(&request).await {
            Ok(raw) => raw,
            Err(error) => {
                tracing::warn!(method = %record.name, %error, "oracle request failed");
                return MappingResult::failed(
                    &record.name,
                    FailureKind::Transport,
                    error.to_string(),
                    None,
                );
            }
        };
        self.interpret(record, &raw)
    }

    /// Reduce a reply text to a result for `record`.
    #[must_use]
    pub fn interpret(&self, record: &MethodRecord, raw: &str) -> MappingResult {
        let DecodedReply {
            object,
            mut mapping,
        } = match reply::parse_reply(raw, &record.variables) {
            Ok(decoded) => decoded,
            Err(error) => {
                tracing::warn!(method = %record.name, %error, "unusable oracle reply");
                return MappingResult::failed(
                    &record.name,
                    FailureKind::Format,
                    error.to_string(),
                    Some(error.raw().to_string()),
                );
            }
        };

        let foreign = reply::foreign_keys(&mapping, &record.documentation);
        if foreign.is_empty() {
            return MappingResult::mapped(&record.name, mapping);
        }

        tracing::warn!(
            method = %record.name,
            keys = ?foreign,
            policy = %self.contract,
            "reply keys not found in formula"
        );
        match self.contract {
            ContractPolicy::Strip => {
                let removed = mapping.retain_keys(|key| !foreign.iter().any(|f| f == key));
                MappingResult::mapped(&record.name, mapping).with_rejected_keys(removed)
            }
            ContractPolicy::Reject => MappingResult::failed(
                &record.name,
                FailureKind::ContractViolation,
                format!("keys not in formula: {}", foreign.join(", ")),
                Some(object),
            ),
        }
    }
}
