//! # fmap-analyzer
//!
//! Parse one Java source text, then ask the mapping oracle about every
//! method it declares.
//!
//! [`Analyzer::analyze`] parses once and propagates
//! [`ParseFailure`](fmap_core::ParseFailure). Otherwise it fans out one
//! oracle call per method, at most `max_concurrency` in flight, and returns
//! the results in the parser's order. A failed or panicked oracle task
//! becomes that method's error result; no method is skipped.

use std::collections::HashMap;
use std::sync::Arc;

use fmap_config::{FmapConfig, ParserConfig};
use fmap_core::{AnalysisReport, FailureKind, MappingResult, MethodRecord, ParseFailure};
use fmap_oracle::{ChatBackend, HttpBackend, MappingClient, OracleClient, OracleError};
use fmap_parser::{JavaParser, ParseOptions};
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

/// Parser options from the `[parser]` config section.
#[must_use]
pub const fn parse_options(config: &ParserConfig) -> ParseOptions {
    ParseOptions {
        variable_policy: config.variable_policy,
        include_loop_counters: config.include_loop_counters,
    }
}

pub struct Analyzer<B> {
    parser: JavaParser,
    client: Arc<MappingClient<B>>,
    max_concurrency: usize,
}

impl Analyzer<HttpBackend> {
    /// Build an analyzer over the HTTP oracle described by `config`.
    ///
    /// # Errors
    ///
    /// Returns [`OracleError::Transport`] if the HTTP client fails to build.
    pub fn from_config(config: &FmapConfig) -> Result<Self, OracleError> {
        Ok(Self::new(
            JavaParser::new(parse_options(&config.parser)),
            OracleClient::new(&config.oracle)?,
            config.oracle.max_concurrency,
        ))
    }
}

impl<B: ChatBackend + 'static> Analyzer<B> {
    /// A `max_concurrency` of zero is treated as one.
    pub fn new(parser: JavaParser, client: MappingClient<B>, max_concurrency: usize) -> Self {
        Self {
            parser,
            client: Arc::new(client),
            max_concurrency: max_concurrency.max(1),
        }
    }

    #[must_use]
    pub const fn parser(&self) -> &JavaParser {
        &self.parser
    }

    #[must_use]
    pub fn client(&self) -> &MappingClient<B> {
        &self.client
    }

    /// Parse `source` and map every method it declares.
    ///
    /// # Errors
    ///
    /// Returns the parser's [`ParseFailure`]; oracle failures are reported
    /// inside the returned results instead.
    pub async fn analyze(&self, source: &str) -> Result<Vec<MappingResult>, ParseFailure> {
        let records = self.parser.parse(source)?;
        Ok(self.map_records(records).await)
    }

    /// Map already-parsed records, preserving their order.
    pub async fn map_records(&self, records: Vec<MethodRecord>) -> Vec<MappingResult> {
        self.map_records_with(records, |_| {}).await
    }

    /// Like [`map_records`](Self::map_records), calling `on_result` as each
    /// method finishes (in completion order).
    pub async fn map_records_with(
        &self,
        records: Vec<MethodRecord>,
        mut on_result: impl FnMut(&MappingResult),
    ) -> Vec<MappingResult> {
        let names: Vec<String> = records.iter().map(|r| r.name.clone()).collect();
        let mut slots: Vec<Option<MappingResult>> = vec![None; records.len()];

        let semaphore = Arc::new(Semaphore::new(self.max_concurrency));
        let mut set = JoinSet::new();
        let mut task_index = HashMap::new();

        for (idx, record) in records.into_iter().enumerate() {
            let client = Arc::clone(&self.client);
            let sem = Arc::clone(&semaphore);
            let handle = set.spawn(async move {
                let Ok(_permit) = sem.acquire().await else {
                    return (
                        idx,
                        MappingResult::failed(
                            record.name,
                            FailureKind::Transport,
                            "oracle fan-out shut down",
                            None,
                        ),
                    );
                };
                (idx, client.map_formula(&record).await)
            });
            task_index.insert(handle.id(), idx);
        }

        while let Some(joined) = set.join_next().await {
            match joined {
                Ok((idx, result)) => {
                    on_result(&result);
                    slots[idx] = Some(result);
                }
                Err(error) => {
                    let Some(&idx) = task_index.get(&error.id()) else {
                        tracing::error!(%error, "untracked oracle task failed");
                        continue;
                    };
                    tracing::error!(method = %names[idx], %error, "oracle task failed");
                    let result = task_failure(&names[idx], &error.to_string());
                    on_result(&result);
                    slots[idx] = Some(result);
                }
            }
        }

        let results: Vec<MappingResult> = slots
            .into_iter()
            .zip(&names)
            .map(|(slot, name)| slot.unwrap_or_else(|| task_failure(name, "no result produced")))
            .collect();

        let report = AnalysisReport::from_results(&results);
        tracing::info!(%report, "analysis finished");
        results
    }
}

fn task_failure(method_name: &str, reason: &str) -> MappingResult {
    MappingResult::failed(
        method_name,
        FailureKind::Transport,
        format!("oracle task failed: {reason}"),
        None,
    )
}
