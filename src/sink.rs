//! Summary sink abstraction.
//!
//! After a successful dispatch the router can publish one structured summary
//! record to an external sink (a Discord relay on real deployments). The
//! sink is optional and strictly fire-and-forget: its failure never rolls
//! back or blocks the chat-side warnings already sent.

use crate::host::HostError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;

/// One dispatched looking-for-squad request, for the rich sink.
#[derive(Debug, Clone, Serialize)]
pub struct SummaryRecord {
    /// Display name of the requesting player.
    pub requester: String,
    pub team_id: u32,
    /// Display names of the leaders that received the notice, in order.
    pub notified_leaders: Vec<String>,
    pub at: DateTime<Utc>,
}

/// External sink for summary records.
#[async_trait]
pub trait SummarySink: Send + Sync {
    async fn publish(&self, record: SummaryRecord) -> Result<(), HostError>;
}

/// Sink that drops every record.
#[derive(Debug, Default)]
pub struct NoopSummarySink;

#[async_trait]
impl SummarySink for NoopSummarySink {
    async fn publish(&self, _record: SummaryRecord) -> Result<(), HostError> {
        Ok(())
    }
}

/// Sink that emits each record as one JSON log line.
///
/// Useful on hosts that want the summaries without a rich delivery channel
/// wired up.
#[derive(Debug, Default)]
pub struct LogSummarySink;

#[async_trait]
impl SummarySink for LogSummarySink {
    async fn publish(&self, record: SummaryRecord) -> Result<(), HostError> {
        let json = serde_json::to_string(&record).map_err(|e| HostError::Sink(e.to_string()))?;
        info!(target: "squad_lfs::summary", summary = %json, "looking-for-squad dispatched");
        Ok(())
    }
}
