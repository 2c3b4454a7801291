//! Leader notification dispatch.
//!
//! Given an already-resolved set of target squads (and their leaders, where
//! resolvable), sends the looking-for-squad notice to each leader and reports
//! unresolvable squads back to the requester. An orphaned squad is a partial
//! failure, not a fatal one: the pass continues with the remaining targets.

use crate::host::{HostError, WarnSink};
use crate::replies;
use crate::roster::{PlayerSnapshot, SquadSnapshot};
use crate::sink::{SummaryRecord, SummarySink};
use chrono::Utc;
use std::sync::Arc;
use tracing::{debug, warn};

/// Result of one dispatch pass, in target order.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DispatchResult {
    /// Display names of leaders that received the notice.
    pub notified_leaders: Vec<String>,
    /// Ids of squads whose recorded leader could not be resolved.
    pub orphaned_squads: Vec<u32>,
}

/// Sends warnings to squad leaders and composes the optional summary record.
pub struct Dispatcher {
    warn: Arc<dyn WarnSink>,
    summary: Option<Arc<dyn SummarySink>>,
}

impl Dispatcher {
    pub fn new(warn: Arc<dyn WarnSink>, summary: Option<Arc<dyn SummarySink>>) -> Self {
        Self { warn, summary }
    }

    /// Warn each resolved leader with the requester's name; warn the
    /// requester about each orphaned squad.
    ///
    /// If a summary sink is configured and at least one leader was notified,
    /// one [`SummaryRecord`] is published on a detached task. Sink failure is
    /// logged and never affects the result.
    pub async fn notify(
        &self,
        targets: &[(&SquadSnapshot, Option<&PlayerSnapshot>)],
        requester: &PlayerSnapshot,
    ) -> Result<DispatchResult, HostError> {
        let mut result = DispatchResult::default();

        for (squad, leader) in targets {
            match leader {
                Some(leader) => {
                    self.warn
                        .warn(&leader.id, &replies::leader_notice(&requester.name))
                        .await?;
                    result.notified_leaders.push(leader.name.clone());
                }
                None => {
                    debug!(squad_id = squad.squad_id, "squad has no resolvable leader");
                    self.warn
                        .warn(&requester.id, &replies::squad_has_no_leader(squad.squad_id))
                        .await?;
                    result.orphaned_squads.push(squad.squad_id);
                }
            }
        }

        if !result.notified_leaders.is_empty()
            && let Some(sink) = &self.summary
        {
            let record = SummaryRecord {
                requester: requester.name.clone(),
                team_id: requester.team_id,
                notified_leaders: result.notified_leaders.clone(),
                at: Utc::now(),
            };
            let sink = Arc::clone(sink);
            // Fire and forget: the chat-side warnings above are already out.
            tokio::spawn(async move {
                if let Err(e) = sink.publish(record).await {
                    warn!(error = %e, code = e.error_code(), "summary sink publish failed");
                }
            });
        }

        Ok(result)
    }
}
