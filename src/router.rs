//! Chat command routing.
//!
//! One invocation runs parse → rate limit → eligibility → target resolution
//! → dispatch, and always answers the requester (or stays silent for lines
//! that are not the command). Host-boundary failures are caught here; a
//! single invocation can never take the process down.
//!
//! Ordering is deliberate and uniform for both command forms: input shape is
//! validated first (free, consumes nothing), then the rate-limit slot is
//! taken, then eligibility is checked. An ineligible invoker therefore still
//! consumes a slot.

use crate::config::LfsConfig;
use crate::dispatch::{DispatchResult, Dispatcher};
use crate::host::{ChatEvent, HostError, RosterProvider, WarnSink};
use crate::limiter::{Admission, TriggerLimiter};
use crate::replies;
use crate::roster::{self, PlayerSnapshot};
use crate::sink::SummarySink;
use crate::telemetry::CommandTimer;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::{debug, error};

/// What one command invocation amounted to. Hosts typically just log this.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The line was not a recognized trigger; nothing was sent.
    Ignored,
    /// Malformed squad argument; usage reply sent, no rate-limit slot taken.
    UsageError,
    RateLimited { retry_after_secs: u32 },
    /// Invoker unresolvable on the roster or already in a squad.
    NotEligible,
    SquadNotFound(u32),
    /// No candidate squads on the invoker's team.
    NoCandidates,
    Dispatched { notified: usize, orphaned: usize },
    /// A host call failed; the requester got a generic retry-later reply.
    Failed,
}

/// Parsed form of an inbound chat line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ParsedCommand {
    NotOurs,
    Bare,
    WithSquad(u32),
    Malformed,
}

/// Routes recognized chat commands through the limiter, the roster, and the
/// dispatcher.
pub struct CommandRouter {
    config: Arc<LfsConfig>,
    limiter: TriggerLimiter,
    roster: Arc<dyn RosterProvider>,
    warn: Arc<dyn WarnSink>,
    dispatcher: Dispatcher,
}

impl CommandRouter {
    /// Build a router.
    ///
    /// `summary` is kept only when the policy enables it; with the toggle
    /// off the sink is dropped at construction and never reaches dispatch.
    pub fn new(
        config: Arc<LfsConfig>,
        roster: Arc<dyn RosterProvider>,
        warn: Arc<dyn WarnSink>,
        summary: Option<Arc<dyn SummarySink>>,
    ) -> Self {
        let limiter = TriggerLimiter::new(config.rate_limit_secs);
        let summary = if config.summary_sink_enabled { summary } else { None };
        let dispatcher = Dispatcher::new(Arc::clone(&warn), summary);
        Self {
            config,
            limiter,
            roster,
            warn,
            dispatcher,
        }
    }

    /// Shared limiter handle, for host maintenance sweeps.
    pub fn limiter(&self) -> &TriggerLimiter {
        &self.limiter
    }

    /// Handle one inbound chat event at the current wall-clock time.
    pub async fn handle_chat(&self, event: &ChatEvent) -> Outcome {
        self.handle_chat_at(event, now_millis()).await
    }

    /// Handle one inbound chat event at an explicit time in epoch
    /// milliseconds. Exposed so window behavior is testable without sleeping.
    pub async fn handle_chat_at(&self, event: &ChatEvent, now_ms: u64) -> Outcome {
        let parsed = parse_command(&self.config, &event.message);
        if parsed == ParsedCommand::NotOurs {
            return Outcome::Ignored;
        }

        let _timer = CommandTimer::new(self.config.primary_phrase());
        debug!(player = %event.player, ?parsed, "handling chat command");

        if parsed == ParsedCommand::Malformed {
            // Rejecting malformed input is free: no slot taken, no roster IO.
            let usage = replies::usage(self.config.primary_phrase());
            return self.reply(event, &usage, Outcome::UsageError).await;
        }

        if let Admission::Denied { retry_after_secs } =
            self.limiter.try_admit(&event.player, now_ms)
        {
            let text = replies::rate_limited(retry_after_secs);
            return self
                .reply(event, &text, Outcome::RateLimited { retry_after_secs })
                .await;
        }

        let target = match parsed {
            ParsedCommand::WithSquad(id) => Some(id),
            _ => None,
        };

        match self.resolve_and_dispatch(event, target).await {
            Ok(outcome) => outcome,
            Err(e) => {
                error!(
                    error = %e,
                    code = e.error_code(),
                    player = %event.player,
                    "command failed at the host boundary"
                );
                // Best effort: the warn channel may be the thing that failed.
                let _ = self
                    .warn
                    .warn(&event.player, replies::transient_failure())
                    .await;
                Outcome::Failed
            }
        }
    }

    async fn resolve_and_dispatch(
        &self,
        event: &ChatEvent,
        target: Option<u32>,
    ) -> Result<Outcome, HostError> {
        let players = self.roster.list_players().await?;
        let invoker: PlayerSnapshot = match roster::find_player(&players, &event.player) {
            Some(p) if p.squad_id.is_none() => p.clone(),
            _ => {
                // The rate-limit slot is already taken at this point.
                self.warn
                    .warn(&event.player, replies::must_be_squadless())
                    .await?;
                return Ok(Outcome::NotEligible);
            }
        };

        let squads = self.roster.list_squads().await?;
        let locked_only = self.config.locked_only;

        match target {
            Some(squad_id) => {
                let Some(squad) =
                    roster::find_squad_by_id(&squads, invoker.team_id, squad_id, locked_only)
                else {
                    self.warn
                        .warn(&event.player, &replies::squad_not_found(squad_id))
                        .await?;
                    return Ok(Outcome::SquadNotFound(squad_id));
                };
                let leader = roster::resolve_leader(&players, squad);
                let result = self.dispatcher.notify(&[(squad, leader)], &invoker).await?;
                self.warn
                    .warn(&event.player, &replies::sent_to_leader(squad_id))
                    .await?;
                Ok(dispatched(&result))
            }
            None => {
                let candidates = roster::find_squads(&squads, invoker.team_id, locked_only);
                if candidates.is_empty() {
                    self.warn
                        .warn(&event.player, replies::no_leaders(locked_only))
                        .await?;
                    return Ok(Outcome::NoCandidates);
                }
                let targets: Vec<_> = candidates
                    .iter()
                    .map(|s| (*s, roster::resolve_leader(&players, s)))
                    .collect();
                let result = self.dispatcher.notify(&targets, &invoker).await?;
                self.warn
                    .warn(&event.player, replies::sent_to_team_leaders())
                    .await?;
                Ok(dispatched(&result))
            }
        }
    }

    /// Send a directed reply to the requester, folding a warn failure into
    /// [`Outcome::Failed`].
    async fn reply(&self, event: &ChatEvent, text: &str, outcome: Outcome) -> Outcome {
        if let Err(e) = self.warn.warn(&event.player, text).await {
            error!(error = %e, code = e.error_code(), "failed to warn requester");
            return Outcome::Failed;
        }
        outcome
    }
}

fn dispatched(result: &DispatchResult) -> Outcome {
    Outcome::Dispatched {
        notified: result.notified_leaders.len(),
        orphaned: result.orphaned_squads.len(),
    }
}

/// Lowercase, whitespace-split command recognition.
///
/// Only the first two tokens matter: the trigger phrase and an optional squad
/// number. Anything after them is ignored.
fn parse_command(config: &LfsConfig, message: &str) -> ParsedCommand {
    let lower = message.to_lowercase();
    let mut tokens = lower.split_whitespace();
    let Some(first) = tokens.next() else {
        return ParsedCommand::NotOurs;
    };
    if !config.trigger_phrases.iter().any(|p| p == first) {
        return ParsedCommand::NotOurs;
    }
    match tokens.next() {
        None => ParsedCommand::Bare,
        Some(arg) => match arg.parse::<u32>() {
            Ok(id) => ParsedCommand::WithSquad(id),
            Err(_) => ParsedCommand::Malformed,
        },
    }
}

/// Milliseconds since the Unix epoch. The limiter only compares differences,
/// so wall clock is sufficient here.
fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| u64::try_from(d.as_millis()).unwrap_or(u64::MAX))
        .unwrap_or(0)
}
