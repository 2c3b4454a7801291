//! Shared fixtures: an in-memory roster and recording sinks.

#![allow(dead_code)] // Each test binary uses a subset of these helpers.

use async_trait::async_trait;
use parking_lot::Mutex;
use squad_lfs::{
    ChatEvent, CommandRouter, HostError, LfsConfig, PlayerId, PlayerSnapshot, RosterProvider,
    SquadSnapshot, SummaryRecord, SummarySink, WarnSink,
};
use std::sync::Arc;

pub fn player(
    id: &str,
    name: &str,
    team_id: u32,
    squad_id: Option<u32>,
    is_leader: bool,
) -> PlayerSnapshot {
    PlayerSnapshot {
        id: PlayerId::from(id),
        name: name.to_string(),
        team_id,
        squad_id,
        is_leader,
    }
}

pub fn squad(squad_id: u32, team_id: u32, leader: &str, locked: bool) -> SquadSnapshot {
    SquadSnapshot {
        squad_id,
        team_id,
        leader: PlayerId::from(leader),
        locked,
    }
}

pub fn chat(
    id: &str,
    name: &str,
    team_id: u32,
    squad_id: Option<u32>,
    message: &str,
) -> ChatEvent {
    ChatEvent {
        player: PlayerId::from(id),
        name: name.to_string(),
        message: message.to_string(),
        team_id,
        squad_id,
    }
}

/// Roster backed by fixed vectors; can be told to fail every call.
#[derive(Default)]
pub struct MockRoster {
    pub players: Vec<PlayerSnapshot>,
    pub squads: Vec<SquadSnapshot>,
    pub fail: bool,
}

#[async_trait]
impl RosterProvider for MockRoster {
    async fn list_players(&self) -> Result<Vec<PlayerSnapshot>, HostError> {
        if self.fail {
            return Err(HostError::Disconnected);
        }
        Ok(self.players.clone())
    }

    async fn list_squads(&self) -> Result<Vec<SquadSnapshot>, HostError> {
        if self.fail {
            return Err(HostError::Disconnected);
        }
        Ok(self.squads.clone())
    }
}

/// Warn sink that records every directed message.
#[derive(Default)]
pub struct RecordingWarns {
    pub sent: Mutex<Vec<(PlayerId, String)>>,
}

impl RecordingWarns {
    /// All messages sent to one player, in order.
    pub fn for_player(&self, id: &str) -> Vec<String> {
        let want = PlayerId::from(id);
        self.sent
            .lock()
            .iter()
            .filter(|(to, _)| *to == want)
            .map(|(_, text)| text.clone())
            .collect()
    }

    pub fn total(&self) -> usize {
        self.sent.lock().len()
    }
}

#[async_trait]
impl WarnSink for RecordingWarns {
    async fn warn(&self, player: &PlayerId, text: &str) -> Result<(), HostError> {
        self.sent.lock().push((player.clone(), text.to_string()));
        Ok(())
    }
}

/// Summary sink that records every published record.
#[derive(Default)]
pub struct RecordingSummaries {
    pub records: Mutex<Vec<SummaryRecord>>,
}

#[async_trait]
impl SummarySink for RecordingSummaries {
    async fn publish(&self, record: SummaryRecord) -> Result<(), HostError> {
        self.records.lock().push(record);
        Ok(())
    }
}

/// Summary sink that always fails.
#[derive(Default)]
pub struct FailingSummaries;

#[async_trait]
impl SummarySink for FailingSummaries {
    async fn publish(&self, _record: SummaryRecord) -> Result<(), HostError> {
        Err(HostError::Sink("delivery channel down".to_string()))
    }
}

/// A wired router plus handles to its recording collaborators.
pub struct Harness {
    pub router: CommandRouter,
    pub warns: Arc<RecordingWarns>,
    pub summaries: Arc<RecordingSummaries>,
}

pub fn harness(
    config: LfsConfig,
    players: Vec<PlayerSnapshot>,
    squads: Vec<SquadSnapshot>,
) -> Harness {
    harness_with_roster(
        config,
        MockRoster {
            players,
            squads,
            fail: false,
        },
    )
}

pub fn harness_with_roster(mut config: LfsConfig, roster: MockRoster) -> Harness {
    config.validate().expect("test config must validate");
    let warns = Arc::new(RecordingWarns::default());
    let summaries = Arc::new(RecordingSummaries::default());
    let router = CommandRouter::new(
        Arc::new(config),
        Arc::new(roster),
        Arc::clone(&warns) as Arc<dyn WarnSink>,
        Some(Arc::clone(&summaries) as Arc<dyn SummarySink>),
    );
    Harness {
        router,
        warns,
        summaries,
    }
}
