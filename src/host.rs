//! Trait seams to the hosting game server.
//!
//! The router reaches the outside world only through these traits. On a real
//! deployment the host's RCON layer implements [`RosterProvider`] and
//! [`WarnSink`]; this crate never opens a connection itself. Every call is
//! expected to be bounded by a host-imposed timeout.

use crate::roster::{PlayerId, PlayerSnapshot, SquadSnapshot};
use async_trait::async_trait;
use thiserror::Error;

/// An inbound chat line as delivered by the host's chat transport.
#[derive(Debug, Clone)]
pub struct ChatEvent {
    /// Stable platform-issued identifier of the sender.
    pub player: PlayerId,
    /// Display name of the sender.
    pub name: String,
    /// Raw message text.
    pub message: String,
    pub team_id: u32,
    pub squad_id: Option<u32>,
}

/// Failures crossing the host boundary.
#[derive(Debug, Error)]
pub enum HostError {
    #[error("host call timed out")]
    Timeout,
    #[error("host connection lost")]
    Disconnected,
    #[error("rcon error: {0}")]
    Rcon(String),
    #[error("summary sink error: {0}")]
    Sink(String),
}

impl HostError {
    /// Static error code string for log labeling.
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Timeout => "timeout",
            Self::Disconnected => "disconnected",
            Self::Rcon(_) => "rcon_error",
            Self::Sink(_) => "sink_error",
        }
    }
}

/// Point-in-time roster access.
///
/// Snapshots are fetched fresh for every command invocation; the roster
/// mutates on the game server between calls and is never cached here.
#[async_trait]
pub trait RosterProvider: Send + Sync {
    /// All currently connected players.
    async fn list_players(&self) -> Result<Vec<PlayerSnapshot>, HostError>;

    /// All squads on both teams.
    async fn list_squads(&self) -> Result<Vec<SquadSnapshot>, HostError>;
}

/// Directed ephemeral text to one player, via the host's command channel.
#[async_trait]
pub trait WarnSink: Send + Sync {
    async fn warn(&self, player: &PlayerId, text: &str) -> Result<(), HostError>;
}
