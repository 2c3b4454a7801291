//! Roster snapshots and point-in-time queries.
//!
//! Everything here operates on snapshots the caller already fetched from the
//! host: pure slice scans, no IO, no caching. Roster state is authoritative
//! on the game server and mutates outside this crate's control, so snapshots
//! are re-fetched per command and never held across invocations.

use serde::Deserialize;
use std::fmt;

/// Opaque stable identifier for a connected player (platform-issued).
///
/// Equality is exact string match.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PlayerId(pub String);

impl PlayerId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PlayerId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// A connected player at snapshot time.
#[derive(Debug, Clone)]
pub struct PlayerSnapshot {
    pub id: PlayerId,
    /// Display name, as shown in chat.
    pub name: String,
    pub team_id: u32,
    /// `None` means the player is squad-less.
    pub squad_id: Option<u32>,
    pub is_leader: bool,
}

/// A squad at snapshot time. `squad_id` is unique within a team.
#[derive(Debug, Clone)]
pub struct SquadSnapshot {
    pub squad_id: u32,
    pub team_id: u32,
    /// Identity of the squad's creator/leader.
    pub leader: PlayerId,
    /// Locked squads do not accept open joins; only the leader can invite.
    pub locked: bool,
}

/// A squad as the host's RCON layer reports it, with the locked flag still a
/// string (`"True"`/`"False"`). The conversion happens once, here, so the
/// quirk never reaches the query logic.
#[derive(Debug, Clone, Deserialize)]
pub struct RawSquad {
    pub squad_id: u32,
    pub team_id: u32,
    pub leader: String,
    pub locked: String,
}

impl From<RawSquad> for SquadSnapshot {
    fn from(raw: RawSquad) -> Self {
        Self {
            squad_id: raw.squad_id,
            team_id: raw.team_id,
            leader: PlayerId(raw.leader),
            locked: raw.locked.eq_ignore_ascii_case("true"),
        }
    }
}

/// Find a player by identity.
pub fn find_player<'a>(
    players: &'a [PlayerSnapshot],
    id: &PlayerId,
) -> Option<&'a PlayerSnapshot> {
    players.iter().find(|p| &p.id == id)
}

/// Find one squad by id on a team, honoring the locked-only filter.
///
/// Squad ids are unique per team; if the roster ever reports duplicates the
/// first match wins.
pub fn find_squad_by_id(
    squads: &[SquadSnapshot],
    team_id: u32,
    squad_id: u32,
    locked_only: bool,
) -> Option<&SquadSnapshot> {
    squads
        .iter()
        .find(|s| s.team_id == team_id && s.squad_id == squad_id && (!locked_only || s.locked))
}

/// All squads on a team, optionally locked squads only.
///
/// Input order is preserved. Upstream roster order is not guaranteed stable
/// across calls, so no reordering happens here either.
pub fn find_squads(squads: &[SquadSnapshot], team_id: u32, locked_only: bool) -> Vec<&SquadSnapshot> {
    squads
        .iter()
        .filter(|s| s.team_id == team_id && (!locked_only || s.locked))
        .collect()
}

/// Resolve a squad's recorded leader to a connected player.
pub fn resolve_leader<'a>(
    players: &'a [PlayerSnapshot],
    squad: &SquadSnapshot,
) -> Option<&'a PlayerSnapshot> {
    find_player(players, &squad.leader)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn squad(squad_id: u32, team_id: u32, leader: &str, locked: bool) -> SquadSnapshot {
        SquadSnapshot {
            squad_id,
            team_id,
            leader: PlayerId::from(leader),
            locked,
        }
    }

    fn player(id: &str, team_id: u32, squad_id: Option<u32>, is_leader: bool) -> PlayerSnapshot {
        PlayerSnapshot {
            id: PlayerId::from(id),
            name: id.to_string(),
            team_id,
            squad_id,
            is_leader,
        }
    }

    #[test]
    fn raw_squad_converts_string_locked_flag() {
        let raw = RawSquad {
            squad_id: 3,
            team_id: 1,
            leader: "L1".to_string(),
            locked: "True".to_string(),
        };
        let snap = SquadSnapshot::from(raw);
        assert!(snap.locked);

        let raw = RawSquad {
            squad_id: 4,
            team_id: 1,
            leader: "L2".to_string(),
            locked: "False".to_string(),
        };
        assert!(!SquadSnapshot::from(raw).locked);
    }

    #[test]
    fn find_squad_by_id_honors_team_and_lock() {
        let squads = vec![
            squad(5, 1, "L1", true),
            squad(5, 2, "L2", true),
            squad(6, 1, "L3", false),
        ];

        let found = find_squad_by_id(&squads, 1, 5, true).unwrap();
        assert_eq!(found.leader, PlayerId::from("L1"));

        // Unlocked squad filtered out when locked_only is set.
        assert!(find_squad_by_id(&squads, 1, 6, true).is_none());
        assert!(find_squad_by_id(&squads, 1, 6, false).is_some());

        // Wrong team never matches.
        assert!(find_squad_by_id(&squads, 3, 5, false).is_none());
    }

    #[test]
    fn find_squad_by_id_first_match_wins_on_duplicates() {
        let squads = vec![squad(5, 1, "first", true), squad(5, 1, "second", true)];
        let found = find_squad_by_id(&squads, 1, 5, false).unwrap();
        assert_eq!(found.leader, PlayerId::from("first"));
    }

    #[test]
    fn find_squads_preserves_input_order() {
        let squads = vec![
            squad(9, 1, "L9", true),
            squad(2, 1, "L2", true),
            squad(7, 2, "L7", true),
            squad(4, 1, "L4", true),
        ];
        let ids: Vec<u32> = find_squads(&squads, 1, false).iter().map(|s| s.squad_id).collect();
        assert_eq!(ids, vec![9, 2, 4]);
    }

    #[test]
    fn locked_only_result_is_subset_of_unfiltered() {
        let squads = vec![
            squad(1, 1, "a", true),
            squad(2, 1, "b", false),
            squad(3, 1, "c", true),
            squad(4, 2, "d", false),
        ];
        let all: Vec<u32> = find_squads(&squads, 1, false).iter().map(|s| s.squad_id).collect();
        let locked: Vec<u32> = find_squads(&squads, 1, true).iter().map(|s| s.squad_id).collect();
        assert!(locked.iter().all(|id| all.contains(id)));
        assert_eq!(locked, vec![1, 3]);
    }

    #[test]
    fn resolve_leader_looks_up_by_identity() {
        let players = vec![player("L1", 1, Some(5), true), player("P", 1, None, false)];
        let s = squad(5, 1, "L1", true);
        assert_eq!(resolve_leader(&players, &s).unwrap().id, PlayerId::from("L1"));

        let gone = squad(6, 1, "disconnected", true);
        assert!(resolve_leader(&players, &gone).is_none());
    }
}
