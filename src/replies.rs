//! User-facing reply text.
//!
//! Every string a player can see is composed here, so the router, the
//! dispatcher, and the tests agree on wording.

/// Notice sent to each candidate squad leader.
pub fn leader_notice(requester_name: &str) -> String {
    format!("{requester_name} is looking for a squad. Please consider inviting the player.")
}

/// Usage reply for a malformed squad argument.
pub fn usage(trigger: &str) -> String {
    format!("Invalid squad ID. Usage: {trigger} <squad number>")
}

/// Rate-limit denial, with the remaining wait.
pub fn rate_limited(retry_after_secs: u32) -> String {
    format!("You must wait {retry_after_secs} seconds before using the command again.")
}

/// Invoker is unresolvable or already in a squad.
pub fn must_be_squadless() -> &'static str {
    "You must not be in a squad to use this command."
}

/// Requested squad absent on the invoker's team (or filtered by lock state).
/// Deliberately does not distinguish "wrong team" from "does not exist".
pub fn squad_not_found(squad_id: u32) -> String {
    format!("Squad {squad_id} could not be found or is not on your team.")
}

/// Confirmation for the targeted form.
pub fn sent_to_leader(squad_id: u32) -> String {
    format!("Your request has been sent to the squad leader of squad {squad_id}.")
}

/// Confirmation for the broadcast form.
pub fn sent_to_team_leaders() -> &'static str {
    "Your request has been sent to the squad leaders of your team."
}

/// No candidate squads at all; wording depends on the lock filter.
pub fn no_leaders(locked_only: bool) -> &'static str {
    if locked_only {
        "There are no locked squad leaders in your team."
    } else {
        "There are no squad leaders in your team."
    }
}

/// A matched squad whose recorded leader is not connected.
pub fn squad_has_no_leader(squad_id: u32) -> String {
    format!("Squad {squad_id} has no leader.")
}

/// Generic reply when a host call fails mid-command.
pub fn transient_failure() -> &'static str {
    "An error occurred. Please try again later."
}
