//! Looking-for-squad notification router.
//!
//! A squad-less player types a chat command (`!lfs`, optionally with a squad
//! number) and this crate relays a "looking for squad" notice to the leaders
//! of candidate squads on the player's team, rate-limited per player. The
//! chat transport, the RCON connection, and any rich notification delivery
//! (e.g. Discord) stay on the host side, behind the traits in [`host`] and
//! [`sink`].
//!
//! ## Wiring
//!
//! ```ignore
//! let config = Arc::new(LfsConfig::load("lfs.toml")?);
//! let router = CommandRouter::new(config, rcon_roster, rcon_warn, Some(discord_sink));
//!
//! // From the host's chat event loop:
//! let outcome = router.handle_chat(&event).await;
//! ```

pub mod config;
pub mod dispatch;
pub mod host;
pub mod limiter;
pub mod replies;
pub mod roster;
pub mod router;
pub mod sink;
pub mod telemetry;

pub use config::{ConfigError, LfsConfig};
pub use dispatch::{DispatchResult, Dispatcher};
pub use host::{ChatEvent, HostError, RosterProvider, WarnSink};
pub use limiter::{Admission, TriggerLimiter};
pub use roster::{PlayerId, PlayerSnapshot, RawSquad, SquadSnapshot};
pub use router::{CommandRouter, Outcome};
pub use sink::{LogSummarySink, NoopSummarySink, SummaryRecord, SummarySink};
