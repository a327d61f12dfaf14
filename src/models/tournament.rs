//! TournamentState: phase, format and champion.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique identifier for a tournament (web layer keys tournaments by it).
pub type TournamentId = Uuid;

/// Current phase of the tournament.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TournamentPhase {
    /// Registering participants and choosing the format; not started.
    #[default]
    Setup,
    /// Fixtures generated; results being reported.
    Active,
    /// Champion decided.
    Completed,
}

impl fmt::Display for TournamentPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TournamentPhase::Setup => write!(f, "setup"),
            TournamentPhase::Active => write!(f, "active"),
            TournamentPhase::Completed => write!(f, "completed"),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TournamentFormat {
    /// Single elimination, with byes for non-power-of-two rosters.
    #[default]
    Knockout,
    /// Round robin: everyone plays everyone once.
    League,
}

/// Tournament-level status. A store with nothing saved yields the default
/// (setup, knockout, no champion).
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct TournamentState {
    pub phase: TournamentPhase,
    pub format: TournamentFormat,
    /// Champion's display name once the tournament completes.
    pub champion: Option<String>,
}

impl TournamentState {
    pub fn new(format: TournamentFormat) -> Self {
        Self {
            format,
            ..Self::default()
        }
    }
}
