//! Tournament business logic: roster checks, schedule generation, advancement, standings.

mod advancement;
mod controller;
mod knockout;
mod roster;
mod round_robin;
mod standings;

pub use advancement::{advance_knockout, round_complete, Advancement};
pub use controller::{TournamentController, TournamentSnapshot};
pub use knockout::{generate_knockout_bracket, BracketShape};
pub use roster::{parse_roster_csv, validate_registration, validate_start, MIN_PARTICIPANTS};
pub use round_robin::{league_rounds, schedule_round_robin};
pub use standings::{
    league_champion, league_complete, rank_participants, write_standings_csv, Standing,
    UNKNOWN_CHAMPION,
};
