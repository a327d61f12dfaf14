//! League standings and completion.

use crate::models::{Fixture, Participant, ParticipantId};
use serde::Serialize;
use std::io::Write;

/// Reported as champion when there is nobody to rank.
pub const UNKNOWN_CHAMPION: &str = "Unknown";

/// One row of the standings table.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct Standing {
    /// 1-based position in the table.
    pub rank: usize,
    pub participant_id: ParticipantId,
    pub name: String,
    pub wins: u32,
    pub losses: u32,
}

/// Rank by wins, most first. Equal wins keep the order given (registration order).
pub fn rank_participants(participants: &[Participant]) -> Vec<Standing> {
    let mut ordered: Vec<&Participant> = participants.iter().collect();
    ordered.sort_by(|a, b| b.wins.cmp(&a.wins));
    ordered
        .into_iter()
        .enumerate()
        .map(|(idx, p)| Standing {
            rank: idx + 1,
            participant_id: p.id,
            name: p.name.clone(),
            wins: p.wins,
            losses: p.losses,
        })
        .collect()
}

/// All real fixtures are decided. Bye fixtures never wait on anyone.
pub fn league_complete(fixtures: &[Fixture]) -> bool {
    fixtures.iter().all(|f| f.is_completed() || f.is_bye())
}

/// Name of the top-ranked participant, or [`UNKNOWN_CHAMPION`].
pub fn league_champion(participants: &[Participant]) -> String {
    rank_participants(participants)
        .into_iter()
        .next()
        .map(|s| s.name)
        .unwrap_or_else(|| UNKNOWN_CHAMPION.to_string())
}

/// Write standings as CSV with a `rank,name,wins,losses` header.
pub fn write_standings_csv<W: Write>(standings: &[Standing], writer: W) -> Result<(), csv::Error> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(["rank", "name", "wins", "losses"])?;
    for s in standings {
        csv_writer.write_record([
            s.rank.to_string(),
            s.name.clone(),
            s.wins.to_string(),
            s.losses.to_string(),
        ])?;
    }
    csv_writer.flush()?;
    Ok(())
}
