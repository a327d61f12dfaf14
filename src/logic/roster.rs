//! Roster checks: registration names, minimum roster size, CSV import.

use crate::error::ValidationError;
use crate::models::Participant;
use std::io::Read;

/// Fewest participants either format can schedule.
pub const MIN_PARTICIPANTS: usize = 2;

/// Check a proposed name against the current roster. Returns the trimmed name to store.
pub fn validate_registration(existing: &[Participant], name: &str) -> Result<String, ValidationError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyName);
    }
    if existing.iter().any(|p| p.has_name(trimmed)) {
        return Err(ValidationError::DuplicateName(trimmed.to_string()));
    }
    Ok(trimmed.to_string())
}

/// Scheduling needs at least [`MIN_PARTICIPANTS`].
pub fn validate_start(participants: &[Participant]) -> Result<(), ValidationError> {
    if participants.len() < MIN_PARTICIPANTS {
        return Err(ValidationError::NotEnoughParticipants {
            required: MIN_PARTICIPANTS,
            registered: participants.len(),
        });
    }
    Ok(())
}

/// Read participant names from CSV: first column of each row, blank rows skipped,
/// an optional leading `name` header ignored. Names are returned trimmed but not
/// yet checked against the roster.
pub fn parse_roster_csv<R: Read>(reader: R) -> Result<Vec<String>, ValidationError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut names = Vec::new();
    for (idx, record) in csv_reader.records().enumerate() {
        let row = idx + 1;
        let record = record.map_err(|e| ValidationError::MalformedRoster {
            row,
            reason: e.to_string(),
        })?;
        let name = record.get(0).unwrap_or("").trim();
        if name.is_empty() {
            continue;
        }
        if row == 1 && name.eq_ignore_ascii_case("name") {
            continue;
        }
        names.push(name.to_string());
    }
    Ok(names)
}
