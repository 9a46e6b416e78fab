//! Results sheet parsing: the `rank,player,kills,prize` CSV an admin uploads
//! after a tournament finishes.

use crate::models::{KhelbaError, ResultEntry};

/// Parse and validate an uploaded results sheet.
///
/// The sheet must have a header row (`rank,player,kills,prize`), at least one
/// data row, contiguous ranks starting at 1, and non-empty player names.
/// Fields are trimmed, so hand-edited sheets with stray spaces still parse.
pub fn parse_results_sheet(sheet: &str) -> Result<Vec<ResultEntry>, KhelbaError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(sheet.as_bytes());

    let mut entries = Vec::new();
    for record in reader.deserialize::<ResultEntry>() {
        let entry = record.map_err(|e| KhelbaError::InvalidResults(e.to_string()))?;
        entries.push(entry);
    }
    if entries.is_empty() {
        return Err(KhelbaError::InvalidResults("sheet has no rows".to_string()));
    }
    for (i, entry) in entries.iter().enumerate() {
        let expected = (i + 1) as u32;
        if entry.rank != expected {
            return Err(KhelbaError::InvalidResults(format!(
                "row {} has rank {}, expected {}",
                i + 1,
                entry.rank,
                expected
            )));
        }
        if entry.player.is_empty() {
            return Err(KhelbaError::InvalidResults(format!(
                "row {} has an empty player name",
                i + 1
            )));
        }
    }
    Ok(entries)
}
