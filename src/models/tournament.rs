//! Tournament records and their creation/update payloads.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Unique identifier for a tournament (positive integer, assigned sequentially).
pub type TournamentId = u64;

/// A competitive event open for registration. Owned by the registry; everything
/// downstream of the registry only reads it.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Tournament {
    pub id: TournamentId,
    pub name: String,
    pub description: String,
    pub game_type: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    /// Entry fee in whole currency units (0 = free to enter).
    pub entry_fee: u64,
    /// Total prize pool in whole currency units.
    pub prize_pool: u64,
    pub max_participants: u64,
    /// Game room ID, set by an admin once the room is created. `None` until then.
    pub room_id: Option<String>,
    /// Game room password. `None` until configured.
    pub room_password: Option<String>,
    /// How many minutes before `start_date` the room credentials become visible
    /// to registered players. `None` means no early window: credentials show
    /// exactly at `start_date` once configured.
    pub room_visibility_minutes: Option<u64>,
}

/// Payload for creating a tournament.
#[derive(Clone, Debug, Deserialize)]
pub struct NewTournament {
    pub name: String,
    pub description: String,
    pub game_type: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    #[serde(default)]
    pub entry_fee: u64,
    #[serde(default)]
    pub prize_pool: u64,
    pub max_participants: u64,
    #[serde(default)]
    pub room_id: Option<String>,
    #[serde(default)]
    pub room_password: Option<String>,
    #[serde(default)]
    pub room_visibility_minutes: Option<u64>,
}

/// Partial update of a tournament: `None` fields are left unchanged.
/// Room credentials can only be cleared through the dedicated room-credentials
/// operation, not through a partial update.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct TournamentUpdate {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub game_type: Option<String>,
    #[serde(default)]
    pub start_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub end_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub entry_fee: Option<u64>,
    #[serde(default)]
    pub prize_pool: Option<u64>,
    #[serde(default)]
    pub max_participants: Option<u64>,
    #[serde(default)]
    pub room_id: Option<String>,
    #[serde(default)]
    pub room_password: Option<String>,
    #[serde(default)]
    pub room_visibility_minutes: Option<u64>,
}

/// One row of an uploaded results sheet (final standings for a tournament).
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct ResultEntry {
    pub rank: u32,
    pub player: String,
    pub kills: u32,
    /// Prize awarded for this placement, in whole currency units.
    pub prize: u64,
}
