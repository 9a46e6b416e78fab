//! Entry payments: a player's registration for a tournament.

use crate::models::tournament::TournamentId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a payment (positive integer, assigned sequentially).
pub type PaymentId = u64;

/// Review state of an entry payment.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    /// Submitted, awaiting admin review.
    #[default]
    Pending,
    /// Approved; the player is registered for the tournament.
    Approved,
    /// Rejected; the player may submit a new entry.
    Rejected,
}

/// A player's entry payment for one tournament.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Payment {
    pub id: PaymentId,
    pub tournament_id: TournamentId,
    /// Opaque player principal (string form).
    pub player: String,
    /// Reference code handed to the player for support lookups.
    pub reference: Uuid,
    pub status: PaymentStatus,
    pub submitted_at: DateTime<Utc>,
}
