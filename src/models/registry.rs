//! In-memory registry: the full platform state (tournaments, payments,
//! results, admin roster) behind a single aggregate with validated mutations.

use crate::models::payment::{Payment, PaymentId, PaymentStatus};
use crate::models::profile::UserProfile;
use crate::models::tournament::{
    NewTournament, ResultEntry, Tournament, TournamentId, TournamentUpdate,
};
use chrono::{DateTime, Utc};
use std::collections::{BTreeMap, HashMap};
use uuid::Uuid;

/// Errors that can occur during registry operations.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum KhelbaError {
    /// No tournament with this id.
    TournamentNotFound(TournamentId),
    /// No payment with this id.
    PaymentNotFound(PaymentId),
    /// A required name (tournament, player, principal) is empty.
    EmptyName,
    /// Start date is after end date.
    InvalidSchedule,
    /// Room visibility window outside the accepted 1-120 minute range.
    InvalidVisibilityWindow(u64),
    /// Max participants must be at least 1.
    InvalidCapacity,
    /// Player already has an active (non-rejected) entry for this tournament.
    DuplicateRegistration,
    /// Tournament has reached its participant limit.
    TournamentFull,
    /// Payment has already been reviewed.
    PaymentNotPending(PaymentId),
    /// No profile stored for this principal.
    ProfileNotFound,
    /// Principal is already on the admin roster.
    DuplicateAdmin,
    /// Principal is not on the admin roster.
    AdminNotFound,
    /// Removing this admin would leave the roster empty.
    LastAdmin,
    /// Results sheet failed to parse or validate.
    InvalidResults(String),
}

impl std::fmt::Display for KhelbaError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            KhelbaError::TournamentNotFound(id) => write!(f, "Tournament {} not found", id),
            KhelbaError::PaymentNotFound(id) => write!(f, "Payment {} not found", id),
            KhelbaError::EmptyName => write!(f, "Name must not be empty"),
            KhelbaError::InvalidSchedule => write!(f, "Start date must not be after end date"),
            KhelbaError::InvalidVisibilityWindow(m) => {
                write!(f, "Room visibility window must be 1-120 minutes (got {})", m)
            }
            KhelbaError::InvalidCapacity => write!(f, "Max participants must be at least 1"),
            KhelbaError::DuplicateRegistration => {
                write!(f, "Player already has an active entry for this tournament")
            }
            KhelbaError::TournamentFull => {
                write!(f, "Tournament has reached its participant limit")
            }
            KhelbaError::PaymentNotPending(id) => {
                write!(f, "Payment {} has already been reviewed", id)
            }
            KhelbaError::ProfileNotFound => write!(f, "No profile for this principal"),
            KhelbaError::DuplicateAdmin => write!(f, "Principal is already an admin"),
            KhelbaError::AdminNotFound => write!(f, "Principal is not an admin"),
            KhelbaError::LastAdmin => write!(f, "Cannot remove the last admin"),
            KhelbaError::InvalidResults(msg) => write!(f, "Invalid results sheet: {}", msg),
        }
    }
}

/// The admin form accepts 1-120 minutes; enforced at data entry only, the
/// reveal evaluation itself puts no bound on the stored value.
fn check_visibility_window(minutes: u64) -> Result<(), KhelbaError> {
    if (1..=120).contains(&minutes) {
        Ok(())
    } else {
        Err(KhelbaError::InvalidVisibilityWindow(minutes))
    }
}

/// Platform state. `BTreeMap` keys keep listings ordered by ascending id.
#[derive(Clone, Debug)]
pub struct Registry {
    tournaments: BTreeMap<TournamentId, Tournament>,
    payments: BTreeMap<PaymentId, Payment>,
    results: HashMap<TournamentId, Vec<ResultEntry>>,
    profiles: HashMap<String, UserProfile>,
    admins: Vec<String>,
    next_tournament_id: TournamentId,
    next_payment_id: PaymentId,
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl Registry {
    /// Empty registry; ids start at 1.
    pub fn new() -> Self {
        Self {
            tournaments: BTreeMap::new(),
            payments: BTreeMap::new(),
            results: HashMap::new(),
            profiles: HashMap::new(),
            admins: Vec::new(),
            next_tournament_id: 1,
            next_payment_id: 1,
        }
    }

    // --- Tournaments ---

    /// Create a tournament and return its id. Validates name, schedule,
    /// capacity, and the visibility window when one is given.
    pub fn create_tournament(&mut self, new: NewTournament) -> Result<TournamentId, KhelbaError> {
        let name = new.name.trim().to_string();
        if name.is_empty() {
            return Err(KhelbaError::EmptyName);
        }
        if new.start_date > new.end_date {
            return Err(KhelbaError::InvalidSchedule);
        }
        if new.max_participants == 0 {
            return Err(KhelbaError::InvalidCapacity);
        }
        if let Some(m) = new.room_visibility_minutes {
            check_visibility_window(m)?;
        }
        let id = self.next_tournament_id;
        self.next_tournament_id += 1;
        self.tournaments.insert(
            id,
            Tournament {
                id,
                name,
                description: new.description,
                game_type: new.game_type,
                start_date: new.start_date,
                end_date: new.end_date,
                entry_fee: new.entry_fee,
                prize_pool: new.prize_pool,
                max_participants: new.max_participants,
                room_id: new.room_id,
                room_password: new.room_password,
                room_visibility_minutes: new.room_visibility_minutes,
            },
        );
        Ok(id)
    }

    pub fn get_tournament(&self, id: TournamentId) -> Option<&Tournament> {
        self.tournaments.get(&id)
    }

    /// All tournaments, ordered by ascending id.
    pub fn list_tournaments(&self) -> Vec<Tournament> {
        self.tournaments.values().cloned().collect()
    }

    /// Apply a partial update. The resulting schedule must still satisfy
    /// `start_date <= end_date`; nothing is changed when validation fails.
    pub fn update_tournament(
        &mut self,
        id: TournamentId,
        update: TournamentUpdate,
    ) -> Result<(), KhelbaError> {
        let t = self
            .tournaments
            .get_mut(&id)
            .ok_or(KhelbaError::TournamentNotFound(id))?;
        let start_date = update.start_date.unwrap_or(t.start_date);
        let end_date = update.end_date.unwrap_or(t.end_date);
        if start_date > end_date {
            return Err(KhelbaError::InvalidSchedule);
        }
        if let Some(name) = &update.name {
            if name.trim().is_empty() {
                return Err(KhelbaError::EmptyName);
            }
        }
        if update.max_participants == Some(0) {
            return Err(KhelbaError::InvalidCapacity);
        }
        if let Some(m) = update.room_visibility_minutes {
            check_visibility_window(m)?;
        }

        if let Some(name) = update.name {
            t.name = name.trim().to_string();
        }
        if let Some(description) = update.description {
            t.description = description;
        }
        if let Some(game_type) = update.game_type {
            t.game_type = game_type;
        }
        t.start_date = start_date;
        t.end_date = end_date;
        if let Some(fee) = update.entry_fee {
            t.entry_fee = fee;
        }
        if let Some(pool) = update.prize_pool {
            t.prize_pool = pool;
        }
        if let Some(cap) = update.max_participants {
            t.max_participants = cap;
        }
        if let Some(room_id) = update.room_id {
            t.room_id = Some(room_id);
        }
        if let Some(room_password) = update.room_password {
            t.room_password = Some(room_password);
        }
        if let Some(m) = update.room_visibility_minutes {
            t.room_visibility_minutes = Some(m);
        }
        Ok(())
    }

    /// Delete a tournament along with its payments and results.
    pub fn delete_tournament(&mut self, id: TournamentId) -> Result<(), KhelbaError> {
        if self.tournaments.remove(&id).is_none() {
            return Err(KhelbaError::TournamentNotFound(id));
        }
        self.payments.retain(|_, p| p.tournament_id != id);
        self.results.remove(&id);
        Ok(())
    }

    /// Replace the room credentials wholesale: passing `None` clears a field.
    /// The visibility window, when given, must be within 1-120 minutes.
    pub fn set_room_credentials(
        &mut self,
        id: TournamentId,
        room_id: Option<String>,
        room_password: Option<String>,
        visibility_minutes: Option<u64>,
    ) -> Result<(), KhelbaError> {
        if let Some(m) = visibility_minutes {
            check_visibility_window(m)?;
        }
        let t = self
            .tournaments
            .get_mut(&id)
            .ok_or(KhelbaError::TournamentNotFound(id))?;
        t.room_id = room_id;
        t.room_password = room_password;
        t.room_visibility_minutes = visibility_minutes;
        Ok(())
    }

    // --- Payments ---

    /// Submit an entry payment for a tournament. One active (pending or
    /// approved) entry per player per tournament; capacity counts active
    /// entries so a full tournament stops taking submissions.
    pub fn submit_payment(
        &mut self,
        tournament_id: TournamentId,
        player: &str,
        now: DateTime<Utc>,
    ) -> Result<PaymentId, KhelbaError> {
        let player = player.trim();
        if player.is_empty() {
            return Err(KhelbaError::EmptyName);
        }
        let capacity = self
            .tournaments
            .get(&tournament_id)
            .map(|t| t.max_participants)
            .ok_or(KhelbaError::TournamentNotFound(tournament_id))?;

        let mut active = 0u64;
        for p in self.payments.values() {
            if p.tournament_id != tournament_id || p.status == PaymentStatus::Rejected {
                continue;
            }
            if p.player == player {
                return Err(KhelbaError::DuplicateRegistration);
            }
            active += 1;
        }
        if active >= capacity {
            return Err(KhelbaError::TournamentFull);
        }

        let id = self.next_payment_id;
        self.next_payment_id += 1;
        self.payments.insert(
            id,
            Payment {
                id,
                tournament_id,
                player: player.to_string(),
                reference: Uuid::new_v4(),
                status: PaymentStatus::Pending,
                submitted_at: now,
            },
        );
        Ok(id)
    }

    pub fn get_payment(&self, id: PaymentId) -> Option<&Payment> {
        self.payments.get(&id)
    }

    /// Approve a pending payment, registering the player.
    pub fn approve_payment(&mut self, id: PaymentId) -> Result<(), KhelbaError> {
        let p = self
            .payments
            .get_mut(&id)
            .ok_or(KhelbaError::PaymentNotFound(id))?;
        if p.status != PaymentStatus::Pending {
            return Err(KhelbaError::PaymentNotPending(id));
        }
        p.status = PaymentStatus::Approved;
        Ok(())
    }

    /// Reject a pending payment; the player may then submit a fresh entry.
    pub fn reject_payment(&mut self, id: PaymentId) -> Result<(), KhelbaError> {
        let p = self
            .payments
            .get_mut(&id)
            .ok_or(KhelbaError::PaymentNotFound(id))?;
        if p.status != PaymentStatus::Pending {
            return Err(KhelbaError::PaymentNotPending(id));
        }
        p.status = PaymentStatus::Rejected;
        Ok(())
    }

    /// Payments for one tournament, ordered by ascending payment id.
    pub fn payments_by_tournament(&self, tournament_id: TournamentId) -> Vec<Payment> {
        self.payments
            .values()
            .filter(|p| p.tournament_id == tournament_id)
            .cloned()
            .collect()
    }

    /// All payments still awaiting review, ordered by ascending payment id.
    pub fn pending_payments(&self) -> Vec<Payment> {
        self.payments
            .values()
            .filter(|p| p.status == PaymentStatus::Pending)
            .cloned()
            .collect()
    }

    /// A player is registered once their entry payment has been approved.
    pub fn is_registered(&self, tournament_id: TournamentId, player: &str) -> bool {
        self.payments.values().any(|p| {
            p.tournament_id == tournament_id
                && p.player == player
                && p.status == PaymentStatus::Approved
        })
    }

    // --- Results ---

    /// Store the final standings for a tournament, replacing any previous
    /// upload. Parsing/validation of the sheet happens before this call.
    pub fn upload_results(
        &mut self,
        tournament_id: TournamentId,
        entries: Vec<ResultEntry>,
    ) -> Result<(), KhelbaError> {
        if !self.tournaments.contains_key(&tournament_id) {
            return Err(KhelbaError::TournamentNotFound(tournament_id));
        }
        self.results.insert(tournament_id, entries);
        Ok(())
    }

    /// Uploaded standings, `None` if no sheet has been uploaded yet.
    pub fn results(&self, tournament_id: TournamentId) -> Option<&[ResultEntry]> {
        self.results.get(&tournament_id).map(Vec::as_slice)
    }

    // --- Profiles ---

    /// Create or replace the profile stored for a principal. The display
    /// name is the one mandatory field, as in the profile form.
    pub fn save_profile(
        &mut self,
        principal: &str,
        mut profile: UserProfile,
    ) -> Result<(), KhelbaError> {
        let principal = principal.trim();
        if principal.is_empty() {
            return Err(KhelbaError::EmptyName);
        }
        let display_name = profile.display_name.trim().to_string();
        if display_name.is_empty() {
            return Err(KhelbaError::EmptyName);
        }
        profile.display_name = display_name;
        self.profiles.insert(principal.to_string(), profile);
        Ok(())
    }

    pub fn get_profile(&self, principal: &str) -> Option<&UserProfile> {
        self.profiles.get(principal)
    }

    pub fn delete_profile(&mut self, principal: &str) -> Result<(), KhelbaError> {
        self.profiles
            .remove(principal)
            .map(|_| ())
            .ok_or(KhelbaError::ProfileNotFound)
    }

    // --- Admin roster ---

    pub fn add_admin(&mut self, principal: &str) -> Result<(), KhelbaError> {
        let principal = principal.trim();
        if principal.is_empty() {
            return Err(KhelbaError::EmptyName);
        }
        if self.admins.iter().any(|a| a == principal) {
            return Err(KhelbaError::DuplicateAdmin);
        }
        self.admins.push(principal.to_string());
        Ok(())
    }

    /// Remove an admin. The roster can never be emptied this way.
    pub fn remove_admin(&mut self, principal: &str) -> Result<(), KhelbaError> {
        let idx = self
            .admins
            .iter()
            .position(|a| a == principal)
            .ok_or(KhelbaError::AdminNotFound)?;
        if self.admins.len() == 1 {
            return Err(KhelbaError::LastAdmin);
        }
        self.admins.remove(idx);
        Ok(())
    }

    pub fn is_admin(&self, principal: &str) -> bool {
        self.admins.iter().any(|a| a == principal)
    }

    pub fn admins(&self) -> &[String] {
        &self.admins
    }
}
