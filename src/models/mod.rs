//! Data structures for the Khelba platform: tournaments, payments, registry.

mod payment;
mod profile;
mod registry;
mod tournament;

pub use payment::{Payment, PaymentId, PaymentStatus};
pub use profile::{UserPreferences, UserProfile};
pub use registry::{KhelbaError, Registry};
pub use tournament::{NewTournament, ResultEntry, Tournament, TournamentId, TournamentUpdate};
