//! Tournament Khelba: registration platform with models and business logic.

pub mod logic;
pub mod models;

pub use logic::{
    evaluate_reveal, filter_tournaments, format_remaining, parse_results_sheet, tournament_reveal,
    FeeBracket, FilterSpec, RevealState,
};
pub use models::{
    KhelbaError, NewTournament, Payment, PaymentId, PaymentStatus, Registry, ResultEntry,
    Tournament, TournamentId, TournamentUpdate, UserPreferences, UserProfile,
};
