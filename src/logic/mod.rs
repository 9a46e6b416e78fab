//! Business logic: reveal policy, tournament filtering, results parsing.

mod filter;
mod results;
mod reveal;

pub use filter::{filter_tournaments, FeeBracket, FilterSpec};
pub use results::parse_results_sheet;
pub use reveal::{evaluate_reveal, format_remaining, tournament_reveal, RevealState};
