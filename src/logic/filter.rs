//! Tournament list filtering: free-text search, prize-pool bounds, and
//! entry-fee brackets.

use crate::models::Tournament;
use serde::{Deserialize, Serialize};

/// Named entry-fee ranges used as discrete filter facets.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub enum FeeBracket {
    /// `entry_fee == 0`
    #[serde(rename = "free")]
    Free,
    /// `0 < entry_fee <= 50`
    #[serde(rename = "0-50")]
    UpTo50,
    /// `50 < entry_fee <= 100`
    #[serde(rename = "50-100")]
    UpTo100,
    /// `entry_fee > 100`
    #[serde(rename = "100+")]
    Over100,
}

impl FeeBracket {
    /// Parse the facet tag used in query strings and stored filters.
    pub fn parse(tag: &str) -> Option<Self> {
        match tag {
            "free" => Some(FeeBracket::Free),
            "0-50" => Some(FeeBracket::UpTo50),
            "50-100" => Some(FeeBracket::UpTo100),
            "100+" => Some(FeeBracket::Over100),
            _ => None,
        }
    }

    pub fn contains(self, entry_fee: u64) -> bool {
        match self {
            FeeBracket::Free => entry_fee == 0,
            FeeBracket::UpTo50 => entry_fee > 0 && entry_fee <= 50,
            FeeBracket::UpTo100 => entry_fee > 50 && entry_fee <= 100,
            FeeBracket::Over100 => entry_fee > 100,
        }
    }
}

/// Active filter criteria. Defaults impose no constraint at all.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct FilterSpec {
    /// Case-insensitive substring matched against name, game type,
    /// description, and the decimal form of the id. Empty = no search.
    #[serde(default)]
    pub search_query: String,
    /// Inclusive lower bound on the prize pool.
    #[serde(default)]
    pub prize_min: Option<u64>,
    /// Inclusive upper bound on the prize pool.
    #[serde(default)]
    pub prize_max: Option<u64>,
    /// Selected fee brackets; a tournament passes when it matches any of
    /// them. Empty = no fee filter.
    #[serde(default)]
    pub fee_brackets: Vec<FeeBracket>,
}

impl FilterSpec {
    /// True when no criterion is active (filtering is the identity).
    pub fn is_empty(&self) -> bool {
        self.search_query.is_empty()
            && self.prize_min.is_none()
            && self.prize_max.is_none()
            && self.fee_brackets.is_empty()
    }

    /// A tournament is included iff every active criterion group matches.
    pub fn matches(&self, t: &Tournament) -> bool {
        if !self.search_query.is_empty() {
            let query = self.search_query.to_lowercase();
            let matches_search = t.name.to_lowercase().contains(&query)
                || t.game_type.to_lowercase().contains(&query)
                || t.description.to_lowercase().contains(&query)
                || t.id.to_string().contains(&query);
            if !matches_search {
                return false;
            }
        }
        if let Some(min) = self.prize_min {
            if t.prize_pool < min {
                return false;
            }
        }
        if let Some(max) = self.prize_max {
            if t.prize_pool > max {
                return false;
            }
        }
        if !self.fee_brackets.is_empty()
            && !self.fee_brackets.iter().any(|b| b.contains(t.entry_fee))
        {
            return false;
        }
        true
    }
}

/// Stable filter: the surviving tournaments keep their relative order and the
/// input is left untouched.
pub fn filter_tournaments(tournaments: &[Tournament], spec: &FilterSpec) -> Vec<Tournament> {
    tournaments
        .iter()
        .filter(|t| spec.matches(t))
        .cloned()
        .collect()
}
