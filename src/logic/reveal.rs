//! Room-credential reveal policy.
//!
//! Credentials for a tournament's game room stay hidden from registered
//! players until a configurable number of minutes before the start time.
//! The policy is a pure function of the clock value it is handed; callers
//! re-evaluate it periodically (the UI does so every 30 seconds) to refresh
//! a displayed countdown.

use crate::models::Tournament;
use chrono::{DateTime, Duration, Utc};

/// Outcome of evaluating the reveal policy at one instant.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum RevealState {
    /// Neither room ID nor password has been set; there is nothing to reveal
    /// yet, independent of the clock.
    NotConfigured,
    /// Credentials exist but the reveal window has not opened.
    Concealed {
        reveal_at: DateTime<Utc>,
        remaining: Duration,
    },
    /// Credentials exist and should be shown.
    Revealed,
}

/// Decide whether room credentials are visible at `now`.
///
/// A missing `visibility_minutes` means no early window: credentials reveal
/// exactly at `start_date`. One credential present out of two still counts as
/// configured; the caller shows whichever exists once revealed. Once `now`
/// reaches the reveal instant the state is `Revealed` and never reverts.
pub fn evaluate_reveal(
    room_id: Option<&str>,
    room_password: Option<&str>,
    start_date: DateTime<Utc>,
    visibility_minutes: Option<u64>,
    now: DateTime<Utc>,
) -> RevealState {
    if room_id.is_none() && room_password.is_none() {
        return RevealState::NotConfigured;
    }
    // Windows too large for the datetime range saturate to an already-past
    // reveal instant (fail open), never wrap.
    let minutes = visibility_minutes.map_or(0, |m| i64::try_from(m).unwrap_or(i64::MAX));
    let window = Duration::try_minutes(minutes).unwrap_or(Duration::MAX);
    let reveal_at = start_date
        .checked_sub_signed(window)
        .unwrap_or(DateTime::<Utc>::MIN_UTC);
    if now >= reveal_at {
        RevealState::Revealed
    } else {
        RevealState::Concealed {
            reveal_at,
            remaining: reveal_at - now,
        }
    }
}

/// Reveal state for a tournament's room credentials at `now`.
pub fn tournament_reveal(t: &Tournament, now: DateTime<Utc>) -> RevealState {
    evaluate_reveal(
        t.room_id.as_deref(),
        t.room_password.as_deref(),
        t.start_date,
        t.room_visibility_minutes,
        now,
    )
}

/// Countdown string for a concealed room: `"2h 5m"` above an hour, `"15m"`
/// below. Minutes are rounded up so the countdown never shows `0m` while
/// credentials are still hidden.
pub fn format_remaining(remaining: Duration) -> String {
    let ms = remaining.num_milliseconds();
    let total_minutes = (ms.div_euclid(60_000) + i64::from(ms.rem_euclid(60_000) > 0)).max(0);
    let hours = total_minutes / 60;
    let minutes = total_minutes % 60;
    if hours > 0 {
        format!("{hours}h {minutes}m")
    } else {
        format!("{total_minutes}m")
    }
}
