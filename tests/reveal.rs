//! Integration tests for the room-credential reveal policy.

use chrono::{DateTime, Duration, TimeZone, Utc};
use tournament_khelba::{
    evaluate_reveal, format_remaining, tournament_reveal, RevealState, Tournament,
};

/// 2025-01-10 at the given hour/minute, UTC.
fn at(hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 1, 10, hour, minute, 0).unwrap()
}

#[test]
fn unconfigured_room_is_not_configured_regardless_of_time() {
    let start = at(12, 0);
    for now in [at(0, 0), at(11, 45), at(12, 0), at(23, 59)] {
        assert_eq!(
            evaluate_reveal(None, None, start, Some(15), now),
            RevealState::NotConfigured
        );
        assert_eq!(
            evaluate_reveal(None, None, start, None, now),
            RevealState::NotConfigured
        );
    }
}

#[test]
fn reveals_exactly_at_start_without_window() {
    let start = at(12, 0);
    assert_eq!(
        evaluate_reveal(Some("R1"), Some("P1"), start, None, at(11, 59)),
        RevealState::Concealed {
            reveal_at: start,
            remaining: Duration::minutes(1),
        }
    );
    assert_eq!(
        evaluate_reveal(Some("R1"), Some("P1"), start, None, at(12, 0)),
        RevealState::Revealed
    );
    assert_eq!(
        evaluate_reveal(Some("R1"), Some("P1"), start, None, at(12, 1)),
        RevealState::Revealed
    );
}

#[test]
fn zero_window_behaves_like_missing_window() {
    let start = at(12, 0);
    for now in [at(11, 0), at(11, 59), at(12, 0), at(13, 0)] {
        assert_eq!(
            evaluate_reveal(Some("R1"), Some("P1"), start, Some(0), now),
            evaluate_reveal(Some("R1"), Some("P1"), start, None, now)
        );
    }
}

#[test]
fn window_moves_reveal_earlier() {
    let start = at(12, 0);

    // 15-minute window: reveal opens at 11:45.
    match evaluate_reveal(Some("R1"), Some("P1"), start, Some(15), at(11, 44)) {
        RevealState::Concealed {
            reveal_at,
            remaining,
        } => {
            assert_eq!(reveal_at, at(11, 45));
            assert_eq!(remaining.num_milliseconds(), 60_000);
        }
        other => panic!("expected Concealed, got {:?}", other),
    }
    assert_eq!(
        evaluate_reveal(Some("R1"), Some("P1"), start, Some(15), at(11, 45)),
        RevealState::Revealed
    );
    match evaluate_reveal(Some("R1"), Some("P1"), start, Some(15), at(11, 30)) {
        RevealState::Concealed { remaining, .. } => {
            assert_eq!(remaining.num_milliseconds(), 900_000);
        }
        other => panic!("expected Concealed, got {:?}", other),
    }
}

#[test]
fn oversized_window_fails_open_to_revealed() {
    let start = at(12, 0);
    // ~19 years before start: representable, long in the past.
    assert_eq!(
        evaluate_reveal(Some("R1"), Some("P1"), start, Some(10_000_000), at(0, 0)),
        RevealState::Revealed
    );
    // Beyond the datetime range entirely: must clamp, not wrap into a
    // far-future reveal.
    assert_eq!(
        evaluate_reveal(Some("R1"), Some("P1"), start, Some(u64::MAX), at(0, 0)),
        RevealState::Revealed
    );
    assert_eq!(
        evaluate_reveal(Some("R1"), Some("P1"), start, Some(i64::MAX as u64), at(0, 0)),
        RevealState::Revealed
    );
}

#[test]
fn single_credential_counts_as_configured() {
    let start = at(12, 0);
    assert_eq!(
        evaluate_reveal(Some("R1"), None, start, None, at(12, 0)),
        RevealState::Revealed
    );
    assert_eq!(
        evaluate_reveal(None, Some("P1"), start, None, at(12, 0)),
        RevealState::Revealed
    );
    assert!(matches!(
        evaluate_reveal(Some("R1"), None, start, None, at(11, 0)),
        RevealState::Concealed { .. }
    ));
}

#[test]
fn revealed_is_terminal() {
    let start = at(12, 0);
    let mut seen_revealed = false;
    for minute_offset in 0..120 {
        let now = at(11, 0) + Duration::minutes(minute_offset);
        let state = evaluate_reveal(Some("R1"), Some("P1"), start, Some(30), now);
        if seen_revealed {
            assert_eq!(state, RevealState::Revealed, "reverted at {}", now);
        } else if state == RevealState::Revealed {
            seen_revealed = true;
        }
    }
    assert!(seen_revealed);
}

#[test]
fn tournament_reveal_reads_record_fields() {
    let t = Tournament {
        id: 1,
        name: "Solo Cup".to_string(),
        description: "Daily showdown".to_string(),
        game_type: "Solo".to_string(),
        start_date: at(12, 0),
        end_date: at(18, 0),
        entry_fee: 0,
        prize_pool: 500,
        max_participants: 100,
        room_id: Some("R1".to_string()),
        room_password: Some("P1".to_string()),
        room_visibility_minutes: Some(15),
    };
    assert_eq!(tournament_reveal(&t, at(11, 45)), RevealState::Revealed);
    assert!(matches!(
        tournament_reveal(&t, at(11, 44)),
        RevealState::Concealed { .. }
    ));
}

#[test]
fn countdown_formats_hours_and_minutes() {
    assert_eq!(format_remaining(Duration::minutes(15)), "15m");
    assert_eq!(format_remaining(Duration::minutes(125)), "2h 5m");
    assert_eq!(format_remaining(Duration::minutes(60)), "1h 0m");
}

#[test]
fn countdown_rounds_partial_minutes_up() {
    assert_eq!(format_remaining(Duration::seconds(59)), "1m");
    assert_eq!(format_remaining(Duration::seconds(61)), "2m");
    assert_eq!(format_remaining(Duration::zero()), "0m");
}
