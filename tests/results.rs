//! Integration tests for results sheet parsing and storage.

use chrono::{TimeZone, Utc};
use tournament_khelba::{parse_results_sheet, KhelbaError, NewTournament, Registry, ResultEntry};

const SHEET: &str = "\
rank,player,kills,prize
1,alice,12,500
2,bob,9,300
3,carol,4,100
";

#[test]
fn parses_a_valid_sheet() {
    let entries = parse_results_sheet(SHEET).unwrap();
    assert_eq!(entries.len(), 3);
    assert_eq!(
        entries[0],
        ResultEntry {
            rank: 1,
            player: "alice".to_string(),
            kills: 12,
            prize: 500,
        }
    );
    assert_eq!(entries[2].player, "carol");
    assert_eq!(entries[2].prize, 100);
}

#[test]
fn fields_are_trimmed() {
    let sheet = "rank,player,kills,prize\n1,  alice  , 12 , 500\n";
    let entries = parse_results_sheet(sheet).unwrap();
    assert_eq!(entries[0].player, "alice");
    assert_eq!(entries[0].kills, 12);
}

#[test]
fn ranks_must_be_contiguous_from_one() {
    let sheet = "rank,player,kills,prize\n1,alice,12,500\n3,bob,9,300\n";
    assert!(matches!(
        parse_results_sheet(sheet),
        Err(KhelbaError::InvalidResults(_))
    ));

    let sheet = "rank,player,kills,prize\n2,alice,12,500\n";
    assert!(matches!(
        parse_results_sheet(sheet),
        Err(KhelbaError::InvalidResults(_))
    ));
}

#[test]
fn empty_sheet_and_empty_names_are_rejected() {
    assert!(matches!(
        parse_results_sheet("rank,player,kills,prize\n"),
        Err(KhelbaError::InvalidResults(_))
    ));
    assert!(matches!(
        parse_results_sheet("rank,player,kills,prize\n1,,12,500\n"),
        Err(KhelbaError::InvalidResults(_))
    ));
}

#[test]
fn non_numeric_fields_are_rejected() {
    let sheet = "rank,player,kills,prize\n1,alice,many,500\n";
    assert!(matches!(
        parse_results_sheet(sheet),
        Err(KhelbaError::InvalidResults(_))
    ));
}

#[test]
fn upload_replaces_previous_results() {
    let mut r = Registry::new();
    let tid = r
        .create_tournament(NewTournament {
            name: "T".to_string(),
            description: "d".to_string(),
            game_type: "Squad".to_string(),
            start_date: Utc.with_ymd_and_hms(2025, 1, 10, 12, 0, 0).unwrap(),
            end_date: Utc.with_ymd_and_hms(2025, 1, 10, 18, 0, 0).unwrap(),
            entry_fee: 0,
            prize_pool: 900,
            max_participants: 100,
            room_id: None,
            room_password: None,
            room_visibility_minutes: None,
        })
        .unwrap();
    assert!(r.results(tid).is_none());

    let entries = parse_results_sheet(SHEET).unwrap();
    r.upload_results(tid, entries).unwrap();
    assert_eq!(r.results(tid).unwrap().len(), 3);

    let corrected = parse_results_sheet("rank,player,kills,prize\n1,dave,20,900\n").unwrap();
    r.upload_results(tid, corrected).unwrap();
    let stored = r.results(tid).unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].player, "dave");

    assert_eq!(
        r.upload_results(99, Vec::new()),
        Err(KhelbaError::TournamentNotFound(99))
    );
}
