//! Integration tests for bracket creation, result recording and statistics.

use rand::rngs::StdRng;
use rand::SeedableRng;
use sport_tour::{
    compute_stats, is_bracket_complete, pair_teams, record_match_time, record_winner, Bracket,
    BracketError, Matchup, MatchupSelector, Team,
};

fn four_teams() -> Vec<Team> {
    vec![
        Team::new("A", "Alpha"),
        Team::new("B", "Bravo"),
        Team::new("C", "Charlie"),
        Team::new("D", "Delta"),
    ]
}

fn four_team_bracket() -> Bracket {
    let teams = four_teams();
    let matchups = pair_teams(&teams, 1, &mut StdRng::seed_from_u64(11)).unwrap();
    Bracket::create("Spring Cup", &teams, matchups).unwrap()
}

fn fixed_matchups() -> Vec<Matchup> {
    let t = four_teams();
    vec![
        Matchup::new(t[0].snapshot(), t[1].snapshot(), 1),
        Matchup::new(t[2].snapshot(), t[3].snapshot(), 1),
    ]
}

#[test]
fn create_sets_counts_and_round() {
    let b = four_team_bracket();
    assert_eq!(b.id, None);
    assert_eq!(b.name, "Spring Cup");
    assert_eq!(b.total_teams, 4);
    assert_eq!(b.total_teams, 2 * b.matchups.len());
    assert_eq!(b.current_round, 1);
    assert!(!b.completed);
    assert!(b.matchups.iter().all(|m| m.round == b.current_round));
}

#[test]
fn create_names_unnamed_brackets_by_date() {
    let b = Bracket::create("   ", &four_teams(), fixed_matchups()).unwrap();
    assert_eq!(b.name, format!("Tournament {}", b.created_at.format("%Y-%m-%d")));
}

#[test]
fn create_records_creator() {
    let b = Bracket::create("Cup", &four_teams(), fixed_matchups())
        .unwrap()
        .with_creator("admin-1");
    assert_eq!(b.created_by.as_deref(), Some("admin-1"));
}

#[test]
fn create_rejects_matchups_that_do_not_partition_teams() {
    let teams = four_teams();

    assert!(matches!(
        Bracket::create("Cup", &[], Vec::new()),
        Err(BracketError::InvalidBracket(_))
    ));

    let mut missing = fixed_matchups();
    missing.pop();
    assert!(matches!(
        Bracket::create("Cup", &teams, missing),
        Err(BracketError::InvalidBracket(_))
    ));

    let twice = vec![
        Matchup::new(teams[0].snapshot(), teams[1].snapshot(), 1),
        Matchup::new(teams[0].snapshot(), teams[2].snapshot(), 1),
    ];
    assert!(matches!(
        Bracket::create("Cup", &teams, twice),
        Err(BracketError::InvalidBracket(_))
    ));

    let stranger = Team::new("X", "Xray");
    let unknown = vec![
        Matchup::new(teams[0].snapshot(), stranger.snapshot(), 1),
        Matchup::new(teams[2].snapshot(), teams[3].snapshot(), 1),
    ];
    assert!(matches!(
        Bracket::create("Cup", &teams, unknown),
        Err(BracketError::InvalidBracket(_))
    ));

    let mixed = vec![
        Matchup::new(teams[0].snapshot(), teams[1].snapshot(), 1),
        Matchup::new(teams[2].snapshot(), teams[3].snapshot(), 2),
    ];
    assert!(matches!(
        Bracket::create("Cup", &teams, mixed),
        Err(BracketError::InvalidBracket(_))
    ));
}

#[test]
fn recording_first_winner_leaves_bracket_open() {
    let b = four_team_bracket();
    let first = &b.matchups[0];
    let updated = record_winner(&b, &MatchupSelector::from(first), &first.team_2.id).unwrap();

    assert!(updated.matchups[0].is_completed());
    assert_eq!(updated.matchups[0].winner.as_ref(), Some(&first.team_2.id));
    assert_eq!(updated.matchups[1], b.matchups[1]);
    assert!(!is_bracket_complete(&updated));
    assert!(!updated.completed);
    // Input untouched.
    assert!(!b.matchups[0].is_completed());
}

#[test]
fn recording_every_winner_completes_bracket() {
    let b = four_team_bracket();
    let b = record_winner(&b, &MatchupSelector::from(&b.matchups[0]), &b.matchups[0].team_1.id.clone()).unwrap();
    let second = b.matchups[1].clone();
    let b = record_winner(&b, &MatchupSelector::from(&second), &second.team_1.id).unwrap();

    assert!(is_bracket_complete(&b));
    assert!(b.completed);
    assert_eq!(b.completed_matchups(), 2);
}

#[test]
fn winner_outside_matchup_is_rejected() {
    let b = four_team_bracket();
    let first = b.matchups[0].clone();
    let outsider = b.matchups[1].team_1.id.clone();

    assert_eq!(
        record_winner(&b, &MatchupSelector::from(&first), &outsider),
        Err(BracketError::InvalidWinner(outsider))
    );
    assert!(!b.matchups[0].is_completed());
}

#[test]
fn only_participants_can_win() {
    let b = four_team_bracket();
    let first = b.matchups[0].clone();
    for team in four_teams() {
        let result = record_winner(&b, &MatchupSelector::from(&first), &team.id);
        match result {
            Ok(updated) => {
                assert!(first.involves(&team.id));
                let winner = updated.matchups[0].winner.clone().unwrap();
                assert!(winner == first.team_1.id || winner == first.team_2.id);
            }
            Err(e) => {
                assert!(!first.involves(&team.id));
                assert_eq!(e, BracketError::InvalidWinner(team.id.clone()));
            }
        }
    }
}

#[test]
fn match_time_on_unknown_matchup_is_not_found() {
    let b = four_team_bracket();
    let selector = MatchupSelector::by_teams("A", "Z", 1);
    assert_eq!(
        record_match_time(&b, &selector, "3:30 PM"),
        Err(BracketError::MatchupNotFound { candidates: 0 })
    );
    let wrong_round = MatchupSelector::by_teams(
        b.matchups[0].team_1.id.clone(),
        b.matchups[0].team_2.id.clone(),
        2,
    );
    assert_eq!(
        record_match_time(&b, &wrong_round, "3:30 PM"),
        Err(BracketError::MatchupNotFound { candidates: 0 })
    );
}

#[test]
fn winner_on_unknown_matchup_is_not_found() {
    let b = four_team_bracket();
    assert_eq!(
        record_winner(&b, &MatchupSelector::by_teams("A", "Z", 1), "A"),
        Err(BracketError::MatchupNotFound { candidates: 0 })
    );
    assert_eq!(
        record_winner(&b, &MatchupSelector::Id(uuid::Uuid::new_v4()), "A"),
        Err(BracketError::MatchupNotFound { candidates: 0 })
    );
}

#[test]
fn match_time_is_free_form() {
    let b = Bracket::create("Cup", &four_teams(), fixed_matchups()).unwrap();
    let selector = MatchupSelector::by_teams("C", "D", 1);
    let updated = record_match_time(&b, &selector, "after lunch, field 2").unwrap();

    assert_eq!(updated.matchups[1].matchup_time.as_deref(), Some("after lunch, field 2"));
    assert!(!updated.matchups[1].is_completed());
    assert_eq!(updated.matchups[0], b.matchups[0]);
    assert!(b.matchups[1].matchup_time.is_none());
}

#[test]
fn duplicate_composite_key_is_ambiguous() {
    let mut b = Bracket::create("Cup", &four_teams(), fixed_matchups()).unwrap();
    let rematch = Matchup::new(b.matchups[0].team_1.clone(), b.matchups[0].team_2.clone(), 1);
    let rematch_id = rematch.id;
    b.matchups.push(rematch);

    let selector = MatchupSelector::by_teams("A", "B", 1);
    assert_eq!(
        record_winner(&b, &selector, "A"),
        Err(BracketError::MatchupNotFound { candidates: 2 })
    );

    assert_eq!(
        record_match_time(&b, &selector, "3:30 PM"),
        Err(BracketError::MatchupNotFound { candidates: 2 })
    );

    let updated = record_winner(&b, &MatchupSelector::Id(rematch_id), "A").unwrap();
    assert!(updated.matchups[2].is_completed());
    assert!(!updated.matchups[0].is_completed());
}

#[test]
fn completion_check_is_stable() {
    let b = four_team_bracket();
    assert_eq!(is_bracket_complete(&b), is_bracket_complete(&b));
    let first = b.matchups[0].clone();
    let b = record_winner(&b, &MatchupSelector::from(&first), &first.team_1.id).unwrap();
    assert_eq!(is_bracket_complete(&b), is_bracket_complete(&b));
}

#[test]
fn winner_name_comes_from_snapshot() {
    let b = Bracket::create("Cup", &four_teams(), fixed_matchups()).unwrap();
    let b = record_winner(&b, &MatchupSelector::by_teams("A", "B", 1), "B").unwrap();
    assert_eq!(b.matchups[0].winner_name(), Some("Bravo"));
    assert_eq!(b.matchups[1].winner_name(), None);
}

#[test]
fn stats_count_tournaments_matches_and_wins() {
    let mut done = Bracket::create("Done", &four_teams(), fixed_matchups()).unwrap();
    done = record_winner(&done, &MatchupSelector::by_teams("A", "B", 1), "A").unwrap();
    done = record_winner(&done, &MatchupSelector::by_teams("C", "D", 1), "C").unwrap();
    done.id = Some("done".into());

    let mut open = Bracket::create("Open", &four_teams(), fixed_matchups()).unwrap();
    open = record_winner(&open, &MatchupSelector::by_teams("A", "B", 1), "A").unwrap();
    open.id = Some("open".into());
    open.created_at = done.created_at + chrono::Duration::minutes(5);

    let stats = compute_stats(&[done, open]);
    assert_eq!(stats.tournaments, 2);
    assert_eq!(stats.completed_tournaments, 1);
    assert_eq!(stats.total_matches, 4);
    assert_eq!(stats.completion_rate, 50);
    assert_eq!(stats.recent.len(), 2);
    assert_eq!(stats.recent[0].id, "open");
    assert_eq!(stats.top_teams[0].name, "Alpha");
    assert_eq!(stats.top_teams[0].wins, 2);
    assert_eq!(stats.top_teams[1].name, "Charlie");
    assert_eq!(stats.top_teams[1].wins, 1);
}

#[test]
fn stats_of_nothing_are_zero() {
    let stats = compute_stats(&[]);
    assert_eq!(stats.tournaments, 0);
    assert_eq!(stats.completion_rate, 0);
    assert!(stats.top_teams.is_empty());
}
