use gemfall_core::{Alphabet, Cell, find_matches};
use gemfall_game::{GameConfig, GameError, GamePhase, SelectOutcome, Session, SessionSnapshot};
use gemfall_generator::BoardSeed;
use gemfall_solver::{ExhaustiveFinder, MoveFinder as _};

/// A 4×4 board where swapping (1, 2) and (2, 2) completes `AAAA` on row 2,
/// and swapping (0, 0) and (0, 1) matches nothing.
const BOARD: [&str; 4] = ["ABCD", "CDAB", "AACA", "CDBD"];

fn small_config() -> GameConfig {
    GameConfig::default().with_size(4, 4)
}

/// The reference configuration with a target no short test can reach.
fn endless_config() -> GameConfig {
    GameConfig::default().with_base_target(1_000_000)
}

fn snapshot(score: u64, moves_remaining: u32, target_score: u64) -> SessionSnapshot {
    SessionSnapshot {
        grid: BOARD.iter().map(|row| (*row).to_owned()).collect(),
        score,
        level: 1,
        moves_remaining,
        target_score,
        selection: None,
        phase: GamePhase::Playing,
    }
}

fn restore(snapshot: &SessionSnapshot) -> Session {
    Session::from_snapshot(small_config(), snapshot, BoardSeed::from_phrase("flow")).unwrap()
}

fn play_scoring_swap(session: &mut Session) -> SelectOutcome {
    assert_eq!(
        session.select_cell(Cell::new(1, 2)).unwrap(),
        SelectOutcome::Selected
    );
    session.select_cell(Cell::new(2, 2)).unwrap()
}

#[test]
fn test_new_session_initial_state() {
    let session =
        Session::with_seed(GameConfig::default(), BoardSeed::from_phrase("new")).unwrap();
    assert_eq!(session.phase(), GamePhase::Playing);
    assert_eq!(session.score(), 0);
    assert_eq!(session.level(), 1);
    assert_eq!(session.moves_remaining(), 18);
    assert_eq!(session.target_score(), 150);
    assert_eq!(session.selection(), None);
    assert_eq!((session.grid().rows(), session.grid().cols()), (8, 8));
    assert!(ExhaustiveFinder::new().has_valid_move(session.grid()));
    assert!(session.last_cascade().is_empty());
}

#[test]
fn test_invalid_config_is_rejected() {
    let config = GameConfig::default().with_base_moves(0);
    assert!(matches!(Session::new(config), Err(GameError::Config(_))));
}

#[test]
fn test_selection_adjacency() {
    let mut session =
        Session::with_seed(GameConfig::default(), BoardSeed::from_phrase("adjacency")).unwrap();

    assert_eq!(
        session.select_cell(Cell::new(2, 2)).unwrap(),
        SelectOutcome::Selected
    );
    assert_eq!(
        session.select_cell(Cell::new(4, 4)).unwrap(),
        SelectOutcome::SelectionMoved
    );
    assert_eq!(session.selection(), Some(Cell::new(4, 4)));

    assert_eq!(
        session.select_cell(Cell::new(4, 4)).unwrap(),
        SelectOutcome::Deselected
    );
    assert_eq!(session.selection(), None);

    // Diagonal neighbours are not adjacent.
    session.select_cell(Cell::new(2, 2)).unwrap();
    assert_eq!(
        session.select_cell(Cell::new(3, 3)).unwrap(),
        SelectOutcome::SelectionMoved
    );

    session.select_cell(Cell::new(2, 2)).unwrap();
    let outcome = session.select_cell(Cell::new(2, 3)).unwrap();
    assert!(outcome.is_rejected() || outcome.is_scored());
    assert_eq!(session.selection(), None);
}

#[test]
fn test_rejected_swap_reverts() {
    let mut session = restore(&snapshot(0, 5, 150));
    let before = session.grid().clone();
    session.select_cell(Cell::new(0, 0)).unwrap();
    let outcome = session.select_cell(Cell::new(0, 1)).unwrap();
    assert!(outcome.is_rejected());
    assert_eq!(session.grid(), &before);
    assert_eq!(session.moves_remaining(), 5);
    assert_eq!(session.score(), 0);
    assert_eq!(session.selection(), None);
    assert_eq!(session.phase(), GamePhase::Playing);
}

#[test]
fn test_win_takes_precedence_over_last_move() {
    let mut session = restore(&snapshot(145, 1, 150));
    let SelectOutcome::Scored(report) = play_scoring_swap(&mut session) else {
        panic!("expected a scoring swap");
    };
    assert_eq!(session.moves_remaining(), 0);
    assert!(session.score() >= 150);
    assert_eq!(report.phase, GamePhase::LevelComplete);
    assert_eq!(session.phase(), GamePhase::LevelComplete);
    assert_eq!(session.hint(), None);
}

#[test]
fn test_last_move_without_target_is_game_over() {
    let mut session = restore(&snapshot(0, 1, 100_000));
    let outcome = play_scoring_swap(&mut session);
    assert!(outcome.is_scored());
    assert_eq!(session.phase(), GamePhase::GameOver);

    // Further input is ignored.
    assert_eq!(
        session.select_cell(Cell::new(0, 0)).unwrap(),
        SelectOutcome::Ignored
    );
    assert_eq!(session.selection(), None);
    assert_eq!(
        session.advance_level(),
        Err(GameError::InvalidPhase {
            expected: GamePhase::LevelComplete,
            actual: GamePhase::GameOver
        })
    );
}

#[test]
fn test_scoring_swap_resolves_cascade() {
    let mut session = restore(&snapshot(0, 5, 100_000));
    let SelectOutcome::Scored(report) = play_scoring_swap(&mut session) else {
        panic!("expected a scoring swap");
    };
    let steps = session.last_cascade();
    assert_eq!(steps[0].removed, 4);
    assert_eq!(steps[0].points, 40);
    assert!(!steps[0].chain_link);
    assert!(steps.iter().skip(1).all(|step| step.chain_link));
    assert_eq!(report.steps, steps.len());
    assert_eq!(report.points, steps.iter().map(|step| step.points).sum::<u64>());
    assert_eq!(session.score(), report.points);
    assert_eq!(session.moves_remaining(), 4);
    if !report.reshuffled {
        assert!(find_matches(session.grid()).is_empty());
    }
    assert!(ExhaustiveFinder::new().has_valid_move(session.grid()));
}

#[test]
fn test_advance_level_math() {
    let mut snap = snapshot(300, 0, 262);
    snap.level = 2;
    snap.phase = GamePhase::LevelComplete;
    let mut session = restore(&snap);

    session.advance_level().unwrap();
    assert_eq!(session.level(), 3);
    assert_eq!(session.target_score(), 459);
    assert_eq!(session.moves_remaining(), 20);
    assert_eq!(session.score(), 300);
    assert_eq!(session.phase(), GamePhase::Playing);
    assert_eq!(session.selection(), None);
    assert!(ExhaustiveFinder::new().has_valid_move(session.grid()));
}

#[test]
fn test_advance_level_requires_level_complete() {
    let mut session = restore(&snapshot(0, 5, 150));
    assert_eq!(
        session.advance_level(),
        Err(GameError::InvalidPhase {
            expected: GamePhase::LevelComplete,
            actual: GamePhase::Playing
        })
    );
    assert_eq!(session.level(), 1);
}

#[test]
fn test_restart_resets_progress() {
    let mut snap = snapshot(500, 0, 262);
    snap.level = 2;
    snap.phase = GamePhase::GameOver;
    let mut session = restore(&snap);

    session.restart().unwrap();
    assert_eq!(session.phase(), GamePhase::Playing);
    assert_eq!(session.score(), 0);
    assert_eq!(session.level(), 1);
    assert_eq!(session.moves_remaining(), 18);
    assert_eq!(session.target_score(), 150);
    assert!(ExhaustiveFinder::new().has_valid_move(session.grid()));
}

#[test]
fn test_reshuffle_preserves_progress() {
    // Small boards with four kinds deadlock often after a cascade.
    let config = GameConfig::default()
        .with_size(3, 3)
        .with_alphabet(Alphabet::letters(4).unwrap())
        .with_base_target(1_000_000);
    let finder = ExhaustiveFinder::new();
    let mut reshuffles = 0;

    for i in 0..200 {
        let seed = BoardSeed::from_phrase(&format!("reshuffle-{i}"));
        let mut session = Session::with_seed(config.clone(), seed).unwrap();
        while session.phase().is_playing() {
            let swap = session.hint().unwrap();
            let (score, level, moves, target) = (
                session.score(),
                session.level(),
                session.moves_remaining(),
                session.target_score(),
            );
            session.select_cell(swap.first()).unwrap();
            let SelectOutcome::Scored(report) = session.select_cell(swap.second()).unwrap()
            else {
                panic!("hinted swap must score");
            };
            if report.reshuffled {
                reshuffles += 1;
                assert_eq!(session.score(), score + report.points);
                assert_eq!(session.level(), level);
                assert_eq!(session.moves_remaining(), moves - 1);
                assert_eq!(session.target_score(), target);
                assert_eq!(session.selection(), None);
                assert!(finder.has_valid_move(session.grid()));
            }
        }
    }
    assert!(reshuffles > 0);
}

#[test]
fn test_same_seed_same_game() {
    let seed = BoardSeed::from_phrase("replay");
    let play = || {
        let mut session = Session::with_seed(endless_config(), seed).unwrap();
        for _ in 0..5 {
            let swap = session.hint().unwrap();
            session.select_cell(swap.first()).unwrap();
            session.select_cell(swap.second()).unwrap();
        }
        session.snapshot()
    };
    assert_eq!(play(), play());
}

#[test]
fn test_snapshot_restores_through_json() {
    let mut session = Session::with_seed(endless_config(), BoardSeed::from_phrase("json")).unwrap();
    let swap = session.hint().unwrap();
    session.select_cell(swap.first()).unwrap();
    session.select_cell(swap.second()).unwrap();
    session.select_cell(Cell::new(0, 0)).unwrap();

    let json = serde_json::to_string(&session.snapshot()).unwrap();
    let snapshot: SessionSnapshot = serde_json::from_str(&json).unwrap();
    let restored = Session::from_snapshot(endless_config(), &snapshot, session.seed()).unwrap();

    assert_eq!(restored.grid(), session.grid());
    assert_eq!(restored.score(), session.score());
    assert_eq!(restored.moves_remaining(), 17);
    assert_eq!(restored.selection(), Some(Cell::new(0, 0)));
    assert_eq!(restored.snapshot(), session.snapshot());
}

#[test]
fn test_snapshot_for_other_config_is_rejected() {
    let snap = snapshot(0, 5, 150);
    let result =
        Session::from_snapshot(GameConfig::default(), &snap, BoardSeed::from_phrase("x"));
    assert!(matches!(result, Err(GameError::Snapshot(_))));
}
