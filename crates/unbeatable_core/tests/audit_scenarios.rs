//! Exhaustive audits of the tiered heuristic.
//!
//! The fork-blocking tier answers an opponent fork with the first counter
//! threat it finds. That reply can force the opponent onto a square that
//! completes a second fork, so some fallback orders lose as O. These tests
//! pin what holds and what does not.

use rand::rngs::StdRng;
use rand::SeedableRng;
use unbeatable_core::audit::threat_count;
use unbeatable_core::{audit, Board, FallbackOrder, GameSession, Move, Player, SessionState, Side};

fn order(indices: [usize; 9]) -> FallbackOrder {
    FallbackOrder::from_indices(indices).unwrap()
}

#[test]
fn test_x_with_corner_first_order_is_unbeaten() {
    let report = audit(&Player::with_order(Side::X, FallbackOrder::default()));
    assert!(report.is_unbeaten(), "{report}: {:?}", report.first_loss);
    assert!(report.wins > 0);
    assert!(report.draws > 0);
}

#[test]
fn test_x_with_center_first_order_is_unbeaten() {
    let report = audit(&Player::with_order(Side::X, order([4, 0, 2, 6, 8, 1, 3, 5, 7])));
    assert!(report.is_unbeaten(), "{report}: {:?}", report.first_loss);
}

#[test]
fn test_fork_block_can_be_forced_into_second_fork() {
    let engine = Player::with_order(Side::O, order([4, 0, 2, 6, 8, 1, 3, 5, 7]));
    let report = audit(&engine);
    assert!(!report.is_unbeaten());
    assert_eq!(report.single_threat_losses, 0);

    // X edges in, the engine counters off the fork square twice, and the
    // second forced block hands X a double threat.
    let mut session = GameSession::start(Side::X);
    let mut replies = Vec::new();
    for x in [1, 6, 5, 8, 7] {
        let state = session.apply_move(x, Side::X).unwrap();
        if state.is_terminal() {
            break;
        }
        let pos = session.request_move(&engine).unwrap();
        replies.push(pos.index());
        session.apply_move(pos.index(), Side::O).unwrap();
    }
    assert_eq!(replies, vec![4, 3, 0, 2]);
    assert_eq!(session.state(), SessionState::Won(Side::X));
}

#[test]
fn test_first_loss_replays_to_opponent_win() {
    let engine = Player::with_order(Side::O, order([4, 0, 2, 6, 8, 1, 3, 5, 7]));
    let report = audit(&engine);
    let line = report.first_loss.expect("a losing line");

    let mut session = GameSession::start(Side::X);
    for Move { side, position } in &line {
        session.apply_move(position.index(), *side).unwrap();
    }
    assert_eq!(session.state(), SessionState::Won(Side::X));

    // The engine lost to a double threat, never to a lone one.
    let before_last_reply = &line[..line.len() - 2];
    let mut b = Board::new();
    for mv in before_last_reply {
        b = b.place(mv.position, mv.side).unwrap();
    }
    assert!(threat_count(&b, Side::X) >= 2);
}

#[test]
fn test_random_orders_only_lose_to_double_threats() {
    let mut rng = StdRng::seed_from_u64(2024);
    for _ in 0..100 {
        for side in [Side::X, Side::O] {
            let engine = Player::with_rng(side, &mut rng);
            let report = audit(&engine);
            assert!(report.games() > 0);
            assert_eq!(report.single_threat_losses, 0, "{report} with {}", engine.fallback());
        }
    }
}
