use super::*;
use crate::types::{square, Colour};

fn sq(row: i8, col: i8) -> crate::types::Square {
    square(row, col).unwrap()
}

#[test]
fn test_move_do_undo_round_trip() {
    let mut game = Game::new();
    let zombie = game
        .recruit(PieceKind::Zombie, Some(Colour::White), sq(4, 4))
        .unwrap();
    let before = game.write_position();

    let action = Action::Move {
        actor: zombie,
        to: sq(3, 4),
    };
    let applied = action.apply(&mut game).unwrap();
    assert_eq!(game.piece(zombie).square, Some(sq(3, 4)));
    assert!(game.occupant(sq(4, 4)).is_none());

    applied.undo(&mut game);
    assert_eq!(game.write_position(), before);
    assert_eq!(game.piece(zombie).square, Some(sq(4, 4)));
}

#[test]
fn test_move_fails_when_target_occupied() {
    let mut game = Game::new();
    let zombie = game
        .recruit(PieceKind::Zombie, Some(Colour::White), sq(4, 4))
        .unwrap();
    game.recruit(PieceKind::Zombie, Some(Colour::Black), sq(3, 4))
        .unwrap();

    // Execution-time precondition failure is a rejection, not a panic.
    let action = Action::Move {
        actor: zombie,
        to: sq(3, 4),
    };
    assert!(action.apply(&mut game).is_none());
}

#[test]
fn test_jester_swap_and_undo() {
    let mut game = Game::new();
    let jester = game
        .recruit(PieceKind::Jester, Some(Colour::White), sq(5, 5))
        .unwrap();
    let dragon = game
        .recruit(PieceKind::Dragon, Some(Colour::White), sq(5, 6))
        .unwrap();
    let before = game.write_position();

    let action = Action::Move {
        actor: jester,
        to: sq(5, 6),
    };
    let applied = action.apply(&mut game).unwrap();
    assert_eq!(game.piece(jester).square, Some(sq(5, 6)));
    assert_eq!(game.piece(dragon).square, Some(sq(5, 5)));

    applied.undo(&mut game);
    assert_eq!(game.write_position(), before);
    assert_eq!(game.piece(jester).square, Some(sq(5, 5)));
    assert_eq!(game.piece(dragon).square, Some(sq(5, 6)));
}

#[test]
fn test_jester_cannot_swap_with_enemy() {
    let mut game = Game::new();
    let jester = game
        .recruit(PieceKind::Jester, Some(Colour::White), sq(5, 5))
        .unwrap();
    game.recruit(PieceKind::Dragon, Some(Colour::Black), sq(5, 6))
        .unwrap();

    let action = Action::Move {
        actor: jester,
        to: sq(5, 6),
    };
    assert!(action.apply(&mut game).is_none());
}

#[test]
fn test_attack_relocates_and_undo_restores_victim() {
    let mut game = Game::new();
    let dragon = game
        .recruit(PieceKind::Dragon, Some(Colour::White), sq(4, 0))
        .unwrap();
    let victim = game
        .recruit(PieceKind::Zombie, Some(Colour::Black), sq(4, 5))
        .unwrap();
    let before = game.write_position();

    let action = Action::Attack {
        actor: dragon,
        target: sq(4, 5),
    };
    let applied = action.apply(&mut game).unwrap();
    assert_eq!(game.piece(dragon).square, Some(sq(4, 5)));
    assert!(!game.piece(victim).on_board());
    // Capture does not change army membership.
    assert!(game.army(Colour::Black).contains(&victim));

    applied.undo(&mut game);
    assert_eq!(game.write_position(), before);
    assert_eq!(game.piece(dragon).square, Some(sq(4, 0)));
    assert_eq!(game.piece(victim).square, Some(sq(4, 5)));
}

#[test]
fn test_catapult_attacks_without_moving() {
    let mut game = Game::new();
    let catapult = game
        .recruit(PieceKind::Catapult, Some(Colour::White), sq(4, 4))
        .unwrap();
    let victim = game
        .recruit(PieceKind::Zombie, Some(Colour::Black), sq(1, 4))
        .unwrap();
    let before = game.write_position();

    let action = Action::Attack {
        actor: catapult,
        target: sq(1, 4),
    };
    let applied = action.apply(&mut game).unwrap();
    assert_eq!(game.piece(catapult).square, Some(sq(4, 4)));
    assert!(!game.piece(victim).on_board());
    assert!(game.occupant(sq(1, 4)).is_none());

    applied.undo(&mut game);
    assert_eq!(game.write_position(), before);
}

#[test]
fn test_jester_attack_defects_instead_of_capturing() {
    let mut game = Game::new();
    let jester = game
        .recruit(PieceKind::Jester, Some(Colour::White), sq(4, 4))
        .unwrap();
    let victim = game
        .recruit(PieceKind::Sentinel, Some(Colour::Black), sq(4, 5))
        .unwrap();
    let before = game.write_position();

    let action = Action::Attack {
        actor: jester,
        target: sq(4, 5),
    };
    let applied = action.apply(&mut game).unwrap();
    // Nobody moves and nobody is captured; the victim changes sides.
    assert_eq!(game.piece(jester).square, Some(sq(4, 4)));
    assert_eq!(game.piece(victim).square, Some(sq(4, 5)));
    assert_eq!(game.piece(victim).owner, Some(Colour::White));
    assert!(game.army(Colour::White).contains(&victim));

    applied.undo(&mut game);
    assert_eq!(game.write_position(), before);
    assert_eq!(game.piece(victim).owner, Some(Colour::Black));
    assert!(game.army(Colour::Black).contains(&victim));
}

#[test]
fn test_build_wall_and_undo() {
    let mut game = Game::new();
    let builder = game
        .recruit(PieceKind::Builder, Some(Colour::White), sq(6, 6))
        .unwrap();
    let before = game.write_position();

    let action = Action::BuildWall {
        actor: builder,
        target: sq(6, 7),
    };
    let applied = action.apply(&mut game).unwrap();
    let wall = game.occupant(sq(6, 7)).unwrap();
    assert_eq!(game.piece(wall).kind, PieceKind::Wall);
    assert_eq!(game.piece(wall).owner, None);

    applied.undo(&mut game);
    assert_eq!(game.write_position(), before);
    assert!(game.occupant(sq(6, 7)).is_none());
}

#[test]
fn test_build_wall_fails_on_occupied_square() {
    let mut game = Game::new();
    let builder = game
        .recruit(PieceKind::Builder, Some(Colour::White), sq(6, 6))
        .unwrap();
    game.recruit(PieceKind::Zombie, Some(Colour::Black), sq(6, 7))
        .unwrap();

    let action = Action::BuildWall {
        actor: builder,
        target: sq(6, 7),
    };
    assert!(action.apply(&mut game).is_none());
}

#[test]
fn test_destroy_wall_and_undo() {
    let mut game = Game::new();
    let miner = game
        .recruit(PieceKind::Miner, Some(Colour::White), sq(8, 3))
        .unwrap();
    let wall = game
        .recruit(PieceKind::Wall, None, sq(2, 3))
        .unwrap();
    let before = game.write_position();

    let action = Action::DestroyWall {
        actor: miner,
        target: sq(2, 3),
    };
    let applied = action.apply(&mut game).unwrap();
    assert_eq!(game.piece(miner).square, Some(sq(2, 3)));
    assert!(!game.piece(wall).on_board());

    applied.undo(&mut game);
    assert_eq!(game.write_position(), before);
    assert_eq!(game.piece(miner).square, Some(sq(8, 3)));
    assert_eq!(game.piece(wall).square, Some(sq(2, 3)));
}

#[test]
fn test_destroy_wall_rejects_non_wall_target() {
    let mut game = Game::new();
    let miner = game
        .recruit(PieceKind::Miner, Some(Colour::White), sq(8, 3))
        .unwrap();
    game.recruit(PieceKind::Zombie, Some(Colour::Black), sq(2, 3))
        .unwrap();

    let action = Action::DestroyWall {
        actor: miner,
        target: sq(2, 3),
    };
    assert!(action.apply(&mut game).is_none());
}

#[test]
fn test_nested_do_undo_stack_discipline() {
    // Two actions applied depth-first and undone in reverse order must
    // restore the original state, wall creation included.
    let mut game = Game::new();
    let builder = game
        .recruit(PieceKind::Builder, Some(Colour::White), sq(6, 6))
        .unwrap();
    let zombie = game
        .recruit(PieceKind::Zombie, Some(Colour::Black), sq(2, 2))
        .unwrap();
    let before = game.write_position();

    let outer = Action::BuildWall {
        actor: builder,
        target: sq(5, 6),
    }
    .apply(&mut game)
    .unwrap();
    let inner = Action::Move {
        actor: zombie,
        to: sq(3, 2),
    }
    .apply(&mut game)
    .unwrap();

    inner.undo(&mut game);
    outer.undo(&mut game);
    assert_eq!(game.write_position(), before);
}
