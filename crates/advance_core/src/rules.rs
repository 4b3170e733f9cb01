//! Per-piece legality, check detection, action generation, and the
//! material evaluation.

use crate::action::Action;
use crate::board::{adjacent_squares, Board};
use crate::game::Game;
use crate::piece::{PieceId, PieceKind};
use crate::types::{square, Colour, Square};

/// `CanMoveTo` from the geometry table: a pure predicate over the current
/// square, the target's occupancy, and the squares strictly between source
/// and target for sliding pieces.
pub fn can_move_to(game: &Game, id: PieceId, to: Square) -> bool {
    let piece = game.piece(id);
    let from = match piece.square {
        Some(sq) => sq,
        None => return false,
    };
    if from == to {
        return false;
    }
    let dy = to.row - from.row;
    let dx = to.col - from.col;
    let (ady, adx) = (dy.abs(), dx.abs());
    let target_free = game.occupant(to).is_none();

    match piece.kind {
        PieceKind::Zombie => {
            let dir = match piece.owner {
                Some(colour) => colour.direction(),
                None => return false,
            };
            // One step forward, straight or diagonal.
            target_free && dy == dir && adx <= 1
        }
        PieceKind::Builder | PieceKind::General => {
            if !(target_free && ady <= 1 && adx <= 1) {
                return false;
            }
            if piece.kind == PieceKind::General {
                // The General may not step onto a threatened square.
                let colour = match piece.owner {
                    Some(colour) => colour,
                    None => return false,
                };
                return !threatened_by(game, colour.other(), to);
            }
            true
        }
        PieceKind::Miner => target_free && (dy == 0 || dx == 0) && path_clear(game, from, to),
        PieceKind::Jester => {
            if !(ady <= 1 && adx <= 1) {
                return false;
            }
            match game.occupant(to).map(|occ| game.piece(occ)) {
                None => true,
                // Swap with a friendly piece, but never with another
                // Jester and never with a Wall.
                Some(other) => {
                    other.kind != PieceKind::Jester
                        && other.kind != PieceKind::Wall
                        && other.owner == piece.owner
                }
            }
        }
        PieceKind::Sentinel => {
            // Knight-like jump; intervening pieces and walls are ignored.
            target_free && ((ady == 2 && adx == 1) || (ady == 1 && adx == 2))
        }
        PieceKind::Catapult => target_free && ady + adx == 1,
        PieceKind::Dragon => {
            target_free
                && (dy == 0 || dx == 0 || ady == adx)
                && path_clear(game, from, to)
        }
        PieceKind::Wall => false,
    }
}

/// `CanAttack` from the geometry table. For the General this includes the
/// "destination not threatened" clause; every other piece is purely
/// geometric (plus target occupancy for the Jester).
pub fn can_attack(game: &Game, id: PieceId, to: Square) -> bool {
    let piece = game.piece(id);
    if piece.kind == PieceKind::General {
        let from = match piece.square {
            Some(sq) => sq,
            None => return false,
        };
        if from == to {
            return false;
        }
        let colour = match piece.owner {
            Some(colour) => colour,
            None => return false,
        };
        let (ady, adx) = ((to.row - from.row).abs(), (to.col - from.col).abs());
        return ady <= 1 && adx <= 1 && !threatened_by(game, colour.other(), to);
    }
    geometry_can_attack(game, id, to)
}

/// Attack geometry without the General's threat clause: the General is
/// reduced to plain adjacency here so that threat computations involving
/// two Generals never recurse into each other.
fn geometry_can_attack(game: &Game, id: PieceId, to: Square) -> bool {
    let piece = game.piece(id);
    let from = match piece.square {
        Some(sq) => sq,
        None => return false,
    };
    if from == to {
        return false;
    }
    let dy = to.row - from.row;
    let dx = to.col - from.col;
    let (ady, adx) = (dy.abs(), dx.abs());

    match piece.kind {
        PieceKind::Zombie => {
            let dir = match piece.owner {
                Some(colour) => colour.direction(),
                None => return false,
            };
            if dy == 2 * dir && (adx == 0 || adx == 2) {
                // Two-square leap, straight or diagonal; the intervening
                // square must be free.
                let between = square(from.row + dir, from.col + dx / 2);
                matches!(between, Some(b) if game.occupant(b).is_none())
            } else {
                // Otherwise the Zombie fights at its move range only.
                dy == dir && adx <= 1
            }
        }
        PieceKind::Builder => ady <= 1 && adx <= 1,
        PieceKind::Miner => (dy == 0 || dx == 0) && path_clear(game, from, to),
        PieceKind::Jester => {
            // The Jester never captures: its "attack" is a defection, legal
            // against any adjacent enemy-owned piece.
            if !(ady <= 1 && adx <= 1) {
                return false;
            }
            match game.occupant(to).map(|occ| game.piece(occ)) {
                Some(other) => match (other.owner, piece.owner) {
                    (Some(theirs), Some(ours)) => theirs != ours,
                    _ => false,
                },
                None => false,
            }
        }
        PieceKind::Sentinel => (ady == 2 && adx == 1) || (ady == 1 && adx == 2),
        PieceKind::Catapult => {
            // Indirect fire: distance three along a rank or file, or a
            // (2, 2) diagonal offset.
            (ady == 0 && adx == 3) || (ady == 3 && adx == 0) || (ady == 2 && adx == 2)
        }
        PieceKind::Dragon => {
            // Same lines as its move, but no point-blank capture.
            !(ady <= 1 && adx <= 1)
                && (dy == 0 || dx == 0 || ady == adx)
                && path_clear(game, from, to)
        }
        PieceKind::General => ady <= 1 && adx <= 1,
        PieceKind::Wall => false,
    }
}

/// True when every square strictly between `from` and `to` is free. The
/// pair must lie on a shared rank, file, or diagonal.
fn path_clear(game: &Game, from: Square, to: Square) -> bool {
    let step_r = (to.row - from.row).signum();
    let step_c = (to.col - from.col).signum();
    let mut row = from.row + step_r;
    let mut col = from.col + step_c;
    while (row, col) != (to.row, to.col) {
        match square(row, col) {
            Some(sq) if game.occupant(sq).is_none() => {}
            _ => return false,
        }
        row += step_r;
        col += step_c;
    }
    true
}

/// Builder only: a wall can be raised on any free adjoining square.
pub fn can_build_wall(game: &Game, id: PieceId, to: Square) -> bool {
    let piece = game.piece(id);
    if piece.kind != PieceKind::Builder {
        return false;
    }
    let from = match piece.square {
        Some(sq) => sq,
        None => return false,
    };
    from != to
        && (to.row - from.row).abs() <= 1
        && (to.col - from.col).abs() <= 1
        && game.occupant(to).is_none()
}

/// A Sentinel shields the four orthogonally adjacent squares.
pub fn sentinel_protects(game: &Game, id: PieceId, sq: Square) -> bool {
    let piece = game.piece(id);
    piece.kind == PieceKind::Sentinel
        && matches!(piece.square, Some(from) if adjacent_squares(from).contains(&sq))
}

fn protected_by_sentinel(game: &Game, side: Colour, sq: Square) -> bool {
    game.army(side)
        .iter()
        .any(|&id| sentinel_protects(game, id, sq))
}

/// Raw threat test used for the General's movement restriction: does any
/// piece of `by` cover `sq` by attack geometry alone?
fn threatened_by(game: &Game, by: Colour, sq: Square) -> bool {
    game.army(by)
        .iter()
        .any(|&id| geometry_can_attack(game, id, sq))
}

/// True iff no opponent piece can currently attack the General's square,
/// or a friendly Sentinel protects it.
pub fn is_general_safe(game: &Game, colour: Colour) -> bool {
    let gsq = match game.general_square(colour) {
        Some(sq) => sq,
        None => return true,
    };
    if protected_by_sentinel(game, colour, gsq) {
        return true;
    }
    !game
        .army(colour.other())
        .iter()
        .any(|&id| can_attack(game, id, gsq))
}

/// Legal Move and BuildWall actions for every on-board piece of `colour`.
pub fn find_possible_moves(game: &Game, colour: Colour, actions: &mut Vec<Action>) {
    for &id in game.army(colour) {
        if !game.piece(id).on_board() {
            continue;
        }
        for to in Board::squares() {
            if can_move_to(game, id, to) {
                actions.push(Action::Move { actor: id, to });
            }
            if can_build_wall(game, id, to) {
                actions.push(Action::BuildWall { actor: id, target: to });
            }
        }
    }
}

/// Legal Attack and DestroyWall actions for every on-board piece of
/// `colour`, honouring the Sentinel-protection veto.
pub fn find_possible_attacks(game: &Game, colour: Colour, actions: &mut Vec<Action>) {
    for &id in game.army(colour) {
        if !game.piece(id).on_board() {
            continue;
        }
        let kind = game.piece(id).kind;
        for target in Board::squares() {
            let occ = match game.occupant(target) {
                Some(occ) => occ,
                None => continue,
            };
            if game.piece(occ).kind == PieceKind::Wall {
                // Walls are ownerless: only the Builder attacks them, and
                // only the Miner mines them out.
                if !kind.requires_enemy_to_attack() && can_attack(game, id, target) {
                    actions.push(Action::Attack { actor: id, target });
                } else if kind == PieceKind::Miner && geometry_can_attack(game, id, target) {
                    actions.push(Action::DestroyWall { actor: id, target });
                }
            } else if game.piece(occ).owner == Some(colour.other())
                && can_attack(game, id, target)
                && !attack_vetoed(game, id, occ, target)
            {
                actions.push(Action::Attack { actor: id, target });
            }
        }
    }
}

/// The Sentinel shield: an attack into a protected square is illegal
/// unless the attacker is a Jester or the target is itself a Sentinel.
fn attack_vetoed(game: &Game, attacker: PieceId, victim: PieceId, target: Square) -> bool {
    if game.piece(attacker).kind == PieceKind::Jester {
        return false;
    }
    if game.piece(victim).kind == PieceKind::Sentinel {
        return false;
    }
    match game.piece(victim).owner {
        Some(side) => protected_by_sentinel(game, side, target),
        None => false,
    }
}

/// Every legal action for `colour`. When the General is unsafe this is the
/// check-evasion set: only the moves and attacks that, tried on the board
/// and reverted, leave the General safe.
pub fn find_possible_actions(game: &mut Game, colour: Colour) -> Vec<Action> {
    let mut actions = Vec::new();
    find_possible_moves(game, colour, &mut actions);
    find_possible_attacks(game, colour, &mut actions);
    if is_general_safe(game, colour) {
        return actions;
    }
    actions.retain(|&action| match action {
        Action::BuildWall { .. } | Action::DestroyWall { .. } => false,
        _ => match action.apply(game) {
            Some(applied) => {
                let safe = is_general_safe(game, colour);
                applied.undo(game);
                safe
            }
            None => false,
        },
    });
    actions
}

/// True when `colour`'s General is unsafe and no legal evasion exists.
pub fn is_checkmate(game: &mut Game, colour: Colour) -> bool {
    !is_general_safe(game, colour) && find_possible_actions(game, colour).is_empty()
}

/// Fixed material count over on-board pieces. White counts positive and
/// Black negative, so "White maximises, Black minimises" holds uniformly.
pub fn evaluate(game: &Game, colour: Colour) -> i32 {
    let total: i32 = game
        .army(colour)
        .iter()
        .filter(|&&id| game.piece(id).on_board())
        .map(|&id| game.piece(id).kind.value())
        .sum();
    match colour {
        Colour::White => total,
        Colour::Black => -total,
    }
}

#[cfg(test)]
#[path = "rules_tests.rs"]
mod rules_tests;
