use crate::game::Game;
use crate::piece::{PieceId, PieceKind};
use crate::types::Square;

/// A reversible command over the shared board. Legality is the rule
/// engine's job; `apply` only re-checks the preconditions that can change
/// between generation and execution.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    /// Relocate the actor to `to`. A Jester moving onto a friendly
    /// non-Jester piece swaps places with it instead.
    Move { actor: PieceId, to: Square },
    /// Capture the occupant of `target`. Most pieces relocate into the
    /// vacated square; the Catapult fires without moving; the Jester makes
    /// the occupant defect instead of removing it.
    Attack { actor: PieceId, target: Square },
    /// Builder only: raise an ownerless Wall on a free square.
    BuildWall { actor: PieceId, target: Square },
    /// Miner only: remove a Wall and occupy its square.
    DestroyWall { actor: PieceId, target: Square },
}

/// Proof that an action was applied exactly once. `undo` consumes it, so a
/// double undo is unrepresentable and the search's depth-first do/undo
/// stack discipline is enforced by the types.
#[derive(Debug)]
#[must_use = "an applied action must be undone or committed"]
pub struct Applied {
    action: Action,
    undo: Undo,
}

#[derive(Debug)]
enum Undo {
    Moved {
        actor: PieceId,
        from: Square,
    },
    Swapped {
        actor: PieceId,
        from: Square,
        partner: PieceId,
        partner_from: Square,
    },
    Captured {
        actor: PieceId,
        from: Square,
        victim: PieceId,
        target: Square,
        relocated: bool,
    },
    Defected {
        victim: PieceId,
    },
    WallBuilt {
        wall: PieceId,
    },
    WallRazed {
        actor: PieceId,
        from: Square,
        wall: PieceId,
        target: Square,
    },
}

impl Action {
    /// Executes the action, returning `None` when a precondition no longer
    /// holds at execution time (e.g. the target square filled up).
    pub fn apply(self, game: &mut Game) -> Option<Applied> {
        let undo = match self {
            Action::Move { actor, to } => {
                let from = game.piece(actor).square?;
                match game.occupant(to) {
                    None => {
                        game.leave_board(actor);
                        game.enter_board(actor, to).expect("vacated target square");
                        Undo::Moved { actor, from }
                    }
                    Some(partner) => {
                        // Only a Jester may enter an occupied square, and
                        // only to swap with a friendly non-Jester piece.
                        let swap_ok = game.piece(actor).kind == PieceKind::Jester
                            && game.piece(partner).kind != PieceKind::Jester
                            && game.piece(partner).kind != PieceKind::Wall
                            && game.piece(partner).owner == game.piece(actor).owner;
                        if !swap_ok {
                            return None;
                        }
                        let partner_from = game.piece(partner).square?;
                        game.leave_board(actor);
                        game.leave_board(partner);
                        game.enter_board(actor, to).expect("vacated target square");
                        game.enter_board(partner, from).expect("vacated origin square");
                        Undo::Swapped {
                            actor,
                            from,
                            partner,
                            partner_from,
                        }
                    }
                }
            }
            Action::Attack { actor, target } => {
                let from = game.piece(actor).square?;
                let victim = game.occupant(target)?;
                if game.piece(actor).kind == PieceKind::Jester {
                    // The Jester converts rather than captures; nobody
                    // leaves the board.
                    game.defect(victim);
                    Undo::Defected { victim }
                } else {
                    game.leave_board(victim);
                    let relocated = game.piece(actor).kind != PieceKind::Catapult;
                    if relocated {
                        game.leave_board(actor);
                        game.enter_board(actor, target).expect("vacated target square");
                    }
                    Undo::Captured {
                        actor,
                        from,
                        victim,
                        target,
                        relocated,
                    }
                }
            }
            Action::BuildWall { actor: _, target } => {
                if game.occupant(target).is_some() {
                    return None;
                }
                let wall = game.spawn_wall(target).expect("free target square");
                Undo::WallBuilt { wall }
            }
            Action::DestroyWall { actor, target } => {
                let from = game.piece(actor).square?;
                let wall = game.occupant(target)?;
                if game.piece(wall).kind != PieceKind::Wall {
                    return None;
                }
                game.leave_board(wall);
                game.leave_board(actor);
                game.enter_board(actor, target).expect("vacated target square");
                Undo::WallRazed {
                    actor,
                    from,
                    wall,
                    target,
                }
            }
        };
        Some(Applied { action: self, undo })
    }
}

impl Applied {
    pub fn action(&self) -> Action {
        self.action
    }

    /// Restores board, squares, and pieces exactly to the pre-apply state,
    /// including swaps, defections, and wall creation.
    pub fn undo(self, game: &mut Game) {
        match self.undo {
            Undo::Moved { actor, from } => {
                game.leave_board(actor);
                game.enter_board(actor, from).expect("vacated origin square");
            }
            Undo::Swapped {
                actor,
                from,
                partner,
                partner_from,
            } => {
                game.leave_board(actor);
                game.leave_board(partner);
                game.enter_board(partner, partner_from)
                    .expect("vacated partner square");
                game.enter_board(actor, from).expect("vacated origin square");
            }
            Undo::Captured {
                actor,
                from,
                victim,
                target,
                relocated,
            } => {
                if relocated {
                    game.leave_board(actor);
                    game.enter_board(actor, from).expect("vacated origin square");
                }
                game.enter_board(victim, target)
                    .expect("vacated target square");
            }
            Undo::Defected { victim } => {
                // Defect is its own inverse.
                game.defect(victim);
            }
            Undo::WallBuilt { wall } => {
                game.discard_wall(wall);
            }
            Undo::WallRazed {
                actor,
                from,
                wall,
                target,
            } => {
                game.leave_board(actor);
                game.enter_board(actor, from).expect("vacated origin square");
                game.enter_board(wall, target).expect("vacated wall square");
            }
        }
    }

    /// Keeps the action applied, discarding the undo information. Used
    /// when a chosen action is played for real rather than searched.
    pub fn commit(self) {}
}

#[cfg(test)]
#[path = "action_tests.rs"]
mod action_tests;
