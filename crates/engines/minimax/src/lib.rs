//! Minimax Advance Engine
//!
//! Four-step turn selection: full legal enumeration, a one-ply checkmate
//! probe, a material-advantage filter, and a bounded alpha-beta minimax
//! over the surviving tie pool. The search mutates the shared board
//! through reversible actions and restores it before returning.

use advance_core::rules::{evaluate, find_possible_actions, is_checkmate, is_general_safe};
use advance_core::{Action, Colour, Engine, Game, PieceKind, SearchError};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;


/// Search horizon in plies, counting the candidate action itself.
const MAX_DEPTH: u32 = 3;

/// A defection is worth this multiple of the converted piece's value.
const DEFECT_BONUS: i32 = 10;

/// Engine that picks one action per turn by material-pruned minimax.
///
/// White maximises and Black minimises the signed material evaluation.
/// Interior search nodes expand only the material-advantage pool of the
/// side to move, so the tree is a narrowed greedy tree rather than the
/// full game tree. Ties at the best score are broken uniformly at random.
#[derive(Debug)]
pub struct MinimaxEngine {
    rng: StdRng,
}

impl MinimaxEngine {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Fixed-seed construction for reproducible tie-breaking.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for MinimaxEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine for MinimaxEngine {
    fn choose_action(&mut self, game: &mut Game, colour: Colour) -> Result<Action, SearchError> {
        let actions = find_possible_actions(game, colour);
        if actions.is_empty() {
            return Err(SearchError::Stalemate);
        }
        if actions.len() == 1 {
            return Ok(actions[0]);
        }

        if let Some(action) = checkmate_action(game, colour, &actions) {
            return Ok(action);
        }

        let pool = material_advantage_actions(game, colour, &actions);
        match pool.len() {
            0 => Err(SearchError::NoDecision),
            1 => Ok(pool[0]),
            _ => Ok(self.search_pool(game, colour, &pool)),
        }
    }

    fn name(&self) -> &str {
        "Minimax v1.0"
    }
}

impl MinimaxEngine {
    /// Step 4: depth-bounded minimax over the tied pool. Candidates whose
    /// subtree resolves to the mover's own loss sentinel are skipped; a
    /// forced-mate score ends the scan at once.
    fn search_pool(&mut self, game: &mut Game, colour: Colour, pool: &[Action]) -> Action {
        let loss = loss_score(colour);
        let win = win_score(colour);
        let mut ties: Vec<Action> = Vec::new();
        let mut best = loss;

        for &action in pool {
            let applied = match action.apply(game) {
                Some(applied) => applied,
                None => continue,
            };
            let score = minimax(game, colour.other(), MAX_DEPTH - 1, i32::MIN, i32::MAX);
            applied.undo(game);

            if score == win {
                return action;
            }
            if score == loss {
                continue;
            }
            if better(colour, score, best) {
                best = score;
                ties.clear();
                ties.push(action);
            } else if score == best {
                ties.push(action);
            }
        }

        // Every candidate loses by force; any of them will do.
        match ties.choose(&mut self.rng) {
            Some(&action) => action,
            None => match pool.choose(&mut self.rng) {
                Some(&action) => action,
                None => pool[0],
            },
        }
    }
}

/// Step 2: the one-ply checkmate probe. A candidate mates when, once
/// applied, the mover's General stays safe and the opponent has no legal
/// response that rescues theirs.
fn checkmate_action(game: &mut Game, colour: Colour, actions: &[Action]) -> Option<Action> {
    for &action in actions {
        let applied = match action.apply(game) {
            Some(applied) => applied,
            None => continue,
        };
        let mates = is_general_safe(game, colour) && is_checkmate(game, colour.other());
        applied.undo(game);
        if mates {
            return Some(action);
        }
    }
    None
}

/// Step 3: the material-advantage filter. Scores every action by the
/// mover's evaluation after it plus the captured value, and keeps only
/// the actions tied at the maximum.
fn material_advantage_actions(game: &mut Game, colour: Colour, actions: &[Action]) -> Vec<Action> {
    let mut pool: Vec<Action> = Vec::new();
    let mut best = i32::MIN;
    for &action in actions {
        let bonus = capture_bonus(game, action);
        let applied = match action.apply(game) {
            Some(applied) => applied,
            None => continue,
        };
        let score = evaluate(game, colour) + bonus;
        applied.undo(game);

        if score > best {
            best = score;
            pool.clear();
            pool.push(action);
        } else if score == best {
            pool.push(action);
        }
    }
    pool
}

/// Value of the piece an attack removes (or converts). Defection by a
/// Jester is scored at a premium over plain capture.
fn capture_bonus(game: &Game, action: Action) -> i32 {
    match action {
        Action::Attack { actor, target } => match game.occupant_piece(target) {
            Some(victim) => {
                let value = victim.kind.value();
                if game.piece(actor).kind == PieceKind::Jester {
                    value * DEFECT_BONUS
                } else {
                    value
                }
            }
            None => 0,
        },
        _ => 0,
    }
}

/// Interior minimax node for the side `to_move`. Expands the
/// material-advantage pool only, with alpha-beta pruning.
fn minimax(game: &mut Game, to_move: Colour, depth: u32, mut alpha: i32, mut beta: i32) -> i32 {
    if depth == 0 {
        return evaluate(game, to_move);
    }

    let actions = find_possible_actions(game, to_move);
    let pool = material_advantage_actions(game, to_move, &actions);
    if pool.is_empty() {
        // No continuation at all: the side to move is lost.
        return loss_score(to_move);
    }

    let mut best = loss_score(to_move);
    for action in pool {
        let applied = match action.apply(game) {
            Some(applied) => applied,
            None => continue,
        };
        let score = minimax(game, to_move.other(), depth - 1, alpha, beta);
        applied.undo(game);

        if better(to_move, score, best) {
            best = score;
        }
        match to_move {
            Colour::White => alpha = alpha.max(best),
            Colour::Black => beta = beta.min(best),
        }
        if beta <= alpha {
            break;
        }
    }
    best
}

fn better(colour: Colour, candidate: i32, best: i32) -> bool {
    match colour {
        Colour::White => candidate > best,
        Colour::Black => candidate < best,
    }
}

/// Sentinel meaning `colour` is lost within the horizon.
fn loss_score(colour: Colour) -> i32 {
    match colour {
        Colour::White => i32::MIN,
        Colour::Black => i32::MAX,
    }
}

/// Sentinel meaning `colour` forces a win within the horizon.
fn win_score(colour: Colour) -> i32 {
    match colour {
        Colour::White => i32::MAX,
        Colour::Black => i32::MIN,
    }
}
