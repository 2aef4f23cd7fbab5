/// Pure game-logic functions.
///
/// Every public function takes an immutable reference to the current
/// `GameState` and returns a brand-new `GameState`.  A game that is already
/// won or lost is never changed: every call returns an identical copy.
///
/// `handle_key` and `tick` are the entry points for front ends. They check
/// the incoming state first, apply one step, then settle the outcome.

use log::{debug, info};

use crate::config::GameConfig;
use crate::entities::{
    Direction, Entity, EntityKind, GameState, Key, Outcome, Player, RenderState, Shot, ShotKind,
};
use crate::error::Result;
use crate::layout::{self, PLAYER_ROW};

// ── Shot × entity table ──────────────────────────────────────────────────────

/// What happens when a shot enters a cell holding an entity.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Interaction {
    /// Shot and entity are both removed.
    Consume,
    /// Shot is removed, entity stays.
    Absorb,
    /// Nothing happens; the shot keeps going next tick.
    PassThrough,
}

pub fn interaction(shot: ShotKind, entity: EntityKind) -> Interaction {
    match (shot, entity) {
        (_, EntityKind::Blocker) => Interaction::Absorb,
        (ShotKind::Destroy, EntityKind::Destroyable) => Interaction::Consume,
        (ShotKind::Collect, EntityKind::Collectable) => Interaction::Consume,
        (ShotKind::Destroy, EntityKind::Collectable) => Interaction::PassThrough,
        (ShotKind::Collect, EntityKind::Destroyable) => Interaction::PassThrough,
    }
}

// ── Constructors ─────────────────────────────────────────────────────────────

/// Build the initial game state from a configuration.
pub fn new_game(config: &GameConfig) -> Result<GameState> {
    config.validate()?;
    let entities = layout::initialize(config.rows, config.cols, &config.layout)?;

    let state = GameState {
        rows: config.rows,
        cols: config.cols,
        player: Player {
            col: layout::player_col(config.cols),
            lives: config.starting_lives(),
            collected: 0,
        },
        entities,
        shots: Vec::new(),
        outcome: Outcome::InProgress,
        collection_target: config.collection_target,
        rules: config.rules,
        advance_interval: config.advance_interval,
        destroyed: 0,
        shots_fired: 0,
        tick_count: 0,
    };

    info!(
        "new {}x{} game: {} entities, target {}, {} lives, {:?} rules",
        state.rows,
        state.cols,
        state.entities.len(),
        state.collection_target,
        state.player.lives,
        state.rules
    );
    Ok(state)
}

// ── Movement ─────────────────────────────────────────────────────────────────

/// Shift every entity one column, wrapping at the edges. All columns are
/// recomputed from the old state at once, so relative order is preserved.
pub fn rotate(state: &GameState, direction: Direction) -> GameState {
    if state.outcome.is_terminal() {
        return state.clone();
    }

    let cols = state.cols;
    let entities = state
        .entities
        .iter()
        .map(|e| Entity {
            col: match direction {
                Direction::Left => (e.col + cols - 1) % cols,
                Direction::Right => (e.col + 1) % cols,
            },
            ..e.clone()
        })
        .collect();

    GameState {
        entities,
        ..state.clone()
    }
}

/// Move every entity one row toward the player. Any shot now sharing a
/// cell with an entity resolves against it, then the outcome is settled
/// (which is where arrivals in the player row are handled).
pub fn advance_entities(state: &GameState) -> GameState {
    if state.outcome.is_terminal() {
        return state.clone();
    }

    let mut next = GameState {
        entities: state
            .entities
            .iter()
            .map(|e| Entity {
                row: e.row.saturating_sub(1),
                ..e.clone()
            })
            .collect(),
        shots: Vec::new(),
        ..state.clone()
    };

    for shot in &state.shots {
        if shot.row == PLAYER_ROW {
            next.shots.push(shot.clone());
        } else if let Some(kept) = resolve_shot(&mut next, shot.clone()) {
            next.shots.push(kept);
        }
    }

    evaluate_outcome(&next)
}

// ── Shots ────────────────────────────────────────────────────────────────────

/// Spawn a shot in the player's cell. Ignored while another shot is still
/// in flight in the player's column.
pub fn fire(state: &GameState, kind: ShotKind) -> GameState {
    if state.outcome.is_terminal() {
        return state.clone();
    }

    let col = state.player.col;
    if state.shots.iter().any(|s| s.col == col) {
        debug!("ignoring {:?} shot: column {} already has one in flight", kind, col);
        return state.clone();
    }

    let mut shots = state.shots.clone();
    shots.push(Shot {
        row: PLAYER_ROW,
        col,
        kind,
    });

    GameState {
        shots,
        shots_fired: state.shots_fired + 1,
        ..state.clone()
    }
}

/// Move every shot one row away from the player and resolve the cell it
/// enters. Shots leaving the far edge are dropped. Shots are processed in
/// firing order.
pub fn advance_all_shots(state: &GameState) -> GameState {
    if state.outcome.is_terminal() {
        return state.clone();
    }

    let mut next = GameState {
        shots: Vec::with_capacity(state.shots.len()),
        ..state.clone()
    };

    for shot in &state.shots {
        let row = shot.row + 1;
        if row >= state.rows {
            debug!("{:?} shot left the grid in column {}", shot.kind, shot.col);
            continue;
        }
        if let Some(kept) = resolve_shot(&mut next, Shot { row, ..shot.clone() }) {
            next.shots.push(kept);
        }
    }

    evaluate_outcome(&next)
}

/// Apply the interaction table to the entity in the shot's cell. Returns
/// the shot if it survives.
fn resolve_shot(state: &mut GameState, shot: Shot) -> Option<Shot> {
    let Some(index) = state
        .entities
        .iter()
        .position(|e| e.row == shot.row && e.col == shot.col)
    else {
        return Some(shot);
    };

    let target = state.entities[index].kind;
    match interaction(shot.kind, target) {
        Interaction::PassThrough => {
            debug!("{:?} shot passed through {:?} at ({}, {})", shot.kind, target, shot.row, shot.col);
            Some(shot)
        }
        Interaction::Absorb => {
            debug!("{:?} shot stopped by {:?} at ({}, {})", shot.kind, target, shot.row, shot.col);
            None
        }
        Interaction::Consume => {
            state.entities.remove(index);
            match target {
                EntityKind::Collectable => state.player.collected += 1,
                EntityKind::Destroyable => state.destroyed += 1,
                EntityKind::Blocker => {}
            }
            None
        }
    }
}

// ── Win / loss ───────────────────────────────────────────────────────────────

/// Settle the outcome. Every Destroyable in the player row costs a life
/// and is removed, as is any other entity there. Running out of lives
/// loses the game; otherwise reaching the collection target wins it.
pub fn evaluate_outcome(state: &GameState) -> GameState {
    if state.outcome.is_terminal() {
        return state.clone();
    }

    let (intruders, entities): (Vec<Entity>, Vec<Entity>) = state
        .entities
        .iter()
        .cloned()
        .partition(|e| e.row == PLAYER_ROW);

    let hits = intruders
        .iter()
        .filter(|e| e.kind == EntityKind::Destroyable)
        .count() as u32;
    let lives = state.player.lives.saturating_sub(hits);
    if hits > 0 {
        info!("{} destroyable(s) reached the player row, {} lives left", hits, lives);
    }

    let outcome = if lives == 0 {
        Outcome::Lost
    } else if state.player.collected >= state.collection_target {
        Outcome::Won
    } else {
        Outcome::InProgress
    };
    if outcome.is_terminal() {
        info!(
            "game {:?} after {} ticks: {} collected, {} destroyed, {} shots",
            outcome, state.tick_count, state.player.collected, state.destroyed, state.shots_fired
        );
    }

    GameState {
        player: Player {
            lives,
            ..state.player.clone()
        },
        entities,
        outcome,
        ..state.clone()
    }
}

// ── Front-end entry points ───────────────────────────────────────────────────

/// Apply one key press.
pub fn handle_key(state: &GameState, key: Key) -> Result<GameState> {
    if state.outcome.is_terminal() {
        return Ok(state.clone());
    }
    layout::validate_state(state)?;

    let next = match key {
        Key::RotateLeft => rotate(state, Direction::Left),
        Key::RotateRight => rotate(state, Direction::Right),
        Key::FireDestroy => fire(state, ShotKind::Destroy),
        Key::FireCollect => fire(state, ShotKind::Collect),
    };
    Ok(evaluate_outcome(&next))
}

/// Advance the simulation by one timer tick: shots first, then (if the game
/// is configured for it) the periodic entity advance.
pub fn tick(state: &GameState) -> Result<GameState> {
    if state.outcome.is_terminal() {
        return Ok(state.clone());
    }
    layout::validate_state(state)?;

    let tick_count = state.tick_count + 1;
    let next = advance_all_shots(state);
    let next = match state.advance_interval {
        Some(n) if tick_count % u64::from(n) == 0 => advance_entities(&next),
        _ => next,
    };

    Ok(GameState { tick_count, ..next })
}

/// Snapshot for renderers.
pub fn render_state(state: &GameState) -> RenderState {
    RenderState {
        rows: state.rows,
        cols: state.cols,
        player_col: state.player.col,
        entities: state.entities.clone(),
        shots: state.shots.clone(),
        collected: state.player.collected,
        collection_target: state.collection_target,
        lives: state.player.lives,
        destroyed: state.destroyed,
        shots_fired: state.shots_fired,
        tick_count: state.tick_count,
        rules: state.rules,
        outcome: state.outcome,
    }
}
