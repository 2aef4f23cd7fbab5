/// Grid placement rules.
///
/// Row 0 belongs to the player; rows `1..rows` hold entities, at most one
/// per cell. Everything here is read-only over a `GameState` except
/// `initialize`, which builds the starting entity list.

use std::collections::HashSet;

use log::warn;
use rand::Rng;
use serde::Deserialize;

use crate::entities::{Entity, EntityKind, GameState};
use crate::error::{GameError, Result};

pub const PLAYER_ROW: usize = 0;

/// One entry of a starting layout.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Placement {
    pub row: usize,
    pub col: usize,
    pub kind: EntityKind,
}

pub fn player_col(cols: usize) -> usize {
    cols / 2
}

/// True for cells an entity may occupy.
pub fn in_field(rows: usize, cols: usize, row: usize, col: usize) -> bool {
    row > PLAYER_ROW && row < rows && col < cols
}

/// Turn a layout into entities, rejecting anything off the field, in the
/// player row, or sharing a cell.
pub fn initialize(rows: usize, cols: usize, layout: &[Placement]) -> Result<Vec<Entity>> {
    let mut occupied = HashSet::with_capacity(layout.len());
    let mut entities = Vec::with_capacity(layout.len());

    for p in layout {
        let problem = if p.row == PLAYER_ROW {
            Some(format!("{:?} at ({}, {}) sits in the player row", p.kind, p.row, p.col))
        } else if !in_field(rows, cols, p.row, p.col) {
            Some(format!(
                "{:?} at ({}, {}) is outside the {}x{} grid",
                p.kind, p.row, p.col, rows, cols
            ))
        } else if !occupied.insert((p.row, p.col)) {
            Some(format!("two entities placed at ({}, {})", p.row, p.col))
        } else {
            None
        };

        if let Some(msg) = problem {
            warn!("rejecting layout: {}", msg);
            return Err(GameError::Config(msg));
        }

        entities.push(Entity {
            row: p.row,
            col: p.col,
            kind: p.kind,
        });
    }

    Ok(entities)
}

/// The entity in a cell, if any.
pub fn cell_at(state: &GameState, row: usize, col: usize) -> Option<&Entity> {
    state.entities.iter().find(|e| e.row == row && e.col == col)
}

/// Scatter entities over the field. Each cell is filled with probability
/// `density`; one in eight filled cells is a Blocker, the rest are split
/// evenly between Destroyables and Collectables.
pub fn random_layout(rows: usize, cols: usize, density: f64, rng: &mut impl Rng) -> Vec<Placement> {
    if density.is_nan() || density <= 0.0 {
        return Vec::new();
    }
    let density = density.min(1.0);

    let mut layout = Vec::new();
    for row in 1..rows {
        for col in 0..cols {
            if !rng.gen_bool(density) {
                continue;
            }
            let kind = if rng.gen_ratio(1, 8) {
                EntityKind::Blocker
            } else if rng.gen_bool(0.5) {
                EntityKind::Destroyable
            } else {
                EntityKind::Collectable
            };
            layout.push(Placement { row, col, kind });
        }
    }
    layout
}

/// Check that a state handed back by a caller still satisfies the grid
/// invariants the engine relies on.
pub fn validate_state(state: &GameState) -> Result<()> {
    let invalid = |msg: String| Err(GameError::InvalidOperation(msg));

    if state.rows < 2 || state.cols == 0 {
        return invalid(format!("grid {}x{} is too small", state.rows, state.cols));
    }
    if state.player.col != player_col(state.cols) {
        return invalid(format!(
            "player at column {}, expected {}",
            state.player.col,
            player_col(state.cols)
        ));
    }
    if state.collection_target == 0 {
        return invalid("collection target is zero".to_string());
    }
    if state.advance_interval == Some(0) {
        return invalid("advance interval is zero".to_string());
    }

    let mut occupied = HashSet::with_capacity(state.entities.len());
    for e in &state.entities {
        if !in_field(state.rows, state.cols, e.row, e.col) {
            return invalid(format!("{:?} at ({}, {}) is off the field", e.kind, e.row, e.col));
        }
        if !occupied.insert((e.row, e.col)) {
            return invalid(format!("cell ({}, {}) holds two entities", e.row, e.col));
        }
    }

    if state.shots.len() > 1 {
        return invalid(format!("{} shots in flight, at most one allowed", state.shots.len()));
    }
    for s in &state.shots {
        if s.row >= state.rows || s.col != state.player.col {
            return invalid(format!("{:?} shot at ({}, {}) is off its lane", s.kind, s.row, s.col));
        }
    }

    Ok(())
}
