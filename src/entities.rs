/// All game entity types — pure data, no logic.

use serde::Deserialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Destroyable,
    Collectable,
    Blocker,
}

impl EntityKind {
    /// Single-letter tag used by text renderings and config files.
    pub fn symbol(self) -> char {
        match self {
            EntityKind::Destroyable => 'D',
            EntityKind::Collectable => 'C',
            EntityKind::Blocker => 'B',
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ShotKind {
    Destroy,
    Collect,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
}

/// Discrete inputs the presentation layer forwards to `compute::handle_key`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Key {
    RotateLeft,
    RotateRight,
    FireDestroy,
    FireCollect,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    InProgress,
    Won,
    Lost,
}

impl Outcome {
    pub fn is_terminal(self) -> bool {
        self != Outcome::InProgress
    }
}

/// Which of the three rule sets a game runs under.
///
/// `Basic` and `Advanced` share every rule; only `Lives` changes core
/// behaviour (more than one life by default).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleSet {
    #[default]
    Basic,
    Advanced,
    Lives,
}

// ── Grid occupants ────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Entity {
    pub row: usize,
    pub col: usize,
    pub kind: EntityKind,
}

/// A projectile moving away from the player along a fixed column.
/// `row` is the last cell the shot resolved against; a fresh shot sits in
/// the player's own cell.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Shot {
    pub row: usize,
    pub col: usize,
    pub kind: ShotKind,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Player {
    /// Always `cols / 2`; the player never moves.
    pub col: usize,
    pub lives: u32,
    pub collected: u32,
}

// ── Master game state ─────────────────────────────────────────────────────────

/// The entire game state.  Cloneable so pure update functions can
/// return a new copy without mutating the original.
#[derive(Clone, Debug, PartialEq)]
pub struct GameState {
    pub rows: usize,
    pub cols: usize,
    pub player: Player,
    /// Non-player occupants. At most one per cell, never in row 0.
    pub entities: Vec<Entity>,
    pub shots: Vec<Shot>,
    pub outcome: Outcome,
    pub collection_target: u32,
    pub rules: RuleSet,
    /// Ticks between automatic entity advances; `None` keeps entities on
    /// their starting rows for the whole game.
    pub advance_interval: Option<u32>,
    /// Destroyables removed by Destroy shots.
    pub destroyed: u32,
    /// Fire requests that actually produced a shot.
    pub shots_fired: u32,
    pub tick_count: u64,
}

/// Read-only view handed to renderers.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderState {
    pub rows: usize,
    pub cols: usize,
    pub player_col: usize,
    pub entities: Vec<Entity>,
    pub shots: Vec<Shot>,
    pub collected: u32,
    pub collection_target: u32,
    pub lives: u32,
    pub destroyed: u32,
    pub shots_fired: u32,
    pub tick_count: u64,
    pub rules: RuleSet,
    pub outcome: Outcome,
}
