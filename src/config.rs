/// Game configuration: grid size, starting layout and rule knobs.
///
/// Every field has a default, so a config file only needs to name what it
/// changes:
///
/// ```toml
/// rows = 5
/// cols = 7
/// rules = "lives"
/// collection_target = 3
///
/// [[layout]]
/// row = 3
/// col = 3
/// kind = "collectable"
/// ```

use std::path::Path;

use log::warn;
use serde::Deserialize;

use crate::entities::RuleSet;
use crate::error::{GameError, Result};
use crate::layout::Placement;

/// Rows and columns of the default (square) grid.
pub const DEFAULT_GRID_SIZE: usize = 7;

/// Collectables needed to win.
pub const DEFAULT_COLLECTION_TARGET: u32 = 7;

/// Starting lives under `RuleSet::Lives` when the config does not say.
pub const LIVES_RULE_STARTING_LIVES: u32 = 2;

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GameConfig {
    pub rows: usize,
    pub cols: usize,
    pub layout: Vec<Placement>,
    pub collection_target: u32,
    /// Starting lives; only honoured under `RuleSet::Lives`.
    pub lives: Option<u32>,
    pub rules: RuleSet,
    /// Move every entity one row toward the player every `n` ticks.
    pub advance_interval: Option<u32>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            rows: DEFAULT_GRID_SIZE,
            cols: DEFAULT_GRID_SIZE,
            layout: Vec::new(),
            collection_target: DEFAULT_COLLECTION_TARGET,
            lives: None,
            rules: RuleSet::default(),
            advance_interval: None,
        }
    }
}

impl GameConfig {
    pub fn with_size(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            ..Self::default()
        }
    }

    pub fn with_rules(self, rules: RuleSet) -> Self {
        Self { rules, ..self }
    }

    pub fn from_toml_str(contents: &str) -> Result<Self> {
        toml::from_str(contents).map_err(|e| GameError::Config(e.to_string()))
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .map_err(|e| GameError::Config(format!("{}: {}", path.display(), e)))?;
        Self::from_toml_str(&contents).map_err(|e| match e {
            GameError::Config(msg) => GameError::Config(format!("{}: {}", path.display(), msg)),
            other => other,
        })
    }

    pub fn starting_lives(&self) -> u32 {
        match self.rules {
            RuleSet::Lives => self.lives.unwrap_or(LIVES_RULE_STARTING_LIVES),
            RuleSet::Basic | RuleSet::Advanced => 1,
        }
    }

    /// Checks the scalar settings. The layout is checked separately by
    /// `layout::initialize` since it needs the grid dimensions.
    pub fn validate(&self) -> Result<()> {
        let problem = if self.rows < 2 {
            Some(format!("grid needs at least 2 rows, got {}", self.rows))
        } else if self.cols == 0 {
            Some("grid needs at least 1 column".to_string())
        } else if self.collection_target == 0 {
            Some("collection target must be positive".to_string())
        } else if self.lives.is_some() && self.rules != RuleSet::Lives {
            Some(format!("lives can only be set with the lives rules, not {:?}", self.rules))
        } else if self.starting_lives() == 0 {
            Some("starting lives must be positive".to_string())
        } else if self.advance_interval == Some(0) {
            Some("advance interval must be positive".to_string())
        } else {
            None
        };

        match problem {
            Some(msg) => {
                warn!("rejecting config: {}", msg);
                Err(GameError::Config(msg))
            }
            None => Ok(()),
        }
    }
}
