use grid_invaders::compute::new_game;
use grid_invaders::config::GameConfig;
use grid_invaders::entities::*;
use grid_invaders::error::GameError;
use grid_invaders::layout::*;

use rand::rngs::StdRng;
use rand::SeedableRng;

fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

// ── initialize ────────────────────────────────────────────────────────────────

#[test]
fn initialize_keeps_layout_order() {
    let layout = [
        Placement { row: 2, col: 1, kind: EntityKind::Blocker },
        Placement { row: 1, col: 6, kind: EntityKind::Destroyable },
    ];
    let entities = initialize(5, 7, &layout).unwrap();
    assert_eq!(
        entities,
        vec![
            Entity { row: 2, col: 1, kind: EntityKind::Blocker },
            Entity { row: 1, col: 6, kind: EntityKind::Destroyable },
        ]
    );
}

#[test]
fn initialize_rejects_player_row() {
    let layout = [Placement { row: PLAYER_ROW, col: 3, kind: EntityKind::Collectable }];
    assert!(matches!(initialize(5, 7, &layout), Err(GameError::Config(_))));
}

#[test]
fn initialize_empty_layout() {
    assert!(initialize(5, 7, &[]).unwrap().is_empty());
}

// ── cell_at / geometry ────────────────────────────────────────────────────────

#[test]
fn cell_at_finds_occupant() {
    let config = GameConfig {
        layout: vec![Placement { row: 3, col: 3, kind: EntityKind::Collectable }],
        ..GameConfig::with_size(5, 7)
    };
    let s = new_game(&config).unwrap();
    assert_eq!(cell_at(&s, 3, 3).map(|e| e.kind), Some(EntityKind::Collectable));
    assert!(cell_at(&s, 3, 2).is_none());
    assert!(cell_at(&s, 0, 3).is_none());
}

#[test]
fn field_excludes_player_row_and_edges() {
    assert!(!in_field(5, 7, 0, 3));
    assert!(in_field(5, 7, 1, 0));
    assert!(in_field(5, 7, 4, 6));
    assert!(!in_field(5, 7, 5, 0));
    assert!(!in_field(5, 7, 1, 7));
}

#[test]
fn player_col_is_floor_half() {
    assert_eq!(player_col(7), 3);
    assert_eq!(player_col(8), 4);
    assert_eq!(player_col(1), 0);
}

// ── random_layout ─────────────────────────────────────────────────────────────

#[test]
fn random_layout_is_always_loadable() {
    let mut rng = seeded_rng();
    for _ in 0..20 {
        let layout = random_layout(7, 7, 0.4, &mut rng);
        assert!(layout.iter().all(|p| in_field(7, 7, p.row, p.col)));
        let config = GameConfig {
            layout,
            ..GameConfig::default()
        };
        assert!(new_game(&config).is_ok());
    }
}

#[test]
fn random_layout_is_deterministic_per_seed() {
    let a = random_layout(6, 9, 0.5, &mut seeded_rng());
    let b = random_layout(6, 9, 0.5, &mut seeded_rng());
    assert_eq!(a, b);
}

#[test]
fn random_layout_density_bounds() {
    assert!(random_layout(7, 7, 0.0, &mut seeded_rng()).is_empty());
    assert!(random_layout(7, 7, -1.0, &mut seeded_rng()).is_empty());
    assert!(random_layout(7, 7, f64::NAN, &mut seeded_rng()).is_empty());
    // Fully packed: every field cell, none in the player row.
    assert_eq!(random_layout(7, 7, 1.0, &mut seeded_rng()).len(), 6 * 7);
    assert_eq!(random_layout(7, 7, 3.0, &mut seeded_rng()).len(), 6 * 7);
}

// ── validate_state ────────────────────────────────────────────────────────────

#[test]
fn fresh_game_is_valid() {
    let s = new_game(&GameConfig::default()).unwrap();
    assert!(validate_state(&s).is_ok());
}

#[test]
fn shot_beyond_grid_is_invalid() {
    let mut s = new_game(&GameConfig::with_size(5, 7)).unwrap();
    s.shots.push(Shot { row: 5, col: 3, kind: ShotKind::Collect });
    assert!(matches!(validate_state(&s), Err(GameError::InvalidOperation(_))));
}

#[test]
fn zero_advance_interval_is_invalid() {
    let mut s = new_game(&GameConfig::default()).unwrap();
    s.advance_interval = Some(0);
    assert!(matches!(validate_state(&s), Err(GameError::InvalidOperation(_))));
}

#[test]
fn more_than_one_shot_is_invalid() {
    let mut s = new_game(&GameConfig::with_size(5, 7)).unwrap();
    s.shots.push(Shot { row: 0, col: 3, kind: ShotKind::Destroy });
    assert!(validate_state(&s).is_ok());
    s.shots.push(Shot { row: 2, col: 3, kind: ShotKind::Collect });
    assert!(matches!(validate_state(&s), Err(GameError::InvalidOperation(_))));
}
