#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure bootstrap system that prepares the Castle Run experience.

use castle_run_core::{Command, SpawnPoint, Tuning};
use castle_run_world::{query, World};

/// Raised platforms as `(start_x, end_x, height above ground)`; tiles are laid
/// from `start_x` up to but excluding `end_x`.
const PLATFORMS: [(f32, f32, f32); 3] = [
    (400.0, 1_400.0, 80.0),
    (2_000.0, 2_300.0, 100.0),
    (2_800.0, 3_000.0, 60.0),
];

/// Coin rows as `(start_x, end_x, spacing, x offset, height above ground)`.
/// A missing spacing follows the tile width; a missing offset centres the
/// coin on its tile.
const COIN_ROWS: [(f32, f32, Option<f32>, Option<f32>, f32); 2] = [
    (450.0, 1_350.0, None, None, 100.0),
    (2_050.0, 2_250.0, Some(100.0), Some(25.0), 120.0),
];

const ENEMY_COLUMNS: [f32; 4] = [800.0, 1_600.0, 2_500.0, 3_400.0];

/// Static description of the default level.
#[derive(Clone, Debug, PartialEq)]
pub struct LevelLayout {
    /// Upper-left corners of every tile, ground row first.
    pub tiles: Vec<(f32, f32)>,
    /// Centres of every coin.
    pub coins: Vec<(f32, f32)>,
    /// Where enemies enter the level.
    pub enemy_spawns: Vec<SpawnPoint>,
    /// Horizontal position of the flag pole.
    pub goal_x: f32,
}

impl LevelLayout {
    /// Emits the commands that build the static part of the level.
    ///
    /// Enemies are left to the spawning system, which picks their initial
    /// direction.
    pub fn emit(&self, out: &mut Vec<Command>) {
        out.extend(self.tiles.iter().map(|&(x, y)| Command::PlaceTile { x, y }));
        out.extend(self.coins.iter().map(|&(x, y)| Command::PlaceCoin { x, y }));
        out.push(Command::PlaceGoal { x: self.goal_x });
    }
}

/// Produces data required to greet the player and build the level.
#[derive(Debug, Default)]
pub struct Bootstrap;

impl Bootstrap {
    /// Derives the banner that should be shown when the experience starts.
    #[must_use]
    pub fn welcome_banner<'world>(&self, world: &'world World) -> &'world str {
        query::welcome_banner(world)
    }

    /// Describes the default level scaled to the provided tuning.
    #[must_use]
    pub fn level_layout(&self, tuning: &Tuning) -> LevelLayout {
        let ground_y = tuning.ground_y;
        let mut tiles = row(0.0, tuning.world_width, tuning.tile_width)
            .map(|x| (x, ground_y))
            .collect::<Vec<_>>();
        for (start, end, height) in PLATFORMS {
            tiles.extend(row(start, end, tuning.tile_width).map(|x| (x, ground_y - height)));
        }

        let mut coins = Vec::new();
        for (start, end, spacing, offset, height) in COIN_ROWS {
            let spacing = spacing.unwrap_or(tuning.tile_width);
            let offset = offset.unwrap_or(tuning.tile_width / 2.0);
            coins.extend(row(start, end, spacing).map(|x| (x + offset, ground_y - height)));
        }

        let enemy_spawns = ENEMY_COLUMNS
            .iter()
            .map(|&x| SpawnPoint::new(x, ground_y))
            .collect();

        LevelLayout {
            tiles,
            coins,
            enemy_spawns,
            goal_x: tuning.goal_x(),
        }
    }

    /// Emits the full command batch that resets the world and builds the level.
    pub fn start_session(&self, tuning: &Tuning, out: &mut Vec<Command>) -> LevelLayout {
        out.push(Command::ConfigureWorld {
            tuning: tuning.clone(),
        });
        let layout = self.level_layout(tuning);
        layout.emit(out);
        layout
    }
}

/// Evenly spaced positions covering `[start, end)`.
fn row(start: f32, end: f32, spacing: f32) -> impl Iterator<Item = f32> {
    let count = if spacing > 0.0 && end > start {
        ((end - start) / spacing).ceil() as usize
    } else {
        0
    };
    (0..count).map(move |index| start + index as f32 * spacing)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_layout_matches_classic_level() {
        let layout = Bootstrap.level_layout(&Tuning::default());

        let ground = layout.tiles.iter().filter(|(_, y)| *y == 440.0).count();
        assert_eq!(ground, 110);
        assert_eq!(layout.tiles.len(), 110 + 20 + 6 + 4);
        assert!(layout.tiles.contains(&(400.0, 360.0)));
        assert!(layout.tiles.contains(&(2_250.0, 340.0)));
        assert!(layout.tiles.contains(&(2_950.0, 380.0)));
        assert!(!layout.tiles.contains(&(1_400.0, 360.0)));

        assert_eq!(layout.coins.len(), 20);
        assert_eq!(layout.coins[0], (475.0, 340.0));
        assert_eq!(layout.coins[17], (1_325.0, 340.0));
        assert_eq!(layout.coins[18], (2_075.0, 320.0));
        assert_eq!(layout.coins[19], (2_175.0, 320.0));

        assert_eq!(layout.enemy_spawns.len(), 4);
        assert_eq!(layout.enemy_spawns[2], SpawnPoint::new(2_500.0, 440.0));
        assert_eq!(layout.goal_x, 5_250.0);
    }

    #[test]
    fn first_coin_row_follows_tile_width() {
        let tuning = Tuning {
            tile_width: 60.0,
            ..Tuning::default()
        };
        let layout = Bootstrap.level_layout(&tuning);

        assert_eq!(layout.coins[0], (480.0, 340.0));
        assert_eq!(layout.coins[1], (540.0, 340.0));
        assert_eq!(layout.coins.len(), 15 + 2);
        assert_eq!(layout.coins[15], (2_075.0, 320.0));
    }

    #[test]
    fn start_session_configures_before_building() {
        let mut commands = Vec::new();
        let layout = Bootstrap.start_session(&Tuning::default(), &mut commands);

        assert!(matches!(commands.first(), Some(Command::ConfigureWorld { .. })));
        assert_eq!(commands.last(), Some(&Command::PlaceGoal { x: 5_250.0 }));
        assert_eq!(
            commands.len(),
            1 + layout.tiles.len() + layout.coins.len() + 1
        );
    }

    #[test]
    fn row_excludes_end_and_handles_empty_ranges() {
        assert_eq!(row(0.0, 150.0, 50.0).collect::<Vec<_>>(), vec![0.0, 50.0, 100.0]);
        assert_eq!(row(10.0, 10.0, 50.0).count(), 0);
        assert_eq!(row(0.0, 100.0, 0.0).count(), 0);
    }

    #[test]
    fn welcome_banner_comes_from_world() {
        let world = World::new();
        assert_eq!(Bootstrap.welcome_banner(&world), "Welcome to Castle Run.");
    }
}
