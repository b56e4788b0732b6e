#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative world state management for Castle Run.

mod camera;
mod enemies;
mod level;
mod player;

use std::time::Duration;

use castle_run_core::{
    Command, Event, LossCause, Outcome, Rect, SessionState, Tuning, WELCOME_BANNER,
};

use self::{camera::Camera, enemies::EnemyArena, level::Level, player::Player};

pub use enemies::EnemyState;

/// Represents the authoritative Castle Run world state.
#[derive(Debug)]
pub struct World {
    banner: &'static str,
    tuning: Tuning,
    level: Level,
    enemies: EnemyArena,
    player: Player,
    camera: Camera,
    state: SessionState,
    tick_index: u64,
}

impl World {
    /// Creates an empty world governed by the default tuning.
    #[must_use]
    pub fn new() -> Self {
        Self::with_tuning(Tuning::default())
    }

    fn with_tuning(tuning: Tuning) -> Self {
        let player = Player::spawn(&tuning);
        let mut camera = Camera::default();
        camera.follow(&player.rect, tuning.screen_width, tuning.camera_max_offset());
        Self {
            banner: WELCOME_BANNER,
            level: Level::new(),
            enemies: EnemyArena::new(),
            player,
            camera,
            state: SessionState::Running,
            tick_index: 0,
            tuning,
        }
    }

    fn tick(&mut self, dt: Duration, out_events: &mut Vec<Event>) {
        if self.state.is_over() {
            return;
        }

        self.tick_index = self.tick_index.saturating_add(1);
        out_events.push(Event::TimeAdvanced { dt });

        let seconds = dt.as_secs_f32();
        let tuning = &self.tuning;

        self.player.integrate(seconds, tuning);
        if self.player.land_on(self.level.tiles()) {
            out_events.push(Event::PlayerLanded);
        }

        let mut collected = Vec::new();
        self.level
            .collect_overlapping(&self.player.rect, &mut collected);
        for coin in collected {
            let score = self.player.award(tuning.coin_reward);
            out_events.push(Event::CoinCollected { coin, score });
        }

        let mut fatal_contact = false;
        for enemy in self.enemies.iter_live_mut() {
            if !enemy.rect.intersects(&self.player.rect) {
                continue;
            }

            if self.player.is_descending() {
                enemy.alive = false;
                self.player.bounce(tuning.stomp_bounce());
                let score = self.player.award(tuning.stomp_reward);
                out_events.push(Event::EnemyStomped {
                    enemy: enemy.id,
                    score,
                });
            } else {
                fatal_contact = true;
            }
        }

        self.enemies.patrol(
            seconds,
            self.level.tiles(),
            tuning.enemy_probe_height,
            tuning.gravity,
            |enemy, direction| out_events.push(Event::EnemyTurned { enemy, direction }),
        );

        let outcome = self.resolve_outcome(fatal_contact);

        self.player.clamp_to_world(self.tuning.player_max_x());
        self.camera.follow(
            &self.player.rect,
            self.tuning.screen_width,
            self.tuning.camera_max_offset(),
        );

        if let Some(outcome) = outcome {
            self.state = SessionState::from_outcome(outcome);
            out_events.push(Event::SessionEnded {
                outcome,
                score: self.player.score,
            });
        }
    }

    /// Falling off the screen takes precedence over reaching the castle, which
    /// takes precedence over touching an enemy.
    fn resolve_outcome(&self, fatal_contact: bool) -> Option<Outcome> {
        let rect = self.player.rect;
        let passed_goal = self
            .level
            .goal_x()
            .is_some_and(|goal_x| rect.x() > goal_x + self.tuning.goal_offset);

        if rect.y() > self.tuning.screen_height {
            Some(Outcome::Lost(LossCause::Fell))
        } else if passed_goal {
            Some(Outcome::Won)
        } else if fatal_contact {
            Some(Outcome::Lost(LossCause::EnemyContact))
        } else {
            None
        }
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::ConfigureWorld { tuning } => {
            *world = World::with_tuning(tuning);
            out_events.push(Event::WorldConfigured);
        }
        Command::PlaceTile { x, y } => {
            let rect = Rect::new(x, y, world.tuning.tile_width, world.tuning.tile_height);
            let tile = world.level.place_tile(rect);
            out_events.push(Event::TilePlaced { tile });
        }
        Command::PlaceCoin { x, y } => {
            let coin = world
                .level
                .place_coin(x, y, world.tuning.coin_pickup_radius);
            out_events.push(Event::CoinPlaced { coin });
        }
        Command::SpawnEnemy {
            x,
            ground_y,
            direction,
        } => {
            let enemy = world.enemies.spawn(
                x,
                ground_y,
                direction,
                &world.tuning,
                world.level.tiles(),
            );
            out_events.push(Event::EnemySpawned { enemy, direction });
        }
        Command::PlaceGoal { x } => {
            world.level.set_goal(x);
            out_events.push(Event::GoalPlaced { x });
        }
        Command::SetHorizontalIntent { intent } => {
            world.player.intent = intent;
        }
        Command::Jump => {
            if world.state.is_over() {
                return;
            }
            if world.player.try_jump(world.tuning.jump_impulse) {
                out_events.push(Event::PlayerJumped);
            }
        }
        Command::Tick { dt } => world.tick(dt, out_events),
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use castle_run_core::{
        CoinId, Direction, EnemyId, HorizontalIntent, Rect, SessionState, TileId, Tuning,
    };

    use super::{EnemyState, World};

    /// Retrieves the welcome banner that adapters may display to players.
    #[must_use]
    pub fn welcome_banner(world: &World) -> &'static str {
        world.banner
    }

    /// Provides read-only access to the tuning that governs the world.
    #[must_use]
    pub fn tuning(world: &World) -> &Tuning {
        &world.tuning
    }

    /// Current lifecycle state of the session.
    #[must_use]
    pub fn session_state(world: &World) -> SessionState {
        world.state
    }

    /// Number of ticks simulated since the world was configured.
    #[must_use]
    pub fn tick_index(world: &World) -> u64 {
        world.tick_index
    }

    /// Horizontal camera offset computed on the most recent tick.
    #[must_use]
    pub fn camera_offset(world: &World) -> f32 {
        world.camera.offset()
    }

    /// Horizontal position of the flag pole, if one was placed.
    #[must_use]
    pub fn goal_x(world: &World) -> Option<f32> {
        world.level.goal_x()
    }

    /// Captures the player's current state.
    #[must_use]
    pub fn player(world: &World) -> PlayerSnapshot {
        let player = &world.player;
        PlayerSnapshot {
            rect: player.rect,
            velocity_y: player.velocity_y,
            grounded: player.grounded,
            intent: player.intent,
            score: player.score,
        }
    }

    /// Iterates over the level's tiles in placement order.
    pub fn tiles(world: &World) -> impl Iterator<Item = TileSnapshot> + '_ {
        world.level.tiles().iter().map(|tile| TileSnapshot {
            id: tile.id,
            rect: tile.rect,
        })
    }

    /// Captures a read-only view of every coin, collected or not.
    #[must_use]
    pub fn coin_view(world: &World) -> CoinView {
        let snapshots = world
            .level
            .coins()
            .iter()
            .map(|coin| CoinSnapshot {
                id: coin.id,
                center_x: coin.center_x,
                center_y: coin.center_y,
                collected: coin.collected,
            })
            .collect();
        CoinView { snapshots }
    }

    /// Captures a read-only view of every enemy, dead or alive.
    #[must_use]
    pub fn enemy_view(world: &World) -> EnemyView {
        let snapshots = world
            .enemies
            .iter()
            .map(|enemy| EnemySnapshot {
                id: enemy.id,
                rect: enemy.rect,
                direction: Direction::from_velocity(enemy.velocity_x),
                state: enemy.state(),
            })
            .collect();
        EnemyView { snapshots }
    }

    /// Immutable representation of the player used for queries.
    #[derive(Clone, Copy, Debug, PartialEq)]
    pub struct PlayerSnapshot {
        /// World-space bounding box.
        pub rect: Rect,
        /// Vertical velocity; positive values point downward.
        pub velocity_y: f32,
        /// Whether the player rests on a tile.
        pub grounded: bool,
        /// Horizontal movement held this frame.
        pub intent: HorizontalIntent,
        /// Accumulated score.
        pub score: u32,
    }

    /// Immutable representation of a tile.
    #[derive(Clone, Copy, Debug, PartialEq)]
    pub struct TileSnapshot {
        /// Identifier assigned to the tile.
        pub id: TileId,
        /// World-space bounds.
        pub rect: Rect,
    }

    /// Immutable representation of a coin.
    #[derive(Clone, Copy, Debug, PartialEq)]
    pub struct CoinSnapshot {
        /// Identifier assigned to the coin.
        pub id: CoinId,
        /// Horizontal centre.
        pub center_x: f32,
        /// Vertical centre.
        pub center_y: f32,
        /// Whether the coin was already picked up.
        pub collected: bool,
    }

    /// Read-only snapshot describing all coins in arena order.
    #[derive(Clone, Debug)]
    pub struct CoinView {
        snapshots: Vec<CoinSnapshot>,
    }

    impl CoinView {
        /// Iterator over the captured coin snapshots.
        pub fn iter(&self) -> impl Iterator<Item = &CoinSnapshot> {
            self.snapshots.iter()
        }

        /// Iterator over coins that are still waiting to be collected.
        pub fn uncollected(&self) -> impl Iterator<Item = &CoinSnapshot> {
            self.snapshots.iter().filter(|coin| !coin.collected)
        }

        /// Consumes the view, yielding the underlying snapshots.
        #[must_use]
        pub fn into_vec(self) -> Vec<CoinSnapshot> {
            self.snapshots
        }
    }

    /// Immutable representation of an enemy.
    #[derive(Clone, Copy, Debug, PartialEq)]
    pub struct EnemySnapshot {
        /// Identifier assigned to the enemy.
        pub id: EnemyId,
        /// World-space bounding box.
        pub rect: Rect,
        /// Current patrol heading.
        pub direction: Direction,
        /// Patrol state, evaluated at spawn and after every tick.
        pub state: EnemyState,
    }

    /// Read-only snapshot describing all enemies in arena order.
    #[derive(Clone, Debug)]
    pub struct EnemyView {
        snapshots: Vec<EnemySnapshot>,
    }

    impl EnemyView {
        /// Iterator over the captured enemy snapshots.
        pub fn iter(&self) -> impl Iterator<Item = &EnemySnapshot> {
            self.snapshots.iter()
        }

        /// Iterator over enemies that are still alive.
        pub fn alive(&self) -> impl Iterator<Item = &EnemySnapshot> {
            self.snapshots
                .iter()
                .filter(|enemy| enemy.state != EnemyState::Dead)
        }

        /// Consumes the view, yielding the underlying snapshots.
        #[must_use]
        pub fn into_vec(self) -> Vec<EnemySnapshot> {
            self.snapshots
        }
    }
}
