//! Per-frame driver that routes adapter input through the systems and the world.

use std::time::Duration;

use anyhow::{Context, Result};
use castle_run_core::{Command, Event, SpawnPoint, Tuning};
use castle_run_rendering::{FrameInput, GoalPresentation, Scene, Viewport};
use castle_run_system_bootstrap::Bootstrap;
use castle_run_system_player_control::{ControlInput, PlayerControl};
use castle_run_system_spawning::{Config as SpawningConfig, Spawning};
use castle_run_world::{self as world, query, World};
use glam::Vec2;

/// Owns the world together with every system that feeds it commands.
#[derive(Debug)]
pub(crate) struct Simulation {
    world: World,
    bootstrap: Bootstrap,
    spawning: Spawning,
    control: PlayerControl,
    spawn_points: Vec<SpawnPoint>,
    max_frame: Duration,
    commands: Vec<Command>,
    events: Vec<Event>,
}

impl Simulation {
    /// Builds the level described by `tuning` and returns a running session.
    ///
    /// Frame times longer than `max_frame` are clamped before they reach the
    /// world so that a stalled window cannot tunnel the player through tiles.
    pub(crate) fn new(tuning: Tuning, seed: u64, max_frame: Duration) -> Self {
        let mut simulation = Self {
            world: World::new(),
            bootstrap: Bootstrap,
            spawning: Spawning::new(SpawningConfig::new(seed)),
            control: PlayerControl::new(),
            spawn_points: Vec::new(),
            max_frame,
            commands: Vec::new(),
            events: Vec::new(),
        };

        let layout = simulation
            .bootstrap
            .start_session(&tuning, &mut simulation.commands);
        simulation.spawn_points = layout.enemy_spawns;
        simulation.pump();
        simulation
    }

    /// Banner shown when the game starts.
    pub(crate) fn welcome_banner(&self) -> &str {
        self.bootstrap.welcome_banner(&self.world)
    }

    /// Advances the session by one rendered frame.
    pub(crate) fn step(&mut self, dt: Duration, input: FrameInput) {
        self.control.handle(
            ControlInput {
                left: input.left,
                right: input.right,
                jump: input.jump,
            },
            &mut self.commands,
        );
        self.commands.push(Command::Tick {
            dt: dt.min(self.max_frame),
        });
        self.pump();
    }

    /// Creates a scene sized for the current tuning and filled with the current state.
    pub(crate) fn scene(&self) -> Result<Scene> {
        let tuning = query::tuning(&self.world);
        let viewport = Viewport::new(tuning.screen_width, tuning.screen_height)
            .context("tuning does not describe a drawable screen")?;
        let mut scene = Scene::new(
            viewport,
            tuning.world_width,
            tuning.ground_y,
            Vec2::new(tuning.tile_width, tuning.tile_height),
        );
        self.populate_scene(&mut scene);
        Ok(scene)
    }

    /// Copies the world's observable state into `scene`.
    pub(crate) fn populate_scene(&self, scene: &mut Scene) {
        let world = &self.world;
        let tuning = query::tuning(world);

        scene.camera_offset = query::camera_offset(world);
        scene.tiles.clear();
        scene
            .tiles
            .extend(query::tiles(world).map(|tile| tile.rect));
        scene.coins.clear();
        scene.coins.extend(
            query::coin_view(world)
                .uncollected()
                .map(|coin| Vec2::new(coin.center_x, coin.center_y)),
        );
        scene.enemies.clear();
        scene
            .enemies
            .extend(query::enemy_view(world).alive().map(|enemy| enemy.rect));

        let player = query::player(world);
        scene.player = player.rect;
        scene.score = player.score;
        scene.goal = query::goal_x(world).map(|flag_x| GoalPresentation {
            flag_x,
            castle_x: flag_x + tuning.goal_offset,
        });
        scene.outcome = query::session_state(world).outcome();
    }

    /// Applies queued commands until no system has anything left to say.
    fn pump(&mut self) {
        while !self.commands.is_empty() {
            for command in self.commands.drain(..) {
                world::apply(&mut self.world, command, &mut self.events);
            }

            log_events(&self.events);
            self.spawning
                .handle(&self.events, &self.spawn_points, &mut self.commands);
            self.events.clear();
        }
    }
}

fn log_events(events: &[Event]) {
    for event in events {
        match event {
            Event::WorldConfigured => tracing::info!("world configured"),
            Event::EnemySpawned { enemy, direction } => {
                tracing::debug!(enemy = enemy.get(), ?direction, "enemy spawned");
            }
            Event::GoalPlaced { x } => tracing::debug!(x, "goal placed"),
            Event::CoinCollected { coin, score } => {
                tracing::debug!(coin = coin.get(), score, "coin collected");
            }
            Event::EnemyStomped { enemy, score } => {
                tracing::debug!(enemy = enemy.get(), score, "enemy stomped");
            }
            Event::SessionEnded { outcome, score } => {
                tracing::info!(?outcome, score, "{}", outcome.message());
            }
            Event::TilePlaced { .. }
            | Event::CoinPlaced { .. }
            | Event::TimeAdvanced { .. }
            | Event::PlayerJumped
            | Event::PlayerLanded
            | Event::EnemyTurned { .. } => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use castle_run_core::Outcome;

    const FRAME: Duration = Duration::from_micros(16_667);

    fn simulation() -> Simulation {
        Simulation::new(Tuning::default(), 7, Duration::from_millis(100))
    }

    #[test]
    fn new_session_contains_the_full_level() {
        let simulation = simulation();
        let scene = simulation.scene().expect("default tuning is drawable");

        assert_eq!(scene.tiles.len(), 140);
        assert_eq!(scene.coins.len(), 20);
        assert_eq!(scene.enemies.len(), 4);
        assert_eq!(
            scene.goal,
            Some(GoalPresentation {
                flag_x: 5_250.0,
                castle_x: 5_330.0,
            })
        );
        assert_eq!(scene.score, 0);
        assert_eq!(scene.outcome, None);
        assert_eq!(simulation.welcome_banner(), "Welcome to Castle Run.");
    }

    #[test]
    fn held_right_moves_the_player() {
        let mut simulation = simulation();
        let start = query::player(&simulation.world).rect.x();
        let input = FrameInput {
            right: true,
            ..FrameInput::default()
        };
        for _ in 0..30 {
            simulation.step(FRAME, input);
        }

        let moved = query::player(&simulation.world).rect.x() - start;
        assert!((moved - 100.0).abs() < 0.5, "moved {moved}");
    }

    #[test]
    fn long_frames_are_clamped() {
        let mut simulation = simulation();
        let start = query::player(&simulation.world).rect.x();
        simulation.step(
            Duration::from_secs(5),
            FrameInput {
                right: true,
                ..FrameInput::default()
            },
        );

        let moved = query::player(&simulation.world).rect.x() - start;
        assert!((moved - 20.0).abs() < 1e-3, "moved {moved}");
    }

    #[test]
    fn scene_reports_outcome_after_session_ends() {
        let tuning = Tuning {
            goal_distance: 5_450.0,
            ..Tuning::default()
        };
        let mut simulation = Simulation::new(tuning, 1, Duration::from_millis(100));
        let input = FrameInput {
            right: true,
            ..FrameInput::default()
        };

        let mut scene = simulation.scene().expect("drawable tuning");
        for _ in 0..120 {
            simulation.step(FRAME, input);
            simulation.populate_scene(&mut scene);
            if scene.is_over() {
                break;
            }
        }
        assert_eq!(scene.outcome, Some(Outcome::Won));

        let frozen = scene.clone();
        simulation.step(FRAME, input);
        simulation.populate_scene(&mut scene);
        assert_eq!(scene, frozen);
    }
}
