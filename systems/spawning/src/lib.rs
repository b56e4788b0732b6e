#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Seeded spawning system responsible for emitting enemy spawn commands.

use castle_run_core::{Command, Direction, Event, SpawnPoint};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Configuration parameters required to construct the spawning system.
#[derive(Clone, Copy, Debug)]
pub struct Config {
    rng_seed: u64,
}

impl Config {
    /// Creates a new configuration using the provided seed.
    #[must_use]
    pub const fn new(rng_seed: u64) -> Self {
        Self { rng_seed }
    }
}

/// Pure system that populates a freshly configured world with enemies.
///
/// Each enemy starts patrolling left or right with equal probability. The
/// choice is drawn from a seeded generator so that a given seed always
/// produces the same level.
#[derive(Debug)]
pub struct Spawning {
    rng: ChaCha8Rng,
}

impl Spawning {
    /// Creates a new spawning system using the supplied configuration.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(config.rng_seed),
        }
    }

    /// Emits one spawn command per spawn point whenever the world is reset.
    pub fn handle(&mut self, events: &[Event], spawn_points: &[SpawnPoint], out: &mut Vec<Command>) {
        let resets = events
            .iter()
            .filter(|event| matches!(event, Event::WorldConfigured))
            .count();

        for _ in 0..resets {
            for point in spawn_points {
                let direction = self.next_direction();
                out.push(Command::SpawnEnemy {
                    x: point.x,
                    ground_y: point.ground_y,
                    direction,
                });
            }
        }
    }

    fn next_direction(&mut self) -> Direction {
        if self.rng.gen_bool(0.5) {
            Direction::Left
        } else {
            Direction::Right
        }
    }
}
