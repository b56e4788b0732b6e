//! Enemy arena and patrol behaviour.

use castle_run_core::{Direction, EnemyId, Rect, Tuning};

use crate::level::Tile;

/// Patrol state of an enemy.
///
/// Support is evaluated when the enemy spawns and again on every patrol, so a
/// freshly spawned enemy standing on a tile already reports `Grounded`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EnemyState {
    /// Alive and standing on top of a tile.
    Grounded,
    /// Alive and dropping toward the ground.
    Falling,
    /// Stomped by the player. Dead enemies never update, collide or render.
    Dead,
}

#[derive(Clone, Debug)]
pub(crate) struct Enemy {
    pub(crate) id: EnemyId,
    pub(crate) rect: Rect,
    pub(crate) velocity_x: f32,
    pub(crate) alive: bool,
    grounded: bool,
}

impl Enemy {
    pub(crate) fn state(&self) -> EnemyState {
        if !self.alive {
            EnemyState::Dead
        } else if self.grounded {
            EnemyState::Grounded
        } else {
            EnemyState::Falling
        }
    }

    /// Advances a live enemy by one tick.
    ///
    /// Every overlapping tile pushes the enemy back to the tile's near edge
    /// and reverses its heading; `on_turn` observes each reversal. Support is
    /// detected by overlapping a thin strip resting on top of a tile.
    /// Unsupported enemies drop by a whole-unit increment of `gravity * dt`
    /// instead of integrating a vertical velocity.
    fn patrol<F>(&mut self, dt: f32, tiles: &[Tile], probe_height: f32, gravity: f32, mut on_turn: F)
    where
        F: FnMut(Direction),
    {
        if !self.alive {
            return;
        }

        self.rect = self
            .rect
            .with_origin(self.rect.x() + self.velocity_x * dt, self.rect.y());

        let mut grounded = false;
        for tile in tiles {
            if self.rect.intersects(&tile.rect) {
                let x = if self.velocity_x > 0.0 {
                    tile.rect.x() - self.rect.width()
                } else {
                    tile.rect.right()
                };
                self.rect = self.rect.with_origin(x, self.rect.y());
                self.velocity_x = -self.velocity_x;
                on_turn(Direction::from_velocity(self.velocity_x));
            }

            if rests_on(&self.rect, &tile.rect, probe_height) {
                grounded = true;
            }
        }
        self.grounded = grounded;

        if !grounded {
            let drop = (gravity * dt).trunc();
            self.rect = self.rect.with_origin(self.rect.x(), self.rect.y() + drop);
        }
    }
}

/// Whether `body` overlaps the thin strip resting on top of `tile`.
fn rests_on(body: &Rect, tile: &Rect, probe_height: f32) -> bool {
    let strip = Rect::new(tile.x(), tile.y() - probe_height, tile.width(), probe_height);
    body.intersects(&strip)
}

/// Dense arena of enemies addressed by [`EnemyId`].
#[derive(Debug, Default)]
pub(crate) struct EnemyArena {
    enemies: Vec<Enemy>,
}

impl EnemyArena {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Creates a live enemy whose bottom edge rests on `ground_y`, sized and
    /// paced by `tuning`. Support is checked against `tiles` straight away.
    pub(crate) fn spawn(
        &mut self,
        x: f32,
        ground_y: f32,
        direction: Direction,
        tuning: &Tuning,
        tiles: &[Tile],
    ) -> EnemyId {
        let id = EnemyId::new(self.enemies.len() as u32);
        let rect = Rect::new(
            x,
            ground_y - tuning.enemy_height,
            tuning.enemy_width,
            tuning.enemy_height,
        );
        let grounded = tiles
            .iter()
            .any(|tile| rests_on(&rect, &tile.rect, tuning.enemy_probe_height));
        self.enemies.push(Enemy {
            id,
            rect,
            velocity_x: tuning.enemy_speed * direction.sign(),
            alive: true,
            grounded,
        });
        id
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = &Enemy> {
        self.enemies.iter()
    }

    pub(crate) fn iter_live_mut(&mut self) -> impl Iterator<Item = &mut Enemy> {
        self.enemies.iter_mut().filter(|enemy| enemy.alive)
    }

    /// Advances every live enemy, reporting each reversal through `on_turn`.
    pub(crate) fn patrol<F>(
        &mut self,
        dt: f32,
        tiles: &[Tile],
        probe_height: f32,
        gravity: f32,
        mut on_turn: F,
    ) where
        F: FnMut(EnemyId, Direction),
    {
        for enemy in self.iter_live_mut() {
            let id = enemy.id;
            enemy.patrol(dt, tiles, probe_height, gravity, |direction| {
                on_turn(id, direction)
            });
        }
    }
}
