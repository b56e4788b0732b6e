//! Player physics and tile resolution.

use castle_run_core::{HorizontalIntent, Rect, Tuning};

use crate::level::Tile;

/// Player-controlled character.
#[derive(Clone, Debug)]
pub(crate) struct Player {
    pub(crate) rect: Rect,
    pub(crate) velocity_y: f32,
    pub(crate) grounded: bool,
    pub(crate) intent: HorizontalIntent,
    pub(crate) score: u32,
}

impl Player {
    /// Places the player on the ground line at the configured start column.
    pub(crate) fn spawn(tuning: &Tuning) -> Self {
        Self {
            rect: Rect::new(
                tuning.player_start_x,
                tuning.ground_y - tuning.player_height,
                tuning.player_width,
                tuning.player_height,
            ),
            velocity_y: 0.0,
            grounded: true,
            intent: HorizontalIntent::Idle,
            score: 0,
        }
    }

    /// Applies the jump impulse when standing on a tile.
    ///
    /// Returns `true` when the jump happened.
    pub(crate) fn try_jump(&mut self, impulse: f32) -> bool {
        if !self.grounded {
            return false;
        }
        self.velocity_y = impulse;
        self.grounded = false;
        true
    }

    /// Moves horizontally by the held intent, then integrates gravity.
    pub(crate) fn integrate(&mut self, dt: f32, tuning: &Tuning) {
        let x = self.rect.x() + self.intent.axis() * tuning.player_speed * dt;
        self.velocity_y += tuning.gravity * dt;
        let y = self.rect.y() + self.velocity_y * dt;
        self.rect = self.rect.with_origin(x, y);
    }

    /// Lands the player on the first overlapping tile while falling.
    ///
    /// Only downward motion is resolved and only vertically: platforms are
    /// one-way and sides are never blocked. Returns `true` when the player
    /// became grounded this tick after being airborne.
    pub(crate) fn land_on(&mut self, tiles: &[Tile]) -> bool {
        let was_grounded = self.grounded;
        self.grounded = false;
        for tile in tiles {
            if self.velocity_y > 0.0 && self.rect.intersects(&tile.rect) {
                self.rect = self
                    .rect
                    .with_origin(self.rect.x(), tile.rect.y() - self.rect.height());
                self.velocity_y = 0.0;
                self.grounded = true;
            }
        }
        self.grounded && !was_grounded
    }

    pub(crate) fn is_descending(&self) -> bool {
        self.velocity_y > 0.0
    }

    pub(crate) fn bounce(&mut self, velocity_y: f32) {
        self.velocity_y = velocity_y;
    }

    pub(crate) fn award(&mut self, points: u32) -> u32 {
        self.score = self.score.saturating_add(points);
        self.score
    }

    pub(crate) fn clamp_to_world(&mut self, max_x: f32) {
        let x = self.rect.x().clamp(0.0, max_x);
        self.rect = self.rect.with_origin(x, self.rect.y());
    }
}
