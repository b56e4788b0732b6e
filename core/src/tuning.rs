//! Gameplay constants and their validation.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Every gameplay constant the simulation depends on.
///
/// Distances are expressed in world units (one unit per screen pixel before
/// camera translation), speeds in units per second and accelerations in units
/// per second squared. Missing fields fall back to [`Tuning::default`] when
/// deserialising, so configuration files only need to name the values they
/// override.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Tuning {
    /// Width of the visible viewport.
    pub screen_width: f32,
    /// Height of the visible viewport; falling below it loses the session.
    pub screen_height: f32,
    /// Horizontal extent of the playable level.
    pub world_width: f32,
    /// Width of a single tile.
    pub tile_width: f32,
    /// Height of a single tile.
    pub tile_height: f32,
    /// Top edge of the ground row.
    pub ground_y: f32,
    /// Width of the player's bounding box.
    pub player_width: f32,
    /// Height of the player's bounding box.
    pub player_height: f32,
    /// Left edge of the player when a session starts.
    pub player_start_x: f32,
    /// Horizontal running speed.
    pub player_speed: f32,
    /// Vertical velocity applied by a jump. Negative values point upward.
    pub jump_impulse: f32,
    /// Downward acceleration applied to the player every tick.
    pub gravity: f32,
    /// Width of an enemy's bounding box.
    pub enemy_width: f32,
    /// Height of an enemy's bounding box.
    pub enemy_height: f32,
    /// Horizontal patrol speed of enemies.
    pub enemy_speed: f32,
    /// Height of the strip above each tile that counts as standing on it.
    pub enemy_probe_height: f32,
    /// Half extent of the square pickup hitbox centred on each coin.
    pub coin_pickup_radius: f32,
    /// Points awarded for each collected coin.
    pub coin_reward: u32,
    /// Points awarded for each stomped enemy.
    pub stomp_reward: u32,
    /// Distance between the flag pole and the right edge of the world.
    pub goal_distance: f32,
    /// Distance past the flag pole the player must cross to win.
    pub goal_offset: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            screen_width: 800.0,
            screen_height: 480.0,
            world_width: 5_500.0,
            tile_width: 50.0,
            tile_height: 20.0,
            ground_y: 440.0,
            player_width: 32.0,
            player_height: 48.0,
            player_start_x: 50.0,
            player_speed: 200.0,
            jump_impulse: -420.0,
            gravity: 900.0,
            enemy_width: 32.0,
            enemy_height: 24.0,
            enemy_speed: 60.0,
            enemy_probe_height: 2.0,
            coin_pickup_radius: 8.0,
            coin_reward: 100,
            stomp_reward: 200,
            goal_distance: 250.0,
            goal_offset: 80.0,
        }
    }
}

impl Tuning {
    /// Largest left edge the player may occupy.
    #[must_use]
    pub fn player_max_x(&self) -> f32 {
        (self.world_width - self.player_width).max(0.0)
    }

    /// Largest horizontal camera offset.
    #[must_use]
    pub fn camera_max_offset(&self) -> f32 {
        (self.world_width - self.screen_width).max(0.0)
    }

    /// Vertical velocity given to the player after stomping an enemy.
    #[must_use]
    pub fn stomp_bounce(&self) -> f32 {
        self.jump_impulse * 0.5
    }

    /// Horizontal position of the flag pole in the default layout.
    #[must_use]
    pub fn goal_x(&self) -> f32 {
        self.world_width - self.goal_distance
    }

    /// Checks that the constants describe a playable world.
    pub fn validate(&self) -> Result<(), TuningError> {
        let floats = [
            ("screen_width", self.screen_width),
            ("screen_height", self.screen_height),
            ("world_width", self.world_width),
            ("tile_width", self.tile_width),
            ("tile_height", self.tile_height),
            ("ground_y", self.ground_y),
            ("player_width", self.player_width),
            ("player_height", self.player_height),
            ("player_start_x", self.player_start_x),
            ("player_speed", self.player_speed),
            ("jump_impulse", self.jump_impulse),
            ("gravity", self.gravity),
            ("enemy_width", self.enemy_width),
            ("enemy_height", self.enemy_height),
            ("enemy_speed", self.enemy_speed),
            ("enemy_probe_height", self.enemy_probe_height),
            ("coin_pickup_radius", self.coin_pickup_radius),
            ("goal_distance", self.goal_distance),
            ("goal_offset", self.goal_offset),
        ];
        if let Some((field, value)) = floats.into_iter().find(|(_, value)| !value.is_finite()) {
            return Err(TuningError::NonFinite { field, value });
        }

        let extents = [
            ("screen_width", self.screen_width),
            ("screen_height", self.screen_height),
            ("world_width", self.world_width),
            ("tile_width", self.tile_width),
            ("tile_height", self.tile_height),
            ("player_width", self.player_width),
            ("player_height", self.player_height),
            ("enemy_width", self.enemy_width),
            ("enemy_height", self.enemy_height),
            ("enemy_probe_height", self.enemy_probe_height),
            ("coin_pickup_radius", self.coin_pickup_radius),
        ];
        for (field, value) in extents {
            if value <= 0.0 {
                return Err(TuningError::NonPositive { field, value });
            }
        }

        for (field, value) in [
            ("player_speed", self.player_speed),
            ("enemy_speed", self.enemy_speed),
        ] {
            if value < 0.0 {
                return Err(TuningError::NegativeSpeed { field, value });
            }
        }

        if self.world_width < self.screen_width {
            return Err(TuningError::WorldNarrowerThanScreen {
                world_width: self.world_width,
                screen_width: self.screen_width,
            });
        }

        if self.jump_impulse >= 0.0 {
            return Err(TuningError::JumpNotUpward {
                jump_impulse: self.jump_impulse,
            });
        }

        if self.gravity < 0.0 {
            return Err(TuningError::NegativeGravity {
                gravity: self.gravity,
            });
        }

        if self.ground_y >= self.screen_height {
            return Err(TuningError::GroundBelowScreen {
                ground_y: self.ground_y,
                screen_height: self.screen_height,
            });
        }

        let player_max_x = self.player_max_x();
        if !(0.0..=player_max_x).contains(&self.player_start_x) {
            return Err(TuningError::StartOutsideWorld {
                player_start_x: self.player_start_x,
                player_max_x,
            });
        }

        let goal_x = self.goal_x();
        if !(0.0..=self.world_width).contains(&goal_x) {
            return Err(TuningError::GoalOutsideWorld {
                goal_x,
                world_width: self.world_width,
            });
        }

        Ok(())
    }
}

/// Reasons a [`Tuning`] is rejected by [`Tuning::validate`].
#[derive(Clone, Debug, PartialEq, Error)]
pub enum TuningError {
    /// A value was NaN or infinite.
    #[error("{field} must be a finite number (received {value})")]
    NonFinite {
        /// Name of the offending field.
        field: &'static str,
        /// Value that failed validation.
        value: f32,
    },
    /// A size that must be strictly positive was zero or negative.
    #[error("{field} must be positive (received {value})")]
    NonPositive {
        /// Name of the offending field.
        field: &'static str,
        /// Value that failed validation.
        value: f32,
    },
    /// The camera cannot be clamped when the world is narrower than the screen.
    #[error("world_width ({world_width}) must not be smaller than screen_width ({screen_width})")]
    WorldNarrowerThanScreen {
        /// Configured world width.
        world_width: f32,
        /// Configured screen width.
        screen_width: f32,
    },
    /// A jump must move the player upward.
    #[error("jump_impulse must be negative (received {jump_impulse})")]
    JumpNotUpward {
        /// Configured jump impulse.
        jump_impulse: f32,
    },
    /// Gravity must pull downward.
    #[error("gravity must not be negative (received {gravity})")]
    NegativeGravity {
        /// Configured gravity.
        gravity: f32,
    },
    /// Movement speeds are magnitudes.
    #[error("{field} must not be negative (received {value})")]
    NegativeSpeed {
        /// Name of the offending field.
        field: &'static str,
        /// Value that failed validation.
        value: f32,
    },
    /// The ground row must be visible, otherwise the player starts out of bounds.
    #[error("ground_y ({ground_y}) must be above the bottom of the screen ({screen_height})")]
    GroundBelowScreen {
        /// Configured ground height.
        ground_y: f32,
        /// Configured screen height.
        screen_height: f32,
    },
    /// The player must start inside the horizontal clamp.
    #[error("player_start_x ({player_start_x}) must lie within 0..={player_max_x}")]
    StartOutsideWorld {
        /// Configured start position.
        player_start_x: f32,
        /// Largest left edge the player may occupy.
        player_max_x: f32,
    },
    /// The flag pole must stand inside the world.
    #[error("goal at x={goal_x} lies outside the world (width {world_width})")]
    GoalOutsideWorld {
        /// Derived flag pole position.
        goal_x: f32,
        /// Configured world width.
        world_width: f32,
    },
}
