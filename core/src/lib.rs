#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Castle Run engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and pure systems. Adapters submit [`Command`] values
//! describing desired mutations, the world executes those commands via its
//! `apply` entry point, and then broadcasts [`Event`] values for systems and
//! adapters to react to. Systems consume event streams, query immutable
//! snapshots, and respond exclusively with new command batches.

mod tuning;

use std::time::Duration;

pub use tuning::{Tuning, TuningError};

/// Canonical banner emitted when the experience boots.
pub const WELCOME_BANNER: &str = "Welcome to Castle Run.";

/// Commands that express all permissible world mutations.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// Resets the world to an empty level governed by the provided tuning.
    ConfigureWorld {
        /// Gameplay constants applied to every subsequent tick.
        tuning: Tuning,
    },
    /// Places a static tile whose upper-left corner sits at the provided point.
    PlaceTile {
        /// Left edge of the tile in world units.
        x: f32,
        /// Top edge of the tile in world units.
        y: f32,
    },
    /// Places a collectible coin centred on the provided point.
    PlaceCoin {
        /// Horizontal centre of the coin in world units.
        x: f32,
        /// Vertical centre of the coin in world units.
        y: f32,
    },
    /// Spawns a live enemy standing on the provided ground line.
    SpawnEnemy {
        /// Left edge of the enemy in world units.
        x: f32,
        /// World-space y coordinate of the enemy's bottom edge.
        ground_y: f32,
        /// Initial patrol direction.
        direction: Direction,
    },
    /// Places the flag pole that marks the end of the level.
    PlaceGoal {
        /// Horizontal position of the flag pole in world units.
        x: f32,
    },
    /// Updates the horizontal movement the player holds this frame.
    SetHorizontalIntent {
        /// Desired horizontal motion.
        intent: HorizontalIntent,
    },
    /// Requests a jump. Ignored unless the player is grounded.
    Jump,
    /// Advances the simulation clock by the provided delta time.
    Tick {
        /// Duration of simulated time that elapsed since the previous tick.
        dt: Duration,
    },
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    /// Confirms that the world was reset with fresh tuning.
    WorldConfigured,
    /// Confirms that a tile was added to the level.
    TilePlaced {
        /// Identifier assigned to the tile.
        tile: TileId,
    },
    /// Confirms that a coin was added to the level.
    CoinPlaced {
        /// Identifier assigned to the coin.
        coin: CoinId,
    },
    /// Confirms that an enemy was created.
    EnemySpawned {
        /// Identifier assigned to the enemy.
        enemy: EnemyId,
        /// Initial patrol direction of the enemy.
        direction: Direction,
    },
    /// Confirms that the goal was placed.
    GoalPlaced {
        /// Horizontal position of the flag pole.
        x: f32,
    },
    /// Indicates that the simulation clock advanced.
    TimeAdvanced {
        /// Duration of simulated time that elapsed in the tick.
        dt: Duration,
    },
    /// Reports that the player left the ground with a jump impulse.
    PlayerJumped,
    /// Reports that the player came to rest on a tile.
    PlayerLanded,
    /// Reports that the player picked up a coin.
    CoinCollected {
        /// Identifier of the collected coin.
        coin: CoinId,
        /// Score after the reward was added.
        score: u32,
    },
    /// Reports that the player stomped an enemy.
    EnemyStomped {
        /// Identifier of the enemy that died.
        enemy: EnemyId,
        /// Score after the reward was added.
        score: u32,
    },
    /// Reports that an enemy bumped into a tile and reversed direction.
    EnemyTurned {
        /// Identifier of the enemy that turned around.
        enemy: EnemyId,
        /// Direction the enemy patrols after turning.
        direction: Direction,
    },
    /// Announces that the session reached a terminal state.
    SessionEnded {
        /// How the session ended.
        outcome: Outcome,
        /// Final score.
        score: u32,
    },
}

/// Horizontal patrol direction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Movement toward decreasing x.
    Left,
    /// Movement toward increasing x.
    Right,
}

impl Direction {
    /// Unit sign of the direction along the x axis.
    #[must_use]
    pub const fn sign(self) -> f32 {
        match self {
            Self::Left => -1.0,
            Self::Right => 1.0,
        }
    }

    /// Direction matching the sign of a horizontal velocity.
    ///
    /// Zero velocity is treated as facing right.
    #[must_use]
    pub fn from_velocity(velocity: f32) -> Self {
        if velocity < 0.0 {
            Self::Left
        } else {
            Self::Right
        }
    }
}

/// Horizontal movement held by the player during a frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum HorizontalIntent {
    /// Move toward decreasing x.
    Left,
    /// Stand still horizontally.
    #[default]
    Idle,
    /// Move toward increasing x.
    Right,
}

impl HorizontalIntent {
    /// Resolves the intent from the state of the left and right buttons.
    ///
    /// Holding both buttons cancels out to [`HorizontalIntent::Idle`].
    #[must_use]
    pub const fn from_buttons(left: bool, right: bool) -> Self {
        match (left, right) {
            (true, false) => Self::Left,
            (false, true) => Self::Right,
            _ => Self::Idle,
        }
    }

    /// Axis value in `{-1, 0, +1}`.
    #[must_use]
    pub const fn axis(self) -> f32 {
        match self {
            Self::Left => -1.0,
            Self::Idle => 0.0,
            Self::Right => 1.0,
        }
    }
}

/// Reason a session was lost.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LossCause {
    /// The player fell below the bottom of the screen.
    Fell,
    /// The player touched a live enemy without stomping it.
    EnemyContact,
}

/// Terminal result of a session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Outcome {
    /// The player ran past the flag pole into the castle.
    Won,
    /// The player died.
    Lost(LossCause),
}

impl Outcome {
    /// Message displayed on the end screen.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::Won => "YOU WIN!",
            Self::Lost(_) => "GAME OVER",
        }
    }
}

/// Lifecycle of a single play session.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum SessionState {
    /// The simulation advances every tick.
    #[default]
    Running,
    /// Terminal: the player reached the castle.
    Won,
    /// Terminal: the player died.
    Lost(LossCause),
}

impl SessionState {
    /// Reports whether the session reached a terminal state.
    #[must_use]
    pub const fn is_over(self) -> bool {
        !matches!(self, Self::Running)
    }

    /// Terminal outcome, if any.
    #[must_use]
    pub const fn outcome(self) -> Option<Outcome> {
        match self {
            Self::Running => None,
            Self::Won => Some(Outcome::Won),
            Self::Lost(cause) => Some(Outcome::Lost(cause)),
        }
    }

    /// State that corresponds to a terminal outcome.
    #[must_use]
    pub const fn from_outcome(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Won => Self::Won,
            Outcome::Lost(cause) => Self::Lost(cause),
        }
    }
}

/// Axis-aligned rectangle in world units with y growing downward.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    x: f32,
    y: f32,
    width: f32,
    height: f32,
}

impl Rect {
    /// Creates a rectangle from its upper-left corner and size.
    #[must_use]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Creates a square centred on the provided point.
    #[must_use]
    pub fn centered_square(center_x: f32, center_y: f32, half_extent: f32) -> Self {
        Self::new(
            center_x - half_extent,
            center_y - half_extent,
            half_extent * 2.0,
            half_extent * 2.0,
        )
    }

    /// Left edge.
    #[must_use]
    pub const fn x(&self) -> f32 {
        self.x
    }

    /// Top edge.
    #[must_use]
    pub const fn y(&self) -> f32 {
        self.y
    }

    /// Horizontal extent.
    #[must_use]
    pub const fn width(&self) -> f32 {
        self.width
    }

    /// Vertical extent.
    #[must_use]
    pub const fn height(&self) -> f32 {
        self.height
    }

    /// Right edge.
    #[must_use]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Bottom edge.
    #[must_use]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Horizontal centre.
    #[must_use]
    pub fn center_x(&self) -> f32 {
        self.x + self.width * 0.5
    }

    /// Returns a copy moved so that its upper-left corner sits at the point.
    #[must_use]
    pub const fn with_origin(self, x: f32, y: f32) -> Self {
        Self::new(x, y, self.width, self.height)
    }

    /// Reports whether the interiors of two rectangles overlap.
    ///
    /// Rectangles that merely share an edge do not intersect, so an entity
    /// resting exactly on top of a tile is not considered overlapping.
    #[must_use]
    pub fn intersects(&self, other: &Rect) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }
}

/// Location where an enemy enters the level.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpawnPoint {
    /// Left edge of the enemy in world units.
    pub x: f32,
    /// World-space y coordinate the enemy stands on.
    pub ground_y: f32,
}

impl SpawnPoint {
    /// Creates a new spawn point.
    #[must_use]
    pub const fn new(x: f32, ground_y: f32) -> Self {
        Self { x, ground_y }
    }
}

/// Identifier of a static tile, equal to its index in the level arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TileId(u32);

impl TileId {
    /// Creates a new tile identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Identifier of a coin, equal to its index in the level arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CoinId(u32);

impl CoinId {
    /// Creates a new coin identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Identifier of an enemy, equal to its index in the enemy arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EnemyId(u32);

impl EnemyId {
    /// Creates a new enemy identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}
