#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shared rendering contracts for Castle Run adapters.

mod draw;

use anyhow::Result as AnyResult;
use castle_run_core::{Outcome, Rect};
use glam::Vec2;
use std::time::Duration;
use thiserror::Error;

pub use draw::{draw_list, end_screen, palette, DrawCommand, TextAnchor, HUD_FONT_SIZE};

/// RGBA color used when presenting frames.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    /// Red channel intensity in the range 0.0..=1.0.
    pub red: f32,
    /// Green channel intensity in the range 0.0..=1.0.
    pub green: f32,
    /// Blue channel intensity in the range 0.0..=1.0.
    pub blue: f32,
    /// Alpha channel intensity in the range 0.0..=1.0.
    pub alpha: f32,
}

impl Color {
    /// Creates a new color from floating point channels.
    #[must_use]
    pub const fn new(red: f32, green: f32, blue: f32, alpha: f32) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    /// Creates an opaque color from byte RGB values.
    #[must_use]
    pub const fn from_rgb_u8(red: u8, green: u8, blue: u8) -> Self {
        Self {
            red: red as f32 / 255.0,
            green: green as f32 / 255.0,
            blue: blue as f32 / 255.0,
            alpha: 1.0,
        }
    }
}

/// Input snapshot gathered by adapters before updating the scene.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct FrameInput {
    /// Whether the move-left key is held.
    pub left: bool,
    /// Whether the move-right key is held.
    pub right: bool,
    /// Whether the jump key is held.
    pub jump: bool,
    /// Whether the adapter observed a request to close the game.
    pub quit: bool,
}

/// Size of the visible window in device units.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    width: f32,
    height: f32,
}

impl Viewport {
    /// Creates a viewport, rejecting sizes that cannot be drawn into.
    pub fn new(width: f32, height: f32) -> Result<Self, RenderingError> {
        if !(width > 0.0 && height > 0.0) {
            return Err(RenderingError::InvalidViewport { width, height });
        }

        Ok(Self { width, height })
    }

    /// Horizontal extent in device units.
    #[must_use]
    pub const fn width(&self) -> f32 {
        self.width
    }

    /// Vertical extent in device units.
    #[must_use]
    pub const fn height(&self) -> f32 {
        self.height
    }

    /// Rectangle covering the whole viewport.
    #[must_use]
    pub const fn bounds(&self) -> Rect {
        Rect::new(0.0, 0.0, self.width, self.height)
    }
}

/// Flag pole and castle placement.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GoalPresentation {
    /// World-space x of the flag pole.
    pub flag_x: f32,
    /// World-space x of the castle's left wall.
    pub castle_x: f32,
}

/// Camera-independent snapshot of everything the renderer draws.
///
/// Positions are expressed in world units. The renderer subtracts
/// `camera_offset` when converting to device space.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    /// Visible window.
    pub viewport: Viewport,
    /// Horizontal extent of the level.
    pub world_width: f32,
    /// Top edge of the ground strip.
    pub ground_y: f32,
    /// Size of a single ground tile.
    pub tile_size: Vec2,
    /// Left edge of the visible slice of the world.
    pub camera_offset: f32,
    /// Bounds of every tile.
    pub tiles: Vec<Rect>,
    /// Centres of coins that have not been collected.
    pub coins: Vec<Vec2>,
    /// Bounds of live enemies.
    pub enemies: Vec<Rect>,
    /// Bounds of the player.
    pub player: Rect,
    /// Flag and castle, when the level has a goal.
    pub goal: Option<GoalPresentation>,
    /// Score shown in the HUD.
    pub score: u32,
    /// Terminal outcome once the session has ended.
    pub outcome: Option<Outcome>,
}

impl Scene {
    /// Creates an empty scene with the camera at the left edge of the world.
    #[must_use]
    pub fn new(viewport: Viewport, world_width: f32, ground_y: f32, tile_size: Vec2) -> Self {
        Self {
            viewport,
            world_width,
            ground_y,
            tile_size,
            camera_offset: 0.0,
            tiles: Vec::new(),
            coins: Vec::new(),
            enemies: Vec::new(),
            player: Rect::default(),
            goal: None,
            score: 0,
            outcome: None,
        }
    }

    /// Converts a world-space x coordinate into device space.
    #[must_use]
    pub fn screen_x(&self, world_x: f32) -> f32 {
        world_x - self.camera_offset
    }

    /// Converts a world-space rectangle into device space.
    #[must_use]
    pub fn to_screen(&self, rect: Rect) -> Rect {
        rect.with_origin(self.screen_x(rect.x()), rect.y())
    }

    /// Reports whether the session shown by the scene has finished.
    #[must_use]
    pub const fn is_over(&self) -> bool {
        self.outcome.is_some()
    }
}

/// Describes the data required to present a frame.
#[derive(Clone, Debug, PartialEq)]
pub struct Presentation {
    /// Title used for the window that hosts the rendered scene.
    pub window_title: String,
    /// Background color used when clearing the frame before the scene draws.
    pub clear_color: Color,
    /// Scene that should be rendered.
    pub scene: Scene,
}

impl Presentation {
    /// Creates a new presentation descriptor.
    #[must_use]
    pub fn new<T>(window_title: T, clear_color: Color, scene: Scene) -> Self
    where
        T: Into<String>,
    {
        Self {
            window_title: window_title.into(),
            clear_color,
            scene,
        }
    }
}

/// Trait implemented by rendering backends that can present a frame.
pub trait RenderingBackend {
    /// Runs the rendering loop until the user quits or the session ends.
    ///
    /// `update_scene` receives the elapsed time and the frame's input and
    /// mutates the scene in place. Once the scene reports an outcome the
    /// backend draws that frame, holds the end screen, then returns.
    fn run<F>(self, presentation: Presentation, update_scene: F) -> AnyResult<()>
    where
        F: FnMut(Duration, FrameInput, &mut Scene) + 'static;
}

/// Errors that can occur while constructing rendering descriptors.
#[derive(Debug, Error, PartialEq)]
pub enum RenderingError {
    /// The viewport had a zero, negative or non-finite dimension.
    #[error("viewport must have a positive size (received {width}x{height})")]
    InvalidViewport {
        /// Width that was provided.
        width: f32,
        /// Height that was provided.
        height: f32,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn viewport_rejects_degenerate_sizes() {
        assert!(Viewport::new(800.0, 480.0).is_ok());
        assert_eq!(
            Viewport::new(0.0, 480.0),
            Err(RenderingError::InvalidViewport {
                width: 0.0,
                height: 480.0
            })
        );
        assert!(Viewport::new(800.0, f32::NAN).is_err());
    }

    #[test]
    fn viewport_error_mentions_received_size() {
        let error = Viewport::new(-1.0, 2.0).expect_err("negative width must be rejected");
        assert_eq!(
            error.to_string(),
            "viewport must have a positive size (received -1x2)"
        );
    }

    #[test]
    fn screen_conversion_subtracts_camera_offset() {
        let viewport = Viewport::new(800.0, 480.0).expect("valid viewport");
        let mut scene = Scene::new(viewport, 5_500.0, 440.0, Vec2::new(50.0, 20.0));
        scene.camera_offset = 316.0;

        let rect = scene.to_screen(Rect::new(400.0, 100.0, 32.0, 48.0));
        assert_eq!(rect, Rect::new(84.0, 100.0, 32.0, 48.0));
        assert!(!scene.is_over());
    }
}
