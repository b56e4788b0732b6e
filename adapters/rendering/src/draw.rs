//! Pure translation of a [`Scene`] into device-space drawing primitives.

use castle_run_core::{Outcome, Rect};
use glam::Vec2;

use crate::{Color, Scene};

/// Point size of the HUD and end screen text.
pub const HUD_FONT_SIZE: f32 = 24.0;

const HUD_POSITION: Vec2 = Vec2::new(10.0, 10.0);
const BLOCK_BORDER: f32 = 2.0;
const COIN_RADIUS: f32 = 8.0;
const COIN_HIGHLIGHT_OFFSET: Vec2 = Vec2::new(-3.0, -3.0);
const POLE_WIDTH: f32 = 6.0;
const POLE_HEIGHT: f32 = 160.0;
const FLAG_LENGTH: f32 = 54.0;
const FLAG_DROP: f32 = 40.0;
const CASTLE_SIZE: Vec2 = Vec2::new(120.0, 100.0);
const DOOR_SIZE: Vec2 = Vec2::new(40.0, 60.0);
const DOOR_INSET: f32 = 40.0;

/// Colors used by the default look of the level.
pub mod palette {
    use crate::Color;

    /// Sky behind everything else.
    pub const SKY: Color = Color::from_rgb_u8(135, 206, 235);
    /// Ground strip.
    pub const GROUND: Color = Color::from_rgb_u8(34, 139, 34);
    /// Block fill; also used for enemies and the castle.
    pub const BROWN: Color = Color::from_rgb_u8(139, 69, 19);
    /// Block border.
    pub const BLOCK_BORDER: Color = Color::from_rgb_u8(160, 82, 45);
    /// Coin body.
    pub const COIN: Color = Color::from_rgb_u8(255, 215, 0);
    /// Coin shine.
    pub const COIN_HIGHLIGHT: Color = Color::from_rgb_u8(255, 255, 0);
    /// Flag pole.
    pub const POLE: Color = Color::from_rgb_u8(100, 100, 100);
    /// Flag cloth.
    pub const FLAG: Color = Color::from_rgb_u8(0, 200, 0);
    /// Player body.
    pub const PLAYER: Color = Color::from_rgb_u8(255, 0, 0);
    /// Castle door, HUD text and end screen background.
    pub const BLACK: Color = Color::from_rgb_u8(0, 0, 0);
    /// End screen text.
    pub const WHITE: Color = Color::from_rgb_u8(255, 255, 255);
}

/// Horizontal alignment of a text primitive relative to its position.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextAnchor {
    /// The position is the upper-left corner of the text.
    TopLeft,
    /// The position is the middle of the text's top edge.
    TopCenter,
}

/// Device-space primitive executed by a rendering backend.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    /// Fills the whole frame.
    Clear {
        /// Fill color.
        color: Color,
    },
    /// Fills a rectangle.
    Rect {
        /// Device-space bounds.
        rect: Rect,
        /// Fill color.
        color: Color,
    },
    /// Strokes the inside edge of a rectangle.
    RectOutline {
        /// Device-space bounds.
        rect: Rect,
        /// Stroke width.
        thickness: f32,
        /// Stroke color.
        color: Color,
    },
    /// Fills a circle.
    Circle {
        /// Device-space centre.
        center: Vec2,
        /// Radius in device units.
        radius: f32,
        /// Fill color.
        color: Color,
    },
    /// Fills a convex polygon.
    Polygon {
        /// Device-space vertices in drawing order.
        points: Vec<Vec2>,
        /// Fill color.
        color: Color,
    },
    /// Draws a single line of text.
    Text {
        /// Text to draw.
        text: String,
        /// Device-space anchor point.
        position: Vec2,
        /// Point size.
        size: f32,
        /// How `position` relates to the text extent.
        anchor: TextAnchor,
        /// Text color.
        color: Color,
    },
}

/// Builds the primitives for a single gameplay frame.
///
/// Drawing order is sky, ground, blocks, coins, enemies, flag, castle,
/// player, HUD. Rectangles and circles that fall entirely outside the
/// viewport are skipped.
#[must_use]
pub fn draw_list(scene: &Scene) -> Vec<DrawCommand> {
    let mut list = DrawList::new(scene);
    list.push(DrawCommand::Clear {
        color: palette::SKY,
    });

    list.ground();
    for &tile in &scene.tiles {
        list.block(tile);
    }
    for &coin in &scene.coins {
        list.coin(coin);
    }
    for &enemy in &scene.enemies {
        list.rect(enemy, palette::BROWN);
    }
    if let Some(goal) = scene.goal {
        list.flag(goal.flag_x);
        list.castle(goal.castle_x);
    }
    list.rect(scene.player, palette::PLAYER);

    list.push(DrawCommand::Text {
        text: format!("Score: {}", scene.score),
        position: HUD_POSITION,
        size: HUD_FONT_SIZE,
        anchor: TextAnchor::TopLeft,
        color: palette::BLACK,
    });
    list.commands
}

/// Builds the end screen for a finished session.
///
/// Returns `None` while the session is still running.
#[must_use]
pub fn end_screen(scene: &Scene) -> Option<Vec<DrawCommand>> {
    let outcome: Outcome = scene.outcome?;
    let viewport = scene.viewport;
    Some(vec![
        DrawCommand::Clear {
            color: palette::BLACK,
        },
        DrawCommand::Text {
            text: outcome.message().to_owned(),
            position: Vec2::new(viewport.width() * 0.5, viewport.height() * 0.5),
            size: HUD_FONT_SIZE,
            anchor: TextAnchor::TopCenter,
            color: palette::WHITE,
        },
    ])
}

struct DrawList<'scene> {
    scene: &'scene Scene,
    bounds: Rect,
    commands: Vec<DrawCommand>,
}

impl<'scene> DrawList<'scene> {
    fn new(scene: &'scene Scene) -> Self {
        Self {
            scene,
            bounds: scene.viewport.bounds(),
            commands: Vec::new(),
        }
    }

    fn push(&mut self, command: DrawCommand) {
        self.commands.push(command);
    }

    /// Converts to device space, or `None` when nothing would be visible.
    fn visible(&self, world: Rect) -> Option<Rect> {
        let rect = self.scene.to_screen(world);
        rect.intersects(&self.bounds).then_some(rect)
    }

    fn rect(&mut self, world: Rect, color: Color) {
        if let Some(rect) = self.visible(world) {
            self.push(DrawCommand::Rect { rect, color });
        }
    }

    fn ground(&mut self) {
        let tile = self.scene.tile_size;
        if tile.x <= 0.0 {
            return;
        }

        let mut x = 0.0;
        while x < self.scene.world_width {
            self.rect(
                Rect::new(x, self.scene.ground_y, tile.x, tile.y),
                palette::GROUND,
            );
            x += tile.x;
        }
    }

    fn block(&mut self, world: Rect) {
        if let Some(rect) = self.visible(world) {
            self.push(DrawCommand::Rect {
                rect,
                color: palette::BROWN,
            });
            self.push(DrawCommand::RectOutline {
                rect,
                thickness: BLOCK_BORDER,
                color: palette::BLOCK_BORDER,
            });
        }
    }

    fn coin(&mut self, center: Vec2) {
        let extent = Rect::centered_square(center.x, center.y, COIN_RADIUS);
        if self.visible(extent).is_none() {
            return;
        }

        let center = Vec2::new(self.scene.screen_x(center.x), center.y);
        self.push(DrawCommand::Circle {
            center,
            radius: COIN_RADIUS,
            color: palette::COIN,
        });
        self.push(DrawCommand::Circle {
            center: center + COIN_HIGHLIGHT_OFFSET,
            radius: COIN_RADIUS * 0.5,
            color: palette::COIN_HIGHLIGHT,
        });
    }

    fn flag(&mut self, flag_x: f32) {
        let top = self.scene.ground_y - POLE_HEIGHT;
        let extent = Rect::new(flag_x, top, POLE_WIDTH + FLAG_LENGTH, POLE_HEIGHT);
        if self.visible(extent).is_none() {
            return;
        }

        self.rect(
            Rect::new(flag_x, top, POLE_WIDTH, POLE_HEIGHT),
            palette::POLE,
        );
        let hoist = self.scene.screen_x(flag_x) + POLE_WIDTH;
        self.push(DrawCommand::Polygon {
            points: vec![
                Vec2::new(hoist, top),
                Vec2::new(hoist + FLAG_LENGTH, top + FLAG_DROP * 0.5),
                Vec2::new(hoist, top + FLAG_DROP),
            ],
            color: palette::FLAG,
        });
    }

    fn castle(&mut self, castle_x: f32) {
        let ground_y = self.scene.ground_y;
        let walls = Rect::new(castle_x, ground_y - CASTLE_SIZE.y, CASTLE_SIZE.x, CASTLE_SIZE.y);
        if self.visible(walls).is_none() {
            return;
        }

        self.rect(walls, palette::BROWN);
        self.rect(
            Rect::new(
                castle_x + DOOR_INSET,
                ground_y - DOOR_SIZE.y,
                DOOR_SIZE.x,
                DOOR_SIZE.y,
            ),
            palette::BLACK,
        );
    }
}
