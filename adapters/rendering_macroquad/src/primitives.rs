use castle_run_rendering::{Color, DrawCommand, TextAnchor};
use glam::Vec2;
use macroquad::{
    math::Vec2 as MacroquadVec2,
    shapes::{draw_circle, draw_rectangle, draw_rectangle_lines, draw_triangle},
    text::{draw_text, measure_text},
    window::clear_background,
};

/// Executes a draw list against the current macroquad frame.
pub(crate) fn execute(commands: &[DrawCommand]) {
    for command in commands {
        match command {
            DrawCommand::Clear { color } => clear_background(to_macroquad_color(*color)),
            DrawCommand::Rect { rect, color } => draw_rectangle(
                rect.x(),
                rect.y(),
                rect.width(),
                rect.height(),
                to_macroquad_color(*color),
            ),
            DrawCommand::RectOutline {
                rect,
                thickness,
                color,
            } => draw_rectangle_lines(
                rect.x(),
                rect.y(),
                rect.width(),
                rect.height(),
                *thickness,
                to_macroquad_color(*color),
            ),
            DrawCommand::Circle {
                center,
                radius,
                color,
            } => draw_circle(center.x, center.y, *radius, to_macroquad_color(*color)),
            DrawCommand::Polygon { points, color } => {
                for [a, b, c] in fan_triangles(points) {
                    draw_triangle(
                        to_macroquad_vec(a),
                        to_macroquad_vec(b),
                        to_macroquad_vec(c),
                        to_macroquad_color(*color),
                    );
                }
            }
            DrawCommand::Text {
                text,
                position,
                size,
                anchor,
                color,
            } => {
                let font_size = size.round().clamp(1.0, f32::from(u16::MAX)) as u16;
                let dimensions = measure_text(text, None, font_size, 1.0);
                let baseline =
                    text_baseline(*position, *anchor, dimensions.width, dimensions.offset_y);
                let _ = draw_text(
                    text,
                    baseline.x,
                    baseline.y,
                    f32::from(font_size),
                    to_macroquad_color(*color),
                );
            }
        }
    }
}

/// Splits a convex polygon into a triangle fan around its first vertex.
pub(crate) fn fan_triangles(points: &[Vec2]) -> impl Iterator<Item = [Vec2; 3]> + '_ {
    let first = points.first().copied().unwrap_or(Vec2::ZERO);
    points
        .get(1..)
        .unwrap_or_default()
        .windows(2)
        .map(move |pair| [first, pair[0], pair[1]])
}

/// Macroquad draws text from its baseline; the draw list positions text by its top edge.
pub(crate) fn text_baseline(position: Vec2, anchor: TextAnchor, width: f32, ascent: f32) -> Vec2 {
    let x = match anchor {
        TextAnchor::TopLeft => position.x,
        TextAnchor::TopCenter => position.x - width * 0.5,
    };
    Vec2::new(x, position.y + ascent)
}

fn to_macroquad_vec(point: Vec2) -> MacroquadVec2 {
    MacroquadVec2::new(point.x, point.y)
}

pub(crate) fn to_macroquad_color(color: Color) -> macroquad::color::Color {
    macroquad::color::Color::new(color.red, color.green, color.blue, color.alpha)
}
