//! Horizontal camera that keeps the player centred.

use castle_run_core::Rect;

#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct Camera {
    offset: f32,
}

impl Camera {
    pub(crate) fn offset(&self) -> f32 {
        self.offset
    }

    /// Centres the view on `target`, clamped so the world edges never scroll
    /// into view.
    pub(crate) fn follow(&mut self, target: &Rect, screen_width: f32, max_offset: f32) {
        self.offset = (target.center_x() - screen_width * 0.5).clamp(0.0, max_offset.max(0.0));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stays_at_left_edge_near_start() {
        let mut camera = Camera::default();
        camera.follow(&Rect::new(50.0, 392.0, 32.0, 48.0), 800.0, 4_700.0);
        assert_eq!(camera.offset(), 0.0);
    }

    #[test]
    fn centres_player_mid_level() {
        let mut camera = Camera::default();
        camera.follow(&Rect::new(2_000.0, 392.0, 32.0, 48.0), 800.0, 4_700.0);
        assert_eq!(camera.offset(), 1_616.0);
    }

    #[test]
    fn clamps_at_right_edge() {
        let mut camera = Camera::default();
        camera.follow(&Rect::new(5_468.0, 392.0, 32.0, 48.0), 800.0, 4_700.0);
        assert_eq!(camera.offset(), 4_700.0);
    }
}
