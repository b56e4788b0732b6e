//! Static level geometry and the coin arena.

use castle_run_core::{CoinId, Rect, TileId};

/// Immutable collision rectangle placed when the level is built.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Tile {
    /// Identifier allocated by the level for the tile.
    pub(crate) id: TileId,
    /// World-space bounds of the tile.
    pub(crate) rect: Rect,
}

/// Collectible coin stored inside the level arena.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Coin {
    /// Identifier allocated by the level for the coin.
    pub(crate) id: CoinId,
    /// Horizontal centre of the coin.
    pub(crate) center_x: f32,
    /// Vertical centre of the coin.
    pub(crate) center_y: f32,
    /// Square hitbox used to detect pickups.
    pub(crate) pickup: Rect,
    /// Once set the coin never scores or renders again.
    pub(crate) collected: bool,
}

/// Tiles, coins and goal that make up a level.
///
/// Tiles and coins are addressed by their insertion index so that identifiers
/// stay stable for the lifetime of a session; coins are never removed, only
/// flagged as collected.
#[derive(Debug, Default)]
pub(crate) struct Level {
    tiles: Vec<Tile>,
    coins: Vec<Coin>,
    goal_x: Option<f32>,
}

impl Level {
    /// Creates an empty level without a goal.
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn place_tile(&mut self, rect: Rect) -> TileId {
        let id = TileId::new(self.tiles.len() as u32);
        self.tiles.push(Tile { id, rect });
        id
    }

    pub(crate) fn place_coin(&mut self, center_x: f32, center_y: f32, radius: f32) -> CoinId {
        let id = CoinId::new(self.coins.len() as u32);
        self.coins.push(Coin {
            id,
            center_x,
            center_y,
            pickup: Rect::centered_square(center_x, center_y, radius),
            collected: false,
        });
        id
    }

    pub(crate) fn set_goal(&mut self, x: f32) {
        self.goal_x = Some(x);
    }

    pub(crate) fn goal_x(&self) -> Option<f32> {
        self.goal_x
    }

    pub(crate) fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    pub(crate) fn coins(&self) -> &[Coin] {
        &self.coins
    }

    /// Flags every uncollected coin whose pickup box overlaps `hitbox`.
    ///
    /// Identifiers of the newly collected coins are appended to `out` in
    /// arena order.
    pub(crate) fn collect_overlapping(&mut self, hitbox: &Rect, out: &mut Vec<CoinId>) {
        for coin in self
            .coins
            .iter_mut()
            .filter(|coin| !coin.collected && coin.pickup.intersects(hitbox))
        {
            coin.collected = true;
            out.push(coin.id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identifiers_follow_insertion_order() {
        let mut level = Level::new();
        let first = level.place_tile(Rect::new(0.0, 440.0, 50.0, 20.0));
        let second = level.place_tile(Rect::new(50.0, 440.0, 50.0, 20.0));
        assert_eq!(first.get(), 0);
        assert_eq!(second.get(), 1);
        assert_eq!(level.tiles()[1].id, second);

        let coin = level.place_coin(475.0, 340.0, 8.0);
        assert_eq!(coin.get(), 0);
        assert_eq!(level.coins()[0].pickup, Rect::new(467.0, 332.0, 16.0, 16.0));
    }

    #[test]
    fn coins_are_collected_once() {
        let mut level = Level::new();
        let coin = level.place_coin(100.0, 100.0, 8.0);
        let _ = level.place_coin(400.0, 100.0, 8.0);
        let hitbox = Rect::new(90.0, 80.0, 32.0, 48.0);

        let mut collected = Vec::new();
        level.collect_overlapping(&hitbox, &mut collected);
        assert_eq!(collected, vec![coin]);

        collected.clear();
        level.collect_overlapping(&hitbox, &mut collected);
        assert!(collected.is_empty());
        assert!(level.coins()[0].collected);
        assert!(!level.coins()[1].collected);
    }

    #[test]
    fn goal_is_absent_until_placed() {
        let mut level = Level::new();
        assert_eq!(level.goal_x(), None);
        level.set_goal(5_250.0);
        assert_eq!(level.goal_x(), Some(5_250.0));
    }
}
