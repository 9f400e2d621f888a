//! Axis-aligned collision checks
//!
//! Everything on the board moves on (or between) fixed tile rows, so a
//! collision is just two axis-aligned distance thresholds. With at most 7
//! enemies and 5 items a plain per-frame scan is all the indexing needed.

use glam::Vec2;

use crate::consts::*;

/// Overlap test against per-axis pixel thresholds
#[inline]
fn within(a: Vec2, b: Vec2, threshold_x: f32, threshold_y: f32) -> bool {
    (a.x - b.x).abs() < threshold_x && (a.y - b.y).abs() < threshold_y
}

/// Has an enemy bug hit the player?
#[inline]
pub fn enemy_hit(player: Vec2, enemy: Vec2) -> bool {
    within(player, enemy, ENEMY_HIT_X, ENEMY_HIT_Y)
}

/// Is the player on top of an item? Tighter thresholds than enemies: the
/// item sprite is narrower than a tile.
#[inline]
pub fn item_hit(player: Vec2, item: Vec2) -> bool {
    within(player, item, ITEM_HIT_X, ITEM_HIT_Y)
}
