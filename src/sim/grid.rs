//! Tile-grid geometry
//!
//! The board is a fixed 5x6 grid of 101x83 tiles: one water row at the top,
//! three stone lanes, two grass rows at the bottom. The player moves in
//! whole-tile steps; enemies travel along the stone lanes; items sit at a
//! fixed set of lane slots.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// A discrete one-tile player move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

/// Apply a one-tile move, or None if the destination leaves the grid.
///
/// Bounds are enforced here, at input time, rather than by clamping after
/// the fact. Moving up out of the top lane is allowed: crossing above the
/// water row is the winning move.
pub fn step(pos: Vec2, dir: Direction) -> Option<Vec2> {
    let next = match dir {
        Direction::Left => Vec2::new(pos.x - TILE_WIDTH, pos.y),
        Direction::Right => Vec2::new(pos.x + TILE_WIDTH, pos.y),
        Direction::Up => Vec2::new(pos.x, pos.y - TILE_HEIGHT),
        Direction::Down => Vec2::new(pos.x, pos.y + TILE_HEIGHT),
    };

    if next.x < 0.0 || next.x > PLAYER_MAX_X || next.y > PLAYER_MAX_Y {
        return None;
    }
    Some(next)
}

/// True once the player has crossed above the top row
#[inline]
pub fn reached_goal(pos: Vec2) -> bool {
    pos.y < 0.0
}

/// The 15 fixed positions an item may occupy (5 columns x 3 lanes).
///
/// The slot columns sit 14 px off the player columns {99, 200, 301, 402},
/// inside the 15 px pickup threshold. The leftmost two both pair with the
/// x = 99 column; a slot column the player cannot stand next to would be
/// an uncollectable item.
pub fn item_slots() -> Vec<Vec2> {
    const XS: [f32; 5] = [85.0, 113.0, 214.0, 315.0, 416.0];
    const YS: [f32; 3] = [83.0, 166.0, 249.0];

    let mut slots = Vec::with_capacity(XS.len() * YS.len());
    for &y in &YS {
        for &x in &XS {
            slots.push(Vec2::new(x, y));
        }
    }
    slots
}
