//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod collision;
pub mod grid;
pub mod state;
pub mod tick;

pub use collision::{enemy_hit, item_hit};
pub use grid::{Direction, item_slots, reached_goal, step};
pub use state::{Character, Difficulty, Enemy, GamePhase, GameState, Item, ItemKind, Player};
pub use tick::{TickInput, tick};
