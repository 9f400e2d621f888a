//! Grid Dash - a tile-grid road-crossing arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, collisions, game state)
//! - `renderer`: Canvas 2D drawing (wasm only)
//! - `settings`: Player preferences
//! - `highscores`: LocalStorage leaderboard

pub mod highscores;
#[cfg(target_arch = "wasm32")]
pub mod renderer;
pub mod settings;
pub mod sim;

pub use highscores::HighScores;
pub use settings::Settings;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (120 Hz)
    pub const SIM_DT: f32 = 1.0 / 120.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Canvas dimensions (5 columns x 6 rows of tiles)
    pub const CANVAS_WIDTH: f32 = 505.0;
    pub const CANVAS_HEIGHT: f32 = 606.0;

    /// Tile grid layout
    pub const TILE_WIDTH: f32 = 101.0;
    pub const TILE_HEIGHT: f32 = 83.0;
    pub const NUM_COLS: u32 = 5;
    pub const NUM_ROWS: u32 = 6;

    /// Player start tile (bottom center of the grass rows)
    pub const PLAYER_START_X: f32 = 200.0;
    pub const PLAYER_START_Y: f32 = 380.0;
    /// Rightmost x a player move may land on
    pub const PLAYER_MAX_X: f32 = 404.0;
    /// Bottommost y a player move may land on
    pub const PLAYER_MAX_Y: f32 = 380.0;

    /// The three stone lanes enemies travel along
    pub const LANE_YS: [f32; 3] = [60.0, 145.0, 230.0];

    /// Enemies respawn here after leaving the right edge
    pub const ENEMY_SPAWN_X: f32 = -100.0;
    /// An enemy past this x is fully off-screen
    pub const ENEMY_EXIT_X: f32 = CANVAS_WIDTH;
    /// Enemy speed range (pixels/sec, whole numbers)
    pub const ENEMY_MIN_SPEED: u32 = 50;
    pub const ENEMY_MAX_SPEED: u32 = 250;

    /// Axis-aligned collision thresholds (pixels)
    pub const ENEMY_HIT_X: f32 = 80.0;
    pub const ENEMY_HIT_Y: f32 = 30.0;
    pub const ITEM_HIT_X: f32 = 15.0;
    pub const ITEM_HIT_Y: f32 = 40.0;

    /// Points per item collected
    pub const ITEM_SCORE: u64 = 10;
    /// Lives at round start
    pub const START_LIVES: u8 = 3;
}

/// Pixel position of a tile's top-left corner
#[inline]
pub fn tile_to_px(col: u32, row: u32) -> Vec2 {
    Vec2::new(col as f32 * consts::TILE_WIDTH, row as f32 * consts::TILE_HEIGHT)
}
