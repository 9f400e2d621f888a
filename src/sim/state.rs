//! Game state and core simulation types

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting on the character/difficulty select screen
    Select,
    /// Active gameplay
    Playing,
    /// Player crossed the water row
    Won,
    /// Player ran out of lives
    Lost,
}

impl GamePhase {
    /// Whether the round has ended (win or lose)
    pub fn is_terminal(&self) -> bool {
        matches!(self, GamePhase::Won | GamePhase::Lost)
    }
}

/// Selectable player sprites
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Character {
    #[default]
    Boy,
    CatGirl,
    HornGirl,
    PinkGirl,
    PrincessGirl,
}

impl Character {
    /// Sprite path for the renderer
    pub fn sprite(&self) -> &'static str {
        match self {
            Character::Boy => "images/char-boy.png",
            Character::CatGirl => "images/char-cat-girl.png",
            Character::HornGirl => "images/char-horn-girl.png",
            Character::PinkGirl => "images/char-pink-girl.png",
            Character::PrincessGirl => "images/char-princess-girl.png",
        }
    }

    /// Parse the CSS class name used by the select screen
    pub fn from_class(s: &str) -> Option<Self> {
        match s {
            "char-boy" => Some(Character::Boy),
            "char-cat-girl" => Some(Character::CatGirl),
            "char-horn-girl" => Some(Character::HornGirl),
            "char-pink-girl" => Some(Character::PinkGirl),
            "char-princess-girl" => Some(Character::PrincessGirl),
            _ => None,
        }
    }
}

/// Difficulty level, chosen on the select screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    /// Number of enemies on the board for this difficulty
    pub fn enemy_count(&self) -> usize {
        match self {
            Difficulty::Easy => 3,
            Difficulty::Medium => 5,
            Difficulty::Hard => 7,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }

    /// Parse the CSS class name used by the select screen
    pub fn from_class(s: &str) -> Option<Self> {
        match s {
            "easy" => Some(Difficulty::Easy),
            "medium" => Some(Difficulty::Medium),
            "hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }
}

/// A bug crossing one of the stone lanes
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub pos: Vec2,
    /// Horizontal speed in pixels/sec
    pub speed: f32,
}

impl Enemy {
    /// Advance along the lane; respawn on the left once fully off-screen.
    ///
    /// Respawning repositions the same entity with a fresh lane and speed,
    /// it never destroys it.
    pub fn update(&mut self, dt: f32, rng: &mut Pcg32) {
        if self.pos.x <= ENEMY_EXIT_X {
            self.pos.x += self.speed * dt;
        }
        if self.pos.x > ENEMY_EXIT_X {
            self.respawn(rng);
        }
    }

    /// Move back to the left edge with a new random lane and speed
    pub fn respawn(&mut self, rng: &mut Pcg32) {
        self.pos = Vec2::new(ENEMY_SPAWN_X, random_lane(rng));
        self.speed = random_speed(rng);
    }
}

/// The six collectible sprites
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ItemKind {
    GemBlue,
    GemGreen,
    GemOrange,
    Heart,
    Key,
    Star,
}

impl ItemKind {
    pub const ALL: [ItemKind; 6] = [
        ItemKind::GemBlue,
        ItemKind::GemGreen,
        ItemKind::GemOrange,
        ItemKind::Heart,
        ItemKind::Key,
        ItemKind::Star,
    ];

    /// Sprite path for the renderer
    pub fn sprite(&self) -> &'static str {
        match self {
            ItemKind::GemBlue => "images/Gem Blue.png",
            ItemKind::GemGreen => "images/Gem Green.png",
            ItemKind::GemOrange => "images/Gem Orange.png",
            ItemKind::Heart => "images/Heart.png",
            ItemKind::Key => "images/Key.png",
            ItemKind::Star => "images/Star.png",
        }
    }
}

/// A collectible placed on a lane slot, removed on pickup
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Item {
    pub pos: Vec2,
    pub kind: ItemKind,
}

/// The player sprite
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    pub character: Character,
}

impl Player {
    pub fn new(character: Character) -> Self {
        Self {
            pos: Vec2::new(PLAYER_START_X, PLAYER_START_Y),
            character,
        }
    }

    /// Back to the start tile (after a hit, or at round start)
    pub fn reset_position(&mut self) {
        self.pos = Vec2::new(PLAYER_START_X, PLAYER_START_Y);
    }
}

/// Complete game state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Round seed for reproducibility
    pub seed: u64,
    /// Seeded RNG; all sim randomness flows through here
    pub rng: Pcg32,
    /// Current phase
    pub phase: GamePhase,
    /// Difficulty of the current round
    pub difficulty: Difficulty,
    /// Score (monotonic, +10 per item)
    pub score: u64,
    /// Lives remaining (0..=3)
    pub lives: u8,
    /// Player sprite
    pub player: Player,
    /// Enemies crossing the lanes
    pub enemies: Vec<Enemy>,
    /// Items still on the board this round
    pub items: Vec<Item>,
    /// Simulation tick counter
    pub time_ticks: u64,
}

impl GameState {
    /// Create a fresh state on the select screen
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Select,
            difficulty: Difficulty::default(),
            score: 0,
            lives: START_LIVES,
            player: Player::new(Character::default()),
            enemies: Vec::new(),
            items: Vec::new(),
            time_ticks: 0,
        }
    }

    /// Begin a round with the chosen difficulty and character.
    ///
    /// Spawns enemies scattered across the lanes and a handful of items at
    /// unique slots, resets score and lives, and enters Playing.
    pub fn start_round(&mut self, difficulty: Difficulty, character: Character) {
        self.difficulty = difficulty;
        self.score = 0;
        self.lives = START_LIVES;
        self.player = Player::new(character);
        self.time_ticks = 0;

        self.spawn_enemies(difficulty.enemy_count());
        self.spawn_items();

        self.phase = GamePhase::Playing;
        log::info!(
            "Round started: {} ({} enemies, {} items)",
            difficulty.as_str(),
            self.enemies.len(),
            self.items.len()
        );
    }

    /// Clear the board and return to the select screen
    pub fn reset(&mut self) {
        self.phase = GamePhase::Select;
        self.score = 0;
        self.lives = START_LIVES;
        self.player.reset_position();
        self.enemies.clear();
        self.items.clear();
        self.time_ticks = 0;
    }

    fn spawn_enemies(&mut self, count: usize) {
        self.enemies.clear();
        for _ in 0..count {
            // Initial spawns start anywhere along the lane, not at the edge
            let x = self.rng.random_range(0..600) as f32;
            let enemy = Enemy {
                pos: Vec2::new(x, random_lane(&mut self.rng)),
                speed: random_speed(&mut self.rng),
            };
            self.enemies.push(enemy);
        }
    }

    fn spawn_items(&mut self) {
        self.items.clear();
        let mut open_slots = super::grid::item_slots();
        let count = self.rng.random_range(3..=4);

        for _ in 0..count {
            let kind = ItemKind::ALL[self.rng.random_range(0..ItemKind::ALL.len())];
            // Draw from a shrinking pool so positions stay unique
            let slot = open_slots.remove(self.rng.random_range(0..open_slots.len()));
            self.items.push(Item { pos: slot, kind });
        }
    }
}

fn random_lane(rng: &mut Pcg32) -> f32 {
    LANE_YS[rng.random_range(0..LANE_YS.len())]
}

fn random_speed(rng: &mut Pcg32) -> f32 {
    rng.random_range(ENEMY_MIN_SPEED..=ENEMY_MAX_SPEED) as f32
}
