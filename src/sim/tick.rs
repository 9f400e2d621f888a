//! Fixed timestep simulation tick
//!
//! Core game loop that advances one round deterministically.

use super::state::{GamePhase, GameState};
use super::{collision, grid};
use crate::consts::*;

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// One-tile player move (from the arrow keys)
    pub move_dir: Option<grid::Direction>,
    /// Leave the win/lose modal and reset for a new round
    pub restart: bool,
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    match state.phase {
        GamePhase::Select => return,
        GamePhase::Won | GamePhase::Lost => {
            if input.restart {
                state.reset();
            }
            return;
        }
        GamePhase::Playing => {}
    }

    state.time_ticks += 1;

    // Player movement. Moves that would leave the grid are dropped here
    // rather than clamped, so the position is always a legal tile.
    if let Some(dir) = input.move_dir {
        if let Some(next) = grid::step(state.player.pos, dir) {
            state.player.pos = next;
        }
    }

    // Enemy motion and right-edge respawn
    for enemy in &mut state.enemies {
        enemy.update(dt, &mut state.rng);
    }

    // Enemy collision scan. Stop at the first hit: the player teleports
    // back to the start tile, so checking the remaining enemies against
    // the stale position could charge one crossing twice.
    for i in 0..state.enemies.len() {
        if collision::enemy_hit(state.player.pos, state.enemies[i].pos) {
            state.lives = state.lives.saturating_sub(1);
            state.player.reset_position();
            log::info!("Hit by a bug, {} lives left", state.lives);

            if state.lives == 0 {
                state.phase = GamePhase::Lost;
                return;
            }
            break;
        }
    }

    // Item pickup: remove and score, items never come back this round
    let player_pos = state.player.pos;
    let before = state.items.len();
    state
        .items
        .retain(|item| !collision::item_hit(player_pos, item.pos));
    state.score += (before - state.items.len()) as u64 * ITEM_SCORE;

    // Win check: crossing above the top row, regardless of items left
    if grid::reached_goal(state.player.pos) {
        state.phase = GamePhase::Won;
        log::info!("Round won with score {}", state.score);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{Character, Difficulty, Enemy, Item, ItemKind};
    use crate::sim::Direction;
    use glam::Vec2;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    /// A round in progress with a known, empty board
    fn playing_state() -> GameState {
        let mut state = GameState::new(42);
        state.start_round(Difficulty::Easy, Character::Boy);
        state.enemies.clear();
        state.items.clear();
        state
    }

    fn run(state: &mut GameState, input: TickInput) {
        tick(state, &input, SIM_DT);
    }

    #[test]
    fn test_select_phase_ignores_everything() {
        let mut state = GameState::new(1);
        run(
            &mut state,
            TickInput {
                move_dir: Some(Direction::Up),
                restart: true,
            },
        );
        assert_eq!(state.phase, GamePhase::Select);
        assert_eq!(state.time_ticks, 0);
    }

    #[test]
    fn test_enemy_advances_by_speed_times_dt() {
        let mut state = playing_state();
        state.enemies.push(Enemy {
            pos: Vec2::new(100.0, 60.0),
            speed: 120.0,
        });

        run(&mut state, TickInput::default());
        assert_eq!(state.enemies[0].pos.x, 100.0 + 120.0 * SIM_DT);
    }

    #[test]
    fn test_enemy_past_right_edge_respawns_left() {
        let mut state = playing_state();
        state.enemies.push(Enemy {
            pos: Vec2::new(ENEMY_EXIT_X + 10.0, 60.0),
            speed: 200.0,
        });

        run(&mut state, TickInput::default());
        assert_eq!(state.enemies[0].pos.x, ENEMY_SPAWN_X);
        assert!(LANE_YS.contains(&state.enemies[0].pos.y));
    }

    #[test]
    fn test_spawn_collision_example() {
        // Player at the start tile, enemy spawned right on top of it:
        // immediate collision, lives 3 -> 2, player back at the start tile.
        let mut state = playing_state();
        state.enemies.push(Enemy {
            pos: Vec2::new(PLAYER_START_X, PLAYER_START_Y),
            speed: 75.0,
        });

        run(&mut state, TickInput::default());
        assert_eq!(state.lives, 2);
        assert_eq!(state.player.pos, Vec2::new(PLAYER_START_X, PLAYER_START_Y));
        assert_eq!(state.phase, GamePhase::Playing);
    }

    #[test]
    fn test_losing_last_life_raises_lost_once() {
        let mut state = playing_state();
        state.lives = 1;
        // Enemy parked on the start tile with zero speed keeps colliding
        state.enemies.push(Enemy {
            pos: Vec2::new(PLAYER_START_X, PLAYER_START_Y),
            speed: 0.0,
        });

        run(&mut state, TickInput::default());
        assert_eq!(state.lives, 0);
        assert_eq!(state.phase, GamePhase::Lost);

        // Further ticks are inert: lives never go below zero
        let ticks = state.time_ticks;
        run(&mut state, TickInput::default());
        assert_eq!(state.lives, 0);
        assert_eq!(state.phase, GamePhase::Lost);
        assert_eq!(state.time_ticks, ticks);
    }

    #[test]
    fn test_one_crossing_costs_one_life() {
        // Two overlapping enemies on the same tile: a single hit this frame
        let mut state = playing_state();
        for _ in 0..2 {
            state.enemies.push(Enemy {
                pos: Vec2::new(PLAYER_START_X, PLAYER_START_Y),
                speed: 0.0,
            });
        }

        run(&mut state, TickInput::default());
        assert_eq!(state.lives, 2);
    }

    #[test]
    fn test_item_pickup_scores_and_removes() {
        let mut state = playing_state();
        state.items.push(Item {
            pos: state.player.pos,
            kind: ItemKind::Star,
        });

        run(&mut state, TickInput::default());
        assert_eq!(state.score, ITEM_SCORE);
        assert!(state.items.is_empty());

        // Picked-up items never reappear within the round
        run(&mut state, TickInput::default());
        assert_eq!(state.score, ITEM_SCORE);
        assert!(state.items.is_empty());
    }

    #[test]
    fn test_win_on_crossing_top_row() {
        let mut state = playing_state();
        // Leave an item on the board: winning does not depend on it
        state.items.push(Item {
            pos: Vec2::new(416.0, 249.0),
            kind: ItemKind::Key,
        });
        state.player.pos = Vec2::new(200.0, 48.0);

        run(
            &mut state,
            TickInput {
                move_dir: Some(Direction::Up),
                restart: false,
            },
        );
        assert_eq!(state.phase, GamePhase::Won);
        assert_eq!(state.player.pos.y, -35.0);
    }

    #[test]
    fn test_restart_from_terminal_returns_to_select() {
        let mut state = playing_state();
        state.player.pos = Vec2::new(200.0, -35.0);
        run(&mut state, TickInput::default());
        assert_eq!(state.phase, GamePhase::Won);

        run(
            &mut state,
            TickInput {
                move_dir: None,
                restart: true,
            },
        );
        assert_eq!(state.phase, GamePhase::Select);
        assert_eq!(state.score, 0);
        assert_eq!(state.lives, START_LIVES);
    }

    #[test]
    fn test_blocked_move_is_silently_dropped() {
        let mut state = playing_state();
        run(
            &mut state,
            TickInput {
                move_dir: Some(Direction::Down),
                restart: false,
            },
        );
        assert_eq!(state.player.pos, Vec2::new(PLAYER_START_X, PLAYER_START_Y));
        assert_eq!(state.phase, GamePhase::Playing);
    }

    fn direction_strategy() -> impl Strategy<Value = Direction> {
        prop_oneof![
            Just(Direction::Left),
            Just(Direction::Right),
            Just(Direction::Up),
            Just(Direction::Down),
        ]
    }

    proptest! {
        #[test]
        fn prop_enemy_x_non_decreasing_or_reset(
            x in -100.0f32..=505.0,
            speed in 50.0f32..=250.0,
            dt in 0.0f32..0.5,
        ) {
            let mut rng = Pcg32::seed_from_u64(0);
            let mut enemy = Enemy { pos: Vec2::new(x, LANE_YS[1]), speed };
            let before = enemy.pos.x;

            enemy.update(dt, &mut rng);

            if enemy.pos.x < before {
                // Only a wrap moves an enemy backwards, and it always lands
                // on the spawn edge after exceeding the right bound
                prop_assert_eq!(enemy.pos.x, ENEMY_SPAWN_X);
                prop_assert!(before + speed * dt > ENEMY_EXIT_X);
            }
        }

        #[test]
        fn prop_player_stays_in_grid(dirs in prop::collection::vec(direction_strategy(), 0..64)) {
            let mut pos = Vec2::new(PLAYER_START_X, PLAYER_START_Y);
            for dir in dirs {
                if let Some(next) = grid::step(pos, dir) {
                    pos = next;
                }
                prop_assert!(pos.x >= 0.0 && pos.x <= PLAYER_MAX_X);
                prop_assert!(pos.y <= PLAYER_MAX_Y);
                // The only position above the grid is the winning row
                if pos.y < 0.0 {
                    prop_assert_eq!(pos.y, PLAYER_START_Y - 5.0 * TILE_HEIGHT);
                    break;
                }
            }
        }

        #[test]
        fn prop_round_invariants_hold(
            seed in 0u64..1000,
            dirs in prop::collection::vec(prop::option::of(direction_strategy()), 1..200),
        ) {
            let mut state = GameState::new(seed);
            state.start_round(Difficulty::Medium, Character::Boy);

            let mut last_score = state.score;
            let mut last_items = state.items.len();

            for move_dir in dirs {
                let input = TickInput { move_dir, restart: false };
                tick(&mut state, &input, SIM_DT);

                prop_assert!(state.lives <= START_LIVES);
                prop_assert!(state.score >= last_score);
                prop_assert_eq!(state.score % ITEM_SCORE, 0);
                prop_assert!(state.items.len() <= last_items);

                last_score = state.score;
                last_items = state.items.len();
                if state.phase.is_terminal() {
                    break;
                }
            }
        }
    }
}
