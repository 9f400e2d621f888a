//! Grid Dash entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, Element, HtmlCanvasElement};

    use grid_dash::consts::*;
    use grid_dash::renderer::Renderer;
    use grid_dash::sim::{Character, Difficulty, Direction, GamePhase, GameState, TickInput, tick};
    use grid_dash::{HighScores, Settings};

    /// Game instance holding all state
    struct Game {
        state: GameState,
        renderer: Option<Renderer>,
        accumulator: f32,
        last_time: f64,
        input: TickInput,
        settings: Settings,
        highscores: HighScores,
        // Select screen choices, pending until Start Game
        chosen_character: Option<Character>,
        chosen_difficulty: Option<Difficulty>,
        // Start screen has been dismissed
        intro_done: bool,
        // FPS tracking
        frame_times: [f64; 60],
        frame_index: usize,
        fps: u32,
        // Track transitions for modals and the hit flash
        last_phase: GamePhase,
        last_lives: u8,
        flash_frames: u8,
    }

    impl Game {
        fn new(seed: u64) -> Self {
            Self {
                state: GameState::new(seed),
                renderer: None,
                accumulator: 0.0,
                last_time: 0.0,
                input: TickInput::default(),
                settings: Settings::load(),
                highscores: HighScores::load(),
                chosen_character: None,
                chosen_difficulty: None,
                intro_done: false,
                frame_times: [0.0; 60],
                frame_index: 0,
                fps: 0,
                last_phase: GamePhase::Select,
                last_lives: START_LIVES,
                flash_frames: 0,
            }
        }

        /// Run simulation ticks
        fn update(&mut self, dt: f32, time: f64) {
            let dt = dt.min(0.1);
            self.accumulator += dt;

            let mut substeps = 0;
            while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
                let input = self.input;
                tick(&mut self.state, &input, SIM_DT);
                self.accumulator -= SIM_DT;
                substeps += 1;

                // Clear one-shot inputs after processing
                self.input.move_dir = None;
                self.input.restart = false;
            }

            // Track frame times for FPS
            self.frame_times[self.frame_index] = time;
            self.frame_index = (self.frame_index + 1) % 60;
            let oldest_time = self.frame_times[self.frame_index];
            if oldest_time > 0.0 {
                let elapsed = time - oldest_time;
                if elapsed > 0.0 {
                    self.fps = (60000.0 / elapsed).round() as u32;
                }
            }

            // Trigger the hit flash when a life is lost
            if self.state.lives < self.last_lives && self.settings.effective_hit_flash() {
                self.flash_frames = 20;
            }
            self.last_lives = self.state.lives;
            self.flash_frames = self.flash_frames.saturating_sub(1);

            // Record a finished round on the leaderboard
            if self.state.phase == GamePhase::Won && self.last_phase != GamePhase::Won {
                let rank = self.highscores.add_score(
                    self.state.score,
                    self.state.lives,
                    self.state.difficulty,
                    js_sys::Date::now(),
                );
                if let Some(rank) = rank {
                    log::info!("New high score, rank {rank}");
                    self.highscores.save();
                }
            }
            self.last_phase = self.state.phase;
        }

        /// Render the current frame
        fn render(&self) {
            if let Some(ref renderer) = self.renderer {
                renderer.render(&self.state);
            }
        }

        /// Update HUD elements in DOM
        fn update_hud(&self, document: &Document) {
            // Score
            if let Some(el) = document.get_element_by_id("hud-score") {
                el.set_text_content(Some(&self.state.score.to_string()));
            }

            // Lives as hearts
            if let Some(el) = document.get_element_by_id("hud-lives") {
                el.set_text_content(Some(&"\u{2665}".repeat(self.state.lives as usize)));
            }

            // FPS (optional)
            if let Some(el) = document.get_element_by_id("hud-fps") {
                if self.settings.show_fps {
                    show(&el);
                    el.set_text_content(Some(&self.fps.to_string()));
                } else {
                    hide(&el);
                }
            }

            // Hit flash on the canvas border
            if let Some(el) = document.get_element_by_id("canvas") {
                if self.flash_frames > 0 {
                    let _ = el.class_list().add_1("flash");
                } else {
                    let _ = el.class_list().remove_1("flash");
                }
            }
        }

        /// Show/hide screens based on the current phase
        fn update_screens(&self, document: &Document) {
            // Select screen, once the intro has been dismissed
            if let Some(el) = document.get_element_by_id("select-screen") {
                if self.state.phase == GamePhase::Select && self.intro_done {
                    show(&el);
                } else {
                    hide(&el);
                }
            }

            // Win modal, with the round stats
            if let Some(el) = document.get_element_by_id("win") {
                if self.state.phase == GamePhase::Won {
                    if let Some(stats) = document.get_element_by_id("win-stats") {
                        stats.set_text_content(Some(&format!(
                            "You won the game with a score of {} and with {} lives left!",
                            self.state.score, self.state.lives
                        )));
                    }
                    show(&el);
                } else {
                    hide(&el);
                }
            }

            // Lose modal
            if let Some(el) = document.get_element_by_id("lose") {
                if self.state.phase == GamePhase::Lost {
                    show(&el);
                } else {
                    hide(&el);
                }
            }
        }
    }

    fn show(el: &Element) {
        let _ = el.class_list().remove_1("hide");
    }

    fn hide(el: &Element) {
        let _ = el.class_list().add_1("hide");
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Grid Dash starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        let seed = js_sys::Date::now() as u64;
        let mut game = Game::new(seed);
        game.renderer = match Renderer::new(&canvas) {
            Ok(renderer) => Some(renderer),
            Err(e) => {
                log::error!("Renderer init failed: {e:?}");
                None
            }
        };
        let game = Rc::new(RefCell::new(game));

        log::info!("Game initialized with seed: {seed}");

        // Show the start screen until Next is pressed
        if let Some(el) = document.get_element_by_id("start-screen") {
            show(&el);
        }

        setup_keyboard(game.clone());
        setup_start_screen(&document, game.clone());
        setup_select_screen(&document, game.clone());
        setup_round_over_buttons(&document, game.clone());

        request_animation_frame(game);

        log::info!("Grid Dash running!");
    }

    fn setup_keyboard(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
            // Anything but the four arrows is silently ignored
            let dir = match event.key().as_str() {
                "ArrowLeft" => Some(Direction::Left),
                "ArrowRight" => Some(Direction::Right),
                "ArrowUp" => Some(Direction::Up),
                "ArrowDown" => Some(Direction::Down),
                _ => None,
            };
            if let Some(dir) = dir {
                event.prevent_default();
                game.borrow_mut().input.move_dir = Some(dir);
            }
        });
        let _ = window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_start_screen(document: &Document, game: Rc<RefCell<Game>>) {
        if let Some(btn) = document.get_element_by_id("next-button") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                let document = web_sys::window().unwrap().document().unwrap();
                if let Some(el) = document.get_element_by_id("start-screen") {
                    hide(&el);
                }
                game.borrow_mut().intro_done = true;
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_select_screen(document: &Document, game: Rc<RefCell<Game>>) {
        // Character tiles: class is "character <char-name>"
        if let Ok(characters) = document.query_selector_all(".character") {
            for i in 0..characters.length() {
                let Some(el) = characters.get(i).and_then(|n| n.dyn_into::<Element>().ok())
                else {
                    continue;
                };
                let choice = el
                    .class_list()
                    .item(1)
                    .and_then(|name| Character::from_class(&name));

                let game = game.clone();
                let el_clone = el.clone();
                let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                    let Some(choice) = choice else { return };
                    clear_selection(".character-list .selected");
                    let _ = el_clone.class_list().add_1("selected");
                    game.borrow_mut().chosen_character = Some(choice);
                    update_start_button(&game.borrow());
                });
                let _ =
                    el.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
                closure.forget();
            }
        }

        // Difficulty tiles: class is "difficulty <level>"
        if let Ok(difficulties) = document.query_selector_all(".difficulty") {
            for i in 0..difficulties.length() {
                let Some(el) = difficulties.get(i).and_then(|n| n.dyn_into::<Element>().ok())
                else {
                    continue;
                };
                let choice = el
                    .class_list()
                    .item(1)
                    .and_then(|name| Difficulty::from_class(&name));

                let game = game.clone();
                let el_clone = el.clone();
                let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                    let Some(choice) = choice else { return };
                    clear_selection(".difficulty-list .selected");
                    let _ = el_clone.class_list().add_1("selected");
                    game.borrow_mut().chosen_difficulty = Some(choice);
                    update_start_button(&game.borrow());
                });
                let _ =
                    el.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
                closure.forget();
            }
        }

        // Start Game button, enabled once both choices are made
        if let Some(btn) = document.get_element_by_id("start-button") {
            let btn_clone = btn.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                let mut g = game.borrow_mut();
                let (Some(difficulty), Some(character)) =
                    (g.chosen_difficulty, g.chosen_character)
                else {
                    return;
                };

                g.state.start_round(difficulty, character);
                g.last_lives = g.state.lives;
                g.chosen_character = None;
                g.chosen_difficulty = None;
                clear_selection(".selected");
                // Hidden again until the next round's choices are made
                hide(&btn_clone);
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    /// Both modals route back to the select flow via a sim restart
    fn setup_round_over_buttons(document: &Document, game: Rc<RefCell<Game>>) {
        for id in ["win-button", "lose-button"] {
            if let Some(btn) = document.get_element_by_id(id) {
                let game = game.clone();
                let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                    game.borrow_mut().input.restart = true;
                });
                let _ =
                    btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
                closure.forget();
            }
        }
    }

    /// Drop the selected marker from every element matching the selector
    fn clear_selection(selector: &str) {
        let document = web_sys::window().unwrap().document().unwrap();
        if let Ok(selected) = document.query_selector_all(selector) {
            for i in 0..selected.length() {
                if let Some(el) = selected.get(i).and_then(|n| n.dyn_into::<Element>().ok()) {
                    let _ = el.class_list().remove_1("selected");
                }
            }
        }
    }

    /// Reveal the Start Game button once character and difficulty are chosen
    fn update_start_button(game: &Game) {
        if game.chosen_character.is_none() || game.chosen_difficulty.is_none() {
            return;
        }
        let document = web_sys::window().unwrap().document().unwrap();
        if let Some(btn) = document.get_element_by_id("start-button") {
            show(&btn);
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        {
            let mut g = game.borrow_mut();

            // Calculate delta time
            let dt = if g.last_time > 0.0 {
                ((time - g.last_time) / 1000.0) as f32
            } else {
                SIM_DT
            };
            g.last_time = time;

            g.update(dt, time);
            g.render();

            let document = web_sys::window().unwrap().document().unwrap();
            g.update_hud(&document);
            g.update_screens(&document);
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Grid Dash (native) starting...");
    log::info!("The game targets the browser - build with trunk for the web version");

    // Headless sanity run of the sim
    run_headless_round();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Drive one scripted round straight up the board with a seeded state
#[cfg(not(target_arch = "wasm32"))]
fn run_headless_round() {
    use grid_dash::consts::SIM_DT;
    use grid_dash::sim::{Character, Difficulty, Direction, GameState, TickInput, tick};

    let mut state = GameState::new(0xDA5);
    state.start_round(Difficulty::Easy, Character::Boy);

    // One up-move every simulated quarter second until the round ends
    let mut ticks: u64 = 0;
    while !state.phase.is_terminal() && ticks < 120 * 60 {
        let move_dir = (ticks % 30 == 0).then_some(Direction::Up);
        let input = TickInput {
            move_dir,
            restart: false,
        };
        tick(&mut state, &input, SIM_DT);
        ticks += 1;
    }

    println!(
        "Round over after {} ticks: {:?}, score {}, {} lives left",
        ticks, state.phase, state.score, state.lives
    );
}
