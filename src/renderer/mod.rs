//! Canvas 2D rendering (wasm only)
//!
//! The board is a flipbook: every frame clears the canvas, redraws the six
//! tile rows, then every entity on top. No retained scene, no dirty
//! tracking; the whole screen is cheap to repaint at this size.

use std::collections::HashMap;

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement};

use crate::consts::*;
use crate::sim::{Character, GameState, ItemKind};

/// Enemy bug sprite
const ENEMY_SPRITE: &str = "images/enemy-bug.png";

/// Background tile for each of the six rows: water on top, three stone
/// lanes, two grass rows at the bottom
const ROW_SPRITES: [&str; NUM_ROWS as usize] = [
    "images/water-block.png",
    "images/stone-block.png",
    "images/stone-block.png",
    "images/stone-block.png",
    "images/grass-block.png",
    "images/grass-block.png",
];

/// Items render at a fixed size, smaller than a tile
const ITEM_WIDTH: f64 = 75.0;
const ITEM_HEIGHT: f64 = 128.0;

/// Preloaded sprite images, keyed by path.
///
/// Images are created up front so the browser fetches and caches them once;
/// a frame drawn before an image has decoded simply skips it.
struct Sprites {
    images: HashMap<&'static str, HtmlImageElement>,
}

impl Sprites {
    fn load() -> Result<Self, JsValue> {
        let mut paths: Vec<&'static str> = vec![ENEMY_SPRITE];
        paths.extend(ROW_SPRITES);
        paths.extend([
            Character::Boy,
            Character::CatGirl,
            Character::HornGirl,
            Character::PinkGirl,
            Character::PrincessGirl,
        ]
        .iter()
        .map(|c| c.sprite()));
        paths.extend(ItemKind::ALL.iter().map(|k| k.sprite()));

        let mut images = HashMap::new();
        for path in paths {
            let image = HtmlImageElement::new()?;
            image.set_src(path);
            images.insert(path, image);
        }
        log::info!("Preloading {} sprites", images.len());
        Ok(Self { images })
    }

    fn get(&self, path: &str) -> Option<&HtmlImageElement> {
        self.images.get(path)
    }
}

/// Draws the board and entities onto a 2D canvas context
pub struct Renderer {
    ctx: CanvasRenderingContext2d,
    sprites: Sprites,
}

impl Renderer {
    pub fn new(canvas: &HtmlCanvasElement) -> Result<Self, JsValue> {
        canvas.set_width(CANVAS_WIDTH as u32);
        canvas.set_height(CANVAS_HEIGHT as u32);

        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("no 2d context"))?
            .dyn_into::<CanvasRenderingContext2d>()?;

        Ok(Self {
            ctx,
            sprites: Sprites::load()?,
        })
    }

    /// Redraw the whole frame
    pub fn render(&self, state: &GameState) {
        self.ctx.clear_rect(
            0.0,
            0.0,
            CANVAS_WIDTH as f64,
            CANVAS_HEIGHT as f64,
        );

        self.draw_board();
        self.draw_entities(state);
    }

    fn draw_board(&self) {
        for (row, path) in ROW_SPRITES.iter().enumerate() {
            for col in 0..NUM_COLS {
                let tile = crate::tile_to_px(col, row as u32);
                self.draw_sprite(path, tile.x as f64, tile.y as f64);
            }
        }
    }

    fn draw_entities(&self, state: &GameState) {
        for enemy in &state.enemies {
            self.draw_sprite(ENEMY_SPRITE, enemy.pos.x as f64, enemy.pos.y as f64);
        }

        for item in &state.items {
            if let Some(image) = self.sprites.get(item.kind.sprite()) {
                let _ = self
                    .ctx
                    .draw_image_with_html_image_element_and_dw_and_dh(
                        image,
                        item.pos.x as f64,
                        item.pos.y as f64,
                        ITEM_WIDTH,
                        ITEM_HEIGHT,
                    );
            }
        }

        self.draw_sprite(
            state.player.character.sprite(),
            state.player.pos.x as f64,
            state.player.pos.y as f64,
        );
    }

    fn draw_sprite(&self, path: &str, x: f64, y: f64) {
        if let Some(image) = self.sprites.get(path) {
            let _ = self.ctx.draw_image_with_html_image_element(image, x, y);
        }
    }
}
