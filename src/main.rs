//! Bubble Bow entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlButtonElement, HtmlCanvasElement, MouseEvent};

    use bubble_bow::Settings;
    use bubble_bow::consts::*;
    use bubble_bow::renderer::{RenderState, build_scene};
    use bubble_bow::sim::{GamePhase, GameState, TickInput, tick};
    use glam::Vec2;

    /// Game instance holding all state
    struct Game {
        state: GameState,
        render_state: Option<RenderState>,
        input: TickInput,
        settings: Settings,
        /// CSS size of the canvas, for pointer-to-field mapping
        view_size: (f32, f32),
        // FPS tracking
        frame_times: [f64; 60],
        frame_index: usize,
        fps: u32,
    }

    impl Game {
        fn new(seed: u64) -> Self {
            Self {
                state: GameState::new(seed),
                render_state: None,
                input: TickInput::default(),
                settings: Settings::load(),
                view_size: (FIELD_WIDTH, FIELD_HEIGHT),
                frame_times: [0.0; 60],
                frame_index: 0,
                fps: 0,
            }
        }

        /// Map a pointer position in CSS pixels to field coordinates
        fn pointer_to_field(&self, x: f32, y: f32) -> Vec2 {
            let (w, h) = self.view_size;
            Vec2::new(x * FIELD_WIDTH / w.max(1.0), y * FIELD_HEIGHT / h.max(1.0))
        }

        /// Run one simulation tick and update FPS tracking
        fn update(&mut self, time: f64) {
            let input = self.input.clone();
            tick(&mut self.state, &input);
            // Clear one-shot inputs after processing
            self.input.fire = 0;

            self.frame_times[self.frame_index] = time;
            self.frame_index = (self.frame_index + 1) % 60;

            let oldest_time = self.frame_times[self.frame_index];
            if oldest_time > 0.0 {
                let elapsed = time - oldest_time;
                if elapsed > 0.0 {
                    self.fps = (60000.0 / elapsed).round() as u32;
                }
            }
        }

        /// Render the current frame
        fn render(&mut self) {
            let vertices = build_scene(&self.state, &self.settings);
            if let Some(ref mut render_state) = self.render_state {
                match render_state.render(&vertices) {
                    Ok(_) => {}
                    Err(wgpu::SurfaceError::Lost) => {
                        render_state.resize(render_state.size.0, render_state.size.1);
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("Out of memory!");
                    }
                    Err(e) => log::warn!("Render error: {:?}", e),
                }
            }
        }

        /// Update HUD text and overlay visibility in the DOM
        fn update_hud(&self) {
            let window = web_sys::window().unwrap();
            let document = window.document().unwrap();

            if let Some(el) = document.get_element_by_id("hud-score") {
                el.set_text_content(Some(&format!("Score: {}", self.state.score)));
            }
            if let Some(el) = document.get_element_by_id("hud-arrows") {
                el.set_text_content(Some(&format!("Arrows: {}", self.state.arrows_left)));
            }
            if let Some(el) = document.get_element_by_id("hud-fps") {
                if self.settings.show_fps {
                    let _ = el.set_attribute("class", "hud-item");
                    el.set_text_content(Some(&format!("{} fps", self.fps)));
                } else {
                    let _ = el.set_attribute("class", "hud-item hidden");
                }
            }

            set_overlay(&document, "main-menu", self.state.phase == GamePhase::MainMenu);
            set_overlay(
                &document,
                "level-complete",
                self.state.phase == GamePhase::LevelComplete,
            );
            set_overlay(&document, "game-over", self.state.phase == GamePhase::GameOver);

            match self.state.phase {
                GamePhase::MainMenu => self.update_level_buttons(&document),
                GamePhase::LevelComplete => {
                    if let Some(el) = document.get_element_by_id("level-score") {
                        el.set_text_content(Some(&self.state.score.to_string()));
                    }
                }
                GamePhase::GameOver => {
                    if let Some(el) = document.get_element_by_id("final-score") {
                        el.set_text_content(Some(&self.state.score.to_string()));
                    }
                }
                GamePhase::Playing => {}
            }
        }

        /// Reflect unlock flags on the level select buttons
        fn update_level_buttons(&self, document: &web_sys::Document) {
            for level in 2..=MAX_LEVEL {
                let id = format!("level{}-btn", level);
                if let Some(el) = document.get_element_by_id(&id) {
                    let unlocked = self.state.levels.is_unlocked(level);
                    let _ = el.set_attribute(
                        "class",
                        if unlocked { "level-btn" } else { "level-btn locked" },
                    );
                    if let Some(btn) = el.dyn_ref::<HtmlButtonElement>() {
                        btn.set_disabled(!unlocked);
                    }
                }
            }
        }
    }

    /// Show or hide an overlay element
    fn set_overlay(document: &web_sys::Document, id: &str, visible: bool) {
        if let Some(el) = document.get_element_by_id(id) {
            let _ = el.set_attribute("class", if visible { "overlay" } else { "overlay hidden" });
        }
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Bubble Bow starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        // Physical size follows device pixel ratio; field coords stay 800x600
        let dpr = window.device_pixel_ratio();
        let client_w = canvas.client_width();
        let client_h = canvas.client_height();
        let width = (client_w as f64 * dpr) as u32;
        let height = (client_h as f64 * dpr) as u32;
        canvas.set_width(width);
        canvas.set_height(height);

        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(seed)));
        game.borrow_mut().view_size = (client_w as f32, client_h as f32);

        log::info!("Game initialized with seed: {}", seed);

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .expect("Failed to create surface");

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .expect("Failed to get adapter");

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let render_state = RenderState::new(surface, &adapter, width, height).await;
        game.borrow_mut().render_state = Some(render_state);

        setup_input_handlers(&canvas, game.clone());
        setup_menu_buttons(game.clone());

        request_animation_frame(game);

        log::info!("Bubble Bow running!");
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        // Pointer move drives the bow aim
        {
            let game = game.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let mut g = game.borrow_mut();
                let w = canvas_clone.client_width() as f32;
                let h = canvas_clone.client_height() as f32;
                g.view_size = (w, h);
                let pos = g.pointer_to_field(event.offset_x() as f32, event.offset_y() as f32);
                g.input.aim = Some(pos);
            });
            let _ = canvas
                .add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Click fires one arrow; every click between frames counts
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                game.borrow_mut().input.fire += 1;
            });
            let _ = canvas
                .add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Keyboard: settings toggles
        {
            let game = game.clone();
            let window = web_sys::window().unwrap();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
                let mut g = game.borrow_mut();
                match event.key().as_str() {
                    "f" | "F" => {
                        g.settings.show_fps = !g.settings.show_fps;
                        g.settings.save();
                    }
                    "g" | "G" => {
                        g.settings.show_aim_guide = !g.settings.show_aim_guide;
                        g.settings.save();
                    }
                    _ => {}
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_menu_buttons(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let document = window.document().unwrap();

        // Level select
        for level in 1..=MAX_LEVEL {
            let id = format!("level{}-btn", level);
            if let Some(btn) = document.get_element_by_id(&id) {
                let game = game.clone();
                let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                    game.borrow_mut().state.start_level(level);
                });
                let _ =
                    btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
                closure.forget();
            }
        }

        // Next level (level complete overlay)
        if let Some(btn) = document.get_element_by_id("next-level-btn") {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                game.borrow_mut().state.advance_level();
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Restart (game over overlay)
        if let Some(btn) = document.get_element_by_id("restart-btn") {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                game.borrow_mut().state.restart_level();
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Return to menu, one button per terminal overlay
        for id in ["complete-menu-btn", "game-over-menu-btn"] {
            if let Some(btn) = document.get_element_by_id(id) {
                let game = game.clone();
                let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                    game.borrow_mut().state.return_to_menu();
                });
                let _ =
                    btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
                closure.forget();
            }
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
            g.update(time);
            g.render();
            g.update_hud();
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_game::run().await;
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Bubble Bow (native) starting...");
    log::info!("The game targets the browser - run with `trunk serve` for the web version");

    headless_smoke();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Quick headless run: shoot down every bubble of level 1
#[cfg(not(target_arch = "wasm32"))]
fn headless_smoke() {
    use bubble_bow::sim::{GamePhase, GameState, TickInput, tick};

    let mut state = GameState::new(42);
    state.start_level(1);

    let mut ticks = 0u32;
    while state.phase == GamePhase::Playing && ticks < 10_000 {
        let aim = state.bubbles.first().map(|b| b.pos);
        let input = TickInput {
            aim,
            fire: u32::from(ticks % 20 == 0),
        };
        tick(&mut state, &input);
        ticks += 1;
    }

    println!(
        "Headless run finished after {} ticks: {:?}, score {}",
        ticks, state.phase, state.score
    );
}
