//! Bullseye Range entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, Element, HtmlCanvasElement, MouseEvent};

    use bullseye_range::consts::*;
    use bullseye_range::feedback::Feedback;
    use bullseye_range::platform::canvas_size;
    use bullseye_range::renderer::{RenderState, build_scene};
    use bullseye_range::settings::Toggle;
    use bullseye_range::sim::{Field, GameEvent, GameState, TickInput, tick};
    use bullseye_range::ui::HudView;
    use bullseye_range::{BestScore, Settings};

    /// Game instance holding all state
    struct Game {
        state: GameState,
        render_state: Option<RenderState>,
        accumulator: f32,
        last_time: f64,
        input: TickInput,
        settings: Settings,
        best: BestScore,
        feedback: Feedback,
        document: Document,
        // Last HUD written to the DOM
        last_hud: Option<HudView>,
    }

    impl Game {
        fn new(document: Document, size: u32) -> Self {
            let best = BestScore::load();
            let field = Field::new(size as f32, size as f32);
            Self {
                state: GameState::new(field, best.value),
                render_state: None,
                accumulator: 0.0,
                last_time: 0.0,
                input: TickInput::default(),
                settings: Settings::load(),
                best,
                feedback: Feedback::new(),
                document,
                last_hud: None,
            }
        }

        /// Run simulation ticks
        fn update(&mut self, dt: f32) {
            let dt = dt.min(0.1);
            self.accumulator += dt;

            let mut substeps = 0;
            while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
                let input = std::mem::take(&mut self.input);
                let events = tick(&mut self.state, &input);
                self.accumulator -= SIM_DT;
                substeps += 1;

                for event in &events {
                    self.handle_event(event);
                }
            }
        }

        fn handle_event(&mut self, event: &GameEvent) {
            self.feedback.on_event(event, &self.settings);

            match *event {
                GameEvent::SessionStarted => {
                    self.best = BestScore::load();
                    self.state.best_score = self.best.value;
                    log::info!("Session started (best {})", self.best.value);
                }
                GameEvent::GameOver { score, .. } => {
                    if self.best.record(score) {
                        self.best.save();
                    }
                }
                _ => {}
            }
        }

        /// Render the current frame
        fn render(&mut self) {
            let Some(render_state) = self.render_state.as_mut() else {
                return;
            };
            let vertices = build_scene(&self.state, &self.settings);
            match render_state.render(&vertices, &self.state.field) {
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

        /// Copy the HUD projection into the DOM when it changed
        fn update_hud(&mut self) {
            let hud = HudView::from_state(&self.state);
            if self.last_hud.as_ref() == Some(&hud) {
                return;
            }
            let doc = &self.document;

            set_text(doc, "score", &hud.score);
            set_text(doc, "round", &hud.round);
            set_text(doc, "misses", &hud.misses);
            set_text(doc, "maxMisses", &hud.max_misses);

            if let Some(el) = doc.get_element_by_id("resultText") {
                match &hud.result {
                    Some(result) => {
                        el.set_text_content(Some(&result.text));
                        let _ = el.set_attribute("style", &format!("color: {}", result.color));
                        let _ = el.class_list().add_1("show");
                    }
                    None => {
                        let _ = el.class_list().remove_1("show");
                    }
                }
            }

            set_text(doc, "buttonText", hud.button_label);
            if let Some(btn) = doc.get_element_by_id("shootButton") {
                if hud.button_enabled {
                    let _ = btn.remove_attribute("disabled");
                } else {
                    let _ = btn.set_attribute("disabled", "");
                }
            }

            set_hidden(doc, "startScreen", !hud.show_start_screen);
            set_hidden(doc, "gameOverScreen", hud.summary.is_none());
            if let Some(summary) = hud.summary {
                set_text(doc, "finalScore", &summary.score.to_string());
                set_text(doc, "finalRound", &summary.round.to_string());
                set_text(doc, "bestScore", &summary.best.to_string());
            }

            self.last_hud = Some(hud);
        }

        fn toggle(&mut self, which: Toggle) {
            let on = self.settings.toggle(which);
            self.settings.save();
            log::info!("{}: {}", which.as_str(), if on { "on" } else { "off" });
        }

        /// Follow a window resize. Only the surface changes; the range keeps its layout.
        fn resize(&mut self, size: u32) {
            if let Some(render_state) = self.render_state.as_mut() {
                render_state.resize(size, size);
            }
            self.state.set_field(size as f32, size as f32);
        }
    }

    fn set_text(doc: &Document, id: &str, text: &str) {
        if let Some(el) = doc.get_element_by_id(id) {
            el.set_text_content(Some(text));
        }
    }

    fn set_hidden(doc: &Document, id: &str, hidden: bool) {
        if let Some(el) = doc.get_element_by_id(id) {
            let _ = el.class_list().toggle_with_force("hidden", hidden);
        }
    }

    fn window_canvas_size(window: &web_sys::Window) -> u32 {
        let w = window
            .inner_width()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(MAX_CANVAS_WIDTH);
        let h = window
            .inner_height()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(MAX_CANVAS_HEIGHT / CANVAS_HEIGHT_FRACTION);
        canvas_size(w, h)
    }

    pub async fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        if console_log::init_with_level(log::Level::Info).is_err() {
            web_sys::console::warn_1(&"Logger already initialized".into());
        }

        log::info!("Bullseye Range starting...");

        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("no document"))?;

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("gameCanvas")
            .ok_or_else(|| JsValue::from_str("no canvas"))?
            .dyn_into()?;

        let size = window_canvas_size(&window);
        canvas.set_width(size);
        canvas.set_height(size);

        let game = Rc::new(RefCell::new(Game::new(document.clone(), size)));
        log::info!("Range initialized at {}x{}", size, size);

        // Initialize WebGPU (WebGL2 fallback)
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .map_err(|e| JsValue::from_str(&format!("Failed to create surface: {e}")))?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::LowPower,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(|e| JsValue::from_str(&format!("Failed to get adapter: {e}")))?;

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let render_state = RenderState::new(surface, &adapter, size, size)
            .await
            .map_err(|e| JsValue::from_str(&format!("Failed to create device: {e}")))?;
        game.borrow_mut().render_state = Some(render_state);

        setup_input_handlers(&document, &canvas, game.clone());
        setup_resize_handler(&canvas, game.clone());

        request_animation_frame(game);

        log::info!("Bullseye Range running!");
        Ok(())
    }

    /// Attach a click listener to an element that sets one input flag
    fn on_click(element: &Element, game: Rc<RefCell<Game>>, set: fn(&mut TickInput)) {
        let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
            event.prevent_default();
            set(&mut game.borrow_mut().input);
        });
        let _ = element.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_input_handlers(document: &Document, canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        // Shoot: dedicated button and any click/tap on the range
        if let Some(btn) = document.get_element_by_id("shootButton") {
            on_click(&btn, game.clone(), |input| input.shoot = true);
        }
        on_click(canvas, game.clone(), |input| input.shoot = true);

        if let Some(btn) = document.get_element_by_id("startButton") {
            on_click(&btn, game.clone(), |input| input.start = true);
        }
        if let Some(btn) = document.get_element_by_id("restartButton") {
            on_click(&btn, game.clone(), |input| input.restart = true);
        }

        // Keyboard
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
                let key = event.key();
                let mut g = game.borrow_mut();
                match key.as_str() {
                    " " | "Enter" => {
                        event.prevent_default();
                        g.input.shoot = true;
                    }
                    other => {
                        if let Some(which) = Toggle::from_key(other) {
                            g.toggle(which);
                        }
                    }
                }
            });
            let _ = document
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_resize_handler(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let canvas = canvas.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let Some(window) = web_sys::window() else {
                return;
            };
            let size = window_canvas_size(&window);
            canvas.set_width(size);
            canvas.set_height(size);
            game.borrow_mut().resize(size);
            log::debug!("Resized to {}x{}", size, size);
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
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

            g.update(dt);
            g.render();
            g.update_hud();
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    if let Err(e) = wasm_game::run().await {
        log::error!("Bullseye Range failed to start: {:?}", e);
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Bullseye Range (native) starting...");
    log::info!("The range renders in the browser - run with `trunk serve` for the web version");

    println!("\nRunning a headless session...");
    headless_session();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Play a session that releases the moment shooting is allowed, and report it
#[cfg(not(target_arch = "wasm32"))]
fn headless_session() {
    use bullseye_range::BestScore;
    use bullseye_range::consts::{MAX_MISSES, TICKS_PER_SECOND};
    use bullseye_range::sim::{Field, GameEvent, GamePhase, GameState, TickInput, tick};

    let mut best = BestScore::load();
    let mut state = GameState::new(Field::new(600.0, 600.0), best.value);
    let max_ticks = 10 * 60 * TICKS_PER_SECOND;

    let mut input = TickInput {
        start: true,
        ..Default::default()
    };
    while state.phase != GamePhase::GameOver && state.time_ticks < max_ticks {
        let round = state.round;
        for event in tick(&mut state, &input) {
            match event {
                GameEvent::TargetHit { ring, points, .. } => {
                    println!("  round {:>2}: {:<11} +{}", round, ring.label(), points)
                }
                GameEvent::Missed { misses, .. } => {
                    println!("  round {:>2}: miss ({}/{})", round, misses, MAX_MISSES)
                }
                GameEvent::GameOver { score, .. } => {
                    best.record(score);
                }
                _ => {}
            }
        }
        input = TickInput {
            shoot: state.can_shoot(),
            ..Default::default()
        };
    }

    println!(
        "✓ Session finished: score {} over {} rounds, best {}",
        state.score, state.round, best.value
    );
}
