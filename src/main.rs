//! Late Runner entry point
//!
//! Handles platform-specific initialization and runs the frame loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement, KeyboardEvent, TouchEvent};

    use late_runner::audio::WebAudio;
    use late_runner::driver::FrameTicket;
    use late_runner::sim::FrameView;
    use late_runner::{FrameControl, FrameDriver, RenderSink, RunConfig, SinkError};

    type Game = Rc<RefCell<FrameDriver>>;

    /// Draws the field onto a 2D canvas
    struct CanvasRenderer {
        ctx: CanvasRenderingContext2d,
    }

    impl RenderSink for CanvasRenderer {
        fn draw(&mut self, frame: &FrameView<'_>) -> Result<(), SinkError> {
            let ctx = &self.ctx;
            let w = frame.field_size.x as f64;
            let h = frame.field_size.y as f64;
            let ground = frame.ground_y as f64;

            ctx.clear_rect(0.0, 0.0, w, h);

            // Background
            ctx.set_fill_style_str("#006400");
            ctx.fill_rect(0.0, 0.0, w, h);

            // Ground strip
            ctx.set_fill_style_str("#3b2f1e");
            ctx.fill_rect(0.0, ground, w, h - ground);

            // Player
            let p = frame.player;
            ctx.set_fill_style_str("#ffd700");
            ctx.fill_rect(p.pos.x as f64, p.pos.y as f64, p.size.x as f64, p.size.y as f64);

            // Obstacles
            ctx.set_fill_style_str("#ffffff");
            for o in frame.obstacles {
                ctx.fill_rect(o.pos.x as f64, o.pos.y as f64, o.size.x as f64, o.size.y as f64);
            }
            Ok(())
        }
    }

    /// Keeps the distance readout in the DOM current
    struct HudRenderer {
        document: Document,
        shown: Option<u64>,
    }

    impl RenderSink for HudRenderer {
        fn draw(&mut self, frame: &FrameView<'_>) -> Result<(), SinkError> {
            let distance = frame.score.floor() as u64;
            if self.shown == Some(distance) {
                return Ok(());
            }
            let el = self
                .document
                .get_element_by_id("score")
                .ok_or(SinkError::Unavailable)?;
            el.set_text_content(Some(&distance.to_string()));
            self.shown = Some(distance);
            Ok(())
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Late Runner starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        let config = RunConfig::default();
        canvas.set_width(config.field_width as u32);
        canvas.set_height(config.field_height as u32);

        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")
            .ok()
            .flatten()
            .expect("no 2d context")
            .dyn_into()
            .expect("not a 2d context");

        let mut driver = FrameDriver::new(config).expect("default config is valid");
        driver.add_render_sink(Box::new(CanvasRenderer { ctx }));
        driver.add_render_sink(Box::new(HudRenderer {
            document: document.clone(),
            shown: None,
        }));
        let audio = Rc::new(RefCell::new(WebAudio::new()));
        driver.add_audio_sink(Box::new(audio.clone()));
        driver.set_game_over_callback(show_game_over);

        let game: Game = Rc::new(RefCell::new(driver));

        setup_input_handlers(&canvas, game.clone(), audio);
        setup_start_button(game.clone());
        setup_restart_button(game);

        log::info!("Late Runner ready - waiting for start");
    }

    /// Game over overlay with the final distance
    fn show_game_over(score: u64) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };
        if let Some(el) = document.get_element_by_id("final-score") {
            el.set_text_content(Some(&score.to_string()));
        }
        if let Some(el) = document.get_element_by_id("game-over") {
            let _ = el.set_attribute("class", "");
        }
    }

    fn hide_game_over() {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };
        if let Some(el) = document.get_element_by_id("game-over") {
            let _ = el.set_attribute("class", "hidden");
        }
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, game: Game, audio: Rc<RefCell<WebAudio>>) {
        let window = web_sys::window().unwrap();

        // Touch anywhere on the canvas
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                game.borrow_mut().jump();
            });
            let _ = canvas
                .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Keyboard
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                match event.code().as_str() {
                    "Space" | "ArrowUp" => {
                        event.prevent_default();
                        g.jump();
                    }
                    "KeyI" => {
                        let enabled = !g.autopilot();
                        g.set_autopilot(enabled);
                    }
                    "KeyM" => {
                        audio.borrow_mut().toggle_muted();
                    }
                    _ => {}
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    /// Nothing is scheduled until the first click, which also unlocks audio
    fn setup_start_button(game: Game) {
        let window = web_sys::window().unwrap();
        let document = window.document().unwrap();

        let Some(btn) = document.get_element_by_id("start-btn") else {
            log::warn!("No start button - starting immediately");
            let ticket = game.borrow().ticket();
            request_animation_frame(game, ticket);
            return;
        };
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
            // Fresh run: input pressed before the click must not carry over
            let ticket = game.borrow_mut().restart();
            if let Some(el) = web_sys::window()
                .and_then(|w| w.document())
                .and_then(|d| d.get_element_by_id("start-screen"))
            {
                let _ = el.set_attribute("class", "hidden");
            }
            request_animation_frame(game.clone(), ticket);
        });
        let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_restart_button(game: Game) {
        let window = web_sys::window().unwrap();
        let document = window.document().unwrap();

        if let Some(btn) = document.get_element_by_id("restart-btn") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                let ticket = game.borrow_mut().restart();
                hide_game_over();
                request_animation_frame(game.clone(), ticket);
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(game: Game, ticket: FrameTicket) {
        let window = web_sys::window().unwrap();
        let closure = Closure::once(move |time: f64| {
            game_loop(game, ticket, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Game, ticket: FrameTicket, time: f64) {
        let control = game.borrow_mut().frame(ticket, time);
        if control == FrameControl::Continue {
            request_animation_frame(game, ticket);
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> std::process::ExitCode {
    use late_runner::consts::NOMINAL_FRAME_MS;
    use late_runner::{FrameControl, FrameDriver, RunConfig};
    use std::process::ExitCode;

    env_logger::init();
    log::info!("Late Runner (native) starting...");
    log::info!("Native mode plays one headless autopilot run - use `trunk serve` for the web version");

    // Optional JSON config override as the first argument
    let config = match std::env::args().nth(1) {
        Some(path) => match std::fs::read_to_string(&path) {
            Ok(json) => match RunConfig::from_json(&json) {
                Ok(config) => config,
                Err(e) => {
                    log::error!("{}: {}", path, e);
                    return ExitCode::FAILURE;
                }
            },
            Err(e) => {
                log::error!("Failed to read {}: {}", path, e);
                return ExitCode::FAILURE;
            }
        },
        None => RunConfig::default(),
    };

    let seed = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or_default();
    let mut driver = match FrameDriver::with_seed(config, seed) {
        Ok(driver) => driver,
        Err(e) => {
            log::error!("Invalid config: {}", e);
            return ExitCode::FAILURE;
        }
    };
    driver.set_autopilot(true);
    log::info!("Seed: {}", seed);

    // Ten minutes of 60 Hz frames at most
    let ticket = driver.ticket();
    let mut now = 0.0;
    for _ in 0..36_000 {
        if driver.frame(ticket, now) == FrameControl::Stop {
            break;
        }
        now += NOMINAL_FRAME_MS as f64;
    }

    match driver.last_score() {
        Some(score) => println!("Game over - distance: {} m", score),
        None => {
            let distance = driver.run().map(|r| r.score().floor() as u64).unwrap_or(0);
            println!("Still running after ten minutes - distance: {} m", distance);
        }
    }
    ExitCode::SUCCESS
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
