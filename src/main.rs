//! Heart Hook entry point
//!
//! Browser: drives the catch engine from `requestAnimationFrame`.
//! Native: plays a seeded game on autopilot and logs the result.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::JsCast;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, KeyboardEvent, MouseEvent, TouchEvent};

    use heart_hook::config::EngineConfig;
    use heart_hook::platform::{
        self,
        web::{Listener, Timeout, element_rect, now_ms},
    };
    use heart_hook::renderer::{self, CanvasPainter};
    use heart_hook::session::SessionRecord;
    use heart_hook::sim::{CatchEngine, GameEvent, ItemKind, Playfield, TickInput};

    type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

    /// Game screen holding the engine and everything hooked into the page
    struct Game {
        engine: CatchEngine,
        painter: CanvasPainter,
        player_name: String,
        last_time: f64,
        /// Pending animation frame
        frame_id: Option<i32>,
        frame_callback: FrameCallback,
        listeners: Vec<Listener>,
        /// Hides the penalty toast when it expires
        toast_timer: Option<Timeout>,
        autopilot: bool,
        running: bool,
    }

    impl Game {
        /// One presented frame. Returns false once the loop should stop.
        fn frame(&mut self, time: f64) -> bool {
            if !self.running {
                return false;
            }

            let dt = if self.last_time > 0.0 {
                ((time - self.last_time) / 1000.0) as f32
            } else {
                1.0 / 60.0
            };
            self.last_time = time;

            if self.autopilot {
                self.engine.autopilot();
            }

            let now = now_ms();
            self.engine.tick(&TickInput::frame(now, dt));

            let mut final_score = None;
            for event in self.engine.drain_events() {
                match event {
                    GameEvent::Haptic(cue) => platform::vibrate(cue),
                    GameEvent::Caught {
                        kind: ItemKind::Penalty,
                        ..
                    } => self.schedule_toast_clear(now),
                    GameEvent::Finished { score } => final_score = Some(score),
                    _ => {}
                }
            }

            self.painter.paint(&renderer::frame(self.engine.state()));
            self.update_hud(now);

            if let Some(score) = final_score {
                self.finish(score);
                return false;
            }
            true
        }

        fn update_hud(&self, now: f64) {
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };

            if let Some(el) = document.get_element_by_id("hud-score") {
                el.set_text_content(Some(&self.engine.hud_text()));
            }

            if let Some(el) = document.get_element_by_id("toast") {
                match self.engine.warning(now) {
                    Some(text) => {
                        el.set_text_content(Some(text));
                        let _ = el.set_attribute("class", "");
                    }
                    None => {
                        let _ = el.set_attribute("class", "hidden");
                    }
                }
            }
        }

        /// Clear the toast on the wall clock, whether or not frames keep coming.
        /// Replacing the timer cancels the previous one.
        fn schedule_toast_clear(&mut self, now: f64) {
            let Some(expires_at) = self.engine.warning_expires_at() else {
                return;
            };
            self.toast_timer = Some(Timeout::new((expires_at - now).ceil() as i32, hide_toast));
        }

        fn finish(&mut self, score: u32) {
            log::info!("{} finished with {}", self.player_name, score);
            SessionRecord::new(&self.player_name, score).submit();

            if let Some(document) = web_sys::window().and_then(|w| w.document()) {
                if let Some(el) = document.get_element_by_id("final-score") {
                    el.set_text_content(Some(&score.to_string()));
                }
                if let Some(el) = document.get_element_by_id("end-screen") {
                    let _ = el.set_attribute("class", "");
                }
            }

            self.teardown();
        }

        /// Stop scheduling frames and detach every listener
        fn teardown(&mut self) {
            if !self.running {
                return;
            }
            self.running = false;

            if let Some(id) = self.frame_id.take() {
                if let Some(window) = web_sys::window() {
                    let _ = window.cancel_animation_frame(id);
                }
            }
            self.listeners.clear();
            self.toast_timer = None;
            hide_toast();
            // Break the callback <-> game cycle
            let _ = self.frame_callback.borrow_mut().take();
            log::info!("Game loop torn down");
        }
    }

    fn hide_toast() {
        if let Some(el) = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id("toast"))
        {
            let _ = el.set_attribute("class", "hidden");
        }
    }

    /// `?name=` from the page URL
    fn player_name() -> String {
        web_sys::window()
            .and_then(|w| w.location().search().ok())
            .and_then(|search| web_sys::UrlSearchParams::new_with_str(&search).ok())
            .and_then(|params| params.get("name"))
            .unwrap_or_default()
    }

    fn window_size() -> (u32, u32) {
        let Some(window) = web_sys::window() else {
            return (0, 0);
        };
        let w = window.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
        let h = window.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
        (w as u32, h as u32)
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Heart Hook starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        let Some(painter) = CanvasPainter::new(canvas.clone()) else {
            log::error!("Canvas 2D context unavailable");
            return;
        };
        let (width, height) = window_size();
        painter.resize(width, height);

        let config = EngineConfig::load();
        let seed = js_sys::Date::now() as u64;
        let engine = match CatchEngine::seeded(
            config,
            Playfield::new(width as f32, height as f32),
            seed,
        ) {
            Ok(engine) => engine,
            Err(e) => {
                log::warn!("Config rejected ({}), using defaults", e);
                CatchEngine::seeded(
                    EngineConfig::default(),
                    Playfield::new(width as f32, height as f32),
                    seed,
                )
                .expect("default config is valid")
            }
        };

        let frame_callback: FrameCallback = Rc::new(RefCell::new(None));
        let game = Rc::new(RefCell::new(Game {
            engine,
            painter,
            player_name: player_name(),
            last_time: 0.0,
            frame_id: None,
            frame_callback: frame_callback.clone(),
            listeners: Vec::new(),
            toast_timer: None,
            autopilot: false,
            running: true,
        }));

        let listeners = setup_input_handlers(&canvas, &game);
        game.borrow_mut().listeners = listeners;

        start_loop(game, frame_callback);

        log::info!("Heart Hook running (seed {})", seed);
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, game: &Rc<RefCell<Game>>) -> Vec<Listener> {
        let window = web_sys::window().expect("no window");
        let mut listeners = Vec::new();

        // Mouse move
        {
            let game = game.clone();
            let canvas = canvas.clone();
            listeners.push(Listener::new(&window, "mousemove", move |event| {
                let Some(event) = event.dyn_ref::<MouseEvent>() else {
                    return;
                };
                let rect = element_rect(&canvas);
                game.borrow_mut()
                    .engine
                    .pointer_moved(event.client_x() as f32, Some(rect));
            }));
        }

        // Touch move (first finger), non-passive so the page doesn't scroll
        {
            let game = game.clone();
            let canvas = canvas.clone();
            listeners.push(Listener::active(&window, "touchmove", move |event| {
                let Some(event) = event.dyn_ref::<TouchEvent>() else {
                    return;
                };
                event.prevent_default();
                if let Some(touch) = event.touches().get(0) {
                    let rect = element_rect(&canvas);
                    game.borrow_mut()
                        .engine
                        .pointer_moved(touch.client_x() as f32, Some(rect));
                }
            }));
        }

        // Resize
        {
            let game = game.clone();
            listeners.push(Listener::new(&window, "resize", move |_event| {
                let (w, h) = window_size();
                let mut g = game.borrow_mut();
                g.painter.resize(w, h);
                g.engine.resize(Playfield::new(w as f32, h as f32));
            }));
        }

        // Keyboard: toggle demo mode
        {
            let game = game.clone();
            listeners.push(Listener::new(&window, "keydown", move |event| {
                let Some(event) = event.dyn_ref::<KeyboardEvent>() else {
                    return;
                };
                if matches!(event.key().as_str(), "i" | "I") {
                    let mut g = game.borrow_mut();
                    g.autopilot = !g.autopilot;
                    log::info!("Autopilot: {}", g.autopilot);
                }
            }));
        }

        // Navigation away
        {
            let game = game.clone();
            listeners.push(Listener::new(&window, "pagehide", move |_event| {
                game.borrow_mut().teardown();
            }));
        }

        listeners
    }

    fn request_animation_frame(callback: &FrameCallback) -> Option<i32> {
        let window = web_sys::window()?;
        let callback = callback.borrow();
        let closure = callback.as_ref()?;
        window
            .request_animation_frame(closure.as_ref().unchecked_ref())
            .ok()
    }

    fn start_loop(game: Rc<RefCell<Game>>, frame_callback: FrameCallback) {
        let next = frame_callback.clone();
        let looped = game.clone();
        *frame_callback.borrow_mut() = Some(Closure::new(move |time: f64| {
            let keep_going = looped.borrow_mut().frame(time);
            if keep_going {
                let id = request_animation_frame(&next);
                looped.borrow_mut().frame_id = id;
            } else {
                looped.borrow_mut().teardown();
            }
        }));

        let id = request_animation_frame(&frame_callback);
        game.borrow_mut().frame_id = id;
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> std::process::ExitCode {
    use heart_hook::config::EngineConfig;
    use heart_hook::platform;
    use heart_hook::session::SessionRecord;
    use heart_hook::sim::{CatchEngine, GameEvent, Playfield, TickInput};
    use std::process::ExitCode;

    env_logger::init();
    log::info!("Heart Hook (native) starting...");
    log::info!("Native mode runs a headless autopilot game - run with `trunk serve` for web version");

    // heart-hook [config.json] [player name]
    let mut args = std::env::args().skip(1);
    let config = match args.next() {
        Some(path) => {
            let loaded = std::fs::read_to_string(&path)
                .map_err(|e| e.to_string())
                .and_then(|json| EngineConfig::from_json(&json).map_err(|e| e.to_string()));
            match loaded {
                Ok(config) => config,
                Err(e) => {
                    log::error!("Could not load config {}: {}", path, e);
                    return ExitCode::FAILURE;
                }
            }
        }
        None => EngineConfig::default(),
    };
    let player = args.next().unwrap_or_default();

    let seed = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);

    let mut engine = match CatchEngine::seeded(config, Playfield::new(480.0, 800.0), seed) {
        Ok(engine) => engine,
        Err(e) => {
            log::error!("Invalid config: {}", e);
            return ExitCode::FAILURE;
        }
    };

    // Ten minutes at 60 Hz
    const MAX_FRAMES: u64 = 60 * 60 * 10;
    const FRAME_MS: f64 = 1000.0 / 60.0;

    for frame in 0..MAX_FRAMES {
        engine.autopilot();
        engine.tick(&TickInput::frame(frame as f64 * FRAME_MS, 1.0 / 60.0));

        for event in engine.drain_events() {
            match event {
                GameEvent::Haptic(cue) => platform::vibrate(cue),
                GameEvent::Caught { .. } => log::debug!("{}", engine.hud_text()),
                GameEvent::Finished { score } => {
                    log::info!("Finished after {} frames (seed {})", frame + 1, seed);
                    SessionRecord::new(&player, score).submit();
                    println!("Final score: {}", score);
                    return ExitCode::SUCCESS;
                }
                _ => {}
            }
        }
    }

    log::warn!("Gave up after {} frames at {}", MAX_FRAMES, engine.hud_text());
    ExitCode::FAILURE
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
