//! Garbage Catch entry point
//!
//! Handles platform-specific initialization and runs the frame loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, KeyboardEvent, MouseEvent, TouchEvent};

    use garbage_catch::Settings;
    use garbage_catch::persistence::LocalStorage;
    use garbage_catch::platform::Surface;
    use garbage_catch::platform::web::{CanvasSurface, DomHud};
    use garbage_catch::sim::{Collaborators, FrameInput, Scheduler};

    /// Game instance holding all state
    struct Game {
        scheduler: Scheduler,
        settings: Settings,
        store: LocalStorage,
        surface: Option<CanvasSurface>,
        hud: DomHud,
        input: FrameInput,
    }

    impl Game {
        fn frame(&mut self, time: f64) {
            let mut host = Collaborators {
                store: &mut self.store,
                surface: self.surface.as_mut().map(|s| s as &mut dyn Surface),
                hud: Some(&mut self.hud),
            };
            let report = self.scheduler.frame(time, &self.input, &mut host);
            if report.game_over {
                log::info!("Run over, high score {}", self.scheduler.session.highscore);
            }
        }

        /// Switch to the next background and remember it
        fn cycle_background(&mut self) {
            self.settings.background = self.settings.background.next();
            self.scheduler.session.background = self.settings.background;
            self.settings.save(&mut self.store);
        }

        /// Tap/click/key: start a run if one isn't going
        fn start(&mut self) {
            if self.scheduler.start() {
                self.input.target_x = None;
            }
        }
    }

    /// Match the canvas to the window and tell the simulation
    fn resize_canvas(canvas: &HtmlCanvasElement, game: &Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let w = window.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
        let h = window.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
        canvas.set_width(w as u32);
        canvas.set_height(h as u32);
        game.borrow_mut()
            .scheduler
            .resize(glam::Vec2::new(w as f32, h as f32));
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Garbage Catch starting...");

        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            log::error!("No document, nothing to mount");
            return;
        };
        let Some(canvas) = document
            .create_element("canvas")
            .ok()
            .and_then(|el| el.dyn_into::<HtmlCanvasElement>().ok())
        else {
            log::error!("Could not create canvas");
            return;
        };
        canvas.set_id("canvas");

        let store = LocalStorage::open();
        let settings = Settings::load(&store);
        let seed = js_sys::Date::now() as u64;
        let scheduler = Scheduler::new(&store, &settings, garbage_catch::default_playfield(), seed);
        log::info!("Game initialized with seed: {}", seed);

        let game = Rc::new(RefCell::new(Game {
            scheduler,
            settings,
            store,
            surface: CanvasSurface::new(&canvas),
            hud: DomHud::new(&canvas),
            input: FrameInput::default(),
        }));

        resize_canvas(&canvas, &game);
        setup_resize_handlers(&canvas, game.clone());
        setup_input_handlers(&canvas, game.clone());

        request_animation_frame(game);
        log::info!("Garbage Catch running!");
    }

    fn setup_resize_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        for event in ["resize", "orientationchange"] {
            let game = game.clone();
            let canvas = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                resize_canvas(&canvas, &game);
            });
            let _ = window.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        // Mouse move - steer toward the pointer
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                game.borrow_mut().input.target_x = Some(event.offset_x() as f32);
            });
            let _ = canvas
                .add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Mouse click - start
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                game.borrow_mut().start();
            });
            let _ = canvas
                .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch start/move - start and steer toward the finger
        for (name, starts) in [("touchstart", true), ("touchmove", false)] {
            let game = game.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                let mut g = game.borrow_mut();
                if starts {
                    g.start();
                }
                if let Some(touch) = event.touches().get(0) {
                    let rect = canvas_clone.get_bounding_client_rect();
                    g.input.target_x = Some(touch.client_x() as f32 - rect.left() as f32);
                }
            });
            let _ = canvas.add_event_listener_with_callback(name, closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Keyboard
        {
            let Some(window) = web_sys::window() else {
                return;
            };
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                match event.key().as_str() {
                    " " | "Enter" => g.start(),
                    "Escape" => g.scheduler.return_to_menu(),
                    "b" | "B" => g.cycle_background(),
                    "a" | "A" => {
                        g.input.autopilot = !g.input.autopilot;
                        log::info!("Autopilot: {}", g.input.autopilot);
                    }
                    _ => {}
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
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
        game.borrow_mut().frame(time);
        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

/// Headless demo: autopilot plays a few simulated minutes at 60 Hz
#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use garbage_catch::persistence::MemoryStore;
    use garbage_catch::{DifficultyPreset, Settings};
    use garbage_catch::platform::headless::{HeadlessHud, HeadlessSurface};
    use garbage_catch::sim::{Collaborators, FrameInput, Scheduler};

    const FRAMES: u32 = 60 * 180;
    const FRAME_MS: f64 = 1000.0 / 60.0;

    env_logger::init();
    log::info!("Garbage Catch (native) starting...");
    log::info!("Native mode runs headless - run with `trunk serve` for the web version");

    let mut store = MemoryStore::new();
    let mut settings = Settings::load(&store);
    if let Some(preset) = std::env::var("GARBAGE_CATCH_DIFFICULTY")
        .ok()
        .and_then(|s| DifficultyPreset::from_str(&s))
    {
        settings.difficulty = preset;
    }
    log::info!("Difficulty: {}", settings.difficulty.as_str());
    let mut scheduler = Scheduler::new(&store, &settings, garbage_catch::default_playfield(), 2024);
    let mut surface = HeadlessSurface::new();
    let mut hud = HeadlessHud::new();
    let input = FrameInput {
        target_x: None,
        autopilot: true,
    };

    let mut runs = 0u32;
    for frame in 0..FRAMES {
        if !scheduler.session.is_running() {
            scheduler.start();
            runs += 1;
        }
        let mut host = Collaborators {
            store: &mut store,
            surface: Some(&mut surface),
            hud: Some(&mut hud),
        };
        let report = scheduler.frame(frame as f64 * FRAME_MS, &input, &mut host);
        if report.lost_life {
            log::debug!("Life lost at frame {}", frame);
        }
    }

    log::info!(
        "Simulated {} frames over {} runs: score {}, high score {}",
        FRAMES,
        runs,
        scheduler.session.score,
        scheduler.session.highscore
    );
    println!("{} {}", hud.score_text, hud.highscore_text);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
