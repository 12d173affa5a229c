//! Law on Tap entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, Element, HtmlCanvasElement, MouseEvent, TouchEvent};

    use glam::Vec2;
    use law_on_tap::audio::AudioManager;
    use law_on_tap::renderer::{CanvasRenderer, DomRenderer, OffsetTable, TapRenderer, render_frame};
    use law_on_tap::sim::{
        GameEvent, GameState, InputRouter, PointerEvent, PourTally, SignalSink, SimulationClock,
        SurfaceGeometry,
    };
    use law_on_tap::{RenderBackend, Settings, TapLayout, Tuning};

    /// Game instance holding all state
    struct Game {
        state: GameState,
        tuning: Tuning,
        clock: SimulationClock,
        router: InputRouter,
        audio: AudioManager,
        renderer: Box<dyn TapRenderer>,
        settings: Settings,
        /// Element the pointer coordinates are measured against
        surface: Element,
        /// Signals emitted during the current frame
        events: Vec<GameEvent>,
        /// Tally shown in the HUD (skip DOM writes when unchanged)
        shown_tally: Option<PourTally>,
    }

    impl Game {
        /// Re-measure the surface (it moves with scrolling and resizing)
        fn refresh_surface(&mut self) {
            let rect = self.surface.get_bounding_client_rect();
            self.router.resize(SurfaceGeometry::new(
                Vec2::new(rect.left() as f32, rect.top() as f32),
                Vec2::new(rect.width() as f32, rect.height() as f32),
            ));
        }

        /// Simulate, dispatch signals, draw
        fn frame(&mut self, time: f64) {
            let input = self.router.snapshot();
            self.events.clear();
            let dt = self.clock.advance(
                time,
                &input,
                &mut self.state,
                &self.tuning,
                &mut self.events,
            );

            for event in &self.events {
                self.audio.signal(*event);
                self.renderer.on_event(event);
            }

            render_frame(&self.state, dt, self.renderer.as_mut());
        }

        /// Update HUD elements in DOM
        fn update_hud(&mut self, document: &Document) {
            if !self.settings.show_tally || self.shown_tally == Some(self.state.tally) {
                return;
            }
            let tally = self.state.tally;

            for (id, value) in [
                ("hud-perfect", tally.perfect),
                ("hud-bad", tally.bad),
                ("hud-spill", tally.spilled),
                ("hud-attempts", tally.attempts()),
            ] {
                if let Some(el) = document
                    .query_selector(&format!("#{} .hud-value", id))
                    .ok()
                    .flatten()
                {
                    el.set_text_content(Some(&value.to_string()));
                }
            }
            self.shown_tally = Some(tally);
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        if let Err(e) = console_log::init_with_level(log::Level::Info) {
            web_sys::console::error_1(&format!("Logger init failed: {}", e).into());
        }

        log::info!("Law on Tap starting...");

        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            log::error!("No document - nothing to run in");
            return;
        };

        let settings = Settings::load();
        let tuning = Tuning::load();
        let state = GameState::new(TapLayout::default().build());

        let Some((renderer, surface)) = build_renderer(&document, &settings, &tuning, &state)
        else {
            log::error!("No render surface found - giving up");
            return;
        };

        let mut audio = AudioManager::new();
        audio.apply_settings(&settings);

        let game = Rc::new(RefCell::new(Game {
            state,
            tuning,
            clock: SimulationClock::new(),
            router: InputRouter::default(),
            audio,
            renderer,
            settings,
            surface,
            events: Vec::new(),
            shown_tally: None,
        }));
        game.borrow_mut().refresh_surface();

        setup_input_handlers(game.clone());
        setup_focus_handlers(game.clone());

        // Hide loading screen
        if let Some(loading) = document.get_element_by_id("loading-screen") {
            let _ = loading.set_attribute("class", "hidden");
        }

        // Start game loop
        request_animation_frame(game);

        log::info!("Law on Tap running!");
    }

    /// Pick the backend from settings, falling back to the other one
    fn build_renderer(
        document: &Document,
        settings: &Settings,
        tuning: &Tuning,
        state: &GameState,
    ) -> Option<(Box<dyn TapRenderer>, Element)> {
        let canvas = document
            .get_element_by_id("canvas")
            .and_then(|el| el.dyn_into::<HtmlCanvasElement>().ok());
        let bar = document.get_element_by_id("bar");

        if settings.render_backend == RenderBackend::Canvas || bar.is_none() {
            if let Some(canvas) = canvas.clone() {
                size_canvas(&canvas);
                let band = (tuning.perfect_min, tuning.perfect_max);
                if let Some(renderer) =
                    CanvasRenderer::new(canvas.clone(), OffsetTable::load(), band)
                {
                    log::info!("Using {} renderer", RenderBackend::Canvas.as_str());
                    return Some((Box::new(renderer), canvas.into()));
                }
                log::warn!("Canvas has no 2D context");
            }
        }

        let bar = bar?;
        log::info!("Using {} renderer", RenderBackend::Dom.as_str());
        let renderer = DomRenderer::new(document, state.snapshots());
        Some((Box::new(renderer), bar))
    }

    /// Match the canvas backing store to its displayed size
    fn size_canvas(canvas: &HtmlCanvasElement) {
        let dpr = web_sys::window().map(|w| w.device_pixel_ratio()).unwrap_or(1.0);
        let width = (canvas.client_width() as f64 * dpr) as u32;
        let height = (canvas.client_height() as f64 * dpr) as u32;
        canvas.set_width(width.max(1));
        canvas.set_height(height.max(1));
    }

    fn client_pos(event: &MouseEvent) -> Vec2 {
        Vec2::new(event.client_x() as f32, event.client_y() as f32)
    }

    /// First touch only - one shared pointer
    fn first_touch_pos(event: &TouchEvent) -> Option<Vec2> {
        let touch = event.touches().get(0)?;
        Some(Vec2::new(touch.client_x() as f32, touch.client_y() as f32))
    }

    fn setup_input_handlers(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else { return };
        let surface = game.borrow().surface.clone();

        // Mouse down on the surface
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let mut g = game.borrow_mut();
                g.audio.resume();
                g.refresh_surface();
                g.router.handle(PointerEvent::Down {
                    client: client_pos(&event),
                });
            });
            let _ = surface
                .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Mouse move anywhere, so leaving a tap (or the surface) is noticed
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                game.borrow_mut().router.handle(PointerEvent::Move {
                    client: client_pos(&event),
                });
            });
            let _ = window
                .add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch start on the surface
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                let mut g = game.borrow_mut();
                g.audio.resume();
                g.refresh_surface();
                if let Some(client) = first_touch_pos(&event) {
                    g.router.handle(PointerEvent::Down { client });
                }
            });
            let _ = surface
                .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch move
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                if let Some(client) = first_touch_pos(&event) {
                    game.borrow_mut().router.handle(PointerEvent::Move { client });
                }
            });
            let _ = surface
                .add_event_listener_with_callback("touchmove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Release is global: letting go outside the surface still stops the pour
        for name in ["mouseup", "touchend", "touchcancel"] {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                game.borrow_mut().router.handle(PointerEvent::Up);
            });
            let _ = window.add_event_listener_with_callback(name, closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Keyboard: M toggles mute and remembers it
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
                if !matches!(event.key().as_str(), "m" | "M") {
                    return;
                }
                let mut g = game.borrow_mut();
                let muted = g.settings.toggle_mute();
                g.audio.set_muted(muted);
                g.settings.save();
                log::info!("Muted: {}", muted);
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Keep the canvas crisp and the mapping right after resizes
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                let mut g = game.borrow_mut();
                if let Some(canvas) = g.surface.dyn_ref::<HtmlCanvasElement>() {
                    size_canvas(canvas);
                }
                g.refresh_surface();
            });
            let _ =
                window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_focus_handlers(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else { return };
        let Some(document) = window.document() else { return };

        // Visibility change (tab switch, minimize)
        {
            let game = game.clone();
            let document_clone = document.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                if document_clone.visibility_state() == web_sys::VisibilityState::Hidden {
                    let mut g = game.borrow_mut();
                    g.router.release();
                    // No catch-up frame when the tab comes back
                    g.clock.reset();
                    log::info!("Page hidden - pointer released");
                }
            });
            let _ = document.add_event_listener_with_callback(
                "visibilitychange",
                closure.as_ref().unchecked_ref(),
            );
            closure.forget();
        }

        // Window blur (click outside)
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                let mut g = game.borrow_mut();
                g.router.release();
                if g.settings.mute_on_blur {
                    g.audio.set_muted(true);
                }
            });
            let _ = window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Window focus: restore the configured mute state
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                let mut g = game.borrow_mut();
                let muted = g.settings.muted;
                g.audio.set_muted(muted);
            });
            let _ =
                window.add_event_listener_with_callback("focus", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else { return };
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        {
            let mut g = game.borrow_mut();
            g.frame(time);
            if let Some(document) = web_sys::window().and_then(|w| w.document()) {
                g.update_hud(&document);
            }
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
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Law on Tap (native) starting...");
    log::info!("Native mode plays a scripted session - run with `trunk serve` for the web version");

    run_demo();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Scripted session over the default layout: one perfect pour, one spill,
/// one dumped glass
#[cfg(not(target_arch = "wasm32"))]
fn run_demo() {
    use glam::Vec2;
    use law_on_tap::renderer::{TapRenderer, TextRenderer, render_frame};
    use law_on_tap::sim::{GameEvent, GameState, InputRouter, PointerEvent, SimulationClock};
    use law_on_tap::{TapLayout, Tuning};

    const FRAME_MS: f64 = 1000.0 / 60.0;
    const END_MS: f64 = 9000.0;

    let tuning = Tuning::load();
    let layout = TapLayout::default();
    let mut state = GameState::new(layout.build());
    let mut clock = SimulationClock::new();
    // Client space == logical space for the demo
    let mut router = InputRouter::default();
    let mut renderer = TextRenderer::new();
    let mut events: Vec<GameEvent> = Vec::new();

    let center = |i: usize| layout.taps[i].bounds.center();
    let script: Vec<(f64, PointerEvent)> = vec![
        (0.0, PointerEvent::Down { client: center(0) }),
        (2200.0, PointerEvent::Up),
        (2500.0, PointerEvent::Down { client: center(1) }),
        // Slide onto the third tap while the second is locked
        (5600.0, PointerEvent::Move { client: center(2) }),
        (6600.0, PointerEvent::Up),
        (6700.0, PointerEvent::Move { client: Vec2::ZERO }),
    ];

    let mut next = 0;
    let mut time = 0.0;
    while time <= END_MS {
        while let Some((at, event)) = script.get(next) {
            if *at > time {
                break;
            }
            router.handle(*event);
            next += 1;
        }

        events.clear();
        let dt = clock.advance(time, &router.snapshot(), &mut state, &tuning, &mut events);
        for event in &events {
            log::info!("{:>7.1} ms  {:?}", time, event);
            renderer.on_event(event);
        }

        render_frame(&state, dt, &mut renderer);
        if !events.is_empty() {
            for line in renderer.lines() {
                log::info!("            {}", line);
            }
        }

        time += FRAME_MS;
    }

    let tally = state.tally;
    log::info!(
        "Session over after {} frames: {} pours, {} perfect, {} bad, {} spilled",
        state.frame_count,
        tally.attempts(),
        tally.perfect,
        tally.bad,
        tally.spilled
    );
}
