//! Dino Run entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

/// Window title on native, document title in the browser
const TITLE: &str = "Dinosaur Game";

/// What a key press asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(target_arch = "wasm32", allow(dead_code))]
enum Action {
    Jump,
    Restart,
    Quit,
}

#[cfg(not(target_arch = "wasm32"))]
mod native_game {
    use std::sync::Arc;
    use std::time::Instant;

    use anyhow::Context;
    use glam::Vec2;
    use winit::application::ApplicationHandler;
    use winit::dpi::LogicalSize;
    use winit::event::{ElementState, KeyEvent, WindowEvent};
    use winit::event_loop::{ActiveEventLoop, EventLoop};
    use winit::keyboard::{KeyCode, PhysicalKey};
    use winit::window::{Window, WindowId};

    use dino_run::Settings;
    use dino_run::consts::*;
    use dino_run::platform::resolve_font;
    use dino_run::renderer::{Hud, RenderState, session_vertices};
    use dino_run::sim::{FixedStep, Session, TickInput, tick};

    use super::{Action, TITLE};

    pub(super) fn key_action(code: KeyCode) -> Option<Action> {
        match code {
            KeyCode::Space | KeyCode::ArrowUp | KeyCode::KeyW => Some(Action::Jump),
            KeyCode::KeyR => Some(Action::Restart),
            KeyCode::Escape => Some(Action::Quit),
            _ => None,
        }
    }

    /// Game instance holding all state
    struct Game {
        session: Session,
        clock: FixedStep,
        input: TickInput,
        hud: Hud,
        window_scale: f32,
        show_fps: bool,
        window: Option<Arc<Window>>,
        render_state: Option<RenderState>,
        last_frame: Option<Instant>,
        // FPS tracking
        fps_frames: u32,
        fps_since: Instant,
        /// Fatal error raised inside the event loop
        error: Option<anyhow::Error>,
    }

    impl Game {
        fn new(session: Session, hud: Hud, settings: &Settings) -> Self {
            Self {
                session,
                clock: FixedStep::default(),
                input: TickInput::default(),
                hud,
                window_scale: settings.effective_window_scale(),
                show_fps: settings.show_fps,
                window: None,
                render_state: None,
                last_frame: None,
                fps_frames: 0,
                fps_since: Instant::now(),
                error: None,
            }
        }

        fn init_graphics(&mut self, event_loop: &ActiveEventLoop) -> anyhow::Result<()> {
            let attrs = Window::default_attributes()
                .with_title(TITLE)
                .with_inner_size(LogicalSize::new(
                    PLAYFIELD_WIDTH * self.window_scale,
                    PLAYFIELD_HEIGHT * self.window_scale,
                ));
            let window = Arc::new(
                event_loop
                    .create_window(attrs)
                    .context("failed to create window")?,
            );
            let size = window.inner_size();

            let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor::default());
            let surface = instance
                .create_surface(window.clone())
                .context("failed to create surface")?;
            let adapter = pollster::block_on(instance.request_adapter(
                &wgpu::RequestAdapterOptions {
                    power_preference: wgpu::PowerPreference::default(),
                    compatible_surface: Some(&surface),
                    force_fallback_adapter: false,
                },
            ))
            .context("failed to find a suitable GPU adapter")?;
            log::info!("Using adapter: {:?}", adapter.get_info().name);

            let render_state = pollster::block_on(RenderState::new(
                surface,
                &adapter,
                size.width,
                size.height,
                Vec2::new(PLAYFIELD_WIDTH, PLAYFIELD_HEIGHT),
            ))
            .context("failed to create GPU device")?;

            window.request_redraw();
            self.render_state = Some(render_state);
            self.window = Some(window);
            Ok(())
        }

        fn on_key(&mut self, event_loop: &ActiveEventLoop, code: KeyCode) {
            match key_action(code) {
                Some(Action::Jump) => self.input.jump = true,
                Some(Action::Restart) => self.input.restart = true,
                Some(Action::Quit) => {
                    log::info!("Escape pressed, exiting (score {})", self.session.score());
                    event_loop.exit();
                }
                None => {}
            }
        }

        /// Run simulation ticks for the time since the last frame
        fn update(&mut self) {
            let now = Instant::now();
            let dt = self
                .last_frame
                .map_or(SIM_DT, |last| now.duration_since(last).as_secs_f32());
            self.last_frame = Some(now);

            for _ in 0..self.clock.advance(dt) {
                // Inputs are one-shot: consumed by the first tick that sees them
                let input = std::mem::take(&mut self.input);
                tick(&mut self.session, &input, self.clock.step());
            }

            if self.show_fps {
                self.fps_frames += 1;
                let elapsed = now.duration_since(self.fps_since).as_secs_f32();
                if elapsed >= 1.0 {
                    log::info!("FPS: {:.0}", self.fps_frames as f32 / elapsed);
                    self.fps_frames = 0;
                    self.fps_since = now;
                }
            }
        }

        /// Render the current frame
        fn render(&mut self, event_loop: &ActiveEventLoop) {
            let Some(render_state) = self.render_state.as_mut() else {
                return;
            };

            let mut vertices = session_vertices(&self.session);
            vertices.extend(self.hud.vertices(&self.session));

            match render_state.render(&vertices) {
                Ok(()) => {}
                Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                    let (w, h) = render_state.size();
                    render_state.resize(w, h);
                }
                Err(wgpu::SurfaceError::OutOfMemory) => {
                    log::error!("Out of GPU memory!");
                    event_loop.exit();
                }
                Err(e) => log::warn!("Surface error: {:?}", e),
            }
        }
    }

    impl ApplicationHandler for Game {
        fn resumed(&mut self, event_loop: &ActiveEventLoop) {
            if self.window.is_some() {
                return;
            }
            if let Err(e) = self.init_graphics(event_loop) {
                self.error = Some(e);
                event_loop.exit();
            }
        }

        fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
            match event {
                WindowEvent::CloseRequested => {
                    log::info!("Window closed (score {})", self.session.score());
                    event_loop.exit();
                }

                WindowEvent::Resized(size) => {
                    if let Some(render_state) = &mut self.render_state {
                        render_state.resize(size.width, size.height);
                    }
                }

                WindowEvent::KeyboardInput {
                    event:
                        KeyEvent {
                            physical_key: PhysicalKey::Code(code),
                            state: ElementState::Pressed,
                            repeat: false,
                            ..
                        },
                    ..
                } => self.on_key(event_loop, code),

                WindowEvent::RedrawRequested => {
                    self.update();
                    self.render(event_loop);
                    if let Some(window) = &self.window {
                        window.request_redraw();
                    }
                }

                _ => {}
            }
        }
    }

    /// Gameplay tuning, keeping the underlying error chain
    pub(super) fn load_tuning(settings: &Settings) -> anyhow::Result<dino_run::Tuning> {
        settings
            .load_tuning()
            .map_err(anyhow::Error::from_boxed)
            .context("failed to load tuning")
    }

    pub fn run() -> anyhow::Result<()> {
        let settings = Settings::load();
        let tuning = load_tuning(&settings)?;

        // No HUD without a font; this is fatal
        let font = resolve_font(&settings.font_search_order())
            .context("cannot draw text without a font")?;
        let hud = Hud::new(
            &font.font,
            settings.score_text_size,
            settings.overlay_text_size,
            Vec2::new(PLAYFIELD_WIDTH, PLAYFIELD_HEIGHT),
        );

        let seed = settings.seed.unwrap_or_else(dino_run::time_seed);
        let session = Session::new(tuning, seed);
        log::info!("Game initialized with seed: {}", seed);

        let mut game = Game::new(session, hud, &settings);
        let event_loop = EventLoop::new().context("failed to create event loop")?;
        event_loop
            .run_app(&mut game)
            .context("event loop terminated abnormally")?;

        match game.error.take() {
            Some(e) => Err(e),
            None => {
                log::info!("Final score: {}", game.session.score());
                Ok(())
            }
        }
    }
}

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;

    use glam::Vec2;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, KeyboardEvent};

    use dino_run::Settings;
    use dino_run::consts::*;
    use dino_run::platform::font::check_web_font;
    use dino_run::renderer::{RenderState, session_vertices};
    use dino_run::sim::{FixedStep, Session, TickInput, tick};

    use super::{Action, TITLE};

    fn key_action(key: &str) -> Option<Action> {
        match key {
            " " | "ArrowUp" | "w" | "W" => Some(Action::Jump),
            "r" | "R" => Some(Action::Restart),
            _ => None,
        }
    }

    /// Game instance holding all state
    struct Game {
        session: Session,
        render_state: Option<RenderState>,
        clock: FixedStep,
        last_time: f64,
        input: TickInput,
        /// Last values written to the DOM
        shown_score: Option<u64>,
        shown_over: Option<bool>,
    }

    impl Game {
        fn new(session: Session) -> Self {
            Self {
                session,
                render_state: None,
                clock: FixedStep::default(),
                last_time: 0.0,
                input: TickInput::default(),
                shown_score: None,
                shown_over: None,
            }
        }

        /// Run simulation ticks
        fn update(&mut self, dt: f32) {
            for _ in 0..self.clock.advance(dt) {
                let input = std::mem::take(&mut self.input);
                tick(&mut self.session, &input, self.clock.step());
            }
        }

        /// Render the current frame
        fn render(&mut self) {
            if let Some(ref mut render_state) = self.render_state {
                match render_state.render(&session_vertices(&self.session)) {
                    Ok(_) => {}
                    Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                        let (w, h) = render_state.size();
                        render_state.resize(w, h);
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("Out of memory!");
                    }
                    Err(e) => log::warn!("Render error: {:?}", e),
                }
            }
        }

        /// Update HUD elements in DOM
        fn update_hud(&mut self) {
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };

            let score = self.session.score();
            if self.shown_score != Some(score) {
                if let Some(el) = document.get_element_by_id("hud-score") {
                    el.set_text_content(Some(&self.session.score_text()));
                }
                self.shown_score = Some(score);
            }

            let over = self.session.is_over();
            if self.shown_over != Some(over) {
                if let Some(el) = document.get_element_by_id("game-over") {
                    let _ = el.set_attribute("class", if over { "" } else { "hidden" });
                }
                self.shown_over = Some(over);
            }
        }
    }

    pub async fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        if console_log::init_with_level(log::Level::Info).is_err() {
            web_sys::console::warn_1(&"Logger already initialized".into());
        }
        log::info!("Dino Run starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;
        document.set_title(TITLE);

        let settings = Settings::load();
        // No HUD without a font; abort initialization
        if let Err(e) = check_web_font(&settings.font_family, settings.score_text_size) {
            log::error!("{}", e);
            return Err(JsValue::from_str(&e.to_string()));
        }
        let tuning = settings
            .load_tuning()
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .ok_or("no canvas")?
            .dyn_into()
            .map_err(|_| "not a canvas")?;

        // Backing store at device resolution
        let dpr = window.device_pixel_ratio();
        let width = (canvas.client_width() as f64 * dpr) as u32;
        let height = (canvas.client_height() as f64 * dpr) as u32;
        canvas.set_width(width);
        canvas.set_height(height);

        let seed = settings.seed.unwrap_or_else(dino_run::time_seed);
        let game = Rc::new(RefCell::new(Game::new(Session::new(tuning, seed))));
        log::info!("Game initialized with seed: {}", seed);

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU,
            ..Default::default()
        });
        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas))
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let render_state = RenderState::new(
            surface,
            &adapter,
            width,
            height,
            Vec2::new(PLAYFIELD_WIDTH, PLAYFIELD_HEIGHT),
        )
        .await
        .map_err(|e| JsValue::from_str(&e.to_string()))?;
        game.borrow_mut().render_state = Some(render_state);

        setup_keyboard(&window, game.clone());

        if let Some(hud) = document.get_element_by_id("hud") {
            let _ = hud.set_attribute("class", "");
        }

        request_animation_frame(game);
        log::info!("Dino Run running!");
        Ok(())
    }

    fn setup_keyboard(window: &web_sys::Window, game: Rc<RefCell<Game>>) {
        let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
            let Some(action) = key_action(&event.key()) else {
                return;
            };
            // Keep space/arrow from scrolling the page
            event.prevent_default();
            if event.repeat() {
                return;
            }
            let mut g = game.borrow_mut();
            match action {
                Action::Jump => g.input.jump = true,
                Action::Restart => g.input.restart = true,
                Action::Quit => {}
            }
        });
        let _ = window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
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
pub async fn wasm_main() -> Result<(), JsValue> {
    wasm_game::run().await
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    env_logger::init();
    log::info!("Dino Run (native) starting...");
    native_game::run()
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
