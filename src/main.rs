//! Pose Pong entry point
//!
//! Handles platform-specific initialization and runs the game loop.

use pose_pong::sim::{GameEvent, Side};

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

fn side_name(side: Side) -> &'static str {
    match side {
        Side::Left => "left",
        Side::Right => "right",
    }
}

/// Log what happened during a tick
fn log_event(event: &GameEvent) {
    match event {
        GameEvent::Scored { scorer } => log::info!("Point to {} player", side_name(*scorer)),
        GameEvent::MatchOver { winner } => log::info!("Game over, {} player wins", side_name(*winner)),
        GameEvent::Resumed => log::debug!("Ball in play"),
        GameEvent::PaddleHit { side } => log::debug!("Ball hit {} paddle", side_name(*side)),
        GameEvent::WallBounce => log::trace!("Ball hit wall"),
    }
}

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, MouseEvent};

    use pose_pong::input::{PointerState, sample};
    use pose_pong::pose::{PoseFeed, on_activate};
    use pose_pong::renderer::{self, RenderState, Scene};
    use pose_pong::sim::{GamePhase, GameState, tick};
    use pose_pong::{Settings, Tuning};

    thread_local! {
        /// Written by the page whenever the pose estimator has a result
        pub static POSE_FEED: PoseFeed = PoseFeed::new();
    }

    /// Game instance holding all state
    struct Game {
        state: GameState,
        settings: Settings,
        render_state: Option<RenderState>,
        pointer: PointerState,
        poses: PoseFeed,
        // FPS tracking
        frame_times: [f64; 60],
        frame_index: usize,
        fps: u32,
    }

    impl Game {
        fn new(tuning: Tuning, settings: Settings, poses: PoseFeed) -> Self {
            Self {
                state: GameState::new(tuning),
                settings,
                render_state: None,
                pointer: PointerState::default(),
                poses,
                frame_times: [0.0; 60],
                frame_index: 0,
                fps: 0,
            }
        }

        /// Run one simulation tick and build the frame
        fn update(&mut self, time: f64) -> Scene {
            // One read of the pose snapshot per frame
            let poses = self.poses.latest();

            let input = sample(self.settings.control, &self.pointer, &poses);
            tick(&mut self.state, &input);
            for event in &self.state.events {
                super::log_event(event);
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

            renderer::build(&self.state, &poses, &self.settings)
        }

        /// Render the current frame
        fn render(&mut self, scene: &Scene) {
            if let Some(ref mut render_state) = self.render_state {
                match render_state.render(scene) {
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

        /// Update HUD elements in DOM
        fn update_hud(&self, scene: &Scene) {
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };

            for (id, label) in ["score-left", "score-right"].iter().zip(&scene.labels) {
                if let Some(el) = document.get_element_by_id(id) {
                    if el.text_content().as_deref() != Some(label.text.as_str()) {
                        el.set_text_content(Some(&label.text));
                    }
                }
            }

            if let Some(el) = document.get_element_by_id("fps") {
                if self.settings.show_fps {
                    let _ = el.set_attribute("class", "");
                    el.set_text_content(Some(&self.fps.to_string()));
                } else {
                    let _ = el.set_attribute("class", "hidden");
                }
            }

            // Show/hide game over
            if let Some(el) = document.get_element_by_id("game-over") {
                if let GamePhase::GameOver { winner } = self.state.phase {
                    let _ = el.set_attribute("class", "");
                    if let Some(winner_el) = document.get_element_by_id("winner") {
                        winner_el.set_text_content(Some(super::side_name(winner)));
                    }
                } else {
                    let _ = el.set_attribute("class", "hidden");
                }
            }
        }
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Pose Pong starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        let tuning = canvas
            .get_attribute("data-tuning")
            .map(|json| Tuning::from_json_or_default(&json))
            .unwrap_or_default();
        let mut settings = Settings::load();
        let query = window.location().search().unwrap_or_default();
        if settings.apply_query(&query) {
            settings.save();
        }
        log::info!(
            "Control: {}, pose overlay: {}",
            settings.control.as_str(),
            settings.pose_overlay
        );

        // Canvas keeps its logical size; the backing store follows the pixel ratio
        let dpr = window.device_pixel_ratio();
        let width = (tuning.canvas_width as f64 * dpr) as u32;
        let height = (tuning.canvas_height as f64 * dpr) as u32;
        canvas.set_width(width);
        canvas.set_height(height);

        let canvas_size = (tuning.canvas_width, tuning.canvas_height);
        let poses = POSE_FEED.with(|feed| feed.clone());
        let game = Rc::new(RefCell::new(Game::new(tuning, settings, poses)));

        // Initialize WebGPU
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

        match RenderState::new(surface, &adapter, width, height, canvas_size).await {
            Ok(render_state) => game.borrow_mut().render_state = Some(render_state),
            Err(e) => {
                log::error!("Failed to create device: {e}");
                return;
            }
        }

        if let Some(status) = document.get_element_by_id("status") {
            status.set_text_content(Some("Ready"));
        }

        setup_input_handlers(&canvas, game.clone());
        setup_restart_button(game.clone());

        // Start game loop
        request_animation_frame(game);

        log::info!("Pose Pong running!");
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        // Pointer drives the paddles
        {
            let game = game.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let rect = canvas_clone.get_bounding_client_rect();
                game.borrow_mut()
                    .pointer
                    .move_to(event.client_y() as f32, rect.top() as f32);
            });
            let _ = canvas
                .add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Click reports the nose position
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                let poses = game.borrow().poses.latest();
                on_activate(&poses);
            });
            let _ = canvas
                .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
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
        {
            let mut g = game.borrow_mut();
            let scene = g.update(time);
            g.render(&scene);
            g.update_hud(&scene);
        }

        request_animation_frame(game);
    }

    fn setup_restart_button(game: Rc<RefCell<Game>>) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };

        if let Some(btn) = document.get_element_by_id("restart-btn") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                game.borrow_mut().state.restart();
                log::info!("Match restarted");
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }
}

/// Called by the page with the pose estimator's latest results (JSON array)
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
pub fn push_poses(json: &str) {
    wasm_game::POSE_FEED.with(|feed| {
        if let Err(e) = feed.publish_json(json) {
            log::warn!("Dropping malformed pose batch: {e}");
        }
    });
}

/// Whether the page should start the webcam pose estimator
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
pub fn wants_poses() -> bool {
    pose_pong::Settings::load().wants_poses()
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_game::run().await;
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use pose_pong::Tuning;
    use pose_pong::input::{PointerState, sample};
    use pose_pong::sim::{GameState, tick};
    use pose_pong::{ControlMode, renderer, settings::Settings};

    env_logger::init();
    log::info!("Pose Pong (native) starting...");
    log::info!("Native mode runs a headless match - run with `trunk serve` for the web version");

    // Optional tuning override file as the first argument
    let tuning = match std::env::args().nth(1) {
        Some(path) => match std::fs::read_to_string(&path) {
            Ok(json) => Tuning::from_json_or_default(&json),
            Err(e) => {
                log::warn!("Could not read {path}: {e}");
                Tuning::default()
            }
        },
        None => Tuning::default(),
    };

    let settings = Settings::load();
    let mut state = GameState::new(tuning);
    let mut pointer = PointerState::default();
    let center = state.tuning.center_y();
    let sweep = center - state.tuning.paddle_height;

    const MAX_TICKS: u64 = 60 * 60 * 10;
    while state.winner().is_none() && state.time_ticks < MAX_TICKS {
        // Scripted pointer sweeping up and down the court
        let t = state.time_ticks as f32 * 0.02;
        pointer.y = Some(center + sweep * t.sin());

        let input = sample(ControlMode::Mirror, &pointer, &[]);
        tick(&mut state, &input);
        for event in &state.events {
            log_event(event);
        }
    }

    let scene = renderer::build(&state, &[], &settings);
    log::info!(
        "Final score {} - {} after {} ticks ({} vertices in last frame)",
        scene.labels[0].text,
        scene.labels[1].text,
        state.time_ticks,
        scene.vertices.len()
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
