//! Canvas Invaders entry point
//!
//! On the web: binds to the page canvas, loads the shoot sound and runs the
//! game loop. Natively: runs a scripted headless session and prints a
//! summary.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;

    use glam::Vec2;
    use js_sys::Promise;
    use wasm_bindgen::prelude::*;
    use wasm_bindgen_futures::JsFuture;
    use web_sys::{Document, HtmlCanvasElement};

    use canvas_invaders::audio::{AudioManager, SoundEffect, load_sound};
    use canvas_invaders::platform::Keyboarder;
    use canvas_invaders::renderer::{Canvas2dSurface, GpuSurface, RenderSurface, draw_world};
    use canvas_invaders::settings::RendererBackend;
    use canvas_invaders::sim::{BodyTag, GameEvent};
    use canvas_invaders::{GameLoop, RenderError, Settings, StartupError};

    /// Game instance holding all state
    struct Game {
        game: GameLoop,
        keyboard: Keyboarder,
        audio: AudioManager,
        surface: Box<dyn RenderSurface>,
    }

    impl Game {
        /// Simulate the ticks this frame owes, then draw
        fn frame(&mut self, time: f64) {
            let events = {
                let keys = self.keyboard.keys();
                self.game.frame(time, &keys)
            };

            for event in &events {
                match event {
                    GameEvent::PlayerFired { .. } => self.audio.play(SoundEffect::Shoot),
                    GameEvent::Destroyed {
                        tag: BodyTag::Player,
                        ..
                    } => log::info!("Player lost - no respawn"),
                    _ => {}
                }
            }

            match draw_world(self.surface.as_mut(), self.game.world()) {
                Ok(()) => {}
                Err(RenderError::SurfaceLost) => self.surface.recover(),
                Err(RenderError::OutOfMemory) => log::error!("Out of memory!"),
                Err(e) => log::warn!("Render error: {}", e),
            }
        }
    }

    pub async fn run() -> Result<(), StartupError> {
        console_error_panic_hook::set_once();
        if console_log::init_with_level(log::Level::Info).is_err() {
            web_sys::console::warn_1(&"Logger already initialized".into());
        }

        log::info!("Canvas Invaders starting...");

        let window = web_sys::window().ok_or(StartupError::NoWindow)?;
        let document = window.document().ok_or(StartupError::NoDocument)?;
        document_ready(&document).await;

        let settings = Settings::load();

        let canvas: HtmlCanvasElement = document
            .get_element_by_id(&settings.canvas_id)
            .ok_or_else(|| StartupError::CanvasNotFound(settings.canvas_id.clone()))?
            .dyn_into()
            .map_err(|_| StartupError::NotACanvas(settings.canvas_id.clone()))?;

        let (width, height) = (canvas.width(), canvas.height());
        let game_size = Vec2::new(width as f32, height as f32);

        let seed = settings.seed.unwrap_or(js_sys::Date::now() as u64);
        let game = GameLoop::from_settings(&settings, game_size, seed);
        log::info!("Game initialized with seed: {}", seed);

        let keyboard = Keyboarder::attach(&window, &document);

        let surface: Box<dyn RenderSurface> = match settings.renderer {
            RendererBackend::Canvas2d => Box::new(Canvas2dSurface::new(&canvas)?),
            RendererBackend::WebGpu => Box::new(create_gpu_surface(&canvas, width, height).await?),
        };
        log::info!("Renderer: {}", settings.renderer.as_str());

        // The loop does not start until the sound is playable
        let sound = load_sound(&settings.sound_url).await?;
        let audio = AudioManager::new(sound, settings.effective_volume());

        let game = Rc::new(RefCell::new(Game {
            game,
            keyboard,
            audio,
            surface,
        }));

        request_animation_frame(game);

        log::info!("Canvas Invaders running!");
        Ok(())
    }

    /// Resolve once the DOM is parsed
    async fn document_ready(document: &Document) {
        if document.ready_state() != "loading" {
            return;
        }

        let loaded = {
            let document = document.clone();
            Promise::new(&mut move |resolve, _reject| {
                let on_loaded = Closure::once_into_js(move || {
                    let _ = resolve.call0(&JsValue::NULL);
                });
                let _ = document
                    .add_event_listener_with_callback("DOMContentLoaded", on_loaded.unchecked_ref());
            })
        };
        let _ = JsFuture::from(loaded).await;
    }

    async fn create_gpu_surface(
        canvas: &HtmlCanvasElement,
        width: u32,
        height: u32,
    ) -> Result<GpuSurface, StartupError> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .map_err(|e| StartupError::Gpu(e.to_string()))?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(|e| StartupError::Gpu(e.to_string()))?;

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        GpuSurface::new(surface, &adapter, width, height).await
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            log::error!("Window vanished, stopping game loop");
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
pub async fn wasm_main() -> Result<(), JsValue> {
    wasm_game::run().await.map_err(|e| {
        log::error!("Startup failed: {}", e);
        JsValue::from_str(&e.to_string())
    })
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Canvas Invaders (native) starting...");
    log::info!("Native mode runs headless - serve the wasm build for the playable version");

    if let Err(e) = headless::run(std::env::args().skip(1)) {
        log::error!("Headless run failed: {}", e);
        std::process::exit(1);
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use std::path::Path;

    use serde::Serialize;

    use canvas_invaders::consts::DEFAULT_FIELD;
    use canvas_invaders::sim::{Body, BodyTag, GameEvent, Key, KeyState};
    use canvas_invaders::{GameLoop, Settings};

    const DEFAULT_TICKS: u64 = 600;
    /// Nominal 60 Hz frame stamps
    const FRAME_MS: f64 = 1000.0 / 60.0;

    #[derive(Debug, Default, Serialize)]
    struct Tally {
        player_shots: u32,
        invader_shots: u32,
        invaders_destroyed: u32,
        bullets_destroyed: u32,
        bullets_culled: u32,
        player_destroyed_on_frame: Option<u64>,
    }

    #[derive(Serialize)]
    struct Summary<'a> {
        seed: u64,
        frames: u64,
        ticks: u64,
        invaders_left: usize,
        bullets_in_flight: usize,
        player_alive: bool,
        tally: &'a Tally,
        bodies: &'a [Body],
    }

    /// Sweep left and right, tapping fire
    fn scripted_keys(frame: u64) -> KeyState {
        let mut held = Vec::new();
        match frame % 160 {
            0..40 => held.push(Key::Right),
            40..120 => held.push(Key::Left),
            _ => held.push(Key::Right),
        }
        if frame % 15 == 0 {
            held.push(Key::Fire);
        }
        KeyState::with_held(&held)
    }

    /// Args: `[frames] [settings.json]`
    pub fn run(mut args: impl Iterator<Item = String>) -> Result<(), Box<dyn std::error::Error>> {
        let frames = match args.next() {
            Some(arg) => arg.parse::<u64>()?,
            None => DEFAULT_TICKS,
        };
        let settings = match args.next() {
            Some(path) => Settings::load_from(Path::new(&path)),
            None => Settings::default(),
        };

        let seed = settings.seed.unwrap_or(0x5EED);
        let mut game = GameLoop::from_settings(&settings, DEFAULT_FIELD, seed);
        let mut tally = Tally::default();

        for frame in 0..frames {
            let keys = scripted_keys(frame);
            for event in game.frame(frame as f64 * FRAME_MS, &keys) {
                match event {
                    GameEvent::PlayerFired { .. } => tally.player_shots += 1,
                    GameEvent::InvaderFired { invader, .. } => {
                        log::debug!("Invader {} fired on frame {}", invader, frame);
                        tally.invader_shots += 1;
                    }
                    GameEvent::Destroyed { tag, .. } => match tag {
                        BodyTag::Player => tally.player_destroyed_on_frame = Some(frame),
                        BodyTag::Invader => tally.invaders_destroyed += 1,
                        BodyTag::Bullet => tally.bullets_destroyed += 1,
                    },
                    GameEvent::Culled { .. } => tally.bullets_culled += 1,
                }
            }
        }

        let world = game.world();
        log::info!(
            "Ran {} frames: {} invaders left, player {}",
            frames,
            world.count(BodyTag::Invader),
            if world.player().is_some() { "alive" } else { "destroyed" }
        );

        let summary = Summary {
            seed,
            frames,
            ticks: world.time_ticks,
            invaders_left: world.count(BodyTag::Invader),
            bullets_in_flight: world.count(BodyTag::Bullet),
            player_alive: world.player().is_some(),
            tally: &tally,
            bodies: &world.bodies,
        };
        println!("{}", serde_json::to_string_pretty(&summary)?);
        Ok(())
    }

}
