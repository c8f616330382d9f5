//! Audio system using an HTML audio element
//!
//! One sound file is fetched before the game starts. Every player shot
//! reloads it from the start and plays it again, so held fire retriggers
//! the sound every tick.

use js_sys::Promise;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::{JsFuture, spawn_local};
use web_sys::{AddEventListenerOptions, HtmlAudioElement};

use crate::error::StartupError;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Player fired a bullet
    Shoot,
}

/// Load `url` and resolve once the browser can play it through.
///
/// Fails if the element reports an error. There is no timeout: a load that
/// never settles never resolves.
pub async fn load_sound(url: &str) -> Result<HtmlAudioElement, StartupError> {
    let load_error = |reason: String| StartupError::SoundLoad {
        url: url.to_string(),
        reason,
    };

    let sound = HtmlAudioElement::new_with_src(url).map_err(|e| load_error(format!("{:?}", e)))?;

    let ready = {
        let sound = sound.clone();
        Promise::new(&mut move |resolve, reject| {
            let on_ready = Closure::once_into_js(move || {
                let _ = resolve.call0(&JsValue::NULL);
            });
            let on_error = Closure::once_into_js(move |event: web_sys::Event| {
                let _ = reject.call1(&JsValue::NULL, &event);
            });
            // Every later `load()` fires these events again; the one-shot
            // closures must be detached after their first call
            let once = AddEventListenerOptions::new();
            once.set_once(true);
            let _ = sound.add_event_listener_with_callback_and_add_event_listener_options(
                "canplaythrough",
                on_ready.unchecked_ref(),
                &once,
            );
            let _ = sound.add_event_listener_with_callback_and_add_event_listener_options(
                "error",
                on_error.unchecked_ref(),
                &once,
            );
        })
    };

    sound.load();
    JsFuture::from(ready)
        .await
        .map_err(|_| load_error("media element reported an error".to_string()))?;

    log::info!("Sound '{}' ready", url);
    Ok(sound)
}

/// Audio manager for the game
pub struct AudioManager {
    shoot: HtmlAudioElement,
    /// Playback volume (0.0 - 1.0), already adjusted for mute
    volume: f32,
}

impl AudioManager {
    pub fn new(shoot: HtmlAudioElement, volume: f32) -> Self {
        Self {
            shoot,
            volume: volume.clamp(0.0, 1.0),
        }
    }

    /// Play a sound effect
    pub fn play(&self, effect: SoundEffect) {
        if self.volume <= 0.0 {
            return;
        }

        match effect {
            SoundEffect::Shoot => {
                self.shoot.set_volume(f64::from(self.volume));
                // Reset to the start, then play; overlapping shots cut each other off
                self.shoot.load();
                match self.shoot.play() {
                    // The next shot's `load()` aborts this one and rejects its promise
                    Ok(playing) => spawn_local(async move {
                        if let Err(e) = JsFuture::from(playing).await {
                            log::debug!("Shoot sound interrupted: {:?}", e);
                        }
                    }),
                    Err(e) => log::warn!("Shoot sound failed to play: {:?}", e),
                }
            }
        }
    }
}
