//! Live parameter controls.
//!
//! A keyboard panel over the pass chain's tunables. Keys increase a value,
//! shift+key decreases it:
//!
//! | key | effect |
//! |---|---|
//! | `B` / `T` / `R` | bloom strength / threshold / radius |
//! | `N` / `S` / `C` | film noise / scanline intensity / scanline count |
//! | `G` | toggle grayscale |
//! | `1` / `2` / `3` | toggle bloom / antialias / film pass |
//!
//! The panel only computes the change; the renderer applies it.

use winit::{
    event::{ElementState, KeyEvent, WindowEvent},
    keyboard::{KeyCode, PhysicalKey},
};

use crate::{
    config::{BloomParams, FilmParams},
    postprocessing::{PassChain, PassKind},
};

pub const BLOOM_STRENGTH_STEP: f32 = 0.1;
pub const BLOOM_THRESHOLD_STEP: f32 = 0.05;
pub const BLOOM_RADIUS_STEP: f32 = 0.1;
pub const FILM_NOISE_STEP: f32 = 0.05;
pub const FILM_SCANLINE_STEP: f32 = 0.005;
pub const FILM_COUNT_STEP: u32 = 64;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PanelAction {
    SetBloom(BloomParams),
    SetFilm(FilmParams),
    /// Enable or disable a pass.
    Toggle(PassKind, bool),
}

#[derive(Debug, Default)]
pub struct ParamPanel {
    shift: bool,
}

fn step(value: f32, delta: f32, decrease: bool) -> f32 {
    let next = if decrease { value - delta } else { value + delta };
    next.max(0.0)
}

impl ParamPanel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Track modifiers and translate key presses into actions.
    pub fn handle_window_event(&mut self, event: &WindowEvent, chain: &PassChain) -> Option<PanelAction> {
        match event {
            WindowEvent::ModifiersChanged(modifiers) => {
                self.shift = modifiers.state().shift_key();
                None
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(code),
                        state: ElementState::Pressed,
                        ..
                    },
                ..
            } => Self::handle_key(*code, self.shift, chain),
            _ => None,
        }
    }

    pub fn handle_key(code: KeyCode, shift: bool, chain: &PassChain) -> Option<PanelAction> {
        let mut bloom = chain.bloom();
        let mut film = chain.film();
        let toggle = |kind: PassKind| PanelAction::Toggle(kind, !chain.is_enabled(kind));
        let action = match code {
            KeyCode::KeyB => {
                bloom.strength = step(bloom.strength, BLOOM_STRENGTH_STEP, shift);
                PanelAction::SetBloom(bloom)
            }
            KeyCode::KeyT => {
                bloom.threshold = step(bloom.threshold, BLOOM_THRESHOLD_STEP, shift);
                PanelAction::SetBloom(bloom)
            }
            KeyCode::KeyR => {
                bloom.radius = step(bloom.radius, BLOOM_RADIUS_STEP, shift);
                PanelAction::SetBloom(bloom)
            }
            KeyCode::KeyN => {
                film.noise_intensity = step(film.noise_intensity, FILM_NOISE_STEP, shift);
                PanelAction::SetFilm(film)
            }
            KeyCode::KeyS => {
                film.scanline_intensity = step(film.scanline_intensity, FILM_SCANLINE_STEP, shift);
                PanelAction::SetFilm(film)
            }
            KeyCode::KeyC => {
                film.scanline_count = if shift {
                    film.scanline_count.saturating_sub(FILM_COUNT_STEP).max(1)
                } else {
                    film.scanline_count.saturating_add(FILM_COUNT_STEP)
                };
                PanelAction::SetFilm(film)
            }
            KeyCode::KeyG => {
                film.grayscale = !film.grayscale;
                PanelAction::SetFilm(film)
            }
            KeyCode::Digit1 => toggle(PassKind::Bloom),
            KeyCode::Digit2 => toggle(PassKind::Antialias),
            KeyCode::Digit3 => toggle(PassKind::Film),
            _ => return None,
        };
        Some(action)
    }
}
