//! The pass chain descriptor: which passes run, which one is terminal, and
//! the live parameters of the configurable passes.
//!
//! The chain knows nothing about the GPU. [`super::Composer`] owns one and
//! keeps its GPU resources in sync with it.

use crate::{
    config::{BloomParams, FilmParams},
    error::{Result, SceneError},
};

/// One stage of the postprocessing pipeline, in execution order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PassKind {
    /// Base scene rasterization.
    Render,
    Bloom,
    /// Spatial antialiasing resolve (FXAA).
    Antialias,
    /// Film grain and scanline overlay.
    Film,
}

impl PassKind {
    pub const ORDER: [PassKind; 4] = [
        PassKind::Render,
        PassKind::Bloom,
        PassKind::Antialias,
        PassKind::Film,
    ];

    fn index(self) -> usize {
        self as usize
    }

    /// The base render pass is mandatory.
    pub fn is_optional(self) -> bool {
        self != PassKind::Render
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PassState {
    Enabled,
    Disabled,
    /// Failed to initialise on this adapter; can never be enabled again.
    Unavailable,
}

#[derive(Clone, Debug, PartialEq)]
pub struct PassChain {
    states: [PassState; 4],
    terminal: PassKind,
    bloom: BloomParams,
    film: FilmParams,
}

impl PassChain {
    /// All four passes enabled; the film pass is terminal.
    pub fn new(bloom: BloomParams, film: FilmParams) -> Self {
        Self {
            states: [PassState::Enabled; 4],
            terminal: PassKind::Film,
            bloom,
            film,
        }
    }

    pub fn state(&self, kind: PassKind) -> PassState {
        self.states[kind.index()]
    }

    pub fn is_enabled(&self, kind: PassKind) -> bool {
        self.state(kind) == PassState::Enabled
    }

    /// The single pass that writes to the display surface.
    pub fn terminal(&self) -> PassKind {
        self.terminal
    }

    pub fn is_terminal(&self, kind: PassKind) -> bool {
        self.terminal == kind
    }

    /// Enabled passes in execution order.
    pub fn enabled_passes(&self) -> impl Iterator<Item = PassKind> + '_ {
        PassKind::ORDER
            .into_iter()
            .filter(move |kind| self.is_enabled(*kind))
    }

    pub fn bloom(&self) -> BloomParams {
        self.bloom
    }

    pub fn film(&self) -> FilmParams {
        self.film
    }

    /// Replace the bloom parameters. Never touches the terminal pass.
    pub fn set_bloom(&mut self, bloom: BloomParams) {
        self.bloom = bloom;
    }

    /// Replace the film parameters. Never touches the terminal pass.
    pub fn set_film(&mut self, film: FilmParams) {
        self.film = film;
    }

    /// Enable or disable an optional pass and return the new terminal pass.
    pub fn set_enabled(&mut self, kind: PassKind, enabled: bool) -> Result<PassKind> {
        if !kind.is_optional() {
            return Err(SceneError::ChainInvariant(
                "the base render pass cannot be toggled".to_string(),
            ));
        }
        if self.state(kind) == PassState::Unavailable {
            return Err(SceneError::PassUnavailable {
                kind,
                reason: "failed to initialise on this adapter".to_string(),
            });
        }
        self.states[kind.index()] = if enabled {
            PassState::Enabled
        } else {
            PassState::Disabled
        };
        self.retarget()
    }

    /// Drop a pass that failed to initialise; the chain renders without it.
    pub fn mark_unavailable(&mut self, kind: PassKind) -> Result<PassKind> {
        if !kind.is_optional() {
            return Err(SceneError::ChainInvariant(
                "the base render pass is mandatory".to_string(),
            ));
        }
        self.states[kind.index()] = PassState::Unavailable;
        self.retarget()
    }

    fn retarget(&mut self) -> Result<PassKind> {
        if let Some(last) = self.enabled_passes().last() {
            self.terminal = last;
        }
        self.validate()?;
        Ok(self.terminal)
    }

    /// Exactly one terminal pass: the last enabled one, and the base render
    /// pass is always enabled.
    pub fn validate(&self) -> Result<()> {
        if !self.is_enabled(PassKind::Render) {
            return Err(SceneError::ChainInvariant(
                "the base render pass must stay enabled".to_string(),
            ));
        }
        let last = self.enabled_passes().last();
        if last != Some(self.terminal) {
            return Err(SceneError::ChainInvariant(format!(
                "terminal pass is {:?} but the last enabled pass is {:?}",
                self.terminal, last
            )));
        }
        Ok(())
    }
}

impl Default for PassChain {
    fn default() -> Self {
        Self::new(BloomParams::default(), FilmParams::default())
    }
}
