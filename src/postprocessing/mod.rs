//! Postprocessing: the pass chain descriptor and the GPU passes that run it.
//!
//! - `chain` decides which passes run and which one writes the surface
//! - `composer` owns the intermediate buffers and records a frame
//! - `bloom`, `antialias` and `film` are the optional image-space passes
//! - `fullscreen` holds what the image-space passes share

pub mod antialias;
pub mod bloom;
pub mod chain;
pub mod composer;
pub mod film;
pub mod fullscreen;

pub use antialias::AntialiasPass;
pub use bloom::BloomPass;
pub use chain::{PassChain, PassKind, PassState};
pub use composer::{Composer, DrawScene};
pub use film::FilmPass;
