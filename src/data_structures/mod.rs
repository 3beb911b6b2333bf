//! Scene data: geometry, the starfield and GPU textures.
//!
//! - `sphere` builds the UV sphere shared by the eclipse and atmosphere
//! - `starfield` generates star positions and owns their instance buffer
//! - `texture` wraps GPU textures, render targets and their bind groups

pub mod sphere;
pub mod starfield;
pub mod texture;
