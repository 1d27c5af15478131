//! Umbrella crate for the `beam-metrology` workspace.
//!
//! Re-exports the foundational crates and layers the end-to-end profiling
//! pipeline on top: per-frame 1/e² radius extraction followed by a linear
//! propagation fit, packaged into a [`GaussianBeam`] descriptor.

mod profile;

pub use bm_core::*;
pub use bm_fit::*;
pub use bm_radius::*;
pub use profile::{ProfileError, extract_beam_f32, extract_beam_u8, extract_beam_u16};
