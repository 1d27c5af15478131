//! Per-frame beam radius extraction.
//!
//! Core strategy:
//! - Find the peak intensity pixel (first occurrence in row-major order on
//!   ties, so results are reproducible across runs and platforms).
//! - Threshold at the truncated `peak / e²` level.
//! - Collect every pixel whose intensity falls inside the tolerance band
//!   around the threshold and average their distances to the peak.
//!
//! The average over the whole crossing ring is what makes the estimate
//! usable on discretized frames: a single crossing sample would be quantized
//! to pixel distances, the ring mean is not.

mod extractor;

pub use extractor::{
    ExtractError, RadiusExtractConfig, RadiusSample, extract_radius_f32, extract_radius_u8,
    extract_radius_u16,
};
