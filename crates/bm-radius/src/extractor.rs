use std::f32::consts::E;

use log::debug;
use thiserror::Error;

use bm_core::ImageView;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ExtractError {
    #[error("empty frame: zero-area image")]
    EmptyFrame,
    #[error("no border points found at threshold {threshold}")]
    NoBorderPoints { threshold: f32 },
}

/// Peak amplitude and mean 1/e² crossing radius of one frame, in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RadiusSample {
    pub amplitude: f32,
    pub radius: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RadiusExtractConfig {
    /// Half-width of the intensity band around the threshold inside which a
    /// pixel counts as a border point, in intensity units.
    pub tolerance: f32,
}

impl Default for RadiusExtractConfig {
    fn default() -> Self {
        Self { tolerance: 1.0 }
    }
}

pub fn extract_radius_u8(
    img: &ImageView<'_, u8>,
    cfg: &RadiusExtractConfig,
) -> Result<RadiusSample, ExtractError> {
    let (peak_x, peak_y, peak) = argmax_u8(img).ok_or(ExtractError::EmptyFrame)?;
    let amplitude = peak as f32;
    let threshold = threshold_for(amplitude);

    let (sum, count) = border_distances_u8(img, peak_x, peak_y, threshold, cfg.tolerance);
    finish(amplitude, threshold, peak_x, peak_y, sum, count)
}

pub fn extract_radius_u16(
    img: &ImageView<'_, u16>,
    cfg: &RadiusExtractConfig,
) -> Result<RadiusSample, ExtractError> {
    let (peak_x, peak_y, peak) = argmax_u16(img).ok_or(ExtractError::EmptyFrame)?;
    let amplitude = peak as f32;
    let threshold = threshold_for(amplitude);

    let (sum, count) = border_distances_u16(img, peak_x, peak_y, threshold, cfg.tolerance);
    finish(amplitude, threshold, peak_x, peak_y, sum, count)
}

pub fn extract_radius_f32(
    img: &ImageView<'_, f32>,
    cfg: &RadiusExtractConfig,
) -> Result<RadiusSample, ExtractError> {
    let (peak_x, peak_y, amplitude) = argmax_f32(img).ok_or(ExtractError::EmptyFrame)?;
    let threshold = threshold_for(amplitude);

    let (sum, count) = border_distances_f32(img, peak_x, peak_y, threshold, cfg.tolerance);
    finish(amplitude, threshold, peak_x, peak_y, sum, count)
}

/// 1/e² threshold, truncated toward zero so integer-valued frames get an
/// integer threshold. Truncation (not rounding) shifts the crossing ring
/// slightly outward and is part of the extraction contract.
fn threshold_for(amplitude: f32) -> f32 {
    (amplitude / (E * E)).trunc()
}

fn finish(
    amplitude: f32,
    threshold: f32,
    peak_x: usize,
    peak_y: usize,
    sum: f64,
    count: usize,
) -> Result<RadiusSample, ExtractError> {
    if count == 0 {
        return Err(ExtractError::NoBorderPoints { threshold });
    }

    let radius = (sum / count as f64) as f32;
    debug!(
        "extract_radius: peak ({peak_x}, {peak_y}) amplitude {amplitude} \
         threshold {threshold} border points {count} radius {radius:.3}"
    );

    Ok(RadiusSample { amplitude, radius })
}

fn argmax_u8(img: &ImageView<'_, u8>) -> Option<(usize, usize, u8)> {
    if img.height() == 0 {
        return None;
    }

    let mut best = (0usize, 0usize, *img.row(0).first()?);
    for y in 0..img.height() {
        for (x, &v) in img.row(y).iter().enumerate() {
            // Strict comparison keeps the first maximum in row-major order.
            if v > best.2 {
                best = (x, y, v);
            }
        }
    }
    Some(best)
}

fn argmax_u16(img: &ImageView<'_, u16>) -> Option<(usize, usize, u16)> {
    if img.height() == 0 {
        return None;
    }

    let mut best = (0usize, 0usize, *img.row(0).first()?);
    for y in 0..img.height() {
        for (x, &v) in img.row(y).iter().enumerate() {
            if v > best.2 {
                best = (x, y, v);
            }
        }
    }
    Some(best)
}

fn argmax_f32(img: &ImageView<'_, f32>) -> Option<(usize, usize, f32)> {
    if img.height() == 0 {
        return None;
    }

    let mut best = (0usize, 0usize, *img.row(0).first()?);
    for y in 0..img.height() {
        for (x, &v) in img.row(y).iter().enumerate() {
            if v > best.2 {
                best = (x, y, v);
            }
        }
    }
    Some(best)
}

fn border_distances_u8(
    img: &ImageView<'_, u8>,
    peak_x: usize,
    peak_y: usize,
    threshold: f32,
    tolerance: f32,
) -> (f64, usize) {
    let mut sum = 0.0f64;
    let mut count = 0usize;
    for y in 0..img.height() {
        for (x, &v) in img.row(y).iter().enumerate() {
            if (v as f32 - threshold).abs() <= tolerance {
                sum += distance(peak_x, peak_y, x, y);
                count += 1;
            }
        }
    }
    (sum, count)
}

fn border_distances_u16(
    img: &ImageView<'_, u16>,
    peak_x: usize,
    peak_y: usize,
    threshold: f32,
    tolerance: f32,
) -> (f64, usize) {
    let mut sum = 0.0f64;
    let mut count = 0usize;
    for y in 0..img.height() {
        for (x, &v) in img.row(y).iter().enumerate() {
            if (v as f32 - threshold).abs() <= tolerance {
                sum += distance(peak_x, peak_y, x, y);
                count += 1;
            }
        }
    }
    (sum, count)
}

fn border_distances_f32(
    img: &ImageView<'_, f32>,
    peak_x: usize,
    peak_y: usize,
    threshold: f32,
    tolerance: f32,
) -> (f64, usize) {
    let mut sum = 0.0f64;
    let mut count = 0usize;
    for y in 0..img.height() {
        for (x, &v) in img.row(y).iter().enumerate() {
            if (v - threshold).abs() <= tolerance {
                sum += distance(peak_x, peak_y, x, y);
                count += 1;
            }
        }
    }
    (sum, count)
}

#[inline]
fn distance(peak_x: usize, peak_y: usize, x: usize, y: usize) -> f64 {
    let dx = peak_x as f64 - x as f64;
    let dy = peak_y as f64 - y as f64;
    (dx * dx + dy * dy).sqrt()
}
