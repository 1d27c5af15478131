use log::debug;
use rayon::prelude::*;
use thiserror::Error;

use bm_core::{GaussianBeam, ImageView, OpticsConfig};
use bm_fit::fit_propagation;
use bm_radius::{
    ExtractError, RadiusExtractConfig, RadiusSample, extract_radius_f32, extract_radius_u8,
    extract_radius_u16,
};

#[derive(Debug, Error)]
pub enum ProfileError {
    #[error("shape mismatch: {positions} positions vs {frames} frames")]
    ShapeMismatch { positions: usize, frames: usize },
    #[error("empty input: at least one frame is required")]
    EmptyInput,
    #[error("invalid pixel size {value}: must be positive")]
    InvalidPixelSize { value: f64 },
    #[error("frame {index}: {source}")]
    Frame {
        index: usize,
        source: ExtractError,
    },
    #[error(transparent)]
    Fit(#[from] bm_fit::FitError),
}

/// Profiles a beam from 8-bit frames.
///
/// `positions` and `frames` must be index-aligned: the i-th position is
/// where the i-th frame was captured. Extraction runs per frame in parallel;
/// pairing is preserved and the lowest failing frame index is the one
/// reported. Radii are scaled by `pixel_size` before the fit, so the
/// returned waist location is in position units and the divergence relates
/// physical radius to position.
pub fn extract_beam_u8(
    positions: &[f64],
    frames: &[ImageView<'_, u8>],
    wavelength: f64,
    pixel_size: f64,
    optics: &OpticsConfig,
    cfg: &RadiusExtractConfig,
) -> Result<GaussianBeam, ProfileError> {
    check_input(positions.len(), frames.len(), pixel_size)?;

    let samples = collect_samples(
        frames
            .par_iter()
            .map(|frame| extract_radius_u8(frame, cfg))
            .collect(),
    )?;

    fit_and_build(positions, &samples, wavelength, pixel_size, optics)
}

/// Profiles a beam from 16-bit frames. See [`extract_beam_u8`].
pub fn extract_beam_u16(
    positions: &[f64],
    frames: &[ImageView<'_, u16>],
    wavelength: f64,
    pixel_size: f64,
    optics: &OpticsConfig,
    cfg: &RadiusExtractConfig,
) -> Result<GaussianBeam, ProfileError> {
    check_input(positions.len(), frames.len(), pixel_size)?;

    let samples = collect_samples(
        frames
            .par_iter()
            .map(|frame| extract_radius_u16(frame, cfg))
            .collect(),
    )?;

    fit_and_build(positions, &samples, wavelength, pixel_size, optics)
}

/// Profiles a beam from float frames. See [`extract_beam_u8`].
pub fn extract_beam_f32(
    positions: &[f64],
    frames: &[ImageView<'_, f32>],
    wavelength: f64,
    pixel_size: f64,
    optics: &OpticsConfig,
    cfg: &RadiusExtractConfig,
) -> Result<GaussianBeam, ProfileError> {
    check_input(positions.len(), frames.len(), pixel_size)?;

    let samples = collect_samples(
        frames
            .par_iter()
            .map(|frame| extract_radius_f32(frame, cfg))
            .collect(),
    )?;

    fit_and_build(positions, &samples, wavelength, pixel_size, optics)
}

fn check_input(positions: usize, frames: usize, pixel_size: f64) -> Result<(), ProfileError> {
    if positions != frames {
        return Err(ProfileError::ShapeMismatch { positions, frames });
    }
    if frames == 0 {
        return Err(ProfileError::EmptyInput);
    }
    // Negated comparison also rejects NaN.
    if !(pixel_size > 0.0) {
        return Err(ProfileError::InvalidPixelSize { value: pixel_size });
    }
    Ok(())
}

/// Drains the per-frame results in index order so that the lowest failing
/// frame wins regardless of worker scheduling.
fn collect_samples(
    results: Vec<Result<RadiusSample, ExtractError>>,
) -> Result<Vec<RadiusSample>, ProfileError> {
    let mut samples = Vec::with_capacity(results.len());
    for (index, result) in results.into_iter().enumerate() {
        samples.push(result.map_err(|source| ProfileError::Frame { index, source })?);
    }
    Ok(samples)
}

fn fit_and_build(
    positions: &[f64],
    samples: &[RadiusSample],
    wavelength: f64,
    pixel_size: f64,
    optics: &OpticsConfig,
) -> Result<GaussianBeam, ProfileError> {
    let radii: Vec<f64> = samples
        .iter()
        .map(|s| f64::from(s.radius) * pixel_size)
        .collect();

    let fit = fit_propagation(positions, &radii)?;
    debug!(
        "profiled {} frames: slope {:.6e}, divergence {:.6e} rad, waist at {:.6e}",
        samples.len(),
        fit.slope,
        fit.divergence,
        fit.waist_location
    );

    Ok(GaussianBeam {
        wavelength,
        amplitude: optics.amplitude,
        refractive_index: optics.refractive_index,
        waist_location: fit.waist_location,
        divergence: fit.divergence,
    })
}
