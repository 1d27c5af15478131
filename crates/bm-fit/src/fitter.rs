use thiserror::Error;

/// Slopes at or below this magnitude are treated as flat: the waist location
/// `-intercept / slope` is numerically meaningless past this point.
pub const SLOPE_EPS: f64 = 1e-12;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum FitError {
    #[error("length mismatch: {positions} positions vs {radii} radii")]
    LengthMismatch { positions: usize, radii: usize },
    #[error("insufficient samples: got {got}, need at least {min}")]
    InsufficientSamples { got: usize, min: usize },
    #[error("identical positions: zero axial spread, fit is underdetermined")]
    IdenticalPositions,
    #[error("degenerate slope: radius does not change with position (intercept {intercept})")]
    DegenerateSlope { intercept: f64 },
}

/// Result of the degree-1 propagation fit `radius = slope * position +
/// intercept`, with the derived beam parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PropagationFit {
    /// Far-field half-angle in radians: `atan(slope)`.
    pub divergence: f64,
    /// Axial position where the fitted radius crosses zero: `-intercept / slope`.
    pub waist_location: f64,
    pub slope: f64,
    pub intercept: f64,
}

/// Ordinary least-squares fit of radius against axial position.
///
/// The two sequences must be index-aligned: the i-th radius belongs to the
/// i-th position. Two samples are accepted and produce the exact line
/// through them (with no residual to judge it by).
pub fn fit_propagation(positions: &[f64], radii: &[f64]) -> Result<PropagationFit, FitError> {
    if positions.len() != radii.len() {
        return Err(FitError::LengthMismatch {
            positions: positions.len(),
            radii: radii.len(),
        });
    }

    let n = positions.len();
    if n < 2 {
        return Err(FitError::InsufficientSamples { got: n, min: 2 });
    }

    let nf = n as f64;
    let mean_z = positions.iter().sum::<f64>() / nf;
    let mean_r = radii.iter().sum::<f64>() / nf;

    let mut szz = 0.0;
    let mut szr = 0.0;
    for (&z, &r) in positions.iter().zip(radii) {
        let dz = z - mean_z;
        szz += dz * dz;
        szr += dz * (r - mean_r);
    }

    if szz == 0.0 {
        return Err(FitError::IdenticalPositions);
    }

    let slope = szr / szz;
    let intercept = mean_r - slope * mean_z;

    if slope.abs() <= SLOPE_EPS {
        return Err(FitError::DegenerateSlope { intercept });
    }

    Ok(PropagationFit {
        divergence: slope.atan(),
        waist_location: -intercept / slope,
        slope,
        intercept,
    })
}

#[cfg(test)]
mod tests {
    use crate::{FitError, fit_propagation};

    #[test]
    fn exact_line_recovers_divergence_and_waist() {
        let (r0, k) = (3.0f64, 0.25f64);
        let positions = [0.0, 1.0, 2.0];
        let radii: Vec<f64> = positions.iter().map(|z| r0 + k * z).collect();

        let fit = fit_propagation(&positions, &radii).expect("well-posed fit");

        assert!((fit.slope - k).abs() < 1e-12);
        assert!((fit.intercept - r0).abs() < 1e-12);
        assert!((fit.divergence - k.atan()).abs() < 1e-12);
        assert!((fit.waist_location - (-r0 / k)).abs() < 1e-9);
    }

    #[test]
    fn two_points_produce_the_exact_line() {
        let fit = fit_propagation(&[1.0, 3.0], &[2.0, 6.0]).expect("line through two points");
        assert!((fit.slope - 2.0).abs() < 1e-12);
        assert!((fit.intercept - 0.0).abs() < 1e-12);
        assert!(fit.waist_location.abs() < 1e-12);
    }

    #[test]
    fn overdetermined_noisy_fit_stays_close() {
        let (r0, k) = (1.0f64, 0.1f64);
        let positions: Vec<f64> = (0..10).map(|i| i as f64).collect();
        // Alternating bias cancels in the least-squares sums.
        let radii: Vec<f64> = positions
            .iter()
            .enumerate()
            .map(|(i, z)| r0 + k * z + if i % 2 == 0 { 1e-3 } else { -1e-3 })
            .collect();

        let fit = fit_propagation(&positions, &radii).expect("well-posed fit");
        assert!((fit.slope - k).abs() < 1e-3);
        assert!((fit.waist_location - (-r0 / k)).abs() < 0.1);
    }

    #[test]
    fn constant_radii_are_degenerate() {
        let err =
            fit_propagation(&[0.0, 1.0, 2.0], &[5.0, 5.0, 5.0]).expect_err("flat line has no waist");
        assert_eq!(err, FitError::DegenerateSlope { intercept: 5.0 });
    }

    #[test]
    fn single_sample_is_insufficient() {
        let err = fit_propagation(&[0.0], &[1.0]).expect_err("one point cannot fix a line");
        assert_eq!(err, FitError::InsufficientSamples { got: 1, min: 2 });
    }

    #[test]
    fn mismatched_lengths_are_rejected() {
        let err = fit_propagation(&[0.0, 1.0], &[1.0]).expect_err("unpaired samples");
        assert_eq!(
            err,
            FitError::LengthMismatch {
                positions: 2,
                radii: 1
            }
        );
    }

    #[test]
    fn identical_positions_are_rejected() {
        let err = fit_propagation(&[2.0, 2.0, 2.0], &[1.0, 2.0, 3.0])
            .expect_err("no axial spread to fit against");
        assert_eq!(err, FitError::IdenticalPositions);
    }
}
