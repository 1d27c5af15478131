use core::f64::consts::PI;

/// Gaussian beam descriptor produced by the profiling pipeline.
///
/// `divergence` is the far-field half-angle in radians; `waist_location` is
/// the axial position of the focus in the caller's position units. The
/// remaining fields are caller-supplied optics constants passed through
/// unchanged.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GaussianBeam {
    pub wavelength: f64,
    pub amplitude: f64,
    pub refractive_index: f64,
    pub waist_location: f64,
    pub divergence: f64,
}

impl GaussianBeam {
    /// Far-field beam radius at axial position `z` under the linear
    /// propagation model `w(z) = tan(divergence) * (z - waist_location)`.
    pub fn radius_at(&self, z: f64) -> f64 {
        self.divergence.tan() * (z - self.waist_location)
    }

    /// Waist radius from the far-field relation
    /// `divergence = wavelength / (pi * n * w0)`.
    pub fn waist_radius(&self) -> f64 {
        self.wavelength / (PI * self.refractive_index * self.divergence.tan())
    }

    /// Rayleigh range `pi * n * w0^2 / wavelength`.
    pub fn rayleigh_range(&self) -> f64 {
        let w0 = self.waist_radius();
        PI * self.refractive_index * w0 * w0 / self.wavelength
    }
}

/// Caller-supplied optics constants with conventional defaults.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OpticsConfig {
    pub amplitude: f64,
    pub refractive_index: f64,
}

impl Default for OpticsConfig {
    fn default() -> Self {
        Self {
            amplitude: 1.0,
            refractive_index: 1.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{GaussianBeam, OpticsConfig};

    fn beam(divergence: f64, waist_location: f64) -> GaussianBeam {
        GaussianBeam {
            wavelength: 632.8e-9,
            amplitude: 1.0,
            refractive_index: 1.0,
            waist_location,
            divergence,
        }
    }

    #[test]
    fn radius_grows_linearly_from_waist() {
        let b = beam(0.01, 2.0);
        assert!(b.radius_at(2.0).abs() < 1e-12);

        let slope = 0.01f64.tan();
        assert!((b.radius_at(3.0) - slope).abs() < 1e-12);
        assert!((b.radius_at(7.0) - 5.0 * slope).abs() < 1e-12);
        assert!((b.radius_at(1.0) + slope).abs() < 1e-12);
    }

    #[test]
    fn waist_radius_and_rayleigh_range_are_consistent() {
        let b = beam(1e-3, 0.0);
        let w0 = b.waist_radius();
        let zr = b.rayleigh_range();

        // theta = lambda / (pi n w0) must invert back.
        let theta = b.wavelength / (core::f64::consts::PI * b.refractive_index * w0);
        assert!((theta - b.divergence.tan()).abs() < 1e-15);
        assert!((zr - w0 / b.divergence.tan()).abs() / zr < 1e-9);
    }

    #[test]
    fn optics_defaults_are_unity() {
        let optics = OpticsConfig::default();
        assert_eq!(optics.amplitude, 1.0);
        assert_eq!(optics.refractive_index, 1.0);
    }
}
