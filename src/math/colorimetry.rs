// Copyright @yucwang 2026

use super::constants::{Float, Vector3f};
use super::spectrum::SpectralSample;

/// Visible-range domain for all wavelength sampling, in nanometers.
/// Wavelengths outside this range are never produced by the samplers
/// below.
pub const LAMBDA_MIN: Float = 380.0;
pub const LAMBDA_MAX: Float = 730.0;
pub const LAMBDA_SPAN: Float = LAMBDA_MAX - LAMBDA_MIN;

/// Integral of the CIE 1931 luminous-efficiency curve over the visible
/// range, used to normalize XYZ so a unit flat spectrum maps to Y = 1.
pub const CIE_Y_INTEGRAL: Float = 106.857;

// Multi-lobe Gaussian fits of the CIE 1931 standard observer
// (Wyman/Sloan/Shirley piecewise fits). Each lobe uses a different
// sigma on either side of its peak.
fn gauss_lobe(lambda: Float, mu: Float, sigma_l: Float, sigma_r: Float) -> Float {
    let sigma = if lambda < mu { sigma_l } else { sigma_r };
    let x = (lambda - mu) / sigma;
    (-0.5 * x * x).exp()
}

pub fn cie_x(lambda: Float) -> Float {
    1.056 * gauss_lobe(lambda, 599.8, 37.9, 31.0)
        + 0.362 * gauss_lobe(lambda, 442.0, 16.0, 26.7)
        - 0.065 * gauss_lobe(lambda, 501.1, 20.4, 26.2)
}

pub fn cie_y(lambda: Float) -> Float {
    0.821 * gauss_lobe(lambda, 568.8, 46.9, 40.5)
        + 0.286 * gauss_lobe(lambda, 530.9, 16.3, 31.1)
}

pub fn cie_z(lambda: Float) -> Float {
    1.217 * gauss_lobe(lambda, 437.0, 11.8, 36.0)
        + 0.681 * gauss_lobe(lambda, 459.0, 26.0, 13.8)
}

/// Tristimulus weights for a single wavelength. The fit can undershoot
/// zero by a hair near the x-bar trough, so weights are clamped to stay
/// non-negative.
pub fn wavelength_to_xyz(lambda: Float) -> Vector3f {
    Vector3f::new(
        cie_x(lambda).max(0.0),
        cie_y(lambda).max(0.0),
        cie_z(lambda).max(0.0),
    )
}

/// CIE XYZ to linear sRGB primaries (D65).
pub fn xyz_to_linear_rgb(xyz: Vector3f) -> Vector3f {
    let r = 3.240479 * xyz[0] - 1.537150 * xyz[1] - 0.498535 * xyz[2];
    let g = -0.969256 * xyz[0] + 1.875991 * xyz[1] + 0.041556 * xyz[2];
    let b = 0.055648 * xyz[0] - 0.204043 * xyz[1] + 1.057311 * xyz[2];
    Vector3f::new(r, g, b)
}

/// Out-of-gamut components are clamped, never wrapped.
pub fn gamut_clamp(rgb: Vector3f) -> Vector3f {
    Vector3f::new(rgb[0].max(0.0), rgb[1].max(0.0), rgb[2].max(0.0))
}

/// Convert one path's spectral sample into its linear RGB contribution.
/// The sample's radiance is already divided by the wavelength pdf, so
/// averaging these contributions estimates the spectral integral.
pub fn spectral_sample_to_rgb(sample: &SpectralSample) -> Vector3f {
    let xyz = wavelength_to_xyz(sample.lambda) * (sample.radiance / CIE_Y_INTEGRAL);
    xyz_to_linear_rgb(xyz)
}

/// Linear value to 8-bit sRGB with the standard transfer function.
pub fn linear_to_srgb_u8(v: Float) -> u8 {
    let v = v.max(0.0).min(1.0);
    let encoded = if v <= 0.0031308 {
        12.92 * v
    } else {
        1.055 * v.powf(1.0 / 2.4) - 0.055
    };
    (encoded * 255.0 + 0.5) as u8
}

pub fn sample_wavelength_uniform(u: Float) -> (Float, Float) {
    let u = u.max(0.0).min(1.0);
    let lambda = LAMBDA_MIN + u * LAMBDA_SPAN;
    (lambda, 1.0 / LAMBDA_SPAN)
}

// Importance proposal peaked at the luminous-efficiency maximum,
// pdf(lambda) proportional to sech^2(SECH_SLOPE * (lambda - SECH_PEAK)),
// renormalized to the [LAMBDA_MIN, LAMBDA_MAX] domain so the density is
// strictly positive everywhere wavelengths can be drawn.
const SECH_SLOPE: Float = 0.0072;
const SECH_PEAK: Float = 538.0;

fn sech_cdf_bounds() -> (Float, Float) {
    let t0 = (SECH_SLOPE * (LAMBDA_MIN - SECH_PEAK)).tanh();
    let t1 = (SECH_SLOPE * (LAMBDA_MAX - SECH_PEAK)).tanh();
    (t0, t1)
}

pub fn sample_wavelength_importance(u: Float) -> (Float, Float) {
    let u = u.max(0.0).min(1.0);
    let (t0, t1) = sech_cdf_bounds();
    let x = t0 + u * (t1 - t0);
    let lambda = (SECH_PEAK + x.atanh() / SECH_SLOPE)
        .max(LAMBDA_MIN)
        .min(LAMBDA_MAX);
    (lambda, wavelength_pdf_importance(lambda))
}

pub fn wavelength_pdf_importance(lambda: Float) -> Float {
    let (t0, t1) = sech_cdf_bounds();
    let cosh = (SECH_SLOPE * (lambda - SECH_PEAK)).cosh();
    SECH_SLOPE / ((t1 - t0) * cosh * cosh)
}
