// Copyright @yucwang 2026

use crate::core::config::ConfigError;
use crate::math::colorimetry::{LAMBDA_MAX, LAMBDA_MIN};
use crate::math::constants::Float;
use crate::math::spectrum::RGBSpectrum;

/// Wavelength dependence of a dielectric's index of refraction.
/// Wavelengths are given in nanometers; the coefficient conventions use
/// micrometers, as published.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Dispersion {
    Constant { n: Float },
    /// n(lambda) = a + b / lambda^2, b in um^2.
    Cauchy { a: Float, b: Float },
    /// n^2(lambda) = 1 + sum_i b_i * lambda^2 / (lambda^2 - c_i), c_i in um^2.
    Sellmeier { b: [Float; 3], c: [Float; 3] },
}

impl Dispersion {
    pub fn refractive_index(&self, lambda_nm: Float) -> Float {
        let um = lambda_nm * 1e-3;
        let um2 = um * um;
        match self {
            Dispersion::Constant { n } => *n,
            Dispersion::Cauchy { a, b } => a + b / um2,
            Dispersion::Sellmeier { b, c } => {
                let mut n2 = 1.0;
                for idx in 0..3 {
                    n2 += b[idx] * um2 / (um2 - c[idx]);
                }
                n2.max(0.0).sqrt()
            }
        }
    }

    /// Borosilicate crown glass, Cauchy form.
    pub fn crown_glass() -> Self {
        Dispersion::Cauchy { a: 1.5046, b: 0.00420 }
    }

    /// Dense flint glass; the strong dispersion makes rainbow
    /// separation clearly visible.
    pub fn dense_flint() -> Self {
        Dispersion::Cauchy { a: 1.7280, b: 0.01342 }
    }

    /// Schott BK7, Sellmeier form.
    pub fn bk7() -> Self {
        Dispersion::Sellmeier {
            b: [1.03961212, 0.231792344, 1.01046945],
            c: [0.00600069867, 0.0200179144, 103.560653],
        }
    }

    fn validate(&self, name: &str) -> Result<(), ConfigError> {
        let probes = [LAMBDA_MIN, 0.5 * (LAMBDA_MIN + LAMBDA_MAX), LAMBDA_MAX];
        for lambda in probes.iter() {
            let n = self.refractive_index(*lambda);
            if !n.is_finite() || n <= 0.0 {
                return Err(ConfigError::InvalidMaterial(format!(
                    "{}: refractive index {} at {} nm is not physical",
                    name, n, lambda
                )));
            }
        }
        if let Dispersion::Sellmeier { c, .. } = self {
            // A resonance inside the visible band blows up the formula.
            let band_min_um2 = (LAMBDA_MIN * 1e-3) * (LAMBDA_MIN * 1e-3);
            let band_max_um2 = (LAMBDA_MAX * 1e-3) * (LAMBDA_MAX * 1e-3);
            for ci in c.iter() {
                if *ci >= band_min_um2 && *ci <= band_max_um2 {
                    return Err(ConfigError::InvalidMaterial(format!(
                        "{}: Sellmeier resonance {} um^2 lies inside the visible band",
                        name, ci
                    )));
                }
            }
        }
        Ok(())
    }
}

/// The closed set of surface models. Dispatch happens through a single
/// sampling function rather than trait objects; the payloads carry
/// everything that function needs.
#[derive(Debug, Clone, PartialEq)]
pub enum Material {
    Diffuse {
        reflectance: RGBSpectrum,
    },
    Dielectric {
        dispersion: Dispersion,
        roughness: Float,
        reflectance: RGBSpectrum,
        transmittance: RGBSpectrum,
    },
    Conductor {
        reflectance: RGBSpectrum,
        roughness: Float,
    },
}

impl Material {
    pub fn diffuse(reflectance: RGBSpectrum) -> Self {
        Material::Diffuse { reflectance }
    }

    pub fn glass(dispersion: Dispersion) -> Self {
        Material::Dielectric {
            dispersion,
            roughness: 0.0,
            reflectance: RGBSpectrum::white(),
            transmittance: RGBSpectrum::white(),
        }
    }

    pub fn rough_glass(dispersion: Dispersion, roughness: Float) -> Self {
        Material::Dielectric {
            dispersion,
            roughness,
            reflectance: RGBSpectrum::white(),
            transmittance: RGBSpectrum::white(),
        }
    }

    pub fn mirror(reflectance: RGBSpectrum) -> Self {
        Material::Conductor { reflectance, roughness: 0.0 }
    }

    pub fn metal(reflectance: RGBSpectrum, roughness: Float) -> Self {
        Material::Conductor { reflectance, roughness }
    }

    /// Reject non-physical descriptors before tracing starts.
    pub fn validate(&self, name: &str) -> Result<(), ConfigError> {
        let check_coefficients = |coeffs: &RGBSpectrum, what: &str| -> Result<(), ConfigError> {
            if !coeffs.is_finite() || coeffs.r() < 0.0 || coeffs.g() < 0.0 || coeffs.b() < 0.0 {
                return Err(ConfigError::InvalidMaterial(format!(
                    "{}: {} coefficients must be finite and non-negative",
                    name, what
                )));
            }
            Ok(())
        };
        let check_roughness = |roughness: Float| -> Result<(), ConfigError> {
            if !roughness.is_finite() || roughness < 0.0 {
                return Err(ConfigError::InvalidMaterial(format!(
                    "{}: roughness {} must be finite and non-negative",
                    name, roughness
                )));
            }
            Ok(())
        };

        match self {
            Material::Diffuse { reflectance } => {
                check_coefficients(reflectance, "reflectance")?;
            }
            Material::Dielectric { dispersion, roughness, reflectance, transmittance } => {
                dispersion.validate(name)?;
                check_roughness(*roughness)?;
                check_coefficients(reflectance, "reflectance")?;
                check_coefficients(transmittance, "transmittance")?;
            }
            Material::Conductor { reflectance, roughness } => {
                check_roughness(*roughness)?;
                check_coefficients(reflectance, "reflectance")?;
            }
        }
        Ok(())
    }
}
