// Copyright @yucwang 2026

use crate::core::material::Material;
use crate::math::constants::{Float, Vector2f, Vector3f};
use crate::materials::microfacet::{
    fresnel_dielectric, fresnel_schlick, ggx_d, ggx_g, pdf_ggx_vndf, reflect, refract,
    sample_ggx_vndf,
};

/// Below this roughness a dielectric or conductor is treated as a
/// perfect specular interface.
const ROUGHNESS_CUTOFF: Float = 1e-3;

/// One sampled scattering event in the local shading frame (+z along
/// the shading normal). `weight` is the BSDF value times |cos theta|
/// divided by `pdf`, with the probability of the chosen
/// reflect/refract branch already folded in, so the integrator
/// multiplies it straight into the path throughput.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct BsdfSample {
    pub wi: Vector3f,
    pub weight: Float,
    pub pdf: Float,
}

// Every sample that leaves this module satisfies pdf > 0 whenever its
// weight is nonzero; degenerate candidates are rejected instead.
fn checked(wi: Vector3f, weight: Float, pdf: Float) -> Option<BsdfSample> {
    if pdf > 1e-6 && pdf.is_finite() && weight.is_finite() && weight >= 0.0 {
        Some(BsdfSample { wi, weight, pdf })
    } else {
        None
    }
}

/// Sample an outgoing direction for the given material at a single
/// wavelength. `wo` points toward the previous path vertex in the local
/// frame. Returns `None` when the candidate is rejected (grazing
/// configuration, degenerate pdf), which the integrator treats as path
/// termination.
pub fn sample_material(
    material: &Material,
    wo: Vector3f,
    lambda: Float,
    u1: Vector2f,
    u2: Vector2f,
) -> Option<BsdfSample> {
    match material {
        Material::Diffuse { reflectance } => {
            sample_diffuse(reflectance.eval_at(lambda), wo, u1)
        }
        Material::Dielectric { dispersion, roughness, reflectance, transmittance } => {
            let n = dispersion.refractive_index(lambda);
            let refl = reflectance.eval_at(lambda);
            let trans = transmittance.eval_at(lambda);
            if *roughness < ROUGHNESS_CUTOFF {
                sample_smooth_dielectric(n, refl, trans, wo, u2)
            } else {
                sample_rough_dielectric(n, *roughness, refl, trans, wo, u1, u2)
            }
        }
        Material::Conductor { reflectance, roughness } => {
            let f0 = reflectance.eval_at(lambda);
            if *roughness < ROUGHNESS_CUTOFF {
                sample_smooth_conductor(f0, wo)
            } else {
                sample_rough_conductor(f0, *roughness, wo, u1)
            }
        }
    }
}

fn sample_diffuse(albedo: Float, wo: Vector3f, u1: Vector2f) -> Option<BsdfSample> {
    // Two-sided: shade in the hemisphere the viewer is in.
    let flip = wo.z < 0.0;
    let wo_l = if flip { -wo } else { wo };
    if wo_l.z <= 1e-6 {
        return None;
    }

    let wi_l = crate::math::warp::sample_cosine_hemisphere(&u1);
    let pdf = crate::math::warp::sample_cosine_hemisphere_pdf(wi_l.z);
    // f * cos / pdf = (albedo / pi) * cos / (cos / pi) = albedo
    let wi = if flip { -wi_l } else { wi_l };
    checked(wi, albedo, pdf)
}

fn sample_smooth_conductor(f0: Float, wo: Vector3f) -> Option<BsdfSample> {
    let flip = wo.z < 0.0;
    let wo_l = if flip { -wo } else { wo };
    if wo_l.z <= 1e-6 {
        return None;
    }

    let wi_l = Vector3f::new(-wo_l.x, -wo_l.y, wo_l.z);
    let weight = fresnel_schlick(f0, wo_l.z);
    let wi = if flip { -wi_l } else { wi_l };
    checked(wi, weight, 1.0)
}

fn sample_rough_conductor(
    f0: Float,
    roughness: Float,
    wo: Vector3f,
    u1: Vector2f,
) -> Option<BsdfSample> {
    let flip = wo.z < 0.0;
    let wo_l = if flip { -wo } else { wo };
    if wo_l.z <= 1e-6 {
        return None;
    }

    let alpha = roughness.max(1e-4);
    let m = sample_ggx_vndf(&wo_l, &u1, alpha);
    let cos_om = wo_l.dot(&m);
    if cos_om <= 0.0 {
        return None;
    }

    let wi_l = reflect(&wo_l, &m);
    if wi_l.z <= 1e-6 {
        return None;
    }

    let pdf_m = pdf_ggx_vndf(&wo_l, &m, alpha);
    let pdf = pdf_m / (4.0 * cos_om.abs());
    if pdf <= 1e-6 {
        return None;
    }

    let d = ggx_d(m.z, alpha);
    let g = ggx_g(wo_l.z, wi_l.z, alpha);
    let f = fresnel_schlick(f0, cos_om);
    let f_val = f * d * g / (4.0 * wo_l.z * wi_l.z);
    let weight = f_val * wi_l.z / pdf;

    let wi = if flip { -wi_l } else { wi_l };
    checked(wi, weight, pdf)
}

fn sample_smooth_dielectric(
    n: Float,
    refl: Float,
    trans: Float,
    wo: Vector3f,
    u2: Vector2f,
) -> Option<BsdfSample> {
    if wo.z.abs() <= 1e-6 {
        return None;
    }

    let entering = wo.z > 0.0;
    let f = fresnel_dielectric(wo.z, 1.0, n);

    if u2.x < f {
        let wi = Vector3f::new(-wo.x, -wo.y, wo.z);
        return checked(wi, refl, f);
    }

    let (eta_i, eta_t) = if entering { (1.0, n) } else { (n, 1.0) };
    let nl = Vector3f::new(0.0, 0.0, if entering { 1.0 } else { -1.0 });
    match refract(&wo, &nl, eta_i / eta_t) {
        None => {
            // Total internal reflection: transmittance is exactly zero
            // and the interface reflects losslessly.
            let wi = Vector3f::new(-wo.x, -wo.y, wo.z);
            checked(wi, refl, 1.0)
        }
        Some(wt) => {
            // The (eta_i/eta_t)^2 factor accounts for radiance
            // compression across the index change.
            let eta_scale = (eta_i / eta_t) * (eta_i / eta_t);
            checked(wt, trans * eta_scale, 1.0 - f)
        }
    }
}

fn sample_rough_dielectric(
    n: Float,
    roughness: Float,
    refl: Float,
    trans: Float,
    wo: Vector3f,
    u1: Vector2f,
    u2: Vector2f,
) -> Option<BsdfSample> {
    let flip = wo.z < 0.0;
    let wo_l = if flip { -wo } else { wo };
    if wo_l.z <= 1e-6 {
        return None;
    }

    let (eta_i, eta_t) = if !flip { (1.0, n) } else { (n, 1.0) };
    let alpha = roughness.max(1e-4);
    let m = sample_ggx_vndf(&wo_l, &u1, alpha);
    let cos_om = wo_l.dot(&m);
    if cos_om <= 0.0 {
        return None;
    }

    let f = fresnel_dielectric(cos_om, eta_i, eta_t);
    let pdf_m = pdf_ggx_vndf(&wo_l, &m, alpha);

    if u2.x < f {
        let wi_l = reflect(&wo_l, &m);
        if wi_l.z <= 1e-6 {
            return None;
        }
        let pdf = f * pdf_m / (4.0 * wi_l.dot(&m).abs());
        if pdf <= 1e-6 {
            return None;
        }
        let d = ggx_d(m.z, alpha);
        let g = ggx_g(wo_l.z, wi_l.z, alpha);
        let f_val = f * d * g / (4.0 * wo_l.z * wi_l.z);
        let weight = refl * f_val * wi_l.z / pdf;
        let wi = if flip { -wi_l } else { wi_l };
        return checked(wi, weight, pdf);
    }

    match refract(&wo_l, &m, eta_i / eta_t) {
        None => {
            // TIR through the sampled facet; the full branch reflects.
            let wi_l = reflect(&wo_l, &m);
            if wi_l.z <= 1e-6 {
                return None;
            }
            let pdf = pdf_m / (4.0 * wi_l.dot(&m).abs());
            if pdf <= 1e-6 {
                return None;
            }
            let d = ggx_d(m.z, alpha);
            let g = ggx_g(wo_l.z, wi_l.z, alpha);
            let f_val = d * g / (4.0 * wo_l.z * wi_l.z);
            let weight = refl * f_val * wi_l.z / pdf;
            let wi = if flip { -wi_l } else { wi_l };
            checked(wi, weight, pdf)
        }
        Some(wi_l) => {
            if wi_l.z >= -1e-6 || wi_l.dot(&m) >= 0.0 {
                return None;
            }
            let cos_im = wi_l.dot(&m);
            let eta_ti = eta_t / eta_i;
            let denom = cos_om + eta_ti * cos_im;
            if denom.abs() <= 1e-6 {
                return None;
            }
            let pdf = (1.0 - f) * pdf_m * (eta_ti * eta_ti) * cos_im.abs() / (denom * denom);
            if pdf <= 1e-6 {
                return None;
            }
            let d = ggx_d(m.z, alpha);
            let g = ggx_g(wo_l.z, wi_l.z, alpha);
            let scale = 1.0 / (eta_ti * eta_ti);
            let numer = (1.0 - f) * d * g * (eta_ti * eta_ti) * cos_om * cos_im;
            let f_val = scale * (numer / (wo_l.z * denom * denom)).abs();
            let weight = trans * f_val * wi_l.z.abs() / pdf;
            let wi = if flip { -wi_l } else { wi_l };
            checked(wi, weight, pdf)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::material::Dispersion;
    use crate::core::rng::LcgRng;
    use crate::math::spectrum::RGBSpectrum;

    fn angle_between(a: &Vector3f, b: &Vector3f) -> Float {
        a.dot(b).max(-1.0).min(1.0).acos()
    }

    #[test]
    fn test_diffuse_weight_is_albedo() {
        let material = Material::diffuse(RGBSpectrum::grey(0.5));
        let wo = Vector3f::new(0.0, 0.0, 1.0);
        let sample = sample_material(
            &material, wo, 550.0,
            Vector2f::new(0.3, 0.7), Vector2f::new(0.0, 0.0),
        ).expect("diffuse sample");

        assert!((sample.weight - 0.5).abs() < 1e-5);
        assert!(sample.wi.z > 0.0);
        assert!(sample.pdf > 0.0);
    }

    #[test]
    fn test_diffuse_two_sided() {
        let material = Material::diffuse(RGBSpectrum::grey(0.5));
        let wo = Vector3f::new(0.1, 0.0, -1.0).normalize();
        let sample = sample_material(
            &material, wo, 550.0,
            Vector2f::new(0.3, 0.7), Vector2f::new(0.0, 0.0),
        ).expect("diffuse sample");

        // Scattered into the viewer's hemisphere.
        assert!(sample.wi.z < 0.0);
    }

    #[test]
    fn test_smooth_conductor_mirrors() {
        let material = Material::mirror(RGBSpectrum::white());
        let wo = Vector3f::new(0.6, 0.0, 0.8);
        let sample = sample_material(
            &material, wo, 550.0,
            Vector2f::new(0.5, 0.5), Vector2f::new(0.5, 0.5),
        ).expect("mirror sample");

        assert!((sample.wi - Vector3f::new(-0.6, 0.0, 0.8)).norm() < 1e-5);
        assert_eq!(sample.pdf, 1.0);
        assert!(sample.weight > 0.99 && sample.weight <= 1.0);
    }

    #[test]
    fn test_smooth_dielectric_reflection_branch() {
        let material = Material::glass(Dispersion::Constant { n: 1.5 });
        let wo = Vector3f::new(0.6, 0.0, 0.8);
        // u2.x below any sensible Fresnel value forces reflection.
        let sample = sample_material(
            &material, wo, 550.0,
            Vector2f::new(0.5, 0.5), Vector2f::new(0.0, 0.0),
        ).expect("reflection sample");

        assert!((sample.wi - Vector3f::new(-0.6, 0.0, 0.8)).norm() < 1e-5);
        assert!(sample.pdf > 0.0 && sample.pdf < 1.0);
    }

    #[test]
    fn test_smooth_dielectric_refraction_obeys_snell() {
        let material = Material::glass(Dispersion::Constant { n: 1.5 });
        let theta_i = 40.0f32.to_radians();
        let wo = Vector3f::new(theta_i.sin(), 0.0, theta_i.cos());
        // u2.x near one forces the transmission branch.
        let sample = sample_material(
            &material, wo, 550.0,
            Vector2f::new(0.5, 0.5), Vector2f::new(0.999, 0.0),
        ).expect("refraction sample");

        assert!(sample.wi.z < 0.0);
        let sin_t = (sample.wi.x * sample.wi.x + sample.wi.y * sample.wi.y).sqrt();
        assert!((sin_t - theta_i.sin() / 1.5).abs() < 1e-4);
    }

    #[test]
    fn test_total_internal_reflection_is_lossless() {
        let material = Material::glass(Dispersion::Constant { n: 1.5 });
        // Inside the glass, incident at 60 degrees: beyond critical.
        let theta_i = 60.0f32.to_radians();
        let wo = Vector3f::new(theta_i.sin(), 0.0, -theta_i.cos());
        let sample = sample_material(
            &material, wo, 550.0,
            Vector2f::new(0.5, 0.5), Vector2f::new(0.42, 0.0),
        ).expect("TIR sample");

        assert!((sample.weight - 1.0).abs() < 1e-5);
        assert!(sample.wi.z < 0.0);
        assert!((sample.wi.x - (-theta_i.sin())).abs() < 1e-5);
    }

    #[test]
    fn test_dispersion_separates_wavelengths() {
        // The refracted directions for 400 nm and 700 nm must diverge,
        // and more strongly for a larger Cauchy B coefficient.
        let separation = |b: Float| -> Float {
            let material = Material::glass(Dispersion::Cauchy { a: 1.5, b });
            let theta_i = 45.0f32.to_radians();
            let wo = Vector3f::new(theta_i.sin(), 0.0, theta_i.cos());
            let force_refract = Vector2f::new(0.999, 0.0);
            let blue = sample_material(
                &material, wo, 400.0, Vector2f::new(0.5, 0.5), force_refract,
            ).expect("blue refraction");
            let red = sample_material(
                &material, wo, 700.0, Vector2f::new(0.5, 0.5), force_refract,
            ).expect("red refraction");
            angle_between(&blue.wi, &red.wi)
        };

        let weak = separation(0.005);
        let strong = separation(0.02);
        assert!(weak > 0.0);
        assert!(strong > weak);
    }

    #[test]
    fn test_samples_never_pair_nonzero_weight_with_zero_pdf() {
        let materials = [
            Material::diffuse(RGBSpectrum::new(0.8, 0.4, 0.2)),
            Material::glass(Dispersion::crown_glass()),
            Material::rough_glass(Dispersion::crown_glass(), 0.2),
            Material::mirror(RGBSpectrum::grey(0.9)),
            Material::metal(RGBSpectrum::new(0.9, 0.7, 0.4), 0.3),
        ];
        let mut rng = LcgRng::new(77);
        for material in materials.iter() {
            for _ in 0..2000 {
                let z: Float = 2.0 * rng.next_f32() - 1.0;
                let phi = 2.0 * crate::math::constants::PI * rng.next_f32();
                let r = (1.0 - z * z).max(0.0).sqrt();
                let wo = Vector3f::new(r * phi.cos(), r * phi.sin(), z);
                if wo.z.abs() < 1e-3 {
                    continue;
                }
                let lambda = 380.0 + 350.0 * rng.next_f32();
                if let Some(sample) = sample_material(
                    material, wo, lambda, rng.next_2d(), rng.next_2d(),
                ) {
                    assert!(sample.pdf > 0.0);
                    assert!(sample.weight.is_finite());
                    assert!(sample.weight >= 0.0);
                    assert!((sample.wi.norm() - 1.0).abs() < 1e-3);
                }
            }
        }
    }
}
