// Copyright @yucwang 2026

use crate::math::constants::{Float, Vector2f, Vector3f, PI};

fn clamp01(v: Float) -> Float {
    if v < 0.0 {
        0.0
    } else if v > 1.0 {
        1.0
    } else {
        v
    }
}

pub fn ggx_d(cos_theta: Float, alpha: Float) -> Float {
    if cos_theta <= 0.0 {
        return 0.0;
    }
    let a = alpha.max(1e-4);
    let a2 = a * a;
    let cos2 = cos_theta * cos_theta;
    let denom = cos2 * (a2 - 1.0) + 1.0;
    a2 / (PI * denom * denom)
}

pub fn ggx_g1(cos_theta: Float, alpha: Float) -> Float {
    if cos_theta <= 0.0 {
        return 0.0;
    }
    let a = alpha.max(1e-4);
    let cos2 = cos_theta * cos_theta;
    let sin2 = (1.0 - cos2).max(0.0);
    if sin2 <= 0.0 {
        return 1.0;
    }
    let tan2 = sin2 / cos2.max(1e-6);
    let root = (1.0 + a * a * tan2).sqrt();
    2.0 / (1.0 + root)
}

pub fn ggx_g(cos_i: Float, cos_o: Float, alpha: Float) -> Float {
    ggx_g1(cos_i.abs(), alpha) * ggx_g1(cos_o.abs(), alpha)
}

pub fn pdf_ggx_vndf(wo: &Vector3f, m: &Vector3f, alpha: Float) -> Float {
    if wo.z <= 0.0 || m.z <= 0.0 {
        return 0.0;
    }
    let d = ggx_d(m.z, alpha);
    let g1 = ggx_g1(wo.z, alpha);
    let dot = wo.dot(m).abs();
    if wo.z.abs() <= 1e-6 {
        return 0.0;
    }
    d * g1 * dot / wo.z.abs()
}

pub fn sample_ggx_vndf(wo: &Vector3f, u: &Vector2f, alpha: Float) -> Vector3f {
    let a = alpha.max(1e-4);
    let wo = Vector3f::new(a * wo.x, a * wo.y, wo.z).normalize();

    let mut t1 = Vector3f::new(1.0, 0.0, 0.0);
    if wo.z < 0.9999 {
        t1 = Vector3f::new(0.0, 0.0, 1.0).cross(&wo).normalize();
    }
    let t2 = wo.cross(&t1);

    let u1 = clamp01(u.x);
    let u2 = clamp01(u.y);
    let r = u1.sqrt();
    let phi = 2.0 * PI * u2;
    let t1p = r * phi.cos();
    let mut t2p = r * phi.sin();
    let s = 0.5 * (1.0 + wo.z);
    t2p = (1.0 - s) * (1.0 - t1p * t1p).max(0.0).sqrt() + s * t2p;

    let nh = t1 * t1p + t2 * t2p + wo * (1.0 - t1p * t1p - t2p * t2p).max(0.0).sqrt();
    Vector3f::new(a * nh.x, a * nh.y, nh.z.max(0.0)).normalize()
}

pub fn reflect(wo: &Vector3f, m: &Vector3f) -> Vector3f {
    2.0 * wo.dot(m) * m - wo
}

/// Snell refraction of `wo` about the micro normal `m`, with
/// `eta = eta_i / eta_t`. Returns `None` on total internal reflection.
pub fn refract(wo: &Vector3f, m: &Vector3f, eta: Float) -> Option<Vector3f> {
    let cos_i = wo.dot(m).max(-1.0).min(1.0);
    let sin2_i = (1.0 - cos_i * cos_i).max(0.0);
    let sin2_t = eta * eta * sin2_i;
    if sin2_t >= 1.0 {
        return None;
    }
    let cos_t = (1.0 - sin2_t).sqrt();
    let wt = -eta * wo + (eta * cos_i - cos_t) * m;
    Some(wt.normalize())
}

/// Unpolarized dielectric Fresnel reflectance. Beyond the critical
/// angle this returns exactly 1.0, which together with `refract`
/// returning `None` makes total internal reflection lossless.
pub fn fresnel_dielectric(cos_i: Float, eta_i: Float, eta_t: Float) -> Float {
    let mut cos_i = cos_i.max(-1.0).min(1.0);
    let entering = cos_i > 0.0;
    let (eta_i, eta_t) = if entering { (eta_i, eta_t) } else { (eta_t, eta_i) };
    cos_i = cos_i.abs();

    let sin2_i = (1.0 - cos_i * cos_i).max(0.0);
    let eta = eta_i / eta_t;
    let sin2_t = eta * eta * sin2_i;
    if sin2_t >= 1.0 {
        return 1.0;
    }
    let cos_t = (1.0 - sin2_t).sqrt();
    let r_parl = (eta_t * cos_i - eta_i * cos_t) / (eta_t * cos_i + eta_i * cos_t);
    let r_perp = (eta_i * cos_i - eta_t * cos_t) / (eta_i * cos_i + eta_t * cos_t);
    0.5 * (r_parl * r_parl + r_perp * r_perp)
}

/// Schlick approximation for a scalar spectral reflectance at normal
/// incidence. Hero-wavelength transport carries one spectral value, so
/// the conductor Fresnel term is scalar here.
pub fn fresnel_schlick(f0: Float, cos_theta: Float) -> Float {
    let cos_theta = clamp01(cos_theta);
    let one_minus = (1.0 - cos_theta).powi(5);
    f0 + (1.0 - f0) * one_minus
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::rng::LcgRng;

    #[test]
    fn test_fresnel_normal_incidence() {
        // ((n - 1) / (n + 1))^2 at normal incidence for n = 1.5.
        let f = fresnel_dielectric(1.0, 1.0, 1.5);
        assert!((f - 0.04).abs() < 1e-3);
    }

    #[test]
    fn test_fresnel_total_internal_reflection_is_exact() {
        // From glass to air beyond the critical angle (~41.8 deg).
        let cos_i = -(60.0f32.to_radians().cos());
        let f = fresnel_dielectric(cos_i, 1.0, 1.5);
        assert_eq!(f, 1.0);

        let m = Vector3f::new(0.0, 0.0, 1.0);
        let sin_i = (1.0 - cos_i * cos_i).sqrt();
        let wo = Vector3f::new(sin_i, 0.0, cos_i.abs());
        assert!(refract(&wo, &m, 1.5).is_none());
    }

    #[test]
    fn test_refract_obeys_snells_law() {
        let m = Vector3f::new(0.0, 0.0, 1.0);
        let theta_i = 30.0f32.to_radians();
        let wo = Vector3f::new(theta_i.sin(), 0.0, theta_i.cos());
        let eta = 1.0 / 1.5;

        let wt = refract(&wo, &m, eta).expect("no TIR expected");
        let sin_t = (wt.x * wt.x + wt.y * wt.y).sqrt();
        assert!((sin_t - eta * theta_i.sin()).abs() < 1e-5);
        assert!(wt.z < 0.0);
    }

    #[test]
    fn test_reflect_mirrors_about_normal() {
        let m = Vector3f::new(0.0, 0.0, 1.0);
        let wo = Vector3f::new(0.6, 0.0, 0.8);
        let r = reflect(&wo, &m);
        assert!((r - Vector3f::new(-0.6, 0.0, 0.8)).norm() < 1e-6);
    }

    #[test]
    fn test_vndf_samples_stay_above_surface() {
        let mut rng = LcgRng::new(21);
        let wo = Vector3f::new(0.3, -0.2, 0.9).normalize();
        for _ in 0..500 {
            let u = Vector2f::new(rng.next_f32(), rng.next_f32());
            let m = sample_ggx_vndf(&wo, &u, 0.3);
            assert!(m.z >= 0.0);
            assert!((m.norm() - 1.0).abs() < 1e-4);
            assert!(pdf_ggx_vndf(&wo, &m, 0.3) >= 0.0);
        }
    }

    #[test]
    fn test_schlick_endpoints() {
        assert!((fresnel_schlick(0.04, 1.0) - 0.04).abs() < 1e-6);
        assert!((fresnel_schlick(0.04, 0.0) - 1.0).abs() < 1e-6);
    }
}
