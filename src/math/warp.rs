// Copyright @yucwang 2023

use super::constants::{ INV_PI, PI, Float, Vector2f, Vector3f };

pub fn sample_uniform_disk_concentric(u: &Vector2f) -> Vector2f {
    let r1: Float = 2.0 * u.x - 1.0;
    let r2: Float = 2.0 * u.y - 1.0;

    let phi: Float;
    let r:   Float;

    if r1 == 0. && r2 == 0. {
        r = 0.0;
        phi = 0.0;
    } else if r1 * r1 > r2 * r2 {
        r = r1;
        phi = (PI / 4.0) * (r2 / r1);
    } else {
        r = r2;
        phi = (PI / 2.0) - (r1 / r2) * (PI / 4.0);
    }

    let (sin_phi, cos_phi) = phi.sin_cos();

    Vector2f::new(r * cos_phi, r * sin_phi)
}

pub fn sample_cosine_hemisphere(u: &Vector2f) -> Vector3f {
    let p = sample_uniform_disk_concentric(&u);
    let z = (1. - p.x * p.x - p.y * p.y).max(0.0).sqrt();

    Vector3f::new(p.x, p.y, z)
}

pub fn sample_cosine_hemisphere_pdf(cos_theta: Float) -> Float {
    cos_theta * INV_PI
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::rng::LcgRng;

    #[test]
    fn test_disk_samples_stay_in_unit_disk() {
        let mut rng = LcgRng::new(3);
        for _ in 0..1000 {
            let u = Vector2f::new(rng.next_f32(), rng.next_f32());
            let p = sample_uniform_disk_concentric(&u);
            assert!(p.x * p.x + p.y * p.y <= 1.0 + 1e-5);
        }
    }

    #[test]
    fn test_cosine_hemisphere_upper_and_unit() {
        let mut rng = LcgRng::new(5);
        for _ in 0..1000 {
            let u = Vector2f::new(rng.next_f32(), rng.next_f32());
            let d = sample_cosine_hemisphere(&u);
            assert!(d.z >= 0.0);
            assert!((d.norm() - 1.0).abs() < 1e-4);
            assert!(sample_cosine_hemisphere_pdf(d.z) >= 0.0);
        }
    }

    #[test]
    fn test_cosine_hemisphere_mean_direction() {
        // The cosine-weighted mean of z is 2/3.
        let mut rng = LcgRng::new(9);
        let n = 20_000;
        let mut mean_z = 0.0f64;
        for _ in 0..n {
            let u = Vector2f::new(rng.next_f32(), rng.next_f32());
            mean_z += sample_cosine_hemisphere(&u).z as f64;
        }
        mean_z /= n as f64;
        assert!((mean_z - 2.0 / 3.0).abs() < 0.01);
    }
}
