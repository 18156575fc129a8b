// Copyright 2020 @TwoCookingMice

use super::constants::{EPSILON, Float, Vector3f};

pub struct Ray3f {
    origin: Vector3f,
    dir: Vector3f,
    pub min_t: Float,
    pub max_t: Float
}

impl Ray3f {
    pub fn new(o: Vector3f, d: Vector3f,
               min_t: Option<Float>, max_t: Option<Float>) -> Self {
        Self { origin: o, dir: d.normalize(),
               min_t: min_t.unwrap_or(0.0),
               max_t: max_t.unwrap_or(std::f32::MAX)}
    }

    // Spawn a continuation ray from a surface point, nudged along the
    // geometric normal so the new ray cannot re-hit the surface it left.
    // The offset side follows the outgoing direction, which handles
    // transmission through the surface as well as reflection off it.
    pub fn spawn(p: Vector3f, d: Vector3f, geo_normal: Vector3f) -> Self {
        let side = if d.dot(&geo_normal) >= 0.0 { 1.0 } else { -1.0 };
        Self::new(p + geo_normal * (side * EPSILON), d, Some(EPSILON), None)
    }

    pub fn origin(&self) -> Vector3f {
        self.origin
    }

    pub fn dir(&self) -> Vector3f {
        self.dir
    }

    pub fn at(&self, t: Float) -> Vector3f {
        self.origin + self.dir * t
    }

    pub fn update(&mut self, t: Float) -> bool {
        if t < self.min_t || t > self.max_t {
            false
        } else {
            self.max_t = t;
            true
        }
    }

    pub fn test_segment(&self, t: Float) -> bool {
        t >= self.min_t && t <= self.max_t
    }
}

/* Tests for Ray */

#[cfg(test)]
mod tests {
    use super::Ray3f;
    use super::Vector3f;

    #[test]
    fn test_ray3f() {
        let o = Vector3f::new(0.0, 0.0, 0.0);
        let d = Vector3f::new(1.0, 0.0, 1.0);
        let mut ray = Ray3f::new(o, d, None, None);
        assert_eq!(o, ray.origin());

        let v1 = ray.at(2.0);
        assert!((v1[0] - std::f32::consts::SQRT_2).abs() < 1e-5);
        assert!((v1[1] - 0.0).abs() < 1e-5);
        assert!((v1[2] - std::f32::consts::SQRT_2).abs() < 1e-5);

        let status1 = ray.update(100.0);
        let status2 = ray.update(105.0);
        assert_eq!(status1, true);
        assert_eq!(status2, false);
    }

    #[test]
    fn test_ray3f_spawn_offsets_against_surface() {
        let p = Vector3f::new(0.0, 0.0, 0.0);
        let n = Vector3f::new(0.0, 0.0, 1.0);

        let reflected = Ray3f::spawn(p, Vector3f::new(1.0, 0.0, 1.0), n);
        assert!(reflected.origin().z > 0.0);

        let transmitted = Ray3f::spawn(p, Vector3f::new(1.0, 0.0, -1.0), n);
        assert!(transmitted.origin().z < 0.0);
    }
}
