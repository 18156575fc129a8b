// Copyright @yucwang 2026

use crate::core::interaction::SurfaceIntersection;
use crate::core::shape::Shape;
use crate::math::constants::{Float, Vector2f, Vector3f, INV_PI, PI};
use crate::math::ray::Ray3f;

pub struct Sphere {
    center: Vector3f,
    radius: Float,
}

impl Sphere {
    pub fn new(center: Vector3f, radius: Float) -> Self {
        Self { center, radius }
    }

    fn make_intersection(&self, ray: &Ray3f, t: Float) -> SurfaceIntersection {
        let p = ray.at(t);
        let n = (p - self.center) / self.radius;
        // Spherical parameterization for uv.
        let theta = n.z.max(-1.0).min(1.0).acos();
        let mut phi = n.y.atan2(n.x);
        if phi < 0.0 {
            phi += 2.0 * PI;
        }
        let uv = Vector2f::new(phi * 0.5 * INV_PI, theta * INV_PI);
        SurfaceIntersection::new(p, n, n, uv, t)
    }
}

impl Shape for Sphere {
    fn ray_intersection(&self, ray: &Ray3f) -> Option<SurfaceIntersection> {
        let oc = ray.origin() - self.center;
        let half_b = oc.dot(&ray.dir());
        let c = oc.norm_squared() - self.radius * self.radius;

        let discriminant = half_b * half_b - c;
        if discriminant <= 0.0 {
            return None;
        }
        let sqrt_d = discriminant.sqrt();

        // Near root first, far root when the origin is inside.
        let t = -half_b - sqrt_d;
        if ray.test_segment(t) {
            return Some(self.make_intersection(ray, t));
        }
        let t = -half_b + sqrt_d;
        if ray.test_segment(t) {
            return Some(self.make_intersection(ray, t));
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sphere_hit_from_outside() {
        let sphere = Sphere::new(Vector3f::new(0.0, 0.0, 5.0), 1.0);
        let ray = Ray3f::new(Vector3f::zeros(), Vector3f::new(0.0, 0.0, 1.0), None, None);

        let hit = sphere.ray_intersection(&ray).expect("expected hit");
        assert!((hit.t() - 4.0).abs() < 1e-4);
        // Outward unit normal facing the ray origin.
        assert!((hit.geo_normal() - Vector3f::new(0.0, 0.0, -1.0)).norm() < 1e-4);
        assert!((hit.geo_normal().norm() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_sphere_hit_from_inside_uses_far_root() {
        let sphere = Sphere::new(Vector3f::zeros(), 2.0);
        let ray = Ray3f::new(Vector3f::zeros(), Vector3f::new(1.0, 0.0, 0.0), None, None);

        let hit = sphere.ray_intersection(&ray).expect("expected hit");
        assert!((hit.t() - 2.0).abs() < 1e-4);
        assert!((hit.geo_normal() - Vector3f::new(1.0, 0.0, 0.0)).norm() < 1e-4);
    }

    #[test]
    fn test_sphere_miss() {
        let sphere = Sphere::new(Vector3f::new(0.0, 5.0, 0.0), 1.0);
        let ray = Ray3f::new(Vector3f::zeros(), Vector3f::new(1.0, 0.0, 0.0), None, None);
        assert!(sphere.ray_intersection(&ray).is_none());
    }

    #[test]
    fn test_sphere_respects_ray_interval() {
        let sphere = Sphere::new(Vector3f::new(0.0, 0.0, 5.0), 1.0);
        let short = Ray3f::new(Vector3f::zeros(), Vector3f::new(0.0, 0.0, 1.0), None, Some(3.0));
        assert!(sphere.ray_intersection(&short).is_none());
    }
}
