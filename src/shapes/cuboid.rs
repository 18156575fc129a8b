// Copyright @yucwang 2026

use crate::core::interaction::SurfaceIntersection;
use crate::core::shape::Shape;
use crate::math::aabb::AABB;
use crate::math::constants::{Float, Vector2f, Vector3f, FLOAT_MAX, FLOAT_MIN};
use crate::math::ray::Ray3f;

/// Axis-aligned box, intersected through the slab test of its bounds.
pub struct Cuboid {
    bounds: AABB,
}

impl Cuboid {
    pub fn new(p_min: Vector3f, p_max: Vector3f) -> Self {
        Self { bounds: AABB::new(p_min, p_max) }
    }

    fn face_normal_and_uv(&self, p: &Vector3f) -> (Vector3f, Vector2f) {
        let center = self.bounds.center();
        let half = 0.5 * self.bounds.diagonal();
        // The face is the axis where the hit point sits closest to the
        // box surface, relative to the box extents.
        let mut axis = 0;
        let mut best = 0.0;
        let mut rel = Vector3f::zeros();
        for idx in 0..3 {
            rel[idx] = (p[idx] - center[idx]) / half[idx].max(1e-8);
            if rel[idx].abs() > best {
                best = rel[idx].abs();
                axis = idx;
            }
        }

        let mut normal = Vector3f::zeros();
        normal[axis] = rel[axis].signum();
        let (ua, va) = match axis {
            0 => (1, 2),
            1 => (0, 2),
            _ => (0, 1),
        };
        let uv = Vector2f::new(
            0.5 * (rel[ua] + 1.0),
            0.5 * (rel[va] + 1.0),
        );
        (normal, uv)
    }
}

impl Shape for Cuboid {
    fn ray_intersection(&self, ray: &Ray3f) -> Option<SurfaceIntersection> {
        // Probe the slabs over an unbounded interval, then pick the
        // first root inside the ray's own interval. A ray starting
        // inside the box takes the exit face.
        let probe = Ray3f::new(ray.origin(), ray.dir(), Some(FLOAT_MIN), Some(FLOAT_MAX));
        let (t_enter, t_exit) = self.bounds.ray_intersect_range(&probe)?;

        let t = if ray.test_segment(t_enter) {
            t_enter
        } else if ray.test_segment(t_exit) {
            t_exit
        } else {
            return None;
        };

        let p = ray.at(t);
        let (normal, uv) = self.face_normal_and_uv(&p);
        Some(SurfaceIntersection::new(p, normal, normal, uv, t))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_box() -> Cuboid {
        Cuboid::new(Vector3f::new(-1.0, -1.0, -1.0), Vector3f::new(1.0, 1.0, 1.0))
    }

    #[test]
    fn test_cuboid_hit_from_outside() {
        let cuboid = unit_box();
        let ray = Ray3f::new(Vector3f::new(0.0, 0.0, -5.0), Vector3f::new(0.0, 0.0, 1.0), None, None);

        let hit = cuboid.ray_intersection(&ray).expect("expected hit");
        assert!((hit.t() - 4.0).abs() < 1e-4);
        assert!((hit.geo_normal() - Vector3f::new(0.0, 0.0, -1.0)).norm() < 1e-4);
    }

    #[test]
    fn test_cuboid_hit_from_inside_takes_exit_face() {
        let cuboid = unit_box();
        let ray = Ray3f::new(Vector3f::zeros(), Vector3f::new(1.0, 0.0, 0.0), None, None);

        let hit = cuboid.ray_intersection(&ray).expect("expected hit");
        assert!((hit.t() - 1.0).abs() < 1e-4);
        // Outward normal of the +x face.
        assert!((hit.geo_normal() - Vector3f::new(1.0, 0.0, 0.0)).norm() < 1e-4);
    }

    #[test]
    fn test_cuboid_miss() {
        let cuboid = unit_box();
        let ray = Ray3f::new(Vector3f::new(0.0, 5.0, -5.0), Vector3f::new(0.0, 0.0, 1.0), None, None);
        assert!(cuboid.ray_intersection(&ray).is_none());
    }

    #[test]
    fn test_cuboid_respects_ray_interval() {
        let cuboid = unit_box();
        let short = Ray3f::new(
            Vector3f::new(0.0, 0.0, -5.0),
            Vector3f::new(0.0, 0.0, 1.0),
            None,
            Some(2.0),
        );
        assert!(cuboid.ray_intersection(&short).is_none());
    }
}
