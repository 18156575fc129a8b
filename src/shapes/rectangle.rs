// Copyright @yucwang 2026

use crate::core::interaction::SurfaceIntersection;
use crate::core::shape::Shape;
use crate::math::constants::{Float, Vector2f, Vector3f};
use crate::math::ray::Ray3f;

/// Planar parallelogram given by a corner point and two edge vectors.
pub struct Rectangle {
    corner: Vector3f,
    edge_u: Vector3f,
    edge_v: Vector3f,
    normal: Vector3f,
    inv_len2_u: Float,
    inv_len2_v: Float,
}

impl Rectangle {
    pub fn new(corner: Vector3f, edge_u: Vector3f, edge_v: Vector3f) -> Self {
        let normal = edge_u.cross(&edge_v).normalize();
        Self {
            corner,
            edge_u,
            edge_v,
            normal,
            inv_len2_u: 1.0 / edge_u.norm_squared(),
            inv_len2_v: 1.0 / edge_v.norm_squared(),
        }
    }

    fn intersect_plane(&self, ray: &Ray3f) -> Option<(Float, Vector2f)> {
        let denom = ray.dir().dot(&self.normal);
        if denom.abs() < 1e-8 {
            return None;
        }

        let t = (self.corner - ray.origin()).dot(&self.normal) / denom;
        if !ray.test_segment(t) {
            return None;
        }

        let local = ray.at(t) - self.corner;
        let a = local.dot(&self.edge_u) * self.inv_len2_u;
        let b = local.dot(&self.edge_v) * self.inv_len2_v;
        if a < 0.0 || a > 1.0 || b < 0.0 || b > 1.0 {
            return None;
        }

        Some((t, Vector2f::new(a, b)))
    }
}

impl Shape for Rectangle {
    fn ray_intersection(&self, ray: &Ray3f) -> Option<SurfaceIntersection> {
        let (t, uv) = self.intersect_plane(ray)?;
        Some(SurfaceIntersection::new(ray.at(t), self.normal, self.normal, uv, t))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_rect() -> Rectangle {
        Rectangle::new(
            Vector3f::new(-1.0, -1.0, 0.0),
            Vector3f::new(2.0, 0.0, 0.0),
            Vector3f::new(0.0, 2.0, 0.0),
        )
    }

    #[test]
    fn test_rectangle_center_hit() {
        let rect = unit_rect();
        let ray = Ray3f::new(Vector3f::new(0.0, 0.0, -3.0), Vector3f::new(0.0, 0.0, 1.0), None, None);

        let hit = rect.ray_intersection(&ray).expect("expected hit");
        assert!((hit.t() - 3.0).abs() < 1e-4);
        assert!((hit.uv() - Vector2f::new(0.5, 0.5)).norm() < 1e-4);
        assert!((hit.geo_normal().norm() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_rectangle_miss_outside_edges() {
        let rect = unit_rect();
        let ray = Ray3f::new(Vector3f::new(1.5, 0.0, -3.0), Vector3f::new(0.0, 0.0, 1.0), None, None);
        assert!(rect.ray_intersection(&ray).is_none());
    }

    #[test]
    fn test_rectangle_parallel_ray_misses() {
        let rect = unit_rect();
        let ray = Ray3f::new(Vector3f::new(0.0, 0.0, 1.0), Vector3f::new(1.0, 0.0, 0.0), None, None);
        assert!(rect.ray_intersection(&ray).is_none());
    }

    #[test]
    fn test_rectangle_uv_orientation() {
        let rect = unit_rect();
        let ray = Ray3f::new(
            Vector3f::new(-0.5, 0.5, -1.0),
            Vector3f::new(0.0, 0.0, 1.0),
            None,
            None,
        );
        let hit = rect.ray_intersection(&ray).expect("expected hit");
        assert!((hit.uv() - Vector2f::new(0.25, 0.75)).norm() < 1e-4);
    }
}
