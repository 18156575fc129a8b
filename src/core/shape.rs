// Copyright @yucwang 2023

use crate::core::interaction::SurfaceIntersection;
use crate::math::ray::Ray3f;

/// The intersector boundary: a shape answers the nearest hit inside the
/// ray's `[min_t, max_t]` interval, or reports a miss. Implementations
/// hold no mutable state, so the scene can be queried from any number
/// of worker threads at once.
pub trait Shape: Send + Sync {
    fn ray_intersection(&self, ray: &Ray3f) -> Option<SurfaceIntersection>;
}
