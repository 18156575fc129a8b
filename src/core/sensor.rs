// Copyright @yucwang 2026

use crate::math::constants::Vector2f;
use crate::math::ray::Ray3f;

/// Camera contract. `u` is the film-plane coordinate in [0, 1]^2 with
/// sub-pixel jitter already applied by the caller, so `sample_ray` is a
/// pure function of its inputs.
pub trait Sensor: Send + Sync {
    fn sample_ray(&self, u: &Vector2f) -> Ray3f;
    fn resolution(&self) -> (usize, usize);
    fn describe(&self) -> String {
        String::from("Sensor")
    }
}
