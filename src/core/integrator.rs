// Copyright @yucwang 2026

use crate::core::rng::LcgRng;
use crate::core::scene::Scene;
use crate::core::sensor::Sensor;
use crate::math::constants::{Float, Vector2f};
use crate::math::ray::Ray3f;
use crate::math::spectrum::SpectralSample;

/// All per-path mutable state. Each worker owns one of these and resets
/// it between paths, so the hot loop allocates nothing.
pub struct PathState {
    pub ray: Ray3f,
    pub lambda: Float,
    pub lambda_pdf: Float,
    pub throughput: Float,
    pub bounce: u32,
    pub radiance: Float,
}

impl Default for PathState {
    fn default() -> Self {
        Self {
            ray: Ray3f::new(
                crate::math::constants::Vector3f::zeros(),
                crate::math::constants::Vector3f::new(0.0, 0.0, 1.0),
                None,
                None,
            ),
            lambda: 0.0,
            lambda_pdf: 1.0,
            throughput: 1.0,
            bounce: 0,
            radiance: 0.0,
        }
    }
}

impl PathState {
    pub fn reset(&mut self, ray: Ray3f, lambda: Float, lambda_pdf: Float) {
        self.ray = ray;
        self.lambda = lambda;
        self.lambda_pdf = lambda_pdf;
        self.throughput = 1.0;
        self.bounce = 0;
        self.radiance = 0.0;
    }
}

/// Diagnostic counters. Numerical degeneracies are recovered silently
/// during tracing but stay countable here; workers keep their own copy
/// and the renderer folds them together at the end.
#[derive(Debug, Clone, Copy, Default)]
pub struct RenderStats {
    pub camera_paths: u64,
    pub scatter_events: u64,
    pub rejected_non_finite: u64,
    pub roulette_terminated: u64,
    pub bounce_cap_hits: u64,
    pub longest_path: u32,
}

impl RenderStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn to_short_debug_string(&self) -> String {
        let paths = self.camera_paths.max(1) as Float;
        format!(
            "Bounces/Path: [{:.2} avg, {} max] Terminations: [{:.2}% roulette, {:.2}% bounce cap] Rejected: {}",
            (self.scatter_events as Float) / paths,
            self.longest_path,
            100.0 * (self.roulette_terminated as Float) / paths,
            100.0 * (self.bounce_cap_hits as Float) / paths,
            self.rejected_non_finite,
        )
    }
}

impl std::ops::Add for RenderStats {
    type Output = RenderStats;

    fn add(self, rhs: RenderStats) -> Self::Output {
        RenderStats {
            camera_paths: self.camera_paths + rhs.camera_paths,
            scatter_events: self.scatter_events + rhs.scatter_events,
            rejected_non_finite: self.rejected_non_finite + rhs.rejected_non_finite,
            roulette_terminated: self.roulette_terminated + rhs.roulette_terminated,
            bounce_cap_hits: self.bounce_cap_hits + rhs.bounce_cap_hits,
            longest_path: self.longest_path.max(rhs.longest_path),
        }
    }
}

impl std::ops::AddAssign for RenderStats {
    fn add_assign(&mut self, rhs: RenderStats) {
        *self = *self + rhs;
    }
}

pub trait Integrator: Sync {
    /// Trace one complete path for the given pixel and return its
    /// spectral sample, radiance already divided by the wavelength pdf.
    fn trace_ray_forward(
        &self,
        scene: &Scene,
        sensor: &dyn Sensor,
        pixel: Vector2f,
        rng: &mut LcgRng,
        path: &mut PathState,
        stats: &mut RenderStats,
    ) -> SpectralSample;

    fn samples_per_pixel(&self) -> u32;
}
