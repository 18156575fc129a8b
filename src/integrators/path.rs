// Copyright @yucwang 2026

use crate::core::bsdf::sample_material;
use crate::core::config::{RenderSettings, WavelengthStrategy};
use crate::core::integrator::{Integrator, PathState, RenderStats};
use crate::core::rng::LcgRng;
use crate::core::scene::Scene;
use crate::core::sensor::Sensor;
use crate::core::tangent_frame::{build_tangent_frame, local_to_world, world_to_local};
use crate::math::colorimetry::{sample_wavelength_importance, sample_wavelength_uniform};
use crate::math::constants::{Float, Vector2f};
use crate::math::ray::Ray3f;
use crate::math::spectrum::SpectralSample;

// Roulette survival probability is capped so even high-throughput paths
// keep a nonzero chance of dying once roulette is active.
const RR_SURVIVAL_CAP: Float = 0.95;

/// Unidirectional hero-wavelength path tracer. One wavelength is drawn
/// per camera path and stays fixed for the path's whole lifetime; the
/// final radiance estimate is divided by the wavelength-sampling pdf.
pub struct SpectralPathIntegrator {
    settings: RenderSettings,
}

impl SpectralPathIntegrator {
    pub fn new(settings: RenderSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &RenderSettings {
        &self.settings
    }

    fn sample_wavelength(&self, u: Float) -> (Float, Float) {
        match self.settings.wavelength_strategy {
            WavelengthStrategy::Uniform => sample_wavelength_uniform(u),
            WavelengthStrategy::Importance => sample_wavelength_importance(u),
        }
    }
}

impl Integrator for SpectralPathIntegrator {
    fn trace_ray_forward(
        &self,
        scene: &Scene,
        sensor: &dyn Sensor,
        pixel: Vector2f,
        rng: &mut LcgRng,
        path: &mut PathState,
        stats: &mut RenderStats,
    ) -> SpectralSample {
        let (width, height) = sensor.resolution();
        let u = Vector2f::new(
            (pixel.x + rng.next_f32()) / (width as Float),
            (pixel.y + rng.next_f32()) / (height as Float),
        );
        let ray = sensor.sample_ray(&u);
        let (lambda, lambda_pdf) = self.sample_wavelength(rng.next_f32());

        path.reset(ray, lambda, lambda_pdf);
        stats.camera_paths += 1;

        loop {
            if path.bounce >= self.settings.max_bounces {
                stats.bounce_cap_hits += 1;
                break;
            }

            let hit = match scene.ray_intersection(&path.ray) {
                Some(hit) => hit,
                None => break,
            };
            let object_index = match hit.object_index() {
                Some(idx) => idx,
                None => break,
            };

            let le = scene.emission(object_index);
            if !le.is_black() {
                path.radiance += path.throughput * le.eval_at(path.lambda);
            }

            let n = hit.sh_normal();
            debug_assert!((n.norm() - 1.0).abs() < 1e-3);
            let (tangent, bitangent) = build_tangent_frame(&n);
            let wo_world = -path.ray.dir();
            let wo = world_to_local(&wo_world, &tangent, &bitangent, &n);

            let material = scene.material(object_index);
            let sample =
                match sample_material(material, wo, path.lambda, rng.next_2d(), rng.next_2d()) {
                    Some(sample) => sample,
                    None => break,
                };
            if !sample.weight.is_finite() || sample.weight < 0.0 {
                stats.rejected_non_finite += 1;
                break;
            }

            stats.scatter_events += 1;
            path.throughput *= sample.weight;
            path.bounce += 1;
            if path.bounce > stats.longest_path {
                stats.longest_path = path.bounce;
            }

            // A dead path does no further intersection tests.
            if path.throughput <= 0.0 {
                break;
            }

            let wi_world = local_to_world(&sample.wi, &tangent, &bitangent, &n);
            path.ray = Ray3f::spawn(hit.p(), wi_world, hit.geo_normal());

            if path.bounce > self.settings.rr_start_bounce {
                let q = path.throughput.min(RR_SURVIVAL_CAP);
                if rng.next_f32() >= q {
                    stats.roulette_terminated += 1;
                    break;
                }
                // Survivors are compensated so the estimate stays unbiased.
                path.throughput /= q;
            }
        }

        let radiance = path.radiance / path.lambda_pdf;
        if !radiance.is_finite() {
            stats.rejected_non_finite += 1;
            return SpectralSample::zero(path.lambda);
        }
        SpectralSample::new(path.lambda, radiance)
    }

    fn samples_per_pixel(&self) -> u32 {
        self.settings.samples_per_pixel
    }
}
