// Copyright @yucwang 2026

use crate::core::film::{Film, FilmTile};
use crate::core::integrator::{Integrator, PathState, RenderStats};
use crate::core::rng::LcgRng;
use crate::core::scene::Scene;
use crate::math::constants::{Float, Vector2f};
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{mpsc, Arc};
use std::thread;

pub use super::renderer::Renderer;

const TILE_SIZE: usize = 32;

/// Worker threads pull tile indices from a shared counter, render their
/// tiles to completion and ship them to a single collector thread that
/// owns the film. Pixels are partitioned by tile, so no two workers
/// ever touch the same pixel accumulator.
pub struct TileRenderer {
    integrator: Box<dyn Integrator>,
    camera_id: usize,
    seed: u64,
    stop: Arc<AtomicBool>,
}

impl TileRenderer {
    pub fn new(integrator: Box<dyn Integrator>, camera_id: usize, seed: u64) -> Self {
        Self {
            integrator,
            camera_id,
            seed,
            stop: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Handle for cooperative cancellation. Setting the flag makes
    /// every worker finish the path it is tracing, ship its partially
    /// filled tile and stop; no partial sample is ever counted.
    pub fn stop_handle(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.stop)
    }

    fn pixel_seed(&self, x: usize, y: usize) -> u64 {
        ((self.seed & 0xFFF) << 32)
            | (((y as u64) & 0xFFFF) << 16)
            | ((x as u64) & 0xFFFF)
    }
}

impl Renderer for TileRenderer {
    fn render(&self, scene: &Scene) -> Film {
        let sensor = match scene.camera(self.camera_id) {
            Some(sensor) => sensor,
            None => return Film::new(0, 0),
        };
        let (width, height) = sensor.resolution();
        if width == 0 || height == 0 {
            return Film::new(0, 0);
        }

        let spp = match self.integrator.samples_per_pixel() {
            0 => 1,
            v => v,
        };
        let tiles_x = (width + TILE_SIZE - 1) / TILE_SIZE;
        let tiles_y = (height + TILE_SIZE - 1) / TILE_SIZE;
        let total_tiles = tiles_x * tiles_y;
        let integrator_ref: &dyn Integrator = self.integrator.as_ref();

        let thread_count = thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1);
        log::info!(
            "Rendering {}x{} at {} spp on {} threads ({} tiles).",
            width, height, spp, thread_count, total_tiles
        );

        let progress = ProgressBar::new(total_tiles as u64);
        progress.set_style(
            ProgressStyle::with_template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} tiles")
                .unwrap_or_else(|_| ProgressStyle::default_bar()),
        );

        let next_tile = Arc::new(AtomicUsize::new(0));
        let (tx, rx) = mpsc::channel::<(FilmTile, RenderStats)>();
        let mut film = Film::new(width, height);
        let mut total_stats = RenderStats::new();

        thread::scope(|scope| {
            for _ in 0..thread_count {
                let next_tile = Arc::clone(&next_tile);
                let stop = Arc::clone(&self.stop);
                let tx = tx.clone();
                scope.spawn(move || {
                    let mut path = PathState::default();
                    loop {
                        if stop.load(Ordering::Relaxed) {
                            break;
                        }
                        let tile_index = next_tile.fetch_add(1, Ordering::Relaxed);
                        if tile_index >= total_tiles {
                            break;
                        }

                        let tx0 = (tile_index % tiles_x) * TILE_SIZE;
                        let ty0 = (tile_index / tiles_x) * TILE_SIZE;
                        let tx1 = (tx0 + TILE_SIZE).min(width);
                        let ty1 = (ty0 + TILE_SIZE).min(height);

                        let mut tile = FilmTile::new(tx0, ty0, tx1, ty1);
                        let mut stats = RenderStats::new();
                        'pixels: for y in ty0..ty1 {
                            for x in tx0..tx1 {
                                let pixel = Vector2f::new(x as Float, y as Float);
                                let mut rng = LcgRng::new(self.pixel_seed(x, y));
                                for _sample in 0..spp {
                                    if stop.load(Ordering::Relaxed) {
                                        break 'pixels;
                                    }
                                    let sample = integrator_ref.trace_ray_forward(
                                        scene, sensor, pixel, &mut rng, &mut path, &mut stats,
                                    );
                                    tile.add_sample(x, y, &sample);
                                }
                            }
                        }
                        if tx.send((tile, stats)).is_err() {
                            break;
                        }
                    }
                });
            }

            drop(tx);
            while let Ok((tile, stats)) = rx.recv() {
                film.merge_tile(&tile);
                total_stats += stats;
                progress.inc(1);
            }
        });
        progress.finish_and_clear();

        if self.stop.load(Ordering::Relaxed) {
            log::warn!("Render cancelled after {} samples.", film.total_samples());
        }
        log::info!("Render stats: {}", total_stats.to_short_debug_string());
        film
    }
}
