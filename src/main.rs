// Copyright @yucwang 2026

use macaron::core::config::{RenderSettings, WavelengthStrategy};
use macaron::integrators::path::SpectralPathIntegrator;
use macaron::io::{exr_utils, png_utils};
use macaron::renderers::tile::{Renderer, TileRenderer};
use macaron::scenes;

use std::env;

fn main() {
    env::set_var("RUST_LOG", "info");
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 3 {
        eprintln!(
            "Usage: {} <scene> <output.exr|output.png> [--width N] [--height N] [--spp N] [--max-depth N] [--rr-start N] [--wavelengths uniform|importance] [--seed N] [--camera N]",
            args[0]
        );
        eprintln!("Scenes: {}", scenes::scene_names().join(", "));
        std::process::exit(1);
    }

    let scene_name = &args[1];
    let output_path = &args[2];
    let mut width: usize = 512;
    let mut height: usize = 512;
    let mut settings = RenderSettings::default();
    let mut seed: u64 = 0;
    let mut camera_id: usize = 0;

    let mut i = 3;
    while i < args.len() {
        match args[i].as_str() {
            "--width" => {
                i += 1;
                width = args.get(i).and_then(|v| v.parse::<usize>().ok()).unwrap_or(width);
            }
            "--height" => {
                i += 1;
                height = args.get(i).and_then(|v| v.parse::<usize>().ok()).unwrap_or(height);
            }
            "--spp" => {
                i += 1;
                if let Some(v) = args.get(i).and_then(|v| v.parse::<u32>().ok()) {
                    settings.samples_per_pixel = v;
                }
            }
            "--max-depth" => {
                i += 1;
                if let Some(v) = args.get(i).and_then(|v| v.parse::<u32>().ok()) {
                    settings.max_bounces = v;
                }
            }
            "--rr-start" => {
                i += 1;
                if let Some(v) = args.get(i).and_then(|v| v.parse::<u32>().ok()) {
                    settings.rr_start_bounce = v;
                }
            }
            "--wavelengths" => {
                i += 1;
                match args.get(i).and_then(|v| WavelengthStrategy::parse(v)) {
                    Some(strategy) => settings.wavelength_strategy = strategy,
                    None => {
                        eprintln!("unknown wavelength strategy, expected uniform|importance");
                        std::process::exit(1);
                    }
                }
            }
            "--seed" => {
                i += 1;
                seed = args.get(i).and_then(|v| v.parse::<u64>().ok()).unwrap_or(0);
            }
            "--camera" => {
                i += 1;
                camera_id = args.get(i).and_then(|v| v.parse::<usize>().ok()).unwrap_or(0);
            }
            other => {
                eprintln!("unknown option: {}", other);
                std::process::exit(1);
            }
        }
        i += 1;
    }

    // Configuration problems are surfaced here, before any tracing.
    if let Err(e) = settings.validate() {
        eprintln!("{}", e);
        std::process::exit(1);
    }
    let scene = match scenes::by_name(scene_name, width, height) {
        Some(scene) => scene,
        None => {
            eprintln!(
                "unknown scene '{}', expected one of: {}",
                scene_name,
                scenes::scene_names().join(", ")
            );
            std::process::exit(1);
        }
    };
    if let Err(e) = scene.validate() {
        eprintln!("{}", e);
        std::process::exit(1);
    }

    let integrator = Box::new(SpectralPathIntegrator::new(settings));
    let renderer = TileRenderer::new(integrator, camera_id, seed);
    let film = renderer.render(&scene);
    let image = film.develop();

    if output_path.ends_with(".png") {
        png_utils::write_png_to_file(&image, output_path);
    } else {
        exr_utils::write_exr_to_file(&image, output_path);
    }
}
