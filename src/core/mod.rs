// Copyright @yucwang 2021

pub mod bsdf;
pub mod config;
pub mod film;
pub mod integrator;
pub mod interaction;
pub mod material;
pub mod rng;
pub mod scene;
pub mod sensor;
pub mod shape;
pub mod tangent_frame;
