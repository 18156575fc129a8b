// Copyright @yucwang 2021

use crate::core::film::Film;
use crate::core::scene::Scene;

/// A renderer fills a film. The caller owns develop() and the image
/// write, so the accumulator stays read-only to the outside.
pub trait Renderer {
    fn render(&self, scene: &Scene) -> Film;
}
