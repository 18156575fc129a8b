// Copyright @yucwang 2023

use crate::math::constants::{ Float, Vector2f, Vector3f };

/// One surface hit, valid for a single bounce. Shapes fill in the
/// geometric fields; the scene attaches the owning object's index,
/// through which the integrator resolves material and emission.
pub struct SurfaceIntersection {
    p: Vector3f,
    geo_normal: Vector3f,
    sh_normal: Vector3f,
    uv: Vector2f,
    t: Float,
    object_index: Option<usize>,
}

impl SurfaceIntersection {
    pub fn new(p: Vector3f,
               geo_normal: Vector3f,
               sh_normal: Vector3f,
               uv: Vector2f,
               t: Float) -> Self {
        Self { p, geo_normal, sh_normal, uv, t, object_index: None }
    }

    pub fn p(&self) -> Vector3f {
        self.p
    }

    pub fn geo_normal(&self) -> Vector3f {
        self.geo_normal
    }

    pub fn sh_normal(&self) -> Vector3f {
        self.sh_normal
    }

    pub fn uv(&self) -> Vector2f {
        self.uv
    }

    pub fn t(&self) -> Float {
        self.t
    }

    pub fn object_index(&self) -> Option<usize> {
        self.object_index
    }

    pub fn with_object_index(mut self, object_index: usize) -> Self {
        self.object_index = Some(object_index);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_object_index_attachment() {
        let n = Vector3f::new(0.0, 0.0, 1.0);
        let hit = SurfaceIntersection::new(
            Vector3f::zeros(), n, n, Vector2f::new(0.0, 0.0), 2.0);
        assert!(hit.object_index().is_none());

        let hit = hit.with_object_index(3);
        assert_eq!(hit.object_index(), Some(3));
        assert_eq!(hit.t(), 2.0);
    }
}
