// Copyright @yucwang 2026

use crate::core::config::ConfigError;
use crate::core::interaction::SurfaceIntersection;
use crate::core::material::Material;
use crate::core::sensor::Sensor;
use crate::core::shape::Shape;
use crate::math::ray::Ray3f;
use crate::math::spectrum::RGBSpectrum;

pub struct SceneObject {
    pub shape: Box<dyn Shape>,
    pub material: Material,
    pub emission: RGBSpectrum,
    pub name: Option<String>,
}

impl SceneObject {
    pub fn new(shape: Box<dyn Shape>, material: Material) -> Self {
        Self { shape, material, emission: RGBSpectrum::black(), name: None }
    }

    pub fn with_emission(shape: Box<dyn Shape>, material: Material, emission: RGBSpectrum) -> Self {
        Self { shape, material, emission, name: None }
    }

    pub fn with_name(mut self, name: &str) -> Self {
        self.name = Some(name.to_string());
        self
    }
}

/// The tracing side sees the scene as an immutable nearest-hit
/// intersector plus material/emission lookups by object handle; nothing
/// here mutates during a render, so workers share it freely.
pub struct Scene {
    objects: Vec<SceneObject>,
    sensors: Vec<Box<dyn Sensor>>,
}

impl Scene {
    pub fn new() -> Self {
        Self { objects: Vec::new(), sensors: Vec::new() }
    }

    pub fn add_object(&mut self, object: SceneObject) {
        self.objects.push(object);
    }

    pub fn add_sensor(&mut self, sensor: Box<dyn Sensor>) {
        self.sensors.push(sensor);
    }

    pub fn objects(&self) -> &Vec<SceneObject> {
        &self.objects
    }

    pub fn camera(&self, camera_id: usize) -> Option<&dyn Sensor> {
        self.sensors.get(camera_id).map(|s| s.as_ref())
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn material(&self, object_index: usize) -> &Material {
        &self.objects[object_index].material
    }

    pub fn emission(&self, object_index: usize) -> &RGBSpectrum {
        &self.objects[object_index].emission
    }

    /// Nearest hit over all objects, shrinking the search interval as
    /// closer hits are found.
    pub fn ray_intersection(&self, ray: &Ray3f) -> Option<SurfaceIntersection> {
        let mut query = Ray3f::new(ray.origin(), ray.dir(), Some(ray.min_t), Some(ray.max_t));
        let mut closest: Option<SurfaceIntersection> = None;

        for (idx, object) in self.objects.iter().enumerate() {
            if let Some(hit) = object.shape.ray_intersection(&query) {
                query.update(hit.t());
                closest = Some(hit.with_object_index(idx));
            }
        }

        closest
    }

    /// Reject non-physical configurations once, before tracing starts.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.sensors.is_empty() {
            return Err(ConfigError::InvalidScene("scene has no camera".to_string()));
        }
        for (idx, object) in self.objects.iter().enumerate() {
            let name = match &object.name {
                Some(name) => name.clone(),
                None => format!("object #{}", idx),
            };
            object.material.validate(&name)?;
            if !object.emission.is_finite()
                || object.emission.r() < 0.0
                || object.emission.g() < 0.0
                || object.emission.b() < 0.0
            {
                return Err(ConfigError::InvalidScene(format!(
                    "{}: emission must be finite and non-negative",
                    name
                )));
            }
        }
        Ok(())
    }
}
