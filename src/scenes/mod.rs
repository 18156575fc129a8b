// Copyright @yucwang 2026

use crate::core::material::{Dispersion, Material};
use crate::core::scene::{Scene, SceneObject};
use crate::math::constants::{Float, Vector3f};
use crate::math::spectrum::RGBSpectrum;
use crate::sensors::perspective::PerspectiveCamera;
use crate::shapes::cuboid::Cuboid;
use crate::shapes::rectangle::Rectangle;
use crate::shapes::sphere::Sphere;

pub fn by_name(name: &str, width: usize, height: usize) -> Option<Scene> {
    match name {
        "cornell" => Some(cornell(width, height)),
        "prism" => Some(prism(width, height)),
        "furnace" => Some(furnace(width, height)),
        "mirror-box" => Some(mirror_box(width, height)),
        _ => None,
    }
}

pub fn scene_names() -> &'static [&'static str] {
    &["cornell", "prism", "furnace", "mirror-box"]
}

/// The Cornell box with a dispersive glass sphere over the short block
/// and a rough metal sphere, the caustics-plus-dispersion showcase.
pub fn cornell(width: usize, height: usize) -> Scene {
    let wall = |corner: Vector3f, u: Vector3f, v: Vector3f, color: RGBSpectrum, name: &str| {
        SceneObject::new(
            Box::new(Rectangle::new(corner, u, v)),
            Material::diffuse(color),
        )
        .with_name(name)
    };

    let white = RGBSpectrum::new(0.725, 0.71, 0.68);
    let red = RGBSpectrum::new(0.63, 0.065, 0.05);
    let green = RGBSpectrum::new(0.14, 0.45, 0.091);
    let s = 5.55 as Float;

    let mut scene = Scene::new();
    scene.add_object(wall(
        Vector3f::new(0.0, 0.0, 0.0),
        Vector3f::new(0.0, s, 0.0),
        Vector3f::new(0.0, 0.0, s),
        red,
        "left wall",
    ));
    scene.add_object(wall(
        Vector3f::new(s, 0.0, 0.0),
        Vector3f::new(0.0, 0.0, s),
        Vector3f::new(0.0, s, 0.0),
        green,
        "right wall",
    ));
    scene.add_object(wall(
        Vector3f::new(0.0, 0.0, 0.0),
        Vector3f::new(0.0, 0.0, s),
        Vector3f::new(s, 0.0, 0.0),
        white,
        "floor",
    ));
    scene.add_object(wall(
        Vector3f::new(0.0, s, 0.0),
        Vector3f::new(s, 0.0, 0.0),
        Vector3f::new(0.0, 0.0, s),
        white,
        "ceiling",
    ));
    scene.add_object(wall(
        Vector3f::new(0.0, 0.0, 0.0),
        Vector3f::new(s, 0.0, 0.0),
        Vector3f::new(0.0, s, 0.0),
        white,
        "back wall",
    ));

    scene.add_object(
        SceneObject::with_emission(
            Box::new(Rectangle::new(
                Vector3f::new(2.13, 5.54, 2.27),
                Vector3f::new(1.30, 0.0, 0.0),
                Vector3f::new(0.0, 0.0, 1.05),
            )),
            Material::diffuse(RGBSpectrum::black()),
            RGBSpectrum::grey(15.0),
        )
        .with_name("ceiling light"),
    );

    scene.add_object(
        SceneObject::new(
            Box::new(Cuboid::new(
                Vector3f::new(1.25, 0.0, 0.95),
                Vector3f::new(2.90, 3.30, 2.60),
            )),
            Material::diffuse(white),
        )
        .with_name("tall block"),
    );
    scene.add_object(
        SceneObject::new(
            Box::new(Cuboid::new(
                Vector3f::new(2.60, 0.0, 3.25),
                Vector3f::new(4.25, 1.65, 4.90),
            )),
            Material::diffuse(white),
        )
        .with_name("short block"),
    );

    scene.add_object(
        SceneObject::new(
            Box::new(Sphere::new(Vector3f::new(3.425, 2.40, 4.075), 0.60)),
            Material::glass(Dispersion::dense_flint()),
        )
        .with_name("glass sphere"),
    );
    scene.add_object(
        SceneObject::new(
            Box::new(Sphere::new(Vector3f::new(2.075, 4.05, 2.275), 0.60)),
            Material::metal(RGBSpectrum::grey(0.18), 0.1),
        )
        .with_name("metal sphere"),
    );

    scene.add_sensor(Box::new(PerspectiveCamera::new(
        Vector3f::new(2.775, 2.775, 20.0),
        Vector3f::new(2.775, 2.775, 5.55),
        Vector3f::new(0.0, 1.0, 0.0),
        (40.0 as Float).to_radians(),
        width,
        height,
    )));
    scene
}

/// A bright compact source aimed at a strongly dispersive glass sphere
/// over a neutral floor: the refracted caustic fans out into a rainbow.
pub fn prism(width: usize, height: usize) -> Scene {
    let mut scene = Scene::new();

    scene.add_object(
        SceneObject::new(
            Box::new(Rectangle::new(
                Vector3f::new(-12.0, 0.0, -12.0),
                Vector3f::new(24.0, 0.0, 0.0),
                Vector3f::new(0.0, 0.0, 24.0),
            )),
            Material::diffuse(RGBSpectrum::grey(0.7)),
        )
        .with_name("floor"),
    );
    scene.add_object(
        SceneObject::new(
            Box::new(Rectangle::new(
                Vector3f::new(-12.0, 0.0, -6.0),
                Vector3f::new(24.0, 0.0, 0.0),
                Vector3f::new(0.0, 12.0, 0.0),
            )),
            Material::diffuse(RGBSpectrum::grey(0.5)),
        )
        .with_name("backdrop"),
    );

    scene.add_object(
        SceneObject::new(
            Box::new(Sphere::new(Vector3f::new(0.0, 1.0, 0.0), 1.0)),
            Material::glass(Dispersion::dense_flint()),
        )
        .with_name("prism sphere"),
    );

    scene.add_object(
        SceneObject::with_emission(
            Box::new(Sphere::new(Vector3f::new(-3.0, 4.0, 0.0), 0.3)),
            Material::diffuse(RGBSpectrum::black()),
            RGBSpectrum::grey(40.0),
        )
        .with_name("beam source"),
    );

    scene.add_sensor(Box::new(PerspectiveCamera::new(
        Vector3f::new(0.0, 3.5, 8.0),
        Vector3f::new(0.0, 0.8, 0.0),
        Vector3f::new(0.0, 1.0, 0.0),
        (35.0 as Float).to_radians(),
        width,
        height,
    )));
    scene
}

/// A 0.5 gray sphere inside a uniformly emitting enclosure. The
/// rendered sphere must converge to exactly half the enclosure
/// radiance, which makes this the analytic sanity scene.
pub fn furnace(width: usize, height: usize) -> Scene {
    let mut scene = Scene::new();

    scene.add_object(
        SceneObject::new(
            Box::new(Sphere::new(Vector3f::zeros(), 1.0)),
            Material::diffuse(RGBSpectrum::grey(0.5)),
        )
        .with_name("probe sphere"),
    );
    scene.add_object(
        SceneObject::with_emission(
            Box::new(Sphere::new(Vector3f::zeros(), 10.0)),
            Material::diffuse(RGBSpectrum::black()),
            RGBSpectrum::white(),
        )
        .with_name("enclosure"),
    );

    // Narrow fov keeps every camera ray on the probe sphere.
    scene.add_sensor(Box::new(PerspectiveCamera::new(
        Vector3f::new(0.0, 0.0, 9.0),
        Vector3f::zeros(),
        Vector3f::new(0.0, 1.0, 0.0),
        0.1,
        width,
        height,
    )));
    scene
}

/// A closed cavity of perfect mirrors with no light at all. Paths
/// never escape; only the bounce cap terminates them.
pub fn mirror_box(width: usize, height: usize) -> Scene {
    let mut scene = Scene::new();
    scene.add_object(
        SceneObject::new(
            Box::new(Cuboid::new(
                Vector3f::new(-1.0, -1.0, -1.0),
                Vector3f::new(1.0, 1.0, 1.0),
            )),
            Material::mirror(RGBSpectrum::white()),
        )
        .with_name("mirror cavity"),
    );

    scene.add_sensor(Box::new(PerspectiveCamera::new(
        Vector3f::zeros(),
        Vector3f::new(1.0, 0.2, 0.1),
        Vector3f::new(0.0, 1.0, 0.0),
        1.0,
        width,
        height,
    )));
    scene
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_scenes_validate() {
        for name in scene_names() {
            let scene = by_name(name, 8, 8).expect("known scene");
            scene.validate().unwrap_or_else(|e| panic!("{}: {}", name, e));
            assert!(!scene.is_empty());
            assert!(scene.camera(0).is_some());
        }
    }

    #[test]
    fn test_unknown_scene_name() {
        assert!(by_name("veach", 8, 8).is_none());
    }

    #[test]
    fn test_cornell_camera_sees_the_box() {
        let scene = cornell(4, 4);
        let sensor = scene.camera(0).expect("camera");
        let ray = sensor.sample_ray(&crate::math::constants::Vector2f::new(0.5, 0.5));
        let hit = scene.ray_intersection(&ray).expect("center ray must hit");
        assert!(hit.t() > 0.0);
    }

    #[test]
    fn test_furnace_probe_fills_the_view() {
        let scene = furnace(4, 4);
        let sensor = scene.camera(0).expect("camera");
        for corner in [(0.01, 0.01), (0.99, 0.01), (0.01, 0.99), (0.99, 0.99)] {
            let u = crate::math::constants::Vector2f::new(corner.0, corner.1);
            let hit = scene
                .ray_intersection(&sensor.sample_ray(&u))
                .expect("corner ray must hit");
            let idx = hit.object_index().expect("handle");
            // Every primary ray lands on the probe, not the enclosure.
            assert!(scene.emission(idx).is_black());
        }
    }
}
