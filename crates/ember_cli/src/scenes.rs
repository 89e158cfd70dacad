//! Built-in demo scenes.
//!
//! Each builder returns the scene root (a BVH), a configured camera, and
//! the render settings that suit the scene.

use std::sync::Arc;

use ember_core::{Checker, NoiseTexture, Perlin};
use ember_math::Vec3;
use ember_renderer::{
    BvhNode, Camera, ConstantMedium, Cuboid, Dielectric, DiffuseLight, Hittable, HittableList,
    Lambertian, Material, Metal, MovingSphere, RenderConfig, RotateY, Sphere, Translate, XyRect,
    XzRect, YzRect,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

pub struct Scene {
    pub world: BvhNode,
    pub camera: Camera,
    pub config: RenderConfig,
}

/// Glass, diffuse, and metal spheres on a gray ground sphere.
pub fn three_spheres(width: u32) -> Scene {
    let mut objects = HittableList::new();

    let ground: Arc<dyn Material> = Arc::new(Lambertian::from_color(Vec3::splat(0.5)));
    objects.add(Box::new(Sphere::new(
        Vec3::new(0.0, -1000.0, 0.0),
        1000.0,
        ground,
    )));

    let glass: Arc<dyn Material> = Arc::new(Dielectric::new(1.5));
    objects.add(Box::new(Sphere::new(Vec3::new(0.0, 1.0, 0.0), 1.0, glass)));

    let diffuse: Arc<dyn Material> = Arc::new(Lambertian::from_color(Vec3::new(0.4, 0.2, 0.1)));
    objects.add(Box::new(Sphere::new(
        Vec3::new(-4.0, 1.0, 0.0),
        1.0,
        diffuse,
    )));

    let metal: Arc<dyn Material> = Arc::new(Metal::new(Vec3::new(0.7, 0.6, 0.5), 0.0));
    objects.add(Box::new(Sphere::new(Vec3::new(4.0, 1.0, 0.0), 1.0, metal)));

    let mut camera = Camera::new()
        .with_resolution(width, width * 9 / 16)
        .with_position(Vec3::new(13.0, 2.0, 3.0), Vec3::ZERO, Vec3::Y)
        .with_lens(30.0, 0.6, 10.0);
    camera.initialize();

    Scene {
        world: BvhNode::new(objects.into_objects()),
        camera,
        config: RenderConfig {
            samples_per_pixel: 100,
            max_depth: 50,
            background: Vec3::ZERO,
            use_sky_gradient: true,
        },
    }
}

/// Moving spheres over a checkered ground, shutter open over [0, 1].
pub fn bouncing(width: u32) -> Scene {
    let mut rng = StdRng::seed_from_u64(2024);
    let mut objects = HittableList::new();

    let checker = Arc::new(Checker::from_colors(
        4.0,
        Vec3::new(0.2, 0.3, 0.1),
        Vec3::splat(0.9),
    ));
    let ground: Arc<dyn Material> = Arc::new(Lambertian::new(checker));
    objects.add(Box::new(Sphere::new(
        Vec3::new(0.0, -1000.0, 0.0),
        1000.0,
        ground,
    )));

    for a in -5..5 {
        for b in -5..5 {
            let center = Vec3::new(
                a as f32 + 0.9 * ember_renderer::gen_f32(&mut rng),
                0.2,
                b as f32 + 0.9 * ember_renderer::gen_f32(&mut rng),
            );
            if (center - Vec3::new(4.0, 0.2, 0.0)).length() <= 0.9 {
                continue;
            }

            let albedo = Vec3::new(
                ember_renderer::gen_f32(&mut rng),
                ember_renderer::gen_f32(&mut rng),
                ember_renderer::gen_f32(&mut rng),
            );
            let material: Arc<dyn Material> = Arc::new(Lambertian::from_color(albedo));
            let center1 = center + Vec3::new(0.0, 0.5 * ember_renderer::gen_f32(&mut rng), 0.0);
            objects.add(Box::new(MovingSphere::new(
                center, center1, 0.0, 1.0, 0.2, material,
            )));
        }
    }

    let mut camera = Camera::new()
        .with_resolution(width, width * 9 / 16)
        .with_position(Vec3::new(13.0, 2.0, 3.0), Vec3::ZERO, Vec3::Y)
        .with_lens(20.0, 0.1, 10.0)
        .with_shutter(0.0, 1.0);
    camera.initialize();

    Scene {
        world: BvhNode::new(objects.into_objects()),
        camera,
        config: RenderConfig {
            samples_per_pixel: 100,
            max_depth: 50,
            background: Vec3::ZERO,
            use_sky_gradient: true,
        },
    }
}

/// The Cornell box with two cuboids, one of them filled with smoke.
pub fn cornell(width: u32) -> Scene {
    let mut objects = HittableList::new();

    let red: Arc<dyn Material> = Arc::new(Lambertian::from_color(Vec3::new(0.65, 0.05, 0.05)));
    let white: Arc<dyn Material> = Arc::new(Lambertian::from_color(Vec3::splat(0.73)));
    let green: Arc<dyn Material> = Arc::new(Lambertian::from_color(Vec3::new(0.12, 0.45, 0.15)));
    let light: Arc<dyn Material> = Arc::new(DiffuseLight::from_color(Vec3::splat(15.0)));

    objects.add(Box::new(YzRect::new(0.0, 555.0, 0.0, 555.0, 555.0, green)));
    objects.add(Box::new(YzRect::new(0.0, 555.0, 0.0, 555.0, 0.0, red)));
    objects.add(Box::new(XzRect::new(
        213.0, 343.0, 227.0, 332.0, 554.0, light,
    )));
    objects.add(Box::new(XzRect::new(
        0.0,
        555.0,
        0.0,
        555.0,
        0.0,
        white.clone(),
    )));
    objects.add(Box::new(XzRect::new(
        0.0,
        555.0,
        0.0,
        555.0,
        555.0,
        white.clone(),
    )));
    objects.add(Box::new(XyRect::new(
        0.0,
        555.0,
        0.0,
        555.0,
        555.0,
        white.clone(),
    )));

    let tall: Box<dyn Hittable> = Box::new(Translate::new(
        Box::new(RotateY::new(
            Box::new(Cuboid::new(
                Vec3::ZERO,
                Vec3::new(165.0, 330.0, 165.0),
                white.clone(),
            )),
            15.0,
        )),
        Vec3::new(265.0, 0.0, 295.0),
    ));
    objects.add(tall);

    let short = Box::new(Translate::new(
        Box::new(RotateY::new(
            Box::new(Cuboid::new(
                Vec3::ZERO,
                Vec3::new(165.0, 165.0, 165.0),
                white,
            )),
            -18.0,
        )),
        Vec3::new(130.0, 0.0, 65.0),
    ));
    // Fill the short cuboid with light smoke.
    objects.add(Box::new(ConstantMedium::from_color(
        short,
        0.01,
        Vec3::splat(0.9),
    )));

    let mut camera = Camera::new()
        .with_resolution(width, width)
        .with_position(
            Vec3::new(278.0, 278.0, -800.0),
            Vec3::new(278.0, 278.0, 0.0),
            Vec3::Y,
        )
        .with_lens(40.0, 0.0, 10.0);
    camera.initialize();

    Scene {
        world: BvhNode::new(objects.into_objects()),
        camera,
        config: RenderConfig {
            samples_per_pixel: 200,
            max_depth: 50,
            background: Vec3::ZERO,
            use_sky_gradient: false,
        },
    }
}

/// Perlin marble spheres under an area light.
pub fn marble(width: u32) -> Scene {
    let mut rng = StdRng::seed_from_u64(7);
    let mut objects = HittableList::new();

    let ground_tex = Arc::new(NoiseTexture::new(Perlin::new(&mut rng), 1.0));
    let ground: Arc<dyn Material> = Arc::new(Lambertian::new(ground_tex));
    objects.add(Box::new(Sphere::new(
        Vec3::new(0.0, -1000.0, 0.0),
        1000.0,
        ground,
    )));

    let marble_tex = Arc::new(NoiseTexture::new(Perlin::new(&mut rng), 4.0));
    let marble: Arc<dyn Material> = Arc::new(Lambertian::new(marble_tex));
    objects.add(Box::new(Sphere::new(Vec3::new(0.0, 2.0, 0.0), 2.0, marble)));

    let light: Arc<dyn Material> = Arc::new(DiffuseLight::from_color(Vec3::splat(4.0)));
    objects.add(Box::new(XyRect::new(3.0, 5.0, 1.0, 3.0, -2.0, light)));

    let mut camera = Camera::new()
        .with_resolution(width, width * 9 / 16)
        .with_position(Vec3::new(26.0, 3.0, 6.0), Vec3::new(0.0, 2.0, 0.0), Vec3::Y)
        .with_lens(20.0, 0.0, 10.0);
    camera.initialize();

    Scene {
        world: BvhNode::new(objects.into_objects()),
        camera,
        config: RenderConfig {
            samples_per_pixel: 200,
            max_depth: 50,
            background: Vec3::new(0.02, 0.02, 0.04),
            use_sky_gradient: false,
        },
    }
}
