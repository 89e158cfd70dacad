//! Ember's CPU path tracing core.
//!
//! A Monte Carlo path tracer: rays are intersected against a BVH of
//! hittable primitives, materials probabilistically scatter them, and the
//! recursive radiance estimator sums emission plus attenuated bounces.

mod aarect;
mod bucket;
mod bvh;
mod camera;
mod cuboid;
mod hittable;
mod integrator;
mod material;
mod medium;
mod sampling;
mod sphere;
mod transform;

pub use aarect::{XyRect, XzRect, YzRect};
pub use bucket::{
    generate_buckets, render_bucket, render_parallel, Bucket, BucketResult, DEFAULT_BUCKET_SIZE,
};
pub use bvh::BvhNode;
pub use camera::Camera;
pub use cuboid::Cuboid;
pub use hittable::{HitRecord, Hittable, HittableList};
pub use integrator::{
    color_to_rgba, linear_to_gamma, ray_color, render, render_pixel, ImageBuffer, RenderConfig,
};
pub use material::{
    Color, Dielectric, DiffuseLight, Isotropic, Lambertian, Material, Metal, ScatterResult,
};
pub use medium::ConstantMedium;
pub use sampling::{gen_f32, gen_range, random_in_unit_disk, random_in_unit_sphere, random_unit_vector};
pub use sphere::{MovingSphere, Sphere};
pub use transform::{RotateY, Translate};

/// Re-export the math types used throughout the public API.
pub use ember_math::{Aabb, Interval, Ray, Vec3};
