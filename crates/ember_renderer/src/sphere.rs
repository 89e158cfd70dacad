//! Sphere primitives, stationary and moving.

use std::f32::consts::PI;
use std::sync::Arc;

use ember_math::{Aabb, Interval, Vec3};
use rand::RngCore;

use crate::hittable::{HitRecord, Hittable};
use crate::{Material, Ray};

/// A sphere primitive.
///
/// A negative radius is legal: the normal `(p - center) / radius` then
/// points inward, which is how hollow shells (glass bubbles) are built from
/// two concentric spheres.
pub struct Sphere {
    center: Vec3,
    radius: f32,
    material: Arc<dyn Material>,
    bbox: Aabb,
}

impl Sphere {
    pub fn new(center: Vec3, radius: f32, material: Arc<dyn Material>) -> Self {
        let rvec = Vec3::splat(radius.abs());
        let bbox = Aabb::from_points(center - rvec, center + rvec);

        Self {
            center,
            radius,
            material,
            bbox,
        }
    }

    /// UV coordinates for a point on the unit sphere.
    fn get_sphere_uv(p: Vec3) -> (f32, f32) {
        // theta: angle down from +Y; phi: angle around Y from -X over +Z
        let theta = (-p.y).acos();
        let phi = (-p.z).atan2(p.x) + PI;

        let u = phi / (2.0 * PI);
        let v = theta / PI;
        (u, v)
    }
}

impl Hittable for Sphere {
    fn hit<'a>(
        &'a self,
        ray: &Ray,
        ray_t: Interval,
        _rng: &mut dyn RngCore,
        rec: &mut HitRecord<'a>,
    ) -> bool {
        hit_sphere(self.center, self.radius, &self.material, ray, ray_t, rec)
    }

    fn bounding_box(&self) -> Aabb {
        self.bbox
    }
}

/// A sphere whose center moves linearly between two keyframes.
pub struct MovingSphere {
    center0: Vec3,
    center1: Vec3,
    time0: f32,
    time1: f32,
    radius: f32,
    material: Arc<dyn Material>,
    bbox: Aabb,
}

impl MovingSphere {
    pub fn new(
        center0: Vec3,
        center1: Vec3,
        time0: f32,
        time1: f32,
        radius: f32,
        material: Arc<dyn Material>,
    ) -> Self {
        // Cached box covers the full swept extent, so a BVH built from it
        // is valid for every ray time inside [time0, time1].
        let rvec = Vec3::splat(radius.abs());
        let box0 = Aabb::from_points(center0 - rvec, center0 + rvec);
        let box1 = Aabb::from_points(center1 - rvec, center1 + rvec);

        Self {
            center0,
            center1,
            time0,
            time1,
            radius,
            material,
            bbox: Aabb::surrounding(&box0, &box1),
        }
    }

    /// Center position at the given ray time.
    pub fn center(&self, time: f32) -> Vec3 {
        self.center0
            + ((time - self.time0) / (self.time1 - self.time0)) * (self.center1 - self.center0)
    }
}

impl Hittable for MovingSphere {
    fn hit<'a>(
        &'a self,
        ray: &Ray,
        ray_t: Interval,
        _rng: &mut dyn RngCore,
        rec: &mut HitRecord<'a>,
    ) -> bool {
        let center = self.center(ray.time());
        hit_sphere(center, self.radius, &self.material, ray, ray_t, rec)
    }

    fn bounding_box(&self) -> Aabb {
        self.bbox
    }
}

/// Shared quadratic solve for both sphere variants.
fn hit_sphere<'a>(
    center: Vec3,
    radius: f32,
    material: &'a Arc<dyn Material>,
    ray: &Ray,
    ray_t: Interval,
    rec: &mut HitRecord<'a>,
) -> bool {
    let oc = center - ray.origin();
    let a = ray.direction().length_squared();
    let h = ray.direction().dot(oc);
    let c = oc.length_squared() - radius * radius;

    let discriminant = h * h - a * c;
    if discriminant < 0.0 {
        return false;
    }

    let sqrtd = discriminant.sqrt();

    // Nearest root in range first
    let mut root = (h - sqrtd) / a;
    if !ray_t.surrounds(root) {
        root = (h + sqrtd) / a;
        if !ray_t.surrounds(root) {
            return false;
        }
    }

    rec.t = root;
    rec.p = ray.at(rec.t);
    let outward_normal = (rec.p - center) / radius;
    rec.set_face_normal(ray, outward_normal);
    (rec.u, rec.v) = Sphere::get_sphere_uv(outward_normal);
    rec.material = material.as_ref();

    true
}
