//! Axis-aligned rectangle primitives, one per dropped axis.
//!
//! Each rect lives in the plane where one coordinate equals `k`. Their
//! bounding boxes get a small thickness on the flat axis at construction
//! (see `Aabb::from_points`), so the BVH slab test never sees a degenerate
//! box.

use std::sync::Arc;

use ember_math::{Aabb, Interval, Vec3};
use rand::RngCore;

use crate::hittable::{HitRecord, Hittable};
use crate::{Material, Ray};

/// Rectangle in the z = k plane, spanning [x0, x1] x [y0, y1].
pub struct XyRect {
    x0: f32,
    x1: f32,
    y0: f32,
    y1: f32,
    k: f32,
    material: Arc<dyn Material>,
    bbox: Aabb,
}

impl XyRect {
    pub fn new(x0: f32, x1: f32, y0: f32, y1: f32, k: f32, material: Arc<dyn Material>) -> Self {
        let bbox = Aabb::from_points(Vec3::new(x0, y0, k), Vec3::new(x1, y1, k));
        Self {
            x0,
            x1,
            y0,
            y1,
            k,
            material,
            bbox,
        }
    }
}

impl Hittable for XyRect {
    fn hit<'a>(
        &'a self,
        ray: &Ray,
        ray_t: Interval,
        _rng: &mut dyn RngCore,
        rec: &mut HitRecord<'a>,
    ) -> bool {
        // A ray parallel to the plane divides by zero here; the resulting
        // infinite t fails the interval check below.
        let t = (self.k - ray.origin().z) / ray.direction().z;
        if !ray_t.surrounds(t) {
            return false;
        }

        let p = ray.at(t);
        if p.x < self.x0 || p.x > self.x1 || p.y < self.y0 || p.y > self.y1 {
            return false;
        }

        rec.u = (p.x - self.x0) / (self.x1 - self.x0);
        rec.v = (p.y - self.y0) / (self.y1 - self.y0);
        rec.t = t;
        rec.p = p;
        rec.set_face_normal(ray, Vec3::Z);
        rec.material = self.material.as_ref();

        true
    }

    fn bounding_box(&self) -> Aabb {
        self.bbox
    }
}

/// Rectangle in the y = k plane, spanning [x0, x1] x [z0, z1].
pub struct XzRect {
    x0: f32,
    x1: f32,
    z0: f32,
    z1: f32,
    k: f32,
    material: Arc<dyn Material>,
    bbox: Aabb,
}

impl XzRect {
    pub fn new(x0: f32, x1: f32, z0: f32, z1: f32, k: f32, material: Arc<dyn Material>) -> Self {
        let bbox = Aabb::from_points(Vec3::new(x0, k, z0), Vec3::new(x1, k, z1));
        Self {
            x0,
            x1,
            z0,
            z1,
            k,
            material,
            bbox,
        }
    }
}

impl Hittable for XzRect {
    fn hit<'a>(
        &'a self,
        ray: &Ray,
        ray_t: Interval,
        _rng: &mut dyn RngCore,
        rec: &mut HitRecord<'a>,
    ) -> bool {
        let t = (self.k - ray.origin().y) / ray.direction().y;
        if !ray_t.surrounds(t) {
            return false;
        }

        let p = ray.at(t);
        if p.x < self.x0 || p.x > self.x1 || p.z < self.z0 || p.z > self.z1 {
            return false;
        }

        rec.u = (p.x - self.x0) / (self.x1 - self.x0);
        rec.v = (p.z - self.z0) / (self.z1 - self.z0);
        rec.t = t;
        rec.p = p;
        rec.set_face_normal(ray, Vec3::Y);
        rec.material = self.material.as_ref();

        true
    }

    fn bounding_box(&self) -> Aabb {
        self.bbox
    }
}

/// Rectangle in the x = k plane, spanning [y0, y1] x [z0, z1].
pub struct YzRect {
    y0: f32,
    y1: f32,
    z0: f32,
    z1: f32,
    k: f32,
    material: Arc<dyn Material>,
    bbox: Aabb,
}

impl YzRect {
    pub fn new(y0: f32, y1: f32, z0: f32, z1: f32, k: f32, material: Arc<dyn Material>) -> Self {
        let bbox = Aabb::from_points(Vec3::new(k, y0, z0), Vec3::new(k, y1, z1));
        Self {
            y0,
            y1,
            z0,
            z1,
            k,
            material,
            bbox,
        }
    }
}

impl Hittable for YzRect {
    fn hit<'a>(
        &'a self,
        ray: &Ray,
        ray_t: Interval,
        _rng: &mut dyn RngCore,
        rec: &mut HitRecord<'a>,
    ) -> bool {
        let t = (self.k - ray.origin().x) / ray.direction().x;
        if !ray_t.surrounds(t) {
            return false;
        }

        let p = ray.at(t);
        if p.y < self.y0 || p.y > self.y1 || p.z < self.z0 || p.z > self.z1 {
            return false;
        }

        rec.u = (p.y - self.y0) / (self.y1 - self.y0);
        rec.v = (p.z - self.z0) / (self.z1 - self.z0);
        rec.t = t;
        rec.p = p;
        rec.set_face_normal(ray, Vec3::X);
        rec.material = self.material.as_ref();

        true
    }

    fn bounding_box(&self) -> Aabb {
        self.bbox
    }
}
