//! Axis-aligned box composite.

use std::sync::Arc;

use ember_math::{Aabb, Interval, Vec3};
use rand::RngCore;

use crate::aarect::{XyRect, XzRect, YzRect};
use crate::hittable::{HitRecord, Hittable, HittableList};
use crate::{Material, Ray};

/// A closed rectangular prism built from six axis-aligned rectangles.
///
/// Intersection delegates to the rect list's nearest-hit rule, so the faces
/// need no special ordering.
pub struct Cuboid {
    sides: HittableList,
    bbox: Aabb,
}

impl Cuboid {
    pub fn new(p0: Vec3, p1: Vec3, material: Arc<dyn Material>) -> Self {
        let min = p0.min(p1);
        let max = p0.max(p1);

        let mut sides = HittableList::new();
        sides.add(Box::new(XyRect::new(
            min.x,
            max.x,
            min.y,
            max.y,
            max.z,
            material.clone(),
        )));
        sides.add(Box::new(XyRect::new(
            min.x,
            max.x,
            min.y,
            max.y,
            min.z,
            material.clone(),
        )));
        sides.add(Box::new(XzRect::new(
            min.x,
            max.x,
            min.z,
            max.z,
            max.y,
            material.clone(),
        )));
        sides.add(Box::new(XzRect::new(
            min.x,
            max.x,
            min.z,
            max.z,
            min.y,
            material.clone(),
        )));
        sides.add(Box::new(YzRect::new(
            min.y,
            max.y,
            min.z,
            max.z,
            max.x,
            material.clone(),
        )));
        sides.add(Box::new(YzRect::new(
            min.y, max.y, min.z, max.z, min.x, material,
        )));

        Self {
            sides,
            bbox: Aabb::from_points(min, max),
        }
    }
}

impl Hittable for Cuboid {
    fn hit<'a>(
        &'a self,
        ray: &Ray,
        ray_t: Interval,
        rng: &mut dyn RngCore,
        rec: &mut HitRecord<'a>,
    ) -> bool {
        self.sides.hit(ray, ray_t, rng, rec)
    }

    fn bounding_box(&self) -> Aabb {
        self.bbox
    }
}
