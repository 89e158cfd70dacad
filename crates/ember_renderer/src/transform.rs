//! Instance transforms: wrappers that move or rotate a child hittable by
//! adjusting rays instead of geometry.

use ember_math::{Aabb, Interval, Vec3};
use rand::RngCore;

use crate::hittable::{HitRecord, Hittable};
use crate::Ray;

/// Translates a child hittable by a fixed offset.
pub struct Translate {
    child: Box<dyn Hittable>,
    offset: Vec3,
    bbox: Aabb,
}

impl Translate {
    pub fn new(child: Box<dyn Hittable>, offset: Vec3) -> Self {
        let bbox = child.bounding_box().translate(offset);
        Self {
            child,
            offset,
            bbox,
        }
    }
}

impl Hittable for Translate {
    fn hit<'a>(
        &'a self,
        ray: &Ray,
        ray_t: Interval,
        rng: &mut dyn RngCore,
        rec: &mut HitRecord<'a>,
    ) -> bool {
        // Move the ray into object space, intersect, then move the hit
        // point back out. Directions and normals are unaffected.
        let moved = Ray::new(ray.origin() - self.offset, ray.direction(), ray.time());
        if !self.child.hit(&moved, ray_t, rng, rec) {
            return false;
        }

        rec.p += self.offset;
        true
    }

    fn bounding_box(&self) -> Aabb {
        self.bbox
    }
}

/// Rotates a child hittable about the world Y axis.
pub struct RotateY {
    child: Box<dyn Hittable>,
    sin_theta: f32,
    cos_theta: f32,
    bbox: Aabb,
}

impl RotateY {
    pub fn new(child: Box<dyn Hittable>, degrees: f32) -> Self {
        let radians = degrees.to_radians();
        let sin_theta = radians.sin();
        let cos_theta = radians.cos();

        // Rotate all 8 corners of the child's box and re-box them.
        let child_box = child.bounding_box();
        let min = child_box.min_corner();
        let max = child_box.max_corner();

        let mut new_min = Vec3::splat(f32::INFINITY);
        let mut new_max = Vec3::splat(f32::NEG_INFINITY);
        for corner in [
            Vec3::new(min.x, min.y, min.z),
            Vec3::new(max.x, min.y, min.z),
            Vec3::new(min.x, max.y, min.z),
            Vec3::new(max.x, max.y, min.z),
            Vec3::new(min.x, min.y, max.z),
            Vec3::new(max.x, min.y, max.z),
            Vec3::new(min.x, max.y, max.z),
            Vec3::new(max.x, max.y, max.z),
        ] {
            let rotated = Vec3::new(
                cos_theta * corner.x + sin_theta * corner.z,
                corner.y,
                -sin_theta * corner.x + cos_theta * corner.z,
            );
            new_min = new_min.min(rotated);
            new_max = new_max.max(rotated);
        }

        Self {
            child,
            sin_theta,
            cos_theta,
            bbox: Aabb::from_points(new_min, new_max),
        }
    }

    /// World space to object space (inverse rotation).
    fn to_object(&self, v: Vec3) -> Vec3 {
        Vec3::new(
            self.cos_theta * v.x - self.sin_theta * v.z,
            v.y,
            self.sin_theta * v.x + self.cos_theta * v.z,
        )
    }

    /// Object space back to world space (forward rotation).
    fn to_world(&self, v: Vec3) -> Vec3 {
        Vec3::new(
            self.cos_theta * v.x + self.sin_theta * v.z,
            v.y,
            -self.sin_theta * v.x + self.cos_theta * v.z,
        )
    }
}

impl Hittable for RotateY {
    fn hit<'a>(
        &'a self,
        ray: &Ray,
        ray_t: Interval,
        rng: &mut dyn RngCore,
        rec: &mut HitRecord<'a>,
    ) -> bool {
        let rotated = Ray::new(
            self.to_object(ray.origin()),
            self.to_object(ray.direction()),
            ray.time(),
        );

        if !self.child.hit(&rotated, ray_t, rng, rec) {
            return false;
        }

        rec.p = self.to_world(rec.p);
        rec.normal = self.to_world(rec.normal);
        true
    }

    fn bounding_box(&self) -> Aabb {
        self.bbox
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Cuboid, Lambertian, Sphere};
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::sync::Arc;

    fn gray_sphere(center: Vec3, radius: f32) -> Box<dyn Hittable> {
        Box::new(Sphere::new(
            center,
            radius,
            Arc::new(Lambertian::from_color(Vec3::splat(0.5))),
        ))
    }

    fn hit_point(obj: &dyn Hittable, ray: &Ray) -> Option<Vec3> {
        let mut rng = StdRng::seed_from_u64(0);
        let mut rec = HitRecord::default();
        obj.hit(
            ray,
            Interval::new(0.001, f32::INFINITY),
            &mut rng,
            &mut rec,
        )
        .then_some(rec.p)
    }

    #[test]
    fn translate_shifts_hits_and_bounds() {
        let moved = Translate::new(gray_sphere(Vec3::ZERO, 1.0), Vec3::new(5.0, 0.0, 0.0));

        // Original position no longer hits.
        let at_origin = Ray::new_simple(Vec3::new(0.0, 0.0, 5.0), Vec3::new(0.0, 0.0, -1.0));
        assert!(hit_point(&moved, &at_origin).is_none());

        // Shifted position does, and the hit point is in world space.
        let at_offset = Ray::new_simple(Vec3::new(5.0, 0.0, 5.0), Vec3::new(0.0, 0.0, -1.0));
        let p = hit_point(&moved, &at_offset).unwrap();
        assert!((p - Vec3::new(5.0, 0.0, 1.0)).length() < 1e-4);

        let bbox = moved.bounding_box();
        assert!((bbox.centroid() - Vec3::new(5.0, 0.0, 0.0)).length() < 1e-3);
    }

    #[test]
    fn rotate_y_quarter_turn_moves_x_to_z() {
        // Sphere sitting on +X, rotated 90 degrees about Y, lands on -Z.
        let rotated = RotateY::new(gray_sphere(Vec3::new(3.0, 0.0, 0.0), 1.0), 90.0);

        let down_z = Ray::new_simple(Vec3::new(0.0, 0.0, -6.0), Vec3::new(0.0, 0.0, 1.0));
        assert!(hit_point(&rotated, &down_z).is_some());

        let down_x = Ray::new_simple(Vec3::new(6.0, 0.0, 0.0), Vec3::new(-1.0, 0.0, 0.0));
        assert!(hit_point(&rotated, &down_x).is_none());
    }

    #[test]
    fn rotate_y_bounding_box_covers_rotated_child() {
        let cuboid = Box::new(Cuboid::new(
            Vec3::new(-2.0, 0.0, -0.5),
            Vec3::new(2.0, 1.0, 0.5),
            Arc::new(Lambertian::from_color(Vec3::ONE)),
        ));
        let rotated = RotateY::new(cuboid, 90.0);
        let bbox = rotated.bounding_box();

        // The long x extent is now a long z extent.
        assert!(bbox.z.min <= -2.0 + 1e-3 && bbox.z.max >= 2.0 - 1e-3);
        assert!(bbox.y.min <= 0.0 && bbox.y.max >= 1.0);
    }

    #[test]
    fn rotate_y_preserves_hit_distance() {
        // Rotation is rigid: distance from ray origin to hit point must be
        // unchanged versus the unrotated sphere on the rotated axis.
        let rotated = RotateY::new(gray_sphere(Vec3::new(3.0, 0.0, 0.0), 1.0), 90.0);
        let ray = Ray::new_simple(Vec3::new(0.0, 0.0, -6.0), Vec3::new(0.0, 0.0, 1.0));
        let p = hit_point(&rotated, &ray).unwrap();
        assert!(((p - ray.origin()).length() - 2.0).abs() < 1e-3);
    }
}
