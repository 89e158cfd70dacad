//! Constant-density participating medium.

use std::sync::Arc;

use ember_core::Texture;
use ember_math::{Aabb, Interval, Vec3};
use rand::RngCore;

use crate::hittable::{HitRecord, Hittable};
use crate::material::{Color, Isotropic, Material};
use crate::sampling::gen_f32;
use crate::Ray;

/// A volume of uniform density bounded by a child hittable.
///
/// Unlike surface primitives, intersection here is probabilistic: the ray
/// scatters inside the volume iff an exponentially sampled free-flight
/// distance falls within the span between the boundary's entry and exit
/// crossings.
pub struct ConstantMedium {
    boundary: Box<dyn Hittable>,
    neg_inv_density: f32,
    phase_function: Isotropic,
}

impl ConstantMedium {
    /// The boundary must be a closed convex solid: the ray is assumed to
    /// cross it exactly twice, once entering and once exiting.
    pub fn new(boundary: Box<dyn Hittable>, density: f32, albedo: Arc<dyn Texture>) -> Self {
        Self {
            boundary,
            neg_inv_density: -1.0 / density,
            phase_function: Isotropic::new(albedo),
        }
    }

    pub fn from_color(boundary: Box<dyn Hittable>, density: f32, albedo: Color) -> Self {
        Self {
            boundary,
            neg_inv_density: -1.0 / density,
            phase_function: Isotropic::from_color(albedo),
        }
    }
}

impl Hittable for ConstantMedium {
    fn hit<'a>(
        &'a self,
        ray: &Ray,
        ray_t: Interval,
        rng: &mut dyn RngCore,
        rec: &mut HitRecord<'a>,
    ) -> bool {
        // Find where the ray enters and exits the boundary. The entry
        // search spans the whole line so rays starting inside still find
        // their (negative-t) entry point.
        let mut rec1 = HitRecord::default();
        let mut rec2 = HitRecord::default();

        if !self
            .boundary
            .hit(ray, Interval::UNIVERSE, rng, &mut rec1)
        {
            return false;
        }
        if !self.boundary.hit(
            ray,
            Interval::new(rec1.t + 0.0001, f32::INFINITY),
            rng,
            &mut rec2,
        ) {
            return false;
        }

        let mut t_enter = rec1.t.max(ray_t.min);
        let t_exit = rec2.t.min(ray_t.max);

        if t_enter >= t_exit {
            return false;
        }
        if t_enter < 0.0 {
            t_enter = 0.0;
        }

        let ray_length = ray.direction().length();
        let distance_inside = (t_exit - t_enter) * ray_length;
        let hit_distance = self.neg_inv_density * gen_f32(rng).ln();

        if hit_distance > distance_inside {
            return false;
        }

        rec.t = t_enter + hit_distance / ray_length;
        rec.p = ray.at(rec.t);

        // Synthetic scatter event: normal and face flag are arbitrary, the
        // isotropic phase function ignores both.
        rec.normal = Vec3::X;
        rec.front_face = true;
        rec.u = 0.0;
        rec.v = 0.0;
        rec.material = &self.phase_function;

        true
    }

    fn bounding_box(&self) -> Aabb {
        self.boundary.bounding_box()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Lambertian, Sphere};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn fog_sphere(density: f32) -> ConstantMedium {
        let boundary = Box::new(Sphere::new(
            Vec3::new(0.0, 0.0, -3.0),
            1.0,
            Arc::new(Lambertian::from_color(Vec3::ONE)),
        ));
        ConstantMedium::from_color(boundary, density, Color::splat(0.8))
    }

    #[test]
    fn dense_medium_scatters_inside_the_boundary() {
        let medium = fog_sphere(10_000.0);
        let ray = Ray::new_simple(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));
        let mut rng = StdRng::seed_from_u64(12);

        let mut hits = 0;
        for _ in 0..100 {
            let mut rec = HitRecord::default();
            if medium.hit(
                &ray,
                Interval::new(0.001, f32::INFINITY),
                &mut rng,
                &mut rec,
            ) {
                hits += 1;
                // Scatter point lies within the boundary span [2, 4].
                assert!(rec.t >= 2.0 - 1e-3 && rec.t <= 4.0 + 1e-3);
            }
        }
        // At this density essentially every ray scatters.
        assert!(hits > 95, "only {} of 100 rays scattered", hits);
    }

    #[test]
    fn thin_medium_lets_most_rays_through() {
        let medium = fog_sphere(0.001);
        let ray = Ray::new_simple(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));
        let mut rng = StdRng::seed_from_u64(13);

        let mut misses = 0;
        for _ in 0..100 {
            let mut rec = HitRecord::default();
            if !medium.hit(
                &ray,
                Interval::new(0.001, f32::INFINITY),
                &mut rng,
                &mut rec,
            ) {
                misses += 1;
            }
        }
        assert!(misses > 95, "only {} of 100 rays passed through", misses);
    }

    #[test]
    fn ray_missing_the_boundary_never_scatters() {
        let medium = fog_sphere(10_000.0);
        let ray = Ray::new_simple(Vec3::ZERO, Vec3::new(0.0, 1.0, 0.0));
        let mut rng = StdRng::seed_from_u64(14);

        let mut rec = HitRecord::default();
        assert!(!medium.hit(
            &ray,
            Interval::new(0.001, f32::INFINITY),
            &mut rng,
            &mut rec
        ));
    }

    #[test]
    fn ray_starting_inside_still_scatters() {
        let medium = fog_sphere(10_000.0);
        // Origin inside the fog sphere.
        let ray = Ray::new_simple(Vec3::new(0.0, 0.0, -3.0), Vec3::new(0.0, 0.0, -1.0));
        let mut rng = StdRng::seed_from_u64(15);

        let mut rec = HitRecord::default();
        assert!(medium.hit(
            &ray,
            Interval::new(0.001, f32::INFINITY),
            &mut rng,
            &mut rec
        ));
        assert!(rec.t > 0.0 && rec.t <= 1.0 + 1e-3);
    }
}
