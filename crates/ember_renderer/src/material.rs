//! Material trait for surface scattering.

use std::sync::Arc;

use ember_core::{SolidColor, Texture};
use ember_math::Vec3;
use rand::RngCore;

use crate::hittable::HitRecord;
use crate::sampling::{gen_f32, gen_range, random_in_unit_sphere, random_unit_vector};
use crate::Ray;

/// Color type alias (RGB values typically 0-1)
pub type Color = Vec3;

/// Outcome of a successful scatter.
pub struct ScatterResult {
    /// Per-channel multiplicative filter applied to the bounced radiance
    pub attenuation: Color,
    /// The bounced ray, originating at the hit point
    pub scattered: Ray,
}

/// Trait for materials that describe how light interacts with surfaces.
pub trait Material: Send + Sync {
    /// Scatter an incoming ray.
    ///
    /// Returns None if the ray is absorbed. Randomness comes from the
    /// explicit generator; materials hold no mutable state.
    fn scatter(
        &self,
        ray_in: &Ray,
        rec: &HitRecord,
        rng: &mut dyn RngCore,
    ) -> Option<ScatterResult>;

    /// Light emitted at the given UV coordinates and point.
    ///
    /// Most materials emit nothing.
    fn emitted(&self, _u: f32, _v: f32, _p: Vec3) -> Color {
        Color::ZERO
    }
}

/// Lambertian (diffuse) material.
pub struct Lambertian {
    albedo: Arc<dyn Texture>,
}

impl Lambertian {
    pub fn new(albedo: Arc<dyn Texture>) -> Self {
        Self { albedo }
    }

    pub fn from_color(albedo: Color) -> Self {
        Self::new(Arc::new(SolidColor::new(albedo)))
    }
}

impl Material for Lambertian {
    fn scatter(
        &self,
        ray_in: &Ray,
        rec: &HitRecord,
        rng: &mut dyn RngCore,
    ) -> Option<ScatterResult> {
        let mut scatter_direction = rec.normal + random_unit_vector(rng);

        // Catch degenerate scatter direction
        if scatter_direction.length_squared() < 1e-8 {
            scatter_direction = rec.normal;
        }

        Some(ScatterResult {
            attenuation: self.albedo.value(rec.u, rec.v, rec.p),
            scattered: Ray::new(rec.p, scatter_direction, ray_in.time()),
        })
    }
}

/// Metal (specular) material.
pub struct Metal {
    albedo: Color,
    fuzz: f32,
}

impl Metal {
    /// `fuzz`: roughness, 0.0 = perfect mirror, 1.0 = very rough.
    pub fn new(albedo: Color, fuzz: f32) -> Self {
        Self {
            albedo,
            fuzz: fuzz.clamp(0.0, 1.0),
        }
    }
}

impl Material for Metal {
    fn scatter(
        &self,
        ray_in: &Ray,
        rec: &HitRecord,
        rng: &mut dyn RngCore,
    ) -> Option<ScatterResult> {
        let reflected = reflect(ray_in.direction().normalize(), rec.normal);
        let scattered_dir = reflected + self.fuzz * random_in_unit_sphere(rng);

        // A fuzzed direction that ends up below the surface counts as
        // absorbed, not clamped back up.
        if scattered_dir.dot(rec.normal) > 0.0 {
            Some(ScatterResult {
                attenuation: self.albedo,
                scattered: Ray::new(rec.p, scattered_dir, ray_in.time()),
            })
        } else {
            None
        }
    }
}

/// Dielectric (glass) material.
///
/// Attenuation is always white; any color in glass renders comes from the
/// geometry (e.g. tinted objects behind it), not absorption.
pub struct Dielectric {
    /// Index of refraction range; equal endpoints mean no dispersion
    ior_min: f32,
    ior_max: f32,
}

impl Dielectric {
    /// `ior`: 1.0 = air, 1.5 = glass, 2.4 = diamond.
    pub fn new(ior: f32) -> Self {
        Self {
            ior_min: ior,
            ior_max: ior,
        }
    }

    /// Dispersive glass: the index of refraction is sampled uniformly from
    /// `[ior_min, ior_max]` once per scatter, so different paths bend
    /// differently and white light fans into a spectrum over many samples.
    pub fn with_dispersion(ior_min: f32, ior_max: f32) -> Self {
        Self { ior_min, ior_max }
    }

    /// Schlick's approximation for reflectance.
    fn reflectance(cosine: f32, ior: f32) -> f32 {
        let r0 = ((1.0 - ior) / (1.0 + ior)).powi(2);
        r0 + (1.0 - r0) * (1.0 - cosine).powi(5)
    }
}

impl Material for Dielectric {
    fn scatter(
        &self,
        ray_in: &Ray,
        rec: &HitRecord,
        rng: &mut dyn RngCore,
    ) -> Option<ScatterResult> {
        let ior = if self.ior_min < self.ior_max {
            gen_range(rng, self.ior_min, self.ior_max)
        } else {
            self.ior_min
        };
        let refraction_ratio = if rec.front_face { 1.0 / ior } else { ior };

        let unit_direction = ray_in.direction().normalize();
        let cos_theta = (-unit_direction).dot(rec.normal).min(1.0);
        let sin_theta = (1.0 - cos_theta * cos_theta).sqrt();

        let cannot_refract = refraction_ratio * sin_theta > 1.0;

        // Matched indices reflect nothing; Schlick's polynomial does not go
        // to zero there on its own, so short-circuit it.
        let reflect_prob = if refraction_ratio == 1.0 {
            0.0
        } else {
            Self::reflectance(cos_theta, refraction_ratio)
        };

        let direction = if cannot_refract || reflect_prob > gen_f32(rng) {
            reflect(unit_direction, rec.normal)
        } else {
            refract(unit_direction, rec.normal, refraction_ratio)
        };

        Some(ScatterResult {
            attenuation: Color::ONE,
            scattered: Ray::new(rec.p, direction, ray_in.time()),
        })
    }
}

/// Diffuse light emitter.
pub struct DiffuseLight {
    emit: Arc<dyn Texture>,
}

impl DiffuseLight {
    pub fn new(emit: Arc<dyn Texture>) -> Self {
        Self { emit }
    }

    pub fn from_color(emit: Color) -> Self {
        Self::new(Arc::new(SolidColor::new(emit)))
    }
}

impl Material for DiffuseLight {
    fn scatter(
        &self,
        _ray_in: &Ray,
        _rec: &HitRecord,
        _rng: &mut dyn RngCore,
    ) -> Option<ScatterResult> {
        // Lights don't scatter rays
        None
    }

    fn emitted(&self, u: f32, v: f32, p: Vec3) -> Color {
        self.emit.value(u, v, p)
    }
}

/// Isotropic phase function for participating media.
///
/// Invoked via the synthetic hit records produced by
/// [`crate::ConstantMedium`], never by an ordinary surface hit.
pub struct Isotropic {
    albedo: Arc<dyn Texture>,
}

impl Isotropic {
    pub fn new(albedo: Arc<dyn Texture>) -> Self {
        Self { albedo }
    }

    pub fn from_color(albedo: Color) -> Self {
        Self::new(Arc::new(SolidColor::new(albedo)))
    }
}

impl Material for Isotropic {
    fn scatter(
        &self,
        ray_in: &Ray,
        rec: &HitRecord,
        rng: &mut dyn RngCore,
    ) -> Option<ScatterResult> {
        Some(ScatterResult {
            attenuation: self.albedo.value(rec.u, rec.v, rec.p),
            scattered: Ray::new(rec.p, random_unit_vector(rng), ray_in.time()),
        })
    }
}

// =============================================================================
// Helper functions
// =============================================================================

/// Reflect a vector about a normal.
#[inline]
fn reflect(v: Vec3, n: Vec3) -> Vec3 {
    v - 2.0 * v.dot(n) * n
}

/// Refract a vector through a surface via Snell's law.
#[inline]
fn refract(uv: Vec3, n: Vec3, etai_over_etat: f32) -> Vec3 {
    let cos_theta = (-uv).dot(n).min(1.0);
    let r_out_perp = etai_over_etat * (uv + cos_theta * n);
    let r_out_parallel = -(1.0 - r_out_perp.length_squared()).abs().sqrt() * n;
    r_out_perp + r_out_parallel
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn record_at(p: Vec3, normal: Vec3, ray: &Ray) -> HitRecord<'static> {
        let mut rec = HitRecord {
            p,
            t: 1.0,
            ..HitRecord::default()
        };
        rec.set_face_normal(ray, normal);
        rec
    }

    #[test]
    fn lambertian_scatters_into_normal_hemisphere() {
        let mat = Lambertian::from_color(Color::splat(0.8));
        let ray = Ray::new_simple(Vec3::ZERO, Vec3::new(0.0, -1.0, 0.0));
        let rec = record_at(Vec3::ZERO, Vec3::Y, &ray);
        let mut rng = StdRng::seed_from_u64(5);

        for _ in 0..100 {
            let result = mat.scatter(&ray, &rec, &mut rng).unwrap();
            assert!(result.scattered.direction().dot(Vec3::Y) > -1e-4);
            assert_eq!(result.attenuation, Color::splat(0.8));
        }
    }

    #[test]
    fn mirror_metal_reflects_exactly() {
        let mat = Metal::new(Color::new(0.9, 0.9, 0.9), 0.0);
        // 45 degree incidence onto a +Y facing surface.
        let ray = Ray::new_simple(Vec3::new(-1.0, 1.0, 0.0), Vec3::new(1.0, -1.0, 0.0));
        let rec = record_at(Vec3::ZERO, Vec3::Y, &ray);
        let mut rng = StdRng::seed_from_u64(0);

        let result = mat.scatter(&ray, &rec, &mut rng).unwrap();
        let d = result.scattered.direction();
        let expected = Vec3::new(1.0, 1.0, 0.0).normalize();

        // Normal component flips, tangential component is unchanged.
        assert!((d.normalize() - expected).length() < 1e-5);
        assert_eq!(result.attenuation, Color::new(0.9, 0.9, 0.9));
    }

    #[test]
    fn metal_absorbs_below_surface_directions() {
        let mat = Metal::new(Color::ONE, 1.0);
        // Grazing incidence with max fuzz; some samples must be absorbed.
        let ray = Ray::new_simple(Vec3::new(-1.0, 0.001, 0.0), Vec3::new(1.0, -0.001, 0.0));
        let rec = record_at(Vec3::ZERO, Vec3::Y, &ray);
        let mut rng = StdRng::seed_from_u64(9);

        let absorbed = (0..200)
            .filter(|_| mat.scatter(&ray, &rec, &mut rng).is_none())
            .count();
        assert!(absorbed > 0);
    }

    #[test]
    fn matched_index_dielectric_passes_straight_through() {
        let mat = Dielectric::new(1.0);
        let mut rng = StdRng::seed_from_u64(1);

        for dir in [
            Vec3::new(0.0, -1.0, 0.0),
            Vec3::new(0.3, -1.0, 0.2),
            Vec3::new(0.9, -0.1, 0.0),
        ] {
            let ray = Ray::new_simple(Vec3::new(0.0, 1.0, 0.0), dir);
            let rec = record_at(Vec3::ZERO, Vec3::Y, &ray);
            let result = mat.scatter(&ray, &rec, &mut rng).unwrap();

            // With ratio 1 there is no bend and no reflection branch.
            let out = result.scattered.direction().normalize();
            assert!(
                (out - dir.normalize()).length() < 1e-4,
                "direction changed: {:?} -> {:?}",
                dir,
                out
            );
        }
    }

    #[test]
    fn dielectric_attenuation_is_white() {
        let mat = Dielectric::new(1.5);
        let ray = Ray::new_simple(Vec3::new(0.0, 1.0, 0.0), Vec3::new(0.0, -1.0, 0.0));
        let rec = record_at(Vec3::ZERO, Vec3::Y, &ray);
        let mut rng = StdRng::seed_from_u64(2);

        let result = mat.scatter(&ray, &rec, &mut rng).unwrap();
        assert_eq!(result.attenuation, Color::ONE);
    }

    #[test]
    fn dispersive_dielectric_varies_bend() {
        let mat = Dielectric::with_dispersion(1.3, 1.7);
        // Off-axis so different iors produce different refraction angles.
        let ray = Ray::new_simple(Vec3::new(0.0, 1.0, 0.0), Vec3::new(0.6, -1.0, 0.0));
        let rec = record_at(Vec3::ZERO, Vec3::Y, &ray);
        let mut rng = StdRng::seed_from_u64(3);

        let mut dirs = Vec::new();
        for _ in 0..50 {
            let r = mat.scatter(&ray, &rec, &mut rng).unwrap();
            dirs.push(r.scattered.direction().normalize());
        }
        let first = dirs[0];
        assert!(dirs.iter().any(|d| (*d - first).length() > 1e-4));
    }

    #[test]
    fn diffuse_light_emits_and_never_scatters() {
        let mat = DiffuseLight::from_color(Color::new(4.0, 4.0, 4.0));
        let ray = Ray::new_simple(Vec3::ZERO, Vec3::new(0.0, -1.0, 0.0));
        let rec = record_at(Vec3::ZERO, Vec3::Y, &ray);
        let mut rng = StdRng::seed_from_u64(4);

        assert!(mat.scatter(&ray, &rec, &mut rng).is_none());
        assert_eq!(mat.emitted(0.0, 0.0, Vec3::ZERO), Color::new(4.0, 4.0, 4.0));
    }

    #[test]
    fn isotropic_scatters_in_all_directions() {
        let mat = Isotropic::from_color(Color::splat(0.5));
        let ray = Ray::new_simple(Vec3::ZERO, Vec3::Z);
        let rec = record_at(Vec3::ZERO, Vec3::Y, &ray);
        let mut rng = StdRng::seed_from_u64(6);

        // Over many samples both hemispheres must be represented.
        let mut up = 0;
        let mut down = 0;
        for _ in 0..200 {
            let r = mat.scatter(&ray, &rec, &mut rng).unwrap();
            if r.scattered.direction().y > 0.0 {
                up += 1;
            } else {
                down += 1;
            }
        }
        assert!(up > 0 && down > 0);
    }
}
