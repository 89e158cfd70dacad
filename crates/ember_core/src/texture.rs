//! Texture trait and its variants.

use std::sync::Arc;

use ember_math::Vec3;

use crate::{ImageData, Perlin};

/// A function from surface coordinates to a color.
///
/// The world-space point is passed alongside (u, v) so procedural textures
/// can vary in 3D rather than only across a parameterized surface.
pub trait Texture: Send + Sync {
    fn value(&self, u: f32, v: f32, p: Vec3) -> Vec3;
}

/// Constant-color texture.
pub struct SolidColor {
    albedo: Vec3,
}

impl SolidColor {
    pub fn new(albedo: Vec3) -> Self {
        Self { albedo }
    }

    pub fn from_rgb(r: f32, g: f32, b: f32) -> Self {
        Self::new(Vec3::new(r, g, b))
    }
}

impl Texture for SolidColor {
    fn value(&self, _u: f32, _v: f32, _p: Vec3) -> Vec3 {
        self.albedo
    }
}

/// 3D checkerboard over two inner textures.
pub struct Checker {
    scale: f32,
    even: Arc<dyn Texture>,
    odd: Arc<dyn Texture>,
}

impl Checker {
    pub fn new(scale: f32, even: Arc<dyn Texture>, odd: Arc<dyn Texture>) -> Self {
        Self { scale, even, odd }
    }

    /// Checkerboard over two solid colors.
    pub fn from_colors(scale: f32, even: Vec3, odd: Vec3) -> Self {
        Self::new(
            scale,
            Arc::new(SolidColor::new(even)),
            Arc::new(SolidColor::new(odd)),
        )
    }
}

impl Texture for Checker {
    fn value(&self, u: f32, v: f32, p: Vec3) -> Vec3 {
        let q = p * self.scale;
        let sines = q.x.sin() * q.y.sin() * q.z.sin();
        if sines < 0.0 {
            self.odd.value(u, v, p)
        } else {
            self.even.value(u, v, p)
        }
    }
}

/// Marble-like procedural texture driven by Perlin turbulence.
pub struct NoiseTexture {
    noise: Perlin,
    scale: f32,
}

impl NoiseTexture {
    pub fn new(noise: Perlin, scale: f32) -> Self {
        Self { noise, scale }
    }
}

impl Texture for NoiseTexture {
    fn value(&self, _u: f32, _v: f32, p: Vec3) -> Vec3 {
        // Phase-shifted sine gives the banded marble look; turbulence
        // perturbs the band positions.
        let s = 0.5 * (1.0 + (self.scale * p.z + 10.0 * self.noise.turb(p, 7)).sin());
        Vec3::splat(s)
    }
}

/// Lookup filter for image-sampled textures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Filter {
    Nearest,
    #[default]
    Bilinear,
}

/// Texture backed by decoded image pixels.
///
/// The pixel data is shared; many textures (and materials) can reference the
/// same image.
pub struct ImageTexture {
    image: Arc<ImageData>,
    filter: Filter,
}

impl ImageTexture {
    pub fn new(image: Arc<ImageData>) -> Self {
        Self {
            image,
            filter: Filter::default(),
        }
    }

    pub fn with_filter(image: Arc<ImageData>, filter: Filter) -> Self {
        Self { image, filter }
    }
}

impl Texture for ImageTexture {
    fn value(&self, u: f32, v: f32, _p: Vec3) -> Vec3 {
        if self.image.height == 0 || self.image.width == 0 {
            // Missing data reads as solid cyan so it is obvious in renders.
            return Vec3::new(0.0, 1.0, 1.0);
        }

        match self.filter {
            Filter::Nearest => self.image.sample_nearest(u, v),
            Filter::Bilinear => self.image.sample(u, v),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn solid_color_ignores_coordinates() {
        let tex = SolidColor::from_rgb(0.2, 0.4, 0.6);
        let c0 = tex.value(0.0, 0.0, Vec3::ZERO);
        let c1 = tex.value(0.9, 0.1, Vec3::new(100.0, -3.0, 7.0));
        assert_eq!(c0, c1);
        assert_eq!(c0, Vec3::new(0.2, 0.4, 0.6));
    }

    #[test]
    fn checker_alternates_along_an_axis() {
        let tex = Checker::from_colors(1.0, Vec3::ONE, Vec3::ZERO);

        // sin(x) changes sign across pi, so half a period apart the cells
        // must differ.
        let a = tex.value(0.0, 0.0, Vec3::new(1.0, 1.0, 1.0));
        let b = tex.value(0.0, 0.0, Vec3::new(1.0 + std::f32::consts::PI, 1.0, 1.0));
        assert_ne!(a, b);
    }

    #[test]
    fn noise_texture_output_is_gray_in_unit_range() {
        let mut rng = StdRng::seed_from_u64(3);
        let tex = NoiseTexture::new(Perlin::new(&mut rng), 4.0);

        for i in 0..100 {
            let c = tex.value(0.0, 0.0, Vec3::splat(i as f32 * 0.21));
            assert_eq!(c.x, c.y);
            assert_eq!(c.y, c.z);
            assert!((0.0..=1.0).contains(&c.x));
        }
    }

    #[test]
    fn image_texture_nearest_reads_texels() {
        let image = Arc::new(ImageData::new(
            2,
            1,
            vec![[1.0, 0.0, 0.0, 1.0], [0.0, 0.0, 1.0, 1.0]],
        ));
        let tex = ImageTexture::with_filter(image, Filter::Nearest);

        assert_eq!(tex.value(0.0, 0.5, Vec3::ZERO), Vec3::new(1.0, 0.0, 0.0));
        assert_eq!(tex.value(1.0, 0.5, Vec3::ZERO), Vec3::new(0.0, 0.0, 1.0));
    }
}
