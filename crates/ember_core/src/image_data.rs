//! Decoded image data and on-disk loading for image-sampled textures.
//!
//! Pixels are stored in linear RGB(A) float format; decoding from disk is
//! the only fallible operation the renderer depends on.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use ember_math::Vec3;
use thiserror::Error;

/// Errors that can occur while loading image data.
#[derive(Error, Debug)]
pub enum ImageError {
    #[error("failed to load image: {0}")]
    Load(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("image decoding error: {0}")]
    Decode(#[from] image::ImageError),
}

pub type ImageResult<T> = Result<T, ImageError>;

/// Decoded pixel data in linear space.
#[derive(Clone, Debug)]
pub struct ImageData {
    /// Width in pixels
    pub width: u32,

    /// Height in pixels
    pub height: u32,

    /// Pixel data as [R, G, B, A] per pixel (linear, 0-1), row-major with
    /// row 0 at the top of the image
    pub pixels: Vec<[f32; 4]>,
}

impl ImageData {
    pub fn new(width: u32, height: u32, pixels: Vec<[f32; 4]>) -> Self {
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Sample with bilinear filtering.
    ///
    /// UV coordinates are in [0, 1] with (0, 0) at the bottom-left; v is
    /// flipped into image row order internally.
    pub fn sample(&self, u: f32, v: f32) -> Vec3 {
        let (x, y) = self.uv_to_pixel(u, v);

        let x0 = x.floor() as u32;
        let y0 = y.floor() as u32;
        let x1 = (x0 + 1).min(self.width - 1);
        let y1 = (y0 + 1).min(self.height - 1);

        let fx = x.fract();
        let fy = y.fract();

        let p00 = self.get_pixel(x0, y0);
        let p10 = self.get_pixel(x1, y0);
        let p01 = self.get_pixel(x0, y1);
        let p11 = self.get_pixel(x1, y1);

        let top = Vec3::new(
            p00[0] * (1.0 - fx) + p10[0] * fx,
            p00[1] * (1.0 - fx) + p10[1] * fx,
            p00[2] * (1.0 - fx) + p10[2] * fx,
        );
        let bottom = Vec3::new(
            p01[0] * (1.0 - fx) + p11[0] * fx,
            p01[1] * (1.0 - fx) + p11[1] * fx,
            p01[2] * (1.0 - fx) + p11[2] * fx,
        );

        top * (1.0 - fy) + bottom * fy
    }

    /// Sample the nearest texel, no filtering.
    pub fn sample_nearest(&self, u: f32, v: f32) -> Vec3 {
        let (x, y) = self.uv_to_pixel(u, v);
        let p = self.get_pixel(
            (x.round() as u32).min(self.width - 1),
            (y.round() as u32).min(self.height - 1),
        );
        Vec3::new(p[0], p[1], p[2])
    }

    fn uv_to_pixel(&self, u: f32, v: f32) -> (f32, f32) {
        let u = u.clamp(0.0, 1.0);
        let v = v.clamp(0.0, 1.0);

        let x = u * (self.width as f32 - 1.0);
        let y = (1.0 - v) * (self.height as f32 - 1.0);
        (x, y)
    }

    fn get_pixel(&self, x: u32, y: u32) -> [f32; 4] {
        let idx = (y * self.width + x) as usize;
        self.pixels
            .get(idx)
            .copied()
            .unwrap_or([0.0, 0.0, 0.0, 1.0])
    }

    /// Approximate size in bytes.
    pub fn size_bytes(&self) -> usize {
        self.pixels.len() * std::mem::size_of::<[f32; 4]>()
    }
}

/// Cache for decoded images, keyed by path.
///
/// Images are loaded on demand and shared via `Arc`, so many textures can
/// reference the same pixels.
pub struct ImageCache {
    images: HashMap<String, Arc<ImageData>>,
    base_dir: Option<PathBuf>,
}

impl ImageCache {
    pub fn new() -> Self {
        Self {
            images: HashMap::new(),
            base_dir: None,
        }
    }

    /// Create a cache with a base directory for resolving relative paths.
    pub fn with_base_dir(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            images: HashMap::new(),
            base_dir: Some(base_dir.into()),
        }
    }

    /// Load an image from file, reusing a cached copy if present.
    pub fn load(&mut self, path: &str) -> ImageResult<Arc<ImageData>> {
        if let Some(data) = self.images.get(path) {
            return Ok(data.clone());
        }

        let full_path = self.resolve_path(path);
        let data = Arc::new(load_image_file(&full_path)?);
        self.images.insert(path.to_string(), data.clone());

        log::debug!(
            "loaded image: {} ({}x{}, {:.1} KB)",
            path,
            data.width,
            data.height,
            data.size_bytes() as f32 / 1024.0
        );

        Ok(data)
    }

    /// Get a cached image without loading.
    pub fn get(&self, path: &str) -> Option<Arc<ImageData>> {
        self.images.get(path).cloned()
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    pub fn clear(&mut self) {
        self.images.clear();
    }

    fn resolve_path(&self, path: &str) -> PathBuf {
        let path = Path::new(path);

        if path.is_absolute() {
            path.to_path_buf()
        } else if let Some(base) = &self.base_dir {
            base.join(path)
        } else {
            path.to_path_buf()
        }
    }
}

impl Default for ImageCache {
    fn default() -> Self {
        Self::new()
    }
}

/// Decode an image file into linear float pixels.
pub fn load_image_file(path: &Path) -> ImageResult<ImageData> {
    let img = image::open(path)
        .map_err(|e| ImageError::Load(format!("failed to open {}: {}", path.display(), e)))?;

    let rgba = img.to_rgba8();
    let (width, height) = rgba.dimensions();

    let pixels: Vec<[f32; 4]> = rgba
        .pixels()
        .map(|p| {
            [
                srgb_to_linear(p[0]),
                srgb_to_linear(p[1]),
                srgb_to_linear(p[2]),
                p[3] as f32 / 255.0, // alpha is already linear
            ]
        })
        .collect();

    Ok(ImageData::new(width, height, pixels))
}

/// Convert an sRGB byte value to a linear float.
fn srgb_to_linear(value: u8) -> f32 {
    let v = value as f32 / 255.0;
    if v <= 0.04045 {
        v / 12.92
    } else {
        ((v + 0.055) / 1.055).powf(2.4)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_by_two() -> ImageData {
        // Top row red then green, bottom row blue then white.
        ImageData::new(
            2,
            2,
            vec![
                [1.0, 0.0, 0.0, 1.0],
                [0.0, 1.0, 0.0, 1.0],
                [0.0, 0.0, 1.0, 1.0],
                [1.0, 1.0, 1.0, 1.0],
            ],
        )
    }

    #[test]
    fn nearest_sampling_picks_corners() {
        let img = two_by_two();

        // v=1 is the top row.
        assert_eq!(img.sample_nearest(0.0, 1.0), Vec3::new(1.0, 0.0, 0.0));
        assert_eq!(img.sample_nearest(1.0, 1.0), Vec3::new(0.0, 1.0, 0.0));
        assert_eq!(img.sample_nearest(0.0, 0.0), Vec3::new(0.0, 0.0, 1.0));
        assert_eq!(img.sample_nearest(1.0, 0.0), Vec3::new(1.0, 1.0, 1.0));
    }

    #[test]
    fn bilinear_sampling_blends() {
        let img = two_by_two();

        // Center of the image blends all four texels equally.
        let c = img.sample(0.5, 0.5);
        assert!((c.x - 0.5).abs() < 1e-4);
        assert!((c.y - 0.5).abs() < 1e-4);
        assert!((c.z - 0.5).abs() < 1e-4);
    }

    #[test]
    fn out_of_range_uv_is_clamped() {
        let img = two_by_two();
        assert_eq!(img.sample_nearest(-3.0, 7.0), img.sample_nearest(0.0, 1.0));
    }

    #[test]
    fn srgb_endpoints() {
        assert!((srgb_to_linear(0) - 0.0).abs() < 1e-4);
        assert!((srgb_to_linear(255) - 1.0).abs() < 1e-4);

        // Mid-gray is darker in linear space.
        let mid = srgb_to_linear(128);
        assert!(mid > 0.1 && mid < 0.5);
    }

    #[test]
    fn cache_starts_empty() {
        let cache = ImageCache::new();
        assert!(cache.is_empty());
        assert!(cache.get("missing.png").is_none());
    }
}
