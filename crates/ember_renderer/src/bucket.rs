//! Bucket-based tile rendering.
//!
//! Divides the image into tiles (buckets) that are rendered independently
//! and in parallel with rayon; each bucket owns a generator seeded from the
//! render seed and its index, so results are reproducible regardless of
//! scheduling order.

use rand::rngs::StdRng;
use rand::SeedableRng;
use rayon::prelude::*;

use crate::integrator::render_pixel;
use crate::{Camera, Color, Hittable, ImageBuffer, RenderConfig};

/// A rectangular region of the image to render.
#[derive(Debug, Clone, Copy)]
pub struct Bucket {
    /// X coordinate of the bucket's top-left corner
    pub x: u32,
    /// Y coordinate of the bucket's top-left corner
    pub y: u32,
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
    /// Index of this bucket in the render order
    pub index: usize,
}

impl Bucket {
    pub fn new(x: u32, y: u32, width: u32, height: u32, index: usize) -> Self {
        Self {
            x,
            y,
            width,
            height,
            index,
        }
    }

    pub fn pixel_count(&self) -> u32 {
        self.width * self.height
    }
}

/// Default bucket size in pixels.
pub const DEFAULT_BUCKET_SIZE: u32 = 64;

/// Generate buckets for an image, sorted center-out.
///
/// Center-out ordering mimics production renderers: when buckets are
/// displayed as they finish, the subject appears first.
pub fn generate_buckets(width: u32, height: u32, bucket_size: u32) -> Vec<Bucket> {
    let mut buckets = Vec::new();
    let mut index = 0;

    let mut y = 0;
    while y < height {
        let mut x = 0;
        while x < width {
            let bw = bucket_size.min(width - x);
            let bh = bucket_size.min(height - y);
            buckets.push(Bucket::new(x, y, bw, bh, index));
            index += 1;
            x += bucket_size;
        }
        y += bucket_size;
    }

    sort_center_out(&mut buckets, width, height);

    for (i, bucket) in buckets.iter_mut().enumerate() {
        bucket.index = i;
    }

    buckets
}

/// Sort buckets by distance from the image center.
fn sort_center_out(buckets: &mut [Bucket], width: u32, height: u32) {
    let center_x = width as f32 / 2.0;
    let center_y = height as f32 / 2.0;

    buckets.sort_by(|a, b| {
        let a_center_x = a.x as f32 + a.width as f32 / 2.0;
        let a_center_y = a.y as f32 + a.height as f32 / 2.0;
        let b_center_x = b.x as f32 + b.width as f32 / 2.0;
        let b_center_y = b.y as f32 + b.height as f32 / 2.0;

        let a_dist = (a_center_x - center_x).powi(2) + (a_center_y - center_y).powi(2);
        let b_dist = (b_center_x - center_x).powi(2) + (b_center_y - center_y).powi(2);

        a_dist.partial_cmp(&b_dist).unwrap_or(std::cmp::Ordering::Equal)
    });
}

/// Render a single bucket with its own generator.
///
/// Returns pixels in row-major order within the bucket.
pub fn render_bucket(
    bucket: &Bucket,
    camera: &Camera,
    world: &dyn Hittable,
    config: &RenderConfig,
    rng: &mut StdRng,
) -> Vec<Color> {
    let mut pixels = Vec::with_capacity((bucket.width * bucket.height) as usize);

    for local_y in 0..bucket.height {
        for local_x in 0..bucket.width {
            let global_x = bucket.x + local_x;
            let global_y = bucket.y + local_y;
            pixels.push(render_pixel(camera, world, global_x, global_y, config, rng));
        }
    }

    pixels
}

/// Result of rendering a bucket.
#[derive(Debug, Clone)]
pub struct BucketResult {
    pub bucket: Bucket,
    /// Pixel colors in row-major order
    pub pixels: Vec<Color>,
}

/// Render the full image with one rayon task per bucket.
///
/// The scene is shared immutably across workers; each bucket derives its
/// generator from the render seed and the bucket index, never from shared
/// mutable state.
pub fn render_parallel(
    camera: &Camera,
    world: &(dyn Hittable),
    config: &RenderConfig,
    seed: u64,
) -> ImageBuffer {
    let buckets = generate_buckets(camera.image_width, camera.image_height, DEFAULT_BUCKET_SIZE);
    log::debug!("rendering {} buckets", buckets.len());

    let results: Vec<BucketResult> = buckets
        .par_iter()
        .map(|bucket| {
            let mut rng = StdRng::seed_from_u64(seed.wrapping_add(bucket.index as u64));
            let pixels = render_bucket(bucket, camera, world, config, &mut rng);
            BucketResult {
                bucket: *bucket,
                pixels,
            }
        })
        .collect();

    let mut image = ImageBuffer::new(camera.image_width, camera.image_height);
    for result in results {
        let b = result.bucket;
        for (i, color) in result.pixels.into_iter().enumerate() {
            let x = b.x + (i as u32 % b.width);
            let y = b.y + (i as u32 / b.width);
            image.set(x, y, color);
        }
    }

    image
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{BvhNode, Lambertian, Sphere, Vec3};
    use std::sync::Arc;

    #[test]
    fn test_generate_buckets_exact_fit() {
        let buckets = generate_buckets(128, 128, 64);
        assert_eq!(buckets.len(), 4); // 2x2 grid

        let total_pixels: u32 = buckets.iter().map(|b| b.pixel_count()).sum();
        assert_eq!(total_pixels, 128 * 128);
    }

    #[test]
    fn test_generate_buckets_partial_fit() {
        let buckets = generate_buckets(100, 100, 64);
        assert_eq!(buckets.len(), 4); // 2x2 grid with partial buckets

        let total_pixels: u32 = buckets.iter().map(|b| b.pixel_count()).sum();
        assert_eq!(total_pixels, 100 * 100);
    }

    #[test]
    fn test_center_out_order() {
        let buckets = generate_buckets(192, 192, 64);
        assert_eq!(buckets.len(), 9); // 3x3 grid

        let first = &buckets[0];
        assert_eq!(first.x, 64);
        assert_eq!(first.y, 64);
    }

    #[test]
    fn parallel_render_is_reproducible() {
        let sphere = Sphere::new(
            Vec3::new(0.0, 0.0, -1.0),
            0.5,
            Arc::new(Lambertian::from_color(Vec3::splat(0.5))),
        );
        let world = BvhNode::new(vec![Box::new(sphere)]);

        let mut camera = Camera::new().with_resolution(32, 32);
        camera.initialize();

        let config = RenderConfig {
            samples_per_pixel: 2,
            max_depth: 4,
            background: Vec3::ZERO,
            use_sky_gradient: true,
        };

        let a = render_parallel(&camera, &world, &config, 99);
        let b = render_parallel(&camera, &world, &config, 99);
        assert_eq!(a.pixels, b.pixels);
    }

    #[test]
    fn parallel_render_covers_every_pixel() {
        // Sky gradient with no geometry: every pixel must be nonzero.
        let world = BvhNode::new(vec![]);

        let mut camera = Camera::new().with_resolution(70, 50);
        camera.initialize();

        let config = RenderConfig {
            samples_per_pixel: 1,
            max_depth: 2,
            background: Vec3::ZERO,
            use_sky_gradient: true,
        };

        let image = render_parallel(&camera, &world, &config, 1);
        assert!(image.pixels.iter().all(|p| p.length() > 0.0));
    }
}
