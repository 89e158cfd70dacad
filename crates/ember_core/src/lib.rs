//! Textures and image data for the Ember path tracer.
//!
//! Everything here sits below materials in the data flow: a texture is a
//! function from surface coordinates (and a world-space point, for the
//! procedural variants) to a color.

mod image_data;
mod perlin;
mod texture;

pub use image_data::{load_image_file, ImageCache, ImageData, ImageError, ImageResult};
pub use perlin::Perlin;
pub use texture::{Checker, ImageTexture, NoiseTexture, SolidColor, Texture};
