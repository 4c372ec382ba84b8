//! Letterbox preprocessing for YOLOv8.
//!
//! Steps:
//! 1. Resize preserving aspect ratio so the longer side equals the model input size
//! 2. Center on a square gray (114) canvas
//! 3. Scale RGB to [0, 1]
//! 4. Convert to NCHW tensor `[1, 3, S, S]`

use anyhow::Result;
use image::{imageops::FilterType, DynamicImage, GenericImageView, Rgb, RgbImage};
use ndarray::Array4;

use crate::detection::BoundingBox;

/// Padding value used by YOLOv8 letterboxing.
pub const PAD_VALUE: u8 = 114;

/// Geometry of one letterbox transform, needed to map boxes back to the original image.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Letterbox {
    pub scale: f32,
    pub pad_x: f32,
    pub pad_y: f32,
    pub orig_width: u32,
    pub orig_height: u32,
}

impl Letterbox {
    /// Computes the transform for an image of `width x height` into a `size x size` input.
    pub fn new(width: u32, height: u32, size: u32) -> Self {
        let scale = (size as f32 / width as f32).min(size as f32 / height as f32);
        let (new_w, new_h) = Self::scaled_dims(width, height, scale, size);
        Self {
            scale,
            pad_x: ((size - new_w) / 2) as f32,
            pad_y: ((size - new_h) / 2) as f32,
            orig_width: width,
            orig_height: height,
        }
    }

    fn scaled_dims(width: u32, height: u32, scale: f32, size: u32) -> (u32, u32) {
        let new_w = ((width as f32 * scale).round() as u32).clamp(1, size);
        let new_h = ((height as f32 * scale).round() as u32).clamp(1, size);
        (new_w, new_h)
    }

    /// Maps a box from model-input space back to original-image space, clamped to the image.
    pub fn to_original(&self, b: &BoundingBox) -> BoundingBox {
        BoundingBox {
            x1: (b.x1 - self.pad_x) / self.scale,
            y1: (b.y1 - self.pad_y) / self.scale,
            x2: (b.x2 - self.pad_x) / self.scale,
            y2: (b.y2 - self.pad_y) / self.scale,
        }
        .clamp(self.orig_width as f32, self.orig_height as f32)
    }
}

/// Letterboxes `image` into a `[1, 3, size, size]` tensor. Fails on zero-sized images.
pub fn letterbox(image: &DynamicImage, size: u32) -> Result<(Array4<f32>, Letterbox)> {
    let (orig_w, orig_h) = image.dimensions();
    if orig_w == 0 || orig_h == 0 {
        anyhow::bail!("Cannot preprocess an empty image ({}x{})", orig_w, orig_h);
    }
    if size == 0 {
        anyhow::bail!("Model input size must be positive");
    }

    let lb = Letterbox::new(orig_w, orig_h, size);
    let (new_w, new_h) = Letterbox::scaled_dims(orig_w, orig_h, lb.scale, size);

    let resized = image.resize_exact(new_w, new_h, FilterType::Triangle).to_rgb8();
    let mut canvas = RgbImage::from_pixel(size, size, Rgb([PAD_VALUE, PAD_VALUE, PAD_VALUE]));
    image::imageops::overlay(&mut canvas, &resized, lb.pad_x as i64, lb.pad_y as i64);

    let side = size as usize;
    let mut tensor = Array4::zeros((1, 3, side, side));
    for (x, y, pixel) in canvas.enumerate_pixels() {
        for c in 0..3 {
            tensor[[0, c, y as usize, x as usize]] = pixel[c] as f32 / 255.0;
        }
    }

    Ok((tensor, lb))
}
