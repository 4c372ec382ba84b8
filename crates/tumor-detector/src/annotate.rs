//! Box drawing and JPEG encoding for annotated scans.

use std::io::Cursor;

use anyhow::{Context, Result};
use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, Rgb, RgbImage};

use crate::classes::TumorClass;
use crate::detection::Detection;

/// JPEG quality of the annotated reply.
pub const JPEG_QUALITY: u8 = 90;

/// Box color for a class id; the caption marks each finding with the same color.
pub fn class_color(class_id: usize) -> Rgb<u8> {
    Rgb(TumorClass::from_id(class_id).color())
}

/// Line width scaled to the image: `max(round((w + h) / 2 * 0.003), 2)`.
pub fn line_width(width: u32, height: u32) -> u32 {
    let scaled = ((width + height) as f32 / 2.0 * 0.003).round() as u32;
    scaled.max(2)
}

/// Returns an RGB copy of `image` with a hollow rectangle around each detection.
pub fn annotate(image: &DynamicImage, detections: &[Detection]) -> RgbImage {
    let mut canvas = image.to_rgb8();
    let (w, h) = canvas.dimensions();
    if w == 0 || h == 0 {
        return canvas;
    }
    let thickness = line_width(w, h);

    for det in detections {
        let color = class_color(det.class_id);
        let x1 = (det.bbox.x1.round() as u32).min(w - 1);
        let y1 = (det.bbox.y1.round() as u32).min(h - 1);
        let x2 = (det.bbox.x2.round() as u32).min(w - 1);
        let y2 = (det.bbox.y2.round() as u32).min(h - 1);

        // Stroke grows inward so thick lines stay inside the box.
        for t in 0..thickness {
            let (l, r) = (x1 + t, x2.saturating_sub(t));
            let (top, bottom) = (y1 + t, y2.saturating_sub(t));
            if l > r || top > bottom {
                break;
            }
            for x in l..=r {
                canvas.put_pixel(x, top, color);
                canvas.put_pixel(x, bottom, color);
            }
            for y in top..=bottom {
                canvas.put_pixel(l, y, color);
                canvas.put_pixel(r, y, color);
            }
        }
    }

    canvas
}

/// Encodes an RGB image as JPEG.
pub fn encode_jpeg(image: &RgbImage) -> Result<Vec<u8>> {
    let mut buf = Cursor::new(Vec::new());
    JpegEncoder::new_with_quality(&mut buf, JPEG_QUALITY)
        .encode_image(image)
        .context("Failed to encode annotated scan as JPEG")?;
    Ok(buf.into_inner())
}
