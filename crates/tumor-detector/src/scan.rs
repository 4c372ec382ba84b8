//! One uploaded scan in, detections and an annotated JPEG out.

use std::sync::Arc;

use anyhow::{Context, Result};
use image::GenericImageView;
use tracing::{info, instrument};

use crate::annotate::{annotate, encode_jpeg};
use crate::detection::Detection;
use crate::yolo::Detector;

/// Result of analyzing one scan.
#[derive(Debug, Clone)]
pub struct ScanAnalysis {
    pub detections: Vec<Detection>,
    pub annotated_jpeg: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

/// Decodes, detects, annotates, encodes. Cheap to clone.
#[derive(Clone)]
pub struct ScanAnalyzer {
    detector: Arc<dyn Detector>,
}

impl ScanAnalyzer {
    pub fn new(detector: Arc<dyn Detector>) -> Self {
        Self { detector }
    }

    /// Analyzes raw image bytes in any format `image` can guess. Blocking.
    #[instrument(skip(self, bytes), fields(bytes = bytes.len()))]
    pub fn analyze(&self, bytes: &[u8]) -> Result<ScanAnalysis> {
        let image = image::load_from_memory(bytes).context("Failed to decode scan image")?;
        let (width, height) = image.dimensions();

        let detections = self.detector.detect(&image)?;
        let annotated = annotate(&image, &detections);
        let annotated_jpeg = encode_jpeg(&annotated)?;

        info!(width, height, detections = detections.len(), "Scan analyzed");

        Ok(ScanAnalysis {
            detections,
            annotated_jpeg,
            width,
            height,
        })
    }
}
