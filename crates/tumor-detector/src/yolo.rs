//! YOLOv8 detector over ONNX Runtime.
//!
//! The checkpoint is exported with `yolo export format=onnx`; its single output is
//! `[1, 4 + nc, N]` (`cx, cy, w, h` then one score per class), some exports emit `[1, N, 4 + nc]`.

use std::path::Path;
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use image::DynamicImage;
use ndarray::{ArrayViewD, Ix3};
use ort::execution_providers::CPUExecutionProvider;
use ort::session::builder::GraphOptimizationLevel;
use ort::session::Session;
use ort::value::Value;
use tracing::{debug, info, instrument};

use crate::detection::{non_max_suppression, BoundingBox, Detection};
use crate::preprocess::{letterbox, Letterbox};

/// Upper bound on boxes kept after NMS.
pub const MAX_DETECTIONS: usize = 300;

/// Inference settings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DetectorConfig {
    /// Square model input side in pixels.
    pub input_size: u32,
    /// Minimum class score for a box to be kept.
    pub confidence_threshold: f32,
    /// IoU above which a lower-scored box of the same class is suppressed.
    pub iou_threshold: f32,
    /// ONNX Runtime intra-op threads.
    pub intra_threads: usize,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            input_size: 640,
            confidence_threshold: 0.25,
            iou_threshold: 0.7,
            intra_threads: 4,
        }
    }
}

/// Runs object detection on one image. Synchronous; callers on an async runtime use `spawn_blocking`.
pub trait Detector: Send + Sync {
    fn detect(&self, image: &DynamicImage) -> Result<Vec<Detection>>;
}

/// YOLOv8 ONNX model.
pub struct YoloDetector {
    session: Arc<Mutex<Session>>,
    input_name: String,
    config: DetectorConfig,
}

impl std::fmt::Debug for YoloDetector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("YoloDetector")
            .field("input_name", &self.input_name)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl YoloDetector {
    /// Loads the ONNX checkpoint. Fails if the file is missing or the session cannot be built.
    pub fn load<P: AsRef<Path>>(model_path: P, config: DetectorConfig) -> Result<Self> {
        let model_path = model_path.as_ref();
        if !model_path.exists() {
            anyhow::bail!(
                "Model weights not found at '{}'. Please ensure the path is correct.",
                model_path.display()
            );
        }

        info!(path = %model_path.display(), "Loading tumor detection model");

        let session = Session::builder()
            .context("Failed to create session builder")?
            .with_execution_providers([CPUExecutionProvider::default().build()])
            .context("Failed to set CPU execution provider")?
            .with_optimization_level(GraphOptimizationLevel::Level3)
            .context("Failed to set optimization level")?
            .with_intra_threads(config.intra_threads)
            .context("Failed to set intra threads")?
            .commit_from_file(model_path)
            .with_context(|| format!("Failed to load model from {}", model_path.display()))?;

        let input_name = session
            .inputs
            .first()
            .map(|input| input.name.clone())
            .unwrap_or_else(|| "images".to_string());

        debug!(input = %input_name, "Detection model input");
        info!("Brain Tumor Detection model loaded successfully.");

        Ok(Self {
            session: Arc::new(Mutex::new(session)),
            input_name,
            config,
        })
    }

    pub fn config(&self) -> &DetectorConfig {
        &self.config
    }
}

impl Detector for YoloDetector {
    #[instrument(skip(self, image))]
    fn detect(&self, image: &DynamicImage) -> Result<Vec<Detection>> {
        let (tensor, lb) = letterbox(image, self.config.input_size)?;

        let mut session = self
            .session
            .lock()
            .map_err(|_| anyhow::anyhow!("Detection session lock poisoned"))?;

        let input_value = Value::from_array(tensor).context("Failed to create input tensor")?;
        let outputs = session
            .run(ort::inputs![&self.input_name => input_value])
            .context("Detection inference failed")?;
        let output = outputs[0]
            .try_extract_array::<f32>()
            .context("Failed to extract output tensor")?;

        let candidates = decode_output(output, &lb, self.config.confidence_threshold)?;
        let detections =
            non_max_suppression(candidates, self.config.iou_threshold, MAX_DETECTIONS);

        debug!(count = detections.len(), "Detections after NMS");
        Ok(detections)
    }
}

/// Decodes raw YOLOv8 output into boxes in original-image coordinates, before NMS.
///
/// Each anchor keeps its best-scoring class; anchors below `confidence_threshold` and boxes that
/// collapse to zero area after clamping are dropped.
pub fn decode_output(
    output: ArrayViewD<'_, f32>,
    lb: &Letterbox,
    confidence_threshold: f32,
) -> Result<Vec<Detection>> {
    let output = output
        .into_dimensionality::<Ix3>()
        .context("Unexpected detection output rank, expected [1, C, N]")?;
    let shape = output.shape();
    if shape[0] != 1 {
        anyhow::bail!("Unexpected detection batch size: {:?}", shape);
    }

    // Channels (4 + nc) are always fewer than anchors (8400 for 640 input).
    let transposed = shape[1] > shape[2];
    let (channels, anchors) = if transposed {
        (shape[2], shape[1])
    } else {
        (shape[1], shape[2])
    };
    if channels < 5 {
        anyhow::bail!("Detection output has no class scores: {:?}", shape);
    }
    let at = |c: usize, a: usize| {
        if transposed {
            output[[0, a, c]]
        } else {
            output[[0, c, a]]
        }
    };

    let mut detections = Vec::new();
    for a in 0..anchors {
        let (class_id, confidence) = (4..channels)
            .map(|c| (c - 4, at(c, a)))
            .fold((0, f32::MIN), |best, cur| if cur.1 > best.1 { cur } else { best });
        if confidence < confidence_threshold {
            continue;
        }

        let model_box = BoundingBox::from_center(at(0, a), at(1, a), at(2, a), at(3, a));
        let bbox = lb.to_original(&model_box);
        if bbox.area() <= 0.0 {
            continue;
        }
        detections.push(Detection {
            class_id,
            confidence,
            bbox,
        });
    }

    Ok(detections)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array3;

    /// Builds a `[1, 4 + nc, N]` output from (cx, cy, w, h, scores) rows.
    fn output(rows: &[(f32, f32, f32, f32, Vec<f32>)], nc: usize) -> Array3<f32> {
        let mut arr = Array3::zeros((1, 4 + nc, rows.len()));
        for (a, (cx, cy, w, h, scores)) in rows.iter().enumerate() {
            arr[[0, 0, a]] = *cx;
            arr[[0, 1, a]] = *cy;
            arr[[0, 2, a]] = *w;
            arr[[0, 3, a]] = *h;
            for (c, s) in scores.iter().enumerate() {
                arr[[0, 4 + c, a]] = *s;
            }
        }
        arr
    }

    fn identity() -> Letterbox {
        Letterbox::new(640, 640, 640)
    }

    #[test]
    fn test_decode_picks_best_class_and_filters_low_scores() {
        let out = output(
            &[
                (100.0, 100.0, 40.0, 20.0, vec![0.1, 0.2, 0.05, 0.9]),
                (300.0, 300.0, 50.0, 50.0, vec![0.1, 0.1, 0.1, 0.1]),
            ],
            4,
        );
        let dets = decode_output(out.view().into_dyn(), &identity(), 0.25).unwrap();
        assert_eq!(dets.len(), 1);
        assert_eq!(dets[0].class_id, 3);
        assert!((dets[0].confidence - 0.9).abs() < 1e-6);
        assert_eq!(dets[0].bbox, BoundingBox { x1: 80.0, y1: 90.0, x2: 120.0, y2: 110.0 });
    }

    #[test]
    fn test_decode_transposed_layout() {
        let out = output(&[(320.0, 320.0, 64.0, 64.0, vec![0.8, 0.0, 0.0, 0.0])], 4);
        // [1, 8, 1] -> [1, 1, 8] would be ambiguous; pad anchors so N > C after transpose.
        let mut wide = Array3::zeros((1, 8, 10));
        wide.slice_mut(ndarray::s![.., .., 0..1]).assign(&out);
        let transposed = wide.permuted_axes([0, 2, 1]);
        let dets = decode_output(transposed.view().into_dyn(), &identity(), 0.25).unwrap();
        assert_eq!(dets.len(), 1);
        assert_eq!(dets[0].class_id, 0);
    }

    #[test]
    fn test_decode_maps_through_letterbox() {
        // 1280x640 image: scale 0.5, pad_y 160.
        let lb = Letterbox::new(1280, 640, 640);
        let out = output(&[(150.0, 310.0, 100.0, 100.0, vec![0.0, 0.7, 0.0, 0.0])], 4);
        let dets = decode_output(out.view().into_dyn(), &lb, 0.25).unwrap();
        assert_eq!(dets[0].bbox, BoundingBox { x1: 200.0, y1: 200.0, x2: 400.0, y2: 400.0 });
    }

    #[test]
    fn test_decode_rejects_bad_shapes() {
        let flat = ndarray::Array2::<f32>::zeros((8, 10));
        assert!(decode_output(flat.view().into_dyn(), &identity(), 0.25).is_err());

        let no_scores = Array3::<f32>::zeros((1, 4, 10));
        assert!(decode_output(no_scores.view().into_dyn(), &identity(), 0.25).is_err());
    }

    #[test]
    fn test_load_missing_model_fails() {
        let err = YoloDetector::load("does/not/exist.onnx", DetectorConfig::default()).unwrap_err();
        assert!(err.to_string().contains("Model weights not found"));
    }
}
