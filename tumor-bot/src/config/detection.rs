//! Detection settings: model path and inference thresholds.

use anyhow::Result;
use std::env;
use std::path::PathBuf;
use tumor_detector::DetectorConfig;

/// Where training writes the best checkpoint, exported next to it as ONNX.
pub const DEFAULT_MODEL_PATH: &str = "runs/training/brain_tumor_yolov8_gpu/weights/best.onnx";

#[derive(Debug, Clone)]
pub struct DetectionSettings {
    /// MODEL_PATH
    pub model_path: PathBuf,
    /// DETECTION_CONFIDENCE
    pub confidence_threshold: f32,
    /// DETECTION_IOU
    pub iou_threshold: f32,
    /// DETECTION_INPUT_SIZE
    pub input_size: u32,
    /// DETECTION_THREADS
    pub intra_threads: usize,
}

/// Parsed value of `name`, or `default` when unset or blank. Unparseable values are an error.
fn env_or<T: std::str::FromStr>(name: &str, default: T) -> Result<T> {
    match env::var(name) {
        Ok(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse()
            .map_err(|_| anyhow::anyhow!("Invalid value for {}: {}", name, raw)),
        _ => Ok(default),
    }
}

impl DetectionSettings {
    pub fn from_env() -> Result<Self> {
        let defaults = DetectorConfig::default();
        Ok(Self {
            model_path: env::var("MODEL_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(DEFAULT_MODEL_PATH)),
            confidence_threshold: env_or("DETECTION_CONFIDENCE", defaults.confidence_threshold)?,
            iou_threshold: env_or("DETECTION_IOU", defaults.iou_threshold)?,
            input_size: env_or("DETECTION_INPUT_SIZE", defaults.input_size)?,
            intra_threads: env_or("DETECTION_THREADS", defaults.intra_threads)?,
        })
    }

    /// Thresholds must lie in (0, 1]; input size must be a positive multiple of 32.
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("DETECTION_CONFIDENCE", self.confidence_threshold),
            ("DETECTION_IOU", self.iou_threshold),
        ] {
            if !(value > 0.0 && value <= 1.0) {
                anyhow::bail!("{} must be in (0, 1], got {}", name, value);
            }
        }
        if self.input_size == 0 || self.input_size % 32 != 0 {
            anyhow::bail!(
                "DETECTION_INPUT_SIZE must be a positive multiple of 32, got {}",
                self.input_size
            );
        }
        if self.intra_threads == 0 {
            anyhow::bail!("DETECTION_THREADS must be at least 1");
        }
        Ok(())
    }

    pub fn detector_config(&self) -> DetectorConfig {
        DetectorConfig {
            input_size: self.input_size,
            confidence_threshold: self.confidence_threshold,
            iou_threshold: self.iou_threshold,
            intra_threads: self.intra_threads,
        }
    }
}
