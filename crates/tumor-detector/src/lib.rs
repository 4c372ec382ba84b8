//! # tumor-detector
//!
//! Brain tumor detection with a YOLOv8 checkpoint exported to ONNX.
//!
//! - [`YoloDetector`] loads the model and runs letterbox → inference → decode → NMS.
//! - [`annotate`] draws the returned boxes; [`ScanAnalyzer`] ties decode, detect, annotate and
//!   JPEG encoding together for one uploaded scan.
//! - [`TumorClass`] is the static class / severity table the model was trained with.

pub mod annotate;
pub mod classes;
pub mod detection;
pub mod preprocess;
pub mod scan;
pub mod yolo;

pub use annotate::{annotate, encode_jpeg};
pub use classes::{Severity, TumorClass};
pub use detection::{iou, non_max_suppression, BoundingBox, Detection};
pub use preprocess::{letterbox, Letterbox};
pub use scan::{ScanAnalysis, ScanAnalyzer};
pub use yolo::{decode_output, Detector, DetectorConfig, YoloDetector};
