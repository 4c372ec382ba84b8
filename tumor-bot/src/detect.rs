//! `tumor-bot detect`: analyze a local scan without Telegram.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use scan_handlers::Findings;
use tracing::info;
use tumor_detector::{Detector, ScanAnalysis, ScanAnalyzer, YoloDetector};

use crate::config::DetectionSettings;

/// Default output path: `<stem>_annotated.jpeg` next to the input.
pub fn default_output_path(image: &Path) -> PathBuf {
    let stem = image
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "scan".to_string());
    image.with_file_name(format!("{}_annotated.jpeg", stem))
}

/// Runs `detector` on the image at `image`, writes the annotated JPEG to `output`.
pub fn analyze_file(
    detector: Arc<dyn Detector>,
    image: &Path,
    output: &Path,
) -> Result<(ScanAnalysis, Findings)> {
    let bytes = std::fs::read(image)
        .with_context(|| format!("Failed to read scan {}", image.display()))?;
    let analysis = ScanAnalyzer::new(detector).analyze(&bytes)?;
    std::fs::write(output, &analysis.annotated_jpeg)
        .with_context(|| format!("Failed to write {}", output.display()))?;

    let findings = Findings::from_detections(&analysis.detections);
    info!(
        image = %image.display(),
        output = %output.display(),
        "Found: {}",
        findings.log_summary()
    );
    Ok((analysis, findings))
}

/// Loads the model from env settings and analyzes one file, printing the findings.
pub fn run_detect(image: &Path, output: Option<PathBuf>) -> Result<()> {
    let settings = DetectionSettings::from_env()?;
    settings.validate()?;
    let detector = YoloDetector::load(&settings.model_path, settings.detector_config())?;

    let output = output.unwrap_or_else(|| default_output_path(image));
    let (analysis, findings) = analyze_file(Arc::new(detector), image, &output)?;

    for det in &analysis.detections {
        let class = det.class();
        println!(
            "{:<18} {:<17} conf={:.2} box=({:.0}, {:.0}, {:.0}, {:.0})",
            class.display_name(),
            class.severity().map(|s| s.label()).unwrap_or("-"),
            det.confidence,
            det.bbox.x1,
            det.bbox.y1,
            det.bbox.x2,
            det.bbox.y2
        );
    }
    println!("Found: {}", findings.log_summary());
    println!("Annotated scan written to {}", output.display());
    Ok(())
}
