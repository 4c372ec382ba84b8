//! Turns detections into the caption, log line and chatbot context.

use teloxide::utils::html;
use tumor_detector::Detection;

/// Findings of one scan. Lists are de-duplicated in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Findings {
    /// `"{name} ({severity})"` per tumor detection.
    pub findings: Vec<String>,
    /// Colored square per entry of `findings`, matching the box color on the image.
    pub markers: Vec<&'static str>,
    /// Tumor names only, for follow-up questions.
    pub tumor_names: Vec<String>,
    /// At least one No-Tumor detection.
    pub no_tumor: bool,
}

fn push_unique(list: &mut Vec<String>, item: String) -> bool {
    if list.contains(&item) {
        return false;
    }
    list.push(item);
    true
}

impl Findings {
    pub fn from_detections(detections: &[Detection]) -> Self {
        let mut out = Self::default();
        for det in detections {
            let class = det.class();
            if class.is_no_tumor() {
                out.no_tumor = true;
                continue;
            }
            let name = class.display_name();
            if push_unique(
                &mut out.findings,
                format!("{} ({})", name, class.severity_label()),
            ) {
                out.markers.push(class.marker());
            }
            push_unique(&mut out.tumor_names, name.to_string());
        }
        out
    }

    pub fn has_findings(&self) -> bool {
        !self.findings.is_empty()
    }

    /// Photo caption in Telegram HTML. Each bullet starts with the color of its boxes.
    pub fn caption_html(&self) -> String {
        if self.has_findings() {
            let bullets = self
                .findings
                .iter()
                .zip(&self.markers)
                .map(|(f, marker)| format!("• {} {}", marker, html::escape(f)))
                .collect::<Vec<_>>()
                .join("\n");
            format!(
                "{}\n\nPotential findings:\n{}\n\nYou can now ask me questions for more information.",
                html::bold("Analysis Complete."),
                bullets
            )
        } else if self.no_tumor {
            "Analysis complete. The scan indicates no tumor was found.".to_string()
        } else {
            "Analysis complete. I did not detect any of the conditions I'm trained to recognize in this scan."
                .to_string()
        }
    }

    /// One-line summary for the log: findings, else `No-Tumor`, else `None`.
    pub fn log_summary(&self) -> String {
        if self.has_findings() {
            self.findings.join(", ")
        } else if self.no_tumor {
            "No-Tumor".to_string()
        } else {
            "None".to_string()
        }
    }

    /// Names to carry into follow-up questions; `None` when nothing was found.
    pub fn chatbot_context(&self) -> Option<Vec<String>> {
        self.has_findings().then(|| self.tumor_names.clone())
    }
}
