//! Class table of the brain tumor checkpoint: index → name → severity.
//!
//! Order follows the dataset the checkpoint was trained on:
//! 0 Glioma, 1 Meningioma, 2 No-Tumor, 3 Pituitary.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Severity level shown next to each finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Severity {
    High,
    Medium,
    Low,
}

impl Severity {
    pub fn label(&self) -> &'static str {
        match self {
            Severity::High => "High Severity",
            Severity::Medium => "Medium Severity",
            Severity::Low => "Low Severity",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A class predicted by the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TumorClass {
    Glioma,
    Meningioma,
    NoTumor,
    Pituitary,
    /// Index outside the table (e.g. a checkpoint with extra classes).
    Unknown(usize),
}

/// Label used for indices outside the table.
pub const UNKNOWN_TYPE: &str = "Unknown Type";

/// Severity label used when a class has no entry in the severity table.
pub const UNKNOWN_SEVERITY: &str = "Unknown Severity";

impl TumorClass {
    pub fn from_id(id: usize) -> Self {
        match id {
            0 => TumorClass::Glioma,
            1 => TumorClass::Meningioma,
            2 => TumorClass::NoTumor,
            3 => TumorClass::Pituitary,
            other => TumorClass::Unknown(other),
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            TumorClass::Glioma => "Glioma Tumor",
            TumorClass::Meningioma => "Meningioma Tumor",
            TumorClass::NoTumor => "No-Tumor",
            TumorClass::Pituitary => "Pituitary Tumor",
            TumorClass::Unknown(_) => UNKNOWN_TYPE,
        }
    }

    /// `None` for No-Tumor and unknown classes.
    pub fn severity(&self) -> Option<Severity> {
        match self {
            TumorClass::Glioma => Some(Severity::High),
            TumorClass::Meningioma => Some(Severity::Low),
            TumorClass::Pituitary => Some(Severity::Medium),
            TumorClass::NoTumor | TumorClass::Unknown(_) => None,
        }
    }

    pub fn severity_label(&self) -> &'static str {
        self.severity().map(|s| s.label()).unwrap_or(UNKNOWN_SEVERITY)
    }

    pub fn is_no_tumor(&self) -> bool {
        matches!(self, TumorClass::NoTumor)
    }

    /// Box color on the annotated image. Matches [`TumorClass::marker`] so the caption works as
    /// a legend.
    pub fn color(&self) -> [u8; 3] {
        match self {
            TumorClass::Glioma => [0xFF, 0x38, 0x38],
            TumorClass::Meningioma => [0x1E, 0x90, 0xFF],
            TumorClass::NoTumor => [0x48, 0xF9, 0x0A],
            TumorClass::Pituitary => [0xFF, 0x70, 0x1F],
            TumorClass::Unknown(_) => [0xFF, 0xFF, 0xFF],
        }
    }

    /// Colored square shown before the finding in the caption.
    pub fn marker(&self) -> &'static str {
        match self {
            TumorClass::Glioma => "🟥",
            TumorClass::Meningioma => "🟦",
            TumorClass::NoTumor => "🟩",
            TumorClass::Pituitary => "🟧",
            TumorClass::Unknown(_) => "⬜",
        }
    }
}

impl fmt::Display for TumorClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}
