//! Saved filter + tone combinations.

use serde::{Deserialize, Serialize};

use super::{FilterMode, ToneParameters};

/// A named filter mode with its brightness/contrast settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TonePreset {
    /// Display name (e.g., "Soft Sepia")
    pub name: String,

    pub mode: FilterMode,

    /// Ignored by sepia and high-contrast modes
    #[serde(default)]
    pub tone: ToneParameters,

    /// Optional notes or description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl TonePreset {
    pub fn new(name: impl Into<String>, mode: FilterMode, tone: ToneParameters) -> Self {
        Self {
            name: name.into(),
            mode,
            tone,
            notes: None,
        }
    }
}
