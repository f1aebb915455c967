use crate::error::AccountError;
use crate::media::ImagePayload;
use serde::{Deserialize, Serialize};

pub const DEFAULT_LAUNDRY_CYCLE_DAYS: u32 = 7;

fn default_laundry_cycle_days() -> u32 {
    DEFAULT_LAUNDRY_CYCLE_DAYS
}

/// Body-architecture read-out from a full-length photo.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BodyAnalysis {
    pub body_shape: String,
    pub proportions: String,
    pub suggested_focus: String,
    pub height_estimate: String,
}

/// The user's permanent style constraints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StyleProfile {
    #[serde(default)]
    pub aesthetic: String,
    #[serde(default)]
    pub silhouettes: String,
    /// Hard exclusions; never suggested.
    #[serde(default)]
    pub forbidden: String,
    #[serde(default)]
    pub signature_colors: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ai_analysis: Option<BodyAnalysis>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub analysis_photo: Option<ImagePayload>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pinterest_profile: Option<String>,
    #[serde(default = "default_laundry_cycle_days")]
    pub laundry_cycle_days: u32,
}

impl Default for StyleProfile {
    fn default() -> Self {
        Self {
            aesthetic: String::new(),
            silhouettes: String::new(),
            forbidden: String::new(),
            signature_colors: String::new(),
            body_type: None,
            height: None,
            ai_analysis: None,
            analysis_photo: None,
            pinterest_profile: None,
            laundry_cycle_days: DEFAULT_LAUNDRY_CYCLE_DAYS,
        }
    }
}

/// Partial profile edit; `None` leaves a field untouched, an empty string clears it.
#[derive(Debug, Clone, Default)]
pub struct ProfileUpdate {
    pub aesthetic: Option<String>,
    pub silhouettes: Option<String>,
    pub forbidden: Option<String>,
    pub signature_colors: Option<String>,
    pub body_type: Option<String>,
    pub height: Option<String>,
    pub pinterest_profile: Option<String>,
    pub laundry_cycle_days: Option<u32>,
}

fn non_empty(value: String) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

impl StyleProfile {
    pub fn apply(&mut self, update: ProfileUpdate) -> Result<(), AccountError> {
        if let Some(days) = update.laundry_cycle_days {
            if days == 0 {
                return Err(AccountError::InvalidInput(
                    "laundry cycle must be at least 1 day".into(),
                ));
            }
            self.laundry_cycle_days = days;
        }
        if let Some(value) = update.aesthetic {
            self.aesthetic = value.trim().to_string();
        }
        if let Some(value) = update.silhouettes {
            self.silhouettes = value.trim().to_string();
        }
        if let Some(value) = update.forbidden {
            self.forbidden = value.trim().to_string();
        }
        if let Some(value) = update.signature_colors {
            self.signature_colors = value.trim().to_string();
        }
        if let Some(value) = update.body_type {
            self.body_type = non_empty(value);
        }
        if let Some(value) = update.height {
            self.height = non_empty(value);
        }
        if let Some(value) = update.pinterest_profile {
            self.pinterest_profile = non_empty(value);
        }
        Ok(())
    }

    /// Store a fresh analysis and mirror its shape and height into the raw fields.
    pub fn record_analysis(&mut self, analysis: BodyAnalysis, photo: ImagePayload) {
        self.body_type = Some(analysis.body_shape.clone());
        self.height = Some(analysis.height_estimate.clone());
        self.ai_analysis = Some(analysis);
        self.analysis_photo = Some(photo);
    }
}
