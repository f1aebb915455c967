use serde::{Deserialize, Serialize};

pub const DEFAULT_COMFORT: u8 = 5;
pub const MAX_COMFORT: u8 = 10;

fn default_comfort() -> u8 {
    DEFAULT_COMFORT
}

/// Situational inputs for one day's styling request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyContext {
    #[serde(default)]
    pub event: String,
    #[serde(default)]
    pub weather: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub vibe: String,
    #[serde(default)]
    pub color: String,
    /// 1 (dress up) to 10 (maximum comfort).
    #[serde(default = "default_comfort")]
    pub comfort: u8,
    #[serde(default)]
    pub pinterest_url: String,
}

impl Default for DailyContext {
    fn default() -> Self {
        Self {
            event: String::new(),
            weather: String::new(),
            location: String::new(),
            vibe: String::new(),
            color: String::new(),
            comfort: DEFAULT_COMFORT,
            pinterest_url: String::new(),
        }
    }
}

fn or_default<'a>(value: &'a str, fallback: &'a str) -> &'a str {
    let trimmed = value.trim();
    if trimmed.is_empty() { fallback } else { trimmed }
}

impl DailyContext {
    /// Free-text situational prompt appended after the images.
    pub fn situational_prompt(&self) -> String {
        format!(
            "COMFORT RATING: {}/{MAX_COMFORT}\n\
             LOCATION: {}\n\
             WEATHER: {}\n\
             EVENT: {}\n\
             VIBE: {}\n\
             COLOR PREF: {}",
            self.comfort.clamp(1, MAX_COMFORT),
            or_default(&self.location, "Unknown"),
            or_default(&self.weather, "Unspecified"),
            or_default(&self.event, "Daily Life"),
            or_default(&self.vibe, "Sophisticated"),
            or_default(&self.color, "Balanced"),
        )
    }

    /// The board for this request, falling back to the profile's account.
    pub fn trend_reference<'a>(&'a self, profile_board: Option<&'a str>) -> Option<&'a str> {
        let own = self.pinterest_url.trim();
        if !own.is_empty() {
            return Some(own);
        }
        profile_board.map(str::trim).filter(|board| !board.is_empty())
    }
}
