use thiserror::Error;

// ─── Top-level error hierarchy ───────────────────────────────────────────────

/// Structured error hierarchy for the stylist.
///
/// Each subsystem defines its own error variant. Library callers can match on
/// these to decide what to show the user; internal plumbing keeps using
/// `anyhow::Result` for context chains.
#[derive(Debug, Error)]
pub enum StylistError {
    // ── Config ───────────────────────────────────────────────────────────
    #[error("config: {0}")]
    Config(#[from] ConfigError),

    // ── LLM / Provider ──────────────────────────────────────────────────
    #[error("llm: {0}")]
    Llm(#[from] LlmError),

    // ── Styling (generation, analysis) ──────────────────────────────────
    #[error("{0}")]
    Style(#[from] StyleError),

    // ── Persistence ─────────────────────────────────────────────────────
    #[error("store: {0}")]
    Store(#[from] StoreError),

    // ── Accounts / session ──────────────────────────────────────────────
    #[error("account: {0}")]
    Account(#[from] AccountError),

    // ── Wardrobe / inspiration ──────────────────────────────────────────
    #[error("wardrobe: {0}")]
    Wardrobe(#[from] WardrobeError),

    // ── Lookbook / planner ──────────────────────────────────────────────
    #[error("lookbook: {0}")]
    Lookbook(#[from] LookbookError),

    // ── External calendar ───────────────────────────────────────────────
    #[error("calendar: {0}")]
    Calendar(#[from] CalendarError),

    // ── Generic fallthrough (wraps anyhow for interop) ──────────────────
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

// ─── Config errors ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load config: {0}")]
    Load(String),

    #[error("validation failed: {0}")]
    Validation(String),

    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}

// ─── LLM / Provider errors ──────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("provider {provider} request failed: {message}")]
    Request { provider: String, message: String },

    #[error("provider {provider} rate-limited")]
    RateLimited { provider: String },

    #[error("provider {provider} authentication failed")]
    Auth { provider: String },

    #[error("provider {provider} returned no candidates")]
    EmptyResponse { provider: String },

    #[error("request timed out after {secs}s")]
    Timeout { secs: u64 },

    #[error("response did not match the declared schema: {0}")]
    Schema(String),
}

// ─── Styling errors ─────────────────────────────────────────────────────────

/// User-facing failures of the styling operations.
///
/// Model-call details are logged where they happen; callers only ever see one
/// of these variants.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StyleError {
    #[error("Upload your clothing pieces first ({available} of {required} needed).")]
    InsufficientWardrobe { available: usize, required: usize },

    #[error("A styling request is already in progress.")]
    GenerationInProgress,

    #[error("Our stylist is gathering current trends. Please try again.")]
    StylingFailed,

    #[error("Proportion analysis failed. Please use a clear full-length photo.")]
    AnalysisFailed,
}

// ─── Store errors ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("record for {0} is corrupt: {1}")]
    Corrupt(String, String),

    #[error("io: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization: {0}")]
    Serde(#[from] serde_json::Error),
}

// ─── Account errors ─────────────────────────────────────────────────────────

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AccountError {
    #[error("an account for {0} already exists")]
    AlreadyExists(String),

    #[error("no account found for {0}")]
    NotFound(String),

    #[error("invalid email or password")]
    InvalidCredentials,

    #[error("not signed in; run `stylist account login` first")]
    NotSignedIn,

    #[error("invalid input: {0}")]
    InvalidInput(String),
}

// ─── Wardrobe errors ────────────────────────────────────────────────────────

#[derive(Debug, Error, PartialEq, Eq)]
pub enum WardrobeError {
    #[error("wardrobe item {0} not found")]
    ItemNotFound(String),

    #[error("inspiration image {0} not found")]
    InspirationNotFound(String),
}

// ─── Lookbook / planner errors ──────────────────────────────────────────────

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LookbookError {
    #[error("saved outfit {0} not found")]
    OutfitNotFound(String),

    #[error("calendar event {0} not found")]
    EventNotFound(String),

    #[error("no suggestion #{0} in the current session")]
    SuggestionNotFound(usize),

    #[error("{field} rating must be between 1 and 5 (got {value})")]
    RatingOutOfRange { field: &'static str, value: u8 },
}

// ─── Calendar errors ────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum CalendarError {
    #[error("no calendar connected; run `stylist planner connect` first")]
    NotConnected,

    #[error("calendar request failed: {0}")]
    Request(String),
}

// ─── Convenience re-exports ─────────────────────────────────────────────────

/// Shorthand result type for the crate.
pub type Result<T> = std::result::Result<T, StylistError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_error_displays_correctly() {
        let err = StylistError::Config(ConfigError::Validation("bad temp".into()));
        assert!(err.to_string().contains("validation failed"));
    }

    #[test]
    fn styling_failure_is_one_generic_message() {
        let err = StylistError::Style(StyleError::StylingFailed);
        assert_eq!(
            err.to_string(),
            "Our stylist is gathering current trends. Please try again."
        );
    }

    #[test]
    fn insufficient_wardrobe_mentions_counts() {
        let err = StyleError::InsufficientWardrobe {
            available: 1,
            required: 2,
        };
        assert!(err.to_string().contains("1 of 2"));
    }

    #[test]
    fn anyhow_interop() {
        let anyhow_err = anyhow::anyhow!("something went wrong");
        let err: StylistError = anyhow_err.into();
        assert!(err.to_string().contains("something went wrong"));
    }

    #[test]
    fn rating_out_of_range_names_field() {
        let err = LookbookError::RatingOutOfRange {
            field: "comfort",
            value: 9,
        };
        assert!(err.to_string().contains("comfort"));
        assert!(err.to_string().contains('9'));
    }
}
