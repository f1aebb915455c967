use chrono::NaiveDate;
use clap::Subcommand;
use std::fmt::Display;
use std::path::PathBuf;
use std::str::FromStr;
use strum::VariantArray;
use wardrobe_stylist::core::wardrobe::{ClothingCategory, ClothingClassification, ClothingFit};

fn parse_variant<T>(value: &str) -> Result<T, String>
where
    T: FromStr + VariantArray + Display,
{
    value.trim().parse().map_err(|_| {
        let expected: Vec<String> = T::VARIANTS.iter().map(ToString::to_string).collect();
        format!("expected one of: {}", expected.join(", "))
    })
}

/// Account and data-portability subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum AccountCommands {
    /// Create an account and sign in (password from STYLIST_PASSWORD or prompt)
    Register {
        #[arg(long)]
        email: String,
        #[arg(long)]
        name: String,
    },
    /// Sign in to an existing account
    Login {
        #[arg(long)]
        email: String,
    },
    /// Sign out and forget the last suggestions
    Logout,
    /// Show the signed-in account
    Whoami,
    /// Write a JSON backup of your styling data (stdout when no path is given)
    Export {
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Replace your styling data with a backup
    Import {
        path: PathBuf,
        /// Create a new account from the backup instead of overwriting the active one
        #[arg(long)]
        register: bool,
    },
    /// Permanently delete the signed-in account
    Delete,
}

/// Wardrobe subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum WardrobeCommands {
    /// Add a clothing photo; missing fields are filled in by the stylist
    Add {
        path: PathBuf,
        #[arg(long)]
        name: Option<String>,
        #[arg(long, value_parser = parse_variant::<ClothingCategory>)]
        category: Option<ClothingCategory>,
        #[arg(long)]
        color: Option<String>,
        #[arg(long, value_parser = parse_variant::<ClothingFit>)]
        fit: Option<ClothingFit>,
        #[arg(long, value_parser = parse_variant::<ClothingClassification>)]
        classification: Option<ClothingClassification>,
        #[arg(long)]
        style: Option<String>,
        #[arg(long)]
        material: Option<String>,
        /// Skip automatic classification
        #[arg(long)]
        no_classify: bool,
    },
    /// List items, optionally filtered
    List {
        #[arg(long, value_parser = parse_variant::<ClothingCategory>)]
        category: Option<ClothingCategory>,
        #[arg(long, value_parser = parse_variant::<ClothingFit>)]
        fit: Option<ClothingFit>,
        #[arg(long, value_parser = parse_variant::<ClothingClassification>)]
        classification: Option<ClothingClassification>,
        /// Case-insensitive colour substring
        #[arg(long)]
        color: Option<String>,
        /// Case-insensitive style substring
        #[arg(long)]
        style: Option<String>,
    },
    /// Remove an item (saved looks lose the reference)
    Remove { id: String },
    /// Record that an item was worn now
    Worn { id: String },
}

/// Mood board subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum InspirationCommands {
    /// Add a reference image
    Add { path: PathBuf },
    /// List reference images
    List,
    /// Remove a reference image
    Remove { id: String },
}

/// Style profile subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum ProfileCommands {
    /// Print the profile
    Show,
    /// Update fields; pass an empty string to clear one
    Set {
        #[arg(long)]
        aesthetic: Option<String>,
        #[arg(long)]
        silhouettes: Option<String>,
        /// Hard exclusions, never suggested
        #[arg(long)]
        forbidden: Option<String>,
        #[arg(long)]
        signature_colors: Option<String>,
        #[arg(long)]
        body_type: Option<String>,
        #[arg(long)]
        height: Option<String>,
        /// Pinterest account or board used as trend reference
        #[arg(long)]
        pinterest: Option<String>,
        #[arg(long)]
        laundry_cycle_days: Option<u32>,
    },
    /// Analyse a full-length photo for body architecture
    Analyze { photo: PathBuf },
}

/// Daily context subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum ContextCommands {
    /// Print today's context
    Show,
    /// Update fields; pass an empty string to clear one
    Set {
        #[arg(long)]
        event: Option<String>,
        #[arg(long)]
        weather: Option<String>,
        #[arg(long)]
        location: Option<String>,
        #[arg(long)]
        vibe: Option<String>,
        #[arg(long)]
        color: Option<String>,
        /// 1 (dress up) to 10 (maximum comfort)
        #[arg(long, value_parser = clap::value_parser!(u8).range(1..=10))]
        comfort: Option<u8>,
        /// Pinterest board for this request only
        #[arg(long)]
        pinterest: Option<String>,
    },
    /// Reset to defaults
    Clear,
}

/// Lookbook subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum LookbookCommands {
    /// Save suggestion <NUMBER> from the last `stylist style` run
    Save {
        number: usize,
        #[arg(long)]
        occasion: Option<String>,
        #[arg(long, requires = "style", value_parser = clap::value_parser!(u8).range(1..=5))]
        comfort: Option<u8>,
        #[arg(long, requires = "comfort", value_parser = clap::value_parser!(u8).range(1..=5))]
        style: Option<u8>,
        #[arg(long, requires = "comfort")]
        notes: Option<String>,
    },
    /// List saved looks, newest first
    List {
        #[arg(long)]
        occasion: Option<String>,
    },
    /// Rate a saved look
    Rate {
        id: String,
        #[arg(long, value_parser = clap::value_parser!(u8).range(1..=5))]
        comfort: u8,
        #[arg(long, value_parser = clap::value_parser!(u8).range(1..=5))]
        style: u8,
        #[arg(long, default_value = "")]
        notes: String,
    },
    /// Delete a saved look and unlink it from the planner
    Remove { id: String },
    /// List occasions in use plus the defaults
    Occasions,
}

/// Planner subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum PlannerCommands {
    /// Add a local event
    Add {
        #[arg(long)]
        date: NaiveDate,
        #[arg(long)]
        title: String,
        #[arg(long)]
        description: Option<String>,
    },
    /// List events in a window (default: the next 7 days)
    List {
        #[arg(long)]
        from: Option<NaiveDate>,
        #[arg(long, default_value_t = 7)]
        days: u64,
        /// Ignore the window and list everything
        #[arg(long, conflicts_with_all = ["from", "days"])]
        all: bool,
    },
    /// Remove an event
    Remove { id: String },
    /// Attach a saved look to an event
    Link { event_id: String, outfit_id: String },
    /// Detach the look from an event
    Unlink { event_id: String },
    /// Store a Google Calendar access token (prompted when omitted)
    Connect {
        #[arg(long)]
        token: Option<String>,
    },
    /// Forget the calendar token
    Disconnect,
    /// Pull upcoming events from Google Calendar
    Sync,
}
