use super::subcommands::{
    AccountCommands, ContextCommands, InspirationCommands, LookbookCommands, PlannerCommands,
    ProfileCommands, WardrobeCommands,
};
use clap::{Parser, Subcommand};

/// `stylist` - outfit suggestions from your own closet.
#[derive(Parser, Debug)]
#[command(name = "stylist")]
#[command(version)]
#[command(
    about = "A personal stylist that dresses you from your own wardrobe.",
    long_about = None
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Register, sign in and out, export or import your data
    Account {
        #[command(subcommand)]
        account_command: AccountCommands,
    },

    /// Catalogue clothing photos
    Wardrobe {
        #[command(subcommand)]
        wardrobe_command: WardrobeCommands,
    },

    /// Manage mood-board images (max 6, oldest dropped first)
    Inspiration {
        #[command(subcommand)]
        inspiration_command: InspirationCommands,
    },

    /// Style DNA, body architecture and laundry cycle
    Profile {
        #[command(subcommand)]
        profile_command: ProfileCommands,
    },

    /// Today's event, weather, vibe and comfort level
    Context {
        #[command(subcommand)]
        context_command: ContextCommands,
    },

    /// Generate three looks (Classic, Practical, Bold) for the current context
    Style,

    /// Save, rate and browse looks you liked
    Lookbook {
        #[command(subcommand)]
        lookbook_command: LookbookCommands,
    },

    /// Plan outfits against calendar events
    Planner {
        #[command(subcommand)]
        planner_command: PlannerCommands,
    },

    /// Show configuration and account summary
    Status,
}
