pub mod commands;
mod subcommands;

pub use subcommands::{
    AccountCommands, ContextCommands, InspirationCommands, LookbookCommands, PlannerCommands,
    ProfileCommands, WardrobeCommands,
};
