// CLI module
// Public interface for the command-line surface

mod commands;
pub mod render;

pub use commands::{run, Cli, Command, FeedCommand, GenerateArgs};
