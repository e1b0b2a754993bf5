//! Shared result alias and the command-line subcommands.
use clap::Subcommand;

use crate::GardenError;

/// A specialized Result type for littlegarden operations.
pub type Result<T> = std::result::Result<T, GardenError>;

/// Available subcommands for the garden application
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show a month as a 6x7 grid with flower counts per day
    Month {
        /// Month to show (YYYY-MM), defaults to the current month
        #[clap(short, long)]
        month: Option<String>,

        /// Move this many months forward (or backward when negative)
        #[clap(short, long, default_value_t = 0, allow_hyphen_values = true)]
        offset: i32,

        /// Format output as JSON
        #[clap(short, long)]
        json: bool,
    },

    /// List the notes planted on a day
    Day {
        /// Day to show (YYYY-MM-DD or "today")
        date: String,

        /// Format output as JSON
        #[clap(short, long)]
        json: bool,
    },

    /// Plant a note on a day
    Add {
        /// Day to plant on (YYYY-MM-DD or "today")
        date: String,

        /// positive (red) or needs-work (blue)
        #[clap(short = 't', long = "type")]
        note_type: String,

        /// Note text
        #[clap(short, long)]
        content: Option<String>,

        /// Write the note in the configured editor
        #[clap(short, long)]
        edit: bool,
    },

    /// Delete a note from a day
    Delete {
        /// Day holding the note (YYYY-MM-DD or "today")
        date: String,

        /// ID of the note to delete
        id: String,

        /// Skip confirmation prompt
        #[clap(short, long)]
        force: bool,
    },

    /// Configuration management
    Config {
        /// Show current configuration
        #[clap(short = 'S', long)]
        show: bool,
    },
}
