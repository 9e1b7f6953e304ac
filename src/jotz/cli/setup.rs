use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "jotz", bin_name = "jotz", version)]
#[command(about = "Pin-aware sticky notes for the command line", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Verbose output (debug logging on stderr)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum Theme {
    Dark,
    Light,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Add a new note
    #[command(alias = "n", display_order = 1)]
    Add {
        /// Background color token (defaults to the configured default-color)
        #[arg(short, long, conflicts_with = "gradient")]
        color: Option<String>,

        /// Background gradient token
        #[arg(short, long)]
        gradient: Option<String>,

        /// Note text (words are joined with spaces)
        #[arg(required = true, num_args = 1.., trailing_var_arg = true)]
        text: Vec<String>,
    },

    /// List notes, pinned first
    #[command(alias = "ls", display_order = 2)]
    List {
        /// Only show notes containing this text (case-insensitive)
        #[arg(short, long)]
        search: Option<String>,
    },

    /// Replace the text of a note
    #[command(alias = "e", display_order = 3)]
    Edit {
        /// Position of the note, as shown by `list`
        position: usize,

        /// New text (words are joined with spaces)
        #[arg(required = true, num_args = 1.., trailing_var_arg = true)]
        text: Vec<String>,
    },

    /// Delete a note
    #[command(alias = "rm", display_order = 4)]
    Delete {
        /// Position of the note, as shown by `list`
        position: usize,
    },

    /// Pin or unpin a note
    #[command(alias = "p", display_order = 5)]
    Pin {
        /// Position of the note, as shown by `list`
        position: usize,
    },

    /// Move a note to another position
    #[command(alias = "mv", display_order = 6)]
    Move {
        /// Current position of the note
        from: usize,

        /// Position the note should end up at
        to: usize,
    },

    /// Show or set the display theme
    #[command(display_order = 7)]
    Theme {
        /// Theme to switch to (prints the current one if omitted)
        #[arg(value_enum)]
        theme: Option<Theme>,
    },

    /// Get or set configuration
    #[command(display_order = 8)]
    Config {
        /// Configuration key (default-color, preview-width)
        key: Option<String>,

        /// Value to set (if omitted, prints current value)
        value: Option<String>,
    },
}
