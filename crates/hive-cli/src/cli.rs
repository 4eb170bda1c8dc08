use std::path::PathBuf;

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use hive_core::editor::FormatAction;
use hive_core::Category;

#[derive(Parser)]
#[command(name = "hive")]
#[command(about = "Keep your notes in the hive from the command line")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Quick capture: hive "my thought here"
    #[arg(trailing_var_arg = true)]
    pub note: Vec<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create a new note
    #[command(alias = "new")]
    Add {
        /// Note content (read from stdin or $EDITOR when omitted)
        content: Vec<String>,
        /// general, idea, todo or heart
        #[arg(short, long, default_value = "general")]
        category: Category,
        /// File to upload and attach
        #[arg(long, value_name = "PATH")]
        attach: Option<PathBuf>,
    },
    /// List notes, newest first
    List {
        /// Only notes containing this text (case-insensitive)
        #[arg(short, long)]
        search: Option<String>,
        /// Show whole notes instead of collapsed previews
        #[arg(long)]
        full: bool,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Edit an existing note in $EDITOR
    Edit {
        /// Note ID or unique ID prefix
        id: String,
        /// Move the note to another category
        #[arg(short, long)]
        category: Option<Category>,
    },
    /// Delete an existing note
    Delete {
        /// Note ID or unique ID prefix
        id: String,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// Work with the locally saved draft
    Draft {
        #[command(subcommand)]
        command: DraftCommands,
    },
    /// Generate shell completion scripts
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: Shell,
        /// Optional output path (stdout when omitted)
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,
    },
    /// Sign up, sign in or out of your account
    Auth {
        #[command(subcommand)]
        command: AuthCommands,
    },
}

#[derive(Subcommand)]
pub enum AuthCommands {
    /// Create an account
    Signup {
        #[arg(long, value_name = "EMAIL", default_value = "")]
        email: String,
        #[arg(long, value_name = "PASSWORD", default_value = "")]
        password: String,
    },
    /// Sign in and store the session in the keychain
    Login {
        #[arg(long, value_name = "EMAIL", default_value = "")]
        email: String,
        #[arg(long, value_name = "PASSWORD", default_value = "")]
        password: String,
    },
    /// Show who is signed in
    Status,
    /// Sign out and clear the stored session
    Logout,
}

#[derive(Subcommand)]
pub enum DraftCommands {
    /// Print the saved draft
    Show,
    /// Replace the saved draft
    Set {
        /// Draft text
        text: Vec<String>,
    },
    /// Throw the saved draft away
    Discard {
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// Apply a toolbar action to the draft
    Format {
        /// bold, italic, strike, bullet or number
        action: FormatAction,
        /// Selection start in characters (end of draft when omitted)
        #[arg(long)]
        start: Option<usize>,
        /// Selection end in characters (same as start when omitted)
        #[arg(long)]
        end: Option<usize>,
    },
    /// Press Enter in the draft, continuing lists
    Newline {
        /// Cursor position in characters (end of draft when omitted)
        #[arg(long)]
        at: Option<usize>,
    },
}
