use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use notekeepapp::config::Backend;
use notekeepapp::error::NoteError;
use notekeepapp::model::Color;

#[derive(Parser, Debug)]
#[command(
    name = "notekeep",
    version,
    about = "A keep-style note board for the terminal",
    long_about = "A keep-style note board: pin, color, archive, and trash short notes.\n\
                  Runs against a local data file by default, or against a remote\n\
                  notekeep server when configured with the remote backend."
)]
pub struct Cli {
    /// Path to a config file (defaults to the OS config directory).
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Override the local data file.
    #[arg(long, global = true, value_name = "FILE")]
    pub data: Option<PathBuf>,

    /// Override the configured store backend.
    #[arg(long, global = true, value_enum)]
    pub backend: Option<BackendArg>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum BackendArg {
    Local,
    Remote,
}

impl From<BackendArg> for Backend {
    fn from(arg: BackendArg) -> Self {
        match arg {
            BackendArg::Local => Backend::Local,
            BackendArg::Remote => Backend::Remote,
        }
    }
}

pub fn parse_color(s: &str) -> Result<Color, String> {
    s.parse().map_err(|e: NoteError| e.to_string())
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List active notes (the default when no command is given)
    List,
    /// List archived notes
    Archived,
    /// List trashed notes
    Trash,
    /// Show one note in full
    Show {
        /// Note id, or a unique prefix of one
        id: String,
    },
    /// Create a note
    Add {
        title: String,
        /// Note body (optional)
        content: Option<String>,
        /// Color token for the new note
        #[arg(long, value_parser = parse_color)]
        color: Option<Color>,
        /// Pin the note immediately
        #[arg(long)]
        pin: bool,
    },
    /// Change the title or body of a note
    Edit {
        id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        content: Option<String>,
    },
    /// Recolor a note
    Color {
        id: String,
        #[arg(value_parser = parse_color)]
        color: Color,
    },
    /// Pin a note to the top of the board
    Pin { id: String },
    /// Unpin a note
    Unpin { id: String },
    /// Archive a note, or unarchive it if already archived
    Archive { id: String },
    /// Append an inline image reference to a note's body
    Image { id: String, url: String },
    /// Move a note to the trash
    Delete { id: String },
    /// Take a note out of the trash
    Restore { id: String },
    /// Permanently remove a note
    Purge { id: String },
    /// Run the REST API server
    Serve {
        /// Address to bind, e.g. 127.0.0.1:5000
        #[arg(long)]
        listen: Option<String>,
    },
}
