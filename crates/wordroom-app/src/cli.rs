use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use wordroom_core::TableLocation;

#[derive(Parser)]
#[command(name = "wordroom", version, about = "A personal vocabulary and dictionary")]
pub struct Cli {
    /// Emit logs as JSON
    #[arg(long, global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Search state the table is rendered with. Row locations refer to the
/// table as filtered by these options.
#[derive(Args, Clone, Default, Debug)]
pub struct SearchArgs {
    /// Only show words starting with QUERY; a `#` in the query turns on --full-text
    #[arg(short, long, default_value = "")]
    pub query: String,

    /// Also match QUERY inside notes
    #[arg(short, long)]
    pub full_text: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Define a word and add it to history
    Lookup {
        #[arg(required = true, num_args = 1..)]
        word: Vec<String>,
    },
    /// Save notes for a word; empty notes move it back to history
    Note {
        word: String,
        #[arg(default_value = "")]
        notes: String,
    },
    /// Print the notes saved for a word
    Show { word: String },
    /// List words by section
    List {
        #[command(flatten)]
        search: SearchArgs,
    },
    /// Delete rows, given as SECTION:ROW from `list`
    Delete {
        #[command(flatten)]
        search: SearchArgs,
        #[arg(required = true)]
        locations: Vec<TableLocation>,
    },
    /// Delete a word from whichever section holds it
    Remove { word: String },
    /// Show a random word with notes
    Random,
    /// Print rows (SECTION:ROW) with their notes for sharing
    Share {
        #[command(flatten)]
        search: SearchArgs,
        #[arg(required = true)]
        locations: Vec<TableLocation>,
    },
    /// Write the vocabulary to a file
    Export { path: PathBuf },
    /// Replace the vocabulary with a file
    Import {
        path: PathBuf,
        /// Confirm that current data will be overridden
        #[arg(long)]
        yes: bool,
    },
    /// Store the Wordnik API key used for online definitions
    SetKey { key: String },
}
