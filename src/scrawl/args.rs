use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "scrawl")]
#[command(version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("GIT_HASH"), ")"))]
#[command(about = "Markdown notes with live decoration and freehand drawing", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Notes directory (defaults to the platform data dir)
    #[arg(short, long, global = true)]
    pub dir: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create a new note
    #[command(alias = "n")]
    Create {
        /// Title of the note
        title: String,

        /// Content of the note
        #[arg(required = false)]
        content: Option<String>,
    },

    /// List notes
    #[command(alias = "ls")]
    List {
        /// Search term
        #[arg(short, long)]
        search: Option<String>,

        /// Include archived notes
        #[arg(long)]
        archived: bool,
    },

    /// View one or more notes
    #[command(alias = "v")]
    View {
        /// Indexes of the notes (e.g. 1 p1 a1) or a title search
        #[arg(required = true, num_args = 1..)]
        indexes: Vec<String>,
    },

    /// Delete one or more notes
    #[command(alias = "rm")]
    Delete {
        /// Indexes of the notes (e.g. 1 3 5)
        #[arg(required = true, num_args = 1..)]
        indexes: Vec<String>,
    },

    /// Rename a note
    Rename {
        /// Index of the note
        index: String,

        /// New title
        title: String,
    },

    /// Pin one or more notes
    #[command(alias = "p")]
    Pin {
        #[arg(required = true, num_args = 1..)]
        indexes: Vec<String>,
    },

    /// Unpin one or more notes
    #[command(alias = "u")]
    Unpin {
        #[arg(required = true, num_args = 1..)]
        indexes: Vec<String>,
    },

    /// Move notes to the archive
    Archive {
        #[arg(required = true, num_args = 1..)]
        indexes: Vec<String>,
    },

    /// Restore notes from the archive
    Unarchive {
        #[arg(required = true, num_args = 1..)]
        indexes: Vec<String>,
    },

    /// Archive notes whose expiry has passed
    Housekeep,

    /// Get or set configuration
    Config {
        /// Configuration key (e.g., expiry-days)
        key: Option<String>,

        /// Value to set (if omitted, prints current config)
        value: Option<String>,
    },

    /// Export notes as a tar.gz backup
    Export {
        /// Indexes to export (default: everything not archived)
        #[arg(num_args = 0..)]
        indexes: Vec<String>,
    },

    /// Render a note's HTML preview
    Render {
        /// Index of the note
        index: String,

        /// Write HTML here instead of stdout
        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// Dump a note's decorated attribute runs (diagnostic)
    Inspect {
        /// Index of the note
        index: String,

        /// Syntax-highlight-only mode: no marker hiding, no substitution
        #[arg(long)]
        raw: bool,
    },

    /// Rasterize a note's drawing to a PNG file
    #[command(name = "export-drawing")]
    ExportDrawing {
        /// Index of the note
        index: String,

        /// Output PNG path
        out: PathBuf,
    },
}
