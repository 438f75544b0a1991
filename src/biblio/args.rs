use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "biblio")]
#[command(about = "File-backed library management from the command line", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Data directory (defaults to $BIBLIO_DATA, then the platform data dir)
    #[arg(short, long, global = true)]
    pub data_dir: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Add a book to the catalog
    #[command(alias = "a")]
    Add {
        title: String,
        author: String,
        /// One of: Fiction, Non-Fiction, Science, History, Technology
        genre: String,
    },

    /// Register a new borrower
    #[command(alias = "reg")]
    Register { name: String, email: String },

    /// Check a book out to a borrower
    #[command(alias = "co")]
    Checkout {
        book_id: String,
        borrower_id: String,
    },

    /// Return a checked-out book
    #[command(alias = "ret")]
    Return {
        book_id: String,
        borrower_id: String,
    },

    /// List the whole catalog
    #[command(alias = "ls")]
    List {
        /// List borrowers instead of books
        #[arg(long)]
        borrowers: bool,
    },

    /// List books currently available for checkout
    #[command(alias = "av")]
    Available,

    /// Search books by field (all given criteria must match)
    Search {
        #[arg(long)]
        title: Option<String>,

        #[arg(long)]
        author: Option<String>,

        #[arg(long)]
        genre: Option<String>,

        #[arg(long)]
        available: Option<bool>,
    },

    /// Show the books a borrower currently holds
    Borrowed { borrower_id: String },

    /// Show catalog statistics
    Stats,

    /// Check referential integrity between books and borrowers
    Doctor,
}
