//! CLI argument definitions

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// phrase-tagger: build a word hierarchy and classify phrases against it
#[derive(Parser, Debug)]
#[command(name = "phrase-tagger")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Override the hierarchy JSON file
    #[arg(long, global = true)]
    pub hierarchy: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Classify a phrase against the hierarchy
    Classify(ClassifyArgs),

    /// Inspect and edit the hierarchy
    Hierarchy(HierarchyArgs),

    /// Configuration management
    Config(ConfigArgs),

    /// Validate configuration and show status
    Doctor(DoctorArgs),
}

#[derive(Args, Debug)]
pub struct ClassifyArgs {
    /// Maximum hierarchy depth to search (root categories are depth 1)
    #[arg(long, allow_negative_numbers = true)]
    pub depth: i64,

    /// Phrase to classify
    #[arg(long)]
    pub phrase: String,

    /// Print hierarchy load and phrase verification timings
    #[arg(long)]
    pub verbose: bool,

    /// Output the match tally as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct HierarchyArgs {
    #[command(subcommand)]
    pub command: HierarchyCommands,
}

#[derive(Subcommand, Debug)]
pub enum HierarchyCommands {
    /// Print the hierarchy as an indented tree
    Show {
        /// Output the raw JSON document
        #[arg(long)]
        json: bool,
    },

    /// Add a word or category
    Add {
        /// Dot-separated path of the parent category (empty for root)
        #[arg(long, default_value = "")]
        category: String,

        /// Word or category name to add
        #[arg(long)]
        word: String,
    },

    /// Rename a word or category, keeping everything below it
    Edit {
        /// Dot-separated path of the parent category (empty for root)
        #[arg(long, default_value = "")]
        category: String,

        /// Current name
        #[arg(long)]
        old: String,

        /// New name
        #[arg(long)]
        new: String,
    },

    /// Delete a word or category and everything below it
    Delete {
        /// Dot-separated path of the parent category (empty for root)
        #[arg(long, default_value = "")]
        category: String,

        /// Word or category name to delete
        #[arg(long)]
        word: String,
    },

    /// Validate the hierarchy file
    Validate,
}

#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Generate example configuration file
    Init {
        /// Path to write config file
        #[arg(long, default_value = "./config.toml")]
        path: PathBuf,

        /// Overwrite existing file
        #[arg(long)]
        force: bool,
    },
}

#[derive(Args, Debug)]
pub struct DoctorArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}
