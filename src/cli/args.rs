//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueHint};

use crate::application::services::SourceKind;

/// Size-aggregating trees drawn as treemaps: lay out, hit-test and edit
#[derive(Parser, Debug)]
#[command(name = "rstreemap")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Turn debugging information on (repeat for more)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub debug: u8,

    /// Config file layered over the global config
    #[arg(long, global = true, value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    /// Seed for node colors (reproducible output)
    #[arg(long, global = true, env = "RSTREEMAP_SEED")]
    pub seed: Option<u64>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print one rectangle per leaf: x y width height color
    Layout {
        #[command(flatten)]
        source: SourceArgs,
        #[command(flatten)]
        viewport: ViewportArgs,
    },

    /// Print the leaf under a point
    Locate {
        #[command(flatten)]
        source: SourceArgs,
        #[command(flatten)]
        viewport: ViewportArgs,
        /// X coordinate
        #[arg(short, allow_negative_numbers = true)]
        x: i32,
        /// Y coordinate
        #[arg(short, allow_negative_numbers = true)]
        y: i32,
    },

    /// Show the aggregated hierarchy
    Tree {
        #[command(flatten)]
        source: SourceArgs,
    },

    /// Drive the tree with events read from stdin
    ///
    /// One event per line: `click X Y`, `delete X Y`, `grow`, `shrink`,
    /// `frame`, `quit`.
    Session {
        #[command(flatten)]
        source: SourceArgs,
        #[command(flatten)]
        viewport: ViewportArgs,
    },

    /// Manage settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

/// Where the tree comes from.
#[derive(Args, Debug, Clone)]
pub struct SourceArgs {
    /// Directory to map
    #[arg(
        value_hint = ValueHint::DirPath,
        required_unless_present = "population",
        conflicts_with = "population"
    )]
    pub path: Option<PathBuf>,

    /// Map world population by region (World Bank data)
    #[arg(long)]
    pub population: bool,
}

impl SourceArgs {
    pub fn kind(&self) -> SourceKind {
        match &self.path {
            Some(path) if !self.population => SourceKind::FileSystem(path.clone()),
            _ => SourceKind::Population,
        }
    }
}

/// Overrides for the configured viewport.
#[derive(Args, Debug, Clone, Default)]
pub struct ViewportArgs {
    /// Viewport width
    #[arg(long)]
    pub width: Option<u32>,

    /// Viewport height
    #[arg(long)]
    pub height: Option<u32>,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show merged config
    Show,

    /// Show config paths
    Path,
}
