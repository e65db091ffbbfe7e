//! Command line arguments.

use std::path::PathBuf;

use clap::Parser;

use crate::display::DisplayConfig;
use crate::tree::Tree;

/// Keep a binary search tree of integers loaded from a file and edit it from a menu
#[derive(Parser, Debug)]
#[command(name = "intbst")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Integer data file to load; prompted for when omitted
    #[arg(short, long, env = "INTBST_FILE")]
    pub file: Option<PathBuf>,

    /// Values printed per row
    #[arg(long, env = "INTBST_COLUMNS", default_value_t = 10,
          value_parser = clap::value_parser!(u16).range(1..))]
    pub columns: u16,

    /// Width each printed value is right-aligned to
    #[arg(long, env = "INTBST_WIDTH", default_value_t = 6)]
    pub width: u16,

    /// Refuse to hold more than this many nodes
    #[arg(long, env = "INTBST_MAX_NODES")]
    pub max_nodes: Option<usize>,

    /// Log to stderr, repeat for more detail (-d info, -dd debug, -ddd trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub debug: u8,
}

impl Cli {
    /// Layout for printed values.
    pub fn display_config(&self) -> DisplayConfig {
        DisplayConfig {
            columns: usize::from(self.columns),
            width: usize::from(self.width),
        }
    }

    /// An empty tree honoring `--max-nodes`.
    pub fn build_tree(&self) -> Tree {
        match self.max_nodes {
            Some(limit) => Tree::with_node_limit(limit),
            None => Tree::new(),
        }
    }
}
