//! Command-line interface

pub mod serve;

use clap::{Parser, Subcommand};

/// Movie Catalogue API server
#[derive(Parser)]
#[command(name = "movie-catalogue-api")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the API server
    Serve,
}
