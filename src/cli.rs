use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "postgres-to-docs")]
#[command(version, about = "Generate Markdown documentation from a PostgreSQL catalog")]
pub struct Cli {
    /// JSON file with host, port, user, password and database
    #[arg(long)]
    pub config: PathBuf,

    /// Markdown file to write
    #[arg(long)]
    pub output: PathBuf,
}

impl Cli {
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
