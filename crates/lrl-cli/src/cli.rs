use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "lrl",
    about = "Land Register Ledger: land registers and reservation notes",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// World-state file.
    #[arg(long, global = true, default_value = "lrl-state.json")]
    pub store: PathBuf,

    /// Contract configuration (TOML).
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Seed the ledger with the sample land register
    Init,
    /// Show one land register by key
    Query(QueryArgs),
    /// List every land register
    List,
    /// Create a land register from JSON
    Create(DocumentArgs),
    /// Attach a reservation note from a JSON request
    Reserve(DocumentArgs),
    /// Invoke a contract operation by name
    Invoke(InvokeArgs),
    /// Print the effective configuration
    Config,
}

#[derive(Args)]
pub struct QueryArgs {
    pub id: String,
}

#[derive(Args)]
pub struct DocumentArgs {
    /// Inline JSON, or `@path` to read it from a file.
    pub document: String,
}

#[derive(Args)]
pub struct InvokeArgs {
    pub function: String,
    pub args: Vec<String>,
}
