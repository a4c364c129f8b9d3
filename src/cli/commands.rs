use clap::{Args, Parser, Subcommand};

/// twig — a vim-style nested todo list for the terminal
#[derive(Debug, Parser)]
#[command(name = "tw", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Print the todo list to stdout
    List,
    /// Add a root-level todo without opening the TUI
    Add(AddArgs),
}

#[derive(Debug, Args)]
pub struct AddArgs {
    /// Todo text
    pub text: String,
}
