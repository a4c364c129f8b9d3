use clap::Parser;
use twig::cli::commands::{Cli, Commands};
use twig::cli::handlers;

fn main() {
    let cli = Cli::parse();

    match cli.command {
        None => {
            // No subcommand → launch TUI
            if let Err(e) = twig::tui::run() {
                eprintln!("error: {}", e);
                std::process::exit(1);
            }
        }
        Some(Commands::List) => {
            if let Err(e) = handlers::cmd_list() {
                eprintln!("error: {}", e);
                std::process::exit(1);
            }
        }
        Some(Commands::Add(args)) => {
            if let Err(e) = handlers::cmd_add(args) {
                eprintln!("error: {}", e);
                std::process::exit(1);
            }
        }
    }
}
