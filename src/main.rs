use clap::Parser;
use cloze::cli::commands::{Cli, Commands};
use cloze::cli::handlers;

fn main() {
    let cli = Cli::parse();
    let bank_dir = cli.bank_dir.clone();

    match cli.command {
        None => {
            // No subcommand → launch TUI
            if let Err(e) = cloze::tui::run(bank_dir.as_deref()) {
                eprintln!("error: {}", e);
                std::process::exit(1);
            }
        }
        Some(Commands::Init(args)) => {
            // Init is handled before bank discovery
            if let Err(e) = handlers::cmd_init(args, bank_dir.as_deref()) {
                eprintln!("error: {}", e);
                std::process::exit(1);
            }
        }
        Some(_) => {
            if let Err(e) = handlers::dispatch(cli) {
                eprintln!("error: {}", e);
                std::process::exit(1);
            }
        }
    }
}
