use clap::Parser;
use colored::Colorize;
use tagtree_core::cli::{self, Cli};
use tagtree_core::exit::TagTreeExit;
use tagtree_core::logging;

fn main() -> TagTreeExit {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let result = if let Some(cmd) = cli.command {
        cli::dispatch::execute(cmd)
    } else {
        use clap::CommandFactory;
        let _ = Cli::command().print_help();
        Ok(TagTreeExit::Success)
    };

    match result {
        Ok(exit_code) => exit_code,
        Err(e) => {
            eprintln!("{} {:#}", "Error:".red(), e);
            TagTreeExit::Error
        }
    }
}
