use clap::Parser;
use tracing::error;
use tracing_subscriber::FmtSubscriber;

use wat_cli::{Cli, Commands};

mod commands;

fn main() {
    let cli = Cli::parse();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(cli.log_level)
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");

    let result = match &cli.command {
        Some(Commands::Fit(args)) => commands::fit::run(args),
        Some(Commands::Zones(args)) => commands::zones::run(args),
        Some(Commands::Simulate(args)) => commands::simulate::run(args),
        Some(Commands::Completions { shell, out }) => {
            commands::completions::run(*shell, out.as_deref())
        }
        None => {
            wat_cli::build_cli_command()
                .print_help()
                .expect("printing help failed");
            return;
        }
    };

    if let Err(e) = result {
        error!("{e:#}");
        std::process::exit(1);
    }
}
