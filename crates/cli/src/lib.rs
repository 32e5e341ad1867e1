pub mod commands;

use clap::{Parser, Subcommand};
use std::process::ExitCode;

#[derive(Debug, Parser)]
#[command(
    name = "ounibot",
    about = "OUNIBOT operator CLI",
    long_about = "Prepare the ENSPD catalog database, inspect configuration, and run actions locally.",
    after_help = "Examples:\n  ounibot seed\n  ounibot doctor --json\n  ounibot invoke action_info_filiere --entity filiere=GI"
)]
pub struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    #[command(about = "Apply pending catalog migrations and return structured status output")]
    Migrate,
    #[command(about = "Migrate, then load and verify the deterministic ENSPD catalog")]
    Seed,
    #[command(about = "Inspect effective configuration values with source attribution")]
    Config,
    #[command(about = "Validate config, database connectivity, and catalog schema")]
    Doctor {
        #[arg(long, help = "Emit machine-readable JSON output")]
        json: bool,
    },
    #[command(about = "Run one action against the configured catalog and print its response")]
    Invoke(commands::invoke::InvokeArgs),
}

pub fn run() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Command::Migrate => commands::migrate::run(),
        Command::Seed => commands::seed::run(),
        Command::Config => {
            commands::CommandResult { exit_code: 0, output: commands::config::run() }
        }
        Command::Doctor { json } => commands::doctor::run(json),
        Command::Invoke(args) => commands::invoke::run(args),
    };

    println!("{}", result.output);
    ExitCode::from(result.exit_code)
}
