//! tidectl -- show or switch the active congestion control strategy.

use std::process::ExitCode;

use clap::error::ErrorKind;
use clap::{Parser, Subcommand};

use tidecc::{ControlSurface, SysctlControl, TideCcError, TCP_CC_CONTROL};

#[derive(Parser)]
#[command(name = "tidectl", about = "Congestion control strategy switch")]
struct Cli {
    /// Control file to read and write (mainly for tests and containers).
    #[arg(
        long,
        global = true,
        env = "TIDECTL_CONTROL",
        default_value = TCP_CC_CONTROL,
        value_name = "PATH"
    )]
    control: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the active strategy.
    Show,
    /// Make <NAME> the strategy for new connections.
    Set { name: String },
}

fn print_usage() {
    println!("Usage:");
    println!("  tidectl show");
    println!("  tidectl set <strategy>");
}

fn main() -> ExitCode {
    if std::env::args_os().len() < 2 {
        print_usage();
        return ExitCode::SUCCESS;
    }

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            let _ = err.print();
            return ExitCode::SUCCESS;
        }
        Err(_) => {
            println!("Invalid command");
            return ExitCode::FAILURE;
        }
    };

    let surface = SysctlControl::at(&cli.control);
    match cli.command {
        Command::Show => match surface.read() {
            Ok(name) => {
                println!("Current CC: {name}");
                ExitCode::SUCCESS
            }
            Err(err) => {
                eprintln!("{err}");
                ExitCode::FAILURE
            }
        },
        Command::Set { name } => match surface.write(&name) {
            Ok(()) => {
                println!("Switched to: {name}");
                ExitCode::SUCCESS
            }
            Err(TideCcError::PermissionDenied(_)) => {
                eprintln!("Permission denied. Run as root.");
                ExitCode::FAILURE
            }
            Err(err) => {
                eprintln!("{err}");
                ExitCode::FAILURE
            }
        },
    }
}
