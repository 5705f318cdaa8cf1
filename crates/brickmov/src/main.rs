// SPDX-FileCopyrightText: 2026 brick.mov
// SPDX-License-Identifier: MIT OR Apache-2.0

//! brickmov - backend server for the brick.mov studio site.
//!
//! Binary entry point: loads and validates configuration, then
//! dispatches to the requested subcommand.

use clap::{Parser, Subcommand};

mod operator;
mod serve;

/// Backend server for the brick.mov studio site.
#[derive(Parser, Debug)]
#[command(name = "brickmov", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Start the HTTP server.
    Serve,
    /// Manage operator accounts.
    Operator {
        #[command(subcommand)]
        command: OperatorCommands,
    },
}

#[derive(Subcommand, Debug)]
enum OperatorCommands {
    /// Create a new operator account. Prompts for the password.
    Add {
        #[arg(long)]
        email: String,
        #[arg(long)]
        username: String,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match brickmov_config::load_and_validate() {
        Ok(config) => config,
        Err(errors) => {
            brickmov_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    let result = match cli.command {
        Some(Commands::Serve) | None => serve::run_serve(config).await,
        Some(Commands::Operator {
            command: OperatorCommands::Add { email, username },
        }) => operator::run_operator_add(config, &email, &username).await,
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
