//! # Minus Auction CLI Library
//!
//! Command-line driver for the Minus Auction engine: seeded full-game
//! simulation and deck inspection, without any interactive surface.
//!
//! The primary entry point is the [`run`] function, which parses
//! command-line arguments and executes the appropriate subcommand.
//!
//! ```no_run
//! use std::io;
//! let args = vec!["minus-auction", "sim", "--seed", "42", "--teams", "3"];
//! let code = ma_cli::run(args, &mut io::stdout(), &mut io::stderr());
//! assert_eq!(code, 0);
//! ```

use std::ffi::OsString;
use std::io::Write;

use clap::error::ErrorKind;
use clap::Parser;

pub mod cli;
mod commands;
mod error;

use cli::{Commands, MinusAuctionCli};
use commands::{handle_deck_command, handle_sim_command};
pub use error::CliError;

/// Parses `args` and runs the selected subcommand, writing to the provided
/// streams. Returns the process exit code: 0 on success, 2 on a usage
/// error, 1 on a runtime failure.
pub fn run<I, T>(args: I, out: &mut dyn Write, err: &mut dyn Write) -> i32
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let cli = match MinusAuctionCli::try_parse_from(args) {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            let _ = write!(out, "{e}");
            return 0;
        }
        Err(e) => {
            let _ = write!(err, "{e}");
            return 2;
        }
    };

    let result = match cli.command {
        Commands::Sim {
            seed,
            teams,
            max_teams,
            json,
        } => handle_sim_command(seed, teams, max_teams, json, out),
        Commands::Deck { seed } => handle_deck_command(seed, out),
    };

    match result {
        Ok(()) => 0,
        Err(e) => {
            let _ = writeln!(err, "error: {e}");
            1
        }
    }
}
