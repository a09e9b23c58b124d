use clap::{Parser, Subcommand};

/// Headless driver for the Minus Auction bidding game.
#[derive(Debug, Parser)]
#[command(name = "minus-auction", version, about)]
pub struct MinusAuctionCli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Play a complete seeded game with scripted teams
    Sim {
        /// RNG seed; the same seed replays the same game
        #[arg(long)]
        seed: u64,
        /// Number of single-member teams to register
        #[arg(long, default_value_t = 3)]
        teams: usize,
        /// Room capacity
        #[arg(long, default_value_t = 5)]
        max_teams: usize,
        /// Print the final state as JSON instead of the event feed
        #[arg(long)]
        json: bool,
    },
    /// Print the shuffled deck a seed produces, in reveal order
    Deck {
        /// RNG seed to inspect
        #[arg(long)]
        seed: u64,
    },
}
