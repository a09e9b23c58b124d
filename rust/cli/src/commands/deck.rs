use std::io::Write;

use ma_engine::deck::shuffled_deck;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

use crate::error::CliError;

/// Handle the deck command: print the deck a seed produces.
///
/// Cards are listed in reveal order; position 1 is the card a session start
/// would seal away, position 2 is the first card opened for bidding.
pub fn handle_deck_command(seed: u64, out: &mut dyn Write) -> Result<(), CliError> {
    let mut rng = ChaCha20Rng::seed_from_u64(seed);
    let deck = shuffled_deck(&mut rng);

    writeln!(out, "deck for seed {seed} (reveal order, sealed card first):")?;
    for (i, card) in deck.iter().rev().enumerate() {
        writeln!(out, "{:>2}. {card}", i + 1)?;
    }
    Ok(())
}
