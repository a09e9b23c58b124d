use rand::seq::SliceRandom;
use rand::Rng;

use crate::cards::{full_deck, Card};

/// Builds a freshly shuffled deck.
///
/// The permutation is an unbiased Fisher-Yates shuffle driven entirely by
/// `rng`, so a seeded generator reproduces the same order and repeated calls
/// with a live generator produce fresh ones. The deck is consumed from the
/// back: `Vec::pop` yields the next card to reveal.
pub fn shuffled_deck<R: Rng>(rng: &mut R) -> Vec<Card> {
    let mut deck = full_deck();
    deck.shuffle(rng);
    deck
}
