/// Face value of a project card. Every card in the game is strictly
/// negative; taking one subtracts its value from the taker's net score.
pub type Card = i32;

/// Lowest card value in the deck (the costliest project).
pub const CARD_MIN: Card = -50;
/// Highest card value in the deck.
pub const CARD_MAX: Card = -26;
/// Number of cards in a full deck.
pub const DECK_SIZE: usize = 25;

/// Every card value in ascending order, each exactly once.
pub fn full_deck() -> Vec<Card> {
    (CARD_MIN..=CARD_MAX).collect()
}
