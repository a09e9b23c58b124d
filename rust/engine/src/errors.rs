use thiserror::Error;

/// Fatal engine faults.
///
/// Rule-level rejections are not errors; they are
/// [`Outcome::Rejected`](crate::resolver::Outcome) values and leave the
/// previous state authoritative. The only condition modeled as an error is a
/// broken card-conservation invariant, which indicates a corrupted state
/// rather than a bad message.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GameError {
    #[error("card conservation violated: expected {expected} cards in play, counted {counted}")]
    CardConservation { expected: usize, counted: usize },
}
