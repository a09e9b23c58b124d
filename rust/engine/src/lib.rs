//! # minus-auction-engine: Bidding Game Core
//!
//! The authoritative turn-resolution and scoring engine for Minus Auction,
//! a team bidding game over negative-value project cards. The engine is a
//! pure reducer: each action produces a complete replacement state, rejected
//! actions produce nothing, and all randomness flows through an injected
//! generator so seeded games replay exactly.
//!
//! ## Core Modules
//!
//! - [`cards`] - Card values and the full deck range
//! - [`deck`] - Deterministic deck shuffling
//! - [`score`] - Net score under the sequence-collapsing rule
//! - [`team`] - Teams, members and starting resources
//! - [`state`] - The room's single source of truth
//! - [`action`] - Message shapes consumed by the authority
//! - [`resolver`] - Validation and application of actions
//! - [`errors`] - Fatal invariant faults
//!
//! ## Quick Start
//!
//! ```rust
//! use rand::SeedableRng;
//! use rand_chacha::ChaCha20Rng;
//! use ma_engine::action::Action;
//! use ma_engine::resolver::{apply, Outcome};
//! use ma_engine::state::{GameState, RoomConfig};
//!
//! let mut rng = ChaCha20Rng::seed_from_u64(7);
//! let state = GameState::new(RoomConfig {
//!     room_name: "Friday night".to_string(),
//!     max_teams: 5,
//! });
//!
//! let join = Action::Join {
//!     name: "Ana".to_string(),
//!     group_number: 1,
//!     client_id: "c-1".to_string(),
//! };
//! match apply(&state, &join, &mut rng).expect("state is sound") {
//!     Outcome::Applied(next) => assert_eq!(next.teams.len(), 1),
//!     Outcome::Rejected(reason) => panic!("unexpected rejection: {reason}"),
//! }
//! ```

pub mod action;
pub mod cards;
pub mod deck;
pub mod errors;
pub mod resolver;
pub mod score;
pub mod state;
pub mod team;
