//! Rules engine for the Guess Game.
//!
//! Participants stake value behind a chosen number while a game window is
//! open. Each stake is weighted by the interval it arrives in, and once the
//! window has closed the game resolves to the share-weighted average of all
//! chosen numbers, perturbed by a bounded, seeded jitter.
//!
//! The crate is `no_std` so the same rules run inside the runtime and in
//! native tooling.

#![cfg_attr(not(feature = "std"), no_std)]

pub mod error;
pub mod logic;
pub mod rng;
pub mod schedule;
pub mod types;
pub mod window;

#[cfg(test)]
mod tests;

pub use error::{GuessError, GuessResult};
pub use logic::{
    apply_jitter, GameLogic, RulesVersion, StakeWeighting, WeightedAverage, JITTER_BOUND,
};
pub use rng::{GuessRng, XorShiftRng};
pub use types::*;
pub use window::GameWindow;
