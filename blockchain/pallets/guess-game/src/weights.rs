//! Weight functions for pallet-guess-game.
//!
//! This file is intended to be regenerated with the benchmark CLI after updating
//! benchmark scenarios in `benchmarking.rs`.

#![cfg_attr(rustfmt, rustfmt_skip)]
#![allow(unused_parens)]
#![allow(unused_imports)]

use core::marker::PhantomData;
use frame::{deps::frame_support::weights::constants::RocksDbWeight, prelude::*};

/// Weight functions needed for pallet-guess-game.
pub trait WeightInfo {
    fn set_admin() -> Weight;
    fn set_implementation() -> Weight;
    fn create_game() -> Weight;
    fn set_weights_for_game() -> Weight;
    fn stake() -> Weight;
    fn set_final_number() -> Weight;
}

/// Weights for pallet-guess-game using runtime database weights.
pub struct SubstrateWeight<T>(PhantomData<T>);
impl<T: frame_system::Config> WeightInfo for SubstrateWeight<T> {
    /// Storage: `GuessGame::FactoryAdmin` (r:1 w:1)
    fn set_admin() -> Weight {
        Weight::from_parts(25_000_000, 0)
            .saturating_add(T::DbWeight::get().reads(1))
            .saturating_add(T::DbWeight::get().writes(1))
    }

    /// Storage: `GuessGame::FactoryAdmin` (r:1 w:0)
    /// Storage: `GuessGame::CurrentImplementation` (r:1 w:1)
    /// Storage: `GuessGame::Implementations` (r:0 w:1)
    fn set_implementation() -> Weight {
        Weight::from_parts(30_000_000, 0)
            .saturating_add(T::DbWeight::get().reads(2))
            .saturating_add(T::DbWeight::get().writes(2))
    }

    /// Storage: `GuessGame::FactoryAdmin` (r:1 w:0)
    /// Storage: `GuessGame::CurrentImplementation` (r:1 w:0)
    /// Storage: `GuessGame::NextGameId` (r:1 w:1)
    /// Storage: `GuessGame::Games` (r:0 w:1)
    fn create_game() -> Weight {
        Weight::from_parts(45_000_000, 0)
            .saturating_add(T::DbWeight::get().reads(3))
            .saturating_add(T::DbWeight::get().writes(2))
    }

    /// Storage: `GuessGame::FactoryAdmin` (r:1 w:0)
    /// Storage: `GuessGame::Games` (r:1 w:0)
    /// Storage: `GuessGame::GameWeights` (r:1 w:1)
    fn set_weights_for_game() -> Weight {
        Weight::from_parts(40_000_000, 0)
            .saturating_add(T::DbWeight::get().reads(3))
            .saturating_add(T::DbWeight::get().writes(1))
    }

    /// Storage: `GuessGame::Games` (r:1 w:0)
    /// Storage: `GuessGame::GameWeights` (r:1 w:0)
    /// Storage: `Assets::Asset` (r:1 w:1)
    /// Storage: `Assets::Account` (r:2 w:2)
    /// Storage: `GuessGame::UserStakes` (r:1 w:1)
    /// Storage: `GuessGame::NumberTotals` (r:1 w:1)
    /// Storage: `GuessGame::GameTotals` (r:1 w:1)
    /// Storage: `GuessGame::UserChosenNumbers` (r:1 w:1)
    /// Storage: `GuessGame::StakedNumbers` (r:1 w:1)
    /// Storage: `GuessGame::StakeHistory` (r:1 w:1)
    fn stake() -> Weight {
        Weight::from_parts(120_000_000, 0)
            .saturating_add(T::DbWeight::get().reads(11))
            .saturating_add(T::DbWeight::get().writes(9))
    }

    /// Storage: `GuessGame::FactoryAdmin` (r:1 w:0)
    /// Storage: `GuessGame::Games` (r:1 w:1)
    /// Storage: `GuessGame::GameTotals` (r:1 w:0)
    fn set_final_number() -> Weight {
        Weight::from_parts(60_000_000, 0)
            .saturating_add(T::DbWeight::get().reads(3))
            .saturating_add(T::DbWeight::get().writes(1))
    }
}

// For backwards compatibility and tests.
impl WeightInfo for () {
    fn set_admin() -> Weight {
        Weight::from_parts(25_000_000, 0)
            .saturating_add(RocksDbWeight::get().reads(1))
            .saturating_add(RocksDbWeight::get().writes(1))
    }

    fn set_implementation() -> Weight {
        Weight::from_parts(30_000_000, 0)
            .saturating_add(RocksDbWeight::get().reads(2))
            .saturating_add(RocksDbWeight::get().writes(2))
    }

    fn create_game() -> Weight {
        Weight::from_parts(45_000_000, 0)
            .saturating_add(RocksDbWeight::get().reads(3))
            .saturating_add(RocksDbWeight::get().writes(2))
    }

    fn set_weights_for_game() -> Weight {
        Weight::from_parts(40_000_000, 0)
            .saturating_add(RocksDbWeight::get().reads(3))
            .saturating_add(RocksDbWeight::get().writes(1))
    }

    fn stake() -> Weight {
        Weight::from_parts(120_000_000, 0)
            .saturating_add(RocksDbWeight::get().reads(11))
            .saturating_add(RocksDbWeight::get().writes(9))
    }

    fn set_final_number() -> Weight {
        Weight::from_parts(60_000_000, 0)
            .saturating_add(RocksDbWeight::get().reads(3))
            .saturating_add(RocksDbWeight::get().writes(1))
    }
}
