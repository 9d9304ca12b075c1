//! Benchmarking for pallet-guess-game.
//!
//! Each dispatchable is measured on its heaviest path within the configured
//! pallet bounds. The runtime clock must be past unix second 1 for the
//! finalization benchmark's window to have elapsed.

use super::*;
use alloc::vec;
use alloc::vec::Vec;
use frame::deps::sp_runtime::traits::SaturatedConversion;
use frame::{deps::frame_benchmarking::v2::*, prelude::*};

#[benchmarks(
    where
        T::Assets: frame::traits::fungibles::Create<T::AccountId>,
        AssetIdOf<T>: From<u32>,
)]
mod benchmarks {
    use super::*;
    use frame::traits::fungibles;
    use frame_system::RawOrigin;
    use guess_core::{GameWindow, RulesVersion, StakeTotals};

    const BENCH_TOKEN: u32 = 1_000;
    const DAY: u64 = 86_400;

    fn benchmark_balance<T: Config>() -> BalanceOf<T> {
        1_000_000_000u128.saturated_into()
    }

    fn benchmark_stake<T: Config>() -> BalanceOf<T> {
        1_000u128.saturated_into()
    }

    fn make_admin<T: Config>() -> T::AccountId {
        let admin: T::AccountId = whitelisted_caller();
        FactoryAdmin::<T>::put(&admin);
        Implementations::<T>::insert(RulesVersion::WeightedAverageV1, true);
        CurrentImplementation::<T>::put(RulesVersion::WeightedAverageV1);
        admin
    }

    fn create_token<T: Config>(owner: &T::AccountId) -> AssetIdOf<T>
    where
        T::Assets: fungibles::Create<T::AccountId>,
        AssetIdOf<T>: From<u32>,
    {
        let token: AssetIdOf<T> = BENCH_TOKEN.into();
        if !<T::Assets as fungibles::Inspect<T::AccountId>>::asset_exists(token.clone()) {
            <T::Assets as fungibles::Create<T::AccountId>>::create(
                token.clone(),
                owner.clone(),
                true,
                1u128.saturated_into(),
            )
            .expect("benchmark asset creation should succeed");
        }
        token
    }

    fn fund_account<T: Config>(token: AssetIdOf<T>, who: &T::AccountId) {
        <T::Assets as fungibles::Mutate<T::AccountId>>::mint_into(
            token,
            who,
            benchmark_balance::<T>(),
        )
        .expect("minting in benchmark setup should succeed");
    }

    fn create_game_with<T: Config>(
        admin: &T::AccountId,
        token: AssetIdOf<T>,
        start_time: u64,
        interval_length: u64,
        interval_count: u32,
    ) -> GameId {
        let game_id = NextGameId::<T>::get();
        Pallet::<T>::create_game(
            RawOrigin::Signed(admin.clone()).into(),
            token,
            start_time,
            interval_length,
            interval_count,
        )
        .expect("game creation in benchmark setup should succeed");
        Pallet::<T>::set_weights_for_game(
            RawOrigin::Signed(admin.clone()).into(),
            game_id,
            vec![100; interval_count as usize],
        )
        .expect("weight schedule in benchmark setup should succeed");
        game_id
    }

    /// Complexity: `O(1)`.
    #[benchmark]
    fn set_admin() {
        let admin = make_admin::<T>();
        let new_admin: T::AccountId = account("new_admin", 0, 0);

        #[extrinsic_call]
        _(RawOrigin::Signed(admin), new_admin.clone());

        assert_eq!(FactoryAdmin::<T>::get(), Some(new_admin));
    }

    /// Complexity: `O(1)`.
    /// Dominant path: disabling the current implementation.
    #[benchmark]
    fn set_implementation() {
        let admin = make_admin::<T>();

        #[extrinsic_call]
        _(RawOrigin::Signed(admin), RulesVersion::WeightedAverageV1, false);

        assert!(CurrentImplementation::<T>::get().is_none());
    }

    /// Complexity: `O(1)`.
    #[benchmark]
    fn create_game() {
        let admin = make_admin::<T>();
        let token = create_token::<T>(&admin);
        let game_id = NextGameId::<T>::get();

        #[extrinsic_call]
        _(
            RawOrigin::Signed(admin),
            token,
            Pallet::<T>::now(),
            DAY,
            T::MaxIntervals::get(),
        );

        assert!(Games::<T>::contains_key(game_id));
    }

    /// Complexity: `O(I)`, where `I` is the interval count (`MaxIntervals`).
    #[benchmark]
    fn set_weights_for_game() {
        let admin = make_admin::<T>();
        let token = create_token::<T>(&admin);
        let game_id = NextGameId::<T>::get();
        let intervals = T::MaxIntervals::get();
        Pallet::<T>::create_game(
            RawOrigin::Signed(admin.clone()).into(),
            token,
            Pallet::<T>::now(),
            DAY,
            intervals,
        )
        .expect("game creation in benchmark setup should succeed");
        let weights: Vec<u32> = (0..intervals).map(|i| intervals.saturating_sub(i)).collect();

        #[extrinsic_call]
        _(RawOrigin::Signed(admin), game_id, weights);

        assert!(GameWeights::<T>::contains_key(game_id));
    }

    /// Complexity: `O(N + H)`, where:
    /// - `N` is the staker's chosen-number list (`MaxNumbersPerUser`)
    /// - `H` is the staker's history (`MaxHistory`), full so the oldest record is dropped
    #[benchmark]
    fn stake() {
        let admin = make_admin::<T>();
        let token = create_token::<T>(&admin);
        let game_id = create_game_with::<T>(
            &admin,
            token.clone(),
            Pallet::<T>::now(),
            DAY,
            T::MaxIntervals::get(),
        );

        let caller: T::AccountId = whitelisted_caller();
        fund_account::<T>(token, &caller);

        let numbers = T::MaxNumbersPerUser::get()
            .min(T::MaxStakedNumbers::get())
            .saturating_sub(1);
        for number in 0..numbers {
            Pallet::<T>::stake(
                RawOrigin::Signed(caller.clone()).into(),
                game_id,
                number,
                benchmark_stake::<T>(),
            )
            .expect("stake in benchmark setup should succeed");
        }
        while (StakeHistory::<T>::decode_len(game_id, &caller).unwrap_or(0) as u32)
            < T::MaxHistory::get()
        {
            Pallet::<T>::stake(
                RawOrigin::Signed(caller.clone()).into(),
                game_id,
                0,
                benchmark_stake::<T>(),
            )
            .expect("stake in benchmark setup should succeed");
        }

        #[extrinsic_call]
        _(RawOrigin::Signed(caller.clone()), game_id, numbers, benchmark_stake::<T>());

        assert!(!UserStakes::<T>::get((game_id, &caller, numbers)).is_empty());
    }

    /// Complexity: `O(1)`.
    /// The weighted sum is kept in the game totals, so no per-number scan runs.
    #[benchmark]
    fn set_final_number() {
        let admin = make_admin::<T>();
        let token = create_token::<T>(&admin);
        // A one-second window at the epoch has always elapsed
        let game_id = create_game_with::<T>(&admin, token, 0, 1, 1);

        let mut totals = StakeTotals::default();
        let numbers: Vec<u32> = (0..T::MaxStakedNumbers::get()).collect();
        for number in numbers.iter().copied() {
            let amount = 1_000u128.saturating_add(number as u128);
            let mut number_totals = StakeTotals::default();
            number_totals
                .accrue(amount, amount * 100, number)
                .expect("benchmark totals fit in u128");
            totals
                .accrue(amount, amount * 100, number)
                .expect("benchmark totals fit in u128");
            NumberTotals::<T>::insert(game_id, number, number_totals);
        }
        StakedNumbers::<T>::insert(
            game_id,
            BoundedVec::try_from(numbers).expect("range is bounded by MaxStakedNumbers"),
        );
        GameTotals::<T>::insert(game_id, totals);

        #[extrinsic_call]
        _(RawOrigin::Signed(admin), game_id);

        let game = Games::<T>::get(game_id).expect("benchmarked game exists");
        assert_eq!(game.status, GameStatus::Finalized);
        assert_eq!(game.window, GameWindow::new(0, 1, 1).expect("valid window"));
    }

    impl_benchmark_test_suite!(Pallet, crate::mock::new_test_ext(), crate::mock::Test);
}
