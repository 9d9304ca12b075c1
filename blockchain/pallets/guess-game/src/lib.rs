//! # Guess Game Pallet
//!
//! Participants stake an asset behind a chosen number while a game window is
//! open. Stakes are weighted by the day-interval they arrive in, using a weight
//! schedule the admin attaches to the game. Once the window has closed the
//! admin finalizes the game, which records the share-weighted average of all
//! chosen numbers and a final number within ±100 of it.
//!
//! The pallet doubles as the game factory: it creates games, governs which
//! rules implementation new games bind to, and is the only path to
//! finalization. Staked funds sit in a per-game custody account derived from
//! [`Config::PalletId`].

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub use pallet::*;

#[cfg(test)]
mod mock;


#[cfg(feature = "runtime-benchmarks")]
mod benchmarking;

pub mod weights;

mod impls;

pub(crate) const LOG_TARGET: &str = "runtime::guess-game";

#[frame::pallet]
pub mod pallet {

    use alloc::vec::Vec;
    use frame::deps::sp_runtime::traits::SaturatedConversion;
    use frame::prelude::*;
    use frame::traits::{fungibles, Get, Randomness, UnixTime};
    use guess_core::schedule::validate_weights;
    use guess_core::{
        GameLogic, GameWindow, GuessNumber, IntervalIndex, Moment, Multiplier, RulesVersion,
        Share, StakeRecord, StakeTotals,
    };

    use crate::weights::WeightInfo;
    use crate::LOG_TARGET;

    #[pallet::pallet]
    pub struct Pallet<T>(_);

    /// Configure the pallet by specifying the parameters and types on which it depends.
    #[pallet::config]
    pub trait Config: frame_system::Config {
        /// Because this pallet emits events, it depends on the runtime's definition of an event.
        type RuntimeEvent: From<Event<Self>> + IsType<<Self as frame_system::Config>::RuntimeEvent>;

        /// Ledger holding the assets games are staked in.
        type Assets: fungibles::Inspect<Self::AccountId> + fungibles::Mutate<Self::AccountId>;

        /// Source of randomness for the finalization jitter.
        type Randomness: Randomness<Self::Hash, BlockNumberFor<Self>>;

        /// Wall clock the game windows are measured against.
        type TimeProvider: UnixTime;

        /// Pallet ID used to derive the custody account of each game.
        #[pallet::constant]
        type PalletId: Get<frame::deps::frame_support::PalletId>;

        /// Maximum number of intervals in a game window.
        #[pallet::constant]
        type MaxIntervals: Get<u32>;

        /// Maximum number of distinct numbers a participant can choose in one game.
        #[pallet::constant]
        type MaxNumbersPerUser: Get<u32>;

        /// Maximum number of distinct numbers staked on in one game.
        #[pallet::constant]
        type MaxStakedNumbers: Get<u32>;

        /// Number of stake records kept per participant and game.
        #[pallet::constant]
        type MaxHistory: Get<u32>;

        /// Weight information for extrinsics in this pallet.
        type WeightInfo: WeightInfo;
    }

    pub type GameId = u32;

    /// Type alias for the asset identifier of the configured ledger.
    pub type AssetIdOf<T> = <<T as Config>::Assets as fungibles::Inspect<
        <T as frame_system::Config>::AccountId,
    >>::AssetId;

    /// Type alias for the balance type of the configured ledger.
    pub type BalanceOf<T> = <<T as Config>::Assets as fungibles::Inspect<
        <T as frame_system::Config>::AccountId,
    >>::Balance;

    pub type WeightsOf<T> = BoundedVec<Multiplier, <T as Config>::MaxIntervals>;

    /// Lifecycle of a game. `Finalized` is terminal.
    #[derive(
        Encode,
        Decode,
        DecodeWithMemTracking,
        TypeInfo,
        Clone,
        Copy,
        PartialEq,
        Eq,
        RuntimeDebug,
        MaxEncodedLen,
    )]
    pub enum GameStatus {
        Open,
        Finalized,
    }

    /// A game created by the factory.
    #[derive(Encode, Decode, TypeInfo, CloneNoBound, PartialEqNoBound, RuntimeDebugNoBound, MaxEncodedLen)]
    #[scale_info(skip_type_params(T))]
    pub struct GameInfo<T: Config> {
        /// Admin account that created the game
        pub creator: T::AccountId,
        /// Asset the game is staked in
        pub token: AssetIdOf<T>,
        pub window: GameWindow,
        /// Rules the game was bound to at creation
        pub implementation: RulesVersion,
        pub status: GameStatus,
        /// Share-weighted average of all chosen numbers, set on finalization
        pub average_number: Option<GuessNumber>,
        /// Average plus jitter, set on finalization
        pub final_number: Option<GuessNumber>,
        pub finalized_at: Option<Moment>,
    }

    /// The single account allowed to administer the factory.
    #[pallet::storage]
    pub type FactoryAdmin<T: Config> = StorageValue<_, T::AccountId, OptionQuery>;

    /// Rules implementations and whether they are enabled.
    #[pallet::storage]
    pub type Implementations<T: Config> =
        StorageMap<_, Blake2_128Concat, RulesVersion, bool, ValueQuery>;

    /// Implementation newly created games are bound to.
    #[pallet::storage]
    pub type CurrentImplementation<T: Config> = StorageValue<_, RulesVersion, OptionQuery>;

    /// Next available game ID.
    #[pallet::storage]
    pub type NextGameId<T: Config> = StorageValue<_, GameId, ValueQuery>;

    /// All games ever created. Finalized games are kept as a record.
    #[pallet::storage]
    pub type Games<T: Config> = StorageMap<_, Blake2_128Concat, GameId, GameInfo<T>, OptionQuery>;

    /// Weight schedule of each game, one multiplier per interval. Set once.
    #[pallet::storage]
    pub type GameWeights<T: Config> =
        StorageMap<_, Blake2_128Concat, GameId, WeightsOf<T>, OptionQuery>;

    /// Amount and weighted share staked by a participant on a number.
    /// Key: (game_id, participant, number)
    #[pallet::storage]
    pub type UserStakes<T: Config> = StorageNMap<
        _,
        (
            NMapKey<Blake2_128Concat, GameId>,       // game_id
            NMapKey<Blake2_128Concat, T::AccountId>, // participant
            NMapKey<Blake2_128Concat, GuessNumber>,  // number
        ),
        StakeTotals,
        ValueQuery,
    >;

    /// Numbers a participant has chosen, in the order first chosen.
    #[pallet::storage]
    pub type UserChosenNumbers<T: Config> = StorageDoubleMap<
        _,
        Blake2_128Concat, GameId,
        Blake2_128Concat, T::AccountId,
        BoundedVec<GuessNumber, T::MaxNumbersPerUser>,
        ValueQuery,
    >;

    /// Totals over all participants that chose a number.
    #[pallet::storage]
    pub type NumberTotals<T: Config> = StorageDoubleMap<
        _,
        Blake2_128Concat, GameId,
        Blake2_128Concat, GuessNumber,
        StakeTotals,
        ValueQuery,
    >;

    /// Every number staked on in a game, in the order of its first stake.
    #[pallet::storage]
    pub type StakedNumbers<T: Config> = StorageMap<
        _,
        Blake2_128Concat,
        GameId,
        BoundedVec<GuessNumber, T::MaxStakedNumbers>,
        ValueQuery,
    >;

    /// Totals over the whole game.
    #[pallet::storage]
    pub type GameTotals<T: Config> = StorageMap<_, Blake2_128Concat, GameId, StakeTotals, ValueQuery>;

    /// Most recent stakes of a participant, oldest first.
    #[pallet::storage]
    pub type StakeHistory<T: Config> = StorageDoubleMap<
        _,
        Blake2_128Concat, GameId,
        Blake2_128Concat, T::AccountId,
        BoundedVec<StakeRecord, T::MaxHistory>,
        ValueQuery,
    >;

    #[pallet::event]
    #[pallet::generate_deposit(pub(super) fn deposit_event)]
    pub enum Event<T: Config> {
        /// A new game has been created.
        GameCreated {
            game_id: GameId,
            creator: T::AccountId,
            token: AssetIdOf<T>,
            custody: T::AccountId,
            start_time: Moment,
            end_time: Moment,
            implementation: RulesVersion,
        },
        /// A rules implementation has been enabled or disabled.
        ImplementationSet { implementation: RulesVersion, enabled: bool },
        /// A weight schedule has been attached to a game.
        WeightsSet { game_id: GameId, weights: WeightsOf<T> },
        /// A stake has been recorded. Cumulative values are for (who, number).
        StakeRecorded {
            game_id: GameId,
            who: T::AccountId,
            number: GuessNumber,
            amount: BalanceOf<T>,
            cumulative_amount: Share,
            cumulative_share: Share,
        },
        /// A game has been finalized.
        GameFinalized {
            game_id: GameId,
            average_number: GuessNumber,
            final_number: GuessNumber,
        },
        /// The factory admin has changed.
        AdminChanged { old: Option<T::AccountId>, new: T::AccountId },
    }

    #[pallet::error]
    pub enum Error<T> {
        /// The caller is not the factory admin.
        Unauthorized,
        /// The specified game does not exist.
        GameNotFound,
        /// Interval length or count is zero or too large, or the end time overflows.
        InvalidWindow,
        /// The weight schedule does not match the interval count or holds a zero weight.
        InvalidWeights,
        /// The game already has a weight schedule.
        ConfigurationConflict,
        /// The game has no weight schedule yet.
        WeightsNotSet,
        /// No rules implementation is enabled for new games.
        NoImplementation,
        /// Stake amount must be positive.
        ZeroAmount,
        /// The game window has closed.
        WindowClosed,
        /// The game window has not elapsed yet.
        WindowNotElapsed,
        /// The game has already been finalized.
        AlreadyFinalized,
        /// Nobody staked in the game.
        NoParticipants,
        /// The asset ledger declined the transfer.
        TransferFailed,
        /// The participant has chosen the maximum number of distinct numbers.
        TooManyNumbers,
        /// The game holds the maximum number of distinct numbers.
        TooManyStakedNumbers,
        /// An amount, share or weighted sum exceeded the accounting width.
        ArithmeticOverflow,
        /// The stake history could not take another record.
        HistoryFull,
    }

    #[pallet::genesis_config]
    #[derive(frame::prelude::DefaultNoBound)]
    pub struct GenesisConfig<T: Config> {
        /// Initial factory admin.
        pub admin: Option<T::AccountId>,
        /// Implementation enabled for new games from genesis.
        pub implementation: Option<RulesVersion>,
    }

    #[pallet::genesis_build]
    impl<T: Config> BuildGenesisConfig for GenesisConfig<T> {
        fn build(&self) {
            if let Some(admin) = &self.admin {
                FactoryAdmin::<T>::put(admin);
            }
            if let Some(implementation) = self.implementation {
                Implementations::<T>::insert(implementation, true);
                CurrentImplementation::<T>::put(implementation);
            }
        }
    }

    #[pallet::call]
    impl<T: Config> Pallet<T> {
        /// Hand the factory over to a new admin.
        /// Callable by root or by the current admin.
        #[pallet::call_index(0)]
        #[pallet::weight(T::WeightInfo::set_admin())]
        pub fn set_admin(origin: OriginFor<T>, new_admin: T::AccountId) -> DispatchResult {
            let caller = frame_system::ensure_signed_or_root(origin)?;
            let old = FactoryAdmin::<T>::get();

            if let Some(who) = caller {
                ensure!(old.as_ref() == Some(&who), Error::<T>::Unauthorized);
            }

            FactoryAdmin::<T>::put(&new_admin);
            Self::deposit_event(Event::AdminChanged { old, new: new_admin });

            Ok(())
        }

        /// Enable or disable a rules implementation.
        /// Enabling makes it the implementation new games bind to; games that
        /// already exist keep the implementation they were created with.
        #[pallet::call_index(1)]
        #[pallet::weight(T::WeightInfo::set_implementation())]
        pub fn set_implementation(
            origin: OriginFor<T>,
            implementation: RulesVersion,
            enabled: bool,
        ) -> DispatchResult {
            Self::ensure_admin(origin)?;

            Implementations::<T>::insert(implementation, enabled);
            if enabled {
                CurrentImplementation::<T>::put(implementation);
            } else if CurrentImplementation::<T>::get() == Some(implementation) {
                CurrentImplementation::<T>::kill();
            }

            Self::deposit_event(Event::ImplementationSet { implementation, enabled });

            Ok(())
        }

        /// Create a new game staked in `token`, running `interval_count`
        /// intervals of `interval_length` seconds from `start_time`.
        #[pallet::call_index(2)]
        #[pallet::weight(T::WeightInfo::create_game())]
        pub fn create_game(
            origin: OriginFor<T>,
            token: AssetIdOf<T>,
            start_time: Moment,
            interval_length: Moment,
            interval_count: IntervalIndex,
        ) -> DispatchResult {
            let creator = Self::ensure_admin(origin)?;

            ensure!(interval_count <= T::MaxIntervals::get(), Error::<T>::InvalidWindow);
            let window = GameWindow::new(start_time, interval_length, interval_count)
                .map_err(Error::<T>::from)?;

            let implementation =
                CurrentImplementation::<T>::get().ok_or(Error::<T>::NoImplementation)?;

            let game_id = NextGameId::<T>::get();
            let next_game_id = game_id.checked_add(1).ok_or(Error::<T>::ArithmeticOverflow)?;

            let game = GameInfo::<T> {
                creator: creator.clone(),
                token: token.clone(),
                window,
                implementation,
                status: GameStatus::Open,
                average_number: None,
                final_number: None,
                finalized_at: None,
            };

            Games::<T>::insert(game_id, game);
            NextGameId::<T>::put(next_game_id);

            log::info!(
                target: LOG_TARGET,
                "game {} created: start {}, {} x {}s, rules {:?}",
                game_id,
                start_time,
                interval_count,
                interval_length,
                implementation,
            );

            Self::deposit_event(Event::GameCreated {
                game_id,
                creator,
                token,
                custody: Self::game_account(game_id),
                start_time,
                end_time: window.end_time(),
                implementation,
            });

            Ok(())
        }

        /// Attach the per-interval weight schedule to a game.
        /// A schedule can be set only once, and must have one positive weight per interval.
        #[pallet::call_index(3)]
        #[pallet::weight(T::WeightInfo::set_weights_for_game())]
        pub fn set_weights_for_game(
            origin: OriginFor<T>,
            game_id: GameId,
            weights: Vec<Multiplier>,
        ) -> DispatchResult {
            Self::ensure_admin(origin)?;

            let game = Games::<T>::get(game_id).ok_or(Error::<T>::GameNotFound)?;
            ensure!(game.status == GameStatus::Open, Error::<T>::AlreadyFinalized);
            ensure!(
                !GameWeights::<T>::contains_key(game_id),
                Error::<T>::ConfigurationConflict
            );

            validate_weights(&weights, &game.window).map_err(Error::<T>::from)?;
            let weights: WeightsOf<T> =
                weights.try_into().map_err(|_| Error::<T>::InvalidWeights)?;

            GameWeights::<T>::insert(game_id, &weights);

            Self::deposit_event(Event::WeightsSet { game_id, weights });

            Ok(())
        }

        /// Choose a number and stake `amount` of the game's asset behind it.
        /// The stake is weighted by the interval it arrives in, and that weight
        /// stays with the stake.
        #[pallet::call_index(4)]
        #[pallet::weight(T::WeightInfo::stake())]
        pub fn stake(
            origin: OriginFor<T>,
            game_id: GameId,
            number: GuessNumber,
            amount: BalanceOf<T>,
        ) -> DispatchResult {
            let who = ensure_signed(origin)?;

            let game = Games::<T>::get(game_id).ok_or(Error::<T>::GameNotFound)?;
            ensure!(game.status == GameStatus::Open, Error::<T>::AlreadyFinalized);
            ensure!(!amount.is_zero(), Error::<T>::ZeroAmount);

            let now = Self::now();
            game.window.ensure_open_at(now).map_err(Error::<T>::from)?;
            let weights = GameWeights::<T>::get(game_id).ok_or(Error::<T>::WeightsNotSet)?;

            let weighting = game
                .implementation
                .logic()
                .weigh_stake(&game.window, &weights, now, amount.saturated_into::<Share>())
                .map_err(Error::<T>::from)?;

            // Move the funds first so a declined transfer leaves the ledger untouched
            Self::transfer_to_custody(&who, game_id, &game, amount)?;

            let record = StakeRecord {
                number,
                amount: amount.saturated_into::<Share>(),
                share: weighting.share,
                interval: weighting.interval,
                weight: weighting.weight,
                at: now,
            };
            let totals = Self::record_stake(game_id, &who, record)?;

            log::debug!(
                target: LOG_TARGET,
                "game {}: {:?} staked {:?} on {} in interval {} (x{})",
                game_id,
                who,
                amount,
                number,
                weighting.interval,
                weighting.weight,
            );

            Self::deposit_event(Event::StakeRecorded {
                game_id,
                who,
                number,
                amount,
                cumulative_amount: totals.amount,
                cumulative_share: totals.share,
            });

            Ok(())
        }

        /// Finalize a game whose window has elapsed, recording its average and
        /// final number. Only callable by the factory admin.
        #[pallet::call_index(5)]
        #[pallet::weight(T::WeightInfo::set_final_number())]
        pub fn set_final_number(origin: OriginFor<T>, game_id: GameId) -> DispatchResult {
            Self::ensure_admin(origin)?;

            let resolution = Self::finalize(game_id)?;

            log::info!(
                target: LOG_TARGET,
                "game {} finalized: average {}, final {} (jitter {})",
                game_id,
                resolution.average_number,
                resolution.final_number,
                resolution.jitter,
            );

            Self::deposit_event(Event::GameFinalized {
                game_id,
                average_number: resolution.average_number,
                final_number: resolution.final_number,
            });

            Ok(())
        }
    }
}
