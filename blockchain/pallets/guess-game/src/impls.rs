use crate::pallet::*;
use crate::LOG_TARGET;
use alloc::vec::Vec;
use frame::prelude::*;
use frame::traits::{fungibles, tokens::Preservation, Get, Randomness, UnixTime};
use guess_core::{
    GameLogic, GuessError, GuessNumber, Moment, Resolution, Share, StakeRecord, StakeTotals,
    StakedNumberInfo, XorShiftRng,
};

impl<T: Config> From<GuessError> for Error<T> {
    fn from(err: GuessError) -> Self {
        match err {
            GuessError::InvalidWindow => Error::<T>::InvalidWindow,
            GuessError::InvalidWeights => Error::<T>::InvalidWeights,
            GuessError::WindowClosed => Error::<T>::WindowClosed,
            GuessError::WindowNotElapsed => Error::<T>::WindowNotElapsed,
            GuessError::NoParticipants => Error::<T>::NoParticipants,
            GuessError::ZeroAmount => Error::<T>::ZeroAmount,
            GuessError::ArithmeticOverflow => Error::<T>::ArithmeticOverflow,
        }
    }
}

impl<T: Config> Pallet<T> {
    /// Ensure `origin` is signed by the factory admin.
    pub(crate) fn ensure_admin(origin: OriginFor<T>) -> Result<T::AccountId, DispatchError> {
        let who = ensure_signed(origin)?;
        ensure!(
            FactoryAdmin::<T>::get().as_ref() == Some(&who),
            Error::<T>::Unauthorized
        );
        Ok(who)
    }

    /// Current unix time in seconds.
    pub(crate) fn now() -> Moment {
        T::TimeProvider::now().as_secs()
    }

    /// Derive the custody account of a game from PalletId.
    pub fn game_account(game_id: GameId) -> T::AccountId {
        use frame::deps::sp_runtime::traits::AccountIdConversion;
        T::PalletId::get().into_sub_account_truncating(game_id)
    }

    /// Seed for the finalization jitter of a game.
    pub(crate) fn finalization_seed(game_id: GameId) -> u64 {
        let random = T::Randomness::random(b"guess_game/final");
        let mut seed_data = Vec::new();
        seed_data.extend_from_slice(&random.0.encode());
        seed_data.extend_from_slice(&game_id.encode());
        let hash = frame::hashing::blake2_128(&seed_data);
        let mut bytes = [0u8; 8];
        bytes.copy_from_slice(&hash[0..8]);
        u64::from_le_bytes(bytes)
    }

    /// Move `amount` of the game's asset from `who` into the game's custody account.
    pub(crate) fn transfer_to_custody(
        who: &T::AccountId,
        game_id: GameId,
        game: &GameInfo<T>,
        amount: BalanceOf<T>,
    ) -> DispatchResult {
        <T::Assets as fungibles::Mutate<T::AccountId>>::transfer(
            game.token.clone(),
            who,
            &Self::game_account(game_id),
            amount,
            Preservation::Expendable,
        )
        .map_err(|err| {
            log::warn!(
                target: LOG_TARGET,
                "game {}: transfer of {:?} from {:?} declined: {:?}",
                game_id,
                amount,
                who,
                err,
            );
            Error::<T>::TransferFailed
        })?;
        Ok(())
    }

    /// Accrue a stake into every ledger view of the game.
    ///
    /// All totals, including the game's running `share × number` sum, are
    /// computed before anything is written, so an overflow or a full list
    /// leaves the ledger as it was. Returns the new totals of
    /// (who, number).
    pub(crate) fn record_stake(
        game_id: GameId,
        who: &T::AccountId,
        record: StakeRecord,
    ) -> Result<StakeTotals, DispatchError> {
        let number = record.number;

        let mut user_totals = UserStakes::<T>::get((game_id, who, number));
        user_totals
            .accrue(record.amount, record.share, number)
            .map_err(Error::<T>::from)?;

        let mut number_totals = NumberTotals::<T>::get(game_id, number);
        let first_on_number = number_totals.is_empty();
        number_totals
            .accrue(record.amount, record.share, number)
            .map_err(Error::<T>::from)?;

        let mut game_totals = GameTotals::<T>::get(game_id);
        game_totals
            .accrue(record.amount, record.share, number)
            .map_err(Error::<T>::from)?;

        let mut chosen = UserChosenNumbers::<T>::get(game_id, who);
        if !chosen.contains(&number) {
            chosen
                .try_push(number)
                .map_err(|_| Error::<T>::TooManyNumbers)?;
        }

        let mut staked = StakedNumbers::<T>::get(game_id);
        if first_on_number {
            staked
                .try_push(number)
                .map_err(|_| Error::<T>::TooManyStakedNumbers)?;
        }

        let mut history = StakeHistory::<T>::get(game_id, who);
        // A zero MaxHistory keeps no history at all
        if T::MaxHistory::get() > 0 {
            if history.is_full() {
                // FIFO: drop the oldest record
                history.remove(0);
            }
            history
                .try_push(record)
                .map_err(|_| Error::<T>::HistoryFull)?;
        }

        UserStakes::<T>::insert((game_id, who, number), user_totals);
        NumberTotals::<T>::insert(game_id, number, number_totals);
        GameTotals::<T>::insert(game_id, game_totals);
        UserChosenNumbers::<T>::insert(game_id, who, chosen);
        StakedNumbers::<T>::insert(game_id, staked);
        StakeHistory::<T>::insert(game_id, who, history);

        Ok(user_totals)
    }

    /// Close a game whose window has elapsed and store its outputs.
    pub(crate) fn finalize(game_id: GameId) -> Result<Resolution, DispatchError> {
        let mut game = Games::<T>::get(game_id).ok_or(Error::<T>::GameNotFound)?;
        ensure!(game.status == GameStatus::Open, Error::<T>::AlreadyFinalized);

        let now = Self::now();
        game.window
            .ensure_elapsed_at(now)
            .map_err(Error::<T>::from)?;

        let totals = GameTotals::<T>::get(game_id);

        let mut rng = XorShiftRng::seed_from_u64(Self::finalization_seed(game_id));
        let resolution = game
            .implementation
            .logic()
            .resolve(&totals, &mut rng)
            .map_err(Error::<T>::from)?;

        game.status = GameStatus::Finalized;
        game.average_number = Some(resolution.average_number);
        game.final_number = Some(resolution.final_number);
        game.finalized_at = Some(now);
        Games::<T>::insert(game_id, game);

        Ok(resolution)
    }

    // ── Queries ────────────────────────────────────────────────────────

    /// Totals of every number staked on, in the order of its first stake.
    /// Empty for unknown games.
    pub fn staked_number_infos(game_id: GameId) -> Vec<StakedNumberInfo> {
        StakedNumbers::<T>::get(game_id)
            .into_iter()
            .map(|number| {
                let totals = NumberTotals::<T>::get(game_id, number);
                StakedNumberInfo {
                    number,
                    total_amount: totals.amount,
                    total_share: totals.share,
                }
            })
            .collect()
    }

    /// Raw amount `who` staked on `number`.
    pub fn amount_staked(game_id: GameId, who: &T::AccountId, number: GuessNumber) -> Share {
        UserStakes::<T>::get((game_id, who, number)).amount
    }

    /// Weighted share `who` holds on `number`.
    pub fn weighted_share(game_id: GameId, who: &T::AccountId, number: GuessNumber) -> Share {
        UserStakes::<T>::get((game_id, who, number)).share
    }

    pub fn chosen_numbers(game_id: GameId, who: &T::AccountId) -> Vec<GuessNumber> {
        UserChosenNumbers::<T>::get(game_id, who).into_inner()
    }

    pub fn stake_history(game_id: GameId, who: &T::AccountId) -> Vec<StakeRecord> {
        StakeHistory::<T>::get(game_id, who).into_inner()
    }

    /// End of the staking window, if the game exists.
    pub fn end_time(game_id: GameId) -> Option<Moment> {
        Games::<T>::get(game_id).map(|game| game.window.end_time())
    }
}
