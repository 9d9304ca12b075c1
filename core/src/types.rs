//! Shared value types for the staking ledger.

use parity_scale_codec::{Decode, DecodeWithMemTracking, Encode, MaxEncodedLen};
use scale_info::TypeInfo;
use serde::{Deserialize, Serialize};

use crate::error::{GuessError, GuessResult};

/// A number a participant can choose.
pub type GuessNumber = u32;

/// Unix time in seconds.
pub type Moment = u64;

/// Zero-based interval position inside a game window.
pub type IntervalIndex = u32;

/// Per-interval stake multiplier.
pub type Multiplier = u32;

/// Staked amounts and weighted shares are tracked at this width.
pub type Share = u128;

/// Running amount and weighted-share sums.
///
/// Used for a single (user, number) entry, for all stakes on one number, and
/// for the whole game. All fields only ever grow.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Encode,
    Decode,
    DecodeWithMemTracking,
    TypeInfo,
    MaxEncodedLen,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "camelCase")]
pub struct StakeTotals {
    pub amount: Share,
    pub share: Share,
    /// Sum of `share × number`, the numerator of the weighted average.
    pub weighted_sum: Share,
}

impl StakeTotals {
    /// Add a stake of `amount` crediting `share` on `number`.
    ///
    /// Fails without change if any sum leaves the accounting width.
    pub fn accrue(&mut self, amount: Share, share: Share, number: GuessNumber) -> GuessResult<()> {
        let amount = self
            .amount
            .checked_add(amount)
            .ok_or(GuessError::ArithmeticOverflow)?;
        let weighted_sum = share
            .checked_mul(number as Share)
            .and_then(|term| self.weighted_sum.checked_add(term))
            .ok_or(GuessError::ArithmeticOverflow)?;
        let share = self
            .share
            .checked_add(share)
            .ok_or(GuessError::ArithmeticOverflow)?;
        self.amount = amount;
        self.share = share;
        self.weighted_sum = weighted_sum;
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.amount == 0 && self.share == 0
    }
}

/// Aggregate view of one chosen number.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Encode,
    Decode,
    DecodeWithMemTracking,
    TypeInfo,
    MaxEncodedLen,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "camelCase")]
pub struct StakedNumberInfo {
    pub number: GuessNumber,
    pub total_amount: Share,
    pub total_share: Share,
}

/// One recorded stake, kept in a participant's history.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Encode,
    Decode,
    DecodeWithMemTracking,
    TypeInfo,
    MaxEncodedLen,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "camelCase")]
pub struct StakeRecord {
    pub number: GuessNumber,
    pub amount: Share,
    /// Share credited by this stake alone, locked in at `at`.
    pub share: Share,
    pub interval: IntervalIndex,
    pub weight: Multiplier,
    pub at: Moment,
}

/// Output of a finalization.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Encode,
    Decode,
    DecodeWithMemTracking,
    TypeInfo,
    MaxEncodedLen,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "camelCase")]
pub struct Resolution {
    pub average_number: GuessNumber,
    pub final_number: GuessNumber,
    pub jitter: i32,
}
