//! Game rules
//!
//! Every game is bound at creation to one [`RulesVersion`]. The version resolves
//! to a [`GameLogic`] implementation that decides how stakes are weighted and how
//! the winning number is derived once the window has closed.

use parity_scale_codec::{Decode, DecodeWithMemTracking, Encode, MaxEncodedLen};
use scale_info::TypeInfo;
use serde::{Deserialize, Serialize};

use crate::error::{GuessError, GuessResult};
use crate::rng::GuessRng;
use crate::schedule::{weight_at, weighted_share};
use crate::types::{
    GuessNumber, IntervalIndex, Moment, Multiplier, Resolution, Share, StakeTotals,
};
use crate::window::GameWindow;

/// Largest distance between the weighted average and the final number.
pub const JITTER_BOUND: i32 = 100;

/// Weighting of a single stake, fixed at the moment it is recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StakeWeighting {
    pub interval: IntervalIndex,
    pub weight: Multiplier,
    pub share: Share,
}

/// Rules a game is resolved with.
pub trait GameLogic {
    /// Weigh a stake of `amount` arriving at `now`.
    fn weigh_stake(
        &self,
        window: &GameWindow,
        weights: &[Multiplier],
        now: Moment,
        amount: Share,
    ) -> GuessResult<StakeWeighting>;

    /// Weighted mean of the staked numbers in `totals`, truncated toward zero.
    fn average_number(&self, totals: &StakeTotals) -> GuessResult<GuessNumber>;

    /// Inclusive bound on the jitter added to the average.
    fn jitter_bound(&self) -> i32;

    /// Compute the average and the perturbed final number.
    fn resolve(&self, totals: &StakeTotals, rng: &mut dyn GuessRng) -> GuessResult<Resolution> {
        let average_number = self.average_number(totals)?;
        let bound = self.jitter_bound();
        let jitter = rng.bounded(-bound, bound);
        Ok(Resolution {
            average_number,
            final_number: apply_jitter(average_number, jitter),
            jitter,
        })
    }
}

/// Offset `average` by `jitter`, saturating at the ends of the number range.
pub fn apply_jitter(average: GuessNumber, jitter: i32) -> GuessNumber {
    (average as i64 + jitter as i64).clamp(0, GuessNumber::MAX as i64) as GuessNumber
}

/// Stakes are multiplied by the weight of the interval they arrive in, and the
/// winning number is the share-weighted mean of all chosen numbers plus a
/// bounded jitter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeightedAverage {
    pub jitter_bound: i32,
}

impl GameLogic for WeightedAverage {
    fn weigh_stake(
        &self,
        window: &GameWindow,
        weights: &[Multiplier],
        now: Moment,
        amount: Share,
    ) -> GuessResult<StakeWeighting> {
        if amount == 0 {
            return Err(GuessError::ZeroAmount);
        }
        window.ensure_open_at(now)?;

        let interval = window.interval_index(now);
        let weight = weight_at(weights, interval)?;
        let share = weighted_share(amount, weight)?;
        Ok(StakeWeighting {
            interval,
            weight,
            share,
        })
    }

    fn average_number(&self, totals: &StakeTotals) -> GuessResult<GuessNumber> {
        if totals.share == 0 {
            return Err(GuessError::NoParticipants);
        }
        // A mean of u32 numbers fits in u32 whenever the totals are consistent
        GuessNumber::try_from(totals.weighted_sum / totals.share)
            .map_err(|_| GuessError::ArithmeticOverflow)
    }

    fn jitter_bound(&self) -> i32 {
        self.jitter_bound
    }
}

static WEIGHTED_AVERAGE_V1: WeightedAverage = WeightedAverage {
    jitter_bound: JITTER_BOUND,
};

/// Identifies a rules implementation a game can be bound to.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Encode,
    Decode,
    DecodeWithMemTracking,
    TypeInfo,
    MaxEncodedLen,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "camelCase")]
pub enum RulesVersion {
    /// Interval-weighted average with a ±100 jitter.
    WeightedAverageV1,
}

impl RulesVersion {
    pub fn logic(&self) -> &'static dyn GameLogic {
        match self {
            RulesVersion::WeightedAverageV1 => &WEIGHTED_AVERAGE_V1,
        }
    }
}
