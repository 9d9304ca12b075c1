//! Per-interval weight schedules
//!
//! A schedule holds one positive multiplier per interval of the game window.
//! Earlier intervals usually carry larger multipliers so early stakes pull the
//! average harder.

use crate::error::{GuessError, GuessResult};
use crate::types::{IntervalIndex, Share, Multiplier};
use crate::window::GameWindow;

/// Check that `weights` can be attached to a game running over `window`.
pub fn validate_weights(weights: &[Multiplier], window: &GameWindow) -> GuessResult<()> {
    if weights.len() != window.interval_count as usize {
        return Err(GuessError::InvalidWeights);
    }
    if weights.iter().any(|w| *w == 0) {
        return Err(GuessError::InvalidWeights);
    }
    Ok(())
}

/// Multiplier for `index`, clamped to the last entry.
pub fn weight_at(weights: &[Multiplier], index: IntervalIndex) -> GuessResult<Multiplier> {
    let last = weights.len().checked_sub(1).ok_or(GuessError::InvalidWeights)?;
    Ok(weights[(index as usize).min(last)])
}

/// Share credited for staking `amount` under `weight`.
pub fn weighted_share(amount: Share, weight: Multiplier) -> GuessResult<Share> {
    amount
        .checked_mul(weight as Share)
        .ok_or(GuessError::ArithmeticOverflow)
}
