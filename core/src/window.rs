//! Time window of a game
//!
//! A game runs from `start_time` for `interval_count` consecutive intervals of
//! `interval_length` seconds each. All times are unix seconds.

use parity_scale_codec::{Decode, DecodeWithMemTracking, Encode, MaxEncodedLen};
use scale_info::TypeInfo;
use serde::{Deserialize, Serialize};

use crate::error::{GuessError, GuessResult};
use crate::types::{IntervalIndex, Moment};

/// Start time and day-bucketed schedule of a game.
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
pub struct GameWindow {
    pub start_time: Moment,
    pub interval_length: Moment,
    pub interval_count: IntervalIndex,
}

impl GameWindow {
    /// Build a validated window.
    ///
    /// Both the interval length and count must be positive, and the end time
    /// must fit in a `Moment`.
    pub fn new(
        start_time: Moment,
        interval_length: Moment,
        interval_count: IntervalIndex,
    ) -> GuessResult<Self> {
        if interval_length == 0 || interval_count == 0 {
            return Err(GuessError::InvalidWindow);
        }
        interval_length
            .checked_mul(interval_count as Moment)
            .and_then(|span| start_time.checked_add(span))
            .ok_or(GuessError::InvalidWindow)?;

        Ok(Self {
            start_time,
            interval_length,
            interval_count,
        })
    }

    /// First instant at which stakes are no longer accepted.
    pub fn end_time(&self) -> Moment {
        self.start_time
            .saturating_add(self.interval_length.saturating_mul(self.interval_count as Moment))
    }

    /// Zero-based interval that `now` falls into, clamped to the schedule.
    ///
    /// Instants before the start map to interval 0, instants after the last
    /// interval map to the last one.
    pub fn interval_index(&self, now: Moment) -> IntervalIndex {
        if now <= self.start_time || self.interval_length == 0 {
            return 0;
        }
        let elapsed = (now - self.start_time) / self.interval_length;
        let last = self.interval_count.saturating_sub(1) as Moment;
        elapsed.min(last) as IntervalIndex
    }

    /// Whether a stake arriving at `now` may still be recorded.
    pub fn ensure_open_at(&self, now: Moment) -> GuessResult<()> {
        if now < self.end_time() {
            Ok(())
        } else {
            Err(GuessError::WindowClosed)
        }
    }

    /// Whether the window has fully elapsed at `now`, allowing finalization.
    pub fn ensure_elapsed_at(&self, now: Moment) -> GuessResult<()> {
        if now >= self.end_time() {
            Ok(())
        } else {
            Err(GuessError::WindowNotElapsed)
        }
    }
}
