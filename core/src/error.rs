//! Error types for game rules
//!
//! This module provides no_std compatible error types using enums
//! instead of String-based errors for Substrate compatibility.

use parity_scale_codec::{Decode, Encode};
use scale_info::TypeInfo;
use serde::{Deserialize, Serialize};

/// Errors raised by the rules engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Encode, Decode, TypeInfo, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum GuessError {
    /// Interval length or count is zero, or the end time overflows
    InvalidWindow,
    /// Weight table length differs from the interval count, or holds a zero weight
    InvalidWeights,
    /// Stake attempted at or after the end time
    WindowClosed,
    /// Finalization attempted before the end time
    WindowNotElapsed,
    /// Nobody has staked, so there is no average to take
    NoParticipants,
    /// Stake amount must be positive
    ZeroAmount,
    /// A share or total exceeded the accounting width
    ArithmeticOverflow,
}

/// Result type alias for rules operations
pub type GuessResult<T> = Result<T, GuessError>;
