//! Workload parsing and vacation entitlement.
//!
//! A workload is the fraction of full-time employment. Users write it in
//! three ways, all accepted by [`Workload::parse`]:
//!
//! - a percentage string: `"80%"`
//! - a whole-number percentage: `"80"`
//! - a literal fraction: `"0.8"`
//!
//! Any number greater than 1 is read as a percentage. The parsed fraction
//! must lie in `0.0..=1.0`; anything outside is rejected rather than scaled.
//!
//! ```
//! use hrdesk::workload::{vacation_entitlement, Workload};
//!
//! let workload: Workload = "80%".parse().unwrap();
//! assert_eq!(workload.fraction(), 0.8);
//! assert_eq!(vacation_entitlement(workload), 20);
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Vacation days granted at a 100% workload.
pub const DEFAULT_MAX_VACATION_DAYS: u32 = 25;

/// Reasons a workload value can be rejected.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum WorkloadError {
    /// The input was blank.
    #[error("workload is empty")]
    Empty,

    /// The input was neither a percentage string nor a number.
    #[error("'{0}' is neither a percentage nor a number")]
    Invalid(String),

    /// The input parsed, but the fraction falls outside 0%..=100%.
    #[error("workload {0} is outside the range 0%..=100%")]
    OutOfRange(String),
}

/// Hundredths of a percent in a full-time workload.
const FULL_TIME_STEPS: u32 = 10_000;

/// A validated fraction of full-time employment in `0.0..=1.0`.
///
/// Stored as whole hundredths of a percent, so `12.3449%` is kept as
/// `12.34%`. Display prints the stored value exactly and parsing it back
/// yields an equal workload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct Workload(u32);

impl Workload {
    /// Full-time employment.
    pub const FULL_TIME: Self = Self(FULL_TIME_STEPS);

    /// Parse a workload from user or dataset text.
    ///
    /// # Errors
    ///
    /// Returns [`WorkloadError::Empty`] for blank input,
    /// [`WorkloadError::Invalid`] for non-numeric input and
    /// [`WorkloadError::OutOfRange`] when the fraction is not in `0..=1`.
    pub fn parse(input: &str) -> Result<Self, WorkloadError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(WorkloadError::Empty);
        }

        if let Some(number) = trimmed.strip_suffix('%') {
            let percent = parse_finite(number.trim()).ok_or_else(|| invalid(input))?;
            return Self::checked(percent / 100.0, trimmed);
        }

        let value = parse_finite(trimmed).ok_or_else(|| invalid(input))?;
        Self::from_number(value)
    }

    /// Interpret a bare number: values above 1 are whole-number percentages,
    /// everything else is a literal fraction.
    ///
    /// # Errors
    ///
    /// Returns an error if the value is not finite or falls outside `0..=1`
    /// after conversion.
    pub fn from_number(value: f64) -> Result<Self, WorkloadError> {
        if !value.is_finite() {
            return Err(WorkloadError::Invalid(value.to_string()));
        }
        let fraction = if value > 1.0 { value / 100.0 } else { value };
        Self::checked(fraction, &value.to_string())
    }

    /// Build a workload from a fraction without any percentage sniffing.
    ///
    /// # Errors
    ///
    /// Returns [`WorkloadError::OutOfRange`] if the fraction is not in `0..=1`.
    pub fn from_fraction(fraction: f64) -> Result<Self, WorkloadError> {
        if !fraction.is_finite() {
            return Err(WorkloadError::Invalid(fraction.to_string()));
        }
        Self::checked(fraction, &fraction.to_string())
    }

    /// The fraction of full-time, in `0.0..=1.0`.
    #[must_use]
    pub fn fraction(self) -> f64 {
        f64::from(self.0) / f64::from(FULL_TIME_STEPS)
    }

    /// The workload as a percentage, in `0.0..=100.0`.
    #[must_use]
    pub fn percent(self) -> f64 {
        f64::from(self.0) / 100.0
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn checked(fraction: f64, original: &str) -> Result<Self, WorkloadError> {
        if (0.0..=1.0).contains(&fraction) {
            // In range, so the product lies in 0..=10_000.
            Ok(Self((fraction * f64::from(FULL_TIME_STEPS)).round() as u32))
        } else {
            Err(WorkloadError::OutOfRange(original.to_string()))
        }
    }
}

fn parse_finite(text: &str) -> Option<f64> {
    text.parse::<f64>().ok().filter(|v| v.is_finite())
}

fn invalid(input: &str) -> WorkloadError {
    WorkloadError::Invalid(input.trim().to_string())
}

impl Default for Workload {
    fn default() -> Self {
        Self::FULL_TIME
    }
}

impl fmt::Display for Workload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let whole = self.0 / 100;
        match self.0 % 100 {
            0 => write!(f, "{whole}%"),
            hundredths if hundredths % 10 == 0 => write!(f, "{whole}.{}%", hundredths / 10),
            hundredths => write!(f, "{whole}.{hundredths:02}%"),
        }
    }
}

impl FromStr for Workload {
    type Err = WorkloadError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<Workload> for String {
    fn from(workload: Workload) -> Self {
        workload.to_string()
    }
}

impl TryFrom<String> for Workload {
    type Error = WorkloadError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

/// Annual vacation days for a workload, scaled from 25 days at 100%.
#[must_use]
pub fn vacation_entitlement(workload: Workload) -> u32 {
    vacation_entitlement_with_max(workload, DEFAULT_MAX_VACATION_DAYS)
}

/// Annual vacation days for a workload, scaled linearly from `max_days`.
///
/// Rounds half to even: 12.5 days becomes 12, 17.5 becomes 18.
#[must_use]
pub fn vacation_entitlement_with_max(workload: Workload, max_days: u32) -> u32 {
    let scaled = u64::from(max_days) * u64::from(workload.0);
    let steps = u64::from(FULL_TIME_STEPS);
    let (mut days, remainder) = (scaled / steps, scaled % steps);
    if remainder * 2 > steps || (remainder * 2 == steps && days % 2 == 1) {
        days += 1;
    }
    // workload.0 <= FULL_TIME_STEPS, so days <= max_days.
    u32::try_from(days).unwrap_or(max_days)
}
