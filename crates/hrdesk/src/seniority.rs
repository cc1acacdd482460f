//! Seniority levels and the seniority ladder.
//!
//! The ladder maps an employee's age and tenure to a suggested level. Rules
//! are checked top to bottom and the first match wins:
//!
//! | Rule | Condition                       | Level    |
//! |------|---------------------------------|----------|
//! | 1    | age < 28 and tenure < 3 years   | Junior   |
//! | 2    | age < 35 and tenure < 6 years   | Mid      |
//! | 3    | age < 45 and tenure < 12 years  | Senior   |
//! | 4    | age < 60 and tenure >= 8 years  | Manager  |
//! | 5    | anything else                   | Director |
//!
//! Rule 5 also catches employees rules 1-4 leave uncovered, such as a
//! 50-year-old hired two years ago. That case yields `Director`.

use std::fmt;
use std::str::FromStr;

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Days per year used when converting elapsed days to tenure.
const DAYS_PER_YEAR: f64 = 365.25;

/// An employee's seniority level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SeniorityLevel {
    /// Entry level.
    Junior,
    /// Intermediate.
    Mid,
    /// Experienced individual contributor.
    Senior,
    /// People manager.
    Manager,
    /// Head of a unit.
    Director,
}

impl SeniorityLevel {
    /// All levels, lowest first.
    pub const ALL: [Self; 5] = [
        Self::Junior,
        Self::Mid,
        Self::Senior,
        Self::Manager,
        Self::Director,
    ];

    /// The label stored in the dataset.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Junior => "Junior",
            Self::Mid => "Mid",
            Self::Senior => "Senior",
            Self::Manager => "Manager",
            Self::Director => "Director",
        }
    }
}

impl fmt::Display for SeniorityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An unrecognized seniority label.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown seniority level '{0}'")]
pub struct UnknownSeniority(pub String);

impl FromStr for SeniorityLevel {
    type Err = UnknownSeniority;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Self::ALL
            .into_iter()
            .find(|level| level.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| UnknownSeniority(trimmed.to_string()))
    }
}

/// The seniority choice on an entry form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SenioritySelection {
    /// Infer the level from age and hire date.
    #[default]
    Auto,
    /// Use the given level as-is.
    Fixed(SeniorityLevel),
}

impl SenioritySelection {
    /// Resolve the selection to a concrete level.
    #[must_use]
    pub fn resolve(
        self,
        age: u32,
        hire_date: Option<NaiveDate>,
        today: NaiveDate,
    ) -> SeniorityLevel {
        match self {
            Self::Auto => suggest_seniority(age, hire_date, today),
            Self::Fixed(level) => level,
        }
    }
}

impl FromStr for SenioritySelection {
    type Err = UnknownSeniority;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("auto") || trimmed.eq_ignore_ascii_case("auto-suggest")
        {
            Ok(Self::Auto)
        } else {
            trimmed.parse().map(Self::Fixed)
        }
    }
}

impl fmt::Display for SenioritySelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Auto => f.write_str("Auto-suggest"),
            Self::Fixed(level) => level.fmt(f),
        }
    }
}

/// Years elapsed between `hire_date` and `today`.
///
/// Negative when the hire date lies in the future.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn tenure_years(hire_date: NaiveDate, today: NaiveDate) -> f64 {
    (today - hire_date).num_days() as f64 / DAYS_PER_YEAR
}

/// Apply the seniority ladder to an age and a tenure in years.
#[must_use]
pub fn infer_seniority(age: u32, tenure: f64) -> SeniorityLevel {
    if age < 28 && tenure < 3.0 {
        return SeniorityLevel::Junior;
    }
    if age < 35 && tenure < 6.0 {
        return SeniorityLevel::Mid;
    }
    if age < 45 && tenure < 12.0 {
        return SeniorityLevel::Senior;
    }
    if age < 60 && tenure >= 8.0 {
        return SeniorityLevel::Manager;
    }
    SeniorityLevel::Director
}

/// Suggest a level from age and an optional hire date, as of `today`.
///
/// A missing hire date counts as zero tenure.
#[must_use]
pub fn suggest_seniority(
    age: u32,
    hire_date: Option<NaiveDate>,
    today: NaiveDate,
) -> SeniorityLevel {
    let tenure = hire_date.map_or(0.0, |hired| tenure_years(hired, today));
    infer_seniority(age, tenure)
}

/// Suggest a level using the local calendar date as `today`.
#[must_use]
pub fn suggest_seniority_now(age: u32, hire_date: Option<NaiveDate>) -> SeniorityLevel {
    suggest_seniority(age, hire_date, Local::now().date_naive())
}
