//! The employee record.
//!
//! One row of the HR dataset. Records are created through the entry form,
//! appended to the dataset, and never updated or deleted afterwards. They
//! carry no identifier of their own; two rows with identical content are
//! indistinguishable.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::seniority::{tenure_years, SeniorityLevel};
use crate::workload::Workload;

/// A single employee row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    /// Given name.
    pub first_name: String,

    /// Family name.
    pub last_name: String,

    /// Canton of residence.
    pub canton: String,

    /// Age in years.
    pub age: u32,

    /// Department the employee belongs to.
    pub department: String,

    /// Seniority level, either chosen or suggested at entry time.
    pub seniority: SeniorityLevel,

    /// Fraction of full-time employment.
    pub workload: Workload,

    /// Annual vacation entitlement derived from the workload.
    pub vacation_days_total: u32,

    /// Vacation days already taken this year.
    pub vacation_days_taken: u32,

    /// First day of employment.
    pub hire_date: NaiveDate,
}

impl Employee {
    /// First and last name joined by a space.
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Vacation days still available. Never negative.
    #[must_use]
    pub fn vacation_days_remaining(&self) -> u32 {
        self.vacation_days_total
            .saturating_sub(self.vacation_days_taken)
    }

    /// Years with the company as of `today`.
    #[must_use]
    pub fn tenure_years(&self, today: NaiveDate) -> f64 {
        tenure_years(self.hire_date, today)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Employee {
        Employee {
            first_name: "Anna".to_string(),
            last_name: "Meier".to_string(),
            canton: "ZH".to_string(),
            age: 34,
            department: "Finance".to_string(),
            seniority: SeniorityLevel::Mid,
            workload: "80%".parse().unwrap(),
            vacation_days_total: 20,
            vacation_days_taken: 5,
            hire_date: NaiveDate::from_ymd_opt(2020, 3, 1).unwrap(),
        }
    }

    #[test]
    fn test_full_name() {
        assert_eq!(sample().full_name(), "Anna Meier");
    }

    #[test]
    fn test_vacation_days_remaining() {
        let mut employee = sample();
        assert_eq!(employee.vacation_days_remaining(), 15);

        employee.vacation_days_taken = 30;
        assert_eq!(employee.vacation_days_remaining(), 0);
    }

    #[test]
    fn test_tenure_years() {
        let employee = sample();
        let today = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let tenure = employee.tenure_years(today);
        assert!(tenure > 3.99 && tenure < 4.01);
    }

    #[test]
    fn test_serialize_json() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["first_name"], "Anna");
        assert_eq!(json["seniority"], "Mid");
        assert_eq!(json["workload"], "80%");
        assert_eq!(json["hire_date"], "2020-03-01");
    }

    #[test]
    fn test_deserialize_json() {
        let json = serde_json::to_string(&sample()).unwrap();
        let back: Employee = serde_json::from_str(&json).unwrap();
        assert_eq!(back, sample());
    }
}
