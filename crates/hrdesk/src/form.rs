//! New-employee submission.
//!
//! An [`EmployeeForm`] holds what a user typed. [`EmployeeForm::submit`]
//! checks it against [`FormRules`], derives the vacation entitlement and
//! resolves the seniority selection, producing an [`Employee`] ready to be
//! appended. A rejected submission writes nothing.

use chrono::NaiveDate;
use tracing::debug;

use crate::config::Config;
use crate::employee::Employee;
use crate::error::{Error, Result};
use crate::seniority::SenioritySelection;
use crate::workload::{vacation_entitlement_with_max, Workload};

/// Message shown when either name field is blank.
pub const NAMES_REQUIRED: &str = "First and last name are required.";

/// Constraints a submission must satisfy.
#[derive(Debug, Clone, PartialEq)]
pub struct FormRules {
    /// Youngest accepted age.
    pub min_age: u32,
    /// Oldest accepted age.
    pub max_age: u32,
    /// Workloads on offer. Empty accepts any valid workload.
    pub workload_options: Vec<Workload>,
    /// Vacation days granted at a 100% workload.
    pub max_vacation_days: u32,
    /// Only accept cantons and departments already in the dataset.
    pub restrict_to_known_values: bool,
}

impl FormRules {
    /// Build the rules from loaded configuration.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        Self {
            min_age: config.form.min_age,
            max_age: config.form.max_age,
            workload_options: config.workload_options(),
            max_vacation_days: config.rules.max_vacation_days,
            restrict_to_known_values: config.form.restrict_to_known_values,
        }
    }
}

impl Default for FormRules {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

/// A raw new-employee submission.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EmployeeForm {
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Canton of residence.
    pub canton: String,
    /// Department.
    pub department: String,
    /// Age in years.
    pub age: u32,
    /// Workload as typed, e.g. `80%`.
    pub workload: String,
    /// Chosen level, or `Auto` to infer it.
    pub seniority: SenioritySelection,
    /// Hire date; defaults to `today` on submit.
    pub hire_date: Option<NaiveDate>,
    /// Vacation days already taken.
    pub vacation_days_taken: u32,
}

impl EmployeeForm {
    /// Validate the submission and build the record to append.
    ///
    /// `existing` is the current dataset, used to check canton and
    /// department against known values. `today` fills a missing hire date
    /// and anchors seniority inference.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] when a rule is violated and
    /// [`Error::Workload`] when the workload cannot be parsed.
    pub fn submit(
        &self,
        rules: &FormRules,
        existing: &[Employee],
        today: NaiveDate,
    ) -> Result<Employee> {
        let first_name = self.first_name.trim();
        let last_name = self.last_name.trim();
        if first_name.is_empty() || last_name.is_empty() {
            return Err(Error::validation(NAMES_REQUIRED));
        }

        let canton = self.canton.trim();
        let department = self.department.trim();
        if canton.is_empty() || department.is_empty() {
            return Err(Error::validation("Canton and department are required."));
        }

        if !(rules.min_age..=rules.max_age).contains(&self.age) {
            return Err(Error::validation(format!(
                "Age must be between {} and {}.",
                rules.min_age, rules.max_age
            )));
        }

        let workload = Workload::parse(&self.workload)?;
        if !rules.workload_options.is_empty() && !rules.workload_options.contains(&workload) {
            let offered: Vec<String> = rules
                .workload_options
                .iter()
                .map(ToString::to_string)
                .collect();
            return Err(Error::validation(format!(
                "Workload {workload} is not one of {}.",
                offered.join(", ")
            )));
        }

        if rules.restrict_to_known_values && !existing.is_empty() {
            if !existing.iter().any(|e| e.canton == canton) {
                return Err(Error::validation(format!("Unknown canton '{canton}'.")));
            }
            if !existing.iter().any(|e| e.department == department) {
                return Err(Error::validation(format!(
                    "Unknown department '{department}'."
                )));
            }
        }

        let vacation_days_total = vacation_entitlement_with_max(workload, rules.max_vacation_days);
        if self.vacation_days_taken > vacation_days_total {
            return Err(Error::validation(format!(
                "Vacation days taken ({}) cannot exceed the entitlement of {vacation_days_total}.",
                self.vacation_days_taken
            )));
        }

        let hire_date = self.hire_date.unwrap_or(today);
        let seniority = self.seniority.resolve(self.age, Some(hire_date), today);
        debug!(
            "Form accepted for {first_name} {last_name}: {seniority}, {workload}, {vacation_days_total} days"
        );

        Ok(Employee {
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            canton: canton.to_string(),
            age: self.age,
            department: department.to_string(),
            seniority,
            workload,
            vacation_days_total,
            vacation_days_taken: self.vacation_days_taken,
            hire_date,
        })
    }
}
