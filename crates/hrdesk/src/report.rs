//! Filtering and summary figures over the employee dataset.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use crate::employee::Employee;

/// Row filter. Every `None` field means "All".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmployeeFilter {
    /// Exact department match.
    pub department: Option<String>,
    /// Exact canton match.
    pub canton: Option<String>,
    /// Inclusive lower age bound.
    pub min_age: Option<u32>,
    /// Inclusive upper age bound.
    pub max_age: Option<u32>,
}

impl EmployeeFilter {
    /// Whether `employee` passes every set criterion.
    #[must_use]
    pub fn matches(&self, employee: &Employee) -> bool {
        self.department
            .as_deref()
            .map_or(true, |department| employee.department == department)
            && self
                .canton
                .as_deref()
                .map_or(true, |canton| employee.canton == canton)
            && self.min_age.map_or(true, |min| employee.age >= min)
            && self.max_age.map_or(true, |max| employee.age <= max)
    }

    /// The matching records, in dataset order.
    #[must_use]
    pub fn apply<'a>(&self, employees: &'a [Employee]) -> Vec<&'a Employee> {
        employees.iter().filter(|e| self.matches(e)).collect()
    }
}

/// Headline figures for a filtered view.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    /// Number of employees in view.
    pub employees: usize,
    /// Mean age rounded to one decimal, `None` for an empty view.
    pub average_age: Option<f64>,
    /// Number of distinct departments in view.
    pub departments: usize,
}

impl Summary {
    /// Compute the summary of `employees`.
    #[must_use]
    pub fn of(employees: &[&Employee]) -> Self {
        let departments = employees
            .iter()
            .map(|e| e.department.as_str())
            .collect::<BTreeSet<_>>()
            .len();

        Self {
            employees: employees.len(),
            average_age: mean(employees.iter().map(|e| f64::from(e.age)))
                .map(round_one_decimal),
            departments,
        }
    }
}

/// Per-department figures.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DepartmentStats {
    /// Department name.
    pub department: String,
    /// Number of employees.
    pub employees: usize,
    /// Mean age rounded to one decimal.
    pub average_age: f64,
    /// Youngest employee's age.
    pub min_age: u32,
    /// Oldest employee's age.
    pub max_age: u32,
    /// Mean workload as a fraction, rounded to three decimals.
    pub average_workload: f64,
}

/// Figures for each department, sorted by department name.
#[must_use]
pub fn department_breakdown(employees: &[&Employee]) -> Vec<DepartmentStats> {
    let mut groups: BTreeMap<&str, Vec<&Employee>> = BTreeMap::new();
    for &employee in employees {
        groups
            .entry(employee.department.as_str())
            .or_default()
            .push(employee);
    }

    groups
        .into_iter()
        .map(|(department, members)| {
            let ages = members.iter().map(|e| e.age);
            DepartmentStats {
                department: department.to_string(),
                employees: members.len(),
                average_age: mean(members.iter().map(|e| f64::from(e.age)))
                    .map_or(0.0, round_one_decimal),
                min_age: ages.clone().min().unwrap_or(0),
                max_age: ages.max().unwrap_or(0),
                average_workload: mean(members.iter().map(|e| e.workload.fraction()))
                    .map_or(0.0, |w| (w * 1000.0).round_ties_even() / 1000.0),
            }
        })
        .collect()
}

/// Values an entry form offers, derived from the dataset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FormOptions {
    /// Distinct departments, sorted.
    pub departments: Vec<String>,
    /// Distinct cantons, sorted.
    pub cantons: Vec<String>,
    /// Youngest and oldest age present, `None` for an empty dataset.
    pub age_range: Option<(u32, u32)>,
}

impl FormOptions {
    /// Collect the options from `employees`. Blank values are skipped.
    #[must_use]
    pub fn from_records(employees: &[Employee]) -> Self {
        let distinct = |field: fn(&Employee) -> &str| -> Vec<String> {
            employees
                .iter()
                .map(field)
                .filter(|value| !value.is_empty())
                .collect::<BTreeSet<_>>()
                .into_iter()
                .map(String::from)
                .collect()
        };

        let ages = employees.iter().map(|e| e.age);
        let age_range = ages.clone().min().zip(ages.max());

        Self {
            departments: distinct(|e| e.department.as_str()),
            cantons: distinct(|e| e.canton.as_str()),
            age_range,
        }
    }
}

#[allow(clippy::cast_precision_loss)]
fn mean(values: impl Iterator<Item = f64>) -> Option<f64> {
    let (sum, count) = values.fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    (count > 0).then(|| sum / count as f64)
}

/// Round half to even at one decimal: 39.25 becomes 39.2.
fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round_ties_even() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    use chrono::NaiveDate;

    use crate::seniority::SeniorityLevel;

    fn employee(
        first: &str,
        canton: &str,
        department: &str,
        age: u32,
        workload: &str,
    ) -> Employee {
        Employee {
            first_name: first.to_string(),
            last_name: "Test".to_string(),
            canton: canton.to_string(),
            age,
            department: department.to_string(),
            seniority: SeniorityLevel::Mid,
            workload: workload.parse().unwrap(),
            vacation_days_total: 20,
            vacation_days_taken: 0,
            hire_date: NaiveDate::from_ymd_opt(2020, 1, 1).unwrap(),
        }
    }

    fn dataset() -> Vec<Employee> {
        vec![
            employee("A", "ZH", "IT", 25, "100%"),
            employee("B", "ZH", "Finance", 41, "80%"),
            employee("C", "BE", "IT", 33, "60%"),
            employee("D", "GE", "HR", 58, "100%"),
        ]
    }

    fn names(view: &[&Employee]) -> Vec<String> {
        view.iter().map(|e| e.first_name.clone()).collect()
    }

    #[test]
    fn test_empty_filter_matches_everything() {
        let data = dataset();
        assert_eq!(EmployeeFilter::default().apply(&data).len(), 4);
    }

    #[test]
    fn test_filter_by_department() {
        let data = dataset();
        let filter = EmployeeFilter {
            department: Some("IT".to_string()),
            ..EmployeeFilter::default()
        };
        assert_eq!(names(&filter.apply(&data)), vec!["A", "C"]);
    }

    #[test]
    fn test_filter_combined() {
        let data = dataset();
        let filter = EmployeeFilter {
            department: Some("IT".to_string()),
            canton: Some("ZH".to_string()),
            ..EmployeeFilter::default()
        };
        assert_eq!(names(&filter.apply(&data)), vec!["A"]);
    }

    #[test]
    fn test_filter_age_bounds_inclusive() {
        let data = dataset();
        let filter = EmployeeFilter {
            min_age: Some(33),
            max_age: Some(41),
            ..EmployeeFilter::default()
        };
        assert_eq!(names(&filter.apply(&data)), vec!["B", "C"]);
    }

    #[test]
    fn test_summary() {
        let data = dataset();
        let view = EmployeeFilter::default().apply(&data);
        let summary = Summary::of(&view);

        assert_eq!(summary.employees, 4);
        assert_eq!(summary.average_age, Some(39.2));
        assert_eq!(summary.departments, 3);
    }

    #[test]
    fn test_average_age_rounds_half_to_even() {
        let data: Vec<Employee> = [39, 39, 39, 40]
            .into_iter()
            .map(|age| employee("A", "ZH", "IT", age, "100%"))
            .collect();
        let view = EmployeeFilter::default().apply(&data);

        assert_eq!(Summary::of(&view).average_age, Some(39.2));
        assert_eq!(department_breakdown(&view)[0].average_age, 39.2);

        let data: Vec<Employee> = [39, 39, 40, 40, 40, 40]
            .into_iter()
            .map(|age| employee("A", "ZH", "IT", age, "100%"))
            .collect();
        let view = EmployeeFilter::default().apply(&data);
        assert_eq!(Summary::of(&view).average_age, Some(39.7));
    }

    #[test]
    fn test_summary_of_empty_view() {
        let summary = Summary::of(&[]);
        assert_eq!(summary.employees, 0);
        assert_eq!(summary.average_age, None);
        assert_eq!(summary.departments, 0);
    }

    #[test]
    fn test_department_breakdown() {
        let data = dataset();
        let view = EmployeeFilter::default().apply(&data);
        let breakdown = department_breakdown(&view);

        let departments: Vec<&str> = breakdown.iter().map(|d| d.department.as_str()).collect();
        assert_eq!(departments, vec!["Finance", "HR", "IT"]);

        let it = &breakdown[2];
        assert_eq!(it.employees, 2);
        assert_eq!(it.average_age, 29.0);
        assert_eq!(it.min_age, 25);
        assert_eq!(it.max_age, 33);
        assert_eq!(it.average_workload, 0.8);
    }

    #[test]
    fn test_form_options() {
        let options = FormOptions::from_records(&dataset());
        assert_eq!(options.departments, vec!["Finance", "HR", "IT"]);
        assert_eq!(options.cantons, vec!["BE", "GE", "ZH"]);
        assert_eq!(options.age_range, Some((25, 58)));
    }

    #[test]
    fn test_form_options_empty() {
        let options = FormOptions::from_records(&[]);
        assert!(options.departments.is_empty());
        assert_eq!(options.age_range, None);
    }
}
