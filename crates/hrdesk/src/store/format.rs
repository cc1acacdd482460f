//! Dataset column layout and cell conversions.
//!
//! Columns are located by header name, so the dataset may order them freely
//! and carry extra columns that hrdesk does not interpret.

use chrono::{NaiveDate, NaiveDateTime};
use csv::StringRecord;

use crate::employee::Employee;
use crate::error::{Error, Result};
use crate::seniority::SeniorityLevel;
use crate::workload::Workload;

/// Header of the first name column.
pub const FIRST_NAME: &str = "First Name";
/// Header of the last name column.
pub const LAST_NAME: &str = "Last Name";
/// Header of the residence column.
pub const CANTON: &str = "Residence (Canton)";
/// Header of the age column.
pub const AGE: &str = "Age";
/// Header of the department column.
pub const DEPARTMENT: &str = "Department";
/// Header of the seniority column.
pub const SENIORITY: &str = "Seniority Level";
/// Header of the workload column.
pub const WORKLOAD: &str = "Workload";
/// Header of the vacation entitlement column.
pub const VACATION_TOTAL: &str = "Vacation Days Total";
/// Header of the vacation taken column.
pub const VACATION_TAKEN: &str = "Vacation Days Taken";
/// Header of the hire date column.
pub const HIRE_DATE: &str = "Hire Date";

/// Required columns, in the order a new dataset is written.
pub const COLUMNS: [&str; 10] = [
    FIRST_NAME,
    LAST_NAME,
    CANTON,
    AGE,
    DEPARTMENT,
    SENIORITY,
    WORKLOAD,
    VACATION_TOTAL,
    VACATION_TAKEN,
    HIRE_DATE,
];

/// Date format written on append.
const ISO_DATE: &str = "%Y-%m-%d";

/// Date-only formats accepted on read.
const DATE_FORMATS: &[&str] = &[ISO_DATE, "%Y/%m/%d", "%m/%d/%Y"];

/// Timestamp formats accepted on read; the time part is dropped.
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
];

/// Position of each required column within a header row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnIndex {
    positions: [usize; COLUMNS.len()],
}

impl ColumnIndex {
    /// Locate every required column in `headers`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingColumn`] naming the first absent column.
    pub fn from_headers(headers: &StringRecord) -> Result<Self> {
        let mut positions = [0; COLUMNS.len()];
        for (slot, column) in positions.iter_mut().zip(COLUMNS) {
            *slot = headers
                .iter()
                .position(|header| header.trim() == column)
                .ok_or(Error::MissingColumn { column })?;
        }
        Ok(Self { positions })
    }

    fn cell<'r>(&self, record: &'r StringRecord, column: usize) -> &'r str {
        record.get(self.positions[column]).unwrap_or("").trim()
    }
}

/// Convert one data row into an [`Employee`].
///
/// `row` is the 1-based data row number used in error messages.
///
/// # Errors
///
/// Returns [`Error::InvalidDate`] for an unparseable hire date and
/// [`Error::InvalidField`] for malformed age, seniority, workload or
/// vacation cells.
pub fn parse_row(record: &StringRecord, columns: &ColumnIndex, row: usize) -> Result<Employee> {
    let text = |column: usize| columns.cell(record, column).to_string();
    let count = |column: usize| {
        let value = columns.cell(record, column);
        parse_count(value).ok_or_else(|| Error::invalid_field(row, COLUMNS[column], value))
    };

    let seniority_cell = columns.cell(record, 5);
    let seniority = seniority_cell
        .parse::<SeniorityLevel>()
        .map_err(|_| Error::invalid_field(row, SENIORITY, seniority_cell))?;

    let workload_cell = columns.cell(record, 6);
    let workload = Workload::parse(workload_cell)
        .map_err(|_| Error::invalid_field(row, WORKLOAD, workload_cell))?;

    let date_cell = columns.cell(record, 9);
    let hire_date = parse_hire_date(date_cell).ok_or_else(|| Error::InvalidDate {
        row,
        value: date_cell.to_string(),
    })?;

    Ok(Employee {
        first_name: text(0),
        last_name: text(1),
        canton: text(2),
        age: count(3)?,
        department: text(4),
        seniority,
        workload,
        vacation_days_total: count(7)?,
        vacation_days_taken: count(8)?,
        hire_date,
    })
}

/// Render an [`Employee`] as a row matching `headers`.
///
/// Columns hrdesk does not know are left empty.
#[must_use]
pub fn to_row(employee: &Employee, headers: &StringRecord) -> StringRecord {
    headers
        .iter()
        .map(|header| match header.trim() {
            FIRST_NAME => employee.first_name.clone(),
            LAST_NAME => employee.last_name.clone(),
            CANTON => employee.canton.clone(),
            AGE => employee.age.to_string(),
            DEPARTMENT => employee.department.clone(),
            SENIORITY => employee.seniority.to_string(),
            WORKLOAD => employee.workload.to_string(),
            VACATION_TOTAL => employee.vacation_days_total.to_string(),
            VACATION_TAKEN => employee.vacation_days_taken.to_string(),
            HIRE_DATE => format_hire_date(employee.hire_date),
            _ => String::new(),
        })
        .collect()
}

/// The header row of a freshly created dataset.
#[must_use]
pub fn default_headers() -> StringRecord {
    StringRecord::from(COLUMNS.to_vec())
}

/// Parse a hire date in any of the accepted formats.
#[must_use]
pub fn parse_hire_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(value, format).ok())
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
                .map(|timestamp| timestamp.date())
        })
}

/// Format a hire date as ISO `YYYY-MM-DD`.
#[must_use]
pub fn format_hire_date(date: NaiveDate) -> String {
    date.format(ISO_DATE).to_string()
}

/// Parse a non-negative whole number, tolerating a `.0` float rendering.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn parse_count(value: &str) -> Option<u32> {
    value.parse::<u32>().ok().or_else(|| {
        value
            .parse::<f64>()
            .ok()
            .filter(|v| {
                v.is_finite() && *v >= 0.0 && v.fract() == 0.0 && *v <= f64::from(u32::MAX)
            })
            .map(|v| v as u32)
    })
}
