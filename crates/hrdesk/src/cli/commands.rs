//! CLI command definitions.
//!
//! This module defines the structure of all CLI subcommands.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Subcommand, ValueEnum};

use crate::form::EmployeeForm;
use crate::report::EmployeeFilter;
use crate::seniority::SenioritySelection;

/// Filters shared by the viewing commands.
#[derive(Debug, Clone, Default, Args)]
pub struct FilterArgs {
    /// Only this department
    #[arg(long)]
    pub department: Option<String>,

    /// Only this canton of residence
    #[arg(long)]
    pub canton: Option<String>,

    /// Minimum age (inclusive)
    #[arg(long)]
    pub min_age: Option<u32>,

    /// Maximum age (inclusive)
    #[arg(long)]
    pub max_age: Option<u32>,
}

impl From<FilterArgs> for EmployeeFilter {
    fn from(args: FilterArgs) -> Self {
        Self {
            department: args.department,
            canton: args.canton,
            min_age: args.min_age,
            max_age: args.max_age,
        }
    }
}

/// List command arguments.
#[derive(Debug, Args)]
pub struct ListCommand {
    /// Row filters
    #[command(flatten)]
    pub filter: FilterArgs,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,
}

/// Summary command arguments.
#[derive(Debug, Args)]
pub struct SummaryCommand {
    /// Row filters
    #[command(flatten)]
    pub filter: FilterArgs,

    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

/// Options command arguments.
#[derive(Debug, Args)]
pub struct OptionsCommand {
    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

/// Add command arguments.
#[derive(Debug, Args)]
pub struct AddCommand {
    /// First name
    #[arg(long)]
    pub first_name: String,

    /// Last name
    #[arg(long)]
    pub last_name: String,

    /// Canton of residence
    #[arg(long)]
    pub canton: String,

    /// Department
    #[arg(long)]
    pub department: String,

    /// Age in years
    #[arg(long)]
    pub age: u32,

    /// Workload, e.g. "80%", "80" or "0.8"
    #[arg(short, long, default_value = "100%")]
    pub workload: String,

    /// Seniority level, or "auto" to suggest one
    #[arg(short, long, default_value = "auto")]
    pub seniority: SenioritySelection,

    /// Hire date (YYYY-MM-DD); defaults to today
    #[arg(long)]
    pub hire_date: Option<NaiveDate>,

    /// Vacation days already taken
    #[arg(long, default_value_t = 0)]
    pub vacation_taken: u32,

    /// Print the stored record as JSON
    #[arg(short, long)]
    pub json: bool,
}

impl From<AddCommand> for EmployeeForm {
    fn from(cmd: AddCommand) -> Self {
        Self {
            first_name: cmd.first_name,
            last_name: cmd.last_name,
            canton: cmd.canton,
            department: cmd.department,
            age: cmd.age,
            workload: cmd.workload,
            seniority: cmd.seniority,
            hire_date: cmd.hire_date,
            vacation_days_taken: cmd.vacation_taken,
        }
    }
}

/// Vacation command arguments.
#[derive(Debug, Args)]
pub struct VacationCommand {
    /// Workload, e.g. "80%", "80" or "0.8"
    pub workload: String,
}

/// Seniority command arguments.
#[derive(Debug, Args)]
pub struct SeniorityCommand {
    /// Age in years
    #[arg(long)]
    pub age: u32,

    /// Hire date (YYYY-MM-DD); tenure counts as zero when omitted
    #[arg(long)]
    pub hire_date: Option<NaiveDate>,
}

/// Init command arguments.
#[derive(Debug, Args)]
pub struct InitCommand {}

/// Configuration commands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Show the configuration file path
    Path,

    /// Validate configuration
    Validate {
        /// Path to configuration file to validate
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
}

/// Output format for record listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// One line per record
    Plain,
    /// Aligned columns
    #[default]
    Table,
    /// JSON array
    Json,
    /// CSV with the dataset's column names
    Csv,
}
