//! Command-line interface for hrdesk.
//!
//! This module provides the CLI structure for the `hrdesk` binary.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use commands::{
    AddCommand, ConfigCommand, FilterArgs, InitCommand, ListCommand, OptionsCommand,
    OutputFormat, SeniorityCommand, SummaryCommand, VacationCommand,
};

/// hrdesk - Browse the HR dataset and register new employees
///
/// Reads the employee CSV, prints filtered views and summaries, and appends
/// validated new records with derived vacation and seniority values.
#[derive(Debug, Parser)]
#[command(name = "hrdesk")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to custom configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Dataset to use instead of the configured one
    #[arg(short, long, global = true, value_name = "CSV")]
    pub data: Option<PathBuf>,

    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// The command to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// List employee records
    List(ListCommand),

    /// Show headline figures and a per-department breakdown
    Summary(SummaryCommand),

    /// Show the departments, cantons and ages present in the dataset
    Options(OptionsCommand),

    /// Register a new employee
    Add(AddCommand),

    /// Compute the vacation entitlement for a workload
    Vacation(VacationCommand),

    /// Suggest a seniority level from age and hire date
    Seniority(SeniorityCommand),

    /// Create an empty dataset with the standard header
    Init(InitCommand),

    /// View or validate configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

impl Cli {
    /// Get the verbosity level based on flags.
    #[must_use]
    pub fn verbosity(&self) -> crate::logging::Verbosity {
        if self.quiet {
            crate::logging::Verbosity::Quiet
        } else {
            match self.verbose {
                0 => crate::logging::Verbosity::Normal,
                1 => crate::logging::Verbosity::Verbose,
                _ => crate::logging::Verbosity::Trace,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    use crate::seniority::{SeniorityLevel, SenioritySelection};

    fn cli_with(verbose: u8, quiet: bool) -> Cli {
        Cli {
            config: None,
            data: None,
            verbose,
            quiet,
            command: Command::Init(InitCommand {}),
        }
    }

    #[test]
    fn test_cli_name() {
        let cli = Cli::command();
        assert_eq!(cli.get_name(), "hrdesk");
    }

    #[test]
    fn test_verbosity_levels() {
        use crate::logging::Verbosity;

        assert_eq!(cli_with(0, true).verbosity(), Verbosity::Quiet);
        assert_eq!(cli_with(3, true).verbosity(), Verbosity::Quiet);
        assert_eq!(cli_with(0, false).verbosity(), Verbosity::Normal);
        assert_eq!(cli_with(1, false).verbosity(), Verbosity::Verbose);
        assert_eq!(cli_with(2, false).verbosity(), Verbosity::Trace);
    }

    #[test]
    fn test_cli_verify() {
        // Verify the CLI structure is valid
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_list_with_filters() {
        let args = vec![
            "hrdesk",
            "list",
            "--department",
            "IT",
            "--min-age",
            "30",
            "--format",
            "json",
        ];
        let cli = Cli::try_parse_from(args).unwrap();
        let Command::List(list) = cli.command else {
            panic!("expected list command");
        };
        assert_eq!(list.filter.department.as_deref(), Some("IT"));
        assert_eq!(list.filter.min_age, Some(30));
        assert_eq!(list.format, OutputFormat::Json);
    }

    #[test]
    fn test_parse_list_default_format() {
        let cli = Cli::try_parse_from(["hrdesk", "list"]).unwrap();
        let Command::List(list) = cli.command else {
            panic!("expected list command");
        };
        assert_eq!(list.format, OutputFormat::Table);
    }

    #[test]
    fn test_parse_add_defaults() {
        let args = vec![
            "hrdesk",
            "add",
            "--first-name",
            "Lea",
            "--last-name",
            "Brunner",
            "--canton",
            "ZH",
            "--department",
            "IT",
            "--age",
            "30",
        ];
        let cli = Cli::try_parse_from(args).unwrap();
        let Command::Add(add) = cli.command else {
            panic!("expected add command");
        };
        assert_eq!(add.workload, "100%");
        assert_eq!(add.seniority, SenioritySelection::Auto);
        assert_eq!(add.vacation_taken, 0);
        assert!(add.hire_date.is_none());
    }

    #[test]
    fn test_parse_add_with_seniority_and_date() {
        let args = vec![
            "hrdesk",
            "add",
            "--first-name",
            "Lea",
            "--last-name",
            "Brunner",
            "--canton",
            "ZH",
            "--department",
            "IT",
            "--age",
            "30",
            "--seniority",
            "senior",
            "--hire-date",
            "2019-04-01",
        ];
        let cli = Cli::try_parse_from(args).unwrap();
        let Command::Add(add) = cli.command else {
            panic!("expected add command");
        };
        assert_eq!(
            add.seniority,
            SenioritySelection::Fixed(SeniorityLevel::Senior)
        );
        assert_eq!(add.hire_date.map(|d| d.to_string()).as_deref(), Some("2019-04-01"));
    }

    #[test]
    fn test_parse_add_rejects_unknown_seniority() {
        let args = vec![
            "hrdesk",
            "add",
            "--first-name",
            "Lea",
            "--last-name",
            "Brunner",
            "--canton",
            "ZH",
            "--department",
            "IT",
            "--age",
            "30",
            "--seniority",
            "intern",
        ];
        assert!(Cli::try_parse_from(args).is_err());
    }

    #[test]
    fn test_parse_vacation() {
        let cli = Cli::try_parse_from(["hrdesk", "vacation", "80%"]).unwrap();
        let Command::Vacation(vacation) = cli.command else {
            panic!("expected vacation command");
        };
        assert_eq!(vacation.workload, "80%");
    }

    #[test]
    fn test_parse_config_validate() {
        let args = vec!["hrdesk", "config", "validate", "--file", "/tmp/hr.toml"];
        let cli = Cli::try_parse_from(args).unwrap();
        assert!(matches!(
            cli.command,
            Command::Config(ConfigCommand::Validate { file: Some(_) })
        ));
    }

    #[test]
    fn test_parse_global_flags_after_subcommand() {
        let args = vec!["hrdesk", "summary", "-d", "/srv/hr.csv", "-c", "/custom/config.toml", "-v"];
        let cli = Cli::try_parse_from(args).unwrap();
        assert_eq!(cli.data, Some(PathBuf::from("/srv/hr.csv")));
        assert_eq!(cli.config, Some(PathBuf::from("/custom/config.toml")));
        assert_eq!(cli.verbose, 1);
    }

    #[test]
    fn test_parse_with_quiet() {
        let cli = Cli::try_parse_from(["hrdesk", "-q", "options"]).unwrap();
        assert!(cli.quiet);
    }
}
