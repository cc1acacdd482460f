//! `hrdesk` - CLI for the HR dataset
//!
//! This binary lists and summarizes employee records and registers new
//! employees in the CSV dataset.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::Local;
use clap::Parser;
use tracing::debug;

use hrdesk::cli::{
    AddCommand, Cli, Command, ConfigCommand, ListCommand, OptionsCommand, OutputFormat,
    SeniorityCommand, SummaryCommand, VacationCommand,
};
use hrdesk::report::{department_breakdown, EmployeeFilter, FormOptions, Summary};
use hrdesk::seniority::{suggest_seniority, tenure_years};
use hrdesk::store::format;
use hrdesk::workload::vacation_entitlement_with_max;
use hrdesk::{init_logging, Config, Employee, EmployeeForm, FormRules, RecordStore, Workload};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    init_logging(cli.verbosity());

    let Cli {
        config: config_file,
        data,
        command,
        ..
    } = cli;

    match command {
        Command::List(cmd) => {
            let (_, mut store) = open_store(config_file, data)?;
            handle_list(&mut store, cmd)
        }
        Command::Summary(cmd) => {
            let (_, mut store) = open_store(config_file, data)?;
            handle_summary(&mut store, cmd)
        }
        Command::Options(cmd) => {
            let (_, mut store) = open_store(config_file, data)?;
            handle_options(&mut store, &cmd)
        }
        Command::Add(cmd) => {
            let (config, mut store) = open_store(config_file, data)?;
            handle_add(&config, &mut store, cmd)
        }
        Command::Vacation(cmd) => handle_vacation(&load_config(config_file)?, &cmd),
        Command::Seniority(cmd) => {
            handle_seniority(&cmd);
            Ok(())
        }
        Command::Init(_) => {
            let config = load_config(config_file)?;
            handle_init(data.unwrap_or_else(|| config.data_path()))
        }
        Command::Config(cmd) => handle_config(config_file, cmd),
    }
}

fn load_config(config_file: Option<PathBuf>) -> Result<Config> {
    Config::load_from(config_file).context("failed to load configuration")
}

fn open_store(
    config_file: Option<PathBuf>,
    data: Option<PathBuf>,
) -> Result<(Config, RecordStore)> {
    let config = load_config(config_file)?;
    let path = data.unwrap_or_else(|| config.data_path());
    debug!("Using dataset {}", path.display());
    let store = RecordStore::new(path).with_lock_timeout(config.lock_timeout());
    Ok((config, store))
}

/// Load the dataset, naming the file when its contents are malformed.
fn load_records(store: &mut RecordStore) -> Result<&[Employee]> {
    let path = store.path().to_path_buf();
    store.records().map_err(|err| {
        if err.is_format_error() {
            anyhow::Error::new(err).context(format!("{} is not a valid HR dataset", path.display()))
        } else {
            err.into()
        }
    })
}

fn handle_list(store: &mut RecordStore, cmd: ListCommand) -> Result<()> {
    let filter = EmployeeFilter::from(cmd.filter);
    let records = load_records(store)?;
    let view = filter.apply(records);

    match cmd.format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&view)?);
        }
        OutputFormat::Csv => {
            let headers = format::default_headers();
            let mut writer = csv::Writer::from_writer(io::stdout());
            writer.write_record(&headers)?;
            for employee in &view {
                writer.write_record(&format::to_row(employee, &headers))?;
            }
            writer.flush()?;
        }
        OutputFormat::Plain | OutputFormat::Table if view.is_empty() => {
            println!("No matching employees.");
        }
        OutputFormat::Plain => {
            let today = Local::now().date_naive();
            for employee in &view {
                println!(
                    "{} ({}), {}, {}, {}, {}, {} of {} vacation days left, hired {} ({:.1} years)",
                    employee.full_name(),
                    employee.canton,
                    employee.age,
                    employee.department,
                    employee.seniority,
                    employee.workload,
                    employee.vacation_days_remaining(),
                    employee.vacation_days_total,
                    format::format_hire_date(employee.hire_date),
                    employee.tenure_years(today),
                );
            }
        }
        OutputFormat::Table => {
            let rows: Vec<Vec<String>> = view.iter().map(|e| table_row(e)).collect();
            print_table(
                &[
                    "Name",
                    "Canton",
                    "Age",
                    "Department",
                    "Seniority",
                    "Workload",
                    "Vacation",
                    "Hire Date",
                ],
                &rows,
            );
        }
    }
    Ok(())
}

fn table_row(employee: &Employee) -> Vec<String> {
    vec![
        employee.full_name(),
        employee.canton.clone(),
        employee.age.to_string(),
        employee.department.clone(),
        employee.seniority.to_string(),
        employee.workload.to_string(),
        format!(
            "{}/{}",
            employee.vacation_days_taken, employee.vacation_days_total
        ),
        format::format_hire_date(employee.hire_date),
    ]
}

fn handle_summary(store: &mut RecordStore, cmd: SummaryCommand) -> Result<()> {
    let filter = EmployeeFilter::from(cmd.filter);
    let view = filter.apply(load_records(store)?);
    let summary = Summary::of(&view);
    let breakdown = department_breakdown(&view);

    if cmd.json {
        let output = serde_json::json!({
            "summary": summary,
            "departments": breakdown,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!("Employees:    {}", summary.employees);
    println!(
        "Average age:  {}",
        summary
            .average_age
            .map_or_else(|| "-".to_string(), |age| format!("{age:.1}"))
    );
    println!("Departments:  {}", summary.departments);

    if !breakdown.is_empty() {
        println!();
        let rows: Vec<Vec<String>> = breakdown
            .iter()
            .map(|d| {
                vec![
                    d.department.clone(),
                    d.employees.to_string(),
                    format!("{:.1}", d.average_age),
                    format!("{}-{}", d.min_age, d.max_age),
                    format!("{:.1}%", d.average_workload * 100.0),
                ]
            })
            .collect();
        print_table(
            &["Department", "Employees", "Avg Age", "Ages", "Avg Workload"],
            &rows,
        );
    }
    Ok(())
}

fn handle_options(store: &mut RecordStore, cmd: &OptionsCommand) -> Result<()> {
    let options = FormOptions::from_records(load_records(store)?);

    if cmd.json {
        println!("{}", serde_json::to_string_pretty(&options)?);
        return Ok(());
    }

    println!("Departments:  {}", options.departments.join(", "));
    println!("Cantons:      {}", options.cantons.join(", "));
    match options.age_range {
        Some((min, max)) => println!("Ages:         {min}-{max}"),
        None => println!("Ages:         -"),
    }
    Ok(())
}

fn handle_add(config: &Config, store: &mut RecordStore, cmd: AddCommand) -> Result<()> {
    let json = cmd.json;
    let form = EmployeeForm::from(cmd);
    let rules = FormRules::from_config(config);
    let today = Local::now().date_naive();

    let employee = form.submit(&rules, load_records(store)?, today)?;
    store
        .append(&employee)
        .with_context(|| format!("failed to save {}", employee.full_name()))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&employee)?);
    } else {
        println!("Added {}", employee.full_name());
        println!("  Seniority:    {}", employee.seniority);
        println!("  Workload:     {}", employee.workload);
        println!(
            "  Vacation:     {} of {} days taken",
            employee.vacation_days_taken, employee.vacation_days_total
        );
        println!(
            "  Hire date:    {}",
            format::format_hire_date(employee.hire_date)
        );
    }
    Ok(())
}

fn handle_vacation(config: &Config, cmd: &VacationCommand) -> Result<()> {
    let workload = Workload::parse(&cmd.workload)?;
    let days = vacation_entitlement_with_max(workload, config.rules.max_vacation_days);
    println!("{days} vacation days at {workload}");
    Ok(())
}

fn handle_seniority(cmd: &SeniorityCommand) {
    let today = Local::now().date_naive();
    let level = suggest_seniority(cmd.age, cmd.hire_date, today);
    let tenure = cmd.hire_date.map_or(0.0, |hired| tenure_years(hired, today));
    println!("{level}");
    println!("Tenure: {tenure:.1} years");
}

fn handle_init(path: PathBuf) -> Result<()> {
    let store = RecordStore::create(&path)?;
    println!("Created {}", store.path().display());
    Ok(())
}

fn handle_config(config_file: Option<PathBuf>, cmd: ConfigCommand) -> Result<()> {
    match cmd {
        ConfigCommand::Show { json } => {
            let config = load_config(config_file)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&config)?);
            } else {
                println!("Current Configuration");
                println!("=====================");
                println!();
                println!("[Storage]");
                println!("  Data path:          {}", config.data_path().display());
                println!("  Lock timeout (ms):  {}", config.storage.lock_timeout_ms);
                println!();
                println!("[Rules]");
                println!("  Max vacation days:  {}", config.rules.max_vacation_days);
                println!();
                println!("[Form]");
                println!(
                    "  Age range:          {}-{}",
                    config.form.min_age, config.form.max_age
                );
                println!(
                    "  Workload options:   {}",
                    config.form.workload_options.join(", ")
                );
                println!(
                    "  Known values only:  {}",
                    config.form.restrict_to_known_values
                );
            }
        }
        ConfigCommand::Path => {
            let path = config_file.unwrap_or_else(Config::default_config_path);
            println!("{}", path.display());
        }
        ConfigCommand::Validate { file } => {
            let path = file
                .or(config_file)
                .unwrap_or_else(Config::default_config_path);
            println!("Validating configuration: {}", path.display());
            Config::load_from(Some(path)).context("configuration is invalid")?;
            println!("Configuration is valid.");
        }
    }
    Ok(())
}

fn print_table(headers: &[&str], rows: &[Vec<String>]) {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let line = |cells: Vec<&str>| {
        let padded: Vec<String> = cells
            .iter()
            .zip(&widths)
            .map(|(cell, &width)| format!("{cell:<width$}"))
            .collect();
        println!("{}", padded.join("  ").trim_end());
    };

    let rule: Vec<String> = widths.iter().map(|&width| "-".repeat(width)).collect();
    line(headers.to_vec());
    line(rule.iter().map(String::as_str).collect());
    for row in rows {
        line(row.iter().map(String::as_str).collect());
    }
}
