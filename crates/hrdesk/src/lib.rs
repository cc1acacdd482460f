//! `hrdesk` - An internal HR dataset viewer and employee entry tool
//!
//! This library provides the employee record model, the vacation and
//! seniority rules, and a CSV-backed record store with safe appends.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod cli;
pub mod config;
pub mod employee;
pub mod error;
pub mod form;
pub mod logging;
pub mod report;
pub mod seniority;
pub mod store;
pub mod workload;

pub use config::Config;
pub use employee::Employee;
pub use error::{Error, Result};
pub use form::{EmployeeForm, FormRules};
pub use logging::init_logging;
pub use seniority::{SeniorityLevel, SenioritySelection};
pub use store::RecordStore;
pub use workload::{vacation_entitlement, Workload};
