//! Command line front end to the planning rules.
//!
//! Prints JSON so the output can be piped into other tools.

use std::path::{Path, PathBuf};
use std::process;

use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use dotenvy::dotenv;
use serde::Serialize;

use vantix_planner::availability::available_weeks;
use vantix_planner::domain::employee::Role;
use vantix_planner::domain::plan::{NewPlan, Plan};
use vantix_planner::domain::report::ActualsReport;
use vantix_planner::domain::week::{WeekRange, try_week_of};
use vantix_planner::dto::weeks::WeekOption;
use vantix_planner::forms::plan::PlanForm;
use vantix_planner::models::config::PlanningConfig;
use vantix_planner::progress::{planned_attainment, reported_attainment};

#[derive(Parser, Debug)]
#[command(name = "vantix-plan", version, about = "Weekly sales planning helper")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// ISO week and Monday-Sunday bounds of a date
    Week {
        /// Defaults to today
        #[arg(long)]
        date: Option<NaiveDate>,
    },

    /// Weeks a new plan may target
    Weeks {
        /// Defaults to today
        #[arg(long)]
        today: Option<NaiveDate>,

        /// advisor or administrator
        #[arg(long, default_value = "advisor")]
        role: Role,

        /// Week starts that already have a plan
        #[arg(long, value_delimiter = ',')]
        planned: Vec<NaiveDate>,
    },

    /// Validates a wizard payload and prints the plan document
    Validate {
        /// JSON file with the wizard payload
        #[arg(long)]
        form: PathBuf,
    },

    /// Planned and reported progress of a plan
    Progress {
        /// JSON file with the persisted plan
        #[arg(long)]
        plan: PathBuf,

        /// JSON file with the KPI report
        #[arg(long)]
        report: Option<PathBuf>,
    },
}

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("cannot read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("cannot parse {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("invalid plan: {0}")]
    Form(#[from] vantix_planner::forms::FormError),
    #[error("{0} is too close to the calendar limits")]
    OutOfRange(NaiveDate),
    #[error("cannot encode output: {0}")]
    Output(serde_json::Error),
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, CliError> {
    let raw = std::fs::read_to_string(path).map_err(|source| CliError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&raw).map_err(|source| CliError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

fn print<T: Serialize>(value: &T) -> Result<(), CliError> {
    let json = serde_json::to_string_pretty(value).map_err(CliError::Output)?;
    println!("{json}");
    Ok(())
}

fn run(command: Command, config: &PlanningConfig) -> Result<(), CliError> {
    let today = Local::now().date_naive();
    match command {
        Command::Week { date } => {
            let date = date.unwrap_or(today);
            print(&try_week_of(date).ok_or(CliError::OutOfRange(date))?)
        }
        Command::Weeks {
            today: day,
            role,
            planned,
        } => {
            let day = day.unwrap_or(today);
            let planned = planned.into_iter().collect();
            let current = WeekRange::try_containing(day).ok_or(CliError::OutOfRange(day))?;
            let weeks = available_weeks(day, role, &planned, config);
            if weeks.is_empty() {
                log::info!("Every open week is already planned");
            }
            let options: Vec<WeekOption> = weeks
                .iter()
                .map(|week| WeekOption::new(week, &current))
                .collect();
            print(&options)
        }
        Command::Validate { form } => {
            let form: PlanForm = read_json(&form)?;
            let draft = NewPlan::try_from(form)?;
            print(&draft)
        }
        Command::Progress { plan, report } => {
            let plan: Plan = read_json(&plan)?;
            let report: ActualsReport = match report {
                Some(path) => read_json(&path)?,
                None => ActualsReport::empty(plan.id, config.default_points_target),
            };
            print(&serde_json::json!({
                "plan_id": plan.id,
                "planned": planned_attainment(&plan),
                "reported": reported_attainment(&plan, &report),
                "points_percent": report.points_percent(),
            }))
        }
    }
}

fn main() {
    dotenv().ok(); // Load .env file
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let cli = Cli::parse();

    let config = match PlanningConfig::load() {
        Ok(config) => config,
        Err(err) => {
            log::error!("Error loading planning config: {err}");
            process::exit(1);
        }
    };

    if let Err(err) = run(cli.command, &config) {
        log::error!("{err}");
        process::exit(1);
    }
}
