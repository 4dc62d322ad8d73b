//! Configuration model loaded from external sources.

use chrono::Weekday;
use serde::{Deserialize, Serialize};

use crate::domain::plan::Goals;

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(default)]
/// Business constants of the planning rules.
///
/// Every field has a default matching the rules the sales team works with, so
/// an empty or missing configuration file is valid.
pub struct PlanningConfig {
    /// Past weeks an advisor may still plan, besides the current one.
    pub advisor_past_weeks: u32,
    /// Future weeks an administrator may plan, besides the current one.
    pub admin_weeks_ahead: u32,
    /// Days on which advisors may already plan ahead.
    pub grace_days: Vec<Weekday>,
    /// Future weeks opened to advisors on grace days.
    pub grace_weeks_ahead: u32,
    /// Goals prefilled in the plan wizard.
    pub default_goals: Goals,
    /// Weekly point objective assumed for a plan without a KPI report.
    pub default_points_target: u32,
}

impl Default for PlanningConfig {
    fn default() -> Self {
        Self {
            advisor_past_weeks: 3,
            admin_weeks_ahead: 5,
            grace_days: vec![Weekday::Sat, Weekday::Sun],
            grace_weeks_ahead: 1,
            default_goals: Goals::new(25, 5, 30, 100),
            default_points_target: 205,
        }
    }
}

#[cfg(feature = "cli")]
impl PlanningConfig {
    /// Loads `config/default.yaml`, the `config/{APP_ENV}` profile and `APP_`
    /// prefixed environment variables, in that order of precedence.
    pub fn load() -> Result<Self, config::ConfigError> {
        let app_env = std::env::var("APP_ENV").unwrap_or_else(|_| "local".into());
        Self::load_from(std::path::Path::new("config"), &app_env)
    }

    /// Same as [`PlanningConfig::load`] with an explicit directory and profile.
    pub fn load_from(dir: &std::path::Path, profile: &str) -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::from(dir.join("default")).required(false))
            .add_source(config::File::from(dir.join(profile)).required(false))
            .add_source(config::Environment::with_prefix("APP"))
            .build()?;

        settings.try_deserialize::<PlanningConfig>()
    }
}
