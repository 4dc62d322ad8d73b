//! DTOs shaped for the week selector of the plan wizard.

use chrono::NaiveDate;
use serde::Serialize;

use crate::domain::week::{WeekInfo, WeekRange};

/// One selectable week.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct WeekOption {
    pub week_start: NaiveDate,
    pub week_end: NaiveDate,
    pub iso_week: u32,
    pub label: String,
    /// The week containing "today".
    pub is_current: bool,
}

impl WeekOption {
    pub fn new(week: &WeekRange, current: &WeekRange) -> Self {
        Self {
            week_start: week.week_start,
            week_end: week.week_end,
            iso_week: week.iso_week,
            label: format!(
                "Week {} ({} to {})",
                week.iso_week,
                week.week_start.format("%d/%m"),
                week.week_end.format("%d/%m")
            ),
            is_current: week.week_start == current.week_start,
        }
    }
}

/// Weeks a new plan may target for one employee.
#[derive(Debug, Clone, Serialize)]
pub struct AvailableWeeksData {
    pub options: Vec<WeekOption>,
    /// Every open week already has a plan. Rendered as an empty state, not as
    /// an error.
    pub all_planned: bool,
    /// Week preselected in the wizard, when one is open.
    pub suggested: Option<NaiveDate>,
}

/// Calendar week of a persisted plan, as listed by the week picker.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct PlannedWeek {
    pub plan_id: i32,
    pub week: WeekInfo,
    pub is_current: bool,
}
