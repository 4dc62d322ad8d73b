//! Week selection for the plan wizard and week history of an employee.

use std::collections::HashSet;

use chrono::NaiveDate;

use crate::availability::available_weeks;
use crate::domain::employee::{CurrentUser, Role};
use crate::domain::types::EmployeeId;
use crate::domain::agenda::ValidationError;
use crate::domain::week::{WeekBoundsError, WeekRange, try_week_of, week_of};
use crate::dto::weeks::{AvailableWeeksData, PlannedWeek, WeekOption};
use crate::models::config::PlanningConfig;
use crate::repository::{PlanListQuery, PlanReader};
use crate::services::{ServiceResult, ensure_can_act_for};

fn out_of_range() -> ValidationError {
    ValidationError::Week(WeekBoundsError::OutOfRange)
}

/// Week starts of every persisted plan of `employee_id`.
pub(crate) fn planned_week_starts<R>(
    repo: &R,
    employee_id: EmployeeId,
) -> ServiceResult<HashSet<NaiveDate>>
where
    R: PlanReader + ?Sized,
{
    let plans = repo
        .list_plans(PlanListQuery::new().employee(employee_id))
        .map_err(|err| {
            log::error!("Failed to list plans of employee {employee_id}: {err}");
            err
        })?;
    Ok(plans.iter().map(|plan| plan.week.week_start).collect())
}

/// Weeks `user` may plan for `employee_id` on `today`.
///
/// The role of `user` selects the rules: an administrator planning for an
/// advisor gets the administrator window.
pub fn load_available_weeks<R>(
    repo: &R,
    user: &CurrentUser,
    employee_id: EmployeeId,
    today: NaiveDate,
    config: &PlanningConfig,
) -> ServiceResult<AvailableWeeksData>
where
    R: PlanReader + ?Sized,
{
    ensure_can_act_for(user, employee_id)?;
    let current = WeekRange::try_containing(today).ok_or_else(out_of_range)?;

    // Administrators see planned weeks too, no need to fetch them.
    let planned = match user.role {
        Role::Advisor => planned_week_starts(repo, employee_id)?,
        Role::Administrator => HashSet::new(),
    };

    let weeks = available_weeks(today, user.role, &planned, config);
    if weeks.is_empty() {
        log::info!("Every open week of employee {employee_id} is already planned");
    }

    let options: Vec<WeekOption> = weeks
        .iter()
        .map(|week| WeekOption::new(week, &current))
        .collect();
    // The wizard preselects the coming week when it is open.
    let upcoming = WeekRange::upcoming(today).map(|week| week.week_start);
    let suggested = options
        .iter()
        .find(|option| Some(option.week_start) == upcoming)
        .or(options.first())
        .map(|option| option.week_start);

    Ok(AvailableWeeksData {
        all_planned: options.is_empty(),
        options,
        suggested,
    })
}

/// Calendar weeks of the persisted plans of `employee_id`, most recent first.
pub fn load_week_history<R>(
    repo: &R,
    user: &CurrentUser,
    employee_id: EmployeeId,
    today: NaiveDate,
) -> ServiceResult<Vec<PlannedWeek>>
where
    R: PlanReader + ?Sized,
{
    ensure_can_act_for(user, employee_id)?;

    let current = try_week_of(today).ok_or_else(out_of_range)?;
    let mut plans = repo
        .list_plans(PlanListQuery::new().employee(employee_id))
        .map_err(|err| {
            log::error!("Failed to list plans of employee {employee_id}: {err}");
            err
        })?;
    plans.sort_by(|a, b| b.week.week_start.cmp(&a.week.week_start));

    Ok(plans
        .iter()
        .map(|plan| {
            let week = week_of(plan.week.week_start);
            PlannedWeek {
                plan_id: plan.id.get(),
                is_current: week.monday == current.monday,
                week,
            }
        })
        .collect())
}
