//! KPI views: performance history of an employee and the advisor ranking.

use std::collections::HashSet;

use chrono::NaiveDate;

use crate::domain::employee::{CurrentUser, Role};
use crate::domain::plan::Plan;
use crate::domain::report::ActualsReport;
use crate::domain::types::{EmployeeId, PlanId};
use crate::dto::kpi::{PerformanceData, RankingPageData, WeekPerformance};
use crate::progress::{
    overall_percent, rank_employees, reported_attainment, total_incentives, total_points,
};
use crate::repository::{DirectoryReader, PlanListQuery, PlanReader, ReportReader};
use crate::services::{ServiceResult, ensure_can_act_for};

/// Pairs each plan with its report, skipping plans not evaluated yet.
fn reports_for<R>(repo: &R, plans: &[Plan]) -> ServiceResult<Vec<(usize, ActualsReport)>>
where
    R: ReportReader + ?Sized,
{
    let mut reports = Vec::new();
    for (index, plan) in plans.iter().enumerate() {
        let report = repo.get_report_for_plan(plan.id).map_err(|err| {
            log::error!("Failed to load report of plan {}: {err}", plan.id);
            err
        })?;
        if let Some(report) = report {
            reports.push((index, report));
        }
    }
    Ok(reports)
}

/// Reported weeks of `employee_id`, most recent first, with their totals.
pub fn load_employee_performance<R>(
    repo: &R,
    user: &CurrentUser,
    employee_id: EmployeeId,
    since: Option<NaiveDate>,
) -> ServiceResult<PerformanceData>
where
    R: PlanReader + ReportReader + ?Sized,
{
    ensure_can_act_for(user, employee_id)?;

    let query = PlanListQuery {
        employee_id: Some(employee_id),
        since,
    };
    let mut plans = repo.list_plans(query.clone()).map_err(|err| {
        log::error!("Failed to list plans of employee {employee_id}: {err}");
        err
    })?;
    plans.retain(|plan| query.matches(plan));
    plans.sort_by(|a, b| b.week.week_start.cmp(&a.week.week_start));

    let paired = reports_for(repo, &plans)?;
    let weeks = paired
        .iter()
        .map(|(index, report)| {
            let plan = &plans[*index];
            WeekPerformance {
                plan_id: plan.id.get(),
                week_start: plan.week.week_start,
                iso_week: plan.week.iso_week,
                progress: reported_attainment(plan, report),
                points: report.points_achieved,
                points_percent: report.points_percent(),
            }
        })
        .collect();

    let reports: Vec<ActualsReport> = paired.into_iter().map(|(_, report)| report).collect();
    let plan_ids: HashSet<PlanId> = plans.iter().map(|plan| plan.id).collect();

    let incentives = repo.list_incentives(Some(employee_id)).map_err(|err| {
        log::error!("Failed to list incentives of employee {employee_id}: {err}");
        err
    })?;

    Ok(PerformanceData {
        employee_id,
        weeks,
        overall_percent: overall_percent(&reports),
        total_points: total_points(&reports, &plan_ids),
        total_incentives_cents: total_incentives(&incentives, &plan_ids),
    })
}

/// Advisors ranked by the points of their plans since `since`.
pub fn load_ranking<R>(
    repo: &R,
    since: Option<NaiveDate>,
) -> ServiceResult<RankingPageData>
where
    R: DirectoryReader + PlanReader + ReportReader + ?Sized,
{
    let mut employees = repo.list_employees().map_err(|err| {
        log::error!("Failed to list employees: {err}");
        err
    })?;
    employees.retain(|employee| employee.role == Role::Advisor);

    let query = PlanListQuery {
        employee_id: None,
        since,
    };
    let mut plans = repo.list_plans(query.clone()).map_err(|err| {
        log::error!("Failed to list plans: {err}");
        err
    })?;
    plans.retain(|plan| query.matches(plan));

    let reports: Vec<ActualsReport> = reports_for(repo, &plans)?
        .into_iter()
        .map(|(_, report)| report)
        .collect();

    Ok(RankingPageData {
        ranking: rank_employees(&employees, &plans, &reports),
    })
}
