//! Actual-vs-target aggregation for the plan detail and KPI views.
//!
//! Point awards and bonus rules belong to the KPI service; this module only
//! combines the figures it reports.

use std::collections::{BTreeMap, HashMap, HashSet};

use serde::Serialize;

use crate::domain::agenda::ActivityType;
use crate::domain::employee::Employee;
use crate::domain::plan::{ActivityCounts, Goals, Plan};
use crate::domain::report::{ActualsReport, Incentive};
use crate::domain::types::{EmployeeId, PlanId};

/// Progress of one activity type.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Attainment {
    pub target: u32,
    pub actual: u32,
    /// Share of the target reached, one decimal, within `[0, 100]`.
    pub percent: f64,
}

impl Attainment {
    pub fn new(target: u32, actual: u32) -> Self {
        Self {
            target,
            actual,
            percent: percent_of(actual, target),
        }
    }
}

/// Per activity type progress, keyed in [`ActivityType`] order.
pub type ProgressSnapshot = BTreeMap<ActivityType, Attainment>;

/// `actual / target` as a percentage rounded to one decimal and capped at 100.
/// A zero target yields 0.
pub fn percent_of(actual: u32, target: u32) -> f64 {
    if target == 0 {
        return 0.0;
    }
    let raw = f64::from(actual) / f64::from(target) * 100.0;
    ((raw * 10.0).round() / 10.0).min(100.0)
}

/// Compares goals with actual counts for each activity type.
pub fn attainment(goals: &Goals, actuals: &ActivityCounts) -> ProgressSnapshot {
    ActivityType::ALL
        .into_iter()
        .map(|activity| {
            (
                activity,
                Attainment::new(goals.target(activity), actuals.count(activity)),
            )
        })
        .collect()
}

/// Progress the agenda itself would deliver if carried out as planned.
pub fn planned_attainment(plan: &Plan) -> ProgressSnapshot {
    attainment(&plan.goals, &plan.planned_counts())
}

/// Progress reported by the KPI service for a plan.
pub fn reported_attainment(plan: &Plan, report: &ActualsReport) -> ProgressSnapshot {
    attainment(&plan.goals, &report.actuals)
}

/// Arithmetic mean of the per-report attainment figures. No reports gives 0.
pub fn overall_percent(reports: &[ActualsReport]) -> f64 {
    if reports.is_empty() {
        return 0.0;
    }
    let sum: f64 = reports.iter().map(ActualsReport::points_percent).sum();
    sum / reports.len() as f64
}

/// Sum of points reported for the given plans.
pub fn total_points(reports: &[ActualsReport], plan_ids: &HashSet<PlanId>) -> u64 {
    reports
        .iter()
        .filter(|report| plan_ids.contains(&report.plan_id))
        .map(|report| u64::from(report.points_achieved))
        .sum()
}

/// Sum of bonuses originating from the given plans.
pub fn total_incentives(incentives: &[Incentive], plan_ids: &HashSet<PlanId>) -> i64 {
    incentives
        .iter()
        .filter(|incentive| plan_ids.contains(&incentive.plan_id))
        .map(|incentive| incentive.amount_cents)
        .sum()
}

/// One row of the KPI ranking.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RankingEntry {
    pub employee_id: EmployeeId,
    pub name: String,
    pub total_points: u64,
    pub overall_percent: f64,
    pub reported_weeks: usize,
}

/// Ranks employees by the points of their plans, then by overall attainment.
pub fn rank_employees(
    employees: &[Employee],
    plans: &[Plan],
    reports: &[ActualsReport],
) -> Vec<RankingEntry> {
    let mut plans_by_employee: HashMap<EmployeeId, HashSet<PlanId>> = HashMap::new();
    for plan in plans {
        plans_by_employee
            .entry(plan.employee_id)
            .or_default()
            .insert(plan.id);
    }

    let mut ranking: Vec<RankingEntry> = employees
        .iter()
        .map(|employee| {
            let plan_ids = plans_by_employee
                .get(&employee.id)
                .cloned()
                .unwrap_or_default();
            let own_reports: Vec<ActualsReport> = reports
                .iter()
                .filter(|report| plan_ids.contains(&report.plan_id))
                .cloned()
                .collect();
            RankingEntry {
                employee_id: employee.id,
                name: employee.name.as_str().to_string(),
                total_points: total_points(&own_reports, &plan_ids),
                overall_percent: overall_percent(&own_reports),
                reported_weeks: own_reports.len(),
            }
        })
        .collect();

    ranking.sort_by(|a, b| {
        b.total_points
            .cmp(&a.total_points)
            .then(b.overall_percent.total_cmp(&a.overall_percent))
            .then(a.employee_id.cmp(&b.employee_id))
    });
    ranking
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::domain::agenda::SlotInput;
    use crate::domain::employee::Role;
    use crate::domain::plan::{NewPlan, PlanStatus};
    use crate::domain::types::EmployeeName;
    use crate::domain::week::WeekRange;

    fn plan(id: i32, employee: i32) -> Plan {
        let week = WeekRange::containing(NaiveDate::from_ymd_opt(2024, 3, 11).unwrap());
        let draft = NewPlan::new(
            EmployeeId::new(employee).unwrap(),
            week,
            Goals::new(4, 0, 2, 10),
            &[
                SlotInput::new("Mon", "09:00", "Visit", "1"),
                SlotInput::new("Tue", "09:00", "Visit", "2"),
                SlotInput::new("Tue", "10:00", "Call", "2"),
                SlotInput::new("Wed", "10:00", "Call", "3"),
                SlotInput::new("Wed", "11:00", "Call", "3"),
            ],
        )
        .unwrap();
        Plan {
            id: PlanId::new(id).unwrap(),
            employee_id: draft.employee_id(),
            week: *draft.week(),
            goals: *draft.goals(),
            status: PlanStatus::Approved,
            supervisor_notes: None,
            agenda: draft.agenda().to_vec(),
        }
    }

    fn report(plan_id: i32, points: u32, target: u32) -> ActualsReport {
        ActualsReport {
            points_achieved: points,
            ..ActualsReport::empty(PlanId::new(plan_id).unwrap(), target)
        }
    }

    fn employee(id: i32, name: &str) -> Employee {
        Employee {
            id: EmployeeId::new(id).unwrap(),
            name: EmployeeName::new(name).unwrap(),
            role: Role::Advisor,
            position: None,
        }
    }

    #[test]
    fn over_target_is_clamped() {
        let goals = Goals::new(0, 0, 30, 0);
        let actuals = ActivityCounts {
            calls: 45,
            ..ActivityCounts::default()
        };
        let snapshot = attainment(&goals, &actuals);
        assert_eq!(snapshot[&ActivityType::Call].percent, 100.0);
        assert_eq!(snapshot[&ActivityType::Call].actual, 45);
    }

    #[test]
    fn zero_target_yields_zero() {
        assert_eq!(percent_of(12, 0), 0.0);
        assert_eq!(percent_of(0, 0), 0.0);
    }

    #[test]
    fn percent_is_rounded_to_one_decimal() {
        assert_eq!(percent_of(1, 3), 33.3);
        assert_eq!(percent_of(2, 3), 66.7);
        assert_eq!(percent_of(0, 7), 0.0);
    }

    #[test]
    fn percent_stays_within_bounds() {
        for target in 0..40 {
            for actual in 0..80 {
                let percent = percent_of(actual, target);
                assert!((0.0..=100.0).contains(&percent), "{actual}/{target}");
            }
        }
    }

    #[test]
    fn planned_attainment_uses_agenda_counts() {
        let snapshot = planned_attainment(&plan(1, 1));
        assert_eq!(snapshot[&ActivityType::Visit].percent, 50.0);
        assert_eq!(snapshot[&ActivityType::Call].percent, 100.0);
        assert_eq!(snapshot[&ActivityType::AssistedVisit].percent, 0.0);
        assert_eq!(snapshot[&ActivityType::Email].actual, 0);
        assert_eq!(snapshot.len(), 4);
    }

    #[test]
    fn overall_percent_is_plain_mean() {
        let reports = vec![report(1, 50, 100), report(2, 100, 100), report(3, 0, 0)];
        assert!((overall_percent(&reports) - 50.0).abs() < 1e-9);
        assert_eq!(overall_percent(&[]), 0.0);
    }

    #[test]
    fn totals_only_count_selected_plans() {
        let reports = vec![report(1, 10, 100), report(2, 20, 100), report(3, 40, 100)];
        let selected: HashSet<PlanId> = [PlanId::new(1).unwrap(), PlanId::new(3).unwrap()].into();
        assert_eq!(total_points(&reports, &selected), 50);

        let incentives = vec![
            Incentive {
                employee_id: EmployeeId::new(1).unwrap(),
                plan_id: PlanId::new(3).unwrap(),
                amount_cents: 5000,
                concept: String::new(),
                status: String::new(),
            },
            Incentive {
                employee_id: EmployeeId::new(1).unwrap(),
                plan_id: PlanId::new(2).unwrap(),
                amount_cents: 5000,
                concept: String::new(),
                status: String::new(),
            },
        ];
        assert_eq!(total_incentives(&incentives, &selected), 5000);
    }

    #[test]
    fn ranking_orders_by_points_then_percent() {
        let employees = vec![employee(1, "Ana"), employee(2, "Luis"), employee(3, "Rosa")];
        let plans = vec![plan(10, 1), plan(11, 1), plan(20, 2), plan(30, 3)];
        let reports = vec![
            report(10, 60, 100),
            report(11, 40, 100),
            report(20, 100, 200),
            report(30, 100, 100),
        ];

        let ranking = rank_employees(&employees, &plans, &reports);

        let order: Vec<i32> = ranking.iter().map(|row| row.employee_id.get()).collect();
        assert_eq!(order, vec![3, 1, 2]);
        assert_eq!(ranking[1].total_points, 100);
        assert_eq!(ranking[1].reported_weeks, 2);
        assert!((ranking[1].overall_percent - 50.0).abs() < 1e-9);
    }
}
