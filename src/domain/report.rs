//! Externally reported results attached to a plan.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::plan::ActivityCounts;
use crate::domain::types::{EmployeeId, PlanId};

/// Weekly productivity report produced by the KPI service for one plan.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ActualsReport {
    pub plan_id: PlanId,
    /// Activities actually performed during the week.
    pub actuals: ActivityCounts,
    #[serde(default)]
    pub quotations: u32,
    #[serde(default)]
    pub points_achieved: u32,
    #[serde(default)]
    pub points_target: u32,
    /// Attainment figure computed by the KPI service, when it provides one.
    #[serde(default)]
    pub attainment_percent: Option<f64>,
    #[serde(default)]
    pub evaluated_on: Option<NaiveDate>,
}

impl ActualsReport {
    /// Empty report for a freshly created plan.
    #[must_use]
    pub fn empty(plan_id: PlanId, points_target: u32) -> Self {
        Self {
            plan_id,
            actuals: ActivityCounts::default(),
            quotations: 0,
            points_achieved: 0,
            points_target,
            attainment_percent: None,
            evaluated_on: None,
        }
    }

    /// Percentage of the weekly point objective reached. Uses the supplied
    /// figure when present, otherwise points over target; 0 without a target.
    pub fn points_percent(&self) -> f64 {
        if let Some(percent) = self.attainment_percent {
            return percent;
        }
        if self.points_target == 0 {
            return 0.0;
        }
        f64::from(self.points_achieved) / f64::from(self.points_target) * 100.0
    }
}

/// Bonus granted by the KPI service for a plan.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Incentive {
    pub employee_id: EmployeeId,
    /// Plan whose results earned the bonus.
    pub plan_id: PlanId,
    pub amount_cents: i64,
    #[serde(default)]
    pub concept: String,
    #[serde(default)]
    pub status: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn points_percent_prefers_supplied_figure() {
        let mut report = ActualsReport::empty(PlanId::new(1).unwrap(), 205);
        report.points_achieved = 41;
        assert!((report.points_percent() - 20.0).abs() < 1e-9);

        report.attainment_percent = Some(55.5);
        assert!((report.points_percent() - 55.5).abs() < 1e-9);
    }

    #[test]
    fn points_percent_is_zero_without_target() {
        let mut report = ActualsReport::empty(PlanId::new(1).unwrap(), 0);
        report.points_achieved = 10;
        assert_eq!(report.points_percent(), 0.0);
    }
}
