//! Weeks a new plan may target.
//!
//! Each [`Role`] maps to a [`RuleSet`] describing a window of week offsets
//! around the current week, the order the weeks are offered in and whether
//! weeks that already have a plan are hidden. [`available_weeks`] evaluates a
//! rule set for a given day; it is pure and independent of any caller state.

use std::collections::HashSet;

use chrono::{Datelike, NaiveDate, Weekday};

use crate::domain::employee::Role;
use crate::domain::week::WeekRange;
use crate::models::config::PlanningConfig;

/// Order in which candidate weeks are returned.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WeekOrder {
    /// Oldest first.
    Chronological,
    /// Most recent first.
    ReverseChronological,
}

/// Planning window of one role.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RuleSet {
    /// Weeks before the current one that stay open.
    pub weeks_before: u32,
    /// Weeks after the current one that are always open.
    pub weeks_after: u32,
    /// Days on which `grace_weeks_after` extra future weeks open.
    pub grace_days: Vec<Weekday>,
    pub grace_weeks_after: u32,
    pub order: WeekOrder,
    /// Hide weeks that already have a plan.
    pub skip_planned: bool,
}

impl RuleSet {
    /// Rule table for the planning roles.
    pub fn for_role(role: Role, config: &PlanningConfig) -> Self {
        match role {
            Role::Administrator => Self {
                weeks_before: 0,
                weeks_after: config.admin_weeks_ahead,
                grace_days: Vec::new(),
                grace_weeks_after: 0,
                order: WeekOrder::Chronological,
                skip_planned: false,
            },
            Role::Advisor => Self {
                weeks_before: config.advisor_past_weeks,
                weeks_after: 0,
                grace_days: config.grace_days.clone(),
                grace_weeks_after: config.grace_weeks_ahead,
                order: WeekOrder::ReverseChronological,
                skip_planned: true,
            },
        }
    }

    /// Week offsets relative to the current week open on `today`, in the
    /// order the weeks are offered.
    fn offsets(&self, today: NaiveDate) -> Vec<i64> {
        let mut after = i64::from(self.weeks_after);
        if self.grace_days.contains(&today.weekday()) {
            after += i64::from(self.grace_weeks_after);
        }
        let range = -i64::from(self.weeks_before)..=after;
        match self.order {
            WeekOrder::Chronological => range.collect(),
            WeekOrder::ReverseChronological => range.rev().collect(),
        }
    }

    /// Applies the rule set on `today`. Weeks starting on a date contained in
    /// `planned_week_starts` are dropped when `skip_planned` is set.
    pub fn evaluate(
        &self,
        today: NaiveDate,
        planned_week_starts: &HashSet<NaiveDate>,
    ) -> Vec<WeekRange> {
        let Some(current) = WeekRange::try_containing(today) else {
            return Vec::new();
        };
        self.offsets(today)
            .into_iter()
            .filter_map(|offset| current.offset(offset))
            .filter(|week| !(self.skip_planned && planned_week_starts.contains(&week.week_start)))
            .collect()
    }
}

/// Weeks a user with `role` may create a plan for on `today`.
///
/// An empty result means every open week is already planned; it is a valid
/// outcome, not an error.
pub fn available_weeks(
    today: NaiveDate,
    role: Role,
    planned_week_starts: &HashSet<NaiveDate>,
    config: &PlanningConfig,
) -> Vec<WeekRange> {
    RuleSet::for_role(role, config).evaluate(today, planned_week_starts)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn starts(weeks: &[WeekRange]) -> Vec<NaiveDate> {
        weeks.iter().map(|week| week.week_start).collect()
    }

    #[test]
    fn advisor_on_weekday_gets_current_and_three_past_weeks() {
        let weeks = available_weeks(
            date(2024, 3, 13),
            Role::Advisor,
            &HashSet::new(),
            &PlanningConfig::default(),
        );
        assert_eq!(
            starts(&weeks),
            vec![
                date(2024, 3, 11),
                date(2024, 3, 4),
                date(2024, 2, 26),
                date(2024, 2, 19),
            ]
        );
    }

    #[test]
    fn advisor_on_weekend_also_gets_next_week_first() {
        for today in [date(2024, 3, 16), date(2024, 3, 17)] {
            let weeks = available_weeks(
                today,
                Role::Advisor,
                &HashSet::new(),
                &PlanningConfig::default(),
            );
            assert_eq!(weeks.len(), 5);
            assert_eq!(weeks[0].week_start, date(2024, 3, 18));
            assert_eq!(weeks[1].week_start, date(2024, 3, 11));
        }
    }

    #[test]
    fn advisor_never_sees_planned_weeks() {
        let planned: HashSet<NaiveDate> = [date(2024, 2, 26), date(2024, 3, 4)].into();
        let weeks = available_weeks(
            date(2024, 3, 16),
            Role::Advisor,
            &planned,
            &PlanningConfig::default(),
        );
        assert_eq!(
            starts(&weeks),
            vec![date(2024, 3, 18), date(2024, 3, 11), date(2024, 2, 19)]
        );
    }

    #[test]
    fn fully_planned_window_is_empty() {
        let planned: HashSet<NaiveDate> = [
            date(2024, 3, 11),
            date(2024, 3, 4),
            date(2024, 2, 26),
            date(2024, 2, 19),
        ]
        .into();
        let weeks = available_weeks(
            date(2024, 3, 12),
            Role::Advisor,
            &planned,
            &PlanningConfig::default(),
        );
        assert!(weeks.is_empty());
    }

    #[test]
    fn administrator_gets_six_weeks_ascending_ignoring_plans() {
        let planned: HashSet<NaiveDate> = [date(2024, 3, 11), date(2024, 3, 25)].into();
        let weeks = available_weeks(
            date(2024, 3, 17),
            Role::Administrator,
            &planned,
            &PlanningConfig::default(),
        );
        assert_eq!(
            starts(&weeks),
            vec![
                date(2024, 3, 11),
                date(2024, 3, 18),
                date(2024, 3, 25),
                date(2024, 4, 1),
                date(2024, 4, 8),
                date(2024, 4, 15),
            ]
        );
    }

    #[test]
    fn window_crosses_year_boundary() {
        let weeks = available_weeks(
            date(2021, 1, 2),
            Role::Advisor,
            &HashSet::new(),
            &PlanningConfig::default(),
        );
        assert_eq!(weeks[0].week_start, date(2021, 1, 4));
        assert_eq!(weeks[0].iso_week, 1);
        assert_eq!(weeks[1].week_start, date(2020, 12, 28));
        assert_eq!(weeks[1].iso_week, 53);
        assert_eq!(weeks[4].week_start, date(2020, 12, 7));
    }

    #[test]
    fn calendar_limit_yields_no_weeks() {
        let weeks = available_weeks(
            NaiveDate::MAX,
            Role::Administrator,
            &HashSet::new(),
            &PlanningConfig::default(),
        );
        assert!(weeks.is_empty());
    }

    #[test]
    fn configuration_reshapes_advisor_window() {
        let config = PlanningConfig {
            advisor_past_weeks: 1,
            grace_days: vec![Weekday::Fri],
            grace_weeks_ahead: 2,
            ..PlanningConfig::default()
        };
        let weeks = available_weeks(date(2024, 3, 15), Role::Advisor, &HashSet::new(), &config);
        assert_eq!(
            starts(&weeks),
            vec![
                date(2024, 3, 25),
                date(2024, 3, 18),
                date(2024, 3, 11),
                date(2024, 3, 4),
            ]
        );
    }
}
