//! Payload submitted by the plan wizard.

use chrono::NaiveDate;
use serde::Deserialize;
use validator::Validate;

use crate::domain::agenda::SlotInput;
use crate::domain::plan::{Goals, NewPlan};
use crate::domain::types::{EmployeeId, SupervisorNote};
use crate::domain::week::WeekRange;
use crate::forms::FormError;

#[derive(Debug, Deserialize, Validate)]
/// Wizard payload: owner, chosen week, goals and agenda.
pub struct PlanForm {
    pub employee_id: i32,
    pub week_start: NaiveDate,
    pub week_end: NaiveDate,
    #[validate(range(min = 0, max = 4294967295i64))]
    pub visits_goal: i64,
    #[validate(range(min = 0, max = 4294967295i64))]
    pub assisted_visits_goal: i64,
    #[validate(range(min = 0, max = 4294967295i64))]
    pub calls_goal: i64,
    #[validate(range(min = 0, max = 4294967295i64))]
    pub emails_goal: i64,
    #[validate(length(max = 2000))]
    #[serde(default)]
    pub supervisor_notes: Option<String>,
    #[serde(default)]
    pub agenda: Vec<SlotInput>,
}

fn goal(value: i64) -> Result<u32, FormError> {
    u32::try_from(value).map_err(|_| FormError::GoalOutOfRange(value))
}

impl TryFrom<PlanForm> for NewPlan {
    type Error = FormError;

    fn try_from(form: PlanForm) -> Result<Self, Self::Error> {
        form.validate()?;

        let employee_id =
            EmployeeId::new(form.employee_id).map_err(|_| FormError::InvalidEmployeeId)?;
        let week = WeekRange::from_bounds(form.week_start, form.week_end)
            .map_err(crate::domain::agenda::ValidationError::from)?;
        let goals = Goals::new(
            goal(form.visits_goal)?,
            goal(form.assisted_visits_goal)?,
            goal(form.calls_goal)?,
            goal(form.emails_goal)?,
        );
        let notes = form
            .supervisor_notes
            .and_then(|notes| SupervisorNote::new(notes).ok());

        let draft = NewPlan::new(employee_id, week, goals, &form.agenda)?;
        Ok(draft.with_notes(notes))
    }
}
