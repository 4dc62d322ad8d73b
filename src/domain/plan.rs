//! Weekly work plan: goals plus an agenda of activity slots.
//!
//! [`NewPlan`] is the editable draft. Its mutators are copy-on-write: each
//! returns a new draft and leaves the receiver untouched, so a rejected edit
//! never alters the agenda being edited. [`Plan`] is the persisted record as
//! returned by the backend; its agenda is read-only.

use std::fmt::Display;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::agenda::{ActivityType, AgendaSlot, SlotInput, SlotPatch, ValidationError};
use crate::domain::types::{EmployeeId, PlanId, SupervisorNote};
use crate::domain::week::WeekRange;

/// Weekly activity targets.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Goals {
    pub visits: u32,
    pub assisted_visits: u32,
    pub calls: u32,
    pub emails: u32,
}

impl Goals {
    #[must_use]
    pub fn new(visits: u32, assisted_visits: u32, calls: u32, emails: u32) -> Self {
        Self {
            visits,
            assisted_visits,
            calls,
            emails,
        }
    }

    /// Target for a single activity type.
    pub fn target(&self, activity: ActivityType) -> u32 {
        match activity {
            ActivityType::Visit => self.visits,
            ActivityType::AssistedVisit => self.assisted_visits,
            ActivityType::Call => self.calls,
            ActivityType::Email => self.emails,
        }
    }
}

/// Number of activities per type, either planned in an agenda or reported.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ActivityCounts {
    pub visits: u32,
    pub assisted_visits: u32,
    pub calls: u32,
    pub emails: u32,
}

impl ActivityCounts {
    pub fn count(&self, activity: ActivityType) -> u32 {
        match activity {
            ActivityType::Visit => self.visits,
            ActivityType::AssistedVisit => self.assisted_visits,
            ActivityType::Call => self.calls,
            ActivityType::Email => self.emails,
        }
    }

    /// Tallies the slots of an agenda by activity type.
    pub fn from_agenda<'a>(slots: impl IntoIterator<Item = &'a AgendaSlot>) -> Self {
        let mut counts = Self::default();
        for slot in slots {
            let counter = match slot.activity_type {
                ActivityType::Visit => &mut counts.visits,
                ActivityType::AssistedVisit => &mut counts.assisted_visits,
                ActivityType::Call => &mut counts.calls,
                ActivityType::Email => &mut counts.emails,
            };
            *counter = counter.saturating_add(1);
        }
        counts
    }
}

/// Lifecycle state of a persisted plan. Owned by the backend; read here for
/// display and sorting only.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlanStatus {
    #[default]
    #[serde(alias = "Borrador")]
    Draft,
    #[serde(alias = "Pendiente")]
    Pending,
    #[serde(alias = "Aprobado")]
    Approved,
    #[serde(alias = "Cerrado", alias = "Completado")]
    Completed,
}

impl Display for PlanStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PlanStatus::Draft => write!(f, "Draft"),
            PlanStatus::Pending => write!(f, "Pending"),
            PlanStatus::Approved => write!(f, "Approved"),
            PlanStatus::Completed => write!(f, "Completed"),
        }
    }
}

/// Agenda slots in presentation order: day index, then time.
///
/// The sort is stable, so identical slots keep their insertion order.
pub fn ordered_agenda(slots: &[AgendaSlot]) -> Vec<&AgendaSlot> {
    let mut ordered: Vec<&AgendaSlot> = slots.iter().collect();
    ordered.sort_by(|a, b| a.sort_key().cmp(&b.sort_key()));
    ordered
}

/// Agenda slots paired with their concrete date-time, in presentation order.
pub fn dated_agenda<'a>(
    week: &WeekRange,
    slots: &'a [AgendaSlot],
) -> Vec<(NaiveDateTime, &'a AgendaSlot)> {
    ordered_agenda(slots)
        .into_iter()
        .map(|slot| (slot.scheduled_at(week.week_start), slot))
        .collect()
}

/// Draft plan under construction in the plan wizard.
///
/// Serializes as the single document sent to the backend on creation: owner,
/// week bounds, the four goals and the full agenda.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewPlan {
    employee_id: EmployeeId,
    #[serde(flatten)]
    week: WeekRange,
    goals: Goals,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    supervisor_notes: Option<SupervisorNote>,
    #[serde(default)]
    agenda: Vec<AgendaSlot>,
}

impl NewPlan {
    /// Builds a draft validating every raw slot.
    pub fn new(
        employee_id: EmployeeId,
        week: WeekRange,
        goals: Goals,
        slots: &[SlotInput],
    ) -> Result<Self, ValidationError> {
        let agenda = slots
            .iter()
            .map(AgendaSlot::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::from_slots(employee_id, week, goals, agenda))
    }

    /// Builds a draft from already validated slots.
    #[must_use]
    pub fn from_slots(
        employee_id: EmployeeId,
        week: WeekRange,
        goals: Goals,
        agenda: Vec<AgendaSlot>,
    ) -> Self {
        Self {
            employee_id,
            week,
            goals,
            supervisor_notes: None,
            agenda,
        }
    }

    pub fn employee_id(&self) -> EmployeeId {
        self.employee_id
    }

    pub fn week(&self) -> &WeekRange {
        &self.week
    }

    pub fn goals(&self) -> &Goals {
        &self.goals
    }

    pub fn supervisor_notes(&self) -> Option<&SupervisorNote> {
        self.supervisor_notes.as_ref()
    }

    /// Slots in insertion order.
    pub fn agenda(&self) -> &[AgendaSlot] {
        &self.agenda
    }

    /// Returns a copy with `input` appended.
    pub fn add_slot(&self, input: &SlotInput) -> Result<Self, ValidationError> {
        let slot = AgendaSlot::try_from(input)?;
        let mut next = self.clone();
        next.agenda.push(slot);
        Ok(next)
    }

    /// Returns a copy with the slot at `index` patched.
    pub fn update_slot(&self, index: usize, patch: &SlotPatch) -> Result<Self, ValidationError> {
        let current = self
            .agenda
            .get(index)
            .ok_or(ValidationError::SlotOutOfRange(index))?;
        let updated = patch.apply(current)?;
        let mut next = self.clone();
        next.agenda[index] = updated;
        Ok(next)
    }

    /// Returns a copy without the slot at `index`.
    pub fn remove_slot(&self, index: usize) -> Result<Self, ValidationError> {
        if index >= self.agenda.len() {
            return Err(ValidationError::SlotOutOfRange(index));
        }
        let mut next = self.clone();
        next.agenda.remove(index);
        Ok(next)
    }

    #[must_use]
    pub fn with_goals(&self, goals: Goals) -> Self {
        Self {
            goals,
            ..self.clone()
        }
    }

    #[must_use]
    pub fn with_notes(&self, supervisor_notes: Option<SupervisorNote>) -> Self {
        Self {
            supervisor_notes,
            ..self.clone()
        }
    }

    pub fn ordered_agenda(&self) -> Vec<&AgendaSlot> {
        ordered_agenda(&self.agenda)
    }

    pub fn dated_agenda(&self) -> Vec<(NaiveDateTime, &AgendaSlot)> {
        dated_agenda(&self.week, &self.agenda)
    }

    pub fn planned_counts(&self) -> ActivityCounts {
        ActivityCounts::from_agenda(&self.agenda)
    }
}

/// Plan as persisted by the backend.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Plan {
    pub id: PlanId,
    pub employee_id: EmployeeId,
    #[serde(flatten)]
    pub week: WeekRange,
    pub goals: Goals,
    #[serde(default)]
    pub status: PlanStatus,
    #[serde(default)]
    pub supervisor_notes: Option<SupervisorNote>,
    #[serde(default)]
    pub agenda: Vec<AgendaSlot>,
}

impl Plan {
    pub fn ordered_agenda(&self) -> Vec<&AgendaSlot> {
        ordered_agenda(&self.agenda)
    }

    pub fn dated_agenda(&self) -> Vec<(NaiveDateTime, &AgendaSlot)> {
        dated_agenda(&self.week, &self.agenda)
    }

    pub fn planned_counts(&self) -> ActivityCounts {
        ActivityCounts::from_agenda(&self.agenda)
    }

    /// Draft copy of this plan. Editing a submitted plan means deleting it and
    /// creating this draft again.
    pub fn to_draft(&self) -> NewPlan {
        NewPlan {
            employee_id: self.employee_id,
            week: self.week,
            goals: self.goals,
            supervisor_notes: self.supervisor_notes.clone(),
            agenda: self.agenda.clone(),
        }
    }
}

/// Sorts plans most recent week first; plans of the same week are ordered by
/// employee.
pub fn sort_for_display(plans: &mut [Plan]) {
    plans.sort_by(|a, b| {
        b.week
            .week_start
            .cmp(&a.week.week_start)
            .then(a.employee_id.cmp(&b.employee_id))
    });
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::domain::agenda::OperatingDay;

    fn draft() -> NewPlan {
        let week = WeekRange::starting(NaiveDate::from_ymd_opt(2024, 3, 11).unwrap()).unwrap();
        NewPlan::new(
            EmployeeId::new(7).unwrap(),
            week,
            Goals::new(25, 5, 30, 100),
            &[
                SlotInput::new("Wed", "15:00", "Call", "3"),
                SlotInput::new("Mon", "11:30", "Visit", "1"),
                SlotInput::new("Mon", "09:00", "Email", "2"),
            ],
        )
        .unwrap()
    }

    #[test]
    fn construction_rejects_incomplete_slots() {
        let week = WeekRange::containing(NaiveDate::from_ymd_opt(2024, 3, 11).unwrap());
        let result = NewPlan::new(
            EmployeeId::new(7).unwrap(),
            week,
            Goals::default(),
            &[SlotInput::new("Mon", "09:00", "Visit", "")],
        );
        assert_eq!(result, Err(ValidationError::MissingClient));
    }

    #[test]
    fn add_slot_is_copy_on_write() {
        let plan = draft();
        let grown = plan
            .add_slot(&SlotInput::new("Sat", "10:00", "Visita asistida", "9"))
            .unwrap();
        assert_eq!(plan.agenda().len(), 3);
        assert_eq!(grown.agenda().len(), 4);
        assert_eq!(grown.agenda()[3].day, OperatingDay::Sat);
    }

    #[test]
    fn rejected_add_leaves_agenda_unchanged() {
        let plan = draft();
        let result = plan.add_slot(&SlotInput::new("Mon", "09:00", "Visit", ""));
        assert_eq!(result, Err(ValidationError::MissingClient));
        assert_eq!(plan.agenda().len(), 3);
    }

    #[test]
    fn duplicate_slots_are_allowed() {
        let input = SlotInput::new("Tue", "09:00", "Call", "4");
        let plan = draft().add_slot(&input).unwrap().add_slot(&input).unwrap();
        assert_eq!(plan.agenda().len(), 5);
        assert_eq!(plan.agenda()[3], plan.agenda()[4]);
    }

    #[test]
    fn update_and_remove_check_indexes() {
        let plan = draft();
        assert_eq!(
            plan.update_slot(3, &SlotPatch::default()),
            Err(ValidationError::SlotOutOfRange(3))
        );
        assert_eq!(plan.remove_slot(7), Err(ValidationError::SlotOutOfRange(7)));

        let patch = SlotPatch {
            day: Some("Fri".to_string()),
            ..SlotPatch::default()
        };
        let updated = plan.update_slot(0, &patch).unwrap();
        assert_eq!(updated.agenda()[0].day, OperatingDay::Fri);
        assert_eq!(plan.agenda()[0].day, OperatingDay::Wed);

        let removed = plan.remove_slot(1).unwrap();
        assert_eq!(removed.agenda().len(), 2);
        assert_eq!(removed.agenda()[1].activity_type, ActivityType::Email);
    }

    #[test]
    fn rejected_update_keeps_original_slot() {
        let plan = draft();
        let patch = SlotPatch {
            day: Some("Sun".to_string()),
            ..SlotPatch::default()
        };
        assert!(matches!(
            plan.update_slot(0, &patch),
            Err(ValidationError::InvalidDay(_))
        ));
        assert_eq!(plan.agenda()[0].day, OperatingDay::Wed);
    }

    #[test]
    fn ordered_agenda_sorts_by_day_then_time() {
        let plan = draft();
        let order: Vec<String> = plan
            .ordered_agenda()
            .iter()
            .map(|slot| format!("{} {}", slot.day, slot.time))
            .collect();
        assert_eq!(order, vec!["Mon 09:00", "Mon 11:30", "Wed 15:00"]);
    }

    #[test]
    fn dated_agenda_places_slots_in_week() {
        let plan = draft();
        let dated = plan.dated_agenda();
        assert_eq!(dated[0].0.to_string(), "2024-03-11 09:00:00");
        assert_eq!(dated[2].0.to_string(), "2024-03-13 15:00:00");
    }

    #[test]
    fn planned_counts_tally_agenda() {
        let counts = draft().planned_counts();
        assert_eq!(
            counts,
            ActivityCounts {
                visits: 1,
                assisted_visits: 0,
                calls: 1,
                emails: 1,
            }
        );
    }

    #[test]
    fn document_contains_goals_and_agenda() {
        let value = serde_json::to_value(draft()).unwrap();
        assert_eq!(value["week_start"], "2024-03-11");
        assert_eq!(value["week_end"], "2024-03-16");
        assert_eq!(value["goals"]["calls"], 30);
        assert_eq!(value["agenda"].as_array().map(Vec::len), Some(3));
        assert_eq!(value["agenda"][0]["time"], "15:00");
    }

    #[test]
    fn status_accepts_backend_spanish_names() {
        let status: PlanStatus = serde_json::from_str("\"Borrador\"").unwrap();
        assert_eq!(status, PlanStatus::Draft);
        let status: PlanStatus = serde_json::from_str("\"Cerrado\"").unwrap();
        assert_eq!(status, PlanStatus::Completed);
    }

    #[test]
    fn plans_sort_most_recent_week_first() {
        let base = draft();
        let make = |id: i32, start: (i32, u32, u32)| Plan {
            id: PlanId::new(id).unwrap(),
            employee_id: base.employee_id(),
            week: WeekRange::containing(NaiveDate::from_ymd_opt(start.0, start.1, start.2).unwrap()),
            goals: *base.goals(),
            status: PlanStatus::Approved,
            supervisor_notes: None,
            agenda: Vec::new(),
        };
        let mut plans = vec![
            make(1, (2024, 2, 26)),
            make(2, (2024, 3, 11)),
            make(3, (2024, 3, 4)),
        ];
        sort_for_display(&mut plans);
        let ids: Vec<i32> = plans.iter().map(|plan| plan.id.get()).collect();
        assert_eq!(ids, vec![2, 3, 1]);
    }
}
