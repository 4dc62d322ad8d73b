//! DTOs shaped for the plan list and plan detail screens.

use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;

use crate::domain::agenda::{AgendaSlot, OperatingDay};
use crate::domain::client::Client;
use crate::domain::employee::Employee;
use crate::domain::plan::{Plan, PlanStatus};
use crate::domain::report::ActualsReport;
use crate::progress::ProgressSnapshot;

/// Row of the plan list.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PlanSummary {
    pub plan_id: i32,
    pub employee_id: i32,
    pub week_start: NaiveDate,
    pub week_end: NaiveDate,
    pub iso_week: u32,
    pub status: PlanStatus,
    pub scheduled_activities: usize,
}

impl From<&Plan> for PlanSummary {
    fn from(plan: &Plan) -> Self {
        Self {
            plan_id: plan.id.get(),
            employee_id: plan.employee_id.get(),
            week_start: plan.week.week_start,
            week_end: plan.week.week_end,
            iso_week: plan.week.iso_week,
            status: plan.status,
            scheduled_activities: plan.agenda.len(),
        }
    }
}

/// Slot with its concrete date-time.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct DatedSlot {
    pub scheduled_at: NaiveDateTime,
    pub slot: AgendaSlot,
}

/// Agenda of one operating day.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct DayAgenda {
    pub day: OperatingDay,
    pub date: NaiveDate,
    pub slots: Vec<DatedSlot>,
}

/// Groups a plan's agenda by operating day, every day present even when empty.
pub fn agenda_by_day(plan: &Plan) -> Vec<DayAgenda> {
    let dated = plan.dated_agenda();
    OperatingDay::ALL
        .into_iter()
        .map(|day| DayAgenda {
            day,
            date: day.date_in(plan.week.week_start),
            slots: dated
                .iter()
                .filter(|(_, slot)| slot.day == day)
                .map(|(scheduled_at, slot)| DatedSlot {
                    scheduled_at: *scheduled_at,
                    slot: (*slot).clone(),
                })
                .collect(),
        })
        .collect()
}

/// Aggregated data required to render the plan detail page.
#[derive(Debug)]
pub struct PlanDetailData {
    pub plan: Plan,
    pub agenda: Vec<DayAgenda>,
    /// Goals against what the agenda schedules.
    pub planned: ProgressSnapshot,
    /// Goals against what the KPI service reported, once a report exists.
    pub reported: Option<ProgressSnapshot>,
    pub report: Option<ActualsReport>,
}

/// Entry of the agenda client picker.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ClientOption {
    pub id: i32,
    pub label: String,
}

impl From<&Client> for ClientOption {
    fn from(client: &Client) -> Self {
        let label = match &client.tax_id {
            Some(tax_id) => format!("{} ({tax_id})", client.name.as_str()),
            None => client.name.as_str().to_string(),
        };
        Self {
            id: client.id.get(),
            label,
        }
    }
}

/// Entry of the advisor picker shown to administrators.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct EmployeeOption {
    pub id: i32,
    pub name: String,
    pub position: Option<String>,
}

impl From<&Employee> for EmployeeOption {
    fn from(employee: &Employee) -> Self {
        Self {
            id: employee.id.get(),
            name: employee.name.as_str().to_string(),
            position: employee.position.clone(),
        }
    }
}
