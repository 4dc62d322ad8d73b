//! Plan wizard session, plan submission and plan browsing.

use chrono::NaiveDate;
use thiserror::Error;

use crate::availability::available_weeks;
use crate::domain::agenda::{SlotInput, SlotPatch, ValidationError};
use crate::domain::employee::{CurrentUser, Role};
use crate::domain::plan::{Goals, NewPlan, Plan, PlanStatus, sort_for_display};
use crate::domain::types::{EmployeeId, PlanId, SupervisorNote};
use crate::domain::week::WeekRange;
use crate::dto::plans::{
    ClientOption, EmployeeOption, PlanDetailData, PlanSummary, agenda_by_day,
};
use crate::forms::plan::PlanForm;
use crate::models::config::PlanningConfig;
use crate::progress::{planned_attainment, reported_attainment};
use crate::repository::{DirectoryReader, PlanListQuery, PlanReader, PlanWriter, ReportReader};
use crate::services::weeks::planned_week_starts;
use crate::services::{ServiceError, ServiceResult, ensure_admin, ensure_can_act_for};

/// Maximum number of entries returned by the client picker.
pub const CLIENT_OPTIONS_LIMIT: usize = 50;

/// One in-progress plan edit session.
///
/// Every edit swaps the draft for a new validated value, so a rejected edit
/// leaves the draft untouched. [`PlanWizard::submit`] consumes the session:
/// a second submit cannot be fired while one is outstanding.
#[derive(Debug, Clone)]
pub struct PlanWizard {
    user: CurrentUser,
    draft: NewPlan,
}

/// Failed submission. Hands the untouched session back for a retry.
#[derive(Debug, Error)]
#[error("{error}")]
pub struct SubmitFailure {
    pub wizard: PlanWizard,
    pub error: ServiceError,
}

impl PlanWizard {
    /// Opens a session for `employee_id` on `week`, prefilled with the
    /// configured goals and an empty agenda.
    pub fn start(
        user: CurrentUser,
        employee_id: EmployeeId,
        week: WeekRange,
        config: &PlanningConfig,
    ) -> ServiceResult<Self> {
        ensure_can_act_for(&user, employee_id)?;
        Ok(Self {
            user,
            draft: NewPlan::from_slots(employee_id, week, config.default_goals, Vec::new()),
        })
    }

    /// Reopens a persisted plan for the delete-and-recreate edit flow.
    pub fn edit(user: CurrentUser, plan: &Plan) -> ServiceResult<Self> {
        ensure_can_act_for(&user, plan.employee_id)?;
        Ok(Self {
            user,
            draft: plan.to_draft(),
        })
    }

    pub fn draft(&self) -> &NewPlan {
        &self.draft
    }

    pub fn user(&self) -> &CurrentUser {
        &self.user
    }

    pub fn add_slot(&mut self, input: &SlotInput) -> Result<(), ValidationError> {
        self.draft = self.draft.add_slot(input)?;
        Ok(())
    }

    pub fn update_slot(&mut self, index: usize, patch: &SlotPatch) -> Result<(), ValidationError> {
        self.draft = self.draft.update_slot(index, patch)?;
        Ok(())
    }

    pub fn remove_slot(&mut self, index: usize) -> Result<(), ValidationError> {
        self.draft = self.draft.remove_slot(index)?;
        Ok(())
    }

    pub fn set_goals(&mut self, goals: Goals) {
        self.draft = self.draft.with_goals(goals);
    }

    /// Blank notes clear the field.
    pub fn set_notes(&mut self, notes: &str) {
        self.draft = self.draft.with_notes(SupervisorNote::new(notes).ok());
    }

    /// Sends the draft to the persistence collaborator.
    pub fn submit<R>(
        self,
        repo: &R,
        today: NaiveDate,
        config: &PlanningConfig,
    ) -> Result<Plan, SubmitFailure>
    where
        R: PlanReader + PlanWriter + ?Sized,
    {
        match create_plan_checked(repo, &self.user, &self.draft, today, config) {
            Ok(plan) => Ok(plan),
            Err(error) => Err(SubmitFailure {
                wizard: self,
                error,
            }),
        }
    }
}

/// Validates ownership and week availability, then creates the plan.
fn create_plan_checked<R>(
    repo: &R,
    user: &CurrentUser,
    draft: &NewPlan,
    today: NaiveDate,
    config: &PlanningConfig,
) -> ServiceResult<Plan>
where
    R: PlanReader + PlanWriter + ?Sized,
{
    let employee_id = draft.employee_id();
    ensure_can_act_for(user, employee_id)?;

    let week_start = draft.week().week_start;
    let planned = planned_week_starts(repo, employee_id)?;
    if user.role == Role::Advisor && planned.contains(&week_start) {
        return Err(ServiceError::Conflict(format!(
            "employee {employee_id} already has a plan for {week_start}"
        )));
    }

    let open = available_weeks(today, user.role, &planned, config);
    if !open.iter().any(|week| week.week_start == week_start) {
        return Err(ServiceError::WeekNotAvailable(week_start));
    }

    let plan = repo.create_plan(draft).map_err(|err| {
        log::error!("Failed to create plan for employee {employee_id} on {week_start}: {err}");
        err
    })?;

    log::info!(
        "Created plan {} for employee {employee_id}, week {}",
        plan.id,
        plan.week.iso_week
    );
    Ok(plan)
}

/// Creates a plan from the wizard payload.
pub fn submit_plan_form<R>(
    repo: &R,
    user: &CurrentUser,
    form: PlanForm,
    today: NaiveDate,
    config: &PlanningConfig,
) -> ServiceResult<Plan>
where
    R: PlanReader + PlanWriter + ?Sized,
{
    let draft = NewPlan::try_from(form).map_err(|err| {
        log::error!("Failed to validate plan form: {err}");
        err
    })?;
    create_plan_checked(repo, user, &draft, today, config)
}

/// Plans visible to `user`, most recent week first. Advisors only ever see
/// their own plans, whatever `employee_id` asks for.
pub fn list_plans<R>(
    repo: &R,
    user: &CurrentUser,
    employee_id: Option<EmployeeId>,
    since: Option<NaiveDate>,
) -> ServiceResult<Vec<PlanSummary>>
where
    R: PlanReader + ?Sized,
{
    let employee_id = match user.role {
        Role::Advisor => Some(user.id),
        Role::Administrator => employee_id,
    };
    let query = PlanListQuery {
        employee_id,
        since,
    };

    let mut plans = repo.list_plans(query.clone()).map_err(|err| {
        log::error!("Failed to list plans: {err}");
        err
    })?;
    plans.retain(|plan| query.matches(plan));
    sort_for_display(&mut plans);

    Ok(plans.iter().map(PlanSummary::from).collect())
}

fn fetch_plan<R>(repo: &R, plan_id: PlanId) -> ServiceResult<Plan>
where
    R: PlanReader + ?Sized,
{
    repo.get_plan_by_id(plan_id)
        .map_err(|err| {
            log::error!("Failed to load plan {plan_id}: {err}");
            err
        })?
        .ok_or(ServiceError::NotFound)
}

/// Plan with its agenda grouped by day and its planned and reported progress.
pub fn load_plan_detail<R>(
    repo: &R,
    user: &CurrentUser,
    plan_id: PlanId,
) -> ServiceResult<PlanDetailData>
where
    R: PlanReader + ReportReader + ?Sized,
{
    let plan = fetch_plan(repo, plan_id)?;
    ensure_can_act_for(user, plan.employee_id)?;

    let report = repo.get_report_for_plan(plan_id).map_err(|err| {
        log::error!("Failed to load report of plan {plan_id}: {err}");
        err
    })?;

    Ok(PlanDetailData {
        agenda: agenda_by_day(&plan),
        planned: planned_attainment(&plan),
        reported: report
            .as_ref()
            .map(|report| reported_attainment(&plan, report)),
        report,
        plan,
    })
}

/// Removes a plan. Administrators only.
pub fn delete_plan<R>(repo: &R, user: &CurrentUser, plan_id: PlanId) -> ServiceResult<()>
where
    R: PlanWriter + ?Sized,
{
    ensure_admin(user)?;

    repo.delete_plan(plan_id).map_err(|err| {
        log::error!("Failed to delete plan {plan_id}: {err}");
        err
    })?;

    log::info!("Deleted plan {plan_id}");
    Ok(())
}

/// Replaces the agenda and goals of a persisted plan by deleting it and
/// creating `draft` in its place. The week and owner cannot change.
///
/// Advisors may only replace their own plans while they are not approved.
/// When the recreate fails the previous plan is restored if possible.
pub fn replace_plan<R>(
    repo: &R,
    user: &CurrentUser,
    plan_id: PlanId,
    draft: &NewPlan,
) -> ServiceResult<Plan>
where
    R: PlanReader + PlanWriter + ?Sized,
{
    let existing = fetch_plan(repo, plan_id)?;
    ensure_can_act_for(user, existing.employee_id)?;

    if !user.role.is_admin()
        && matches!(existing.status, PlanStatus::Approved | PlanStatus::Completed)
    {
        return Err(ServiceError::Unauthorized);
    }
    if draft.employee_id() != existing.employee_id
        || draft.week().week_start != existing.week.week_start
    {
        return Err(ServiceError::Form(
            "a plan edit cannot change its owner or week".to_string(),
        ));
    }

    repo.delete_plan(plan_id).map_err(|err| {
        log::error!("Failed to delete plan {plan_id} for replacement: {err}");
        err
    })?;

    match repo.create_plan(draft) {
        Ok(plan) => {
            log::info!("Replaced plan {plan_id} with plan {}", plan.id);
            Ok(plan)
        }
        Err(err) => {
            log::error!("Failed to recreate plan {plan_id}: {err}");
            if let Err(restore_err) = repo.create_plan(&existing.to_draft()) {
                log::error!("Failed to restore plan {plan_id}: {restore_err}");
            }
            Err(err.into())
        }
    }
}

/// Clients of `employee_id` matching `term`, sorted by name.
pub fn list_client_options<R>(
    repo: &R,
    user: &CurrentUser,
    employee_id: EmployeeId,
    term: &str,
) -> ServiceResult<Vec<ClientOption>>
where
    R: DirectoryReader + ?Sized,
{
    ensure_can_act_for(user, employee_id)?;

    let mut clients = repo.list_clients(employee_id).map_err(|err| {
        log::error!("Failed to list clients of employee {employee_id}: {err}");
        err
    })?;
    clients.retain(|client| client.matches(term));
    clients.sort_by(|a, b| a.name.as_str().cmp(b.name.as_str()));

    Ok(clients
        .iter()
        .take(CLIENT_OPTIONS_LIMIT)
        .map(ClientOption::from)
        .collect())
}

/// Advisors an administrator may plan for, sorted by name.
pub fn list_advisor_options<R>(repo: &R, user: &CurrentUser) -> ServiceResult<Vec<EmployeeOption>>
where
    R: DirectoryReader + ?Sized,
{
    ensure_admin(user)?;

    let mut employees = repo.list_employees().map_err(|err| {
        log::error!("Failed to list employees: {err}");
        err
    })?;
    employees.retain(|employee| employee.role == Role::Advisor);
    employees.sort_by(|a, b| a.name.as_str().cmp(b.name.as_str()));

    Ok(employees.iter().map(EmployeeOption::from).collect())
}
