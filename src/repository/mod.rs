//! Interfaces of the external collaborators the planning core talks to.
//!
//! The backend owns persistence, so this crate only defines the traits; the
//! host application supplies an implementation (HTTP client, test double, ...).

use chrono::NaiveDate;

use crate::{
    domain::{
        client::Client,
        employee::Employee,
        plan::{NewPlan, Plan},
        report::{ActualsReport, Incentive},
        types::{EmployeeId, PlanId},
    },
    repository::errors::RepositoryResult,
};

pub mod errors;
pub mod memory;
#[cfg(feature = "test-mocks")]
pub mod mock;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlanListQuery {
    pub employee_id: Option<EmployeeId>,
    /// Only plans whose week starts on or after this date.
    pub since: Option<NaiveDate>,
}

impl PlanListQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn employee(mut self, employee_id: EmployeeId) -> Self {
        self.employee_id = Some(employee_id);
        self
    }

    pub fn since(mut self, date: NaiveDate) -> Self {
        self.since = Some(date);
        self
    }

    /// Whether `plan` satisfies the filter. Implementations may use it to
    /// filter client side when the backend ignores a parameter.
    pub fn matches(&self, plan: &Plan) -> bool {
        self.employee_id.is_none_or(|id| plan.employee_id == id)
            && self.since.is_none_or(|date| plan.week.week_start >= date)
    }
}

pub trait PlanReader {
    fn list_plans(&self, query: PlanListQuery) -> RepositoryResult<Vec<Plan>>;
    fn get_plan_by_id(&self, id: PlanId) -> RepositoryResult<Option<Plan>>;
}

pub trait PlanWriter {
    /// Persists a plan. Fails with [`errors::RepositoryError::Conflict`] when the
    /// employee already has a plan for that week.
    fn create_plan(&self, new_plan: &NewPlan) -> RepositoryResult<Plan>;
    fn delete_plan(&self, id: PlanId) -> RepositoryResult<()>;
}

pub trait DirectoryReader {
    fn list_employees(&self) -> RepositoryResult<Vec<Employee>>;
    fn list_clients(&self, employee_id: EmployeeId) -> RepositoryResult<Vec<Client>>;
}

pub trait ReportReader {
    fn get_report_for_plan(&self, plan_id: PlanId) -> RepositoryResult<Option<ActualsReport>>;
    fn list_incentives(
        &self,
        employee_id: Option<EmployeeId>,
    ) -> RepositoryResult<Vec<Incentive>>;
}
