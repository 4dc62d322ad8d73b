//! In-process implementation of the collaborator traits.
//!
//! Backs the service tests and local experiments; it applies the same
//! uniqueness rule as the backend (one plan per employee and week).

use std::cell::{Cell, RefCell};

use crate::domain::client::Client;
use crate::domain::employee::Employee;
use crate::domain::plan::{NewPlan, Plan, PlanStatus};
use crate::domain::report::{ActualsReport, Incentive};
use crate::domain::types::{EmployeeId, PlanId};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{DirectoryReader, PlanListQuery, PlanReader, PlanWriter, ReportReader};

#[derive(Debug, Default)]
pub struct InMemoryRepository {
    employees: Vec<Employee>,
    clients: Vec<Client>,
    plans: RefCell<Vec<Plan>>,
    reports: Vec<ActualsReport>,
    incentives: Vec<Incentive>,
    next_id: Cell<i32>,
    create_failure: RefCell<Option<RepositoryError>>,
    create_calls: Cell<usize>,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_employee(mut self, employee: Employee) -> Self {
        self.employees.push(employee);
        self
    }

    pub fn with_client(mut self, client: Client) -> Self {
        self.clients.push(client);
        self
    }

    pub fn with_plan(self, plan: Plan) -> Self {
        if plan.id.get() > self.next_id.get() {
            self.next_id.set(plan.id.get());
        }
        self.plans.borrow_mut().push(plan);
        self
    }

    pub fn with_report(mut self, report: ActualsReport) -> Self {
        self.reports.push(report);
        self
    }

    pub fn with_incentive(mut self, incentive: Incentive) -> Self {
        self.incentives.push(incentive);
        self
    }

    /// Makes the next `create_plan` call fail with `err`.
    pub fn fail_next_create(&self, err: RepositoryError) {
        self.create_failure.replace(Some(err));
    }

    /// Number of `create_plan` calls received, failed ones included.
    pub fn create_calls(&self) -> usize {
        self.create_calls.get()
    }

    pub fn plans(&self) -> Vec<Plan> {
        self.plans.borrow().clone()
    }
}

impl PlanReader for InMemoryRepository {
    fn list_plans(&self, query: PlanListQuery) -> RepositoryResult<Vec<Plan>> {
        Ok(self
            .plans
            .borrow()
            .iter()
            .filter(|plan| query.matches(plan))
            .cloned()
            .collect())
    }

    fn get_plan_by_id(&self, id: PlanId) -> RepositoryResult<Option<Plan>> {
        Ok(self.plans.borrow().iter().find(|plan| plan.id == id).cloned())
    }
}

impl PlanWriter for InMemoryRepository {
    fn create_plan(&self, new_plan: &NewPlan) -> RepositoryResult<Plan> {
        self.create_calls.set(self.create_calls.get() + 1);
        if let Some(err) = self.create_failure.take() {
            return Err(err);
        }

        let mut plans = self.plans.borrow_mut();
        if plans.iter().any(|plan| {
            plan.employee_id == new_plan.employee_id()
                && plan.week.week_start == new_plan.week().week_start
        }) {
            return Err(RepositoryError::Conflict(format!(
                "employee {} already has a plan for {}",
                new_plan.employee_id(),
                new_plan.week().week_start
            )));
        }

        let id = self.next_id.get() + 1;
        self.next_id.set(id);
        let plan = Plan {
            id: PlanId::new(id).map_err(|err| RepositoryError::Unexpected(err.to_string()))?,
            employee_id: new_plan.employee_id(),
            week: *new_plan.week(),
            goals: *new_plan.goals(),
            status: PlanStatus::Pending,
            supervisor_notes: new_plan.supervisor_notes().cloned(),
            agenda: new_plan.agenda().to_vec(),
        };
        plans.push(plan.clone());
        Ok(plan)
    }

    fn delete_plan(&self, id: PlanId) -> RepositoryResult<()> {
        let mut plans = self.plans.borrow_mut();
        let before = plans.len();
        plans.retain(|plan| plan.id != id);
        if plans.len() == before {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}

impl DirectoryReader for InMemoryRepository {
    fn list_employees(&self) -> RepositoryResult<Vec<Employee>> {
        Ok(self.employees.clone())
    }

    fn list_clients(&self, employee_id: EmployeeId) -> RepositoryResult<Vec<Client>> {
        Ok(self
            .clients
            .iter()
            .filter(|client| client.employee_id.is_none_or(|owner| owner == employee_id))
            .cloned()
            .collect())
    }
}

impl ReportReader for InMemoryRepository {
    fn get_report_for_plan(&self, plan_id: PlanId) -> RepositoryResult<Option<ActualsReport>> {
        Ok(self
            .reports
            .iter()
            .find(|report| report.plan_id == plan_id)
            .cloned())
    }

    fn list_incentives(&self, employee_id: Option<EmployeeId>) -> RepositoryResult<Vec<Incentive>> {
        Ok(self
            .incentives
            .iter()
            .filter(|incentive| employee_id.is_none_or(|id| incentive.employee_id == id))
            .cloned()
            .collect())
    }
}
