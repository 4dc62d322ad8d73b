//! Mock repository implementations for isolating services in tests.

use mockall::mock;

use crate::domain::client::Client;
use crate::domain::employee::Employee;
use crate::domain::plan::{NewPlan, Plan};
use crate::domain::report::{ActualsReport, Incentive};
use crate::domain::types::{EmployeeId, PlanId};
use crate::repository::errors::RepositoryResult;
use crate::repository::{DirectoryReader, PlanListQuery, PlanReader, PlanWriter, ReportReader};

mock! {
    pub Repository {}

    impl PlanReader for Repository {
        fn list_plans(&self, query: PlanListQuery) -> RepositoryResult<Vec<Plan>>;
        fn get_plan_by_id(&self, id: PlanId) -> RepositoryResult<Option<Plan>>;
    }

    impl PlanWriter for Repository {
        fn create_plan(&self, new_plan: &NewPlan) -> RepositoryResult<Plan>;
        fn delete_plan(&self, id: PlanId) -> RepositoryResult<()>;
    }

    impl DirectoryReader for Repository {
        fn list_employees(&self) -> RepositoryResult<Vec<Employee>>;
        fn list_clients(&self, employee_id: EmployeeId) -> RepositoryResult<Vec<Client>>;
    }

    impl ReportReader for Repository {
        fn get_report_for_plan(&self, plan_id: PlanId) -> RepositoryResult<Option<ActualsReport>>;
        fn list_incentives(
            &self,
            employee_id: Option<EmployeeId>,
        ) -> RepositoryResult<Vec<Incentive>>;
    }
}
