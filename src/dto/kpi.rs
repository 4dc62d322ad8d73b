//! DTOs used by the KPI dashboard.

use chrono::NaiveDate;
use serde::Serialize;

use crate::domain::types::EmployeeId;
use crate::progress::{ProgressSnapshot, RankingEntry};

/// Results of one reported week.
#[derive(Debug, Clone, Serialize)]
pub struct WeekPerformance {
    pub plan_id: i32,
    pub week_start: NaiveDate,
    pub iso_week: u32,
    pub progress: ProgressSnapshot,
    pub points: u32,
    pub points_percent: f64,
}

/// Performance history of a single employee.
#[derive(Debug, Clone, Serialize)]
pub struct PerformanceData {
    pub employee_id: EmployeeId,
    pub weeks: Vec<WeekPerformance>,
    pub overall_percent: f64,
    pub total_points: u64,
    pub total_incentives_cents: i64,
}

/// Data required to render the ranking view.
#[derive(Debug, Clone, Serialize)]
pub struct RankingPageData {
    pub ranking: Vec<RankingEntry>,
}
