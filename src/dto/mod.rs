//! DTO modules that bridge services with the planning screens.

pub mod kpi;
pub mod plans;
pub mod weeks;
