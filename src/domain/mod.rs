//! Domain aggregates exposed by the planning service layer.

pub mod agenda;
pub mod client;
pub mod employee;
pub mod plan;
pub mod report;
pub mod types;
pub mod week;
