//! Weekly field-sales planning: week availability, agenda drafts and
//! actual-vs-target progress.
//!
//! The pure core (`domain`, `availability`, `progress`) performs no I/O.
//! `services` orchestrates it against the collaborator traits declared in
//! `repository`.

pub mod availability;
pub mod domain;
pub mod dto;
pub mod error_conversions;
pub mod forms;
pub mod models;
pub mod progress;
pub mod repository;
pub mod services;
