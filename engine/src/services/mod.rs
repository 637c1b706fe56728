// Service layer consumed by the dashboard
pub mod audit_service;

pub use audit_service::{AuditService, Datasets};
