// Workspace facade: the presentation layer depends on this crate only.
pub use engine;
pub use shared;

pub use engine::config::settings::EngineSettings;
pub use engine::services::{AuditService, Datasets};
