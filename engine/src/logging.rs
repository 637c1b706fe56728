// Tracing bootstrap for the host process (dashboard, scripts, tests).
// The engine itself only emits events; it never installs a subscriber on its own.
use tracing::Level;

use crate::config::settings::EngineSettings;
use crate::error::EngineError;

/// Installs a fmt subscriber at `level`. Returns `false` when a global
/// subscriber was already set, so calling this twice is harmless.
pub fn init(level: Level) -> bool {
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .try_init()
        .is_ok()
}

pub fn init_from_settings(settings: &EngineSettings) -> Result<bool, EngineError> {
    let level = settings.max_log_level()?;
    Ok(init(level))
}
