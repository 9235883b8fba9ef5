pub mod config;
pub mod engine;
pub mod error;
pub mod geometry;
pub mod gesture;
pub mod group;
pub mod host;
pub mod input;
pub mod logging;
pub mod media;
pub mod scenario;
pub mod slide;
pub mod state;

#[cfg(test)]
mod test_support;

use std::path::Path;

pub use config::LightboxConfig;
pub use engine::{ClickTarget, Lightbox};
pub use error::{LightboxError, LightboxResult};
pub use scenario::{Replay, Scenario};

/// Replays the scenario at `scenario_path` against a headless host, using the
/// user config from the XDG config directory as the base options.
pub fn run(scenario_path: &Path) -> LightboxResult<Replay> {
    logging::init();

    let (xdg_config_home, home) = config::config_env_dirs();
    let base = match config::default_config_path(xdg_config_home.as_deref(), home.as_deref()) {
        Ok(path) => config::load_config_or_default(&path),
        Err(err) => {
            tracing::warn!(%err, "no config directory; using default options");
            LightboxConfig::default()
        }
    };

    let scenario = Scenario::load(scenario_path)?;
    tracing::info!(
        path = %scenario_path.display(),
        triggers = scenario.triggers.len(),
        steps = scenario.steps.len(),
        "replaying scenario"
    );
    let replay = scenario.replay(&base)?;
    tracing::info!(
        failed_steps = replay.steps.iter().filter(|step| step.error.is_some()).count(),
        "replay complete"
    );
    Ok(replay)
}
