//! Command implementations.

mod info;
mod run;
mod validate;

pub use info::run_info;
pub use run::run_screen;
pub use validate::run_validate;

use std::path::Path;

use contracts::DeviceProfile;
use tracing::info;

use crate::error::{CliError, Result};

/// Load a device profile, falling back to the built-in reference phone
pub(crate) fn load_profile(path: Option<&Path>) -> Result<DeviceProfile> {
    let Some(path) = path else {
        info!("No profile given, using built-in reference phone");
        return Ok(DeviceProfile::reference_phone());
    };

    if !path.exists() {
        return Err(CliError::profile_not_found(path.display().to_string()));
    }

    info!(profile = %path.display(), "Loading device profile");
    config_loader::ConfigLoader::load_from_path(path)
        .map_err(|e| CliError::profile_load(path.display().to_string(), e))
}
