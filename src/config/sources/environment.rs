//! Environment variable source: STATICS_* prefix with __ separator

use config::builder::DefaultState;
use config::ConfigBuilder;
use config::ConfigError;
use config::Environment;

/// Add environment variable overlay to builder.
/// Uses STATICS__ prefix and __ as separator for nested keys,
/// e.g. `STATICS__FS__BASE_PATH`.
pub fn add_to_builder(
    builder: ConfigBuilder<DefaultState>,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    let builder = builder.add_source(
        Environment::with_prefix("STATICS")
            .separator("__")
            .try_parsing(true),
    );
    Ok(builder)
}
