//! Built-in defaults seeded before any source is layered on.

use config::builder::DefaultState;
use config::ConfigBuilder;
use config::ConfigError;

/// Start a builder carrying the default value of every scalar key.
pub fn builder_with_defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    config::Config::builder()
        .set_default("fs.use_embedded", true)?
        .set_default("fs.fallback_to_disk", false)?
        .set_default("fs.base_path", "")?
        .set_default("snapshot.input", "static")?
        .set_default("logging.level", "info")?
        .set_default("logging.format", "text")?
        .set_default("logging.output", "stderr")
}
