//! Registry configuration
//!
//! Read from a TOML file, by default `registry.toml` in the `ocpp-registry`
//! directory under the platform configuration directory:
//!
//! ```toml
//! max-pending-per-connection = 1
//! evict-idle-clients = false
//! ```
use std::path::{Path, PathBuf};

use eyre::{Context, Result};
use serde::Deserialize;

const CONFIG_DIR_NAME: &str = "ocpp-registry";
const CONFIG_FILE_NAME: &str = "registry.toml";

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct RegistryConfig {
    /// Upper bound on outstanding requests per connection.
    ///
    /// While a connection holds this many requests, adding a request under a
    /// new correlation id is dropped. Replacing an existing id always succeeds.
    /// `None` means unbounded.
    pub max_pending_per_connection: Option<usize>,

    /// Remove a client's entry when its pending requests are cleared, instead
    /// of keeping an empty entry around.
    pub evict_idle_clients: bool,
}

impl RegistryConfig {
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let config: Self = toml::from_str(contents).wrap_err("parsing registry configuration")?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(mut r: impl std::io::Read) -> Result<Self> {
        let mut contents = String::new();
        r.read_to_string(&mut contents)
            .wrap_err("reading configuration contents")?;
        Self::from_toml_str(&contents)
    }

    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let f = std::fs::File::open(path)
            .wrap_err_with(|| format!("opening configuration file {}", path.display()))?;
        Self::load(f).wrap_err("loading configuration from given path")
    }

    /// Location of the per-user configuration file, if the platform has one
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    /// Load the per-user configuration file, falling back to the defaults when
    /// it does not exist
    pub fn load_or_default() -> Result<Self> {
        Self::load_or_default_from(Self::default_path())
    }

    fn load_or_default_from(path: Option<PathBuf>) -> Result<Self> {
        let Some(path) = path else {
            tracing::debug!("no configuration directory on this platform, using defaults");
            return Ok(Self::default());
        };
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no configuration file, using defaults");
            return Ok(Self::default());
        }
        Self::load_from_path(&path)
    }

    fn validate(&self) -> Result<()> {
        if self.max_pending_per_connection == Some(0) {
            eyre::bail!("max-pending-per-connection must be at least 1");
        }
        Ok(())
    }
}
