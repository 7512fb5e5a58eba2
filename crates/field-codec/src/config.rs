//! Configuration loading and validation for the field codec.
//!
//! All values are read from environment variables at startup. The process
//! should refuse to start if the master secret is missing: a codec built
//! from an empty secret would happily encrypt, and nothing written that way
//! could ever be tied back to the real key.

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::crypto::kdf::DEFAULT_ITERATIONS;

/// The process-wide key-derivation password.
///
/// Wrapped so the secret can never leak through `Debug` output — config
/// structs get logged at startup.
#[derive(Clone, Deserialize)]
#[serde(transparent)]
pub struct MasterSecret(String);

impl MasterSecret {
    /// Construct from a raw secret string (tests and embedding callers).
    pub fn new(secret: impl Into<String>) -> Self {
        Self(secret.into())
    }

    /// The secret bytes, as fed to key derivation.
    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }

    fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl std::fmt::Debug for MasterSecret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("MasterSecret([REDACTED])")
    }
}

/// Validated codec configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct CodecConfig {
    /// Key-derivation password for every field in every record. **Required.**
    /// Rotating it orphans all previously written ciphertext.
    pub master_secret: MasterSecret,

    /// PBKDF2 iteration count.
    #[serde(default = "default_kdf_iterations")]
    pub kdf_iterations: u32,

    /// Tracing log level (e.g. `"info"`, `"debug"`).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_kdf_iterations() -> u32 {
    DEFAULT_ITERATIONS
}
fn default_log_level() -> String {
    "info".into()
}

impl CodecConfig {
    /// Load and validate configuration from environment variables
    /// (`MASTER_SECRET`, `KDF_ITERATIONS`, `LOG_LEVEL`).
    ///
    /// # Errors
    ///
    /// Returns an error if any required variable is absent or cannot be
    /// parsed, or if validation fails.
    pub fn from_env() -> Result<Self> {
        let cfg = config::Config::builder()
            .add_source(config::Environment::default())
            .build()
            .context("failed to build configuration from environment")?;

        let c: CodecConfig = cfg
            .try_deserialize()
            .context("failed to deserialise configuration")?;

        c.validate()?;
        Ok(c)
    }

    /// Construct directly from a secret, using default derivation settings.
    pub fn with_secret(secret: impl Into<String>) -> Self {
        Self {
            master_secret: MasterSecret::new(secret),
            kdf_iterations: default_kdf_iterations(),
            log_level: default_log_level(),
        }
    }

    /// Validate all fields, returning a descriptive error on the first failure.
    pub fn validate(&self) -> Result<()> {
        if self.master_secret.is_empty() {
            anyhow::bail!("MASTER_SECRET is required and must not be empty");
        }
        if self.kdf_iterations == 0 {
            anyhow::bail!("KDF_ITERATIONS must be > 0");
        }
        Ok(())
    }
}
