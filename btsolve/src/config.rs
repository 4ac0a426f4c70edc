//! Application configuration management.
//!
//! Configuration is merged from default values, an optional configuration
//! file and environment variables, in increasing order of precedence.

use bts_solver::{ModelOptions, SolverSettings};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// The main application configuration that composes all component configs
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
pub struct AppConfig {
    /// Solver configuration (time limit, verbosity, tolerance)
    #[serde(default)]
    pub solver: SolverSettings,

    /// Model configuration (boundary conditions)
    #[serde(default)]
    pub model: ModelOptions,
}

impl AppConfig {
    /// Load configuration from multiple sources with precedence:
    /// 1. Environment variables (highest priority)
    /// 2. Config file given by the CLI
    /// 3. Default values (lowest priority)
    ///
    /// Environment variables are mapped using the pattern:
    /// `APP_<SECTION>__<KEY>` maps to `<section>.<key>`
    ///
    /// # Examples
    ///
    /// ```bash
    /// # Give up on a solve after two minutes
    /// export APP_SOLVER__TIME_LIMIT="2m"
    ///
    /// # Require the battery to finish half full
    /// export APP_MODEL__TERMINAL_ENERGY=2.0
    /// ```
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let mut config = config::Config::builder();

        // Start with default values
        config = config.add_source(config::Config::try_from(&Self::default())?);

        // Layer on config file if it is specified and exists
        if let Some(path) = path {
            if path.exists() {
                config = config.add_source(config::File::from(path))
            } else {
                return Err(anyhow::anyhow!(
                    "Config file {} does not exist",
                    path.display()
                ));
            }
        }

        // Override with environment variables
        // This maps APP_SOLVER__TIME_LIMIT to solver.time_limit
        config = config.add_source(
            config::Environment::with_prefix("APP")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let built_config = config.build()?;
        built_config.try_deserialize().map_err(Into::into)
    }
}
