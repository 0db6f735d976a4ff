/*
    Copyright 2025 MydriaTech AB

    Licensed under the Apache License 2.0 with Free world makers exception
    1.0.0 (the "License"); you may not use this file except in compliance with
    the License. You should have obtained a copy of the License with the source
    or binary distribution in file named

        LICENSE-Apache-2.0-with-FWM-Exception-1.0.0

    Unless required by applicable law or agreed to in writing, software
    distributed under the License is distributed on an "AS IS" BASIS,
    WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
    See the License for the specific language governing permissions and
    limitations under the License.
*/

//! Parsing of application configuration.

mod api_config;
mod backend_config;
mod identity_config;
mod limits_config;

use config::Config;
use config::ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use config::builder::BuilderState;
use serde::Deserialize;

pub use self::api_config::ApiConfig;
pub use self::backend_config::BackendConfig;
pub use self::identity_config::IdentityConfig;
pub use self::limits_config::ResourceLimitsConfig;

/// Package name reported by Cargo at build time.
const CARGO_PKG_NAME: &str = env!("CARGO_PKG_NAME");
/// Package version reported by Cargo at build time.
const CARGO_PKG_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Static trait for tracking implementations.
trait AppConfigDefaults {
    fn set_defaults<T: BuilderState>(
        config_builder: ConfigBuilder<T>,
        prefix: &str,
    ) -> Result<ConfigBuilder<T>, ConfigError>;
}

/**
Application configration root.

The application name defaults to the Rust package name, but can be overridden
with the environment variable `APP_NAME`.

Configuration will be loaded from

1. the file `{application name}.json` in the current working directory.
2. environment variable overrides in the form
   `{APPLICATION_NAME}_SECTION_CONFIGKEYWITHOUTSPACES`
 */
#[derive(Debug, Deserialize)]
pub struct AppConfig {
    /// Configuration of the exposed REST API.
    pub api: ApiConfig,
    /// Configuration for persistence backend.
    pub backend: BackendConfig,
    /// Configuration of the delegated identity provider.
    pub identity: IdentityConfig,
    /// Resource detection and configuration overrides.
    pub limits: ResourceLimitsConfig,

    /// Lower case application name. Ignored when loading configuration.
    #[serde(skip_deserializing)]
    app_name: String,
}

impl AppConfig {
    /// The application name defaults to the Rust package name, but can be
    /// overridden with the environment variable `APP_NAME`.
    fn read_app_name_lowercase(cargo_pkg_name: &str) -> String {
        std::env::var("APP_NAME")
            .map_err(|e| {
                log::debug!(
                    "Environment variable APP_NAME: {e:?} -> Default app name '{cargo_pkg_name}' will be used."
                );
            })
            .ok()
            .map(|value| value.to_lowercase())
            .unwrap_or(cargo_pkg_name.to_owned())
    }

    /// Lower case application name.
    pub fn app_name_lowercase(&self) -> &str {
        &self.app_name
    }

    /// SemVer application version derived fromt the Rust package version.
    pub fn app_version(&self) -> &'static str {
        CARGO_PKG_VERSION
    }

    /// Return the builder with all section defaults applied.
    fn builder_with_defaults() -> Result<ConfigBuilder<config::builder::DefaultState>, ConfigError>
    {
        let mut config_builder = Config::builder();
        config_builder = ApiConfig::set_defaults(config_builder, "api")?;
        config_builder = BackendConfig::set_defaults(config_builder, "backend")?;
        config_builder = IdentityConfig::set_defaults(config_builder, "identity")?;
        config_builder = ResourceLimitsConfig::set_defaults(config_builder, "limits")?;
        Ok(config_builder)
    }

    /** Creates a new instance pre-populated with defaults, an optional
    configurations file and environment variable overrides.

    Use `env!("CARGO_PKG_NAME")` as `cargo_pkg_name`.
    */
    pub fn new(cargo_pkg_name: &str) -> Result<Self, ConfigError> {
        let app_name = Self::read_app_name_lowercase(cargo_pkg_name);
        let config_filename = app_name.to_owned() + ".json";
        let config_env_prefix = &app_name.to_uppercase();
        let conf_file = std::env::current_dir()
            .map_err(|e| ConfigError::Message(format!("No working directory: {e}")))?
            .join(config_filename);
        if log::log_enabled!(log::Level::Debug) {
            log::debug!(
                "Will load '{}' configuration if present.",
                conf_file.display()
            );
        }
        let conf_file_name = conf_file.to_str().ok_or_else(|| {
            ConfigError::Message(format!(
                "Non UTF-8 configuration path '{}'.",
                conf_file.display()
            ))
        })?;
        let config = Self::builder_with_defaults()?
            .add_source(File::with_name(conf_file_name).required(false))
            .add_source(
                Environment::with_prefix(config_env_prefix)
                    .separator("_")
                    .list_separator(","),
            )
            .build()?;
        let mut app_config: AppConfig = config.try_deserialize()?;
        app_config.app_name = app_name;
        log::info!("Running with configuration: {app_config:?}");
        Ok(app_config)
    }

    /// Return a configuration with only the defaults applied.
    ///
    /// Useful for tests and tooling that should not depend on the environment.
    pub fn with_defaults() -> Result<Self, ConfigError> {
        let mut app_config: AppConfig = Self::builder_with_defaults()?
            .build()?
            .try_deserialize()?;
        app_config.app_name = CARGO_PKG_NAME.to_owned();
        Ok(app_config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let app_config = AppConfig::with_defaults().unwrap();
        assert_eq!(app_config.api.bind_address(), "0.0.0.0");
        assert_eq!(app_config.api.bind_port(), 8080);
        assert_eq!(app_config.api.base_url(), "http://localhost:8080");
        assert!(!app_config.api.unsecure_delete_enabled());
        assert_eq!(app_config.backend.implementation(), "mem");
        assert_eq!(app_config.backend.keyspace(), "brewery");
        assert!(app_config.backend.endpoints().is_empty());
        assert_eq!(app_config.identity.username_claim(), "name");
        assert_eq!(
            app_config.identity.connection(),
            "Username-Password-Authentication"
        );
        assert!(app_config.limits.available_parallelism() > 0);
        assert_eq!(app_config.app_name_lowercase(), "brewery_core");
    }

    #[test]
    fn test_secrets_are_redacted() {
        let app_config = AppConfig::with_defaults().unwrap();
        let debug = format!("{app_config:?}");
        assert!(debug.contains("*redacted*"));
    }
}
