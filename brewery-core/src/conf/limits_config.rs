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

//! Parsing of resource limits configuration.

use super::AppConfigDefaults;
use config::ConfigBuilder;
use config::ConfigError;
use config::builder::BuilderState;
use serde::Deserialize;

/// Resource detection and configuration overrides.
#[derive(Debug, Deserialize)]
pub struct ResourceLimitsConfig {
    /// Number of CPUs to use. `0` means detect.
    cpus: String,
}

impl AppConfigDefaults for ResourceLimitsConfig {
    /// Provide defaults for this part of the configuration
    fn set_defaults<T: BuilderState>(
        config_builder: ConfigBuilder<T>,
        prefix: &str,
    ) -> Result<ConfigBuilder<T>, ConfigError> {
        config_builder.set_default(prefix.to_string() + "." + "cpus", "0")
    }
}

impl ResourceLimitsConfig {
    /// Return the number of worker threads to use.
    pub fn available_parallelism(&self) -> usize {
        self.cpus
            .trim()
            .parse::<usize>()
            .ok()
            .filter(|cpus| *cpus > 0)
            .unwrap_or_else(|| {
                std::thread::available_parallelism()
                    .map(usize::from)
                    .unwrap_or(1)
            })
    }
}
