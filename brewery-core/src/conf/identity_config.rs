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

//! Parsing of configuration for the delegated identity provider.

use super::AppConfigDefaults;
use config::ConfigBuilder;
use config::ConfigError;
use config::builder::BuilderState;
use serde::Deserialize;

/// Configuration of the OAuth2/OIDC identity provider.
#[derive(Deserialize)]
pub struct IdentityConfig {
    /// Issuer base URL.
    issuer: String,
    /// Required audience of API bearer tokens.
    audience: String,
    /// Audience of the management API.
    managementaudience: String,
    /// OAuth2 client identifier of this application.
    clientid: String,
    /// OAuth2 client secret of this application.
    clientsecret: String,
    /// User database connection name.
    connection: String,
    /// Claim used as caller identity.
    usernameclaim: String,
}

impl std::fmt::Debug for IdentityConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IdentityConfig")
            .field("issuer", &self.issuer)
            .field("audience", &self.audience)
            .field("managementaudience", &self.managementaudience)
            .field("clientid", &self.clientid)
            .field("clientsecret", &"*redacted*")
            .field("connection", &self.connection)
            .field("usernameclaim", &self.usernameclaim)
            .finish()
    }
}

impl AppConfigDefaults for IdentityConfig {
    /// Provide defaults for this part of the configuration
    fn set_defaults<T: BuilderState>(
        config_builder: ConfigBuilder<T>,
        prefix: &str,
    ) -> Result<ConfigBuilder<T>, ConfigError> {
        config_builder
            .set_default(prefix.to_string() + "." + "issuer", "")?
            .set_default(prefix.to_string() + "." + "audience", "")?
            .set_default(prefix.to_string() + "." + "managementaudience", "")?
            .set_default(prefix.to_string() + "." + "clientid", "")?
            .set_default(prefix.to_string() + "." + "clientsecret", "")?
            .set_default(
                prefix.to_string() + "." + "connection",
                "Username-Password-Authentication",
            )?
            .set_default(prefix.to_string() + "." + "usernameclaim", "name")
    }
}

impl IdentityConfig {
    /// Issuer base URL, always with a trailing slash. E.g.
    /// `https://tenant.example.com/`.
    pub fn issuer(&self) -> String {
        let issuer = self.issuer.trim();
        if issuer.is_empty() || issuer.ends_with('/') {
            issuer.to_string()
        } else {
            issuer.to_string() + "/"
        }
    }

    /// Required `aud` of API bearer tokens. `None` disables the check.
    pub fn audience(&self) -> Option<&str> {
        Some(self.audience.trim()).filter(|aud| !aud.is_empty())
    }

    /// Audience of the management API service token. Defaults to
    /// `{issuer}api/v2/`.
    pub fn management_audience(&self) -> String {
        Some(self.managementaudience.trim())
            .filter(|aud| !aud.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| self.issuer() + "api/v2/")
    }

    /// OAuth2 client identifier of this application.
    pub fn client_id(&self) -> &str {
        &self.clientid
    }

    /// OAuth2 client secret of this application.
    pub fn client_secret(&self) -> &str {
        &self.clientsecret
    }

    /// Name of the user database connection new users are created in.
    pub fn connection(&self) -> &str {
        &self.connection
    }

    /// Claim of a validated bearer token that holds the caller's username.
    pub fn username_claim(&self) -> &str {
        &self.usernameclaim
    }
}
