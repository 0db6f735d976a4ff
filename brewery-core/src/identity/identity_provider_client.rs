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

//! Interactions with the identity provider's token endpoint and management API.

use crate::conf::AppConfig;
use crate::util::time;
use brewery_dbp::catalog::CatalogError;
use brewery_dbp::catalog::CatalogErrorKind;
use crossbeam_skiplist::SkipMap;
use reqwest::Client;
use reqwest::ClientBuilder;
use reqwest::RequestBuilder;
use reqwest::header::AUTHORIZATION;
use serde_json::Value;
use serde_json::json;
use std::sync::Arc;

/// Result of a call to the identity provider that reached the provider.
#[derive(Debug, Clone, PartialEq)]
pub enum ProviderOutcome {
    /// The provider accepted the request and responded with this body.
    Ok(Value),
    /// The provider rejected the request with a status code and message in
    /// the response body.
    Rejected {
        /// HTTP status code reported by the provider.
        status: u16,
        /// Human readable reason reported by the provider.
        message: String,
    },
}

impl ProviderOutcome {
    /// Interpret a provider response body.
    ///
    /// The management API signals failure with a `statusCode` property in the
    /// body.
    pub fn from_body(body: Value) -> Self {
        match body.get("statusCode").and_then(Value::as_u64) {
            Some(status) => Self::Rejected {
                status: u16::try_from(status).unwrap_or(500),
                message: body
                    .get("message")
                    .and_then(Value::as_str)
                    .unwrap_or_default()
                    .to_owned(),
            },
            None => Self::Ok(body),
        }
    }
}

/// Client of the identity provider.
///
/// Management API calls are authorized with a service token from the
/// `client_credentials` grant that is reused until it is about to expire.
pub struct IdentityProviderClient {
    issuer: String,
    management_audience: String,
    client_id: String,
    client_secret: String,
    connection: String,
    // Client uses an Arc internally
    client: Client,
    /// Service token and the epoch micros it should be renewed at.
    service_token: SkipMap<(), (u64, Arc<String>)>,
}

impl IdentityProviderClient {
    /// Renew the service token this long before it expires.
    const RENEW_MARGIN_MICROS: u64 = 30_000_000;

    /// Return a new instance.
    pub fn new(app_config: &AppConfig) -> Result<Arc<Self>, CatalogError> {
        let user_agent = format!(
            "{}/{}",
            app_config.app_name_lowercase(),
            app_config.app_version()
        );
        let client = ClientBuilder::new()
            .user_agent(user_agent)
            .referer(false)
            .timeout(core::time::Duration::from_secs(10))
            .build()
            .map_err(|e| {
                CatalogErrorKind::Unspecified
                    .error_with_msg(format!("Failed to create HTTP client: {e}"))
            })?;
        Ok(Arc::new(Self {
            issuer: app_config.identity.issuer(),
            management_audience: app_config.identity.management_audience(),
            client_id: app_config.identity.client_id().to_owned(),
            client_secret: app_config.identity.client_secret().to_owned(),
            connection: app_config.identity.connection().to_owned(),
            client,
            service_token: SkipMap::default(),
        }))
    }

    fn token_url(&self) -> String {
        format!("{}oauth/token", self.issuer)
    }

    fn users_url(&self) -> String {
        format!("{}api/v2/users", self.issuer)
    }

    /// Send the request and return the response body as JSON.
    ///
    /// Any response that is not a JSON document yields [Value::Null].
    async fn send(request: RequestBuilder, url: &str) -> Result<Value, CatalogError> {
        let response = request.send().await.map_err(|e| {
            log::info!("Failed request to '{url}': {:?}", e.without_url());
            CatalogErrorKind::UpstreamFailure
                .error_with_msg("Identity provider request failed.")
        })?;
        let status = response.status();
        let body = response.text().await.map_err(|e| {
            log::info!("Failed to read response from '{url}': {:?}", e.without_url());
            CatalogErrorKind::UpstreamFailure
                .error_with_msg("Identity provider response could not be read.")
        })?;
        if log::log_enabled!(log::Level::Trace) {
            log::trace!("Response from '{url}': status: {status}, body: {body}");
        }
        Ok(serde_json::from_str(&body).unwrap_or(Value::Null))
    }

    /// Return a current service token for the management API.
    async fn service_token(&self) -> Result<Arc<String>, CatalogError> {
        let now_micros = time::get_timestamp_micros();
        if let Some(entry) = self.service_token.get(&()) {
            let (renew_at_micros, token) = entry.value();
            if *renew_at_micros > now_micros {
                return Ok(Arc::clone(token));
            }
        }
        let url = self.token_url();
        let body = Self::send(
            self.client.post(&url).json(&json!({
                "grant_type": "client_credentials",
                "client_id": self.client_id,
                "client_secret": self.client_secret,
                "audience": self.management_audience,
            })),
            &url,
        )
        .await?;
        let access_token = body
            .get("access_token")
            .and_then(Value::as_str)
            .map(str::to_owned)
            .map(Arc::new)
            .ok_or_else(|| {
                log::info!("No service token was issued by '{url}'.");
                CatalogErrorKind::UpstreamFailure
                    .error_with_msg("Identity provider did not issue a service token.")
            })?;
        let expires_in_micros = body
            .get("expires_in")
            .and_then(Value::as_u64)
            .unwrap_or_default()
            .saturating_mul(1_000_000);
        let renew_at_micros = now_micros
            + expires_in_micros.saturating_sub(Self::RENEW_MARGIN_MICROS);
        self.service_token
            .insert((), (renew_at_micros, Arc::clone(&access_token)));
        if log::log_enabled!(log::Level::Debug) {
            log::debug!("Obtained a new service token from '{url}'.");
        }
        Ok(access_token)
    }

    async fn authorized(&self, request: RequestBuilder) -> Result<RequestBuilder, CatalogError> {
        let token = self.service_token().await?;
        Ok(request.header(AUTHORIZATION, format!("Bearer {token}")))
    }

    /// Create a user with `username` as email and return the provider's
    /// response.
    pub async fn user_create(&self, username: &str, password: &str) -> Result<Value, CatalogError> {
        let url = self.users_url();
        let request = self.authorized(self.client.post(&url)).await?.json(&json!({
            "connection": self.connection,
            "email": username,
            "password": password,
            "email_verified": false,
            "verify_email": false,
            "app_metadata": {},
        }));
        Self::send(request, &url).await
    }

    /// Exchange user credentials for tokens and return the provider's
    /// response.
    pub async fn user_login(&self, username: &str, password: &str) -> Result<Value, CatalogError> {
        let url = self.token_url();
        let request = self.client.post(&url).json(&json!({
            "scope": "openid",
            "grant_type": "password",
            "username": username,
            "password": password,
            "client_id": self.client_id,
            "client_secret": self.client_secret,
        }));
        Self::send(request, &url).await
    }

    /// List users with only the `email` field.
    pub async fn users_list(&self) -> Result<ProviderOutcome, CatalogError> {
        let url = self.users_url() + "?fields=email&include_fields=true";
        let request = self.authorized(self.client.get(&url)).await?;
        Self::send(request, &url).await.map(ProviderOutcome::from_body)
    }

    /// Set a new password for the user identified by `subject`.
    pub async fn user_password_update(
        &self,
        subject: &str,
        password: &str,
    ) -> Result<ProviderOutcome, CatalogError> {
        let url = format!("{}/{subject}", self.users_url());
        let request = self
            .authorized(self.client.patch(&url))
            .await?
            .json(&json!({ "password": password }));
        Self::send(request, &url).await.map(ProviderOutcome::from_body)
    }

    /// Delete the user identified by `subject`.
    pub async fn user_delete(&self, subject: &str) -> Result<(), CatalogError> {
        let url = format!("{}/{subject}", self.users_url());
        let request = self.authorized(self.client.delete(&url)).await?;
        Self::send(request, &url).await.map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_rejection_is_detected() {
        let outcome = ProviderOutcome::from_body(json!({
            "statusCode": 400,
            "error": "Bad Request",
            "message": "PasswordStrengthError: Password is too weak",
        }));
        assert_eq!(
            outcome,
            ProviderOutcome::Rejected {
                status: 400,
                message: "PasswordStrengthError: Password is too weak".to_string(),
            }
        );
    }

    #[test]
    fn test_provider_success_is_relayed() {
        let body = json!([{"email": "alice@example.com"}]);
        assert_eq!(
            ProviderOutcome::from_body(body.clone()),
            ProviderOutcome::Ok(body)
        );
        assert_eq!(
            ProviderOutcome::from_body(Value::Null),
            ProviderOutcome::Ok(Value::Null)
        );
    }

    #[test]
    fn test_urls_follow_issuer() {
        let app_config = AppConfig::with_defaults().unwrap();
        let idp = IdentityProviderClient::new(&app_config).unwrap();
        assert_eq!(idp.token_url(), format!("{}oauth/token", idp.issuer));
        assert!(idp.users_url().ends_with("api/v2/users"));
    }
}
