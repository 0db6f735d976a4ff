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

//! JSON Web Key Set cache.

use brewery_core::catalog::CatalogError;
use brewery_core::catalog::CatalogErrorKind;
use crossbeam_skiplist::SkipMap;
use crossbeam_skiplist::map::Entry;
use jsonwebtoken::jwk::JwkSet;
use reqwest::Client;
use serde_json::Value;
use std::sync::Arc;

/// The JSON Web Key Set
/// ([RFC 7517 5](https://www.rfc-editor.org/rfc/rfc7517#section-5)) published
/// by the identity provider and used to validate bearer tokens.
pub struct JwksCache {
    iss_and_jwks_cache: SkipMap<(), (String, Arc<JwkSet>)>,
}

impl JwksCache {
    /// Return a new instance with keys discovered through the OpenID
    /// configuration of `issuer`.
    pub async fn new(issuer: &str) -> Result<Arc<Self>, Box<dyn core::error::Error>> {
        let openid_config_url = Self::build_openid_config_url(issuer);
        let client = Self::new_api_client()?;
        let (iss, jwks) = Self::retrieve_open_id_issuer_and_jwks(&client, &openid_config_url).await?;
        // Initial population of cached values that fail fast.
        let instance = Self::with_iss_and_jwks(&iss, jwks);
        let self_clone = Arc::clone(&instance);
        tokio::spawn(async move {
            self_clone
                .background_reload_of_jwks(client, openid_config_url)
                .await
        });
        Ok(instance)
    }

    /// Return a new instance that always uses the provided key set.
    pub fn with_iss_and_jwks(iss: &str, jwks: JwkSet) -> Arc<Self> {
        let iss_and_jwks_cache = SkipMap::default();
        iss_and_jwks_cache.insert((), (iss.to_string(), Arc::new(jwks)));
        Arc::new(Self { iss_and_jwks_cache })
    }

    /// Get cached `iss` and JWKS
    pub fn get_iss_and_jwks(&self) -> Result<(String, Arc<JwkSet>), CatalogError> {
        self.iss_and_jwks_cache
            .front()
            .as_ref()
            .map(Entry::value)
            .cloned()
            .ok_or_else(|| {
                CatalogErrorKind::AuthenticationFailure.error_with_msg("Unable to get cached JWKS.")
            })
    }

    /// Background reloads of JWKS
    async fn background_reload_of_jwks(&self, client: Client, openid_config_url: String) {
        loop {
            tokio::time::sleep(tokio::time::Duration::from_micros(60_000_000)).await;
            match Self::retrieve_open_id_issuer_and_jwks(&client, &openid_config_url).await {
                Ok((iss, jwks)) => {
                    self.iss_and_jwks_cache.insert((), (iss, Arc::new(jwks)));
                }
                Err(e) => {
                    log::warn!(
                        "Failed to reload JWKS (last successfully loaded will be used still): {e}"
                    );
                }
            }
        }
    }

    /// Return the OpenID Connect discovery URL of the issuer.
    fn build_openid_config_url(issuer: &str) -> String {
        format!(
            "{}/.well-known/openid-configuration",
            issuer.trim_end_matches('/')
        )
    }

    /// Load issuer and JWKS using OpenID Connect discovery.
    async fn retrieve_open_id_issuer_and_jwks(
        client: &Client,
        openid_config_url: &str,
    ) -> Result<(String, JwkSet), Box<dyn core::error::Error>> {
        let openid_config = Self::http_get(client, openid_config_url).await?;
        if log::log_enabled!(log::Level::Trace) {
            log::trace!("openid-configuration at '{openid_config_url}': {openid_config}");
        }
        let json_value = serde_json::from_str::<serde_json::Value>(&openid_config)?;
        let iss = Self::extract_string_from_json(&json_value, "/issuer")?;
        let jwks_uri = Self::extract_string_from_json(&json_value, "/jwks_uri")?;
        let jwks = serde_json::from_str(&Self::http_get(client, &jwks_uri).await?)?;
        if log::log_enabled!(log::Level::Debug) {
            log::debug!("Bearer tokens will be validated using issuer '{iss}'.");
        }
        Ok((iss, jwks))
    }

    /// Extract String value at JSON Pointer from document.
    fn extract_string_from_json(
        json_value: &Value,
        json_pointer: &str,
    ) -> Result<String, Box<dyn core::error::Error>> {
        Ok(json_value
            .pointer(json_pointer)
            .ok_or_else(|| format!("Failed to extract '{json_pointer}' from {json_value}."))?
            .as_str()
            .ok_or_else(|| {
                format!("Failed to parse value of '{json_pointer}' from {json_value} as String.")
            })
            .map(str::to_string)?)
    }

    /// Return a new REST API client for talking to the identity provider.
    fn new_api_client() -> Result<Client, Box<dyn core::error::Error>> {
        Ok(reqwest::ClientBuilder::new()
            .use_rustls_tls()
            .user_agent(concat!("brewery/", env!("CARGO_PKG_VERSION")))
            .referer(false)
            .redirect(reqwest::redirect::Policy::none())
            .pool_max_idle_per_host(1)
            .timeout(core::time::Duration::from_secs(10))
            .build()?)
    }

    /// Make an unauthenticated GET request using client.
    async fn http_get(client: &Client, url: &str) -> Result<String, Box<dyn core::error::Error>> {
        let response = client.get(url).send().await?;
        if response.status() == reqwest::StatusCode::OK {
            let content = response.text().await?;
            if log::log_enabled!(log::Level::Trace) {
                log::trace!("'{url}' -> '{content}'");
            }
            Ok(content)
        } else {
            Err(format!("Get '{url}' failed: {response:?}").as_str().into())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_discovery_url() {
        assert_eq!(
            JwksCache::build_openid_config_url("https://tenant.example.com/"),
            "https://tenant.example.com/.well-known/openid-configuration"
        );
        assert_eq!(
            JwksCache::build_openid_config_url("https://tenant.example.com"),
            "https://tenant.example.com/.well-known/openid-configuration"
        );
    }

    #[test]
    fn test_extract_string() {
        let json = serde_json::json!({"issuer": "https://tenant.example.com/", "n": 1});
        assert_eq!(
            JwksCache::extract_string_from_json(&json, "/issuer").unwrap(),
            "https://tenant.example.com/"
        );
        assert!(JwksCache::extract_string_from_json(&json, "/n").is_err());
        assert!(JwksCache::extract_string_from_json(&json, "/jwks_uri").is_err());
    }
}
