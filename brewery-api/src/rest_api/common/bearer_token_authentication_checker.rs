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

//! Validate authentication with Bearer tokens.

mod jwks_cache;

pub use self::jwks_cache::JwksCache;
use actix_web::HttpRequest;
use actix_web::http::header::HeaderValue;
use brewery_core::catalog::CatalogError;
use brewery_core::catalog::CatalogErrorKind;
use brewery_core::identity::ClientIdentity;
use brewery_core::util::time;
use crossbeam_skiplist::SkipMap;
use crossbeam_skiplist::map::Entry;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::TokenData;
use jsonwebtoken::Validation;
use jsonwebtoken::jwk::AlgorithmParameters;
use jsonwebtoken::jwk::JwkSet;
use serde_json::Value;
use std::collections::HashMap;
use std::collections::HashSet;
use std::sync::Arc;

/// Validates authentication using Bearer tokens issued by the identity
/// provider.
pub struct BearerTokenAuthenticationChecker {
    client_identity_by_bearer_token: SkipMap<String, (u64, Arc<ClientIdentity>)>,
    jwks_cache: Arc<JwksCache>,
    aud: Option<String>,
    username_claim: String,
}

impl BearerTokenAuthenticationChecker {
    const BEARER_TOKEN: &str = "Bearer";

    /// Return a new instance that trusts keys published by `issuer`.
    ///
    /// The `aud` claim is only validated when `aud` is present.
    pub async fn new(
        issuer: &str,
        aud: Option<&str>,
        username_claim: &str,
    ) -> Result<Arc<Self>, Box<dyn core::error::Error>> {
        let jwks_cache = JwksCache::new(issuer).await?;
        Ok(Self::with_jwks_cache(jwks_cache, aud, username_claim))
    }

    /// Return a new instance using an already populated [JwksCache].
    pub fn with_jwks_cache(
        jwks_cache: Arc<JwksCache>,
        aud: Option<&str>,
        username_claim: &str,
    ) -> Arc<Self> {
        Arc::new(Self {
            client_identity_by_bearer_token: SkipMap::default(),
            jwks_cache,
            aud: aud.map(str::to_string),
            username_claim: username_claim.to_string(),
        })
        .init()
    }

    fn init(self: Arc<Self>) -> Arc<Self> {
        let self_clone = Arc::clone(&self);
        tokio::spawn(async move { self_clone.purge_expired_cached_client_identities().await });
        self
    }

    /// Purge expired bearer tokens from cache.
    ///
    /// Validity is still verified on use and expired tokens in use are removed.
    async fn purge_expired_cached_client_identities(&self) {
        loop {
            tokio::time::sleep(tokio::time::Duration::from_micros(60_000_000)).await;
            let now = time::get_timestamp_micros();
            for entry in self.client_identity_by_bearer_token.iter() {
                if entry.value().0 < now {
                    entry.remove();
                }
            }
        }
    }

    /// Extract `exp` claim from [TokenData].
    fn extract_exp_seconds(
        token_data: &TokenData<HashMap<String, Value>>,
    ) -> Result<u64, CatalogError> {
        token_data
            .claims
            .get("exp")
            .and_then(Value::as_u64)
            .ok_or_else(|| {
                CatalogErrorKind::AuthenticationFailure
                    .error_with_msg("Missing or non-unsigned integer 'exp' in bearer token.")
            })
    }

    /// Return the bearer token's [ClientIdentity] or
    /// [CatalogErrorKind::AuthenticationFailure].
    pub fn get_identity(
        &self,
        http_request: &HttpRequest,
    ) -> Result<Arc<ClientIdentity>, CatalogError> {
        let authorization_header = http_request
            .headers()
            .get(actix_web::http::header::AUTHORIZATION)
            .map(HeaderValue::to_str)
            .map(|res| {
                res.map_err(|e| {
                    CatalogErrorKind::AuthenticationFailure
                        .error_with_msg(format!("Invalid 'Authorization' HTTP header: {e}"))
                })
            })
            .unwrap_or_else(|| {
                Err(CatalogErrorKind::AuthenticationFailure
                    .error_with_msg("Missing 'Authorization' HTTP header."))
            })?
            .trim();
        let bearer_token = authorization_header
            .strip_prefix(Self::BEARER_TOKEN)
            .map(|s| s.trim_start_matches(':'))
            .ok_or_else(|| {
                CatalogErrorKind::AuthenticationFailure
                    .error_with_msg("Missing bearer token in 'Authorization' HTTP header.")
            })?
            .trim();
        if log::log_enabled!(log::Level::Trace) {
            let decoded = bearer_token
                .split('.')
                .take(2)
                .map(|part| {
                    String::from_utf8(tyst::encdec::base64::decode_url(part).unwrap_or_default())
                        .unwrap_or_default()
                        + "."
                })
                .collect::<String>();
            log::trace!("Bearer: {decoded}");
        }
        let now_micros = time::get_timestamp_micros();
        let mut delete_from_cache_on_fail = false;
        if let Some((expires_micros, client_identity)) = self
            .client_identity_by_bearer_token
            .get(bearer_token)
            .as_ref()
            .map(Entry::value)
        {
            if expires_micros < &now_micros {
                delete_from_cache_on_fail = true;
            } else {
                return Ok(Arc::clone(client_identity));
            }
        }
        let (iss, jwks) = self.jwks_cache.get_iss_and_jwks()?;
        let ret = Self::validate_bearer_token(&iss, &jwks, self.aud.as_deref(), bearer_token)
            .and_then(|token_data| {
                if log::log_enabled!(log::Level::Trace) {
                    log::trace!("token_data: {token_data:?}");
                }
                let exp_seconds = Self::extract_exp_seconds(&token_data)?;
                let client_identity = ClientIdentity::from_bearer_token_claims(
                    token_data.claims,
                    &self.username_claim,
                )?;
                Ok((exp_seconds, Arc::new(client_identity)))
            })
            .inspect_err(|_e| {
                if delete_from_cache_on_fail {
                    self.client_identity_by_bearer_token.remove(bearer_token);
                }
            })?;
        let (exp_seconds, client_identity) = ret;
        self.client_identity_by_bearer_token.insert(
            bearer_token.to_owned(),
            (
                exp_seconds.saturating_mul(1_000_000),
                Arc::clone(&client_identity),
            ),
        );
        Ok(client_identity)
    }

    /// Validate the bearer token validity using the provided JSON Web Key set.
    fn validate_bearer_token(
        iss: &str,
        jwks: &JwkSet,
        aud: Option<&str>,
        token: &str,
    ) -> Result<TokenData<HashMap<String, serde_json::Value>>, CatalogError> {
        let header = jsonwebtoken::decode_header(token).map_err(|e| {
            CatalogErrorKind::AuthenticationFailure
                .error_with_msg(format!("Failed to decode authorization token: {e}"))
        })?;
        let kid = header.kid.ok_or_else(|| {
            CatalogErrorKind::AuthenticationFailure
                .error_with_msg("Missing 'kid' in token header field")
        })?;
        let jwk = jwks.find(&kid).ok_or_else(|| {
            CatalogErrorKind::AuthenticationFailure
                .error_with_msg(format!("JWKS has no 'kid' with value '{kid}'."))
        })?;
        let decoding_key = match &jwk.algorithm {
            AlgorithmParameters::RSA(rsa) => DecodingKey::from_rsa_components(&rsa.n, &rsa.e)
                .map_err(|e| {
                    CatalogErrorKind::AuthenticationFailure.error_with_msg(format!(
                        "Failed to construct RSA key for bearer token validation: {e}"
                    ))
                })?,
            AlgorithmParameters::EllipticCurve(ec) => DecodingKey::from_ec_components(&ec.x, &ec.y)
                .map_err(|e| {
                    CatalogErrorKind::AuthenticationFailure.error_with_msg(format!(
                        "Failed to construct EC key for bearer token validation: {e}"
                    ))
                })?,
            unsupported => Err(CatalogErrorKind::AuthenticationFailure
                .error_with_msg(format!("Currently '{unsupported:?}' is not supported.")))?,
        };
        let validation = {
            let mut validation = Validation::new(header.alg);
            if let Some(aud) = aud {
                validation.set_audience(&[aud]);
                validation.validate_aud = true;
            } else {
                validation.validate_aud = false;
            }
            validation.validate_exp = true;
            validation.iss = Some(HashSet::from_iter([iss.to_string()]));
            validation.required_spec_claims.insert("iss".to_string());
            validation
        };
        jsonwebtoken::decode::<HashMap<String, serde_json::Value>>(
            token,
            &decoding_key,
            &validation,
        )
        .map_err(|e| {
            CatalogErrorKind::AuthenticationFailure.error_with_msg(format!(
                "Decode claims for bearer token validation failed: {e}"
            ))
        })
    }
}
