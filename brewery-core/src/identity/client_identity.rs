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

//! Verified client identity.

use brewery_dbp::catalog::CatalogError;
use brewery_dbp::catalog::CatalogErrorKind;
use serde_json::Value;
use std::collections::HashMap;

/// A caller identity verified through bearer token authentication.
#[derive(Clone, Debug)]
pub struct ClientIdentity {
    /// Identity provider username of the caller.
    username: String,
    /// Identity provider user identifier (`sub`).
    subject: String,
}

impl std::fmt::Display for ClientIdentity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.username)
    }
}

impl ClientIdentity {
    /// Return a new instance.
    ///
    /// The username is read from `username_claim` and falls back to `sub`
    /// when the token does not carry that claim.
    pub fn from_bearer_token_claims(
        claims: HashMap<String, Value>,
        username_claim: &str,
    ) -> Result<Self, CatalogError> {
        let subject = Self::extract_claim("sub", &claims)?.to_owned();
        let username = Self::extract_claim(username_claim, &claims)
            .map(str::to_owned)
            .unwrap_or_else(|_| subject.to_owned());
        if log::log_enabled!(log::Level::Trace) {
            log::trace!("Client identity from bearer token. username: '{username}', subject: '{subject}'");
        }
        Ok(Self { username, subject })
    }

    /// Return the identity provider username used for ownership matching.
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Return the identity provider user identifier.
    pub fn subject(&self) -> &str {
        &self.subject
    }

    /// Extract a claim from the validated claims.
    fn extract_claim<'a>(
        claim: &str,
        claims: &'a HashMap<String, Value>,
    ) -> Result<&'a str, CatalogError> {
        claims.get(claim).and_then(Value::as_str).ok_or_else(|| {
            CatalogErrorKind::AuthenticationFailure
                .error_with_msg(format!("Missing or non-string '{claim}' in bearer token."))
        })
    }
}
