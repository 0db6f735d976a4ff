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

//! Brewery catalog errors.

use std::error::Error;
use std::fmt;

/// Cause of error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogErrorKind {
    /// General failure. See message for details.
    Unspecified,
    /// The requested resource does not exist.
    NotFound,
    /// The caller is not allowed to modify the resource.
    Forbidden,
    /// Authentication failed.
    AuthenticationFailure,
    /// Malformed identifier or pagination cursor.
    MalformedIdentifier,
    /// Malformed request body.
    MalformedRequest,
    /// The beer is already embedded in a brewery.
    BeerAlreadyAssigned,
    /// The beer is not embedded in the brewery.
    BeerNotAssigned,
    /// The request body is not `application/json`.
    UnsupportedMediaType,
    /// No representation of the resource satisfies the `Accept` header.
    NotAcceptable,
    /// The HTTP method is not supported by the resource.
    MethodNotAllowed,
    /// A call to the datastore or the identity provider failed.
    UpstreamFailure,
}

impl CatalogErrorKind {
    /// Create a new instance with an error message.
    pub fn error_with_msg<S: AsRef<str>>(self, msg: S) -> CatalogError {
        CatalogError {
            kind: self,
            msg: Some(msg.as_ref().to_string()),
        }
    }

    /// Create a new instance without an error message.
    pub fn error(self) -> CatalogError {
        CatalogError {
            kind: self,
            msg: None,
        }
    }
}

impl fmt::Display for CatalogErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{self:?}")
    }
}

/** Brewery catalog error.

Create a new instance via [CatalogErrorKind].
*/
#[derive(Debug)]
pub struct CatalogError {
    kind: CatalogErrorKind,
    msg: Option<String>,
}

impl CatalogError {
    /// Return the type of error.
    pub fn kind(&self) -> &CatalogErrorKind {
        &self.kind
    }

    /// Return the error message, if any.
    pub fn msg(&self) -> Option<&str> {
        self.msg.as_deref()
    }
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if let Some(msg) = &self.msg {
            write!(f, "{} {}", self.kind, msg)
        } else {
            write!(f, "{}", self.kind)
        }
    }
}

impl AsRef<CatalogError> for CatalogError {
    fn as_ref(&self) -> &CatalogError {
        self
    }
}

impl Error for CatalogError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_with_and_without_message() {
        let e = CatalogErrorKind::NotFound.error();
        assert_eq!(e.to_string(), "NotFound");
        assert!(e.msg().is_none());
        let e = CatalogErrorKind::Forbidden.error_with_msg("Not the owner.");
        assert_eq!(e.to_string(), "Forbidden Not the owner.");
        assert_eq!(e.kind(), &CatalogErrorKind::Forbidden);
    }
}
