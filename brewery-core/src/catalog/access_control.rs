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

//! Catalog access control.

use crate::identity::ClientIdentity;
use brewery_dbp::catalog::Brewery;
use brewery_dbp::catalog::CatalogError;
use brewery_dbp::catalog::CatalogErrorKind;

/// Ownership based access control.
///
/// Only the creator of a brewery may modify it and only a user may modify
/// their own account.
pub struct AccessControl {}

impl AccessControl {
    /// Return `true` if the caller is the owner of the brewery.
    pub fn is_owner(brewery: &Brewery, identity: &ClientIdentity) -> bool {
        brewery.get_owner() == identity.username()
    }

    /// Error out with [CatalogErrorKind::Forbidden] unless the caller owns the
    /// brewery.
    pub fn assert_owner(brewery: &Brewery, identity: &ClientIdentity) -> Result<(), CatalogError> {
        if Self::is_owner(brewery, identity) {
            Ok(())
        } else {
            if log::log_enabled!(log::Level::Debug) {
                log::debug!(
                    "'{identity}' denied modification of brewery '{}' owned by '{}'.",
                    brewery.get_id(),
                    brewery.get_owner()
                );
            }
            Err(CatalogErrorKind::Forbidden.error_with_msg("Not the owner of the brewery."))
        }
    }

    /// Error out with [CatalogErrorKind::Forbidden] unless the caller is the
    /// user.
    pub fn assert_same_user(identity: &ClientIdentity, username: &str) -> Result<(), CatalogError> {
        if identity.username() == username {
            Ok(())
        } else {
            Err(CatalogErrorKind::Forbidden.error_with_msg("Not allowed to modify other users."))
        }
    }
}
