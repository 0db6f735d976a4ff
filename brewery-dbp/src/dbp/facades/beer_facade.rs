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

//! Database facade for operations related to beer.

use crate::catalog::Beer;
use crate::catalog::BeerFields;
use crate::catalog::CatalogError;
use crate::catalog::Page;

/// Database facade for operations related to beer.
#[async_trait::async_trait]
pub trait BeerFacade: Send + Sync {
    /// Get a beer by its identifier.
    async fn beer_by_id(&self, beer_id: &str) -> Result<Option<Beer>, CatalogError>;

    /// Persist a new beer and return the assigned identifier.
    async fn beer_insert(&self, fields: BeerFields) -> Result<String, CatalogError>;

    /// Overwrite the stored beer with the same identifier.
    async fn beer_save(&self, beer: &Beer) -> Result<(), CatalogError>;

    /// Delete a beer. Deleting an absent beer is not an error.
    async fn beer_delete(&self, beer_id: &str) -> Result<(), CatalogError>;

    /// Get up to `limit` beers in natural order, starting after the position
    /// of `cursor` when present.
    async fn beer_page(&self, cursor: Option<&str>, limit: usize)
    -> Result<Page<Beer>, CatalogError>;

    /// Count all stored beers.
    async fn beer_count(&self) -> Result<u64, CatalogError>;
}
