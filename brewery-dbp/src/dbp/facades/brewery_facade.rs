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

//! Database facade for operations related to breweries.

use crate::catalog::Beer;
use crate::catalog::Brewery;
use crate::catalog::BreweryFields;
use crate::catalog::CatalogError;
use crate::catalog::Page;

/// Database facade for operations related to breweries.
#[async_trait::async_trait]
pub trait BreweryFacade: Send + Sync {
    /// Get a brewery by its identifier.
    ///
    /// Identifiers that could never have been assigned by the datastore yield
    /// `None` just like absent ones.
    async fn brewery_by_id(&self, brewery_id: &str) -> Result<Option<Brewery>, CatalogError>;

    /// Persist a new brewery and return the assigned identifier.
    async fn brewery_insert(
        &self,
        fields: BreweryFields,
        owner: &str,
        beer: Vec<Beer>,
    ) -> Result<String, CatalogError>;

    /// Overwrite the stored brewery with the same identifier.
    async fn brewery_save(&self, brewery: &Brewery) -> Result<(), CatalogError>;

    /// Delete a brewery. Deleting an absent brewery is not an error.
    async fn brewery_delete(&self, brewery_id: &str) -> Result<(), CatalogError>;

    /// Get up to `limit` breweries in natural order, starting after the
    /// position of `cursor` when present.
    async fn breweries_page(
        &self,
        cursor: Option<&str>,
        limit: usize,
    ) -> Result<Page<Brewery>, CatalogError>;

    /// Count all stored breweries.
    async fn brewery_count(&self) -> Result<u64, CatalogError>;
}
