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

//! Brewery facade implementation for Cassandra.

use super::CassandraProviderFacades;
use crate::CassandraProvider;
use crate::cassandra_provider::entity;
use crate::cassandra_provider::entity::BreweryEntity;
use brewery_dbp::catalog::Beer;
use brewery_dbp::catalog::Brewery;
use brewery_dbp::catalog::BreweryFields;
use brewery_dbp::catalog::CatalogError;
use brewery_dbp::catalog::Page;
use brewery_dbp::dbp::facades::BreweryFacade;
use std::sync::Arc;

/// Brewery facade implementation for Cassandra.
pub struct CassandraBreweryFacade {
    cassandra_provider: Arc<CassandraProvider>,
}

impl CassandraBreweryFacade {
    /// Return a new instance.
    pub fn new(cassandra_provider: &Arc<CassandraProvider>) -> Self {
        Self {
            cassandra_provider: Arc::clone(cassandra_provider),
        }
    }
}

#[async_trait::async_trait]
impl BreweryFacade for CassandraBreweryFacade {
    async fn brewery_by_id(&self, brewery_id: &str) -> Result<Option<Brewery>, CatalogError> {
        if !entity::is_well_formed_id(brewery_id) {
            return Ok(None);
        }
        BreweryEntity::select_by_id(&self.cassandra_provider, brewery_id)
            .await?
            .map(BreweryEntity::into_brewery)
            .transpose()
    }

    async fn brewery_insert(
        &self,
        fields: BreweryFields,
        owner: &str,
        beer: Vec<Beer>,
    ) -> Result<String, CatalogError> {
        let brewery_id = entity::new_id();
        let brewery = Brewery::new(&brewery_id, fields, owner, beer);
        BreweryEntity::new(&brewery)?
            .upsert(&self.cassandra_provider)
            .await?;
        Ok(brewery_id)
    }

    async fn brewery_save(&self, brewery: &Brewery) -> Result<(), CatalogError> {
        BreweryEntity::new(brewery)?
            .upsert(&self.cassandra_provider)
            .await
    }

    async fn brewery_delete(&self, brewery_id: &str) -> Result<(), CatalogError> {
        if !entity::is_well_formed_id(brewery_id) {
            return Ok(());
        }
        BreweryEntity::delete_by_id(&self.cassandra_provider, brewery_id).await
    }

    async fn breweries_page(
        &self,
        cursor: Option<&str>,
        limit: usize,
    ) -> Result<Page<Brewery>, CatalogError> {
        CassandraProviderFacades::assert_cursor_well_formed(cursor)?;
        let mut entities =
            BreweryEntity::select_all_from(&self.cassandra_provider, cursor, limit + 1).await?;
        let more_results = entities.len() > limit;
        entities.truncate(limit);
        let end_cursor = entities
            .last()
            .map(|entity| entity.get_brewery_id().to_owned());
        let items = entities
            .into_iter()
            .map(BreweryEntity::into_brewery)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Page::new(items, end_cursor, more_results))
    }

    async fn brewery_count(&self) -> Result<u64, CatalogError> {
        BreweryEntity::count(&self.cassandra_provider).await
    }
}
