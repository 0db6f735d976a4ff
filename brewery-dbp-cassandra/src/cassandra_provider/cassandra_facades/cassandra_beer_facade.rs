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

//! Beer facade implementation for Cassandra.

use super::CassandraProviderFacades;
use crate::CassandraProvider;
use crate::cassandra_provider::entity;
use crate::cassandra_provider::entity::BeerEntity;
use brewery_dbp::catalog::Beer;
use brewery_dbp::catalog::BeerFields;
use brewery_dbp::catalog::CatalogError;
use brewery_dbp::catalog::Page;
use brewery_dbp::dbp::facades::BeerFacade;
use std::sync::Arc;

/// Beer facade implementation for Cassandra.
pub struct CassandraBeerFacade {
    cassandra_provider: Arc<CassandraProvider>,
}

impl CassandraBeerFacade {
    /// Return a new instance.
    pub fn new(cassandra_provider: &Arc<CassandraProvider>) -> Self {
        Self {
            cassandra_provider: Arc::clone(cassandra_provider),
        }
    }
}

#[async_trait::async_trait]
impl BeerFacade for CassandraBeerFacade {
    async fn beer_by_id(&self, beer_id: &str) -> Result<Option<Beer>, CatalogError> {
        if !entity::is_well_formed_id(beer_id) {
            return Ok(None);
        }
        Ok(BeerEntity::select_by_id(&self.cassandra_provider, beer_id)
            .await?
            .map(BeerEntity::into_beer))
    }

    async fn beer_insert(&self, fields: BeerFields) -> Result<String, CatalogError> {
        let beer_id = entity::new_id();
        BeerEntity::new(&Beer::new(&beer_id, fields))
            .upsert(&self.cassandra_provider)
            .await?;
        Ok(beer_id)
    }

    async fn beer_save(&self, beer: &Beer) -> Result<(), CatalogError> {
        BeerEntity::new(beer).upsert(&self.cassandra_provider).await
    }

    async fn beer_delete(&self, beer_id: &str) -> Result<(), CatalogError> {
        if !entity::is_well_formed_id(beer_id) {
            return Ok(());
        }
        BeerEntity::delete_by_id(&self.cassandra_provider, beer_id).await
    }

    async fn beer_page(
        &self,
        cursor: Option<&str>,
        limit: usize,
    ) -> Result<Page<Beer>, CatalogError> {
        CassandraProviderFacades::assert_cursor_well_formed(cursor)?;
        let mut entities =
            BeerEntity::select_all_from(&self.cassandra_provider, cursor, limit + 1).await?;
        let more_results = entities.len() > limit;
        entities.truncate(limit);
        let end_cursor = entities.last().map(|entity| entity.get_beer_id().to_owned());
        let items = entities.into_iter().map(BeerEntity::into_beer).collect();
        Ok(Page::new(items, end_cursor, more_results))
    }

    async fn beer_count(&self) -> Result<u64, CatalogError> {
        BeerEntity::count(&self.cassandra_provider).await
    }
}
