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

//! Ephemeral in-memory implementation of [BeerFacade].

use crate::InMemoryDatabaseProvider;
use brewery_dbp::catalog::Beer;
use brewery_dbp::catalog::BeerFields;
use brewery_dbp::catalog::CatalogError;
use brewery_dbp::catalog::CatalogErrorKind;
use brewery_dbp::catalog::Page;
use brewery_dbp::dbp::facades::BeerFacade;
use std::sync::Arc;

/// Ephemeral in-memory implementation of [BeerFacade].
pub struct InMemBeerFacade {
    inmem_provider: Arc<InMemoryDatabaseProvider>,
}

impl InMemBeerFacade {
    /// Return a new instance.
    pub fn new(inmem_provider: &Arc<InMemoryDatabaseProvider>) -> Self {
        Self {
            inmem_provider: Arc::clone(inmem_provider),
        }
    }
}

#[async_trait::async_trait]
impl BeerFacade for InMemBeerFacade {
    async fn beer_by_id(&self, beer_id: &str) -> Result<Option<Beer>, CatalogError> {
        Ok(InMemoryDatabaseProvider::parse_id(beer_id).and_then(|id| {
            self.inmem_provider
                .beer
                .get(&id)
                .map(|entry| entry.value().clone())
        }))
    }

    async fn beer_insert(&self, fields: BeerFields) -> Result<String, CatalogError> {
        let id = self.inmem_provider.next_id();
        let beer_id = id.to_string();
        self.inmem_provider
            .beer
            .insert(id, Beer::new(&beer_id, fields));
        Ok(beer_id)
    }

    async fn beer_save(&self, beer: &Beer) -> Result<(), CatalogError> {
        let id = InMemoryDatabaseProvider::parse_id(beer.get_id()).ok_or_else(|| {
            CatalogErrorKind::MalformedIdentifier
                .error_with_msg(format!("Unable to save beer '{}'.", beer.get_id()))
        })?;
        self.inmem_provider.beer.insert(id, beer.clone());
        Ok(())
    }

    async fn beer_delete(&self, beer_id: &str) -> Result<(), CatalogError> {
        if let Some(id) = InMemoryDatabaseProvider::parse_id(beer_id) {
            self.inmem_provider.beer.remove(&id);
        }
        Ok(())
    }

    async fn beer_page(
        &self,
        cursor: Option<&str>,
        limit: usize,
    ) -> Result<Page<Beer>, CatalogError> {
        InMemoryDatabaseProvider::page_of(&self.inmem_provider.beer, cursor, limit)
    }

    async fn beer_count(&self) -> Result<u64, CatalogError> {
        Ok(u64::try_from(self.inmem_provider.beer.len()).unwrap_or(u64::MAX))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use brewery_dbp::dbp::facades::DatabaseProviderFacades;

    #[tokio::test]
    async fn test_insert_and_delete() {
        let dbp = InMemoryDatabaseProvider::new().await.as_database_provider();
        let facade = dbp.beer_facade();
        let id = facade
            .beer_insert(BeerFields {
                name: "Punk IPA".to_string(),
                beer_type: "ipa".to_string(),
                alcohol_percentage: 5.6,
            })
            .await
            .unwrap();
        let beer = facade.beer_by_id(&id).await.unwrap().unwrap();
        assert_eq!(beer.get_id(), id);
        assert_eq!(beer.get_beer_type(), "ipa");
        assert_eq!(facade.beer_count().await.unwrap(), 1);
        facade.beer_delete(&id).await.unwrap();
        assert!(facade.beer_by_id(&id).await.unwrap().is_none());
        assert_eq!(facade.beer_count().await.unwrap(), 0);
    }
}
