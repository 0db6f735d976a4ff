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

//! Ephemeral in-memory implementation of [BreweryFacade].

use crate::InMemoryDatabaseProvider;
use brewery_dbp::catalog::Beer;
use brewery_dbp::catalog::Brewery;
use brewery_dbp::catalog::BreweryFields;
use brewery_dbp::catalog::CatalogError;
use brewery_dbp::catalog::CatalogErrorKind;
use brewery_dbp::catalog::Page;
use brewery_dbp::dbp::facades::BreweryFacade;
use std::sync::Arc;

/// Ephemeral in-memory implementation of [BreweryFacade].
pub struct InMemBreweryFacade {
    inmem_provider: Arc<InMemoryDatabaseProvider>,
}

impl InMemBreweryFacade {
    /// Return a new instance.
    pub fn new(inmem_provider: &Arc<InMemoryDatabaseProvider>) -> Self {
        Self {
            inmem_provider: Arc::clone(inmem_provider),
        }
    }
}

#[async_trait::async_trait]
impl BreweryFacade for InMemBreweryFacade {
    async fn brewery_by_id(&self, brewery_id: &str) -> Result<Option<Brewery>, CatalogError> {
        Ok(InMemoryDatabaseProvider::parse_id(brewery_id).and_then(|id| {
            self.inmem_provider
                .breweries
                .get(&id)
                .map(|entry| entry.value().clone())
        }))
    }

    async fn brewery_insert(
        &self,
        fields: BreweryFields,
        owner: &str,
        beer: Vec<Beer>,
    ) -> Result<String, CatalogError> {
        let id = self.inmem_provider.next_id();
        let brewery_id = id.to_string();
        self.inmem_provider
            .breweries
            .insert(id, Brewery::new(&brewery_id, fields, owner, beer));
        Ok(brewery_id)
    }

    async fn brewery_save(&self, brewery: &Brewery) -> Result<(), CatalogError> {
        let id = InMemoryDatabaseProvider::parse_id(brewery.get_id()).ok_or_else(|| {
            CatalogErrorKind::MalformedIdentifier
                .error_with_msg(format!("Unable to save brewery '{}'.", brewery.get_id()))
        })?;
        self.inmem_provider.breweries.insert(id, brewery.clone());
        Ok(())
    }

    async fn brewery_delete(&self, brewery_id: &str) -> Result<(), CatalogError> {
        if let Some(id) = InMemoryDatabaseProvider::parse_id(brewery_id) {
            self.inmem_provider.breweries.remove(&id);
        }
        Ok(())
    }

    async fn breweries_page(
        &self,
        cursor: Option<&str>,
        limit: usize,
    ) -> Result<Page<Brewery>, CatalogError> {
        InMemoryDatabaseProvider::page_of(&self.inmem_provider.breweries, cursor, limit)
    }

    async fn brewery_count(&self) -> Result<u64, CatalogError> {
        Ok(u64::try_from(self.inmem_provider.breweries.len()).unwrap_or(u64::MAX))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use brewery_dbp::dbp::facades::DatabaseProviderFacades;

    fn fields(name: &str) -> BreweryFields {
        BreweryFields {
            name: name.to_string(),
            year_founded: 1999,
            location: "Gothenburg".to_string(),
        }
    }

    #[tokio::test]
    async fn test_pages_cover_all_breweries_once() {
        let dbp = InMemoryDatabaseProvider::new().await.as_database_provider();
        let facade = dbp.brewery_facade();
        for i in 0..12 {
            facade
                .brewery_insert(fields(&format!("b{i}")), "alice", vec![])
                .await
                .unwrap();
        }
        assert_eq!(facade.brewery_count().await.unwrap(), 12);
        let mut cursor: Option<String> = None;
        let mut names = vec![];
        let mut pages = 0;
        loop {
            let page = facade
                .breweries_page(cursor.as_deref(), 5)
                .await
                .unwrap();
            pages += 1;
            let (items, next) = page.into_parts();
            names.extend(items.into_iter().map(|b| b.get_name().to_string()));
            if next.is_none() {
                break;
            }
            cursor = next;
        }
        assert_eq!(pages, 3);
        assert_eq!(names, (0..12).map(|i| format!("b{i}")).collect::<Vec<_>>());
    }

    #[tokio::test]
    async fn test_exact_multiple_has_no_trailing_cursor() {
        let dbp = InMemoryDatabaseProvider::new().await.as_database_provider();
        let facade = dbp.brewery_facade();
        for i in 0..5 {
            facade
                .brewery_insert(fields(&format!("b{i}")), "alice", vec![])
                .await
                .unwrap();
        }
        let (items, next_cursor) = facade.breweries_page(None, 5).await.unwrap().into_parts();
        assert_eq!(items.len(), 5);
        assert!(next_cursor.is_none());
    }

    #[tokio::test]
    async fn test_invalid_cursor_and_unknown_id() {
        let dbp = InMemoryDatabaseProvider::new().await.as_database_provider();
        let facade = dbp.brewery_facade();
        let e = facade.breweries_page(Some("garbage"), 5).await.unwrap_err();
        assert_eq!(e.kind(), &CatalogErrorKind::MalformedIdentifier);
        assert!(facade.brewery_by_id("garbage").await.unwrap().is_none());
        assert!(facade.brewery_by_id("42").await.unwrap().is_none());
        facade.brewery_delete("42").await.unwrap();
    }

    #[tokio::test]
    async fn test_save_overwrites() {
        let dbp = InMemoryDatabaseProvider::new().await.as_database_provider();
        let facade = dbp.brewery_facade();
        let id = facade
            .brewery_insert(fields("before"), "alice", vec![])
            .await
            .unwrap();
        let mut brewery = facade.brewery_by_id(&id).await.unwrap().unwrap();
        brewery.replace(fields("after"), vec![]);
        facade.brewery_save(&brewery).await.unwrap();
        let brewery = facade.brewery_by_id(&id).await.unwrap().unwrap();
        assert_eq!(brewery.get_name(), "after");
        assert_eq!(brewery.get_owner(), "alice");
    }
}
