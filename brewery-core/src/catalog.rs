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

//! Brewery catalog lifecycle management.

mod access_control;
mod catalog_views;

pub use self::access_control::AccessControl;
pub use self::catalog_views::*;
use crate::conf::AppConfig;
use crate::identity::ClientIdentity;
pub use brewery_dbp::catalog::Beer;
pub use brewery_dbp::catalog::BeerFields;
pub use brewery_dbp::catalog::Brewery;
pub use brewery_dbp::catalog::BreweryFields;
pub use brewery_dbp::catalog::CatalogError;
pub use brewery_dbp::catalog::CatalogErrorKind;
use brewery_dbp::dbp::DatabaseProvider;
use brewery_dbp::dbp::facades::DatabaseProviderFacades;
use brewery_dbp_cassandra::CassandraProvider;
use brewery_dbp_mem::InMemoryDatabaseProvider;
use std::collections::HashSet;
use std::sync::Arc;
use std::sync::atomic::AtomicBool;
use std::sync::atomic::Ordering;

/** Brewery catalog.

Manages create, read, update, delete and list of breweries and beer as well as
the association of beer with breweries.

Mutation of a brewery is restricted to its owner. Beer is not owned by anyone.
*/
pub struct Catalog {
    /// Thread safe boolean used to indicate application readyness.
    health_ready: AtomicBool,
    /// The database provider
    dbp: Arc<DatabaseProvider>,
    /// Absolute URL prefix of resource locators.
    base_url: String,
}

impl Catalog {
    /// Number of breweries or beer per page of a listing.
    pub const PAGE_SIZE: usize = 5;
    /// Number of beer per page when listing the beer of a brewery.
    pub const PAGE_SIZE_BEER_IN_BREWERY: usize = 3;
    /// Number of breweries per request when scanning for assigned beer.
    const PAGE_SIZE_SCAN: usize = 64;

    /// Return a new instance backed by the configured database provider.
    pub async fn from_config(app_config: &Arc<AppConfig>) -> Result<Arc<Self>, CatalogError> {
        let dbp = match app_config.backend.implementation() {
            "cassandra" => {
                let cassandra_provider = CassandraProvider::new(
                    app_config.backend.keyspace(),
                    &app_config.backend.endpoints(),
                    app_config.backend.username(),
                    app_config.backend.password(),
                    app_config.backend.replication_factor(),
                )
                .await?;
                cassandra_provider.as_database_provider()
            }
            "mem" => InMemoryDatabaseProvider::new().await.as_database_provider(),
            unknown_provider => Err(CatalogErrorKind::Unspecified.error_with_msg(format!(
                "Unknown database provider type '{unknown_provider}'."
            )))?,
        };
        Ok(Self::new(dbp, app_config.api.base_url()))
    }

    /// Return a new instance using the provided store.
    pub fn new(dbp: DatabaseProvider, base_url: &str) -> Arc<Self> {
        Arc::new(Self {
            health_ready: AtomicBool::new(false),
            dbp: Arc::new(dbp),
            base_url: base_url.trim_end_matches('/').to_owned(),
        })
        .init()
    }

    fn init(self: Arc<Self>) -> Arc<Self> {
        self.health_ready.store(true, Ordering::Relaxed);
        self
    }

    /// Return `true` when the catalog has started.
    pub fn is_health_started(&self) -> bool {
        true
    }

    /// Return `true` when the catalog is ready to serve requests.
    pub fn is_health_ready(&self) -> bool {
        self.health_ready.load(Ordering::Relaxed)
    }

    /// Return `true` when the catalog is alive.
    pub fn is_health_live(&self) -> bool {
        true
    }

    /// Return the absolute locator of a brewery.
    pub fn brewery_url(&self, brewery_id: &str) -> String {
        format!("{}/breweries/{brewery_id}", self.base_url)
    }

    /// Return the absolute locator of a beer.
    pub fn beer_url(&self, beer_id: &str) -> String {
        format!("{}/beer/{beer_id}", self.base_url)
    }

    fn brewery_view(&self, brewery: Brewery) -> BreweryView {
        let self_url = self.brewery_url(brewery.get_id());
        BreweryView::new(brewery, self_url, |beer_id| self.beer_url(beer_id))
    }

    fn beer_view(&self, beer: Beer) -> BeerView {
        let self_url = self.beer_url(beer.get_id());
        BeerView::new(beer, self_url)
    }

    /// Load a brewery or error out with [CatalogErrorKind::NotFound].
    async fn brewery_required(&self, brewery_id: &str) -> Result<Brewery, CatalogError> {
        self.dbp
            .brewery_facade()
            .brewery_by_id(brewery_id)
            .await?
            .ok_or_else(|| {
                CatalogErrorKind::NotFound
                    .error_with_msg(format!("No brewery with id '{brewery_id}'."))
            })
    }

    /// Load a beer or error out with [CatalogErrorKind::NotFound].
    async fn beer_required(&self, beer_id: &str) -> Result<Beer, CatalogError> {
        self.dbp
            .beer_facade()
            .beer_by_id(beer_id)
            .await?
            .ok_or_else(|| {
                CatalogErrorKind::NotFound.error_with_msg(format!("No beer with id '{beer_id}'."))
            })
    }

    /// List a page of breweries starting after `cursor`.
    pub async fn breweries_list(
        &self,
        cursor: Option<&str>,
    ) -> Result<Listing<BreweryView>, CatalogError> {
        let facade = self.dbp.brewery_facade();
        let (breweries, next_cursor) = facade
            .breweries_page(cursor, Self::PAGE_SIZE)
            .await?
            .into_parts();
        let total_count = facade.brewery_count().await?;
        let items = breweries
            .into_iter()
            .map(|brewery| self.brewery_view(brewery))
            .collect();
        Ok(Listing::new(items, next_cursor, total_count))
    }

    /// Get a brewery. Absent breweries yields `None`.
    pub async fn brewery_by_id(&self, brewery_id: &str) -> Result<Option<BreweryView>, CatalogError> {
        Ok(self
            .dbp
            .brewery_facade()
            .brewery_by_id(brewery_id)
            .await?
            .map(|brewery| self.brewery_view(brewery)))
    }

    /// Create a new brewery owned by the caller and return its identifier.
    pub async fn brewery_create(
        &self,
        identity: &ClientIdentity,
        fields: BreweryFields,
    ) -> Result<String, CatalogError> {
        let brewery_id = self
            .dbp
            .brewery_facade()
            .brewery_insert(fields, identity.username(), Vec::new())
            .await?;
        if log::log_enabled!(log::Level::Debug) {
            log::debug!("'{identity}' created brewery '{brewery_id}'.");
        }
        Ok(brewery_id)
    }

    /// Overwrite all fields and the embedded beer of a brewery owned by the
    /// caller.
    ///
    /// `beer` selects which beer is embedded and in what order. See
    /// [Self::embeddable_beer] for how the snapshots are resolved.
    pub async fn brewery_replace(
        &self,
        identity: &ClientIdentity,
        brewery_id: &str,
        fields: BreweryFields,
        beer: Vec<Beer>,
    ) -> Result<(), CatalogError> {
        let mut brewery = self.brewery_required(brewery_id).await?;
        AccessControl::assert_owner(&brewery, identity)?;
        let beer = self.embeddable_beer(&brewery, beer).await?;
        brewery.replace(fields, beer);
        self.dbp.brewery_facade().brewery_save(&brewery).await
    }

    /// Resolve the requested embedded beer of a brewery.
    ///
    /// Beer already embedded in the brewery keeps its snapshot. Any other beer
    /// must exist and must not be embedded in another brewery, and is embedded
    /// as currently stored. A beer may only be listed once.
    async fn embeddable_beer(
        &self,
        brewery: &Brewery,
        requested: Vec<Beer>,
    ) -> Result<Vec<Beer>, CatalogError> {
        let mut listed = HashSet::with_capacity(requested.len());
        let mut added = Vec::new();
        let mut resolved = Vec::with_capacity(requested.len());
        for beer in &requested {
            let beer_id = beer.get_id();
            if !listed.insert(beer_id) {
                Err(CatalogErrorKind::BeerAlreadyAssigned
                    .error_with_msg(format!("Beer '{beer_id}' is listed more than once.")))?;
            }
            match brewery.position_of_beer(beer_id) {
                Some(index) => resolved.push(brewery.get_beer()[index].clone()),
                None => {
                    resolved.push(self.beer_required(beer_id).await?);
                    added.push(beer_id);
                }
            }
        }
        if let Some(beer_id) = self
            .first_assigned_beer(&added, Some(brewery.get_id()))
            .await?
        {
            Err(CatalogErrorKind::BeerAlreadyAssigned
                .error_with_msg(format!("Beer '{beer_id}' already belongs to a brewery.")))?;
        }
        Ok(resolved)
    }

    /// Delete a brewery owned by the caller.
    ///
    /// Embedded beer is not affected.
    pub async fn brewery_delete(
        &self,
        identity: &ClientIdentity,
        brewery_id: &str,
    ) -> Result<(), CatalogError> {
        let brewery = self.brewery_required(brewery_id).await?;
        AccessControl::assert_owner(&brewery, identity)?;
        self.dbp.brewery_facade().brewery_delete(brewery_id).await
    }

    /// Delete a brewery without any ownership check.
    pub async fn brewery_delete_unchecked(&self, brewery_id: &str) -> Result<(), CatalogError> {
        log::info!("Deleting brewery '{brewery_id}' without authentication.");
        self.dbp.brewery_facade().brewery_delete(brewery_id).await
    }

    /// Return the first of `beer_ids` that is embedded in any brewery except
    /// `ignored_brewery_id`.
    ///
    /// This is a scan of the full brewery collection.
    async fn first_assigned_beer(
        &self,
        beer_ids: &[&str],
        ignored_brewery_id: Option<&str>,
    ) -> Result<Option<String>, CatalogError> {
        if beer_ids.is_empty() {
            return Ok(None);
        }
        let facade = self.dbp.brewery_facade();
        let mut cursor: Option<String> = None;
        loop {
            let (breweries, next_cursor) = facade
                .breweries_page(cursor.as_deref(), Self::PAGE_SIZE_SCAN)
                .await?
                .into_parts();
            let assigned = breweries
                .iter()
                .filter(|brewery| Some(brewery.get_id()) != ignored_brewery_id)
                .find_map(|brewery| {
                    beer_ids
                        .iter()
                        .find(|beer_id| brewery.contains_beer(beer_id))
                });
            if let Some(beer_id) = assigned {
                return Ok(Some(beer_id.to_string()));
            }
            if next_cursor.is_none() {
                return Ok(None);
            }
            cursor = next_cursor;
        }
    }

    /// Embed a snapshot of the beer in a brewery owned by the caller.
    ///
    /// A beer can only be assigned to a single brewery.
    pub async fn beer_associate(
        &self,
        identity: &ClientIdentity,
        brewery_id: &str,
        beer_id: &str,
    ) -> Result<(), CatalogError> {
        let mut brewery = self.brewery_required(brewery_id).await?;
        AccessControl::assert_owner(&brewery, identity)?;
        if self.first_assigned_beer(&[beer_id], None).await?.is_some() {
            Err(CatalogErrorKind::BeerAlreadyAssigned
                .error_with_msg("Beer already belongs to a brewery."))?;
        }
        let beer = self.beer_required(beer_id).await?;
        brewery.push_beer(beer);
        self.dbp.brewery_facade().brewery_save(&brewery).await
    }

    /// Remove the beer from a brewery owned by the caller.
    ///
    /// Any beer embedded after the removed one is dropped as well.
    pub async fn beer_disassociate(
        &self,
        identity: &ClientIdentity,
        brewery_id: &str,
        beer_id: &str,
    ) -> Result<(), CatalogError> {
        let mut brewery = self.brewery_required(brewery_id).await?;
        AccessControl::assert_owner(&brewery, identity)?;
        let index = brewery.position_of_beer(beer_id).ok_or_else(|| {
            CatalogErrorKind::BeerNotAssigned.error_with_msg("Beer not in this brewery.")
        })?;
        brewery.truncate_beer(index);
        self.dbp.brewery_facade().brewery_save(&brewery).await
    }

    /// List a page of the beer embedded in a brewery.
    ///
    /// The cursor is the position in the embedded list where the page starts.
    /// A position past the end of the list yields an empty page.
    pub async fn beer_in_brewery_list(
        &self,
        brewery_id: &str,
        cursor: Option<&str>,
    ) -> Result<Listing<BeerView>, CatalogError> {
        let brewery = self.brewery_required(brewery_id).await?;
        let embedded = brewery.get_beer();
        let start = match cursor {
            None => 0,
            Some(cursor) => cursor.parse::<usize>().map_err(|_| {
                CatalogErrorKind::MalformedIdentifier
                    .error_with_msg(format!("Invalid cursor '{cursor}'."))
            })?,
        }
        .min(embedded.len());
        let end = std::cmp::min(start + Self::PAGE_SIZE_BEER_IN_BREWERY, embedded.len());
        let items = embedded[start..end]
            .iter()
            .map(|beer| self.beer_view(beer.clone()))
            .collect::<Vec<_>>();
        let next_cursor = (end < embedded.len()).then(|| end.to_string());
        let total_count = u64::try_from(embedded.len()).unwrap_or(u64::MAX);
        Ok(Listing::new(items, next_cursor, total_count))
    }

    /// List a page of beer starting after `cursor`.
    pub async fn beer_list(&self, cursor: Option<&str>) -> Result<Listing<BeerView>, CatalogError> {
        let facade = self.dbp.beer_facade();
        let (beer, next_cursor) = facade.beer_page(cursor, Self::PAGE_SIZE).await?.into_parts();
        let total_count = facade.beer_count().await?;
        let items = beer.into_iter().map(|beer| self.beer_view(beer)).collect();
        Ok(Listing::new(items, next_cursor, total_count))
    }

    /// Get a beer. Absent beer yields `None`.
    pub async fn beer_by_id(&self, beer_id: &str) -> Result<Option<BeerView>, CatalogError> {
        Ok(self
            .dbp
            .beer_facade()
            .beer_by_id(beer_id)
            .await?
            .map(|beer| self.beer_view(beer)))
    }

    /// Create a new beer and return its identifier.
    pub async fn beer_create(&self, fields: BeerFields) -> Result<String, CatalogError> {
        self.dbp.beer_facade().beer_insert(fields).await
    }

    /// Overwrite all fields of a beer.
    ///
    /// Snapshots already embedded in breweries are left as they are.
    pub async fn beer_replace(&self, beer_id: &str, fields: BeerFields) -> Result<(), CatalogError> {
        let beer = self.beer_required(beer_id).await?;
        self.dbp
            .beer_facade()
            .beer_save(&Beer::new(beer.get_id(), fields))
            .await
    }

    /// Delete a beer.
    ///
    /// Snapshots already embedded in breweries are left as they are.
    pub async fn beer_delete(&self, beer_id: &str) -> Result<(), CatalogError> {
        self.beer_required(beer_id).await?;
        self.dbp.beer_facade().beer_delete(beer_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn init_logger() {
        let _ = env_logger::builder()
            .is_test(true)
            .filter_level(log::LevelFilter::Debug)
            .try_init();
    }

    async fn new_catalog() -> Arc<Catalog> {
        init_logger();
        let dbp = InMemoryDatabaseProvider::new().await.as_database_provider();
        Catalog::new(dbp, "http://localhost:8080/")
    }

    fn identity(username: &str) -> ClientIdentity {
        ClientIdentity::from_bearer_token_claims(
            serde_json::from_value(json!({"sub": format!("auth0|{username}"), "name": username}))
                .unwrap(),
            "name",
        )
        .unwrap()
    }

    fn brewery_fields(name: &str) -> BreweryFields {
        BreweryFields {
            name: name.to_string(),
            year_founded: 2007,
            location: "Ellon".to_string(),
        }
    }

    fn beer_fields(name: &str) -> BeerFields {
        BeerFields {
            name: name.to_string(),
            beer_type: "ale".to_string(),
            alcohol_percentage: 6.5,
        }
    }

    #[tokio::test]
    async fn test_absent_brewery_is_not_found() {
        let catalog = new_catalog().await;
        assert!(catalog.brewery_by_id("12345").await.unwrap().is_none());
        assert!(catalog.brewery_by_id("not-an-id").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_listing_visits_every_brewery_once() {
        let catalog = new_catalog().await;
        let alice = identity("alice");
        let n: usize = 13;
        let mut created = Vec::new();
        for i in 0..n {
            created.push(
                catalog
                    .brewery_create(&alice, brewery_fields(&format!("brewery {i}")))
                    .await
                    .unwrap(),
            );
        }
        let mut seen = Vec::new();
        let mut cursor: Option<String> = None;
        let mut calls = 0;
        loop {
            let listing = catalog.breweries_list(cursor.as_deref()).await.unwrap();
            calls += 1;
            assert_eq!(listing.total_count(), n as u64);
            let (items, next_cursor, _) = listing.into_parts();
            seen.extend(items.into_iter().map(|view| view.id().to_owned()));
            match next_cursor {
                Some(next_cursor) => cursor = Some(next_cursor),
                None => break,
            }
        }
        assert_eq!(calls, n.div_ceil(Catalog::PAGE_SIZE));
        assert_eq!(seen, created);
    }

    #[tokio::test]
    async fn test_owner_comes_from_identity() {
        let catalog = new_catalog().await;
        let id = catalog
            .brewery_create(&identity("alice"), brewery_fields("Brewdog"))
            .await
            .unwrap();
        let view = catalog.brewery_by_id(&id).await.unwrap().unwrap();
        assert_eq!(view.owner(), "alice");
        assert!(view.beer().is_empty());
        assert_eq!(view.self_url(), format!("http://localhost:8080/breweries/{id}"));
    }

    #[tokio::test]
    async fn test_associating_twice_is_forbidden() {
        let catalog = new_catalog().await;
        let alice = identity("alice");
        let first = catalog
            .brewery_create(&alice, brewery_fields("first"))
            .await
            .unwrap();
        let second = catalog
            .brewery_create(&alice, brewery_fields("second"))
            .await
            .unwrap();
        let beer_id = catalog.beer_create(beer_fields("IPA")).await.unwrap();
        catalog
            .beer_associate(&alice, &first, &beer_id)
            .await
            .unwrap();
        let e = catalog
            .beer_associate(&alice, &first, &beer_id)
            .await
            .unwrap_err();
        assert_eq!(e.kind(), &CatalogErrorKind::BeerAlreadyAssigned);
        let e = catalog
            .beer_associate(&alice, &second, &beer_id)
            .await
            .unwrap_err();
        assert_eq!(e.kind(), &CatalogErrorKind::BeerAlreadyAssigned);
        let view = catalog.brewery_by_id(&first).await.unwrap().unwrap();
        assert_eq!(view.beer().len(), 1);
        assert_eq!(
            view.beer()[0].self_url(),
            format!("http://localhost:8080/beer/{beer_id}")
        );
    }

    #[tokio::test]
    async fn test_duplicate_detected_beyond_first_page() {
        let catalog = new_catalog().await;
        let alice = identity("alice");
        let mut ids = Vec::new();
        for i in 0..(Catalog::PAGE_SIZE + 2) {
            ids.push(
                catalog
                    .brewery_create(&alice, brewery_fields(&format!("b{i}")))
                    .await
                    .unwrap(),
            );
        }
        let beer_id = catalog.beer_create(beer_fields("Stout")).await.unwrap();
        let last = ids.last().unwrap();
        catalog.beer_associate(&alice, last, &beer_id).await.unwrap();
        let e = catalog
            .beer_associate(&alice, &ids[0], &beer_id)
            .await
            .unwrap_err();
        assert_eq!(e.kind(), &CatalogErrorKind::BeerAlreadyAssigned);
    }

    #[tokio::test]
    async fn test_non_owner_is_forbidden_and_nothing_changes() {
        let catalog = new_catalog().await;
        let alice = identity("alice");
        let bob = identity("bob");
        let id = catalog
            .brewery_create(&alice, brewery_fields("Alice's"))
            .await
            .unwrap();
        let beer_id = catalog.beer_create(beer_fields("Pils")).await.unwrap();
        catalog.beer_associate(&alice, &id, &beer_id).await.unwrap();
        let other_beer_id = catalog.beer_create(beer_fields("Bock")).await.unwrap();
        let before = serde_json::to_value(catalog.brewery_by_id(&id).await.unwrap()).unwrap();

        let e = catalog
            .brewery_replace(&bob, &id, brewery_fields("Bob's"), vec![])
            .await
            .unwrap_err();
        assert_eq!(e.kind(), &CatalogErrorKind::Forbidden);
        let e = catalog.brewery_delete(&bob, &id).await.unwrap_err();
        assert_eq!(e.kind(), &CatalogErrorKind::Forbidden);
        let e = catalog
            .beer_associate(&bob, &id, &other_beer_id)
            .await
            .unwrap_err();
        assert_eq!(e.kind(), &CatalogErrorKind::Forbidden);
        let e = catalog
            .beer_disassociate(&bob, &id, &beer_id)
            .await
            .unwrap_err();
        assert_eq!(e.kind(), &CatalogErrorKind::Forbidden);

        let after = serde_json::to_value(catalog.brewery_by_id(&id).await.unwrap()).unwrap();
        assert_eq!(before, after);
    }

    #[tokio::test]
    async fn test_disassociate_truncates_trailing_beer() {
        let catalog = new_catalog().await;
        let alice = identity("alice");
        let id = catalog
            .brewery_create(&alice, brewery_fields("Omnipollo"))
            .await
            .unwrap();
        let a = catalog.beer_create(beer_fields("A")).await.unwrap();
        let b = catalog.beer_create(beer_fields("B")).await.unwrap();
        let c = catalog.beer_create(beer_fields("C")).await.unwrap();
        for beer_id in [&a, &b, &c] {
            catalog.beer_associate(&alice, &id, beer_id).await.unwrap();
        }
        catalog.beer_disassociate(&alice, &id, &b).await.unwrap();
        let view = catalog.brewery_by_id(&id).await.unwrap().unwrap();
        let remaining = view
            .beer()
            .iter()
            .map(|beer| beer.beer().get_id().to_owned())
            .collect::<Vec<_>>();
        assert_eq!(remaining, vec![a]);
        let e = catalog
            .beer_disassociate(&alice, &id, &c)
            .await
            .unwrap_err();
        assert_eq!(e.kind(), &CatalogErrorKind::BeerNotAssigned);
    }

    #[tokio::test]
    async fn test_beer_round_trip() {
        let catalog = new_catalog().await;
        let beer_id = catalog.beer_create(beer_fields("IPA")).await.unwrap();
        let view = catalog.beer_by_id(&beer_id).await.unwrap().unwrap();
        assert_eq!(view.beer().get_name(), "IPA");
        assert_eq!(view.beer().get_beer_type(), "ale");
        assert_eq!(view.beer().get_alcohol_percentage(), 6.5);
        assert!(view.self_url().ends_with(&format!("/beer/{beer_id}")));
    }

    #[tokio::test]
    async fn test_beer_edits_do_not_reach_embedded_snapshots() {
        let catalog = new_catalog().await;
        let alice = identity("alice");
        let id = catalog
            .brewery_create(&alice, brewery_fields("Mikkeller"))
            .await
            .unwrap();
        let beer_id = catalog.beer_create(beer_fields("Original")).await.unwrap();
        catalog.beer_associate(&alice, &id, &beer_id).await.unwrap();
        catalog
            .beer_replace(&beer_id, beer_fields("Renamed"))
            .await
            .unwrap();
        catalog.beer_delete(&beer_id).await.unwrap();
        assert!(catalog.beer_by_id(&beer_id).await.unwrap().is_none());
        let view = catalog.brewery_by_id(&id).await.unwrap().unwrap();
        assert_eq!(view.beer()[0].beer().get_name(), "Original");
    }

    #[tokio::test]
    async fn test_beer_in_brewery_pages_of_three() {
        let catalog = new_catalog().await;
        let alice = identity("alice");
        let id = catalog
            .brewery_create(&alice, brewery_fields("Dugges"))
            .await
            .unwrap();
        let mut beer_ids = Vec::new();
        for i in 0..4 {
            let beer_id = catalog
                .beer_create(beer_fields(&format!("beer {i}")))
                .await
                .unwrap();
            catalog.beer_associate(&alice, &id, &beer_id).await.unwrap();
            beer_ids.push(beer_id);
        }
        let first = catalog.beer_in_brewery_list(&id, None).await.unwrap();
        assert_eq!(first.items().len(), 3);
        assert_eq!(first.total_count(), 4);
        assert_eq!(first.next_cursor(), Some("3"));
        let second = catalog
            .beer_in_brewery_list(&id, first.next_cursor())
            .await
            .unwrap();
        assert_eq!(second.items().len(), 1);
        assert!(second.next_cursor().is_none());
        let e = catalog
            .beer_in_brewery_list(&id, Some("nope"))
            .await
            .unwrap_err();
        assert_eq!(e.kind(), &CatalogErrorKind::MalformedIdentifier);
    }

    #[tokio::test]
    async fn test_beer_in_brewery_paging_ends_with_repeated_beer() {
        let catalog = new_catalog().await;
        let names = ["a", "b", "x", "c", "d", "x", "e"];
        let embedded = names
            .iter()
            .map(|name| Beer::new(name, beer_fields(name)))
            .collect::<Vec<_>>();
        let id = catalog
            .dbp
            .brewery_facade()
            .brewery_insert(brewery_fields("Legacy"), "alice", embedded)
            .await
            .unwrap();
        let mut seen = Vec::new();
        let mut cursor: Option<String> = None;
        for _ in 0..names.len() {
            let (items, next_cursor, total_count) = catalog
                .beer_in_brewery_list(&id, cursor.as_deref())
                .await
                .unwrap()
                .into_parts();
            assert_eq!(total_count, names.len() as u64);
            seen.extend(items.into_iter().map(|view| view.beer().get_id().to_owned()));
            cursor = next_cursor;
            if cursor.is_none() {
                break;
            }
        }
        assert!(cursor.is_none());
        assert_eq!(seen, names);
        let (items, next_cursor, _) = catalog
            .beer_in_brewery_list(&id, Some("100"))
            .await
            .unwrap()
            .into_parts();
        assert!(items.is_empty());
        assert!(next_cursor.is_none());
    }

    #[tokio::test]
    async fn test_replace_keeps_beer_assigned_once() {
        let catalog = new_catalog().await;
        let alice = identity("alice");
        let first = catalog
            .brewery_create(&alice, brewery_fields("first"))
            .await
            .unwrap();
        let second = catalog
            .brewery_create(&alice, brewery_fields("second"))
            .await
            .unwrap();
        let taken_id = catalog.beer_create(beer_fields("Taken")).await.unwrap();
        let free_id = catalog.beer_create(beer_fields("Free")).await.unwrap();
        catalog
            .beer_associate(&alice, &first, &taken_id)
            .await
            .unwrap();
        let taken = catalog.beer_by_id(&taken_id).await.unwrap().unwrap().beer().clone();
        let free = catalog.beer_by_id(&free_id).await.unwrap().unwrap().beer().clone();

        // Beer embedded in another brewery
        let e = catalog
            .brewery_replace(&alice, &second, brewery_fields("second"), vec![taken.clone()])
            .await
            .unwrap_err();
        assert_eq!(e.kind(), &CatalogErrorKind::BeerAlreadyAssigned);
        // Same beer listed twice
        let e = catalog
            .brewery_replace(
                &alice,
                &second,
                brewery_fields("second"),
                vec![free.clone(), free.clone()],
            )
            .await
            .unwrap_err();
        assert_eq!(e.kind(), &CatalogErrorKind::BeerAlreadyAssigned);
        // Beer that does not exist
        let e = catalog
            .brewery_replace(
                &alice,
                &second,
                brewery_fields("second"),
                vec![Beer::new("999", beer_fields("Invented"))],
            )
            .await
            .unwrap_err();
        assert_eq!(e.kind(), &CatalogErrorKind::NotFound);
        let view = catalog.brewery_by_id(&second).await.unwrap().unwrap();
        assert!(view.beer().is_empty());

        // Resupplying its own beer is fine and a free beer is embedded as stored
        let forged = Beer::new(&free_id, beer_fields("Forged"));
        catalog
            .brewery_replace(&alice, &first, brewery_fields("renamed"), vec![taken, forged])
            .await
            .unwrap();
        let view = catalog.brewery_by_id(&first).await.unwrap().unwrap();
        let names = view
            .beer()
            .iter()
            .map(|beer| beer.beer().get_name().to_owned())
            .collect::<Vec<_>>();
        assert_eq!(names, vec!["Taken", "Free"]);
        assert_eq!(serde_json::to_value(&view).unwrap()["name"], "renamed");
    }

    #[tokio::test]
    async fn test_missing_targets_are_not_found() {
        let catalog = new_catalog().await;
        let alice = identity("alice");
        let id = catalog
            .brewery_create(&alice, brewery_fields("Nya Carnegie"))
            .await
            .unwrap();
        let e = catalog
            .beer_associate(&alice, &id, "999")
            .await
            .unwrap_err();
        assert_eq!(e.kind(), &CatalogErrorKind::NotFound);
        let e = catalog.brewery_delete(&alice, "999").await.unwrap_err();
        assert_eq!(e.kind(), &CatalogErrorKind::NotFound);
        let e = catalog
            .beer_replace("999", beer_fields("x"))
            .await
            .unwrap_err();
        assert_eq!(e.kind(), &CatalogErrorKind::NotFound);
    }
}
