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

//! Ephemeral in-memory implementation of [DatabaseProvider].

mod inmem_facades;

use self::inmem_facades::InMemProviderFacades;
use brewery_dbp::catalog::Beer;
use brewery_dbp::catalog::Brewery;
use brewery_dbp::catalog::CatalogError;
use brewery_dbp::catalog::CatalogErrorKind;
use brewery_dbp::catalog::Page;
use brewery_dbp::dbp::DatabaseProvider;
use crossbeam_skiplist::SkipMap;
use std::ops::Bound;
use std::sync::Arc;
use std::sync::atomic::AtomicU64;
use std::sync::atomic::Ordering;

/// Ephemeral in-memory implementation of [DatabaseProvider].
pub struct InMemoryDatabaseProvider {
    breweries: SkipMap<u64, Brewery>,
    beer: SkipMap<u64, Beer>,
    sequence: AtomicU64,
}

impl InMemoryDatabaseProvider {
    /// Return a new instance.
    pub async fn new() -> Arc<Self> {
        if log::log_enabled!(log::Level::Trace) {
            log::trace!("Using in-mem db provider.");
        }
        Arc::new(Self {
            breweries: SkipMap::default(),
            beer: SkipMap::default(),
            sequence: AtomicU64::new(1),
        })
    }

    /// Get [DatabaseProvider] instance.
    pub fn as_database_provider(self: &Arc<Self>) -> DatabaseProvider {
        DatabaseProvider::new(Arc::new(InMemProviderFacades::new(self)))
    }

    /// Return the next free identifier. Shared by all kinds.
    fn next_id(&self) -> u64 {
        self.sequence.fetch_add(1, Ordering::Relaxed)
    }

    /// Parse an identifier for lookup. Anything that is not a sequence value
    /// can't exist.
    fn parse_id(id: &str) -> Option<u64> {
        id.parse::<u64>().ok()
    }

    /// Get a page of entries after the `cursor` position.
    fn page_of<T: Clone + Send + 'static>(
        map: &SkipMap<u64, T>,
        cursor: Option<&str>,
        limit: usize,
    ) -> Result<Page<T>, CatalogError> {
        let lower = match cursor {
            None => Bound::Unbounded,
            Some(cursor) => Bound::Excluded(cursor.parse::<u64>().map_err(|e| {
                CatalogErrorKind::MalformedIdentifier
                    .error_with_msg(format!("Invalid cursor '{cursor}': {e}"))
            })?),
        };
        let mut entries = map
            .range((lower, Bound::Unbounded))
            .take(limit + 1)
            .map(|entry| (*entry.key(), entry.value().clone()))
            .collect::<Vec<_>>();
        let more_results = entries.len() > limit;
        entries.truncate(limit);
        let end_cursor = entries.last().map(|(key, _)| key.to_string());
        let items = entries.into_iter().map(|(_, value)| value).collect();
        Ok(Page::new(items, end_cursor, more_results))
    }
}
