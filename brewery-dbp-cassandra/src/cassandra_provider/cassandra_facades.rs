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

//! Cassandra specific database code

mod cassandra_beer_facade;
mod cassandra_brewery_facade;

pub use self::cassandra_beer_facade::*;
pub use self::cassandra_brewery_facade::*;
use crate::CassandraProvider;
use brewery_dbp::catalog::CatalogError;
use brewery_dbp::catalog::CatalogErrorKind;
use brewery_dbp::dbp::facades::*;
use std::sync::Arc;

pub struct CassandraProviderFacades {
    beer_facade: CassandraBeerFacade,
    brewery_facade: CassandraBreweryFacade,
}

impl CassandraProviderFacades {
    pub fn new(cassandra_provider: &Arc<CassandraProvider>) -> Self {
        Self {
            beer_facade: CassandraBeerFacade::new(cassandra_provider),
            brewery_facade: CassandraBreweryFacade::new(cassandra_provider),
        }
    }

    /// Reject cursors that could never have been handed out.
    fn assert_cursor_well_formed(cursor: Option<&str>) -> Result<(), CatalogError> {
        match cursor {
            Some(cursor) if !super::entity::is_well_formed_id(cursor) => Err(
                CatalogErrorKind::MalformedIdentifier
                    .error_with_msg(format!("Invalid cursor '{cursor}'.")),
            ),
            _ => Ok(()),
        }
    }
}

impl DatabaseProviderFacades for CassandraProviderFacades {
    fn beer_facade(&self) -> &dyn BeerFacade {
        &self.beer_facade
    }

    fn brewery_facade(&self) -> &dyn BreweryFacade {
        &self.brewery_facade
    }
}
