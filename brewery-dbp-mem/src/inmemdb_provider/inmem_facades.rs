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

//! Ephemeral in-memory specific database code.

mod inmem_beer_facade;
mod inmem_brewery_facade;

pub use self::inmem_beer_facade::*;
pub use self::inmem_brewery_facade::*;
use super::InMemoryDatabaseProvider;
use brewery_dbp::dbp::facades::*;
use std::sync::Arc;

/// Ephemeral in-memory specific database code.
pub struct InMemProviderFacades {
    beer_facade: InMemBeerFacade,
    brewery_facade: InMemBreweryFacade,
}

impl InMemProviderFacades {
    /// Return a new instance.
    pub fn new(inmem_provider: &Arc<InMemoryDatabaseProvider>) -> Self {
        Self {
            beer_facade: InMemBeerFacade::new(inmem_provider),
            brewery_facade: InMemBreweryFacade::new(inmem_provider),
        }
    }
}

impl DatabaseProviderFacades for InMemProviderFacades {
    fn beer_facade(&self) -> &dyn BeerFacade {
        &self.beer_facade
    }

    fn brewery_facade(&self) -> &dyn BreweryFacade {
        &self.brewery_facade
    }
}
