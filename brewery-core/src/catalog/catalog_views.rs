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

//! Representations of catalog records returned to callers.

use brewery_dbp::catalog::Beer;
use brewery_dbp::catalog::Brewery;
use serde::Serialize;

/// A [Beer] with its canonical locator.
#[derive(Debug, Clone, Serialize)]
pub struct BeerView {
    #[serde(flatten)]
    beer: Beer,
    #[serde(rename = "self")]
    self_url: String,
}

impl BeerView {
    /// Return a new instance.
    pub fn new(beer: Beer, self_url: String) -> Self {
        Self { beer, self_url }
    }

    /// Return the record.
    pub fn beer(&self) -> &Beer {
        &self.beer
    }

    /// Return the absolute URL of the record.
    pub fn self_url(&self) -> &str {
        &self.self_url
    }
}

/// A [Brewery] with canonical locators for it and every embedded beer.
#[derive(Debug, Clone, Serialize)]
pub struct BreweryView {
    id: String,
    name: String,
    #[serde(rename = "yearFounded")]
    year_founded: i64,
    location: String,
    owner: String,
    beer: Vec<BeerView>,
    #[serde(rename = "self")]
    self_url: String,
}

impl BreweryView {
    /// Return a new instance using `beer_url` to locate embedded beer.
    pub fn new<F: Fn(&str) -> String>(brewery: Brewery, self_url: String, beer_url: F) -> Self {
        let beer = brewery
            .get_beer()
            .iter()
            .map(|beer| BeerView::new(beer.clone(), beer_url(beer.get_id())))
            .collect();
        Self {
            id: brewery.get_id().to_owned(),
            name: brewery.get_name().to_owned(),
            year_founded: brewery.get_year_founded(),
            location: brewery.get_location().to_owned(),
            owner: brewery.get_owner().to_owned(),
            beer,
            self_url,
        }
    }

    /// Return the datastore assigned identifier.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Return the owner.
    pub fn owner(&self) -> &str {
        &self.owner
    }

    /// Return the embedded beer.
    pub fn beer(&self) -> &[BeerView] {
        &self.beer
    }

    /// Return the absolute URL of the record.
    pub fn self_url(&self) -> &str {
        &self.self_url
    }
}

/// One page of a listing.
#[derive(Debug, Clone)]
pub struct Listing<T> {
    items: Vec<T>,
    next_cursor: Option<String>,
    total_count: u64,
}

impl<T> Listing<T> {
    /// Return a new instance.
    pub fn new(items: Vec<T>, next_cursor: Option<String>, total_count: u64) -> Self {
        Self {
            items,
            next_cursor,
            total_count,
        }
    }

    /// Return the items of this page.
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Return the cursor of the next page, if there is one.
    pub fn next_cursor(&self) -> Option<&str> {
        self.next_cursor.as_deref()
    }

    /// Return the number of items in the whole listing.
    pub fn total_count(&self) -> u64 {
        self.total_count
    }

    /// Split into items, next cursor and total count.
    pub fn into_parts(self) -> (Vec<T>, Option<String>, u64) {
        (self.items, self.next_cursor, self.total_count)
    }
}
