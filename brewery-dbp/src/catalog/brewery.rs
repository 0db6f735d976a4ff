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

//! Brewery record.

use super::Beer;
use serde::Deserialize;
use serde::Serialize;

/// Mutable fields of a [Brewery] supplied by the caller.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct BreweryFields {
    /// Name of the brewery.
    pub name: String,
    /// Year the brewery was founded.
    #[serde(rename = "yearFounded")]
    pub year_founded: i64,
    /// Location of the brewery.
    pub location: String,
}

/// Brewery record.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Brewery {
    id: String,
    name: String,
    #[serde(rename = "yearFounded")]
    year_founded: i64,
    location: String,
    owner: String,
    #[serde(default)]
    beer: Vec<Beer>,
}

impl Brewery {
    /// Return a new instance.
    pub fn new(id: &str, fields: BreweryFields, owner: &str, beer: Vec<Beer>) -> Self {
        Self {
            id: id.to_owned(),
            name: fields.name,
            year_founded: fields.year_founded,
            location: fields.location,
            owner: owner.to_owned(),
            beer,
        }
    }

    /// Return the datastore assigned identifier.
    pub fn get_id(&self) -> &str {
        &self.id
    }

    /// Return the name of the brewery.
    pub fn get_name(&self) -> &str {
        &self.name
    }

    /// Return the year the brewery was founded.
    pub fn get_year_founded(&self) -> i64 {
        self.year_founded
    }

    /// Return the location of the brewery.
    pub fn get_location(&self) -> &str {
        &self.location
    }

    /// Return the identity provider username of the creator.
    pub fn get_owner(&self) -> &str {
        &self.owner
    }

    /// Return the embedded beer snapshots.
    pub fn get_beer(&self) -> &[Beer] {
        &self.beer
    }

    /// Return the index of the embedded beer with the identifier.
    pub fn position_of_beer(&self, beer_id: &str) -> Option<usize> {
        self.beer.iter().position(|beer| beer.get_id() == beer_id)
    }

    /// Return `true` if a beer with the identifier is embedded.
    pub fn contains_beer(&self, beer_id: &str) -> bool {
        self.position_of_beer(beer_id).is_some()
    }

    /// Append a beer snapshot.
    pub fn push_beer(&mut self, beer: Beer) {
        self.beer.push(beer);
    }

    /// Drop the embedded beer at `index` and every entry after it.
    pub fn truncate_beer(&mut self, index: usize) {
        self.beer.truncate(index);
    }

    /// Overwrite all caller supplied fields and the embedded beer list.
    pub fn replace(&mut self, fields: BreweryFields, beer: Vec<Beer>) {
        self.name = fields.name;
        self.year_founded = fields.year_founded;
        self.location = fields.location;
        self.beer = beer;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::BeerFields;

    fn beer(id: &str) -> Beer {
        Beer::new(
            id,
            BeerFields {
                name: format!("beer {id}"),
                beer_type: "lager".to_string(),
                alcohol_percentage: 4.7,
            },
        )
    }

    #[test]
    fn test_truncate_drops_trailing_entries() {
        let mut brewery = Brewery::new(
            "1",
            BreweryFields {
                name: "Brewdog".to_string(),
                year_founded: 2007,
                location: "Ellon".to_string(),
            },
            "alice",
            vec![beer("a"), beer("b"), beer("c")],
        );
        let index = brewery.position_of_beer("b").unwrap();
        brewery.truncate_beer(index);
        assert_eq!(brewery.get_beer(), &[beer("a")]);
        assert!(!brewery.contains_beer("c"));
    }

    #[test]
    fn test_json_field_names() {
        let brewery = Brewery::new(
            "7",
            BreweryFields {
                name: "Omnipollo".to_string(),
                year_founded: 2011,
                location: "Stockholm".to_string(),
            },
            "bob",
            vec![beer("3")],
        );
        let json = serde_json::to_value(&brewery).unwrap();
        assert_eq!(json["yearFounded"], 2011);
        assert_eq!(json["owner"], "bob");
        assert_eq!(json["beer"][0]["type"], "lager");
        assert_eq!(json["beer"][0]["alcoholPercentage"], 4.7);
    }

    #[test]
    fn test_fields_reject_unknown_and_missing() {
        let res = serde_json::from_str::<BreweryFields>(
            r#"{"name":"x","yearFounded":1,"location":"y","owner":"mallory"}"#,
        );
        assert!(res.is_err());
        let res = serde_json::from_str::<BreweryFields>(r#"{"name":"x","location":"y"}"#);
        assert!(res.is_err());
    }
}
