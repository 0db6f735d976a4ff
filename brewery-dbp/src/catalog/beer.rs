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

//! Beer record.

use serde::Deserialize;
use serde::Serialize;

/// Mutable fields of a [Beer].
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct BeerFields {
    /// Name of the beer.
    pub name: String,
    /// Style of the beer. E.g. "ale".
    #[serde(rename = "type")]
    pub beer_type: String,
    /// Alcohol by volume in percent.
    #[serde(rename = "alcoholPercentage")]
    pub alcohol_percentage: f64,
}

/// Beer record.
///
/// A copy of this record is embedded in a [crate::catalog::Brewery] when the
/// beer is assigned to it. Later changes to the record are not propagated to
/// such copies.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Beer {
    id: String,
    name: String,
    #[serde(rename = "type")]
    beer_type: String,
    #[serde(rename = "alcoholPercentage")]
    alcohol_percentage: f64,
}

impl Beer {
    /// Return a new instance.
    pub fn new(id: &str, fields: BeerFields) -> Self {
        Self {
            id: id.to_owned(),
            name: fields.name,
            beer_type: fields.beer_type,
            alcohol_percentage: fields.alcohol_percentage,
        }
    }

    /// Return the datastore assigned identifier.
    pub fn get_id(&self) -> &str {
        &self.id
    }

    /// Return the name of the beer.
    pub fn get_name(&self) -> &str {
        &self.name
    }

    /// Return the style of the beer.
    pub fn get_beer_type(&self) -> &str {
        &self.beer_type
    }

    /// Return alcohol by volume in percent.
    pub fn get_alcohol_percentage(&self) -> f64 {
        self.alcohol_percentage
    }
}
