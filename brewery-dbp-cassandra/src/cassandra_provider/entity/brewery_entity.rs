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

//! Brewery entity and persistence.

use super::FromUnsignedOrDefault;
use crate::CassandraProvider;
use crate::cassandra_provider::CassandraResultMapper;
use brewery_dbp::catalog::Beer;
use brewery_dbp::catalog::Brewery;
use brewery_dbp::catalog::BreweryFields;
use brewery_dbp::catalog::CatalogError;
use brewery_dbp::catalog::CatalogErrorKind;

/// Brewery entity and persistence.
#[derive(
    Clone, Debug, cdrs_tokio::IntoCdrsValue, cdrs_tokio::TryFromRow, cdrs_tokio::TryFromUdt,
)]
pub struct BreweryEntity {
    /// Group all breweries in single partition by using a common kind.
    entity_kind: String,
    /// Time ordered identifier.
    brewery_id: String,
    name: String,
    year_founded: i64,
    location: String,
    owner: String,
    /// JSON array of embedded beer snapshots.
    beer_json: String,
    /// Time of update in epoch microseconds
    last_update_ts: i64,
}

impl BreweryEntity {
    pub(crate) const CQL_TABLE_NAME: &'static str = "brewery";

    const CQL_TEMPLATE_CREATE_TABLE: &'static str = "
        CREATE TABLE IF NOT EXISTS brewery (
            entity_kind     text,
            brewery_id      text,
            name            text,
            year_founded    bigint,
            location        text,
            owner           text,
            beer_json       text,
            last_update_ts  bigint,
            PRIMARY KEY ((entity_kind), brewery_id)
        ) WITH CLUSTERING ORDER BY (brewery_id ASC)
        ;";

    /// QB1. Unconditional upsert
    const CQL_TEMPLATE_UPSERT: &'static str = "
        INSERT INTO {{ keyspace }}.brewery
        (entity_kind, brewery_id, name, year_founded, location, owner, beer_json, last_update_ts)
        VALUES (?,?,?,?,?,?,?,?)
        ;";

    /// QB2. Get entity by id.
    const CQL_TEMPLATE_SELECT_BY_ID: &'static str = "
        SELECT entity_kind, brewery_id, name, year_founded, location, owner, beer_json, last_update_ts
        FROM {{ keyspace }}.brewery
        WHERE entity_kind = ? AND brewery_id = ?
        ;";

    /// QB3. Delete entity by id.
    const CQL_TEMPLATE_DELETE_BY_ID: &'static str = "
        DELETE FROM {{ keyspace }}.brewery
        WHERE entity_kind = ? AND brewery_id = ?
        ;";

    /// QB4. Get all entities with limit.
    const CQL_TEMPLATE_SELECT_ALL: &'static str = "
        SELECT entity_kind, brewery_id, name, year_founded, location, owner, beer_json, last_update_ts
        FROM {{ keyspace }}.brewery
        WHERE entity_kind = ?
        LIMIT {{ limit }}
        ;";

    /// QB5. Get all entities with limit and brewery_id is greater than.
    const CQL_TEMPLATE_SELECT_ALL_FROM: &'static str = "
        SELECT entity_kind, brewery_id, name, year_founded, location, owner, beer_json, last_update_ts
        FROM {{ keyspace }}.brewery
        WHERE entity_kind = ? AND brewery_id > ?
        LIMIT {{ limit }}
        ;";

    /// QB6. Count all entities.
    const CQL_TEMPLATE_COUNT: &'static str = "
        SELECT COUNT(*)
        FROM {{ keyspace }}.brewery
        WHERE entity_kind = ?
        ;";

    /// Keep all breweries in a single ordered partition.
    const ENTITY_KIND_DEFAULT: &'static str = "_brewery";

    /// Return a new instance.
    pub fn new(brewery: &Brewery) -> Result<Self, CatalogError> {
        let beer_json = serde_json::to_string(brewery.get_beer()).map_err(|e| {
            CatalogErrorKind::Unspecified
                .error_with_msg(format!("Unable to serialize embedded beer: {e}"))
        })?;
        Ok(Self {
            entity_kind: Self::ENTITY_KIND_DEFAULT.to_owned(),
            brewery_id: brewery.get_id().to_owned(),
            name: brewery.get_name().to_owned(),
            year_founded: brewery.get_year_founded(),
            location: brewery.get_location().to_owned(),
            owner: brewery.get_owner().to_owned(),
            beer_json,
            last_update_ts: i64::from_unsigned(brewery_dbp::time::get_timestamp_micros()),
        })
    }

    /// Return the identifier.
    pub fn get_brewery_id(&self) -> &str {
        &self.brewery_id
    }

    /// Convert into the catalog representation.
    pub fn into_brewery(self) -> Result<Brewery, CatalogError> {
        let beer = serde_json::from_str::<Vec<Beer>>(&self.beer_json).map_err(|e| {
            CatalogErrorKind::Unspecified.error_with_msg(format!(
                "Unable to parse embedded beer of brewery '{}': {e}",
                self.brewery_id
            ))
        })?;
        Ok(Brewery::new(
            &self.brewery_id,
            BreweryFields {
                name: self.name,
                year_founded: self.year_founded,
                location: self.location,
            },
            &self.owner,
            beer,
        ))
    }

    /// Create table and indices for this entity.
    pub async fn create_table_and_indices(db: &CassandraProvider) -> Result<(), CatalogError> {
        db.create_table(
            &db.app_keyspace,
            Self::CQL_TABLE_NAME,
            Self::CQL_TEMPLATE_CREATE_TABLE,
        )
        .await
    }

    /// Unconditional insert or overwrite
    pub async fn upsert(&self, db: &CassandraProvider) -> Result<(), CatalogError> {
        db.query_with_keyspace_and_values(
            Self::CQL_TEMPLATE_UPSERT,
            &db.app_keyspace,
            cdrs_tokio::query_values!(
                self.entity_kind.to_owned(),
                self.brewery_id.to_owned(),
                self.name.to_owned(),
                self.year_founded,
                self.location.to_owned(),
                self.owner.to_owned(),
                self.beer_json.to_owned(),
                self.last_update_ts
            ),
        )
        .await
        .map(|_| ())
    }

    /// Retrieve entity by identifier.
    pub async fn select_by_id(
        db: &CassandraProvider,
        brewery_id: &str,
    ) -> Result<Option<Self>, CatalogError> {
        let values = cdrs_tokio::query_values!(
            Self::ENTITY_KIND_DEFAULT.to_owned(),
            brewery_id.to_owned()
        );
        db.query_with_keyspace_and_values(Self::CQL_TEMPLATE_SELECT_BY_ID, &db.app_keyspace, values)
            .await
            .map(CassandraResultMapper::into_entity)
    }

    /// Delete entity by identifier.
    pub async fn delete_by_id(db: &CassandraProvider, brewery_id: &str) -> Result<(), CatalogError> {
        let values = cdrs_tokio::query_values!(
            Self::ENTITY_KIND_DEFAULT.to_owned(),
            brewery_id.to_owned()
        );
        db.query_with_keyspace_and_values(Self::CQL_TEMPLATE_DELETE_BY_ID, &db.app_keyspace, values)
            .await
            .map(|_| ())
    }

    /// Retrieve up to `max_results` entities where brewery_id is greater than
    /// the provided `from`.
    pub async fn select_all_from(
        db: &CassandraProvider,
        from: Option<&str>,
        max_results: usize,
    ) -> Result<Vec<Self>, CatalogError> {
        let (query_template, values) = if let Some(from) = from {
            (
                Self::CQL_TEMPLATE_SELECT_ALL_FROM,
                cdrs_tokio::query_values!(Self::ENTITY_KIND_DEFAULT.to_owned(), from.to_owned()),
            )
        } else {
            (
                Self::CQL_TEMPLATE_SELECT_ALL,
                cdrs_tokio::query_values!(Self::ENTITY_KIND_DEFAULT.to_owned()),
            )
        };
        db.query_with_keyspace_and_values(
            &query_template.replacen("{{ limit }}", &max_results.to_string(), 1),
            &db.app_keyspace,
            values,
        )
        .await
        .map(CassandraResultMapper::into_entities)
    }

    /// Count all entities.
    pub async fn count(db: &CassandraProvider) -> Result<u64, CatalogError> {
        let values = cdrs_tokio::query_values!(Self::ENTITY_KIND_DEFAULT.to_owned());
        db.query_with_keyspace_and_values(Self::CQL_TEMPLATE_COUNT, &db.app_keyspace, values)
            .await
            .map(CassandraResultMapper::into_count)
    }
}
