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

//! Beer entity and persistence.

use super::FromUnsignedOrDefault;
use crate::CassandraProvider;
use crate::cassandra_provider::CassandraResultMapper;
use brewery_dbp::catalog::Beer;
use brewery_dbp::catalog::BeerFields;
use brewery_dbp::catalog::CatalogError;

/// Beer entity and persistence.
#[derive(
    Clone, Debug, cdrs_tokio::IntoCdrsValue, cdrs_tokio::TryFromRow, cdrs_tokio::TryFromUdt,
)]
pub struct BeerEntity {
    /// Group all beer in single partition by using a common kind.
    entity_kind: String,
    /// Time ordered identifier.
    beer_id: String,
    name: String,
    beer_type: String,
    alcohol_percentage: f64,
    /// Time of update in epoch microseconds
    last_update_ts: i64,
}

impl BeerEntity {
    pub(crate) const CQL_TABLE_NAME: &'static str = "beer";

    const CQL_TEMPLATE_CREATE_TABLE: &'static str = "
        CREATE TABLE IF NOT EXISTS beer (
            entity_kind         text,
            beer_id             text,
            name                text,
            beer_type           text,
            alcohol_percentage  double,
            last_update_ts      bigint,
            PRIMARY KEY ((entity_kind), beer_id)
        ) WITH CLUSTERING ORDER BY (beer_id ASC)
        ;";

    const CQL_TEMPLATE_UPSERT: &'static str = "
        INSERT INTO {{ keyspace }}.beer
        (entity_kind, beer_id, name, beer_type, alcohol_percentage, last_update_ts)
        VALUES (?,?,?,?,?,?)
        ;";

    const CQL_TEMPLATE_SELECT_BY_ID: &'static str = "
        SELECT entity_kind, beer_id, name, beer_type, alcohol_percentage, last_update_ts
        FROM {{ keyspace }}.beer
        WHERE entity_kind = ? AND beer_id = ?
        ;";

    const CQL_TEMPLATE_DELETE_BY_ID: &'static str = "
        DELETE FROM {{ keyspace }}.beer
        WHERE entity_kind = ? AND beer_id = ?
        ;";

    const CQL_TEMPLATE_SELECT_ALL: &'static str = "
        SELECT entity_kind, beer_id, name, beer_type, alcohol_percentage, last_update_ts
        FROM {{ keyspace }}.beer
        WHERE entity_kind = ?
        LIMIT {{ limit }}
        ;";

    const CQL_TEMPLATE_SELECT_ALL_FROM: &'static str = "
        SELECT entity_kind, beer_id, name, beer_type, alcohol_percentage, last_update_ts
        FROM {{ keyspace }}.beer
        WHERE entity_kind = ? AND beer_id > ?
        LIMIT {{ limit }}
        ;";

    const CQL_TEMPLATE_COUNT: &'static str = "
        SELECT COUNT(*)
        FROM {{ keyspace }}.beer
        WHERE entity_kind = ?
        ;";

    const ENTITY_KIND_DEFAULT: &'static str = "_beer";

    /// Return a new instance.
    pub fn new(beer: &Beer) -> Self {
        Self {
            entity_kind: Self::ENTITY_KIND_DEFAULT.to_owned(),
            beer_id: beer.get_id().to_owned(),
            name: beer.get_name().to_owned(),
            beer_type: beer.get_beer_type().to_owned(),
            alcohol_percentage: beer.get_alcohol_percentage(),
            last_update_ts: i64::from_unsigned(brewery_dbp::time::get_timestamp_micros()),
        }
    }

    /// Return the identifier.
    pub fn get_beer_id(&self) -> &str {
        &self.beer_id
    }

    /// Convert into the catalog representation.
    pub fn into_beer(self) -> Beer {
        Beer::new(
            &self.beer_id,
            BeerFields {
                name: self.name,
                beer_type: self.beer_type,
                alcohol_percentage: self.alcohol_percentage,
            },
        )
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
                self.beer_id.to_owned(),
                self.name.to_owned(),
                self.beer_type.to_owned(),
                self.alcohol_percentage,
                self.last_update_ts
            ),
        )
        .await
        .map(|_| ())
    }

    /// Retrieve entity by identifier.
    pub async fn select_by_id(
        db: &CassandraProvider,
        beer_id: &str,
    ) -> Result<Option<Self>, CatalogError> {
        let values =
            cdrs_tokio::query_values!(Self::ENTITY_KIND_DEFAULT.to_owned(), beer_id.to_owned());
        db.query_with_keyspace_and_values(Self::CQL_TEMPLATE_SELECT_BY_ID, &db.app_keyspace, values)
            .await
            .map(CassandraResultMapper::into_entity)
    }

    /// Delete entity by identifier.
    pub async fn delete_by_id(db: &CassandraProvider, beer_id: &str) -> Result<(), CatalogError> {
        let values =
            cdrs_tokio::query_values!(Self::ENTITY_KIND_DEFAULT.to_owned(), beer_id.to_owned());
        db.query_with_keyspace_and_values(Self::CQL_TEMPLATE_DELETE_BY_ID, &db.app_keyspace, values)
            .await
            .map(|_| ())
    }

    /// Retrieve up to `max_results` entities where beer_id is greater than the
    /// provided `from`.
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
