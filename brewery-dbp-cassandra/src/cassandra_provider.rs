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

//! Cassandra implementation of [DatabaseProvider].

mod cassandra_facades;
mod cassandra_result_mapper;
mod cassandra_schema;
mod cassandra_session;
mod entity;

use self::cassandra_facades::CassandraProviderFacades;
pub use self::cassandra_result_mapper::CassandraResultMapper;
use self::cassandra_schema::CassandraSchema;
use self::cassandra_session::CassandraSession;
use self::entity::*;
use brewery_dbp::catalog::CatalogError;
use brewery_dbp::dbp::DatabaseProvider;
use cdrs_tokio::frame::message_response::ResponseBody;
use cdrs_tokio::query::QueryValues;
use std::sync::Arc;
use tokio::time::{Duration, sleep};

/// Cassandra [DatabaseProvider] implementation.
pub struct CassandraProvider {
    /// Application keyspace
    app_keyspace: String,
    /// Connection to Cassandra.
    cs: Arc<CassandraSession>,
    /// Replication factor (copies of the same data)
    replication_factor: usize,
}

impl CassandraProvider {
    /// Return a new instance.
    pub async fn new(
        app_keyspace: &str,
        endpoints: &[String],
        username: &str,
        password: &str,
        replication_factor: usize,
    ) -> Result<Arc<Self>, CatalogError> {
        let cs = CassandraSession::connect(endpoints, username, password, replication_factor).await?;
        Arc::new(Self {
            app_keyspace: app_keyspace.to_owned(),
            cs,
            replication_factor,
        })
        .init()
        .await
    }

    /// Initialize
    async fn init(self: Arc<Self>) -> Result<Arc<Self>, CatalogError> {
        self.ensure_keyspace_exists(&self.app_keyspace).await?;
        self.ensure_app_tables_exists().await?;
        Ok(self)
    }

    /// Get [DatabaseProvider] instance.
    pub fn as_database_provider(self: &Arc<Self>) -> DatabaseProvider {
        DatabaseProvider::new(Arc::new(CassandraProviderFacades::new(self)))
    }

    /// Create the keyspace unless it already exists.
    async fn ensure_keyspace_exists(&self, keyspace: &str) -> Result<(), CatalogError> {
        if CassandraSchema::keyspace_exists(&self.cs, keyspace).await? {
            return Ok(());
        }
        CassandraSchema::create_keyspace(&self.cs, keyspace, self.replication_factor).await?;
        while !CassandraSchema::keyspace_exists(&self.cs, keyspace).await? {
            sleep(Duration::from_millis(100)).await;
        }
        if log::log_enabled!(log::Level::Debug) {
            log::debug!("Keyspace '{keyspace}' now exists.");
        }
        Ok(())
    }

    /// Create a new database table in the keyspace.
    pub async fn create_table(
        &self,
        keyspace: &str,
        table_name: &str,
        query_template: &str,
    ) -> Result<(), CatalogError> {
        if CassandraSchema::keyspace_table_exists(&self.cs, keyspace, table_name).await? {
            return Ok(());
        }
        self.query_with_keyspace(query_template, keyspace).await?;
        // Wait for the table to show up in the schema
        while !CassandraSchema::keyspace_table_exists(&self.cs, keyspace, table_name).await? {
            sleep(Duration::from_millis(100)).await;
        }
        if log::log_enabled!(log::Level::Debug) {
            log::debug!("Table '{table_name}' in keyspace '{keyspace}' now exists.");
        }
        Ok(())
    }

    /// Ensure that all the application level tables exist in the application's
    /// keyspace.
    ///
    /// This will create the application level tables if needed.
    async fn ensure_app_tables_exists(&self) -> Result<(), CatalogError> {
        BreweryEntity::create_table_and_indices(self).await?;
        BeerEntity::create_table_and_indices(self).await?;
        if log::log_enabled!(log::Level::Trace) {
            log::trace!("App tables exist in keyspace '{}'.", self.app_keyspace);
        }
        Ok(())
    }

    /// Execute a keyspaced query.
    async fn query_with_keyspace(
        &self,
        query_template: &str,
        keyspace: &str,
    ) -> Result<ResponseBody, CatalogError> {
        self.query_with_keyspace_and_values(query_template, keyspace, cdrs_tokio::query_values!())
            .await
    }

    /// Execute a keyspaced query with value parameters.
    async fn query_with_keyspace_and_values(
        &self,
        query_template: &str,
        keyspace: &str,
        values: QueryValues,
    ) -> Result<ResponseBody, CatalogError> {
        self.cs
            .query_with_keyspace_and_values(query_template, keyspace, values)
            .await
    }
}
