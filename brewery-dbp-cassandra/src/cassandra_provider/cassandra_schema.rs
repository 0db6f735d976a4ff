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

//! Cassandra database schema operations.

use super::cassandra_session::CassandraSession;
use brewery_dbp::catalog::CatalogError;
use cdrs_tokio::frame::message_response::ResponseBody;

/// Cassandra database schema operations.
pub struct CassandraSchema {}

impl CassandraSchema {
    const KEYSPACE_SYSTEM_SCHEMA: &'static str = "system_schema";

    const CQL_TEMPLATE_CREATE_KEYSPACE: &'static str = "
        CREATE KEYSPACE IF NOT EXISTS {{ keyspace }}
        WITH REPLICATION = {
            'class' : 'SimpleStrategy',
            'replication_factor' : {{ replication_factor }}
        };
        ";

    /// Create keyspace.
    pub async fn create_keyspace(
        cs: &CassandraSession,
        keyspace_name: &str,
        replication_factor: usize,
    ) -> Result<(), CatalogError> {
        let replication_factor = std::cmp::max(1, replication_factor);
        if replication_factor < 3 {
            log::warn!(
                "Creating keyspace '{keyspace_name}' with a replication_factor of {replication_factor}. This will not change if you add additional nodes."
            );
        }
        cs.query_raw(
            &Self::CQL_TEMPLATE_CREATE_KEYSPACE.replacen(
                "{{ replication_factor }}",
                &replication_factor.to_string(),
                1,
            ),
            keyspace_name,
        )
        .await
        .map(|_| ())
    }

    const CQL_TEMPLATE_SELECT_KEYSPACE: &'static str = "
        SELECT keyspace_name FROM keyspaces
        WHERE keyspace_name = ?
        ;";

    /// Return `true` if the keyspace exists.
    pub async fn keyspace_exists(
        cs: &CassandraSession,
        keyspace: &str,
    ) -> Result<bool, CatalogError> {
        cs.query_with_keyspace_and_values(
            Self::CQL_TEMPLATE_SELECT_KEYSPACE,
            Self::KEYSPACE_SYSTEM_SCHEMA,
            cdrs_tokio::query_values!(keyspace),
        )
        .await
        .map(|response_body| {
            ResponseBody::into_rows(response_body).is_some_and(|rows| !rows.is_empty())
        })
    }

    const CQL_TEMPLATE_SELECT_TABLE_NAME: &'static str = "
        SELECT table_name FROM tables
        WHERE keyspace_name = ? AND table_name = ?
        ;";

    /// Return `true` if the table exists in the keyspace.
    pub async fn keyspace_table_exists(
        cs: &CassandraSession,
        keyspace: &str,
        table_name: &str,
    ) -> Result<bool, CatalogError> {
        cs.query_with_keyspace_and_values(
            Self::CQL_TEMPLATE_SELECT_TABLE_NAME,
            Self::KEYSPACE_SYSTEM_SCHEMA,
            cdrs_tokio::query_values!(keyspace, table_name.to_owned()),
        )
        .await
        .map(|response_body| {
            ResponseBody::into_rows(response_body).is_some_and(|rows| !rows.is_empty())
        })
    }
}
