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

//! Cassandra query result mapping.

use cdrs_tokio::frame::message_response::ResponseBody;
use cdrs_tokio::types::IntoRustByIndex;

/// Cassandra query result mapper.
pub struct CassandraResultMapper {}

impl CassandraResultMapper {
    /// Map rows into entities.
    pub fn into_entities<T: cdrs_tokio::frame::TryFromRow>(response_body: ResponseBody) -> Vec<T> {
        response_body
            .into_rows()
            .unwrap_or_default()
            .into_iter()
            .filter_map(|row| {
                T::try_from_row(row)
                    .map_err(|e| {
                        log::debug!("try_from_row: {e}");
                    })
                    .ok()
            })
            .collect()
    }

    /// Map the first row into an entity.
    pub fn into_entity<T: cdrs_tokio::frame::TryFromRow>(response_body: ResponseBody) -> Option<T> {
        Self::into_entities(response_body).into_iter().next()
    }

    /// Map the first column of the first row from a `COUNT(*)` query.
    pub fn into_count(response_body: ResponseBody) -> u64 {
        response_body
            .into_rows()
            .unwrap_or_default()
            .first()
            .and_then(|row| {
                row.get_by_index(0)
                    .map_err(|e| {
                        log::debug!("get_by_index(0): {e}");
                    })
                    .ok()
                    .and_then(|column_opt: Option<i64>| column_opt)
            })
            .and_then(|count| u64::try_from(count).ok())
            .unwrap_or_default()
    }
}
