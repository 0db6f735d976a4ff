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

//! Pagination query parameters.

use actix_web::HttpRequest;
use serde::Deserialize;

/// Position to continue a listing from.
#[derive(Debug, Default, Deserialize)]
pub struct CursorQueryParams {
    /// Opaque cursor returned as part of the `next` link of a previous page.
    cursor: Option<String>,
}

impl CursorQueryParams {
    /// Return the cursor, if present and non-empty.
    pub fn cursor(&self) -> Option<&str> {
        self.cursor.as_deref().filter(|cursor| !cursor.is_empty())
    }

    /// Return the absolute URL of the page after `next_cursor` for the
    /// requested collection.
    ///
    /// Scheme and host are taken from the request's connection info.
    pub fn next_url(http_request: &HttpRequest, next_cursor: Option<&str>) -> Option<String> {
        next_cursor.map(|next_cursor| {
            let connection_info = http_request.connection_info();
            format!(
                "{}://{}{}?cursor={next_cursor}",
                connection_info.scheme(),
                connection_info.host(),
                http_request.path(),
            )
        })
    }
}
