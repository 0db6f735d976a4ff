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

//! Result of a paginated datastore query.

/// One page of a query ordered by the datastore's natural order.
#[derive(Debug, Clone)]
pub struct Page<T> {
    items: Vec<T>,
    end_cursor: Option<String>,
    more_results: bool,
}

impl<T> Page<T> {
    /// Return a new instance.
    ///
    /// `end_cursor` is the opaque position after the last returned item and
    /// `more_results` signals that at least one more item follows it.
    pub fn new(items: Vec<T>, end_cursor: Option<String>, more_results: bool) -> Self {
        Self {
            items,
            end_cursor,
            more_results,
        }
    }

    /// Split into items and next cursor.
    pub fn into_parts(self) -> (Vec<T>, Option<String>) {
        let next_cursor = if self.more_results {
            self.end_cursor
        } else {
            None
        };
        (self.items, next_cursor)
    }
}
