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

//! Entities for Cassandra implementation.

mod beer_entity;
mod brewery_entity;

pub use self::beer_entity::BeerEntity;
pub use self::brewery_entity::BreweryEntity;

/// Conversion from unsigned to signed primitive.
pub trait FromUnsignedOrDefault<T> {
    fn from_unsigned(value: T) -> Self;
}

impl FromUnsignedOrDefault<u64> for i64 {
    /// Convert `u64` to `i64`. Return 0 on overflow.
    fn from_unsigned(value: u64) -> i64 {
        i64::try_from(value).unwrap_or_default()
    }
}

/// Return `true` if the identifier could have been assigned by this provider.
pub fn is_well_formed_id(id: &str) -> bool {
    uuid::Uuid::try_parse(id).is_ok()
}

/// Return a new time ordered identifier.
pub fn new_id() -> String {
    uuid::Uuid::now_v7().hyphenated().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_ids_sort_in_creation_order() {
        let first = new_id();
        let second = new_id();
        assert!(is_well_formed_id(&first));
        assert!(first < second);
        assert!(!is_well_formed_id("1234"));
    }
}
