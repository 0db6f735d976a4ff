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

//! Time related utility functions.

use std::time::SystemTime;

/// Microseconds since UNIX epoch.
///
/// Returns 0 if the system clock is set before the epoch.
pub fn get_timestamp_micros() -> u64 {
    SystemTime::now()
        .duration_since(SystemTime::UNIX_EPOCH)
        .ok()
        .and_then(|duration| u64::try_from(duration.as_micros()).ok())
        .unwrap_or_default()
}

/// Seconds since UNIX epoch.
pub fn get_timestamp_seconds() -> u64 {
    get_timestamp_micros() / 1_000_000
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seconds_follow_micros() {
        let micros = get_timestamp_micros();
        let seconds = get_timestamp_seconds();
        assert!(micros > 1_700_000_000_000_000);
        assert!(seconds >= micros / 1_000_000);
    }
}
