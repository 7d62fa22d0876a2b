// Konnect
// Copyright 2024 The Konnect Authors
//
// Licensed under the Apache License, Version 2.0 (the "License"); you may not
// use this file except in compliance with the License.  You may obtain a copy
// of the License at:
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS, WITHOUT
// WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.  See the
// License for the specific language governing permissions and limitations
// under the License.

//! Collection of clock implementations.

use time::OffsetDateTime;

/// Generic definition of a clock.
pub trait Clock {
    /// Returns the current UTC time.
    fn now_utc(&self) -> OffsetDateTime;
}

/// Clock implementation that uses the system clock.
#[derive(Clone, Default)]
pub struct SystemClock {}

impl Clock for SystemClock {
    fn now_utc(&self) -> OffsetDateTime {
        let nanos = OffsetDateTime::now_utc().unix_timestamp_nanos();

        // Truncate the timestamp to microsecond resolution as this is the resolution supported by
        // timestamps in the PostgreSQL database.  Doing this here keeps the values we return to
        // clients identical to the values we later read back.
        let nanos = nanos / 1000 * 1000;

        OffsetDateTime::from_unix_timestamp_nanos(nanos)
            .expect("nanos must be in range because they come from the current timestamp")
    }
}

/// Test utilities.
#[cfg(any(test, feature = "testutils"))]
pub mod testutils {
    use super::*;
    use std::sync::atomic::{AtomicI64, Ordering};
    use time::{Date, Month, Time};

    /// Creates a UTC timestamp from its components.  Given that this is for testing purposes
    /// only, invalid inputs panic.
    pub fn utc_datetime(
        year: i32,
        month: u8,
        day: u8,
        hour: u8,
        minute: u8,
        second: u8,
    ) -> OffsetDateTime {
        let month = Month::try_from(month).expect("Invalid month");
        let date = Date::from_calendar_date(year, month, day).expect("Invalid date");
        let time = Time::from_hms(hour, minute, second).expect("Invalid time");
        date.with_time(time).assume_utc()
    }

    /// A clock that starts at a fixed instant and advances by one second every time it is
    /// queried, so that consecutive events always get strictly increasing timestamps.
    pub struct MonotonicClock {
        /// Current fake time in seconds since the epoch.
        now_secs: AtomicI64,
    }

    impl MonotonicClock {
        /// Creates a new clock whose first reading is `now_secs` seconds after the epoch.
        pub fn new(now_secs: i64) -> Self {
            Self { now_secs: AtomicI64::new(now_secs) }
        }
    }

    impl Clock for MonotonicClock {
        fn now_utc(&self) -> OffsetDateTime {
            let now = self.now_secs.fetch_add(1, Ordering::SeqCst);
            OffsetDateTime::from_unix_timestamp(now).unwrap()
        }
    }

}
