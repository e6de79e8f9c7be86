// SPDX-License-Identifier: MIT

//! Asset timestamps.
//!
//! Without `std` there is no clock; "now" is pinned to the unix epoch.

#[cfg(feature = "std")]
use std::time::SystemTime;

use time::OffsetDateTime;

/// Host file times, as returned by `fs::Metadata::modified`.
#[cfg(feature = "std")]
pub fn systemtime_to_offsetdatetime(t: SystemTime) -> OffsetDateTime {
    OffsetDateTime::from(t)
}

/// Current UTC time, or the epoch without `std`.
pub fn now_utc() -> OffsetDateTime {
    #[cfg(feature = "std")]
    {
        OffsetDateTime::now_utc()
    }

    #[cfg(not(feature = "std"))]
    {
        OffsetDateTime::UNIX_EPOCH
    }
}

/// Converts unix seconds into an [`OffsetDateTime`].
///
/// `0` and out-of-range values mean "no timestamp".
pub fn unix_to_offsetdatetime(secs: i64) -> Option<OffsetDateTime> {
    if secs == 0 {
        return None;
    }
    OffsetDateTime::from_unix_timestamp(secs).ok()
}
