//! Virtual time for the simulation
//!
//! Time is measured in whole seconds since the simulation epoch. Streams
//! report non-negative offsets; the engine accumulates them into absolute
//! timestamps. Local time-of-day is derived per user from a fixed timezone
//! offset, which is all the sleep/wake policy needs.

use serde::{Deserialize, Serialize};

use super::error::ConfigError;

/// Absolute virtual time, in seconds since the simulation epoch
pub type Timestamp = u64;

/// Non-negative duration until a stream's next event, in seconds
pub type Offset = u64;

pub const SECONDS_PER_HOUR: u64 = 3_600;
pub const SECONDS_PER_DAY: u64 = 86_400;

/// Timezone offset for a user: `user_id mod 24` hours.
///
/// # Example
/// ```
/// use fraud_sim_core_rs::core::time::timezone_offset;
///
/// assert_eq!(timezone_offset(0), 0);
/// assert_eq!(timezone_offset(25), 3_600);
/// ```
pub fn timezone_offset(user_id: u32) -> Offset {
    u64::from(user_id % 24) * SECONDS_PER_HOUR
}

/// Seconds into the local day for an absolute timestamp.
///
/// # Example
/// ```
/// use fraud_sim_core_rs::core::time::local_time_of_day;
///
/// // 23:00 UTC at +2h is 01:00 local
/// assert_eq!(local_time_of_day(23 * 3_600, 2 * 3_600), 3_600);
/// ```
pub fn local_time_of_day(absolute: Timestamp, tz_offset: Offset) -> u64 {
    // Reduce both operands first so the sum can never overflow.
    ((absolute % SECONDS_PER_DAY) + (tz_offset % SECONDS_PER_DAY)) % SECONDS_PER_DAY
}

/// Daily window, in local seconds, during which a user transacts
///
/// Both ends are inclusive. A window whose `wakeup` is after its `sleep`
/// wraps past midnight.
///
/// # Example
/// ```
/// use fraud_sim_core_rs::AwakeWindow;
///
/// let window = AwakeWindow::new(7 * 3_600, 21 * 3_600).unwrap();
/// assert!(window.contains(12 * 3_600));
/// assert!(window.contains(21 * 3_600));
/// assert!(!window.contains(3 * 3_600));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AwakeWindow {
    /// Local second of day at which the user wakes up
    wakeup: u64,
    /// Local second of day at which the user goes to sleep
    sleep: u64,
}

impl AwakeWindow {
    /// Create a window, rejecting bounds outside the day
    pub fn new(wakeup: u64, sleep: u64) -> Result<Self, ConfigError> {
        let window = Self { wakeup, sleep };
        window.validate()?;
        Ok(window)
    }

    /// Check both bounds lie within `[0, SECONDS_PER_DAY)`.
    ///
    /// Needed again after deserialization, which bypasses [`AwakeWindow::new`].
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.wakeup >= SECONDS_PER_DAY || self.sleep >= SECONDS_PER_DAY {
            return Err(ConfigError::InvalidAwakeWindow {
                wakeup: self.wakeup,
                sleep: self.sleep,
                day: SECONDS_PER_DAY,
            });
        }
        Ok(())
    }

    pub fn wakeup(&self) -> u64 {
        self.wakeup
    }

    pub fn sleep(&self) -> u64 {
        self.sleep
    }

    /// Whether a local time-of-day falls inside the window
    pub fn contains(&self, local_time: u64) -> bool {
        if self.wakeup <= self.sleep {
            (self.wakeup..=self.sleep).contains(&local_time)
        } else {
            local_time >= self.wakeup || local_time <= self.sleep
        }
    }

    /// Whether an absolute timestamp is inside the window for a given timezone
    pub fn is_awake_at(&self, absolute: Timestamp, tz_offset: Offset) -> bool {
        self.contains(local_time_of_day(absolute, tz_offset))
    }
}

impl Default for AwakeWindow {
    /// 07:00 to 21:00 local
    fn default() -> Self {
        Self {
            wakeup: 7 * SECONDS_PER_HOUR,
            sleep: 21 * SECONDS_PER_HOUR,
        }
    }
}
