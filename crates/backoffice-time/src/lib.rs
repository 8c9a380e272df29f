//! Simple wrappers to make many errors hard to make

#![warn(unused_crate_dependencies)]

use std::{fmt::Display, time::Duration};

/// Intended to be similar to Duration but always clear that it is in Seconds
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize, PartialOrd, Ord,
)]
pub struct Seconds(u64);

/// Intended to be similar to Instant but keeps on ticking if the computer is
/// sleeping, only works with date/time after the unix epoch
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize, PartialOrd, Ord,
)]
pub struct Timestamp(u64);

/// A one-shot timer owned by the state that armed it
///
/// Being a plain value it is "cancelled" by dropping it (or the state that
/// holds it) before it fires, so a discarded view can never observe it expire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Countdown {
    expires_at: Timestamp,
}

impl Timestamp {
    pub fn now() -> Self {
        Self(
            web_time::SystemTime::UNIX_EPOCH
                .elapsed()
                .expect("expected date on system to be after the epoch")
                .as_secs(),
        )
    }

    pub fn as_local_datetime(&self) -> chrono::DateTime<chrono::Local> {
        chrono::DateTime::from_timestamp(self.0.try_into().unwrap(), 0)
            .expect("wow this program wasn't meant to last that long")
            .into()
    }

    pub fn display_as_locale_datetime(&self) -> String {
        self.as_local_datetime().format("%c").to_string()
    }

    /// Returns the number of seconds since `past_time` or None if `past_time`
    /// is in the future
    pub fn seconds_since(self, past_time: Self) -> Option<Seconds> {
        if self.0 < past_time.0 {
            None
        } else {
            Some(self - past_time)
        }
    }

    /// Returns the number of seconds since this timestamp or None if this
    /// timestamp is in the future
    pub fn elapsed(self) -> Option<Seconds> {
        Self::now().seconds_since(self)
    }
}

impl Countdown {
    pub fn new(duration: Seconds) -> Self {
        Self::starting_at(Timestamp::now(), duration)
    }

    /// Mostly useful for tests where `now` needs to be controlled
    pub fn starting_at(start: Timestamp, duration: Seconds) -> Self {
        Self {
            expires_at: start + duration,
        }
    }

    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Timestamp::now())
    }

    pub fn is_expired_at(&self, now: Timestamp) -> bool {
        now >= self.expires_at
    }

    /// Seconds left before expiry (zero once expired)
    pub fn remaining(&self) -> Seconds {
        self.remaining_at(Timestamp::now())
    }

    pub fn remaining_at(&self, now: Timestamp) -> Seconds {
        if now >= self.expires_at {
            Seconds::new(0)
        } else {
            self.expires_at - now
        }
    }
}

impl std::ops::Add<Seconds> for Timestamp {
    type Output = Self;

    fn add(self, rhs: Seconds) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl std::ops::AddAssign<Seconds> for Timestamp {
    fn add_assign(&mut self, rhs: Seconds) {
        self.0 += rhs.0
    }
}

impl std::ops::Sub for Timestamp {
    type Output = Seconds;

    fn sub(self, rhs: Self) -> Self::Output {
        Seconds::new(self.0 - rhs.0)
    }
}

impl From<u32> for Timestamp {
    fn from(value: u32) -> Self {
        Self(value as u64)
    }
}

impl Seconds {
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// Returns true if this represents zero seconds
    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    pub fn saturating_sub(&self, elapsed: Seconds) -> Seconds {
        Self(self.0.saturating_sub(elapsed.0))
    }
}

impl From<u64> for Seconds {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl From<Seconds> for Duration {
    fn from(value: Seconds) -> Self {
        Duration::from_secs(value.0)
    }
}

impl std::ops::Add for Seconds {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl Default for Timestamp {
    fn default() -> Self {
        Self::now()
    }
}

impl Display for Seconds {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn countdown_expires_only_after_duration() {
        let start = Timestamp::from(1_000u32);
        let countdown = Countdown::starting_at(start, Seconds::new(5));

        assert!(!countdown.is_expired_at(start));
        assert!(!countdown.is_expired_at(start + Seconds::new(4)));
        assert_eq!(countdown.remaining_at(start + Seconds::new(4)), Seconds::new(1));
        assert!(countdown.is_expired_at(start + Seconds::new(5)));
        assert!(countdown.is_expired_at(start + Seconds::new(60)));
        assert!(countdown.remaining_at(start + Seconds::new(60)).is_zero());
    }

    #[test]
    fn seconds_since_is_none_for_future_times() {
        let earlier = Timestamp::from(100u32);
        let later = earlier + Seconds::new(30);
        assert_eq!(later.seconds_since(earlier), Some(Seconds::new(30)));
        assert_eq!(earlier.seconds_since(later), None);
    }
}
