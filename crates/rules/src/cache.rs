//! Single-value cache with time based expiry.
//!
//! Used for slow-changing lists fetched from the server (bank list, app
//! metadata). The cache owns its [`Clock`] so expiry can be tested without
//! sleeping.

use std::cell::Cell;

use chrono::{DateTime, Duration, Utc};

/// Source of the current time.
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock that only moves when told to.
#[derive(Clone, Debug)]
pub struct ManualClock {
    now: Cell<DateTime<Utc>>,
}

impl ManualClock {
    #[must_use]
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            now: Cell::new(now),
        }
    }

    pub fn advance(&self, by: Duration) {
        self.now.set(saturating_add(self.now.get(), by));
    }

    pub fn set(&self, now: DateTime<Utc>) {
        self.now.set(now);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        self.now.get()
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> DateTime<Utc> {
        (**self).now()
    }
}

/// `at + by`, clamped to the representable range.
fn saturating_add(at: DateTime<Utc>, by: Duration) -> DateTime<Utc> {
    at.checked_add_signed(by).unwrap_or(if by < Duration::zero() {
        DateTime::<Utc>::MIN_UTC
    } else {
        DateTime::<Utc>::MAX_UTC
    })
}

#[derive(Clone, Debug)]
struct Entry<T> {
    value: T,
    expires_at: DateTime<Utc>,
}

/// Holds at most one value until `ttl` has elapsed since it was stored.
#[derive(Debug)]
pub struct ExpiringCache<T, C = SystemClock> {
    entry: Option<Entry<T>>,
    ttl: Duration,
    clock: C,
}

impl<T> ExpiringCache<T, SystemClock> {
    #[must_use]
    pub fn new(ttl: Duration) -> Self {
        Self::with_clock(ttl, SystemClock)
    }
}

impl<T, C: Clock> ExpiringCache<T, C> {
    #[must_use]
    pub fn with_clock(ttl: Duration, clock: C) -> Self {
        Self {
            entry: None,
            ttl,
            clock,
        }
    }

    #[must_use]
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Expiry of the stored value, expired or not.
    #[must_use]
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.entry.as_ref().map(|entry| entry.expires_at)
    }

    /// Returns the value if it has not expired. The value expires at
    /// `expires_at` exactly.
    #[must_use]
    pub fn get(&self) -> Option<&T> {
        let now = self.clock.now();
        self.entry
            .as_ref()
            .filter(|entry| now < entry.expires_at)
            .map(|entry| &entry.value)
    }

    #[must_use]
    pub fn is_fresh(&self) -> bool {
        self.get().is_some()
    }

    /// Stores `value`, replacing any previous one, and restarts the TTL.
    /// A TTL reaching past the last representable instant never expires.
    pub fn insert(&mut self, value: T) -> &T {
        let expires_at = saturating_add(self.clock.now(), self.ttl);
        &self.entry.insert(Entry { value, expires_at }).value
    }

    pub fn invalidate(&mut self) {
        self.entry = None;
    }

    /// Returns the cached value, refreshing it with `load` when missing or
    /// expired. A failed load leaves the cache untouched.
    pub fn get_or_try_insert_with<E, F>(&mut self, load: F) -> Result<&T, E>
    where
        F: FnOnce() -> Result<T, E>,
    {
        let now = self.clock.now();
        let entry = match self.entry.take() {
            Some(entry) if now < entry.expires_at => entry,
            previous => match load() {
                Ok(value) => Entry {
                    value,
                    expires_at: saturating_add(now, self.ttl),
                },
                Err(err) => {
                    self.entry = previous;
                    return Err(err);
                }
            },
        };
        Ok(&self.entry.insert(entry).value)
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn clock() -> ManualClock {
        ManualClock::new(Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap())
    }

    #[test]
    fn empty_cache_returns_nothing() {
        let clock = clock();
        let cache: ExpiringCache<u32, _> = ExpiringCache::with_clock(Duration::minutes(5), &clock);
        assert!(cache.get().is_none());
        assert!(cache.expires_at().is_none());
    }

    #[test]
    fn value_expires_after_ttl() {
        let clock = clock();
        let mut cache = ExpiringCache::with_clock(Duration::minutes(5), &clock);
        cache.insert("banks");
        assert_eq!(cache.expires_at(), Some(clock.now() + Duration::minutes(5)));

        clock.advance(Duration::minutes(4));
        assert_eq!(cache.get(), Some(&"banks"));

        clock.advance(Duration::minutes(1));
        assert_eq!(cache.get(), None);
    }

    #[test]
    fn loader_runs_only_when_stale() {
        let clock = clock();
        let mut cache = ExpiringCache::with_clock(Duration::seconds(30), &clock);
        let mut calls = 0;

        for _ in 0..3 {
            let value = cache
                .get_or_try_insert_with(|| {
                    calls += 1;
                    Ok::<_, ()>(calls)
                })
                .unwrap();
            assert_eq!(*value, 1);
        }

        clock.advance(Duration::seconds(31));
        let value = cache
            .get_or_try_insert_with(|| Ok::<_, ()>(42))
            .unwrap();
        assert_eq!(*value, 42);
    }

    #[test]
    fn failed_load_keeps_previous_entry() {
        let clock = clock();
        let mut cache = ExpiringCache::with_clock(Duration::seconds(10), &clock);
        cache.insert(1);
        let expires_at = cache.expires_at();
        clock.advance(Duration::seconds(20));

        let result = cache.get_or_try_insert_with(|| Err("offline"));
        assert_eq!(result, Err("offline"));
        assert_eq!(cache.expires_at(), expires_at);
    }

    #[test]
    fn huge_ttl_never_expires() {
        let clock = clock();
        let mut cache = ExpiringCache::with_clock(Duration::days(100_000_000), &clock);
        cache.insert(1u8);
        assert_eq!(cache.expires_at(), Some(DateTime::<Utc>::MAX_UTC));

        clock.advance(Duration::days(365 * 1_000));
        assert_eq!(cache.get(), Some(&1));

        cache.invalidate();
        let value = cache.get_or_try_insert_with(|| Ok::<_, ()>(2u8)).unwrap();
        assert_eq!(*value, 2);
    }

    #[test]
    fn invalidate_drops_value() {
        let mut cache = ExpiringCache::new(Duration::hours(1));
        cache.insert(7);
        assert!(cache.is_fresh());
        cache.invalidate();
        assert!(!cache.is_fresh());
    }
}
