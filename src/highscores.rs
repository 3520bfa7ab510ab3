//! Best survival time
//!
//! A single number persisted under [`BestTime::STORAGE_KEY`] as a one-decimal
//! string (e.g. `"42.7"`).

use crate::format_seconds;
use crate::persistence::{KeyValueStore, StoreError};

/// Best survival time in seconds
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BestTime {
    best: f32,
}

impl BestTime {
    /// Storage key
    pub const STORAGE_KEY: &'static str = "BlackholeJumperHighScore";

    /// Read the stored best time; missing or unreadable values count as zero
    pub fn load(store: &impl KeyValueStore) -> Self {
        match Self::read(store) {
            Ok(Some(best)) => {
                log::info!("Loaded best time: {}s", format_seconds(best));
                Self { best }
            }
            Ok(None) => {
                log::info!("No best time found, starting fresh");
                Self::default()
            }
            Err(e) => {
                log::warn!("Ignoring stored best time: {e}");
                Self::default()
            }
        }
    }

    fn read(store: &impl KeyValueStore) -> Result<Option<f32>, StoreError> {
        let Some(raw) = store.get(Self::STORAGE_KEY)? else {
            return Ok(None);
        };
        match raw.trim().parse::<f32>() {
            Ok(value) if value.is_finite() && value >= 0.0 => Ok(Some(value)),
            _ => Err(StoreError::Malformed {
                key: Self::STORAGE_KEY.to_owned(),
                value: raw,
            }),
        }
    }

    pub fn get(&self) -> f32 {
        self.best
    }

    /// Check if a time would set a new record
    pub fn qualifies(&self, secs: f32) -> bool {
        secs > self.best
    }

    /// Record a finished run; returns true on a new record
    ///
    /// Equal or lesser times leave the stored value untouched. A failed write
    /// still counts the record for this session.
    pub fn record(&mut self, secs: f32, store: &mut impl KeyValueStore) -> bool {
        if !self.qualifies(secs) {
            return false;
        }
        self.best = secs;
        match store.set(Self::STORAGE_KEY, &format_seconds(secs)) {
            Ok(()) => log::info!("New best time saved: {}s", format_seconds(secs)),
            Err(e) => log::warn!("New best time not persisted: {e}"),
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStore;

    #[test]
    fn test_load_missing_is_zero() {
        let store = MemoryStore::new();
        assert_eq!(BestTime::load(&store).get(), 0.0);
    }

    #[test]
    fn test_load_parses_fixed_point() {
        let store = MemoryStore::with_entry(BestTime::STORAGE_KEY, "42.7");
        assert_eq!(BestTime::load(&store).get(), 42.7);
    }

    #[test]
    fn test_load_malformed_is_zero() {
        let store = MemoryStore::with_entry(BestTime::STORAGE_KEY, "lots");
        assert_eq!(BestTime::load(&store).get(), 0.0);
        let store = MemoryStore::with_entry(BestTime::STORAGE_KEY, "-3");
        assert_eq!(BestTime::load(&store).get(), 0.0);
    }

    #[test]
    fn test_record_greater_updates_store() {
        let mut store = MemoryStore::with_entry(BestTime::STORAGE_KEY, "10.0");
        let mut best = BestTime::load(&store);
        assert!(best.record(12.34, &mut store));
        assert_eq!(best.get(), 12.34);
        assert_eq!(
            store.get(BestTime::STORAGE_KEY).unwrap().as_deref(),
            Some("12.3")
        );
    }

    #[test]
    fn test_record_equal_or_less_is_ignored() {
        let mut store = MemoryStore::with_entry(BestTime::STORAGE_KEY, "10.0");
        let mut best = BestTime::load(&store);
        assert!(!best.record(10.0, &mut store));
        assert!(!best.record(3.5, &mut store));
        assert_eq!(best.get(), 10.0);
        assert_eq!(
            store.get(BestTime::STORAGE_KEY).unwrap().as_deref(),
            Some("10.0")
        );
    }

    struct BrokenStore;

    impl KeyValueStore for BrokenStore {
        fn get(&self, _key: &str) -> Result<Option<String>, StoreError> {
            Err(StoreError::Unavailable)
        }

        fn set(&mut self, _key: &str, _value: &str) -> Result<(), StoreError> {
            Err(StoreError::Unavailable)
        }
    }

    #[test]
    fn test_broken_store_degrades() {
        let mut store = BrokenStore;
        let mut best = BestTime::load(&store);
        assert_eq!(best.get(), 0.0);
        assert!(best.record(5.0, &mut store));
        assert_eq!(best.get(), 5.0);
    }
}
