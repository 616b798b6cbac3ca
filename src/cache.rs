//! Session-scoped memoization of weather scores.

use std::collections::HashMap;

use parking_lot::RwLock;
use tracing::debug;

use crate::error::Result;
use crate::forecast::ForecastEntry;
use crate::score::{score_entry, WeatherScore};

/// Caches scores by node id, then forecast timestamp.
///
/// Shared by reference across planning calls, including parallel ones.
/// Failed scorings are never stored so corrected input can be retried.
#[derive(Debug, Default)]
pub struct ScoreCache {
    scores: RwLock<HashMap<usize, HashMap<String, WeatherScore>>>,
}

impl ScoreCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, node: usize, entry: &ForecastEntry) -> Result<WeatherScore> {
        if let Some(score) = self
            .scores
            .read()
            .get(&node)
            .and_then(|by_time| by_time.get(entry.time.as_str()))
        {
            debug!(node, time = %entry.time, "score cache hit");
            return Ok(score.clone());
        }

        let score = score_entry(entry)?;
        // on a race the first insert wins; the scorer is pure so both agree
        let mut scores = self.scores.write();
        Ok(scores
            .entry(node)
            .or_default()
            .entry(entry.time.clone())
            .or_insert(score)
            .clone())
    }

    pub fn len(&self) -> usize {
        self.scores.read().values().map(HashMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        self.scores.write().clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RouterError;

    #[test]
    fn test_caches_by_node_and_time() {
        let cache = ScoreCache::new();
        let entry = ForecastEntry::new("2024-06-01T12:00:00Z", 22.0, 40.0, 3.0, 25.0);

        let first = cache.get(0, &entry).unwrap();
        let second = cache.get(0, &entry).unwrap();
        assert_eq!(first, second);
        assert_eq!(cache.len(), 1);

        cache.get(1, &entry).unwrap();
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_cached_value_is_returned_for_same_key() {
        let cache = ScoreCache::new();
        let mild = ForecastEntry::new("2024-06-01T12:00:00Z", 22.0, 40.0, 3.0, 25.0);
        let stormy = ForecastEntry::new("2024-06-01T12:00:00Z", 2.0, 90.0, 20.0, 100.0)
            .with_precipitation(8.0);

        let cached = cache.get(3, &mild).unwrap();
        // same key: the stored score wins even though the entry differs
        assert_eq!(cache.get(3, &stormy).unwrap(), cached);
    }

    #[test]
    fn test_failures_are_not_cached() {
        let cache = ScoreCache::new();
        let mut entry = ForecastEntry::new("2024-06-01T12:00:00Z", 22.0, 40.0, 3.0, 25.0);
        entry.cloud_area_fraction = None;

        assert!(matches!(
            cache.get(0, &entry),
            Err(RouterError::IncompleteWeatherData { .. })
        ));
        assert!(cache.is_empty());

        entry.cloud_area_fraction = Some(25.0);
        assert!(cache.get(0, &entry).is_ok());
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_clear() {
        let cache = ScoreCache::new();
        let entry = ForecastEntry::new("t0", 22.0, 40.0, 3.0, 25.0);
        cache.get(0, &entry).unwrap();
        cache.clear();
        assert!(cache.is_empty());
    }

    #[test]
    fn test_len_counts_every_timestamp_per_node() {
        let cache = ScoreCache::new();
        for hour in 0..3 {
            let entry = ForecastEntry::new(format!("2024-06-01T{:02}:00:00Z", 12 + hour), 22.0, 40.0, 3.0, 25.0);
            cache.get(0, &entry).unwrap();
            cache.get(4, &entry).unwrap();
        }
        assert_eq!(cache.len(), 6);

        let repeat = ForecastEntry::new("2024-06-01T13:00:00Z", 22.0, 40.0, 3.0, 25.0);
        cache.get(4, &repeat).unwrap();
        assert_eq!(cache.len(), 6);
    }
}
