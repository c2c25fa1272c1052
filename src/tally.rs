//! Scan tally: count recognized codes and flag repeats
//!
//! A badge identifier should check in once per run; repeats are counted
//! and surfaced rather than rejected.

use rustc_hash::FxHashMap;
use serde::Serialize;

/// How many recent scans to keep for display
const RECENT_LIMIT: usize = 50;

/// Counts recognized scans per code
#[derive(Clone, Debug, Default)]
pub struct ScanTally {
    /// Code → number of times scanned
    counts: FxHashMap<String, u32>,
    /// Total scans recorded
    total_scans: u32,
    /// Most recent scans, oldest first
    recent: Vec<String>,
}

impl ScanTally {
    pub fn new() -> Self {
        ScanTally {
            counts: FxHashMap::default(),
            total_scans: 0,
            recent: Vec::with_capacity(RECENT_LIMIT),
        }
    }

    /// Record a scan; returns how many times this code has now been seen
    pub fn record(&mut self, code: &str) -> u32 {
        let count = self
            .counts
            .entry(code.to_string())
            .and_modify(|count| *count += 1)
            .or_insert(1);
        let seen = *count;

        self.total_scans += 1;
        self.recent.push(code.to_string());
        if self.recent.len() > RECENT_LIMIT {
            self.recent.remove(0);
        }
        seen
    }

    pub fn count(&self, code: &str) -> u32 {
        self.counts.get(code).copied().unwrap_or(0)
    }

    /// Whether `code` has been scanned more than once
    pub fn is_repeat(&self, code: &str) -> bool {
        self.count(code) > 1
    }

    pub fn total_scans(&self) -> u32 {
        self.total_scans
    }

    pub fn unique_codes(&self) -> usize {
        self.counts.len()
    }

    pub fn recent(&self) -> &[String] {
        &self.recent
    }

    /// Codes scanned more than once, most frequent first
    pub fn repeated(&self) -> Vec<(String, u32)> {
        let mut repeated: Vec<(String, u32)> = self
            .counts
            .iter()
            .filter(|(_, &count)| count > 1)
            .map(|(code, &count)| (code.clone(), count))
            .collect();
        repeated.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        repeated
    }

    pub fn summary(&self) -> TallySummary {
        TallySummary {
            total_scans: self.total_scans,
            unique_codes: self.unique_codes(),
            repeated: self.repeated(),
        }
    }

    pub fn reset(&mut self) {
        self.counts.clear();
        self.total_scans = 0;
        self.recent.clear();
    }
}

/// Summary of a run
#[derive(Clone, Debug, Serialize)]
pub struct TallySummary {
    pub total_scans: u32,
    pub unique_codes: usize,
    pub repeated: Vec<(String, u32)>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_counts_repeats() {
        let mut tally = ScanTally::new();
        assert_eq!(tally.record("S100"), 1);
        assert_eq!(tally.record("S200"), 1);
        assert_eq!(tally.record("S100"), 2);
        assert!(tally.is_repeat("S100"));
        assert!(!tally.is_repeat("S200"));
        assert_eq!(tally.total_scans(), 3);
        assert_eq!(tally.unique_codes(), 2);
        assert_eq!(tally.repeated(), vec![("S100".to_string(), 2)]);
    }

    #[test]
    fn test_recent_is_bounded() {
        let mut tally = ScanTally::new();
        for i in 0..60 {
            tally.record(&format!("B{}", i));
        }
        assert_eq!(tally.recent().len(), RECENT_LIMIT);
        assert_eq!(tally.recent()[0], "B10");
        tally.reset();
        assert_eq!(tally.total_scans(), 0);
        assert!(tally.recent().is_empty());
    }
}
