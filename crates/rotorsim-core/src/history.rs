//! Append-only rpm histories and the name-keyed collection of them.
//!
//! [`RunHistories`] keeps insertion order, so a persisted and reloaded
//! collection compares equal key-for-key and in the same order.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// History
// ---------------------------------------------------------------------------

/// Ordered rpm samples, one per tick. Samples can only be appended.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct History(Vec<f64>);

impl History {
    /// Empty history.
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Empty history with room for `ticks` samples.
    pub fn with_capacity(ticks: usize) -> Self {
        Self(Vec::with_capacity(ticks))
    }

    /// Append one sample.
    pub fn push(&mut self, rpm: f64) {
        self.0.push(rpm);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Most recent sample.
    pub fn last(&self) -> Option<f64> {
        self.0.last().copied()
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        self.0.iter().copied()
    }

    pub fn into_vec(self) -> Vec<f64> {
        self.0
    }
}

impl From<Vec<f64>> for History {
    fn from(samples: Vec<f64>) -> Self {
        Self(samples)
    }
}

// ---------------------------------------------------------------------------
// RunHistories
// ---------------------------------------------------------------------------

/// Histories keyed by run name, in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RunHistories(IndexMap<String, History>);

impl RunHistories {
    pub fn new() -> Self {
        Self(IndexMap::new())
    }

    /// Insert a run's history. Returns the previous history under the same
    /// name, which keeps its original position.
    pub fn insert(&mut self, name: impl Into<String>, history: History) -> Option<History> {
        self.0.insert(name.into(), history)
    }

    pub fn get(&self, name: &str) -> Option<&History> {
        self.0.get(name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &History)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl FromIterator<(String, History)> for RunHistories {
    fn from_iter<T: IntoIterator<Item = (String, History)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Render a run key for display: `fuzzy_pid_motor` → `Fuzzy Pid Motor`.
pub fn display_label(name: &str) -> String {
    name.split('_')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            chars.next().map_or_else(String::new, |first| {
                first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect()
            })
        })
        .collect::<Vec<_>>()
        .join(" ")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn history_appends_in_order() {
        let mut history = History::with_capacity(3);
        history.push(1.0);
        history.push(2.5);
        history.push(2.0);
        assert_eq!(history.as_slice(), &[1.0, 2.5, 2.0]);
        assert_eq!(history.len(), 3);
        assert_eq!(history.last(), Some(2.0));
    }

    #[test]
    fn empty_history() {
        let history = History::new();
        assert!(history.is_empty());
        assert!(history.last().is_none());
    }

    #[test]
    fn run_histories_preserve_insertion_order() {
        let mut runs = RunHistories::new();
        runs.insert("zeta", History::from(vec![1.0]));
        runs.insert("alpha", History::from(vec![2.0]));
        runs.insert("mid", History::from(vec![3.0]));
        let names: Vec<_> = runs.names().collect();
        assert_eq!(names, ["zeta", "alpha", "mid"]);
    }

    #[test]
    fn reinsert_keeps_position_and_returns_previous() {
        let mut runs = RunHistories::new();
        runs.insert("a", History::from(vec![1.0]));
        runs.insert("b", History::from(vec![2.0]));
        let previous = runs.insert("a", History::from(vec![9.0]));
        assert_eq!(previous, Some(History::from(vec![1.0])));
        let names: Vec<_> = runs.names().collect();
        assert_eq!(names, ["a", "b"]);
        assert_eq!(runs.get("a").unwrap().as_slice(), &[9.0]);
    }

    #[test]
    fn run_histories_serialize_as_plain_object() {
        let mut runs = RunHistories::new();
        runs.insert("simple_motor", History::from(vec![4.0, 7.5]));
        let json = serde_json::to_string(&runs).unwrap();
        assert_eq!(json, r#"{"simple_motor":[4.0,7.5]}"#);
    }

    #[test]
    fn display_label_title_cases_words() {
        assert_eq!(display_label("simple_motor"), "Simple Motor");
        assert_eq!(display_label("fuzzy_pid_motor"), "Fuzzy Pid Motor");
        assert_eq!(display_label("PID"), "Pid");
        assert_eq!(display_label("a__b"), "A B");
        assert_eq!(display_label(""), "");
    }
}
