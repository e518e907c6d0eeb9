use crate::csv_export::quoted_csv;
use crate::errors::HistoryError;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const DEFAULT_MAX_HISTORY: usize = 1000;
pub const DEFAULT_RECENT_LIMIT: usize = 10;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpinRecord {
    pub id: String,
    #[serde(alias = "userId")]
    pub user_id: String,
    #[serde(alias = "userName")]
    pub user_name: String,
    pub timestamp: DateTime<Utc>,
    pub result: String,
    pub probability: f64,
}

impl SpinRecord {
    fn is_complete(&self) -> bool {
        !self.id.is_empty()
            && !self.user_id.is_empty()
            && !self.user_name.is_empty()
            && !self.result.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistoryStats {
    pub total_spins: usize,
    pub most_frequent_winner: Option<String>,
    pub average_probability: f64,
    pub last_spin_date: Option<DateTime<Utc>>,
}

// newest first
#[derive(Debug, Clone)]
pub struct HistoryTracker {
    records: Vec<SpinRecord>,
    max_size: usize,
}

impl Default for HistoryTracker {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_HISTORY)
    }
}

impl HistoryTracker {
    pub fn new(max_size: usize) -> Self {
        Self {
            records: Vec::new(),
            max_size: max_size.max(1),
        }
    }

    pub fn with_records(mut records: Vec<SpinRecord>, max_size: usize) -> Self {
        let max_size = max_size.max(1);
        records.truncate(max_size);
        Self { records, max_size }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn add_record(
        &mut self,
        user_id: &str,
        user_name: &str,
        result: &str,
        probability: f64,
    ) -> SpinRecord {
        self.add_record_at(user_id, user_name, result, probability, Utc::now())
    }

    pub fn add_record_at(
        &mut self,
        user_id: &str,
        user_name: &str,
        result: &str,
        probability: f64,
        timestamp: DateTime<Utc>,
    ) -> SpinRecord {
        let record = SpinRecord {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            user_name: user_name.to_string(),
            timestamp,
            result: result.to_string(),
            probability,
        };

        self.records.insert(0, record.clone());
        self.records.truncate(self.max_size);
        record
    }

    pub fn recent(&self, limit: usize) -> &[SpinRecord] {
        &self.records[..limit.min(self.records.len())]
    }

    pub fn all(&self) -> &[SpinRecord] {
        &self.records
    }

    pub fn for_user(&self, user_id: &str) -> Vec<SpinRecord> {
        self.records
            .iter()
            .filter(|record| record.user_id == user_id)
            .cloned()
            .collect()
    }

    pub fn in_range(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> Vec<SpinRecord> {
        self.records
            .iter()
            .filter(|record| record.timestamp >= start && record.timestamp <= end)
            .cloned()
            .collect()
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }

    pub fn stats(&self) -> HistoryStats {
        if self.records.is_empty() {
            return HistoryStats {
                total_spins: 0,
                most_frequent_winner: None,
                average_probability: 0.0,
                last_spin_date: None,
            };
        }

        // insertion order doubles as the tie-break: newest name seen first wins
        let mut counts: Vec<(&str, usize)> = Vec::new();
        let mut total_probability = 0.0;
        for record in &self.records {
            match counts.iter_mut().find(|(name, _)| *name == record.user_name) {
                Some(entry) => entry.1 += 1,
                None => counts.push((record.user_name.as_str(), 1)),
            }
            total_probability += record.probability;
        }

        let mut winner: Option<(&str, usize)> = None;
        for &(name, count) in &counts {
            if winner.is_none_or(|(_, best)| count > best) {
                winner = Some((name, count));
            }
        }

        HistoryStats {
            total_spins: self.records.len(),
            most_frequent_winner: winner.map(|(name, _)| name.to_string()),
            average_probability: total_probability / self.records.len() as f64,
            last_spin_date: self.records.first().map(|record| record.timestamp),
        }
    }

    pub fn export_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&self.records)
    }

    pub fn export_csv(&self) -> Result<String, csv::Error> {
        let header = ["ID", "User ID", "User Name", "Result", "Probability", "Timestamp"];
        let rows = self.records.iter().map(|record| {
            vec![
                record.id.clone(),
                record.user_id.clone(),
                record.user_name.clone(),
                record.result.clone(),
                record.probability.to_string(),
                record.timestamp.to_rfc3339_opts(SecondsFormat::Millis, true),
            ]
        });
        quoted_csv(&header, rows)
    }

    pub fn import_json(&mut self, json: &str) -> Result<usize, HistoryError> {
        let entries: Vec<serde_json::Value> =
            serde_json::from_str(json).map_err(|_| HistoryError::InvalidImport)?;

        let mut records: Vec<SpinRecord> = entries
            .into_iter()
            .filter_map(|entry| serde_json::from_value::<SpinRecord>(entry).ok())
            .filter(SpinRecord::is_complete)
            .collect();
        records.truncate(self.max_size);

        self.records = records;
        Ok(self.records.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn at(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 10, hour, 0, 0).unwrap()
    }

    #[test]
    fn records_are_kept_newest_first() {
        let mut history = HistoryTracker::default();
        let record = history.add_record("user1", "John", "Winner", 0.25);
        assert_eq!(record.user_id, "user1");
        assert_eq!(record.user_name, "John");
        assert_eq!(record.result, "Winner");
        assert_eq!(record.probability, 0.25);

        history.add_record("user2", "Jane", "Loser", 0.75);
        let recent = history.recent(2);
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].user_name, "Jane");
        assert_eq!(recent[1].user_name, "John");
        assert_eq!(history.recent(DEFAULT_RECENT_LIMIT).len(), 2);
    }

    #[test]
    fn history_is_capped() {
        let mut history = HistoryTracker::new(3);
        for index in 0..5 {
            history.add_record("u", &format!("name-{index}"), "r", 0.5);
        }
        assert_eq!(history.len(), 3);
        assert_eq!(history.all()[0].user_name, "name-4");
        assert_eq!(history.all()[2].user_name, "name-2");
    }

    #[test]
    fn filters_by_user_and_range() {
        let mut history = HistoryTracker::default();
        history.add_record_at("user1", "John", "Winner", 0.25, at(8));
        history.add_record_at("user2", "Jane", "Loser", 0.75, at(10));
        history.add_record_at("user1", "John", "Winner", 0.5, at(12));

        let john = history.for_user("user1");
        assert_eq!(john.len(), 2);
        assert!(john.iter().all(|record| record.user_id == "user1"));

        let morning = history.in_range(at(8), at(10));
        assert_eq!(morning.len(), 2);
        let none = history.in_range(at(13), at(13) + Duration::hours(1));
        assert!(none.is_empty());
    }

    #[test]
    fn stats_summarise_history() {
        let mut history = HistoryTracker::default();
        history.add_record("user1", "John", "Winner", 0.25);
        history.add_record("user2", "Jane", "Loser", 0.75);
        history.add_record("user1", "John", "Winner", 0.5);

        let stats = history.stats();
        assert_eq!(stats.total_spins, 3);
        assert_eq!(stats.most_frequent_winner.as_deref(), Some("John"));
        assert!((stats.average_probability - 0.5).abs() < 1e-9);
        assert_eq!(stats.last_spin_date, Some(history.all()[0].timestamp));
    }

    #[test]
    fn stats_ties_go_to_most_recent_name() {
        let mut history = HistoryTracker::default();
        history.add_record("user1", "John", "r", 0.5);
        history.add_record("user2", "Jane", "r", 0.5);
        assert_eq!(history.stats().most_frequent_winner.as_deref(), Some("Jane"));
    }

    #[test]
    fn empty_history_stats() {
        let stats = HistoryTracker::default().stats();
        assert_eq!(stats.total_spins, 0);
        assert_eq!(stats.most_frequent_winner, None);
        assert_eq!(stats.average_probability, 0.0);
        assert_eq!(stats.last_spin_date, None);
    }

    #[test]
    fn json_export_feeds_import() {
        let mut history = HistoryTracker::default();
        history.add_record("user1", "John", "Winner", 0.25);
        history.add_record("user2", "Jane", "Loser", 0.75);
        let json = history.export_json().unwrap();

        let mut other = HistoryTracker::default();
        other.add_record("user9", "Old", "Gone", 1.0);
        assert_eq!(other.import_json(&json).unwrap(), 2);
        assert_eq!(other.all(), history.all());
    }

    #[test]
    fn import_skips_incomplete_records() {
        let json = r#"[
            {"id": "a", "userId": "u1", "userName": "John", "timestamp": "2026-03-10T08:00:00.000Z", "result": "John", "probability": 0.5},
            {"id": "b", "userId": "", "userName": "John", "timestamp": "2026-03-10T08:00:00.000Z", "result": "John", "probability": 0.5},
            {"id": "c", "userId": "u1", "userName": "John", "timestamp": "not a date", "result": "John", "probability": 0.5},
            {"id": "d", "userId": "u1", "userName": "John", "timestamp": "2026-03-10T08:00:00.000Z", "result": "John", "probability": "high"}
        ]"#;
        let mut history = HistoryTracker::default();
        assert_eq!(history.import_json(json).unwrap(), 1);
        assert_eq!(history.all()[0].timestamp, at(8));
        assert_eq!(history.import_json("{").unwrap_err(), HistoryError::InvalidImport);
    }

    #[test]
    fn import_is_truncated_to_cap() {
        let mut source = HistoryTracker::default();
        source.add_record_at("u1", "Ann", "Ann", 0.5, at(8));
        source.add_record_at("u2", "Bob", "Bob", 0.5, at(9));
        source.add_record_at("u3", "Cid", "Cid", 0.5, at(10));
        let json = source.export_json().unwrap();

        let mut history = HistoryTracker::new(2);
        assert_eq!(history.import_json(&json).unwrap(), 2);
        assert_eq!(history.len(), 2);
        assert_eq!(history.all(), &source.all()[..2]);
    }

    #[test]
    fn loaded_records_are_truncated_to_cap() {
        let mut source = HistoryTracker::default();
        for hour in 0..5 {
            source.add_record_at("u1", "Ann", "Ann", 0.5, at(hour));
        }

        let history = HistoryTracker::with_records(source.all().to_vec(), 3);
        assert_eq!(history.len(), 3);
        assert_eq!(history.all()[0].timestamp, at(4));
        assert_eq!(history.all()[2].timestamp, at(2));

        let mut history = history;
        history.add_record("u2", "Bob", "Bob", 0.5);
        assert_eq!(history.len(), 3);
        assert_eq!(history.all()[2].timestamp, at(3));
    }

    #[test]
    fn csv_export_has_quoted_header() {
        let mut history = HistoryTracker::default();
        history.add_record("user1", "John", "Winner", 0.25);
        let csv = history.export_csv().unwrap();
        assert!(csv.contains("\"ID\",\"User ID\",\"User Name\",\"Result\",\"Probability\",\"Timestamp\""));
        assert!(csv.contains("John"));
        assert!(csv.contains("Winner"));
    }

    #[test]
    fn clear_empties_history() {
        let mut history = HistoryTracker::default();
        history.add_record("user1", "John", "Winner", 0.25);
        assert!(!history.is_empty());
        history.clear();
        assert!(history.recent(DEFAULT_RECENT_LIMIT).is_empty());
    }
}
