use crate::history::{HistoryStats, SpinRecord};
use crate::users::User;
use crate::wheel::WheelSegment;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppData {
    #[serde(default)]
    pub users: Vec<User>,
    #[serde(default)]
    pub history: Vec<SpinRecord>,
}

#[derive(Debug, Deserialize)]
pub struct NameRequest {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct WeightRequest {
    pub weight: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Json,
    Csv,
}

#[derive(Debug, Deserialize)]
pub struct ExportQuery {
    #[serde(default)]
    pub format: ExportFormat,
}

#[derive(Debug, Default, Deserialize)]
pub struct HistoryQuery {
    pub limit: Option<usize>,
    pub user_id: Option<String>,
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
pub struct RecentQuery {
    pub limit: Option<usize>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ImportResponse {
    pub imported: usize,
    pub total: usize,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub users: usize,
    pub spins: usize,
}

#[derive(Debug, Serialize)]
pub struct WheelResponse {
    pub segments: Vec<WheelSegment>,
    pub spin_duration_ms: u64,
}

#[derive(Debug, Serialize)]
pub struct LeaderboardEntry {
    pub user_id: String,
    pub name: String,
    pub color: Option<String>,
    pub wins: u64,
    pub selection_rate: f64,
    pub participation_rate: f64,
}

#[derive(Debug, Serialize)]
pub struct DailySpinPoint {
    pub date: String,
    pub spins: u64,
}

#[derive(Debug, Serialize)]
pub struct WeeklySpinPoint {
    pub week: String,
    pub start_date: String,
    pub end_date: String,
    pub spins: u64,
}

#[derive(Debug, Serialize)]
pub struct WeeklyAveragePoint {
    pub week: String,
    pub days_counted: u8,
    pub avg_spins: f64,
}

#[derive(Debug, Serialize)]
pub struct AnalyticsReport {
    pub summary: HistoryStats,
    pub leaderboard: Vec<LeaderboardEntry>,
    pub last_7_days: Vec<DailySpinPoint>,
    pub weekly_totals: Vec<WeeklySpinPoint>,
    pub weekly_averages: Vec<WeeklyAveragePoint>,
}
