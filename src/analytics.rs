use crate::history::HistoryTracker;
use crate::models::{
    AnalyticsReport, DailySpinPoint, LeaderboardEntry, WeeklyAveragePoint, WeeklySpinPoint,
};
use crate::users::UserManager;
use chrono::{Datelike, Duration, NaiveDate, Utc};
use std::collections::BTreeMap;

const WEEK_COUNT: usize = 8;

pub fn build_analytics(users: &UserManager, history: &HistoryTracker) -> AnalyticsReport {
    build_analytics_at(Utc::now().date_naive(), users, history)
}

pub fn build_analytics_at(
    today: NaiveDate,
    users: &UserManager,
    history: &HistoryTracker,
) -> AnalyticsReport {
    let mut per_day: BTreeMap<NaiveDate, u64> = BTreeMap::new();
    for record in history.all() {
        *per_day.entry(record.timestamp.date_naive()).or_default() += 1;
    }
    let spins_on = |date: NaiveDate| per_day.get(&date).copied().unwrap_or_default();

    let mut last_7_days = Vec::with_capacity(7);
    for offset in (0..7).rev() {
        let date = today - Duration::days(offset);
        last_7_days.push(DailySpinPoint {
            date: date.to_string(),
            spins: spins_on(date),
        });
    }

    let current_week_start = week_start(today);
    let mut weekly_totals = Vec::with_capacity(WEEK_COUNT);
    let mut weekly_averages = Vec::with_capacity(WEEK_COUNT);

    for offset in (0..WEEK_COUNT).rev() {
        let start = current_week_start - Duration::weeks(offset as i64);
        let end = start + Duration::days(6);

        let spins = (0..7)
            .map(|day| spins_on(start + Duration::days(day)))
            .fold(0u64, u64::saturating_add);

        let days_counted = if today < start {
            0
        } else if today > end {
            7
        } else {
            (today - start).num_days() as u8 + 1
        };
        let denom = if days_counted == 0 { 1.0 } else { f64::from(days_counted) };

        weekly_totals.push(WeeklySpinPoint {
            week: week_label(start),
            start_date: start.to_string(),
            end_date: end.to_string(),
            spins,
        });
        weekly_averages.push(WeeklyAveragePoint {
            week: week_label(start),
            days_counted,
            avg_spins: spins as f64 / denom,
        });
    }

    AnalyticsReport {
        summary: history.stats(),
        leaderboard: leaderboard(users),
        last_7_days,
        weekly_totals,
        weekly_averages,
    }
}

fn leaderboard(users: &UserManager) -> Vec<LeaderboardEntry> {
    let stats = users.user_stats();
    let mut entries: Vec<LeaderboardEntry> = users
        .all_users()
        .iter()
        .filter_map(|user| {
            let entry = stats.get(&user.id)?;
            (entry.wins > 0).then(|| LeaderboardEntry {
                user_id: user.id.clone(),
                name: user.name.clone(),
                color: user.color.clone(),
                wins: entry.wins,
                selection_rate: entry.win_rate,
                participation_rate: entry.participation_rate,
            })
        })
        .collect();
    entries.sort_by(|a, b| b.wins.cmp(&a.wins));
    entries
}

fn week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(date.weekday().num_days_from_monday() as i64)
}

fn week_label(date: NaiveDate) -> String {
    let iso = date.iso_week();
    format!("{}-W{:02}", iso.year(), iso.week())
}
