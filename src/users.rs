use crate::csv_export::quoted_csv;
use crate::errors::UserError;
use crate::wheel::{default_segments, WheelSegment};
use chrono::{DateTime, SecondsFormat, Utc};
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;
use uuid::Uuid;

pub const MAX_NAME_CHARS: usize = 255;
pub const MAX_USERS: usize = 100;

const USER_COLORS: [&str; 14] = [
    "#FF6B6B", "#4ECDC4", "#45B7D1", "#96CEB4", "#FFEAA7", "#DDA0DD", "#98D8C8", "#F7DC6F",
    "#BB8FCE", "#85C1E9", "#F8C471", "#82E0AA", "#F1948A", "#D7BDE2",
];

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SpinStats {
    #[serde(default)]
    pub wins: u64,
    #[serde(default, alias = "totalSpins")]
    pub total_spins: u64,
    #[serde(default, alias = "winRate")]
    pub win_rate: f64,
}

impl SpinStats {
    fn recompute_rate(&mut self) {
        self.win_rate = if self.total_spins == 0 {
            0.0
        } else {
            self.wins as f64 / self.total_spins as f64 * 100.0
        };
    }
}

// aliases accept camelCase exports
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    #[serde(alias = "isActive")]
    pub is_active: bool,
    #[serde(alias = "isChecked")]
    pub is_checked: bool,
    #[serde(default, alias = "customWeight", skip_serializing_if = "Option::is_none")]
    pub custom_weight: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default = "Utc::now", alias = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(default = "Utc::now", alias = "lastModified")]
    pub last_modified: DateTime<Utc>,
    #[serde(default)]
    pub stats: SpinStats,
}

impl User {
    fn has_custom_weight(&self) -> bool {
        self.custom_weight.is_some_and(|weight| weight > 0.0)
    }

    fn touch(&mut self) {
        self.last_modified = Utc::now();
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserStatsEntry {
    pub wins: u64,
    pub total_spins: u64,
    pub win_rate: f64,
    pub participation_rate: f64,
}

#[derive(Debug, Clone, Default)]
pub struct UserManager {
    users: Vec<User>,
}

impl UserManager {
    pub fn from_users(users: Vec<User>) -> Self {
        Self { users }
    }

    pub fn add_user(&mut self, name: &str) -> Result<User, UserError> {
        let name = validate_name(name)?;
        if self.users.len() >= MAX_USERS {
            return Err(UserError::TooManyUsers);
        }
        let now = Utc::now();
        let color = USER_COLORS
            .choose(&mut rand::thread_rng())
            .map(|color| color.to_string());

        let user = User {
            id: Uuid::new_v4().to_string(),
            name,
            is_active: true,
            is_checked: true,
            custom_weight: None,
            color,
            created_at: now,
            last_modified: now,
            stats: SpinStats::default(),
        };

        self.users.push(user.clone());
        Ok(user)
    }

    pub fn remove_user(&mut self, id: &str) -> bool {
        match self.users.iter().position(|user| user.id == id) {
            Some(index) => {
                self.users.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn toggle_participation(&mut self, id: &str) -> Result<&User, UserError> {
        let user = self.find_mut(id)?;
        user.is_checked = !user.is_checked;
        user.touch();
        Ok(user)
    }

    pub fn update_weight(&mut self, id: &str, weight: f64) -> Result<&User, UserError> {
        if !(0.0..=100.0).contains(&weight) {
            return Err(UserError::InvalidWeight);
        }
        let user = self.find_mut(id)?;
        user.custom_weight = if weight == 0.0 { None } else { Some(weight) };
        user.touch();
        Ok(user)
    }

    pub fn update_name(&mut self, id: &str, name: &str) -> Result<&User, UserError> {
        let name = validate_name(name)?;
        let user = self.find_mut(id)?;
        user.name = name;
        user.touch();
        Ok(user)
    }

    pub fn all_users(&self) -> &[User] {
        &self.users
    }

    pub fn active_users(&self) -> Vec<&User> {
        self.users.iter().filter(|user| user.is_checked).collect()
    }

    pub fn get(&self, id: &str) -> Option<&User> {
        self.users.iter().find(|user| user.id == id)
    }

    pub fn count(&self) -> usize {
        self.users.len()
    }

    pub fn active_count(&self) -> usize {
        self.users.iter().filter(|user| user.is_checked).count()
    }

    // custom weights are percentages; the rest of 100 is split evenly, then
    // everything is rescaled to sum to one
    pub fn wheel_segments(&self) -> Vec<WheelSegment> {
        let active = self.active_users();
        if active.is_empty() {
            debug!("no active users, using default segments");
            return default_segments();
        }

        let (weighted, unweighted): (Vec<&User>, Vec<&User>) =
            active.iter().copied().partition(|user| user.has_custom_weight());

        let total_custom: f64 = weighted.iter().filter_map(|user| user.custom_weight).sum();
        let remaining = (100.0 - total_custom).max(0.0);
        let equal_share = if unweighted.is_empty() {
            0.0
        } else {
            remaining / unweighted.len() as f64
        };
        let fallback_share = 100.0 / active.len() as f64;

        debug!(
            active = active.len(),
            total = self.users.len(),
            weighted = weighted.len(),
            total_custom,
            equal_share,
            "building wheel segments"
        );

        let mut segments = Vec::with_capacity(active.len());
        for user in &weighted {
            segments.push(user_segment(user, user.custom_weight.unwrap_or(0.0)));
        }
        for user in &unweighted {
            let share = if equal_share > 0.0 {
                equal_share
            } else {
                fallback_share
            };
            segments.push(user_segment(user, share));
        }

        let total: f64 = segments.iter().map(|segment| segment.probability).sum();
        if total > 0.0 {
            for segment in &mut segments {
                segment.probability /= total;
            }
        }

        segments
    }

    pub fn user_stats(&self) -> BTreeMap<String, UserStatsEntry> {
        let total_wins: u64 = self.users.iter().map(|user| user.stats.wins).sum();

        self.users
            .iter()
            .map(|user| {
                let wins = user.stats.wins;
                let selection_rate = if total_wins > 0 {
                    wins as f64 / total_wins as f64 * 100.0
                } else {
                    0.0
                };
                let entry = UserStatsEntry {
                    wins,
                    total_spins: wins,
                    win_rate: selection_rate,
                    participation_rate: if user.is_checked { 100.0 } else { 0.0 },
                };
                (user.id.clone(), entry)
            })
            .collect()
    }

    pub fn record_win(&mut self, id: &str) -> Result<(), UserError> {
        let user = self.find_mut(id)?;
        user.stats.wins = user.stats.wins.saturating_add(1);
        user.stats.total_spins = user.stats.total_spins.saturating_add(1);
        user.stats.recompute_rate();
        user.touch();
        Ok(())
    }

    pub fn record_spin(&mut self, id: &str) -> Result<(), UserError> {
        let user = self.find_mut(id)?;
        user.stats.total_spins = user.stats.total_spins.saturating_add(1);
        user.stats.recompute_rate();
        user.touch();
        Ok(())
    }

    pub fn reset_user_stats(&mut self, id: &str) -> Result<&User, UserError> {
        let user = self.find_mut(id)?;
        user.stats = SpinStats::default();
        user.touch();
        Ok(user)
    }

    pub fn reset_all_stats(&mut self) {
        for user in &mut self.users {
            user.stats = SpinStats::default();
            user.touch();
        }
    }

    pub fn export_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&self.users)
    }

    pub fn export_csv(&self) -> Result<String, csv::Error> {
        let header = [
            "ID",
            "Name",
            "Active",
            "Checked",
            "Custom Weight",
            "Wins",
            "Total Spins",
            "Win Rate",
            "Created",
            "Modified",
        ];
        let rows = self.users.iter().map(|user| {
            vec![
                user.id.clone(),
                user.name.clone(),
                yes_no(user.is_active),
                yes_no(user.is_checked),
                user.custom_weight.map(|weight| weight.to_string()).unwrap_or_default(),
                user.stats.wins.to_string(),
                user.stats.total_spins.to_string(),
                user.stats.win_rate.to_string(),
                user.created_at.to_rfc3339_opts(SecondsFormat::Millis, true),
                user.last_modified.to_rfc3339_opts(SecondsFormat::Millis, true),
            ]
        });
        quoted_csv(&header, rows)
    }

    pub fn import_json(&mut self, json: &str) -> Result<usize, UserError> {
        let entries: Vec<serde_json::Value> =
            serde_json::from_str(json).map_err(|_| UserError::InvalidImport)?;

        let mut imported = 0;
        for entry in entries {
            if self.users.len() >= MAX_USERS {
                break;
            }
            let Ok(user) = serde_json::from_value::<User>(entry) else {
                continue;
            };
            if !is_importable(&user) || self.get(&user.id).is_some() {
                continue;
            }
            self.users.push(user);
            imported += 1;
        }

        Ok(imported)
    }

    fn find_mut(&mut self, id: &str) -> Result<&mut User, UserError> {
        self.users
            .iter_mut()
            .find(|user| user.id == id)
            .ok_or_else(|| UserError::NotFound(id.to_string()))
    }
}

fn validate_name(name: &str) -> Result<String, UserError> {
    let trimmed = name.trim();
    let chars = trimmed.chars().count();
    if chars == 0 || chars > MAX_NAME_CHARS {
        return Err(UserError::InvalidName);
    }
    Ok(trimmed.to_string())
}

fn is_importable(user: &User) -> bool {
    let name_chars = user.name.chars().count();
    !user.id.trim().is_empty()
        && name_chars > 0
        && name_chars <= MAX_NAME_CHARS
        && user
            .custom_weight
            .is_none_or(|weight| (0.0..=100.0).contains(&weight))
}

fn user_segment(user: &User, weight: f64) -> WheelSegment {
    WheelSegment {
        id: user.id.clone(),
        label: user.name.clone(),
        probability: weight / 100.0,
        color: user.color.clone(),
    }
}

fn yes_no(value: bool) -> String {
    let label = if value { "Yes" } else { "No" };
    label.to_string()
}
