use crate::errors::{UserError, WheelError};
use crate::history::{HistoryTracker, SpinRecord};
use crate::models::AppData;
use crate::users::UserManager;
use crate::wheel::{is_default_segment, SpinResult, WheelEngine};
use rand::Rng;
use serde::Serialize;
use tracing::{info, warn};

pub const DEFAULT_USER_NAMES: [&str; 4] = ["Yes", "No", "Yes", "No"];

#[derive(Debug, Clone, Serialize)]
pub struct SpinOutcome {
    #[serde(flatten)]
    pub result: SpinResult,
    pub record: Option<SpinRecord>,
}

#[derive(Debug, Clone)]
pub struct Workspace {
    users: UserManager,
    history: HistoryTracker,
    spin_duration_ms: u64,
}

impl Workspace {
    pub fn new(history_limit: usize, spin_duration_ms: u64) -> Self {
        Self::from_data(AppData::default(), history_limit, spin_duration_ms)
    }

    pub fn from_data(data: AppData, history_limit: usize, spin_duration_ms: u64) -> Self {
        Self {
            users: UserManager::from_users(data.users),
            history: HistoryTracker::with_records(data.history, history_limit),
            spin_duration_ms,
        }
    }

    pub fn snapshot(&self) -> AppData {
        AppData {
            users: self.users.all_users().to_vec(),
            history: self.history.all().to_vec(),
        }
    }

    pub fn users(&self) -> &UserManager {
        &self.users
    }

    pub fn users_mut(&mut self) -> &mut UserManager {
        &mut self.users
    }

    pub fn history(&self) -> &HistoryTracker {
        &self.history
    }

    pub fn history_mut(&mut self) -> &mut HistoryTracker {
        &mut self.history
    }

    pub fn seed_default_users(&mut self) -> Result<(), UserError> {
        for name in DEFAULT_USER_NAMES {
            self.users.add_user(name)?;
        }
        info!(count = DEFAULT_USER_NAMES.len(), "seeded default users");
        Ok(())
    }

    pub fn wheel(&self) -> WheelEngine {
        WheelEngine::new(self.users.wheel_segments(), self.spin_duration_ms)
    }

    pub fn spin<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<SpinOutcome, WheelError> {
        let result = self.wheel().spin(rng)?;
        Ok(self.record_result(result))
    }

    pub fn record_result(&mut self, result: SpinResult) -> SpinOutcome {
        let segment = &result.segment;
        if is_default_segment(&segment.id) {
            return SpinOutcome { result, record: None };
        }

        let Some(winner) = self.users.get(&segment.id) else {
            warn!(segment = %segment.id, "spin landed on an unknown user");
            return SpinOutcome { result, record: None };
        };
        let winner_name = winner.name.clone();

        let others: Vec<String> = self
            .users
            .active_users()
            .into_iter()
            .filter(|user| user.id != segment.id)
            .map(|user| user.id.clone())
            .collect();

        if let Err(err) = self.users.record_win(&segment.id) {
            warn!("failed to record win: {err}");
        }
        for id in &others {
            if let Err(err) = self.users.record_spin(id) {
                warn!("failed to record spin: {err}");
            }
        }

        let record = self.history.add_record(
            &segment.id,
            &winner_name,
            &segment.label,
            segment.probability,
        );
        SpinOutcome {
            result,
            record: Some(record),
        }
    }

    pub fn reset_all(&mut self) {
        self.history.clear();
        self.users.reset_all_stats();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::DEFAULT_MAX_HISTORY;
    use crate::wheel::DEFAULT_SPIN_DURATION_MS;
    use rand::{rngs::StdRng, SeedableRng};

    fn workspace() -> Workspace {
        Workspace::new(DEFAULT_MAX_HISTORY, DEFAULT_SPIN_DURATION_MS)
    }

    #[test]
    fn seeding_adds_yes_no_pairs() {
        let mut workspace = workspace();
        workspace.seed_default_users().unwrap();
        let names: Vec<&str> = workspace
            .users()
            .all_users()
            .iter()
            .map(|user| user.name.as_str())
            .collect();
        assert_eq!(names, DEFAULT_USER_NAMES);
    }

    #[test]
    fn spin_credits_winner_and_participants() {
        let mut workspace = workspace();
        let ann = workspace.users_mut().add_user("Ann").unwrap().id;
        let bob = workspace.users_mut().add_user("Bob").unwrap().id;
        let cid = workspace.users_mut().add_user("Cid").unwrap().id;
        workspace.users_mut().toggle_participation(&cid).unwrap();

        // Ann's segment covers [0, 0.5]
        let result = workspace.wheel().spin_with_draw(0.1).unwrap();
        let outcome = workspace.record_result(result);

        let record = outcome.record.expect("spin should be recorded");
        assert_eq!(record.user_id, ann);
        assert_eq!(record.user_name, "Ann");
        assert_eq!(record.result, "Ann");
        assert!((record.probability - 0.5).abs() < 1e-9);

        let users = workspace.users();
        assert_eq!(users.get(&ann).unwrap().stats.wins, 1);
        assert_eq!(users.get(&bob).unwrap().stats.wins, 0);
        assert_eq!(users.get(&bob).unwrap().stats.total_spins, 1);
        assert_eq!(users.get(&cid).unwrap().stats.total_spins, 0);
        assert_eq!(workspace.history().len(), 1);
    }

    #[test]
    fn default_segments_are_not_recorded() {
        let mut workspace = workspace();
        let mut rng = StdRng::seed_from_u64(3);
        let outcome = workspace.spin(&mut rng).unwrap();
        assert!(is_default_segment(&outcome.result.segment.id));
        assert!(outcome.record.is_none());
        assert!(workspace.history().is_empty());
    }

    #[test]
    fn random_spins_always_pick_a_participant() {
        let mut workspace = workspace();
        workspace.seed_default_users().unwrap();
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..50 {
            let outcome = workspace.spin(&mut rng).unwrap();
            assert!(outcome.record.is_some());
        }
        let wins: u64 = workspace
            .users()
            .all_users()
            .iter()
            .map(|user| user.stats.wins)
            .sum();
        assert_eq!(wins, 50);
        assert_eq!(workspace.history().len(), 50);
    }

    #[test]
    fn reset_all_keeps_roster() {
        let mut workspace = workspace();
        workspace.seed_default_users().unwrap();
        workspace.spin(&mut StdRng::seed_from_u64(5)).unwrap();
        workspace.reset_all();
        assert_eq!(workspace.users().count(), 4);
        assert!(workspace.history().is_empty());
        assert!(workspace
            .users()
            .all_users()
            .iter()
            .all(|user| user.stats.wins == 0 && user.stats.total_spins == 0));
    }

    #[test]
    fn snapshot_restores_state() {
        let mut workspace = workspace();
        workspace.seed_default_users().unwrap();
        workspace.spin(&mut StdRng::seed_from_u64(9)).unwrap();

        let restored = Workspace::from_data(workspace.snapshot(), 10, 500);
        assert_eq!(restored.users().all_users(), workspace.users().all_users());
        assert_eq!(restored.history().all(), workspace.history().all());
        assert_eq!(restored.wheel().spin_duration_ms(), 500);
    }
}
