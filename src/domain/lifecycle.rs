//! Alert lifecycle: merging qualifying conditions into the active set and
//! retiring alerts through operator dismissal.
//!
//! There is no automatic resolution. An alert stays active after its metric
//! recovers and only leaves through [`dismiss`]. Each condition key moves
//! through `Unseen -> Active -> Dismissed`, and `Dismissed` is terminal.

use std::collections::{BTreeSet, HashSet};

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::entities::alert::{Alert, AlertCondition, ConditionKey};

/// Append-only set of dismissed condition keys.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DismissalSet(BTreeSet<ConditionKey>);

impl DismissalSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn contains(&self, key: &ConditionKey) -> bool {
        self.0.contains(key)
    }

    /// Records `key`. Returns `false` when it was already dismissed.
    pub fn insert(&mut self, key: ConditionKey) -> bool {
        self.0.insert(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ConditionKey> {
        self.0.iter()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ConditionState {
    Unseen,
    Active,
    Dismissed,
}

/// New active set: `active` unchanged, followed by one fresh alert per
/// qualifying condition whose key is not yet active.
///
/// Existing alerts keep their original `observed_value` and `raised_at`.
#[must_use]
pub fn reconcile(active: &[Alert], qualifying: &[AlertCondition], now: DateTime<Utc>) -> Vec<Alert> {
    let mut seen: HashSet<ConditionKey> = active.iter().map(|a| a.key).collect();
    let mut merged = active.to_vec();
    for condition in qualifying {
        if seen.insert(*condition.key()) {
            merged.push(Alert::raise(condition, now));
        }
    }
    merged
}

/// Removes the alert for `key` and records the key as dismissed.
///
/// A key with no active alert is still recorded, suppressing it before it
/// ever fires.
#[must_use]
pub fn dismiss(
    active: &[Alert],
    dismissed: &DismissalSet,
    key: &ConditionKey,
) -> (Vec<Alert>, DismissalSet) {
    let remaining = active.iter().filter(|a| a.key != *key).cloned().collect();
    let mut dismissed = dismissed.clone();
    dismissed.insert(*key);
    (remaining, dismissed)
}

/// Active alerts and dismissed keys, mutated in place by the monitor.
#[derive(Debug, Clone, Default)]
pub struct AlertBook {
    active: Vec<Alert>,
    dismissed: DismissalSet,
}

impl AlertBook {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn active(&self) -> &[Alert] {
        &self.active
    }

    #[must_use]
    pub const fn dismissed(&self) -> &DismissalSet {
        &self.dismissed
    }

    /// Merges `qualifying` into the active set and returns only the alerts
    /// raised by this call. Dismissed keys are refused even if present in
    /// `qualifying`.
    pub fn reconcile(&mut self, qualifying: &[AlertCondition], now: DateTime<Utc>) -> Vec<Alert> {
        let admissible: Vec<AlertCondition> = qualifying
            .iter()
            .filter(|c| !self.dismissed.contains(c.key()))
            .cloned()
            .collect();
        let before = self.active.len();
        self.active = reconcile(&self.active, &admissible, now);
        self.active[before..].to_vec()
    }

    /// Dismisses `key`, returning the alert it removed, if any.
    pub fn dismiss(&mut self, key: &ConditionKey) -> Option<Alert> {
        let removed = self.active.iter().find(|a| a.key == *key).cloned();
        let (active, dismissed) = dismiss(&self.active, &self.dismissed, key);
        self.active = active;
        self.dismissed = dismissed;
        removed
    }

    /// Dismisses every active alert, returning them in their previous order.
    pub fn dismiss_all(&mut self) -> Vec<Alert> {
        let removed = std::mem::take(&mut self.active);
        for alert in &removed {
            self.dismissed.insert(alert.key);
        }
        removed
    }

    #[must_use]
    pub fn state_of(&self, key: &ConditionKey) -> ConditionState {
        if self.dismissed.contains(key) {
            ConditionState::Dismissed
        } else if self.active.iter().any(|a| a.key == *key) {
            ConditionState::Active
        } else {
            ConditionState::Unseen
        }
    }
}
