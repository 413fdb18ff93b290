use std::sync::{Arc, Mutex, RwLock, RwLockReadGuard, RwLockWriteGuard};

use anyhow::{anyhow, Result};
use chrono::{DateTime, Utc};

use crate::domain::entities::alert::{Alert, ConditionKey};
use crate::domain::entities::device::Device;
use crate::domain::entities::snapshot::FleetSnapshot;
use crate::domain::lifecycle::AlertBook;
use crate::domain::ports::clock::Clock;
use crate::domain::ports::notifier::Notifier;
use crate::domain::ports::random::RandomSource;
use crate::domain::rules::{default_rules, RuleEngine};
use crate::domain::simulation::{advance, create_fleet, SimulationProfile};
use crate::domain::value_objects::thresholds::ThresholdConfig;

/// Startup parameters of the monitor.
#[derive(Debug, Clone, Copy)]
pub struct MonitorSettings {
    pub fleet_size: usize,
    pub thresholds: ThresholdConfig,
    pub profile: SimulationProfile,
}

/// Result of a single tick.
#[derive(Debug, Clone)]
pub struct TickReport {
    pub tick: u64,
    pub at: DateTime<Utc>,
    pub devices: usize,
    pub qualifying: usize,
    pub raised: Vec<Alert>,
    pub active_alerts: usize,
}

struct FleetState {
    tick: u64,
    devices: Vec<Device>,
    thresholds: ThresholdConfig,
    book: AlertBook,
}

/// Drives the fleet: advance → evaluate → reconcile, once per tick.
///
/// A tick runs entirely under the state write lock, so readers only ever see
/// the fleet before or after a tick. Operator actions take the same lock and
/// are picked up by the next tick.
pub struct MonitorService {
    engine: RuleEngine,
    profile: SimulationProfile,
    clock: Arc<dyn Clock>,
    notifier: Arc<dyn Notifier>,
    rng: Mutex<Box<dyn RandomSource>>,
    state: RwLock<FleetState>,
}

impl MonitorService {
    /// Seed the fleet and build the monitor around it.
    #[must_use]
    pub fn new(
        settings: MonitorSettings,
        clock: Arc<dyn Clock>,
        mut rng: Box<dyn RandomSource>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        let profile = settings.profile.normalized();
        let devices = create_fleet(settings.fleet_size, clock.now(), &profile, rng.as_mut());
        tracing::debug!(devices = devices.len(), "fleet created");
        Self {
            engine: RuleEngine::new(default_rules(), profile.sample_period_secs),
            profile,
            clock,
            notifier,
            rng: Mutex::new(rng),
            state: RwLock::new(FleetState {
                tick: 0,
                devices,
                thresholds: settings.thresholds,
                book: AlertBook::new(),
            }),
        }
    }

    #[must_use]
    pub const fn profile(&self) -> &SimulationProfile {
        &self.profile
    }

    /// Run a single tick and announce newly raised alerts.
    ///
    /// # Errors
    ///
    /// Returns an error if an internal lock is poisoned.
    pub fn run_once(&self) -> Result<TickReport> {
        let now = self.clock.now();
        let report = {
            let mut rng = self
                .rng
                .lock()
                .map_err(|_| anyhow!("random source lock poisoned"))?;
            let mut state = self.write_state()?;

            let devices = advance(&state.devices, now, &self.profile, &mut **rng);
            let qualifying = self
                .engine
                .evaluate(&devices, &state.thresholds, state.book.dismissed());
            let raised = state.book.reconcile(&qualifying, now);
            state.devices = devices;
            state.tick += 1;

            TickReport {
                tick: state.tick,
                at: now,
                devices: state.devices.len(),
                qualifying: qualifying.len(),
                raised,
                active_alerts: state.book.active().len(),
            }
        };

        for alert in &report.raised {
            tracing::warn!(key = %alert.key, "{}", alert.title());
            if let Err(e) = self.notifier.notify_raised(alert) {
                tracing::warn!("Alert notification failed: {e}");
            }
        }
        tracing::info!(
            tick = report.tick,
            qualifying = report.qualifying,
            raised = report.raised.len(),
            active = report.active_alerts,
            "tick complete"
        );
        Ok(report)
    }

    /// Consistent copy of the fleet between ticks.
    ///
    /// # Errors
    ///
    /// Returns an error if the state lock is poisoned.
    pub fn snapshot(&self) -> Result<FleetSnapshot> {
        let state = self.read_state()?;
        Ok(FleetSnapshot {
            tick: state.tick,
            taken_at: self.clock.now(),
            devices: state.devices.clone(),
            active_alerts: state.book.active().to_vec(),
            thresholds: state.thresholds,
            dismissed_count: state.book.dismissed().len(),
        })
    }

    /// # Errors
    ///
    /// Returns an error if the state lock is poisoned.
    pub fn thresholds(&self) -> Result<ThresholdConfig> {
        Ok(self.read_state()?.thresholds)
    }

    /// Replace the threshold configuration used from the next tick on.
    ///
    /// # Errors
    ///
    /// Returns an error if the state lock is poisoned.
    pub fn update_thresholds(&self, thresholds: ThresholdConfig) -> Result<()> {
        let mut state = self.write_state()?;
        if state.thresholds != thresholds {
            tracing::info!(
                cpu = %thresholds.cpu_threshold(),
                ram = %thresholds.ram_threshold(),
                sustain_secs = thresholds.sustain_secs(),
                "thresholds updated"
            );
            state.thresholds = thresholds;
        }
        Ok(())
    }

    /// Dismiss one condition. The key is recorded even when no alert is active
    /// for it.
    ///
    /// # Errors
    ///
    /// Returns an error if the state lock is poisoned.
    pub fn dismiss(&self, key: &ConditionKey) -> Result<Option<Alert>> {
        let removed = self.write_state()?.book.dismiss(key);
        tracing::info!(%key, active = removed.is_some(), "condition dismissed");
        if let Some(alert) = &removed {
            self.announce_dismissed(alert);
        }
        Ok(removed)
    }

    /// Dismiss every active alert.
    ///
    /// # Errors
    ///
    /// Returns an error if the state lock is poisoned.
    pub fn dismiss_all(&self) -> Result<Vec<Alert>> {
        let removed = self.write_state()?.book.dismiss_all();
        tracing::info!(count = removed.len(), "all active alerts dismissed");
        for alert in &removed {
            self.announce_dismissed(alert);
        }
        Ok(removed)
    }

    fn announce_dismissed(&self, alert: &Alert) {
        if let Err(e) = self.notifier.notify_dismissed(alert) {
            tracing::warn!("Dismissal notification failed: {e}");
        }
    }

    fn read_state(&self) -> Result<RwLockReadGuard<'_, FleetState>> {
        self.state
            .read()
            .map_err(|_| anyhow!("fleet state lock poisoned"))
    }

    fn write_state(&self) -> Result<RwLockWriteGuard<'_, FleetState>> {
        self.state
            .write()
            .map_err(|_| anyhow!("fleet state lock poisoned"))
    }
}
