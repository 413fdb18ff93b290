use chrono::{DateTime, Utc};
use serde::Serialize;

use super::alert::Alert;
use super::device::{Device, DeviceId};
use crate::domain::value_objects::device_status::DeviceStatus;
use crate::domain::value_objects::metric_kind::MetricKind;
use crate::domain::value_objects::thresholds::ThresholdConfig;

/// Read-only copy of the fleet state between two ticks.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FleetSnapshot {
    pub tick: u64,
    pub taken_at: DateTime<Utc>,
    pub devices: Vec<Device>,
    pub active_alerts: Vec<Alert>,
    pub thresholds: ThresholdConfig,
    pub dismissed_count: usize,
}

impl FleetSnapshot {
    #[must_use]
    pub fn device(&self, id: DeviceId) -> Option<&Device> {
        self.devices.iter().find(|d| d.id == id)
    }

    /// Number of devices in each status, in `DeviceStatus::ALL` order.
    #[must_use]
    pub fn status_counts(&self) -> [(DeviceStatus, usize); 4] {
        DeviceStatus::ALL.map(|status| {
            let count = self.devices.iter().filter(|d| d.status == status).count();
            (status, count)
        })
    }

    #[must_use]
    pub fn alerts_for(&self, id: DeviceId) -> Vec<&Alert> {
        self.active_alerts.iter().filter(|a| a.device_id == id).collect()
    }

    /// Up to `limit` devices with the highest latest value of `metric`.
    #[must_use]
    pub fn hottest(&self, metric: MetricKind, limit: usize) -> Vec<(&Device, f64)> {
        let mut ranked: Vec<(&Device, f64)> = self
            .devices
            .iter()
            .filter_map(|d| d.latest_value(metric).map(|v| (d, v)))
            .collect();
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
        ranked.truncate(limit);
        ranked
    }

    /// Fleet-wide mean of the latest value of `metric`.
    #[must_use]
    pub fn average(&self, metric: MetricKind) -> Option<f64> {
        let values: Vec<f64> = self
            .devices
            .iter()
            .filter_map(|d| d.latest_value(metric))
            .collect();
        if values.is_empty() {
            return None;
        }
        #[allow(clippy::cast_precision_loss)]
        let count = values.len() as f64;
        Some(values.iter().sum::<f64>() / count)
    }
}

#[cfg(test)]
#[allow(clippy::expect_used)]
mod tests {
    use super::*;
    use crate::domain::entities::alert::{AlertCondition, ConditionKey};
    use crate::domain::entities::history::MetricHistory;
    use crate::domain::entities::sample::MetricSample;
    use crate::domain::value_objects::device_kind::DeviceKind;

    fn device(id: u32, status: DeviceStatus, cpu: f64) -> Device {
        let now = Utc::now();
        let mut history = MetricHistory::with_capacity(2);
        history.push(MetricSample::new(now, cpu, 50.0, 60.0, 10.0));
        Device {
            id: DeviceId::new(id),
            name: format!("SRV-{id:03}"),
            kind: DeviceKind::Server,
            status,
            location: "NYC-DC1".to_string(),
            address: format!("10.0.0.{id}"),
            history,
            last_update: now,
        }
    }

    fn make_snapshot() -> FleetSnapshot {
        let thresholds = ThresholdConfig::default();
        let key = ConditionKey::new(DeviceId::new(2), MetricKind::Cpu, &thresholds);
        let alert = Alert::raise(&AlertCondition::new(key, "SRV-002".to_string(), 91.0), Utc::now());
        FleetSnapshot {
            tick: 4,
            taken_at: Utc::now(),
            devices: vec![
                device(1, DeviceStatus::Online, 20.0),
                device(2, DeviceStatus::Warning, 91.0),
                device(3, DeviceStatus::Online, 45.0),
            ],
            active_alerts: vec![alert],
            thresholds,
            dismissed_count: 0,
        }
    }

    #[test]
    fn status_counts_cover_every_status() {
        let counts = make_snapshot().status_counts();
        assert_eq!(counts[0], (DeviceStatus::Online, 2));
        assert_eq!(counts[1], (DeviceStatus::Warning, 1));
        assert_eq!(counts[2], (DeviceStatus::Error, 0));
        assert_eq!(counts[3], (DeviceStatus::Offline, 0));
    }

    #[test]
    fn hottest_ranks_descending() {
        let snapshot = make_snapshot();
        let hottest = snapshot.hottest(MetricKind::Cpu, 2);
        assert_eq!(hottest.len(), 2);
        assert_eq!(hottest[0].0.id, DeviceId::new(2));
        assert_eq!(hottest[1].0.id, DeviceId::new(3));
    }

    #[test]
    fn lookup_helpers() {
        let snapshot = make_snapshot();
        assert!(snapshot.device(DeviceId::new(3)).is_some());
        assert!(snapshot.device(DeviceId::new(9)).is_none());
        assert_eq!(snapshot.alerts_for(DeviceId::new(2)).len(), 1);
        assert!(snapshot.alerts_for(DeviceId::new(1)).is_empty());
    }

    #[test]
    fn average_of_latest_values() {
        let snapshot = make_snapshot();
        let avg = snapshot.average(MetricKind::Cpu).expect("devices present");
        assert!((avg - 52.0).abs() < 1e-9);
        let empty = FleetSnapshot {
            devices: vec![],
            ..snapshot
        };
        assert!(empty.average(MetricKind::Ram).is_none());
    }
}
