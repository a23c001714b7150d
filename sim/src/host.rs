use control::{DeviceLookup, DeviceNames, DeviceSet, GyroId, ThrusterId, ThrusterSink};
use tracing::trace;

use crate::ThrusterForces;

#[derive(Debug, Clone, PartialEq)]
pub struct ThrusterSlot {
    pub name: String,
    pub force: f64,
    pub torque: f64,
    /// Number of state-change notifications received.
    pub notifications: u64,
}

/// The vehicle's named device table, as the host sees it.
#[derive(Debug, Clone, Default)]
pub struct HostDevices {
    thrusters: Vec<ThrusterSlot>,
    gyro: Option<String>,
}

impl HostDevices {
    pub fn new() -> Self {
        Self::default()
    }

    /// The six thrusters and (optionally) the gyro named in `names`.
    pub fn standard(names: &DeviceNames, with_gyro: bool) -> Self {
        let mut devices = Self::new();
        for name in names.vertical.iter().chain(&names.horizontal) {
            devices.add_thruster(name);
        }
        if with_gyro {
            devices.set_gyro(&names.gyro);
        }
        devices
    }

    pub fn add_thruster(&mut self, name: &str) -> ThrusterId {
        self.thrusters.push(ThrusterSlot {
            name: name.to_owned(),
            force: 0.0,
            torque: 0.0,
            notifications: 0,
        });
        ThrusterId(self.thrusters.len() - 1)
    }

    pub fn set_gyro(&mut self, name: &str) {
        self.gyro = Some(name.to_owned());
    }

    pub fn has_gyro(&self) -> bool {
        self.gyro.is_some()
    }

    pub fn thruster(&self, id: ThrusterId) -> Option<&ThrusterSlot> {
        self.thrusters.get(id.0)
    }

    pub fn thrusters(&self) -> &[ThrusterSlot] {
        &self.thrusters
    }

    /// Current thruster outputs in layout order. Unresolved slots read zero.
    pub fn forces(&self, set: &DeviceSet) -> ThrusterForces {
        let slot = |id: &Option<ThrusterId>| id.and_then(|id| self.thruster(id));
        ThrusterForces {
            vertical: std::array::from_fn(|i| {
                slot(&set.vertical[i]).map_or((0.0, 0.0), |s| (s.force, s.torque))
            }),
            horizontal: std::array::from_fn(|i| slot(&set.horizontal[i]).map_or(0.0, |s| s.force)),
        }
    }
}

impl DeviceLookup for HostDevices {
    fn find_thruster(&self, name: &str) -> Option<ThrusterId> {
        self.thrusters.iter().position(|t| t.name == name).map(ThrusterId)
    }

    fn find_rate_gyro(&self, name: &str) -> Option<GyroId> {
        self.gyro.as_deref().filter(|g| *g == name).map(|_| GyroId(0))
    }
}

impl ThrusterSink for HostDevices {
    fn notify_state_change(&mut self, id: ThrusterId, force: f64, torque: f64) {
        if let Some(slot) = self.thrusters.get_mut(id.0) {
            trace!(thruster = %slot.name, force, torque, "thruster state change");
            slot.force = force;
            slot.torque = torque;
            slot.notifications += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_table_resolves_every_default_name() {
        let names = DeviceNames::default();
        let host = HostDevices::standard(&names, true);
        let set = DeviceSet::resolve(&host, &names);
        assert!(set.vertical.iter().chain(&set.horizontal).all(Option::is_some));
        assert_eq!(set.gyro, Some(GyroId(0)));

        let no_gyro = HostDevices::standard(&names, false);
        assert_eq!(DeviceSet::resolve(&no_gyro, &names).gyro, None);
    }

    #[test]
    fn notifications_update_the_slot() {
        let mut host = HostDevices::new();
        let id = host.add_thruster("Thruster_R");
        host.notify_state_change(id, 0.6, 0.0);
        host.notify_state_change(id, 0.3, 0.0);
        let slot = host.thruster(id).unwrap();
        assert_eq!(slot.force, 0.3);
        assert_eq!(slot.notifications, 2);
        assert_eq!(host.thrusters().len(), 1);
        assert_eq!(host.thrusters()[0].name, "Thruster_R");
    }
}
