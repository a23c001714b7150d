//! Device handles and the two host-facing seams: name resolution at setup,
//! and state-change notification at every tick.

use tracing::{debug, warn};

use crate::DeviceNames;

/// Opaque handle to a host thruster, valid for the lifetime of the host's
/// device table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ThrusterId(pub usize);

/// Opaque handle to a host rate gyro.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GyroId(pub usize);

/// Name → handle resolution offered by the host. Only used during setup.
pub trait DeviceLookup {
    fn find_thruster(&self, name: &str) -> Option<ThrusterId>;
    fn find_rate_gyro(&self, name: &str) -> Option<GyroId>;
}

/// Receives the output of every tick. Horizontal thrusters report a torque
/// of zero.
pub trait ThrusterSink {
    fn notify_state_change(&mut self, id: ThrusterId, force: f64, torque: f64);
}

/// Every device the controller drives, resolved once. `None` slots are
/// tolerated: their writes are skipped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeviceSet {
    /// Front-right, front-left, rear-left, rear-right.
    pub vertical: [Option<ThrusterId>; 4],
    /// Right, left.
    pub horizontal: [Option<ThrusterId>; 2],
    pub gyro: Option<GyroId>,
}

impl DeviceSet {
    pub fn resolve(lookup: &impl DeviceLookup, names: &DeviceNames) -> Self {
        let find = |name: &str| {
            let id = lookup.find_thruster(name);
            if id.is_none() {
                warn!(thruster = name, "thruster not found; its output will be skipped");
            }
            id
        };
        let vertical = [
            find(&names.vertical[0]),
            find(&names.vertical[1]),
            find(&names.vertical[2]),
            find(&names.vertical[3]),
        ];
        let horizontal = [find(&names.horizontal[0]), find(&names.horizontal[1])];
        let gyro = lookup.find_rate_gyro(&names.gyro);
        if gyro.is_none() {
            debug!(gyro = %names.gyro, "no rate gyro; yaw rate from differencing");
        }
        Self { vertical, horizontal, gyro }
    }
}
