use serde::{Deserialize, Serialize};

use crate::{JoystickAxis, JoystickButton, SetupError, ThrustMixer};

/// Per-axis PD gains plus the stick gain used to build each axis reference.
/// Index order is depth, roll, pitch, yaw.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AxisGains {
    pub p: [f64; 4],
    pub d: [f64; 4],
    /// Depth: reference increment per tick. Roll/pitch (manual mode):
    /// reference per unit deflection. Yaw: rate reference per unit deflection.
    pub stick: [f64; 4],
}

impl Default for AxisGains {
    fn default() -> Self {
        Self {
            p: [10.0, 1.0, 1.0, 0.01],
            d: [5.0, 1.0, 1.0, 0.002],
            stick: [-0.0001, 0.0, 0.0, 0.0],
        }
    }
}

/// Gains for the lateral-velocity loop that synthesizes roll/pitch
/// references outside manual mode. Index 0 feeds roll, 1 feeds pitch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LateralGains {
    pub p: [f64; 2],
    pub d: [f64; 2],
    /// Desired lateral velocity per unit stick deflection.
    pub stick: [f64; 2],
}

impl Default for LateralGains {
    fn default() -> Self {
        Self {
            p: [1.0, 1.0],
            d: [1.0, 1.0],
            stick: [0.0, 0.0],
        }
    }
}

/// Which joystick input drives which control channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AxisMapping {
    pub depth: JoystickAxis,
    pub roll: JoystickAxis,
    pub pitch: JoystickAxis,
    pub yaw: JoystickAxis,
    /// Forward/back channel of the horizontal thrusters.
    pub forward: JoystickAxis,
    /// Turn channel of the horizontal thrusters.
    pub turn: JoystickAxis,
    /// Stabilization on/off.
    pub toggle: JoystickButton,
}

impl AxisMapping {
    /// Axis feeding control channel `index` (depth, roll, pitch, yaw).
    pub fn channel(&self, index: usize) -> JoystickAxis {
        match index {
            0 => self.depth,
            1 => self.roll,
            2 => self.pitch,
            _ => self.yaw,
        }
    }
}

impl Default for AxisMapping {
    fn default() -> Self {
        Self {
            depth: JoystickAxis::RStickV,
            roll: JoystickAxis::LStickH,
            pitch: JoystickAxis::LStickV,
            yaw: JoystickAxis::RStickH,
            forward: JoystickAxis::LStickV,
            turn: JoystickAxis::LStickH,
            toggle: JoystickButton::A,
        }
    }
}

/// Host device names, resolved once at setup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeviceNames {
    /// Front-right, front-left, rear-left, rear-right.
    pub vertical: [String; 4],
    /// Right, left.
    pub horizontal: [String; 2],
    pub gyro: String,
}

impl Default for DeviceNames {
    fn default() -> Self {
        Self {
            vertical: [
                "Thruster_RF".into(),
                "Thruster_LF".into(),
                "Thruster_LR".into(),
                "Thruster_RR".into(),
            ],
            horizontal: ["Thruster_R".into(), "Thruster_L".into()],
            gyro: "GyroSensor".into(),
        }
    }
}

/// All tuning of the joystick thruster controller. `Default` is the
/// reference tuning for the four-vertical, two-horizontal thruster layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControllerConfig {
    /// Stick readings with a smaller magnitude are treated as zero.
    pub deadzone: f64,
    pub gains: AxisGains,
    pub lateral: LateralGains,
    pub mixer: ThrustMixer,
    pub mapping: AxisMapping,
    pub devices: DeviceNames,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            deadzone: 0.20,
            gains: AxisGains::default(),
            lateral: LateralGains::default(),
            mixer: ThrustMixer::default(),
            mapping: AxisMapping::default(),
            devices: DeviceNames::default(),
        }
    }
}

fn all_finite<'a>(values: impl IntoIterator<Item = &'a f64>) -> bool {
    values.into_iter().all(|v| v.is_finite())
}

impl ControllerConfig {
    pub fn validate(&self) -> Result<(), SetupError> {
        if !(self.deadzone.is_finite() && self.deadzone >= 0.0) {
            return Err(SetupError::InvalidDeadzone(self.deadzone));
        }
        let g = &self.gains;
        if !all_finite(g.p.iter().chain(&g.d).chain(&g.stick)) {
            return Err(SetupError::NonFinite("axis gains"));
        }
        let l = &self.lateral;
        if !all_finite(l.p.iter().chain(&l.d).chain(&l.stick)) {
            return Err(SetupError::NonFinite("lateral gains"));
        }
        let m = &self.mixer;
        if !all_finite(m.sign.iter().flatten().chain(&m.torque_dir))
            || !m.horizontal_gain.is_finite()
        {
            return Err(SetupError::NonFinite("mixer"));
        }
        Ok(())
    }
}
