use serde::{Deserialize, Serialize};

/// Force and reaction torque written to one vertical thruster.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct VerticalCommand {
    pub force: f64,
    pub torque: f64,
}

/// Maps the four synthesized axis forces onto the physical thrusters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThrustMixer {
    /// Rows: front-right, front-left, rear-left, rear-right.
    /// Columns: depth, roll, pitch, yaw.
    pub sign: [[f64; 4]; 4],
    /// Reaction torque direction per vertical thruster (prop spin sense).
    pub torque_dir: [f64; 4],
    /// Scale of the differential drive on the horizontal pair.
    pub horizontal_gain: f64,
}

impl Default for ThrustMixer {
    fn default() -> Self {
        Self {
            sign: [
                [1.0, -1.0, -1.0, -1.0],
                [1.0, 1.0, -1.0, 1.0],
                [1.0, 1.0, 1.0, -1.0],
                [1.0, -1.0, 1.0, 1.0],
            ],
            torque_dir: [-1.0, 1.0, -1.0, 1.0],
            horizontal_gain: 0.3,
        }
    }
}

impl ThrustMixer {
    /// Combine axis forces (depth, roll, pitch, yaw) into per-thruster
    /// commands. Disabled output is exactly zero force.
    pub fn mix_vertical(&self, axis_forces: [f64; 4], enabled: bool) -> [VerticalCommand; 4] {
        std::array::from_fn(|i| {
            let force = if enabled {
                self.sign[i]
                    .iter()
                    .zip(axis_forces)
                    .fold(0.0, |acc, (s, f)| acc + s * f)
            } else {
                0.0
            };
            VerticalCommand { force, torque: self.torque_dir[i] * force }
        })
    }

    /// Differential drive for the horizontal pair: `[right, left]`.
    /// `forward` is negative for a pushed-up stick.
    pub fn mix_horizontal(&self, forward: f64, turn: f64) -> [f64; 2] {
        let k = self.horizontal_gain;
        [k * (-2.0 * forward - turn), k * (-2.0 * forward + turn)]
    }
}
