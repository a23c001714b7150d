use std::fs;
use std::path::Path;

use anyhow::{ensure, Context, Result};
use bevy_math::DVec3;
use control::{ControllerConfig, RootPose};
use serde::{Deserialize, Serialize};

use crate::{ScriptSegment, VehicleSpec};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimSettings {
    /// Controller and plant step, seconds.
    pub time_step: f64,
    pub duration_s: f64,
    /// Strings handed to the controller as host options (e.g. `"manual"`).
    pub options: Vec<String>,
    /// Whether the vehicle carries a rate gyro.
    pub gyro: bool,
    /// Emit a progress line every this many ticks; 0 disables.
    pub log_every: u64,
}

impl Default for SimSettings {
    fn default() -> Self {
        Self {
            time_step: 0.005,
            duration_s: 20.0,
            options: Vec::new(),
            gyro: true,
            log_every: 200,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InitialPose {
    pub position: DVec3,
    /// Roll, pitch, yaw in radians.
    pub rpy: DVec3,
}

impl Default for InitialPose {
    fn default() -> Self {
        Self { position: DVec3::new(0.0, 0.0, -2.0), rpy: DVec3::ZERO }
    }
}

impl InitialPose {
    pub fn root(&self) -> RootPose {
        RootPose::from_xyz_rpy(self.position, self.rpy.x, self.rpy.y, self.rpy.z)
    }
}

/// A scenario: harness settings, vehicle, controller tuning and the
/// joystick script.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub sim: SimSettings,
    pub initial: InitialPose,
    pub vehicle: VehicleSpec,
    pub controller: ControllerConfig,
    pub script: Vec<ScriptSegment>,
}

impl Config {
    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.sim.time_step.is_finite() && self.sim.time_step > 0.0,
            "sim.time_step must be positive, got {}",
            self.sim.time_step
        );
        ensure!(
            self.sim.duration_s.is_finite() && self.sim.duration_s >= 0.0,
            "sim.duration_s must be non-negative, got {}",
            self.sim.duration_s
        );
        let v = &self.vehicle;
        ensure!(v.mass.is_finite() && v.mass > 0.0, "vehicle.mass must be positive");
        ensure!(
            v.inertia.is_finite() && v.inertia.min_element() > 0.0,
            "vehicle.inertia must be positive on every axis"
        );
        for (field, value) in [
            ("linear_drag", v.linear_drag),
            ("quadratic_drag", v.quadratic_drag),
            ("angular_drag", v.angular_drag),
        ] {
            ensure!(
                value.is_finite() && value.min_element() >= 0.0,
                "vehicle.{field} must be non-negative on every axis"
            );
        }
        ensure!(
            v.cb_offset_body.is_finite()
                && v.vertical_offset.iter().all(|x| x.is_finite())
                && v.horizontal_offset.is_finite(),
            "vehicle geometry must be finite"
        );
        ensure!(
            self.initial.position.is_finite() && self.initial.rpy.is_finite(),
            "initial pose must be finite"
        );
        for (i, seg) in self.script.iter().enumerate() {
            ensure!(
                seg.duration_s.is_finite() && seg.duration_s >= 0.0,
                "script[{i}].duration_s must be non-negative"
            );
        }
        self.controller.validate()?;
        Ok(())
    }

    pub fn tick_count(&self) -> u64 {
        (self.sim.duration_s / self.sim.time_step).round() as u64
    }
}

pub fn load_config(path: &Path) -> Result<Config> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("reading scenario {}", path.display()))?;
    let cfg: Config =
        toml::from_str(&text).with_context(|| format!("parsing scenario {}", path.display()))?;
    cfg.validate()
        .with_context(|| format!("invalid scenario {}", path.display()))?;
    Ok(cfg)
}
