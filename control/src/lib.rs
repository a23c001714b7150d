//! Joystick-driven thruster control for a small ROV.
//!
//! The crate is host-agnostic: the simulator (or any other driver) resolves
//! its devices once through [`DeviceLookup`], then calls
//! [`JoystickThrusterController::control`] once per fixed timestep with the
//! current root pose, a [`Joystick`] and a [`ThrusterSink`] that receives the
//! per-thruster change notifications.

mod math;
pub use math::{rotate_planar, rpy_from_rotation, RootPose};

mod config;
pub use config::{AxisGains, AxisMapping, ControllerConfig, DeviceNames, LateralGains};

mod error;
pub use error::SetupError;

pub mod joystick;
pub use joystick::{apply_deadzone, EdgeToggle, Joystick, JoystickAxis, JoystickButton, JoystickState};

pub mod devices;
pub use devices::{DeviceLookup, DeviceSet, GyroId, ThrusterId, ThrusterSink};

mod mixer;
pub use mixer::{ThrustMixer, VerticalCommand};

pub mod controller;
pub use controller::{
    Axis, ControlDebug, ControllerOptions, ControllerSetup, JoystickThrusterController,
    PoseSample, References, ThrusterCommands, TickInput,
};
