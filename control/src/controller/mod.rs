mod types;
mod step;

pub use types::{
    Axis, ControlDebug, ControllerOptions, ControllerSetup, PoseSample, References,
    ThrusterCommands, TickInput,
};
pub use step::JoystickThrusterController;
