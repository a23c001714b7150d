//! Joystick abstraction and the input conditioning applied to it.

use serde::{Deserialize, Serialize};

/// Analog axes exposed by the joystick. Stick axes read -1..1 with up and
/// left negative on the vertical and horizontal axes respectively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JoystickAxis {
    LStickH,
    LStickV,
    RStickH,
    RStickV,
    DPadH,
    DPadV,
}

impl JoystickAxis {
    pub const COUNT: usize = 6;

    pub const fn index(self) -> usize {
        self as usize
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JoystickButton {
    A,
    B,
    X,
    Y,
}

impl JoystickButton {
    pub const COUNT: usize = 4;

    pub const fn index(self) -> usize {
        self as usize
    }
}

/// What the controller needs from a joystick.
///
/// `refresh` is called exactly once at the start of every tick; the readers
/// must then return the values latched by that refresh.
pub trait Joystick {
    fn refresh(&mut self);
    fn button(&self, button: JoystickButton) -> bool;
    fn axis(&self, axis: JoystickAxis) -> f64;
}

/// A latched joystick snapshot. `refresh` is a no-op, so tests and hosts
/// that poll a device elsewhere can just write the values in.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct JoystickState {
    pub axes: [f64; JoystickAxis::COUNT],
    pub buttons: [bool; JoystickButton::COUNT],
}

impl JoystickState {
    pub fn neutral() -> Self {
        Self::default()
    }

    pub fn with_axis(mut self, axis: JoystickAxis, value: f64) -> Self {
        self.axes[axis.index()] = value;
        self
    }

    pub fn with_button(mut self, button: JoystickButton, pressed: bool) -> Self {
        self.buttons[button.index()] = pressed;
        self
    }

    pub fn set_axis(&mut self, axis: JoystickAxis, value: f64) {
        self.axes[axis.index()] = value;
    }

    pub fn set_button(&mut self, button: JoystickButton, pressed: bool) {
        self.buttons[button.index()] = pressed;
    }
}

impl Joystick for JoystickState {
    fn refresh(&mut self) {}

    fn button(&self, button: JoystickButton) -> bool {
        self.buttons[button.index()]
    }

    fn axis(&self, axis: JoystickAxis) -> f64 {
        self.axes[axis.index()]
    }
}

/// Zero any reading whose magnitude is below `threshold`. Non-finite
/// readings count as neutral.
#[inline]
pub fn apply_deadzone(value: f64, threshold: f64) -> f64 {
    if !value.is_finite() || value.abs() < threshold {
        0.0
    } else {
        value
    }
}

/// Rising-edge detector for a digital button.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EdgeToggle {
    previous: bool,
}

impl EdgeToggle {
    /// Feed the current button level; returns `true` only on a
    /// released→pressed transition.
    pub fn update(&mut self, pressed: bool) -> bool {
        let rising = pressed && !self.previous;
        self.previous = pressed;
        rising
    }

    pub fn previous(&self) -> bool {
        self.previous
    }
}
