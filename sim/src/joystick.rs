use std::collections::BTreeMap;

use control::{Joystick, JoystickAxis, JoystickButton, JoystickState};
use serde::{Deserialize, Serialize};

/// Joystick input held for a stretch of time. Axes and buttons not listed
/// read as neutral.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScriptSegment {
    pub duration_s: f64,
    pub axes: BTreeMap<JoystickAxis, f64>,
    pub buttons: BTreeMap<JoystickButton, bool>,
}

impl ScriptSegment {
    pub fn new(duration_s: f64) -> Self {
        Self { duration_s, ..Default::default() }
    }

    pub fn axis(mut self, axis: JoystickAxis, value: f64) -> Self {
        self.axes.insert(axis, value);
        self
    }

    pub fn button(mut self, button: JoystickButton, pressed: bool) -> Self {
        self.buttons.insert(button, pressed);
        self
    }

    fn state(&self) -> JoystickState {
        let mut state = JoystickState::neutral();
        for (&axis, &value) in &self.axes {
            state.set_axis(axis, value);
        }
        for (&button, &pressed) in &self.buttons {
            state.set_button(button, pressed);
        }
        state
    }
}

/// Plays back a list of segments, one `refresh` per control tick. Past the
/// end of the script the sticks return to neutral.
#[derive(Debug, Clone)]
pub struct ScriptedJoystick {
    segments: Vec<ScriptSegment>,
    dt: f64,
    ticks: u64,
    latched: JoystickState,
}

impl ScriptedJoystick {
    pub fn new(segments: Vec<ScriptSegment>, dt: f64) -> Self {
        Self { segments, dt, ticks: 0, latched: JoystickState::neutral() }
    }

    /// Script time of the latest refresh.
    pub fn time(&self) -> f64 {
        self.ticks.saturating_sub(1) as f64 * self.dt
    }

    fn segment_at(&self, t: f64) -> Option<&ScriptSegment> {
        let mut end = 0.0;
        self.segments.iter().find(|seg| {
            end += seg.duration_s;
            // Half a tick of slack so a 1.0 s segment covers exactly 1.0/dt ticks.
            t < end - 0.5 * self.dt
        })
    }
}

impl Joystick for ScriptedJoystick {
    fn refresh(&mut self) {
        let t = self.ticks as f64 * self.dt;
        self.latched = self
            .segment_at(t)
            .map(ScriptSegment::state)
            .unwrap_or_default();
        self.ticks += 1;
    }

    fn button(&self, button: JoystickButton) -> bool {
        self.latched.button(button)
    }

    fn axis(&self, axis: JoystickAxis) -> f64 {
        self.latched.axis(axis)
    }
}
