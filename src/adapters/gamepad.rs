//! Gamepad adapter.
//!
//! The host pushes controller snapshots laid out per the W3C standard
//! gamepad mapping (<https://w3c.github.io/gamepad/#remapping>) through
//! [`Gamepad::set_state`]; while disconnected, axis queries are absent and
//! the adapter commits nothing.
//!
//! Axis keys follow the standard mapping convention: indices that exist in
//! the raw axis array are reported as-is for even indices and negated for
//! odd ones (vertical axes are flipped to up-positive). Indices past the raw
//! array are pseudo-axes: the analog trigger values of buttons 6/7, and the
//! two 2-D stick composites.

use std::any::Any;
use std::collections::HashMap;
use std::rc::Rc;

use crate::adapter::{DeviceKey, InputAdapter};
use crate::axis::Axis;
use crate::button::Button;

/// Axes exposed by the gamepad adapter, standard mapping layout.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GamepadAxis {
    LeftStickHorizontal = 0,
    LeftStickVertical = 1,
    RightStickHorizontal = 2,
    RightStickVertical = 3,
    /// Analog value of button 6, as a 1-D axis.
    LeftTrigger = 4,
    /// Analog value of button 7, as a 1-D axis.
    RightTrigger = 5,
    /// `[x, y]` composite of raw axes 0/1, y up-positive.
    LeftStick = 6,
    /// `[x, y]` composite of raw axes 2/3, y up-positive.
    RightStick = 7,
}

impl From<GamepadAxis> for DeviceKey {
    fn from(axis: GamepadAxis) -> Self {
        DeviceKey::Index(axis as u32)
    }
}

/// One button of a controller snapshot.
#[derive(Clone, Copy, Debug, Default)]
pub struct GamepadButtonState {
    pub pressed: bool,
    /// Analog value in `[0, 1]`; equals `pressed as f32` for digital buttons.
    pub value: f32,
}

impl GamepadButtonState {
    pub fn digital(pressed: bool) -> Self {
        Self {
            pressed,
            value: pressed as u8 as f32,
        }
    }
}

/// Controller snapshot in standard-mapping order.
#[derive(Clone, Debug, Default)]
pub struct GamepadState {
    pub axes: Vec<f32>,
    pub buttons: Vec<GamepadButtonState>,
}

#[derive(Default)]
pub struct Gamepad {
    state: Option<GamepadState>,
    buttons: HashMap<u32, Rc<Button>>,
    axes: HashMap<u32, Rc<Axis>>,
}

impl Gamepad {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the current controller snapshot.
    pub fn set_state(&mut self, state: GamepadState) {
        self.state = Some(state);
    }

    /// Mark the controller as disconnected.
    pub fn disconnect(&mut self) {
        self.state = None;
    }

    pub fn connected(&self) -> bool {
        self.state.is_some()
    }
}

/// Recomputes an axis from the snapshot, per the standard mapping
/// convention described in the module docs.
fn refresh_axis(axis: &Axis, state: &GamepadState, index: u32) {
    let raw_axis = |i: usize| state.axes.get(i).copied().unwrap_or(0.0);
    let trigger = |i: usize| state.buttons.get(i).map_or(0.0, |b| b.value);

    if let Some(&raw) = state.axes.get(index as usize) {
        // even index as-is, odd index flipped up-positive
        let value = if index % 2 == 0 { raw } else { -raw };
        axis.set_values(&[value]);
    } else if index == GamepadAxis::LeftTrigger as u32 {
        axis.set_values(&[trigger(6)]);
    } else if index == GamepadAxis::RightTrigger as u32 {
        axis.set_values(&[trigger(7)]);
    } else if index == GamepadAxis::LeftStick as u32 {
        axis.set_values(&[raw_axis(0), -raw_axis(1)]);
    } else if index == GamepadAxis::RightStick as u32 {
        axis.set_values(&[raw_axis(2), -raw_axis(3)]);
    }
}

impl InputAdapter for Gamepad {
    fn get_button(&mut self, key: &DeviceKey) -> Option<Rc<Button>> {
        let index = key.index()?;

        let button = self.buttons.entry(index).or_insert_with(|| {
            let button = Button::new();

            // seed from the live snapshot so a first query mid-press commits
            // as down on the next update
            if let Some(state) = &self.state {
                if let Some(snapshot) = state.buttons.get(index as usize) {
                    button.set_down(snapshot.pressed);
                }
            }

            Rc::new(button)
        });

        Some(Rc::clone(button))
    }

    fn get_axis(&mut self, key: &DeviceKey) -> Option<Rc<Axis>> {
        let index = key.index()?;
        let state = self.state.as_ref()?;

        let axis = self
            .axes
            .entry(index)
            .or_insert_with(|| Rc::new(Axis::new()));
        refresh_axis(axis, state, index);

        Some(Rc::clone(axis))
    }

    fn update(&mut self) {
        let Some(state) = &self.state else {
            return;
        };

        for (&index, button) in &self.buttons {
            if let Some(snapshot) = state.buttons.get(index as usize) {
                button.set_down(snapshot.pressed);
            }
            button.update();
        }

        for (&index, axis) in &self.axes {
            refresh_axis(axis, state, index);
            axis.update();
        }
    }

    fn dispose(&mut self) {
        for button in self.buttons.values() {
            button.set_down(false);
            button.update();
        }

        self.state = None;
        self.buttons.clear();
        self.axes.clear();
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(axes: &[f32]) -> GamepadState {
        GamepadState {
            axes: axes.to_vec(),
            buttons: vec![GamepadButtonState::default(); 8],
        }
    }

    #[test]
    fn disconnected_gamepad_has_no_axes() {
        let mut gamepad = Gamepad::new();

        assert!(!gamepad.connected());
        assert!(gamepad
            .get_axis(&GamepadAxis::LeftStickHorizontal.into())
            .is_none());
    }

    #[test]
    fn odd_raw_indices_are_flipped_up_positive() {
        let mut gamepad = Gamepad::new();
        gamepad.set_state(state(&[0.5, 0.25, -0.75, 1.0]));

        let horizontal = gamepad
            .get_axis(&GamepadAxis::LeftStickHorizontal.into())
            .unwrap();
        let vertical = gamepad
            .get_axis(&GamepadAxis::LeftStickVertical.into())
            .unwrap();

        assert_eq!(&*horizontal.values(), &[0.5]);
        assert_eq!(&*vertical.values(), &[-0.25]);
    }

    #[test]
    fn trigger_pseudo_axes_read_analog_button_values() {
        let mut gamepad = Gamepad::new();
        let mut snapshot = state(&[0.0, 0.0, 0.0, 0.0]);
        snapshot.buttons[6] = GamepadButtonState {
            pressed: true,
            value: 0.6,
        };
        gamepad.set_state(snapshot);

        let trigger = gamepad.get_axis(&GamepadAxis::LeftTrigger.into()).unwrap();
        assert_eq!(&*trigger.values(), &[0.6]);
    }

    #[test]
    fn stick_composites_pair_their_raw_axes() {
        let mut gamepad = Gamepad::new();
        gamepad.set_state(state(&[0.3, 0.4, -0.1, 0.2]));

        let left = gamepad.get_axis(&GamepadAxis::LeftStick.into()).unwrap();
        let right = gamepad.get_axis(&GamepadAxis::RightStick.into()).unwrap();

        assert_eq!(&*left.values(), &[0.3, -0.4]);
        assert_eq!(&*right.values(), &[-0.1, -0.2]);
        assert_eq!(left.length(), 0.5);
    }

    #[test]
    fn update_refreshes_referenced_signals_from_the_snapshot() {
        let mut gamepad = Gamepad::new();
        gamepad.set_state(state(&[0.0, 0.0, 0.0, 0.0]));

        let jump = gamepad.get_button(&0.into()).unwrap();
        let stick = gamepad.get_axis(&GamepadAxis::LeftStick.into()).unwrap();

        let mut snapshot = state(&[0.9, -0.2, 0.0, 0.0]);
        snapshot.buttons[0] = GamepadButtonState::digital(true);
        gamepad.set_state(snapshot);
        gamepad.update();

        assert!(jump.click());
        assert_eq!(&*stick.values(), &[0.9, 0.2]);
        assert!(stick.changed());
    }

    #[test]
    fn buttons_seed_from_a_live_snapshot() {
        let mut gamepad = Gamepad::new();
        let mut snapshot = state(&[]);
        snapshot.buttons[3] = GamepadButtonState::digital(true);
        gamepad.set_state(snapshot);

        let button = gamepad.get_button(&3.into()).unwrap();
        assert!(!button.down(), "seed is buffered, not committed");

        gamepad.update();
        assert!(button.down());
    }

    #[test]
    fn no_commits_while_disconnected() {
        let mut gamepad = Gamepad::new();
        let mut snapshot = state(&[]);
        snapshot.buttons[0] = GamepadButtonState::digital(true);
        gamepad.set_state(snapshot);

        let button = gamepad.get_button(&0.into()).unwrap();
        gamepad.update();
        assert!(button.down());

        gamepad.disconnect();
        gamepad.update();
        // last committed state holds
        assert!(button.down());
        assert!(gamepad.get_axis(&0.into()).is_none());
    }
}
