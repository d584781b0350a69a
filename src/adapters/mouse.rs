//! Mouse adapter.
//!
//! Buttons are keyed by index (0 = left, 1 = middle, 2 = right). Four axes
//! are exposed, keyed by [`MouseAxis`]: the absolute pointer position (2-D
//! and split per component) and the per-frame movement delta. The delta is
//! re-zeroed on frames without motion so a stopped pointer reads as `[0, 0]`.
//!
//! The host loop feeds raw pointer events through [`Mouse::move_to`],
//! [`Mouse::button_down`] and [`Mouse::button_up`].

use std::any::Any;
use std::collections::HashMap;
use std::rc::Rc;

use crate::adapter::{DeviceKey, InputAdapter};
use crate::axis::Axis;
use crate::button::Button;

/// Mouse button indices.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left = 0,
    Middle = 1,
    Right = 2,
}

impl From<MouseButton> for DeviceKey {
    fn from(button: MouseButton) -> Self {
        DeviceKey::Index(button as u32)
    }
}

/// Axes exposed by the mouse adapter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MouseAxis {
    /// Absolute pointer position, `[x, y]`.
    Position = 0,
    /// Absolute horizontal position, `[x]`.
    PositionHorizontal = 1,
    /// Absolute vertical position, `[y]`.
    PositionVertical = 2,
    /// Per-frame movement delta, `[dx, dy]`.
    Movement = 3,
}

impl From<MouseAxis> for DeviceKey {
    fn from(axis: MouseAxis) -> Self {
        DeviceKey::Index(axis as u32)
    }
}

pub struct Mouse {
    buttons: HashMap<u32, Rc<Button>>,
    position: Rc<Axis>,
    position_h: Rc<Axis>,
    position_v: Rc<Axis>,
    movement: Rc<Axis>,
    has_position: bool,
    moved_this_frame: bool,
}

impl Default for Mouse {
    fn default() -> Self {
        Self::new()
    }
}

impl Mouse {
    pub fn new() -> Self {
        Self {
            buttons: HashMap::new(),
            position: Rc::new(Axis::from_values(&[0.0, 0.0])),
            position_h: Rc::new(Axis::new()),
            position_v: Rc::new(Axis::new()),
            movement: Rc::new(Axis::from_values(&[0.0, 0.0])),
            has_position: false,
            moved_this_frame: false,
        }
    }

    /// Feed an absolute pointer position.
    ///
    /// Only the first motion event per frame feeds the movement delta; the
    /// very first position of a session produces no delta at all.
    pub fn move_to(&mut self, x: f32, y: f32) {
        if self.moved_this_frame {
            return;
        }

        let (prev_x, prev_y) = {
            let values = self.position.values();
            (values[0], values[1])
        };

        if self.has_position {
            self.movement.set_values(&[x - prev_x, y - prev_y]);
        }

        if prev_x != x {
            self.position_h.set_values(&[x]);
        }
        if prev_y != y {
            self.position_v.set_values(&[y]);
        }
        if prev_x != x || prev_y != y {
            self.position.set_values(&[x, y]);
        }

        self.has_position = true;
        self.moved_this_frame = true;
    }

    /// Feed a button-press event for `index`.
    pub fn button_down(&mut self, index: u32) {
        self.button(index).set_down(true);
    }

    /// Feed a button-release event for `index`.
    pub fn button_up(&mut self, index: u32) {
        self.button(index).set_down(false);
    }

    fn button(&mut self, index: u32) -> Rc<Button> {
        Rc::clone(self.buttons.entry(index).or_default())
    }
}

impl InputAdapter for Mouse {
    fn get_button(&mut self, key: &DeviceKey) -> Option<Rc<Button>> {
        Some(self.button(key.index()?))
    }

    fn get_axis(&mut self, key: &DeviceKey) -> Option<Rc<Axis>> {
        let axis = match key.index()? {
            i if i == MouseAxis::Position as u32 => &self.position,
            i if i == MouseAxis::PositionHorizontal as u32 => &self.position_h,
            i if i == MouseAxis::PositionVertical as u32 => &self.position_v,
            i if i == MouseAxis::Movement as u32 => &self.movement,
            _ => return None,
        };

        Some(Rc::clone(axis))
    }

    fn update(&mut self) {
        for button in self.buttons.values() {
            button.update();
        }

        self.position.update();
        self.position_h.update();
        self.position_v.update();
        self.movement.update();

        if self.moved_this_frame {
            self.moved_this_frame = false;
        } else {
            self.movement.set_values(&[0.0, 0.0]);
        }
    }

    fn dispose(&mut self) {
        for button in self.buttons.values() {
            button.set_down(false);
            button.update();
        }

        self.movement.set_values(&[0.0, 0.0]);
        self.buttons.clear();
        self.has_position = false;
        self.moved_this_frame = false;
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

    #[test]
    fn first_position_produces_no_delta() {
        let mut mouse = Mouse::new();
        let movement = mouse.get_axis(&MouseAxis::Movement.into()).unwrap();

        mouse.move_to(100.0, 50.0);
        mouse.update();

        assert_eq!(&*movement.values(), &[0.0, 0.0]);
    }

    #[test]
    fn movement_reports_the_per_frame_delta_then_rezeros() {
        let mut mouse = Mouse::new();
        let movement = mouse.get_axis(&MouseAxis::Movement.into()).unwrap();

        mouse.move_to(100.0, 50.0);
        mouse.update();
        mouse.move_to(112.0, 73.0);
        mouse.update();

        assert_eq!(&*movement.values(), &[12.0, 23.0]);
        assert!(movement.changed());

        mouse.update();
        assert_eq!(&*movement.values(), &[0.0, 0.0]);
    }

    #[test]
    fn only_the_first_motion_event_per_frame_counts() {
        let mut mouse = Mouse::new();
        let movement = mouse.get_axis(&MouseAxis::Movement.into()).unwrap();

        mouse.move_to(10.0, 10.0);
        mouse.update();
        mouse.move_to(15.0, 10.0);
        mouse.move_to(99.0, 99.0);
        mouse.update();

        assert_eq!(&*movement.values(), &[5.0, 0.0]);
    }

    #[test]
    fn position_components_track_independently() {
        let mut mouse = Mouse::new();
        let position = mouse.get_axis(&MouseAxis::Position.into()).unwrap();
        let horizontal = mouse.get_axis(&MouseAxis::PositionHorizontal.into()).unwrap();
        let vertical = mouse.get_axis(&MouseAxis::PositionVertical.into()).unwrap();

        mouse.move_to(30.0, 0.0);
        mouse.update();

        assert_eq!(&*position.values(), &[30.0, 0.0]);
        assert_eq!(&*horizontal.values(), &[30.0]);
        // y never moved away from its starting value
        assert_eq!(&*vertical.values(), &[0.0]);
    }

    #[test]
    fn buttons_edge_through_the_frame_boundary() {
        let mut mouse = Mouse::new();
        let left = mouse.get_button(&MouseButton::Left.into()).unwrap();

        mouse.button_down(MouseButton::Left as u32);
        assert!(!left.down());

        mouse.update();
        assert!(left.click());

        mouse.button_up(MouseButton::Left as u32);
        mouse.update();
        assert!(!left.down());
        assert!(left.was_down());
    }

    #[test]
    fn unknown_axis_index_is_absent() {
        let mut mouse = Mouse::new();

        assert!(mouse.get_axis(&9.into()).is_none());
        assert!(mouse.get_axis(&"Position".into()).is_none());
    }
}
