//! Virtual adapter.
//!
//! A pure in-memory device: the host (or a test) drives buttons and axes
//! directly, under arbitrary device keys. Useful as a scriptable input
//! source and as the reference implementation of the adapter contract.

use std::any::Any;
use std::collections::HashMap;
use std::rc::Rc;

use crate::adapter::{DeviceKey, InputAdapter};
use crate::axis::Axis;
use crate::button::Button;

#[derive(Default)]
pub struct VirtualDevice {
    buttons: HashMap<DeviceKey, Rc<Button>>,
    axes: HashMap<DeviceKey, Rc<Axis>>,
}

impl VirtualDevice {
    pub fn new() -> Self {
        Self::default()
    }

    /// Press the button registered under `key`.
    pub fn press(&mut self, key: impl Into<DeviceKey>) {
        self.button(key.into()).set_down(true);
    }

    /// Release the button registered under `key`.
    pub fn release(&mut self, key: impl Into<DeviceKey>) {
        self.button(key.into()).set_down(false);
    }

    /// Write the axis registered under `key`. Applies immediately.
    pub fn set_axis(&mut self, key: impl Into<DeviceKey>, values: &[f32]) {
        self.axis(key.into()).set_values(values);
    }

    fn button(&mut self, key: DeviceKey) -> Rc<Button> {
        Rc::clone(self.buttons.entry(key).or_default())
    }

    fn axis(&mut self, key: DeviceKey) -> Rc<Axis> {
        Rc::clone(self.axes.entry(key).or_default())
    }
}

impl InputAdapter for VirtualDevice {
    fn get_button(&mut self, key: &DeviceKey) -> Option<Rc<Button>> {
        Some(self.button(key.clone()))
    }

    fn get_axis(&mut self, key: &DeviceKey) -> Option<Rc<Axis>> {
        Some(self.axis(key.clone()))
    }

    fn update(&mut self) {
        for button in self.buttons.values() {
            button.update();
        }

        for axis in self.axes.values() {
            axis.update();
        }
    }

    fn dispose(&mut self) {
        for button in self.buttons.values() {
            button.set_down(false);
            button.update();
        }

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
