//! Keyboard adapter.
//!
//! Buttons are keyed by key-code name (`"KeyA"`, `"Space"`, `"Numpad0"`).
//! Two keys can be combined into a 1-D composite axis with the pattern
//! `Axis(<code>, <code>)`; each update the axis reads
//! `second down (1) minus first down (1)`, yielding -1, 0 or 1. Patterns are
//! parsed once per unique string and cached, parse failures included.
//!
//! The host loop feeds raw key events through [`Keyboard::key_down`] /
//! [`Keyboard::key_up`].

use std::any::Any;
use std::collections::HashMap;
use std::rc::Rc;

use tracing::warn;

use crate::adapter::{DeviceKey, InputAdapter};
use crate::axis::Axis;
use crate::button::Button;
use crate::error::InputError;

/// Parses a composite axis pattern `Axis(<code>, <code>)` into its two
/// key codes.
pub fn parse_axis_pattern(pattern: &str) -> Result<(String, String), InputError> {
    let invalid = || InputError::InvalidAxisPattern(pattern.to_string());

    let inner = pattern
        .strip_prefix("Axis(")
        .and_then(|rest| rest.strip_suffix(')'))
        .ok_or_else(invalid)?;

    let (first, second) = inner.split_once(", ").ok_or_else(invalid)?;

    let is_code = |code: &str| !code.is_empty() && code.chars().all(|c| c.is_ascii_alphanumeric());

    if !is_code(first) || !is_code(second) {
        return Err(invalid());
    }

    Ok((first.to_string(), second.to_string()))
}

#[derive(Default)]
pub struct Keyboard {
    keys: HashMap<String, Rc<Button>>,
    axes: HashMap<String, Rc<Axis>>,
    // pattern → parsed key pair; None records a reported parse failure
    parsed_axes: HashMap<String, Option<(String, String)>>,
}

impl Keyboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed a key-press event for `code`.
    pub fn key_down(&mut self, code: &str) {
        self.key(code).set_down(true);
    }

    /// Feed a key-release event for `code`.
    pub fn key_up(&mut self, code: &str) {
        self.key(code).set_down(false);
    }

    fn key(&mut self, code: &str) -> Rc<Button> {
        Rc::clone(self.keys.entry(code.to_string()).or_default())
    }

    fn axis_keys(&mut self, pattern: &str) -> Option<(String, String)> {
        if let Some(parsed) = self.parsed_axes.get(pattern) {
            return parsed.clone();
        }

        let parsed = match parse_axis_pattern(pattern) {
            Ok(keys) => Some(keys),
            Err(err) => {
                warn!(%err, "ignoring unusable keyboard axis mapping");
                None
            }
        };

        self.parsed_axes.insert(pattern.to_string(), parsed.clone());
        parsed
    }
}

fn pair_value(first: &Button, second: &Button) -> f32 {
    (second.down() as i8 - first.down() as i8) as f32
}

impl InputAdapter for Keyboard {
    fn get_button(&mut self, key: &DeviceKey) -> Option<Rc<Button>> {
        Some(self.key(key.name()?))
    }

    fn get_axis(&mut self, key: &DeviceKey) -> Option<Rc<Axis>> {
        let pattern = key.name()?;

        if let Some(axis) = self.axes.get(pattern) {
            return Some(Rc::clone(axis));
        }

        let (first, second) = self.axis_keys(pattern)?;
        let first = self.key(&first);
        let second = self.key(&second);

        let axis = Rc::new(Axis::from_value(pair_value(&first, &second)));
        self.axes.insert(pattern.to_string(), Rc::clone(&axis));

        Some(axis)
    }

    fn update(&mut self) {
        for button in self.keys.values() {
            button.update();
        }

        for (pattern, axis) in &self.axes {
            // materialized axes always have a cached, successful parse
            if let Some(Some((first, second))) = self.parsed_axes.get(pattern) {
                if let (Some(first), Some(second)) = (self.keys.get(first), self.keys.get(second)) {
                    axis.set_values(&[pair_value(first, second)]);
                }
            }

            axis.update();
        }
    }

    fn dispose(&mut self) {
        for button in self.keys.values() {
            button.set_down(false);
            button.update();
        }

        for axis in self.axes.values() {
            axis.set_values(&[0.0]);
        }

        self.keys.clear();
        self.axes.clear();
        self.parsed_axes.clear();
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
