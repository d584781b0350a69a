//! The adapter capability contract and device keys.
//!
//! Every device source implements [`InputAdapter`]: it hands out shared
//! handles to the [`Button`]s and [`Axis`]es it owns, commits all of them
//! once per frame in `update`, and releases its state in `dispose`. The
//! resolver never constructs signals itself; it only reads through this
//! contract.
//!
//! Adapters identify their controls with a [`DeviceKey`]: a small index for
//! positional controls (mouse buttons, gamepad channels, touch slots) or a
//! name for keyed controls (keyboard codes, composite patterns like
//! `Axis(KeyA, KeyD)`).

use std::any::Any;
use std::fmt;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::axis::Axis;
use crate::button::Button;

/// Adapter-specific identifier of a physical control.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DeviceKey {
    /// Positional control, e.g. mouse button 0 or gamepad axis 3.
    Index(u32),
    /// Named control, e.g. `"Space"` or the pattern `"Axis(KeyA, KeyD)"`.
    Name(String),
}

impl DeviceKey {
    /// The index, when this key is positional.
    pub fn index(&self) -> Option<u32> {
        match self {
            Self::Index(index) => Some(*index),
            Self::Name(_) => None,
        }
    }

    /// The name, when this key is named.
    pub fn name(&self) -> Option<&str> {
        match self {
            Self::Index(_) => None,
            Self::Name(name) => Some(name),
        }
    }
}

impl fmt::Display for DeviceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Index(index) => write!(f, "{index}"),
            Self::Name(name) => f.write_str(name),
        }
    }
}

impl From<u32> for DeviceKey {
    fn from(index: u32) -> Self {
        Self::Index(index)
    }
}

impl From<&str> for DeviceKey {
    fn from(name: &str) -> Self {
        Self::Name(name.to_string())
    }
}

impl From<String> for DeviceKey {
    fn from(name: String) -> Self {
        Self::Name(name)
    }
}

/// Capability contract for a device source.
///
/// Implementations must cache their signals per key so repeated queries
/// return the same `Rc` identity across frames; consumers are allowed to
/// hold a handle and poll it every frame.
///
/// After `dispose`, behavior of the remaining methods is undefined for that
/// adapter; the resolver never calls a disposed adapter again. Adapters must
/// not panic out of these methods into the resolver's scan loop.
pub trait InputAdapter {
    /// The button registered under `key`, if this adapter can produce one.
    fn get_button(&mut self, key: &DeviceKey) -> Option<Rc<Button>>;

    /// The axis registered under `key`, if this adapter can produce one.
    fn get_axis(&mut self, key: &DeviceKey) -> Option<Rc<Axis>>;

    /// Commit every owned signal. Called once per frame.
    fn update(&mut self);

    /// Release owned signals and neutralize state.
    fn dispose(&mut self);

    /// Access to the concrete adapter, for hosts feeding it raw events.
    fn as_any(&self) -> &dyn Any;

    /// Mutable access to the concrete adapter.
    fn as_any_mut(&mut self) -> &mut dyn Any;
}
