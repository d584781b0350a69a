//! Device adapters for `stickshift`.
//!
//! Implementations of [`InputAdapter`](crate::adapter::InputAdapter) for the
//! common device families. This crate is host-agnostic, so adapters do not
//! subscribe to any window system themselves; the host's event loop forwards
//! raw events into them (`Keyboard::key_down`, `Mouse::move_to`,
//! `Gamepad::set_state`, `Touch::touch_start`, ...) and the resolver drives
//! their per-frame commit.

pub mod gamepad;
pub mod keyboard;
pub mod mouse;
pub mod touch;
pub mod virtual_device;

pub use gamepad::{Gamepad, GamepadAxis, GamepadButtonState, GamepadState};
pub use keyboard::Keyboard;
pub use mouse::{Mouse, MouseAxis, MouseButton};
pub use touch::Touch;
pub use virtual_device::VirtualDevice;
