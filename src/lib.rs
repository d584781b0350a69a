//! stickshift — device-agnostic action mapping for frame-driven applications.
//!
//! A game loop asks "is `jump` active?" without caring whether `jump` comes
//! from a keyboard key, a mouse button, a gamepad axis or a touch point.
//! Device adapters translate raw events into two shared primitives
//! ([`Button`] and [`Axis`]); once per frame the [`Input`] resolver commits
//! every adapter and then answers action queries with deterministic priority
//! rules, memoized for the rest of the frame.
//!
//! ```
//! use stickshift::adapters::{Keyboard, VirtualDevice};
//! use stickshift::input::{factory, Input};
//! use stickshift::mapping::mapping;
//!
//! let mut input = Input::new(
//!     vec![
//!         factory("keyboard", Keyboard::new),
//!         factory("pad", VirtualDevice::new),
//!     ],
//!     mapping([
//!         ("keyboard", vec![("jump", "Space".into())]),
//!         ("pad", vec![("jump", 0.into())]),
//!     ]),
//!     mapping([("keyboard", vec![("steer", "Axis(KeyA, KeyD)".into())])]),
//! )
//! .unwrap();
//!
//! input.adapter_mut::<Keyboard>("keyboard").unwrap().key_down("Space");
//! input.update();
//!
//! let jump = input.get_button("jump").unwrap();
//! assert!(jump.click());
//! ```

pub mod adapter;
pub mod adapters;
pub mod axis;
pub mod button;
pub mod error;
pub mod input;
pub mod mapping;

pub use adapter::{DeviceKey, InputAdapter};
pub use axis::Axis;
pub use button::Button;
pub use error::InputError;
pub use input::{factory, AdapterFactory, Input};
pub use mapping::ActionMapping;
