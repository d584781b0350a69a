//! The resolver: maps logical actions onto concrete device signals.
//!
//! [`Input`] owns a set of adapters (constructed eagerly from factories, in
//! declaration order) and two immutable mapping tables. Each frame the host
//! calls [`Input::update`] once, then queries actions; every resolution is
//! memoized until the next `update`.
//!
//! # Resolution
//! For a button action the adapters are scanned in declaration order and the
//! winner is picked by priority: a fresh press edge ([`Button::click`]) wins
//! immediately, otherwise the last adapter currently holding the button down,
//! otherwise the first adapter that produced a signal at all. This way two
//! devices can drive the same action without one device's idle state masking
//! the other's press.
//!
//! For an axis action the signal with the largest [`Axis::length`] wins, so
//! the most actively moving device dominates a shared action.
//!
//! # Lifecycle
//! An `Input` is **ready** from construction until [`Input::dispose`], which
//! is terminal. Querying or updating a disposed resolver is a non-fatal
//! misuse: it emits a `tracing` warning and yields an absent value / no-op,
//! never a panic.

use std::collections::HashMap;
use std::rc::Rc;

use tracing::warn;

use crate::adapter::{DeviceKey, InputAdapter};
use crate::axis::Axis;
use crate::button::Button;
use crate::error::InputError;
use crate::mapping::{check_adapters_known, mapped_key, ActionMapping};

/// Deferred adapter construction; invoked exactly once, eagerly, by [`Input::new`].
pub type AdapterFactory = Box<dyn FnOnce() -> Box<dyn InputAdapter>>;

/// Wraps a concrete adapter constructor into a named [`AdapterFactory`] entry.
///
/// ```
/// use stickshift::adapters::VirtualDevice;
/// use stickshift::input::{factory, Input};
///
/// let input = Input::new(
///     vec![factory("virtual", VirtualDevice::new)],
///     Default::default(),
///     Default::default(),
/// )
/// .unwrap();
/// # let _ = input;
/// ```
pub fn factory<A, F>(name: &str, construct: F) -> (String, AdapterFactory)
where
    A: InputAdapter + 'static,
    F: FnOnce() -> A + 'static,
{
    (
        name.to_string(),
        Box::new(move || Box::new(construct()) as Box<dyn InputAdapter>),
    )
}

/// Device-agnostic action resolver.
pub struct Input {
    adapters: Vec<(String, Box<dyn InputAdapter>)>,
    button_mapping: ActionMapping,
    axis_mapping: ActionMapping,

    // Per-frame memoization, cleared (allocation retained) on every update.
    // Holds both action-keyed and `"adapter.key"`-keyed entries.
    button_cache: HashMap<String, Rc<Button>>,
    axis_cache: HashMap<String, Rc<Axis>>,

    disposed: bool,
}

impl Input {
    /// Builds the resolver: validates both mapping tables against the
    /// registered adapter names, then instantiates every adapter eagerly.
    /// The order of `factories` is the scan order for resolution.
    pub fn new(
        factories: Vec<(String, AdapterFactory)>,
        button_mapping: ActionMapping,
        axis_mapping: ActionMapping,
    ) -> Result<Self, InputError> {
        let mut names: Vec<String> = Vec::with_capacity(factories.len());

        for (name, _) in &factories {
            if names.contains(name) {
                return Err(InputError::DuplicateAdapter(name.clone()));
            }
            names.push(name.clone());
        }

        check_adapters_known("button", &button_mapping, &names)?;
        check_adapters_known("axis", &axis_mapping, &names)?;

        let adapters = factories
            .into_iter()
            .map(|(name, factory)| (name, factory()))
            .collect();

        Ok(Self {
            adapters,
            button_mapping,
            axis_mapping,
            button_cache: HashMap::new(),
            axis_cache: HashMap::new(),
            disposed: false,
        })
    }

    /// Resolves `action` to the winning button across all mapped adapters.
    ///
    /// Returns `None` while no mapped adapter produces a signal; absence is
    /// re-evaluated on every call, a hit is cached until the next
    /// [`Input::update`].
    pub fn get_button(&mut self, action: &str) -> Option<Rc<Button>> {
        if self.disposed {
            warn!(action, "Input::get_button called on a disposed input");
            return None;
        }

        if let Some(button) = self.button_cache.get(action) {
            return Some(Rc::clone(button));
        }

        let mut winner: Option<Rc<Button>> = None;

        for (name, adapter) in &mut self.adapters {
            let Some(key) = mapped_key(&self.button_mapping, name, action) else {
                continue;
            };

            let Some(button) = adapter.get_button(key) else {
                continue;
            };

            if button.click() {
                winner = Some(button);
                break;
            } else if button.down() {
                winner = Some(button);
            } else if winner.is_none() {
                winner = Some(button);
            }
        }

        let button = winner?;
        self.button_cache.insert(action.to_string(), Rc::clone(&button));

        Some(button)
    }

    /// Resolves `action` to the mapped axis with the largest magnitude.
    ///
    /// Same caching behavior as [`Input::get_button`].
    pub fn get_axis(&mut self, action: &str) -> Option<Rc<Axis>> {
        if self.disposed {
            warn!(action, "Input::get_axis called on a disposed input");
            return None;
        }

        if let Some(axis) = self.axis_cache.get(action) {
            return Some(Rc::clone(axis));
        }

        let mut winner: Option<Rc<Axis>> = None;

        for (name, adapter) in &mut self.adapters {
            let Some(key) = mapped_key(&self.axis_mapping, name, action) else {
                continue;
            };

            let Some(axis) = adapter.get_axis(key) else {
                continue;
            };

            if winner
                .as_ref()
                .is_none_or(|current| axis.length() > current.length())
            {
                winner = Some(axis);
            }
        }

        let axis = winner?;
        self.axis_cache.insert(action.to_string(), Rc::clone(&axis));

        Some(axis)
    }

    /// Queries one named adapter's button directly, bypassing the mapping
    /// tables. Cached under `"{adapter}.{key}"` for the rest of the frame.
    pub fn get_adapter_button(&mut self, adapter: &str, key: &DeviceKey) -> Option<Rc<Button>> {
        if self.disposed {
            warn!(adapter, %key, "Input::get_adapter_button called on a disposed input");
            return None;
        }

        let cache_key = format!("{adapter}.{key}");

        if let Some(button) = self.button_cache.get(&cache_key) {
            return Some(Rc::clone(button));
        }

        let button = self.adapter_entry(adapter)?.get_button(key)?;
        self.button_cache.insert(cache_key, Rc::clone(&button));

        Some(button)
    }

    /// Queries one named adapter's axis directly, bypassing the mapping
    /// tables. Cached under `"{adapter}.{key}"` for the rest of the frame.
    pub fn get_adapter_axis(&mut self, adapter: &str, key: &DeviceKey) -> Option<Rc<Axis>> {
        if self.disposed {
            warn!(adapter, %key, "Input::get_adapter_axis called on a disposed input");
            return None;
        }

        let cache_key = format!("{adapter}.{key}");

        if let Some(axis) = self.axis_cache.get(&cache_key) {
            return Some(Rc::clone(axis));
        }

        let axis = self.adapter_entry(adapter)?.get_axis(key)?;
        self.axis_cache.insert(cache_key, Rc::clone(&axis));

        Some(axis)
    }

    /// Typed access to a registered adapter, for feeding it raw events.
    pub fn adapter<A: InputAdapter + 'static>(&self, name: &str) -> Option<&A> {
        self.adapters
            .iter()
            .find(|(registered, _)| registered == name)
            .and_then(|(_, adapter)| adapter.as_any().downcast_ref())
    }

    /// Mutable typed access to a registered adapter.
    pub fn adapter_mut<A: InputAdapter + 'static>(&mut self, name: &str) -> Option<&mut A> {
        self.adapters
            .iter_mut()
            .find(|(registered, _)| registered == name)
            .and_then(|(_, adapter)| adapter.as_any_mut().downcast_mut())
    }

    /// Commits the pending frame: updates every adapter in declaration order,
    /// then clears the per-frame memoization.
    pub fn update(&mut self) {
        if self.disposed {
            warn!("Input::update called on a disposed input");
            return;
        }

        for (_, adapter) in &mut self.adapters {
            adapter.update();
        }

        self.button_cache.clear();
        self.axis_cache.clear();
    }

    /// Disposes every adapter exactly once and enters the terminal state.
    /// Further queries yield absent values; further `dispose` calls only warn.
    pub fn dispose(&mut self) {
        if self.disposed {
            warn!("Input::dispose called on an already disposed input");
            return;
        }

        self.disposed = true;
        self.button_cache.clear();
        self.axis_cache.clear();

        for (_, adapter) in &mut self.adapters {
            adapter.dispose();
        }
    }

    /// Whether [`Input::dispose`] has been called.
    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    fn adapter_entry(&mut self, name: &str) -> Option<&mut Box<dyn InputAdapter>> {
        self.adapters
            .iter_mut()
            .find(|(registered, _)| registered == name)
            .map(|(_, adapter)| adapter)
    }
}
