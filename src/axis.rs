//! N-dimensional axis state.
//!
//! An [`Axis`] is a numeric signal of one or more components: a 1-D trigger,
//! a 2-D stick or pointer position, a per-frame movement delta. Unlike
//! [`Button`](crate::button::Button), writes apply immediately; last write
//! wins for continuous signals.
//!
//! Change tracking runs on a two-stage countdown: an effective
//! [`Axis::set_values`] arms it at 2 and every [`Axis::update`] decrements it,
//! so [`Axis::changed`] reads true during exactly the one frame that follows
//! the write.

use std::cell::{Cell, Ref, RefCell};

/// Numeric input signal with change tracking and a cached magnitude.
#[derive(Debug)]
pub struct Axis {
    values: RefCell<Vec<f32>>,
    length: Cell<Option<f32>>,
    changed: Cell<u8>,
}

impl Default for Axis {
    fn default() -> Self {
        Self::new()
    }
}

impl Axis {
    /// A neutral 1-D axis at `0.0`.
    pub fn new() -> Self {
        Self::from_value(0.0)
    }

    /// A 1-D axis starting at `value`.
    pub fn from_value(value: f32) -> Self {
        Self::from_values(&[value])
    }

    /// An axis starting at `values`. `values` must not be empty.
    pub fn from_values(values: &[f32]) -> Self {
        debug_assert!(!values.is_empty(), "an axis has at least one component");

        Self {
            values: RefCell::new(values.to_vec()),
            length: Cell::new(None),
            changed: Cell::new(0),
        }
    }

    /// Whether the values changed in the last committed frame.
    #[inline]
    pub fn changed(&self) -> bool {
        self.changed.get() == 1
    }

    /// Read-only view of the current components.
    pub fn values(&self) -> Ref<'_, [f32]> {
        Ref::map(self.values.borrow(), Vec::as_slice)
    }

    /// Replace the components. Applies immediately.
    ///
    /// A call that differs in arity or in any component invalidates the
    /// cached length and arms the change countdown; a no-op call leaves the
    /// axis untouched (and does not mark it changed).
    pub fn set_values(&self, values: &[f32]) {
        debug_assert!(!values.is_empty(), "an axis has at least one component");

        let differs = {
            let current = self.values.borrow();
            current.len() != values.len()
                || current.iter().zip(values).any(|(a, b)| a != b)
        };

        if !differs {
            return;
        }

        let mut current = self.values.borrow_mut();
        current.clear();
        current.extend_from_slice(values);

        self.length.set(None);
        self.changed.set(2);
    }

    /// Advance the change countdown. Called once per frame by the owning adapter.
    pub fn update(&self) {
        let countdown = self.changed.get();

        if countdown > 0 {
            self.changed.set(countdown - 1);
        }
    }

    /// Magnitude of the axis, computed lazily and cached until the values change.
    ///
    /// For a single component this is the raw signed scalar, not its absolute
    /// value, so 1-D signals (triggers, composite keyboard axes) keep their
    /// sign through magnitude-based resolution.
    pub fn length(&self) -> f32 {
        if let Some(length) = self.length.get() {
            return length;
        }

        let values = self.values.borrow();

        let length = if values.len() == 1 {
            values[0]
        } else {
            values.iter().map(|v| v * v).sum::<f32>().sqrt()
        };

        self.length.set(Some(length));
        length
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_a_neutral_scalar() {
        let axis = Axis::new();

        assert_eq!(&*axis.values(), &[0.0]);
        assert_eq!(axis.length(), 0.0);
        assert!(!axis.changed());
    }

    #[test]
    fn changed_reads_true_for_exactly_one_frame() {
        let axis = Axis::new();

        axis.set_values(&[0.5]);
        assert!(!axis.changed(), "not visible before the commit");

        axis.update();
        assert!(axis.changed(), "visible the frame after the write");

        axis.update();
        assert!(!axis.changed(), "cleared on the following frame");
    }

    #[test]
    fn writing_identical_values_does_not_mark_changed() {
        let axis = Axis::from_values(&[0.25, -0.5]);

        axis.set_values(&[0.25, -0.5]);
        axis.update();

        assert!(!axis.changed());
    }

    #[test]
    fn arity_change_marks_changed() {
        let axis = Axis::from_value(1.0);

        axis.set_values(&[1.0, 0.0]);
        axis.update();

        assert!(axis.changed());
        assert_eq!(&*axis.values(), &[1.0, 0.0]);
    }

    #[test]
    fn scalar_length_keeps_its_sign() {
        let axis = Axis::from_value(-0.75);

        assert_eq!(axis.length(), -0.75);
    }

    #[test]
    fn vector_length_is_euclidean() {
        let axis = Axis::from_values(&[0.7, 0.7]);

        assert!((axis.length() - 0.98_f32.sqrt()).abs() < 1e-6);
    }

    #[test]
    fn length_cache_is_invalidated_by_an_effective_write() {
        let axis = Axis::from_values(&[3.0, 4.0]);
        assert_eq!(axis.length(), 5.0);

        axis.set_values(&[6.0, 8.0]);
        assert_eq!(axis.length(), 10.0);

        // no-op write keeps the cache
        axis.set_values(&[6.0, 8.0]);
        assert_eq!(axis.length(), 10.0);
    }
}
