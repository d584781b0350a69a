//! Touch adapter.
//!
//! Contacts live in fixed slots; the slot index is the device key, so an
//! application can treat "touch 0" and "touch 1" as stable controls even as
//! fingers come and go. Each slot carries a button (down while the contact
//! lasts), a 2-D position axis and a validity countdown: a lifted finger
//! keeps its slot for a few updates (`invalidate_after_updates`, default 5)
//! before the slot becomes reusable, so a quick re-tap lands in the same
//! slot.
//!
//! The host loop feeds raw contact events through [`Touch::touch_start`],
//! [`Touch::touch_move`] and [`Touch::touch_end`], each carrying the
//! platform's contact identifier.

use std::any::Any;
use std::rc::Rc;

use crate::adapter::{DeviceKey, InputAdapter};
use crate::axis::Axis;
use crate::button::Button;

const DEFAULT_EXPIRY_UPDATES: u32 = 5;

struct TouchSlot {
    id: u64,
    valid: u32,
    button: Rc<Button>,
    axis: Rc<Axis>,
}

pub struct Touch {
    slots: Vec<TouchSlot>,
    invalidate_after_updates: u32,
}

impl Default for Touch {
    fn default() -> Self {
        Self::new()
    }
}

impl Touch {
    pub fn new() -> Self {
        Self::with_expiry(DEFAULT_EXPIRY_UPDATES)
    }

    /// `invalidate_after_updates` is the number of updates a lifted contact
    /// keeps its slot before it may be reused.
    pub fn with_expiry(invalidate_after_updates: u32) -> Self {
        Self {
            slots: Vec::new(),
            invalidate_after_updates,
        }
    }

    /// Feed the start of a contact.
    pub fn touch_start(&mut self, id: u64, x: f32, y: f32) {
        let fresh = self.invalidate_after_updates + 1;

        if let Some(slot) = self.slots.iter_mut().find(|slot| slot.id == id) {
            slot.valid = fresh;
            slot.axis.set_values(&[x, y]);
            slot.button.set_down(true);
            return;
        }

        if let Some(slot) = self
            .slots
            .iter_mut()
            .find(|slot| slot.valid <= self.invalidate_after_updates)
        {
            slot.id = id;
            slot.valid = fresh;
            slot.axis.set_values(&[x, y]);
            slot.button.set_down(true);
            return;
        }

        let button = Button::new();
        button.set_down(true);

        self.slots.push(TouchSlot {
            id,
            valid: fresh,
            button: Rc::new(button),
            axis: Rc::new(Axis::from_values(&[x, y])),
        });
    }

    /// Feed a position change of a live contact.
    pub fn touch_move(&mut self, id: u64, x: f32, y: f32) {
        if let Some(slot) = self.slots.iter().find(|slot| slot.id == id) {
            slot.axis.set_values(&[x, y]);
        }
    }

    /// Feed the end of a contact; its slot starts expiring.
    pub fn touch_end(&mut self, id: u64, x: f32, y: f32) {
        if let Some(slot) = self.slots.iter_mut().find(|slot| slot.id == id) {
            slot.axis.set_values(&[x, y]);
            slot.button.set_down(false);
            slot.valid = slot.valid.saturating_sub(1);
        }
    }

    fn live_slot(&self, index: u32) -> Option<&TouchSlot> {
        self.slots
            .get(index as usize)
            .filter(|slot| slot.valid > 0)
    }
}

impl InputAdapter for Touch {
    fn get_button(&mut self, key: &DeviceKey) -> Option<Rc<Button>> {
        self.live_slot(key.index()?)
            .map(|slot| Rc::clone(&slot.button))
    }

    fn get_axis(&mut self, key: &DeviceKey) -> Option<Rc<Axis>> {
        self.live_slot(key.index()?)
            .map(|slot| Rc::clone(&slot.axis))
    }

    fn update(&mut self) {
        for slot in &mut self.slots {
            if slot.valid == 0 {
                continue;
            }

            // active contacts sit above the countdown and never expire;
            // lifted ones tick down until their slot frees up
            if slot.valid <= self.invalidate_after_updates {
                slot.valid -= 1;
            }

            slot.button.update();
            slot.axis.update();
        }
    }

    fn dispose(&mut self) {
        for slot in &self.slots {
            slot.button.set_down(false);
            slot.button.update();
        }

        self.slots.clear();
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
