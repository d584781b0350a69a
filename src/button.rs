//! Edge-triggered button state.
//!
//! A [`Button`] is a boolean signal with one frame of hysteresis. Raw device
//! events write through [`Button::set_down`] at any time between frames; the
//! write is buffered and only becomes visible when the owning adapter commits
//! it in [`Button::update`]. Multiple events arriving inside one frame
//! collapse into "was it down at the moment of commit", which keeps edge
//! detection deterministic regardless of event timing.
//!
//! Buttons are created and committed by their adapter and shared as
//! `Rc<Button>`; the resolver and the application only read them.

use std::cell::Cell;

/// Boolean input signal with buffered writes and per-frame edge detection.
#[derive(Debug, Default)]
pub struct Button {
    down: Cell<bool>,
    was_down: Cell<bool>,
    pending: Cell<Option<bool>>,
}

impl Button {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the button was down in the last committed frame.
    #[inline]
    pub fn down(&self) -> bool {
        self.down.get()
    }

    /// Whether the button was down in the frame before that.
    #[inline]
    pub fn was_down(&self) -> bool {
        self.was_down.get()
    }

    /// Down this frame, up the frame before: a fresh press edge.
    #[inline]
    pub fn click(&self) -> bool {
        self.down.get() && !self.was_down.get()
    }

    /// Down this frame and the frame before: a held press.
    #[inline]
    pub fn clicked(&self) -> bool {
        self.down.get() && self.was_down.get()
    }

    /// Buffer the intended state. Takes effect at the next [`Button::update`].
    pub fn set_down(&self, down: bool) {
        self.pending.set(Some(down));
    }

    /// Commit the buffered state. Called once per frame by the owning adapter.
    pub fn update(&self) {
        self.was_down.set(self.down.get());

        if let Some(pending) = self.pending.take() {
            self.down.set(pending);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_released() {
        let button = Button::new();

        assert!(!button.down());
        assert!(!button.was_down());
        assert!(!button.click());
        assert!(!button.clicked());
    }

    #[test]
    fn set_down_is_buffered_until_update() {
        let button = Button::new();

        button.set_down(true);
        assert!(!button.down());

        button.update();
        assert!(button.down());
        assert!(button.click());
        assert!(!button.clicked());
    }

    #[test]
    fn click_becomes_clicked_when_held() {
        let button = Button::new();

        button.set_down(true);
        button.update();
        assert!(button.click());

        button.update();
        assert!(button.down());
        assert!(button.was_down());
        assert!(!button.click());
        assert!(button.clicked());
    }

    #[test]
    fn click_and_clicked_are_mutually_exclusive() {
        let button = Button::new();

        for press in [true, false, true, true, false, true] {
            button.set_down(press);
            button.update();
            assert!(!(button.click() && button.clicked()));
            assert_eq!(button.click(), button.down() && !button.was_down());
            assert_eq!(button.clicked(), button.down() && button.was_down());
        }
    }

    #[test]
    fn events_within_one_frame_collapse_to_the_last_write() {
        let button = Button::new();

        button.set_down(true);
        button.set_down(false);
        button.set_down(true);
        button.update();

        assert!(button.down());
        assert!(button.click());
    }

    #[test]
    fn state_is_held_across_frames_without_new_writes() {
        let button = Button::new();

        button.set_down(true);
        button.update();
        button.update();
        button.update();

        assert!(button.down());
        assert!(button.clicked());
    }
}
