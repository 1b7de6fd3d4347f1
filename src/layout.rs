//! Applying padding, gap and the frame layout to monitors, and the global
//! layout lock that coalesces redundant passes

use crate::{
    hooks::{DisplayServer, Frames, Hooks},
    manager::WindowManager,
};

impl<F: Frames, D: DisplayServer, H: Hooks> WindowManager<F, D, H> {
    /// Arrange the monitor at `index`. While the layout lock is held the
    /// monitor is only marked dirty; the pass runs on unlock. Out-of-range
    /// indices are ignored
    pub(crate) fn apply_layout(&mut self, index: usize) {
        let (rect, pad, tag, focused) = match self.monitors.get(index) {
            Some(m) => (m.rect, m.pad, m.tag, index == self.monitors.current_index()),
            None => return,
        };

        if self.lock_count > 0 {
            self.monitors[index].dirty = true;
            return;
        }
        self.monitors[index].dirty = false;

        // apply pad
        let padded = rect - pad;
        // apply the window gap: it insets the top-left corner once and
        // shrinks both sides by the gap amount, it is not a per-edge inset
        let gap = self.config.global.window_gap;
        let mut inner = padded;
        inner.point.x += gap as i32;
        inner.point.y += gap as i32;
        inner.dimension.width = inner.dimension.width.saturating_sub(gap);
        inner.dimension.height = inner.dimension.height.saturating_sub(gap);

        if self.frames.is_floating(tag) {
            self.frames.apply_floating_layout(tag, padded);
        } else {
            self.frames.apply_tiled_layout(tag, inner);
        }

        if focused {
            self.frames.focus_recursive(tag);
        }

        // drop the enter-events generated while the clients were rearranged,
        // otherwise focus would jump to whatever the pointer now hovers
        self.display.discard_enter_events();
    }

    /// Arrange every monitor in registry order
    pub(crate) fn apply_layout_all(&mut self) {
        for index in 0..self.monitors.len() {
            self.apply_layout(index);
        }
    }

    /// Take the layout lock. Locks nest; layout resumes once every lock was
    /// released
    pub(crate) fn lock(&mut self) {
        if self.lock_count < 0 {
            self.lock_count = 0;
        }
        self.lock_count += 1;
        self.lock_changed();
    }

    /// Release one hold of the layout lock
    pub(crate) fn unlock(&mut self) {
        if self.lock_count < 1 {
            self.lock_count = 1;
        }
        self.lock_count -= 1;
        self.lock_changed();
    }

    /// React to a lock transition: on full unlock, flush every dirty monitor
    fn lock_changed(&mut self) {
        if self.lock_count < 0 {
            // indicates a local bug, not a user error; clamp instead of dying
            log::warn!("fixing invalid monitors_locked value to 0");
            self.lock_count = 0;
        }

        if self.lock_count == 0 {
            for index in 0..self.monitors.len() {
                if self.monitors[index].dirty {
                    self.apply_layout(index);
                }
            }
        }
    }
}
