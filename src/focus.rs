//! Switching the focused monitor, with per-monitor pointer memory

use crate::{
    hooks::{DisplayServer, Frames, Hooks},
    manager::WindowManager,
};

impl<F: Frames, D: DisplayServer, H: Hooks> WindowManager<F, D, H> {
    /// Focus the monitor at `target` (clamped into range). The previous
    /// monitor remembers where the pointer was; the new monitor gets the
    /// pointer back at its remembered position, unless the pointer already
    /// rests on it
    pub(crate) fn focus_monitor(&mut self, target: i32) {
        let count = self.monitors.len() as i32;
        if count == 0 {
            return;
        }

        let new = target.clamp(0, count - 1) as usize;
        let old = self.monitors.current_index();
        if new == old {
            return;
        }

        self.monitors.set_current(new);
        let new_tag = self.monitors[new].tag;
        self.frames.focus_recursive(new_tag);

        // repaint the old monitor first so the pointer offset is captured
        // before any warp
        self.apply_layout(old);
        self.apply_layout(new);

        let pointer = self.display.pointer_position();
        if let Some(p) = pointer {
            self.monitors[old].remember_pointer(p);
        }

        let on_new_monitor = pointer.map_or(false, |p| self.monitors[new].rect.contains(p));
        if !on_new_monitor {
            let target = self.monitors[new].warp_target();
            self.display.warp_pointer(target);
            // discard the enter-events caused by the warp so focus stays on
            // the last focused window of this monitor
            self.display.discard_enter_events();
        }

        self.hooks.desktop_state_changed();
        self.hooks.tag_changed(new_tag, new);
    }

    /// Focus the monitor `delta` steps away in index order, wrapping around
    /// in both directions
    pub(crate) fn cycle_monitor(&mut self, delta: i32) {
        let count = self.monitors.len() as i32;
        if count == 0 {
            return;
        }

        let mut target = self.monitors.current_index() as i32 + delta;
        // fix range of index
        target %= count;
        target += count;
        target %= count;

        self.focus_monitor(target);
    }
}
