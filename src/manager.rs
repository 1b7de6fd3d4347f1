//! The context object tying the monitor registry to its collaborators
//!
//! All mutation of monitor state flows through [`WindowManager`]; there is no
//! global registry, so independent instances can live side by side in tests

use crate::{
    config::Config,
    error::Error,
    geometry::Rectangle,
    hooks::{DisplayServer, Frames, Hooks},
    monitor::{Monitors, WINDOW_MIN_HEIGHT, WINDOW_MIN_WIDTH},
    tag::TagId,
};

/// Owner of the monitor registry, the layout lock and the collaborator
/// handles. Generic over the collaborators so tests can substitute doubles
pub(crate) struct WindowManager<F, D, H> {
    /// The ordered monitor collection
    pub(crate) monitors: Monitors,
    /// Runtime settings
    pub(crate) config:   Config,
    /// Frame-tree layout engine and tag store
    pub(crate) frames:   F,
    /// Display-server pointer/screen primitives
    pub(crate) display:  D,
    /// Hook/notification consumer
    pub(crate) hooks:    H,
    /// Reentrant layout lock; layout is deferred while this is positive
    pub(crate) lock_count: i32,
}

impl<F: Frames, D: DisplayServer, H: Hooks> WindowManager<F, D, H> {
    /// Create a new [`WindowManager`] with an empty registry
    pub(crate) fn new(config: Config, frames: F, display: D, hooks: H) -> Self {
        Self {
            monitors: Monitors::new(),
            config,
            frames,
            display,
            hooks,
            lock_count: 0,
        }
    }

    /// Add a monitor showing `tag`, pad it, arrange it and announce it.
    /// Fails with [`Error::TagInUse`] when the tag is visible elsewhere
    pub(crate) fn add_monitor(
        &mut self,
        rect: Rectangle,
        tag: TagId,
        pads: [Option<u32>; 4],
    ) -> Result<usize, Error> {
        if self.monitors.is_tag_bound(tag) {
            return Err(Error::TagInUse(self.frames.name(tag)));
        }

        let index = self.monitors.add(rect, tag);
        self.monitors[index].update_pads(pads);

        self.frames.show_recursive(tag);
        self.apply_layout(index);
        self.hooks.tag_changed(tag, index);

        Ok(index)
    }

    /// Remove the monitor at `index`, hiding its tag's windows. The last
    /// monitor cannot be removed
    pub(crate) fn remove_monitor(&mut self, index: i32) -> Result<(), Error> {
        let checked = self.monitors.removable(index)?;

        let tag = self.monitors[checked].tag;
        self.frames.hide_recursive(tag);

        let removed = self.monitors.remove(index)?;
        debug_assert_eq!(removed.monitor.tag, tag);

        if removed.refocused {
            self.apply_layout(self.monitors.current_index());
        }

        Ok(())
    }

    /// Move the monitor at `index` to a new rectangle, optionally updating
    /// its pads, and rearrange it
    pub(crate) fn move_monitor(
        &mut self,
        index: i32,
        rect: Rectangle,
        pads: [Option<u32>; 4],
    ) -> Result<(), Error> {
        let index = self.checked_index(index)?;

        if rect.dimension.width < WINDOW_MIN_WIDTH || rect.dimension.height < WINDOW_MIN_HEIGHT {
            return Err(Error::RectangleTooSmall(rect.to_string()));
        }

        let monitor = &mut self.monitors[index];
        monitor.rect = rect;
        monitor.update_pads(pads);
        self.apply_layout(index);

        Ok(())
    }

    /// Update the pads of the monitor at `index` and rearrange it
    pub(crate) fn set_monitor_pads(
        &mut self,
        index: i32,
        pads: [Option<u32>; 4],
    ) -> Result<(), Error> {
        let index = self.checked_index(index)?;

        self.monitors[index].update_pads(pads);
        self.apply_layout(index);

        Ok(())
    }

    /// Reshape the whole monitor set to match the given rectangles: existing
    /// monitors are moved, missing ones are created on unused tags, excess
    /// ones are removed. Fails with [`Error::NoFreeTag`] when a new monitor
    /// cannot be given a tag
    pub(crate) fn set_monitor_rects(&mut self, rects: &[Rectangle]) -> Result<(), Error> {
        if rects.is_empty() {
            return Err(Error::MissingArgument("at least one monitor is required"));
        }

        let existing = self.monitors.len().min(rects.len());
        for (index, &rect) in rects.iter().enumerate().take(existing) {
            self.monitors[index].rect = rect;
        }

        for &rect in &rects[existing..] {
            let tag = self
                .frames
                .find_unused(&self.monitors.bound_tags())
                .ok_or(Error::NoFreeTag)?;

            let index = self.monitors.add(rect, tag);
            self.frames.show_recursive(tag);
            self.hooks.tag_changed(tag, index);
        }

        while rects.len() < self.monitors.len() {
            self.remove_monitor(rects.len() as i32)?;
        }

        self.apply_layout_all();

        Ok(())
    }

    /// Guarantee at least one monitor exists, synthesizing one spanning the
    /// whole display on a fresh tag. Called once at startup
    pub(crate) fn ensure_monitors_available(&mut self) -> Result<(), Error> {
        if !self.monitors.is_empty() {
            return Ok(());
        }

        let dim = self.display.dimensions();
        let rect = Rectangle::new(0, 0, dim.width, dim.height);
        let tag = self.frames.find_unused(&[]).ok_or(Error::NoFreeTag)?;

        log::info!("no monitor configured, creating one spanning {}", rect);
        self.monitors.add(rect, tag);
        self.monitors.set_current(0);

        Ok(())
    }

    /// Validate a signed command-supplied monitor index
    pub(crate) fn checked_index(&self, index: i32) -> Result<usize, Error> {
        if index < 0 || index as usize >= self.monitors.len() {
            return Err(Error::InvalidMonitorIndex(index));
        }

        Ok(index as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::WindowManager;
    use crate::{
        config::Config,
        error::Error,
        geometry::{Dimension, Padding, Point, Rectangle},
        hooks::{
            doubles::{FrameCall, RecordingFrames},
            DisplayServer, EventLog, Frames, HeadlessDisplay, HookEvent,
        },
        tag::TagId,
    };

    type TestWm = WindowManager<RecordingFrames, HeadlessDisplay, EventLog>;

    /// A manager with `count` side-by-side 800x600 monitors on tags a, b, c…
    /// and an empty call record
    fn wm(count: usize) -> TestWm {
        let mut wm = WindowManager::new(
            Config::default(),
            RecordingFrames::with_tags(&["a", "b", "c", "d", "e"]),
            HeadlessDisplay::new(Dimension::new(4000, 600)),
            EventLog::default(),
        );

        for i in 0..count {
            let tag = TagId(i as u32);
            wm.add_monitor(Rectangle::new(i as i32 * 800, 0, 800, 600), tag, [None; 4])
                .unwrap();
        }
        wm.frames.take_calls();
        wm.hooks.drain();
        wm
    }

    #[test]
    fn locking_defers_layout_until_the_outermost_unlock() {
        let mut wm = wm(2);

        wm.lock();
        wm.lock();
        wm.move_monitor(0, Rectangle::new(0, 0, 640, 480), [None; 4])
            .unwrap();
        wm.move_monitor(1, Rectangle::new(640, 0, 640, 480), [None; 4])
            .unwrap();

        assert_eq!(wm.frames.layout_count(), 0);
        assert!(wm.monitors[0].dirty && wm.monitors[1].dirty);

        wm.unlock();
        assert_eq!(wm.frames.layout_count(), 0, "still locked once");

        wm.unlock();
        assert_eq!(wm.frames.layout_count(), 2);
        assert!(!wm.monitors[0].dirty && !wm.monitors[1].dirty);
    }

    #[test]
    fn unlocking_more_than_locking_stays_clamped() {
        let mut wm = wm(1);

        wm.unlock();
        wm.unlock();
        assert_eq!(wm.lock_count, 0);

        // a following lock/unlock pair still behaves normally
        wm.lock();
        wm.move_monitor(0, Rectangle::new(0, 0, 640, 480), [None; 4])
            .unwrap();
        assert_eq!(wm.frames.layout_count(), 0);
        wm.unlock();
        assert_eq!(wm.frames.layout_count(), 1);
    }

    #[test]
    fn pad_and_gap_shrink_the_tiled_rect() {
        let mut wm = wm(1);
        wm.config.global.window_gap = 5;
        wm.set_monitor_pads(0, [Some(10), Some(10), Some(10), Some(10)])
            .unwrap();
        wm.move_monitor(0, Rectangle::new(0, 0, 100, 100), [None; 4])
            .unwrap();

        let tiled = wm
            .frames
            .calls
            .iter()
            .rev()
            .find(|c| matches!(c, FrameCall::Tiled(..)));
        match tiled {
            // pad insets every edge, the gap only the top-left corner
            Some(FrameCall::Tiled(_, rect)) => {
                assert_eq!(*rect, Rectangle::new(15, 15, 75, 75));
            },
            other => panic!("expected a tiled layout, got {:?}", other),
        }
    }

    #[test]
    fn floating_tags_are_arranged_against_the_padded_rect() {
        let mut wm = wm(1);
        wm.set_monitor_pads(0, [Some(10), Some(10), Some(10), Some(10)])
            .unwrap();
        wm.frames.pool.set_floating(TagId(0), true);
        wm.frames.take_calls();

        wm.apply_layout(0);
        assert_eq!(
            wm.frames.calls.first(),
            Some(&FrameCall::Floating(TagId(0), Rectangle::new(10, 10, 780, 580)))
        );
    }

    #[test]
    fn focus_switch_remembers_and_restores_the_pointer() {
        let mut wm = wm(2);
        wm.display.pointer = Point::new(100, 50);

        wm.focus_monitor(1);
        assert_eq!(wm.monitors.current_index(), 1);
        assert_eq!(wm.monitors[0].mouse, Point::new(100, 50));
        // the new monitor has no memory yet, so the pointer lands on its origin
        assert_eq!(wm.display.warps, vec![Point::new(800, 0)]);
        assert!(wm.display.discards > 0);

        // focusing back restores the remembered offset
        wm.focus_monitor(0);
        assert_eq!(wm.display.warps[1], Point::new(100, 50));
    }

    #[test]
    fn focus_switch_leaves_a_pointer_already_on_the_target_alone() {
        let mut wm = wm(2);
        wm.display.pointer = Point::new(900, 50);

        wm.focus_monitor(1);
        assert!(wm.display.warps.is_empty());
        assert_eq!(
            wm.hooks.drain(),
            vec![
                HookEvent::DesktopChanged,
                HookEvent::TagChanged(TagId(1), 1)
            ]
        );
    }

    #[test]
    fn focusing_the_current_monitor_is_a_noop() {
        let mut wm = wm(2);

        wm.focus_monitor(0);
        assert!(wm.frames.calls.is_empty());
        assert!(wm.hooks.drain().is_empty());
    }

    #[test]
    fn focus_clamps_out_of_range_targets() {
        let mut wm = wm(3);

        wm.focus_monitor(99);
        assert_eq!(wm.monitors.current_index(), 2);
        wm.focus_monitor(-7);
        assert_eq!(wm.monitors.current_index(), 0);
    }

    #[test]
    fn focus_without_a_queryable_pointer_still_warps() {
        /// Display whose pointer can never be queried
        struct BlindDisplay(HeadlessDisplay);

        impl DisplayServer for BlindDisplay {
            fn pointer_position(&self) -> Option<Point> {
                None
            }

            fn warp_pointer(&mut self, point: Point) {
                self.0.warp_pointer(point);
            }

            fn discard_enter_events(&mut self) {
                self.0.discard_enter_events();
            }

            fn dimensions(&self) -> Dimension {
                self.0.dimensions()
            }
        }

        let mut wm = WindowManager::new(
            Config::default(),
            RecordingFrames::with_tags(&["a", "b"]),
            BlindDisplay(HeadlessDisplay::new(Dimension::new(1600, 600))),
            EventLog::default(),
        );
        wm.add_monitor(Rectangle::new(0, 0, 800, 600), TagId(0), [None; 4])
            .unwrap();
        wm.add_monitor(Rectangle::new(800, 0, 800, 600), TagId(1), [None; 4])
            .unwrap();

        wm.focus_monitor(1);
        assert_eq!(wm.monitors[0].mouse, Point::default());
        assert_eq!(wm.display.0.warps, vec![Point::new(800, 0)]);
    }

    #[test]
    fn set_tag_rebinds_shows_and_hides_in_order() {
        let mut wm = wm(1);

        wm.set_tag(0, TagId(1));
        assert_eq!(wm.monitors[0].tag, TagId(1));

        let calls = wm.frames.take_calls();
        let show = calls
            .iter()
            .position(|c| *c == FrameCall::Show(TagId(1)))
            .unwrap();
        let hide = calls
            .iter()
            .position(|c| *c == FrameCall::Hide(TagId(0)))
            .unwrap();
        let layout = calls
            .iter()
            .position(|c| matches!(c, FrameCall::Tiled(..)))
            .unwrap();

        // arrange before showing, hide the old tag after, focus once more
        assert!(layout < show);
        assert!(show < hide);
        assert_eq!(calls.last(), Some(&FrameCall::Focus(TagId(1))));
        assert_eq!(
            wm.hooks.drain(),
            vec![
                HookEvent::DesktopChanged,
                HookEvent::TagChanged(TagId(1), 0)
            ]
        );
    }

    #[test]
    fn set_tag_on_the_owning_monitor_is_a_noop() {
        let mut wm = wm(2);

        wm.set_tag(1, TagId(1));
        assert!(wm.frames.calls.is_empty());
        assert!(wm.hooks.drain().is_empty());
    }

    #[test]
    fn set_tag_swap_is_gated_by_the_setting() {
        let mut wm = wm(2);
        wm.config.global.swap_monitors_to_get_tag = false;

        // tag b is on monitor 1; without swapping this succeeds silently
        wm.set_tag(0, TagId(1));
        assert_eq!(wm.monitors[0].tag, TagId(0));
        assert!(wm.hooks.drain().is_empty());

        wm.config.global.swap_monitors_to_get_tag = true;
        wm.set_tag(0, TagId(1));
        assert_eq!(wm.monitors[0].tag, TagId(1));
        assert_eq!(wm.monitors[1].tag, TagId(0));
        assert_eq!(
            wm.hooks.drain(),
            vec![
                HookEvent::DesktopChanged,
                HookEvent::TagChanged(TagId(0), 1),
                HookEvent::TagChanged(TagId(1), 0)
            ]
        );
    }

    #[test]
    fn add_monitor_shows_arranges_and_announces() {
        let mut wm = wm(1);

        let index = wm
            .add_monitor(Rectangle::new(800, 0, 800, 600), TagId(1), [
                Some(4),
                None,
                None,
                None,
            ])
            .unwrap();

        assert_eq!(index, 1);
        assert_eq!(wm.monitors[1].pad, Padding::new(4, 0, 0, 0));
        assert!(wm
            .frames
            .calls
            .contains(&FrameCall::Show(TagId(1))));
        assert_eq!(
            wm.hooks.drain(),
            vec![HookEvent::TagChanged(TagId(1), 1)]
        );

        // the same tag cannot be added twice
        assert!(matches!(
            wm.add_monitor(Rectangle::new(0, 0, 100, 100), TagId(1), [None; 4]),
            Err(Error::TagInUse(_))
        ));
    }

    #[test]
    fn remove_monitor_hides_the_tag_and_refocuses() {
        let mut wm = wm(3);
        wm.monitors.set_current(2);

        wm.remove_monitor(2).unwrap();
        assert!(wm.frames.calls.contains(&FrameCall::Hide(TagId(2))));
        assert_eq!(wm.monitors.current_index(), 1);
        // the newly focused monitor was rearranged
        assert!(wm.frames.layout_count() > 0);
    }

    #[test]
    fn ensure_monitors_available_spans_the_display() {
        let mut wm = WindowManager::new(
            Config::default(),
            RecordingFrames::with_tags(&["a"]),
            HeadlessDisplay::new(Dimension::new(1920, 1080)),
            EventLog::default(),
        );

        wm.ensure_monitors_available().unwrap();
        assert_eq!(wm.monitors.len(), 1);
        assert_eq!(wm.monitors[0].rect, Rectangle::new(0, 0, 1920, 1080));

        // idempotent
        wm.ensure_monitors_available().unwrap();
        assert_eq!(wm.monitors.len(), 1);
    }

    #[test]
    fn set_monitor_rects_allocates_unused_tags() {
        let mut wm = wm(1);

        wm.set_monitor_rects(&[
            Rectangle::new(0, 0, 800, 600),
            Rectangle::new(800, 0, 800, 600),
        ])
        .unwrap();

        assert_eq!(wm.monitors.len(), 2);
        assert_eq!(wm.monitors[1].tag, TagId(1));

        assert_eq!(
            wm.set_monitor_rects(&[]),
            Err(Error::MissingArgument("at least one monitor is required"))
        );
    }
}
