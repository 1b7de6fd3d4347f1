//! Interfaces to the collaborators surrounding the monitor core: the frame
//! layout engine, the display server, and hook consumers

use crate::{
    geometry::{Dimension, Point, Rectangle},
    tag::TagId,
};

// =============================== Frames =============================
// ====================================================================

/// The frame-tree layout engine and the tag store behind it. The monitor core
/// never walks frame trees itself, it only asks for whole-tag operations
pub(crate) trait Frames {
    /// Arrange the tag's window tree inside the given rectangle
    fn apply_tiled_layout(&mut self, tag: TagId, rect: Rectangle);

    /// Arrange the tag's floating windows relative to the monitor rectangle
    fn apply_floating_layout(&mut self, tag: TagId, rect: Rectangle);

    /// Restore input focus to the focused frame of the tag
    fn focus_recursive(&mut self, tag: TagId);

    /// Map all windows of the tag
    fn show_recursive(&mut self, tag: TagId);

    /// Unmap all windows of the tag
    fn hide_recursive(&mut self, tag: TagId);

    /// Is the tag in floating mode?
    fn is_floating(&self, tag: TagId) -> bool;

    /// Human-readable tag name
    fn name(&self, tag: TagId) -> String;

    /// Look a tag up by its name
    fn find_by_name(&self, name: &str) -> Option<TagId>;

    /// Find a tag not currently bound to any monitor. `bound` lists the tags
    /// that are in use
    fn find_unused(&self, bound: &[TagId]) -> Option<TagId>;

    /// Look a tag up by its position in the tag list, optionally skipping
    /// tags that are visible on some monitor
    fn by_index(&self, index: usize, skip_visible: bool, bound: &[TagId]) -> Option<TagId>;
}

// ============================ DisplayServer =========================
// ====================================================================

/// Pointer and screen primitives of the display server. Kept behind a trait
/// so focus switching is testable without a display connection
pub(crate) trait DisplayServer {
    /// Current pointer position in root coordinates, if it can be queried
    fn pointer_position(&self) -> Option<Point>;

    /// Move the pointer to the given root coordinates
    fn warp_pointer(&mut self, point: Point);

    /// Drop queued pointer-enter events so that rearranging windows does not
    /// shift input focus to whatever the pointer now happens to hover
    fn discard_enter_events(&mut self);

    /// Total size of the root screen
    fn dimensions(&self) -> Dimension;
}

impl DisplayServer for Box<dyn DisplayServer> {
    fn pointer_position(&self) -> Option<Point> {
        (**self).pointer_position()
    }

    fn warp_pointer(&mut self, point: Point) {
        (**self).warp_pointer(point);
    }

    fn discard_enter_events(&mut self) {
        (**self).discard_enter_events();
    }

    fn dimensions(&self) -> Dimension {
        (**self).dimensions()
    }
}

// ================================ Hooks =============================
// ====================================================================

/// Consumer of state-change notifications (EWMH updates, IPC hooks)
pub(crate) trait Hooks {
    /// The tag shown on the given monitor changed
    fn tag_changed(&mut self, tag: TagId, monitor: usize);

    /// The overall desktop state (focused monitor, tag list) changed
    fn desktop_state_changed(&mut self);
}

/// A single emitted hook
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum HookEvent {
    /// `tag_changed` with the tag and the monitor index it appeared on
    TagChanged(TagId, usize),
    /// `desktop_state_changed`
    DesktopChanged,
}

/// Buffering [`Hooks`] implementation. The binary drains it after every
/// command; tests assert on its contents
#[derive(Debug, Default)]
pub(crate) struct EventLog {
    /// Events in emission order
    events: Vec<HookEvent>,
}

impl EventLog {
    /// Take all buffered events, oldest first
    pub(crate) fn drain(&mut self) -> Vec<HookEvent> {
        std::mem::take(&mut self.events)
    }
}

impl Hooks for EventLog {
    fn tag_changed(&mut self, tag: TagId, monitor: usize) {
        self.events.push(HookEvent::TagChanged(tag, monitor));
    }

    fn desktop_state_changed(&mut self) {
        self.events.push(HookEvent::DesktopChanged);
    }
}

// ============================== Headless ============================
// ====================================================================

/// In-process [`DisplayServer`] used when no display connection is available
/// and throughout the test suite. Records the side effects it is asked for
#[derive(Debug)]
pub(crate) struct HeadlessDisplay {
    /// Simulated pointer position in root coordinates
    pub(crate) pointer:    Point,
    /// Size of the simulated root screen
    pub(crate) dimensions: Dimension,
    /// Every warp target, in request order
    pub(crate) warps:      Vec<Point>,
    /// Number of times the queue was flushed of enter-events
    pub(crate) discards:   usize,
}

impl HeadlessDisplay {
    /// Create a new [`HeadlessDisplay`] with the given screen size
    pub(crate) fn new(dimensions: Dimension) -> Self {
        Self {
            pointer: Point::default(),
            dimensions,
            warps: Vec::new(),
            discards: 0,
        }
    }
}

impl DisplayServer for HeadlessDisplay {
    fn pointer_position(&self) -> Option<Point> {
        Some(self.pointer)
    }

    fn warp_pointer(&mut self, point: Point) {
        log::trace!("headless pointer warp to {}", point);
        self.pointer = point;
        self.warps.push(point);
    }

    fn discard_enter_events(&mut self) {
        self.discards += 1;
    }

    fn dimensions(&self) -> Dimension {
        self.dimensions
    }
}

// =============================== Doubles ============================
// ====================================================================
