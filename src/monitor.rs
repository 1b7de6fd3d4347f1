//! Physical output regions and the ordered registry owning them

use crate::{
    error::Error,
    geometry::{Padding, Point, Rectangle},
    tag::TagId,
};
use std::ops::{Index, IndexMut};

/// Smallest usable monitor width
pub(crate) const WINDOW_MIN_WIDTH: u32 = 20;
/// Smallest usable monitor height
pub(crate) const WINDOW_MIN_HEIGHT: u32 = 20;

// ============================== Monitor =============================
// ====================================================================

/// One physical output region, bound to exactly one tag
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Monitor {
    /// Configured rectangle in root coordinates, before padding
    pub(crate) rect:  Rectangle,
    /// Per-edge inset applied before content is laid out
    pub(crate) pad:   Padding,
    /// The tag shown on this monitor
    pub(crate) tag:   TagId,
    /// Last-known pointer position, as an offset from `rect`'s origin
    pub(crate) mouse: Point,
    /// A layout pass is owed once the global lock is released
    pub(crate) dirty: bool,
}

impl Monitor {
    /// Create a new [`Monitor`] with zeroed padding and pointer memory. It
    /// starts dirty so the first layout pass arranges it
    pub(crate) fn new(rect: Rectangle, tag: TagId) -> Self {
        Self {
            rect,
            pad: Padding::default(),
            tag,
            mouse: Point::default(),
            dirty: true,
        }
    }

    /// The usable rectangle after padding is applied
    pub(crate) fn padded_rect(&self) -> Rectangle {
        self.rect - self.pad
    }

    /// Does the padded rectangle contain the given root coordinate?
    pub(crate) fn contains(&self, p: Point) -> bool {
        self.padded_rect().contains(p)
    }

    /// Translate a root X-coordinate into the pad-relative space
    pub(crate) const fn relative_x(&self, x_root: i32) -> i32 {
        x_root - self.rect.point.x - self.pad.left as i32
    }

    /// Translate a root Y-coordinate into the pad-relative space
    pub(crate) const fn relative_y(&self, y_root: i32) -> i32 {
        y_root - self.rect.point.y - self.pad.top as i32
    }

    /// Store the pointer position as an offset from this monitor's origin,
    /// clamped inside the monitor
    pub(crate) fn remember_pointer(&mut self, p: Point) {
        self.mouse = p.relative(self.rect.point).clamped(self.rect.dimension);
    }

    /// Root coordinate the pointer should be warped to when this monitor
    /// regains focus
    pub(crate) fn warp_target(&self) -> Point {
        self.rect.point + self.mouse
    }

    /// Overwrite the pads that were given, keeping the others
    pub(crate) fn update_pads(&mut self, pads: [Option<u32>; 4]) {
        let [up, right, down, left] = pads;

        if let Some(up) = up {
            self.pad.top = up;
        }
        if let Some(right) = right {
            self.pad.right = right;
        }
        if let Some(down) = down {
            self.pad.bottom = down;
        }
        if let Some(left) = left {
            self.pad.left = left;
        }
    }
}

// ============================== Monitors ============================
// ====================================================================

/// Result of removing a monitor from the registry
#[derive(Debug)]
pub(crate) struct Removed {
    /// The monitor that was taken out
    pub(crate) monitor:   Monitor,
    /// The focused monitor changed and owes a relayout
    pub(crate) refocused: bool,
}

/// The ordered collection of monitors plus the focused index. The index
/// space is the one commands address monitors by.
///
/// Invariant: once a monitor was added, the registry never becomes empty and
/// `current` always stays in range
#[derive(Debug, Default)]
pub(crate) struct Monitors {
    /// Monitors in command-index order
    list:    Vec<Monitor>,
    /// Index of the focused monitor
    current: usize,
}

impl Monitors {
    /// Create an empty registry
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Number of monitors
    pub(crate) fn len(&self) -> usize {
        self.list.len()
    }

    /// Is the registry still uninitialized?
    pub(crate) fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    /// Index of the focused monitor
    pub(crate) const fn current_index(&self) -> usize {
        self.current
    }

    /// Focus the monitor at `index`. Out-of-range values are ignored
    pub(crate) fn set_current(&mut self, index: usize) {
        if index < self.list.len() {
            self.current = index;
        }
    }

    /// The focused monitor, if any monitor exists
    pub(crate) fn current(&self) -> Option<&Monitor> {
        self.list.get(self.current)
    }

    /// Monitor at `index`
    pub(crate) fn get(&self, index: usize) -> Option<&Monitor> {
        self.list.get(index)
    }

    /// Mutable monitor at `index`
    pub(crate) fn get_mut(&mut self, index: usize) -> Option<&mut Monitor> {
        self.list.get_mut(index)
    }

    /// Iterate monitors in index order
    pub(crate) fn iter(&self) -> std::slice::Iter<'_, Monitor> {
        self.list.iter()
    }

    /// Is the tag currently shown on some monitor?
    pub(crate) fn is_tag_bound(&self, tag: TagId) -> bool {
        self.index_of_tag(tag).is_some()
    }

    /// Index of the monitor showing `tag`
    pub(crate) fn index_of_tag(&self, tag: TagId) -> Option<usize> {
        self.list.iter().position(|m| m.tag == tag)
    }

    /// All tags currently bound, in index order
    pub(crate) fn bound_tags(&self) -> Vec<TagId> {
        self.list.iter().map(|m| m.tag).collect()
    }

    /// First monitor whose padded rectangle contains the point
    pub(crate) fn by_point(&self, p: Point) -> Option<usize> {
        self.list.iter().position(|m| m.contains(p))
    }

    /// Append a new monitor. The caller must have checked that `tag` is not
    /// bound elsewhere
    pub(crate) fn add(&mut self, rect: Rectangle, tag: TagId) -> usize {
        debug_assert!(!self.is_tag_bound(tag));
        self.list.push(Monitor::new(rect, tag));
        self.list.len() - 1
    }

    /// Validate that `index` names a removable monitor
    pub(crate) fn removable(&self, index: i32) -> Result<usize, Error> {
        if index < 0 || index as usize >= self.list.len() {
            return Err(Error::InvalidMonitorIndex(index));
        }
        if self.list.len() <= 1 {
            return Err(Error::LastMonitor);
        }

        Ok(index as usize)
    }

    /// Remove the monitor at `index`, keeping the same monitor focused where
    /// possible and falling back to the last valid index otherwise
    pub(crate) fn remove(&mut self, index: i32) -> Result<Removed, Error> {
        let index = self.removable(index)?;

        if self.current > index {
            // same monitor stays selected after the removal
            self.current -= 1;
        }
        let monitor = self.list.remove(index);

        let mut refocused = false;
        if self.current >= self.list.len() {
            self.current -= 1;
            refocused = true;
        }

        Ok(Removed { monitor, refocused })
    }
}

impl Index<usize> for Monitors {
    type Output = Monitor;

    fn index(&self, index: usize) -> &Self::Output {
        &self.list[index]
    }
}

impl IndexMut<usize> for Monitors {
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        &mut self.list[index]
    }
}
