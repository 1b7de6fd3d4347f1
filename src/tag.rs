//! Tags (logical workspaces) as seen from the monitor core, and the binding
//! of tags to monitors

use crate::{
    geometry::Rectangle,
    hooks::{DisplayServer, Frames, Hooks},
    manager::WindowManager,
};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

// =============================== TagId ==============================
// ====================================================================

/// Opaque handle to a tag owned by the frame/tag collaborator
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub(crate) struct TagId(pub(crate) u32);

// =============================== TagPool ============================
// ====================================================================

/// State kept per tag
#[derive(Debug, Clone)]
struct TagEntry {
    /// Display name, unique within the pool
    name:     String,
    /// Whether the tag lays its windows out floating instead of tiled
    floating: bool,
}

/// A minimal in-process tag store implementing [`Frames`]. Layout requests
/// are logged rather than applied to real windows; this backs the headless
/// command shell and the test suite
#[derive(Debug, Default)]
pub(crate) struct TagPool {
    /// All tags in creation order
    tags: IndexMap<TagId, TagEntry>,
    /// Next handle to hand out
    next: u32,
}

impl TagPool {
    /// Create a pool containing one tag per name. An empty name list still
    /// yields one usable tag, since a window manager without any tag cannot
    /// bind its first monitor
    pub(crate) fn from_names<S: AsRef<str>>(names: &[S]) -> Self {
        let mut pool = Self::default();

        for name in names {
            pool.add(name.as_ref());
        }
        if pool.tags.is_empty() {
            pool.add("default");
        }

        pool
    }

    /// Append a new tag, returning its handle
    pub(crate) fn add(&mut self, name: &str) -> TagId {
        let id = TagId(self.next);
        self.next += 1;
        self.tags.insert(id, TagEntry {
            name:     name.to_owned(),
            floating: false,
        });
        id
    }

    /// Flip a tag into or out of floating mode
    pub(crate) fn set_floating(&mut self, tag: TagId, floating: bool) {
        if let Some(entry) = self.tags.get_mut(&tag) {
            entry.floating = floating;
        }
    }
}

impl Frames for TagPool {
    fn apply_tiled_layout(&mut self, tag: TagId, rect: Rectangle) {
        log::debug!("tiling tag \"{}\" inside {}", self.name(tag), rect);
    }

    fn apply_floating_layout(&mut self, tag: TagId, rect: Rectangle) {
        log::debug!("floating tag \"{}\" relative to {}", self.name(tag), rect);
    }

    fn focus_recursive(&mut self, tag: TagId) {
        log::debug!("focusing tag \"{}\"", self.name(tag));
    }

    fn show_recursive(&mut self, tag: TagId) {
        log::debug!("showing tag \"{}\"", self.name(tag));
    }

    fn hide_recursive(&mut self, tag: TagId) {
        log::debug!("hiding tag \"{}\"", self.name(tag));
    }

    fn is_floating(&self, tag: TagId) -> bool {
        self.tags.get(&tag).map_or(false, |entry| entry.floating)
    }

    fn name(&self, tag: TagId) -> String {
        self.tags
            .get(&tag)
            .map_or_else(|| String::from("???"), |entry| entry.name.clone())
    }

    fn find_by_name(&self, name: &str) -> Option<TagId> {
        self.tags
            .iter()
            .find(|(_, entry)| entry.name == name)
            .map(|(id, _)| *id)
    }

    fn find_unused(&self, bound: &[TagId]) -> Option<TagId> {
        self.tags.keys().find(|id| !bound.contains(id)).copied()
    }

    fn by_index(&self, index: usize, skip_visible: bool, bound: &[TagId]) -> Option<TagId> {
        self.tags
            .keys()
            .filter(|id| !skip_visible || !bound.contains(id))
            .nth(index)
            .copied()
    }
}

// ============================== TagBinder ===========================
// ====================================================================

impl<F: Frames, D: DisplayServer, H: Hooks> WindowManager<F, D, H> {
    /// Bind `tag` to the monitor at `index`.
    ///
    /// If the tag is already visible on that monitor this is a no-op. If it
    /// is visible on another monitor, the two monitors swap tags, but only
    /// when `swap_monitors_to_get_tag` is enabled; with the setting disabled
    /// the call succeeds without any effect
    pub(crate) fn set_tag(&mut self, index: usize, tag: TagId) {
        if self.monitors.get(index).is_none() {
            return;
        }

        match self.monitors.index_of_tag(tag) {
            Some(other) if other == index => {},
            Some(other) => {
                if !self.config.global.swap_monitors_to_get_tag {
                    return;
                }

                let displaced = self.monitors[index].tag;
                self.monitors[other].tag = displaced;
                self.monitors[index].tag = tag;

                self.frames.focus_recursive(tag);
                self.apply_layout(other);
                self.apply_layout(index);
                self.hooks.desktop_state_changed();
                self.hooks.tag_changed(displaced, other);
                self.hooks.tag_changed(tag, index);
            },
            None => {
                let old_tag = self.monitors[index].tag;
                self.monitors[index].tag = tag;

                // arrange before showing to reduce visible flicker
                self.frames.focus_recursive(tag);
                self.apply_layout(index);
                self.frames.show_recursive(tag);
                self.frames.hide_recursive(old_tag);
                // showing windows can steal input focus, so focus again
                self.frames.focus_recursive(tag);
                self.display.discard_enter_events();
                self.hooks.desktop_state_changed();
                self.hooks.tag_changed(tag, index);
            },
        }
    }
}
