//! X11 backend for the pointer and screen primitives

use crate::{
    geometry::{Dimension, Point},
    hooks::DisplayServer,
};
use anyhow::{Context, Result};
use x11rb::{
    connection::Connection,
    protocol::{
        xproto::{self, ConnectionExt as _},
        Event,
    },
    rust_connection::RustConnection,
    wrapper::ConnectionExt as _,
};

// ============================== XDisplay ============================
// ====================================================================

/// A live connection to the X-Server
pub(crate) struct XDisplay {
    /// The actual [`Connection`](RustConnection)
    conn:   RustConnection,
    /// Screen number the connection is attached to
    screen: usize,
}

impl XDisplay {
    /// Connect to the display named by `$DISPLAY`
    pub(crate) fn connect() -> Result<Self> {
        let (conn, screen_num) =
            x11rb::connect(None).context("failed to connect to the X-Server")?;

        log::debug!("connected to the X-Server on screen {}", screen_num);

        Ok(Self {
            conn,
            screen: screen_num,
        })
    }

    /// Return the `root` window
    fn root(&self) -> xproto::Window {
        self.conn.setup().roots[self.screen].root
    }
}

impl DisplayServer for XDisplay {
    fn pointer_position(&self) -> Option<Point> {
        let reply = self
            .conn
            .query_pointer(self.root())
            .ok()?
            .reply()
            .map_err(|e| log::warn!("failed to query the pointer: {}", e))
            .ok()?;

        Some(Point {
            x: i32::from(reply.root_x),
            y: i32::from(reply.root_y),
        })
    }

    fn warp_pointer(&mut self, point: Point) {
        let root = self.root();
        let cookie = self
            .conn
            .warp_pointer(x11rb::NONE, root, 0, 0, 0, 0, point.x as i16, point.y as i16);

        if let Err(e) = cookie.and_then(|_| self.conn.flush()) {
            log::warn!("failed to warp the pointer to {}: {}", point, e);
        }
    }

    fn discard_enter_events(&mut self) {
        // Everything queued so far has to arrive before it can be dropped
        if let Err(e) = self.conn.sync() {
            log::warn!("failed to sync with the X-Server: {}", e);
            return;
        }

        while let Ok(Some(event)) = self.conn.poll_for_event() {
            match event {
                Event::EnterNotify(e) => {
                    log::trace!("discarding enter-event for window {}", e.event);
                },
                event => {
                    log::trace!("ignoring event while flushing enter-events: {:?}", event);
                },
            }
        }
    }

    fn dimensions(&self) -> Dimension {
        let screen = &self.conn.setup().roots[self.screen];

        Dimension {
            width:  u32::from(screen.width_in_pixels),
            height: u32::from(screen.height_in_pixels),
        }
    }
}
