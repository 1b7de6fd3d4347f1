//! Structures used to map areas on the screen

use crate::error::Error;
use serde::{Deserialize, Serialize};
use std::{
    fmt,
    ops::{Add, Sub, SubAssign},
    str::FromStr,
};

// =============================== Point ==============================
// ====================================================================

/// A location in the global (root) coordinate space. When this is used with a
/// [`Rectangle`], it represents the top-left corner
#[derive(
    Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub(crate) struct Point {
    /// X-coordinate
    pub(crate) x: i32,
    /// Y-coordinate
    pub(crate) y: i32,
}

impl Point {
    /// Create a new [`Point`]
    pub(crate) const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Check if [`Point`] is contained within the given [`Rectangle`]
    pub(crate) const fn is_inside(self, rect: Rectangle) -> bool {
        rect.contains(self)
    }

    /// Return the [`Point`] relative to the given [`Point`]
    pub(crate) const fn relative(self, p: Self) -> Self {
        Self {
            x: self.x - p.x,
            y: self.y - p.y,
        }
    }

    /// Clamp both coordinates into `[0, dim - 1]`
    pub(crate) fn clamped(self, dim: Dimension) -> Self {
        Self {
            x: self.x.clamp(0, (dim.width as i32 - 1).max(0)),
            y: self.y.clamp(0, (dim.height as i32 - 1).max(0)),
        }
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "x: {}, y: {}", self.x, self.y)
    }
}

impl Add<Self> for Point {
    type Output = Self;

    fn add(self, other: Self) -> Self::Output {
        Self::Output {
            x: self.x + other.x,
            y: self.y + other.y,
        }
    }
}

impl Sub<Self> for Point {
    type Output = Self;

    fn sub(self, other: Self) -> Self::Output {
        Self::Output {
            x: self.x - other.x,
            y: self.y - other.y,
        }
    }
}

// ============================= Dimension ===========================
// ====================================================================

/// A `width` and a `height`: the area of a [`Rectangle`]
#[derive(
    Debug, Default, Copy, Clone, PartialOrd, Ord, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
pub(crate) struct Dimension {
    /// The width of the [`Rectangle`]
    pub(crate) width:  u32,
    /// The height of the [`Rectangle`]
    pub(crate) height: u32,
}

impl Dimension {
    /// Create a new [`Dimension`]
    pub(crate) const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Check if either side is zero
    pub(crate) const fn is_degenerate(self) -> bool {
        self.width == 0 || self.height == 0
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "width: {}, height: {}", self.width, self.height)
    }
}

// ============================== Padding =============================
// ====================================================================

/// Per-edge inset applied to a monitor before its contents are laid out
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct Padding {
    /// Padding on the top
    pub(crate) top:    u32,
    /// Padding on the right
    pub(crate) right:  u32,
    /// Padding on the bottom
    pub(crate) bottom: u32,
    /// Padding on the left
    pub(crate) left:   u32,
}

impl Padding {
    /// Create a new [`Padding`]
    pub(crate) const fn new(top: u32, right: u32, bottom: u32, left: u32) -> Self {
        Self { top, right, bottom, left }
    }
}

// ============================= Rectangle ============================
// ====================================================================

/// A rectangular region of the root coordinate space
#[derive(
    Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub(crate) struct Rectangle {
    /// Represents the top-left corner of the rectangle
    pub(crate) point:     Point,
    /// The width and height of the rectangle
    pub(crate) dimension: Dimension,
}

/// Do the half-open intervals `[a1, a2)` and `[b1, b2)` strictly overlap?
const fn intervals_intersect(a1: i32, a2: i32, b1: i32, b2: i32) -> bool {
    let lo = if a1 > b1 { a1 } else { b1 };
    let hi = if a2 < b2 { a2 } else { b2 };
    lo < hi
}

impl Rectangle {
    /// Create a new [`Rectangle`]
    pub(crate) const fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            point:     Point::new(x, y),
            dimension: Dimension::new(width, height),
        }
    }

    /// Create a [`Rectangle`] from its corners, dropping degenerate results.
    /// `(x2, y2)` is exclusive
    pub(crate) fn from_corners(x1: i32, y1: i32, x2: i32, y2: i32) -> Option<Self> {
        if x1 >= x2 || y1 >= y2 {
            return None;
        }

        Some(Self::new(x1, y1, (x2 - x1) as u32, (y2 - y1) as u32))
    }

    /// Check if the [`Rectangle`] has a zero width or height
    pub(crate) const fn is_degenerate(&self) -> bool {
        self.dimension.is_degenerate()
    }

    /// Return the area of the [`Rectangle`]
    pub(crate) const fn area(&self) -> u64 {
        self.dimension.width as u64 * self.dimension.height as u64
    }

    /// X-coordinate just past the right edge
    pub(crate) const fn right(&self) -> i32 {
        self.point.x + self.dimension.width as i32
    }

    /// Y-coordinate just past the bottom edge
    pub(crate) const fn bottom(&self) -> i32 {
        self.point.y + self.dimension.height as i32
    }

    /// Test whether the given [`Point`] is contained within the [`Rectangle`].
    /// The left and top edges are inclusive, the right and bottom exclusive
    pub(crate) const fn contains(&self, p: Point) -> bool {
        p.x >= self.point.x && p.x < self.right() && p.y >= self.point.y && p.y < self.bottom()
    }

    /// Do two [`Rectangle`]s strictly overlap? Touching edges do not count
    pub(crate) const fn intersects(&self, other: &Self) -> bool {
        intervals_intersect(self.point.x, self.right(), other.point.x, other.right())
            && intervals_intersect(self.point.y, self.bottom(), other.point.y, other.bottom())
    }

    /// Return the overlapping region of two [`Rectangle`]s, or `None` if they
    /// do not strictly intersect
    pub(crate) fn intersection(&self, other: &Self) -> Option<Self> {
        Self::from_corners(
            self.point.x.max(other.point.x),
            self.point.y.max(other.point.y),
            self.right().min(other.right()),
            self.bottom().min(other.bottom()),
        )
    }
}

impl fmt::Display for Rectangle {
    /// Format as `WxH+X+Y`, the textual form taken by RECT command arguments
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{}x{}{:+}{:+}",
            self.dimension.width, self.dimension.height, self.point.x, self.point.y
        )
    }
}

impl FromStr for Rectangle {
    type Err = Error;

    /// Parse the textual form `WIDTHxHEIGHT+X+Y` (offsets are signed)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || Error::InvalidRectangle(s.to_owned());

        let (width, rest) = s.split_once('x').ok_or_else(invalid)?;
        let xoff = rest.find(['+', '-']).ok_or_else(invalid)?;
        let (height, offsets) = rest.split_at(xoff);
        let yoff = offsets[1..]
            .find(['+', '-'])
            .map(|i| i + 1)
            .ok_or_else(invalid)?;
        let (x, y) = offsets.split_at(yoff);

        Ok(Self {
            point:     Point::new(
                x.parse().map_err(|_| invalid())?,
                y.parse().map_err(|_| invalid())?,
            ),
            dimension: Dimension::new(
                width.parse().map_err(|_| invalid())?,
                height.parse().map_err(|_| invalid())?,
            ),
        })
    }
}

impl Sub<Padding> for Rectangle {
    type Output = Self;

    fn sub(self, padding: Padding) -> Self::Output {
        Self::Output {
            point:     Point {
                x: self.point.x + padding.left as i32,
                y: self.point.y + padding.top as i32,
            },
            dimension: Dimension {
                width:  self
                    .dimension
                    .width
                    .saturating_sub(padding.left + padding.right),
                height: self
                    .dimension
                    .height
                    .saturating_sub(padding.top + padding.bottom),
            },
        }
    }
}

impl SubAssign<Padding> for Rectangle {
    fn sub_assign(&mut self, padding: Padding) {
        *self = *self - padding;
    }
}
