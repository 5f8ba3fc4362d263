//! Integer geometry value types.

use glam::IVec2;

/// A width/height pair in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Size {
    pub width: i32,
    pub height: i32,
}

impl Size {
    /// Create a new size.
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    /// Zero in both dimensions.
    pub const ZERO: Self = Self::new(0, 0);

    /// Component-wise maximum of two sizes.
    ///
    /// This is the accumulation step used when folding item minimums into
    /// a layout's minimum size.
    #[must_use]
    pub fn expanded_to(self, other: Self) -> Self {
        Self::new(self.width.max(other.width), self.height.max(other.height))
    }

    /// Grow both dimensions.
    #[must_use]
    pub fn grown_by(self, dw: i32, dh: i32) -> Self {
        Self::new(self.width + dw, self.height + dh)
    }

    /// Convert to a `glam` integer vector.
    pub fn to_ivec2(self) -> IVec2 {
        IVec2::new(self.width, self.height)
    }
}

impl From<IVec2> for Size {
    fn from(v: IVec2) -> Self {
        Self::new(v.x, v.y)
    }
}

/// An axis-aligned rectangle: top-left position plus size.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    /// Create a new rectangle.
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self { x, y, width, height }
    }

    /// Zero-sized rectangle at the origin.
    pub const ZERO: Self = Self::new(0, 0, 0, 0);

    /// Create a rectangle at a position with a given size.
    pub const fn from_size(x: i32, y: i32, size: Size) -> Self {
        Self::new(x, y, size.width, size.height)
    }

    /// Right edge (exclusive): `x + width`.
    pub const fn right(&self) -> i32 {
        self.x + self.width
    }

    /// Bottom edge (exclusive): `y + height`.
    pub const fn bottom(&self) -> i32 {
        self.y + self.height
    }

    /// Top-left position as a `glam` integer vector.
    pub fn position(&self) -> IVec2 {
        IVec2::new(self.x, self.y)
    }

    /// Size of the rectangle.
    pub const fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Check if the rectangle has no area.
    pub const fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    /// The same rectangle shifted by an offset.
    #[must_use]
    pub const fn translated(&self, dx: i32, dy: i32) -> Self {
        Self::new(self.x + dx, self.y + dy, self.width, self.height)
    }
}

impl std::fmt::Debug for Rect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Rect({}, {} {}x{})", self.x, self.y, self.width, self.height)
    }
}

/// Margins around a layout's content area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ContentMargins {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl ContentMargins {
    /// Create margins with each side given explicitly.
    pub const fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self { left, top, right, bottom }
    }

    /// The same margin on all four sides.
    pub const fn uniform(value: i32) -> Self {
        Self::new(value, value, value, value)
    }

    /// Total horizontal margin (`left + right`).
    pub const fn horizontal(&self) -> i32 {
        self.left + self.right
    }

    /// Total vertical margin (`top + bottom`).
    pub const fn vertical(&self) -> i32 {
        self.top + self.bottom
    }
}

bitflags::bitflags! {
    /// Directions in which a layout wants to consume extra space.
    ///
    /// Hosts query this to decide whether to hand a layout more width or
    /// height than its size hint asks for.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Orientations: u8 {
        const HORIZONTAL = 1 << 0;
        const VERTICAL = 1 << 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn size_expanded_to_takes_componentwise_max() {
        let a = Size::new(30, 80);
        let b = Size::new(50, 40);
        assert_eq!(a.expanded_to(b), Size::new(50, 80));
        assert_eq!(b.expanded_to(a), Size::new(50, 80));
        assert_eq!(Size::ZERO.expanded_to(a), a);
    }

    #[test]
    fn rect_edges_are_exclusive() {
        let r = Rect::new(10, 20, 100, 50);
        assert_eq!(r.right(), 110);
        assert_eq!(r.bottom(), 70);
        assert_eq!(r.size(), Size::new(100, 50));
        assert!(!r.is_empty());
        assert!(Rect::new(5, 5, 0, 10).is_empty());
    }

    #[test]
    fn rect_translated_preserves_size() {
        let r = Rect::new(1, 2, 3, 4).translated(10, -2);
        assert_eq!(r, Rect::new(11, 0, 3, 4));
    }

    #[test]
    fn margins_sum_per_axis() {
        let m = ContentMargins::new(1, 2, 3, 4);
        assert_eq!(m.horizontal(), 4);
        assert_eq!(m.vertical(), 6);
        assert_eq!(ContentMargins::uniform(5).horizontal(), 10);
    }
}
