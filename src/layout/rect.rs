//! Rect and Point: geometry primitives for layout and drawing.

/// A cell position. Signed so widget arithmetic can step past the origin
/// without wrapping; buffers simply never display such points.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct Point {
    /// Row. Declared first so points order row-major.
    pub y: i32,
    /// Column.
    pub x: i32,
}

impl Point {
    /// Point at column `x`, row `y`.
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { y, x }
    }

    /// Offset by `(dx, dy)`.
    #[inline]
    #[must_use]
    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

/// Screen region: origin plus extent, in cells.
///
/// Unsigned so it always describes something a terminal can show; use
/// [`Rect::min`] and [`Rect::max`] to do signed arithmetic against it.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rect {
    /// Leftmost column.
    pub x: u16,
    /// Top row.
    pub y: u16,
    /// Width in columns.
    pub width: u16,
    /// Height in rows.
    pub height: u16,
}

impl Rect {
    /// Rectangle with no cells.
    pub const ZERO: Self = Self::new(0, 0, 0, 0);

    /// Rectangle at `(x, y)` spanning `width` x `height`.
    #[inline]
    pub const fn new(x: u16, y: u16, width: u16, height: u16) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// `width` x `height` anchored at the origin, e.g. a whole terminal.
    #[inline]
    pub const fn from_size(width: u16, height: u16) -> Self {
        Self::new(0, 0, width, height)
    }

    /// Rectangle spanning `[x1, x2) x [y1, y2)`.
    ///
    /// Negative coordinates are clamped to zero and inverted corners give
    /// an empty rectangle.
    pub fn from_corners(x1: i32, y1: i32, x2: i32, y2: i32) -> Self {
        let clamp = |v: i32| v.clamp(0, i32::from(u16::MAX)) as u16;
        let (x1, y1) = (clamp(x1), clamp(y1));
        let (x2, y2) = (clamp(x2), clamp(y2));
        Self::new(x1, y1, x2.saturating_sub(x1), y2.saturating_sub(y1))
    }

    /// Cell count.
    #[inline]
    pub const fn area(&self) -> u32 {
        self.width as u32 * self.height as u32
    }

    /// No cells at all.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.area() == 0
    }

    /// One past the last column.
    #[inline]
    pub const fn right(&self) -> u16 {
        self.x.saturating_add(self.width)
    }

    /// One past the last row.
    #[inline]
    pub const fn bottom(&self) -> u16 {
        self.y.saturating_add(self.height)
    }

    /// Top-left corner (inclusive).
    #[inline]
    pub const fn min(&self) -> Point {
        Point::new(self.x as i32, self.y as i32)
    }

    /// Bottom-right corner (exclusive).
    #[inline]
    pub const fn max(&self) -> Point {
        Point::new(self.right() as i32, self.bottom() as i32)
    }

    /// Whether the terminal cell at column `x`, row `y` lies inside.
    #[inline]
    pub const fn contains(&self, x: u16, y: u16) -> bool {
        self.contains_point(Point::new(x as i32, y as i32))
    }

    /// Whether `p` lies inside; points left of or above the origin never do.
    #[inline]
    pub const fn contains_point(&self, p: Point) -> bool {
        let (min, max) = (self.min(), self.max());
        p.x >= min.x && p.x < max.x && p.y >= min.y && p.y < max.y
    }

    /// Shrink each side independently; collapses to an empty rectangle at
    /// the top-left corner when the insets exceed the size.
    #[inline]
    #[must_use]
    pub const fn inset(&self, left: u16, top: u16, right: u16, bottom: u16) -> Self {
        let x = self.x.saturating_add(left);
        let y = self.y.saturating_add(top);
        let width = self.width.saturating_sub(left.saturating_add(right));
        let height = self.height.saturating_sub(top.saturating_add(bottom));
        Self::new(x, y, width, height)
    }

    /// Every point of the rectangle, row by row.
    pub fn points(&self) -> impl Iterator<Item = Point> {
        let (min, max) = (self.min(), self.max());
        (min.y..max.y).flat_map(move |y| (min.x..max.x).map(move |x| Point::new(x, y)))
    }
}

impl std::fmt::Debug for Rect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let Self { x, y, width, height } = self;
        write!(f, "Rect[{x},{y} {width}x{height}]")
    }
}

impl std::fmt::Debug for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}
