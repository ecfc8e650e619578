//! Pixel-space primitives shared by the renderer, the clip stack and widgets.
//!
//! All coordinates are window pixels with the origin at the top-left corner
//! and y growing downwards.

use std::ops::{Add, AddAssign, Mul, Neg, Sub};

/// A 2D point or displacement.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2::new(0.0, 0.0);

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

impl Add for Vec2 {
    type Output = Vec2;

    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Vec2 {
    fn add_assign(&mut self, rhs: Vec2) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Vec2 {
    type Output = Vec2;

    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f32> for Vec2 {
    type Output = Vec2;

    fn mul(self, rhs: f32) -> Vec2 {
        Vec2::new(self.x * rhs, self.y * rhs)
    }
}

impl Neg for Vec2 {
    type Output = Vec2;

    fn neg(self) -> Vec2 {
        Vec2::new(-self.x, -self.y)
    }
}

/// Width and height of a region.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// Floating point axis-aligned rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn from_size(size: Size) -> Self {
        Self::new(0.0, 0.0, size.width, size.height)
    }

    pub fn origin(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn offset(&self, delta: Vec2) -> Self {
        Self {
            x: self.x + delta.x,
            y: self.y + delta.y,
            ..*self
        }
    }

    /// A rectangle with no area on either axis covers no pixels.
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    /// Inclusive on every edge: `(x + width, y + height)` is contained.
    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.x
            && point.x <= self.right()
            && point.y >= self.y
            && point.y <= self.bottom()
    }

    /// Overlap of two rectangles. Disjoint inputs produce a zero extent on
    /// the axis that does not overlap, never a negative one.
    pub fn intersect(&self, other: &Rect) -> Rect {
        let x = self.x.max(other.x);
        let y = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());
        Rect::new(x, y, (right - x).max(0.0), (bottom - y).max(0.0))
    }

    /// Pairwise reduction of [`Rect::intersect`] over a sequence.
    ///
    /// Returns `None` for an empty sequence.
    pub fn intersect_all<I>(rects: I) -> Option<Rect>
    where
        I: IntoIterator<Item = Rect>,
    {
        rects.into_iter().reduce(|acc, rect| acc.intersect(&rect))
    }
}

/// Integer rectangle, used for atlas subtextures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct IRect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl IRect {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// True when the rectangle lies entirely within `[0, width] x [0, height]`.
    pub fn fits_within(&self, width: u32, height: u32) -> bool {
        self.x >= 0
            && self.y >= 0
            && self.width >= 0
            && self.height >= 0
            && self.x as i64 + self.width as i64 <= width as i64
            && self.y as i64 + self.height as i64 <= height as i64
    }
}

impl From<IRect> for Rect {
    fn from(rect: IRect) -> Self {
        Rect::new(
            rect.x as f32,
            rect.y as f32,
            rect.width as f32,
            rect.height as f32,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_is_inclusive() {
        let rect = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(rect.contains(Vec2::new(0.0, 0.0)));
        assert!(rect.contains(Vec2::new(10.0, 10.0)));
        assert!(rect.contains(Vec2::new(5.0, 5.0)));
        assert!(!rect.contains(Vec2::new(10.0001, 5.0)));
        assert!(!rect.contains(Vec2::new(-1.0, 5.0)));
    }

    #[test]
    fn test_intersect_overlapping() {
        let a = Rect::new(0.0, 0.0, 100.0, 100.0);
        let b = Rect::new(50.0, 25.0, 100.0, 50.0);
        assert_eq!(a.intersect(&b), Rect::new(50.0, 25.0, 50.0, 50.0));
    }

    #[test]
    fn test_intersect_disjoint_clamps_to_zero() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(20.0, 0.0, 10.0, 10.0);
        let result = a.intersect(&b);
        assert_eq!(result.width, 0.0);
        assert!(result.height >= 0.0);
        assert!(result.is_empty());
    }

    fn permutations(rects: [Rect; 3]) -> Vec<[Rect; 3]> {
        let [a, b, c] = rects;
        vec![
            [a, b, c],
            [a, c, b],
            [b, a, c],
            [b, c, a],
            [c, a, b],
            [c, b, a],
        ]
    }

    #[test]
    fn test_intersect_all_is_order_independent() {
        let triples = [
            [
                Rect::new(0.0, 0.0, 100.0, 100.0),
                Rect::new(10.0, 10.0, 50.0, 50.0),
                Rect::new(40.0, 40.0, 50.0, 50.0),
            ],
            [
                Rect::new(0.0, 0.0, 30.0, 30.0),
                Rect::new(5.0, -10.0, 10.0, 100.0),
                Rect::new(-5.0, 12.0, 40.0, 4.0),
            ],
            // first and last do not overlap at all
            [
                Rect::new(0.0, 0.0, 10.0, 10.0),
                Rect::new(5.0, 5.0, 20.0, 20.0),
                Rect::new(30.0, 30.0, 5.0, 5.0),
            ],
        ];

        for triple in triples {
            let expected = Rect::intersect_all(triple).unwrap();
            assert!(expected.width >= 0.0 && expected.height >= 0.0);
            for order in permutations(triple) {
                let result = Rect::intersect_all(order).unwrap();
                assert_eq!(result.width, expected.width);
                assert_eq!(result.height, expected.height);
                if !expected.is_empty() {
                    assert_eq!(result, expected);
                }
            }
        }
    }

    #[test]
    fn test_intersect_all_empty_sequence() {
        assert_eq!(Rect::intersect_all(Vec::new()), None);
    }

    #[test]
    fn test_vec2_ops() {
        let a = Vec2::new(1.0, 2.0);
        let b = Vec2::new(3.0, 5.0);
        assert_eq!(a + b, Vec2::new(4.0, 7.0));
        assert_eq!(b - a, Vec2::new(2.0, 3.0));
        assert_eq!(a * 2.0, Vec2::new(2.0, 4.0));
        assert_eq!(-a, Vec2::new(-1.0, -2.0));
    }

    #[test]
    fn test_irect_fits_within() {
        assert!(IRect::new(0, 0, 16, 16).fits_within(16, 16));
        assert!(!IRect::new(8, 0, 16, 16).fits_within(16, 16));
        assert!(!IRect::new(-1, 0, 4, 4).fits_within(16, 16));
        assert!(!IRect::new(i32::MAX, 0, 1, 1).fits_within(16, 16));
        assert!(IRect::new(0, 0, 1, 1).fits_within(u32::MAX, u32::MAX));
        let rect: Rect = IRect::new(1, 2, 3, 4).into();
        assert_eq!(rect, Rect::new(1.0, 2.0, 3.0, 4.0));
    }
}
