/// An axis-aligned rectangle in container space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rect {
    pub pos: (u32, u32),
    pub size: (u32, u32),
}

impl Rect {
    #[inline]
    pub fn new(pos: (u32, u32), size: (u32, u32)) -> Self {
        Self { pos, size }
    }

    #[inline]
    pub fn max(&self) -> (u32, u32) {
        (self.pos.0 + self.size.0, self.pos.1 + self.size.1)
    }

    #[inline]
    pub fn area(&self) -> u64 {
        u64::from(self.size.0) * u64::from(self.size.1)
    }

    /// Whether both dimensions of `size` fit inside this rectangle.
    #[inline]
    pub fn can_hold(&self, size: (u32, u32)) -> bool {
        self.size.0 >= size.0 && self.size.1 >= size.1
    }

    /// Tells whether the interiors of the two rectangles overlap. Rectangles
    /// that only share an edge, or that have no area, never intersect.
    pub fn intersects(&self, other: &Rect) -> bool {
        let (self_max, other_max) = (self.max(), other.max());

        self.area() > 0
            && other.area() > 0
            && self.pos.0 < other_max.0
            && other.pos.0 < self_max.0
            && self.pos.1 < other_max.1
            && other.pos.1 < self_max.1
    }

    pub fn contains(&self, other: &Rect) -> bool {
        let (self_max, other_max) = (self.max(), other.max());

        other.pos.0 >= self.pos.0
            && other.pos.1 >= self.pos.1
            && other_max.0 <= self_max.0
            && other_max.1 <= self_max.1
    }
}
