use crate::geometry::Rect;

/// A margin added to every side of every rectangle before it is packed.
///
/// A rectangle of size `(w, h)` occupies `(w + 2 * x, h + 2 * y)` of the
/// container, and its reported position is offset by `(x, y)` so that it sits
/// in the middle of its padded region.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Padding {
    pub x: u32,
    pub y: u32,
}

impl Padding {
    #[inline]
    pub fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }

    #[inline]
    pub fn uniform(value: u32) -> Self {
        Self { x: value, y: value }
    }

    /// The size a rectangle takes up in the container once padded.
    #[inline]
    pub fn apply(&self, size: (u32, u32)) -> (u32, u32) {
        (
            size.0.saturating_add(self.x.saturating_mul(2)),
            size.1.saturating_add(self.y.saturating_mul(2)),
        )
    }

    #[inline]
    pub(crate) fn offset(&self, pos: (u32, u32)) -> (u32, u32) {
        (pos.0 + self.x, pos.1 + self.y)
    }
}

impl From<u32> for Padding {
    fn from(value: u32) -> Self {
        Padding::uniform(value)
    }
}

impl From<(u32, u32)> for Padding {
    fn from((x, y): (u32, u32)) -> Self {
        Padding::new(x, y)
    }
}

/// A rectangle that was placed by a packing function.
///
/// Exposes the unpadded size of the input along with where it ended up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutputItem {
    pub(crate) rect: Rect,
}

impl OutputItem {
    #[inline]
    pub fn position(&self) -> (u32, u32) {
        self.rect.pos
    }

    #[inline]
    pub fn size(&self) -> (u32, u32) {
        self.rect.size
    }

    #[inline]
    pub fn min(&self) -> (u32, u32) {
        self.rect.pos
    }

    #[inline]
    pub fn max(&self) -> (u32, u32) {
        self.rect.max()
    }

    #[inline]
    pub fn rect(&self) -> Rect {
        self.rect
    }
}

/// The results from running a packing function.
///
/// `items` lines up with the sizes passed in: the item at index `i` is the
/// placement of the `i`th input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackOutput {
    pub(crate) size: (u32, u32),
    pub(crate) items: Vec<OutputItem>,
}

impl PackOutput {
    /// The size of the container everything was packed into.
    #[inline]
    pub fn size(&self) -> (u32, u32) {
        self.size
    }

    #[inline]
    pub fn items(&self) -> &[OutputItem] {
        &self.items
    }

    pub fn positions(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        self.items.iter().map(OutputItem::position)
    }

    /// The fraction of the container covered by the unpadded rectangles.
    pub fn occupancy(&self) -> f64 {
        let container = Rect::new((0, 0), self.size).area();
        if container == 0 {
            return 0.0;
        }

        let used: u64 = self.items.iter().map(|item| item.rect.area()).sum();
        used as f64 / container as f64
    }

    pub(crate) fn write_positions(&self, positions: &mut [(u32, u32)]) {
        for (slot, position) in positions.iter_mut().zip(self.positions()) {
            *slot = position;
        }
    }
}
