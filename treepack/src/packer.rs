use std::cmp::Reverse;

use crate::{
    error::{FitFailure, PackError},
    estimate::{estimate_size, padded_area, takes_space, SizeMode},
    geometry::Rect,
    tree::FreeTree,
    types::{OutputItem, PackOutput, Padding},
};

/// Where `RecursivePacker::pack` starts its search for a container size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Seed {
    /// Start from this exact size.
    Fixed((u32, u32)),

    /// Start from the area-based estimate rounded with this mode.
    Estimate(SizeMode),
}

impl Default for Seed {
    fn default() -> Self {
        Seed::Fixed((4, 4))
    }
}

/// A rectangle that is waiting to be placed.
#[derive(Debug, Clone, Copy)]
struct Entry {
    /// Index into the caller's list of sizes.
    index: usize,

    /// Size including padding.
    size: (u32, u32),

    area: u64,
}

/// Packs rectangles by recursively splitting the free space of a single
/// container.
///
/// Rectangles are placed largest first. Each one goes into the first free
/// region that can hold it, and the rest of that region is split into a strip
/// to its right and a strip below it. This is a greedy heuristic: it is fast
/// and deterministic, but does not find optimal layouts.
#[derive(Debug, Clone, Copy, Default)]
pub struct RecursivePacker {
    padding: Padding,
    max_size: Option<(u32, u32)>,
    seed: Seed,
}

impl RecursivePacker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the margin placed around every rectangle.
    pub fn padding(self, padding: Padding) -> Self {
        Self { padding, ..self }
    }

    /// Bounds the container size that `pack` will grow to.
    pub fn max_size(self, max_size: (u32, u32)) -> Self {
        Self {
            max_size: Some(max_size),
            ..self
        }
    }

    /// Sets the container size that `pack` tries first.
    pub fn seed(self, seed: Seed) -> Self {
        Self { seed, ..self }
    }

    /// Packs `sizes` into a container of exactly `container`.
    ///
    /// Fails without building any layout if the padded rectangles need more
    /// area than the container has, or if any one of them is too big for it.
    pub fn try_pack(
        &self,
        sizes: &[(u32, u32)],
        container: (u32, u32),
    ) -> Result<PackOutput, PackError> {
        let entries = self.entries(sizes);
        check_bounds(sizes, self.padding, container)?;

        log::trace!(
            "Packing {} items into container of size {:?}",
            entries.len(),
            container
        );

        let positions = self.place(&entries, sizes.len(), container)?;

        let items = positions
            .into_iter()
            .zip(sizes)
            .map(|(pos, &size)| OutputItem {
                rect: Rect::new(pos, size),
            })
            .collect();

        Ok(PackOutput {
            size: container,
            items,
        })
    }

    /// Packs `sizes` into a container of exactly `container`, writing the
    /// results into `positions`.
    ///
    /// `positions` is left untouched if packing fails.
    pub fn try_pack_into(
        &self,
        sizes: &[(u32, u32)],
        positions: &mut [(u32, u32)],
        container: (u32, u32),
    ) -> Result<(), PackError> {
        check_lengths(sizes, positions)?;

        let output = self.try_pack(sizes, container)?;
        output.write_positions(positions);

        Ok(())
    }

    /// Packs `sizes` into the smallest container this packer can find.
    ///
    /// Starting from the seed size, the container is doubled on both axes each
    /// time packing fails, and every attempt starts over from an empty
    /// container. Growth only stops early if `max_size` is reached.
    pub fn pack(&self, sizes: &[(u32, u32)]) -> Result<PackOutput, PackError> {
        let mut size = self.seed_size(sizes);

        loop {
            let err = match self.try_pack(sizes, size) {
                Ok(output) => {
                    log::trace!("Packed {} items into {:?}", sizes.len(), size);
                    return Ok(output);
                }
                Err(err) if err.is_impossible_fit() => err,
                Err(err) => return Err(err),
            };

            let next_size = self.grow(size);
            if next_size == size {
                log::debug!("Cannot grow past {:?}: {}", size, err);
                return Err(err);
            }

            log::debug!("{}, retrying with {:?}", err, next_size);
            size = next_size;
        }
    }

    /// Packs `sizes` into the smallest container this packer can find, writing
    /// the results into `positions` and returning the container size.
    pub fn pack_into(
        &self,
        sizes: &[(u32, u32)],
        positions: &mut [(u32, u32)],
    ) -> Result<(u32, u32), PackError> {
        check_lengths(sizes, positions)?;

        let output = self.pack(sizes)?;
        output.write_positions(positions);

        Ok(output.size())
    }

    /// Pads every rectangle that takes up space and orders them from largest
    /// to smallest. Equal areas keep their input order.
    fn entries(&self, sizes: &[(u32, u32)]) -> Vec<Entry> {
        let mut entries: Vec<Entry> = sizes
            .iter()
            .enumerate()
            .filter(|(_, &size)| takes_space(size))
            .map(|(index, &size)| {
                let size = self.padding.apply(size);
                Entry {
                    index,
                    size,
                    area: u64::from(size.0) * u64::from(size.1),
                }
            })
            .collect();

        entries.sort_by_key(|entry| Reverse(entry.area));
        entries
    }

    fn place(
        &self,
        entries: &[Entry],
        len: usize,
        container: (u32, u32),
    ) -> Result<Vec<(u32, u32)>, PackError> {
        let mut tree = FreeTree::new(container);

        // Rectangles without area were never entries and stay at the padding
        // offset.
        let mut positions = vec![self.padding.offset((0, 0)); len];

        for entry in entries {
            let node = tree.find(entry.size).ok_or_else(|| {
                log::trace!(
                    "Item {} ({}x{}) did not fit",
                    entry.index,
                    entry.size.0,
                    entry.size.1
                );

                PackError::impossible_fit(
                    container,
                    FitFailure::NoFreeRegion { index: entry.index },
                )
            })?;

            let pos = tree.split(node, entry.size);
            positions[entry.index] = self.padding.offset(pos);
        }

        Ok(positions)
    }

    fn seed_size(&self, sizes: &[(u32, u32)]) -> (u32, u32) {
        let size = match self.seed {
            Seed::Fixed(size) => size,
            Seed::Estimate(mode) => estimate_size(sizes, self.padding, mode),
        };

        // Doubling a zero-sized axis would never make progress.
        self.clamp((size.0.max(1), size.1.max(1)))
    }

    fn grow(&self, size: (u32, u32)) -> (u32, u32) {
        self.clamp((size.0.saturating_mul(2), size.1.saturating_mul(2)))
    }

    fn clamp(&self, size: (u32, u32)) -> (u32, u32) {
        match self.max_size {
            Some(max_size) => (size.0.min(max_size.0), size.1.min(max_size.1)),
            None => size,
        }
    }
}

fn check_lengths(sizes: &[(u32, u32)], positions: &[(u32, u32)]) -> Result<(), PackError> {
    if sizes.len() == positions.len() {
        Ok(())
    } else {
        Err(PackError::invalid_argument(format!(
            "expected {} positions to match the number of sizes, got {}",
            sizes.len(),
            positions.len()
        )))
    }
}

/// Cheap checks that rule out containers that can never work. Passing them
/// does not mean the rectangles will fit.
///
/// Rectangles without area are never placed, but their padding still counts
/// here so that their reported position stays inside the container.
fn check_bounds(
    sizes: &[(u32, u32)],
    padding: Padding,
    container: (u32, u32),
) -> Result<(), PackError> {
    let required = padded_area(sizes, padding);
    let available = u64::from(container.0) * u64::from(container.1);

    if required > available {
        return Err(PackError::impossible_fit(
            container,
            FitFailure::AreaExceeded {
                required,
                available,
            },
        ));
    }

    let container_rect = Rect::new((0, 0), container);
    let too_large = sizes
        .iter()
        .map(|&size| padding.apply(size))
        .enumerate()
        .find(|&(_, size)| !container_rect.can_hold(size));

    if let Some((index, size)) = too_large {
        return Err(PackError::impossible_fit(
            container,
            FitFailure::TooLarge { index, size },
        ));
    }

    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;

    use insta::assert_snapshot;
    use rand::{rngs::SmallRng, Rng, SeedableRng};

    fn padded_rects(output: &PackOutput, padding: Padding) -> Vec<Rect> {
        output
            .items()
            .iter()
            .filter(|item| takes_space(item.size()))
            .map(|item| {
                let pos = item.position();
                Rect::new((pos.0 - padding.x, pos.1 - padding.y), padding.apply(item.size()))
            })
            .collect()
    }

    fn assert_valid(output: &PackOutput, padding: Padding) {
        let container = Rect::new((0, 0), output.size());
        let rects = padded_rects(output, padding);

        for (i, a) in rects.iter().enumerate() {
            assert!(container.contains(a), "{:?} is outside of {:?}", a, container);

            for b in &rects[i + 1..] {
                assert!(!a.intersects(b), "{:?} overlaps {:?}", a, b);
            }
        }
    }

    fn positions(output: &PackOutput) -> String {
        format!("{:?}", output.positions().collect::<Vec<_>>())
    }

    #[test]
    fn four_images() {
        let _ = env_logger::try_init();

        let sizes = &[(100, 100), (200, 200), (300, 300), (400, 400)];
        let padding = Padding::uniform(10);
        let packer = RecursivePacker::new().padding(padding);

        let output = packer.try_pack(sizes, (1000, 1000)).unwrap();

        assert_eq!(output.size(), (1000, 1000));
        assert_valid(&output, padding);
        assert_snapshot!(positions(&output), @"[(10, 430), (750, 10), (430, 10), (10, 10)]");
    }

    #[test]
    fn perfect_pack() {
        let sizes = &[(32, 32); 4];
        let packer = RecursivePacker::new();

        let output = packer.try_pack(sizes, (64, 64)).unwrap();

        assert_valid(&output, Padding::default());
        assert_snapshot!(positions(&output), @"[(0, 0), (32, 0), (0, 32), (32, 32)]");
        assert_eq!(output.occupancy(), 1.0);
    }

    #[test]
    fn impossible_to_fit() {
        let sizes = &[(5, 30), (100, 25), (50, 50), (50, 50)];
        let packer = RecursivePacker::new();

        let err = packer.try_pack(sizes, (100, 100)).unwrap_err();

        // The area check passes, so this fails while searching the tree.
        assert_eq!(
            err,
            PackError::ImpossibleFit {
                size: (100, 100),
                cause: FitFailure::NoFreeRegion { index: 0 },
            }
        );
    }

    #[test]
    fn area_exceeded_fails_fast() {
        let sizes = &[(60, 60), (60, 60), (60, 60)];
        let packer = RecursivePacker::new();

        let err = packer.try_pack(sizes, (100, 100)).unwrap_err();

        assert_eq!(
            err,
            PackError::ImpossibleFit {
                size: (100, 100),
                cause: FitFailure::AreaExceeded {
                    required: 10800,
                    available: 10000,
                },
            }
        );
    }

    #[test]
    fn padding_counts_towards_area_check() {
        // Fits exactly without padding, but not with it.
        let sizes = &[(50, 50); 4];

        assert!(RecursivePacker::new().try_pack(sizes, (100, 100)).is_ok());

        let err = RecursivePacker::new()
            .padding(Padding::uniform(1))
            .try_pack(sizes, (100, 100))
            .unwrap_err();
        assert!(matches!(
            err,
            PackError::ImpossibleFit {
                cause: FitFailure::AreaExceeded { .. },
                ..
            }
        ));
    }

    #[test]
    fn too_large_fails_fast() {
        let sizes = &[(10, 10), (200, 1)];
        let packer = RecursivePacker::new();

        let err = packer.try_pack(sizes, (100, 100)).unwrap_err();

        assert_eq!(
            err,
            PackError::ImpossibleFit {
                size: (100, 100),
                cause: FitFailure::TooLarge {
                    index: 1,
                    size: (200, 1),
                },
            }
        );
    }

    #[test]
    fn indices_stay_aligned() {
        // Smallest first, so sorting has to reverse everything.
        let sizes = &[(8, 8), (16, 16), (32, 32)];
        let output = RecursivePacker::new().try_pack(sizes, (64, 64)).unwrap();

        for (item, &size) in output.items().iter().zip(sizes) {
            assert_eq!(item.size(), size);
        }

        assert_eq!(output.items()[2].position(), (0, 0));
        assert_eq!(output.items()[1].position(), (32, 0));
        assert_eq!(output.items()[0].position(), (48, 0));
    }

    #[test]
    fn empty_rects_take_no_space() {
        let sizes = &[(0, 0), (64, 64), (0, 10), (10, 0)];
        let padding = Padding::uniform(2);
        let packer = RecursivePacker::new().padding(padding);

        // The padding around the empty rects takes 128 more than 68x68.
        assert!(packer.try_pack(sizes, (68, 68)).is_err());

        let output = packer.try_pack(sizes, (68, 96)).unwrap();

        assert_valid(&output, padding);
        assert_snapshot!(positions(&output), @"[(2, 2), (2, 2), (2, 2), (2, 2)]");
    }

    #[test]
    fn padding_of_empty_rects_must_fit() {
        let packer = RecursivePacker::new().padding(Padding::uniform(10));

        let err = packer.try_pack(&[(0, 0)], (1, 1)).unwrap_err();
        assert_eq!(
            err,
            PackError::ImpossibleFit {
                size: (1, 1),
                cause: FitFailure::AreaExceeded {
                    required: 400,
                    available: 1,
                },
            }
        );

        // Enough area, but too short for the 20x20 padded rect.
        let err = packer.try_pack(&[(0, 0)], (400, 1)).unwrap_err();
        assert_eq!(
            err,
            PackError::ImpossibleFit {
                size: (400, 1),
                cause: FitFailure::TooLarge {
                    index: 0,
                    size: (20, 20),
                },
            }
        );

        let output = packer.try_pack(&[(0, 0)], (20, 20)).unwrap();
        assert_eq!(output.items()[0].position(), (10, 10));
    }

    #[test]
    fn no_rects() {
        let output = RecursivePacker::new().try_pack(&[], (0, 0)).unwrap();

        assert_eq!(output.size(), (0, 0));
        assert!(output.items().is_empty());
    }

    #[test]
    fn deterministic() {
        let sizes = &[(12, 7), (7, 12), (9, 9), (3, 20), (20, 3), (9, 9), (1, 1)];
        let packer = RecursivePacker::new().padding(Padding::new(1, 2));

        let first = packer.try_pack(sizes, (64, 64)).unwrap();
        let second = packer.try_pack(sizes, (64, 64)).unwrap();

        assert_valid(&first, Padding::new(1, 2));
        assert_snapshot!(
            positions(&first),
            @"[(1, 2), (1, 13), (10, 13), (1, 29), (15, 2), (21, 13), (37, 2)]"
        );
        assert_eq!(first, second);
    }

    #[test]
    fn pack_into_buffer() {
        let sizes = &[(32, 32); 4];
        let mut buffer = [(0, 0); 4];

        RecursivePacker::new()
            .try_pack_into(sizes, &mut buffer, (64, 64))
            .unwrap();

        assert_eq!(buffer, [(0, 0), (32, 0), (0, 32), (32, 32)]);
    }

    #[test]
    fn failed_pack_leaves_buffer_untouched() {
        let sizes = &[(5, 30), (100, 25), (50, 50), (50, 50)];
        let mut buffer = [(7, 7); 4];

        let result = RecursivePacker::new().try_pack_into(sizes, &mut buffer, (100, 100));

        assert!(result.is_err());
        assert_eq!(buffer, [(7, 7); 4]);
    }

    #[test]
    fn mismatched_buffer() {
        let sizes = &[(32, 32); 4];
        let mut buffer = [(0, 0); 3];
        let packer = RecursivePacker::new();

        let err = packer
            .try_pack_into(sizes, &mut buffer, (64, 64))
            .unwrap_err();
        assert!(matches!(err, PackError::InvalidArgument { .. }));

        let err = packer.pack_into(sizes, &mut buffer).unwrap_err();
        assert!(matches!(err, PackError::InvalidArgument { .. }));
    }

    #[test]
    fn auto_size() {
        let _ = env_logger::try_init();

        let sizes = &[
            (5, 30),
            (100, 25),
            (50, 50),
            (50, 50),
            (8, 8),
            (8, 8),
            (8, 8),
        ];
        let packer = RecursivePacker::new();

        let output = packer.pack(sizes).unwrap();

        assert_eq!(output.size(), (128, 128));
        assert_valid(&output, Padding::default());
        assert_snapshot!(
            positions(&output),
            @"[(100, 25), (0, 0), (0, 25), (50, 25), (100, 0), (108, 0), (116, 0)]"
        );

        let mut buffer = [(0, 0); 7];
        assert_eq!(packer.pack_into(sizes, &mut buffer).unwrap(), (128, 128));
        assert!(buffer.iter().copied().eq(output.positions()));
    }

    #[test]
    fn auto_size_from_estimate() {
        let sizes = &[(32, 32); 4];
        let packer = RecursivePacker::new().seed(Seed::Estimate(SizeMode::PowerOfTwo));

        let output = packer.pack(sizes).unwrap();

        assert_eq!(output.size(), (64, 64));
    }

    #[test]
    fn auto_size_covers_largest_rect() {
        let sizes = &[(3, 3), (300, 5), (2, 90)];
        let padding = Padding::new(4, 1);

        let output = RecursivePacker::new().padding(padding).pack(sizes).unwrap();

        let size = output.size();
        assert!(size.0 >= 308);
        assert!(size.1 >= 92);
        assert_valid(&output, padding);
    }

    #[test]
    fn auto_size_of_nothing() {
        let output = RecursivePacker::new()
            .seed(Seed::Estimate(SizeMode::Minimum))
            .pack(&[(0, 0)])
            .unwrap();

        assert_eq!(output.size(), (1, 1));
        assert_eq!(output.positions().collect::<Vec<_>>(), vec![(0, 0)]);
    }

    #[test]
    fn growth_stops_at_max_size() {
        let sizes = &[(100, 100), (100, 100)];
        let packer = RecursivePacker::new().max_size((150, 150));

        let err = packer.pack(sizes).unwrap_err();

        assert!(matches!(
            err,
            PackError::ImpossibleFit {
                size: (150, 150),
                ..
            }
        ));
    }

    #[test]
    fn growth_reaches_max_size() {
        let sizes = &[(100, 100), (100, 100)];
        let packer = RecursivePacker::new().max_size((200, 100));

        let output = packer.pack(sizes).unwrap();

        assert_eq!(output.size(), (200, 100));
    }

    #[test]
    fn random_layouts() {
        let mut rng = SmallRng::seed_from_u64(0x7ee9ac);

        for _ in 0..200 {
            let count = rng.random_range(1..40);
            let sizes: Vec<(u32, u32)> = (0..count)
                .map(|_| (rng.random_range(0..64), rng.random_range(0..64)))
                .collect();
            let padding = Padding::new(rng.random_range(0..3), rng.random_range(0..3));
            let packer = RecursivePacker::new().padding(padding);

            let output = packer.pack(&sizes).unwrap();
            assert_valid(&output, padding);
            assert_eq!(output.items().len(), sizes.len());

            // Packing again into the discovered size gives the same layout.
            let again = packer.try_pack(&sizes, output.size()).unwrap();
            assert_eq!(again, output);

            let container = (rng.random_range(1..256), rng.random_range(1..256));
            match packer.try_pack(&sizes, container) {
                Ok(output) => assert_valid(&output, padding),
                Err(PackError::ImpossibleFit { size, .. }) => assert_eq!(size, container),
                Err(err) => panic!("unexpected error {}", err),
            }

            let required: u64 = sizes
                .iter()
                .map(|&(w, h)| u64::from(w + 2 * padding.x) * u64::from(h + 2 * padding.y))
                .sum();
            if required > u64::from(container.0) * u64::from(container.1) {
                let err = packer.try_pack(&sizes, container).unwrap_err();
                assert!(matches!(
                    err,
                    PackError::ImpossibleFit {
                        cause: FitFailure::AreaExceeded { .. },
                        ..
                    }
                ));
            }
        }
    }
}
